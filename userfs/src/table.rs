//! # 文件表
//!
//! 全部文件存放在槽位表中，以[`FileId`]编号；描述符只持有ID。
//! 按名称可见的文件另外记录在名称链表中，删除文件只是把它从
//! 名称链表摘下，等到最后一个描述符关闭才真正销毁。

use alloc::collections::VecDeque;
use core::ops::{Index, IndexMut};

use vfs::{DirEntry, Error};

use crate::collections::SlotVec;
use crate::file::File;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FileId(usize);

#[derive(Debug, Default)]
pub struct FileTable {
    /// 全部存活的文件，包括已删除但仍被打开的
    files: SlotVec<File>,
    /// 可按名称查找的文件，新建的插在队首
    names: VecDeque<FileId>,
}

impl FileTable {
    /// 查找未删除的同名文件
    pub fn find_live(&self, name: &str) -> Option<FileId> {
        self.names
            .iter()
            .copied()
            .find(|&id| self[id].name() == name)
            .inspect(|&id| debug_assert!(!self[id].is_deleted()))
    }

    pub fn create_and_insert(&mut self, name: &str) -> FileId {
        let id = FileId(self.files.insert(File::new(name)));
        self.names.push_front(id);
        log::debug!("create file {name:?} as {id:?}");
        id
    }

    /// 删除后同名文件不再可见；若无描述符引用则立即销毁
    pub fn unlink_and_soft_delete(&mut self, name: &str) -> Result<(), Error> {
        let pos = self
            .names
            .iter()
            .position(|&id| self[id].name() == name)
            .ok_or(Error::NotFound)?;
        let id = self.names.remove(pos).ok_or(Error::NotFound)?;

        self[id].mark_deleted();
        if !self.reclaim(id) {
            log::debug!("{name:?} is kept alive by {} descriptor(s)", self[id].refs());
        }
        Ok(())
    }

    /// 已删除且无人引用的文件在此销毁，返回是否销毁
    pub fn reclaim(&mut self, id: FileId) -> bool {
        if !self.files.get(id.0).is_some_and(File::is_orphan) {
            return false;
        }
        if let Some(file) = self.files.remove(id.0) {
            log::debug!(
                "destroy file {:?}: {} block(s) freed",
                file.name(),
                file.block_count()
            );
        }
        true
    }

    /// 可按名称访问的文件
    pub fn list(&self) -> impl Iterator<Item = DirEntry> + '_ {
        self.names.iter().map(|&id| {
            let file = &self[id];
            DirEntry {
                name: file.name().into(),
                stat: file.stat(),
            }
        })
    }

    /// 尚未销毁的文件个数，包括已删除但仍被打开的
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.names.clear();
        self.files.clear();
    }
}

impl Index<FileId> for FileTable {
    type Output = File;

    fn index(&self, id: FileId) -> &Self::Output {
        self.files.get(id.0).expect("dangling file id")
    }
}

impl IndexMut<FileId> for FileTable {
    fn index_mut(&mut self, id: FileId) -> &mut Self::Output {
        self.files.get_mut(id.0).expect("dangling file id")
    }
}
