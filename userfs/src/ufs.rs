//! # 接口层
//!
//! [`UserFs`]是整个引擎的上下文：文件表、描述符表以及最近一次调用的错误码。
//! 每个接口先完整检查前置条件，失败时不改动任何状态。

use alloc::vec::Vec;

use enumflags2::BitFlags;
use vfs::{DirEntry, Error, Result, Stat};

use crate::collections::SlotVec;
use crate::fd::FileDesc;
use crate::table::FileTable;
use crate::{BLOCK_SIZE, MAX_FILE_SIZE, OpenFlag};

/// 文件描述符，从1开始编号，0永远无效
pub type Fd = usize;

/// 最近一次调用的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Errno {
    #[default]
    NoError,
    NotFound,
    NoPermission,
    NoSpace,
}

impl From<Error> for Errno {
    fn from(err: Error) -> Self {
        match err {
            Error::NotFound => Errno::NotFound,
            Error::NoPermission => Errno::NoPermission,
            Error::NoSpace => Errno::NoSpace,
        }
    }
}

#[derive(Debug, Default)]
pub struct UserFs {
    files: FileTable,
    fd_table: SlotVec<FileDesc>,
    errno: Errno,
}

impl UserFs {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn last_error(&self) -> Errno {
        self.errno
    }

    /// 打开文件，返回新的描述符
    ///
    /// 同名文件存在时，[`OpenFlag::CREATE`]不算错误。
    pub fn open(&mut self, name: &str, flags: BitFlags<OpenFlag>) -> Result<Fd> {
        self.track(|fs| {
            let id = match fs.files.find_live(name) {
                Some(id) => id,
                None if flags.contains(OpenFlag::CREATE) => fs.files.create_and_insert(name),
                None => return Err(Error::NotFound),
            };

            fs.files[id].acquire();
            let fd = fs.fd_table.insert(FileDesc::new(id, flags)) + 1;
            log::debug!("open {name:?} as fd={fd}, flags={flags:?}");
            Ok(fd)
        })
    }

    pub fn close(&mut self, fd: Fd) -> Result<()> {
        self.track(|fs| {
            let desc = fs.fd_table.remove(slot(fd)?).ok_or(Error::NotFound)?;

            fs.files[desc.file].release();
            fs.files.reclaim(desc.file);
            log::debug!("close fd={fd}");
            Ok(())
        })
    }

    pub fn read(&mut self, fd: Fd, buf: &mut [u8]) -> Result<usize> {
        self.track(|fs| {
            let desc = fs.fd_table.get_mut(slot(fd)?).ok_or(Error::NotFound)?;
            if !desc.readable() {
                return Err(Error::NoPermission);
            }

            Ok(fs.files[desc.file].read(&mut desc.cursor, buf))
        })
    }

    /// 从游标读到文件尾
    pub fn read_to_end(&mut self, fd: Fd) -> Result<Vec<u8>> {
        self.track(|fs| {
            let desc = fs.fd_table.get_mut(slot(fd)?).ok_or(Error::NotFound)?;
            if !desc.readable() {
                return Err(Error::NoPermission);
            }

            let file = &fs.files[desc.file];
            let mut buffer = [0u8; BLOCK_SIZE];
            let mut bytes = Vec::with_capacity(file.size() - desc.cursor.pos());
            loop {
                let len = file.read(&mut desc.cursor, &mut buffer);
                if len == 0 {
                    break;
                }
                bytes.extend_from_slice(&buffer[..len]);
            }
            Ok(bytes)
        })
    }

    /// 要么全部写入，要么因超出[`MAX_FILE_SIZE`]而一字节也不写
    pub fn write(&mut self, fd: Fd, buf: &[u8]) -> Result<usize> {
        self.track(|fs| {
            let desc = fs.fd_table.get_mut(slot(fd)?).ok_or(Error::NotFound)?;
            if !desc.writable() {
                return Err(Error::NoPermission);
            }
            let end = desc.cursor.pos().checked_add(buf.len());
            if end.is_none_or(|end| end > MAX_FILE_SIZE) {
                log::debug!("fd={fd}: writing {} bytes exceeds the size limit", buf.len());
                return Err(Error::NoSpace);
            }

            Ok(fs.files[desc.file].write(&mut desc.cursor, buf))
        })
    }

    /// 收缩后，同一文件上越过新文件尾的游标都退回到文件尾
    pub fn resize(&mut self, fd: Fd, new_size: usize) -> Result<()> {
        self.track(|fs| {
            let id = fs.fd_table.get(slot(fd)?).ok_or(Error::NotFound)?.file;
            if new_size > MAX_FILE_SIZE {
                return Err(Error::NoSpace);
            }

            let file = &mut fs.files[id];
            log::debug!("resize {:?}: {} -> {new_size}", file.name(), file.size());
            file.resize(new_size);

            for (i, desc) in fs.fd_table.iter_mut() {
                if desc.file == id && desc.clamp(new_size) {
                    log::trace!("fd={}: cursor clamped to {new_size}", i + 1);
                }
            }
            Ok(())
        })
    }

    pub fn delete(&mut self, name: &str) -> Result<()> {
        self.track(|fs| fs.files.unlink_and_soft_delete(name))
    }

    pub fn stat(&mut self, fd: Fd) -> Result<Stat> {
        self.track(|fs| {
            let desc = fs.fd_table.get(slot(fd)?).ok_or(Error::NotFound)?;
            Ok(fs.files[desc.file].stat())
        })
    }

    /// 列出可按名称访问的文件，新建的在前
    pub fn list(&mut self) -> Vec<DirEntry> {
        self.errno = Errno::NoError;
        self.files.list().collect()
    }

    /// 销毁全部文件与描述符，回到刚创建时的状态
    pub fn destroy(&mut self) {
        log::debug!(
            "destroy: {} file(s), {} descriptor(s)",
            self.files.len(),
            self.fd_table.len()
        );
        self.fd_table.clear();
        self.files.clear();
        self.errno = Errno::NoError;
    }

    /// 打开的描述符个数
    pub fn open_count(&self) -> usize {
        self.fd_table.len()
    }

    /// 尚未销毁的文件个数，包括已删除但仍被打开的
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn track<T, F>(&mut self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let result = f(self);
        self.errno = match &result {
            Ok(_) => Errno::NoError,
            Err(err) => (*err).into(),
        };
        result
    }
}

/// 描述符对应的槽位
#[inline]
fn slot(fd: Fd) -> Result<usize> {
    fd.checked_sub(1).ok_or(Error::NotFound)
}
