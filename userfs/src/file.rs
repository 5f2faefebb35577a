//! # 文件层
//!
//! 文件是有序的块序列。除最后一块外，每块都是满的，因此
//! 文件大小 = `(块数 - 1) * BLOCK_SIZE + 最后一块的占用字节数`。

use alloc::string::String;
use alloc::vec::Vec;

use vfs::Stat;

use crate::BLOCK_SIZE;
use crate::block::Block;
use crate::fd::Cursor;

#[derive(Debug)]
pub struct File {
    name: String,
    blocks: Vec<Block>,
    /// 打开该文件的描述符个数
    refs: usize,
    /// 已从文件表中删除，仅能经由已打开的描述符访问
    deleted: bool,
}

impl File {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.into(),
            blocks: Vec::new(),
            refs: 0,
            deleted: false,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> usize {
        self.blocks
            .last()
            .map_or(0, |last| (self.blocks.len() - 1) * BLOCK_SIZE + last.occupied())
    }

    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    #[inline]
    pub fn refs(&self) -> usize {
        self.refs
    }

    #[inline]
    pub fn acquire(&mut self) {
        self.refs += 1;
    }

    #[inline]
    pub fn release(&mut self) {
        debug_assert!(self.refs > 0);
        self.refs -= 1;
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    #[inline]
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// 已删除且没有描述符引用，可以销毁
    #[inline]
    pub fn is_orphan(&self) -> bool {
        self.deleted && self.refs == 0
    }

    pub fn stat(&self) -> Stat {
        Stat {
            block_size: BLOCK_SIZE,
            blocks: self.blocks.len(),
            size: self.size(),
            refs: self.refs,
        }
    }

    /// 从游标处读取，遇到文件尾提前结束；游标随之前进
    pub fn read(&self, cursor: &mut Cursor, buf: &mut [u8]) -> usize {
        let mut read_size = 0;

        while read_size < buf.len() {
            let Some(block) = self.blocks.get(cursor.block()) else {
                break;
            };
            let block_read_size = block.read(cursor.offset(), &mut buf[read_size..]);
            if block_read_size == 0 {
                break;
            }
            cursor.advance(block_read_size);
            read_size += block_read_size;
        }

        read_size
    }

    /// 从游标处覆写，游标走出最后一块时追加新块；总是写完整个`buf`
    ///
    /// 调用者负责检查写入后的大小不超过上限。
    pub fn write(&mut self, cursor: &mut Cursor, buf: &[u8]) -> usize {
        let mut wrote_size = 0;

        while wrote_size < buf.len() {
            if cursor.block() == self.blocks.len() {
                debug_assert!(self.blocks.last().is_none_or(Block::is_full));
                log::trace!("{}: append block #{}", self.name, self.blocks.len());
                self.blocks.push(Block::new());
            }
            let block_wrote_size =
                self.blocks[cursor.block()].write(cursor.offset(), &buf[wrote_size..]);
            cursor.advance(block_wrote_size);
            wrote_size += block_wrote_size;
        }

        wrote_size
    }

    /// 扩张时新增的字节读出全零；收缩时释放多余的块
    pub fn resize(&mut self, new_size: usize) {
        let count = new_size.div_ceil(BLOCK_SIZE);

        if count > self.blocks.len() {
            if let Some(last) = self.blocks.last_mut() {
                last.set_occupied(BLOCK_SIZE);
            }
            log::trace!(
                "{}: grow from {} to {count} blocks",
                self.name,
                self.blocks.len()
            );
            self.blocks.resize_with(count, || Block::sparse(BLOCK_SIZE));
        } else {
            self.blocks.truncate(count);
        }

        if let Some(last) = self.blocks.last_mut() {
            last.set_occupied(new_size - (count - 1) * BLOCK_SIZE);
        }
    }
}
