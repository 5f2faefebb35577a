//! # 文件描述符层
//!
//! 每个描述符持有目标文件的ID、访问模式，以及自己的游标。
//! 同一文件的多个描述符各自推进游标，但看到同一份数据。

use enumflags2::BitFlags;

use crate::{BLOCK_SIZE, FileId, OpenFlag};

/// 文件内的读写位置：块索引与块内偏移
///
/// 块内偏移总小于[`BLOCK_SIZE`]，走到块尾即进入下一块。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    block: usize,
    offset: usize,
}

impl Cursor {
    pub const fn at(pos: usize) -> Self {
        Self {
            block: pos / BLOCK_SIZE,
            offset: pos % BLOCK_SIZE,
        }
    }

    #[inline]
    pub const fn block(&self) -> usize {
        self.block
    }

    #[inline]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// 文件内的字节偏移
    #[inline]
    pub const fn pos(&self) -> usize {
        self.block * BLOCK_SIZE + self.offset
    }

    /// 块内前进`n`字节，不可越过块尾
    pub(crate) fn advance(&mut self, n: usize) {
        debug_assert!(self.offset + n <= BLOCK_SIZE);

        self.offset += n;
        if self.offset == BLOCK_SIZE {
            self.block += 1;
            self.offset = 0;
        }
    }
}

/// 一次打开所得的文件实例
#[derive(Debug)]
pub struct FileDesc {
    pub(crate) file: FileId,
    pub(crate) cursor: Cursor,
    readable: bool,
    writable: bool,
}

impl FileDesc {
    pub fn new(file: FileId, flags: BitFlags<OpenFlag>) -> Self {
        let [readable, writable] = OpenFlag::access(flags);
        Self {
            file,
            cursor: Cursor::default(),
            readable,
            writable,
        }
    }

    #[inline]
    pub fn readable(&self) -> bool {
        self.readable
    }

    #[inline]
    pub fn writable(&self) -> bool {
        self.writable
    }

    /// 游标越过`size`时退回到`size`，返回是否发生了退回
    pub fn clamp(&mut self, size: usize) -> bool {
        if self.cursor.pos() > size {
            self.cursor = Cursor::at(size);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Cursor;
    use crate::BLOCK_SIZE;

    #[test]
    fn cursor_rolls_over() {
        let mut cursor = Cursor::at(BLOCK_SIZE - 3);
        assert_eq!((cursor.block(), cursor.offset()), (0, BLOCK_SIZE - 3));

        cursor.advance(3);
        assert_eq!((cursor.block(), cursor.offset()), (1, 0));
        assert_eq!(cursor.pos(), BLOCK_SIZE);
    }
}
