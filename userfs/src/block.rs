use alloc::boxed::Box;

use crate::BLOCK_SIZE;

type DataBlock = [u8; BLOCK_SIZE];

/// 文件数据的分配单元
///
/// 缓冲区在第一次写入时才分配，此前整块读出全零。
/// 已分配的缓冲区中，`occupied`之后的字节恒为零。
#[derive(Debug, Default)]
pub struct Block {
    data: Option<Box<DataBlock>>,
    /// 有效数据的字节数，之后的字节在逻辑上不存在
    occupied: usize,
}

impl Block {
    pub const fn new() -> Self {
        Self::sparse(0)
    }

    /// 尚未分配缓冲区、但已有`occupied`字节（全零）的块
    pub const fn sparse(occupied: usize) -> Self {
        Self {
            data: None,
            occupied,
        }
    }

    #[inline]
    pub fn occupied(&self) -> usize {
        self.occupied
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.occupied == BLOCK_SIZE
    }

    /// 收缩时清零被截掉的部分，之后再扩张便读出零
    pub fn set_occupied(&mut self, occupied: usize) {
        debug_assert!(occupied <= BLOCK_SIZE);

        if occupied < self.occupied {
            if let Some(data) = &mut self.data {
                data[occupied..self.occupied].fill(0);
            }
        }
        self.occupied = occupied;
    }

    /// 从块内`offset`处读取有效数据，返回读取的字节数
    pub fn read(&self, offset: usize, buf: &mut [u8]) -> usize {
        let len = buf.len().min(self.occupied.saturating_sub(offset));
        match &self.data {
            Some(data) => buf[..len].copy_from_slice(&data[offset..offset + len]),
            None => buf[..len].fill(0),
        }
        len
    }

    /// 从块内`offset`处覆写，直到块尾，返回写入的字节数
    pub fn write(&mut self, offset: usize, buf: &[u8]) -> usize {
        let len = buf.len().min(BLOCK_SIZE - offset);
        let data = self.data.get_or_insert_with(|| Box::new([0; BLOCK_SIZE]));
        data[offset..offset + len].copy_from_slice(&buf[..len]);
        self.occupied = self.occupied.max(offset + len);
        len
    }
}
