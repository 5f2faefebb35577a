#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Stat {
    /// Optimal I/O block size
    pub block_size: usize,
    /// Occupying blocks
    pub blocks: usize,
    /// File size
    pub size: usize,
    /// 打开该文件的描述符个数
    pub refs: usize,
}
