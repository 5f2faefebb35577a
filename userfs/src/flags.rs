use enumflags2::{BitFlags, bitflags};

#[rustfmt::skip]
#[allow(clippy::upper_case_acronyms)]
#[bitflags]
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpenFlag {
    /// 文件不存在时创建，存在时不报错
    CREATE     = 0b0001,
    /// 只读
    READ_ONLY  = 0b0010,
    /// 只写
    WRITE_ONLY = 0b0100,
    /// 读写兼备
    READ_WRITE = 0b1000,
}

impl OpenFlag {
    /// 未指定访问模式时默认读写兼备
    pub fn access(flags: BitFlags<OpenFlag>) -> [bool; 2] {
        let mode = flags & (OpenFlag::READ_ONLY | OpenFlag::WRITE_ONLY | OpenFlag::READ_WRITE);
        if mode.is_empty() {
            return [true, true];
        }

        [
            mode.intersects(OpenFlag::READ_ONLY | OpenFlag::READ_WRITE),
            mode.intersects(OpenFlag::WRITE_ONLY | OpenFlag::READ_WRITE),
        ]
    }
}
