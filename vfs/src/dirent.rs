use alloc::string::String;

use crate::Stat;

/// 文件表中一个可按名称访问的文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub stat: Stat,
}
