#![no_std]

extern crate alloc;

/* userfs 的整体架构，自上而下 */

// 接口层：open/close/read/write/resize/delete，维护描述符表与错误码
mod ufs;

// 文件描述符层：访问模式与读写游标
mod fd;

// 文件表层：按名称查找、创建与软删除
mod table;

// 文件层：块序列上的读写与伸缩
mod file;

// 块层：定长的数据分配单元
mod block;

mod collections;
mod flags;
mod shared;

pub use self::{
    fd::Cursor,
    flags::OpenFlag,
    shared::SharedUserFs,
    table::FileId,
    ufs::{Errno, Fd, UserFs},
};
pub use vfs::{DirEntry, Error, Result, Stat};

pub const BLOCK_SIZE: usize = 512;
/// 单个文件的最大字节数
pub const MAX_FILE_SIZE: usize = 1 << 30;
