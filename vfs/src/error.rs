use core::fmt;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// 无效的文件描述符，或按名称找不到文件
    NotFound,
    /// 描述符的访问模式不允许该操作
    NoPermission,
    /// 文件将超出最大容量
    NoSpace,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Error::NotFound => "no such file",
            Error::NoPermission => "permission denied",
            Error::NoSpace => "file size limit exceeded",
        };
        f.write_str(msg)
    }
}
