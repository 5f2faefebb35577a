use std::fmt;
use std::path::PathBuf;

use enumflags2::BitFlags;
use userfs::{Fd, OpenFlag};

/// 脚本中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Open {
        name: String,
        flags: BitFlags<OpenFlag>,
    },
    Close(Fd),
    Write {
        fd: Fd,
        data: Vec<u8>,
    },
    Read {
        fd: Fd,
        len: usize,
    },
    Cat(Fd),
    Resize {
        fd: Fd,
        size: usize,
    },
    Delete(String),
    Stat(Fd),
    List,
    /// 把宿主机上的文件拷进引擎
    Load {
        host: PathBuf,
        name: String,
    },
    Errno,
    Destroy,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    UnknownCommand(String),
    MissingArgument(&'static str),
    BadNumber(String),
    BadFlag(String),
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownCommand(cmd) => write!(f, "unknown command {cmd:?}"),
            ParseError::MissingArgument(arg) => write!(f, "missing argument <{arg}>"),
            ParseError::BadNumber(num) => write!(f, "{num:?} is not a number"),
            ParseError::BadFlag(flag) => write!(f, "unknown open flag {flag:?}"),
        }
    }
}

impl Command {
    /// 空行与`#`开头的注释行返回`None`
    pub fn parse(line: &str) -> Result<Option<Self>, ParseError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (cmd, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let mut args = rest.split_whitespace();

        let cmd = match cmd {
            "open" => {
                let name = arg(&mut args, "name")?.to_owned();
                let flags: BitFlags<OpenFlag> = args.map(open_flag).collect::<Result<_, _>>()?;
                Command::Open { name, flags }
            }
            "close" => Command::Close(number(arg(&mut args, "fd")?)?),
            "write" => {
                // 正文是描述符之后的整行，保留其中的空白
                let rest = rest.trim_start();
                let (fd, data) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if fd.is_empty() {
                    return Err(ParseError::MissingArgument("fd"));
                }
                Command::Write {
                    fd: number(fd)?,
                    data: data.as_bytes().to_vec(),
                }
            }
            "read" => Command::Read {
                fd: number(arg(&mut args, "fd")?)?,
                len: number(arg(&mut args, "len")?)?,
            },
            "cat" => Command::Cat(number(arg(&mut args, "fd")?)?),
            "resize" => Command::Resize {
                fd: number(arg(&mut args, "fd")?)?,
                size: number(arg(&mut args, "size")?)?,
            },
            "delete" | "rm" => Command::Delete(arg(&mut args, "name")?.to_owned()),
            "stat" => Command::Stat(number(arg(&mut args, "fd")?)?),
            "ls" => Command::List,
            "load" => Command::Load {
                host: arg(&mut args, "host path")?.into(),
                name: arg(&mut args, "name")?.to_owned(),
            },
            "errno" => Command::Errno,
            "destroy" => Command::Destroy,
            other => return Err(ParseError::UnknownCommand(other.to_owned())),
        };

        Ok(Some(cmd))
    }
}

fn arg<'a>(
    args: &mut impl Iterator<Item = &'a str>,
    name: &'static str,
) -> Result<&'a str, ParseError> {
    args.next().ok_or(ParseError::MissingArgument(name))
}

fn number(s: &str) -> Result<usize, ParseError> {
    s.parse().map_err(|_| ParseError::BadNumber(s.to_owned()))
}

fn open_flag(s: &str) -> Result<OpenFlag, ParseError> {
    match s {
        "create" => Ok(OpenFlag::CREATE),
        "ro" => Ok(OpenFlag::READ_ONLY),
        "wo" => Ok(OpenFlag::WRITE_ONLY),
        "rw" => Ok(OpenFlag::READ_WRITE),
        other => Err(ParseError::BadFlag(other.to_owned())),
    }
}
