use std::io;
use std::io::Write;

use typed_bytesize::ByteSizeIec;
use userfs::{OpenFlag, UserFs};

use crate::Command;

/// 一个引擎实例上的命令会话
#[derive(Debug, Default)]
pub struct Session {
    fs: UserFs,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fs(&self) -> &UserFs {
        &self.fs
    }

    /// 执行一条命令并打印结果；引擎报错只打印，不中断会话
    pub fn run(&mut self, cmd: Command, out: &mut impl Write) -> io::Result<()> {
        log::debug!("run {cmd:?}");

        let fs = &mut self.fs;
        let result = match cmd {
            Command::Open { name, flags } => fs.open(&name, flags).map(|fd| format!("fd={fd}")),
            Command::Close(fd) => fs.close(fd).map(|_| "ok".to_owned()),
            Command::Write { fd, data } => fs.write(fd, &data).map(|n| format!("wrote {n}")),
            Command::Read { fd, len } => {
                let mut buf = vec![0u8; len];
                fs.read(fd, &mut buf).map(|n| {
                    format!("read {n}: {}", String::from_utf8_lossy(&buf[..n]).escape_debug())
                })
            }
            Command::Cat(fd) => fs
                .read_to_end(fd)
                .map(|bytes| String::from_utf8_lossy(&bytes).into_owned()),
            Command::Resize { fd, size } => fs.resize(fd, size).map(|_| "ok".to_owned()),
            Command::Delete(name) => fs.delete(&name).map(|_| "ok".to_owned()),
            Command::Stat(fd) => fs.stat(fd).map(|stat| {
                format!(
                    "size={} ({}) blocks={} block_size={} refs={}",
                    stat.size,
                    ByteSizeIec(stat.size as u64),
                    stat.blocks,
                    stat.block_size,
                    stat.refs
                )
            }),
            Command::List => {
                for dirent in fs.list() {
                    writeln!(out, "{}\t{}", dirent.stat.size, dirent.name)?;
                }
                return Ok(());
            }
            Command::Load { host, name } => {
                let data = match std::fs::read(&host) {
                    Ok(data) => data,
                    Err(err) => {
                        log::error!("failed to read {host:?}: {err}");
                        return writeln!(out, "error: {}: {err}", host.display());
                    }
                };
                log::info!("load {host:?} as {name:?}, {} bytes", data.len());
                load(fs, &name, &data).map(|n| format!("loaded {n}"))
            }
            Command::Errno => Ok(format!("{:?}", fs.last_error())),
            Command::Destroy => {
                fs.destroy();
                Ok("ok".to_owned())
            }
        };

        match result {
            Ok(msg) => writeln!(out, "{msg}"),
            Err(err) => writeln!(out, "error: {err}"),
        }
    }
}

/// 截断后整体写入，最后关闭描述符
fn load(fs: &mut UserFs, name: &str, data: &[u8]) -> vfs::Result<usize> {
    let fd = fs.open(name, OpenFlag::CREATE | OpenFlag::WRITE_ONLY)?;
    let wrote = fs.resize(fd, 0).and_then(|_| fs.write(fd, data));
    fs.close(fd)?;
    wrote
}
