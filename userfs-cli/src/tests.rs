use std::io::Write;

use enumflags2::BitFlags;
use userfs::OpenFlag;

use crate::{Command, ParseError, Session};

fn run_script(script: &str) -> String {
    let mut session = Session::new();
    let mut out = Vec::new();
    for line in script.lines() {
        if let Some(cmd) = Command::parse(line).unwrap() {
            session.run(cmd, &mut out).unwrap();
        }
    }
    String::from_utf8(out).unwrap()
}

#[test]
fn parse() {
    assert_eq!(Command::parse("   "), Ok(None));
    assert_eq!(Command::parse("# comment"), Ok(None));
    assert_eq!(
        Command::parse("open a create ro"),
        Ok(Some(Command::Open {
            name: "a".into(),
            flags: OpenFlag::CREATE | OpenFlag::READ_ONLY,
        }))
    );
    assert_eq!(
        Command::parse("open a"),
        Ok(Some(Command::Open {
            name: "a".into(),
            flags: BitFlags::empty(),
        }))
    );
    assert_eq!(
        Command::parse("write 3 hello  world"),
        Ok(Some(Command::Write {
            fd: 3,
            data: b"hello  world".to_vec(),
        }))
    );
    assert_eq!(Command::parse("read 1 10"), Ok(Some(Command::Read { fd: 1, len: 10 })));
    assert_eq!(Command::parse("rm a"), Ok(Some(Command::Delete("a".into()))));
}

#[test]
fn parse_errors() {
    assert_eq!(
        Command::parse("mkdir a"),
        Err(ParseError::UnknownCommand("mkdir".into()))
    );
    assert_eq!(Command::parse("close"), Err(ParseError::MissingArgument("fd")));
    assert_eq!(Command::parse("write"), Err(ParseError::MissingArgument("fd")));
    assert_eq!(Command::parse("close x"), Err(ParseError::BadNumber("x".into())));
    assert_eq!(
        Command::parse("open a append"),
        Err(ParseError::BadFlag("append".into()))
    );
}

#[test]
fn script() {
    let out = run_script(
        "open f create
         write 1 hello
         open f
         read 2 3
         cat 2
         stat 1
         open f ro
         write 3 x
         errno
         delete f
         ls
         close 3
         close 3",
    );
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[0], "fd=1");
    assert_eq!(lines[1], "wrote 5");
    assert_eq!(lines[2], "fd=2");
    assert_eq!(lines[3], "read 3: hel");
    assert_eq!(lines[4], "lo");
    assert!(lines[5].starts_with("size=5 "));
    assert!(lines[5].ends_with("blocks=1 block_size=512 refs=2"));
    assert_eq!(lines[6], "fd=3");
    assert_eq!(lines[7], "error: permission denied");
    assert_eq!(lines[8], "NoPermission");
    assert_eq!(lines[9], "ok");
    assert_eq!(lines[10], "ok");
    assert_eq!(lines[11], "error: no such file");
    assert_eq!(lines.len(), 12);
}

#[test]
fn load_host_file() {
    let path = std::env::temp_dir().join(format!("userfs-load-{}", std::process::id()));
    std::fs::File::create(&path)
        .and_then(|mut file| file.write_all(b"from host"))
        .unwrap();

    let mut session = Session::new();
    let mut out = Vec::new();
    let load = Command::Load {
        host: path.clone(),
        name: "copy".into(),
    };
    session.run(load, &mut out).unwrap();
    session.run(Command::List, &mut out).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "loaded 9\n9\tcopy\n");
    assert_eq!(session.fs().open_count(), 0);
}
