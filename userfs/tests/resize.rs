use enumflags2::BitFlags;
use userfs::{BLOCK_SIZE, Errno, Error, MAX_FILE_SIZE, OpenFlag, UserFs};

#[test]
fn shrink_clamps_cursors() {
    let mut fs = UserFs::new();
    let fd1 = fs.open("file", OpenFlag::CREATE.into()).unwrap();
    let fd2 = fs.open("file", BitFlags::empty()).unwrap();

    let data = vec![b'x'; BLOCK_SIZE * 2 + 10];
    fs.write(fd1, &data).unwrap();
    let mut buf = [0u8; 4];
    fs.read(fd2, &mut buf).unwrap();

    assert!(fs.resize(fd2, 100).is_ok());
    assert_eq!(fs.stat(fd1).unwrap().size, 100);
    assert_eq!(fs.stat(fd1).unwrap().blocks, 1);

    assert_eq!(fs.read(fd1, &mut buf), Ok(0), "cursor past EOF was clamped");
    assert_eq!(fs.read(fd2, &mut buf), Ok(4), "cursor within bounds is kept");

    fs.write(fd1, b"tail").unwrap();
    assert_eq!(fs.stat(fd1).unwrap().size, 104);
}

#[test]
fn shrink_to_zero_then_write() {
    let mut fs = UserFs::new();
    let fd = fs.open("file", OpenFlag::CREATE.into()).unwrap();
    fs.write(fd, &[1u8; BLOCK_SIZE * 3]).unwrap();

    fs.resize(fd, 0).unwrap();
    assert_eq!(fs.stat(fd).unwrap().blocks, 0);
    assert_eq!(fs.write(fd, b"ab"), Ok(2));
    assert_eq!(fs.stat(fd).unwrap().size, 2);
}

#[test]
fn grow_reads_zero() {
    let mut fs = UserFs::new();
    let fd = fs.open("file", OpenFlag::CREATE.into()).unwrap();
    fs.write(fd, b"abc").unwrap();

    fs.resize(fd, BLOCK_SIZE + 1).unwrap();
    let stat = fs.stat(fd).unwrap();
    assert_eq!((stat.size, stat.blocks), (BLOCK_SIZE + 1, 2));

    let reader = fs.open("file", BitFlags::empty()).unwrap();
    let bytes = fs.read_to_end(reader).unwrap();
    assert_eq!(bytes.len(), BLOCK_SIZE + 1);
    assert_eq!(&bytes[..3], b"abc");
    assert!(bytes[3..].iter().all(|&b| b == 0));

    assert_eq!(fs.write(fd, b"!"), Ok(1), "writer continues at its own cursor");
    let mut head = [0u8; 4];
    let fresh = fs.open("file", BitFlags::empty()).unwrap();
    fs.read(fresh, &mut head).unwrap();
    assert_eq!(&head, b"abc!");
}

#[test]
fn resize_limits() {
    let mut fs = UserFs::new();
    assert_eq!(fs.resize(1, 0), Err(Error::NotFound));

    let fd = fs.open("file", OpenFlag::CREATE.into()).unwrap();
    assert_eq!(fs.resize(fd, MAX_FILE_SIZE + 1), Err(Error::NoSpace));
    assert_eq!(fs.last_error(), Errno::NoSpace);
    assert_eq!(fs.stat(fd).unwrap().size, 0);
}

#[test]
fn quota() {
    let mut fs = UserFs::new();
    let fd = fs.open("file", OpenFlag::CREATE.into()).unwrap();
    fs.resize(fd, MAX_FILE_SIZE - 1).unwrap();

    let mut buf = vec![0u8; 1 << 20];
    while fs.read(fd, &mut buf).unwrap() > 0 {}

    assert_eq!(fs.write(fd, b"ab"), Err(Error::NoSpace));
    assert_eq!(fs.last_error(), Errno::NoSpace);
    assert_eq!(fs.stat(fd).unwrap().size, MAX_FILE_SIZE - 1);

    assert_eq!(fs.write(fd, b"a"), Ok(1));
    assert_eq!(fs.stat(fd).unwrap().size, MAX_FILE_SIZE);
    fs.close(fd).unwrap();
}

#[test]
fn permissions() {
    let mut fs = UserFs::new();
    let rw = fs.open("file", OpenFlag::CREATE.into()).unwrap();
    fs.write(rw, b"content").unwrap();

    let ro = fs.open("file", OpenFlag::READ_ONLY.into()).unwrap();
    assert_eq!(fs.write(ro, b"x"), Err(Error::NoPermission));
    assert_eq!(fs.last_error(), Errno::NoPermission);
    let mut buf = [0u8; 16];
    assert_eq!(fs.read(ro, &mut buf), Ok(7));
    assert_eq!(&buf[..7], b"content");

    let wo = fs.open("file", OpenFlag::WRITE_ONLY.into()).unwrap();
    assert_eq!(fs.read(wo, &mut buf), Err(Error::NoPermission));
    assert_eq!(fs.read_to_end(wo), Err(Error::NoPermission));
    assert_eq!(fs.write(wo, b"C"), Ok(1));

    let both = fs.open("file", OpenFlag::READ_WRITE.into()).unwrap();
    assert_eq!(fs.read_to_end(both).unwrap(), b"Content");
}
