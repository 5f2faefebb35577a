mod cli;

use std::fs::File;
use std::io;
use std::io::{BufRead, BufReader, Write};

use clap::Parser;
use cli::Cli;
use userfs_cli::{Command, Session};

fn main() -> io::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let input: Box<dyn BufRead> = match &cli.script {
        Some(path) => Box::new(BufReader::new(File::open(path)?)),
        None => Box::new(io::stdin().lock()),
    };
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut session = Session::new();

    for (lineno, line) in input.lines().enumerate() {
        let line = line?;
        let cmd = match Command::parse(&line) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(err) => {
                log::warn!("line {}: {err}", lineno + 1);
                writeln!(out, "syntax error at line {}: {err}", lineno + 1)?;
                continue;
            }
        };
        if cli.echo {
            writeln!(out, "> {}", line.trim())?;
        }
        session.run(cmd, &mut out)?;
    }

    Ok(())
}
