//! The subcommands of the `arfs` binary, callable as plain functions.

use std::io::{self, Write};

use crate::{wrap_io_err, Archive, Error};

/// Print one line per member: mode, uid, gid, size, mtime, name.
pub fn list(archive_path: &str) -> Result<(), Error> {
    let archive = Archive::from_path(archive_path)?;
    for entry in archive.list_dir("/")? {
        println!(
            "{} {:>5} {:>5} {:>9} {:>11} {}",
            entry.mode(),
            entry.uid,
            entry.gid,
            entry.size,
            entry.mtime,
            entry.name
        );
    }
    Ok(())
}

/// Copy one member's bytes to stdout.
pub fn cat(archive_path: &str, name: &str) -> Result<(), Error> {
    let archive = Archive::from_path(archive_path)?;
    let mut member = archive.open(name)?;

    let stdout = io::stdout();
    let mut stdout = stdout.lock();
    io::copy(&mut member, &mut stdout).map_err(wrap_io_err!("Write to stdout"))?;
    stdout.flush().map_err(wrap_io_err!("Flush stdout"))?;
    Ok(())
}

/// Print one member's metadata.
pub fn stat(archive_path: &str, name: &str) -> Result<(), Error> {
    let archive = Archive::from_path(archive_path)?;
    let entry = archive.stat(name)?;
    println!("{} {}", entry.mode(), entry);
    Ok(())
}

/// Print the member names matching a shell-style pattern.
pub fn glob(archive_path: &str, pattern: &str) -> Result<(), Error> {
    let archive = Archive::from_path(archive_path)?;
    for name in archive.glob(pattern)? {
        println!("{}", name);
    }
    Ok(())
}
