//! Read-only, filesystem-style access to Unix `ar` archives.
//!
//! An [`Archive`] scans its byte source once, up front, and then answers
//! open/stat/list/glob queries from the resulting member table. Opened
//! members are [`EntryReader`]s: bounded cursors that cannot leave their
//! member's byte range, so several can read the same underlying stream at
//! once. Sources are anything implementing [`ArchiveSrc`]: an archive file
//! on disk ([`FileSrc`]), borrowed memory, or a seekable stream behind
//! [`StreamSrc`].

mod archive;
mod bin;
mod reader;
mod source;

pub use arfs_core::{ArchiveSrc, Entry, Header, HeaderError, Mode, RawHeader};
pub use crate::archive::Archive;
pub use crate::bin::*;
pub use crate::reader::EntryReader;
pub use crate::source::{FileSrc, StreamSrc};

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] arfs_core::Error),

    #[error("{context}{}: {source}", display_path(.path))]
    Io {
        source: io::Error,
        path: Option<PathBuf>,
        context: &'static str,
    },

    #[error("file does not exist: {name}")]
    NotExist { name: String },

    #[error(transparent)]
    Pattern(#[from] glob::PatternError),
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{self}")?;

        let mut source = self.source();
        while let Some(err) = source {
            writeln!(f, "\tCaused by: {err}")?;
            source = err.source();
        }

        Ok(())
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => format!(" {}", path.display()),
        None => String::new(),
    }
}

macro_rules! wrap_io_err {
    ($path:expr, $context:expr) => {
        |source| $crate::Error::Io {
            source,
            path: Some(::std::path::Path::new(&$path).to_path_buf()),
            context: $context,
        }
    };
    ($context:expr) => {
        |source| $crate::Error::Io {
            source,
            path: None,
            context: $context,
        }
    };
}
pub(crate) use wrap_io_err;
