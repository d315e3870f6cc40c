use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use arfs_core::ArchiveSrc;

use crate::{wrap_io_err, Error};

/// An archive file on disk.
///
/// Reads are positional (`pread` style where the platform has it), so any
/// number of member readers can share one `FileSrc` without contending on a
/// file cursor.
#[derive(Debug)]
pub struct FileSrc {
    path: PathBuf,
    file: File,
}

impl FileSrc {
    pub fn open(path: impl AsRef<Path>) -> Result<FileSrc, Error> {
        let path = path.as_ref().to_path_buf();

        let file = OpenOptions::new()
            .read(true)
            .open(&path)
            .map_err(|source| Error::Io {
                source,
                path: Some(path.clone()),
                context: "Open",
            })?;

        Ok(FileSrc { path, file })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ArchiveSrc for FileSrc {
    type Err = Error;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        #[cfg(unix)]
        {
            use std::os::unix::fs::FileExt;
            self.file
                .read_at(buf, offset)
                .map_err(wrap_io_err!(self.path, "Read at read_at"))
        }

        #[cfg(windows)]
        {
            use std::os::windows::fs::FileExt;
            self.file
                .seek_read(buf, offset)
                .map_err(wrap_io_err!(self.path, "Read at read_at"))
        }

        #[cfg(not(any(unix, windows)))]
        {
            // No positional read on this platform; fall back to the shared
            // cursor through the Read/Seek impls on &File.
            let mut file = &self.file;
            file.seek(SeekFrom::Start(offset))
                .map_err(wrap_io_err!(self.path, "Seek at read_at"))?;
            file.read(buf)
                .map_err(wrap_io_err!(self.path, "Read at read_at"))
        }
    }
}

/// Positional reads faked over a plain seekable stream.
///
/// Seek-then-read mutates the stream's one cursor, so the pair runs under a
/// lock. Prefer [`FileSrc`] or an in-memory slice when concurrent readers
/// matter.
#[derive(Debug)]
pub struct StreamSrc<S> {
    inner: Mutex<S>,
}

impl<S: Read + Seek> StreamSrc<S> {
    pub fn new(inner: S) -> StreamSrc<S> {
        StreamSrc {
            inner: Mutex::new(inner),
        }
    }

    /// Hand the stream back.
    pub fn into_inner(self) -> S {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: Read + Seek> ArchiveSrc for StreamSrc<S> {
    type Err = Error;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .seek(SeekFrom::Start(offset))
            .map_err(wrap_io_err!("Seek at read_at"))?;
        inner.read(buf).map_err(wrap_io_err!("Read at read_at"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::StreamSrc;
    use arfs_core::ArchiveSrc;

    #[test]
    fn stream_src_reads_at_position() {
        let src = StreamSrc::new(Cursor::new(b"0123456789".to_vec()));
        let mut buf = [0; 4];
        assert_eq!(src.read_at(3, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"3456");
        assert_eq!(src.read_at(8, &mut buf).unwrap(), 2);
        assert_eq!(&buf[..2], b"89");
        assert_eq!(src.read_at(99, &mut buf).unwrap(), 0);
    }

    #[test]
    fn stream_src_gives_the_stream_back() {
        let src = StreamSrc::new(Cursor::new(b"payload".to_vec()));
        assert_eq!(src.into_inner().into_inner(), b"payload");
    }
}
