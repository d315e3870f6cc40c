use std::io::{self, Read, Seek, SeekFrom};

use arfs_core::{ArchiveSrc, Entry};

use crate::Error;

/// A bounded cursor over one member's bytes.
///
/// Every read goes through the positional window read on the source, so the
/// handle can only ever see `[0, size)` of its own member; neighbors' bytes
/// are unreachable. Handles are independent: opening a member twice gives
/// two cursors that do not affect each other.
#[derive(Debug)]
pub struct EntryReader<'a, R: ArchiveSrc> {
    src: &'a R,
    entry: Entry,
    pos: u64,
}

impl<'a, R: ArchiveSrc> EntryReader<'a, R> {
    pub(crate) fn new(src: &'a R, entry: Entry) -> EntryReader<'a, R> {
        EntryReader { src, entry, pos: 0 }
    }

    /// Metadata of the member this handle reads.
    pub fn entry(&self) -> &Entry {
        &self.entry
    }

    /// Cursor position relative to the member's first byte.
    pub fn position(&self) -> u64 {
        self.pos
    }
}

impl<R: ArchiveSrc> EntryReader<'_, R>
where
    Error: From<R::Err>,
{
    /// Read at `offset` within the member, leaving the cursor alone.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        Ok(self.src.read_entry(&self.entry, offset, buf)?)
    }
}

impl<R: ArchiveSrc> Read for EntryReader<'_, R>
where
    Error: From<R::Err>,
{
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self
            .src
            .read_entry(&self.entry, self.pos, buf)
            .map_err(|err| io::Error::other(Error::from(err)))?;
        self.pos += count as u64;
        Ok(count)
    }
}

impl<R: ArchiveSrc> Seek for EntryReader<'_, R> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let next = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.entry.size.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };
        match next {
            Some(next) => {
                self.pos = next;
                Ok(next)
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Read, Seek, SeekFrom};

    use super::EntryReader;
    use arfs_core::Entry;

    // The member's window sits in the middle of the stream; the x/y fences
    // on both sides must never be readable.
    fn sample() -> (&'static [u8], Entry) {
        let data: &[u8] = b"xxxxABCDEFGHIJyyyy";
        let entry = Entry {
            name: String::from("m"),
            mtime: 0,
            uid: 0,
            gid: 0,
            mode: 0o100644,
            size: 10,
            data_offset: 4,
        };
        (data, entry)
    }

    #[test]
    fn sequential_reads_stop_at_the_window_end() {
        let (data, entry) = sample();
        let mut reader = EntryReader::new(&data, entry);

        let mut buf = [0; 4];
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf, b"ABCD");

        let mut rest = Vec::new();
        assert_eq!(reader.read_to_end(&mut rest).unwrap(), 6);
        assert_eq!(rest, b"EFGHIJ");

        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seeking_within_the_window() {
        let (data, entry) = sample();
        let mut reader = EntryReader::new(&data, entry);
        let mut buf = [0; 16];

        assert_eq!(reader.seek(SeekFrom::End(-4)).unwrap(), 6);
        assert_eq!(reader.read(&mut buf).unwrap(), 4);
        assert_eq!(&buf[..4], b"GHIJ");

        assert_eq!(reader.seek(SeekFrom::Start(2)).unwrap(), 2);
        assert_eq!(reader.seek(SeekFrom::Current(3)).unwrap(), 5);
        assert_eq!(reader.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf[..5], b"FGHIJ");
    }

    #[test]
    fn seek_past_the_end_reads_nothing() {
        let (data, entry) = sample();
        let mut reader = EntryReader::new(&data, entry);
        let mut buf = [0; 4];

        assert_eq!(reader.seek(SeekFrom::End(100)).unwrap(), 110);
        assert_eq!(reader.read(&mut buf).unwrap(), 0);
    }

    #[test]
    fn seek_before_the_start_is_an_error() {
        let (data, entry) = sample();
        let mut reader = EntryReader::new(&data, entry);

        reader.seek(SeekFrom::Start(7)).unwrap();
        assert!(reader.seek(SeekFrom::Current(-9)).is_err());
        // A failed seek leaves the cursor alone.
        assert_eq!(reader.position(), 7);
    }

    #[test]
    fn read_at_ignores_the_cursor() {
        let (data, entry) = sample();
        let mut reader = EntryReader::new(&data, entry);
        let mut buf = [0; 4];

        reader.seek(SeekFrom::Start(9)).unwrap();
        assert_eq!(reader.read_at(4, &mut buf).unwrap(), 4);
        assert_eq!(&buf, b"EFGH");
        assert_eq!(reader.position(), 9);

        // Past the window end, also cursor-free.
        assert_eq!(reader.read_at(10, &mut buf).unwrap(), 0);
    }

    #[test]
    fn independent_cursors_per_handle() {
        let (data, entry) = sample();
        let mut one = EntryReader::new(&data, entry.clone());
        let mut two = EntryReader::new(&data, entry);
        let mut buf = [0; 5];

        assert_eq!(one.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"ABCDE");
        assert_eq!(two.read(&mut buf).unwrap(), 5);
        assert_eq!(&buf, b"ABCDE");
    }
}
