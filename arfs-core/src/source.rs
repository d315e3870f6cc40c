use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec;

use crate::{Entry, Error, RawHeader, HEADER_SIZE, SIGNATURE};

/// A random-access byte source holding an archive.
///
/// `read_at` is positional and takes `&self`: implementations must not
/// depend on a shared cursor, so readers over different members (or the same
/// member) can interleave freely. A source that only has seek-then-read has
/// to serialize that pair internally.
pub trait ArchiveSrc {
    type Err: From<Error>;

    /// Read up to `buf.len()` bytes at `offset` into `buf`. Returns the
    /// count actually read; 0 means the offset is at or past the end of the
    /// stream. Short reads are allowed.
    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err>;

    /// Read at `offset` until `buf` is full or the stream ends. The count
    /// returned is only less than `buf.len()` at end of stream.
    fn read_exact_at(&self, mut offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        let mut total = 0;
        while total < buf.len() {
            let count = self.read_at(offset, &mut buf[total..])?;
            if count == 0 {
                break;
            }
            total += count;
            offset = offset.checked_add(count as u64).ok_or(Error::Overflow)?;
        }
        Ok(total)
    }

    /// Scan the whole archive and build the member table.
    ///
    /// One forward pass: signature, then member headers. The end of the
    /// stream on a header boundary ends the scan; ending anywhere else is a
    /// truncated archive. Extended `#1/<length>` names are resolved here, so
    /// the table never holds a placeholder. A later member shadows an
    /// earlier one with the same name.
    fn entries(&self) -> Result<BTreeMap<String, Entry>, Self::Err> {
        let mut signature = [0; SIGNATURE.len()];
        if self.read_exact_at(0, &mut signature)? < signature.len() {
            return Err(Error::TooShort.into());
        }
        if signature != SIGNATURE {
            return Err(Error::BadSignature.into());
        }

        let mut entries = BTreeMap::new();
        let mut offset = SIGNATURE.len() as u64;
        loop {
            let mut raw = [0; HEADER_SIZE];
            let count = self.read_exact_at(offset, &mut raw)?;
            if count == 0 {
                break;
            }
            if count < raw.len() {
                return Err(Error::TooShort.into());
            }
            let header = RawHeader::from_bytes(&raw)?.decode()?;

            // Alignment is computed from the declared size before any
            // extended-name adjustment.
            let padded = header.padded_size()?;

            let mut data_offset = offset
                .checked_add(HEADER_SIZE as u64)
                .ok_or(Error::Overflow)?;
            let mut size = header.size;
            let name = match header.extended_name_len()? {
                Some(len) => {
                    if len > header.size {
                        return Err(Error::NameLengthMismatch {
                            need: len,
                            have: header.size,
                        }
                        .into());
                    }
                    let mut raw_name = vec![0; usize::try_from(len).map_err(Error::TryFromInt)?];
                    let have = self.read_exact_at(data_offset, &mut raw_name)? as u64;
                    if have < len {
                        return Err(Error::NameLengthMismatch { need: len, have }.into());
                    }
                    data_offset = data_offset.checked_add(len).ok_or(Error::Overflow)?;
                    size -= len;
                    resolve_name(&raw_name)
                }
                None => header.name,
            };

            entries.insert(
                name.clone(),
                Entry {
                    name,
                    mtime: header.mtime,
                    uid: header.uid,
                    gid: header.gid,
                    mode: header.mode,
                    size,
                    data_offset,
                },
            );

            offset = offset
                .checked_add(HEADER_SIZE as u64)
                .and_then(|next| next.checked_add(padded))
                .ok_or(Error::Overflow)?;
        }
        Ok(entries)
    }

    /// Read from a member's data at `offset` within that member. Reads are
    /// clamped to the member's window; at or past its end, 0 bytes come
    /// back. Bytes of neighboring members are never returned.
    fn read_entry(&self, entry: &Entry, offset: u64, buf: &mut [u8]) -> Result<usize, Self::Err> {
        if offset >= entry.size {
            return Ok(0);
        }
        let remaining = entry.size - offset;
        let end = if (buf.len() as u64) < remaining {
            buf.len()
        } else {
            usize::try_from(remaining).map_err(Error::TryFromInt)?
        };
        let pos = entry.data_offset.checked_add(offset).ok_or(Error::Overflow)?;
        self.read_at(pos, &mut buf[..end])
    }
}

/// Strip trailing NULs from an out-of-band name.
fn resolve_name(raw: &[u8]) -> String {
    let end = raw.iter().rposition(|&b| b != 0).map_or(0, |last| last + 1);
    String::from_utf8_lossy(&raw[..end]).into_owned()
}

impl<T: AsRef<[u8]>> ArchiveSrc for T {
    type Err = Error;

    fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize, Error> {
        let data = self.as_ref();
        if offset >= data.len() as u64 {
            return Ok(0);
        }
        let start = offset as usize;
        let mut end = start.checked_add(buf.len()).ok_or(Error::Overflow)?;
        if end > data.len() {
            end = data.len();
        }
        let count = end - start;
        buf[..count].copy_from_slice(&data[start..end]);
        Ok(count)
    }
}
