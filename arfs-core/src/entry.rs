use alloc::string::String;
use core::fmt::Display;

use crate::Mode;

/// One archive member: a pure descriptor of a byte range and its metadata.
///
/// An entry holds no reference to the underlying stream; reading the member
/// goes through [`ArchiveSrc::read_entry`](crate::ArchiveSrc::read_entry)
/// with the entry's offset and size.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Entry {
    /// Final name, after extended-name resolution
    pub name: String,
    /// Modification time, seconds since the epoch
    pub mtime: i64,
    /// Owner id
    pub uid: u32,
    /// Group id
    pub gid: u32,
    /// Raw permission and type bits
    pub mode: u32,
    /// Size in bytes of the member data, extended name excluded
    pub size: u64,
    /// Absolute offset of the member data in the stream
    pub data_offset: u64,
}

impl Display for Entry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "name={:?} mtime={} uid={} gid={} mode={:o} size={} offset={}",
            self.name, self.mtime, self.uid, self.gid, self.mode, self.size, self.data_offset
        )
    }
}

impl Entry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn data_offset(&self) -> u64 {
        self.data_offset
    }

    /// Mode bits wrapped for classification and rendering.
    pub fn mode(&self) -> Mode {
        Mode::from_bits_retain(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::Entry;

    #[test]
    fn display_lists_every_field() {
        let entry = Entry {
            name: String::from("test1.dat"),
            mtime: 1_600_000_000,
            uid: 501,
            gid: 20,
            mode: 0o100644,
            size: 26,
            data_offset: 68,
        };
        assert_eq!(
            entry.to_string(),
            "name=\"test1.dat\" mtime=1600000000 uid=501 gid=20 mode=100644 size=26 offset=68"
        );
        assert!(entry.mode().is_file());
    }
}
