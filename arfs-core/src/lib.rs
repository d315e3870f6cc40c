//! Parser for the Unix `ar` archive format: the 60-byte member header, the
//! BSD `#1/<length>` extended-name convention, and a single-pass scan that
//! turns a flat byte stream into a table of named, windowed byte ranges.
//!
//! The crate is `no_std` + `alloc`; anything that touches files or
//! `std::io` lives in the `arfs` crate on top of this one.
#![no_std]
extern crate alloc;

use core::mem;

pub use crate::entry::Entry;
pub use crate::error::{Error, HeaderError};
pub use crate::header::{Header, RawHeader, EXTENDED_NAME_PREFIX};
pub use crate::mode::Mode;
pub use crate::source::ArchiveSrc;

mod entry;
mod error;
mod header;
mod mode;
mod source;

/// Magic that opens every archive, `!<arch>\n`
pub const SIGNATURE: [u8; 8] = *b"!<arch>\n";
/// Byte length of one member header
pub const HEADER_SIZE: usize = mem::size_of::<RawHeader>();
/// Closing two bytes of every member header, `` ` `` then newline
pub const TERMINATOR: [u8; 2] = *b"`\n";

#[cfg(test)]
mod tests {
    use core::mem;

    use crate::{RawHeader, HEADER_SIZE, SIGNATURE, TERMINATOR};

    #[test]
    fn header_size() {
        assert_eq!(mem::size_of::<RawHeader>(), 60);
        assert_eq!(HEADER_SIZE, 60);
    }

    #[test]
    fn magic_bytes() {
        assert_eq!(&SIGNATURE, b"!<arch>\n");
        assert_eq!(TERMINATOR, [0x60, 0x0A]);
    }
}
