//! The packed struct represents the on-disk format of a member header

use alloc::string::{String, ToString};
use bytemuck::{Pod, Zeroable};
use core::str;

use crate::{Error, HeaderError, TERMINATOR};

/// Name prefix marking a BSD-style extended name, `#1/<length>`
pub const EXTENDED_NAME_PREFIX: &str = "#1/";

#[derive(Clone, Copy, Debug, Pod, Zeroable)]
#[repr(C)]
pub struct RawHeader {
    /// Member name, space padded, `#1/<length>` for extended names
    pub name: [u8; 16],
    /// Modification time, decimal seconds since the epoch
    pub mtime: [u8; 12],
    /// Owner id, decimal
    pub uid: [u8; 6],
    /// Group id, decimal
    pub gid: [u8; 6],
    /// Permission and type bits, octal
    pub mode: [u8; 8],
    /// Data length in bytes, decimal
    pub size: [u8; 10],
    /// Always `` 0x60 0x0A ``
    pub terminator: [u8; 2],
}

impl RawHeader {
    /// Cast raw bytes to a header view. The slice must be exactly
    /// [`HEADER_SIZE`](crate::HEADER_SIZE) bytes.
    pub fn from_bytes(data: &[u8]) -> Result<&RawHeader, Error> {
        Ok(bytemuck::try_from_bytes(data)?)
    }

    /// Decode every field, validating the terminator first.
    pub fn decode(&self) -> Result<Header, Error> {
        if self.terminator != TERMINATOR {
            return Err(HeaderError::Terminator {
                found: self.terminator,
            }
            .into());
        }
        Ok(Header {
            name: String::from_utf8_lossy(&self.name).trim().to_string(),
            mtime: parse_i64("mtime", &self.mtime)?,
            uid: parse_u32("uid", &self.uid, 10)?,
            gid: parse_u32("gid", &self.gid, 10)?,
            mode: parse_u32("mode", &self.mode, 8)?,
            size: parse_u64("size", &self.size)?,
        })
    }
}

/// One member header with every field decoded. The name is still the literal
/// field contents; extended names are resolved during the archive scan.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Header {
    pub name: String,
    pub mtime: i64,
    pub uid: u32,
    pub gid: u32,
    pub mode: u32,
    pub size: u64,
}

impl Header {
    /// Byte count of the out-of-band filename for `#1/<length>` names, `None`
    /// for ordinary names. A `#1/` prefix with a non-decimal suffix is a
    /// malformed header.
    pub fn extended_name_len(&self) -> Result<Option<u64>, Error> {
        let digits = match self.name.strip_prefix(EXTENDED_NAME_PREFIX) {
            Some(digits) => digits,
            None => return Ok(None),
        };
        let len = digits.parse().map_err(|source| HeaderError::Numeric {
            field: "extended name length",
            source,
        })?;
        Ok(Some(len))
    }

    /// Stream bytes the member data occupies, including the alignment pad
    /// byte after odd-length data.
    pub fn padded_size(&self) -> Result<u64, Error> {
        self.size.checked_add(self.size & 1).ok_or(Error::Overflow)
    }
}

fn field_str<'a>(field: &'static str, bytes: &'a [u8]) -> Result<&'a str, HeaderError> {
    match str::from_utf8(bytes) {
        Ok(text) => Ok(text.trim()),
        Err(_) => Err(HeaderError::NotAscii { field }),
    }
}

fn parse_u32(field: &'static str, bytes: &[u8], radix: u32) -> Result<u32, HeaderError> {
    u32::from_str_radix(field_str(field, bytes)?, radix)
        .map_err(|source| HeaderError::Numeric { field, source })
}

fn parse_u64(field: &'static str, bytes: &[u8]) -> Result<u64, HeaderError> {
    u64::from_str_radix(field_str(field, bytes)?, 10)
        .map_err(|source| HeaderError::Numeric { field, source })
}

fn parse_i64(field: &'static str, bytes: &[u8]) -> Result<i64, HeaderError> {
    i64::from_str_radix(field_str(field, bytes)?, 10)
        .map_err(|source| HeaderError::Numeric { field, source })
}
