use alloc::format;
use alloc::string::ToString;
use core::error;
use core::fmt::{Display, Formatter, Result};

#[derive(Debug)]
pub enum Error {
    BadFileHeader(HeaderError),
    BadSignature,
    Cast(bytemuck::PodCastError),
    NameLengthMismatch { need: u64, have: u64 },
    Overflow,
    TooShort,
    TryFromInt(core::num::TryFromIntError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter) -> Result {
        use Error::*;

        let msg = match self {
            BadFileHeader(err) => format!("bad file header: {}", err),
            BadSignature => "bad signature".to_string(),
            Cast(err) => format!("slice is not a file header: {}", err),
            NameLengthMismatch { need, have } => {
                format!("extended name of {} bytes, member holds {}", need, have)
            },
            Overflow => "archive offset overflow".to_string(),
            TooShort => "archive too short".to_string(),
            TryFromInt(err) => format!("TryFromInt: {}", err),
        };
        write!(f, "{}", msg)
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::BadFileHeader(e) => Some(e),
            Self::TryFromInt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Error {
        Error::BadFileHeader(err)
    }
}

impl From<core::num::TryFromIntError> for Error {
    fn from(err: core::num::TryFromIntError) -> Error {
        Error::TryFromInt(err)
    }
}

impl From<bytemuck::PodCastError> for Error {
    fn from(err: bytemuck::PodCastError) -> Error {
        Error::Cast(err)
    }
}

/// What was wrong with a 60-byte member header.
#[derive(Debug)]
pub enum HeaderError {
    Terminator { found: [u8; 2] },
    NotAscii { field: &'static str },
    Numeric { field: &'static str, source: core::num::ParseIntError },
}

impl Display for HeaderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::Terminator { found } => {
                write!(f, "terminator is {:02x?}, not 60 0a", found)
            },
            Self::NotAscii { field } => write!(f, "{} field is not ASCII", field),
            Self::Numeric { field, source } => write!(f, "{} field: {}", field, source),
        }
    }
}

impl error::Error for HeaderError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Numeric { source, .. } => Some(source),
            _ => None,
        }
    }
}
