use std::fmt;

/// Title of the modal shown when an encoding label cannot be resolved.
pub const UNSUPPORTED_TITLE: &str = "Unsupported Encoding";

/// Which half of a conversion an encoding label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

#[derive(Debug)]
pub enum TagEncError {
    UnsupportedEncoding(Side),
    CantOpenFile(std::io::Error),
    Io(std::io::Error),
}

impl fmt::Display for TagEncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedEncoding(side) => write!(f, "Unsupported {side} encoding."),
            Self::CantOpenFile(e) => write!(f, "can't open file: {e}"),
            Self::Io(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for TagEncError {}

impl From<std::io::Error> for TagEncError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

pub type TagEncResult<T> = Result<T, TagEncError>;
