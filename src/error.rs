/*!
Specialized `Error` and `Result` types for the VM manager.
*/

use std::path::PathBuf;
use std::{error, fmt, io, result};

/// Specialized `Result` type for VM manager operations.
pub type Result<T> = result::Result<T, Error>;

/// Every failure the translation pipeline can surface.
#[derive(Debug)]
pub enum Error {
    /// Malformed address input line.
    ///
    /// `line` is 1-based; `content` is the offending text as read.
    InvalidAddress { line: usize, content: String },
    /// The backing store could not be opened or read.
    BackingStoreUnavailable { path: PathBuf, source: io::Error },
    /// The backing store returned fewer than a page worth of bytes.
    ShortRead { page: u8, read: usize },
    /// Replacement policy name not recognized.
    UnknownPolicy(String),
    /// No addresses were translated, so rates are undefined.
    EmptyInput,
    /// Configuration value out of range.
    InvalidConfig(&'static str),
    /// IO error on an input or output file.
    Io { path: PathBuf, source: io::Error },
}

impl Error {
    /// Returns a short description of the error kind.
    pub fn to_str(&self) -> &'static str {
        match self {
            Error::InvalidAddress { .. } => "invalid address",
            Error::BackingStoreUnavailable { .. } => "backing store unavailable",
            Error::ShortRead { .. } => "short read from backing store",
            Error::UnknownPolicy(_) => "unknown replacement policy",
            Error::EmptyInput => "empty input",
            Error::InvalidConfig(_) => "invalid configuration",
            Error::Io { .. } => "io error",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let desc = self.to_str();
        match self {
            Error::InvalidAddress { line, content } => {
                write!(f, "{} on line {}: {:?}", desc, line, content)
            }
            Error::BackingStoreUnavailable { path, source } => {
                write!(f, "{} ({}): {}", desc, path.display(), source)
            }
            Error::ShortRead { page, read } => write!(
                f,
                "{}: page {} returned {} of {} bytes",
                desc,
                page,
                read,
                crate::constants::PAGE_SIZE
            ),
            Error::UnknownPolicy(name) => write!(f, "{}: {:?} (expected fifo or lru)", desc, name),
            Error::EmptyInput => write!(f, "{}: no addresses translated, rates are undefined", desc),
            Error::InvalidConfig(reason) => write!(f, "{}: {}", desc, reason),
            Error::Io { path, source } => write!(f, "{} ({}): {}", desc, path.display(), source),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::BackingStoreUnavailable { source, .. } | Error::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_display_includes_context() {
        let err = Error::InvalidAddress {
            line: 3,
            content: "12x".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("12x"));

        let err = Error::ShortRead { page: 7, read: 100 };
        assert!(err.to_string().contains("page 7"));
        assert!(err.to_string().contains("100 of 256"));
    }

    #[test]
    fn test_source_is_preserved() {
        let err = Error::BackingStoreUnavailable {
            path: PathBuf::from("missing.bin"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("missing.bin"));
        assert!(Error::EmptyInput.source().is_none());
    }
}
