use core::{error, fmt};
use std::io;

/// An archive-level failure.
///
/// These are the recoverable errors of the protocol: anything the engine
/// reports while encoding or decoding, including missing or mismatched
/// top-level tags and unresolvable polymorphic discriminators. Protocol
/// misuse is not represented here; that panics at the call site.
#[derive(Debug)]
pub enum ArchiveError {
    /// The underlying reader or writer failed.
    Io(io::Error),
    /// The engine rejected the data.
    Format {
        /// Engine name, e.g. `"ron"`.
        archive: &'static str,
        source: Box<dyn error::Error + Send + Sync>,
    },
}

impl ArchiveError {
    pub(crate) fn format<E>(archive: &'static str, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        Self::Format {
            archive,
            source: Box::new(source),
        }
    }
}

impl fmt::Display for ArchiveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(source) => write!(f, "archive i/o failure: {source}"),
            Self::Format { archive, source } => {
                write!(f, "{archive} archive failure: {source}")
            }
        }
    }
}

impl error::Error for ArchiveError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(source) => Some(source),
            Self::Format { source, .. } => Some(source.as_ref()),
        }
    }
}

impl From<io::Error> for ArchiveError {
    fn from(source: io::Error) -> Self {
        Self::Io(source)
    }
}
