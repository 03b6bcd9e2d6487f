use std::io;
use std::path::PathBuf;

/// Everything that can stop (or pause) a read session.
///
/// Only [`Error::WouldBlock`] is non-fatal: the reader that produced it can be
/// polled again.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("invalid {what}: {reason}")]
    Validation { what: &'static str, reason: String },

    #[error("cannot open {}: {reason}", path.display())]
    Open { path: PathBuf, reason: io::Error },

    #[error("cannot seek to offset {offset}: {reason}")]
    Seek { offset: u64, reason: io::Error },

    #[error("read failed at offset {offset}: {reason}")]
    Read { offset: u64, reason: io::Error },

    #[error("write failed: {0}")]
    Write(io::Error),

    #[error("no data currently available (would block)")]
    WouldBlock,
}

impl Error {
    pub(crate) fn validation(what: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            what,
            reason: reason.into(),
        }
    }

    pub fn is_would_block(&self) -> bool {
        matches!(self, Error::WouldBlock)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
