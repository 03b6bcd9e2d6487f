use crate::error::{Error, Result};
use serde::Serialize;
use std::num::{NonZeroU64, NonZeroUsize};

pub const DEFAULT_BUFFER_SIZE: NonZeroUsize = NonZeroUsize::new(4096).unwrap();

/// Validated parameters of one read session.
///
/// Built once from user input and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReadConfig {
    /// Capacity of the single read buffer (bytes per read call)
    pub buffer_size: NonZeroUsize,
    /// Absolute position of the first byte to read
    pub start_offset: u64,
    /// Upper bound on the bytes exposed downstream; `None` reads to end of input
    pub max_length: Option<NonZeroU64>,
}

impl Default for ReadConfig {
    fn default() -> Self {
        ReadConfig {
            buffer_size: DEFAULT_BUFFER_SIZE,
            start_offset: 0,
            max_length: None,
        }
    }
}

impl ReadConfig {
    /// Validate raw (signed) user values.
    ///
    /// Signed inputs are accepted so that a negative offset or length is
    /// reported as a range error rather than a parse error.
    pub fn new(buffer_size: usize, start_offset: i64, max_length: Option<i64>) -> Result<Self> {
        let buffer_size = NonZeroUsize::new(buffer_size)
            .ok_or_else(|| Error::validation("buffer size", "must be greater than 0"))?;

        let start_offset = u64::try_from(start_offset).map_err(|_| {
            Error::validation("offset", format!("must be 0 or greater (got {start_offset})"))
        })?;

        let max_length = match max_length {
            None => None,
            Some(len) => {
                let len = u64::try_from(len)
                    .ok()
                    .and_then(NonZeroU64::new)
                    .ok_or_else(|| {
                        Error::validation("length", format!("must be greater than 0 (got {len})"))
                    })?;
                Some(len)
            }
        };

        Ok(ReadConfig {
            buffer_size,
            start_offset,
            max_length,
        })
    }
}
