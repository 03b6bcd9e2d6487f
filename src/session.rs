use crate::error::Result;
use crate::reader::ChunkReader;
use crate::render::{OutputMode, render_chunk};
use serde::Serialize;
use std::io::{Read, Write};

/// Running totals of one session.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionTotals {
    /// Non-empty read calls, truncated ones included
    pub read_calls: u64,
    /// Bytes exposed downstream
    pub total_bytes: u64,
}

impl SessionTotals {
    pub fn record(&mut self, chunk_len: usize) {
        self.read_calls += 1;
        self.total_bytes += chunk_len as u64;
    }

    /// Average bytes per read call, truncated; `None` before the first call.
    pub fn average(&self) -> Option<u64> {
        self.total_bytes.checked_div(self.read_calls)
    }
}

/// Drive `reader` to the end, rendering every chunk into `out`.
///
/// Totals are accumulated into the caller's `totals` so they stay available
/// when the loop stops on an error. A [`crate::Error::WouldBlock`] is passed through
/// unchanged; calling `run` again resumes where the previous call stopped.
pub fn run<R, W>(
    reader: &mut ChunkReader<R>,
    mode: OutputMode,
    out: &mut W,
    totals: &mut SessionTotals,
) -> Result<()>
where
    R: Read,
    W: Write + ?Sized,
{
    while let Some(chunk) = reader.next_chunk()? {
        // Only chunks that reached the sink are counted.
        render_chunk(out, mode, &chunk)?;
        totals.record(chunk.len());
    }

    log::info!(
        "read {} bytes in {} calls",
        totals.total_bytes,
        totals.read_calls
    );
    Ok(())
}
