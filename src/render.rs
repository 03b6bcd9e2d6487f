use crate::error::{Error, Result};
use crate::reader::Chunk;
use serde::Serialize;
use std::io::Write;

pub const BYTES_PER_LINE: usize = 16;

/// How chunks are written to the output sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Bytes passed through verbatim
    #[default]
    Raw,
    /// `hexdump -C` style text, offsets relative to the start of the source
    HexDump,
}

/// Canonical hex+ASCII dump of `bytes`, labelled from `start_offset`.
///
/// ```
/// let dump = rawread::hex_dump(b"ABC", 0);
/// assert!(dump.starts_with("00000000  41 42 43 "));
/// assert!(dump.ends_with(" |ABC|\n"));
/// ```
pub fn hex_dump(bytes: &[u8], start_offset: u64) -> String {
    let mut out = String::new();
    for (i, line) in bytes.chunks(BYTES_PER_LINE).enumerate() {
        let offs = start_offset + (i * BYTES_PER_LINE) as u64;
        out.push_str(&format!("{:08x}  ", offs));

        for col in 0..BYTES_PER_LINE {
            match line.get(col) {
                Some(b) => out.push_str(&format!("{:02x} ", b)),
                None => out.push_str("   "),
            }
            if col == 7 {
                out.push(' ');
            }
        }

        let ascii: String = line
            .iter()
            .map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect();
        out.push_str(&format!(" |{}|\n", ascii));
    }
    out
}

/// Write one chunk to `out` in the given mode and flush it.
///
/// `write_all` keeps issuing writes until every byte is accepted; a sink that
/// fails or stops accepting bytes ends the session with [`Error::Write`].
/// Buffered sinks are flushed so the chunk has reached the sink before the
/// next read is issued.
pub fn render_chunk<W: Write + ?Sized>(
    out: &mut W,
    mode: OutputMode,
    chunk: &Chunk<'_>,
) -> Result<()> {
    let written = match mode {
        OutputMode::Raw => out.write_all(chunk.data),
        OutputMode::HexDump => out.write_all(hex_dump(chunk.data, chunk.offset).as_bytes()),
    };
    written.and_then(|()| out.flush()).map_err(Error::Write)
}
