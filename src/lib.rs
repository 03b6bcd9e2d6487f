pub mod config;
pub mod error;
pub mod reader;
pub mod render;
pub mod session;
#[cfg(unix)]
pub mod nonblock;

pub use config::ReadConfig;
pub use error::{Error, Result};
pub use reader::{Chunk, ChunkReader, ReadState};
pub use render::{OutputMode, hex_dump, render_chunk};
pub use session::{SessionTotals, run};
