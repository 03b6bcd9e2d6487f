use crate::config::ReadConfig;
use crate::error::{Error, Result};
use std::fs::{File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

/// Where a [`ChunkReader`] is in its life cycle.
///
/// Seeking happens inside the constructors, so a live reader starts in `Reading`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadState {
    Reading,
    /// End of input, or `max_length` reached
    Completed,
    /// A read failed; no more chunks will be produced
    Failed,
}

/// One bounded read, as exposed downstream.
///
/// `data` borrows the reader's buffer and is only valid until the next call to
/// [`ChunkReader::next_chunk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chunk<'a> {
    /// Absolute offset of `data[0]` in the source
    pub offset: u64,
    pub data: &'a [u8],
}

impl Chunk<'_> {
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Offset one past the last byte of this chunk.
    pub fn end(&self) -> u64 {
        self.offset + self.data.len() as u64
    }
}

/// Issues bounded reads against a byte source, one buffer at a time.
///
/// The reader owns the source for the whole session and reuses a single
/// buffer of `buffer_size` bytes. Every non-empty read yields exactly one
/// [`Chunk`]; the chunk that crosses `max_length` is cut short and ends the
/// sequence.
///
/// ```no_run
/// use rawread::{ChunkReader, ReadConfig};
///
/// let config = ReadConfig::new(4096, 0, Some(1024))?;
/// let mut reader = ChunkReader::open("data.bin", config)?;
/// while let Some(chunk) = reader.next_chunk()? {
///     println!("{} bytes at {:#x}", chunk.len(), chunk.offset);
/// }
/// # Ok::<(), rawread::Error>(())
/// ```
#[derive(Debug)]
pub struct ChunkReader<R> {
    source: R,
    buf: Vec<u8>,
    config: ReadConfig,
    consumed: u64,
    state: ReadState,
}

impl ChunkReader<File> {
    /// Open `path` read-only and position it at `config.start_offset`.
    pub fn open(path: impl AsRef<Path>, config: ReadConfig) -> Result<Self> {
        Self::open_with(path, config, OpenOptions::new().read(true))
    }

    /// Like [`ChunkReader::open`], with caller-supplied open options
    /// (e.g. extra flags such as `O_NONBLOCK`).
    pub fn open_with(
        path: impl AsRef<Path>,
        config: ReadConfig,
        options: &OpenOptions,
    ) -> Result<Self> {
        let path = path.as_ref();
        let file = options.open(path).map_err(|reason| Error::Open {
            path: path.to_path_buf(),
            reason,
        })?;
        log::debug!("opened {}", path.display());
        Self::new(file, config)
    }
}

impl<R: Read + Seek> ChunkReader<R> {
    /// Take ownership of a seekable source, seeking to `config.start_offset`
    /// when it is non-zero.
    ///
    /// Seeking past the end of the source is not an error; the first read
    /// then reports end of input and no chunks are produced.
    pub fn new(mut source: R, config: ReadConfig) -> Result<Self> {
        let offset = config.start_offset;
        if offset > 0 {
            source
                .seek(SeekFrom::Start(offset))
                .map_err(|reason| Error::Seek { offset, reason })?;
            log::debug!("seeked to offset {offset}");
        }
        Self::with_source(source, config)
    }
}

impl<R: Read> ChunkReader<R> {
    /// Wrap a forward-only stream (pipe, terminal, socket).
    ///
    /// Streams cannot be positioned, so only `start_offset == 0` is accepted.
    pub fn from_stream(source: R, config: ReadConfig) -> Result<Self> {
        if config.start_offset != 0 {
            return Err(Error::validation(
                "offset",
                "a stream can only be read from offset 0",
            ));
        }
        Self::with_source(source, config)
    }

    fn with_source(source: R, config: ReadConfig) -> Result<Self> {
        let size = config.buffer_size.get();
        let mut buf = Vec::new();
        buf.try_reserve_exact(size).map_err(|_| {
            Error::validation("buffer size", format!("cannot allocate {size} bytes"))
        })?;
        buf.resize(size, 0);

        Ok(ChunkReader {
            source,
            buf,
            config,
            consumed: 0,
            state: ReadState::Reading,
        })
    }

    pub fn config(&self) -> &ReadConfig {
        &self.config
    }

    pub fn state(&self) -> ReadState {
        self.state
    }

    /// Bytes exposed downstream so far.
    pub fn consumed(&self) -> u64 {
        self.consumed
    }

    /// Absolute offset the next chunk will start at.
    pub fn position(&self) -> u64 {
        self.config.start_offset + self.consumed
    }

    pub fn get_ref(&self) -> &R {
        &self.source
    }

    /// Give the source back to the caller.
    pub fn into_inner(self) -> R {
        self.source
    }

    /// Issue the next read.
    ///
    /// Returns `Ok(None)` once the sequence is over. A read interrupted by a
    /// signal is reissued. On a non-blocking source with nothing to read this
    /// returns [`Error::WouldBlock`] and the reader stays usable.
    pub fn next_chunk(&mut self) -> Result<Option<Chunk<'_>>> {
        if self.state != ReadState::Reading {
            return Ok(None);
        }

        let offset = self.position();
        let n = loop {
            match self.source.read(&mut self.buf) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                    log::debug!("read at offset {offset} would block");
                    return Err(Error::WouldBlock);
                }
                Err(reason) => {
                    self.state = ReadState::Failed;
                    return Err(Error::Read { offset, reason });
                }
            }
        };

        if n == 0 {
            log::debug!("end of input at offset {offset}");
            self.state = ReadState::Completed;
            return Ok(None);
        }

        let mut len = n as u64;
        if let Some(max) = self.config.max_length {
            let remaining = max.get() - self.consumed;
            if len >= remaining {
                if len > remaining {
                    log::debug!("truncating {len}-byte read to {remaining} bytes");
                }
                len = remaining;
                self.state = ReadState::Completed;
            }
        }
        self.consumed += len;

        Ok(Some(Chunk {
            offset,
            data: &self.buf[..len as usize],
        }))
    }
}
