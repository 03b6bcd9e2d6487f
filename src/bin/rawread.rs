use clap::{ArgAction, Parser};
use rawread::{ChunkReader, OutputMode, ReadConfig, SessionTotals, run};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(version, about = "Read a byte range from a file with unbuffered chunked reads")]
struct Args {
    /// File to read
    path: PathBuf,

    /// Buffer size in bytes (upper bound of a single read call)
    #[arg(short = 'b', value_name = "SIZE", default_value_t = 4096)]
    buffer_size: usize,

    /// Byte offset to start reading at
    #[arg(
        short = 'o',
        value_name = "OFFSET",
        default_value_t = 0,
        allow_negative_numbers = true
    )]
    offset: i64,

    /// Maximum number of bytes to read (default: the rest of the file)
    #[arg(short = 'l', value_name = "LENGTH", allow_negative_numbers = true)]
    length: Option<i64>,

    /// Print a hex dump instead of the raw bytes
    #[arg(short = 'x', action = ArgAction::SetTrue)]
    hex: bool,

    /// Print a summary before and read statistics after the data
    #[arg(short = 's', action = ArgAction::SetTrue)]
    stats: bool,

    /// Open the file with O_NONBLOCK and stop quietly when no data is available
    #[arg(short = 'n', action = ArgAction::SetTrue)]
    nonblock: bool,

    /// Emit the summary and statistics as JSON (with -s)
    #[arg(long, action = ArgAction::SetTrue, requires = "stats")]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    file: &'a Path,
    mode: OutputMode,
    config: &'a ReadConfig,
    totals: SessionTotals,
    average: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Usage errors exit with 1 like every other failure; --help/--version with 0.
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    };

    let config = ReadConfig::new(args.buffer_size, args.offset, args.length)?;
    let mode = if args.hex {
        OutputMode::HexDump
    } else {
        OutputMode::Raw
    };

    let mut reader = open_reader(&args, config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if args.stats && !args.json {
        print_summary(&mut out, &args.path, &config)?;
    }

    let mut totals = SessionTotals::default();
    match run(&mut reader, mode, &mut out, &mut totals) {
        Ok(()) => {}
        Err(e) if e.is_would_block() && args.nonblock => {
            out.flush()?;
            eprintln!("no data currently available; stopping");
        }
        Err(e) => return Err(e.into()),
    }
    // The file is closed here, before any reporting.
    drop(reader);

    if args.stats {
        if args.json {
            let report = Report {
                file: &args.path,
                mode,
                config: &config,
                totals,
                average: totals.average(),
            };
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        } else {
            print_statistics(&mut out, mode, &totals)?;
        }
    }
    out.flush()?;

    Ok(())
}

fn open_reader(args: &Args, config: ReadConfig) -> anyhow::Result<ChunkReader<File>> {
    if !args.nonblock {
        return Ok(ChunkReader::open(&args.path, config)?);
    }

    #[cfg(unix)]
    {
        use anyhow::Context;

        let options = rawread::nonblock::open_options();
        ChunkReader::open_with(&args.path, config, &options)
            .with_context(|| format!("non-blocking open of {}", args.path.display()))
    }
    #[cfg(not(unix))]
    {
        anyhow::bail!("-n is only supported on Unix")
    }
}

fn print_summary(out: &mut impl Write, path: &Path, config: &ReadConfig) -> io::Result<()> {
    writeln!(out, "File: {}", path.display())?;
    writeln!(out, "Buffer size: {} bytes", config.buffer_size)?;
    writeln!(out, "Start offset: {} bytes", config.start_offset)?;
    if let Some(max) = config.max_length {
        writeln!(out, "Max length: {} bytes", max)?;
    }
    writeln!(out)
}

fn print_statistics(
    out: &mut impl Write,
    mode: OutputMode,
    totals: &SessionTotals,
) -> io::Result<()> {
    // Raw data rarely ends with a newline; keep the block on its own lines.
    if mode == OutputMode::Raw {
        writeln!(out)?;
    }
    writeln!(out, "\n=== Statistics ===")?;
    writeln!(out, "Read calls: {}", totals.read_calls)?;
    writeln!(out, "Total bytes: {}", totals.total_bytes)?;
    if let Some(avg) = totals.average() {
        writeln!(out, "Average bytes per read: {}", avg)?;
    }
    Ok(())
}
