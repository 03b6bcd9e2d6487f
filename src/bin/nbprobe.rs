use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about = "Probe standard input with a single non-blocking read")]
struct Args {
    /// Buffer size in bytes
    #[arg(short = 'b', value_name = "SIZE", default_value_t = 256)]
    buffer_size: usize,
}

#[cfg(unix)]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use rawread::nonblock::NonBlocking;
    use rawread::{ChunkReader, ReadConfig, hex_dump};
    use std::fs::File;
    use std::os::fd::AsFd;

    env_logger::init();
    let args = Args::parse();
    let config = ReadConfig::new(args.buffer_size, 0, None)?;

    // A duplicate of fd 0, read directly instead of through std's stdin buffer.
    let stdin = File::from(
        std::io::stdin()
            .as_fd()
            .try_clone_to_owned()
            .context("cannot duplicate stdin")?,
    );
    let _guard = NonBlocking::enable(&stdin).context("cannot set O_NONBLOCK on stdin")?;

    let mut reader = ChunkReader::from_stream(&stdin, config)?;
    match reader.next_chunk() {
        Ok(Some(chunk)) => {
            println!("read {} bytes", chunk.len());
            print!("{}", hex_dump(chunk.data, chunk.offset));
        }
        Ok(None) => println!("end of input"),
        Err(e) if e.is_would_block() => println!("no data available (EAGAIN/EWOULDBLOCK)"),
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

#[cfg(not(unix))]
fn main() -> anyhow::Result<()> {
    let _ = Args::parse();
    anyhow::bail!("non-blocking reads are only supported on Unix")
}
