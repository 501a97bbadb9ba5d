use std::fs;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::{info, warn};

use lampctl::link::serial::DEFAULT_BAUD_RATE;
use lampctl::parser::{CommandParser, ParserError};

/// Decode lamp protocol lines, as the lamp firmware would see them.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Serial device to listen on.
    #[clap(short, long, conflicts_with = "file")]
    device: Option<String>,

    /// Baud rate for the serial device.
    #[clap(short, long, default_value_t = DEFAULT_BAUD_RATE)]
    baud_rate: u32,

    /// Capture file to decode. Reads stdin if neither this nor --device is given.
    #[clap(short, long)]
    file: Option<PathBuf>,
}

fn open_input(args: &Args) -> anyhow::Result<Box<dyn Read>> {
    if let Some(path) = &args.device {
        let mut port =
            serialport::open(path).with_context(|| format!("opening serial device {}", path))?;
        port.set_baud_rate(args.baud_rate)?;
        // Block until the panel sends something.
        port.set_timeout(std::time::Duration::from_secs(3600))?;
        info!("[monitor] Listening on {} ({} baud)", path, args.baud_rate);
        return Ok(Box::new(BufReader::new(port)));
    }
    if let Some(path) = &args.file {
        let file = fs::File::open(path).with_context(|| format!("opening {}", path.display()))?;
        return Ok(Box::new(BufReader::new(file)));
    }
    Ok(Box::new(BufReader::new(io::stdin())))
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let mut input = open_input(&args)?;

    let mut parser = CommandParser::new();
    let mut count = 0;
    loop {
        match parser.read_command(&mut input) {
            Ok(Some(cmd)) => {
                count += 1;
                println!("{:?}", cmd);
            }
            Ok(None) => break,
            // The parser keeps the partial line; the next read resumes it.
            Err(ParserError::Io(err)) if err.kind() == io::ErrorKind::TimedOut => continue,
            Err(err @ ParserError::Io(_)) | Err(err @ ParserError::Truncated) => {
                return Err(err).context("reading commands");
            }
            Err(err) => warn!("[monitor] Skipping line: {}", err),
        }
    }

    info!("[monitor] {} commands decoded", count);
    Ok(())
}
