use std::error::Error;
use std::fs::{self, OpenOptions};
use std::num::ParseIntError;
use std::ops::Range;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use serial_cart::cartridge::mbc::{BankingController, serial::SerialRom};
use serial_cart::link::Timing;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
/// Dumps a Game Boy cartridge through a serial cartridge reader
struct Args {
    /// Serial device node, already set up for the reader (baud rate, 8N1)
    #[clap(required = true, parse(from_os_str))]
    port: PathBuf,

    /// First address to dump, in hex
    #[clap(short, long, default_value = "0", parse(try_from_str = parse_hex))]
    start: u32,

    /// Number of bytes to dump, in hex
    #[clap(short, long, default_value = "8000", parse(try_from_str = parse_hex))]
    length: u32,

    /// Write raw bytes to this file instead of printing a hexdump
    #[clap(short, long, parse(from_os_str))]
    output: Option<PathBuf>,
}

fn parse_hex(s: &str) -> Result<u32, ParseIntError> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    u32::from_str_radix(digits, 16)
}

/// Addresses to dump, refused if any of them falls outside the 16-bit space.
fn dump_range(start: u32, length: u32) -> Result<Range<u32>, String> {
    start
        .checked_add(length)
        .filter(|&end| end <= 0x1_0000)
        .map(|end| start..end)
        .ok_or_else(|| format!("{start:#x} + {length:#x} leaves the address space"))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let args = Args::parse();

    let range = dump_range(args.start, args.length)?;

    let port = OpenOptions::new().read(true).write(true).open(&args.port)?;
    let rom = SerialRom::new(port, Timing::default())?;
    info!("dumping {:#06x}..{:#06x} from {}", range.start, range.end, args.port.display());

    let mut dump = Vec::with_capacity(args.length as usize);
    for addr in range {
        dump.push(rom.read(addr as u16)?);
    }

    match args.output {
        Some(path) => fs::write(path, &dump)?,
        None => {
            for (row, chunk) in dump.chunks(16).enumerate() {
                let bytes: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
                println!("{:04x}: {}", args.start as usize + row * 16, bytes.join(" "));
            }
        }
    }
    Ok(())
}
