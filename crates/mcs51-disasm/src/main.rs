use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mcs51::Image;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Raw MCS-51 code image to disassemble
    #[arg(value_name = "ROM_FILE")]
    rom_file: PathBuf,

    /// Show the raw bytes of each instruction
    #[arg(short, long)]
    bytes: bool,

    /// Address of the first byte of the image (decimal or 0x-prefixed hex)
    #[arg(short, long, default_value = "0", value_parser = parse_address)]
    origin: u32,
}

fn parse_address(s: &str) -> Result<u32, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid address `{s}`: {e}"))
}

fn disassemble(image: &Image, bytes: bool, out: &mut impl Write) -> io::Result<()> {
    for line in image.lines() {
        if bytes {
            writeln!(out, "{line:#}")?;
        } else {
            writeln!(out, "{line}")?;
        }
    }
    out.flush()
}

pub fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    let image = Image::load(&args.rom_file)?.with_origin(args.origin);

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    match disassemble(&image, args.bytes, &mut out) {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        result => result.context("writing listing"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(image: &Image, bytes: bool) -> String {
        let mut out = Vec::new();
        disassemble(image, bytes, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn parses_a_single_positional_argument() {
        let args = Args::try_parse_from(["mcs51-disasm", "rom.bin"]).unwrap();
        assert_eq!(args.rom_file, PathBuf::from("rom.bin"));
        assert!(!args.bytes);
        assert_eq!(args.origin, 0);
    }

    #[test]
    fn parses_optional_flags() {
        let args =
            Args::try_parse_from(["mcs51-disasm", "--bytes", "--origin", "0x8000", "rom.bin"])
                .unwrap();
        assert!(args.bytes);
        assert_eq!(args.origin, 0x8000);
    }

    #[test]
    fn requires_a_file() {
        assert!(Args::try_parse_from(["mcs51-disasm"]).is_err());
    }

    #[test]
    fn address_parsing() {
        assert_eq!(parse_address("4096"), Ok(4096));
        assert_eq!(parse_address("0x1000"), Ok(0x1000));
        assert_eq!(parse_address("0XFF"), Ok(0xff));
        assert!(parse_address("0xzz").is_err());
        assert!(parse_address("").is_err());
    }

    #[test]
    fn prints_one_line_per_instruction() {
        let image = Image::new(vec![0x02, 0x12, 0x34, 0x74, 0x55, 0x00]);
        assert_eq!(
            listing(&image, false),
            "0x0000:\tljmp\t\t0x1234\n0x0003:\tmov\t\ta, #0x55\n0x0005:\tnop\n"
        );
    }

    #[test]
    fn prints_raw_bytes_when_asked() {
        let image = Image::new(vec![0xe2, 0xa5]).with_origin(0x10);
        assert_eq!(
            listing(&image, true),
            "0x0010:\te2      \tmovx\t\ta, @r0\n0x0011:\ta5      \tbyte\t\t0xa5\n"
        );
    }
}
