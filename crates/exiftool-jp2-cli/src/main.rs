//! jp2meta - demonstration CLI for the JP2 container reader/writer.
//!
//! Exercises `Jp2Image`'s public API end to end: `info` prints the box tree,
//! `dump-icc` writes the embedded ICC profile to stdout, `dump-xmp` writes the
//! raw XMP packet to stdout. Argument parsing is a hand-rolled loop over
//! `std::env::args()`.

use std::env;
use std::io::{self, Write};

use anyhow::{bail, Context, Result};
use exiftool_jp2::{Jp2Image, StructureOption};

const HELP: &str = "\
jp2meta - inspect JP2 container metadata

USAGE:
    jp2meta info <file.jp2>
    jp2meta dump-icc <file.jp2>
    jp2meta dump-xmp <file.jp2>
";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || matches!(args[1].as_str(), "-h" | "--help") {
        print!("{HELP}");
        return Ok(());
    }

    let command = args[1].as_str();
    let path = args
        .get(2)
        .with_context(|| format!("'{command}' requires a file path argument"))?;

    let mut image = Jp2Image::open(path)
        .with_context(|| format!("failed to open {path}"))?;
    image
        .read_metadata()
        .with_context(|| format!("failed to read metadata from {path}"))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        "info" => image.print_structure(&mut out, StructureOption::Recursive, None)?,
        "dump-icc" => image.print_structure(&mut out, StructureOption::IccProfile, None)?,
        "dump-xmp" => image.print_structure(&mut out, StructureOption::Xmp, None)?,
        other => bail!("unknown command '{other}'; see --help"),
    }

    out.flush()?;
    Ok(())
}
