//! `seam-bin` is the executable of `seam`.
//!
//! It reads a linker map file produced by lld and prints the symbols or
//! sections found in it, one tab-separated record per line.

mod error;

use std::{fs, path::PathBuf};

use argh::FromArgs;
use error::Error;
use miette::Result;
use seam_map::{parse_link_map, parse_link_map_sections, transform_compile_unit};

/// The `seam` command reads a linker map file in lld v1 format and reports
/// the symbols and sections it contains.
#[derive(Debug, FromArgs)]
struct Seam {
    /// list output sections instead of symbols.
    #[argh(switch, short = 's')]
    sections: bool,

    /// rewrite compile units into canonical `[crate: …]` and source forms.
    #[argh(switch, short = 'c')]
    canonical: bool,

    /// path of the link map file.
    #[argh(positional)]
    map_file: PathBuf,
}

fn main() -> Result<()> {
    // Install the error report.
    Error::install_and_configure()?;

    // Parser warnings go through the `log` facade; show them by default,
    // `RUST_LOG` overrides.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // `argh` prints usage and exits by itself on `--help` or bad arguments.
    let seam: Seam = argh::from_env();

    let content = fs::read_to_string(&seam.map_file)
        .map_err(|source| Error::ReadMapFile(seam.map_file.clone(), source))?;

    if seam.sections {
        for section in parse_link_map_sections(&content).map_err(Error::Parse)? {
            println!("{:x}\t{:x}\t{}", section.addr, section.size, section.name);
        }

        return Ok(());
    }

    for mut symbol in parse_link_map(&content).map_err(Error::Parse)? {
        if seam.canonical {
            if let Some((canonical, _)) = transform_compile_unit(&symbol.compile_unit) {
                symbol.compile_unit = canonical;
            }
        }

        println!(
            "{:x}\t{:x}\t{}\t{}\t{}",
            symbol.addr, symbol.size, symbol.section, symbol.name, symbol.compile_unit
        );
    }

    Ok(())
}
