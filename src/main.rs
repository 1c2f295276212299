//! `flatasm` CLI: two positional paths in, a flat binary image out.

use std::io::Write as _;

use clap::Parser as _;
use flatasm::error::AssemblerError;

/// Assemble a flatasm source file into a flat binary image.
#[derive(Debug, clap::Parser)]
#[command(name = "flatasm", version, about)]
struct Cli {
    /// Path to the source file (must be absolute).
    input: std::path::PathBuf,
    /// Path to the binary image to write (must be absolute).
    output: std::path::PathBuf,
}

/// Formats error-level records that carry `[<kind>]:<line>:<col>` text
/// (already produced by the `*Error::fmt` impls) as-is; everything else
/// gets a plain `<level>: <message>` prefix.
fn init_logger() {
    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let message = record.args().to_string();
            if record.level() == log::Level::Error && message.starts_with('[') {
                writeln!(buf, "{message}")
            } else {
                writeln!(buf, "{}: {}", record.level(), message)
            }
        })
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logger();
    let cli = Cli::parse();

    match flatasm::assemble(&cli.input, &cli.output) {
        Ok(()) => Ok(()),
        Err(err) => {
            log::error!("{err}");
            let context = match &err {
                AssemblerError::Io(_) => "I/O error while reading the source or writing the output",
                _ => "while assembling",
            };
            Err(anyhow::Error::new(err)
                .context(context)
                .context(format!("{} -> {}", cli.input.display(), cli.output.display())))
        }
    }
}
