//! `flatasm`: a two-pass assembler that translates a small x86-family
//! assembly dialect into a flat binary image.
//!
//! [`assemble`] is the single library entry point: it drives a [`Parser`]
//! over the input file twice against one [`Generator`], resetting both
//! between passes so branch displacements can be tightened to their
//! minimal encoding before anything is written to disk.

pub mod cpu;
pub mod error;
pub mod generator;
pub mod lexer;
pub mod parser;

use std::path::Path;

use error::AssemblerError;
use generator::Generator;
use parser::Parser;

/// Assembles `input` into `output`. Both paths must be absolute — this is
/// enforced here rather than by the CLI layer so the rule is testable
/// independent of `clap`.
pub fn assemble(input: &Path, output: &Path) -> Result<(), AssemblerError> {
    if !input.is_absolute() {
        return Err(AssemblerError::InputNotAbsolute(input.to_path_buf()));
    }
    if !output.is_absolute() {
        return Err(AssemblerError::OutputNotAbsolute(output.to_path_buf()));
    }

    log::debug!("pass one: sizing against {}", input.display());
    let mut parser = Parser::open(input)?;
    let mut generator = Generator::new(output);
    parser.run(&mut generator)?;

    log::debug!("pass one complete, tightening branches");
    generator.next_pass()?;

    log::debug!("pass two: emitting to {}", output.display());
    parser.reinit()?;
    parser.run(&mut generator)?;
    generator.finish()?;

    log::info!("assembled {} -> {}", input.display(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write as _;

    fn write_source(contents: &str, tag: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("flatasm-lib-test-{tag}-{}.asm", std::process::id()));
        File::create(&path).unwrap().write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn relative_input_path_is_rejected() {
        let out = std::env::temp_dir().join("flatasm-lib-test-rel-out.bin");
        let err = assemble(Path::new("relative.asm"), &out).unwrap_err();
        assert!(matches!(err, AssemblerError::InputNotAbsolute(_)));
    }

    #[test]
    fn relative_output_path_is_rejected() {
        let input = write_source("ax = 0x1\n", "rel-output");
        let err = assemble(&input, Path::new("relative-out.bin")).unwrap_err();
        assert!(matches!(err, AssemblerError::OutputNotAbsolute(_)));
        std::fs::remove_file(&input).ok();
    }

    #[test]
    fn end_to_end_boot_sector_shape() {
        let input = write_source(
            "@SetBitMode(16)\n@SetOrigin(0)\nstart:\n  ax = 0x1234\n  jmp start\n@PadBytes(510 - (@Current() - @Origin()))\n@DoubleWords(0xAA55)\n",
            "boot-sector",
        );
        let output = std::env::temp_dir().join(format!("flatasm-lib-test-boot-sector-out-{}.bin", std::process::id()));
        assemble(&input, &output).unwrap();
        let bytes = std::fs::read(&output).unwrap();
        assert_eq!(bytes.len(), 512);
        assert_eq!(&bytes[bytes.len() - 2..], &[0x55, 0xAA]);
        std::fs::remove_file(&input).ok();
        std::fs::remove_file(&output).ok();
    }
}
