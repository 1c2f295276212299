use super::*;
use crate::error::ParserErrorKind;
use std::fs::File;
use std::io::Write as _;
use std::path::PathBuf;

fn parser_for(contents: &str, tag: &str) -> (Parser, PathBuf) {
    let path = std::env::temp_dir().join(format!("flatasm-parser-test-{tag}-{}.asm", std::process::id()));
    File::create(&path).unwrap().write_all(contents.as_bytes()).unwrap();
    let parser = Parser::open(&path).unwrap();
    (parser, path)
}

fn generator_for(tag: &str) -> (Generator, PathBuf) {
    let out = std::env::temp_dir().join(format!("flatasm-parser-test-out-{tag}-{}.bin", std::process::id()));
    (Generator::new(&out), out)
}

fn assemble(contents: &str, tag: &str) -> Result<Vec<u8>, ParserError> {
    let (mut parser, src_path) = parser_for(contents, tag);
    let (mut generator, out_path) = generator_for(tag);
    parser.run(&mut generator)?;
    generator.next_pass().map_err(ParserError::from)?;
    parser.reinit()?;
    parser.run(&mut generator)?;
    generator.finish().map_err(ParserError::from)?;
    let bytes = std::fs::read(&out_path).unwrap();
    std::fs::remove_file(&src_path).ok();
    std::fs::remove_file(&out_path).ok();
    Ok(bytes)
}

#[test]
fn simple_ax_assignment() {
    let bytes = assemble("ax = 0x1234\n", "ax-assign").unwrap();
    assert_eq!(bytes, vec![0xB8, 0x34, 0x12]);
}

#[test]
fn al_assignment_single_byte() {
    let bytes = assemble("al = 0x7F\n", "al-assign").unwrap();
    assert_eq!(bytes, vec![0xB0, 0x7F]);
}

#[test]
fn eax_assignment_gets_operand_size_prefix_in_16_bit_mode() {
    let bytes = assemble("eax = 0x11223344\n", "eax-assign").unwrap();
    assert_eq!(bytes, vec![0x66, 0xB8, 0x44, 0x33, 0x22, 0x11]);
}

#[test]
fn label_then_self_jump_tightens() {
    let bytes = assemble("loop:\njmp loop\n", "self-jump").unwrap();
    assert_eq!(bytes, vec![0xEB, 0xFE]);
}

#[test]
fn set_bit_mode_and_set_origin_directives() {
    let bytes = assemble("@SetBitMode(32)\n@SetOrigin(0x7C00)\neax = 0x1\n", "directives").unwrap();
    assert_eq!(bytes, vec![0xB8, 0x01, 0x00, 0x00, 0x00]);
}

#[test]
fn pad_bytes_directive_emits_fill() {
    let bytes = assemble("@PadBytes(4)\n", "pad-default").unwrap();
    assert_eq!(bytes, vec![0x00, 0x00, 0x00, 0x00]);
}

#[test]
fn pad_bytes_with_explicit_fill_byte() {
    let bytes = assemble("@PadBytes(3, 0x90)\n", "pad-explicit").unwrap();
    assert_eq!(bytes, vec![0x90, 0x90, 0x90]);
}

#[test]
fn pad_bytes_accepts_a_constant_expression() {
    let bytes = assemble("@PadBytes(1 + 1, 0x90)\n", "pad-expr").unwrap();
    assert_eq!(bytes, vec![0x90, 0x90]);
}

#[test]
fn double_words_directive_emits_each_value() {
    let bytes = assemble("@DoubleWords(0x1234, 0x5678)\n", "double-words").unwrap();
    assert_eq!(bytes, vec![0x34, 0x12, 0x78, 0x56]);
}

#[test]
fn unknown_directive_is_rejected() {
    let err = assemble("@Nope()\n", "unknown-directive").unwrap_err();
    assert_eq!(err.kind, ParserErrorKind::InvalidDirective);
}

#[test]
fn unsupported_register_is_rejected() {
    let err = assemble("zmm0 = 0x1\n", "bad-register").unwrap_err();
    assert_eq!(err.kind, ParserErrorKind::UnsupportedRegister);
}

#[test]
fn compound_assignment_is_unimplemented() {
    let err = assemble("ax += 0x1\n", "compound-assign").unwrap_err();
    assert_eq!(err.kind, ParserErrorKind::Unimplemented);
}

#[test]
fn indirect_write_is_unimplemented() {
    let err = assemble("*0x1000 = 0x1\n", "indirect-write").unwrap_err();
    assert_eq!(err.kind, ParserErrorKind::Unimplemented);
}

#[test]
fn register_to_register_assignment_is_unimplemented() {
    let err = assemble("ax = bx\n", "reg-to-reg").unwrap_err();
    assert_eq!(err.kind, ParserErrorKind::Unimplemented);
}

#[test]
fn jump_to_numeric_target_computes_displacement() {
    let bytes = assemble("@SetOrigin(0x7C00)\njmp 0x7C04\n", "jump-constant").unwrap();
    assert_eq!(bytes, vec![0xEB, 0x01, 0x00]);
}

#[test]
fn bytes_words_quadwords_stubs_are_accepted_and_emit_nothing() {
    let bytes = assemble("@Bytes(1, 2, 3)\n@Words()\n@QuadWords(1)\n", "stub-directives").unwrap();
    assert!(bytes.is_empty());
}

#[test]
fn current_and_origin_builtins_resolve_to_addresses() {
    let bytes = assemble("@SetOrigin(0x100)\nax = @Origin()\n", "origin-builtin").unwrap();
    assert_eq!(bytes, vec![0xB8, 0x00, 0x01]);
}
