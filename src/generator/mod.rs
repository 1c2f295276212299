//! Two-pass code generator: tracks the address cursor, the label table, and
//! pending jumps across a first (sizing) pass and a second (emitting) pass.

pub mod encode;
pub mod numeric;
pub mod pending;
pub mod symbol;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::cpu::{resolve_register, BitMode};
use crate::error::{GeneratorError, GeneratorErrorKind, Span};

use encode::{encode_assignment, encode_jump_displacement, value_byte_size};
use numeric::parse_numeric_text;
use pending::{finalize_first_pass, PendingJump};
use symbol::SymbolTable;

/// Worst-case reservation for a forward jump to an as-yet-unresolved label:
/// opcode byte already accounted for separately, so this is just the
/// largest displacement width `value_byte_size` can produce.
const WORST_CASE_JUMP_SIZE: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsingPass {
    First,
    Second,
}

/// Records, per `jmp <label>` occurrence in source order, whether pass one
/// resolved it immediately (the label was already defined — a backward
/// reference) or had to reserve worst-case space for later tightening. Pass
/// two replays the same decision at the same occurrence rather than
/// re-deriving it, since by pass two every label is defined and a fresh
/// `address_of` check can no longer tell the two cases apart.
#[derive(Debug, Clone, Copy)]
enum JumpPlan {
    Known,
    Pending(usize),
}

pub struct Generator {
    address_origin: u64,
    address_counter: u64,
    bit_mode: BitMode,
    parsing_pass: ParsingPass,
    labels: SymbolTable,
    pending_jumps: Vec<PendingJump>,
    jump_plan: Vec<JumpPlan>,
    jump_plan_cursor: usize,
    output: Option<BufWriter<File>>,
    output_path: PathBuf,
}

impl Generator {
    pub fn new(output_path: &Path) -> Self {
        Generator {
            address_origin: 0,
            address_counter: 0,
            bit_mode: BitMode::Bits16,
            parsing_pass: ParsingPass::First,
            labels: SymbolTable::new(),
            pending_jumps: Vec::new(),
            jump_plan: Vec::new(),
            jump_plan_cursor: 0,
            output: None,
            output_path: output_path.to_path_buf(),
        }
    }

    pub fn current_address(&self) -> u64 {
        self.address_origin + self.address_counter
    }

    pub fn address_origin(&self) -> u64 {
        self.address_origin
    }

    pub fn is_second_pass(&self) -> bool {
        self.parsing_pass == ParsingPass::Second
    }

    pub fn process_set_bit_mode(&mut self, mode: BitMode) {
        self.bit_mode = mode;
    }

    pub fn process_set_origin(&mut self, address: u64) {
        self.address_origin = address;
    }

    pub fn process_label(&mut self, name: &str) {
        self.labels.define(name, self.current_address());
    }

    pub fn process_pad_bytes(&mut self, count: i64, byte: u8, span: Span) -> Result<(), GeneratorError> {
        if count < 0 {
            return Err(GeneratorError::new(
                GeneratorErrorKind::InternalException,
                format!("pad byte count {count} is negative"),
                span,
            ));
        }
        self.emit_bytes(&vec![byte; count as usize])
    }

    pub fn emit_double_word(&mut self, n: u16) -> Result<(), GeneratorError> {
        self.emit_bytes(&[(n & 0xFF) as u8, ((n >> 8) & 0xFF) as u8])
    }

    /// Advances the address counter by `bytes.len()` in both passes; the
    /// bytes themselves are only written to disk on pass two.
    pub fn emit_bytes(&mut self, bytes: &[u8]) -> Result<(), GeneratorError> {
        self.address_counter += bytes.len() as u64;
        if self.is_second_pass() && !bytes.is_empty() {
            self.writer()?
                .write_all(bytes)
                .map_err(|e| GeneratorError::new(GeneratorErrorKind::InternalException, e.to_string(), Span::start()))?;
        }
        Ok(())
    }

    fn writer(&mut self) -> Result<&mut BufWriter<File>, GeneratorError> {
        if self.output.is_none() {
            let file = File::create(&self.output_path).map_err(|e| {
                GeneratorError::new(GeneratorErrorKind::InternalException, e.to_string(), Span::start())
            })?;
            self.output = Some(BufWriter::new(file));
        }
        Ok(self.output.as_mut().expect("output just initialized"))
    }

    pub fn emit_assignment(&mut self, lhs: &str, rhs_text: &str, span: Span) -> Result<(), GeneratorError> {
        let dst = resolve_register(lhs).ok_or_else(|| {
            GeneratorError::new(GeneratorErrorKind::InternalException, format!("unknown register {lhs}"), span)
        })?;
        let bytes = encode_assignment(dst, self.bit_mode, rhs_text, span)?;
        self.emit_bytes(&bytes)
    }

    /// `jmp <constant>`: the target address is fully known up front.
    pub fn emit_jump_to_constant(&mut self, target_text: &str, span: Span) -> Result<(), GeneratorError> {
        let size = value_byte_size(self.bit_mode);
        let target = parse_numeric_text(target_text)
            .map_err(|m| GeneratorError::new(GeneratorErrorKind::InternalException, m, span))? as i64;
        if numeric::count_bytes(target_text) > size {
            return Err(GeneratorError::new(
                GeneratorErrorKind::InternalException,
                format!("{target_text} exceeds the far-jump size reserved in {}-bit mode", self.bit_mode),
                span,
            ));
        }
        let emit_address = self.current_address();
        let displacement = target - (emit_address as i64 + 1 + size as i64);
        let mut bytes = vec![0xEBu8];
        bytes.extend(encode_jump_displacement(displacement, size));
        self.emit_bytes(&bytes)
    }

    /// `jmp <label>`: a backward reference to an already-defined label is
    /// sized exactly on the spot, in both passes alike, since nothing
    /// earlier in the program can ever be shifted by tightening that
    /// happens later. A forward reference's size isn't knowable until the
    /// whole program has been scanned, so pass one reserves worst-case
    /// space and records a pending jump for `finalize_first_pass` to
    /// tighten; pass two then replays that same decision (not a fresh
    /// `address_of` check, which would no longer distinguish the two
    /// cases once every label is defined) and emits at the tightened size.
    pub fn emit_jump_to_label(&mut self, label_name: &str, span: Span) -> Result<(), GeneratorError> {
        let emit_address = self.current_address();

        if self.parsing_pass == ParsingPass::First {
            if let Some(target) = self.labels.address_of(label_name) {
                self.jump_plan.push(JumpPlan::Known);
                return self.emit_resolved_jump(emit_address, target);
            }
            self.labels.get_or_create(label_name);
            let index = self.pending_jumps.len();
            self.pending_jumps.push(PendingJump {
                emit_address,
                size: WORST_CASE_JUMP_SIZE,
                target_name: label_name.to_string(),
                span,
            });
            self.jump_plan.push(JumpPlan::Pending(index));
            let mut bytes = vec![0xEBu8];
            bytes.resize(1 + WORST_CASE_JUMP_SIZE, 0);
            return self.emit_bytes(&bytes);
        }

        let plan = *self.jump_plan.get(self.jump_plan_cursor).ok_or_else(|| {
            GeneratorError::new(GeneratorErrorKind::InternalException, "jump plan cursor ran past recorded jumps", span)
        })?;
        self.jump_plan_cursor += 1;
        let target = self.labels.address_of(label_name).ok_or_else(|| {
            GeneratorError::new(GeneratorErrorKind::InternalException, format!("undefined label `{label_name}`"), span)
        })?;
        match plan {
            JumpPlan::Known => self.emit_resolved_jump(emit_address, target),
            JumpPlan::Pending(index) => {
                let size = self.pending_jumps[index].size;
                let displacement = target as i64 - (emit_address as i64 + 1 + size as i64);
                let mut bytes = vec![0xEBu8];
                bytes.extend(encode_jump_displacement(displacement, size));
                self.emit_bytes(&bytes)
            }
        }
    }

    /// Emits `0xEB` plus the displacement to an already-resolved target,
    /// sized to its own exact minimum. The displacement is relative to the
    /// byte after the instruction, which depends on the instruction's own
    /// size, so this converges a tiny fixed point starting from 1 byte.
    fn emit_resolved_jump(&mut self, emit_address: u64, target: u64) -> Result<(), GeneratorError> {
        let mut size = 1usize;
        let displacement = loop {
            let displacement = target as i64 - (emit_address as i64 + 1 + size as i64);
            let needed = numeric::required_bytes_for_signed_integer(displacement);
            if needed <= size {
                break displacement;
            }
            size = needed;
        };
        let mut bytes = vec![0xEBu8];
        bytes.extend(encode_jump_displacement(displacement, size));
        self.emit_bytes(&bytes)
    }

    /// Transitions first pass to second: tightens pending jumps against
    /// now-fully-resolved labels, then resets per-pass state.
    pub fn next_pass(&mut self) -> Result<(), GeneratorError> {
        if self.is_second_pass() {
            return Err(GeneratorError::new(
                GeneratorErrorKind::InvalidParsingPass,
                "already in the second pass",
                Span::start(),
            ));
        }
        finalize_first_pass(&mut self.pending_jumps, &mut self.labels)?;
        self.address_origin = 0;
        self.address_counter = 0;
        self.bit_mode = BitMode::Bits16;
        self.jump_plan_cursor = 0;
        self.parsing_pass = ParsingPass::Second;
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), GeneratorError> {
        if let Some(writer) = self.output.as_mut() {
            writer
                .flush()
                .map_err(|e| GeneratorError::new(GeneratorErrorKind::InternalException, e.to_string(), Span::start()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn temp_output(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flatasm-generator-test-{tag}-{}.bin", std::process::id()))
    }

    fn run_two_passes(output: &Path, program: impl Fn(&mut Generator) -> Result<(), GeneratorError>) {
        let mut generator = Generator::new(output);
        program(&mut generator).unwrap();
        generator.next_pass().unwrap();
        program(&mut generator).unwrap();
        generator.finish().unwrap();
    }

    fn read_output(path: &Path) -> Vec<u8> {
        let mut buf = Vec::new();
        File::open(path).unwrap().read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn ax_move_round_trips_through_two_passes() {
        let out = temp_output("ax-move");
        run_two_passes(&out, |g| g.emit_assignment("ax", "0x1234", Span::start()));
        assert_eq!(read_output(&out), vec![0xB8, 0x34, 0x12]);
        std::fs::remove_file(&out).ok();
    }

    #[test]
    fn self_jump_tightens_to_one_byte_displacement() {
        let out = temp_output("self-jump");
        run_two_passes(&out, |g| {
            g.process_label("here");
            g.emit_jump_to_label("here", Span::start())
        });
        assert_eq!(read_output(&out), vec![0xEB, 0xFE]);
        std::fs::remove_file(&out).ok();
    }

    #[test]
    fn pad_bytes_emits_requested_fill() {
        let out = temp_output("pad-bytes");
        run_two_passes(&out, |g| g.process_pad_bytes(4, 0x90, Span::start()));
        assert_eq!(read_output(&out), vec![0x90, 0x90, 0x90, 0x90]);
        std::fs::remove_file(&out).ok();
    }

    #[test]
    fn negative_pad_count_is_an_internal_error() {
        let mut generator = Generator::new(&temp_output("pad-negative"));
        let err = generator.process_pad_bytes(-1, 0x90, Span::start()).unwrap_err();
        assert_eq!(err.kind, GeneratorErrorKind::InternalException);
    }

    #[test]
    fn forward_jump_to_later_label_computes_correct_displacement() {
        let out = temp_output("forward-jump");
        run_two_passes(&out, |g| {
            g.emit_jump_to_label("skip", Span::start())?;
            g.process_label("skip");
            Ok(())
        });
        // Tightens to a 1-byte displacement of 0 (falls straight through).
        assert_eq!(read_output(&out), vec![0xEB, 0x00]);
        std::fs::remove_file(&out).ok();
    }

    #[test]
    fn next_pass_twice_is_rejected() {
        let mut generator = Generator::new(&temp_output("double-pass"));
        generator.next_pass().unwrap();
        let err = generator.next_pass().unwrap_err();
        assert_eq!(err.kind, GeneratorErrorKind::InvalidParsingPass);
    }

    #[test]
    fn double_word_emits_little_endian_pair() {
        let out = temp_output("double-word");
        run_two_passes(&out, |g| g.emit_double_word(0x1234));
        assert_eq!(read_output(&out), vec![0x34, 0x12]);
        std::fs::remove_file(&out).ok();
    }
}
