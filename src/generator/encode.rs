//! Move/assignment and jump-displacement opcode emission.

use super::numeric::{bytes_from_value, count_bytes};
use crate::cpu::{register_index, register_size, supported_by_bit_mode, BitMode, Register, RegisterSize};
use crate::error::{GeneratorError, GeneratorErrorKind, Span};

/// Operand size a move instruction carries under a given `bit_mode`,
/// independent of which register is targeted.
pub fn value_byte_size(bit_mode: BitMode) -> usize {
    match bit_mode {
        BitMode::Bits16 => 2,
        BitMode::Bits32 => 4,
        BitMode::Bits64 => 8,
    }
}

/// Encodes `dst = rhs_text` for the currently active `bit_mode`.
pub fn encode_assignment(
    dst: Register,
    bit_mode: BitMode,
    rhs_text: &str,
    span: Span,
) -> Result<Vec<u8>, GeneratorError> {
    if !supported_by_bit_mode(dst, bit_mode) {
        return Err(GeneratorError::new(
            GeneratorErrorKind::RegisterNotSupportedInBitMode,
            format!("{dst} is not available in {bit_mode}-bit mode"),
            span,
        ));
    }

    let size = register_size(dst);
    let width = size.byte_width();
    let required = count_bytes(rhs_text);
    if required > width {
        return Err(GeneratorError::new(
            GeneratorErrorKind::InternalException,
            format!("value {rhs_text} does not fit in {width} byte(s) for {dst}"),
            span,
        ));
    }

    let index = register_index(dst).ok_or_else(|| {
        GeneratorError::new(
            GeneratorErrorKind::InternalException,
            format!("{dst} has no opcode-plus-index encoding"),
            span,
        )
    })?;

    let imm = bytes_from_value(rhs_text, width)
        .map_err(|message| GeneratorError::new(GeneratorErrorKind::InternalException, message, span))?;

    let mut out = Vec::with_capacity(imm.len() + 2);
    match size {
        RegisterSize::Bits8 => {
            out.push(0xB0 + index);
            out.extend_from_slice(&imm);
        }
        RegisterSize::Bits16 => {
            out.push(0xB8 + index);
            out.extend_from_slice(&imm);
        }
        RegisterSize::Bits32 => {
            if bit_mode == BitMode::Bits16 {
                out.push(0x66);
            }
            out.push(0xB8 + index);
            out.extend_from_slice(&imm);
        }
        RegisterSize::Bits64 => {
            return Err(GeneratorError::new(
                GeneratorErrorKind::InternalException,
                "64-bit move encoding is unimplemented",
                span,
            ));
        }
    }
    Ok(out)
}

/// Serializes a jump displacement as `size` little-endian bytes, via i128 to
/// sidestep i64 shift-overflow at the 8-byte boundary.
pub fn encode_jump_displacement(displacement: i64, size: usize) -> Vec<u8> {
    let widened = displacement as i128;
    let bytes = widened.to_le_bytes();
    bytes[..size].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn al_move_emits_b0_plus_index() {
        let bytes = encode_assignment(Register::Al, BitMode::Bits16, "0x7F", Span::start()).unwrap();
        assert_eq!(bytes, vec![0xB0, 0x7F]);
    }

    #[test]
    fn ax_move_emits_b8_plus_index_little_endian() {
        let bytes = encode_assignment(Register::Ax, BitMode::Bits16, "0x1234", Span::start()).unwrap();
        assert_eq!(bytes, vec![0xB8, 0x34, 0x12]);
    }

    #[test]
    fn eax_move_in_16_bit_mode_gets_operand_size_prefix() {
        let bytes = encode_assignment(Register::Eax, BitMode::Bits16, "0x11223344", Span::start()).unwrap();
        assert_eq!(bytes, vec![0x66, 0xB8, 0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn eax_move_in_32_bit_mode_has_no_prefix() {
        let bytes = encode_assignment(Register::Eax, BitMode::Bits32, "0x11223344", Span::start()).unwrap();
        assert_eq!(bytes, vec![0xB8, 0x44, 0x33, 0x22, 0x11]);
    }

    #[test]
    fn r8b_rejected_outside_64_bit_mode() {
        let err = encode_assignment(Register::R8B, BitMode::Bits32, "0x1", Span::start()).unwrap_err();
        assert_eq!(err.kind, GeneratorErrorKind::RegisterNotSupportedInBitMode);
    }

    #[test]
    fn oversized_value_is_an_internal_error() {
        let err = encode_assignment(Register::Al, BitMode::Bits16, "0x1FF", Span::start()).unwrap_err();
        assert_eq!(err.kind, GeneratorErrorKind::InternalException);
    }

    #[test]
    fn rax_move_is_unimplemented() {
        let err = encode_assignment(Register::Rax, BitMode::Bits64, "0x1", Span::start()).unwrap_err();
        assert_eq!(err.kind, GeneratorErrorKind::InternalException);
    }

    #[test]
    fn self_jump_displacement_is_negative_two() {
        let bytes = encode_jump_displacement(-2, 1);
        assert_eq!(bytes, vec![0xFE]);
    }

    #[test]
    fn displacement_serializes_little_endian_at_width() {
        let bytes = encode_jump_displacement(0x1234, 2);
        assert_eq!(bytes, vec![0x34, 0x12]);
    }
}
