//! Forward/backward jump records recorded during pass one and tightened
//! once every label's address is known.

use super::numeric::required_bytes_for_signed_integer;
use super::symbol::SymbolTable;
use crate::error::{GeneratorError, GeneratorErrorKind, Span};

#[derive(Debug, Clone)]
pub struct PendingJump {
    pub emit_address: u64,
    pub size: usize,
    pub target_name: String,
    pub span: Span,
}

/// Walks `pending_jumps` once, in recorded order. For each, recomputes the
/// minimal displacement width against the now-known target address; if
/// that's smaller than the pass-one reservation, shifts every label at or
/// beyond the reservation's end down by the difference. Does not iterate
/// to a fixed point — later jumps see shifts from earlier ones, but a
/// shift triggered by a later jump never revisits an earlier one.
pub fn finalize_first_pass(
    pending_jumps: &mut [PendingJump],
    labels: &mut SymbolTable,
) -> Result<(), GeneratorError> {
    for jump in pending_jumps.iter_mut() {
        let target_address = labels.address_of(&jump.target_name).ok_or_else(|| {
            GeneratorError::new(
                GeneratorErrorKind::InternalException,
                format!("undefined label `{}`", jump.target_name),
                jump.span,
            )
        })?;
        let reservation_end = jump.emit_address + 1 + jump.size as u64;
        let displacement = target_address as i64 - reservation_end as i64;
        let final_size = required_bytes_for_signed_integer(displacement);
        if final_size < jump.size {
            let delta = (jump.size - final_size) as u64;
            labels.shift_from(reservation_end, delta);
            jump.size = final_size;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_loop_tightens_to_one_byte() {
        let mut labels = SymbolTable::new();
        labels.define("l", 0x7C00);
        let mut jumps = vec![PendingJump {
            emit_address: 0x7C00,
            size: 2,
            target_name: "l".to_string(),
            span: Span::start(),
        }];
        finalize_first_pass(&mut jumps, &mut labels).unwrap();
        assert_eq!(jumps[0].size, 1);
    }

    #[test]
    fn undefined_target_is_an_error() {
        let mut labels = SymbolTable::new();
        let mut jumps = vec![PendingJump {
            emit_address: 0,
            size: 2,
            target_name: "nowhere".to_string(),
            span: Span::start(),
        }];
        let err = finalize_first_pass(&mut jumps, &mut labels).unwrap_err();
        assert_eq!(err.kind, GeneratorErrorKind::InternalException);
    }

    #[test]
    fn tightening_shifts_labels_past_the_reservation() {
        let mut labels = SymbolTable::new();
        labels.define("target", 10);
        labels.define("after", 20);
        let mut jumps = vec![PendingJump {
            emit_address: 0,
            size: 4,
            target_name: "target".to_string(),
            span: Span::start(),
        }];
        finalize_first_pass(&mut jumps, &mut labels).unwrap();
        assert_eq!(jumps[0].size, 1);
        assert_eq!(labels.address_of("after"), Some(17));
    }
}
