//! Numeric helpers shared by the move and jump encoders: sizing a textual
//! literal, serializing it to a fixed-width little-endian buffer, and
//! sizing a signed displacement.

fn ceil_div(n: usize, d: usize) -> usize {
    (n + d - 1) / d
}

pub fn parse_numeric_text(text: &str) -> Result<u64, String> {
    if let Some(hex) = text.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).map_err(|e| e.to_string())
    } else if let Some(bin) = text.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).map_err(|e| e.to_string())
    } else {
        text.parse::<u64>().map_err(|e| e.to_string())
    }
}

/// Minimum number of bytes needed to hold the magnitude of `text`.
///
/// For hex/binary literals, sized straight off the digit count (`ceil`
/// over 2 or 8 digits per byte respectively). The binary case is a
/// corrected form of a division-by-7 formula that neither rounded up nor
/// down correctly; the decimal case is likewise corrected from a
/// doubling search that overestimated by up to 2x.
pub fn count_bytes(text: &str) -> usize {
    if let Some(hex) = text.strip_prefix("0x") {
        ceil_div(hex.len(), 2).max(1)
    } else if let Some(bin) = text.strip_prefix("0b") {
        ceil_div(bin.len(), 8).max(1)
    } else {
        let value = parse_numeric_text(text).unwrap_or(0);
        byte_width_for_magnitude(value)
    }
}

fn byte_width_for_magnitude(value: u64) -> usize {
    if value == 0 {
        return 1;
    }
    let bit_length = 64 - value.leading_zeros() as usize;
    ceil_div(bit_length, 8)
}

/// Decodes `text` and serializes it little-endian into exactly
/// `byte_count` bytes. Fails if the value doesn't fit.
pub fn bytes_from_value(text: &str, byte_count: usize) -> Result<Vec<u8>, String> {
    let value = parse_numeric_text(text)?;
    if byte_count < 8 {
        let capacity = (1u64 << (byte_count * 8)) - 1;
        if value > capacity {
            return Err(format!("{text} does not fit in {byte_count} byte(s)"));
        }
    }
    let mut bytes = value.to_le_bytes().to_vec();
    bytes.truncate(byte_count);
    Ok(bytes)
}

/// Smallest `n` such that `-2^(8n-1) <= v < 2^(8n-1)`, capped at 8 bytes.
pub fn required_bytes_for_signed_integer(v: i64) -> usize {
    let v = v as i128;
    for n in 1..=8u32 {
        let bound: i128 = 1i128 << (8 * n - 1);
        if v >= -bound && v < bound {
            return n as usize;
        }
    }
    8
}
