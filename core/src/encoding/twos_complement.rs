//! Two's-complement bit-string codec for fixed-width words.
//!
//! Encoding masks the value to `bits` and renders it MSB-first as a
//! zero-padded binary string, the layout `$readmemb`-style testbench readers
//! consume. The mask only aliases values that are out of range, so the range
//! is checked first and out-of-range input is a reported error.

use crate::prelude::StageError;

fn check_width(bits: u32) -> Result<(), StageError> {
    if bits == 0 || bits > 32 {
        return Err(StageError::InvalidInput(format!(
            "word width {} outside supported 1..=32",
            bits
        )));
    }
    Ok(())
}

/// Renders `value` as a `bits`-character two's-complement binary string.
pub fn encode_word(value: i32, bits: u32) -> Result<String, StageError> {
    check_width(bits)?;

    let min = -(1_i64 << (bits - 1));
    let max = (1_i64 << (bits - 1)) - 1;
    let wide = i64::from(value);
    if wide < min || wide > max {
        return Err(StageError::InvalidInput(format!(
            "value {} exceeds the {}-bit signed range [{}, {}]",
            wide, bits, min, max
        )));
    }

    let mask = (1_u64 << bits) - 1;
    let raw = (wide as u64) & mask;
    Ok(format!("{:0width$b}", raw, width = bits as usize))
}

/// Parses a fixed-width two's-complement binary string back to an integer.
pub fn decode_word(text: &str) -> Result<i32, StageError> {
    let bits = text.len() as u32;
    check_width(bits)?;

    let raw = u64::from_str_radix(text, 2)
        .map_err(|err| StageError::InvalidInput(format!("not a binary string: {}", err)))?;

    let signed = if raw >= 1_u64 << (bits - 1) {
        raw as i64 - (1_i64 << bits)
    } else {
        raw as i64
    };
    Ok(signed as i32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_matches_reference_patterns() {
        assert_eq!(encode_word(128, 16).unwrap(), "0000000010000000");
        assert_eq!(encode_word(-128, 16).unwrap(), "1111111110000000");
        assert_eq!(encode_word(0, 16).unwrap(), "0000000000000000");
        assert_eq!(encode_word(-1, 16).unwrap(), "1111111111111111");
    }

    #[test]
    fn encode_rejects_out_of_range_values() {
        assert!(encode_word(32768, 16).is_err());
        assert!(encode_word(-32769, 16).is_err());
        assert!(encode_word(32767, 16).is_ok());
        assert!(encode_word(-32768, 16).is_ok());
    }

    #[test]
    fn encode_rejects_unusable_widths() {
        assert!(encode_word(0, 0).is_err());
        assert!(encode_word(0, 33).is_err());
    }

    #[test]
    fn decode_sign_extends_fixed_width_strings() {
        assert_eq!(decode_word("0000000010000000").unwrap(), 128);
        assert_eq!(decode_word("1111111110000000").unwrap(), -128);
        assert_eq!(decode_word("1000000000000000").unwrap(), -32768);
        assert_eq!(decode_word("011").unwrap(), 3);
        assert_eq!(decode_word("101").unwrap(), -3);
    }

    #[test]
    fn decode_rejects_non_binary_text() {
        assert!(decode_word("00210").is_err());
        assert!(decode_word("").is_err());
    }

    #[test]
    fn round_trip_covers_signed_range_boundaries() {
        for value in [-32768, -32767, -129, -128, -1, 0, 1, 127, 128, 32766, 32767] {
            let encoded = encode_word(value, 16).unwrap();
            assert_eq!(encoded.len(), 16);
            assert_eq!(decode_word(&encoded).unwrap(), value);
        }
    }

    #[test]
    fn round_trip_is_exhaustive_for_narrow_words() {
        for value in -8_i32..8 {
            let encoded = encode_word(value, 4).unwrap();
            assert_eq!(decode_word(&encoded).unwrap(), value);
        }
    }
}
