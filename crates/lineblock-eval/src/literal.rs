//! Binary literal decoding.
//!
//! Bits are stored in scan order. The scan order is least-significant bit
//! first, so decoding reverses the sequence and reads it as big-endian
//! binary:
//!
//! - `INT`: the low 32 bits of the value, two's complement
//! - `FLOAT`: exactly 32 bits, reinterpreted as an IEEE-754 single
//! - `BOOL`: `value != 0`
//! - `STRING`: one character per 8 bits, in the reversed order

use lineblock_types::ast::{Literal, ValueType};
use lineblock_types::TokenKind;

use crate::value::Value;

/// Decode a parsed literal. Fails on a bad width or a non-bit token.
pub fn decode(lit: &Literal) -> Result<Value, String> {
    let bits = lit
        .bits
        .iter()
        .map(|t| match t.kind {
            TokenKind::Zero => Ok(false),
            TokenKind::One => Ok(true),
            other => Err(format!("{other} is not a bit")),
        })
        .collect::<Result<Vec<_>, _>>()?;
    decode_bits(lit.ty, &bits)
}

/// Decode scan-order bits as `ty`.
pub fn decode_bits(ty: ValueType, bits: &[bool]) -> Result<Value, String> {
    ty.check_literal_width(bits.len())?;
    let msb_first: Vec<bool> = bits.iter().rev().copied().collect();

    Ok(match ty {
        ValueType::Int => Value::Int(to_u64(&msb_first) as i32),
        ValueType::Float => Value::Float(f32::from_bits(to_u64(&msb_first) as u32)),
        ValueType::Bool => Value::Bool(to_u64(&msb_first) != 0),
        ValueType::String => Value::Str(
            msb_first
                .chunks(8)
                .map(|byte| char::from(to_u64(byte) as u8))
                .collect(),
        ),
    })
}

/// Encode a value as the scan-order bits a literal of its type would carry.
///
/// `INT` and `FLOAT` take 32 bits, `BOOL` one bit. `STRING` characters are
/// truncated to their low byte; an empty string has no literal form and
/// encodes to no bits.
pub fn encode(value: &Value) -> Vec<bool> {
    let msb_first: Vec<bool> = match value {
        Value::Int(n) => from_u32(*n as u32),
        Value::Float(f) => from_u32(f.to_bits()),
        Value::Bool(b) => vec![*b],
        Value::Str(s) => s
            .chars()
            .flat_map(|c| from_u32(c as u32).split_off(24))
            .collect(),
    };
    msb_first.into_iter().rev().collect()
}

fn to_u64(bits: &[bool]) -> u64 {
    bits.iter().fold(0, |acc, bit| (acc << 1) | u64::from(*bit))
}

fn from_u32(n: u32) -> Vec<bool> {
    (0..32).rev().map(|i| (n >> i) & 1 == 1).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Parse a scan-order bit string like `"1000"`.
    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    /// Scan-order bits for the big-endian pattern `s`.
    fn msb(s: &str) -> Vec<bool> {
        let mut b = bits(s);
        b.reverse();
        b
    }

    #[test]
    fn test_int_reads_reversed() {
        // scan order 1,1,0 => binary 011 => 3
        assert_eq!(decode_bits(ValueType::Int, &bits("110")), Ok(Value::Int(3)));
        assert_eq!(decode_bits(ValueType::Int, &bits("001")), Ok(Value::Int(4)));
    }

    #[test]
    fn test_int_keeps_low_32_bits() {
        let mut b = vec![true; 32];
        assert_eq!(decode_bits(ValueType::Int, &b), Ok(Value::Int(-1)));
        // bit 32 set only: truncates to zero
        b = vec![false; 33];
        b[32] = true;
        assert_eq!(decode_bits(ValueType::Int, &b), Ok(Value::Int(0)));
    }

    #[test]
    fn test_float_zero_and_one() {
        assert_eq!(
            decode_bits(ValueType::Float, &[false; 32]),
            Ok(Value::Float(0.0))
        );
        let one = msb("00111111100000000000000000000000");
        assert_eq!(decode_bits(ValueType::Float, &one), Ok(Value::Float(1.0)));
    }

    #[test]
    fn test_float_requires_32_bits() {
        assert!(decode_bits(ValueType::Float, &[false; 31]).is_err());
        assert!(decode_bits(ValueType::Float, &[false; 33]).is_err());
    }

    #[test]
    fn test_string_single_char() {
        assert_eq!(
            decode_bits(ValueType::String, &msb("01100001")),
            Ok(Value::Str("a".into()))
        );
    }

    #[test]
    fn test_string_chars_in_reversed_order() {
        let pattern = format!("{}{}", "01101000", "01101001"); // "hi"
        assert_eq!(
            decode_bits(ValueType::String, &msb(&pattern)),
            Ok(Value::Str("hi".into()))
        );
    }

    #[test]
    fn test_string_has_no_length_cap() {
        let pattern = "01100001".repeat(20);
        assert_eq!(
            decode_bits(ValueType::String, &msb(&pattern)),
            Ok(Value::Str("a".repeat(20)))
        );
    }

    #[test]
    fn test_string_width_multiple_of_8() {
        assert!(decode_bits(ValueType::String, &[true; 12]).is_err());
    }

    #[test]
    fn test_bool() {
        assert_eq!(decode_bits(ValueType::Bool, &bits("000")), Ok(Value::Bool(false)));
        assert_eq!(decode_bits(ValueType::Bool, &bits("010")), Ok(Value::Bool(true)));
    }

    #[test]
    fn test_empty_literal_rejected() {
        assert!(decode_bits(ValueType::Int, &[]).is_err());
    }

    #[test]
    fn test_encode_matches_decode() {
        for v in [
            Value::Int(-7),
            Value::Float(1.0),
            Value::Bool(true),
            Value::Str("ab".into()),
        ] {
            assert_eq!(decode_bits(v.value_type(), &encode(&v)), Ok(v.clone()));
        }
    }
}
