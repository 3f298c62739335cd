//! EOS asset quantity parsing
//!
//! Quantities arrive as human-readable strings like `"1.0000 EOS"` and are
//! split into an arbitrary-precision decimal amount and a packed symbol
//! value: one precision byte followed by up to seven ASCII symbol bytes,
//! zero-padded to eight bytes total.

use crate::chains::eos::name::binary_to_decimal;
use crate::error::{EosSignerError, Result};
use crate::messages::EosAsset;

/// Parse a quantity string into its wire representation.
///
/// The amount keeps every digit the caller wrote (fractional digits are
/// folded in without the dot), so amounts beyond 64-bit range are not
/// rounded. Symbols longer than seven characters are silently truncated by
/// the fixed buffer, same as the device's reference serializer.
pub fn parse_quantity(quantity: &str) -> Result<EosAsset> {
    let trimmed = quantity.trim();
    let s = trimmed.as_bytes();
    let mut pos = 0;
    let mut amount = String::new();
    let mut precision: u32 = 0;

    if s.first() == Some(&b'-') {
        amount.push('-');
        pos += 1;
    }
    let mut found_digit = false;
    while pos < s.len() && s[pos].is_ascii_digit() {
        found_digit = true;
        amount.push(char::from(s[pos]));
        pos += 1;
    }
    if !found_digit {
        return Err(EosSignerError::Validation(format!(
            "asset '{}' must begin with a number",
            quantity
        )));
    }
    if pos < s.len() && s[pos] == b'.' {
        pos += 1;
        while pos < s.len() && s[pos].is_ascii_digit() {
            amount.push(char::from(s[pos]));
            precision += 1;
            pos += 1;
        }
    }
    // pos only ever advanced past ASCII bytes, so this is a char boundary
    let symbol_code = trimmed[pos..].trim();

    let mut buf = Vec::with_capacity(8);
    buf.push((precision & 0xff) as u8);
    buf.extend_from_slice(symbol_code.as_bytes());
    buf.resize(8.max(buf.len()), 0);
    buf.truncate(8);

    Ok(EosAsset {
        amount,
        symbol: binary_to_decimal(&buf),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_standard_quantity() {
        let asset = parse_quantity("1.0000 EOS").unwrap();
        assert_eq!(asset.amount, "10000");
        // [4, 'E', 'O', 'S', 0, 0, 0, 0] little-endian
        assert_eq!(asset.symbol, "1397703940");
    }

    #[test]
    fn test_parse_negative_integral_quantity() {
        let asset = parse_quantity("-5 SYS").unwrap();
        assert_eq!(asset.amount, "-5");
        assert_eq!(asset.symbol, "1398362880");
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let asset = parse_quantity("  1.0000   EOS  ").unwrap();
        assert_eq!(asset.amount, "10000");
        assert_eq!(asset.symbol, "1397703940");
    }

    #[test]
    fn test_parse_rejects_missing_leading_digit() {
        assert!(matches!(
            parse_quantity("abc"),
            Err(EosSignerError::Validation(_))
        ));
        assert!(matches!(
            parse_quantity(".5 EOS"),
            Err(EosSignerError::Validation(_))
        ));
        assert!(matches!(
            parse_quantity("-"),
            Err(EosSignerError::Validation(_))
        ));
    }

    #[test]
    fn test_parse_dot_without_fraction_has_precision_zero() {
        let asset = parse_quantity("7. EOS").unwrap();
        assert_eq!(asset.amount, "7");
        // precision byte 0
        assert_eq!(asset.symbol, "1397703936");
    }

    #[test]
    fn test_long_symbol_is_truncated_to_buffer() {
        // only the first seven symbol characters fit
        let long = parse_quantity("1.00 LONGSYMBOL").unwrap();
        let truncated = parse_quantity("1.00 LONGSYM").unwrap();
        assert_eq!(long.symbol, truncated.symbol);
    }

    #[test]
    fn test_non_ascii_symbol_slices_at_char_boundary() {
        // the symbol slice starts right after the last digit, never inside
        // a multi-byte character
        let asset = parse_quantity("1.00 ÉOS").unwrap();
        assert_eq!(asset.amount, "100");
        let plain = parse_quantity("1.00 EOS").unwrap();
        assert_ne!(asset.symbol, plain.symbol);
    }

    #[test]
    fn test_amount_beyond_u64_keeps_all_digits() {
        let asset = parse_quantity("123456789012345678901234567890 BIG").unwrap();
        assert_eq!(asset.amount, "123456789012345678901234567890");
    }
}
