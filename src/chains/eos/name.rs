//! EOS account name packing
//!
//! Account, action, and permission names are up to 12 characters drawn from
//! `a`-`z` and `1`-`5`, packed 5 bits per character into a 64-bit value. The
//! device protocol carries that value as a decimal-digit string so it
//! survives JSON layers that only have f64 numbers.

/// Pack a name into its 64-bit wire value, rendered as a decimal string.
///
/// Characters outside the valid alphabet encode as symbol 0 rather than
/// failing; this matches the device's reference serializer and is kept
/// as-is.
pub fn serialize_name(name: &str) -> String {
    let mut buf = [0u8; 8];
    let mut bit: i32 = 63;
    for ch in name.bytes() {
        let mut symbol = char_to_symbol(ch);
        if bit < 5 {
            // 13th slot holds only 4 bits
            symbol <<= 1;
        }
        for j in (0..5).rev() {
            if bit >= 0 {
                buf[(bit / 8) as usize] |= ((symbol >> j) & 1) << (bit % 8);
                bit -= 1;
            }
        }
    }
    binary_to_decimal(&buf)
}

fn char_to_symbol(c: u8) -> u8 {
    match c {
        b'a'..=b'z' => c - b'a' + 6,
        b'1'..=b'5' => c - b'1' + 1,
        _ => 0,
    }
}

/// Convert a little-endian byte array to its exact decimal representation
/// using base-10 long arithmetic. Exact at and beyond the 64-bit boundary,
/// unlike anything routed through floating point.
pub(crate) fn binary_to_decimal(bytes: &[u8]) -> String {
    // digits, least significant first
    let mut digits: Vec<u8> = vec![0];
    for &byte in bytes.iter().rev() {
        let mut carry = u32::from(byte);
        for digit in digits.iter_mut() {
            let x = (u32::from(*digit) << 8) + carry;
            *digit = (x % 10) as u8;
            carry = x / 10;
        }
        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }
    digits.iter().rev().map(|d| char::from(b'0' + d)).collect()
}
