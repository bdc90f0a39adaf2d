use crate::{Result, TypesError};

pub(crate) fn strip_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

pub fn decode_hex(s: &str) -> Result<Vec<u8>> {
    let digits = strip_prefix(s);
    if digits.len() % 2 != 0 {
        return Err(TypesError::OddLength(s.to_string()));
    }
    hex::decode(digits).map_err(|_| TypesError::InvalidHex(s.to_string()))
}

pub fn encode_hex(bytes: impl AsRef<[u8]>) -> String {
    format!("0x{}", hex::encode(bytes.as_ref()))
}

pub fn parse_quantity_u64(s: &str) -> Result<u64> {
    let (digits, radix) =
        quantity_digits(s).ok_or_else(|| TypesError::InvalidQuantity(s.to_string()))?;
    u64::from_str_radix(digits, radix).map_err(|_| TypesError::InvalidQuantity(s.to_string()))
}

pub(crate) fn quantity_digits(s: &str) -> Option<(&str, u32)> {
    let (digits, radix) = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(digits) => (digits, 16),
        None => (s, 10),
    };
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    // zero padding must not count against the width of the target integer
    let significant = digits.trim_start_matches('0');
    let digits = if significant.is_empty() { &digits[digits.len() - 1..] } else { significant };
    Some((digits, radix))
}
