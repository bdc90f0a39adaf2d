use crate::hexutil::strip_prefix;
use crate::{decode_hex, Result, TypesError, H160};
use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

pub const ADDRESS_LENGTH: usize = 20;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Address(H160);

impl Address {
    pub const ZERO: Address = Address(H160::zero());

    pub fn zero() -> Self {
        Self::ZERO
    }

    pub fn from_slice(slice: &[u8]) -> Result<Self> {
        if slice.len() != ADDRESS_LENGTH {
            return Err(TypesError::InvalidLength {
                expected: ADDRESS_LENGTH,
                actual: slice.len(),
            });
        }
        Ok(Address(H160::from_slice(slice)))
    }

    pub fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address(H160::from(bytes))
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.0.to_fixed_bytes()
    }

    pub fn checksum(&self) -> String {
        let address_hex = hex::encode(self.0.as_bytes());
        let hash = Keccak256::digest(address_hex.as_bytes());

        let checksummed: String = address_hex
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                let nibble = if i % 2 == 0 { hash[i / 2] >> 4 } else { hash[i / 2] & 0xf };
                if ch.is_ascii_alphabetic() && nibble >= 8 {
                    ch.to_ascii_uppercase()
                } else {
                    ch
                }
            })
            .collect();

        format!("0x{}", checksummed)
    }
}

impl FromStr for Address {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self> {
        let addr = Address::from_slice(&decode_hex(s)?)?;

        let digits = strip_prefix(s);
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        if has_upper && has_lower && addr.checksum()[2..] != *digits {
            return Err(TypesError::InvalidChecksum);
        }

        Ok(addr)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.checksum())
    }
}

impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0.as_bytes()))
    }
}

impl From<H160> for Address {
    fn from(hash: H160) -> Self {
        Address(hash)
    }
}

impl From<[u8; ADDRESS_LENGTH]> for Address {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Address::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for Address {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}
