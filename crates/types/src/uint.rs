use crate::hexutil::quantity_digits;
use crate::{Result, TypesError};

pub use primitive_types::U256;

pub trait UintExt: Sized {
    fn to_minimal_be(&self) -> Vec<u8>;

    fn from_be_slice(bytes: &[u8]) -> Result<Self>;

    fn from_quantity(s: &str) -> Result<Self>;
}

impl UintExt for U256 {
    fn to_minimal_be(&self) -> Vec<u8> {
        let mut bytes = [0u8; 32];
        self.to_big_endian(&mut bytes);
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        bytes[skip..].to_vec()
    }

    fn from_be_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() > 32 {
            return Err(TypesError::Overflow(32));
        }
        Ok(U256::from_big_endian(bytes))
    }

    fn from_quantity(s: &str) -> Result<Self> {
        let (digits, radix) =
            quantity_digits(s).ok_or_else(|| TypesError::InvalidQuantity(s.to_string()))?;
        U256::from_str_radix(digits, radix).map_err(|_| TypesError::InvalidQuantity(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_u256_from_be_slice() {
        let u = U256::from_be_slice(&[0x12, 0x34, 0x56, 0x78]).unwrap();
        assert_eq!(u, U256::from(0x12345678u64));
        assert!(U256::from_be_slice(&[1u8; 33]).is_err());
    }

    #[test]
    fn test_u256_to_minimal_be() {
        assert_eq!(U256::from(0x12345678u64).to_minimal_be(), vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(U256::from(0x80u64).to_minimal_be(), vec![0x80]);
        assert_eq!(U256::MAX.to_minimal_be(), vec![0xff; 32]);
    }

    #[test]
    fn test_u256_zero_is_empty() {
        assert!(U256::zero().to_minimal_be().is_empty());
    }

    #[test]
    fn test_u256_from_quantity() {
        assert_eq!(U256::from_quantity("0xde0b6b3a7640000").unwrap(), U256::from(10u64.pow(18)));
        assert_eq!(U256::from_quantity("1000000000000000000").unwrap(), U256::from(10u64.pow(18)));
        assert!(U256::from_quantity("0x").is_err());
        assert!(U256::from_quantity("12ab").is_err());
    }

    #[test]
    fn test_u256_from_quantity_zero_padded() {
        let hex = format!("0x{}1", "0".repeat(70));
        let decimal = format!("{}1", "0".repeat(70));
        assert_eq!(U256::from_quantity(&hex).unwrap(), U256::one());
        assert_eq!(U256::from_quantity(&decimal).unwrap(), U256::one());
        assert_eq!(U256::from_quantity(&format!("0x{}", "0".repeat(70))).unwrap(), U256::zero());

        let max = format!("0x{}{}", "0".repeat(8), "f".repeat(64));
        assert_eq!(U256::from_quantity(&max).unwrap(), U256::MAX);
        assert!(U256::from_quantity(&format!("0x1{}", "0".repeat(64))).is_err());
    }

    proptest! {
        #[test]
        fn prop_minimal_be_round_trip(bytes in any::<[u8; 32]>()) {
            let value = U256::from_big_endian(&bytes);
            let minimal = value.to_minimal_be();
            prop_assert!(minimal.first() != Some(&0));
            prop_assert_eq!(U256::from_be_slice(&minimal).unwrap(), value);
        }

        #[test]
        fn prop_quantity_matches_display(bytes in any::<[u8; 32]>()) {
            let value = U256::from_big_endian(&bytes);
            prop_assert_eq!(U256::from_quantity(&value.to_string()).unwrap(), value);
            prop_assert_eq!(U256::from_quantity(&format!("{:#x}", value)).unwrap(), value);
        }
    }
}
