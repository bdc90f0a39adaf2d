use crate::{decode_hex, Result, TypesError};
use sha3::{Digest, Keccak256};

pub use primitive_types::{H160, H256};

pub fn keccak256(data: impl AsRef<[u8]>) -> H256 {
    H256::from_slice(&Keccak256::digest(data.as_ref()))
}

// primitive_types panics on a length mismatch in from_slice
pub trait FixedHashExt: Sized {
    const LENGTH: usize;

    fn try_from_slice(slice: &[u8]) -> Result<Self>;

    fn from_hex_str(s: &str) -> Result<Self> {
        Self::try_from_slice(&decode_hex(s)?)
    }
}

macro_rules! impl_fixed_hash_ext {
    ($ty:ty, $len:expr) => {
        impl FixedHashExt for $ty {
            const LENGTH: usize = $len;

            fn try_from_slice(slice: &[u8]) -> Result<Self> {
                if slice.len() != $len {
                    return Err(TypesError::InvalidLength {
                        expected: $len,
                        actual: slice.len(),
                    });
                }
                Ok(<$ty>::from_slice(slice))
            }
        }
    };
}

impl_fixed_hash_ext!(H160, 20);
impl_fixed_hash_ext!(H256, 32);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_from_exact_slice() {
        let h256 = H256::try_from_slice(&[1u8; 32]).unwrap();
        assert_eq!(h256.as_bytes()[0], 1);
        assert_eq!(h256.as_bytes()[31], 1);

        let h160 = H160::try_from_slice(&[0xffu8; 20]).unwrap();
        assert_eq!(h160.as_bytes()[19], 0xff);
    }

    #[test]
    fn test_hash_rejects_wrong_length() {
        assert_eq!(
            H256::try_from_slice(&[0u8; 31]),
            Err(TypesError::InvalidLength { expected: 32, actual: 31 })
        );
        assert!(H160::try_from_slice(&[0u8; 32]).is_err());
    }

    #[test]
    fn test_keccak256_empty() {
        assert_eq!(
            format!("{:x}", keccak256(b"")),
            "c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470"
        );
    }

    #[test]
    fn test_hash_from_hex() {
        let key = format!("0x{}", "ab".repeat(32));
        assert_eq!(H256::from_hex_str(&key).unwrap(), H256::repeat_byte(0xab));
        assert!(H256::from_hex_str("0xabc").is_err());
    }
}
