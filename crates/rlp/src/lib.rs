pub mod decode;
pub mod encode;
pub mod error;
pub mod traits;

pub use decode::Decoder;
pub use encode::Encoder;
pub use error::{DecoderError, RlpError};
pub use traits::{Decode, Encode};

pub fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    let mut encoder = Encoder::new();
    value.encode(&mut encoder);
    encoder.finish()
}

pub fn decode<T: Decode>(data: &[u8]) -> Result<T, RlpError> {
    let mut decoder = Decoder::new(data);
    let value = T::decode(&mut decoder)?;
    if !decoder.is_finished() {
        return Err(DecoderError::TrailingBytes(decoder.remaining()).into());
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RlpItem {
    String(Vec<u8>),
    List(Vec<RlpItem>),
}

impl RlpItem {
    pub fn uint(value: u64) -> Self {
        let bytes = value.to_be_bytes();
        let skip = bytes.iter().take_while(|&&b| b == 0).count();
        RlpItem::String(bytes[skip..].to_vec())
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            RlpItem::String(bytes) => Some(bytes),
            RlpItem::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[RlpItem]> {
        match self {
            RlpItem::String(_) => None,
            RlpItem::List(items) => Some(items),
        }
    }
}

impl From<&[u8]> for RlpItem {
    fn from(bytes: &[u8]) -> Self {
        RlpItem::String(bytes.to_vec())
    }
}

impl From<Vec<RlpItem>> for RlpItem {
    fn from(items: Vec<RlpItem>) -> Self {
        RlpItem::List(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_encode_decode_string() {
        let data = b"hello world";
        let encoded = encode(&data[..]);
        let decoded: Vec<u8> = decode(&encoded).unwrap();
        assert_eq!(decoded, data);
    }

    #[test]
    fn test_encode_empty_forms() {
        assert_eq!(encode(&RlpItem::String(vec![])), vec![0x80]);
        assert_eq!(encode(&RlpItem::List(vec![])), vec![0xc0]);
        assert_eq!(encode(&RlpItem::uint(0)), vec![0x80]);
    }

    #[test]
    fn test_encode_set_theoretic_three() {
        // [ [], [[]], [ [], [[]] ] ]
        let empty = RlpItem::List(vec![]);
        let one = RlpItem::List(vec![empty.clone()]);
        let two = RlpItem::List(vec![empty.clone(), one.clone()]);
        let item = RlpItem::List(vec![empty, one, two]);
        assert_eq!(
            encode(&item),
            vec![0xc7, 0xc0, 0xc1, 0xc0, 0xc3, 0xc0, 0xc1, 0xc0]
        );
    }

    #[test]
    fn test_encode_lorem_ipsum() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipisicing elit";
        let encoded = encode(text);
        assert_eq!(&encoded[..2], &[0xb8, 0x38]);
        assert_eq!(&encoded[2..], text.as_bytes());
    }

    #[test]
    fn test_decode_item_tree() {
        let item = RlpItem::List(vec![
            RlpItem::uint(1024),
            RlpItem::List(vec![RlpItem::from(&b"cat"[..])]),
        ]);
        let encoded = encode(&item);
        assert_eq!(hex::encode(&encoded), "c8820400c483636174");
        assert_eq!(decode::<RlpItem>(&encoded).unwrap(), item);
    }

    #[test]
    fn test_decode_trailing_bytes() {
        assert_eq!(
            decode::<Vec<u8>>(&[0x80, 0x01]),
            Err(DecoderError::TrailingBytes(1).into())
        );
    }

    proptest! {
        #[test]
        fn prop_short_string_prefix(bytes in proptest::collection::vec(any::<u8>(), 0..=55)) {
            let encoded = encode(&bytes);
            if bytes.len() == 1 && bytes[0] < 0x80 {
                prop_assert_eq!(encoded, bytes);
            } else {
                prop_assert_eq!(encoded[0] as usize, 0x80 + bytes.len());
                prop_assert_eq!(&encoded[1..], bytes.as_slice());
            }
        }

        #[test]
        fn prop_long_string_prefix(bytes in proptest::collection::vec(any::<u8>(), 56..600)) {
            let encoded = encode(&bytes);
            let len_of_len = if bytes.len() < 256 { 1 } else { 2 };
            prop_assert_eq!(encoded[0] as usize, 0xb7 + len_of_len);
            prop_assert_eq!(encoded.len(), 1 + len_of_len + bytes.len());
            let decoded: Vec<u8> = decode(&encoded).unwrap();
            prop_assert_eq!(decoded, bytes);
        }

        #[test]
        fn prop_u64_is_minimal(value in any::<u64>()) {
            let encoded = encode(&value);
            prop_assert_eq!(decode::<u64>(&encoded).unwrap(), value);
            if value == 0 {
                prop_assert_eq!(encoded, vec![0x80]);
            }
        }
    }
}
