use crate::{Decoder, Encoder, RlpError, RlpItem};
use ethwire_types::{Address, Bytes, FixedHashExt, UintExt, H256, U256};

pub trait Encode {
    fn encode(&self, encoder: &mut Encoder);
}

pub trait Decode: Sized {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, encoder: &mut Encoder) {
        (**self).encode(encoder);
    }
}

macro_rules! impl_uint {
    ($($ty:ty => $encode:ident, $decode:ident;)*) => {
        $(
            impl Encode for $ty {
                fn encode(&self, encoder: &mut Encoder) {
                    encoder.$encode(*self);
                }
            }

            impl Decode for $ty {
                fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
                    decoder.$decode()
                }
            }
        )*
    };
}

impl_uint! {
    u8 => encode_u8, decode_u8;
    u16 => encode_u16, decode_u16;
    u32 => encode_u32, decode_u32;
    u64 => encode_u64, decode_u64;
    bool => encode_bool, decode_bool;
}

impl Encode for [u8] {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self);
    }
}

impl<const N: usize> Encode for [u8; N] {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self);
    }
}

impl Encode for Vec<u8> {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self);
    }
}

impl Decode for Vec<u8> {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_bytes()
    }
}

impl Encode for str {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Decode for String {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        let bytes = decoder.decode_bytes()?;
        String::from_utf8(bytes).map_err(|_| {
            crate::DecoderError::InvalidData("Invalid UTF-8 string".to_string()).into()
        })
    }
}

// None is the empty byte string
impl<T: Encode> Encode for Option<T> {
    fn encode(&self, encoder: &mut Encoder) {
        match self {
            Some(value) => value.encode(encoder),
            None => encoder.encode_bytes(&[]),
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        if decoder.is_empty_string()? {
            decoder.decode_bytes()?;
            Ok(None)
        } else {
            Ok(Some(T::decode(decoder)?))
        }
    }
}

impl Encode for Bytes {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_slice());
    }
}

impl Decode for Bytes {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        Ok(Bytes::from_vec(decoder.decode_bytes()?))
    }
}

impl Encode for Address {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Decode for Address {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        Ok(Address::from_slice(&decoder.decode_bytes()?)?)
    }
}

impl Encode for H256 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(self.as_bytes());
    }
}

impl Decode for H256 {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        Ok(H256::try_from_slice(&decoder.decode_bytes()?)?)
    }
}

impl Encode for U256 {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_bytes(&self.to_minimal_be());
    }
}

impl Decode for U256 {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        let bytes = decoder.decode_uint_be(32)?;
        Ok(U256::from_be_slice(&bytes)?)
    }
}

impl Encode for RlpItem {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_item(self);
    }
}

impl Decode for RlpItem {
    fn decode(decoder: &mut Decoder) -> Result<Self, RlpError> {
        decoder.decode_item()
    }
}
