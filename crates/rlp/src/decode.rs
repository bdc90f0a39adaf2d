use crate::encode::{EMPTY_LIST_CODE, EMPTY_STRING_CODE, MAX_SHORT_LENGTH};
use crate::traits::Decode;
use crate::{DecoderError, RlpError, RlpItem};

pub const MAX_DEPTH: usize = 128;

#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    position: usize,
    depth: usize,
}

struct Header {
    offset: usize,
    len: usize,
    is_list: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Decoder { data, position: 0, depth: 0 }
    }

    pub fn decode_bytes(&mut self) -> Result<Vec<u8>, RlpError> {
        let header = self.decode_header()?;
        if header.is_list {
            return Err(DecoderError::UnexpectedList.into());
        }
        Ok(self.take_payload(&header)?.to_vec())
    }

    pub fn decode_list<T: Decode>(&mut self) -> Result<Vec<T>, RlpError> {
        let mut list = self.enter_list()?;
        let mut items = Vec::new();
        while !list.is_finished() {
            items.push(T::decode(&mut list)?);
        }
        Ok(items)
    }

    pub fn enter_list(&mut self) -> Result<Decoder<'a>, RlpError> {
        let header = self.decode_header()?;
        if !header.is_list {
            return Err(DecoderError::UnexpectedString.into());
        }
        if self.depth >= MAX_DEPTH {
            return Err(DecoderError::TooDeep(MAX_DEPTH).into());
        }
        Ok(Decoder {
            data: self.take_payload(&header)?,
            position: 0,
            depth: self.depth + 1,
        })
    }

    pub fn decode_item(&mut self) -> Result<RlpItem, RlpError> {
        if self.is_list()? {
            Ok(RlpItem::List(self.decode_list()?))
        } else {
            Ok(RlpItem::String(self.decode_bytes()?))
        }
    }

    pub fn decode_uint_be(&mut self, max_len: usize) -> Result<Vec<u8>, RlpError> {
        let bytes = self.decode_bytes()?;
        if bytes.len() > max_len {
            return Err(DecoderError::IntegerOverflow.into());
        }
        if bytes.first() == Some(&0) {
            return Err(DecoderError::LeadingZeros.into());
        }
        Ok(bytes)
    }

    pub fn decode_u8(&mut self) -> Result<u8, RlpError> {
        Ok(self.decode_u64_sized(1)? as u8)
    }

    pub fn decode_u16(&mut self) -> Result<u16, RlpError> {
        Ok(self.decode_u64_sized(2)? as u16)
    }

    pub fn decode_u32(&mut self) -> Result<u32, RlpError> {
        Ok(self.decode_u64_sized(4)? as u32)
    }

    pub fn decode_u64(&mut self) -> Result<u64, RlpError> {
        self.decode_u64_sized(8)
    }

    pub fn decode_bool(&mut self) -> Result<bool, RlpError> {
        match self.decode_u8()? {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(DecoderError::InvalidData("Invalid boolean value".to_string()).into()),
        }
    }

    pub fn is_empty_string(&self) -> Result<bool, RlpError> {
        Ok(self.peek()? == EMPTY_STRING_CODE)
    }

    pub fn is_list(&self) -> Result<bool, RlpError> {
        Ok(self.peek()? >= EMPTY_LIST_CODE)
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    fn peek(&self) -> Result<u8, RlpError> {
        self.data
            .get(self.position)
            .copied()
            .ok_or_else(|| DecoderError::UnexpectedEof.into())
    }

    fn decode_u64_sized(&mut self, max_len: usize) -> Result<u64, RlpError> {
        let bytes = self.decode_uint_be(max_len)?;
        Ok(bytes.iter().fold(0u64, |acc, &b| (acc << 8) | u64::from(b)))
    }

    fn take_payload(&mut self, header: &Header) -> Result<&'a [u8], RlpError> {
        let start = self.position + header.offset;
        let end = start
            .checked_add(header.len)
            .ok_or(DecoderError::IntegerOverflow)?;
        let data: &'a [u8] = self.data;
        let payload = data.get(start..end).ok_or(DecoderError::UnexpectedEof)?;
        self.position = end;
        Ok(payload)
    }

    fn decode_header(&self) -> Result<Header, RlpError> {
        let prefix = self.peek()?;

        let header = match prefix {
            0x00..=0x7f => Header { offset: 0, len: 1, is_list: false },
            0x80..=0xb7 => {
                let len = (prefix - EMPTY_STRING_CODE) as usize;
                if len == 1 && self.data.get(self.position + 1).is_some_and(|&b| b < 0x80) {
                    return Err(DecoderError::NonCanonicalSize.into());
                }
                Header { offset: 1, len, is_list: false }
            }
            0xb8..=0xbf => {
                let len_of_len = (prefix - 0xb7) as usize;
                let len = self.decode_long_length(len_of_len)?;
                Header { offset: 1 + len_of_len, len, is_list: false }
            }
            0xc0..=0xf7 => {
                let len = (prefix - EMPTY_LIST_CODE) as usize;
                Header { offset: 1, len, is_list: true }
            }
            0xf8..=0xff => {
                let len_of_len = (prefix - 0xf7) as usize;
                let len = self.decode_long_length(len_of_len)?;
                Header { offset: 1 + len_of_len, len, is_list: true }
            }
        };

        Ok(header)
    }

    fn decode_long_length(&self, len_of_len: usize) -> Result<usize, RlpError> {
        let start = self.position + 1;
        let bytes = self
            .data
            .get(start..start + len_of_len)
            .ok_or(DecoderError::UnexpectedEof)?;

        if bytes[0] == 0 {
            return Err(DecoderError::LeadingZeros.into());
        }

        let mut len = 0usize;
        for &byte in bytes {
            len = len
                .checked_mul(256)
                .and_then(|l| l.checked_add(byte as usize))
                .ok_or(DecoderError::IntegerOverflow)?;
        }

        if len <= MAX_SHORT_LENGTH {
            return Err(DecoderError::NonCanonicalSize.into());
        }

        Ok(len)
    }
}
