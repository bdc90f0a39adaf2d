use crate::traits::Encode;
use crate::RlpItem;
use bytes::{BufMut, BytesMut};

pub const EMPTY_STRING_CODE: u8 = 0x80;
pub const EMPTY_LIST_CODE: u8 = 0xc0;
pub const MAX_SHORT_LENGTH: usize = 55;

#[derive(Debug, Default)]
pub struct Encoder {
    buffer: BytesMut,
}

impl Encoder {
    pub fn new() -> Self {
        Encoder {
            buffer: BytesMut::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Encoder {
            buffer: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn finish(self) -> Vec<u8> {
        self.buffer.to_vec()
    }

    pub fn encode_bytes(&mut self, bytes: &[u8]) {
        if let [byte] = bytes {
            if *byte < EMPTY_STRING_CODE {
                self.buffer.put_u8(*byte);
                return;
            }
        }
        self.write_header(EMPTY_STRING_CODE, bytes.len());
        self.buffer.put_slice(bytes);
    }

    pub fn encode_list<T: Encode>(&mut self, items: &[T]) {
        let mut payload = Encoder::new();
        for item in items {
            item.encode(&mut payload);
        }
        self.append_list_payload(&payload.buffer);
    }

    pub fn encode_raw_list<B: AsRef<[u8]>>(&mut self, encoded_items: &[B]) {
        let payload_len = encoded_items.iter().map(|item| item.as_ref().len()).sum();
        self.write_header(EMPTY_LIST_CODE, payload_len);
        for item in encoded_items {
            self.buffer.put_slice(item.as_ref());
        }
    }

    pub fn encode_list_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Encoder),
    {
        let mut payload = Encoder::new();
        f(&mut payload);
        self.append_list_payload(&payload.buffer);
    }

    pub fn encode_uint_be(&mut self, be_bytes: &[u8]) {
        let skip = be_bytes.iter().take_while(|&&b| b == 0).count();
        self.encode_bytes(&be_bytes[skip..]);
    }

    pub fn encode_u8(&mut self, value: u8) {
        self.encode_uint_be(&[value]);
    }

    pub fn encode_u16(&mut self, value: u16) {
        self.encode_uint_be(&value.to_be_bytes());
    }

    pub fn encode_u32(&mut self, value: u32) {
        self.encode_uint_be(&value.to_be_bytes());
    }

    pub fn encode_u64(&mut self, value: u64) {
        self.encode_uint_be(&value.to_be_bytes());
    }

    pub fn encode_bool(&mut self, value: bool) {
        self.encode_u8(u8::from(value));
    }

    pub fn encode_item(&mut self, item: &RlpItem) {
        match item {
            RlpItem::String(bytes) => self.encode_bytes(bytes),
            RlpItem::List(items) => self.encode_list(items),
        }
    }

    fn append_list_payload(&mut self, payload: &[u8]) {
        self.write_header(EMPTY_LIST_CODE, payload.len());
        self.buffer.put_slice(payload);
    }

    fn write_header(&mut self, offset: u8, len: usize) {
        if len <= MAX_SHORT_LENGTH {
            self.buffer.put_u8(offset + len as u8);
        } else {
            let len_bytes = length_bytes(len);
            self.buffer
                .put_u8(offset + MAX_SHORT_LENGTH as u8 + len_bytes.len() as u8);
            self.buffer.put_slice(&len_bytes);
        }
    }
}

fn length_bytes(len: usize) -> Vec<u8> {
    let bytes = len.to_be_bytes();
    let skip = bytes.iter().take_while(|&&b| b == 0).count();
    bytes[skip..].to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded_bytes(bytes: &[u8]) -> Vec<u8> {
        let mut encoder = Encoder::new();
        encoder.encode_bytes(bytes);
        encoder.finish()
    }

    #[test]
    fn test_encode_single_byte() {
        assert_eq!(encoded_bytes(&[0x00]), vec![0x00]);
        assert_eq!(encoded_bytes(&[0x7f]), vec![0x7f]);
        assert_eq!(encoded_bytes(&[0x80]), vec![0x81, 0x80]);
    }

    #[test]
    fn test_encode_string() {
        assert_eq!(encoded_bytes(b"dog"), vec![0x83, b'd', b'o', b'g']);
    }

    #[test]
    fn test_encode_string_length_boundary() {
        let short = vec![0xaa; 55];
        let encoded = encoded_bytes(&short);
        assert_eq!(encoded[0], 0xb7);
        assert_eq!(&encoded[1..], short.as_slice());

        let long = vec![0xaa; 56];
        let encoded = encoded_bytes(&long);
        assert_eq!(&encoded[..2], &[0xb8, 56]);
        assert_eq!(&encoded[2..], long.as_slice());

        let longer = vec![0xaa; 1024];
        let encoded = encoded_bytes(&longer);
        assert_eq!(&encoded[..3], &[0xb9, 0x04, 0x00]);
        assert_eq!(encoded.len(), 1027);
    }

    #[test]
    fn test_encode_list() {
        let mut encoder = Encoder::new();
        encoder.encode_list(&["cat", "dog"]);
        assert_eq!(
            encoder.finish(),
            vec![0xc8, 0x83, b'c', b'a', b't', 0x83, b'd', b'o', b'g']
        );
    }

    #[test]
    fn test_encode_long_list() {
        let items = vec!["abcdefghij"; 6];
        let mut encoder = Encoder::new();
        encoder.encode_list(&items);
        let encoded = encoder.finish();
        // six 11-byte items
        assert_eq!(&encoded[..2], &[0xf8, 66]);
        assert_eq!(encoded.len(), 68);
    }

    #[test]
    fn test_encode_raw_list_matches_encode_list() {
        let mut raw = Encoder::new();
        raw.encode_raw_list(&[vec![0x83, b'c', b'a', b't'], vec![0x83, b'd', b'o', b'g']]);

        let mut typed = Encoder::new();
        typed.encode_list(&["cat", "dog"]);

        assert_eq!(raw.finish(), typed.finish());
    }

    #[test]
    fn test_encode_list_with_nested() {
        let mut encoder = Encoder::new();
        encoder.encode_list_with(|list| {
            list.encode_list::<&str>(&[]);
            list.encode_list_with(|inner| inner.encode_list::<&str>(&[]));
        });
        assert_eq!(encoder.finish(), vec![0xc3, 0xc0, 0xc1, 0xc0]);
    }

    #[test]
    fn test_encode_integers() {
        let mut encoder = Encoder::new();
        encoder.encode_u64(0);
        encoder.encode_u64(15);
        encoder.encode_u64(1024);
        encoder.encode_u16(0x0100);
        encoder.encode_bool(true);
        assert_eq!(
            encoder.finish(),
            vec![0x80, 0x0f, 0x82, 0x04, 0x00, 0x82, 0x01, 0x00, 0x01]
        );
    }

    #[test]
    fn test_encode_empty() {
        assert_eq!(encoded_bytes(&[]), vec![0x80]);
    }

    #[test]
    fn test_encode_empty_list() {
        let mut encoder = Encoder::new();
        encoder.encode_list::<&str>(&[]);
        assert_eq!(encoder.finish(), vec![0xc0]);
    }
}
