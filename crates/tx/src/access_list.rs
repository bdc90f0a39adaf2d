use crate::{Result, TxError};
use ethwire_rlp::{Decode, Decoder, Encode, Encoder, RlpError};
use ethwire_types::{encode_hex, Address, FixedHashExt, H256};
use serde::{Deserialize, Serialize};

/// One EIP-2930 access list entry: an address and the storage slots a
/// transaction declares it will touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListEntry {
    pub address: Address,
    pub storage_keys: Vec<H256>,
}

impl AccessListEntry {
    pub fn new(address: Address, storage_keys: Vec<H256>) -> Self {
        AccessListEntry {
            address,
            storage_keys,
        }
    }

    /// Builds an entry from raw bytes, checking the 20-byte address and
    /// 32-byte key lengths before anything is encoded.
    pub fn from_slices(address: &[u8], storage_keys: &[&[u8]]) -> Result<Self> {
        let address =
            Address::from_slice(address).map_err(|_| TxError::InvalidAddress(encode_hex(address)))?;
        let storage_keys = storage_keys
            .iter()
            .map(|key| H256::try_from_slice(key).map_err(|_| TxError::InvalidHash(encode_hex(key))))
            .collect::<Result<Vec<_>>>()?;

        Ok(AccessListEntry {
            address,
            storage_keys,
        })
    }
}

impl Encode for AccessListEntry {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_list_with(|entry| {
            self.address.encode(entry);
            entry.encode_list(&self.storage_keys);
        });
    }
}

impl Decode for AccessListEntry {
    fn decode(decoder: &mut Decoder) -> std::result::Result<Self, RlpError> {
        let mut entry = decoder.enter_list()?;
        let address = Address::decode(&mut entry)?;
        let storage_keys = entry.decode_list()?;
        if !entry.is_finished() {
            return Err(ethwire_rlp::DecoderError::TrailingBytes(entry.remaining()).into());
        }
        Ok(AccessListEntry {
            address,
            storage_keys,
        })
    }
}
