use crate::access_list::AccessListEntry;
use crate::{Result, TxError};
use ethwire_rlp::{Decode, Decoder, DecoderError, Encode, Encoder, RlpError};
use ethwire_types::{keccak256, Address, Bytes, H256, U256};
use serde::{Deserialize, Serialize};

pub const LEGACY_TX_TYPE: u8 = 0x00;
pub const EIP2930_TX_TYPE: u8 = 0x01;
pub const EIP1559_TX_TYPE: u8 = 0x02;

/// Pre-EIP-2718 transaction. Serialized as a bare RLP list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyTransaction {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub nonce: u64,
    pub gas_price: U256,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Option<Bytes>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip2930Transaction {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub chain_id: u64,
    pub nonce: u64,
    pub gas: u64,
    pub gas_price: U256,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Option<Bytes>,
    pub access_list: Vec<AccessListEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip1559Transaction {
    #[serde(rename = "type")]
    pub tx_type: u8,
    pub chain_id: u64,
    pub nonce: u64,
    pub max_priority_fee_per_gas: U256,
    pub max_fee_per_gas: U256,
    pub gas: u64,
    pub to: Option<Address>,
    pub value: U256,
    pub data: Option<Bytes>,
    pub access_list: Vec<AccessListEntry>,
}

impl Default for Eip2930Transaction {
    fn default() -> Self {
        Eip2930Transaction {
            tx_type: EIP2930_TX_TYPE,
            chain_id: 0,
            nonce: 0,
            gas: 0,
            gas_price: U256::zero(),
            to: None,
            value: U256::zero(),
            data: None,
            access_list: Vec::new(),
        }
    }
}

impl Default for Eip1559Transaction {
    fn default() -> Self {
        Eip1559Transaction {
            tx_type: EIP1559_TX_TYPE,
            chain_id: 0,
            nonce: 0,
            max_priority_fee_per_gas: U256::zero(),
            max_fee_per_gas: U256::zero(),
            gas: 0,
            to: None,
            value: U256::zero(),
            data: None,
            access_list: Vec::new(),
        }
    }
}

/// An unsigned transaction in one of the supported wire shapes.
///
/// Each variant carries its own `tx_type`; [`TransactionEnvelope::serialize`]
/// refuses a record whose discriminant disagrees with its variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TransactionEnvelope {
    Legacy(LegacyTransaction),
    Eip2930(Eip2930Transaction),
    Eip1559(Eip1559Transaction),
}

impl TransactionEnvelope {
    /// The discriminant the variant requires.
    pub fn expected_type(&self) -> u8 {
        match self {
            TransactionEnvelope::Legacy(_) => LEGACY_TX_TYPE,
            TransactionEnvelope::Eip2930(_) => EIP2930_TX_TYPE,
            TransactionEnvelope::Eip1559(_) => EIP1559_TX_TYPE,
        }
    }

    /// The discriminant the record claims.
    pub fn tx_type(&self) -> u8 {
        match self {
            TransactionEnvelope::Legacy(tx) => tx.tx_type,
            TransactionEnvelope::Eip2930(tx) => tx.tx_type,
            TransactionEnvelope::Eip1559(tx) => tx.tx_type,
        }
    }

    pub fn chain_id(&self) -> Option<u64> {
        match self {
            TransactionEnvelope::Legacy(_) => None,
            TransactionEnvelope::Eip2930(tx) => Some(tx.chain_id),
            TransactionEnvelope::Eip1559(tx) => Some(tx.chain_id),
        }
    }

    pub fn nonce(&self) -> u64 {
        match self {
            TransactionEnvelope::Legacy(tx) => tx.nonce,
            TransactionEnvelope::Eip2930(tx) => tx.nonce,
            TransactionEnvelope::Eip1559(tx) => tx.nonce,
        }
    }

    pub fn to(&self) -> Option<Address> {
        match self {
            TransactionEnvelope::Legacy(tx) => tx.to,
            TransactionEnvelope::Eip2930(tx) => tx.to,
            TransactionEnvelope::Eip1559(tx) => tx.to,
        }
    }

    pub fn is_create(&self) -> bool {
        self.to().is_none()
    }

    fn check_type(&self) -> Result<()> {
        let (expected, found) = (self.expected_type(), self.tx_type());
        if expected != found {
            return Err(TxError::InvalidTransactionType { expected, found });
        }
        Ok(())
    }

    /// `typeByte? || RLP(fields)`. Legacy transactions have no type byte.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        self.check_type()?;

        let mut encoder = Encoder::new();
        match self {
            TransactionEnvelope::Legacy(tx) => tx.encode(&mut encoder),
            TransactionEnvelope::Eip2930(tx) => tx.encode(&mut encoder),
            TransactionEnvelope::Eip1559(tx) => tx.encode(&mut encoder),
        }
        let payload = encoder.finish();

        let out = match self {
            TransactionEnvelope::Legacy(_) => payload,
            typed => {
                let mut out = Vec::with_capacity(payload.len() + 1);
                out.push(typed.expected_type());
                out.extend_from_slice(&payload);
                out
            }
        };

        tracing::debug!(
            "Serialized type {} transaction (nonce {}, {} bytes)",
            self.tx_type(),
            self.nonce(),
            out.len()
        );

        Ok(out)
    }

    /// Keccak-256 of the serialized payload, the digest a signer signs.
    pub fn signing_hash(&self) -> Result<H256> {
        Ok(keccak256(self.serialize()?))
    }

    /// Inverse of [`TransactionEnvelope::serialize`].
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let first = *bytes.first().ok_or(TxError::EmptyPayload)?;
        let envelope = match first {
            0xc0..=0xff => TransactionEnvelope::Legacy(ethwire_rlp::decode(bytes)?),
            EIP2930_TX_TYPE => TransactionEnvelope::Eip2930(ethwire_rlp::decode(&bytes[1..])?),
            EIP1559_TX_TYPE => TransactionEnvelope::Eip1559(ethwire_rlp::decode(&bytes[1..])?),
            other => return Err(TxError::UnsupportedTransactionType(other)),
        };
        Ok(envelope)
    }
}

impl From<LegacyTransaction> for TransactionEnvelope {
    fn from(tx: LegacyTransaction) -> Self {
        TransactionEnvelope::Legacy(tx)
    }
}

impl From<Eip2930Transaction> for TransactionEnvelope {
    fn from(tx: Eip2930Transaction) -> Self {
        TransactionEnvelope::Eip2930(tx)
    }
}

impl From<Eip1559Transaction> for TransactionEnvelope {
    fn from(tx: Eip1559Transaction) -> Self {
        TransactionEnvelope::Eip1559(tx)
    }
}

impl Encode for LegacyTransaction {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_list_with(|fields| {
            self.nonce.encode(fields);
            self.gas_price.encode(fields);
            self.gas.encode(fields);
            self.to.encode(fields);
            self.value.encode(fields);
            self.data.encode(fields);
        });
    }
}

impl Encode for Eip2930Transaction {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_list_with(|fields| {
            self.chain_id.encode(fields);
            self.nonce.encode(fields);
            self.gas.encode(fields);
            self.gas_price.encode(fields);
            self.to.encode(fields);
            self.value.encode(fields);
            self.data.encode(fields);
            fields.encode_list(&self.access_list);
        });
    }
}

impl Encode for Eip1559Transaction {
    fn encode(&self, encoder: &mut Encoder) {
        encoder.encode_list_with(|fields| {
            self.chain_id.encode(fields);
            self.nonce.encode(fields);
            self.max_priority_fee_per_gas.encode(fields);
            self.max_fee_per_gas.encode(fields);
            self.gas.encode(fields);
            self.to.encode(fields);
            self.value.encode(fields);
            self.data.encode(fields);
            fields.encode_list(&self.access_list);
        });
    }
}

/// Empty `data` decodes to `None`; both forms encode to `0x80`.
fn decode_data(fields: &mut Decoder) -> std::result::Result<Option<Bytes>, RlpError> {
    let data = Bytes::decode(fields)?;
    Ok((!data.is_empty()).then_some(data))
}

fn finish_fields(fields: &Decoder) -> std::result::Result<(), RlpError> {
    if !fields.is_finished() {
        return Err(DecoderError::TrailingBytes(fields.remaining()).into());
    }
    Ok(())
}

impl Decode for LegacyTransaction {
    fn decode(decoder: &mut Decoder) -> std::result::Result<Self, RlpError> {
        let mut fields = decoder.enter_list()?;
        let tx = LegacyTransaction {
            tx_type: LEGACY_TX_TYPE,
            nonce: u64::decode(&mut fields)?,
            gas_price: U256::decode(&mut fields)?,
            gas: u64::decode(&mut fields)?,
            to: Option::<Address>::decode(&mut fields)?,
            value: U256::decode(&mut fields)?,
            data: decode_data(&mut fields)?,
        };
        finish_fields(&fields)?;
        Ok(tx)
    }
}

impl Decode for Eip2930Transaction {
    fn decode(decoder: &mut Decoder) -> std::result::Result<Self, RlpError> {
        let mut fields = decoder.enter_list()?;
        let tx = Eip2930Transaction {
            tx_type: EIP2930_TX_TYPE,
            chain_id: u64::decode(&mut fields)?,
            nonce: u64::decode(&mut fields)?,
            gas: u64::decode(&mut fields)?,
            gas_price: U256::decode(&mut fields)?,
            to: Option::<Address>::decode(&mut fields)?,
            value: U256::decode(&mut fields)?,
            data: decode_data(&mut fields)?,
            access_list: fields.decode_list()?,
        };
        finish_fields(&fields)?;
        Ok(tx)
    }
}

impl Decode for Eip1559Transaction {
    fn decode(decoder: &mut Decoder) -> std::result::Result<Self, RlpError> {
        let mut fields = decoder.enter_list()?;
        let tx = Eip1559Transaction {
            tx_type: EIP1559_TX_TYPE,
            chain_id: u64::decode(&mut fields)?,
            nonce: u64::decode(&mut fields)?,
            max_priority_fee_per_gas: U256::decode(&mut fields)?,
            max_fee_per_gas: U256::decode(&mut fields)?,
            gas: u64::decode(&mut fields)?,
            to: Option::<Address>::decode(&mut fields)?,
            value: U256::decode(&mut fields)?,
            data: decode_data(&mut fields)?,
            access_list: fields.decode_list()?,
        };
        finish_fields(&fields)?;
        Ok(tx)
    }
}
