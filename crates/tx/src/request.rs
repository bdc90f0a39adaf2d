//! Text-shaped transaction records, as they arrive over JSON-RPC.
//!
//! Every field is hex or decimal text. [`TransactionRequest::to_envelope`]
//! decodes and validates all of it up front, so the envelope codec only ever
//! sees raw bytes and numbers.

use crate::access_list::AccessListEntry;
use crate::envelope::{
    Eip1559Transaction, Eip2930Transaction, LegacyTransaction, TransactionEnvelope,
    EIP1559_TX_TYPE, EIP2930_TX_TYPE, LEGACY_TX_TYPE,
};
use crate::{Result, TxError};
use ethwire_types::{
    decode_hex, parse_quantity_u64, Address, Bytes, FixedHashExt, TypesError, UintExt, H256, U256,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListItemRequest {
    pub address: String,
    #[serde(default)]
    pub storage_keys: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(rename = "type")]
    pub tx_type: Option<String>,
    pub chain_id: Option<String>,
    pub nonce: Option<String>,
    pub gas_price: Option<String>,
    pub max_priority_fee_per_gas: Option<String>,
    pub max_fee_per_gas: Option<String>,
    pub gas: Option<String>,
    pub to: Option<String>,
    pub value: Option<String>,
    #[serde(alias = "input")]
    pub data: Option<String>,
    pub access_list: Option<Vec<AccessListItemRequest>>,
}

impl AccessListItemRequest {
    pub fn to_entry(&self) -> Result<AccessListEntry> {
        let address = parse_address(&self.address)?;
        let storage_keys = self
            .storage_keys
            .iter()
            .map(|key| parse_storage_key(key))
            .collect::<Result<Vec<_>>>()?;
        Ok(AccessListEntry::new(address, storage_keys))
    }
}

impl TransactionRequest {
    pub fn to_envelope(&self) -> Result<TransactionEnvelope> {
        let tx_type = match &self.tx_type {
            Some(text) => quantity_u64("type", text)?,
            None => return Err(TxError::MissingField("type")),
        };
        let tx_type = u8::try_from(tx_type).map_err(|_| TxError::InvalidQuantity {
            field: "type",
            source: TypesError::Overflow(1),
        })?;

        let envelope = match tx_type {
            LEGACY_TX_TYPE => {
                self.reject(tx_type, "chainId", self.chain_id.is_some())?;
                self.reject(tx_type, "maxPriorityFeePerGas", self.max_priority_fee_per_gas.is_some())?;
                self.reject(tx_type, "maxFeePerGas", self.max_fee_per_gas.is_some())?;
                self.reject(tx_type, "accessList", self.access_list.is_some())?;

                TransactionEnvelope::Legacy(LegacyTransaction {
                    tx_type,
                    nonce: required_u64("nonce", &self.nonce)?,
                    gas_price: required_u256("gasPrice", &self.gas_price)?,
                    gas: required_u64("gas", &self.gas)?,
                    to: self.parse_to()?,
                    value: optional_u256("value", &self.value)?,
                    data: self.parse_data()?,
                })
            }
            EIP2930_TX_TYPE => {
                self.reject(tx_type, "maxPriorityFeePerGas", self.max_priority_fee_per_gas.is_some())?;
                self.reject(tx_type, "maxFeePerGas", self.max_fee_per_gas.is_some())?;

                TransactionEnvelope::Eip2930(Eip2930Transaction {
                    tx_type,
                    chain_id: required_u64("chainId", &self.chain_id)?,
                    nonce: required_u64("nonce", &self.nonce)?,
                    gas: required_u64("gas", &self.gas)?,
                    gas_price: required_u256("gasPrice", &self.gas_price)?,
                    to: self.parse_to()?,
                    value: optional_u256("value", &self.value)?,
                    data: self.parse_data()?,
                    access_list: self.parse_access_list()?,
                })
            }
            EIP1559_TX_TYPE => {
                self.reject(tx_type, "gasPrice", self.gas_price.is_some())?;

                TransactionEnvelope::Eip1559(Eip1559Transaction {
                    tx_type,
                    chain_id: required_u64("chainId", &self.chain_id)?,
                    nonce: required_u64("nonce", &self.nonce)?,
                    max_priority_fee_per_gas: required_u256(
                        "maxPriorityFeePerGas",
                        &self.max_priority_fee_per_gas,
                    )?,
                    max_fee_per_gas: required_u256("maxFeePerGas", &self.max_fee_per_gas)?,
                    gas: required_u64("gas", &self.gas)?,
                    to: self.parse_to()?,
                    value: optional_u256("value", &self.value)?,
                    data: self.parse_data()?,
                    access_list: self.parse_access_list()?,
                })
            }
            other => return Err(TxError::UnsupportedTransactionType(other)),
        };

        Ok(envelope)
    }

    /// Normalizes the request and serializes it in one step.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        self.to_envelope()?.serialize()
    }

    fn reject(&self, tx_type: u8, field: &'static str, present: bool) -> Result<()> {
        if present {
            return Err(TxError::UnexpectedField { field, tx_type });
        }
        Ok(())
    }

    fn parse_to(&self) -> Result<Option<Address>> {
        match self.to.as_deref() {
            None | Some("") => Ok(None),
            Some(text) => parse_address(text).map(Some),
        }
    }

    fn parse_data(&self) -> Result<Option<Bytes>> {
        self.data
            .as_deref()
            .map(|text| Bytes::from_hex(text).map_err(TxError::InvalidHex))
            .transpose()
    }

    fn parse_access_list(&self) -> Result<Vec<AccessListEntry>> {
        self.access_list
            .iter()
            .flatten()
            .map(AccessListItemRequest::to_entry)
            .collect()
    }
}

impl TryFrom<&TransactionRequest> for TransactionEnvelope {
    type Error = TxError;

    fn try_from(request: &TransactionRequest) -> Result<Self> {
        request.to_envelope()
    }
}

fn parse_address(text: &str) -> Result<Address> {
    let bytes = decode_hex(text).map_err(|_| TxError::InvalidAddress(text.to_string()))?;
    Address::from_slice(&bytes).map_err(|_| TxError::InvalidAddress(text.to_string()))
}

fn parse_storage_key(text: &str) -> Result<H256> {
    let bytes = decode_hex(text).map_err(|_| TxError::InvalidHash(text.to_string()))?;
    H256::try_from_slice(&bytes).map_err(|_| TxError::InvalidHash(text.to_string()))
}

fn quantity_u64(field: &'static str, text: &str) -> Result<u64> {
    parse_quantity_u64(text).map_err(|source| TxError::InvalidQuantity { field, source })
}

fn required_u64(field: &'static str, text: &Option<String>) -> Result<u64> {
    let text = text.as_deref().ok_or(TxError::MissingField(field))?;
    quantity_u64(field, text)
}

fn required_u256(field: &'static str, text: &Option<String>) -> Result<U256> {
    let text = text.as_deref().ok_or(TxError::MissingField(field))?;
    U256::from_quantity(text).map_err(|source| TxError::InvalidQuantity { field, source })
}

fn optional_u256(field: &'static str, text: &Option<String>) -> Result<U256> {
    match text {
        Some(_) => required_u256(field, text),
        None => Ok(U256::zero()),
    }
}
