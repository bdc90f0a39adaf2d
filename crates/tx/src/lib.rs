//! Unsigned transaction envelopes.
//!
//! Three wire shapes are supported: legacy (bare RLP list), EIP-2930
//! (`0x01 || RLP`) and EIP-1559 (`0x02 || RLP`). Records built from
//! hex text go through [`TransactionRequest`], which decodes every field
//! before the codec runs, so there is a single serialization path.

pub mod access_list;
pub mod envelope;
pub mod error;
pub mod request;

pub use access_list::AccessListEntry;
pub use envelope::{
    Eip1559Transaction, Eip2930Transaction, LegacyTransaction, TransactionEnvelope,
    EIP1559_TX_TYPE, EIP2930_TX_TYPE, LEGACY_TX_TYPE,
};
pub use error::{Result, TxError};
pub use request::{AccessListItemRequest, TransactionRequest};

/// Serializes an unsigned transaction to its wire bytes.
pub fn serialize(tx: &TransactionEnvelope) -> Result<Vec<u8>> {
    tx.serialize()
}

/// Decodes wire bytes produced by [`serialize`].
pub fn decode_envelope(bytes: &[u8]) -> Result<TransactionEnvelope> {
    TransactionEnvelope::decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethwire_types::{Address, U256};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn legacy_round_trips(
            nonce in any::<u64>(),
            gas in any::<u64>(),
            price in any::<u64>(),
            value in any::<u64>(),
            to in proptest::option::of(any::<[u8; 20]>()),
            data in proptest::collection::vec(any::<u8>(), 0..80),
        ) {
            let tx = LegacyTransaction {
                nonce,
                gas,
                gas_price: U256::from(price),
                value: U256::from(value),
                to: to.map(Address::from_bytes),
                data: (!data.is_empty()).then(|| data.into()),
                ..Default::default()
            };
            let envelope = TransactionEnvelope::from(tx);
            let encoded = serialize(&envelope).unwrap();
            prop_assert!(encoded[0] >= 0xc0);
            prop_assert_eq!(decode_envelope(&encoded).unwrap(), envelope);
        }

        #[test]
        fn typed_payloads_carry_type_byte(chain_id in any::<u64>(), nonce in any::<u64>()) {
            let eip2930 = TransactionEnvelope::from(Eip2930Transaction { chain_id, nonce, ..Default::default() });
            let eip1559 = TransactionEnvelope::from(Eip1559Transaction { chain_id, nonce, ..Default::default() });
            prop_assert_eq!(serialize(&eip2930).unwrap()[0], EIP2930_TX_TYPE);
            prop_assert_eq!(serialize(&eip1559).unwrap()[0], EIP1559_TX_TYPE);
        }
    }
}
