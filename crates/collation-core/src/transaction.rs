//! Transaction records carried in a collation body.

use bytes::Bytes;
use primitive_types::U256;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::address::Address;
use crate::codec::{decode_exact, expect_list};
use crate::crypto::Hash32;
use crate::error::Result;
use crate::schema::{RecordType, TRANSACTION_SCHEMA};

/// A signed transaction, encoded as a nine-item list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transaction {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas: U256,
    /// Recipient, or `None` for contract creation (encoded as an empty string).
    pub to: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl Transaction {
    /// Canonical encoding.
    pub fn encode(&self) -> Bytes {
        rlp::encode(self).freeze()
    }

    /// Decode from canonical bytes, rejecting trailing or missing bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_exact(bytes, RecordType::Transaction)
    }

    /// Keccak-256 of the canonical encoding.
    pub fn hash(&self) -> Hash32 {
        Hash32::keccak(&self.encode())
    }

    pub fn is_contract_creation(&self) -> bool {
        self.to.is_none()
    }
}

impl Encodable for Transaction {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(TRANSACTION_SCHEMA.len());
        s.append(&self.nonce);
        s.append(&self.gas_price);
        s.append(&self.gas);
        match &self.to {
            Some(to) => s.append(to),
            None => s.append_empty_data(),
        };
        s.append(&self.value);
        s.append(&self.data);
        s.append(&self.v);
        s.append(&self.r);
        s.append(&self.s);
    }
}

impl Decodable for Transaction {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, TRANSACTION_SCHEMA.len())?;

        let to_item = rlp.at(3)?;
        let to = if to_item.is_data() && to_item.is_empty() {
            None
        } else {
            Some(to_item.as_val()?)
        };

        Ok(Self {
            nonce: rlp.val_at(0)?,
            gas_price: rlp.val_at(1)?,
            gas: rlp.val_at(2)?,
            to,
            value: rlp.val_at(4)?,
            data: rlp.val_at(5)?,
            v: rlp.val_at(6)?,
            r: rlp.val_at(7)?,
            s: rlp.val_at(8)?,
        })
    }
}
