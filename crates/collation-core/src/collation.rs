//! Collation: a header plus the transactions that produced it.

use bytes::Bytes;
use primitive_types::U256;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

use crate::address::Address;
use crate::codec::{decode_exact, expect_list, strict_list_at};
use crate::crypto::{Hash32, TrieRoot};
use crate::display::DisplayMap;
use crate::error::Result;
use crate::header::{CollationHeader, FieldValue};
use crate::schema::{HeaderField, RecordType, COLLATION_SCHEMA};
use crate::transaction::Transaction;

/// A collation: one header and an ordered list of transactions.
///
/// Identity (`hash`, `signing_hash`, equality of the header) is the header's.
///
/// An empty `transactions` list carries no extra meaning on the wire: it is
/// either a collation with no transactions or one whose body was left out
/// because the consumer already knows the resulting state. Callers that need
/// the distinction must track it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collation {
    pub header: CollationHeader,
    pub transactions: Vec<Transaction>,
}

impl Collation {
    /// A collation with no transactions.
    pub fn new(header: CollationHeader) -> Self {
        Self {
            header,
            transactions: Vec::new(),
        }
    }

    pub fn with_transactions(header: CollationHeader, transactions: Vec<Transaction>) -> Self {
        Self {
            header,
            transactions,
        }
    }

    /// Number of transactions currently in the body.
    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    /// Canonical encoding: `[header, [tx, ...]]`.
    pub fn encode(&self) -> Bytes {
        rlp::encode(self).freeze()
    }

    /// Decode from canonical bytes. Fails if the header, the list framing, or
    /// any member transaction is malformed.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_exact(bytes, RecordType::Collation)
    }

    pub fn hash(&self) -> Hash32 {
        self.header.hash()
    }

    pub fn hex_hash(&self) -> String {
        self.header.hex_hash()
    }

    pub fn signing_hash(&self) -> Hash32 {
        self.header.signing_hash()
    }

    pub fn to_display_map(&self) -> DisplayMap {
        self.header.to_display_map()
    }

    pub fn field(&self, field: HeaderField) -> FieldValue<'_> {
        self.header.field(field)
    }

    pub fn shard_id(&self) -> U256 {
        self.header.shard_id()
    }

    pub fn expected_period_number(&self) -> U256 {
        self.header.expected_period_number()
    }

    pub fn period_start_prevhash(&self) -> Hash32 {
        self.header.period_start_prevhash()
    }

    pub fn parent_collation_hash(&self) -> Hash32 {
        self.header.parent_collation_hash()
    }

    pub fn tx_list_root(&self) -> TrieRoot {
        self.header.tx_list_root()
    }

    pub fn coinbase(&self) -> Address {
        self.header.coinbase()
    }

    pub fn post_state_root(&self) -> TrieRoot {
        self.header.post_state_root()
    }

    pub fn receipts_root(&self) -> TrieRoot {
        self.header.receipts_root()
    }

    pub fn number(&self) -> U256 {
        self.header.number()
    }

    pub fn sig(&self) -> &[u8] {
        self.header.sig()
    }
}

impl From<CollationHeader> for Collation {
    fn from(header: CollationHeader) -> Self {
        Self::new(header)
    }
}

impl Encodable for Collation {
    fn rlp_append(&self, s: &mut RlpStream) {
        s.begin_list(COLLATION_SCHEMA.len());
        s.append(&self.header);
        s.begin_list(self.transactions.len());
        for tx in &self.transactions {
            s.append(tx);
        }
    }
}

impl Decodable for Collation {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, COLLATION_SCHEMA.len())?;
        Ok(Self {
            header: rlp.val_at(0)?,
            transactions: strict_list_at(rlp, 1)?,
        })
    }
}
