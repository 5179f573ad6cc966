//! Canonical record schema: the ordered field list of every record type.
//!
//! The encoder, the signing encoder, the decoder and the display projection
//! all walk these lists. Field order is part of the wire contract and is
//! frozen: reordering changes every hash.

use std::fmt;

/// The record types with a canonical encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    CollationHeader,
    Collation,
    Transaction,
}

impl RecordType {
    pub const fn name(self) -> &'static str {
        match self {
            RecordType::CollationHeader => "collation_header",
            RecordType::Collation => "collation",
            RecordType::Transaction => "transaction",
        }
    }
}

/// Semantic type of a field, which fixes how it is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Unsigned integer, minimal big-endian byte string (zero is empty).
    Uint,
    /// 32-byte hash.
    Hash32,
    /// 32-byte accumulator root.
    TrieRoot,
    /// 20-byte canonical address.
    Address,
    /// Variable-length byte string.
    Binary,
    /// A nested record, encoded as its own list.
    Record(RecordType),
    /// A list of nested records.
    List(RecordType),
}

impl FieldType {
    /// The exact byte width of fixed-width fields.
    pub const fn fixed_width(self) -> Option<usize> {
        match self {
            FieldType::Hash32 | FieldType::TrieRoot => Some(32),
            FieldType::Address => Some(20),
            FieldType::Uint | FieldType::Binary | FieldType::Record(_) | FieldType::List(_) => {
                None
            }
        }
    }
}

/// One entry of a record schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub const fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// The ten collation header fields, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HeaderField {
    ShardId,
    ExpectedPeriodNumber,
    PeriodStartPrevhash,
    ParentCollationHash,
    TxListRoot,
    Coinbase,
    PostStateRoot,
    ReceiptsRoot,
    Number,
    Sig,
}

impl HeaderField {
    /// Number of fields in the full encoding.
    pub const COUNT: usize = 10;

    /// Number of leading fields covered by the signing hash (all but `sig`).
    pub const SIGNING_COUNT: usize = 9;

    /// Every field in canonical order.
    pub const ALL: [HeaderField; Self::COUNT] = [
        HeaderField::ShardId,
        HeaderField::ExpectedPeriodNumber,
        HeaderField::PeriodStartPrevhash,
        HeaderField::ParentCollationHash,
        HeaderField::TxListRoot,
        HeaderField::Coinbase,
        HeaderField::PostStateRoot,
        HeaderField::ReceiptsRoot,
        HeaderField::Number,
        HeaderField::Sig,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            HeaderField::ShardId => "shard_id",
            HeaderField::ExpectedPeriodNumber => "expected_period_number",
            HeaderField::PeriodStartPrevhash => "period_start_prevhash",
            HeaderField::ParentCollationHash => "parent_collation_hash",
            HeaderField::TxListRoot => "tx_list_root",
            HeaderField::Coinbase => "coinbase",
            HeaderField::PostStateRoot => "post_state_root",
            HeaderField::ReceiptsRoot => "receipts_root",
            HeaderField::Number => "number",
            HeaderField::Sig => "sig",
        }
    }

    pub const fn field_type(self) -> FieldType {
        match self {
            HeaderField::ShardId | HeaderField::ExpectedPeriodNumber | HeaderField::Number => {
                FieldType::Uint
            }
            HeaderField::PeriodStartPrevhash | HeaderField::ParentCollationHash => {
                FieldType::Hash32
            }
            HeaderField::TxListRoot | HeaderField::PostStateRoot | HeaderField::ReceiptsRoot => {
                FieldType::TrieRoot
            }
            HeaderField::Coinbase => FieldType::Address,
            HeaderField::Sig => FieldType::Binary,
        }
    }

    /// Position in the canonical list.
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn spec(self) -> FieldSpec {
        FieldSpec::new(self.name(), self.field_type())
    }

    /// Look a field up by its logical name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Collation header schema, derived from [`HeaderField`].
pub const HEADER_SCHEMA: [FieldSpec; HeaderField::COUNT] = [
    HeaderField::ALL[0].spec(),
    HeaderField::ALL[1].spec(),
    HeaderField::ALL[2].spec(),
    HeaderField::ALL[3].spec(),
    HeaderField::ALL[4].spec(),
    HeaderField::ALL[5].spec(),
    HeaderField::ALL[6].spec(),
    HeaderField::ALL[7].spec(),
    HeaderField::ALL[8].spec(),
    HeaderField::ALL[9].spec(),
];

const _: () = assert!(HEADER_SCHEMA.len() == HeaderField::COUNT);
const _: () = assert!(HeaderField::Sig.index() == HeaderField::SIGNING_COUNT);

/// Collation schema: the header followed by its transactions.
pub const COLLATION_SCHEMA: [FieldSpec; 2] = [
    FieldSpec::new("header", FieldType::Record(RecordType::CollationHeader)),
    FieldSpec::new("transactions", FieldType::List(RecordType::Transaction)),
];

/// Transaction record schema.
pub const TRANSACTION_SCHEMA: [FieldSpec; 9] = [
    FieldSpec::new("nonce", FieldType::Uint),
    FieldSpec::new("gas_price", FieldType::Uint),
    FieldSpec::new("gas", FieldType::Uint),
    // empty for contract creation, otherwise a 20-byte address
    FieldSpec::new("to", FieldType::Binary),
    FieldSpec::new("value", FieldType::Uint),
    FieldSpec::new("data", FieldType::Binary),
    FieldSpec::new("v", FieldType::Uint),
    FieldSpec::new("r", FieldType::Uint),
    FieldSpec::new("s", FieldType::Uint),
];

/// The ordered field list of `record`.
pub fn describe(record: RecordType) -> &'static [FieldSpec] {
    match record {
        RecordType::CollationHeader => &HEADER_SCHEMA,
        RecordType::Collation => &COLLATION_SCHEMA,
        RecordType::Transaction => &TRANSACTION_SCHEMA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_schema_order() {
        let names: Vec<_> = describe(RecordType::CollationHeader)
            .iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "shard_id",
                "expected_period_number",
                "period_start_prevhash",
                "parent_collation_hash",
                "tx_list_root",
                "coinbase",
                "post_state_root",
                "receipts_root",
                "number",
                "sig",
            ]
        );
    }

    #[test]
    fn test_index_matches_position() {
        for (i, field) in HeaderField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
            assert_eq!(HEADER_SCHEMA[i], field.spec());
        }
    }

    #[test]
    fn test_fixed_widths() {
        assert_eq!(HeaderField::TxListRoot.field_type().fixed_width(), Some(32));
        assert_eq!(HeaderField::ParentCollationHash.field_type().fixed_width(), Some(32));
        assert_eq!(HeaderField::Coinbase.field_type().fixed_width(), Some(20));
        assert_eq!(HeaderField::Sig.field_type().fixed_width(), None);
        assert_eq!(HeaderField::Number.field_type().fixed_width(), None);
    }

    #[test]
    fn test_from_name() {
        assert_eq!(HeaderField::from_name("coinbase"), Some(HeaderField::Coinbase));
        assert_eq!(HeaderField::from_name("transactions"), None);
    }

    #[test]
    fn test_sig_is_only_field_outside_signing_prefix() {
        let excluded: Vec<_> = HeaderField::ALL[HeaderField::SIGNING_COUNT..].to_vec();
        assert_eq!(excluded, vec![HeaderField::Sig]);
    }

    #[test]
    fn test_collation_and_transaction_schemas() {
        assert_eq!(describe(RecordType::Collation).len(), 2);
        assert_eq!(
            describe(RecordType::Collation)[0].ty,
            FieldType::Record(RecordType::CollationHeader)
        );
        assert_eq!(describe(RecordType::Transaction).len(), 9);
    }
}
