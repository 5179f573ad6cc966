//! Collation header: the signable commitment to one shard period.
//!
//! A header is a fixed ten-field record. Its identity is the Keccak-256 of its
//! canonical encoding; the signing hash covers every field except `sig`, so it
//! does not move when the signature is attached.
//!
//! Every field is reached through [`CollationHeader::field`], and encoding,
//! signing encoding and the display projection all iterate
//! [`HeaderField::ALL`] through it.

use bytes::Bytes;
use primitive_types::U256;
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::fmt;
use std::hash::Hasher;

use crate::address::Address;
use crate::codec::{decode_exact, expect_list};
use crate::config::{ShardingConfig, GENESIS_COINBASE};
use crate::crypto::{Ed25519Signature, Hash32, Keypair, TrieRoot, BLANK_ROOT, EMPTY_LIST_HASH};
use crate::display::DisplayMap;
use crate::error::{CollationError, Result};
use crate::schema::{HeaderField, RecordType};

/// A borrowed, typed view of one header field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    Uint(&'a U256),
    Hash(&'a Hash32),
    Address(&'a Address),
    Bytes(&'a [u8]),
}

impl FieldValue<'_> {
    /// Display form: decimal integers, `0x` hex for hashes and bytes,
    /// checksummed text for addresses.
    pub fn to_display(&self) -> String {
        match *self {
            FieldValue::Uint(v) => v.to_string(),
            FieldValue::Hash(h) => h.to_prefixed_hex(),
            FieldValue::Address(a) => a.to_checksum(),
            FieldValue::Bytes(b) => format!("0x{}", hex::encode(b)),
        }
    }
}

impl Encodable for FieldValue<'_> {
    fn rlp_append(&self, s: &mut RlpStream) {
        match *self {
            FieldValue::Uint(v) => {
                s.append(v);
            }
            FieldValue::Hash(h) => {
                s.append(h);
            }
            FieldValue::Address(a) => {
                s.append(a);
            }
            FieldValue::Bytes(b) => {
                s.encoder().encode_value(b);
            }
        }
    }
}

/// A collation header.
///
/// Equality and [`std::hash::Hash`] follow [`CollationHeader::hash`]: two
/// headers that differ only in `sig` are distinct.
#[derive(Clone)]
pub struct CollationHeader {
    shard_id: U256,
    expected_period_number: U256,
    period_start_prevhash: Hash32,
    parent_collation_hash: Hash32,
    tx_list_root: TrieRoot,
    coinbase: Address,
    post_state_root: TrieRoot,
    receipts_root: TrieRoot,
    number: U256,
    sig: Vec<u8>,
}

impl CollationHeader {
    /// Start building a header with every field at its default.
    pub fn builder() -> CollationHeaderBuilder {
        CollationHeaderBuilder::new(GENESIS_COINBASE)
    }

    /// Start building a header whose default coinbase comes from `config`.
    pub fn builder_with_config(config: &ShardingConfig) -> CollationHeaderBuilder {
        CollationHeaderBuilder::new(config.genesis_coinbase)
    }

    fn with_coinbase(coinbase: Address) -> Self {
        Self {
            shard_id: U256::zero(),
            expected_period_number: U256::zero(),
            period_start_prevhash: EMPTY_LIST_HASH,
            parent_collation_hash: EMPTY_LIST_HASH,
            tx_list_root: BLANK_ROOT,
            coinbase,
            post_state_root: BLANK_ROOT,
            receipts_root: BLANK_ROOT,
            number: U256::zero(),
            sig: Vec::new(),
        }
    }

    pub fn shard_id(&self) -> U256 {
        self.shard_id
    }

    pub fn expected_period_number(&self) -> U256 {
        self.expected_period_number
    }

    pub fn period_start_prevhash(&self) -> Hash32 {
        self.period_start_prevhash
    }

    pub fn parent_collation_hash(&self) -> Hash32 {
        self.parent_collation_hash
    }

    pub fn tx_list_root(&self) -> TrieRoot {
        self.tx_list_root
    }

    /// The canonical 20-byte beneficiary.
    pub fn coinbase(&self) -> Address {
        self.coinbase
    }

    pub fn post_state_root(&self) -> TrieRoot {
        self.post_state_root
    }

    pub fn receipts_root(&self) -> TrieRoot {
        self.receipts_root
    }

    pub fn number(&self) -> U256 {
        self.number
    }

    /// The producer signature; empty until signed.
    pub fn sig(&self) -> &[u8] {
        &self.sig
    }

    /// Read a field by its logical name.
    pub fn field(&self, field: HeaderField) -> FieldValue<'_> {
        match field {
            HeaderField::ShardId => FieldValue::Uint(&self.shard_id),
            HeaderField::ExpectedPeriodNumber => FieldValue::Uint(&self.expected_period_number),
            HeaderField::PeriodStartPrevhash => FieldValue::Hash(&self.period_start_prevhash),
            HeaderField::ParentCollationHash => FieldValue::Hash(&self.parent_collation_hash),
            HeaderField::TxListRoot => FieldValue::Hash(&self.tx_list_root),
            HeaderField::Coinbase => FieldValue::Address(&self.coinbase),
            HeaderField::PostStateRoot => FieldValue::Hash(&self.post_state_root),
            HeaderField::ReceiptsRoot => FieldValue::Hash(&self.receipts_root),
            HeaderField::Number => FieldValue::Uint(&self.number),
            HeaderField::Sig => FieldValue::Bytes(&self.sig),
        }
    }

    /// Attach a signature. This is the only mutation a header permits.
    pub fn set_sig(&mut self, sig: impl Into<Vec<u8>>) {
        self.sig = sig.into();
    }

    /// Sign the signing hash with `keypair` and attach the signature.
    ///
    /// This is a local Ed25519 convenience for producers and tests. It is not
    /// the ledger's signature scheme, whose `sig` is a 65-byte recoverable
    /// secp256k1 signature; callers with such a signer use [`Self::set_sig`].
    pub fn sign(&mut self, keypair: &Keypair) -> Ed25519Signature {
        let signing_hash = self.signing_hash();
        let signature = keypair.sign(signing_hash.as_bytes());
        self.sig = signature.as_bytes().to_vec();
        tracing::trace!(
            number = %self.number,
            signing_hash = %signing_hash,
            "signed collation header"
        );
        signature
    }

    fn append_fields(&self, s: &mut RlpStream, fields: &[HeaderField]) {
        s.begin_list(fields.len());
        for &field in fields {
            s.append(&self.field(field));
        }
    }

    /// Canonical encoding of all ten fields.
    pub fn encode(&self) -> Bytes {
        rlp::encode(self).freeze()
    }

    /// Canonical encoding of the nine fields before `sig`.
    ///
    /// `sig` is omitted from the list, not blanked.
    pub fn signing_encoding(&self) -> Bytes {
        let mut s = RlpStream::new();
        self.append_fields(&mut s, &HeaderField::ALL[..HeaderField::SIGNING_COUNT]);
        s.out().freeze()
    }

    /// Decode from canonical bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        decode_exact(bytes, RecordType::CollationHeader)
    }

    /// Keccak-256 of the full encoding, `sig` included.
    pub fn hash(&self) -> Hash32 {
        Hash32::keccak(&self.encode())
    }

    /// `0x`-prefixed hex of [`Self::hash`].
    pub fn hex_hash(&self) -> String {
        self.hash().to_prefixed_hex()
    }

    /// Keccak-256 of the signing encoding: the value a producer signs.
    pub fn signing_hash(&self) -> Hash32 {
        Hash32::keccak(&self.signing_encoding())
    }

    /// Readable projection with exactly one entry per header field.
    ///
    /// The entry count is fixed by `HeaderField::ALL`, whose length the schema
    /// checks at compile time.
    pub fn to_display_map(&self) -> DisplayMap {
        let mut map = DisplayMap::with_capacity(HeaderField::COUNT);
        for field in HeaderField::ALL {
            map.push(field.name(), self.field(field).to_display());
        }
        map
    }

    /// Parse a display projection back into a header.
    ///
    /// The map must name every field exactly once and nothing else.
    pub fn from_display_map(map: &DisplayMap) -> Result<Self> {
        if let Some(unknown) = map.names().find(|n| HeaderField::from_name(n).is_none()) {
            return Err(CollationError::InvalidFieldValue {
                field: "display_map",
                reason: format!("unknown field {unknown}"),
            });
        }
        if map.len() != HeaderField::COUNT {
            return Err(CollationError::InvalidFieldValue {
                field: "display_map",
                reason: format!("expected {} entries, got {}", HeaderField::COUNT, map.len()),
            });
        }

        let text = |field: HeaderField| {
            map.get(field.name())
                .ok_or_else(|| CollationError::InvalidFieldValue {
                    field: field.name(),
                    reason: "missing".into(),
                })
        };

        let coinbase = text(HeaderField::Coinbase)?.parse::<Address>()?;
        let mut header = Self::with_coinbase(coinbase);
        header.shard_id = parse_uint(HeaderField::ShardId, text(HeaderField::ShardId)?)?;
        header.expected_period_number = parse_uint(
            HeaderField::ExpectedPeriodNumber,
            text(HeaderField::ExpectedPeriodNumber)?,
        )?;
        header.period_start_prevhash = parse_hash(
            HeaderField::PeriodStartPrevhash,
            text(HeaderField::PeriodStartPrevhash)?,
        )?;
        header.parent_collation_hash = parse_hash(
            HeaderField::ParentCollationHash,
            text(HeaderField::ParentCollationHash)?,
        )?;
        header.tx_list_root = parse_hash(HeaderField::TxListRoot, text(HeaderField::TxListRoot)?)?;
        header.post_state_root =
            parse_hash(HeaderField::PostStateRoot, text(HeaderField::PostStateRoot)?)?;
        header.receipts_root =
            parse_hash(HeaderField::ReceiptsRoot, text(HeaderField::ReceiptsRoot)?)?;
        header.number = parse_uint(HeaderField::Number, text(HeaderField::Number)?)?;
        header.sig = parse_hex(HeaderField::Sig, text(HeaderField::Sig)?)?;
        Ok(header)
    }
}

fn parse_uint(field: HeaderField, text: &str) -> Result<U256> {
    let invalid = |reason: String| CollationError::InvalidFieldValue {
        field: field.name(),
        reason,
    };
    if text.starts_with('-') {
        return Err(invalid(format!("negative value {text}")));
    }
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid(format!("not a decimal integer: {text:?}")));
    }
    U256::from_dec_str(text).map_err(|e| invalid(format!("{e:?}")))
}

fn parse_hex(field: HeaderField, text: &str) -> Result<Vec<u8>> {
    let digits = text.strip_prefix("0x").unwrap_or(text);
    hex::decode(digits).map_err(|e| CollationError::InvalidFieldValue {
        field: field.name(),
        reason: e.to_string(),
    })
}

fn parse_hash(field: HeaderField, text: &str) -> Result<Hash32> {
    fixed_hash(field, &parse_hex(field, text)?)
}

fn fixed_hash(field: HeaderField, bytes: &[u8]) -> Result<Hash32> {
    Hash32::try_from(bytes).map_err(|_| CollationError::InvalidFieldWidth {
        field: field.name(),
        expected: Hash32::LEN,
        actual: bytes.len(),
    })
}

impl Default for CollationHeader {
    fn default() -> Self {
        Self::with_coinbase(GENESIS_COINBASE)
    }
}

impl Encodable for CollationHeader {
    fn rlp_append(&self, s: &mut RlpStream) {
        self.append_fields(s, &HeaderField::ALL);
    }
}

impl Decodable for CollationHeader {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        expect_list(rlp, HeaderField::COUNT)?;
        Ok(Self {
            shard_id: rlp.val_at(HeaderField::ShardId.index())?,
            expected_period_number: rlp.val_at(HeaderField::ExpectedPeriodNumber.index())?,
            period_start_prevhash: rlp.val_at(HeaderField::PeriodStartPrevhash.index())?,
            parent_collation_hash: rlp.val_at(HeaderField::ParentCollationHash.index())?,
            tx_list_root: rlp.val_at(HeaderField::TxListRoot.index())?,
            coinbase: rlp.val_at(HeaderField::Coinbase.index())?,
            post_state_root: rlp.val_at(HeaderField::PostStateRoot.index())?,
            receipts_root: rlp.val_at(HeaderField::ReceiptsRoot.index())?,
            number: rlp.val_at(HeaderField::Number.index())?,
            sig: rlp.val_at(HeaderField::Sig.index())?,
        })
    }
}

impl PartialEq for CollationHeader {
    fn eq(&self, other: &Self) -> bool {
        self.hash() == other.hash()
    }
}

impl Eq for CollationHeader {}

impl std::hash::Hash for CollationHeader {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write(self.hash().as_bytes());
    }
}

impl fmt::Debug for CollationHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<CollationHeader(#{} {})>",
            self.number,
            &self.hex_hash()[..10]
        )
    }
}

/// Builder for [`CollationHeader`].
///
/// Hash and root setters take raw bytes; widths and the coinbase are checked
/// once, in [`CollationHeaderBuilder::build`].
#[derive(Debug, Clone)]
pub struct CollationHeaderBuilder {
    shard_id: U256,
    expected_period_number: U256,
    period_start_prevhash: Vec<u8>,
    parent_collation_hash: Vec<u8>,
    tx_list_root: Vec<u8>,
    coinbase: Vec<u8>,
    post_state_root: Vec<u8>,
    receipts_root: Vec<u8>,
    number: U256,
    sig: Vec<u8>,
}

impl CollationHeaderBuilder {
    fn new(coinbase: Address) -> Self {
        Self {
            shard_id: U256::zero(),
            expected_period_number: U256::zero(),
            period_start_prevhash: EMPTY_LIST_HASH.0.to_vec(),
            parent_collation_hash: EMPTY_LIST_HASH.0.to_vec(),
            tx_list_root: BLANK_ROOT.0.to_vec(),
            coinbase: coinbase.0.to_vec(),
            post_state_root: BLANK_ROOT.0.to_vec(),
            receipts_root: BLANK_ROOT.0.to_vec(),
            number: U256::zero(),
            sig: Vec::new(),
        }
    }

    pub fn shard_id(mut self, shard_id: impl Into<U256>) -> Self {
        self.shard_id = shard_id.into();
        self
    }

    pub fn expected_period_number(mut self, period: impl Into<U256>) -> Self {
        self.expected_period_number = period.into();
        self
    }

    pub fn period_start_prevhash(mut self, hash: impl AsRef<[u8]>) -> Self {
        self.period_start_prevhash = hash.as_ref().to_vec();
        self
    }

    pub fn parent_collation_hash(mut self, hash: impl AsRef<[u8]>) -> Self {
        self.parent_collation_hash = hash.as_ref().to_vec();
        self
    }

    pub fn tx_list_root(mut self, root: impl AsRef<[u8]>) -> Self {
        self.tx_list_root = root.as_ref().to_vec();
        self
    }

    /// Any accepted address form: 20 raw bytes, hex, or checksummed text.
    pub fn coinbase(mut self, coinbase: impl AsRef<[u8]>) -> Self {
        self.coinbase = coinbase.as_ref().to_vec();
        self
    }

    pub fn post_state_root(mut self, root: impl AsRef<[u8]>) -> Self {
        self.post_state_root = root.as_ref().to_vec();
        self
    }

    pub fn receipts_root(mut self, root: impl AsRef<[u8]>) -> Self {
        self.receipts_root = root.as_ref().to_vec();
        self
    }

    pub fn number(mut self, number: impl Into<U256>) -> Self {
        self.number = number.into();
        self
    }

    pub fn sig(mut self, sig: impl Into<Vec<u8>>) -> Self {
        self.sig = sig.into();
        self
    }

    /// Validate and build the header.
    pub fn build(self) -> Result<CollationHeader> {
        let header = CollationHeader {
            shard_id: self.shard_id,
            expected_period_number: self.expected_period_number,
            period_start_prevhash: fixed_hash(
                HeaderField::PeriodStartPrevhash,
                &self.period_start_prevhash,
            )?,
            parent_collation_hash: fixed_hash(
                HeaderField::ParentCollationHash,
                &self.parent_collation_hash,
            )?,
            tx_list_root: fixed_hash(HeaderField::TxListRoot, &self.tx_list_root)?,
            coinbase: Address::normalize(&self.coinbase)?,
            post_state_root: fixed_hash(HeaderField::PostStateRoot, &self.post_state_root)?,
            receipts_root: fixed_hash(HeaderField::ReceiptsRoot, &self.receipts_root)?,
            number: self.number,
            sig: self.sig,
        };
        tracing::trace!(
            shard_id = %header.shard_id,
            number = %header.number,
            coinbase = %header.coinbase,
            "built collation header"
        );
        Ok(header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT_ENCODING: &str = "f8be8080\
        a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347\
        a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347\
        a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421\
        943535353535353535353535353535353535353535\
        a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421\
        a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421\
        8080";

    fn sample() -> CollationHeader {
        CollationHeader::builder()
            .shard_id(1u64)
            .expected_period_number(5u64)
            .number(7u64)
            .sig(vec![0xab; 65])
            .build()
            .unwrap()
    }

    #[test]
    fn test_default_encoding() {
        let header = CollationHeader::default();
        assert_eq!(hex::encode(header.encode()), DEFAULT_ENCODING);
    }

    #[test]
    fn test_default_hashes() {
        let header = CollationHeader::default();
        assert_eq!(
            header.hash().to_hex(),
            "d9d242fef12f91cfece173cc2ad68766fb05080b0691767fde1fb6b6254e2f8e"
        );
        assert_eq!(
            header.signing_hash().to_hex(),
            "d49cdacb155ab29ee54a083b439b5b41496e195bbc08940fc73104b7f95e6609"
        );
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let built = CollationHeader::builder().build().unwrap();
        assert_eq!(built, CollationHeader::default());
        assert_eq!(built.period_start_prevhash(), EMPTY_LIST_HASH);
        assert_eq!(built.parent_collation_hash(), EMPTY_LIST_HASH);
        assert_eq!(built.tx_list_root(), BLANK_ROOT);
        assert_eq!(built.post_state_root(), BLANK_ROOT);
        assert_eq!(built.receipts_root(), BLANK_ROOT);
        assert_eq!(built.coinbase(), GENESIS_COINBASE);
        assert!(built.sig().is_empty());
    }

    #[test]
    fn test_signing_encoding_omits_sig() {
        let header = sample();
        let signing = header.signing_encoding();
        let rlp = Rlp::new(&signing);
        assert_eq!(rlp.item_count().unwrap(), HeaderField::SIGNING_COUNT);

        let encoded = header.encode();
        let full = Rlp::new(&encoded);
        assert_eq!(full.item_count().unwrap(), HeaderField::COUNT);
    }

    #[test]
    fn test_sample_hashes() {
        let header = sample();
        assert_eq!(
            header.hash().to_hex(),
            "5cc4df3eb1ebb0362b0b90b4563490b091934ae96e1223dc100e189d922ab379"
        );
        assert_eq!(
            header.signing_hash().to_hex(),
            "c1bd49d2918aac784b316202d6d16d7e0af4a6aafdcd83800e26a42c2b12e7bc"
        );
    }

    #[test]
    fn test_sig_excluded_from_signing_hash() {
        let unsigned = sample();
        let mut signed = unsigned.clone();
        signed.set_sig(vec![0x01; 64]);

        assert_eq!(unsigned.signing_hash(), signed.signing_hash());
        assert_ne!(unsigned.hash(), signed.hash());
        assert_ne!(unsigned, signed);
    }

    #[test]
    fn test_sign_attaches_verifiable_signature() {
        let keypair = Keypair::from_seed(&[0x42; 32]);
        let mut header = CollationHeader::default();
        let before = header.signing_hash();

        let signature = header.sign(&keypair);

        assert_eq!(header.signing_hash(), before);
        assert_eq!(header.sig(), signature.as_bytes());
        let stored = Ed25519Signature::from_slice(header.sig()).unwrap();
        assert!(keypair.public_key().verify(before.as_bytes(), &stored).is_ok());
    }

    #[test]
    fn test_roundtrip() {
        let header = sample();
        let decoded = CollationHeader::decode(&header.encode()).unwrap();
        assert_eq!(decoded, header);
        for field in HeaderField::ALL {
            assert_eq!(decoded.field(field), header.field(field));
        }
    }

    #[test]
    fn test_equality_is_by_hash() {
        let a = sample();
        let b = sample();
        assert_eq!(a, b);

        let other_number = CollationHeader::builder()
            .shard_id(1u64)
            .expected_period_number(5u64)
            .number(8u64)
            .sig(vec![0xab; 65])
            .build()
            .unwrap();
        assert_ne!(a, other_number);
    }

    #[test]
    fn test_std_hash_consistent_with_eq() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(sample());
        set.insert(sample());
        set.insert(CollationHeader::default());
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_short_coinbase_rejected() {
        let err = CollationHeader::builder()
            .coinbase([0x35u8; 19])
            .build()
            .unwrap_err();
        assert!(matches!(err, CollationError::InvalidAddress(_)));
    }

    #[test]
    fn test_checksummed_coinbase_normalized() {
        let header = CollationHeader::builder()
            .coinbase("0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed")
            .build()
            .unwrap();
        assert_eq!(
            header.coinbase().to_hex(),
            "5aaeb6053f3e94c9b9a09f33669435e7ef1beaed"
        );
    }

    #[test]
    fn test_wrong_root_width_rejected() {
        let err = CollationHeader::builder()
            .tx_list_root([0u8; 31])
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CollationError::InvalidFieldWidth {
                field: "tx_list_root",
                expected: 32,
                actual: 31,
            }
        );
    }

    #[test]
    fn test_builder_with_config() {
        let config = ShardingConfig {
            genesis_coinbase: Address::from_bytes([0x11; 20]),
        };
        let header = CollationHeader::builder_with_config(&config).build().unwrap();
        assert_eq!(header.coinbase(), config.genesis_coinbase);
    }

    #[test]
    fn test_display_map() {
        let header = sample();
        let map = header.to_display_map();

        assert_eq!(map.len(), HeaderField::COUNT);
        assert_eq!(
            map.names().collect::<Vec<_>>(),
            HeaderField::ALL.iter().map(|f| f.name()).collect::<Vec<_>>()
        );
        assert_eq!(map.get("shard_id"), Some("1"));
        assert_eq!(map.get("number"), Some("7"));
        assert_eq!(
            map.get("tx_list_root"),
            Some("0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421")
        );
        assert_eq!(
            map.get("coinbase"),
            Some("0x3535353535353535353535353535353535353535")
        );
        assert_eq!(map.get("sig"), Some(format!("0x{}", "ab".repeat(65)).as_str()));
    }

    #[test]
    fn test_display_map_empty_sig() {
        let map = CollationHeader::default().to_display_map();
        assert_eq!(map.get("sig"), Some("0x"));
    }

    #[test]
    fn test_display_map_parses_back() {
        let header = sample();
        let parsed = CollationHeader::from_display_map(&header.to_display_map()).unwrap();
        assert_eq!(parsed, header);
    }

    #[test]
    fn test_display_map_negative_integer() {
        let map: DisplayMap = CollationHeader::default()
            .to_display_map()
            .iter()
            .map(|(k, v)| (k, if k == "number" { "-1" } else { v }))
            .collect();
        let err = CollationHeader::from_display_map(&map).unwrap_err();
        assert!(matches!(
            err,
            CollationError::InvalidFieldValue { field: "number", .. }
        ));
    }

    #[test]
    fn test_display_map_short_hash() {
        let map: DisplayMap = CollationHeader::default()
            .to_display_map()
            .iter()
            .map(|(k, v)| (k, if k == "receipts_root" { "0x1234" } else { v }))
            .collect();
        let err = CollationHeader::from_display_map(&map).unwrap_err();
        assert_eq!(
            err,
            CollationError::InvalidFieldWidth {
                field: "receipts_root",
                expected: 32,
                actual: 2,
            }
        );
    }

    #[test]
    fn test_display_map_missing_field() {
        let map: DisplayMap = CollationHeader::default()
            .to_display_map()
            .iter()
            .filter(|(k, _)| *k != "sig")
            .collect();
        assert!(CollationHeader::from_display_map(&map).is_err());
    }

    #[test]
    fn test_debug_format() {
        let header = CollationHeader::default();
        assert_eq!(format!("{:?}", header), "<CollationHeader(#0 0xd9d242fe)>");
    }

    #[test]
    fn test_decode_rejects_trailing_bytes() {
        let mut bytes = CollationHeader::default().encode().to_vec();
        bytes.push(0x80);
        let err = CollationHeader::decode(&bytes).unwrap_err();
        assert!(matches!(err, CollationError::MalformedEncoding(_)));
    }

    #[test]
    fn test_decode_rejects_truncation() {
        let bytes = CollationHeader::default().encode();
        for len in [0, 1, bytes.len() / 2, bytes.len() - 1] {
            assert!(CollationHeader::decode(&bytes[..len]).is_err(), "len {len}");
        }
    }

    #[test]
    fn test_decode_rejects_nine_fields() {
        let header = CollationHeader::default();
        let err = CollationHeader::decode(&header.signing_encoding()).unwrap_err();
        assert!(matches!(err, CollationError::MalformedEncoding(_)));
    }

    #[test]
    fn test_decode_rejects_short_coinbase() {
        let header = CollationHeader::default();
        let mut s = RlpStream::new_list(HeaderField::COUNT);
        for field in HeaderField::ALL {
            if field == HeaderField::Coinbase {
                s.append(&vec![0x35u8; 19]);
            } else {
                s.append(&header.field(field));
            }
        }
        assert!(CollationHeader::decode(&s.out()).is_err());
    }

    #[test]
    fn test_decode_rejects_list_in_data_position() {
        let header = CollationHeader::default();
        let mut s = RlpStream::new_list(HeaderField::COUNT);
        for field in HeaderField::ALL {
            if field == HeaderField::Sig {
                s.begin_list(0);
            } else {
                s.append(&header.field(field));
            }
        }
        assert!(CollationHeader::decode(&s.out()).is_err());
    }

    #[test]
    fn test_decode_rejects_unparsed_bytes_inside_list() {
        let canonical = CollationHeader::default().encode();
        let bytes = crate::codec::reframe_list(&canonical, &[0xb8]);
        assert_eq!(bytes.len(), canonical.len() + 1);

        let err = CollationHeader::decode(&bytes).unwrap_err();
        assert!(matches!(err, CollationError::MalformedEncoding(_)));
    }

    #[test]
    fn test_decode_rejects_extra_item_inside_list() {
        let canonical = sample().encode();
        let bytes = crate::codec::reframe_list(&canonical, &[0x80]);
        assert!(CollationHeader::decode(&bytes).is_err());
    }
}
