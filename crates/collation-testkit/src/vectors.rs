//! Golden test vectors for deterministic verification.
//!
//! These vectors pin the canonical encoding, hash and signing hash of known
//! headers so that every implementation produces identical results.

use collation_core::{CollationHeader, DisplayMap, Result};

const EMPTY_LIST_HASH: &str = "0x1dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347";
const BLANK_ROOT: &str = "0x56e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421";
const GENESIS_COINBASE: &str = "0x3535353535353535353535353535353535353535";

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Header fields in display form, in canonical order.
    pub fields: [(&'static str, &'static str); 10],
    /// Expected canonical encoding (hex).
    pub expected_encoding: &'static str,
    /// Expected header hash (hex).
    pub expected_hash: &'static str,
    /// Expected signing hash (hex).
    pub expected_signing_hash: &'static str,
}

impl GoldenVector {
    pub fn display_map(&self) -> DisplayMap {
        self.fields.iter().copied().collect()
    }

    pub fn header(&self) -> Result<CollationHeader> {
        CollationHeader::from_display_map(&self.display_map())
    }
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "default header",
            fields: [
                ("shard_id", "0"),
                ("expected_period_number", "0"),
                ("period_start_prevhash", EMPTY_LIST_HASH),
                ("parent_collation_hash", EMPTY_LIST_HASH),
                ("tx_list_root", BLANK_ROOT),
                ("coinbase", GENESIS_COINBASE),
                ("post_state_root", BLANK_ROOT),
                ("receipts_root", BLANK_ROOT),
                ("number", "0"),
                ("sig", "0x"),
            ],
            expected_encoding: concat!(
                "f8be8080",
                "a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
                "a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
                "a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
                "943535353535353535353535353535353535353535",
                "a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
                "a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
                "8080",
            ),
            expected_hash: "d9d242fef12f91cfece173cc2ad68766fb05080b0691767fde1fb6b6254e2f8e",
            expected_signing_hash:
                "d49cdacb155ab29ee54a083b439b5b41496e195bbc08940fc73104b7f95e6609",
        },
        GoldenVector {
            name: "signed header on shard 1",
            fields: [
                ("shard_id", "1"),
                ("expected_period_number", "5"),
                ("period_start_prevhash", EMPTY_LIST_HASH),
                ("parent_collation_hash", EMPTY_LIST_HASH),
                ("tx_list_root", BLANK_ROOT),
                ("coinbase", GENESIS_COINBASE),
                ("post_state_root", BLANK_ROOT),
                ("receipts_root", BLANK_ROOT),
                ("number", "7"),
                (
                    "sig",
                    concat!(
                        "0xabababababababababababababababababababababababababababababababab",
                        "ababababababababababababababababababababababababababababababababab",
                    ),
                ),
            ],
            expected_encoding: concat!(
                "f901000105",
                "a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
                "a01dcc4de8dec75d7aab85b567b6ccd41ad312451b948a7413f0a142fd40d49347",
                "a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
                "943535353535353535353535353535353535353535",
                "a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
                "a056e81f171bcc55a6ff8345e692c0f86e5b48e01b996cadc001622fb5e363b421",
                "07",
                "b841",
                "abababababababababababababababababababababababababababababababab",
                "ababababababababababababababababababababababababababababababababab",
            ),
            expected_hash: "5cc4df3eb1ebb0362b0b90b4563490b091934ae96e1223dc100e189d922ab379",
            expected_signing_hash:
                "c1bd49d2918aac784b316202d6d16d7e0af4a6aafdcd83800e26a42c2b12e7bc",
        },
        GoldenVector {
            name: "distinct fields with maximal number",
            fields: [
                ("shard_id", "100"),
                ("expected_period_number", "18446744073709551616"),
                (
                    "period_start_prevhash",
                    "0x1111111111111111111111111111111111111111111111111111111111111111",
                ),
                (
                    "parent_collation_hash",
                    "0x2222222222222222222222222222222222222222222222222222222222222222",
                ),
                (
                    "tx_list_root",
                    "0x3333333333333333333333333333333333333333333333333333333333333333",
                ),
                ("coinbase", "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed"),
                (
                    "post_state_root",
                    "0x4444444444444444444444444444444444444444444444444444444444444444",
                ),
                (
                    "receipts_root",
                    "0x5555555555555555555555555555555555555555555555555555555555555555",
                ),
                (
                    "number",
                    "115792089237316195423570985008687907853269984665640564039457584007913129639935",
                ),
                ("sig", "0x01"),
            ],
            expected_encoding: concat!(
                "f8e764",
                "89010000000000000000",
                "a01111111111111111111111111111111111111111111111111111111111111111",
                "a02222222222222222222222222222222222222222222222222222222222222222",
                "a03333333333333333333333333333333333333333333333333333333333333333",
                "945aaeb6053f3e94c9b9a09f33669435e7ef1beaed",
                "a04444444444444444444444444444444444444444444444444444444444444444",
                "a05555555555555555555555555555555555555555555555555555555555555555",
                "a0ffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
                "01",
            ),
            expected_hash: "f675f97ede91c8a583ae6dbc98eb9ba33c1fc2891c353df2b7f3262147a8e244",
            expected_signing_hash:
                "ff028b6a9ac4b57eb88f493513748f32f9c04c02bc96ee6423d8f459205a4349",
        },
    ]
}

/// Outcome of checking one vector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VectorResult {
    pub name: String,
    pub matches: bool,
    pub hash: String,
}

/// Verify all golden vectors against the current implementation.
pub fn verify_all_vectors() -> Vec<VectorResult> {
    all_vectors()
        .iter()
        .map(|v| match v.header() {
            Ok(header) => {
                let hash = header.hash().to_hex();
                let matches = hash == v.expected_hash
                    && header.signing_hash().to_hex() == v.expected_signing_hash
                    && hex::encode(header.encode()) == v.expected_encoding;
                VectorResult {
                    name: v.name.to_string(),
                    matches,
                    hash,
                }
            }
            Err(e) => VectorResult {
                name: v.name.to_string(),
                matches: false,
                hash: e.to_string(),
            },
        })
        .collect()
}
