//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use rand::Rng;

use collation_core::{
    Address, Collation, CollationHeader, Ed25519PublicKey, Hash32, Keypair, Transaction, U256,
};

/// A test fixture with a producer keypair and a shard to produce for.
pub struct TestFixture {
    pub keypair: Keypair,
    pub shard_id: u64,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::generate(),
            shard_id: 0,
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_seed(&seed),
            shard_id: 0,
        }
    }

    pub fn public_key(&self) -> Ed25519PublicKey {
        self.keypair.public_key()
    }

    /// Create a header for `period` on this fixture's shard and sign it.
    pub fn signed_header(&self, period: u64, number: u64) -> CollationHeader {
        let mut header = CollationHeader::builder()
            .shard_id(self.shard_id)
            .expected_period_number(period)
            .number(number)
            .build()
            .expect("default header fields are valid");
        header.sign(&self.keypair);
        header
    }

    /// Create a signed header whose parent is `parent`.
    pub fn child_header(&self, parent: &CollationHeader, period: u64) -> CollationHeader {
        let mut header = CollationHeader::builder()
            .shard_id(self.shard_id)
            .expected_period_number(period)
            .parent_collation_hash(parent.hash())
            .number(parent.number() + U256::one())
            .build()
            .expect("parent hash has the right width");
        header.sign(&self.keypair);
        header
    }

    /// Create a signed collation carrying `tx_count` random transfers.
    pub fn make_collation(&self, period: u64, tx_count: usize) -> Collation {
        let transactions = (0..tx_count)
            .map(|nonce| random_transfer(nonce as u64))
            .collect();
        Collation::with_transactions(self.signed_header(period, period), transactions)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-producer tests, one per shard.
pub fn multi_shard_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture {
                shard_id: i as u64,
                ..TestFixture::with_seed(seed)
            }
        })
        .collect()
}

/// A plain value transfer to a random recipient.
pub fn random_transfer(nonce: u64) -> Transaction {
    let mut rng = rand::thread_rng();
    Transaction {
        nonce: U256::from(nonce),
        gas_price: U256::from(rng.gen_range(1u64..=100)),
        gas: U256::from(21_000u64),
        to: Some(Address::from_bytes(rng.gen())),
        value: U256::from(rng.gen::<u64>()),
        ..Default::default()
    }
}

/// A random 32-byte hash, useful as a root or parent pointer.
pub fn random_hash() -> Hash32 {
    Hash32::from_bytes(rand::thread_rng().gen())
}

/// Install a test subscriber honoring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
