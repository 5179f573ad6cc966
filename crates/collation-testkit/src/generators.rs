//! Proptest generators for property-based testing.

use proptest::prelude::*;

use collation_core::{
    Address, Collation, CollationHeader, Hash32, HeaderField, Keypair, Transaction, U256,
};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random Hash32.
pub fn hash32() -> impl Strategy<Value = Hash32> {
    any::<[u8; 32]>().prop_map(Hash32::from_bytes)
}

/// Generate a random Address.
pub fn address() -> impl Strategy<Value = Address> {
    any::<[u8; 20]>().prop_map(Address::from_bytes)
}

/// Generate a U256 across the full width, including small values.
pub fn u256() -> impl Strategy<Value = U256> {
    prop_oneof![
        any::<u64>().prop_map(U256::from),
        any::<[u8; 32]>().prop_map(|b| U256::from_big_endian(&b)),
    ]
}

/// Generate opaque bytes of specified max length.
pub fn bytes(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a transaction, including contract creations.
pub fn transaction() -> impl Strategy<Value = Transaction> {
    (
        (u256(), u256(), u256()),
        proptest::option::of(address()),
        u256(),
        bytes(256),
        (u256(), u256(), u256()),
    )
        .prop_map(|((nonce, gas_price, gas), to, value, data, (v, r, s))| Transaction {
            nonce,
            gas_price,
            gas,
            to,
            value,
            data,
            v,
            r,
            s,
        })
}

/// Parameters for generating a header.
#[derive(Debug, Clone)]
pub struct HeaderParams {
    pub shard_id: U256,
    pub expected_period_number: U256,
    pub period_start_prevhash: Hash32,
    pub parent_collation_hash: Hash32,
    pub tx_list_root: Hash32,
    pub coinbase: Address,
    pub post_state_root: Hash32,
    pub receipts_root: Hash32,
    pub number: U256,
    pub sig: Vec<u8>,
}

impl Arbitrary for HeaderParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            (u256(), u256()),
            (hash32(), hash32(), hash32()),
            address(),
            (hash32(), hash32()),
            u256(),
            bytes(96),
        )
            .prop_map(
                |(
                    (shard_id, expected_period_number),
                    (period_start_prevhash, parent_collation_hash, tx_list_root),
                    coinbase,
                    (post_state_root, receipts_root),
                    number,
                    sig,
                )| HeaderParams {
                    shard_id,
                    expected_period_number,
                    period_start_prevhash,
                    parent_collation_hash,
                    tx_list_root,
                    coinbase,
                    post_state_root,
                    receipts_root,
                    number,
                    sig,
                },
            )
            .boxed()
    }
}

/// Build a header from parameters.
pub fn header_from_params(params: &HeaderParams) -> CollationHeader {
    CollationHeader::builder()
        .shard_id(params.shard_id)
        .expected_period_number(params.expected_period_number)
        .period_start_prevhash(params.period_start_prevhash)
        .parent_collation_hash(params.parent_collation_hash)
        .tx_list_root(params.tx_list_root)
        .coinbase(params.coinbase)
        .post_state_root(params.post_state_root)
        .receipts_root(params.receipts_root)
        .number(params.number)
        .sig(params.sig.clone())
        .build()
        .expect("generated fields have canonical widths")
}

/// Generate a collation with up to `max_txs` transactions.
pub fn collation(max_txs: usize) -> impl Strategy<Value = Collation> {
    (
        any::<HeaderParams>(),
        prop::collection::vec(transaction(), 0..=max_txs),
    )
        .prop_map(|(params, txs)| Collation::with_transactions(header_from_params(&params), txs))
}
