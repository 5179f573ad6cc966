//! # Collation Core
//!
//! Canonical encoding and content-addressed identity for shard collations.
//!
//! This crate contains no I/O, no storage, no networking. It maps a logical
//! collation header (and a collation: header plus transactions) to exactly one
//! canonical byte sequence and exactly one hash. It does not judge whether a
//! collation is semantically valid.
//!
//! ## Key Types
//!
//! - [`CollationHeader`] - Ten-field signable commitment to one shard period
//! - [`Collation`] - A header with its ordered transaction list
//! - [`Transaction`] - Transaction record carried in a collation body
//! - [`Hash32`] - Keccak-256 digest; also used for accumulator roots
//! - [`Address`] - Canonical 20-byte address with checksummed display form
//!
//! ## Canonicalization
//!
//! Records are RLP lists in the field order declared by [`schema`]. The
//! header hash covers all ten fields; the signing hash covers the nine fields
//! before `sig`.
//!
//! ```rust
//! use collation_core::{Collation, CollationHeader};
//!
//! let header = CollationHeader::builder()
//!     .shard_id(1u64)
//!     .coinbase([0x35u8; 20])
//!     .build()
//!     .unwrap();
//!
//! let collation = Collation::new(header.clone());
//! let bytes = collation.encode();
//!
//! let decoded = Collation::decode(&bytes).unwrap();
//! assert_eq!(decoded.hash(), header.hash());
//! assert_eq!(decoded.transaction_count(), 0);
//! ```

pub mod address;
mod codec;
pub mod collation;
pub mod config;
pub mod crypto;
pub mod display;
pub mod error;
pub mod header;
pub mod schema;
pub mod transaction;

pub use address::Address;
pub use collation::Collation;
pub use config::{ShardingConfig, GENESIS_COINBASE};
pub use crypto::{
    Ed25519PublicKey, Ed25519Signature, Hash32, Keypair, TrieRoot, BLANK_ROOT, EMPTY_LIST_HASH,
};
pub use display::DisplayMap;
pub use error::{CollationError, Result};
pub use header::{CollationHeader, CollationHeaderBuilder, FieldValue};
pub use schema::{describe, FieldSpec, FieldType, HeaderField, RecordType};
pub use transaction::Transaction;

pub use primitive_types::U256;
