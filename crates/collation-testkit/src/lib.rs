//! # Collation Testkit
//!
//! Testing utilities for collation encoding and hashing.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known headers with expected encodings and hashes
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up producer scenarios
//!
//! ## Golden Vectors
//!
//! ```rust
//! use collation_testkit::vectors::verify_all_vectors;
//!
//! for result in verify_all_vectors() {
//!     assert!(result.matches, "{}: {}", result.name, result.hash);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use collation_testkit::generators::{header_from_params, HeaderParams};
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: HeaderParams) {
//!         let h1 = header_from_params(&params);
//!         let h2 = header_from_params(&params);
//!         prop_assert_eq!(h1.hash(), h2.hash());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use collation_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let collation = fixture.make_collation(1, 2);
//! assert_eq!(collation.transaction_count(), 2);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{init_tracing, multi_shard_fixtures, TestFixture};
pub use generators::{header_from_params, HeaderParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector, VectorResult};
