//! Sharding configuration consumed by header construction.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::error::Result;

/// Coinbase used when a header is built without one.
pub const GENESIS_COINBASE: Address = Address([0x35; 20]);

/// Configuration values that feed header defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShardingConfig {
    /// Default beneficiary of collations built without an explicit coinbase.
    #[serde(alias = "GENESIS_COINBASE")]
    pub genesis_coinbase: Address,
}

impl Default for ShardingConfig {
    fn default() -> Self {
        Self {
            genesis_coinbase: GENESIS_COINBASE,
        }
    }
}

impl ShardingConfig {
    /// Load from a JSON document. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(genesis_coinbase = %config.genesis_coinbase, "loaded sharding config");
        Ok(config)
    }
}
