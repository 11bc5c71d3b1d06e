//! # Application Configuration
//!
//! Configuration is bundled into the wasm binary at build time. The only
//! override is `REWARD_CONTRACT_ADDRESS`, read with `option_env!` when the
//! front end is compiled. Everything is validated once at startup so a bad
//! address fails before any wallet interaction.
//!
//! ```rust
//! use lib_core::config::Config;
//!
//! let config = Config::bundled().unwrap();
//! assert!(config.receipt_poll_interval_ms > 0);
//! ```

use std::str::FromStr;

use alloy_primitives::Address;

use crate::error::{AppError, Result};

/// Reward contract deployment used when no build-time override is given.
pub const DEFAULT_CONTRACT_ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

/// Delay between `eth_getTransactionReceipt` polls.
pub const DEFAULT_RECEIPT_POLL_INTERVAL_MS: u32 = 1_500;

/// How long to wait for `ethereum#initialized` before reporting no provider.
pub const DEFAULT_DETECT_TIMEOUT_MS: u32 = 3_000;

/// Front end configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Reward contract address
    pub contract_address: Address,

    /// Receipt polling interval while waiting for a write to confirm
    ///
    /// There is no overall timeout: a transaction that never lands keeps
    /// the write in flight.
    pub receipt_poll_interval_ms: u32,

    /// Provider detection timeout
    pub detect_timeout_ms: u32,
}

impl Config {
    /// Build configuration from raw values.
    pub fn new(contract_address: &str, receipt_poll_interval_ms: u32, detect_timeout_ms: u32) -> Result<Self> {
        let contract_address = Address::from_str(contract_address.trim())
            .map_err(|e| AppError::Config(format!("contract address {contract_address:?}: {e}")))?;

        let config = Self {
            contract_address,
            receipt_poll_interval_ms,
            detect_timeout_ms,
        };
        config.validate()?;
        Ok(config)
    }

    /// Load the configuration compiled into this build.
    pub fn bundled() -> Result<Self> {
        let address = option_env!("REWARD_CONTRACT_ADDRESS").unwrap_or(DEFAULT_CONTRACT_ADDRESS);
        Self::new(address, DEFAULT_RECEIPT_POLL_INTERVAL_MS, DEFAULT_DETECT_TIMEOUT_MS)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.contract_address == Address::ZERO {
            return Err(AppError::Config("contract address must not be the zero address".to_string()));
        }

        if self.receipt_poll_interval_ms == 0 {
            return Err(AppError::Config("receipt poll interval must be positive".to_string()));
        }

        Ok(())
    }
}
