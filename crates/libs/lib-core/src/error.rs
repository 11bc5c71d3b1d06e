//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] shared by the session,
//! gateway and tracker modules. It follows the `thiserror` pattern.
//!
//! ## Error Categories
//!
//! 1. **Wallet Errors** - the injected provider or the user's session
//!    - [`ProviderNotFound`](AppError::ProviderNotFound)
//!    - [`NotConnected`](AppError::NotConnected)
//!    - [`UserRejected`](AppError::UserRejected)
//!
//! 2. **Call Errors** - remote contract calls through the provider
//!    - [`Provider`](AppError::Provider) for any other provider RPC error
//!    - [`Reverted`](AppError::Reverted) when a mined transaction failed
//!    - [`Encoding`](AppError::Encoding) / [`Decoding`](AppError::Decoding)
//!
//! 3. **Local Errors**
//!    - [`InvalidInput`](AppError::InvalidInput) for form values
//!    - [`Busy`](AppError::Busy) when the same call is already in flight
//!    - [`Config`](AppError::Config) for bundled configuration
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_account(account: Option<&str>) -> Result<&str> {
//!     account.ok_or(AppError::NotConnected)
//! }
//!
//! assert!(require_account(None).is_err());
//! ```

use shared::dto::rpc::ProviderRpcError;
use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// User-facing message when no injected wallet exists.
pub const MSG_INSTALL_WALLET: &str = "Please install MetaMask!";
/// User-facing message when the wallet reports no accounts or the user declines access.
pub const MSG_CONNECT_WALLET: &str = "Please connect to MetaMask.";
/// User-facing message when a call is attempted without an account.
pub const MSG_NO_ACCOUNT: &str = "No account connected. Please connect your wallet.";

#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// No injected EIP-1193 provider on the page.
    #[error("wallet provider not found")]
    ProviderNotFound,

    /// An operation needs an account and the session has none.
    #[error("no account connected")]
    NotConnected,

    /// The user declined the request in the wallet (code 4001).
    #[error("user rejected the request: {0}")]
    UserRejected(String),

    /// Any other error thrown by the provider.
    #[error("provider error {code}: {message}")]
    Provider { code: i64, message: String },

    /// The transaction was mined but its receipt reports failure.
    #[error("transaction {0} reverted")]
    Reverted(String),

    /// Request payload could not be encoded.
    #[error("Encoding error: {0}")]
    Encoding(String),

    /// Provider response could not be decoded.
    #[error("Decoding error: {0}")]
    Decoding(String),

    /// Invalid user input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The named operation is already in flight.
    #[error("{0} already in progress")]
    Busy(&'static str),

    /// Bundled configuration is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Get a user-friendly error message.
    ///
    /// Call failures collapse to `fallback`; wallet errors keep their own wording.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            AppError::ProviderNotFound => MSG_INSTALL_WALLET.to_string(),
            AppError::NotConnected => MSG_NO_ACCOUNT.to_string(),
            AppError::UserRejected(_) => MSG_CONNECT_WALLET.to_string(),
            AppError::InvalidInput(msg) => msg.clone(),
            AppError::Provider { .. }
            | AppError::Reverted(_)
            | AppError::Encoding(_)
            | AppError::Decoding(_)
            | AppError::Busy(_)
            | AppError::Config(_) => fallback.to_string(),
        }
    }
}

/// Convert a provider RPC error, singling out user rejection.
impl From<ProviderRpcError> for AppError {
    fn from(err: ProviderRpcError) -> Self {
        if err.is_user_rejection() {
            AppError::UserRejected(err.message)
        } else {
            AppError::Provider {
                code: err.code,
                message: err.message,
            }
        }
    }
}

/// Convert `serde_json::Error` to `AppError`.
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Decoding(format!("JSON error: {}", err))
    }
}

impl From<hex::FromHexError> for AppError {
    fn from(err: hex::FromHexError) -> Self {
        AppError::Decoding(format!("hex error: {}", err))
    }
}

impl From<alloy_sol_types::Error> for AppError {
    fn from(err: alloy_sol_types::Error) -> Self {
        AppError::Decoding(format!("ABI error: {}", err))
    }
}
