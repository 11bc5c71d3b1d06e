use serde::{Deserialize, Serialize};
use std::fmt;

/// Provider error code for a request the user declined in the wallet UI.
pub const USER_REJECTED_REQUEST: i64 = 4001;

/// Provider error code for a method the account has not authorized.
pub const UNAUTHORIZED: i64 = 4100;

/// Internal JSON-RPC error, used when the provider throws something without a code.
pub const INTERNAL_ERROR: i64 = -32603;

/// Arguments to `provider.request(...)`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestArguments {
    pub method: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub params: serde_json::Value,
}

/// Read-only call payload (first param of `eth_call`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CallRequest {
    pub to: String,
    pub data: String,
}

/// State-changing call payload (first param of `eth_sendTransaction`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: String,
    pub to: String,
    pub data: String,
}

/// Subset of the receipt returned by `eth_getTransactionReceipt`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<String>,
    /// `0x1` on success, `0x0` when the call reverted. Pre-Byzantium receipts omit it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        !matches!(self.status.as_deref(), Some("0x0") | Some("0x00"))
    }
}

/// Error object thrown by an EIP-1193 provider
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProviderRpcError {
    #[serde(default = "internal_error_code")]
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

fn internal_error_code() -> i64 {
    INTERNAL_ERROR
}

impl ProviderRpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }

    /// Wrap a non-structured failure (a thrown string, a serialization error).
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(INTERNAL_ERROR, message)
    }

    pub fn is_user_rejection(&self) -> bool {
        self.code == USER_REJECTED_REQUEST
    }
}

impl fmt::Display for ProviderRpcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)
    }
}

impl std::error::Error for ProviderRpcError {}
