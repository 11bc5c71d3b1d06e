//! # Wallet Provider Seam
//!
//! [`Eip1193`] is the boundary between the core and whatever injected the
//! wallet into the page. The browser front end implements it over
//! `window.ethereum`; tests implement it with a scripted mock.

use async_trait::async_trait;
use serde_json::Value;
use shared::dto::rpc::ProviderRpcError;

/// Event emitted when the wallet's exposed account list changes.
pub const EVENT_ACCOUNTS_CHANGED: &str = "accountsChanged";
/// Event emitted when the wallet switches chain.
pub const EVENT_CHAIN_CHANGED: &str = "chainChanged";

/// Minimal EIP-1193 provider surface.
///
/// Browser handles are not `Send`, so neither are the futures.
#[async_trait(?Send)]
pub trait Eip1193 {
    /// `provider.request({ method, params })`
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError>;

    /// The `selectedAddress` field, if the wallet already exposes an account.
    fn selected_address(&self) -> Option<String>;

    /// The `networkVersion` field.
    fn network_version(&self) -> Option<String>;

    /// Suspend for `millis` on the provider's event loop.
    async fn sleep(&self, millis: u32);
}
