//! Injected Ethereum Provider via wasm-bindgen
//!
//! JavaScript interop for `window.ethereum` (MetaMask and other EIP-1193
//! wallets): detection, requests, and event listeners with explicit removal.

use async_trait::async_trait;
use lib_core::provider::{Eip1193, EVENT_ACCOUNTS_CHANGED, EVENT_CHAIN_CHANGED};
use serde::Serialize;
use serde_json::Value;
use shared::dto::rpc::{ProviderRpcError, RequestArguments};
use wasm_bindgen::prelude::*;

// ============================================================================
// PROVIDER DETECTION AND REQUESTS (JavaScript Interop)
// ============================================================================

#[wasm_bindgen(inline_js = "
export function detectEthereumProvider(timeoutMs) {
    return new Promise((resolve) => {
        if (window.ethereum) {
            resolve(window.ethereum);
            return;
        }

        // Wallets that inject late announce themselves with this event
        let handled = false;
        const handle = () => {
            if (handled) {
                return;
            }
            handled = true;
            window.removeEventListener('ethereum#initialized', handle);
            resolve(window.ethereum || null);
        };

        window.addEventListener('ethereum#initialized', handle, { once: true });
        setTimeout(handle, timeoutMs);
    });
}

export async function providerRequest(provider, args) {
    return await provider.request(args);
}

export function providerOn(provider, event, listener) {
    provider.on(event, listener);
}

export function providerRemoveListener(provider, event, listener) {
    if (typeof provider.removeListener === 'function') {
        provider.removeListener(event, listener);
    }
}
")]
extern "C" {
    /// Resolve `window.ethereum`, waiting up to `timeout_ms` for late injection
    #[wasm_bindgen(js_name = detectEthereumProvider)]
    async fn detect_ethereum_provider(timeout_ms: u32) -> JsValue;

    /// `provider.request(args)`
    #[wasm_bindgen(js_name = providerRequest, catch)]
    async fn provider_request(provider: &JsValue, args: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = providerOn)]
    fn provider_on(provider: &JsValue, event: &str, listener: &Closure<dyn FnMut(JsValue)>);

    #[wasm_bindgen(js_name = providerRemoveListener)]
    fn provider_remove_listener(provider: &JsValue, event: &str, listener: &Closure<dyn FnMut(JsValue)>);
}

/// Convert a thrown JS value into a provider error.
fn provider_error(err: JsValue) -> ProviderRpcError {
    if let Ok(parsed) = serde_wasm_bindgen::from_value::<ProviderRpcError>(err.clone()) {
        if !parsed.message.is_empty() {
            return parsed;
        }
    }
    match err.as_string() {
        Some(message) => ProviderRpcError::internal(message),
        None => ProviderRpcError::internal(format!("Provider error: {:?}", err)),
    }
}

// ============================================================================
// PROVIDER HANDLE
// ============================================================================

/// Handle to the injected provider object
#[derive(Clone, Debug)]
pub struct EthereumProvider {
    inner: JsValue,
}

impl EthereumProvider {
    fn field(&self, name: &str) -> Option<String> {
        js_sys::Reflect::get(&self.inner, &JsValue::from_str(name))
            .ok()
            .and_then(|value| value.as_string())
    }
}

/// Detect the injected provider, or `None` once `timeout_ms` passes without one.
pub async fn detect_provider(timeout_ms: u32) -> Option<EthereumProvider> {
    let provider = detect_ethereum_provider(timeout_ms).await;
    if provider.is_null() || provider.is_undefined() {
        log::warn!("No Ethereum provider detected after {}ms", timeout_ms);
        None
    } else {
        log::info!("Ethereum provider detected");
        Some(EthereumProvider { inner: provider })
    }
}

#[async_trait(?Send)]
impl Eip1193 for EthereumProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError> {
        let args = RequestArguments {
            method: method.to_string(),
            params,
        };
        let args = args
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| ProviderRpcError::internal(format!("Failed to encode {method} request: {e}")))?;

        log::debug!("provider.request {}", method);
        let result = provider_request(&self.inner, args).await.map_err(provider_error)?;

        serde_wasm_bindgen::from_value(result)
            .map_err(|e| ProviderRpcError::internal(format!("Failed to decode {method} response: {e}")))
    }

    fn selected_address(&self) -> Option<String> {
        self.field("selectedAddress")
    }

    fn network_version(&self) -> Option<String> {
        self.field("networkVersion")
    }

    async fn sleep(&self, millis: u32) {
        gloo_timers::future::TimeoutFuture::new(millis).await;
    }
}

// ============================================================================
// EVENT SUBSCRIPTION
// ============================================================================

/// `accountsChanged` / `chainChanged` listeners registered on a provider.
///
/// Dropping the subscription removes both listeners.
pub struct ProviderSubscription {
    provider: JsValue,
    on_accounts: Closure<dyn FnMut(JsValue)>,
    on_chain: Closure<dyn FnMut(JsValue)>,
}

impl ProviderSubscription {
    pub fn attach(
        provider: &EthereumProvider,
        mut accounts_changed: impl FnMut(Vec<String>) + 'static,
        mut chain_changed: impl FnMut(Option<String>) + 'static,
    ) -> Self {
        let on_accounts: Closure<dyn FnMut(JsValue)> = Closure::new(move |value: JsValue| {
            match serde_wasm_bindgen::from_value::<Vec<String>>(value) {
                Ok(accounts) => accounts_changed(accounts),
                Err(e) => log::warn!("Ignoring malformed accountsChanged payload: {}", e),
            }
        });
        let on_chain: Closure<dyn FnMut(JsValue)> = Closure::new(move |value: JsValue| chain_changed(value.as_string()));

        provider_on(&provider.inner, EVENT_ACCOUNTS_CHANGED, &on_accounts);
        provider_on(&provider.inner, EVENT_CHAIN_CHANGED, &on_chain);
        log::debug!("Subscribed to provider events");

        Self {
            provider: provider.inner.clone(),
            on_accounts,
            on_chain,
        }
    }
}

impl Drop for ProviderSubscription {
    fn drop(&mut self) {
        provider_remove_listener(&self.provider, EVENT_ACCOUNTS_CHANGED, &self.on_accounts);
        provider_remove_listener(&self.provider, EVENT_CHAIN_CHANGED, &self.on_chain);
        log::debug!("Unsubscribed from provider events");
    }
}
