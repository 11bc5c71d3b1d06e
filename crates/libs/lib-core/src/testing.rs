//! Scripted provider for tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use serde_json::{json, Value};
use shared::dto::rpc::ProviderRpcError;

use crate::config::{Config, DEFAULT_CONTRACT_ADDRESS};
use crate::provider::Eip1193;

pub const ACCOUNT: &str = "0x71C7656EC7ab88b098defB751B7401B5f6d8976F";
pub const OTHER_ACCOUNT: &str = "0xFABB0ac9d68B0B445fB7357272Ff202C5651694a";

pub fn test_config() -> Config {
    Config::new(DEFAULT_CONTRACT_ADDRESS, 10, 100).unwrap()
}

/// ABI-encoded `uint256` as an `eth_call` result.
pub fn encode_uint(value: u64) -> Value {
    json!(format!("0x{:064x}", value))
}

type Scripted = Result<Value, ProviderRpcError>;

#[derive(Default)]
pub struct MockProvider {
    selected: Option<String>,
    network: Option<String>,
    responses: RefCell<HashMap<String, VecDeque<Scripted>>>,
    calls: RefCell<Vec<(String, Value)>>,
    sleeps: RefCell<Vec<u32>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_selected_address(mut self, address: &str) -> Self {
        self.selected = Some(address.to_string());
        self
    }

    pub fn with_network_version(mut self, version: &str) -> Self {
        self.network = Some(version.to_string());
        self
    }

    /// Queue a successful response for the next call to `method`.
    pub fn respond(&self, method: &str, value: Value) {
        self.push(method, Ok(value));
    }

    /// Queue a provider error for the next call to `method`.
    pub fn fail(&self, method: &str, code: i64, message: &str) {
        self.push(method, Err(ProviderRpcError::new(code, message)));
    }

    fn push(&self, method: &str, response: Scripted) {
        self.responses
            .borrow_mut()
            .entry(method.to_string())
            .or_default()
            .push_back(response);
    }

    pub fn calls_to(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|(m, _)| m == method).count()
    }

    pub fn params_of(&self, method: &str) -> Vec<Value> {
        self.calls
            .borrow()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn sleeps(&self) -> Vec<u32> {
        self.sleeps.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Eip1193 for MockProvider {
    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderRpcError> {
        self.calls.borrow_mut().push((method.to_string(), params));
        self.responses
            .borrow_mut()
            .get_mut(method)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Err(ProviderRpcError::internal(format!("no scripted response for {method}"))))
    }

    fn selected_address(&self) -> Option<String> {
        self.selected.clone()
    }

    fn network_version(&self) -> Option<String> {
        self.network.clone()
    }

    async fn sleep(&self, millis: u32) {
        self.sleeps.borrow_mut().push(millis);
    }
}
