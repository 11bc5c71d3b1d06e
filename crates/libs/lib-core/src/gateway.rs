//! # Reward Contract Gateway
//!
//! Bridges UI actions to the two remote operations of the reward contract:
//! reading an address's points and adding points to an address. Calldata is
//! ABI-encoded here; the injected wallet signs and broadcasts.

use std::fmt;
use std::str::FromStr;

use alloy_primitives::{Address, U256};
use alloy_sol_types::{sol, SolCall};
use serde_json::{json, Value};
use shared::dto::rpc::{CallRequest, TransactionReceipt, TransactionRequest};
use shared::utils::strip_hex_prefix;

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::provider::Eip1193;

sol! {
    function checkRewardPoints(address user) external view returns (uint256 points);
    function addRewardPoints(address user, uint256 points) external;
}

/// A reward balance as returned by `checkRewardPoints`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardPoints(pub U256);

impl fmt::Display for RewardPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Account authorized to send transactions through the wallet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Signer {
    pub address: Address,
}

/// Parse a user- or wallet-supplied address.
pub fn parse_address(value: &str) -> Result<Address> {
    Address::from_str(value.trim())
        .map_err(|e| AppError::InvalidInput(format!("invalid address {:?}: {}", value, e)))
}

fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn hex_result(value: &Value, method: &str) -> Result<Vec<u8>> {
    let raw = value
        .as_str()
        .ok_or_else(|| AppError::Decoding(format!("{method} returned {value}, expected hex string")))?;
    Ok(hex::decode(strip_hex_prefix(raw))?)
}

/// Contract handle over a provider.
///
/// Read-only calls only need the provider; writes fetch a [`Signer`] first.
pub struct ContractGateway<'a, P: Eip1193 + ?Sized> {
    provider: &'a P,
    config: &'a Config,
}

impl<'a, P: Eip1193 + ?Sized> ContractGateway<'a, P> {
    pub fn new(provider: &'a P, config: &'a Config) -> Self {
        Self { provider, config }
    }

    /// Read the reward balance of `account`.
    pub async fn reward_points(&self, account: &str) -> Result<RewardPoints> {
        let user = parse_address(account)?;
        let data = checkRewardPointsCall { user }.abi_encode();
        let call = CallRequest {
            to: self.config.contract_address.to_string(),
            data: to_hex(&data),
        };

        tracing::debug!(%user, "eth_call checkRewardPoints");
        let params = json!([serde_json::to_value(&call)?, "latest"]);
        let result = self.provider.request("eth_call", params).await?;

        let bytes = hex_result(&result, "eth_call")?;
        let decoded = checkRewardPointsCall::abi_decode_returns(&bytes, true)?;
        Ok(RewardPoints(decoded.points))
    }

    /// Ask the wallet for an account that can sign.
    pub async fn signer(&self) -> Result<Signer> {
        let accounts = self.provider.request("eth_requestAccounts", Value::Null).await?;
        let accounts: Vec<String> = serde_json::from_value(accounts)?;
        let first = accounts.first().ok_or(AppError::NotConnected)?;
        Ok(Signer {
            address: parse_address(first)?,
        })
    }

    /// Add `points` to `target` and wait until the transaction is mined.
    pub async fn add_reward_points(&self, target: Address, points: U256) -> Result<TransactionReceipt> {
        let signer = self.signer().await?;
        let data = addRewardPointsCall { user: target, points }.abi_encode();
        let tx = TransactionRequest {
            from: signer.address.to_string(),
            to: self.config.contract_address.to_string(),
            data: to_hex(&data),
        };

        tracing::info!(from = %signer.address, %target, %points, "sending addRewardPoints");
        let hash = self
            .provider
            .request("eth_sendTransaction", json!([serde_json::to_value(&tx)?]))
            .await?;
        let hash = hash
            .as_str()
            .ok_or_else(|| AppError::Decoding(format!("eth_sendTransaction returned {hash}")))?
            .to_string();

        self.wait_for_receipt(&hash).await
    }

    /// Poll for the receipt of `hash` until it is mined.
    pub async fn wait_for_receipt(&self, hash: &str) -> Result<TransactionReceipt> {
        loop {
            let value = self
                .provider
                .request("eth_getTransactionReceipt", json!([hash]))
                .await?;

            if let Some(receipt) = serde_json::from_value::<Option<TransactionReceipt>>(value)? {
                if !receipt.succeeded() {
                    tracing::warn!(%hash, "transaction reverted");
                    return Err(AppError::Reverted(receipt.transaction_hash));
                }
                tracing::info!(%hash, block = ?receipt.block_number, "transaction confirmed");
                return Ok(receipt);
            }

            self.provider.sleep(self.config.receipt_poll_interval_ms).await;
        }
    }
}
