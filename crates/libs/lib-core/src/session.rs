//! # Wallet Session
//!
//! Tracks the single active wallet session: the account the wallet exposes
//! and the chain it is on. The session only changes in response to provider
//! notifications or an explicit connect; it never talks to the provider itself.

use shared::utils::strip_hex_prefix;

/// Result of applying an `accountsChanged` list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountsOutcome {
    Connected(String),
    Disconnected,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WalletSession {
    account: Option<String>,
    chain_id: Option<String>,
}

impl WalletSession {
    pub fn account(&self) -> Option<&str> {
        self.account.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        self.account.is_some()
    }

    pub fn chain_id(&self) -> Option<&str> {
        self.chain_id.as_deref()
    }

    /// Adopt the first account, or end the session when the list is empty
    /// or its first entry is blank.
    pub fn apply_accounts(&mut self, accounts: &[String]) -> AccountsOutcome {
        match accounts.first().filter(|a| !a.trim().is_empty()) {
            Some(first) => {
                self.account = Some(first.clone());
                AccountsOutcome::Connected(first.clone())
            }
            None => {
                self.account = None;
                AccountsOutcome::Disconnected
            }
        }
    }

    /// Record the chain id. Used for display only.
    pub fn set_chain(&mut self, chain_id: Option<String>) {
        self.chain_id = chain_id;
    }

    pub fn network_label(&self) -> Option<String> {
        self.chain_id.as_deref().map(network_label)
    }
}

/// Parse a chain id given either as `0x`-hex (`chainChanged`) or decimal (`networkVersion`).
pub fn parse_chain_id(raw: &str) -> Option<u64> {
    let raw = raw.trim();
    if raw.starts_with("0x") || raw.starts_with("0X") {
        u64::from_str_radix(strip_hex_prefix(raw), 16).ok()
    } else {
        raw.parse().ok()
    }
}

/// Human-readable network name.
pub fn network_label(raw: &str) -> String {
    match parse_chain_id(raw) {
        Some(1) => "Ethereum Mainnet".to_string(),
        Some(11_155_111) => "Sepolia".to_string(),
        Some(17_000) => "Holesky".to_string(),
        Some(137) => "Polygon".to_string(),
        Some(31_337) => "Localhost".to_string(),
        Some(id) => format!("Chain {id}"),
        None => format!("Chain {raw}"),
    }
}
