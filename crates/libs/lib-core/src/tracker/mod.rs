//! # Reward Tracker View State
//!
//! [`TrackerState`] is everything the page renders: the wallet session, the
//! last fetched reward balance, per-operation [`CallState`]s, the pending
//! write form, the inline error and the toast queue.
//!
//! State transitions are synchronous methods; [`flows`] drives them around
//! the asynchronous provider calls. The state owner is abstracted behind
//! [`TrackerStore`] so the same flows run against a reactive signal in the
//! browser and a `RefCell` in tests.
//!
//! ## Re-entry
//!
//! Each operation has its own [`CallState`]. `begin_read` / `begin_write`
//! refuse to start while the same operation is in flight, so a double click
//! never issues a second remote call. Reads carry a [`ReadTicket`]; a result
//! that arrives after the account changed is dropped.

pub mod flows;

#[cfg(test)]
mod tests;

use std::cell::RefCell;

use alloy_primitives::{Address, U256};
use shared::dto::rpc::TransactionReceipt;
use shared::utils::truncate_address;

use crate::error::{AppError, Result, MSG_CONNECT_WALLET, MSG_INSTALL_WALLET, MSG_NO_ACCOUNT};
use crate::gateway::{parse_address, RewardPoints};
use crate::session::{AccountsOutcome, WalletSession};

pub const MSG_FETCH_FAILED: &str = "Failed to fetch data from contract";
pub const MSG_WRITE_FAILED: &str = "Failed to add reward points";
pub const MSG_WRITE_SUCCEEDED: &str = "Reward points added successfully";

/// Connect button label while no account is connected.
pub const CONNECT_LABEL: &str = "Connect Wallet";

/// Amount field value after a reset.
pub const DEFAULT_AMOUNT: &str = "0";

/// Lifecycle of one remote operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CallState {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

impl CallState {
    pub fn is_in_flight(&self) -> bool {
        matches!(self, CallState::InFlight)
    }
}

/// Raw form input for an add-points transaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingWrite {
    pub target: String,
    pub amount: String,
}

impl Default for PendingWrite {
    fn default() -> Self {
        Self {
            target: String::new(),
            amount: DEFAULT_AMOUNT.to_string(),
        }
    }
}

impl PendingWrite {
    /// Parse the form into a target address and a positive amount.
    pub fn validate(&self) -> Result<WriteRequest> {
        if self.target.trim().is_empty() {
            return Err(AppError::InvalidInput("Enter an address to reward".to_string()));
        }
        let target = parse_address(&self.target)?;

        let amount = self.amount.trim();
        if amount.is_empty() {
            return Err(AppError::InvalidInput("Enter a number of points".to_string()));
        }
        let points = U256::from_str_radix(amount, 10)
            .map_err(|e| AppError::InvalidInput(format!("invalid amount {amount:?}: {e}")))?;
        if points.is_zero() {
            return Err(AppError::InvalidInput("Points must be greater than zero".to_string()));
        }

        Ok(WriteRequest { target, points })
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Validated add-points request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WriteRequest {
    pub target: Address,
    pub points: U256,
}

/// Handle for an in-flight read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReadTicket {
    pub account: String,
    sequence: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Transient toast message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub kind: NoticeKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrackerState {
    session: WalletSession,
    rewards: Option<String>,
    read: CallState,
    write: CallState,
    form: PendingWrite,
    error: Option<String>,
    notices: Vec<Notice>,
    next_notice_id: u64,
    read_sequence: u64,
}

impl TrackerState {
    pub fn session(&self) -> &WalletSession {
        &self.session
    }

    pub fn account(&self) -> Option<&str> {
        self.session.account()
    }

    pub fn is_connected(&self) -> bool {
        self.session.is_connected()
    }

    /// Last fetched balance as a decimal string.
    pub fn rewards(&self) -> Option<&str> {
        self.rewards.as_deref()
    }

    pub fn read_state(&self) -> CallState {
        self.read
    }

    pub fn write_state(&self) -> CallState {
        self.write
    }

    pub fn form(&self) -> &PendingWrite {
        &self.form
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn connect_label(&self) -> String {
        self.account()
            .map(truncate_address)
            .unwrap_or_else(|| CONNECT_LABEL.to_string())
    }

    pub fn can_read(&self) -> bool {
        self.is_connected() && !self.read.is_in_flight()
    }

    pub fn can_write(&self) -> bool {
        self.is_connected() && !self.write.is_in_flight() && self.form.is_submittable()
    }

    // ------------------------------------------------------------------
    // Session transitions
    // ------------------------------------------------------------------

    pub fn provider_missing(&mut self) {
        tracing::warn!("no injected wallet provider");
        self.report_error(MSG_INSTALL_WALLET);
    }

    pub fn accounts_changed(&mut self, accounts: &[String]) {
        let previous = self.session.account().map(str::to_string);
        match self.session.apply_accounts(accounts) {
            AccountsOutcome::Disconnected => {
                tracing::info!("wallet reported no accounts");
                self.rewards = None;
                self.invalidate_read();
                self.report_error(MSG_CONNECT_WALLET);
            }
            AccountsOutcome::Connected(account) => {
                tracing::info!(%account, "wallet account active");
                if previous.as_deref() != Some(account.as_str()) {
                    self.rewards = None;
                    self.invalidate_read();
                }
                self.error = None;
            }
        }
    }

    pub fn chain_changed(&mut self, chain_id: Option<String>) {
        tracing::info!(chain = ?chain_id, "wallet chain changed");
        self.session.set_chain(chain_id);
    }

    pub fn connect_failed(&mut self, err: &AppError) {
        tracing::warn!(error = %err, "wallet connection failed");
        let message = match err {
            AppError::UserRejected(_) => MSG_CONNECT_WALLET.to_string(),
            AppError::ProviderNotFound => MSG_INSTALL_WALLET.to_string(),
            AppError::Provider { message, .. } => message.clone(),
            other => other.to_string(),
        };
        self.report_error(message);
    }

    // ------------------------------------------------------------------
    // Read
    // ------------------------------------------------------------------

    pub fn begin_read(&mut self) -> Result<ReadTicket> {
        if self.read.is_in_flight() {
            return Err(AppError::Busy("reward lookup"));
        }
        let Some(account) = self.session.account().map(str::to_string) else {
            self.report_error(MSG_NO_ACCOUNT);
            return Err(AppError::NotConnected);
        };

        self.read = CallState::InFlight;
        self.read_sequence += 1;
        Ok(ReadTicket {
            account,
            sequence: self.read_sequence,
        })
    }

    /// Apply a read result. Returns `false` if the ticket went stale.
    pub fn finish_read(&mut self, ticket: &ReadTicket, result: Result<RewardPoints>) -> bool {
        if ticket.sequence != self.read_sequence || self.account() != Some(ticket.account.as_str()) {
            tracing::debug!(account = %ticket.account, "discarding stale reward lookup");
            return false;
        }

        match result {
            Ok(points) => {
                self.rewards = Some(points.to_string());
                self.read = CallState::Succeeded;
            }
            Err(err) => {
                tracing::error!(error = %err, "reward lookup failed");
                self.read = CallState::Failed;
                self.report_error(MSG_FETCH_FAILED);
            }
        }
        true
    }

    /// Start the refresh that follows a confirmed write.
    ///
    /// Unlike [`begin_read`](Self::begin_read) this never reports `Busy`: a
    /// lookup already in flight is superseded and its result discarded.
    pub fn begin_refresh(&mut self) -> Option<ReadTicket> {
        let account = self.session.account().map(str::to_string)?;
        if self.read.is_in_flight() {
            tracing::debug!(%account, "superseding in-flight reward lookup");
        }
        self.read = CallState::InFlight;
        self.read_sequence += 1;
        Some(ReadTicket {
            account,
            sequence: self.read_sequence,
        })
    }

    fn invalidate_read(&mut self) {
        self.read_sequence += 1;
        self.read = CallState::Idle;
    }

    // ------------------------------------------------------------------
    // Write
    // ------------------------------------------------------------------

    pub fn set_target(&mut self, target: String) {
        self.form.target = target;
    }

    pub fn set_amount(&mut self, amount: String) {
        self.form.amount = amount;
    }

    pub fn begin_write(&mut self) -> Result<WriteRequest> {
        if self.write.is_in_flight() {
            return Err(AppError::Busy("add reward points"));
        }
        if !self.is_connected() {
            self.report_error(MSG_NO_ACCOUNT);
            return Err(AppError::NotConnected);
        }
        let request = self.form.validate().inspect_err(|err| {
            self.error = Some(err.user_message(MSG_WRITE_FAILED));
        })?;

        self.write = CallState::InFlight;
        Ok(request)
    }

    /// Confirmed write: clear the form and announce success.
    pub fn write_confirmed(&mut self, receipt: &TransactionReceipt) {
        tracing::info!(tx = %receipt.transaction_hash, "reward points added");
        self.write = CallState::Succeeded;
        self.form.reset();
        self.error = None;
        self.push_notice(NoticeKind::Success, MSG_WRITE_SUCCEEDED);
    }

    /// Failed write: the form keeps its values for a manual retry.
    pub fn write_failed(&mut self, err: &AppError) {
        tracing::error!(error = %err, "add reward points failed");
        self.write = CallState::Failed;
        let message = match err {
            AppError::UserRejected(_) => MSG_CONNECT_WALLET,
            AppError::NotConnected => MSG_NO_ACCOUNT,
            _ => MSG_WRITE_FAILED,
        };
        self.report_error(message);
    }

    // ------------------------------------------------------------------
    // Notices
    // ------------------------------------------------------------------

    pub fn report_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.error = Some(message.clone());
        self.push_notice(NoticeKind::Error, message);
    }

    pub fn push_notice(&mut self, kind: NoticeKind, message: impl Into<String>) -> u64 {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notices.push(Notice {
            id,
            kind,
            message: message.into(),
        });
        id
    }

    pub fn dismiss_notice(&mut self, id: u64) {
        self.notices.retain(|n| n.id != id);
    }
}

/// Owner of a [`TrackerState`].
pub trait TrackerStore {
    fn update_state<R>(&self, f: impl FnOnce(&mut TrackerState) -> R) -> R;

    fn with_state<R>(&self, f: impl FnOnce(&TrackerState) -> R) -> R;
}

impl TrackerStore for RefCell<TrackerState> {
    fn update_state<R>(&self, f: impl FnOnce(&mut TrackerState) -> R) -> R {
        f(&mut self.borrow_mut())
    }

    fn with_state<R>(&self, f: impl FnOnce(&TrackerState) -> R) -> R {
        f(&self.borrow())
    }
}
