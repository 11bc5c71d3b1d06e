//! User- and provider-driven flows.
//!
//! Each flow takes the state owner and the provider explicitly. Store
//! borrows never span an `.await`.

use serde_json::Value;

use crate::config::Config;
use crate::error::AppError;
use crate::gateway::ContractGateway;
use crate::provider::Eip1193;
use crate::tracker::{ReadTicket, TrackerStore};

/// Seed the session from a freshly detected provider.
///
/// `None` means detection gave up: the user is told to install a wallet.
pub fn attach_provider<S, P>(store: &S, provider: Option<&P>)
where
    S: TrackerStore + ?Sized,
    P: Eip1193 + ?Sized,
{
    let Some(provider) = provider else {
        store.update_state(|s| s.provider_missing());
        return;
    };

    let accounts: Vec<String> = provider.selected_address().into_iter().collect();
    let chain_id = provider.network_version();
    store.update_state(|s| {
        s.accounts_changed(&accounts);
        s.chain_changed(chain_id);
    });
}

/// `accountsChanged` listener body.
pub fn handle_accounts_changed<S: TrackerStore + ?Sized>(store: &S, accounts: Vec<String>) {
    store.update_state(|s| s.accounts_changed(&accounts));
}

/// `chainChanged` listener body.
pub fn handle_chain_changed<S: TrackerStore + ?Sized>(store: &S, chain_id: Option<String>) {
    store.update_state(|s| s.chain_changed(chain_id));
}

/// Explicit connect: ask the wallet for account access.
pub async fn connect_wallet<S, P>(store: &S, provider: Option<&P>)
where
    S: TrackerStore + ?Sized,
    P: Eip1193 + ?Sized,
{
    let Some(provider) = provider else {
        store.update_state(|s| s.provider_missing());
        return;
    };

    let result = provider
        .request("eth_requestAccounts", Value::Null)
        .await
        .map_err(AppError::from)
        .and_then(|value| serde_json::from_value::<Vec<String>>(value).map_err(AppError::from));

    match result {
        Ok(accounts) => store.update_state(|s| s.accounts_changed(&accounts)),
        Err(err) => store.update_state(|s| s.connect_failed(&err)),
    }
}

/// Read the connected account's reward balance into the state.
pub async fn fetch_reward_points<S, P>(store: &S, provider: &P, config: &Config)
where
    S: TrackerStore + ?Sized,
    P: Eip1193 + ?Sized,
{
    let ticket = match store.update_state(|s| s.begin_read()) {
        Ok(ticket) => ticket,
        Err(err) => {
            tracing::debug!(error = %err, "reward lookup not started");
            return;
        }
    };

    read_into(store, provider, config, ticket).await;
}

async fn read_into<S, P>(store: &S, provider: &P, config: &Config, ticket: ReadTicket)
where
    S: TrackerStore + ?Sized,
    P: Eip1193 + ?Sized,
{
    let result = ContractGateway::new(provider, config)
        .reward_points(&ticket.account)
        .await;
    store.update_state(|s| s.finish_read(&ticket, result));
}

/// Submit the pending write, wait for confirmation, then refresh the balance.
///
/// The refresh supersedes any lookup the user started while the write was
/// pending.
pub async fn add_reward_points<S, P>(store: &S, provider: &P, config: &Config)
where
    S: TrackerStore + ?Sized,
    P: Eip1193 + ?Sized,
{
    let request = match store.update_state(|s| s.begin_write()) {
        Ok(request) => request,
        Err(err) => {
            tracing::debug!(error = %err, "add reward points not started");
            return;
        }
    };

    let result = ContractGateway::new(provider, config)
        .add_reward_points(request.target, request.points)
        .await;

    match result {
        Ok(receipt) => {
            let ticket = store.update_state(|s| {
                s.write_confirmed(&receipt);
                s.begin_refresh()
            });
            match ticket {
                Some(ticket) => read_into(store, provider, config, ticket).await,
                None => tracing::debug!("account gone before refresh"),
            }
        }
        Err(err) => store.update_state(|s| s.write_failed(&err)),
    }
}
