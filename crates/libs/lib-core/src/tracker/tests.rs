use std::cell::RefCell;

use serde_json::json;

use super::flows::*;
use super::*;
use crate::testing::{encode_uint, test_config, MockProvider, ACCOUNT, OTHER_ACCOUNT};

fn connected_store() -> RefCell<TrackerState> {
    let store = RefCell::new(TrackerState::default());
    handle_accounts_changed(&store, vec![ACCOUNT.to_string()]);
    store
}

fn fill_form(store: &RefCell<TrackerState>, target: &str, amount: &str) {
    store.update_state(|s| {
        s.set_target(target.to_string());
        s.set_amount(amount.to_string());
    });
}

fn script_successful_write(provider: &MockProvider) {
    provider.respond("eth_requestAccounts", json!([ACCOUNT]));
    provider.respond("eth_sendTransaction", json!("0xbeef"));
    provider.respond(
        "eth_getTransactionReceipt",
        json!({ "transactionHash": "0xbeef", "status": "0x1" }),
    );
}

// -- session --------------------------------------------------------------

#[test]
fn test_selected_address_on_load_connects() {
    let store = RefCell::new(TrackerState::default());
    let provider = MockProvider::new()
        .with_selected_address("0xABC")
        .with_network_version("11155111");

    attach_provider(&store, Some(&provider));

    let state = store.borrow();
    assert_eq!(state.account(), Some("0xABC"));
    assert!(state.is_connected());
    assert_eq!(state.error(), None);
    assert!(state.notices().is_empty());
    assert_eq!(state.session().network_label().as_deref(), Some("Sepolia"));
}

#[test]
fn test_missing_provider_reports_install_message() {
    let store = RefCell::new(TrackerState::default());
    attach_provider::<_, MockProvider>(&store, None);

    assert_eq!(store.borrow().error(), Some(crate::error::MSG_INSTALL_WALLET));
    assert!(!store.borrow().is_connected());
}

#[test]
fn test_zero_accounts_disconnects_and_clears_rewards() {
    let store = connected_store();
    let ticket = store.update_state(|s| s.begin_read()).unwrap();
    store.update_state(|s| s.finish_read(&ticket, Ok(RewardPoints(U256::from(7u64)))));
    assert_eq!(store.borrow().rewards(), Some("7"));

    handle_accounts_changed(&store, vec![]);

    let state = store.borrow();
    assert!(!state.is_connected());
    assert_eq!(state.account(), None);
    assert_eq!(state.rewards(), None);
    assert_eq!(state.error(), Some(MSG_CONNECT_WALLET));
}

#[test]
fn test_chain_change_is_recorded() {
    let store = connected_store();
    handle_chain_changed(&store, Some("0x1".to_string()));
    assert_eq!(store.borrow().session().chain_id(), Some("0x1"));
    assert_eq!(store.borrow().connect_label(), "0x71C7...976F");
}

#[tokio::test]
async fn test_connect_adopts_first_account() {
    let store = RefCell::new(TrackerState::default());
    let provider = MockProvider::new();
    provider.respond("eth_requestAccounts", json!([OTHER_ACCOUNT, ACCOUNT]));

    connect_wallet(&store, Some(&provider)).await;

    assert_eq!(store.borrow().account(), Some(OTHER_ACCOUNT));
    assert_eq!(store.borrow().error(), None);
}

#[tokio::test]
async fn test_connect_rejected_by_user() {
    let store = RefCell::new(TrackerState::default());
    let provider = MockProvider::new();
    provider.fail("eth_requestAccounts", 4001, "User rejected the request.");

    connect_wallet(&store, Some(&provider)).await;

    assert!(!store.borrow().is_connected());
    assert_eq!(store.borrow().error(), Some(MSG_CONNECT_WALLET));
}

#[tokio::test]
async fn test_connect_other_failure_shows_provider_message() {
    let store = RefCell::new(TrackerState::default());
    let provider = MockProvider::new();
    provider.fail("eth_requestAccounts", -32002, "Request already pending");

    connect_wallet(&store, Some(&provider)).await;

    assert_eq!(store.borrow().error(), Some("Request already pending"));
}

// -- read -----------------------------------------------------------------

#[tokio::test]
async fn test_read_while_disconnected_issues_no_call() {
    let store = RefCell::new(TrackerState::default());
    let provider = MockProvider::new();

    fetch_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(provider.total_calls(), 0);
    assert_eq!(store.borrow().error(), Some(crate::error::MSG_NO_ACCOUNT));
    assert_eq!(store.borrow().read_state(), CallState::Idle);
}

#[tokio::test]
async fn test_read_of_zero_displays_zero() {
    let store = connected_store();
    let provider = MockProvider::new();
    provider.respond("eth_call", encode_uint(0));

    fetch_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(store.borrow().rewards(), Some("0"));
    assert_eq!(store.borrow().read_state(), CallState::Succeeded);
}

#[tokio::test]
async fn test_failed_read_keeps_previous_value() {
    let store = connected_store();
    let provider = MockProvider::new();
    provider.respond("eth_call", encode_uint(12));
    provider.fail("eth_call", -32000, "execution reverted");
    let config = test_config();

    fetch_reward_points(&store, &provider, &config).await;
    fetch_reward_points(&store, &provider, &config).await;

    let state = store.borrow();
    assert_eq!(state.rewards(), Some("12"));
    assert_eq!(state.read_state(), CallState::Failed);
    assert_eq!(state.error(), Some(MSG_FETCH_FAILED));
}

#[test]
fn test_second_read_while_in_flight_is_refused() {
    let store = connected_store();
    store.update_state(|s| s.begin_read()).unwrap();

    let err = store.update_state(|s| s.begin_read()).unwrap_err();
    assert_eq!(err, AppError::Busy("reward lookup"));
    assert!(!store.borrow().can_read());
}

#[test]
fn test_read_result_after_account_switch_is_discarded() {
    let store = connected_store();
    let ticket = store.update_state(|s| s.begin_read()).unwrap();

    handle_accounts_changed(&store, vec![OTHER_ACCOUNT.to_string()]);
    let applied = store.update_state(|s| s.finish_read(&ticket, Ok(RewardPoints(U256::from(99u64)))));

    assert!(!applied);
    assert_eq!(store.borrow().rewards(), None);
    assert_eq!(store.borrow().read_state(), CallState::Idle);
}

// -- write ----------------------------------------------------------------

#[test]
fn test_form_must_be_complete_to_submit() {
    let store = connected_store();
    assert!(!store.borrow().can_write());

    fill_form(&store, "", "10");
    assert!(!store.borrow().can_write());

    fill_form(&store, OTHER_ACCOUNT, "0");
    assert!(!store.borrow().can_write());

    fill_form(&store, OTHER_ACCOUNT, "-3");
    assert!(!store.borrow().can_write());

    fill_form(&store, OTHER_ACCOUNT, "10");
    assert!(store.borrow().can_write());
}

#[tokio::test]
async fn test_invalid_form_issues_no_call() {
    let store = connected_store();
    let provider = MockProvider::new();
    fill_form(&store, OTHER_ACCOUNT, "0");

    add_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(provider.total_calls(), 0);
    assert_eq!(store.borrow().write_state(), CallState::Idle);
}

#[tokio::test]
async fn test_successful_write_refreshes_once_and_resets_form() {
    let store = connected_store();
    let provider = MockProvider::new();
    script_successful_write(&provider);
    provider.respond("eth_call", encode_uint(35));
    fill_form(&store, OTHER_ACCOUNT, "35");

    add_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(provider.calls_to("eth_sendTransaction"), 1);
    assert_eq!(provider.calls_to("eth_call"), 1);

    let state = store.borrow();
    assert_eq!(state.form().target, "");
    assert_eq!(state.form().amount, DEFAULT_AMOUNT);
    assert_eq!(state.rewards(), Some("35"));
    assert_eq!(state.write_state(), CallState::Succeeded);
    let last = state.notices().last().unwrap();
    assert_eq!(last.kind, NoticeKind::Success);
    assert_eq!(last.message, MSG_WRITE_SUCCEEDED);
}

#[tokio::test]
async fn test_write_refresh_supersedes_read_in_flight() {
    let store = connected_store();
    let provider = MockProvider::new();
    script_successful_write(&provider);
    provider.respond("eth_call", encode_uint(40));
    fill_form(&store, OTHER_ACCOUNT, "40");
    let earlier = store.update_state(|s| s.begin_read()).unwrap();

    add_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(provider.calls_to("eth_call"), 1);
    assert_eq!(store.borrow().rewards(), Some("40"));
    assert_eq!(store.borrow().read_state(), CallState::Succeeded);

    let applied = store.update_state(|s| s.finish_read(&earlier, Ok(RewardPoints(U256::from(1u64)))));
    assert!(!applied);
    assert_eq!(store.borrow().rewards(), Some("40"));
}

#[tokio::test]
async fn test_failed_refresh_after_write_keeps_fetch_error() {
    let store = connected_store();
    let provider = MockProvider::new();
    script_successful_write(&provider);
    provider.fail("eth_call", -32000, "header not found");
    fill_form(&store, OTHER_ACCOUNT, "3");

    add_reward_points(&store, &provider, &test_config()).await;

    let state = store.borrow();
    assert_eq!(state.write_state(), CallState::Succeeded);
    assert_eq!(state.read_state(), CallState::Failed);
    assert_eq!(state.error(), Some(MSG_FETCH_FAILED));
    assert_eq!(state.form().target, "");
}

#[test]
fn test_form_edits_during_refresh_survive() {
    let store = connected_store();
    fill_form(&store, OTHER_ACCOUNT, "8");
    store.update_state(|s| s.begin_write()).unwrap();

    let receipt: TransactionReceipt =
        serde_json::from_value(json!({ "transactionHash": "0xf00d", "status": "0x1" })).unwrap();
    let ticket = store
        .update_state(|s| {
            s.write_confirmed(&receipt);
            s.begin_refresh()
        })
        .unwrap();
    assert_eq!(store.borrow().form(), &PendingWrite::default());

    fill_form(&store, ACCOUNT, "2");
    store.update_state(|s| s.finish_read(&ticket, Ok(RewardPoints(U256::from(8u64)))));

    let state = store.borrow();
    assert_eq!(state.form().target, ACCOUNT);
    assert_eq!(state.form().amount, "2");
    assert_eq!(state.rewards(), Some("8"));
}

#[tokio::test]
async fn test_write_while_disconnected_issues_no_call() {
    let store = RefCell::new(TrackerState::default());
    let provider = MockProvider::new();
    fill_form(&store, OTHER_ACCOUNT, "10");

    add_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(provider.total_calls(), 0);
    let state = store.borrow();
    assert_eq!(state.error(), Some(crate::error::MSG_NO_ACCOUNT));
    assert_eq!(state.write_state(), CallState::Idle);
    assert_eq!(state.form().amount, "10");
}

#[tokio::test]
async fn test_rejected_write_shows_connect_message_and_skips_refresh() {
    let store = connected_store();
    let provider = MockProvider::new();
    provider.respond("eth_requestAccounts", json!([ACCOUNT]));
    provider.fail("eth_sendTransaction", 4001, "User denied transaction signature.");
    fill_form(&store, OTHER_ACCOUNT, "5");

    add_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(provider.calls_to("eth_call"), 0);
    let state = store.borrow();
    assert_eq!(state.error(), Some(MSG_CONNECT_WALLET));
    assert_eq!(state.write_state(), CallState::Failed);
    assert_eq!(state.form().target, OTHER_ACCOUNT);
    assert_eq!(state.form().amount, "5");
}

#[tokio::test]
async fn test_other_write_failure_is_generic() {
    let store = connected_store();
    let provider = MockProvider::new();
    provider.respond("eth_requestAccounts", json!([ACCOUNT]));
    provider.fail("eth_sendTransaction", -32603, "insufficient funds for gas");
    fill_form(&store, OTHER_ACCOUNT, "5");

    add_reward_points(&store, &provider, &test_config()).await;

    assert_eq!(store.borrow().error(), Some(MSG_WRITE_FAILED));
}

#[test]
fn test_second_write_while_in_flight_is_refused() {
    let store = connected_store();
    fill_form(&store, OTHER_ACCOUNT, "5");
    store.update_state(|s| s.begin_write()).unwrap();

    assert!(!store.borrow().can_write());
    assert_eq!(
        store.update_state(|s| s.begin_write()).unwrap_err(),
        AppError::Busy("add reward points")
    );
}

#[test]
fn test_notices_are_dismissable() {
    let mut state = TrackerState::default();
    let first = state.push_notice(NoticeKind::Info, "one");
    let second = state.push_notice(NoticeKind::Info, "two");
    assert_ne!(first, second);

    state.dismiss_notice(first);
    assert_eq!(state.notices().len(), 1);
    assert_eq!(state.notices()[0].id, second);
}
