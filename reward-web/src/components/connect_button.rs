//! Wallet connect button
//!
//! Shows the truncated active account once connected. Clicking always asks
//! the wallet for account access, which is how a user re-connects after
//! locking or switching accounts.

use leptos::prelude::*;
use lib_core::tracker::TrackerStore;

use crate::state::tracker::use_reward_context;

#[component]
pub fn ConnectButton() -> impl IntoView {
    let ctx = use_reward_context();

    view! {
        <button
            class="connect-button"
            title=move || ctx.with_state(|s| s.account().map(str::to_string))
            on:click=move |_| ctx.connect()
        >
            {move || ctx.with_state(|s| s.connect_label())}
        </button>
    }
}
