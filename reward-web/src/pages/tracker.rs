//! Reward tracker page
//!
//! Reads the connected account's points and submits add-points transactions.
//! Both buttons stay disabled while disconnected or while their own call is
//! in flight.

use leptos::prelude::*;
use lib_core::tracker::{CallState, TrackerStore};

use crate::state::tracker::use_reward_context;
use crate::utils::constants::APP_TITLE;

#[component]
pub fn TrackerPage() -> impl IntoView {
    let ctx = use_reward_context();

    let reading = move || ctx.with_state(|s| s.read_state() == CallState::InFlight);
    let writing = move || ctx.with_state(|s| s.write_state() == CallState::InFlight);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        ctx.add_points();
    };

    view! {
        <main class="tracker">
            <h1 class="tracker-title">{APP_TITLE}</h1>

            <button
                class="btn-primary"
                on:click=move |_| ctx.fetch()
                disabled=move || !ctx.with_state(|s| s.can_read())
            >
                {move || if reading() { "Loading..." } else { "My Reward Points" }}
            </button>

            {move || ctx.with_state(|s| s.rewards().map(str::to_string)).map(|points| view! {
                <p class="reward-value">
                    <span>{points}</span>
                    <span class="trophy">" points"</span>
                </p>
            })}

            <form class="reward-form" on:submit=on_submit>
                <h2>"Add Reward Points"</h2>
                <input
                    type="text"
                    placeholder="Member address (0x...)"
                    prop:value=move || ctx.with_state(|s| s.form().target.clone())
                    on:input=move |ev| {
                        let target = event_target_value(&ev);
                        ctx.update_state(|s| s.set_target(target));
                    }
                />
                <input
                    type="number"
                    min="1"
                    step="1"
                    placeholder="Points"
                    prop:value=move || ctx.with_state(|s| s.form().amount.clone())
                    on:input=move |ev| {
                        let amount = event_target_value(&ev);
                        ctx.update_state(|s| s.set_amount(amount));
                    }
                />
                <button
                    type="submit"
                    class="btn-secondary"
                    disabled=move || !ctx.with_state(|s| s.can_write())
                >
                    {move || if writing() { "Waiting for confirmation..." } else { "Add Reward Points" }}
                </button>
            </form>

            {move || ctx.with_state(|s| s.error().map(str::to_string)).map(|err| view! {
                <p class="error">{err}</p>
            })}
        </main>
    }
}
