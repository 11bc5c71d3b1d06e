//! Navigation Bar Component

use leptos::prelude::*;
use lib_core::tracker::TrackerStore;

use crate::components::ConnectButton;
use crate::state::tracker::use_reward_context;

#[component]
pub fn Navbar() -> impl IntoView {
    let ctx = use_reward_context();

    view! {
        <nav>
            <div style="max-width: 1200px; margin: 0 auto; padding: 0 24px; display: flex; justify-content: space-between; align-items: center;">
                <span class="nav-title">"Fitness Club"</span>
                <div style="display: flex; gap: 12px; align-items: center;">
                    <span class="network-label">
                        {move || ctx.with_state(|s| s.session().network_label()).unwrap_or_default()}
                    </span>
                    <ConnectButton/>
                </div>
            </div>
        </nav>
    }
}
