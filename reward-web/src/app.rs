//! Fitness Club Reward Tracker - Leptos Frontend

use leptos::prelude::*;
use lib_core::config::Config;
use lib_core::tracker::flows;

use crate::components::{Navbar, Toasts};
use crate::pages::TrackerPage;
use crate::services::ethereum::{detect_provider, ProviderSubscription};
use crate::state::tracker::provide_reward_context;

#[component]
pub fn App(config: Config) -> impl IntoView {
    let detect_timeout_ms = config.detect_timeout_ms;
    let ctx = provide_reward_context(config);

    // Provider listeners live exactly as long as the app
    let subscription = StoredValue::new_local(None::<ProviderSubscription>);
    on_cleanup(move || {
        subscription.try_update_value(|sub| sub.take());
    });

    leptos::task::spawn_local(async move {
        let provider = detect_provider(detect_timeout_ms).await;
        flows::attach_provider(&ctx, provider.as_ref());

        if let Some(provider) = provider {
            let sub = ProviderSubscription::attach(
                &provider,
                move |accounts| flows::handle_accounts_changed(&ctx, accounts),
                move |chain_id| flows::handle_chain_changed(&ctx, chain_id),
            );
            subscription.set_value(Some(sub));
            ctx.set_provider(provider);
        }
    });

    view! {
        <div class="app-container">
            <Navbar/>
            <TrackerPage/>
            <Toasts/>
        </div>
    }
}

/// Rendered instead of the app when the bundled configuration is unusable.
#[component]
pub fn ConfigError(message: String) -> impl IntoView {
    view! {
        <div class="app-container" style="display: flex; justify-content: center; align-items: center; min-height: 100vh;">
            <div class="card" style="max-width: 500px; text-align: center;">
                <h1 style="margin-bottom: 16px; font-size: 28px; font-weight: 700;">"Reward Tracker Unavailable"</h1>
                <p class="error">{message}</p>
            </div>
        </div>
    }
}
