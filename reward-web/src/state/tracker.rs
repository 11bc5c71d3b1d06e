//! Reward tracker state management

use leptos::prelude::*;
use lib_core::config::Config;
use lib_core::tracker::{flows, TrackerState, TrackerStore};

use crate::services::ethereum::EthereumProvider;

/// Global tracker context
#[derive(Clone, Copy)]
pub struct RewardContext {
    pub state: RwSignal<TrackerState>,
    provider: StoredValue<Option<EthereumProvider>, LocalStorage>,
    config: StoredValue<Config>,
}

impl RewardContext {
    pub fn new(config: Config) -> Self {
        Self {
            state: RwSignal::new(TrackerState::default()),
            provider: StoredValue::new_local(None),
            config: StoredValue::new(config),
        }
    }

    pub fn config(&self) -> Config {
        self.config.get_value()
    }

    pub fn provider(&self) -> Option<EthereumProvider> {
        self.provider.get_value()
    }

    pub fn set_provider(&self, provider: EthereumProvider) {
        self.provider.set_value(Some(provider));
    }

    /// Connect button handler
    pub fn connect(&self) {
        let ctx = *self;
        let provider = self.provider();
        leptos::task::spawn_local(async move {
            flows::connect_wallet(&ctx, provider.as_ref()).await;
        });
    }

    /// "My Reward Points" handler
    pub fn fetch(&self) {
        let ctx = *self;
        let Some(provider) = self.provider() else {
            self.update_state(|s| s.provider_missing());
            return;
        };
        let config = self.config();
        leptos::task::spawn_local(async move {
            flows::fetch_reward_points(&ctx, &provider, &config).await;
        });
    }

    /// Add-points form submit handler
    pub fn add_points(&self) {
        let ctx = *self;
        let Some(provider) = self.provider() else {
            self.update_state(|s| s.provider_missing());
            return;
        };
        let config = self.config();
        leptos::task::spawn_local(async move {
            flows::add_reward_points(&ctx, &provider, &config).await;
        });
    }

    pub fn dismiss(&self, notice_id: u64) {
        self.state.update(|s| s.dismiss_notice(notice_id));
    }
}

impl TrackerStore for RewardContext {
    fn update_state<R>(&self, f: impl FnOnce(&mut TrackerState) -> R) -> R {
        let mut state = self.state.write();
        f(&mut *state)
    }

    fn with_state<R>(&self, f: impl FnOnce(&TrackerState) -> R) -> R {
        self.state.with(f)
    }
}

pub fn provide_reward_context(config: Config) -> RewardContext {
    let context = RewardContext::new(config);
    provide_context(context);
    context
}

pub fn use_reward_context() -> RewardContext {
    expect_context::<RewardContext>()
}
