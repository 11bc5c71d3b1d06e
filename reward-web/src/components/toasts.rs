//! Toast notifications

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use lib_core::tracker::{Notice, NoticeKind, TrackerStore};

use crate::state::tracker::use_reward_context;
use crate::utils::constants::NOTICE_TTL_MS;

#[component]
pub fn Toasts() -> impl IntoView {
    let ctx = use_reward_context();

    view! {
        <div class="toast-stack">
            <For
                each=move || ctx.with_state(|s| s.notices().to_vec())
                key=|notice| notice.id
                children=move |notice: Notice| {
                    let id = notice.id;
                    leptos::task::spawn_local(async move {
                        TimeoutFuture::new(NOTICE_TTL_MS).await;
                        ctx.dismiss(id);
                    });

                    let class = match notice.kind {
                        NoticeKind::Success => "toast toast-success",
                        NoticeKind::Error => "toast toast-error",
                        NoticeKind::Info => "toast",
                    };
                    view! {
                        <div class=class on:click=move |_| ctx.dismiss(id)>
                            {notice.message}
                        </div>
                    }
                }
            />
        </div>
    }
}
