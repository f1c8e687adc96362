//! Group Travel Frontend App
//!
//! Shell that provides shared context and switches between the browser,
//! detail and create screens. The transfer station floats over all of them.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::api;
use crate::components::{CreateGroup, GroupBrowser, GroupDetail, TransferStation};
use crate::context::{AppContext, Screen, StagingHandle};
use crate::store::BrowserState;

#[component]
pub fn App() -> impl IntoView {
    // State
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (screen, set_screen) = signal(Screen::default());
    let (current_user, set_current_user) = signal::<Option<i64>>(None);
    let staging = StagingHandle::open_browser();

    // Provide context to all children
    provide_context(AppContext::new(
        (reload_trigger, set_reload_trigger),
        set_screen,
        current_user,
        staging,
    ));
    provide_context(Store::new(BrowserState::default()));

    // Resolve the signed-in user once
    spawn_local(async move {
        let user = api::current_user_id().await;
        log::info!("[APP] signed in as {:?}", user);
        set_current_user.set(user);
    });

    view! {
        <div class="app-layout">
            <main class="main-content">
                {move || match screen.get() {
                    Screen::Browser => view! { <GroupBrowser /> }.into_any(),
                    Screen::Detail(id) => view! { <GroupDetail group_id=id /> }.into_any(),
                    Screen::Create => view! { <CreateGroup /> }.into_any(),
                }}
            </main>
            <TransferStation />
        </div>
    }
}
