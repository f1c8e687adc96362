//! Group Browser Component
//!
//! Discover / recommendations / my-groups tabs over the browser store.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::{GroupCard, PreferencePicker};
use crate::context::{use_app_context, Screen};
use crate::forms::{SearchQuery, SearchType};
use crate::membership::merge_my_groups;
use crate::store::{
    store_begin_load, store_fail_load, store_visible_groups, use_browser_store, BrowserStateStoreFields,
    BrowserStore, BrowserTab,
};

// ========================
// Loaders
// ========================

fn load_discover(store: BrowserStore) {
    let query = store.search().get_untracked();
    store_begin_load(&store);
    spawn_local(async move {
        match api::discover_groups(&query).await {
            Ok(groups) => {
                log::debug!("[BROWSER] {} public groups", groups.len());
                store.discover().set(groups);
                store.loading().set(false);
            }
            Err(e) => store_fail_load(&store, e.notice("Loading groups")),
        }
    });
}

/// Empty preferences ask for profile-based recommendations
fn load_recommendations(store: BrowserStore) {
    let preferences = store.preferences().get_untracked();
    store_begin_load(&store);
    spawn_local(async move {
        let result = if preferences.is_empty() {
            api::recommended_groups().await
        } else {
            api::recommendations_by_preferences(&preferences).await
        };
        match result {
            Ok(groups) => {
                store.recommendations().set(groups);
                store.loading().set(false);
            }
            Err(e) => store_fail_load(&store, e.notice("Loading recommendations")),
        }
    });
}

fn load_my_groups(store: BrowserStore) {
    store_begin_load(&store);
    spawn_local(async move {
        let created = api::my_created_groups().await;
        let joined = api::my_joined_groups().await;
        match (created, joined) {
            (Ok(created), Ok(joined)) => {
                store.my_groups().set(merge_my_groups(created, joined));
                store.loading().set(false);
            }
            (Err(e), _) | (_, Err(e)) => store_fail_load(&store, e.notice("Loading your groups")),
        }
    });
}

// ========================
// Components
// ========================

#[component]
pub fn GroupBrowser() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_browser_store();
    let (show_picker, set_show_picker) = signal(false);

    // Re-fetch the active tab on tab change or reload
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        match store.active_tab().get() {
            BrowserTab::Discover => load_discover(store),
            BrowserTab::MyGroups => load_my_groups(store),
            BrowserTab::Recommendations => {
                if !show_picker.get_untracked() {
                    load_recommendations(store);
                }
            }
        }
    });

    let select_tab = move |tab: BrowserTab| {
        if tab == BrowserTab::Recommendations {
            set_show_picker.set(true);
        }
        store.active_tab().set(tab);
    };

    let on_confirm = Callback::new(move |picked: Vec<String>| {
        log::info!("[BROWSER] recommendations for {:?}", picked);
        set_show_picker.set(false);
        store.preferences().set(picked);
        load_recommendations(store);
    });
    let on_use_profile = Callback::new(move |_: ()| {
        set_show_picker.set(false);
        store.preferences().set(Vec::new());
        load_recommendations(store);
    });
    let on_cancel = Callback::new(move |_: ()| {
        set_show_picker.set(false);
        store.active_tab().set(BrowserTab::Discover);
    });

    view! {
        <div class="group-browser">
            <div class="browser-header">
                <h1>"Group travel"</h1>
                <button class="primary-btn" on:click=move |_| ctx.navigate(Screen::Create)>
                    "+ Create group"
                </button>
            </div>

            <div class="browser-tabs">
                {BrowserTab::ALL.into_iter().map(|tab| {
                    let class = move || {
                        let mut c = String::from("browser-tab");
                        if store.active_tab().get() == tab {
                            c.push_str(" active");
                        }
                        c
                    };
                    view! {
                        <button class=class on:click=move |_| select_tab(tab)>{tab.label()}</button>
                    }
                }).collect_view()}
            </div>

            <Show when=move || store.active_tab().get() == BrowserTab::Discover>
                <SearchPanel on_search=Callback::new(move |_: ()| load_discover(store)) />
            </Show>

            <Show when=move || store.error().get().is_some()>
                <p class="load-error">{move || store.error().get().unwrap_or_default()}</p>
            </Show>

            <Show
                when=move || !store.loading().get()
                fallback=|| view! { <p class="loading">"Loading..."</p> }
            >
                {move || {
                    let groups = store_visible_groups(&store);
                    let tab = store.active_tab().get();
                    if groups.is_empty() {
                        view! { <p class="empty-state">{tab.empty_message()}</p> }.into_any()
                    } else {
                        let show_score = tab == BrowserTab::Recommendations;
                        view! {
                            <div class="group-grid">
                                {groups.into_iter().map(|(group, role)| match role {
                                    Some(role) => view! { <GroupCard group=group role=role show_score=show_score /> }.into_any(),
                                    None => view! { <GroupCard group=group show_score=show_score /> }.into_any(),
                                }).collect_view()}
                            </div>
                        }.into_any()
                    }
                }}
            </Show>

            <Show when=move || show_picker.get()>
                <PreferencePicker
                    on_confirm=on_confirm
                    on_cancel=on_cancel
                    on_use_profile=on_use_profile
                    initial=store.preferences().get_untracked()
                />
            </Show>
        </div>
    }
}

/// Discover-tab search criteria
#[component]
fn SearchPanel(#[prop(into)] on_search: Callback<()>) -> impl IntoView {
    let store = use_browser_store();

    view! {
        <form
            class="search-panel"
            on:submit=move |ev: web_sys::SubmitEvent| {
                ev.prevent_default();
                on_search.run(());
            }
        >
            <select on:change=move |ev| {
                let t = SearchType::from_param(&event_target_value(&ev));
                store.search().update(|q| q.search_type = t);
            }>
                {SearchType::ALL.into_iter().map(|t| view! {
                    <option value=t.as_param() selected=move || store.search().get().search_type == t>
                        {t.label()}
                    </option>
                }).collect_view()}
            </select>
            <input
                type="text"
                placeholder="Search groups..."
                prop:value=move || store.search().get().text
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    store.search().update(|q| q.text = v);
                }
            />
            <input
                type="date"
                prop:value=move || store.search().get().start_date
                on:change=move |ev| {
                    let v = event_target_value(&ev);
                    store.search().update(|q| q.start_date = v);
                }
            />
            <input
                type="date"
                prop:value=move || store.search().get().end_date
                on:change=move |ev| {
                    let v = event_target_value(&ev);
                    store.search().update(|q| q.end_date = v);
                }
            />
            <button type="submit" class="primary-btn">"Search"</button>
            <button
                type="button"
                class="secondary-btn"
                on:click=move |_| {
                    store.search().set(SearchQuery::default());
                    on_search.run(());
                }
            >
                "Reset"
            </button>
        </form>
    }
}
