//! Create Group Form Component
//!
//! Destination picker (hot list plus debounced keyword search), trip facts
//! and travel tags. Input is validated before anything is sent.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::TagGrid;
use crate::config::{MAX_GROUP_MEMBERS, MAX_GROUP_TAGS, MIN_GROUP_MEMBERS, SEARCH_DEBOUNCE_MS};
use crate::context::{use_app_context, Screen};
use crate::forms::{CreateGroupForm, TagSelection, GROUP_TYPES};
use crate::models::{Destination, DEFAULT_TRAVEL_TAGS};
use crate::notice::notify;

#[component]
pub fn CreateGroup() -> impl IntoView {
    let ctx = use_app_context();

    let form = RwSignal::new(CreateGroupForm::default());
    let selection = RwSignal::new(TagSelection::new(MAX_GROUP_TAGS));
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);

    spawn_local(async move {
        let loaded = api::destination_tags().await.unwrap_or_else(|e| {
            log::warn!("[CREATE] tag list unavailable, using defaults: {}", e);
            Vec::new()
        });
        if loaded.is_empty() {
            set_tags.set(DEFAULT_TRAVEL_TAGS.iter().map(|t| t.to_string()).collect());
        } else {
            set_tags.set(loaded);
        }
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let mut current = form.get_untracked();
        current.travel_tags = selection.with_untracked(|s| s.selected().to_vec());
        let req = match current.validate() {
            Ok(req) => req,
            Err(e) => {
                set_notice.set(Some(e.to_string()));
                return;
            }
        };
        set_notice.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match api::create_group(&req).await {
                Ok(group) => {
                    log::info!("[CREATE] group {} created", group.id);
                    ctx.reload();
                    ctx.navigate(Screen::Browser);
                }
                Err(e) => notify(&e.notice("Create group")),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <form class="create-group-form" on:submit=submit>
            <div class="form-header">
                <button type="button" class="back-btn" on:click=move |_| ctx.navigate(Screen::Browser)>
                    "← Back"
                </button>
                <h1>"Create a travel group"</h1>
            </div>

            <DestinationPicker form=form />

            <label class="field-label">"Title"</label>
            <input
                type="text"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    form.update(|f| f.title = v);
                }
            />

            <label class="field-label">"Description"</label>
            <textarea
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| {
                    let v = event_target_value(&ev);
                    form.update(|f| f.description = v);
                }
            />

            <div class="form-row">
                <label class="field-label">"Start"</label>
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.start_date.clone())
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        form.update(|f| f.start_date = v);
                    }
                />
                <label class="field-label">"End"</label>
                <input
                    type="date"
                    prop:value=move || form.with(|f| f.end_date.clone())
                    on:change=move |ev| {
                        let v = event_target_value(&ev);
                        form.update(|f| f.end_date = v);
                    }
                />
            </div>

            <div class="form-row">
                <label class="field-label">"Budget per person (¥)"</label>
                <input
                    type="number"
                    min="0"
                    prop:value=move || form.with(|f| f.budget.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        form.update(|f| f.budget = v);
                    }
                />
                <label class="field-label">{format!("Group size ({}-{})", MIN_GROUP_MEMBERS, MAX_GROUP_MEMBERS)}</label>
                <input
                    type="number"
                    min=MIN_GROUP_MEMBERS.to_string()
                    max=MAX_GROUP_MEMBERS.to_string()
                    prop:value=move || form.with(|f| f.max_members.clone())
                    on:input=move |ev| {
                        let v = event_target_value(&ev);
                        form.update(|f| f.max_members = v);
                    }
                />
            </div>

            <div class="form-row">
                <label class="field-label">"Style"</label>
                <select on:change=move |ev| {
                    let v = event_target_value(&ev);
                    form.update(|f| f.group_type = v);
                }>
                    {GROUP_TYPES.iter().map(|(value, label)| {
                        let value = value.to_string();
                        let selected = {
                            let value = value.clone();
                            move || form.with(|f| f.group_type == value)
                        };
                        view! { <option value=value selected=selected>{*label}</option> }
                    }).collect_view()}
                </select>
                <label class="checkbox">
                    <input
                        type="checkbox"
                        prop:checked=move || form.with(|f| f.is_public)
                        on:change=move |ev| {
                            let checked = event_target_checked(&ev);
                            form.update(|f| f.is_public = checked);
                        }
                    />
                    "Public group"
                </label>
            </div>

            <label class="field-label">"Travel tags"</label>
            <TagGrid tags=tags selection=selection set_notice=set_notice />

            <Show when=move || notice.get().is_some()>
                <p class="inline-notice">{move || notice.get().unwrap_or_default()}</p>
            </Show>

            <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                {move || if submitting.get() { "Creating..." } else { "Create group" }}
            </button>
        </form>
    }
}

/// Destination choice: hot list, or keyword results after a short pause
#[component]
fn DestinationPicker(form: RwSignal<CreateGroupForm>) -> impl IntoView {
    let (options, set_options) = signal(Vec::<Destination>::new());
    let (keyword, set_keyword) = signal(String::new());
    let (searching, set_searching) = signal(false);
    // Bumped on every keystroke; only the latest pending search runs
    let generation = StoredValue::new(0u32);

    let load_hot = move || {
        spawn_local(async move {
            match api::hot_destinations().await {
                Ok(list) => set_options.set(list),
                Err(e) => log::warn!("[CREATE] hot destinations unavailable: {}", e),
            }
        });
    };
    load_hot();

    let on_keyword = move |ev: web_sys::Event| {
        let value = event_target_value(&ev);
        set_keyword.set(value.clone());
        generation.update_value(|g| *g += 1);
        let ticket = generation.get_value();
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.get_value() != ticket {
                return;
            }
            if value.trim().is_empty() {
                load_hot();
                return;
            }
            set_searching.set(true);
            match api::search_destinations(&value).await {
                Ok(list) if generation.get_value() == ticket => set_options.set(list),
                Ok(_) => {}
                Err(e) => log::warn!("[CREATE] destination search failed: {}", e),
            }
            set_searching.set(false);
        });
    };

    view! {
        <div class="destination-picker">
            <label class="field-label">"Destination"</label>
            {move || form.with(|f| f.destination.clone()).map(|d| view! {
                <div class="chosen-destination">
                    <span>{d.name}</span>
                    <button type="button" class="secondary-btn" on:click=move |_| form.update(|f| f.destination = None)>
                        "Change"
                    </button>
                </div>
            })}
            <Show when=move || form.with(|f| f.destination.is_none())>
                <input
                    type="text"
                    placeholder="Search destinations..."
                    prop:value=move || keyword.get()
                    on:input=on_keyword
                />
                <Show when=move || searching.get()>
                    <p class="loading">"Searching..."</p>
                </Show>
                <ul class="destination-options">
                    <For
                        each=move || options.get()
                        key=|d| d.id
                        children=move |d| {
                            let name = d.name.clone();
                            view! {
                                <li on:click=move |_| {
                                    let chosen = d.clone();
                                    form.update(|f| f.destination = Some(chosen));
                                }>
                                    {name}
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>
        </div>
    }
}
