//! Preference Picker Components
//!
//! Tag grid with a selection limit, and the modal that asks for
//! recommendation preferences.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::config::MAX_RECOMMENDATION_TAGS;
use crate::forms::TagSelection;

/// Selectable tag chips bound to a `TagSelection`
#[component]
pub fn TagGrid(
    #[prop(into)] tags: Signal<Vec<String>>,
    selection: RwSignal<TagSelection>,
    /// Inline notice when a pick is rejected
    set_notice: WriteSignal<Option<String>>,
) -> impl IntoView {
    view! {
        <div class="tag-grid">
            <For
                each=move || tags.get()
                key=|t| t.clone()
                children=move |tag| {
                    let tag_for_class = tag.clone();
                    let tag_for_click = tag.clone();
                    let class = move || {
                        let mut c = String::from("tag-option");
                        if selection.with(|s| s.is_selected(&tag_for_class)) {
                            c.push_str(" selected");
                        }
                        c
                    };
                    view! {
                        <button
                            type="button"
                            class=class
                            on:click=move |_| {
                                let mut result = Ok(());
                                selection.update(|s| result = s.toggle(&tag_for_click));
                                set_notice.set(result.err().map(|e| e.to_string()));
                            }
                        >
                            {tag}
                        </button>
                    }
                }
            />
        </div>
        <p class="tag-count">
            {move || selection.with(|s| format!("{}/{} selected", s.selected().len(), s.max()))}
        </p>
    }
}

/// Modal asking for recommendation preferences
#[component]
pub fn PreferencePicker(
    #[prop(into)] on_confirm: Callback<Vec<String>>,
    #[prop(into)] on_cancel: Callback<()>,
    /// Ask for profile-based recommendations instead
    #[prop(into)]
    on_use_profile: Callback<()>,
    #[prop(optional)] initial: Vec<String>,
) -> impl IntoView {
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (notice, set_notice) = signal::<Option<String>>(None);

    let mut start = TagSelection::new(MAX_RECOMMENDATION_TAGS);
    for t in &initial {
        let _ = start.toggle(t);
    }
    let selection = RwSignal::new(start);

    spawn_local(async move {
        set_tags.set(api::travel_tags_or_default().await);
    });

    let confirm = move |_| match selection.with(TagSelection::confirm) {
        Ok(picked) => on_confirm.run(picked),
        Err(e) => set_notice.set(Some(e.to_string())),
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_cancel.run(())>
            <div class="modal preference-modal" on:click=|ev| ev.stop_propagation()>
                <div class="modal-header">
                    <h3>"What kind of trip are you after?"</h3>
                    <button class="modal-close" on:click=move |_| on_cancel.run(())>"×"</button>
                </div>
                <p class="modal-hint">
                    {format!("Pick up to {} tags and we will match groups to them.", MAX_RECOMMENDATION_TAGS)}
                </p>
                <TagGrid tags=tags selection=selection set_notice=set_notice />
                <Show when=move || notice.get().is_some()>
                    <p class="inline-notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <div class="modal-actions">
                    <button class="secondary-btn" on:click=move |_| on_use_profile.run(())>
                        "Use my profile"
                    </button>
                    <button class="secondary-btn" on:click=move |_| on_cancel.run(())>"Cancel"</button>
                    <button class="primary-btn" on:click=confirm>"Show groups"</button>
                </div>
            </div>
        </div>
    }
}
