//! Join Application Form
//!
//! Modal with the application message and optional preference tags.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::components::TagGrid;
use crate::config::{MAX_APPLICATION_MESSAGE, MAX_APPLICATION_TAGS};
use crate::forms::{validate_application, TagSelection};
use crate::notice::notify;

#[component]
pub fn ApplyForm(
    group_id: i64,
    #[prop(into)] group_title: String,
    #[prop(into)] on_submitted: Callback<()>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let (message, set_message) = signal(String::new());
    let (tags, set_tags) = signal(Vec::<String>::new());
    let (notice, set_notice) = signal::<Option<String>>(None);
    let (submitting, set_submitting) = signal(false);
    let selection = RwSignal::new(TagSelection::new(MAX_APPLICATION_TAGS));

    spawn_local(async move {
        set_tags.set(api::travel_tags_or_default().await);
    });

    let submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let picked = selection.with(|s| s.selected().to_vec());
        let req = match validate_application(&message.get(), &picked) {
            Ok(req) => req,
            Err(e) => {
                set_notice.set(Some(e.to_string()));
                return;
            }
        };
        set_notice.set(None);
        set_submitting.set(true);
        spawn_local(async move {
            match api::apply_to_group(group_id, &req).await {
                Ok(()) => {
                    notify("Application sent, the organizer will review it soon.");
                    on_submitted.run(());
                }
                Err(e) => notify(&e.notice("Apply")),
            }
            set_submitting.set(false);
        });
    };

    view! {
        <div class="modal-overlay" on:click=move |_| on_close.run(())>
            <form class="modal apply-modal" on:click=|ev| ev.stop_propagation() on:submit=submit>
                <div class="modal-header">
                    <h3>{format!("Join \"{}\"", group_title)}</h3>
                    <button type="button" class="modal-close" on:click=move |_| on_close.run(())>"×"</button>
                </div>
                <label class="field-label">"Why do you want to join?"</label>
                <textarea
                    class="apply-message"
                    maxlength=MAX_APPLICATION_MESSAGE.to_string()
                    prop:value=move || message.get()
                    on:input=move |ev| set_message.set(event_target_value(&ev))
                />
                <p class="char-count">
                    {move || format!("{}/{}", message.with(|m| m.chars().count()), MAX_APPLICATION_MESSAGE)}
                </p>
                <label class="field-label">
                    {format!("Travel preferences (optional, up to {})", MAX_APPLICATION_TAGS)}
                </label>
                <TagGrid tags=tags selection=selection set_notice=set_notice />
                <Show when=move || notice.get().is_some()>
                    <p class="inline-notice">{move || notice.get().unwrap_or_default()}</p>
                </Show>
                <div class="modal-actions">
                    <button type="button" class="secondary-btn" on:click=move |_| on_close.run(())>"Cancel"</button>
                    <button type="submit" class="primary-btn" disabled=move || submitting.get()>
                        {move || if submitting.get() { "Sending..." } else { "Send application" }}
                    </button>
                </div>
            </form>
        </div>
    }
}
