//! Transfer Station Component
//!
//! Floating tray of staged attractions. Attractions dragged from elsewhere
//! are added by dropping them on the tray; staged entries are reordered by
//! dropping one onto another.

use leptos::prelude::*;
use leptos_dragdrop::{
    create_dnd_signals, make_on_dragend, make_on_dragleave, make_on_dragstart, make_on_entry_dragover,
    make_on_entry_drop, make_on_surface_dragover, make_on_surface_drop, DndSignals, Dropped,
};

use crate::components::ConfirmButton;
use crate::context::use_app_context;
use crate::drag_reorder::encode_payload;
use crate::format::{resolve_image_url, truncate_description};
use crate::models::StagedItem;

#[component]
pub fn TransferStation() -> impl IntoView {
    let staging = use_app_context().staging;
    let items = staging.items();
    let (open, set_open) = signal(false);
    let dnd = create_dnd_signals();

    let count = move || items.with(Vec::len);

    let on_drop = Callback::new(move |dropped: Dropped| {
        if staging.apply_drop(dropped) {
            log::debug!("[STAGING] tray now holds {} items", staging.len());
        }
    });

    view! {
        <Show
            when=move || open.get()
            fallback=move || view! {
                <div
                    class="transfer-station-toggle"
                    on:click=move |_| set_open.set(true)
                    on:dragover=make_on_surface_dragover()
                    on:drop=make_on_surface_drop(dnd, move |d| on_drop.run(d))
                >
                    <span class="toggle-icon">"📦"</span>
                    <span class="toggle-text">"Transfer station"</span>
                    <Show when=move || { count() > 0 }>
                        <span class="attraction-count">{count}</span>
                    </Show>
                </div>
            }
        >
            <div
                class="transfer-station-container"
                on:dragover=make_on_surface_dragover()
                on:drop=make_on_surface_drop(dnd, move |d| on_drop.run(d))
            >
                <div class="transfer-station-header">
                    <div class="header-left">
                        <span class="header-icon">"📦"</span>
                        <span class="header-title">"Transfer station"</span>
                        <span class="attraction-count">{count}</span>
                    </div>
                    <div class="header-actions">
                        <Show when=move || { count() > 0 }>
                            <ConfirmButton
                                label="Clear"
                                button_class="clear-btn"
                                prompt="Clear all?"
                                on_confirm=Callback::new(move |_: ()| {
                                    staging.clear();
                                })
                            />
                        </Show>
                        <button class="close-btn" title="Close" on:click=move |_| set_open.set(false)>"×"</button>
                    </div>
                </div>

                <Show
                    when=move || { count() > 0 }
                    fallback=|| view! {
                        <div class="empty-state">
                            <div class="empty-icon">"📦"</div>
                            <div class="empty-text">"Nothing staged yet"</div>
                            <div class="empty-hint">"Drag attractions here from a destination page"</div>
                        </div>
                    }
                >
                    <div class="attractions-list">
                        <For
                            each=move || items.get()
                            key=|item| item.id.clone()
                            children=move |item| view! {
                                <StagedEntry item=item dnd=dnd on_drop=on_drop />
                            }
                        />
                    </div>
                </Show>
            </div>
        </Show>
    }
}

#[component]
fn StagedEntry(
    item: StagedItem,
    dnd: DndSignals,
    on_drop: Callback<Dropped>,
) -> impl IntoView {
    let staging = use_app_context().staging;
    let id = item.id.clone();

    let payload_item = item.clone();
    let on_dragstart = make_on_dragstart(dnd, move || encode_payload(&payload_item));
    let on_dragover = make_on_entry_dragover(dnd, id.clone());
    let on_entry_drop = make_on_entry_drop(dnd, id.clone(), move |d| on_drop.run(d));

    let id_for_class = id.clone();
    let class = move || {
        let mut c = String::from("attraction-item");
        if dnd.is_hovered(&id_for_class) {
            c.push_str(" drag-over");
        }
        c
    };

    let image = resolve_image_url(&item.image_url);
    let description = truncate_description(&item.description);
    let id_for_remove = id.clone();

    view! {
        <div
            class=class
            draggable="true"
            on:dragstart=on_dragstart
            on:dragover=on_dragover
            on:dragleave=make_on_dragleave(dnd)
            on:dragend=make_on_dragend(dnd)
            on:drop=on_entry_drop
        >
            <div class="attraction-image">
                <img src=image alt=item.name.clone() />
            </div>
            <div class="attraction-info">
                <div class="attraction-name">{item.name.clone()}</div>
                <div class="attraction-category">{item.category.clone()}</div>
                <div class="attraction-destination">{item.destination_name.clone().unwrap_or_default()}</div>
                <div class="attraction-description">{description}</div>
            </div>
            <div class="attraction-actions">
                <button
                    class="remove-btn"
                    title="Remove from transfer station"
                    on:click=move |_| {
                        staging.remove(&id_for_remove);
                    }
                >
                    "×"
                </button>
            </div>
        </div>
    }
}
