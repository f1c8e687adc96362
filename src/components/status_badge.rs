//! Status Badge Component

use leptos::prelude::*;

use crate::status::status_display;

/// Group status pill; an open group at capacity reads as full
#[component]
pub fn StatusBadge(
    #[prop(into)] status: Signal<String>,
    #[prop(into)] current_members: Signal<u32>,
    #[prop(into)] max_members: Signal<u32>,
) -> impl IntoView {
    let display = Memo::new(move |_| status_display(&status.get(), current_members.get(), max_members.get()));

    view! {
        <span class=move || format!("status-badge {}", display.get().class)>
            {move || display.get().text}
        </span>
    }
}
