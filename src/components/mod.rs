//! UI Components
//!
//! Reusable Leptos components.

mod application_panel;
mod apply_form;
mod confirm_button;
mod create_group_form;
mod group_browser;
mod group_card;
mod group_detail;
mod preference_picker;
mod status_badge;
mod transfer_station;

pub use application_panel::ApplicationPanel;
pub use apply_form::ApplyForm;
pub use confirm_button::ConfirmButton;
pub use create_group_form::CreateGroup;
pub use group_browser::GroupBrowser;
pub use group_card::GroupCard;
pub use group_detail::GroupDetail;
pub use preference_picker::{PreferencePicker, TagGrid};
pub use status_badge::StatusBadge;
pub use transfer_station::TransferStation;
