//! Group Browser State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use leptos::prelude::*;
use reactive_stores::Store;

use crate::forms::SearchQuery;
use crate::membership::MyGroup;
use crate::models::TravelGroup;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BrowserTab {
    #[default]
    Discover,
    Recommendations,
    MyGroups,
}

impl BrowserTab {
    pub const ALL: [BrowserTab; 3] = [Self::Discover, Self::Recommendations, Self::MyGroups];

    pub fn label(self) -> &'static str {
        match self {
            Self::Discover => "Discover",
            Self::Recommendations => "For you",
            Self::MyGroups => "My groups",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::Discover => "No public groups match right now",
            Self::Recommendations => "No recommendations yet, try other preferences",
            Self::MyGroups => "You have not created or joined any group yet",
        }
    }
}

/// Group browser state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct BrowserState {
    pub active_tab: BrowserTab,
    /// Discover tab results
    pub discover: Vec<TravelGroup>,
    pub recommendations: Vec<TravelGroup>,
    pub my_groups: Vec<MyGroup>,
    pub search: SearchQuery,
    /// Last confirmed preference tags
    pub preferences: Vec<String>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Type alias for the store
pub type BrowserStore = Store<BrowserState>;

/// Get the browser store from context
pub fn use_browser_store() -> BrowserStore {
    expect_context::<BrowserStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Groups the active tab shows, with their role on the my-groups tab
pub fn store_visible_groups(store: &BrowserStore) -> Vec<(TravelGroup, Option<crate::membership::GroupRole>)> {
    match store.active_tab().get() {
        BrowserTab::Discover => store.discover().get().into_iter().map(|g| (g, None)).collect(),
        BrowserTab::Recommendations => store.recommendations().get().into_iter().map(|g| (g, None)).collect(),
        BrowserTab::MyGroups => store
            .my_groups()
            .get()
            .into_iter()
            .map(|m| (m.group, Some(m.role)))
            .collect(),
    }
}

pub fn store_begin_load(store: &BrowserStore) {
    store.loading().set(true);
    store.error().set(None);
}

pub fn store_fail_load(store: &BrowserStore, message: String) {
    store.error().set(Some(message));
    store.loading().set(false);
}
