//! Application Context
//!
//! Shared state provided via Leptos Context API: screen navigation, the
//! signed-in user, a reload trigger and the transfer station handle.

use chrono::Utc;
use leptos::prelude::*;

use crate::config::STAGING_SLOT;
use crate::drag_reorder::{resolve_drop, StagingCommand};
use crate::models::StagedItem;
use crate::staging::{browser_slot, StagingStore};

/// Which page the shell renders
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Browser,
    Detail(i64),
    Create,
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Trigger to re-fetch group lists - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to re-fetch group lists - write
    set_reload_trigger: WriteSignal<u32>,
    set_screen: WriteSignal<Screen>,
    /// Signed-in user, `None` until `/auth/status` answers
    pub current_user: ReadSignal<Option<i64>>,
    pub staging: StagingHandle,
}

impl AppContext {
    pub fn new(
        reload_trigger: (ReadSignal<u32>, WriteSignal<u32>),
        set_screen: WriteSignal<Screen>,
        current_user: ReadSignal<Option<i64>>,
        staging: StagingHandle,
    ) -> Self {
        Self {
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
            set_screen,
            current_user,
            staging,
        }
    }

    /// Trigger a reload of group lists
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }

    pub fn navigate(&self, screen: Screen) {
        log::debug!("[APP] navigate to {:?}", screen);
        self.set_screen.set(screen);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

// ========================
// Transfer Station Handle
// ========================

/// Owned staging store plus a reactive snapshot of its items.
///
/// The store holds a browser storage handle, so it lives in local (non-Send)
/// storage; components read the snapshot and mutate through the handle.
#[derive(Clone, Copy)]
pub struct StagingHandle {
    store: StoredValue<StagingStore, LocalStorage>,
    snapshot: RwSignal<Vec<StagedItem>>,
}

impl StagingHandle {
    pub fn new(store: StagingStore) -> Self {
        let snapshot = RwSignal::new(store.items().to_vec());
        Self {
            store: StoredValue::new_local(store),
            snapshot,
        }
    }

    /// Store backed by localStorage, or memory when it is unavailable
    pub fn open_browser() -> Self {
        Self::new(StagingStore::load(browser_slot(), STAGING_SLOT))
    }

    fn mutate(&self, op: impl FnOnce(&mut StagingStore) -> bool) -> bool {
        let changed = self.store.try_update_value(op).unwrap_or(false);
        if changed {
            let items = self.store.with_value(|s| s.items().to_vec());
            self.snapshot.set(items);
        }
        changed
    }

    pub fn items(&self) -> Signal<Vec<StagedItem>> {
        self.snapshot.into()
    }

    pub fn len(&self) -> usize {
        self.snapshot.with_untracked(Vec::len)
    }

    pub fn add(&self, item: StagedItem) -> bool {
        self.mutate(|s| s.add(item))
    }

    pub fn remove(&self, id: &str) -> bool {
        self.mutate(|s| s.remove(id))
    }

    pub fn reorder(&self, moved_id: &str, target_id: &str) -> bool {
        self.mutate(|s| s.reorder(moved_id, target_id))
    }

    pub fn clear(&self) -> bool {
        self.mutate(StagingStore::clear)
    }

    /// Resolve and apply a finished drop
    pub fn apply_drop(&self, dropped: leptos_dragdrop::Dropped) -> bool {
        let command = self
            .store
            .with_value(|s| resolve_drop(s.list(), dropped, Utc::now()));
        match command {
            Some(StagingCommand::Reorder { moved, target }) => self.reorder(&moved, &target),
            Some(StagingCommand::Add(item)) => self.add(item),
            None => false,
        }
    }
}
