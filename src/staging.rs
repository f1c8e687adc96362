//! Transfer Station Staging List
//!
//! Ordered, de-duplicated list of staged attractions with synchronous
//! write-through persistence. Storage sits behind [`SlotStorage`] so the list
//! runs the same against `localStorage` and an in-memory slot.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use gloo_storage::{LocalStorage, Storage};

use crate::error::StorageError;
use crate::models::StagedItem;

// ========================
// Storage Slots
// ========================

/// A named slot on the device holding the staged list as JSON
pub trait SlotStorage {
    /// Missing slot is an empty list
    fn load(&self, key: &str) -> Result<Vec<StagedItem>, StorageError>;
    fn save(&self, key: &str, items: &[StagedItem]) -> Result<(), StorageError>;
}

/// Browser `localStorage`
pub struct LocalStorageSlot;

impl LocalStorageSlot {
    /// `None` when the browser denies storage access
    pub fn open() -> Option<Self> {
        web_sys::window()?.local_storage().ok().flatten()?;
        Some(Self)
    }
}

impl SlotStorage for LocalStorageSlot {
    fn load(&self, key: &str) -> Result<Vec<StagedItem>, StorageError> {
        match LocalStorage::get::<Vec<StagedItem>>(key) {
            Ok(items) => Ok(items),
            Err(gloo_storage::errors::StorageError::KeyNotFound(_)) => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, key: &str, items: &[StagedItem]) -> Result<(), StorageError> {
        LocalStorage::set(key, items).map_err(StorageError::from)
    }
}

/// In-memory slot keeping the same JSON text; clones share the same map
#[derive(Clone, Default)]
pub struct MemorySlot {
    slots: Rc<RefCell<HashMap<String, String>>>,
}

impl MemorySlot {
    pub fn raw(&self, key: &str) -> Option<String> {
        self.slots.borrow().get(key).cloned()
    }

    pub fn put_raw(&self, key: &str, value: &str) {
        self.slots.borrow_mut().insert(key.to_string(), value.to_string());
    }
}

impl SlotStorage for MemorySlot {
    fn load(&self, key: &str) -> Result<Vec<StagedItem>, StorageError> {
        match self.raw(key) {
            Some(text) => serde_json::from_str(&text).map_err(|e| StorageError::Malformed(e.to_string())),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, key: &str, items: &[StagedItem]) -> Result<(), StorageError> {
        let text = serde_json::to_string(items).map_err(|e| StorageError::Serialize(e.to_string()))?;
        self.put_raw(key, &text);
        Ok(())
    }
}

/// `localStorage` when available, memory otherwise
pub fn browser_slot() -> Box<dyn SlotStorage> {
    match LocalStorageSlot::open() {
        Some(slot) => Box::new(slot),
        None => {
            log::warn!("[STAGING] localStorage unavailable, transfer station will not survive reloads");
            Box::new(MemorySlot::default())
        }
    }
}

// ========================
// Staging List
// ========================

/// Pure list operations; each returns whether the list changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StagingList {
    items: Vec<StagedItem>,
}

impl StagingList {
    /// Older slots may hold repeats; first one wins.
    pub fn from_items(items: Vec<StagedItem>) -> Self {
        let mut list = Self::default();
        for item in items {
            list.add(item);
        }
        list
    }

    pub fn items(&self) -> &[StagedItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|i| i.id == id)
    }

    pub fn add(&mut self, item: StagedItem) -> bool {
        if self.contains(&item.id) {
            return false;
        }
        self.items.push(item);
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        match self.position(id) {
            Some(idx) => {
                self.items.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Move `moved_id` into the slot currently held by `target_id`
    pub fn reorder(&mut self, moved_id: &str, target_id: &str) -> bool {
        if moved_id == target_id {
            return false;
        }
        let (Some(from), Some(to)) = (self.position(moved_id), self.position(target_id)) else {
            return false;
        };
        let item = self.items.remove(from);
        self.items.insert(to, item);
        true
    }

    pub fn clear(&mut self) -> bool {
        if self.is_empty() {
            return false;
        }
        self.items.clear();
        true
    }
}

// ========================
// Persistent Store
// ========================

/// Staging list bound to a storage slot
pub struct StagingStore {
    slot: Box<dyn SlotStorage>,
    key: String,
    list: StagingList,
}

impl StagingStore {
    /// Load from `key`; malformed or missing data starts empty
    pub fn load(slot: Box<dyn SlotStorage>, key: &str) -> Self {
        let items = slot.load(key).unwrap_or_else(|e| {
            log::debug!("[STAGING] discarding unreadable slot: {}", e);
            Vec::new()
        });
        let list = StagingList::from_items(items);
        log::info!("[STAGING] loaded {} staged attractions", list.len());
        Self { slot, key: key.to_string(), list }
    }

    pub fn list(&self) -> &StagingList {
        &self.list
    }

    pub fn items(&self) -> &[StagedItem] {
        self.list.items()
    }

    pub fn add(&mut self, item: StagedItem) -> bool {
        let changed = self.list.add(item);
        self.persist_if(changed)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let changed = self.list.remove(id);
        self.persist_if(changed)
    }

    pub fn reorder(&mut self, moved_id: &str, target_id: &str) -> bool {
        let changed = self.list.reorder(moved_id, target_id);
        self.persist_if(changed)
    }

    /// Caller obtains the user's confirmation first
    pub fn clear(&mut self) -> bool {
        let changed = self.list.clear();
        self.persist_if(changed)
    }

    fn persist_if(&self, changed: bool) -> bool {
        if changed {
            if let Err(e) = self.slot.save(&self.key, self.list.items()) {
                log::warn!("[STAGING] persist failed, keeping in-memory list: {}", e);
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::STAGING_SLOT;
    use chrono::{DateTime, Utc};

    fn at(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000 + secs, 0).unwrap()
    }

    fn item(id: &str, name: &str) -> StagedItem {
        StagedItem {
            id: id.to_string(),
            name: name.to_string(),
            description: format!("{} description", name),
            category: "landmark".to_string(),
            image_url: String::new(),
            join_count: 0,
            longitude: Some(116.39),
            latitude: Some(39.9),
            destination_id: Some("11".to_string()),
            destination_name: Some("Beijing".to_string()),
            staged_at: at(0),
        }
    }

    fn ids(store: &StagingStore) -> Vec<&str> {
        store.items().iter().map(|i| i.id.as_str()).collect()
    }

    fn fresh() -> (MemorySlot, StagingStore) {
        let slot = MemorySlot::default();
        let store = StagingStore::load(Box::new(slot.clone()), STAGING_SLOT);
        (slot, store)
    }

    #[test]
    fn test_walkthrough() {
        let (_, mut store) = fresh();
        assert!(store.add(item("A1", "Tower")));
        assert_eq!(ids(&store), vec!["A1"]);
        assert!(!store.add(item("A1", "Tower")));
        assert_eq!(store.items().len(), 1);
        assert!(store.add(item("A2", "Gate")));
        assert_eq!(ids(&store), vec!["A1", "A2"]);
        assert!(store.reorder("A2", "A1"));
        assert_eq!(ids(&store), vec!["A2", "A1"]);
        assert!(store.remove("A1"));
        assert_eq!(ids(&store), vec!["A2"]);
        assert!(store.clear());
        assert!(store.items().is_empty());
    }

    #[test]
    fn test_duplicate_add_keeps_first_fields() {
        let (_, mut store) = fresh();
        store.add(item("A1", "Tower"));
        store.add(item("A1", "Renamed"));
        assert_eq!(store.items()[0].name, "Tower");
    }

    #[test]
    fn test_ids_stay_unique() {
        let (_, mut store) = fresh();
        for id in ["A1", "A2", "A1", "A3", "A2", "A1"] {
            store.add(item(id, id));
        }
        assert_eq!(ids(&store), vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_adjacent_swap_is_self_inverse() {
        let (_, mut store) = fresh();
        for id in ["A1", "A2", "A3"] {
            store.add(item(id, id));
        }
        store.reorder("A2", "A3");
        assert_eq!(ids(&store), vec!["A1", "A3", "A2"]);
        store.reorder("A3", "A2");
        assert_eq!(ids(&store), vec!["A1", "A2", "A3"]);
    }

    #[test]
    fn test_reorder_moves_into_target_slot() {
        let (_, mut store) = fresh();
        for id in ["A", "B", "C", "D"] {
            store.add(item(id, id));
        }
        store.reorder("A", "C");
        assert_eq!(ids(&store), vec!["B", "C", "A", "D"]);
        store.reorder("D", "B");
        assert_eq!(ids(&store), vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_reorder_noops() {
        let (_, mut store) = fresh();
        store.add(item("A1", "a"));
        store.add(item("A2", "b"));
        assert!(!store.reorder("A1", "A1"));
        assert!(!store.reorder("A1", "missing"));
        assert!(!store.reorder("missing", "A1"));
        assert_eq!(ids(&store), vec!["A1", "A2"]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let (slot, mut store) = fresh();
        assert!(!store.remove("A1"));
        store.add(item("A1", "a"));
        assert!(!store.remove("zzz"));
        assert_eq!(ids(&store), vec!["A1"]);
        assert!(slot.raw(STAGING_SLOT).is_some());
    }

    #[test]
    fn test_clear_any_size() {
        let (slot, mut store) = fresh();
        assert!(!store.clear());
        assert!(store.list().is_empty());
        for n in 0..25 {
            store.add(item(&format!("A{}", n), "x"));
        }
        store.clear();
        assert!(store.items().is_empty());
        let reloaded = StagingStore::load(Box::new(slot), STAGING_SLOT);
        assert!(reloaded.items().is_empty());
    }

    #[test]
    fn test_write_through_round_trip() {
        let (slot, mut store) = fresh();
        let mut a = item("A1", "Tower");
        a.staged_at = at(5);
        store.add(a);
        store.add(item("A2", "Gate"));
        store.reorder("A2", "A1");
        let reloaded = StagingStore::load(Box::new(slot.clone()), STAGING_SLOT);
        assert_eq!(reloaded.list(), store.list());
        assert_eq!(
            StagingList::from_items(slot.load(STAGING_SLOT).unwrap()),
            store.list().clone()
        );
    }

    #[test]
    fn test_corrupted_slot_loads_empty() {
        for raw in ["{not json", "{\"id\":1}", "[{\"name\":\"no id\"}]", ""] {
            let slot = MemorySlot::default();
            slot.put_raw(STAGING_SLOT, raw);
            let store = StagingStore::load(Box::new(slot), STAGING_SLOT);
            assert!(store.items().is_empty(), "{raw:?} should load empty");
        }
    }

    #[test]
    fn test_legacy_slot_with_numeric_ids() {
        let slot = MemorySlot::default();
        slot.put_raw(
            STAGING_SLOT,
            r#"[{"id":42,"name":"Erhai","description":"","category":"lake","imageUrl":"",
                "joinCount":9,"longitude":100.2,"latitude":25.6,"destinationId":11,
                "destinationName":"Dali","addedAt":"2025-05-01T08:00:00.000Z"},
               {"id":42,"name":"dup","addedAt":"2025-05-01T08:00:00.000Z"}]"#,
        );
        let store = StagingStore::load(Box::new(slot), STAGING_SLOT);
        assert_eq!(ids(&store), vec!["42"]);
        assert_eq!(store.items()[0].destination_id.as_deref(), Some("11"));
    }

    struct FailingSlot;

    impl SlotStorage for FailingSlot {
        fn load(&self, _key: &str) -> Result<Vec<StagedItem>, StorageError> {
            Ok(Vec::new())
        }
        fn save(&self, _key: &str, _items: &[StagedItem]) -> Result<(), StorageError> {
            Err(StorageError::Write("quota exceeded".into()))
        }
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let mut store = StagingStore::load(Box::new(FailingSlot), STAGING_SLOT);
        assert!(store.add(item("A1", "a")));
        assert_eq!(ids(&store), vec!["A1"]);
    }
}
