//! Drag-Reorder Resolution
//!
//! Maps a finished drop onto a staging list operation.

use chrono::{DateTime, Utc};
use leptos_dragdrop::{DropTarget, Dropped};

use crate::models::{AttractionPayload, StagedItem};
use crate::staging::StagingList;

/// Operation a drop asks of the staging list
#[derive(Debug, Clone, PartialEq)]
pub enum StagingCommand {
    Reorder { moved: String, target: String },
    Add(StagedItem),
}

/// Decide what a drop does.
///
/// - entry target, payload already staged: reorder
/// - entry target, payload not staged: ignored (only the surface inserts)
/// - surface target: add (the list itself drops duplicates)
/// - unparsable payload: ignored
pub fn resolve_drop(list: &StagingList, dropped: Dropped, now: DateTime<Utc>) -> Option<StagingCommand> {
    let payload = match serde_json::from_str::<AttractionPayload>(&dropped.payload) {
        Ok(p) if !p.id.trim().is_empty() => p,
        Ok(_) => {
            log::debug!("[DND] payload without id ignored");
            return None;
        }
        Err(e) => {
            log::debug!("[DND] malformed payload ignored: {}", e);
            return None;
        }
    };

    match dropped.target {
        DropTarget::Entry(target) => {
            if list.contains(&payload.id) {
                Some(StagingCommand::Reorder { moved: payload.id, target })
            } else {
                log::debug!("[DND] foreign attraction {} dropped on entry {}, ignored", payload.id, target);
                None
            }
        }
        DropTarget::Surface => Some(StagingCommand::Add(payload.into_staged(now))),
    }
}

/// Serialize a staged entry as a drag payload
pub fn encode_payload(item: &StagedItem) -> Option<String> {
    serde_json::to_string(item).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    fn list_of(ids: &[&str]) -> StagingList {
        let mut list = StagingList::default();
        for id in ids {
            let payload = AttractionPayload {
                id: id.to_string(),
                name: id.to_string(),
                description: String::new(),
                category: String::new(),
                image_url: String::new(),
                join_count: 0,
                longitude: None,
                latitude: None,
                destination_id: None,
                destination_name: None,
            };
            list.add(payload.into_staged(now()));
        }
        list
    }

    fn drop_on(payload: &str, target: DropTarget) -> Dropped {
        Dropped { payload: payload.to_string(), target }
    }

    #[test]
    fn test_staged_payload_on_entry_reorders() {
        let list = list_of(&["A1", "A2"]);
        let payload = encode_payload(&list.items()[1]).unwrap();
        let cmd = resolve_drop(&list, drop_on(&payload, DropTarget::Entry("A1".into())), now());
        assert_eq!(cmd, Some(StagingCommand::Reorder { moved: "A2".into(), target: "A1".into() }));
    }

    #[test]
    fn test_foreign_payload_on_entry_ignored() {
        let list = list_of(&["A1"]);
        let cmd = resolve_drop(&list, drop_on(r#"{"id":99,"name":"Lake"}"#, DropTarget::Entry("A1".into())), now());
        assert_eq!(cmd, None);
    }

    #[test]
    fn test_surface_drop_adds_with_timestamp() {
        let list = list_of(&[]);
        let cmd = resolve_drop(&list, drop_on(r#"{"id":99,"name":"Lake","category":"nature"}"#, DropTarget::Surface), now());
        match cmd {
            Some(StagingCommand::Add(item)) => {
                assert_eq!(item.id, "99");
                assert_eq!(item.category, "nature");
                assert_eq!(item.staged_at, now());
            }
            other => panic!("expected add, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_payload_ignored() {
        let list = list_of(&["A1"]);
        for raw in ["", "not json", "{\"name\":\"no id\"}", "{\"id\":\"  \"}", "[1,2]"] {
            assert_eq!(resolve_drop(&list, drop_on(raw, DropTarget::Surface), now()), None, "{raw:?}");
            assert_eq!(resolve_drop(&list, drop_on(raw, DropTarget::Entry("A1".into())), now()), None);
        }
    }

    #[test]
    fn test_applying_resolved_commands() {
        let mut list = list_of(&["A1", "A2"]);
        let payload = encode_payload(&list.items()[1]).unwrap();
        if let Some(StagingCommand::Reorder { moved, target }) =
            resolve_drop(&list, drop_on(&payload, DropTarget::Entry("A1".into())), now())
        {
            list.reorder(&moved, &target);
        }
        let ids: Vec<&str> = list.items().iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["A2", "A1"]);

        // Re-dropping a staged entry on the surface changes nothing.
        if let Some(StagingCommand::Add(item)) = resolve_drop(&list, drop_on(&payload, DropTarget::Surface), now()) {
            assert!(!list.add(item));
        }
        assert_eq!(list.len(), 2);
    }
}
