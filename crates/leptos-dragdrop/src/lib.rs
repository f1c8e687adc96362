//! Leptos DragDrop Utilities
//!
//! HTML5 drag-and-drop for Leptos lists whose entries travel as a serialized
//! payload. A gesture is tracked by [`DragPhase`]; the Leptos handlers only
//! feed browser events into it, so the transitions are testable natively.

use leptos::prelude::*;
use web_sys::DragEvent;

/// MIME type the payload is stored under in the event's `DataTransfer`
pub const PAYLOAD_MIME: &str = "application/json";

/// Where a dragged payload was released
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Dropped onto a specific list entry
    Entry(String),
    /// Dropped onto the list's general surface
    Surface,
}

/// A completed drop: raw payload text plus its target
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Dropped {
    pub payload: String,
    pub target: DropTarget,
}

/// Per-gesture state
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum DragPhase {
    #[default]
    Idle,
    Dragging {
        /// Serialized copy of the source entry, captured at drag start
        payload: String,
        /// Entry under the pointer; only drives highlighting
        hovered: Option<String>,
    },
}

impl DragPhase {
    pub fn start(&mut self, payload: String) {
        *self = DragPhase::Dragging { payload, hovered: None };
    }

    /// Record the entry under the pointer.
    ///
    /// Only a gesture that started in this list is tracked. A payload dragged
    /// in from elsewhere leaves the phase `Idle`, so entries are not
    /// highlighted for it; dropping it on an entry is ignored anyway and it
    /// is added by dropping on the surface.
    pub fn hover(&mut self, entry_id: &str) {
        if let DragPhase::Dragging { hovered, .. } = self {
            if hovered.as_deref() != Some(entry_id) {
                *hovered = Some(entry_id.to_string());
            }
        }
    }

    pub fn leave(&mut self) {
        if let DragPhase::Dragging { hovered, .. } = self {
            *hovered = None;
        }
    }

    pub fn hovered(&self) -> Option<&str> {
        match self {
            DragPhase::Dragging { hovered, .. } => hovered.as_deref(),
            DragPhase::Idle => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragPhase::Dragging { .. })
    }

    /// Finish the gesture on a drop and return to `Idle`.
    ///
    /// `transferred` is the payload read from the drop event. It wins over the
    /// captured one because a drag may have started outside this list (in which
    /// case nothing was captured here).
    pub fn drop_on(&mut self, transferred: Option<String>, target: DropTarget) -> Option<Dropped> {
        let captured = match std::mem::take(self) {
            DragPhase::Dragging { payload, .. } => Some(payload),
            DragPhase::Idle => None,
        };
        transferred
            .filter(|p| !p.is_empty())
            .or(captured)
            .map(|payload| Dropped { payload, target })
    }

    /// Drag ended without a drop
    pub fn cancel(&mut self) {
        *self = DragPhase::Idle;
    }
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub phase_read: ReadSignal<DragPhase>,
    pub phase_write: WriteSignal<DragPhase>,
}

impl DndSignals {
    /// Reactive: is `entry_id` the current hover target?
    pub fn is_hovered(&self, entry_id: &str) -> bool {
        self.phase_read.with(|p| p.hovered() == Some(entry_id))
    }

    /// Reactive: is a gesture from this list in progress?
    pub fn is_dragging(&self) -> bool {
        self.phase_read.with(DragPhase::is_dragging)
    }
}

pub fn create_dnd_signals() -> DndSignals {
    let (phase_read, phase_write) = signal(DragPhase::Idle);
    DndSignals { phase_read, phase_write }
}

/// Payload carried by the event, if any
fn transferred_payload(ev: &DragEvent) -> Option<String> {
    ev.data_transfer()
        .and_then(|dt| dt.get_data(PAYLOAD_MIME).ok())
        .filter(|s| !s.is_empty())
}

/// Create dragstart handler for a draggable entry.
/// `payload` serializes the entry; `None` aborts the gesture.
pub fn make_on_dragstart<F>(dnd: DndSignals, payload: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn() -> Option<String> + Clone + 'static,
{
    move |ev: DragEvent| {
        let Some(body) = payload() else {
            ev.prevent_default();
            return;
        };
        if let Some(dt) = ev.data_transfer() {
            if dt.set_data(PAYLOAD_MIME, &body).is_err() {
                log::debug!("[DND] dataTransfer rejected payload");
            }
            dt.set_effect_allowed("move");
        }
        dnd.phase_write.update(|p| p.start(body));
    }
}

/// Create dragover handler for an entry (records hover target)
pub fn make_on_entry_dragover(dnd: DndSignals, entry_id: String) -> impl Fn(DragEvent) + Clone + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if dnd.phase_read.with_untracked(|p| p.hovered() != Some(entry_id.as_str())) {
            dnd.phase_write.update(|p| p.hover(&entry_id));
        }
    }
}

/// Create dragleave handler (clears hover target)
pub fn make_on_dragleave(dnd: DndSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        if dnd.phase_read.with_untracked(|p| p.hovered().is_some()) {
            dnd.phase_write.update(DragPhase::leave);
        }
    }
}

/// Create dragend handler for the source entry.
/// Fires after a drop too, by which point the phase is already `Idle`.
pub fn make_on_dragend(dnd: DndSignals) -> impl Fn(DragEvent) + Copy + 'static {
    move |_ev: DragEvent| {
        if dnd.phase_read.with_untracked(|p| *p != DragPhase::Idle) {
            dnd.phase_write.update(DragPhase::cancel);
        }
    }
}

/// Create drop handler for an entry. The event does not bubble to the surface.
pub fn make_on_entry_drop<F>(dnd: DndSignals, entry_id: String, on_drop: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(Dropped) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        let transferred = transferred_payload(&ev);
        let mut dropped = None;
        dnd.phase_write.update(|p| {
            dropped = p.drop_on(transferred, DropTarget::Entry(entry_id.clone()));
        });
        if let Some(d) = dropped {
            on_drop(d);
        }
    }
}

/// Create dragover handler for the list surface
pub fn make_on_surface_dragover() -> impl Fn(DragEvent) + Copy + 'static {
    move |ev: DragEvent| {
        ev.prevent_default();
        if let Some(dt) = ev.data_transfer() {
            dt.set_drop_effect("copy");
        }
    }
}

/// Create drop handler for the list surface
pub fn make_on_surface_drop<F>(dnd: DndSignals, on_drop: F) -> impl Fn(DragEvent) + Clone + 'static
where
    F: Fn(Dropped) + Clone + 'static,
{
    move |ev: DragEvent| {
        ev.prevent_default();
        let transferred = transferred_payload(&ev);
        let mut dropped = None;
        dnd.phase_write.update(|p| {
            dropped = p.drop_on(transferred, DropTarget::Surface);
        });
        match dropped {
            Some(d) => on_drop(d),
            None => log::debug!("[DND] drop without payload ignored"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragging(payload: &str) -> DragPhase {
        let mut p = DragPhase::default();
        p.start(payload.to_string());
        p
    }

    #[test]
    fn test_start_captures_payload() {
        let p = dragging(r#"{"id":"A1"}"#);
        assert!(p.is_dragging());
        assert_eq!(p.hovered(), None);
    }

    #[test]
    fn test_hover_and_leave() {
        let mut p = dragging("x");
        p.hover("A2");
        assert_eq!(p.hovered(), Some("A2"));
        p.hover("A3");
        assert_eq!(p.hovered(), Some("A3"));
        p.leave();
        assert_eq!(p.hovered(), None);
        assert!(p.is_dragging());
    }

    #[test]
    fn test_hover_ignored_when_idle() {
        let mut p = DragPhase::Idle;
        p.hover("A1");
        assert_eq!(p, DragPhase::Idle);
    }

    #[test]
    fn test_drop_returns_to_idle_and_clears_hover() {
        let mut p = dragging("captured");
        p.hover("A2");
        let d = p.drop_on(None, DropTarget::Entry("A2".into())).unwrap();
        assert_eq!(d.payload, "captured");
        assert_eq!(d.target, DropTarget::Entry("A2".into()));
        assert_eq!(p, DragPhase::Idle);
        assert_eq!(p.hovered(), None);
    }

    #[test]
    fn test_transferred_payload_wins() {
        let mut p = dragging("captured");
        let d = p.drop_on(Some("external".into()), DropTarget::Surface).unwrap();
        assert_eq!(d.payload, "external");
    }

    #[test]
    fn test_external_drop_while_idle() {
        let mut p = DragPhase::Idle;
        let d = p.drop_on(Some("external".into()), DropTarget::Surface);
        assert_eq!(d.map(|d| d.payload), Some("external".to_string()));
    }

    #[test]
    fn test_drop_without_any_payload() {
        let mut p = DragPhase::Idle;
        assert!(p.drop_on(Some(String::new()), DropTarget::Surface).is_none());
    }

    #[test]
    fn test_cancel_discards_payload() {
        let mut p = dragging("x");
        p.hover("A1");
        p.cancel();
        assert_eq!(p, DragPhase::Idle);
        assert!(p.drop_on(None, DropTarget::Surface).is_none());
    }
}
