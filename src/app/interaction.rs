//! Hover and sticky selection shared by every region of one visualization.
//!
//! Regions never hold their own copy of this state. They ask
//! [`SelectionState::visual`] how a marker should look and forward pointer
//! events to the [`InteractionMachine`], which is the only writer.

pub(super) const EXPANDED_SCALE: f32 = 1.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(super) struct RegionId(pub(super) usize);

/// One rendered instance of an item. The same item id can appear in several
/// regions at once.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(super) struct MarkerKey {
    pub(super) region: RegionId,
    pub(super) item_id: String,
}

impl MarkerKey {
    pub(super) fn new(region: RegionId, item_id: &str) -> Self {
        Self {
            region,
            item_id: item_id.to_owned(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum InteractionPhase<'a> {
    Idle,
    Hovering(&'a str),
    Sticky(&'a str),
}

/// Draw layer of a marker; later variants paint on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(super) enum PaintOrder {
    Base,
    Sticky,
    Hovered,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct MarkerVisual {
    pub(super) expanded: bool,
    pub(super) order: PaintOrder,
}

impl MarkerVisual {
    pub(super) fn scale(self) -> f32 {
        if self.expanded { EXPANDED_SCALE } else { 1.0 }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct SelectionState {
    hovered: Option<MarkerKey>,
    sticky: Option<String>,
}

impl SelectionState {
    pub(super) fn hovered(&self) -> Option<&MarkerKey> {
        self.hovered.as_ref()
    }

    pub(super) fn hovered_id(&self) -> Option<&str> {
        self.hovered.as_ref().map(|key| key.item_id.as_str())
    }

    pub(super) fn sticky_id(&self) -> Option<&str> {
        self.sticky.as_deref()
    }

    pub(super) fn phase(&self) -> InteractionPhase<'_> {
        match (self.sticky_id(), self.hovered_id()) {
            (Some(sticky), _) => InteractionPhase::Sticky(sticky),
            (None, Some(hovered)) => InteractionPhase::Hovering(hovered),
            (None, None) => InteractionPhase::Idle,
        }
    }

    pub(super) fn visual(&self, region: RegionId, item_id: &str) -> MarkerVisual {
        let is_hovered = self
            .hovered
            .as_ref()
            .is_some_and(|key| key.region == region && key.item_id == item_id);
        let is_sticky = self.sticky_id() == Some(item_id);

        let order = if is_hovered {
            PaintOrder::Hovered
        } else if is_sticky {
            PaintOrder::Sticky
        } else {
            PaintOrder::Base
        };

        MarkerVisual {
            expanded: is_hovered || is_sticky,
            order,
        }
    }
}

/// Receives the selected item id, or `""` when nothing is selected.
pub(super) type SelectionCallback = Box<dyn FnMut(&str)>;

pub(super) struct InteractionMachine {
    state: SelectionState,
    on_hover: SelectionCallback,
}

impl InteractionMachine {
    pub(super) fn new(on_hover: SelectionCallback) -> Self {
        Self {
            state: SelectionState::default(),
            on_hover,
        }
    }

    pub(super) fn state(&self) -> &SelectionState {
        &self.state
    }

    fn notify(&mut self, item_id: &str) {
        tracing::trace!(item_id, "selection callback");
        (self.on_hover)(item_id);
    }

    pub(super) fn pointer_enter(&mut self, key: MarkerKey) {
        if self.state.hovered.as_ref() == Some(&key) {
            return;
        }

        let notify = self.state.sticky.is_none();
        let item_id = key.item_id.clone();
        self.state.hovered = Some(key);
        if notify {
            self.notify(&item_id);
        }
    }

    pub(super) fn pointer_leave(&mut self, key: &MarkerKey) {
        if self.state.hovered.as_ref() != Some(key) {
            return;
        }

        self.state.hovered = None;
        if self.state.sticky.is_none() {
            self.notify("");
        }
    }

    /// Feeds the marker under the pointer for this frame and emits the
    /// leave/enter pair when it changed.
    pub(super) fn track_pointer(&mut self, hit: Option<MarkerKey>) {
        if self.state.hovered == hit {
            return;
        }

        if let Some(previous) = self.state.hovered.clone() {
            self.pointer_leave(&previous);
        }
        if let Some(next) = hit {
            self.pointer_enter(next);
        }
    }

    pub(super) fn click(&mut self, key: MarkerKey) {
        if self.state.sticky.as_deref() == Some(key.item_id.as_str()) {
            self.state.sticky = None;
            let item_id = key.item_id.clone();
            self.state.hovered = Some(key);
            self.notify(&item_id);
            return;
        }

        let item_id = key.item_id.clone();
        self.state.sticky = Some(item_id.clone());
        self.state.hovered = Some(key);
        self.notify(&item_id);
    }

    pub(super) fn background_click(&mut self) {
        if self.state.sticky.take().is_some() {
            self.notify("");
        }
    }

    pub(super) fn reset(&mut self) {
        let was_active = self.state.phase() != InteractionPhase::Idle;
        self.state = SelectionState::default();
        if was_active {
            self.notify("");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;

    fn recording_machine() -> (InteractionMachine, Rc<RefCell<Vec<String>>>) {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&calls);
        let machine = InteractionMachine::new(Box::new(move |id: &str| {
            sink.borrow_mut().push(id.to_owned());
        }));
        (machine, calls)
    }

    fn key(region: usize, id: &str) -> MarkerKey {
        MarkerKey::new(RegionId(region), id)
    }

    #[test]
    fn hover_enter_and_leave_notify_when_nothing_is_sticky() {
        let (mut machine, calls) = recording_machine();

        machine.pointer_enter(key(0, "a"));
        assert_eq!(machine.state().phase(), InteractionPhase::Hovering("a"));
        machine.pointer_leave(&key(0, "a"));
        assert_eq!(machine.state().phase(), InteractionPhase::Idle);

        assert_eq!(*calls.borrow(), ["a", ""]);
    }

    #[test]
    fn sticky_selection_wins_over_later_hovers() {
        let (mut machine, calls) = recording_machine();

        machine.track_pointer(Some(key(0, "a")));
        machine.click(key(0, "a"));
        machine.track_pointer(Some(key(0, "b")));
        assert_eq!(machine.state().phase(), InteractionPhase::Sticky("a"));
        machine.track_pointer(None);

        assert_eq!(machine.state().phase(), InteractionPhase::Sticky("a"));
        assert_eq!(calls.borrow().last().map(String::as_str), Some("a"));
        assert!(
            calls.borrow().iter().skip(1).all(|id| id == "a"),
            "callback must stay on the sticky item: {:?}",
            calls.borrow()
        );
    }

    #[test]
    fn hovered_marker_expands_while_sticky_stays_expanded() {
        let (mut machine, _calls) = recording_machine();

        machine.click(key(0, "a"));
        machine.track_pointer(Some(key(0, "b")));

        let a = machine.state().visual(RegionId(0), "a");
        let b = machine.state().visual(RegionId(0), "b");
        assert!(a.expanded && b.expanded);
        assert_eq!(a.order, PaintOrder::Sticky);
        assert_eq!(b.order, PaintOrder::Hovered);

        machine.track_pointer(None);
        let b = machine.state().visual(RegionId(0), "b");
        assert!(!b.expanded);
        assert_eq!(b.order, PaintOrder::Base);
        assert!(machine.state().visual(RegionId(0), "a").expanded);
    }

    #[test]
    fn clicking_the_sticky_item_releases_it() {
        let (mut machine, calls) = recording_machine();

        machine.click(key(0, "a"));
        machine.click(key(0, "a"));
        assert_eq!(machine.state().phase(), InteractionPhase::Hovering("a"));

        machine.track_pointer(None);
        assert_eq!(machine.state().phase(), InteractionPhase::Idle);
        assert_eq!(*calls.borrow(), ["a", "a", ""]);
    }

    #[test]
    fn clicking_another_item_moves_the_sticky_selection() {
        let (mut machine, calls) = recording_machine();

        machine.click(key(0, "a"));
        machine.click(key(1, "b"));

        assert_eq!(machine.state().sticky_id(), Some("b"));
        assert!(!machine.state().visual(RegionId(0), "a").expanded);
        assert_eq!(*calls.borrow(), ["a", "b"]);
    }

    #[test]
    fn sticky_applies_to_every_instance_of_the_item() {
        let (mut machine, _calls) = recording_machine();

        machine.click(key(0, "x"));
        machine.track_pointer(None);

        let other_region = machine.state().visual(RegionId(1), "x");
        assert!(other_region.expanded);
        assert_eq!(other_region.order, PaintOrder::Sticky);

        machine.track_pointer(Some(key(1, "x")));
        assert_eq!(
            machine.state().visual(RegionId(1), "x").order,
            PaintOrder::Hovered
        );
        assert_eq!(
            machine.state().visual(RegionId(0), "x").order,
            PaintOrder::Sticky
        );
    }

    #[test]
    fn background_click_clears_sticky_only() {
        let (mut machine, calls) = recording_machine();

        machine.background_click();
        assert!(calls.borrow().is_empty());

        machine.click(key(0, "a"));
        machine.track_pointer(None);
        machine.background_click();
        assert_eq!(machine.state().phase(), InteractionPhase::Idle);
        assert!(!machine.state().visual(RegionId(0), "a").expanded);
        assert_eq!(*calls.borrow(), ["a", ""]);
    }

    #[test]
    fn reset_clears_everything() {
        let (mut machine, calls) = recording_machine();

        machine.reset();
        assert!(calls.borrow().is_empty());

        machine.click(key(0, "a"));
        machine.reset();
        assert_eq!(*machine.state(), SelectionState::default());
        assert_eq!(*calls.borrow(), ["a", ""]);
    }

    #[test]
    fn repeated_pointer_samples_do_not_renotify() {
        let (mut machine, calls) = recording_machine();

        machine.track_pointer(Some(key(0, "a")));
        machine.track_pointer(Some(key(0, "a")));
        machine.track_pointer(Some(key(0, "b")));

        assert_eq!(*calls.borrow(), ["a", "", "b"]);
    }
}
