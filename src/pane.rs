use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use tracing::debug;

use crate::content::ContentId;
use crate::error::{DockError, Result};
use crate::geometry::Rect;
use crate::panel::{ContainerRef, DockPanel, DockZone};
use crate::state::{DockAlignment, DockState};

new_key_type! {
    pub struct PaneId;
}

/// A pane's position in its container's nested-split tree: the anchor pane
/// whose region it was carved from, which side it took, and how much.
/// `logical_bounds` is the anchor's pre-split region from the last layout
/// pass; the splitter engine divides pixel offsets by its extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NestedDockingStatus {
    pub previous_pane: Option<PaneId>,
    pub alignment: DockAlignment,
    pub proportion: f64,
    #[serde(skip)]
    pub logical_bounds: Rect,
}

impl Default for NestedDockingStatus {
    fn default() -> Self {
        Self {
            previous_pane: None,
            alignment: DockAlignment::default(),
            proportion: 0.5,
            logical_bounds: Rect::ZERO,
        }
    }
}

/// A tabbed group of content units sharing one region. Every content in a
/// pane carries the pane's dock state.
#[derive(Debug, Clone)]
pub struct Pane {
    pub dock_state: DockState,
    pub contents: Vec<ContentId>,
    pub active_content: Option<ContentId>,
    pub nested: NestedDockingStatus,
    pub bounds: Rect,
    pub is_activated: bool,
}

impl Pane {
    pub fn new(dock_state: DockState) -> Self {
        Self {
            dock_state,
            contents: Vec::new(),
            active_content: None,
            nested: NestedDockingStatus::default(),
            bounds: Rect::ZERO,
            is_activated: false,
        }
    }

    pub fn is_float(&self) -> bool {
        self.dock_state == DockState::Float
    }

    pub fn is_auto_hide(&self) -> bool {
        self.dock_state.is_auto_hide()
    }

    pub fn index_of(&self, content: ContentId) -> Option<usize> {
        self.contents.iter().position(|&c| c == content)
    }
}

impl DockPanel {
    /// Number of contents in `pane` that are not hidden.
    pub fn pane_displaying_count(&self, pane: PaneId) -> usize {
        self.panes[pane]
            .contents
            .iter()
            .filter(|&&c| !self.contents[c].is_hidden)
            .count()
    }

    pub fn pane_is_hidden(&self, pane: PaneId) -> bool {
        self.pane_displaying_count(pane) == 0
    }

    /// Move `content` to position `index` within its pane's tab order.
    /// `-1` appends. Out-of-range indices are refused.
    pub fn set_content_index(&mut self, content: ContentId, index: isize) -> Result<()> {
        let pane = self
            .contents
            .get(content)
            .and_then(|h| h.pane())
            .ok_or(DockError::NullContainer)?;
        let contents = &mut self.panes[pane].contents;
        let old = contents
            .iter()
            .position(|&c| c == content)
            .ok_or(DockError::InvalidPaneReference)?;

        let new = if index == -1 {
            contents.len() - 1
        } else if index < 0 || index as usize >= contents.len() {
            return Err(DockError::InvalidContentIndex(index));
        } else {
            index as usize
        };

        if new != old {
            contents.remove(old);
            contents.insert(new, content);
        }
        Ok(())
    }

    /// Re-tag `pane` with a new dock state, moving it between containers
    /// when the zone changes and syncing every member content's handler.
    pub fn pane_set_dock_state(&mut self, pane: PaneId, state: DockState) -> Result<()> {
        self.pane_set_dock_state_to(pane, state, None)
    }

    /// Like `pane_set_dock_state`, but with an explicit destination
    /// container (a drop commit already knows the float window or zone).
    pub(crate) fn pane_set_dock_state_to(
        &mut self,
        pane: PaneId,
        state: DockState,
        destination: Option<ContainerRef>,
    ) -> Result<()> {
        let old_state = self
            .panes
            .get(pane)
            .ok_or(DockError::InvalidPaneReference)?
            .dock_state;
        if old_state == state {
            // Same state, possibly a different container of the same kind.
            if let Some(destination) = destination
                && self.container_of(pane) != Some(destination)
            {
                self.suspend_layout();
                let result = self.dock_pane_to(pane, destination);
                self.resume_layout(true);
                return result;
            }
            return Ok(());
        }
        if matches!(state, DockState::Unknown | DockState::Hidden) {
            return Err(DockError::InvalidStateTransition(state));
        }

        self.suspend_layout();
        debug!(?pane, ?old_state, ?state, "pane dock state change");
        let result = self.pane_retag_body(pane, old_state, state, destination);
        self.resume_layout(true);
        result
    }

    fn pane_retag_body(
        &mut self,
        pane: PaneId,
        old_state: DockState,
        state: DockState,
        destination: Option<ContainerRef>,
    ) -> Result<()> {
        let same_zone = old_state.side().is_some() && old_state.side() == state.side();

        if same_zone && destination.is_none() && old_state.is_auto_hide() != state.is_auto_hide() {
            // Toggling auto-hide keeps the pane in its zone but vacates its
            // anchor role so the visible tree stays closed.
            let zone = DockZone::of(state).ok_or(DockError::InvalidStateTransition(state))?;
            self.panes[pane].dock_state = state;
            let (collection, arena) = self.zone_collection_mut(zone);
            collection.switch_pane_with_first_child(arena, pane);
        } else {
            self.detach_pane_from_container(pane);
            self.panes[pane].dock_state = state;
            let target = match destination {
                Some(destination) => destination,
                None if state == DockState::Float => {
                    ContainerRef::Float(self.create_float_window(None))
                }
                None => {
                    let zone =
                        DockZone::of(state).ok_or(DockError::InvalidStateTransition(state))?;
                    ContainerRef::Zone(zone)
                }
            };
            self.dock_pane_to(pane, target)?;
        }

        let is_float = state == DockState::Float;
        for content in self.panes[pane].contents.clone() {
            {
                // Keep the dual slots on the pane's side of the family line.
                let handler = &mut self.contents[content];
                handler.is_float = is_float;
                if is_float {
                    handler.float_pane = Some(pane);
                    handler.panel_pane = None;
                } else {
                    handler.panel_pane = Some(pane);
                    handler.float_pane = None;
                }
            }
            let is_hidden = self.contents[content].is_hidden;
            self.set_dock_state_inner(content, is_hidden, state, Some(pane))?;
        }
        Ok(())
    }

    /// Attach `pane` to `container` at the default position: anchored to the
    /// container's last pane, aligned per the container kind, half split.
    pub fn dock_pane_to(&mut self, pane: PaneId, container: ContainerRef) -> Result<()> {
        let alignment = match container {
            ContainerRef::Zone(DockZone::Left) | ContainerRef::Zone(DockZone::Right) => {
                DockAlignment::Bottom
            }
            _ => DockAlignment::Right,
        };
        let previous = self
            .container_collection(container)
            .ok_or(DockError::InvalidPaneReference)?
            .default_previous_pane(Some(pane));
        match previous {
            Some(previous) => self.dock_pane_nested(pane, container, previous, alignment, 0.5),
            None => self.dock_pane_root(pane, container),
        }
    }

    pub fn dock_pane_root(&mut self, pane: PaneId, container: ContainerRef) -> Result<()> {
        self.detach_pane_from_container(pane);
        self.retarget_pane(pane, container)?;
        let (collection, arena) = self.container_collection_mut(container)?;
        collection.add_root(arena, pane);
        self.request_layout();
        Ok(())
    }

    /// Attach `pane` next to `previous` inside `container`. `previous` must
    /// already be a member of that container.
    pub fn dock_pane_nested(
        &mut self,
        pane: PaneId,
        container: ContainerRef,
        previous: PaneId,
        alignment: DockAlignment,
        proportion: f64,
    ) -> Result<()> {
        if !(0.0..=1.0).contains(&proportion) || proportion <= 0.0 {
            return Err(DockError::InvalidPortion(proportion));
        }
        if !self
            .container_collection(container)
            .ok_or(DockError::InvalidPaneReference)?
            .contains(previous)
        {
            return Err(DockError::InvalidPaneReference);
        }
        self.detach_pane_from_container(pane);
        self.retarget_pane(pane, container)?;
        let (collection, arena) = self.container_collection_mut(container)?;
        collection.add_nested(arena, pane, previous, alignment, proportion);
        self.request_layout();
        Ok(())
    }

    /// Align the pane's dock state and float-window link with its new
    /// container before insertion.
    fn retarget_pane(&mut self, pane: PaneId, container: ContainerRef) -> Result<()> {
        match container {
            ContainerRef::Zone(zone) => {
                // Keep an auto-hide variant when the pane stays in its zone.
                if DockZone::of(self.panes[pane].dock_state) != Some(zone) {
                    self.panes[pane].dock_state = zone.pinned_state();
                }
                self.pane_float_windows.remove(pane);
            }
            ContainerRef::Float(window) => {
                if !self.float_windows.contains_key(window) {
                    return Err(DockError::InvalidPaneReference);
                }
                self.panes[pane].dock_state = DockState::Float;
                self.pane_float_windows.insert(pane, window);
            }
        }
        Ok(())
    }

    /// Remove `pane` from whatever collection holds it, running the heir
    /// reattachment. An emptied float window is queued for disposal rather
    /// than dropped in place.
    pub(crate) fn detach_pane_from_container(&mut self, pane: PaneId) {
        if let Some(&window) = self.pane_float_windows.get(pane) {
            let emptied = {
                let float = &mut self.float_windows[window];
                float.nested.remove(&mut self.panes, pane);
                float.nested.is_empty()
            };
            self.pane_float_windows.remove(pane);
            if emptied {
                self.queue_float_window_disposal(window);
            }
            self.request_layout();
            return;
        }
        for zone in DockZone::ALL {
            let (collection, arena) = self.zone_collection_mut(zone);
            if collection.remove(arena, pane) {
                self.request_layout();
                return;
            }
        }
    }

    /// Detach `content` from `pane`, disposing the pane when it empties.
    pub(crate) fn remove_content_from_pane(&mut self, pane: PaneId, content: ContentId) {
        let entry = &mut self.panes[pane];
        entry.contents.retain(|&c| c != content);
        if entry.active_content == Some(content) {
            entry.active_content = None;
        }
        if entry.contents.is_empty() {
            self.dispose_pane(pane);
        } else {
            self.validate_active_content(pane);
        }
    }

    /// Attach `content` to `pane`'s tab list and point the handler's slot at
    /// it, detaching from any previous pane of the same family first.
    pub(crate) fn attach_content_to_pane(&mut self, content: ContentId, pane: PaneId) {
        let is_float = self.panes[pane].is_float();
        let old = if is_float {
            self.contents[content].float_pane.replace(pane)
        } else {
            self.contents[content].panel_pane.replace(pane)
        };
        if is_float {
            // Exclusive ownership: a content never sits in two panes.
            if let Some(panel_pane) = self.contents[content].panel_pane.take() {
                self.remove_content_from_pane(panel_pane, content);
            }
        } else if let Some(float_pane) = self.contents[content].float_pane.take() {
            self.remove_content_from_pane(float_pane, content);
        }
        if let Some(old) = old
            && old != pane
        {
            self.remove_content_from_pane(old, content);
        }
        let entry = &mut self.panes[pane];
        if !entry.contents.contains(&content) {
            entry.contents.push(content);
        }
        if entry.active_content.is_none() {
            entry.active_content = Some(content);
        }
        self.request_layout();
    }

    /// Ensure the pane's active content is visible, falling back to the
    /// first displayable tab.
    pub(crate) fn validate_active_content(&mut self, pane: PaneId) {
        let entry = &self.panes[pane];
        let valid = entry
            .active_content
            .is_some_and(|c| entry.contents.contains(&c) && !self.contents[c].is_hidden);
        if !valid {
            let fallback = entry
                .contents
                .iter()
                .copied()
                .find(|&c| !self.contents[c].is_hidden);
            self.panes[pane].active_content = fallback;
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::panel::tests::{content, panel};
    use crate::state::DockState;

    use super::*;

    #[test]
    fn set_content_index_reorders_tabs() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        let c = panel.add_content(content("c"));
        panel.show_with_state(a, DockState::Document).unwrap();
        let pane = panel.content_pane(a).unwrap();
        panel.show_in_pane(b, pane).unwrap();
        panel.show_in_pane(c, pane).unwrap();

        panel.set_content_index(c, 0).unwrap();
        assert_eq!(panel.panes[pane].contents, vec![c, a, b]);

        panel.set_content_index(c, -1).unwrap();
        assert_eq!(panel.panes[pane].contents, vec![a, b, c]);

        assert_eq!(
            panel.set_content_index(c, 5),
            Err(DockError::InvalidContentIndex(5))
        );
    }

    #[test]
    fn pane_retag_moves_between_zones() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        let pane = panel.content_pane(a).unwrap();

        panel.pane_set_dock_state(pane, DockState::DockBottom).unwrap();

        assert_eq!(panel.panes[pane].dock_state, DockState::DockBottom);
        assert_eq!(panel.content_dock_state(a), DockState::DockBottom);
        assert!(panel.zone_panes(DockZone::Left).is_empty());
        assert_eq!(panel.zone_panes(DockZone::Bottom).len(), 1);
    }

    #[test]
    fn pane_retag_rejects_non_placement_states() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        let pane = panel.content_pane(a).unwrap();

        assert_eq!(
            panel.pane_set_dock_state(pane, DockState::Hidden),
            Err(DockError::InvalidStateTransition(DockState::Hidden))
        );
    }
}
