use slotmap::new_key_type;
use tracing::debug;

use crate::error::{DockError, Result};
use crate::geometry::Rect;
use crate::pane::PaneId;
use crate::panel::{DockEvent, DockPanel};
use crate::state::{DockAlignment, DockAreas, DockState, DocumentHostMode};

new_key_type! {
    pub struct ContentId;
}

/// Host-provided content unit. The panel owns placement; the host owns what
/// the unit actually is.
pub trait DockContent {
    /// Stable identity string written into layout snapshots and handed back
    /// to the host's deserializer on restore.
    fn persist_string(&self) -> String;

    fn tab_text(&self) -> String {
        self.persist_string()
    }

    fn on_activated(&mut self) {}
    fn on_deactivated(&mut self) {}
}

/// Per-content docking state tracked by the panel: the placement state
/// machine's variables plus the dual pane slots (panel-side and float-side).
pub struct ContentHandler {
    pub content: Box<dyn DockContent>,
    pub(crate) allowed_areas: DockAreas,
    pub show_hint: DockState,
    pub auto_hide_portion: f64,
    pub allow_end_user_docking: bool,
    pub hide_on_close: bool,
    pub(crate) dock_state: DockState,
    pub(crate) visible_state: DockState,
    pub(crate) is_hidden: bool,
    pub(crate) is_float: bool,
    pub(crate) panel_pane: Option<PaneId>,
    pub(crate) float_pane: Option<PaneId>,
    pub(crate) suspend_count: u32,
}

impl ContentHandler {
    pub fn new(content: Box<dyn DockContent>) -> Self {
        Self {
            content,
            allowed_areas: DockAreas::default(),
            show_hint: DockState::Unknown,
            auto_hide_portion: 0.25,
            allow_end_user_docking: true,
            hide_on_close: false,
            dock_state: DockState::Unknown,
            visible_state: DockState::Unknown,
            is_hidden: true,
            is_float: false,
            panel_pane: None,
            float_pane: None,
            suspend_count: 0,
        }
    }

    pub fn dock_state(&self) -> DockState {
        self.dock_state
    }

    pub fn visible_state(&self) -> DockState {
        self.visible_state
    }

    pub fn is_hidden(&self) -> bool {
        self.is_hidden
    }

    pub fn allowed_areas(&self) -> DockAreas {
        self.allowed_areas
    }

    /// The pane currently hosting this content: the float-side slot while
    /// floating, the panel-side slot otherwise.
    pub fn pane(&self) -> Option<PaneId> {
        if self.is_float { self.float_pane } else { self.panel_pane }
    }

    /// Replace the allowed-areas mask. Refused while the content occupies
    /// a placement the new mask does not permit. A show hint the new mask
    /// no longer permits is cleared.
    pub fn set_allowed_areas(&mut self, areas: DockAreas) -> Result<()> {
        if !self.dock_state.is_valid_for(areas) {
            return Err(DockError::InvalidStateTransition(self.dock_state));
        }
        self.allowed_areas = areas;
        if !self.show_hint.is_valid_for(areas) {
            self.show_hint = DockState::Unknown;
        }
        Ok(())
    }
}

impl DockPanel {
    pub fn content_dock_state(&self, id: ContentId) -> DockState {
        self.contents
            .get(id)
            .map_or(DockState::Unknown, |h| h.dock_state)
    }

    pub fn content_pane(&self, id: ContentId) -> Option<PaneId> {
        self.contents.get(id).and_then(|h| h.pane())
    }

    /// Whether `state` is a placement the content may occupy here. Document
    /// is additionally refused while the document area is system-managed.
    pub fn is_dock_state_valid(&self, id: ContentId, state: DockState) -> bool {
        let Some(handler) = self.contents.get(id) else {
            return false;
        };
        if state == DockState::Document
            && self.document_host_mode == DocumentHostMode::SystemManaged
        {
            return false;
        }
        state.is_valid_for(handler.allowed_areas)
    }

    /// Assign a placement state directly. `Unknown` cannot be assigned;
    /// `Hidden` routes through the hidden flag so the visible state is
    /// remembered.
    pub fn set_content_dock_state(&mut self, id: ContentId, state: DockState) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.dock_state == state {
            return Ok(());
        }
        if state == DockState::Unknown {
            return Err(DockError::InvalidStateTransition(state));
        }
        if state == DockState::Hidden {
            self.set_content_hidden(id, true)
        } else {
            let old_pane = handler.pane();
            self.set_dock_state_inner(id, false, state, old_pane)
        }
    }

    pub fn set_content_hidden(&mut self, id: ContentId, hidden: bool) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.is_hidden == hidden {
            return Ok(());
        }
        let visible_state = handler.visible_state;
        let old_pane = handler.pane();
        self.set_dock_state_inner(id, hidden, visible_state, old_pane)
    }

    /// Change the remembered visible state without touching hidden-ness.
    pub fn set_content_visible_state(&mut self, id: ContentId, state: DockState) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.visible_state == state {
            return Ok(());
        }
        let is_hidden = handler.is_hidden;
        let old_pane = handler.pane();
        self.set_dock_state_inner(id, is_hidden, state, old_pane)
    }

    /// Move the content across the float/panel family line. Leaving float
    /// returns to the panel-side pane when one is still tracked, else to the
    /// content's default placement.
    pub fn set_content_float(&mut self, id: ContentId, float: bool) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.is_float == float {
            return Ok(());
        }
        let target = if float {
            DockState::Float
        } else {
            match handler.panel_pane {
                Some(pane) => self.panes[pane].dock_state,
                None => self.default_show_state(id)?,
            }
        };
        let is_hidden = self.contents[id].is_hidden;
        let old_pane = self.contents[id].pane();
        self.set_dock_state_inner(id, is_hidden, target, old_pane)
    }

    /// Absorb every transition for `id` until the matching resume.
    pub fn suspend_content_transitions(&mut self, id: ContentId) -> Result<()> {
        let handler = self.contents.get_mut(id).ok_or(DockError::NullContainer)?;
        handler.suspend_count += 1;
        Ok(())
    }

    pub fn resume_content_transitions(&mut self, id: ContentId) -> Result<()> {
        let handler = self.contents.get_mut(id).ok_or(DockError::NullContainer)?;
        handler.suspend_count = handler.suspend_count.saturating_sub(1);
        Ok(())
    }

    /// The single transition path every placement change funnels through.
    /// Re-entrant calls while a transition for the same content is in
    /// flight are absorbed by the suspend counter.
    pub(crate) fn set_dock_state_inner(
        &mut self,
        id: ContentId,
        is_hidden: bool,
        visible_state: DockState,
        old_pane: Option<PaneId>,
    ) -> Result<()> {
        if visible_state == DockState::Hidden {
            return Err(DockError::InvalidStateTransition(visible_state));
        }
        {
            let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
            if handler.suspend_count > 0 {
                return Ok(());
            }
        }
        if visible_state != DockState::Unknown && !self.is_dock_state_valid(id, visible_state) {
            return Err(DockError::InvalidStateTransition(visible_state));
        }

        self.suspend_layout();
        self.contents[id].suspend_count += 1;
        let result = self.transition_body(id, is_hidden, visible_state, old_pane);
        self.contents[id].suspend_count -= 1;
        self.resume_layout(true);
        result
    }

    fn transition_body(
        &mut self,
        id: ContentId,
        is_hidden: bool,
        visible_state: DockState,
        old_pane: Option<PaneId>,
    ) -> Result<()> {
        let old_dock_state = self.contents[id].dock_state;

        {
            let handler = &mut self.contents[id];
            handler.is_hidden = is_hidden;
            handler.visible_state = visible_state;
            handler.dock_state = match visible_state {
                DockState::Unknown => DockState::Unknown,
                _ if is_hidden => DockState::Hidden,
                state => state,
            };
        }

        if visible_state == DockState::Unknown {
            self.detach_content_from_panes(id);
        } else {
            self.contents[id].is_float = visible_state == DockState::Float;
            match self.contents[id].pane() {
                None => {
                    self.create_pane_for(id, visible_state, false)?;
                }
                Some(pane) if self.panes[pane].dock_state != visible_state => {
                    // A sole occupant drags its pane through the transition;
                    // otherwise the content leaves for a fresh pane.
                    if self.panes[pane].contents.len() == 1 {
                        self.pane_set_dock_state(pane, visible_state)?;
                    } else {
                        self.create_pane_for(id, visible_state, false)?;
                    }
                }
                Some(_) => {}
            }
        }

        let new_dock_state = self.contents[id].dock_state;
        if matches!(new_dock_state, DockState::Unknown | DockState::Hidden) {
            self.give_up_focus(id);
        }

        if let Some(old) = old_pane
            && self.panes.contains_key(old)
            && self.panes[old].dock_state == old_dock_state
        {
            self.validate_active_content(old);
        }
        if let Some(pane) = self.contents[id].pane() {
            self.validate_active_content(pane);
        }

        if old_dock_state != new_dock_state {
            if matches!(new_dock_state, DockState::Unknown | DockState::Hidden)
                || new_dock_state.is_auto_hide()
            {
                self.remove_from_focus_list(id);
            } else {
                self.add_to_focus_list(id);
            }
            if !new_dock_state.is_auto_hide() && self.active_auto_hide_content() == Some(id) {
                self.set_active_auto_hide_content(None);
            }
            self.reset_auto_hide_portion(id, old_dock_state, new_dock_state);
            debug!(?id, ?old_dock_state, ?new_dock_state, "content dock state changed");
            self.push_event(DockEvent::DockStateChanged {
                content: id,
                old: old_dock_state,
                new: new_dock_state,
            });
        }
        Ok(())
    }

    fn detach_content_from_panes(&mut self, id: ContentId) {
        let handler = &mut self.contents[id];
        let panel_pane = handler.panel_pane.take();
        let float_pane = handler.float_pane.take();
        handler.is_float = false;
        if let Some(pane) = panel_pane {
            self.remove_content_from_pane(pane, id);
        }
        if let Some(pane) = float_pane {
            self.remove_content_from_pane(pane, id);
        }
    }

    /// Seed the auto-hide portion from the panel-wide side portion when a
    /// content lands on a new side, pinned or auto-hide. Toggling
    /// pinned/auto-hide on the same side keeps the remembered portion.
    fn reset_auto_hide_portion(&mut self, id: ContentId, old: DockState, new: DockState) {
        if old == new || old.toggle_auto_hide() == new {
            return;
        }
        let Some(side) = new.side() else { return };
        self.contents[id].auto_hide_portion = match side {
            DockAlignment::Left => self.dock_left_portion(),
            DockAlignment::Right => self.dock_right_portion(),
            DockAlignment::Top => self.dock_top_portion(),
            DockAlignment::Bottom => self.dock_bottom_portion(),
        };
    }

    /// Make the content visible. Never-shown contents get their default
    /// placement; previously placed contents are activated where they are.
    pub fn show(&mut self, id: ContentId) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.dock_state == DockState::Unknown {
            let state = self.default_show_state(id)?;
            self.show_with_state(id, state)
        } else {
            self.activate(id)
        }
    }

    /// First allowed placement in preference order, or the explicit hint.
    fn default_show_state(&self, id: ContentId) -> Result<DockState> {
        let hint = self.contents[id].show_hint;
        if hint != DockState::Unknown {
            if !self.is_dock_state_valid(id, hint) {
                return Err(DockError::InvalidStateTransition(hint));
            }
            return Ok(hint);
        }
        [
            DockState::DockLeft,
            DockState::DockRight,
            DockState::DockTop,
            DockState::DockBottom,
            DockState::Document,
            DockState::Float,
        ]
        .into_iter()
        .find(|&state| self.is_dock_state_valid(id, state))
        .ok_or(DockError::InvalidStateTransition(DockState::Unknown))
    }

    pub fn show_with_state(&mut self, id: ContentId, state: DockState) -> Result<()> {
        if matches!(state, DockState::Unknown | DockState::Hidden) {
            return Err(DockError::InvalidStateTransition(state));
        }
        self.contents.get(id).ok_or(DockError::NullContainer)?;
        if !self.is_dock_state_valid(id, state) {
            return Err(DockError::InvalidStateTransition(state));
        }

        self.suspend_layout();
        let result = self.show_body(id, state);
        self.resume_layout(true);
        result
    }

    fn show_body(&mut self, id: ContentId, state: DockState) -> Result<()> {
        let handler = &self.contents[id];
        let needs_pane = if state == DockState::Float {
            handler.float_pane.is_none()
        } else {
            handler.panel_pane.is_none()
        };
        if needs_pane {
            // Prefer joining an existing pane in the target state.
            match self.find_pane(state) {
                Some(pane) if state != DockState::Float => {
                    self.attach_content_to_pane(id, pane);
                }
                _ => {
                    self.create_pane_for(id, state, false)?;
                }
            }
        }
        let old_pane = self.contents[id].pane();
        self.set_dock_state_inner(id, false, state, old_pane)?;
        self.activate(id)
    }

    /// Show `id` as a tab of an existing pane, adopting the pane's state.
    pub fn show_in_pane(&mut self, id: ContentId, pane: PaneId) -> Result<()> {
        let state = self
            .panes
            .get(pane)
            .ok_or(DockError::InvalidPaneReference)?
            .dock_state;
        self.contents.get(id).ok_or(DockError::NullContainer)?;
        if !self.is_dock_state_valid(id, state) {
            return Err(DockError::InvalidStateTransition(state));
        }
        self.suspend_layout();
        self.contents[id].is_float = state == DockState::Float;
        self.attach_content_to_pane(id, pane);
        let result = self
            .set_dock_state_inner(id, false, state, None)
            .and_then(|()| self.activate(id));
        self.resume_layout(true);
        result
    }

    /// Like `show_in_pane`, inserting the tab before `before`.
    pub fn show_in_pane_before(
        &mut self,
        id: ContentId,
        pane: PaneId,
        before: ContentId,
    ) -> Result<()> {
        self.show_in_pane(id, pane)?;
        let index = self
            .panes[pane]
            .index_of(before)
            .ok_or(DockError::NullContainer)?;
        self.set_content_index(id, index as isize)
    }

    /// Show `id` in a new pane carved from `previous` on the given side.
    /// Auto-hidden panes cannot anchor a nested split.
    pub fn show_nested(
        &mut self,
        id: ContentId,
        previous: PaneId,
        alignment: DockAlignment,
        proportion: f64,
    ) -> Result<()> {
        let anchor = self
            .panes
            .get(previous)
            .ok_or(DockError::InvalidPaneReference)?;
        if anchor.is_auto_hide() {
            return Err(DockError::InvalidPaneReference);
        }
        let state = anchor.dock_state;
        self.contents.get(id).ok_or(DockError::NullContainer)?;
        if !self.is_dock_state_valid(id, state) {
            return Err(DockError::InvalidStateTransition(state));
        }
        let container = self
            .container_of(previous)
            .ok_or(DockError::InvalidPaneReference)?;

        self.suspend_layout();
        let result = (|| -> Result<()> {
            let pane = self.create_pane_for(id, state, false)?;
            self.dock_pane_nested(pane, container, previous, alignment, proportion)?;
            self.set_dock_state_inner(id, false, state, None)?;
            self.activate(id)
        })();
        self.resume_layout(true);
        result
    }

    /// Float `id` in its own window at `bounds`. The content's float pane is
    /// reused when it is the sole pane of its window; otherwise a fresh
    /// window is created.
    pub fn float_at(&mut self, id: ContentId, bounds: Rect) -> Result<()> {
        self.contents.get(id).ok_or(DockError::NullContainer)?;
        if !self.is_dock_state_valid(id, DockState::Float) {
            return Err(DockError::InvalidStateTransition(DockState::Float));
        }
        self.suspend_layout();
        let result = self.float_at_body(id, bounds);
        self.resume_layout(true);
        result
    }

    fn float_at_body(&mut self, id: ContentId, bounds: Rect) -> Result<()> {
        let reusable = self.contents[id].float_pane.filter(|&pane| {
            self.pane_float_windows
                .get(pane)
                .is_some_and(|&w| self.float_windows[w].nested.len() == 1)
        });
        let pane = match reusable {
            Some(pane) => pane,
            None => self.create_pane_for(id, DockState::Float, false)?,
        };
        if let Some(&window) = self.pane_float_windows.get(pane) {
            self.float_windows[window].bounds = bounds;
        }
        let old_pane = self.contents[id].pane();
        self.set_dock_state_inner(id, false, DockState::Float, old_pane)?;
        self.activate(id)
    }

    pub fn hide(&mut self, id: ContentId) -> Result<()> {
        self.set_content_hidden(id, true)
    }

    /// Close per the content's policy: hide when `hide_on_close` is set,
    /// remove otherwise.
    pub fn close(&mut self, id: ContentId) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.hide_on_close {
            self.hide(id)
        } else {
            self.remove_content(id)
        }
    }

    /// Detach and forget `id` entirely.
    pub fn remove_content(&mut self, id: ContentId) -> Result<()> {
        self.contents.get(id).ok_or(DockError::NullContainer)?;
        self.suspend_layout();
        let result = self.set_dock_state_inner(id, true, DockState::Unknown, self.content_pane(id));
        self.give_up_focus(id);
        self.remove_from_focus_list(id);
        if self.active_auto_hide_content() == Some(id) {
            self.set_active_auto_hide_content(None);
        }
        self.content_order.retain(|&c| c != id);
        self.contents.remove(id);
        self.push_event(DockEvent::ContentRemoved(id));
        self.resume_layout(true);
        result
    }

    /// Bring `id` to the front of its pane and make it the panel's active
    /// content, unhiding it first if needed.
    pub fn activate(&mut self, id: ContentId) -> Result<()> {
        let handler = self.contents.get(id).ok_or(DockError::NullContainer)?;
        if handler.visible_state == DockState::Unknown {
            return Err(DockError::InvalidStateTransition(DockState::Unknown));
        }
        if handler.is_hidden {
            self.set_content_hidden(id, false)?;
        }
        let pane = self.contents[id].pane().ok_or(DockError::NullContainer)?;
        self.panes[pane].active_content = Some(id);
        self.set_activated_pane(Some(pane));
        self.add_to_focus_list(id);
        self.set_active_content(Some(id));
        if self.contents[id].dock_state.is_auto_hide() {
            self.set_active_auto_hide_content(Some(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::panel::tests::{content, panel};
    use crate::state::DockAreas;

    use super::*;

    #[test]
    fn show_picks_first_allowed_state() {
        let mut panel = panel();
        let id = panel.add_content(content("tools"));
        panel.contents[id].allowed_areas = DockAreas::DOCK_LEFT | DockAreas::DOCUMENT;

        panel.show(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::DockLeft);
    }

    #[test]
    fn show_honors_hint() {
        let mut panel = panel();
        let id = panel.add_content(content("out"));
        panel.contents[id].show_hint = DockState::DockBottom;

        panel.show(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::DockBottom);
    }

    #[test]
    fn invalid_transition_leaves_state_untouched() {
        let mut panel = panel();
        let id = panel.add_content(content("doc"));
        panel.contents[id].allowed_areas = DockAreas::DOCUMENT;
        panel.show_with_state(id, DockState::Document).unwrap();

        assert_eq!(
            panel.show_with_state(id, DockState::DockLeft),
            Err(DockError::InvalidStateTransition(DockState::DockLeft))
        );
        assert_eq!(panel.content_dock_state(id), DockState::Document);
    }

    #[test]
    fn system_managed_documents_refuse_document_state() {
        let mut panel = panel();
        panel.set_document_host_mode(DocumentHostMode::SystemManaged).unwrap();
        let id = panel.add_content(content("doc"));

        assert_eq!(
            panel.show_with_state(id, DockState::Document),
            Err(DockError::InvalidStateTransition(DockState::Document))
        );
    }

    #[test]
    fn hide_remembers_visible_state() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockRight).unwrap();

        panel.hide(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::Hidden);
        assert!(panel.contents[id].is_hidden());

        panel.show(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::DockRight);
    }

    #[test]
    fn sole_occupant_retags_pane_instead_of_moving() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        let pane = panel.content_pane(id).unwrap();

        panel.set_content_dock_state(id, DockState::DockTop).unwrap();

        assert_eq!(panel.content_pane(id), Some(pane));
        assert_eq!(panel.panes[pane].dock_state, DockState::DockTop);
    }

    #[test]
    fn shared_pane_occupant_leaves_for_fresh_pane() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        panel.show_with_state(b, DockState::DockLeft).unwrap();
        let shared = panel.content_pane(a).unwrap();
        assert_eq!(panel.content_pane(b), Some(shared));

        panel.set_content_dock_state(b, DockState::DockBottom).unwrap();

        assert_ne!(panel.content_pane(b), Some(shared));
        assert_eq!(panel.panes[shared].dock_state, DockState::DockLeft);
        assert_eq!(panel.content_dock_state(a), DockState::DockLeft);
    }

    #[test]
    fn dock_state_change_emits_event() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        let _ = panel.take_events();

        panel
            .set_content_dock_state(id, DockState::DockLeftAutoHide)
            .unwrap();

        let events = panel.take_events();
        assert!(events.iter().any(|e| matches!(
            e,
            DockEvent::DockStateChanged {
                content,
                old: DockState::DockLeft,
                new: DockState::DockLeftAutoHide,
            } if *content == id
        )));
    }

    #[test]
    fn auto_hide_portion_seeded_from_panel_side_portion() {
        let mut panel = panel();
        panel.set_dock_left_portion(0.4).unwrap();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        panel.contents[id].auto_hide_portion = 0.1;

        // Same-side toggle keeps the remembered portion.
        panel
            .set_content_dock_state(id, DockState::DockLeftAutoHide)
            .unwrap();
        assert_eq!(panel.contents[id].auto_hide_portion, 0.1);

        // Landing on a different auto-hide side reseeds it.
        panel
            .set_content_dock_state(id, DockState::DockRightAutoHide)
            .unwrap();
        assert_eq!(panel.contents[id].auto_hide_portion, 0.25);
    }

    #[test]
    fn portion_reseeds_when_pinning_to_another_side() {
        let mut panel = panel();
        panel.set_dock_bottom_portion(0.4).unwrap();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        panel.contents[id].auto_hide_portion = 0.1;

        panel.set_content_dock_state(id, DockState::DockBottom).unwrap();
        assert_eq!(panel.contents[id].auto_hide_portion, 0.4);
    }

    #[test]
    fn system_managed_refused_while_documents_docked() {
        let mut panel = panel();
        let id = panel.add_content(content("doc"));
        panel.show_with_state(id, DockState::Document).unwrap();

        assert_eq!(
            panel.set_document_host_mode(DocumentHostMode::SystemManaged),
            Err(DockError::InvalidStateTransition(DockState::Document))
        );
    }

    #[test]
    fn narrowing_areas_clears_stale_hint() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.contents[id].show_hint = DockState::Float;

        panel.contents[id].set_allowed_areas(DockAreas::DOCUMENT).unwrap();
        assert_eq!(panel.contents[id].show_hint, DockState::Unknown);

        panel.show(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::Document);
    }

    #[test]
    fn narrowing_areas_refuses_current_placement() {
        let mut panel = panel();
        let id = panel.add_content(content("tool"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();

        assert_eq!(
            panel.contents[id].set_allowed_areas(DockAreas::DOCUMENT),
            Err(DockError::InvalidStateTransition(DockState::DockLeft))
        );
        assert_eq!(panel.contents[id].allowed_areas(), DockAreas::all());
    }

    #[test]
    fn suspended_content_absorbs_transitions() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();

        panel.suspend_content_transitions(id).unwrap();
        panel.set_content_dock_state(id, DockState::Document).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::DockLeft);

        panel.resume_content_transitions(id).unwrap();
        panel.set_content_dock_state(id, DockState::Document).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::Document);
    }

    #[test]
    fn float_toggle_round_trips_through_default_placement() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();

        panel.set_content_float(a, true).unwrap();
        assert_eq!(panel.content_dock_state(a), DockState::Float);

        panel.set_content_float(a, false).unwrap();
        assert_eq!(panel.content_dock_state(a), DockState::DockLeft);
        assert!(panel.float_window_ids().is_empty());
    }

    #[test]
    fn show_in_pane_before_places_the_tab() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        let c = panel.add_content(content("c"));
        panel.show_with_state(a, DockState::Document).unwrap();
        let pane = panel.content_pane(a).unwrap();
        panel.show_in_pane(b, pane).unwrap();

        panel.show_in_pane_before(c, pane, b).unwrap();
        assert_eq!(panel.panes[pane].contents, vec![a, c, b]);
    }

    #[test]
    fn show_nested_refuses_auto_hidden_anchor() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeftAutoHide).unwrap();
        let pane = panel.content_pane(a).unwrap();
        let b = panel.add_content(content("b"));

        assert_eq!(
            panel.show_nested(b, pane, DockAlignment::Bottom, 0.5),
            Err(DockError::InvalidPaneReference)
        );
    }

    #[test]
    fn close_honors_hide_on_close() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.contents[id].hide_on_close = true;
        panel.show_with_state(id, DockState::Float).unwrap();

        panel.close(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::Hidden);

        panel.contents[id].hide_on_close = false;
        panel.close(id).unwrap();
        assert_eq!(panel.content_dock_state(id), DockState::Unknown);
        assert!(panel.contents.get(id).is_none());
    }
}
