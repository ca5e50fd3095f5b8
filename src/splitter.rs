use tracing::debug;

use crate::error::{DockError, Result};
use crate::geometry::{Point, Rect};
use crate::panel::{DockPanel, DockZone, MIN_PANE_SIZE, SplitterTarget};
use crate::state::DockAlignment;

/// Visual thickness of a splitter bar.
pub const SPLITTER_SIZE: f64 = 4.0;

/// A vertical splitter moves horizontally and vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterOrientation {
    Vertical,
    Horizontal,
}

struct SplitterDrag {
    target: SplitterTarget,
    orientation: SplitterOrientation,
    base: Rect,
    current: Rect,
    limit: Rect,
    grab: Point,
}

/// Drives a splitter drag: tracks the bar against its travel limits and
/// applies the displacement to the panel only on commit.
#[derive(Default)]
pub struct SplitterDragEngine {
    state: Option<SplitterDrag>,
}

impl SplitterDragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    /// The bar's current rectangle, for the renderer.
    pub fn current_bounds(&self) -> Option<Rect> {
        self.state.as_ref().map(|s| s.current)
    }

    pub fn begin(
        &mut self,
        panel: &DockPanel,
        target: SplitterTarget,
        pointer: Point,
    ) -> Result<()> {
        let (bar, limit, orientation) = splitter_geometry(panel, target)?;
        debug!(?target, "splitter drag begun");
        self.state = Some(SplitterDrag {
            target,
            orientation,
            base: bar,
            current: bar,
            limit,
            grab: pointer,
        });
        Ok(())
    }

    /// Track the pointer along the bar's axis, clamped to the travel limit.
    pub fn update(&mut self, pointer: Point) {
        let Some(state) = &mut self.state else { return };
        let mut rect = state.base;
        match state.orientation {
            SplitterOrientation::Vertical => {
                let x = state.base.min_x() + (pointer.x - state.grab.x);
                rect.origin.x = x.clamp(
                    state.limit.min_x(),
                    (state.limit.max_x() - rect.width()).max(state.limit.min_x()),
                );
            }
            SplitterOrientation::Horizontal => {
                let y = state.base.min_y() + (pointer.y - state.grab.y);
                rect.origin.y = y.clamp(
                    state.limit.min_y(),
                    (state.limit.max_y() - rect.height()).max(state.limit.min_y()),
                );
            }
        }
        state.current = rect;
    }

    pub fn abort(&mut self) {
        if self.state.take().is_some() {
            debug!("splitter drag aborted");
        }
    }

    /// Apply the accumulated displacement.
    pub fn commit(&mut self, panel: &mut DockPanel) -> Result<()> {
        let Some(state) = self.state.take() else {
            return Ok(());
        };
        let offset = match state.orientation {
            SplitterOrientation::Vertical => state.current.min_x() - state.base.min_x(),
            SplitterOrientation::Horizontal => state.current.min_y() - state.base.min_y(),
        };
        if offset == 0.0 {
            return Ok(());
        }
        debug!(target = ?state.target, offset, "splitter drag committed");
        panel.move_splitter(state.target, offset)
    }
}

/// Bar rectangle, travel limit and orientation for a splitter target.
fn splitter_geometry(
    panel: &DockPanel,
    target: SplitterTarget,
) -> Result<(Rect, Rect, SplitterOrientation)> {
    match target {
        SplitterTarget::ContainerEdge(zone) => {
            let bounds = panel.zone_bounds(zone);
            let area = panel.dock_area();
            let t = SPLITTER_SIZE;
            let (bar, orientation) = match zone {
                DockZone::Left => (
                    Rect::from_xywh(bounds.max_x(), bounds.min_y(), t, bounds.height()),
                    SplitterOrientation::Vertical,
                ),
                DockZone::Right => (
                    Rect::from_xywh(bounds.min_x() - t, bounds.min_y(), t, bounds.height()),
                    SplitterOrientation::Vertical,
                ),
                DockZone::Top => (
                    Rect::from_xywh(bounds.min_x(), bounds.max_y(), bounds.width(), t),
                    SplitterOrientation::Horizontal,
                ),
                DockZone::Bottom => (
                    Rect::from_xywh(bounds.min_x(), bounds.min_y() - t, bounds.width(), t),
                    SplitterOrientation::Horizontal,
                ),
                DockZone::Document => return Err(DockError::InvalidPaneReference),
            };
            let limit = inset_along(area, orientation, MIN_PANE_SIZE);
            Ok((bar, limit, orientation))
        }
        SplitterTarget::Pane(pane) => {
            let entry = panel.panes.get(pane).ok_or(DockError::InvalidPaneReference)?;
            if entry.nested.previous_pane.is_none() {
                return Err(DockError::InvalidPaneReference);
            }
            let bounds = entry.bounds;
            let logical = entry.nested.logical_bounds;
            let t = SPLITTER_SIZE;
            let (bar, orientation) = match entry.nested.alignment {
                DockAlignment::Left => (
                    Rect::from_xywh(bounds.max_x(), bounds.min_y(), t, bounds.height()),
                    SplitterOrientation::Vertical,
                ),
                DockAlignment::Right => (
                    Rect::from_xywh(bounds.min_x() - t, bounds.min_y(), t, bounds.height()),
                    SplitterOrientation::Vertical,
                ),
                DockAlignment::Top => (
                    Rect::from_xywh(bounds.min_x(), bounds.max_y(), bounds.width(), t),
                    SplitterOrientation::Horizontal,
                ),
                DockAlignment::Bottom => (
                    Rect::from_xywh(bounds.min_x(), bounds.min_y() - t, bounds.width(), t),
                    SplitterOrientation::Horizontal,
                ),
            };
            let limit = inset_along(logical, orientation, MIN_PANE_SIZE);
            Ok((bar, limit, orientation))
        }
    }
}

fn inset_along(rect: Rect, orientation: SplitterOrientation, amount: f64) -> Rect {
    match orientation {
        SplitterOrientation::Vertical => Rect::from_xywh(
            rect.min_x() + amount,
            rect.min_y(),
            (rect.width() - 2.0 * amount).max(0.0),
            rect.height(),
        ),
        SplitterOrientation::Horizontal => Rect::from_xywh(
            rect.min_x(),
            rect.min_y() + amount,
            rect.width(),
            (rect.height() - 2.0 * amount).max(0.0),
        ),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::panel::tests::{content, panel};
    use crate::state::DockState;

    use super::*;

    #[test]
    fn container_edge_drag_moves_portion_by_offset() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        assert_eq!(panel.dock_window_size(DockZone::Left), 250.0);

        let mut engine = SplitterDragEngine::new();
        let target = SplitterTarget::ContainerEdge(DockZone::Left);
        engine.begin(&panel, target, Point::new(251.0, 400.0)).unwrap();
        engine.update(Point::new(301.0, 400.0));
        engine.commit(&mut panel).unwrap();

        assert_eq!(panel.dock_window_size(DockZone::Left), 300.0);
        assert!(!engine.is_dragging());
    }

    #[test]
    fn drag_is_clamped_to_travel_limit() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();

        let mut engine = SplitterDragEngine::new();
        let target = SplitterTarget::ContainerEdge(DockZone::Left);
        engine.begin(&panel, target, Point::new(251.0, 400.0)).unwrap();
        // Way past the right edge: the bar stops inside the limit.
        engine.update(Point::new(5000.0, 400.0));
        let bar = engine.current_bounds().unwrap();
        assert!(bar.max_x() <= 1000.0 - MIN_PANE_SIZE);

        engine.commit(&mut panel).unwrap();
        assert!(panel.dock_window_size(DockZone::Left) < 1000.0);
    }

    #[test]
    fn abort_applies_nothing() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockTop).unwrap();
        let before = panel.dock_top_portion();

        let mut engine = SplitterDragEngine::new();
        engine
            .begin(&panel, SplitterTarget::ContainerEdge(DockZone::Top), Point::new(500.0, 201.0))
            .unwrap();
        engine.update(Point::new(500.0, 350.0));
        engine.abort();

        assert_eq!(panel.dock_top_portion(), before);
    }

    #[test]
    fn pane_splitter_requires_an_anchor() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        let pane = panel.content_pane(id).unwrap();

        let mut engine = SplitterDragEngine::new();
        assert_eq!(
            engine.begin(&panel, SplitterTarget::Pane(pane), Point::new(100.0, 100.0)),
            Err(DockError::InvalidPaneReference)
        );
    }

    #[test]
    fn nested_pane_drag_shifts_fifty_pixels() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        let b = panel.add_content(content("b"));
        let pane_b = panel.create_pane_for(b, DockState::DockLeft, true).unwrap();

        // 800px column split 400/400; the divider sits at y=400.
        assert_eq!(panel.panes[pane_b].bounds.min_y(), 400.0);

        let mut engine = SplitterDragEngine::new();
        engine
            .begin(&panel, SplitterTarget::Pane(pane_b), Point::new(100.0, 398.0))
            .unwrap();
        engine.update(Point::new(100.0, 448.0));
        engine.commit(&mut panel).unwrap();

        assert_eq!(panel.panes[pane_b].nested.proportion, 0.4375);
        assert_eq!(panel.panes[pane_b].bounds.height(), 350.0);
    }
}
