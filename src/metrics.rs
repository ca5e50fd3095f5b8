use crate::geometry::{Point, Rect};
use crate::state::DockState;

/// Pixel metrics for the chrome bands around a pane. The panel consults
/// these for auto-hide strips and the drag engine for caption and tab hit
/// testing; hosts swap in their own implementation to match their theme.
pub trait StripMetrics {
    /// Height of an auto-hide strip band along a panel edge.
    fn measure_height(&self) -> f64;

    /// Caption band of a tool pane. Document panes have none.
    fn caption_bounds(&self, pane_bounds: Rect, state: DockState) -> Rect;

    /// Tab strip band: along the top for document panes, along the bottom
    /// for tool panes.
    fn tab_strip_bounds(&self, pane_bounds: Rect, state: DockState) -> Rect;

    /// Outline of the tab at `index` out of `count`.
    fn tab_outline(
        &self,
        pane_bounds: Rect,
        state: DockState,
        count: usize,
        index: usize,
    ) -> Rect;

    /// Tab index under `point`, if any.
    fn hit_test_tab(
        &self,
        pane_bounds: Rect,
        state: DockState,
        count: usize,
        point: Point,
    ) -> Option<usize> {
        let strip = self.tab_strip_bounds(pane_bounds, state);
        if !strip.contains(point) {
            return None;
        }
        (0..count).find(|&i| self.tab_outline(pane_bounds, state, count, i).contains(point))
    }
}

#[derive(Debug, Clone)]
pub struct DefaultStripMetrics {
    pub strip_height: f64,
    pub caption_height: f64,
    pub tab_height: f64,
    pub tab_width: f64,
}

impl Default for DefaultStripMetrics {
    fn default() -> Self {
        Self {
            strip_height: 22.0,
            caption_height: 18.0,
            tab_height: 24.0,
            tab_width: 90.0,
        }
    }
}

impl StripMetrics for DefaultStripMetrics {
    fn measure_height(&self) -> f64 {
        self.strip_height
    }

    fn caption_bounds(&self, pane_bounds: Rect, state: DockState) -> Rect {
        if state == DockState::Document {
            return Rect::ZERO;
        }
        Rect::from_xywh(
            pane_bounds.min_x(),
            pane_bounds.min_y(),
            pane_bounds.width(),
            self.caption_height.min(pane_bounds.height()),
        )
    }

    fn tab_strip_bounds(&self, pane_bounds: Rect, state: DockState) -> Rect {
        let height = self.tab_height.min(pane_bounds.height());
        if state == DockState::Document {
            Rect::from_xywh(pane_bounds.min_x(), pane_bounds.min_y(), pane_bounds.width(), height)
        } else {
            Rect::from_xywh(
                pane_bounds.min_x(),
                pane_bounds.max_y() - height,
                pane_bounds.width(),
                height,
            )
        }
    }

    fn tab_outline(
        &self,
        pane_bounds: Rect,
        state: DockState,
        count: usize,
        index: usize,
    ) -> Rect {
        let strip = self.tab_strip_bounds(pane_bounds, state);
        if index >= count {
            return Rect::ZERO;
        }
        // Tabs shrink evenly once they would overflow the strip.
        let width = self.tab_width.min(strip.width() / count.max(1) as f64);
        Rect::from_xywh(strip.min_x() + width * index as f64, strip.min_y(), width, strip.height())
    }
}
