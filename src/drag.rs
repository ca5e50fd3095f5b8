use bitflags::bitflags;
use tracing::debug;

use crate::content::ContentId;
use crate::error::{DockError, Result};
use crate::geometry::{Point, Rect};
use crate::pane::PaneId;
use crate::panel::{ContainerRef, DockPanel, DockZone, FloatWindowId};
use crate::state::{DockAlignment, DockState, DockStyle};

pub const INDICATOR_SIZE: f64 = 40.0;
pub const INDICATOR_MARGIN: f64 = 10.0;

bitflags! {
    /// Keyboard modifiers observed during a drag.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    pub struct DragModifiers: u8 {
        /// Panel edge indicators claim the full panel edge instead of the
        /// document region's edge.
        const FULL_PANEL_EDGE = 1 << 0;
        /// Suppress all dock targeting; the gesture can only float.
        const SKIP_TARGETING = 1 << 1;
    }
}

/// What is being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragSource {
    Content(ContentId),
    Pane(PaneId),
    FloatWindow(FloatWindowId),
}

/// The placement a drop would produce, updated on every pointer move.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DropTarget {
    None,
    Float {
        bounds: Rect,
    },
    Pane {
        pane: PaneId,
        style: DockStyle,
        /// Tab insertion position for `Fill`; -1 appends.
        content_index: isize,
    },
    PanelEdge {
        style: DockStyle,
        full_edge: bool,
    },
}

impl DropTarget {
    /// Region the outline renderer should highlight.
    pub fn preview_bounds(&self, panel: &DockPanel) -> Option<Rect> {
        match *self {
            DropTarget::None => None,
            DropTarget::Float { bounds } => Some(bounds),
            DropTarget::Pane { pane, style, .. } => {
                let bounds = panel.pane_screen_bounds(pane)?;
                Some(edge_half(bounds, style))
            }
            DropTarget::PanelEdge { style, full_edge } => {
                let area = if full_edge {
                    panel.bounds()
                } else {
                    panel.document_window_bounds()
                };
                Some(edge_quarter(area, style))
            }
        }
    }
}

fn edge_half(bounds: Rect, style: DockStyle) -> Rect {
    match style {
        DockStyle::Left => {
            Rect::from_xywh(bounds.min_x(), bounds.min_y(), bounds.width() / 2.0, bounds.height())
        }
        DockStyle::Right => Rect::from_xywh(
            bounds.min_x() + bounds.width() / 2.0,
            bounds.min_y(),
            bounds.width() / 2.0,
            bounds.height(),
        ),
        DockStyle::Top => {
            Rect::from_xywh(bounds.min_x(), bounds.min_y(), bounds.width(), bounds.height() / 2.0)
        }
        DockStyle::Bottom => Rect::from_xywh(
            bounds.min_x(),
            bounds.min_y() + bounds.height() / 2.0,
            bounds.width(),
            bounds.height() / 2.0,
        ),
        DockStyle::Fill => bounds,
    }
}

fn edge_quarter(area: Rect, style: DockStyle) -> Rect {
    match style {
        DockStyle::Left => {
            Rect::from_xywh(area.min_x(), area.min_y(), area.width() / 4.0, area.height())
        }
        DockStyle::Right => Rect::from_xywh(
            area.max_x() - area.width() / 4.0,
            area.min_y(),
            area.width() / 4.0,
            area.height(),
        ),
        DockStyle::Top => {
            Rect::from_xywh(area.min_x(), area.min_y(), area.width(), area.height() / 4.0)
        }
        DockStyle::Bottom => Rect::from_xywh(
            area.min_x(),
            area.max_y() - area.height() / 4.0,
            area.width(),
            area.height() / 4.0,
        ),
        DockStyle::Fill => area,
    }
}

/// Edge indicator squares along the targeting region.
pub fn panel_indicators(panel: &DockPanel, full_edge: bool) -> [(DockStyle, Rect); 4] {
    let area = if full_edge {
        panel.bounds()
    } else {
        panel.document_window_bounds()
    };
    let s = INDICATOR_SIZE;
    let m = INDICATOR_MARGIN;
    let center = area.center();
    [
        (
            DockStyle::Left,
            Rect::from_xywh(area.min_x() + m, center.y - s / 2.0, s, s),
        ),
        (
            DockStyle::Right,
            Rect::from_xywh(area.max_x() - m - s, center.y - s / 2.0, s, s),
        ),
        (
            DockStyle::Top,
            Rect::from_xywh(center.x - s / 2.0, area.min_y() + m, s, s),
        ),
        (
            DockStyle::Bottom,
            Rect::from_xywh(center.x - s / 2.0, area.max_y() - m - s, s, s),
        ),
    ]
}

/// The five-cell diamond centered on a pane.
pub fn pane_diamond(pane_bounds: Rect) -> [(DockStyle, Rect); 5] {
    let s = INDICATOR_SIZE;
    let c = pane_bounds.center();
    let cell = |dx: f64, dy: f64| Rect::from_xywh(c.x - s / 2.0 + dx, c.y - s / 2.0 + dy, s, s);
    [
        (DockStyle::Fill, cell(0.0, 0.0)),
        (DockStyle::Left, cell(-s, 0.0)),
        (DockStyle::Right, cell(s, 0.0)),
        (DockStyle::Top, cell(0.0, -s)),
        (DockStyle::Bottom, cell(0.0, s)),
    ]
}

struct DragState {
    source: DragSource,
    start: Point,
    base_proxy: Rect,
    outline: DropTarget,
}

/// Drives a drag gesture from begin to commit or abort. The engine never
/// mutates the panel until `commit`; aborting leaves the layout exactly as
/// it was.
#[derive(Default)]
pub struct DockDragEngine {
    state: Option<DragState>,
}

impl DockDragEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }

    pub fn outline(&self) -> Option<DropTarget> {
        self.state.as_ref().map(|s| s.outline)
    }

    /// Validate the source and capture the floating proxy rectangle. The
    /// panel is not touched.
    pub fn begin(&mut self, panel: &DockPanel, source: DragSource, pointer: Point) -> Result<()> {
        if !panel.allow_end_user_docking {
            return Err(DockError::InvalidDragSource);
        }
        let base_proxy = match source {
            DragSource::Content(id) => {
                let handler = panel
                    .contents
                    .get(id)
                    .ok_or(DockError::InvalidDragSource)?;
                if !handler.allow_end_user_docking {
                    return Err(DockError::InvalidDragSource);
                }
                source_proxy(panel, handler.pane(), pointer)
            }
            DragSource::Pane(pane) => {
                if !panel.panes.contains_key(pane) || panel.panes[pane].contents.is_empty() {
                    return Err(DockError::InvalidDragSource);
                }
                let has_locked = panel.panes[pane]
                    .contents
                    .iter()
                    .any(|&c| !panel.contents[c].allow_end_user_docking);
                if has_locked {
                    return Err(DockError::InvalidDragSource);
                }
                source_proxy(panel, Some(pane), pointer)
            }
            DragSource::FloatWindow(window) => {
                let Some(panes) = panel.float_window_panes(window) else {
                    return Err(DockError::InvalidDragSource);
                };
                if panes.is_empty() {
                    return Err(DockError::InvalidDragSource);
                }
                let has_locked = panes.iter().any(|&p| {
                    panel.panes[p]
                        .contents
                        .iter()
                        .any(|&c| !panel.contents[c].allow_end_user_docking)
                });
                if has_locked {
                    return Err(DockError::InvalidDragSource);
                }
                panel
                    .float_window_bounds(window)
                    .ok_or(DockError::InvalidDragSource)?
            }
        };
        debug!(?source, "drag begun");
        self.state = Some(DragState {
            source,
            start: pointer,
            base_proxy,
            outline: DropTarget::None,
        });
        Ok(())
    }

    /// Recompute the drop target for the current pointer position. Pure
    /// with respect to the panel.
    pub fn update(&mut self, panel: &DockPanel, pointer: Point, modifiers: DragModifiers) {
        let Some(state) = &mut self.state else { return };
        let proxy = state
            .base_proxy
            .offset(pointer.x - state.start.x, pointer.y - state.start.y);
        let target = compute_target(panel, state.source, pointer, modifiers, proxy);
        if target != state.outline {
            state.outline = target;
        }
    }

    /// Discard the gesture without touching the panel.
    pub fn abort(&mut self) {
        if self.state.take().is_some() {
            debug!("drag aborted");
        }
    }

    /// Apply the current target. The engine resets regardless of outcome.
    pub fn commit(&mut self, panel: &mut DockPanel) -> Result<()> {
        let Some(state) = self.state.take() else {
            return Ok(());
        };
        debug!(source = ?state.source, target = ?state.outline, "drag committed");
        match state.outline {
            DropTarget::None => Ok(()),
            DropTarget::Float { bounds } => match state.source {
                DragSource::Content(id) => panel.float_at(id, bounds),
                DragSource::Pane(pane) => panel.float_pane_at(pane, bounds),
                DragSource::FloatWindow(window) => panel.move_float_window(window, bounds),
            },
            DropTarget::Pane {
                pane,
                style,
                content_index,
            } => match state.source {
                DragSource::Content(id) => {
                    panel.dock_content_to_pane(id, pane, style, content_index)
                }
                DragSource::Pane(source) => {
                    panel.dock_pane_to_pane(source, pane, style, content_index)
                }
                DragSource::FloatWindow(window) => {
                    panel.dock_float_window_to_pane(window, pane, style, content_index)
                }
            },
            DropTarget::PanelEdge { style, .. } => match state.source {
                DragSource::Content(id) => panel.dock_content_to_panel(id, style),
                DragSource::Pane(source) => panel.dock_pane_to_panel(source, style),
                DragSource::FloatWindow(window) => {
                    panel.dock_float_window_to_panel(window, style)
                }
            },
        }
    }
}

fn source_proxy(panel: &DockPanel, pane: Option<PaneId>, pointer: Point) -> Rect {
    // A pane that owns its float window drags that window's rectangle;
    // anything else gets the default float size.
    if let Some(pane) = pane
        && let Some(window) = panel.pane_float_window(pane)
        && let Some(panes) = panel.float_window_panes(window)
        && panes.len() == 1
        && let Some(bounds) = panel.float_window_bounds(window)
    {
        return bounds;
    }
    let size = panel.default_float_window_size();
    Rect::from_xywh(pointer.x - size.width / 2.0, pointer.y - 8.0, size.width, size.height)
}

fn source_allows(panel: &DockPanel, source: DragSource, state: DockState) -> bool {
    match source {
        DragSource::Content(id) => panel.is_dock_state_valid(id, state),
        DragSource::Pane(pane) => panel
            .panes
            .get(pane)
            .is_some_and(|p| p.contents.iter().all(|&c| panel.is_dock_state_valid(c, state))),
        DragSource::FloatWindow(window) => {
            panel.float_window_panes(window).is_some_and(|panes| {
                panes.iter().all(|&p| {
                    panel.panes[p]
                        .contents
                        .iter()
                        .all(|&c| panel.is_dock_state_valid(c, state))
                })
            })
        }
    }
}

fn can_dock_to(panel: &DockPanel, source: DragSource, target: PaneId) -> bool {
    let Some(target_pane) = panel.panes.get(target) else {
        return false;
    };
    if !source_allows(panel, source, target_pane.dock_state) {
        return false;
    }
    match source {
        // Reordering within a multi-tab pane is legal; a sole tab dropping
        // on its own pane is a no-op gesture.
        DragSource::Content(id) => {
            !(panel.content_pane(id) == Some(target) && panel.pane_displaying_count(target) == 1)
        }
        DragSource::Pane(pane) => pane != target,
        // A window cannot drop onto one of its own panes.
        DragSource::FloatWindow(window) => panel.pane_float_window(target) != Some(window),
    }
}

fn compute_target(
    panel: &DockPanel,
    source: DragSource,
    pointer: Point,
    modifiers: DragModifiers,
    proxy: Rect,
) -> DropTarget {
    let float_fallback = || {
        if source_allows(panel, source, DockState::Float) {
            DropTarget::Float { bounds: proxy }
        } else {
            DropTarget::None
        }
    };

    if modifiers.contains(DragModifiers::SKIP_TARGETING) {
        return float_fallback();
    }

    let full_edge = modifiers.contains(DragModifiers::FULL_PANEL_EDGE);
    for (style, bounds) in panel_indicators(panel, full_edge) {
        if bounds.contains(pointer) && source_allows(panel, source, edge_state(style)) {
            return DropTarget::PanelEdge { style, full_edge };
        }
    }

    if let Some(pane) = pane_at(panel, pointer)
        && can_dock_to(panel, source, pane)
    {
        let bounds = match panel.pane_screen_bounds(pane) {
            Some(bounds) => bounds,
            None => return float_fallback(),
        };
        for (style, cell) in pane_diamond(bounds) {
            if cell.contains(pointer)
                && (style == DockStyle::Fill || panel.allow_end_user_nested_docking)
            {
                return DropTarget::Pane {
                    pane,
                    style,
                    content_index: -1,
                };
            }
        }
        let state = panel.panes[pane].dock_state;
        let metrics = panel.strip_metrics();
        if metrics.caption_bounds(bounds, state).contains(pointer) {
            return DropTarget::Pane {
                pane,
                style: DockStyle::Fill,
                content_index: -1,
            };
        }
        let strip = metrics.tab_strip_bounds(bounds, state);
        if strip.contains(pointer) {
            let count = panel.panes[pane].contents.len();
            let index = metrics
                .hit_test_tab(bounds, state, count, pointer)
                .map_or(-1, |i| i as isize);
            return DropTarget::Pane {
                pane,
                style: DockStyle::Fill,
                content_index: index,
            };
        }
    }

    float_fallback()
}

fn edge_state(style: DockStyle) -> DockState {
    match style {
        DockStyle::Left => DockState::DockLeft,
        DockStyle::Right => DockState::DockRight,
        DockStyle::Top => DockState::DockTop,
        DockStyle::Bottom => DockState::DockBottom,
        DockStyle::Fill => DockState::Document,
    }
}

/// Topmost pane under `point`: floating windows first, newest on top, then
/// the zone containers.
fn pane_at(panel: &DockPanel, point: Point) -> Option<PaneId> {
    let mut windows = panel.float_window_ids();
    windows.reverse();
    for window in windows {
        let Some(panes) = panel.float_window_panes(window) else {
            continue;
        };
        for &pane in panes {
            if panel
                .pane_screen_bounds(pane)
                .is_some_and(|b| b.contains(point))
                && !panel.pane_is_hidden(pane)
            {
                return Some(pane);
            }
        }
    }
    for zone in DockZone::ALL {
        for &pane in panel.zone_panes(zone) {
            if !panel.pane_is_hidden(pane)
                && !panel.panes[pane].is_auto_hide()
                && panel.panes[pane].bounds.contains(point)
            {
                return Some(pane);
            }
        }
    }
    None
}

impl DockPanel {
    /// Screen-space bounds of a pane: zone panes already carry them; float
    /// panes are offset by their window's origin.
    pub fn pane_screen_bounds(&self, pane: PaneId) -> Option<Rect> {
        let entry = self.panes.get(pane)?;
        match self.pane_float_window(pane) {
            Some(window) => {
                let origin = self.float_window_bounds(window)?.origin;
                Some(entry.bounds.offset(origin.x, origin.y))
            }
            None => Some(entry.bounds),
        }
    }

    /// Merge `content` into `target` (`Fill`) or split `target`'s region on
    /// one side for a new pane carrying it.
    pub fn dock_content_to_pane(
        &mut self,
        content: ContentId,
        target: PaneId,
        style: DockStyle,
        content_index: isize,
    ) -> Result<()> {
        let state = self
            .panes
            .get(target)
            .ok_or(DockError::InvalidDropTarget)?
            .dock_state;
        self.contents.get(content).ok_or(DockError::NullContainer)?;
        if !self.is_dock_state_valid(content, state) {
            return Err(DockError::InvalidDropTarget);
        }

        self.suspend_layout();
        let result = self.dock_content_to_pane_body(content, target, style, content_index, state);
        self.resume_layout(true);
        result
    }

    fn dock_content_to_pane_body(
        &mut self,
        content: ContentId,
        target: PaneId,
        style: DockStyle,
        content_index: isize,
        state: DockState,
    ) -> Result<()> {
        if style == DockStyle::Fill {
            let same_pane = self.content_pane(content) == Some(target);
            let old_index = if same_pane {
                self.panes[target].index_of(content)
            } else {
                None
            };
            self.show_in_pane(content, target)?;
            // Moving a tab rightward within its own pane: the vacated slot
            // shifts the target index down one.
            let index = match (content_index, old_index) {
                (-1, _) => -1,
                (i, Some(old)) if i > old as isize => i - 1,
                (i, _) => i,
            };
            self.set_content_index(content, index)
        } else {
            let Some(alignment) = style.alignment() else {
                return Err(DockError::InvalidDropTarget);
            };
            let container = self
                .container_of(target)
                .ok_or(DockError::InvalidDropTarget)?;
            let pane_from = self.create_pane_for(content, state, true)?;
            self.dock_pane_nested(pane_from, container, target, alignment, 0.5)
        }
    }

    /// Dock `content` against a panel edge, or into the document zone for
    /// `Fill`. Always creates a fresh pane.
    pub fn dock_content_to_panel(&mut self, content: ContentId, style: DockStyle) -> Result<()> {
        let state = edge_state(style);
        self.contents.get(content).ok_or(DockError::NullContainer)?;
        if !self.is_dock_state_valid(content, state) {
            return Err(DockError::InvalidDropTarget);
        }
        self.suspend_layout();
        let result = self
            .create_pane_for(content, state, true)
            .and_then(|_| self.activate(content));
        self.resume_layout(true);
        result
    }

    /// Float the whole pane in a window at `bounds`. A pane already sole in
    /// its window just moves the window.
    pub fn float_pane_at(&mut self, pane: PaneId, bounds: Rect) -> Result<()> {
        self.panes.get(pane).ok_or(DockError::InvalidPaneReference)?;
        let allowed = self.panes[pane]
            .contents
            .iter()
            .all(|&c| self.is_dock_state_valid(c, DockState::Float));
        if !allowed {
            return Err(DockError::InvalidDropTarget);
        }
        if let Some(window) = self.pane_float_window(pane)
            && self
                .float_window_panes(window)
                .is_some_and(|panes| panes.len() == 1)
        {
            self.float_windows[window].bounds = bounds;
            self.request_layout();
            return Ok(());
        }
        self.suspend_layout();
        let window = self.create_float_window(Some(bounds));
        let result =
            self.pane_set_dock_state_to(pane, DockState::Float, Some(ContainerRef::Float(window)));
        self.resume_layout(true);
        result
    }

    /// Merge a whole pane into `target` (`Fill`) or split `target`'s region
    /// for it.
    pub fn dock_pane_to_pane(
        &mut self,
        source: PaneId,
        target: PaneId,
        style: DockStyle,
        content_index: isize,
    ) -> Result<()> {
        if source == target {
            return Err(DockError::InvalidDropTarget);
        }
        let state = self
            .panes
            .get(target)
            .ok_or(DockError::InvalidDropTarget)?
            .dock_state;
        self.panes.get(source).ok_or(DockError::InvalidPaneReference)?;
        let allowed = self.panes[source]
            .contents
            .iter()
            .all(|&c| self.is_dock_state_valid(c, state));
        if !allowed {
            return Err(DockError::InvalidDropTarget);
        }

        self.suspend_layout();
        let result = if style == DockStyle::Fill {
            let contents = self.panes[source].contents.clone();
            let mut at = content_index;
            contents.into_iter().try_for_each(|content| {
                self.show_in_pane(content, target)?;
                if at != -1 {
                    self.set_content_index(content, at)?;
                    at += 1;
                }
                Ok(())
            })
        } else {
            match style.alignment() {
                None => Err(DockError::InvalidDropTarget),
                Some(alignment) => self
                    .container_of(target)
                    .ok_or(DockError::InvalidDropTarget)
                    .and_then(|container| {
                        self.pane_set_dock_state_to(source, state, Some(container))?;
                        self.dock_pane_nested(source, container, target, alignment, 0.5)
                    }),
            }
        };
        self.resume_layout(true);
        result
    }

    /// Dock a whole pane against a panel edge.
    pub fn dock_pane_to_panel(&mut self, source: PaneId, style: DockStyle) -> Result<()> {
        let state = edge_state(style);
        self.panes.get(source).ok_or(DockError::InvalidPaneReference)?;
        let allowed = self.panes[source]
            .contents
            .iter()
            .all(|&c| self.is_dock_state_valid(c, state));
        if !allowed {
            return Err(DockError::InvalidDropTarget);
        }
        self.pane_set_dock_state(source, state)
    }

    /// Move a floating window without re-docking anything.
    pub fn move_float_window(&mut self, window: FloatWindowId, bounds: Rect) -> Result<()> {
        if !self.float_windows.contains_key(window) {
            return Err(DockError::InvalidPaneReference);
        }
        self.float_windows[window].bounds = bounds;
        self.request_layout();
        Ok(())
    }

    /// Merge every tab of the window into `target` (`Fill`), or split
    /// `target`'s region for the window's root pane and replay the rest of
    /// the window's split chain around it.
    pub fn dock_float_window_to_pane(
        &mut self,
        window: FloatWindowId,
        target: PaneId,
        style: DockStyle,
        content_index: isize,
    ) -> Result<()> {
        if self.pane_float_window(target) == Some(window) {
            return Err(DockError::InvalidDropTarget);
        }
        let state = self
            .panes
            .get(target)
            .ok_or(DockError::InvalidDropTarget)?
            .dock_state;
        if style == DockStyle::Fill {
            let panes: Vec<PaneId> = self
                .float_window_panes(window)
                .ok_or(DockError::InvalidPaneReference)?
                .to_vec();
            self.suspend_layout();
            let result = (|| -> Result<()> {
                let mut at = content_index;
                for pane in panes {
                    let moved = self.panes[pane].contents.len() as isize;
                    self.dock_pane_to_pane(pane, target, DockStyle::Fill, at)?;
                    if at != -1 {
                        at += moved;
                    }
                }
                Ok(())
            })();
            self.resume_layout(true);
            result
        } else {
            let alignment = style.alignment().ok_or(DockError::InvalidDropTarget)?;
            let container = self
                .container_of(target)
                .ok_or(DockError::InvalidDropTarget)?;
            self.dock_float_window_panes(window, state, container, Some((target, alignment)))
        }
    }

    /// Re-dock every pane of a floating window against a panel edge,
    /// preserving the window's internal split chain.
    pub fn dock_float_window_to_panel(
        &mut self,
        window: FloatWindowId,
        style: DockStyle,
    ) -> Result<()> {
        let state = edge_state(style);
        let zone = DockZone::of(state).ok_or(DockError::InvalidDropTarget)?;
        self.dock_float_window_panes(window, state, ContainerRef::Zone(zone), None)
    }

    /// Move the window's panes into `container` in list order. Each pane
    /// keeps its anchor triple toward siblings from the same window; the
    /// root pane either splits `split`'s target at 0.5 or docks at the
    /// container default.
    fn dock_float_window_panes(
        &mut self,
        window: FloatWindowId,
        state: DockState,
        container: ContainerRef,
        split: Option<(PaneId, DockAlignment)>,
    ) -> Result<()> {
        let panes: Vec<PaneId> = self
            .float_window_panes(window)
            .ok_or(DockError::InvalidPaneReference)?
            .to_vec();
        if panes.is_empty() {
            return Err(DockError::InvalidDropTarget);
        }
        for &pane in &panes {
            let allowed = self.panes[pane]
                .contents
                .iter()
                .all(|&c| self.is_dock_state_valid(c, state));
            if !allowed {
                return Err(DockError::InvalidDropTarget);
            }
        }
        // Captured up front: removals rewrite the survivors' anchors.
        let chain: Vec<(PaneId, Option<PaneId>, DockAlignment, f64)> = panes
            .iter()
            .map(|&p| {
                let nested = &self.panes[p].nested;
                (p, nested.previous_pane, nested.alignment, nested.proportion)
            })
            .collect();

        self.suspend_layout();
        let result = (|| -> Result<()> {
            for (i, &(pane, prev, alignment, proportion)) in chain.iter().enumerate() {
                self.pane_set_dock_state_to(pane, state, Some(container))?;
                match prev {
                    Some(prev) if panes.contains(&prev) => {
                        self.dock_pane_nested(pane, container, prev, alignment, proportion)?;
                    }
                    _ => {
                        if i == 0
                            && let Some((target, alignment)) = split
                        {
                            self.dock_pane_nested(pane, container, target, alignment, 0.5)?;
                        }
                    }
                }
            }
            Ok(())
        })();
        self.resume_layout(true);
        result
    }
}
