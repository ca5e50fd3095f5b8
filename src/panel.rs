use slotmap::{SecondaryMap, SlotMap, new_key_type};
use tracing::{debug, info};

use crate::content::{ContentHandler, ContentId, DockContent};
use crate::error::{DockError, Result};
use crate::geometry::{Rect, Size};
use crate::metrics::{DefaultStripMetrics, StripMetrics};
use crate::nested::NestedPaneCollection;
use crate::pane::{Pane, PaneId};
use crate::state::{DockAlignment, DockState, DocumentHostMode};

new_key_type! {
    pub struct FloatWindowId;
}

/// Minimum pixel extent any docked region may shrink to.
pub const MIN_PANE_SIZE: f64 = 24.0;

const DEFAULT_FLOAT_WINDOW_SIZE: Size = Size::new(300.0, 300.0);

/// The five fixed docking regions of the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DockZone {
    Left = 0,
    Right = 1,
    Top = 2,
    Bottom = 3,
    Document = 4,
}

impl DockZone {
    pub const ALL: [DockZone; 5] = [
        DockZone::Left,
        DockZone::Right,
        DockZone::Top,
        DockZone::Bottom,
        DockZone::Document,
    ];

    /// Zone hosting panes in `state`. Auto-hide panes stay registered in
    /// their side's zone.
    pub fn of(state: DockState) -> Option<DockZone> {
        match state {
            DockState::Document => Some(DockZone::Document),
            DockState::DockLeft | DockState::DockLeftAutoHide => Some(DockZone::Left),
            DockState::DockRight | DockState::DockRightAutoHide => Some(DockZone::Right),
            DockState::DockTop | DockState::DockTopAutoHide => Some(DockZone::Top),
            DockState::DockBottom | DockState::DockBottomAutoHide => Some(DockZone::Bottom),
            _ => None,
        }
    }

    pub fn pinned_state(self) -> DockState {
        match self {
            DockZone::Left => DockState::DockLeft,
            DockZone::Right => DockState::DockRight,
            DockZone::Top => DockState::DockTop,
            DockZone::Bottom => DockState::DockBottom,
            DockZone::Document => DockState::Document,
        }
    }
}

/// Where a pane lives: one of the five zones, or a floating window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerRef {
    Zone(DockZone),
    Float(FloatWindowId),
}

#[derive(Debug, Clone, Default)]
struct DockWindow {
    nested: NestedPaneCollection,
    bounds: Rect,
}

/// A top-level floating window hosting its own nested pane tree.
#[derive(Debug, Clone)]
pub struct FloatWindow {
    pub(crate) nested: NestedPaneCollection,
    pub bounds: Rect,
}

/// Notifications drained by the host after each batch of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DockEvent {
    ContentAdded(ContentId),
    ContentRemoved(ContentId),
    DockStateChanged {
        content: ContentId,
        old: DockState,
        new: DockState,
    },
    ActiveContentChanged(Option<ContentId>),
    ActiveAutoHideContentChanged(Option<ContentId>),
    PaneDisposed(PaneId),
    FloatWindowDisposed(FloatWindowId),
}

/// The root orchestrator: owns every content handler, pane and floating
/// window, the five zone containers, the side portions, focus bookkeeping
/// and the layout pass.
pub struct DockPanel {
    pub(crate) contents: SlotMap<ContentId, ContentHandler>,
    pub(crate) panes: SlotMap<PaneId, Pane>,
    pub(crate) float_windows: SlotMap<FloatWindowId, FloatWindow>,
    pub(crate) pane_float_windows: SecondaryMap<PaneId, FloatWindowId>,
    pub(crate) content_order: Vec<ContentId>,
    dock_windows: [DockWindow; 5],
    bounds: Rect,
    dock_left_portion: f64,
    dock_right_portion: f64,
    dock_top_portion: f64,
    dock_bottom_portion: f64,
    pub(crate) document_host_mode: DocumentHostMode,
    pub allow_end_user_docking: bool,
    pub allow_end_user_nested_docking: bool,
    default_float_window_size: Size,
    active_content: Option<ContentId>,
    activated_pane: Option<PaneId>,
    active_auto_hide_content: Option<ContentId>,
    focus_list: Vec<ContentId>,
    layout_suspend_count: u32,
    layout_pending: bool,
    pending_float_disposals: Vec<FloatWindowId>,
    events: Vec<DockEvent>,
    strip_metrics: Box<dyn StripMetrics>,
}

impl DockPanel {
    pub fn new(bounds: Rect) -> Self {
        Self {
            contents: SlotMap::with_key(),
            panes: SlotMap::with_key(),
            float_windows: SlotMap::with_key(),
            pane_float_windows: SecondaryMap::new(),
            content_order: Vec::new(),
            dock_windows: std::array::from_fn(|_| DockWindow::default()),
            bounds,
            dock_left_portion: 0.25,
            dock_right_portion: 0.25,
            dock_top_portion: 0.25,
            dock_bottom_portion: 0.25,
            document_host_mode: DocumentHostMode::default(),
            allow_end_user_docking: true,
            allow_end_user_nested_docking: true,
            default_float_window_size: DEFAULT_FLOAT_WINDOW_SIZE,
            active_content: None,
            activated_pane: None,
            active_auto_hide_content: None,
            focus_list: Vec::new(),
            layout_suspend_count: 0,
            layout_pending: false,
            pending_float_disposals: Vec::new(),
            events: Vec::new(),
            strip_metrics: Box::new(DefaultStripMetrics::default()),
        }
    }

    pub fn add_content(&mut self, content: Box<dyn DockContent>) -> ContentId {
        let id = self.contents.insert(ContentHandler::new(content));
        self.content_order.push(id);
        info!(?id, "content added");
        self.push_event(DockEvent::ContentAdded(id));
        id
    }

    pub fn content_ids(&self) -> &[ContentId] {
        &self.content_order
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.request_layout();
    }

    pub fn document_host_mode(&self) -> DocumentHostMode {
        self.document_host_mode
    }

    /// Switching to `SystemManaged` is refused while the document container
    /// still holds panes.
    pub fn set_document_host_mode(&mut self, mode: DocumentHostMode) -> Result<()> {
        if mode == DocumentHostMode::SystemManaged
            && !self.dock_windows[DockZone::Document as usize].nested.is_empty()
        {
            return Err(DockError::InvalidStateTransition(DockState::Document));
        }
        self.document_host_mode = mode;
        Ok(())
    }

    pub fn strip_metrics(&self) -> &dyn StripMetrics {
        self.strip_metrics.as_ref()
    }

    pub fn set_strip_metrics(&mut self, metrics: Box<dyn StripMetrics>) {
        self.strip_metrics = metrics;
        self.request_layout();
    }

    pub fn default_float_window_size(&self) -> Size {
        self.default_float_window_size
    }

    pub fn set_default_float_window_size(&mut self, size: Size) {
        self.default_float_window_size = size;
    }

    // ---- side portions -------------------------------------------------

    pub fn dock_left_portion(&self) -> f64 {
        self.dock_left_portion
    }

    pub fn dock_right_portion(&self) -> f64 {
        self.dock_right_portion
    }

    pub fn dock_top_portion(&self) -> f64 {
        self.dock_top_portion
    }

    pub fn dock_bottom_portion(&self) -> f64 {
        self.dock_bottom_portion
    }

    /// A portion is pixels when >= 1, a fraction of the dock area otherwise.
    /// Assigning a fraction shrinks the opposing fractional portion so the
    /// pair never claims more than the whole; pixel portions are left alone.
    pub fn set_dock_left_portion(&mut self, value: f64) -> Result<()> {
        Self::check_portion(value)?;
        self.dock_left_portion = value;
        if self.dock_left_portion < 1.0
            && self.dock_right_portion < 1.0
            && self.dock_left_portion + self.dock_right_portion > 1.0
        {
            self.dock_right_portion = 1.0 - self.dock_left_portion;
        }
        self.request_layout();
        Ok(())
    }

    pub fn set_dock_right_portion(&mut self, value: f64) -> Result<()> {
        Self::check_portion(value)?;
        self.dock_right_portion = value;
        if self.dock_right_portion < 1.0
            && self.dock_left_portion < 1.0
            && self.dock_left_portion + self.dock_right_portion > 1.0
        {
            self.dock_left_portion = 1.0 - self.dock_right_portion;
        }
        self.request_layout();
        Ok(())
    }

    pub fn set_dock_top_portion(&mut self, value: f64) -> Result<()> {
        Self::check_portion(value)?;
        self.dock_top_portion = value;
        if self.dock_top_portion < 1.0
            && self.dock_bottom_portion < 1.0
            && self.dock_top_portion + self.dock_bottom_portion > 1.0
        {
            self.dock_bottom_portion = 1.0 - self.dock_top_portion;
        }
        self.request_layout();
        Ok(())
    }

    pub fn set_dock_bottom_portion(&mut self, value: f64) -> Result<()> {
        Self::check_portion(value)?;
        self.dock_bottom_portion = value;
        if self.dock_bottom_portion < 1.0
            && self.dock_top_portion < 1.0
            && self.dock_top_portion + self.dock_bottom_portion > 1.0
        {
            self.dock_top_portion = 1.0 - self.dock_bottom_portion;
        }
        self.request_layout();
        Ok(())
    }

    fn check_portion(value: f64) -> Result<()> {
        if value <= 0.0 || !value.is_finite() {
            return Err(DockError::InvalidPortion(value));
        }
        Ok(())
    }

    // ---- containers ----------------------------------------------------

    pub fn zone_panes(&self, zone: DockZone) -> &[PaneId] {
        self.dock_windows[zone as usize].nested.as_slice()
    }

    pub fn zone_bounds(&self, zone: DockZone) -> Rect {
        self.dock_windows[zone as usize].bounds
    }

    pub fn float_window_panes(&self, window: FloatWindowId) -> Option<&[PaneId]> {
        self.float_windows.get(window).map(|f| f.nested.as_slice())
    }

    pub fn float_window_bounds(&self, window: FloatWindowId) -> Option<Rect> {
        self.float_windows.get(window).map(|f| f.bounds)
    }

    pub fn float_window_ids(&self) -> Vec<FloatWindowId> {
        self.float_windows.keys().collect()
    }

    pub fn pane_float_window(&self, pane: PaneId) -> Option<FloatWindowId> {
        self.pane_float_windows.get(pane).copied()
    }

    /// The container currently holding `pane`.
    pub fn container_of(&self, pane: PaneId) -> Option<ContainerRef> {
        if let Some(&window) = self.pane_float_windows.get(pane) {
            return Some(ContainerRef::Float(window));
        }
        DockZone::ALL
            .into_iter()
            .find(|&zone| self.dock_windows[zone as usize].nested.contains(pane))
            .map(ContainerRef::Zone)
    }

    pub(crate) fn container_collection(
        &self,
        container: ContainerRef,
    ) -> Option<&NestedPaneCollection> {
        match container {
            ContainerRef::Zone(zone) => Some(&self.dock_windows[zone as usize].nested),
            ContainerRef::Float(window) => self.float_windows.get(window).map(|f| &f.nested),
        }
    }

    pub(crate) fn container_collection_mut(
        &mut self,
        container: ContainerRef,
    ) -> Result<(&mut NestedPaneCollection, &mut SlotMap<PaneId, Pane>)> {
        match container {
            ContainerRef::Zone(zone) => {
                Ok((&mut self.dock_windows[zone as usize].nested, &mut self.panes))
            }
            ContainerRef::Float(window) => {
                let float = self
                    .float_windows
                    .get_mut(window)
                    .ok_or(DockError::InvalidPaneReference)?;
                Ok((&mut float.nested, &mut self.panes))
            }
        }
    }

    pub(crate) fn zone_collection_mut(
        &mut self,
        zone: DockZone,
    ) -> (&mut NestedPaneCollection, &mut SlotMap<PaneId, Pane>) {
        (&mut self.dock_windows[zone as usize].nested, &mut self.panes)
    }

    /// Every pane in deterministic order: zone collections first, then the
    /// panes of each floating window.
    pub fn panes_in_order(&self) -> Vec<PaneId> {
        let mut out = Vec::with_capacity(self.panes.len());
        for zone in DockZone::ALL {
            out.extend(self.dock_windows[zone as usize].nested.iter());
        }
        for (_, float) in &self.float_windows {
            out.extend(float.nested.iter());
        }
        out
    }

    /// First pane in `state`, preferring the activated one.
    pub(crate) fn find_pane(&self, state: DockState) -> Option<PaneId> {
        let mut first = None;
        for pane in self.panes_in_order() {
            if self.panes[pane].dock_state == state {
                if self.panes[pane].is_activated {
                    return Some(pane);
                }
                first.get_or_insert(pane);
            }
        }
        first
    }

    // ---- factories and disposal ----------------------------------------

    /// Allocate a pane in `state`, attach it to the matching container at
    /// the default position and move `content` into it. With `show` the
    /// content's state machine is driven immediately; otherwise the caller
    /// is mid-transition and will finish the job.
    pub(crate) fn create_pane_for(
        &mut self,
        content: ContentId,
        state: DockState,
        show: bool,
    ) -> Result<PaneId> {
        let container = match state {
            DockState::Float => ContainerRef::Float(self.create_float_window(None)),
            _ => {
                let Some(zone) = DockZone::of(state) else {
                    return Err(DockError::InvalidStateTransition(state));
                };
                ContainerRef::Zone(zone)
            }
        };
        let pane = self.panes.insert(Pane::new(state));
        debug!(?pane, ?state, "pane created");
        self.dock_pane_to(pane, container)?;
        self.attach_content_to_pane(content, pane);
        if show {
            self.set_dock_state_inner(content, false, state, None)?;
        }
        Ok(pane)
    }

    pub(crate) fn create_float_window(&mut self, bounds: Option<Rect>) -> FloatWindowId {
        let bounds = bounds.unwrap_or_else(|| self.bounds.centered(self.default_float_window_size));
        let window = self.float_windows.insert(FloatWindow {
            nested: NestedPaneCollection::default(),
            bounds,
        });
        debug!(?window, "float window created");
        window
    }

    /// Remove an emptied pane from the model. Content slots pointing at it
    /// are cleared; an emptied float window is queued, not dropped inline.
    pub(crate) fn dispose_pane(&mut self, pane: PaneId) {
        self.detach_pane_from_container(pane);
        for (_, handler) in &mut self.contents {
            if handler.panel_pane == Some(pane) {
                handler.panel_pane = None;
            }
            if handler.float_pane == Some(pane) {
                handler.float_pane = None;
            }
        }
        if self.activated_pane == Some(pane) {
            self.activated_pane = None;
        }
        self.panes.remove(pane);
        debug!(?pane, "pane disposed");
        self.push_event(DockEvent::PaneDisposed(pane));
        self.request_layout();
    }

    pub(crate) fn queue_float_window_disposal(&mut self, window: FloatWindowId) {
        if !self.pending_float_disposals.contains(&window) {
            self.pending_float_disposals.push(window);
        }
    }

    /// Drop queued float windows that are still empty. Runs when the last
    /// layout suspension lifts, so disposal never happens mid-operation.
    fn process_pending_disposals(&mut self) {
        while let Some(window) = self.pending_float_disposals.pop() {
            if self
                .float_windows
                .get(window)
                .is_some_and(|f| f.nested.is_empty())
            {
                self.float_windows.remove(window);
                debug!(?window, "float window disposed");
                self.push_event(DockEvent::FloatWindowDisposed(window));
            }
        }
    }

    // ---- layout --------------------------------------------------------

    pub fn suspend_layout(&mut self) {
        self.layout_suspend_count += 1;
    }

    pub fn resume_layout(&mut self, perform: bool) {
        self.layout_suspend_count = self.layout_suspend_count.saturating_sub(1);
        if perform {
            self.layout_pending = true;
        }
        if self.layout_suspend_count == 0 {
            self.process_pending_disposals();
            if self.layout_pending {
                self.perform_layout();
            }
        }
    }

    pub(crate) fn request_layout(&mut self) {
        if self.layout_suspend_count == 0 {
            self.perform_layout();
        } else {
            self.layout_pending = true;
        }
    }

    /// Client area left after reserving auto-hide strips on sides that have
    /// auto-hidden panes.
    pub fn dock_area(&self) -> Rect {
        let strip = self.strip_metrics.measure_height();
        let mut area = self.bounds;
        if self.has_auto_hide_panes(DockAlignment::Left) {
            area.origin.x += strip;
            area.size.width -= strip;
        }
        if self.has_auto_hide_panes(DockAlignment::Right) {
            area.size.width -= strip;
        }
        if self.has_auto_hide_panes(DockAlignment::Top) {
            area.origin.y += strip;
            area.size.height -= strip;
        }
        if self.has_auto_hide_panes(DockAlignment::Bottom) {
            area.size.height -= strip;
        }
        area
    }

    fn has_auto_hide_panes(&self, side: DockAlignment) -> bool {
        self.panes.iter().any(|(id, pane)| {
            pane.is_auto_hide() && pane.dock_state.side() == Some(side) && !self.pane_is_hidden(id)
        })
    }

    fn zone_visible(&self, zone: DockZone) -> bool {
        self.dock_windows[zone as usize].nested.iter().any(|pane| {
            self.panes[pane].dock_state == zone.pinned_state() && !self.pane_is_hidden(pane)
        })
    }

    /// Pixel extent granted to a side zone. Portions >= 1 are absolute pixel
    /// sizes and are taken as-is; fractional portions are resolved against
    /// the dock area and the opposing pair is shrunk evenly when the two
    /// would not leave a minimum middle region.
    pub fn dock_window_size(&self, zone: DockZone) -> f64 {
        if !self.zone_visible(zone) {
            return 0.0;
        }
        let area = self.dock_area();
        let (portion, opposing, total) = match zone {
            DockZone::Left => (self.dock_left_portion, self.dock_right_portion, area.width()),
            DockZone::Right => (self.dock_right_portion, self.dock_left_portion, area.width()),
            DockZone::Top => (self.dock_top_portion, self.dock_bottom_portion, area.height()),
            DockZone::Bottom => (self.dock_bottom_portion, self.dock_top_portion, area.height()),
            DockZone::Document => return 0.0,
        };

        let resolve = |p: f64| {
            let size = if p >= 1.0 { p } else { total * p };
            size.max(MIN_PANE_SIZE)
        };
        let mut size = resolve(portion);
        let opposing_size = resolve(opposing);
        if portion < 1.0
            && opposing < 1.0
            && size + opposing_size > total - MIN_PANE_SIZE
        {
            let adjust = size + opposing_size - (total - MIN_PANE_SIZE);
            size -= adjust / 2.0;
        }
        size.max(0.0)
    }

    /// Region left for the document zone after the four side zones.
    pub fn document_window_bounds(&self) -> Rect {
        let area = self.dock_area();
        let left = self.dock_window_size(DockZone::Left);
        let right = self.dock_window_size(DockZone::Right);
        let top = self.dock_window_size(DockZone::Top);
        let bottom = self.dock_window_size(DockZone::Bottom);
        Rect::from_xywh(
            area.min_x() + left,
            area.min_y() + top,
            area.width() - left - right,
            area.height() - top - bottom,
        )
    }

    /// Flyout region of the active auto-hide content, carved from the dock
    /// area per the content's remembered portion.
    pub fn auto_hide_window_bounds(&self) -> Option<Rect> {
        let content = self.active_auto_hide_content?;
        let handler = self.contents.get(content)?;
        let side = handler.dock_state.side()?;
        let area = self.dock_area();
        let portion = handler.auto_hide_portion;
        let rect = match side {
            DockAlignment::Left => {
                let w = if portion >= 1.0 { portion } else { area.width() * portion };
                Rect::from_xywh(area.min_x(), area.min_y(), w.min(area.width()), area.height())
            }
            DockAlignment::Right => {
                let w = if portion >= 1.0 { portion } else { area.width() * portion };
                let w = w.min(area.width());
                Rect::from_xywh(area.max_x() - w, area.min_y(), w, area.height())
            }
            DockAlignment::Top => {
                let h = if portion >= 1.0 { portion } else { area.height() * portion };
                Rect::from_xywh(area.min_x(), area.min_y(), area.width(), h.min(area.height()))
            }
            DockAlignment::Bottom => {
                let h = if portion >= 1.0 { portion } else { area.height() * portion };
                let h = h.min(area.height());
                Rect::from_xywh(area.min_x(), area.max_y() - h, area.width(), h)
            }
        };
        Some(rect)
    }

    /// Recompute every region: zone rectangles from the portions, then each
    /// container's nested tree in list order, then the float windows.
    pub fn perform_layout(&mut self) {
        self.layout_pending = false;
        let area = self.dock_area();
        let left = self.dock_window_size(DockZone::Left);
        let right = self.dock_window_size(DockZone::Right);
        let top = self.dock_window_size(DockZone::Top);
        let bottom = self.dock_window_size(DockZone::Bottom);

        let middle_y = area.min_y() + top;
        let middle_h = (area.height() - top - bottom).max(0.0);
        let zone_rects = [
            Rect::from_xywh(area.min_x(), middle_y, left, middle_h),
            Rect::from_xywh(area.max_x() - right, middle_y, right, middle_h),
            Rect::from_xywh(area.min_x(), area.min_y(), area.width(), top),
            Rect::from_xywh(area.min_x(), area.max_y() - bottom, area.width(), bottom),
            Rect::from_xywh(
                area.min_x() + left,
                middle_y,
                (area.width() - left - right).max(0.0),
                middle_h,
            ),
        ];

        for zone in DockZone::ALL {
            let rect = zone_rects[zone as usize];
            self.dock_windows[zone as usize].bounds = rect;
            let pinned = zone.pinned_state();
            let contents = &self.contents;
            let eligible = move |pane: &Pane| {
                pane.dock_state == pinned
                    && pane
                        .contents
                        .iter()
                        .any(|&c| contents.get(c).is_some_and(|h| !h.is_hidden))
            };
            self.dock_windows[zone as usize]
                .nested
                .compute_bounds(&mut self.panes, rect, &eligible);
        }

        let windows: Vec<FloatWindowId> = self.float_windows.keys().collect();
        for window in windows {
            let rect = Rect::new(Default::default(), self.float_windows[window].bounds.size);
            let contents = &self.contents;
            let eligible = move |pane: &Pane| {
                pane.contents
                    .iter()
                    .any(|&c| contents.get(c).is_some_and(|h| !h.is_hidden))
            };
            self.float_windows[window]
                .nested
                .compute_bounds(&mut self.panes, rect, &eligible);
        }
    }

    // ---- splitters -----------------------------------------------------

    /// Apply a committed splitter displacement. Positive offsets move right
    /// or down.
    pub fn move_splitter(&mut self, target: SplitterTarget, offset: f64) -> Result<()> {
        match target {
            SplitterTarget::ContainerEdge(zone) => self.move_container_splitter(zone, offset),
            SplitterTarget::Pane(pane) => self.move_pane_splitter(pane, offset),
        }
    }

    fn move_container_splitter(&mut self, zone: DockZone, offset: f64) -> Result<()> {
        let area = self.dock_area();
        let (portion, total, sign) = match zone {
            DockZone::Left => (self.dock_left_portion, area.width(), 1.0),
            DockZone::Right => (self.dock_right_portion, area.width(), -1.0),
            DockZone::Top => (self.dock_top_portion, area.height(), 1.0),
            DockZone::Bottom => (self.dock_bottom_portion, area.height(), -1.0),
            DockZone::Document => return Err(DockError::InvalidPaneReference),
        };
        let current = self.dock_window_size(zone);
        let new_size = (current + sign * offset).max(MIN_PANE_SIZE);
        let new_portion = if portion >= 1.0 {
            new_size
        } else if total > 0.0 {
            new_size / total
        } else {
            portion
        };
        match zone {
            DockZone::Left => self.set_dock_left_portion(new_portion),
            DockZone::Right => self.set_dock_right_portion(new_portion),
            DockZone::Top => self.set_dock_top_portion(new_portion),
            DockZone::Bottom => self.set_dock_bottom_portion(new_portion),
            DockZone::Document => unreachable!(),
        }
    }

    fn move_pane_splitter(&mut self, pane: PaneId, offset: f64) -> Result<()> {
        let entry = self.panes.get(pane).ok_or(DockError::InvalidPaneReference)?;
        if entry.nested.previous_pane.is_none() {
            return Err(DockError::InvalidPaneReference);
        }
        let alignment = entry.nested.alignment;
        let extent = if alignment.is_horizontal() {
            entry.nested.logical_bounds.width()
        } else {
            entry.nested.logical_bounds.height()
        };
        if extent <= 0.0 {
            return Ok(());
        }
        let delta = offset / extent;
        let proportion = match alignment {
            DockAlignment::Left | DockAlignment::Top => entry.nested.proportion + delta,
            DockAlignment::Right | DockAlignment::Bottom => entry.nested.proportion - delta,
        };
        self.panes[pane].nested.proportion = proportion.clamp(0.01, 0.99);
        self.request_layout();
        Ok(())
    }

    // ---- focus and activation ------------------------------------------

    pub fn active_content(&self) -> Option<ContentId> {
        self.active_content
    }

    pub fn active_auto_hide_content(&self) -> Option<ContentId> {
        self.active_auto_hide_content
    }

    pub fn activated_pane(&self) -> Option<PaneId> {
        self.activated_pane
    }

    pub(crate) fn set_active_content(&mut self, value: Option<ContentId>) {
        if self.active_content == value {
            return;
        }
        if let Some(old) = self.active_content
            && let Some(handler) = self.contents.get_mut(old)
        {
            handler.content.on_deactivated();
        }
        self.active_content = value;
        if let Some(new) = value {
            self.contents[new].content.on_activated();
        }
        self.push_event(DockEvent::ActiveContentChanged(value));
    }

    pub fn set_active_auto_hide_content(&mut self, value: Option<ContentId>) {
        if self.active_auto_hide_content == value {
            return;
        }
        self.active_auto_hide_content = value;
        self.push_event(DockEvent::ActiveAutoHideContentChanged(value));
    }

    pub(crate) fn set_activated_pane(&mut self, value: Option<PaneId>) {
        if self.activated_pane == value {
            return;
        }
        if let Some(old) = self.activated_pane
            && let Some(pane) = self.panes.get_mut(old)
        {
            pane.is_activated = false;
        }
        self.activated_pane = value;
        if let Some(new) = value {
            self.panes[new].is_activated = true;
        }
    }

    pub(crate) fn add_to_focus_list(&mut self, id: ContentId) {
        self.focus_list.retain(|&c| c != id);
        self.focus_list.push(id);
    }

    pub(crate) fn remove_from_focus_list(&mut self, id: ContentId) {
        self.focus_list.retain(|&c| c != id);
    }

    /// Hand activation to the most recently active visible content other
    /// than `id`.
    pub(crate) fn give_up_focus(&mut self, id: ContentId) {
        if self.active_auto_hide_content == Some(id) {
            self.set_active_auto_hide_content(None);
        }
        if self.active_content != Some(id) {
            return;
        }
        let next = self.focus_list.iter().rev().copied().find(|&c| {
            c != id
                && self.contents.get(c).is_some_and(|h| {
                    !h.is_hidden
                        && !matches!(h.dock_state, DockState::Unknown | DockState::Hidden)
                })
        });
        self.set_active_content(next);
        let pane = next.and_then(|c| self.contents[c].pane());
        self.set_activated_pane(pane);
    }

    // ---- events --------------------------------------------------------

    pub(crate) fn push_event(&mut self, event: DockEvent) {
        self.events.push(event);
    }

    /// Drain the notification queue.
    pub fn take_events(&mut self) -> Vec<DockEvent> {
        std::mem::take(&mut self.events)
    }
}

/// Which splitter a drag addresses: the divider between two nested panes,
/// or the edge between a side zone and the middle region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitterTarget {
    Pane(PaneId),
    ContainerEdge(DockZone),
}

#[cfg(test)]
pub(crate) mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    pub(crate) struct TestContent {
        name: String,
    }

    impl TestContent {
        pub(crate) fn named(name: &str) -> Self {
            Self { name: name.into() }
        }
    }

    impl DockContent for TestContent {
        fn persist_string(&self) -> String {
            self.name.clone()
        }
    }

    pub(crate) fn content(name: &str) -> Box<dyn DockContent> {
        Box::new(TestContent::named(name))
    }

    pub(crate) fn panel() -> DockPanel {
        DockPanel::new(Rect::from_xywh(0.0, 0.0, 1000.0, 800.0))
    }

    #[test]
    fn empty_zones_take_no_space() {
        let panel = panel();
        assert_eq!(panel.dock_window_size(DockZone::Left), 0.0);
        assert_eq!(panel.document_window_bounds(), panel.bounds());
    }

    #[test]
    fn default_portion_gives_quarter_width() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();

        assert_eq!(panel.dock_window_size(DockZone::Left), 250.0);
        let pane = panel.content_pane(id).unwrap();
        assert_eq!(panel.panes[pane].bounds, Rect::from_xywh(0.0, 0.0, 250.0, 800.0));
        assert_eq!(
            panel.document_window_bounds(),
            Rect::from_xywh(250.0, 0.0, 750.0, 800.0)
        );
    }

    #[test]
    fn hiding_a_panes_only_content_clears_its_bounds() {
        let mut panel = panel();
        let id = panel.add_content(content("tool"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        let pane = panel.content_pane(id).unwrap();
        assert_eq!(panel.panes[pane].bounds.width(), 250.0);

        panel.hide(id).unwrap();
        assert_eq!(panel.panes[pane].bounds, Rect::ZERO);
        assert_eq!(panel.panes[pane].nested.logical_bounds, Rect::ZERO);
    }

    #[test]
    fn pixel_portion_is_absolute() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockRight).unwrap();
        panel.set_dock_right_portion(180.0).unwrap();

        assert_eq!(panel.dock_window_size(DockZone::Right), 180.0);
    }

    #[test]
    fn fractional_pair_shrinks_evenly_when_overcommitted() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        panel.show_with_state(b, DockState::DockRight).unwrap();
        panel.set_dock_left_portion(0.9).unwrap();

        // The setter already caps the pair at the whole; the sizes must
        // still leave a minimum middle region.
        let left = panel.dock_window_size(DockZone::Left);
        let right = panel.dock_window_size(DockZone::Right);
        assert!(left + right <= 1000.0 - MIN_PANE_SIZE);
    }

    #[test]
    fn fractional_setter_caps_opposing_portion() {
        let mut panel = panel();
        panel.set_dock_left_portion(0.7).unwrap();
        panel.set_dock_right_portion(0.6).unwrap();
        assert_eq!(panel.dock_left_portion(), 1.0 - 0.6);
    }

    #[test]
    fn portion_must_be_positive() {
        let mut panel = panel();
        assert_eq!(
            panel.set_dock_top_portion(0.0),
            Err(DockError::InvalidPortion(0.0))
        );
        assert_eq!(
            panel.set_dock_top_portion(-3.0),
            Err(DockError::InvalidPortion(-3.0))
        );
    }

    #[test]
    fn container_splitter_updates_fractional_portion() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockLeft).unwrap();
        assert_eq!(panel.dock_window_size(DockZone::Left), 250.0);

        panel
            .move_splitter(SplitterTarget::ContainerEdge(DockZone::Left), 50.0)
            .unwrap();

        assert_eq!(panel.dock_window_size(DockZone::Left), 300.0);
        assert_eq!(panel.dock_left_portion(), 0.3);
    }

    #[test]
    fn container_splitter_updates_pixel_portion() {
        let mut panel = panel();
        let id = panel.add_content(content("a"));
        panel.show_with_state(id, DockState::DockBottom).unwrap();
        panel.set_dock_bottom_portion(200.0).unwrap();

        // Dragging down shrinks the bottom zone.
        panel
            .move_splitter(SplitterTarget::ContainerEdge(DockZone::Bottom), 60.0)
            .unwrap();

        assert_eq!(panel.dock_bottom_portion(), 140.0);
    }

    #[test]
    fn pane_splitter_adjusts_proportion_against_logical_bounds() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        let pane_a = panel.content_pane(a).unwrap();
        // A second pane in the zone lands below the first, half split.
        let pane_b = panel.create_pane_for(b, DockState::DockLeft, true).unwrap();
        assert_ne!(pane_a, pane_b);
        assert_eq!(panel.panes[pane_b].nested.previous_pane, Some(pane_a));
        assert_eq!(panel.panes[pane_b].nested.alignment, DockAlignment::Bottom);

        // Zone is 250x800, so b splits a 400/400 and its logical bounds are
        // the full 800px column. Dragging the divider down 50px shrinks b.
        assert_eq!(panel.panes[pane_b].nested.logical_bounds.height(), 800.0);
        panel
            .move_splitter(SplitterTarget::Pane(pane_b), 50.0)
            .unwrap();

        assert_eq!(panel.panes[pane_b].nested.proportion, 0.4375);
        assert_eq!(panel.panes[pane_b].bounds.height(), 350.0);
        assert_eq!(panel.panes[pane_a].bounds.height(), 450.0);
    }

    #[test]
    fn root_pane_splitter_is_refused() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        let pane = panel.content_pane(a).unwrap();

        assert_eq!(
            panel.move_splitter(SplitterTarget::Pane(pane), 10.0),
            Err(DockError::InvalidPaneReference)
        );
    }

    #[test]
    fn suspend_batches_layout_and_disposal() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::Float).unwrap();
        let window = panel.float_window_ids()[0];

        panel.suspend_layout();
        panel.set_content_dock_state(a, DockState::DockLeft).unwrap();
        // The emptied float window survives until the suspension lifts.
        assert!(panel.float_window_bounds(window).is_some());
        panel.resume_layout(true);
        assert!(panel.float_window_bounds(window).is_none());

        let events = panel.take_events();
        assert!(events.contains(&DockEvent::FloatWindowDisposed(window)));
    }

    #[test]
    fn exclusive_ownership_across_all_panes() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        panel.show_with_state(a, DockState::Float).unwrap();
        panel.show_with_state(b, DockState::DockLeft).unwrap();
        panel.set_content_dock_state(a, DockState::DockLeft).unwrap();
        panel.set_content_dock_state(b, DockState::Float).unwrap();
        panel.set_content_dock_state(b, DockState::Document).unwrap();

        for &id in &[a, b] {
            let owners: Vec<PaneId> = panel
                .panes
                .iter()
                .filter(|(_, pane)| pane.contents.contains(&id))
                .map(|(p, _)| p)
                .collect();
            assert_eq!(owners.len(), 1, "content must live in exactly one pane");
            assert_eq!(panel.content_pane(id), Some(owners[0]));
        }
    }

    #[test]
    fn auto_hide_reserves_strip_in_dock_area() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockLeft).unwrap();
        assert_eq!(panel.dock_area(), panel.bounds());

        panel
            .set_content_dock_state(a, DockState::DockLeftAutoHide)
            .unwrap();

        let strip = panel.strip_metrics().measure_height();
        assert_eq!(panel.dock_area().min_x(), strip);
        // The pinned left zone is empty now.
        assert_eq!(panel.dock_window_size(DockZone::Left), 0.0);
    }

    #[test]
    fn auto_hide_flyout_uses_remembered_portion() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        panel.show_with_state(a, DockState::DockRightAutoHide).unwrap();
        panel.contents[a].auto_hide_portion = 0.4;
        panel.set_active_auto_hide_content(Some(a));

        let flyout = panel.auto_hide_window_bounds().unwrap();
        let area = panel.dock_area();
        assert_eq!(flyout.width(), area.width() * 0.4);
        assert_eq!(flyout.max_x(), area.max_x());
    }

    #[test]
    fn give_up_focus_falls_back_to_most_recent() {
        let mut panel = panel();
        let a = panel.add_content(content("a"));
        let b = panel.add_content(content("b"));
        panel.show_with_state(a, DockState::Document).unwrap();
        panel.show_with_state(b, DockState::Document).unwrap();
        assert_eq!(panel.active_content(), Some(b));

        panel.hide(b).unwrap();
        assert_eq!(panel.active_content(), Some(a));
    }
}
