use slotmap::SlotMap;
use tracing::debug;

use crate::geometry::Rect;
use crate::pane::{Pane, PaneId};
use crate::state::DockAlignment;

/// Ordered list of the panes sharing one container (a dock-window zone or a
/// floating window). Panes are linked into a nested-split tree through their
/// `NestedDockingStatus`: each pane records only its own insertion anchor
/// (`previous_pane`), alignment and proportion; geometry is derived top-down
/// in list order. The pane data itself lives in the orchestrator's arena.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NestedPaneCollection {
    panes: Vec<PaneId>,
}

impl NestedPaneCollection {
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    pub fn contains(&self, pane: PaneId) -> bool {
        self.panes.contains(&pane)
    }

    pub fn index_of(&self, pane: PaneId) -> Option<usize> {
        self.panes.iter().position(|&p| p == pane)
    }

    pub fn iter(&self) -> impl Iterator<Item = PaneId> + '_ {
        self.panes.iter().copied()
    }

    pub fn as_slice(&self) -> &[PaneId] {
        &self.panes
    }

    /// Implicit anchor for callers that do not name one: the last member
    /// other than `excluding`.
    pub fn default_previous_pane(&self, excluding: Option<PaneId>) -> Option<PaneId> {
        self.panes.iter().rev().copied().find(|&p| Some(p) != excluding)
    }

    /// Append `pane` as a root-level member (no anchor).
    pub fn add_root(&mut self, arena: &mut SlotMap<PaneId, Pane>, pane: PaneId) {
        debug_assert!(!self.contains(pane));
        arena[pane].nested = Default::default();
        self.panes.push(pane);
    }

    /// Append `pane` anchored to `previous` on the given side. `previous`
    /// must already be a member, which keeps every chain inside the
    /// collection and every anchor earlier in the list.
    pub fn add_nested(
        &mut self,
        arena: &mut SlotMap<PaneId, Pane>,
        pane: PaneId,
        previous: PaneId,
        alignment: DockAlignment,
        proportion: f64,
    ) {
        debug_assert!(!self.contains(pane));
        debug_assert!(self.contains(previous));
        let status = &mut arena[pane].nested;
        status.previous_pane = Some(previous);
        status.alignment = alignment;
        status.proportion = proportion;
        self.panes.push(pane);
    }

    /// Remove `pane`, reattaching any panes anchored to it.
    ///
    /// The last member (by list index) anchored to `pane` inherits `pane`'s
    /// own anchor triple and takes over its list slot; every member between
    /// the two slots that referenced `pane` is repointed to the heir with
    /// its own alignment/proportion intact, since only the anchor identity
    /// changes, not the geometric split. The removed pane's status is reset
    /// to defaults.
    pub fn remove(&mut self, arena: &mut SlotMap<PaneId, Pane>, pane: PaneId) -> bool {
        let Some(index) = self.index_of(pane) else {
            return false;
        };

        let heir = self.last_child_of(arena, pane, index);

        if let Some((heir_index, heir_id)) = heir {
            let inherited = arena[pane].nested.clone();
            self.panes.remove(heir_index);
            self.panes[index] = heir_id;

            for i in (index + 1..heir_index).rev() {
                let member = self.panes[i];
                if arena[member].nested.previous_pane == Some(pane) {
                    arena[member].nested.previous_pane = Some(heir_id);
                }
            }

            let status = &mut arena[heir_id].nested;
            status.previous_pane = inherited.previous_pane;
            status.alignment = inherited.alignment;
            status.proportion = inherited.proportion;
            debug!(?pane, heir = ?heir_id, "removed pane, heir reattached");
        } else {
            self.panes.remove(index);
        }

        arena[pane].nested = Default::default();
        true
    }

    /// Swap `pane` with its nearest nested partner without removing either,
    /// so that `pane` vacates the anchor role while the visual split is
    /// preserved: the partner inherits the anchor triple, and the vacating
    /// pane re-anchors to the partner with the opposite alignment and the
    /// complementary proportion. When `pane` has no referencing child but
    /// itself hangs off an anchor (the state a previous switch produced),
    /// the roles invert, so applying the operation twice restores the
    /// original triples exactly.
    pub fn switch_pane_with_first_child(
        &mut self,
        arena: &mut SlotMap<PaneId, Pane>,
        pane: PaneId,
    ) -> bool {
        let Some(index) = self.index_of(pane) else {
            return false;
        };

        let (anchor, child) = match self.last_child_of(arena, pane, index) {
            Some((_, child)) => (pane, child),
            None => match arena[pane].nested.previous_pane {
                Some(anchor) => (anchor, pane),
                None => return false,
            },
        };

        let (Some(anchor_index), Some(child_index)) =
            (self.index_of(anchor), self.index_of(child))
        else {
            return false;
        };

        self.panes.swap(anchor_index, child_index);

        let anchor_status = arena[anchor].nested.clone();
        let child_status = arena[child].nested.clone();

        let lo = anchor_index.min(child_index);
        let hi = anchor_index.max(child_index);
        for i in lo + 1..hi {
            let member = self.panes[i];
            let prev = arena[member].nested.previous_pane;
            if prev == Some(anchor) {
                arena[member].nested.previous_pane = Some(child);
            } else if prev == Some(child) {
                arena[member].nested.previous_pane = Some(anchor);
            }
        }

        arena[child].nested.previous_pane = anchor_status.previous_pane;
        arena[child].nested.alignment = anchor_status.alignment;
        arena[child].nested.proportion = anchor_status.proportion;

        arena[anchor].nested.previous_pane = Some(child);
        arena[anchor].nested.alignment = child_status.alignment.opposite();
        arena[anchor].nested.proportion = 1.0 - child_status.proportion;
        true
    }

    /// Compute the bounds of every pane in `eligible` list order, carving
    /// each nested pane's proportion out of its anchor's current region.
    /// The pre-split region is recorded as the pane's `logical_bounds` for
    /// the splitter contract. Panes whose anchor is not eligible fall back
    /// to the nearest eligible ancestor, or to the container rectangle.
    /// Ineligible panes occupy no region and get zero bounds.
    pub fn compute_bounds(
        &self,
        arena: &mut SlotMap<PaneId, Pane>,
        container: Rect,
        eligible: &dyn Fn(&Pane) -> bool,
    ) {
        let members: Vec<PaneId> =
            self.panes.iter().copied().filter(|&p| eligible(&arena[p])).collect();

        for &pane in &self.panes {
            if !members.contains(&pane) {
                arena[pane].bounds = Rect::ZERO;
                arena[pane].nested.logical_bounds = Rect::ZERO;
            }
        }

        for &pane in &members {
            let anchor = self.effective_anchor(arena, pane, &members);
            let (alignment, proportion) = {
                let status = &arena[pane].nested;
                (status.alignment, status.proportion)
            };

            match anchor {
                None => {
                    arena[pane].nested.logical_bounds = container;
                    arena[pane].bounds = container;
                }
                Some(anchor) => {
                    let region = arena[anchor].bounds;
                    let (carved, remainder) = split_region(region, alignment, proportion);
                    arena[pane].nested.logical_bounds = region;
                    arena[pane].bounds = carved;
                    arena[anchor].bounds = remainder;
                }
            }
        }
    }

    fn effective_anchor(
        &self,
        arena: &SlotMap<PaneId, Pane>,
        pane: PaneId,
        members: &[PaneId],
    ) -> Option<PaneId> {
        let mut current = arena[pane].nested.previous_pane;
        while let Some(anchor) = current {
            if members.contains(&anchor) {
                return Some(anchor);
            }
            current = arena[anchor].nested.previous_pane;
        }
        None
    }

    /// Last member after `index` anchored directly to `pane`.
    fn last_child_of(
        &self,
        arena: &SlotMap<PaneId, Pane>,
        pane: PaneId,
        index: usize,
    ) -> Option<(usize, PaneId)> {
        (index + 1..self.panes.len()).rev().find_map(|i| {
            let candidate = self.panes[i];
            (arena[candidate].nested.previous_pane == Some(pane)).then_some((i, candidate))
        })
    }

    /// Every member's anchor chain must terminate at a root without leaving
    /// the collection.
    #[cfg(test)]
    pub(crate) fn is_closed(&self, arena: &SlotMap<PaneId, Pane>) -> bool {
        self.panes.iter().all(|&pane| {
            let mut seen = 0;
            let mut current = Some(pane);
            while let Some(p) = current {
                if !self.contains(p) || seen > self.panes.len() {
                    return false;
                }
                seen += 1;
                current = arena[p].nested.previous_pane;
            }
            true
        })
    }
}

/// Split `region` along `alignment`, allocating `proportion` of it to the
/// carved (nested) side and the rest to the anchor.
fn split_region(region: Rect, alignment: DockAlignment, proportion: f64) -> (Rect, Rect) {
    let p = proportion.clamp(0.0, 1.0);
    match alignment {
        DockAlignment::Left => {
            let w = region.width() * p;
            (
                Rect::from_xywh(region.min_x(), region.min_y(), w, region.height()),
                Rect::from_xywh(region.min_x() + w, region.min_y(), region.width() - w, region.height()),
            )
        }
        DockAlignment::Right => {
            let w = region.width() * p;
            (
                Rect::from_xywh(region.max_x() - w, region.min_y(), w, region.height()),
                Rect::from_xywh(region.min_x(), region.min_y(), region.width() - w, region.height()),
            )
        }
        DockAlignment::Top => {
            let h = region.height() * p;
            (
                Rect::from_xywh(region.min_x(), region.min_y(), region.width(), h),
                Rect::from_xywh(region.min_x(), region.min_y() + h, region.width(), region.height() - h),
            )
        }
        DockAlignment::Bottom => {
            let h = region.height() * p;
            (
                Rect::from_xywh(region.min_x(), region.max_y() - h, region.width(), h),
                Rect::from_xywh(region.min_x(), region.min_y(), region.width(), region.height() - h),
            )
        }
    }
}
