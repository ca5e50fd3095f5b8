use std::fs;
use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::content::DockContent;
use crate::geometry::Rect;
use crate::pane::{Pane, PaneId};
use crate::panel::{ContainerRef, DockPanel, DockZone};
use crate::state::{DockAlignment, DockAreas, DockState, DocumentHostMode};

/// Serializable image of a panel's entire layout. Contents are recorded by
/// their persist strings; panes and float windows reference each other by
/// index into the snapshot's own vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LayoutSnapshot {
    pub dock_left_portion: f64,
    pub dock_right_portion: f64,
    pub dock_top_portion: f64,
    pub dock_bottom_portion: f64,
    pub document_host_mode: DocumentHostMode,
    pub contents: Vec<ContentSnapshot>,
    pub panes: Vec<PaneSnapshot>,
    pub float_windows: Vec<FloatWindowSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ContentSnapshot {
    pub persist_string: String,
    pub allowed_areas: DockAreas,
    pub visible_state: DockState,
    pub is_hidden: bool,
    pub show_hint: DockState,
    pub auto_hide_portion: f64,
    pub allow_end_user_docking: bool,
    pub hide_on_close: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PaneSnapshot {
    pub dock_state: DockState,
    pub contents: Vec<usize>,
    pub active_content: Option<usize>,
    pub previous_pane: Option<usize>,
    pub alignment: DockAlignment,
    pub proportion: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct FloatWindowSnapshot {
    pub bounds: Rect,
    pub panes: Vec<usize>,
}

/// Capture the panel's current layout. Pane indices follow
/// `panes_in_order`, so every anchor reference points at an earlier entry
/// of its own container segment.
pub fn save_layout(panel: &DockPanel) -> LayoutSnapshot {
    let content_ids = panel.content_ids().to_vec();
    let pane_ids = panel.panes_in_order();
    let content_index = |id| content_ids.iter().position(|&c| c == id);
    let pane_index = |id| pane_ids.iter().position(|&p| p == id);

    let contents = content_ids
        .iter()
        .map(|&id| {
            let handler = &panel.contents[id];
            ContentSnapshot {
                persist_string: handler.content.persist_string(),
                allowed_areas: handler.allowed_areas,
                visible_state: handler.visible_state(),
                is_hidden: handler.is_hidden(),
                show_hint: handler.show_hint,
                auto_hide_portion: handler.auto_hide_portion,
                allow_end_user_docking: handler.allow_end_user_docking,
                hide_on_close: handler.hide_on_close,
            }
        })
        .collect();

    let panes = pane_ids
        .iter()
        .map(|&id| {
            let pane = &panel.panes[id];
            PaneSnapshot {
                dock_state: pane.dock_state,
                contents: pane.contents.iter().filter_map(|&c| content_index(c)).collect(),
                active_content: pane.active_content.and_then(content_index),
                previous_pane: pane.nested.previous_pane.and_then(pane_index),
                alignment: pane.nested.alignment,
                proportion: pane.nested.proportion,
            }
        })
        .collect();

    let float_windows = panel
        .float_window_ids()
        .into_iter()
        .map(|window| FloatWindowSnapshot {
            bounds: panel.float_window_bounds(window).unwrap_or(Rect::ZERO),
            panes: panel
                .float_window_panes(window)
                .into_iter()
                .flatten()
                .filter_map(|&p| pane_index(p))
                .collect(),
        })
        .collect();

    LayoutSnapshot {
        dock_left_portion: panel.dock_left_portion(),
        dock_right_portion: panel.dock_right_portion(),
        dock_top_portion: panel.dock_top_portion(),
        dock_bottom_portion: panel.dock_bottom_portion(),
        document_host_mode: panel.document_host_mode(),
        contents,
        panes,
        float_windows,
    }
}

/// Rebuild a panel from a snapshot. `deserialize` maps each persist string
/// back to a live content; returning `None` skips that content, and panes
/// left without any restorable content are dropped with it.
pub fn load_layout(
    snapshot: &LayoutSnapshot,
    bounds: Rect,
    mut deserialize: impl FnMut(&str) -> Option<Box<dyn DockContent>>,
) -> anyhow::Result<DockPanel> {
    let mut panel = DockPanel::new(bounds);
    panel.suspend_layout();
    panel.set_document_host_mode(snapshot.document_host_mode)?;
    panel.set_dock_left_portion(snapshot.dock_left_portion)?;
    panel.set_dock_right_portion(snapshot.dock_right_portion)?;
    panel.set_dock_top_portion(snapshot.dock_top_portion)?;
    panel.set_dock_bottom_portion(snapshot.dock_bottom_portion)?;

    let contents: Vec<_> = snapshot
        .contents
        .iter()
        .map(|entry| {
            let Some(content) = deserialize(&entry.persist_string) else {
                warn!(persist = %entry.persist_string, "content not restored, skipping");
                return None;
            };
            let id = panel.add_content(content);
            let handler = &mut panel.contents[id];
            handler.allowed_areas = entry.allowed_areas;
            handler.show_hint = entry.show_hint;
            handler.auto_hide_portion = entry.auto_hide_portion;
            handler.allow_end_user_docking = entry.allow_end_user_docking;
            handler.hide_on_close = entry.hide_on_close;
            Some(id)
        })
        .collect();

    let windows: Vec<_> = snapshot
        .float_windows
        .iter()
        .map(|w| panel.create_float_window(Some(w.bounds)))
        .collect();
    let window_of_pane = |index: usize| {
        snapshot
            .float_windows
            .iter()
            .position(|w| w.panes.contains(&index))
            .map(|i| windows[i])
    };

    let mut pane_map: Vec<Option<PaneId>> = Vec::with_capacity(snapshot.panes.len());
    for (index, entry) in snapshot.panes.iter().enumerate() {
        let restorable: Vec<(usize, _)> = entry
            .contents
            .iter()
            .filter_map(|&c| contents.get(c).copied().flatten().map(|id| (c, id)))
            .collect();
        if restorable.is_empty() {
            pane_map.push(None);
            continue;
        }

        let container = if entry.dock_state == DockState::Float {
            let Some(window) = window_of_pane(index) else {
                anyhow::bail!("floating pane {index} belongs to no float window");
            };
            ContainerRef::Float(window)
        } else {
            let Some(zone) = DockZone::of(entry.dock_state) else {
                anyhow::bail!("pane {index} has non-placement state {:?}", entry.dock_state);
            };
            ContainerRef::Zone(zone)
        };

        let pane = panel.panes.insert(Pane::new(entry.dock_state));
        let anchor = entry
            .previous_pane
            .and_then(|i| pane_map.get(i).copied().flatten());
        match anchor {
            Some(previous) => panel.dock_pane_nested(
                pane,
                container,
                previous,
                entry.alignment,
                entry.proportion,
            )?,
            None => panel.dock_pane_root(pane, container)?,
        }

        let is_float = entry.dock_state == DockState::Float;
        for &(snapshot_index, content) in &restorable {
            panel.attach_content_to_pane(content, pane);
            let saved = &snapshot.contents[snapshot_index];
            let handler = &mut panel.contents[content];
            handler.is_float = is_float;
            handler.visible_state = saved.visible_state;
            handler.is_hidden = saved.is_hidden;
            handler.dock_state = if saved.is_hidden {
                DockState::Hidden
            } else {
                saved.visible_state
            };
        }
        panel.panes[pane].active_content = entry
            .active_content
            .and_then(|c| contents.get(c).copied().flatten());
        pane_map.push(Some(pane));
    }

    panel.resume_layout(true);
    info!(
        contents = panel.content_ids().len(),
        panes = panel.panes_in_order().len(),
        "layout restored"
    );
    Ok(panel)
}

pub fn to_ron_string(snapshot: &LayoutSnapshot) -> anyhow::Result<String> {
    ron::ser::to_string_pretty(snapshot, ron::ser::PrettyConfig::default())
        .context("failed to serialize layout")
}

pub fn from_ron_str(data: &str) -> anyhow::Result<LayoutSnapshot> {
    ron::from_str(data).context("failed to parse layout")
}

pub fn save_to_file(panel: &DockPanel, path: &Path) -> anyhow::Result<()> {
    let data = to_ron_string(&save_layout(panel))?;
    fs::write(path, data).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

pub fn load_from_file(
    path: &Path,
    bounds: Rect,
    deserialize: impl FnMut(&str) -> Option<Box<dyn DockContent>>,
) -> anyhow::Result<DockPanel> {
    let data =
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    let snapshot = from_ron_str(&data)?;
    load_layout(&snapshot, bounds, deserialize)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::panel::tests::{TestContent, content, panel};
    use crate::state::DockStyle;

    use super::*;

    fn restore(name: &str) -> Option<Box<dyn DockContent>> {
        Some(Box::new(TestContent::named(name)))
    }

    fn busy_panel() -> DockPanel {
        let mut panel = panel();
        let doc1 = panel.add_content(content("doc1"));
        let doc2 = panel.add_content(content("doc2"));
        let tool1 = panel.add_content(content("tool1"));
        let tool2 = panel.add_content(content("tool2"));
        let float1 = panel.add_content(content("float1"));
        let hidden = panel.add_content(content("hidden"));

        panel.show_with_state(doc1, DockState::Document).unwrap();
        let doc_pane = panel.content_pane(doc1).unwrap();
        panel.show_in_pane(doc2, doc_pane).unwrap();
        panel.show_with_state(tool1, DockState::DockLeft).unwrap();
        let tool_pane = panel.content_pane(tool1).unwrap();
        panel
            .dock_content_to_pane(tool2, tool_pane, DockStyle::Bottom, -1)
            .unwrap();
        panel.show_with_state(float1, DockState::Float).unwrap();
        panel.show_with_state(hidden, DockState::DockRight).unwrap();
        panel.hide(hidden).unwrap();
        panel.set_dock_left_portion(0.3).unwrap();
        panel
    }

    #[test]
    fn snapshot_round_trips_through_ron() {
        let panel = busy_panel();
        let snapshot = save_layout(&panel);

        let text = to_ron_string(&snapshot).unwrap();
        let parsed = from_ron_str(&text).unwrap();
        assert_eq!(parsed, snapshot);
    }

    #[test]
    fn snapshot_is_not_tied_to_ron() {
        let snapshot = save_layout(&busy_panel());
        let json = serde_json::to_string(&snapshot).unwrap();
        assert_eq!(serde_json::from_str::<LayoutSnapshot>(&json).unwrap(), snapshot);
    }

    #[test]
    fn restored_panel_is_structurally_identical() {
        let panel = busy_panel();
        let snapshot = save_layout(&panel);

        let restored = load_layout(&snapshot, panel.bounds(), restore).unwrap();

        assert_eq!(save_layout(&restored), snapshot);
    }

    #[test]
    fn unrestorable_content_drops_its_pane() {
        let panel = busy_panel();
        let snapshot = save_layout(&panel);

        let restored = load_layout(&snapshot, panel.bounds(), |name| {
            (name != "float1").then(|| restore(name)).flatten()
        })
        .unwrap();

        let reloaded = save_layout(&restored);
        assert_eq!(reloaded.contents.len(), snapshot.contents.len() - 1);
        assert!(reloaded.float_windows.iter().all(|w| w.panes.is_empty()));
    }

    #[test]
    fn nested_geometry_survives_restore() {
        let panel = busy_panel();
        let snapshot = save_layout(&panel);
        let restored = load_layout(&snapshot, panel.bounds(), restore).unwrap();

        for (original, reloaded) in panel
            .panes_in_order()
            .into_iter()
            .zip(restored.panes_in_order())
        {
            assert_eq!(panel.panes[original].bounds, restored.panes[reloaded].bounds);
        }
    }

    #[test]
    fn file_round_trip() {
        let panel = busy_panel();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.ron");

        save_to_file(&panel, &path).unwrap();
        let restored = load_from_file(&path, panel.bounds(), restore).unwrap();

        assert_eq!(save_layout(&restored), save_layout(&panel));
    }
}
