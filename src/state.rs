use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placement of a content unit. `Unknown` and `Hidden` are non-placement
/// states; the rest describe where the content's pane lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockState {
    #[default]
    Unknown,
    Hidden,
    Float,
    Document,
    DockLeft,
    DockRight,
    DockTop,
    DockBottom,
    DockLeftAutoHide,
    DockRightAutoHide,
    DockTopAutoHide,
    DockBottomAutoHide,
}

impl DockState {
    pub fn is_auto_hide(self) -> bool {
        matches!(
            self,
            DockState::DockLeftAutoHide
                | DockState::DockRightAutoHide
                | DockState::DockTopAutoHide
                | DockState::DockBottomAutoHide
        )
    }

    /// The four pinned side states plus their auto-hide variants.
    pub fn is_dock_side(self) -> bool {
        self.side().is_some()
    }

    pub fn side(self) -> Option<DockAlignment> {
        match self {
            DockState::DockLeft | DockState::DockLeftAutoHide => Some(DockAlignment::Left),
            DockState::DockRight | DockState::DockRightAutoHide => Some(DockAlignment::Right),
            DockState::DockTop | DockState::DockTopAutoHide => Some(DockAlignment::Top),
            DockState::DockBottom | DockState::DockBottomAutoHide => Some(DockAlignment::Bottom),
            _ => None,
        }
    }

    /// Swap a pinned side state with its auto-hide variant. Identity for
    /// every other state.
    pub fn toggle_auto_hide(self) -> DockState {
        match self {
            DockState::DockLeft => DockState::DockLeftAutoHide,
            DockState::DockLeftAutoHide => DockState::DockLeft,
            DockState::DockRight => DockState::DockRightAutoHide,
            DockState::DockRightAutoHide => DockState::DockRight,
            DockState::DockTop => DockState::DockTopAutoHide,
            DockState::DockTopAutoHide => DockState::DockTop,
            DockState::DockBottom => DockState::DockBottomAutoHide,
            DockState::DockBottomAutoHide => DockState::DockBottom,
            other => other,
        }
    }

    /// Validity against an allowed-areas mask. Auto-hide variants test the
    /// underlying side bit; `Unknown` and `Hidden` pass any mask.
    pub fn is_valid_for(self, areas: DockAreas) -> bool {
        match self {
            DockState::Unknown | DockState::Hidden => true,
            DockState::Float => areas.contains(DockAreas::FLOAT),
            DockState::Document => areas.contains(DockAreas::DOCUMENT),
            DockState::DockLeft | DockState::DockLeftAutoHide => {
                areas.contains(DockAreas::DOCK_LEFT)
            }
            DockState::DockRight | DockState::DockRightAutoHide => {
                areas.contains(DockAreas::DOCK_RIGHT)
            }
            DockState::DockTop | DockState::DockTopAutoHide => areas.contains(DockAreas::DOCK_TOP),
            DockState::DockBottom | DockState::DockBottomAutoHide => {
                areas.contains(DockAreas::DOCK_BOTTOM)
            }
        }
    }
}

bitflags! {
    /// Which placements a content unit may ever occupy. Serialized as the
    /// `|`-joined flag names in text formats.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct DockAreas: u8 {
        const FLOAT = 1 << 0;
        const DOCK_LEFT = 1 << 1;
        const DOCK_RIGHT = 1 << 2;
        const DOCK_TOP = 1 << 3;
        const DOCK_BOTTOM = 1 << 4;
        const DOCUMENT = 1 << 5;
    }
}

impl Default for DockAreas {
    fn default() -> Self {
        DockAreas::all()
    }
}

impl Serialize for DockAreas {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        bitflags::serde::serialize(self, serializer)
    }
}

impl<'de> Deserialize<'de> for DockAreas {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        bitflags::serde::deserialize(deserializer)
    }
}

/// Side of the predecessor's region allocated to a nested pane.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockAlignment {
    #[default]
    Left,
    Right,
    Top,
    Bottom,
}

impl DockAlignment {
    pub fn opposite(self) -> DockAlignment {
        match self {
            DockAlignment::Left => DockAlignment::Right,
            DockAlignment::Right => DockAlignment::Left,
            DockAlignment::Top => DockAlignment::Bottom,
            DockAlignment::Bottom => DockAlignment::Top,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, DockAlignment::Left | DockAlignment::Right)
    }
}

/// Style of a drop target: one of the four edges, or merge-in-place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DockStyle {
    Left,
    Right,
    Top,
    Bottom,
    Fill,
}

impl DockStyle {
    pub fn alignment(self) -> Option<DockAlignment> {
        match self {
            DockStyle::Left => Some(DockAlignment::Left),
            DockStyle::Right => Some(DockAlignment::Right),
            DockStyle::Top => Some(DockAlignment::Top),
            DockStyle::Bottom => Some(DockAlignment::Bottom),
            DockStyle::Fill => None,
        }
    }
}

/// How the document area is hosted. `SystemManaged` hands documents to the
/// host's own window management and disallows the `Document` dock state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentHostMode {
    #[default]
    Docked,
    SystemManaged,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_hide_validity_ignores_variant() {
        let areas = DockAreas::DOCK_LEFT | DockAreas::DOCUMENT;
        assert!(DockState::DockLeft.is_valid_for(areas));
        assert!(DockState::DockLeftAutoHide.is_valid_for(areas));
        assert!(!DockState::DockRight.is_valid_for(areas));
        assert!(!DockState::Float.is_valid_for(areas));
    }

    #[test]
    fn non_placement_states_pass_any_mask() {
        assert!(DockState::Unknown.is_valid_for(DockAreas::FLOAT));
        assert!(DockState::Hidden.is_valid_for(DockAreas::DOCUMENT));
    }

    #[test]
    fn areas_serialize_as_flag_names() {
        let areas = DockAreas::DOCK_LEFT | DockAreas::DOCUMENT;
        let json = serde_json::to_string(&areas).unwrap();
        assert_eq!(json, "\"DOCK_LEFT | DOCUMENT\"");
        assert_eq!(serde_json::from_str::<DockAreas>(&json).unwrap(), areas);
    }

    #[test]
    fn toggle_auto_hide_round_trips() {
        for state in [
            DockState::DockLeft,
            DockState::DockRight,
            DockState::DockTop,
            DockState::DockBottom,
        ] {
            assert!(state.toggle_auto_hide().is_auto_hide());
            assert_eq!(state.toggle_auto_hide().toggle_auto_hide(), state);
        }
        assert_eq!(DockState::Float.toggle_auto_hide(), DockState::Float);
    }
}
