//! Docking-window layout engine.
//!
//! A `DockPanel` orchestrates content units through a placement state
//! machine: contents live in tabbed `Pane`s, panes nest into binary-split
//! trees inside the five zone containers and any number of floating
//! windows. Drag gestures negotiate drops through `DockDragEngine`, region
//! dividers through `SplitterDragEngine`, and whole layouts round-trip
//! through RON snapshots in `persist`.

pub mod content;
pub mod drag;
pub mod error;
pub mod geometry;
pub mod metrics;
pub mod nested;
pub mod pane;
pub mod panel;
pub mod persist;
pub mod splitter;
pub mod state;

pub use content::{ContentHandler, ContentId, DockContent};
pub use drag::{DockDragEngine, DragModifiers, DragSource, DropTarget};
pub use error::{DockError, Result};
pub use geometry::{Point, Rect, Size};
pub use metrics::{DefaultStripMetrics, StripMetrics};
pub use nested::NestedPaneCollection;
pub use pane::{NestedDockingStatus, Pane, PaneId};
pub use panel::{
    ContainerRef, DockEvent, DockPanel, DockZone, FloatWindow, FloatWindowId, MIN_PANE_SIZE,
    SplitterTarget,
};
pub use persist::{LayoutSnapshot, load_layout, save_layout};
pub use splitter::{SPLITTER_SIZE, SplitterDragEngine, SplitterOrientation};
pub use state::{DockAlignment, DockAreas, DockState, DockStyle, DocumentHostMode};
