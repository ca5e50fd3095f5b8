use thiserror::Error;

use crate::state::DockState;

#[derive(Debug, Error, PartialEq)]
pub enum DockError {
    /// The target state violates the content's allowed areas or a
    /// panel-wide rule. The transition is refused with no partial mutation.
    #[error("invalid dock state transition to {0:?}")]
    InvalidStateTransition(DockState),

    /// The pane belongs to a different container or orchestrator, or its
    /// family (float vs panel) does not match the assignment.
    #[error("pane does not belong to this container")]
    InvalidPaneReference,

    /// A placement state was assigned while the content is not attached to
    /// a dock panel.
    #[error("content is not attached to a dock panel")]
    NullContainer,

    /// The drag source may not occupy any state the gesture could produce.
    #[error("drag source has no legal drop placement")]
    InvalidDragSource,

    /// A commit was attempted against a target the source may not occupy.
    #[error("drop target is not legal for the drag source")]
    InvalidDropTarget,

    /// An index into a pane's content list was out of range.
    #[error("content index {0} is out of range")]
    InvalidContentIndex(isize),

    /// A portion or proportion outside its permitted range.
    #[error("portion must be greater than zero, got {0}")]
    InvalidPortion(f64),
}

pub type Result<T> = std::result::Result<T, DockError>;
