//! Best-effort skips recorded during construction and layout.
//!
//! None of these abort the build. Each is logged once at `warn` level and
//! kept on the document so callers can inspect what was left unlinked.

use serde::Serialize;
use std::fmt;

use crate::ids::Id;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// A fusion place named a fusion set that was never declared.
    UndeclaredFusion { fusion: String, place: Id },
    /// An arc label could not be placed between its endpoints.
    UnpositionedArc { arc: Id, reason: ArcSkip },
    /// `leave` was called with no scope to pop.
    EmptyScopeStack,
    /// `enter` was given a handle issued by another instance tree.
    UnknownInstance { index: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArcSkip {
    PlaceNotFound(Id),
    TransitionNotFound(Id),
    PlaceUnpositioned(Id),
    TransitionUnpositioned(Id),
}

impl fmt::Display for ArcSkip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArcSkip::PlaceNotFound(id) => write!(f, "place {} not found", id),
            ArcSkip::TransitionNotFound(id) => write!(f, "transition {} not found", id),
            ArcSkip::PlaceUnpositioned(id) => write!(f, "place {} has no position", id),
            ArcSkip::TransitionUnpositioned(id) => {
                write!(f, "transition {} has no position", id)
            }
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UndeclaredFusion { fusion, place } => write!(
                f,
                "place {} references undeclared fusion set '{}'; membership dropped",
                place, fusion
            ),
            Diagnostic::UnpositionedArc { arc, reason } => {
                write!(f, "arc {} left unpositioned: {}", arc, reason)
            }
            Diagnostic::EmptyScopeStack => f.write_str("leave() on an empty instance scope stack"),
            Diagnostic::UnknownInstance { index } => write!(
                f,
                "instance handle {} was not issued by this document",
                index
            ),
        }
    }
}

/// Log a diagnostic and hand it back for recording.
pub fn warn(diagnostic: Diagnostic) -> Diagnostic {
    log::warn!("{}", diagnostic);
    diagnostic
}
