use thiserror::Error;

use crate::ids::Id;

/// Caller misuse detected while constructing a document.
///
/// A failing call leaves the document exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("cannot declare the empty enumeration color set {name}")]
    EmptyEnum { name: String },
    #[error("product color set {name} needs at least two component sets, got {count}")]
    ProductArity { name: String, count: usize },
    #[error("cannot declare an empty variable list of type {type_name}")]
    EmptyVarList { type_name: String },
    #[error("substitution wiring: {role} {id} was not created in this document")]
    UnresolvedReference { role: &'static str, id: Id },
    #[error("transition {0} is not a substitution transition")]
    NotSubstitution(Id),
    #[error("page {0} does not exist in this document")]
    UnknownPage(Id),
}
