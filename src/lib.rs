//! Programmatic builder for Coloured Petri Net model files.
//!
//! A [`Document`] is grown through typed constructors (color sets, places,
//! transitions, arcs, pages, fusion sets, instances), laid out with the
//! functions in [`layout`], and finally projected to the CPN Tools XML
//! dialect by [`render`].

pub mod config;
pub mod diagnostics;
pub mod document;
pub mod error;
pub mod example;
pub mod fusion;
pub mod hierarchy;
pub mod ids;
pub mod layout;
pub mod model;
pub mod render;

pub use config::{DocType, Generator, RenderOptions};
pub use diagnostics::{ArcSkip, Diagnostic};
pub use document::{Document, PageEditor};
pub use error::DefinitionError;
pub use hierarchy::{InstanceRecord, ScopeGuard};
pub use ids::{Id, IdGenerator};

pub type Result<T> = anyhow::Result<T>;
