//! Typed CPN model: declarations, net elements and pages.
//!
//! Nothing here knows about XML; the render module projects these records
//! into the output tree.

pub mod colorset;
pub mod declaration;
pub mod graphics;
pub mod net;
pub mod page;

pub use colorset::{ColorSet, ColorSetKind};
pub use declaration::{Declaration, VarDecl};
pub use graphics::{Arrow, BoxShape, Graphics, PlaceShape, Point};
pub use net::{
    Arc, FusionInfo, Inscription, Orientation, Place, PlaceKind, Port, PortRole, SubpageBinding,
    Substitution, Transition, TransitionKind,
};
pub use page::Page;
