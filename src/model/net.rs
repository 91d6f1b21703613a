//! Places, transitions and arcs.
//!
//! Constructors draw ids from the caller's generator and return records that
//! belong to no page yet. Cross references (arc endpoints, substitution
//! bindings, fusion membership) are stored as ids and resolved by lookup.

use serde::Serialize;
use std::fmt;

use crate::ids::{Id, IdGenerator};
use crate::model::graphics::{Arrow, BoxShape, Graphics, PlaceShape, Point};

/// A positioned text attached to an element: type, marking, guard, arc label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Inscription {
    pub id: Id,
    pub text: String,
    pub position: Option<Point>,
    pub graphics: Option<Graphics>,
}

impl Inscription {
    pub fn new(ids: &mut IdGenerator, text: &str) -> Self {
        Self {
            id: ids.next_id(),
            text: text.to_string(),
            position: None,
            graphics: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PortRole {
    In,
    Out,
}

impl fmt::Display for PortRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PortRole::In => "In",
            PortRole::Out => "Out",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Port {
    pub id: Id,
    pub role: PortRole,
    pub position: Option<Point>,
    pub graphics: Option<Graphics>,
}

/// Local record of a place's fusion-set name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FusionInfo {
    pub id: Id,
    pub name: String,
    pub position: Option<Point>,
    pub graphics: Option<Graphics>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlaceKind {
    Basic,
    Port,
    Fusion,
    /// A port place that is also a fusion set member.
    FusedPort,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub id: Id,
    pub name: String,
    /// Color set name, not id.
    pub color_set: Inscription,
    pub init_mark: Inscription,
    pub port: Option<Port>,
    pub fusion: Option<FusionInfo>,
    pub position: Option<Point>,
    pub graphics: Option<Graphics>,
    pub shape: Option<PlaceShape>,
}

impl Place {
    pub fn basic(ids: &mut IdGenerator, name: &str, type_name: &str, init: &str) -> Self {
        let id = ids.next_id();
        Self {
            id,
            name: name.to_string(),
            color_set: Inscription::new(ids, type_name),
            init_mark: Inscription::new(ids, init),
            port: None,
            fusion: None,
            position: None,
            graphics: None,
            shape: None,
        }
    }

    pub fn port(
        ids: &mut IdGenerator,
        role: PortRole,
        name: &str,
        type_name: &str,
        init: &str,
    ) -> Self {
        let mut place = Self::basic(ids, name, type_name, init);
        place.port = Some(Port {
            id: ids.next_id(),
            role,
            position: None,
            graphics: None,
        });
        place
    }

    pub fn in_port(ids: &mut IdGenerator, name: &str, type_name: &str, init: &str) -> Self {
        Self::port(ids, PortRole::In, name, type_name, init)
    }

    pub fn out_port(ids: &mut IdGenerator, name: &str, type_name: &str, init: &str) -> Self {
        Self::port(ids, PortRole::Out, name, type_name, init)
    }

    /// Membership in the fusion set itself is registered separately.
    pub fn fusion(
        ids: &mut IdGenerator,
        fusion_name: &str,
        name: &str,
        type_name: &str,
        init: &str,
    ) -> Self {
        let mut place = Self::basic(ids, name, type_name, init);
        place.fusion = Some(FusionInfo {
            id: ids.next_id(),
            name: fusion_name.to_string(),
            position: None,
            graphics: None,
        });
        place
    }

    pub fn kind(&self) -> PlaceKind {
        match (self.port.is_some(), self.fusion.is_some()) {
            (true, true) => PlaceKind::FusedPort,
            (true, false) => PlaceKind::Port,
            (false, true) => PlaceKind::Fusion,
            (false, false) => PlaceKind::Basic,
        }
    }

    pub fn port_role(&self) -> Option<PortRole> {
        self.port.as_ref().map(|p| p.role)
    }
}

/// Socket/port pairing plus the page a substitution transition stands for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubpageBinding {
    pub subpage: Id,
    pub in_port: Id,
    pub in_socket: Id,
    pub out_port: Id,
    pub out_socket: Id,
}

impl SubpageBinding {
    /// `(inport,insocket)(outport,outsocket)`
    pub fn portsock(&self) -> String {
        format!(
            "({},{})({},{})",
            self.in_port, self.in_socket, self.out_port, self.out_socket
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Substitution {
    /// Label shown next to the transition; its text is the transition name.
    pub info: Inscription,
    /// `None` until wired; an unwired substitution links no subpage.
    pub binding: Option<SubpageBinding>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TransitionKind {
    Basic,
    Condition,
    Substitution,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transition {
    pub id: Id,
    pub name: String,
    pub guard: Option<Inscription>,
    pub substitution: Option<Substitution>,
    pub position: Option<Point>,
    pub graphics: Option<Graphics>,
    pub shape: Option<BoxShape>,
}

impl Transition {
    pub fn basic(ids: &mut IdGenerator, name: &str) -> Self {
        Self {
            id: ids.next_id(),
            name: name.to_string(),
            guard: None,
            substitution: None,
            position: None,
            graphics: None,
            shape: None,
        }
    }

    pub fn condition(ids: &mut IdGenerator, name: &str, guard: &str) -> Self {
        let mut trans = Self::basic(ids, name);
        trans.guard = Some(Inscription::new(ids, guard));
        trans
    }

    pub fn substitution(ids: &mut IdGenerator, name: &str) -> Self {
        let mut trans = Self::basic(ids, name);
        trans.substitution = Some(Substitution {
            info: Inscription::new(ids, name),
            binding: None,
        });
        trans
    }

    pub fn kind(&self) -> TransitionKind {
        if self.substitution.is_some() {
            TransitionKind::Substitution
        } else if self.guard.is_some() {
            TransitionKind::Condition
        } else {
            TransitionKind::Basic
        }
    }

    pub fn binding(&self) -> Option<&SubpageBinding> {
        self.substitution.as_ref().and_then(|s| s.binding.as_ref())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Orientation {
    PtoT,
    TtoP,
    Inhibitor,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Orientation::PtoT => "PtoT",
            Orientation::TtoP => "TtoP",
            Orientation::Inhibitor => "Inhibitor",
        })
    }
}

/// Connection between exactly one place and one transition.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arc {
    pub id: Id,
    pub orientation: Orientation,
    pub place: Id,
    pub transition: Id,
    pub annotation: Inscription,
    pub position: Option<Point>,
    pub graphics: Option<Graphics>,
    pub arrow: Option<Arrow>,
}

impl Arc {
    fn new(
        ids: &mut IdGenerator,
        orientation: Orientation,
        place: &Id,
        transition: &Id,
        expression: &str,
    ) -> Self {
        let id = ids.next_id();
        Self {
            id,
            orientation,
            place: place.clone(),
            transition: transition.clone(),
            annotation: Inscription::new(ids, expression),
            position: None,
            graphics: None,
            arrow: None,
        }
    }

    pub fn place_to_transition(
        ids: &mut IdGenerator,
        place: &Id,
        transition: &Id,
        expression: &str,
    ) -> Self {
        Self::new(ids, Orientation::PtoT, place, transition, expression)
    }

    pub fn transition_to_place(
        ids: &mut IdGenerator,
        transition: &Id,
        place: &Id,
        expression: &str,
    ) -> Self {
        Self::new(ids, Orientation::TtoP, place, transition, expression)
    }

    /// Inhibitor arcs carry an empty inscription.
    pub fn inhibitor(ids: &mut IdGenerator, place: &Id, transition: &Id) -> Self {
        Self::new(ids, Orientation::Inhibitor, place, transition, "")
    }
}
