use serde::Serialize;

use crate::ids::Id;
use crate::model::net::{Arc, Place, PortRole, Transition};

/// One level of the net hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub id: Id,
    pub name: String,
    pub places: Vec<Place>,
    pub transitions: Vec<Transition>,
    pub arcs: Vec<Arc>,
}

impl Page {
    pub fn new(id: Id, name: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            places: Vec::new(),
            transitions: Vec::new(),
            arcs: Vec::new(),
        }
    }

    pub fn place(&self, id: &Id) -> Option<&Place> {
        self.places.iter().find(|p| &p.id == id)
    }

    pub fn place_mut(&mut self, id: &Id) -> Option<&mut Place> {
        self.places.iter_mut().find(|p| &p.id == id)
    }

    pub fn transition(&self, id: &Id) -> Option<&Transition> {
        self.transitions.iter().find(|t| &t.id == id)
    }

    pub fn transition_mut(&mut self, id: &Id) -> Option<&mut Transition> {
        self.transitions.iter_mut().find(|t| &t.id == id)
    }

    pub fn arc(&self, id: &Id) -> Option<&Arc> {
        self.arcs.iter().find(|a| &a.id == id)
    }

    pub fn place_by_name(&self, name: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.name == name)
    }

    /// First place on this page carrying a port of `role`.
    pub fn port_place_id(&self, role: PortRole) -> Option<&Id> {
        self.places
            .iter()
            .find(|p| p.port_role() == Some(role))
            .map(|p| &p.id)
    }

    pub fn in_port_place_id(&self) -> Option<&Id> {
        self.port_place_id(PortRole::In)
    }

    pub fn out_port_place_id(&self) -> Option<&Id> {
        self.port_place_id(PortRole::Out)
    }
}
