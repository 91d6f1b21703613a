//! Fusion sets: places on any page that share one marking.

use serde::Serialize;

use crate::diagnostics::{self, Diagnostic};
use crate::ids::{Id, IdGenerator};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FusionSet {
    pub id: Id,
    pub name: String,
    /// Member place ids in registration order.
    pub members: Vec<Id>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FusionRegistry {
    sets: Vec<FusionSet>,
}

impl FusionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new fusion set. Names are not checked for duplicates;
    /// membership goes to the first set declared under a name.
    pub fn declare(&mut self, ids: &mut IdGenerator, name: &str) -> Id {
        let id = ids.next_id();
        log::debug!("declare fusion set {} as {}", name, id);
        self.sets.push(FusionSet {
            id: id.clone(),
            name: name.to_string(),
            members: Vec::new(),
        });
        id
    }

    /// Adds `place` to the set called `name`.
    ///
    /// An undeclared name drops the membership and returns the diagnostic
    /// describing it.
    pub fn register_member(&mut self, name: &str, place: &Id) -> Option<Diagnostic> {
        match self.sets.iter_mut().find(|s| s.name == name) {
            Some(set) => {
                set.members.push(place.clone());
                None
            }
            None => Some(diagnostics::warn(Diagnostic::UndeclaredFusion {
                fusion: name.to_string(),
                place: place.clone(),
            })),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FusionSet> {
        self.sets.iter().find(|s| s.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FusionSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn members_accumulate_under_declared_name() {
        let mut ids = IdGenerator::new();
        let mut fusions = FusionRegistry::new();
        fusions.declare(&mut ids, "lock");
        let a = ids.next_id();
        let b = ids.next_id();

        assert_eq!(fusions.register_member("lock", &a), None);
        assert_eq!(fusions.register_member("lock", &b), None);
        assert_eq!(
            fusions.get("lock").map(|s| s.members.clone()),
            Some(vec![a, b])
        );
    }

    #[test]
    fn undeclared_name_is_reported_not_fatal() {
        let mut ids = IdGenerator::new();
        let mut fusions = FusionRegistry::new();
        let place = ids.next_id();

        let diag = fusions.register_member("ghost", &place);
        assert_eq!(
            diag,
            Some(Diagnostic::UndeclaredFusion {
                fusion: "ghost".into(),
                place,
            })
        );
        assert!(fusions.is_empty());
    }
}
