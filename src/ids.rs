//! Element identifiers.
//!
//! Every addressable element in a CPN document (places, transitions, arcs,
//! color sets, instances, fusion sets, inscriptions) carries an `id` attribute
//! that other elements point at through `idref`, `subpage`, `portsock` and
//! friends. Ids are opaque strings: a fixed prefix followed by a counter.
//!
//! Example: the first id handed out by a fresh generator is `ID11`.

use serde::Serialize;
use std::fmt;

#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Id(String);

impl Id {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Id({})", self.0)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Id {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Issues document-wide unique ids.
///
/// One generator is owned by each [`crate::Document`]; all element kinds
/// share its counter, so ids never collide across kinds and are never reused.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    counter: u64,
}

impl IdGenerator {
    pub const DEFAULT_PREFIX: &'static str = "ID";

    /// Values up to and including this one are reserved by the modelling tool.
    pub const RESERVED: u64 = 10;

    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX, Self::RESERVED)
    }

    /// The first issued id is `prefix` followed by `seed + 1`.
    pub fn with_prefix(prefix: impl Into<String>, seed: u64) -> Self {
        Self {
            prefix: prefix.into(),
            counter: seed,
        }
    }

    pub fn next_id(&mut self) -> Id {
        self.counter += 1;
        Id(format!("{}{}", self.prefix, self.counter))
    }

    /// Counter value of the most recently issued id.
    pub fn last_issued(&self) -> u64 {
        self.counter
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for IdGenerator {
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        Some(self.next_id())
    }
}
