//! Page instance hierarchy.
//!
//! Instance records form a tree mirroring page substitution. A stack of
//! "current" instances decides where the next record is attached; an empty
//! stack attaches at the top of the instances container.
//!
//! [`ScopeGuard`] pops its scope when dropped, so nested subpage
//! construction stays balanced on every exit path.

use serde::Serialize;
use std::ops::{Deref, DerefMut};

use crate::diagnostics::{self, Diagnostic};
use crate::document::Document;
use crate::ids::{Id, IdGenerator};

/// What an instance binds into the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InstanceTarget {
    Page(Id),
    Transition(Id),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceRecord {
    pub id: Id,
    pub target: InstanceTarget,
}

impl InstanceRecord {
    pub fn for_page(ids: &mut IdGenerator, page: &Id) -> Self {
        Self {
            id: ids.next_id(),
            target: InstanceTarget::Page(page.clone()),
        }
    }

    pub fn for_transition(ids: &mut IdGenerator, transition: &Id) -> Self {
        Self {
            id: ids.next_id(),
            target: InstanceTarget::Transition(transition.clone()),
        }
    }
}

/// Index of an attached record inside its [`InstanceTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceHandle(usize);

#[derive(Debug, Clone)]
struct Node {
    record: InstanceRecord,
    children: Vec<InstanceHandle>,
}

#[derive(Debug, Clone, Default)]
pub struct InstanceTree {
    nodes: Vec<Node>,
    roots: Vec<InstanceHandle>,
    scope: Vec<InstanceHandle>,
}

impl InstanceTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` under the current scope without entering it.
    pub fn attach(&mut self, record: InstanceRecord) -> InstanceHandle {
        let handle = InstanceHandle(self.nodes.len());
        log::debug!(
            "attach instance {} at depth {}",
            record.id,
            self.scope.len()
        );
        self.nodes.push(Node {
            record,
            children: Vec::new(),
        });
        match self.current() {
            Some(parent) => self.nodes[parent.0].children.push(handle),
            None => self.roots.push(handle),
        }
        handle
    }

    /// Makes `handle` the parent of every record attached until the
    /// matching [`leave`](Self::leave). A handle this tree never issued
    /// leaves the stack unchanged and returns the diagnostic for it.
    pub fn enter(&mut self, handle: InstanceHandle) -> Option<Diagnostic> {
        if handle.0 >= self.nodes.len() {
            let diag = Diagnostic::UnknownInstance { index: handle.0 };
            return Some(diagnostics::warn(diag));
        }
        self.scope.push(handle);
        None
    }

    pub fn attach_and_enter(&mut self, record: InstanceRecord) -> InstanceHandle {
        let handle = self.attach(record);
        self.scope.push(handle);
        handle
    }

    /// Pops the current scope. Popping an empty stack changes nothing and
    /// returns the diagnostic for it.
    pub fn leave(&mut self) -> Option<Diagnostic> {
        match self.scope.pop() {
            Some(_) => None,
            None => Some(diagnostics::warn(Diagnostic::EmptyScopeStack)),
        }
    }

    /// Pops `handle` and everything entered after it. Does nothing if
    /// `handle` is no longer on the stack.
    pub fn close(&mut self, handle: InstanceHandle) {
        if let Some(pos) = self.scope.iter().rposition(|h| *h == handle) {
            self.scope.truncate(pos);
        }
    }

    pub fn current(&self) -> Option<InstanceHandle> {
        self.scope.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.scope.len()
    }

    pub fn record(&self, handle: InstanceHandle) -> Option<&InstanceRecord> {
        self.nodes.get(handle.0).map(|n| &n.record)
    }

    /// Empty for leaves and for handles this tree never issued.
    pub fn children(&self, handle: InstanceHandle) -> &[InstanceHandle] {
        self.nodes
            .get(handle.0)
            .map_or(&[][..], |n| n.children.as_slice())
    }

    /// Records attached directly to the instances container.
    pub fn roots(&self) -> &[InstanceHandle] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Owned nested view, used for JSON dumps.
    pub fn to_view(&self) -> Vec<InstanceView> {
        self.roots.iter().map(|h| self.view(*h)).collect()
    }

    fn view(&self, handle: InstanceHandle) -> InstanceView {
        let node = &self.nodes[handle.0];
        InstanceView {
            record: node.record.clone(),
            children: node.children.iter().map(|h| self.view(*h)).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceView {
    #[serde(flatten)]
    pub record: InstanceRecord,
    pub children: Vec<InstanceView>,
}

/// Scope entered through [`Document::enter_scope`]; leaves it on drop.
///
/// Derefs to the document so construction continues through the guard.
pub struct ScopeGuard<'a> {
    doc: &'a mut Document,
    handle: InstanceHandle,
}

impl<'a> ScopeGuard<'a> {
    pub(crate) fn new(doc: &'a mut Document, handle: InstanceHandle) -> Self {
        Self { doc, handle }
    }
}

impl Deref for ScopeGuard<'_> {
    type Target = Document;

    fn deref(&self) -> &Document {
        self.doc
    }
}

impl DerefMut for ScopeGuard<'_> {
    fn deref_mut(&mut self) -> &mut Document {
        self.doc
    }
}

impl Drop for ScopeGuard<'_> {
    fn drop(&mut self) {
        self.doc.instances_mut().close(self.handle);
    }
}
