//! The document assembler.
//!
//! A [`Document`] owns everything that ends up in one model file: the id
//! generator, the declarations box, the pages, fusion sets and the instance
//! hierarchy. Net elements are added through a [`PageEditor`] borrowed for
//! one page at a time; cross-page operations (substitution wiring, instance
//! scopes) live on the document itself.

use serde::Serialize;
use std::ops::{Deref, DerefMut};

use crate::config::{DocType, Generator};
use crate::diagnostics::Diagnostic;
use crate::error::DefinitionError;
use crate::fusion::{FusionRegistry, FusionSet};
use crate::hierarchy::{InstanceHandle, InstanceRecord, InstanceTree, InstanceView, ScopeGuard};
use crate::ids::{Id, IdGenerator};
use crate::layout::{self, Positioned};
use crate::model::colorset::{self, ColorSet};
use crate::model::declaration::Declaration;
use crate::model::graphics::Point;
use crate::model::net::{Arc, Place, SubpageBinding, Transition};
use crate::model::page::Page;

#[derive(Debug, Clone)]
pub struct Document {
    ids: IdGenerator,
    generator: Generator,
    doctype: Option<DocType>,
    globbox: Vec<Declaration>,
    pages: Vec<Page>,
    fusions: FusionRegistry,
    instances: InstanceTree,
    diagnostics: Vec<Diagnostic>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self::with_ids(IdGenerator::new())
    }

    pub fn with_ids(ids: IdGenerator) -> Self {
        Self {
            ids,
            generator: Generator::default(),
            doctype: Some(DocType::cpn()),
            globbox: Vec::new(),
            pages: Vec::new(),
            fusions: FusionRegistry::new(),
            instances: InstanceTree::new(),
            diagnostics: Vec::new(),
        }
    }

    pub fn ids_mut(&mut self) -> &mut IdGenerator {
        &mut self.ids
    }

    pub fn generator(&self) -> &Generator {
        &self.generator
    }

    pub fn set_generator(&mut self, generator: Generator) {
        self.generator = generator;
    }

    pub fn doctype(&self) -> Option<&DocType> {
        self.doctype.as_ref()
    }

    pub fn set_doctype(&mut self, doctype: Option<DocType>) {
        self.doctype = doctype;
    }

    pub fn globbox(&self) -> &[Declaration] {
        &self.globbox
    }

    pub fn append_declaration(&mut self, decl: impl Into<Declaration>) -> Id {
        let decl = decl.into();
        let id = decl.id().clone();
        self.globbox.push(decl);
        id
    }

    pub fn prepend_declaration(&mut self, decl: impl Into<Declaration>) -> Id {
        let decl = decl.into();
        let id = decl.id().clone();
        self.globbox.insert(0, decl);
        id
    }

    pub fn color_set(&self, name: &str) -> Option<&ColorSet> {
        self.globbox.iter().find_map(|d| match d {
            Declaration::ColorSet(c) if c.name == name => Some(c),
            _ => None,
        })
    }

    /// Name of the integer color set bounded by `[lower, upper]`, declaring
    /// it first if no set of that name exists yet.
    pub fn bounded_int_type(&mut self, lower: i64, upper: i64) -> String {
        let name = colorset::bounded_int_name(lower, upper);
        if self.color_set(&name).is_none() {
            let colset = colorset::int(
                &mut self.ids,
                &name,
                &lower.to_string(),
                &upper.to_string(),
            );
            self.append_declaration(colset);
        }
        name
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, id: &Id) -> Option<&Page> {
        self.pages.iter().find(|p| &p.id == id)
    }

    pub fn page_by_name(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name == name)
    }

    /// Unattached page with a fresh id.
    pub fn new_page(&mut self, name: &str) -> Page {
        Page::new(self.ids.next_id(), name)
    }

    pub fn append_page(&mut self, page: Page) -> Id {
        log::debug!("append page {} ({})", page.name, page.id);
        let id = page.id.clone();
        self.pages.push(page);
        id
    }

    pub fn prepend_page(&mut self, page: Page) -> Id {
        log::debug!("prepend page {} ({})", page.name, page.id);
        let id = page.id.clone();
        self.pages.insert(0, page);
        id
    }

    pub fn create_page(&mut self, name: &str) -> Id {
        let page = self.new_page(name);
        self.append_page(page)
    }

    pub fn find_or_create_page(&mut self, name: &str) -> Id {
        match self.page_by_name(name) {
            Some(page) => page.id.clone(),
            None => self.create_page(name),
        }
    }

    pub fn edit_page(&mut self, id: &Id) -> Result<PageEditor<'_>, DefinitionError> {
        let Document {
            ids,
            pages,
            fusions,
            diagnostics,
            ..
        } = self;
        let page = pages
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| DefinitionError::UnknownPage(id.clone()))?;
        Ok(PageEditor {
            page,
            ids,
            fusions,
            diagnostics,
        })
    }

    pub fn find_place(&self, id: &Id) -> Option<&Place> {
        self.pages.iter().find_map(|p| p.place(id))
    }

    pub fn find_transition(&self, id: &Id) -> Option<&Transition> {
        self.pages.iter().find_map(|p| p.transition(id))
    }

    fn find_transition_mut(&mut self, id: &Id) -> Option<&mut Transition> {
        self.pages.iter_mut().find_map(|p| p.transition_mut(id))
    }

    /// Binds a substitution transition to `subpage`.
    ///
    /// Every id must name an element of this document and `trans` must carry
    /// a substitution marker; otherwise nothing changes.
    pub fn wire_substitution(
        &mut self,
        trans: &Id,
        in_socket: &Id,
        out_socket: &Id,
        subpage: &Id,
        sub_in_port: &Id,
        sub_out_port: &Id,
    ) -> Result<(), DefinitionError> {
        let unresolved = |role: &'static str, id: &Id| DefinitionError::UnresolvedReference {
            role,
            id: id.clone(),
        };
        for (role, id) in [
            ("input socket", in_socket),
            ("output socket", out_socket),
            ("input port", sub_in_port),
            ("output port", sub_out_port),
        ] {
            if self.find_place(id).is_none() {
                return Err(unresolved(role, id));
            }
        }
        if self.page(subpage).is_none() {
            return Err(unresolved("subpage", subpage));
        }

        let transition = self
            .find_transition_mut(trans)
            .ok_or_else(|| unresolved("transition", trans))?;
        let subst = transition
            .substitution
            .as_mut()
            .ok_or_else(|| DefinitionError::NotSubstitution(trans.clone()))?;
        subst.binding = Some(SubpageBinding {
            subpage: subpage.clone(),
            in_port: sub_in_port.clone(),
            in_socket: in_socket.clone(),
            out_port: sub_out_port.clone(),
            out_socket: out_socket.clone(),
        });
        log::debug!("wired substitution {} to page {}", trans, subpage);
        Ok(())
    }

    /// Wires `trans` to `subpage` using the first port places of each role
    /// on the subpage.
    pub fn wire_to_page_ports(
        &mut self,
        trans: &Id,
        in_socket: &Id,
        out_socket: &Id,
        subpage: &Id,
    ) -> Result<(), DefinitionError> {
        let page = self
            .page(subpage)
            .ok_or_else(|| DefinitionError::UnknownPage(subpage.clone()))?;
        let missing = |role: &'static str| DefinitionError::UnresolvedReference {
            role,
            id: subpage.clone(),
        };
        let sub_in = page
            .in_port_place_id()
            .cloned()
            .ok_or_else(|| missing("input port on subpage"))?;
        let sub_out = page
            .out_port_place_id()
            .cloned()
            .ok_or_else(|| missing("output port on subpage"))?;
        self.wire_substitution(trans, in_socket, out_socket, subpage, &sub_in, &sub_out)
    }

    /// Positions every arc label on the page, recording arcs that had to be
    /// skipped. Arc graphics are left untouched.
    pub fn position_all_arcs(&mut self, page: &Id) -> Result<usize, DefinitionError> {
        let mut editor = self.edit_page(page)?;
        Ok(editor.position_all_arcs())
    }

    pub fn fusions(&self) -> impl Iterator<Item = &FusionSet> {
        self.fusions.iter()
    }

    pub fn declare_fusion(&mut self, name: &str) -> Id {
        self.fusions.declare(&mut self.ids, name)
    }

    pub fn register_fusion_member(&mut self, name: &str, place: &Id) {
        if let Some(diag) = self.fusions.register_member(name, place) {
            self.diagnostics.push(diag);
        }
    }

    pub fn instances(&self) -> &InstanceTree {
        &self.instances
    }

    pub(crate) fn instances_mut(&mut self) -> &mut InstanceTree {
        &mut self.instances
    }

    pub fn instance_for_page(&mut self, page: &Id) -> InstanceRecord {
        InstanceRecord::for_page(&mut self.ids, page)
    }

    pub fn instance_for_transition(&mut self, trans: &Id) -> InstanceRecord {
        InstanceRecord::for_transition(&mut self.ids, trans)
    }

    pub fn attach_instance(&mut self, record: InstanceRecord) -> InstanceHandle {
        self.instances.attach(record)
    }

    pub fn enter_instance(&mut self, handle: InstanceHandle) {
        if let Some(diag) = self.instances.enter(handle) {
            self.diagnostics.push(diag);
        }
    }

    pub fn attach_and_enter(&mut self, record: InstanceRecord) -> InstanceHandle {
        self.instances.attach_and_enter(record)
    }

    pub fn leave(&mut self) {
        if let Some(diag) = self.instances.leave() {
            self.diagnostics.push(diag);
        }
    }

    /// Attaches `record`, enters it, and leaves again when the guard drops.
    pub fn enter_scope(&mut self, record: InstanceRecord) -> ScopeGuard<'_> {
        let handle = self.instances.attach_and_enter(record);
        ScopeGuard::new(self, handle)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// Borrowed, serialisable view of the whole document.
    pub fn snapshot(&self) -> DocumentSnapshot<'_> {
        DocumentSnapshot {
            generator: &self.generator,
            doctype: self.doctype.as_ref(),
            globbox: &self.globbox,
            pages: &self.pages,
            fusions: &self.fusions,
            instances: self.instances.to_view(),
            diagnostics: &self.diagnostics,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DocumentSnapshot<'a> {
    pub generator: &'a Generator,
    pub doctype: Option<&'a DocType>,
    pub globbox: &'a [Declaration],
    pub pages: &'a [Page],
    pub fusions: &'a FusionRegistry,
    pub instances: Vec<InstanceView>,
    pub diagnostics: &'a [Diagnostic],
}

/// Mutable access to one page plus the document state element constructors
/// need. Derefs to the [`Page`].
pub struct PageEditor<'a> {
    page: &'a mut Page,
    ids: &'a mut IdGenerator,
    fusions: &'a mut FusionRegistry,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Deref for PageEditor<'_> {
    type Target = Page;

    fn deref(&self) -> &Page {
        self.page
    }
}

impl DerefMut for PageEditor<'_> {
    fn deref_mut(&mut self) -> &mut Page {
        self.page
    }
}

impl PageEditor<'_> {
    fn add_place(&mut self, place: Place) -> Id {
        let id = place.id.clone();
        self.page.places.push(place);
        id
    }

    fn add_transition(&mut self, trans: Transition) -> Id {
        let id = trans.id.clone();
        self.page.transitions.push(trans);
        id
    }

    fn add_arc(&mut self, arc: Arc) -> Id {
        let id = arc.id.clone();
        self.page.arcs.push(arc);
        id
    }

    pub fn place(&mut self, name: &str, type_name: &str, init: &str) -> Id {
        let place = Place::basic(self.ids, name, type_name, init);
        self.add_place(place)
    }

    pub fn in_port_place(&mut self, name: &str, type_name: &str, init: &str) -> Id {
        let place = Place::in_port(self.ids, name, type_name, init);
        self.add_place(place)
    }

    pub fn out_port_place(&mut self, name: &str, type_name: &str, init: &str) -> Id {
        let place = Place::out_port(self.ids, name, type_name, init);
        self.add_place(place)
    }

    /// Creates the place and joins it to the fusion set `fusion_name`. An
    /// undeclared set leaves the place unlinked and records a diagnostic.
    pub fn fusion_place(
        &mut self,
        fusion_name: &str,
        name: &str,
        type_name: &str,
        init: &str,
    ) -> Id {
        let place = Place::fusion(self.ids, fusion_name, name, type_name, init);
        let id = self.add_place(place);
        if let Some(diag) = self.fusions.register_member(fusion_name, &id) {
            self.diagnostics.push(diag);
        }
        id
    }

    /// Declares a fusion set named after the place, then creates the place
    /// as its first member.
    pub fn fusion_and_fusion_place(&mut self, name: &str, type_name: &str, init: &str) -> Id {
        self.fusions.declare(self.ids, name);
        self.fusion_place(name, name, type_name, init)
    }

    pub fn basic_transition(&mut self, name: &str) -> Id {
        let trans = Transition::basic(self.ids, name);
        self.add_transition(trans)
    }

    pub fn condition_transition(&mut self, name: &str, guard: &str) -> Id {
        let trans = Transition::condition(self.ids, name, guard);
        self.add_transition(trans)
    }

    /// Unwired until [`Document::wire_substitution`] binds it.
    pub fn substitution_transition(&mut self, name: &str) -> Id {
        let trans = Transition::substitution(self.ids, name);
        self.add_transition(trans)
    }

    pub fn arc_place_to_transition(&mut self, place: &Id, trans: &Id, expression: &str) -> Id {
        let arc = Arc::place_to_transition(self.ids, place, trans, expression);
        self.add_arc(arc)
    }

    pub fn arc_transition_to_place(&mut self, trans: &Id, place: &Id, expression: &str) -> Id {
        let arc = Arc::transition_to_place(self.ids, trans, place, expression);
        self.add_arc(arc)
    }

    pub fn inhibitor_arc(&mut self, place: &Id, trans: &Id) -> Id {
        let arc = Arc::inhibitor(self.ids, place, trans);
        self.add_arc(arc)
    }

    /// Read-without-consume access: for each place, one arc each way, both
    /// inscribed with the place's name. Places must be on this page.
    pub fn reflexive_arcs(
        &mut self,
        trans: &Id,
        places: &[Id],
    ) -> Result<Vec<Id>, DefinitionError> {
        let names = places
            .iter()
            .map(|id| {
                self.page
                    .place(id)
                    .map(|p| p.name.clone())
                    .ok_or_else(|| DefinitionError::UnresolvedReference {
                        role: "place",
                        id: id.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut arcs = Vec::with_capacity(places.len() * 2);
        for (place, name) in places.iter().zip(&names) {
            arcs.push(self.arc_transition_to_place(trans, place, name));
            arcs.push(self.arc_place_to_transition(place, trans, name));
        }
        Ok(arcs)
    }

    /// Default layout plus position for the place or transition `id`.
    pub fn layout(&mut self, id: &Id, at: Point) -> Result<(), DefinitionError> {
        if let Some(place) = self.page.place_mut(id) {
            place.set_layout_and_position(at);
            return Ok(());
        }
        if let Some(trans) = self.page.transition_mut(id) {
            trans.set_layout_and_position(at);
            return Ok(());
        }
        Err(DefinitionError::UnresolvedReference {
            role: "element",
            id: id.clone(),
        })
    }

    /// Positions every arc label on the page, leaving arc graphics as they
    /// are. Returns how many arcs were skipped.
    pub fn position_all_arcs(&mut self) -> usize {
        let skipped = layout::position_all_arcs(self.page);
        let count = skipped.len();
        self.diagnostics.extend(skipped);
        count
    }

    /// Resets every arc to the default look, then positions the labels.
    /// Returns how many arcs were skipped.
    pub fn layout_all_arcs(&mut self) -> usize {
        self.page
            .arcs
            .iter_mut()
            .for_each(Positioned::set_default_layout);
        self.position_all_arcs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::ArcSkip;
    use crate::hierarchy::InstanceTarget;
    use crate::layout::style::{ARC_ARROW, ARC_GRAPHICS};
    use pretty_assertions::assert_eq;

    #[test]
    fn bounded_int_is_declared_once() {
        let mut doc = Document::new();
        let a = doc.bounded_int_type(0, 3);
        let b = doc.bounded_int_type(0, 3);
        assert_eq!(a, "INT0_3");
        assert_eq!(a, b);
        assert_eq!(doc.globbox().len(), 1);
        assert_eq!(doc.globbox()[0].layout(), "colset INT0_3 = with 0..3;");

        doc.bounded_int_type(1, 3);
        assert_eq!(doc.globbox().len(), 2);
    }

    #[test]
    fn prepend_puts_declaration_first() {
        let mut doc = Document::new();
        let unit = colorset::unit(doc.ids_mut(), "UNIT");
        let boolean = colorset::boolean(doc.ids_mut(), "BOOL");
        doc.append_declaration(unit);
        doc.prepend_declaration(boolean);
        let names: Vec<String> = doc.globbox().iter().map(|d| d.layout()).collect();
        assert_eq!(names, vec!["colset BOOL = bool;", "colset UNIT = unit;"]);
    }

    #[test]
    fn find_or_create_page_reuses_by_name() {
        let mut doc = Document::new();
        let first = doc.find_or_create_page("Top");
        let again = doc.find_or_create_page("Top");
        assert_eq!(first, again);
        assert_eq!(doc.pages().len(), 1);
    }

    #[test]
    fn editing_unknown_page_fails() {
        let mut doc = Document::new();
        let bogus = doc.ids_mut().next_id();
        assert_eq!(
            doc.edit_page(&bogus).err(),
            Some(DefinitionError::UnknownPage(bogus))
        );
    }

    #[test]
    fn fusion_membership_and_undeclared_name() {
        let mut doc = Document::new();
        let page = doc.create_page("p");
        doc.declare_fusion("shared");

        let mut ed = doc.edit_page(&page).unwrap();
        let a = ed.fusion_place("shared", "a", "UNIT", "");
        let b = ed.fusion_place("missing", "b", "UNIT", "");
        let c = ed.fusion_and_fusion_place("c", "UNIT", "1`()");

        let members: Vec<(String, Vec<Id>)> = doc
            .fusions()
            .map(|s| (s.name.clone(), s.members.clone()))
            .collect();
        assert_eq!(
            members,
            vec![("shared".into(), vec![a.clone()]), ("c".into(), vec![c])]
        );
        assert_eq!(
            doc.take_diagnostics(),
            vec![Diagnostic::UndeclaredFusion {
                fusion: "missing".into(),
                place: b.clone(),
            }]
        );
        assert!(doc.diagnostics().is_empty());

        doc.register_fusion_member("shared", &b);
        doc.register_fusion_member("nowhere", &b);
        let shared = doc.fusions().find(|s| s.name == "shared").unwrap();
        assert_eq!(shared.members, vec![a, b.clone()]);
        assert_eq!(
            doc.diagnostics(),
            &[Diagnostic::UndeclaredFusion {
                fusion: "nowhere".into(),
                place: b,
            }]
        );
    }

    #[test]
    fn reflexive_arcs_use_place_names() {
        let mut doc = Document::new();
        let page = doc.create_page("p");
        let mut ed = doc.edit_page(&page).unwrap();
        let lock = ed.place("lock", "UNIT", "1`()");
        let flag = ed.place("flag", "BOOL", "");
        let t = ed.basic_transition("t");

        let arcs = ed.reflexive_arcs(&t, &[lock.clone(), flag]).unwrap();
        assert_eq!(arcs.len(), 4);
        let texts: Vec<&str> = arcs
            .iter()
            .filter_map(|id| ed.arc(id))
            .map(|a| a.annotation.text.as_str())
            .collect();
        assert_eq!(texts, vec!["lock", "lock", "flag", "flag"]);

        let stranger = ed.ids.next_id();
        assert!(ed.reflexive_arcs(&t, &[lock, stranger]).is_err());
        assert_eq!(ed.arcs.len(), 4);
    }

    #[test]
    fn wiring_checks_every_reference() {
        let mut doc = Document::new();
        let top = doc.create_page("top");
        let sub = doc.create_page("sub");
        let (sin, sout) = {
            let mut ed = doc.edit_page(&sub).unwrap();
            (
                ed.in_port_place("in", "UNIT", ""),
                ed.out_port_place("out", "UNIT", ""),
            )
        };
        let (pin, pout, t, plain) = {
            let mut ed = doc.edit_page(&top).unwrap();
            (
                ed.place("a", "UNIT", ""),
                ed.place("b", "UNIT", ""),
                ed.substitution_transition("S"),
                ed.basic_transition("T"),
            )
        };

        let ghost = doc.ids_mut().next_id();
        assert_eq!(
            doc.wire_substitution(&t, &ghost, &pout, &sub, &sin, &sout),
            Err(DefinitionError::UnresolvedReference {
                role: "input socket",
                id: ghost,
            })
        );
        assert_eq!(
            doc.wire_substitution(&plain, &pin, &pout, &sub, &sin, &sout),
            Err(DefinitionError::NotSubstitution(plain))
        );
        assert_eq!(doc.find_transition(&t).and_then(|t| t.binding()), None);

        doc.wire_to_page_ports(&t, &pin, &pout, &sub).unwrap();
        let binding = doc.find_transition(&t).and_then(|t| t.binding()).cloned();
        assert_eq!(
            binding,
            Some(SubpageBinding {
                subpage: sub,
                in_port: sin,
                in_socket: pin,
                out_port: sout,
                out_socket: pout,
            })
        );
    }

    #[test]
    fn scope_guard_pops_on_drop() {
        let mut doc = Document::new();
        let top = doc.create_page("top");
        let record = doc.instance_for_page(&top);
        {
            let mut scope = doc.enter_scope(record);
            assert_eq!(scope.instances().depth(), 1);
            let t = scope.ids_mut().next_id();
            let child = scope.instance_for_transition(&t);
            let _inner = scope.enter_scope(child);
        }
        assert_eq!(doc.instances().depth(), 0);

        let root = doc.instances().roots()[0];
        assert_eq!(
            doc.instances().record(root).map(|r| &r.target),
            Some(&InstanceTarget::Page(top))
        );
        assert_eq!(doc.instances().children(root).len(), 1);

        doc.leave();
        assert_eq!(doc.diagnostics(), &[Diagnostic::EmptyScopeStack]);
    }

    #[test]
    fn entered_instance_parents_later_attachments() {
        let mut doc = Document::new();
        let top = doc.create_page("top");
        let record = doc.instance_for_page(&top);
        let root = doc.attach_instance(record);
        assert_eq!(doc.instances().depth(), 0);

        doc.enter_instance(root);
        let t = doc.ids_mut().next_id();
        let record = doc.instance_for_transition(&t);
        let child = doc.attach_instance(record);
        doc.leave();

        assert_eq!(doc.instances().roots(), &[root]);
        assert_eq!(doc.instances().children(root), &[child]);
        assert!(doc.diagnostics().is_empty());
    }

    #[test]
    fn instance_handle_from_another_document_is_ignored() {
        let mut first = Document::new();
        let page = first.create_page("a");
        let record = first.instance_for_page(&page);
        first.attach_instance(record);
        let record = first.instance_for_page(&page);
        let foreign = first.attach_instance(record);

        let mut doc = Document::new();
        let page = doc.create_page("b");
        doc.enter_instance(foreign);
        assert_eq!(doc.instances().depth(), 0);

        let record = doc.instance_for_page(&page);
        let root = doc.attach_and_enter(record);
        assert_eq!(doc.instances().roots(), &[root]);
        assert_eq!(doc.instances().current(), Some(root));
        assert_eq!(
            doc.diagnostics(),
            &[Diagnostic::UnknownInstance { index: 1 }]
        );
    }

    #[test]
    fn prepended_page_comes_first() {
        let mut doc = Document::new();
        doc.create_page("second");
        let page = doc.new_page("first");
        let first = doc.prepend_page(page);

        let names: Vec<&str> = doc.pages().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(doc.page_by_name("first").map(|p| &p.id), Some(&first));
    }

    #[test]
    fn positioning_arcs_keeps_custom_graphics() {
        let mut doc = Document::new();
        let page = doc.create_page("p");
        let mut ed = doc.edit_page(&page).unwrap();
        let p = ed.place("p", "UNIT", "");
        let t = ed.basic_transition("t");
        ed.layout(&p, Point::new(0, 0)).unwrap();
        ed.layout(&t, Point::new(0, 100)).unwrap();
        let arc = ed.arc_place_to_transition(&p, &t, "1`()");
        ed.layout_all_arcs();

        let mut custom = ARC_GRAPHICS;
        custom.line.thick = 3;
        ed.page.arcs[0].graphics = Some(custom.clone());
        ed.page.arcs[0].arrow = None;

        assert_eq!(ed.position_all_arcs(), 0);
        let positioned = ed.arc(&arc).unwrap();
        assert_eq!(positioned.graphics, Some(custom));
        assert_eq!(positioned.arrow, None);
        assert_eq!(positioned.annotation.position, Some(Point::new(0, 50)));

        ed.layout_all_arcs();
        let reset = ed.arc(&arc).unwrap();
        assert_eq!(reset.graphics, Some(ARC_GRAPHICS));
        assert_eq!(reset.arrow, Some(ARC_ARROW));
    }

    #[test]
    fn arcs_without_positions_are_recorded() {
        let mut doc = Document::new();
        let page = doc.create_page("p");
        let mut ed = doc.edit_page(&page).unwrap();
        let p = ed.place("p", "UNIT", "");
        let t = ed.basic_transition("t");
        let arc = ed.arc_place_to_transition(&p, &t, "1`()");

        assert_eq!(doc.position_all_arcs(&page), Ok(1));
        assert_eq!(
            doc.diagnostics(),
            &[Diagnostic::UnpositionedArc {
                arc,
                reason: ArcSkip::PlaceUnpositioned(p),
            }]
        );
    }
}
