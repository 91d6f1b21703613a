//! Demo model: a top page whose substitution transitions expand into small
//! `Skip` and `Composition` subpages.
//!
//! ```text
//! GlobalDeclarations0
//! ├── subprocess1 -> Skip_Skip1
//! └── subprocess2 -> Composition_Comp2
//!                    ├── s1 -> Skip_Skip3
//!                    └── s2 -> Skip_Skip4
//! ```

use crate::document::Document;
use crate::error::DefinitionError;
use crate::ids::Id;
use crate::layout::{Positioned, distribute_horizontally};
use crate::model::colorset;
use crate::model::graphics::Point;

const SPACING_X: i32 = 126;
const SPACING_Y: i32 = 126;

const UNIT: &str = "UNIT";
const UNIT_TOKEN: &str = "1`()";

/// Appends a running number to page names so repeated shapes stay distinct.
#[derive(Debug, Default)]
struct PageNamer {
    next: u32,
}

impl PageNamer {
    fn name(&mut self, base: &str) -> String {
        let name = format!("{}{}", base, self.next);
        self.next += 1;
        name
    }
}

/// A subpage together with the port places a substitution binds to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubpagePorts {
    pub page: Id,
    pub in_port: Id,
    pub out_port: Id,
}

#[derive(Debug, Clone)]
pub struct CompositionPage {
    pub ports: SubpagePorts,
    pub s1: Id,
    pub s2: Id,
    /// Joins `s1`'s output to `s2`'s input.
    pub s1s2: Id,
}

#[derive(Debug)]
struct TopPage {
    page: Id,
    start: Id,
    end: Id,
    threads: Vec<Id>,
}

impl TopPage {
    fn connect(
        &self,
        doc: &mut Document,
        trans: &Id,
        sub: &SubpagePorts,
    ) -> Result<(), DefinitionError> {
        doc.wire_substitution(
            trans,
            &self.start,
            &self.end,
            &sub.page,
            &sub.in_port,
            &sub.out_port,
        )
    }
}

pub struct ExampleModel {
    doc: Document,
    names: PageNamer,
    top: TopPage,
}

impl ExampleModel {
    /// Creates the top page, enters its instance and places the start and
    /// end sockets.
    pub fn new() -> Result<Self, DefinitionError> {
        let mut doc = Document::new();
        let mut names = PageNamer::default();

        let page = doc.create_page(&names.name("GlobalDeclarations"));
        let record = doc.instance_for_page(&page);
        doc.attach_and_enter(record);

        let mut ed = doc.edit_page(&page)?;
        let start = ed.place("startPlace", UNIT, "");
        ed.layout(&start, Point::new(0, SPACING_Y))?;
        let end = ed.place("endPlace", UNIT, "");
        ed.layout(&end, Point::new(0, 3 * SPACING_Y))?;

        Ok(Self {
            doc,
            names,
            top: TopPage {
                page,
                start,
                end,
                threads: Vec::new(),
            },
        })
    }

    pub fn add_unit_colset(&mut self, name: &str) {
        let colset = colorset::unit(self.doc.ids_mut(), name);
        self.doc.append_declaration(colset);
    }

    /// Adds a substitution transition between the top page's sockets.
    pub fn add_subpage(&mut self, name: &str) -> Result<Id, DefinitionError> {
        let top = &mut self.top;
        let mut ed = self.doc.edit_page(&top.page)?;
        let trans = ed.substitution_transition(name);
        if let Some(t) = ed.transition_mut(&trans) {
            t.set_default_layout();
        }
        let token = format!("1`{}", name);
        ed.arc_place_to_transition(&top.start, &trans, &token);
        ed.arc_transition_to_place(&trans, &top.end, &token);
        top.threads.push(trans.clone());
        Ok(trans)
    }

    /// Expands `trans` into a fresh `Skip` page.
    pub fn expand_with_skip(&mut self, trans: &Id) -> Result<SubpagePorts, DefinitionError> {
        let record = self.doc.instance_for_transition(trans);
        let mut scope = self.doc.enter_scope(record);
        let skip = skip_page(&mut scope, &mut self.names, "Skip")?;
        self.top.connect(&mut scope, trans, &skip)?;
        Ok(skip)
    }

    /// Expands `trans` into a `Composition` page whose two inner
    /// substitutions each expand into a `Skip` page.
    pub fn expand_with_composition(
        &mut self,
        trans: &Id,
    ) -> Result<CompositionPage, DefinitionError> {
        let record = self.doc.instance_for_transition(trans);
        let mut scope = self.doc.enter_scope(record);
        let comp = composition_page(&mut scope, &mut self.names, "Comp")?;
        self.top.connect(&mut scope, trans, &comp.ports)?;

        for (inner, in_socket, out_socket) in [
            (&comp.s1, &comp.ports.in_port, &comp.s1s2),
            (&comp.s2, &comp.s1s2, &comp.ports.out_port),
        ] {
            let record = scope.instance_for_transition(inner);
            let mut inner_scope = scope.enter_scope(record);
            let skip = skip_page(&mut inner_scope, &mut self.names, "Skip")?;
            inner_scope.wire_substitution(
                inner,
                in_socket,
                out_socket,
                &skip.page,
                &skip.in_port,
                &skip.out_port,
            )?;
        }
        Ok(comp)
    }

    /// Spreads the substitution transitions below the start place and
    /// positions every arc label on the top page.
    pub fn conclude_top_page(&mut self) -> Result<(), DefinitionError> {
        let threads = &self.top.threads;
        let mut ed = self.doc.edit_page(&self.top.page)?;
        distribute_horizontally(
            ed.transitions
                .iter_mut()
                .filter(|t| threads.contains(&t.id)),
            2 * SPACING_X,
            SPACING_X,
        );
        ed.layout_all_arcs();
        Ok(())
    }

    /// Leaves the top page's instance scope and hands the document over.
    pub fn into_document(mut self) -> Document {
        self.doc.leave();
        self.doc
    }
}

/// `inport -> Skip -> outport`
fn skip_page(
    doc: &mut Document,
    names: &mut PageNamer,
    name: &str,
) -> Result<SubpagePorts, DefinitionError> {
    let page = doc.create_page(&names.name(&format!("Skip_{}", name)));
    let mut ed = doc.edit_page(&page)?;

    let in_port = ed.in_port_place("inport", UNIT, "");
    ed.layout(&in_port, Point::new(0, 0))?;
    let skip = ed.basic_transition("Skip");
    ed.layout(&skip, Point::new(SPACING_X, 0))?;
    ed.arc_place_to_transition(&in_port, &skip, UNIT_TOKEN);

    let out_port = ed.out_port_place("outport", UNIT, "");
    ed.layout(&out_port, Point::new(2 * SPACING_X, 0))?;
    ed.arc_transition_to_place(&skip, &out_port, UNIT_TOKEN);

    ed.layout_all_arcs();
    Ok(SubpagePorts {
        page,
        in_port,
        out_port,
    })
}

/// `inport -> s1 -> s1s2 -> s2 -> outport`, with `s1` and `s2` left unwired.
fn composition_page(
    doc: &mut Document,
    names: &mut PageNamer,
    name: &str,
) -> Result<CompositionPage, DefinitionError> {
    let page = doc.create_page(&names.name(&format!("Composition_{}", name)));
    let mut ed = doc.edit_page(&page)?;
    let s1 = ed.substitution_transition("s1");
    let s2 = ed.substitution_transition("s2");

    let in_port = ed.in_port_place("inport", UNIT, "");
    ed.layout(&in_port, Point::new(0, 0))?;
    ed.layout(&s1, Point::new(SPACING_X, 0))?;
    ed.arc_place_to_transition(&in_port, &s1, UNIT_TOKEN);

    let s1s2 = ed.place("s1s2", UNIT, "");
    ed.layout(&s1s2, Point::new(2 * SPACING_X, 0))?;
    ed.arc_transition_to_place(&s1, &s1s2, UNIT_TOKEN);

    ed.layout(&s2, Point::new(3 * SPACING_X, 0))?;
    ed.arc_place_to_transition(&s1s2, &s2, UNIT_TOKEN);

    let out_port = ed.out_port_place("outport", UNIT, "");
    ed.layout(&out_port, Point::new(4 * SPACING_X, 0))?;
    ed.arc_transition_to_place(&s2, &out_port, UNIT_TOKEN);

    ed.layout_all_arcs();
    Ok(CompositionPage {
        ports: SubpagePorts {
            page,
            in_port,
            out_port,
        },
        s1,
        s2,
        s1s2,
    })
}

/// The complete demo document.
pub fn build_example() -> Result<Document, DefinitionError> {
    let mut model = ExampleModel::new()?;
    model.add_unit_colset(UNIT);

    let first = model.add_subpage("subprocess1")?;
    model.expand_with_skip(&first)?;

    let second = model.add_subpage("subprocess2")?;
    model.expand_with_composition(&second)?;

    model.conclude_top_page()?;
    Ok(model.into_document())
}
