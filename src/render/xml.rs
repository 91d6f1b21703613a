//! Projection of a [`Document`] into the CPN XML dialect.
//!
//! Nothing is stored as XML: every element is written straight from the
//! typed records, so rendering the same document twice gives the same text.

use anyhow::Context;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fs;
use std::io::Write;
use std::path::Path;

use crate::Result;
use crate::config::{Generator, RenderOptions};
use crate::document::Document;
use crate::fusion::FusionSet;
use crate::hierarchy::{InstanceHandle, InstanceTarget, InstanceTree};
use crate::model::colorset::{ColorSet, ColorSetKind};
use crate::model::declaration::{Declaration, VarDecl};
use crate::model::graphics::{Graphics, Point};
use crate::model::net::{Arc, Inscription, Place, Transition};
use crate::model::page::Page;

/// Writes one model record. `stamp` supplies the tool/version attributes
/// carried by inscription texts.
pub(crate) trait ToXml {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, stamp: &Generator) -> Result<()>;
}

pub fn render_cpn_document(doc: &Document, options: &RenderOptions) -> Result<String> {
    let mut writer = if options.indent == 0 {
        Writer::new(Vec::new())
    } else {
        Writer::new_with_indent(Vec::new(), b' ', options.indent)
    };

    if options.xml_declaration {
        writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("no"))))?;
    }
    if let Some(doctype) = doc.doctype() {
        let decl = format!(
            "{} PUBLIC \"{}\" \"{}\"",
            doctype.name, doctype.public_id, doctype.system_id
        );
        writer.write_event(Event::DocType(BytesText::from_escaped(decl)))?;
    }
    write_workspace(&mut writer, doc)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).context("rendered document is not valid UTF-8")
}

pub fn write_cpn_file(
    doc: &Document,
    options: &RenderOptions,
    path: impl AsRef<Path>,
) -> Result<()> {
    let path = path.as_ref();
    let text = render_cpn_document(doc, options)?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))?;
    log::info!("wrote {}", path.display());
    Ok(())
}

fn write_workspace<W: Write>(writer: &mut Writer<W>, doc: &Document) -> Result<()> {
    let stamp = doc.generator();
    write_tag_start(writer, "workspaceElements", &[])?;
    write_empty(
        writer,
        "generator",
        &[
            ("tool", stamp.tool.as_str()),
            ("version", stamp.version.as_str()),
            ("format", stamp.format.as_str()),
        ],
    )?;

    write_tag_start(writer, "cpnet", &[])?;
    write_list(writer, "globbox", doc.globbox(), stamp)?;
    for page in doc.pages() {
        page.write_xml(writer, stamp)?;
    }
    for fusion in doc.fusions() {
        fusion.write_xml(writer, stamp)?;
    }
    write_instances(writer, doc.instances())?;
    write_empty(writer, "options", &[])?;
    write_empty(writer, "binders", &[])?;
    write_empty(writer, "monitorblock", &[("name", "Monitors")])?;
    write_tag_end(writer, "cpnet")?;

    write_tag_end(writer, "workspaceElements")
}

fn write_tag_start<W: Write>(
    writer: &mut Writer<W>,
    tag_name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(tag_name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

fn write_tag_end<W: Write>(writer: &mut Writer<W>, tag_name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(tag_name)))?;
    Ok(())
}

fn write_empty<W: Write>(
    writer: &mut Writer<W>,
    tag_name: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new(tag_name);
    for attr in attrs {
        elem.push_attribute(*attr);
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// `<tag attrs>content</tag>`, or `<tag attrs/>` for empty content.
fn write_tag_with_attrs<W: Write>(
    writer: &mut Writer<W>,
    tag_name: &str,
    content: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    if content.is_empty() {
        return write_empty(writer, tag_name, attrs);
    }
    write_tag_start(writer, tag_name, attrs)?;
    writer.write_event(Event::Text(BytesText::new(content)))?;
    write_tag_end(writer, tag_name)
}

fn write_tag<W: Write>(writer: &mut Writer<W>, tag_name: &str, content: &str) -> Result<()> {
    write_tag_with_attrs(writer, tag_name, content, &[])
}

fn write_list<W: Write, T: ToXml>(
    writer: &mut Writer<W>,
    tag_name: &str,
    items: &[T],
    stamp: &Generator,
) -> Result<()> {
    if items.is_empty() {
        return write_empty(writer, tag_name, &[]);
    }
    write_tag_start(writer, tag_name, &[])?;
    for item in items {
        item.write_xml(writer, stamp)?;
    }
    write_tag_end(writer, tag_name)
}

fn fixed(value: f64) -> String {
    format!("{:.6}", value)
}

fn flag(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

fn has_presentation(position: Option<Point>, graphics: Option<&Graphics>) -> bool {
    position.is_some() || graphics.is_some()
}

/// `posattr`, `fillattr`, `lineattr`, `textattr`, each only when set.
fn write_presentation<W: Write>(
    writer: &mut Writer<W>,
    position: Option<Point>,
    graphics: Option<&Graphics>,
) -> Result<()> {
    if let Some(pos) = position {
        let (x, y) = (pos.x.to_string(), pos.y.to_string());
        write_empty(writer, "posattr", &[("x", x.as_str()), ("y", y.as_str())])?;
    }
    if let Some(g) = graphics {
        let thick = g.line.thick.to_string();
        write_empty(
            writer,
            "fillattr",
            &[
                ("colour", &*g.fill.colour),
                ("pattern", &*g.fill.pattern),
                ("filled", flag(g.fill.filled)),
            ],
        )?;
        write_empty(
            writer,
            "lineattr",
            &[
                ("colour", &*g.line.colour),
                ("thick", thick.as_str()),
                ("type", &*g.line.line_type),
            ],
        )?;
        write_empty(
            writer,
            "textattr",
            &[("colour", &*g.text.colour), ("bold", flag(g.text.bold))],
        )?;
    }
    Ok(())
}

/// A label element carrying only presentation attributes (`port`,
/// `fusioninfo`, `subpageinfo`).
fn write_tag_element<W: Write>(
    writer: &mut Writer<W>,
    tag_name: &str,
    attrs: &[(&str, &str)],
    position: Option<Point>,
    graphics: Option<&Graphics>,
) -> Result<()> {
    if !has_presentation(position, graphics) {
        return write_empty(writer, tag_name, attrs);
    }
    write_tag_start(writer, tag_name, attrs)?;
    write_presentation(writer, position, graphics)?;
    write_tag_end(writer, tag_name)
}

/// `<tag id><presentation/><text tool version>TEXT</text></tag>`
fn write_inscription<W: Write>(
    writer: &mut Writer<W>,
    tag_name: &str,
    inscription: &Inscription,
    stamp: &Generator,
) -> Result<()> {
    write_tag_start(writer, tag_name, &[("id", inscription.id.as_str())])?;
    write_presentation(writer, inscription.position, inscription.graphics.as_ref())?;
    write_tag_with_attrs(
        writer,
        "text",
        &inscription.text,
        &[
            ("tool", stamp.tool.as_str()),
            ("version", stamp.version.as_str()),
        ],
    )?;
    write_tag_end(writer, tag_name)
}

impl ToXml for Declaration {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, stamp: &Generator) -> Result<()> {
        match self {
            Declaration::ColorSet(c) => c.write_xml(writer, stamp),
            Declaration::Var(v) => v.write_xml(writer, stamp),
        }
    }
}

impl ToXml for ColorSet {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, _stamp: &Generator) -> Result<()> {
        write_tag_start(writer, "color", &[("id", self.id.as_str())])?;
        write_tag(writer, "id", &self.name)?;
        match &self.kind {
            ColorSetKind::Unit => write_empty(writer, "unit", &[])?,
            ColorSetKind::Bool => write_empty(writer, "bool", &[])?,
            ColorSetKind::Int { lower, upper } => {
                write_tag_start(writer, "int", &[])?;
                write_tag_start(writer, "with", &[])?;
                write_tag(writer, "ml", lower)?;
                write_tag(writer, "ml", upper)?;
                write_tag_end(writer, "with")?;
                write_tag_end(writer, "int")?;
            }
            ColorSetKind::Enum { items } => {
                write_tag_start(writer, "enum", &[])?;
                for item in items {
                    write_tag(writer, "id", item)?;
                }
                write_tag_end(writer, "enum")?;
            }
            ColorSetKind::Product { components } => {
                write_tag_start(writer, "product", &[])?;
                for component in components {
                    write_tag(writer, "id", component)?;
                }
                write_tag_end(writer, "product")?;
            }
        }
        write_tag(writer, "layout", &self.layout())?;
        write_tag_end(writer, "color")
    }
}

impl ToXml for VarDecl {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, _stamp: &Generator) -> Result<()> {
        write_tag_start(writer, "var", &[("id", self.id.as_str())])?;
        write_tag_start(writer, "type", &[])?;
        write_tag(writer, "id", &self.type_name)?;
        write_tag_end(writer, "type")?;
        for name in &self.names {
            write_tag(writer, "id", name)?;
        }
        write_tag(writer, "layout", &self.layout())?;
        write_tag_end(writer, "var")
    }
}

impl ToXml for Place {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, stamp: &Generator) -> Result<()> {
        write_tag_start(writer, "place", &[("id", self.id.as_str())])?;
        write_presentation(writer, self.position, self.graphics.as_ref())?;
        write_tag(writer, "text", &self.name)?;
        if let Some(shape) = &self.shape {
            write_empty(
                writer,
                "ellipse",
                &[("w", fixed(shape.width).as_str()), ("h", fixed(shape.height).as_str())],
            )?;
            write_empty(
                writer,
                "token",
                &[("x", fixed(shape.token.0).as_str()), ("y", fixed(shape.token.1).as_str())],
            )?;
            write_empty(
                writer,
                "marking",
                &[
                    ("x", fixed(shape.marking.0).as_str()),
                    ("y", fixed(shape.marking.1).as_str()),
                    ("hidden", flag(shape.marking_hidden)),
                ],
            )?;
        }
        write_inscription(writer, "type", &self.color_set, stamp)?;
        write_inscription(writer, "initmark", &self.init_mark, stamp)?;
        if let Some(port) = &self.port {
            let role = port.role.to_string();
            write_tag_element(
                writer,
                "port",
                &[("id", port.id.as_str()), ("type", role.as_str())],
                port.position,
                port.graphics.as_ref(),
            )?;
        }
        if let Some(fusion) = &self.fusion {
            write_tag_element(
                writer,
                "fusioninfo",
                &[("id", fusion.id.as_str()), ("name", fusion.name.as_str())],
                fusion.position,
                fusion.graphics.as_ref(),
            )?;
        }
        write_tag_end(writer, "place")
    }
}

impl ToXml for Transition {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, stamp: &Generator) -> Result<()> {
        write_tag_start(
            writer,
            "trans",
            &[("id", self.id.as_str()), ("explicit", "false")],
        )?;
        write_presentation(writer, self.position, self.graphics.as_ref())?;
        write_tag(writer, "text", &self.name)?;
        if let Some(shape) = &self.shape {
            write_empty(
                writer,
                "box",
                &[("w", fixed(shape.width).as_str()), ("h", fixed(shape.height).as_str())],
            )?;
        }
        if let Some(subst) = &self.substitution {
            let wiring = subst
                .binding
                .as_ref()
                .map(|b| (b.subpage.to_string(), b.portsock()));
            let attrs: Vec<(&str, &str)> = match &wiring {
                Some((subpage, portsock)) => {
                    vec![("subpage", subpage.as_str()), ("portsock", portsock.as_str())]
                }
                None => Vec::new(),
            };
            write_tag_start(writer, "subst", &attrs)?;
            write_tag_element(
                writer,
                "subpageinfo",
                &[("id", subst.info.id.as_str()), ("name", subst.info.text.as_str())],
                subst.info.position,
                subst.info.graphics.as_ref(),
            )?;
            write_tag_end(writer, "subst")?;
        }
        if let Some(guard) = &self.guard {
            write_inscription(writer, "cond", guard, stamp)?;
        }
        write_tag_end(writer, "trans")
    }
}

impl ToXml for Arc {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, stamp: &Generator) -> Result<()> {
        let orientation = self.orientation.to_string();
        write_tag_start(
            writer,
            "arc",
            &[
                ("id", self.id.as_str()),
                ("orientation", orientation.as_str()),
                ("order", "1"),
            ],
        )?;
        write_presentation(writer, self.position, self.graphics.as_ref())?;
        if let Some(arrow) = &self.arrow {
            let cycle = arrow.current_cycle.to_string();
            write_empty(
                writer,
                "arrowattr",
                &[("headsize", fixed(arrow.headsize).as_str()), ("currentcyckle", cycle.as_str())],
            )?;
        }
        write_empty(writer, "transend", &[("idref", self.transition.as_str())])?;
        write_empty(writer, "placeend", &[("idref", self.place.as_str())])?;
        write_inscription(writer, "annot", &self.annotation, stamp)?;
        write_tag_end(writer, "arc")
    }
}

impl ToXml for Page {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, stamp: &Generator) -> Result<()> {
        write_tag_start(writer, "page", &[("id", self.id.as_str())])?;
        write_empty(writer, "pageattr", &[("name", self.name.as_str())])?;
        for place in &self.places {
            place.write_xml(writer, stamp)?;
        }
        for trans in &self.transitions {
            trans.write_xml(writer, stamp)?;
        }
        for arc in &self.arcs {
            arc.write_xml(writer, stamp)?;
        }
        write_empty(writer, "constraints", &[])?;
        write_tag_end(writer, "page")
    }
}

impl ToXml for FusionSet {
    fn write_xml<W: Write>(&self, writer: &mut Writer<W>, _stamp: &Generator) -> Result<()> {
        let attrs = [("id", self.id.as_str()), ("name", self.name.as_str())];
        if self.members.is_empty() {
            return write_empty(writer, "fusion", &attrs);
        }
        write_tag_start(writer, "fusion", &attrs)?;
        for member in &self.members {
            write_empty(writer, "fusion_elm", &[("idref", member.as_str())])?;
        }
        write_tag_end(writer, "fusion")
    }
}

fn write_instances<W: Write>(writer: &mut Writer<W>, tree: &InstanceTree) -> Result<()> {
    if tree.roots().is_empty() {
        return write_empty(writer, "instances", &[]);
    }
    write_tag_start(writer, "instances", &[])?;
    for root in tree.roots() {
        write_instance(writer, tree, *root)?;
    }
    write_tag_end(writer, "instances")
}

fn write_instance<W: Write>(
    writer: &mut Writer<W>,
    tree: &InstanceTree,
    handle: InstanceHandle,
) -> Result<()> {
    let Some(record) = tree.record(handle) else {
        return Ok(());
    };
    let target = match &record.target {
        InstanceTarget::Page(page) => ("page", page.as_str()),
        InstanceTarget::Transition(trans) => ("trans", trans.as_str()),
    };
    let attrs = [("id", record.id.as_str()), target];
    let children = tree.children(handle);
    if children.is_empty() {
        return write_empty(writer, "instance", &attrs);
    }
    write_tag_start(writer, "instance", &attrs)?;
    for child in children {
        write_instance(writer, tree, *child)?;
    }
    write_tag_end(writer, "instance")
}
