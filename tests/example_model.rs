use cpn_builder::example::build_example;
use cpn_builder::hierarchy::{InstanceHandle, InstanceTarget, InstanceTree};
use cpn_builder::model::TransitionKind;
use cpn_builder::render::{render_cpn_document, write_cpn_file};
use cpn_builder::{Document, RenderOptions};
use pretty_assertions::assert_eq;

fn target_names(doc: &Document, tree: &InstanceTree, handle: InstanceHandle) -> String {
    let name = match tree.record(handle).map(|r| &r.target) {
        Some(InstanceTarget::Page(id)) => doc.page(id).map(|p| p.name.clone()),
        Some(InstanceTarget::Transition(id)) => doc.find_transition(id).map(|t| t.name.clone()),
        None => None,
    }
    .unwrap_or_default();
    let children: Vec<String> = tree
        .children(handle)
        .iter()
        .map(|h| target_names(doc, tree, *h))
        .collect();
    if children.is_empty() {
        name
    } else {
        format!("{}[{}]", name, children.join(","))
    }
}

#[test]
fn instance_tree_mirrors_substitution_nesting() {
    let doc = build_example().unwrap();
    let tree = doc.instances();
    assert_eq!(tree.roots().len(), 1);
    assert_eq!(
        target_names(&doc, tree, tree.roots()[0]),
        "GlobalDeclarations0[subprocess1,subprocess2[s1,s2]]"
    );
}

#[test]
fn every_substitution_is_wired_to_its_page_ports() {
    let doc = build_example().unwrap();
    let substitutions: Vec<_> = doc
        .pages()
        .iter()
        .flat_map(|p| p.transitions.iter())
        .filter(|t| t.kind() == TransitionKind::Substitution)
        .collect();
    assert_eq!(substitutions.len(), 4);

    for trans in substitutions {
        let binding = trans.binding().expect("wired");
        let sub = doc.page(&binding.subpage).expect("subpage exists");
        assert_eq!(sub.in_port_place_id(), Some(&binding.in_port));
        assert_eq!(sub.out_port_place_id(), Some(&binding.out_port));
        assert!(doc.find_place(&binding.in_socket).is_some());
        assert!(doc.find_place(&binding.out_socket).is_some());
    }
}

#[test]
fn globbox_holds_the_unit_color_set() {
    let doc = build_example().unwrap();
    let layouts: Vec<String> = doc.globbox().iter().map(|d| d.layout()).collect();
    assert_eq!(layouts, vec!["colset UNIT = unit;".to_string()]);
}

#[test]
fn writes_model_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("example.cpn");
    let doc = build_example().unwrap();
    let options = RenderOptions::default();

    write_cpn_file(&doc, &options, &path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, render_cpn_document(&doc, &options).unwrap());
    assert!(written.contains("<pageattr name=\"Composition_Comp2\"/>"));
    assert!(written.contains("<monitorblock name=\"Monitors\"/>"));
    assert_eq!(written.matches("<page id=").count(), 5);
    assert_eq!(written.matches("<instance id=").count(), 5);
}

#[test]
fn write_error_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("example.cpn");
    let doc = Document::new();

    let err = write_cpn_file(&doc, &RenderOptions::default(), &path).unwrap_err();
    assert!(format!("{:#}", err).contains("missing"));
}
