//! Slot append, concatenation and overwrite semantics

use crate::component::Component;
use crate::component::SlotValue;

fn leaf(markup: &str) -> Component {
    let c = Component::new();
    c.set_template_content(markup);
    c
}

#[test]
fn test_text_append_concatenates() {
    let a = Component::new();
    a.set_template_content("{X}");
    a.set_var("X", "a");
    a.append_var("X", "b");

    assert_eq!(a.render(), "ab");
}

#[test]
fn test_overwrite_without_append() {
    let a = Component::new();
    a.set_template_content("{X}");
    a.set_var("X", "a");
    a.set_var("X", "b");

    assert_eq!(a.render(), "b");
}

#[test]
fn test_append_to_empty_value_overwrites() {
    let a = Component::new();
    a.set_template_content("{X}");
    a.set_var("X", "");
    a.append_var("X", "b");

    assert_eq!(a.render(), "b");
}

#[test]
fn test_append_mixes_text_and_components_in_order() {
    let root = Component::new();
    root.set_template_content("{SLOT}");

    root.set_var("SLOT", leaf("<a>I am A</a>"));
    root.append_var("SLOT", "foo");
    root.append_var("SLOT", leaf("<b>I am B</b>"));
    root.append_var("SLOT", "bar");
    root.append_var("SLOT", leaf("<c>I am C</c>"));
    root.append_var("SLOT", "baz");

    assert_eq!(
        root.render(),
        "<a>I am A</a>foo<b>I am B</b>bar<c>I am C</c>baz"
    );
}

#[test]
fn test_append_text_to_component() {
    let root = Component::new();
    root.set_template_content("{SLOT}");
    root.set_var("SLOT", leaf("<a/>"));
    root.append_var("SLOT", "tail");

    assert_eq!(root.render(), "<a/>tail");
}

#[test]
fn test_append_component_to_text() {
    let root = Component::new();
    root.set_template_content("{SLOT}");
    root.set_var("SLOT", "head");
    root.append_var("SLOT", leaf("<a/>"));

    assert_eq!(root.render(), "head<a/>");
}

#[test]
fn test_concat_renders_items_adjacent() {
    let joined = Component::concat(vec!["<a>", "<b>"]);

    assert_eq!(joined.render(), "<a><b>");
}

#[test]
fn test_concat_of_nothing_renders_empty() {
    let joined = Component::concat(Vec::<SlotValue>::new());

    assert_eq!(joined.render(), "");
}

#[test]
fn test_concat_mixes_text_and_components() {
    let joined = Component::concat(vec![
        SlotValue::from("start|"),
        SlotValue::from(leaf("<mid/>")),
        SlotValue::from("|end"),
    ]);

    assert_eq!(joined.render(), "start|<mid/>|end");
}

#[test]
fn test_set_vars_applies_each_entry() {
    let a = Component::new();
    a.set_template_content("{A}{B}");
    a.set_vars(vec![("A", "1"), ("B", "2")]);

    assert_eq!(a.render(), "12");
}

#[test]
fn test_set_component_is_a_slot_assignment() {
    let root = Component::new();
    root.set_template_content("[{PANEL}]");
    root.set_component("PANEL", leaf("<p/>"));

    assert_eq!(root.render(), "[<p/>]");
}

#[test]
fn test_attachment_sets_parent_back_reference() {
    let parent = Component::new();
    let child = Component::new();
    parent.set_var("SLOT", &child);

    assert_eq!(child.parent(), Some(parent.clone()));
    assert_eq!(parent.parent(), None);
}

#[test]
fn test_unset_slot_renders_empty() {
    let a = Component::new();
    a.set_template_content("[{NOT_SET}]");

    assert_eq!(a.render(), "[]");
}

#[test]
fn test_display_renders() {
    let a = Component::new();
    a.set_template_content("{X}!");
    a.set_var("X", "shown");

    assert_eq!(format!("{a}"), "shown!");
}

#[test]
fn test_template_type_switch_discards_source() {
    let a = Component::new();
    a.set_template_content("{X}");
    a.set_var("X", "x");
    a.set_template_type("raw");

    // New renderer, no source: renders empty until content is set again.
    assert_eq!(a.render(), "");
}

#[test]
fn test_raw_kind_passes_content_through() {
    let a = Component::new();
    a.set_template_content_typed("{X} stays", "raw");
    a.set_var("X", "x");

    assert_eq!(a.render(), "{X} stays");
}

#[test]
fn test_same_kind_is_a_noop() {
    let a = Component::new();
    a.set_template_content("{X}");
    a.set_var("X", "kept");
    a.set_template_type("");

    assert_eq!(a.render(), "kept");
}
