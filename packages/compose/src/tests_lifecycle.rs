//! Lifecycle ordering and single-fire tests

use crate::component::Component;
use std::cell::RefCell;
use std::rc::Rc;

type Log = Rc<RefCell<Vec<&'static str>>>;

fn record(log: &Log, event: &'static str) -> impl FnMut(&Component) + 'static {
    let log = log.clone();
    move |_| log.borrow_mut().push(event)
}

#[test]
fn test_single_component_hook_order() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    a.on_mounted(record(&log, "mounted"));
    a.on_mount(record(&log, "mount"));
    a.on_added(record(&log, "added"));

    a.render();

    assert_eq!(*log.borrow(), vec!["added", "mount", "mounted"]);
}

#[test]
fn test_two_components_hook_order() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    a.on_mounted(record(&log, "a.mounted"));
    a.on_mount(record(&log, "a.mount"));
    a.on_added(record(&log, "a.added"));
    let b = Component::new();
    b.on_mounted(record(&log, "b.mounted"));
    b.on_mount(record(&log, "b.mount"));
    b.on_added(record(&log, "b.added"));

    a.set_var("FOO", &b);
    a.render();

    assert_eq!(
        *log.borrow(),
        vec![
            "b.added", "a.added", "a.mount", "b.mount", "b.mounted", "a.mounted",
        ]
    );
}

#[test]
fn test_three_components_hook_order() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    a.on_mounted(record(&log, "a.mounted"));
    a.on_mount(record(&log, "a.mount"));
    a.on_added(record(&log, "a.added"));
    let b = Component::new();
    b.on_mounted(record(&log, "b.mounted"));
    b.on_mount(record(&log, "b.mount"));
    b.on_added(record(&log, "b.added"));
    let c = Component::new();
    c.on_mounted(record(&log, "c.mounted"));
    c.on_mount(record(&log, "c.mount"));
    c.on_added(record(&log, "c.added"));

    b.set_var("FOO", &c);
    a.set_var("FOO", &b);
    a.render();

    assert_eq!(
        *log.borrow(),
        vec![
            "c.added", "b.added", "a.added", "a.mount", "b.mount", "c.mount", "c.mounted",
            "b.mounted", "a.mounted",
        ]
    );
}

#[test]
fn test_component_referenced_twice_fires_once() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    a.on_mounted(record(&log, "a.mounted"));
    a.on_mount(record(&log, "a.mount"));
    a.on_added(record(&log, "a.added"));
    let b = Component::new();
    b.on_mounted(record(&log, "b.mounted"));
    b.on_mount(record(&log, "b.mount"));
    b.on_added(record(&log, "b.added"));

    a.set_var("FOO", &b);
    a.append_var("BAR", &b);
    a.render();

    assert_eq!(
        *log.borrow(),
        vec![
            "b.added", "a.added", "a.mount", "b.mount", "b.mounted", "a.mounted",
        ]
    );
}

#[test]
fn test_render_is_idempotent() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    a.set_template_content("<p>{X}</p>");
    a.set_var("X", "once");
    a.on_mount(record(&log, "mount"));
    a.on_mounted(record(&log, "mounted"));

    let first = a.render();
    let second = a.render();

    assert_eq!(first, "<p>once</p>");
    assert_eq!(first, second);
    assert_eq!(*log.borrow(), vec!["mount", "mounted"]);
}

#[test]
fn test_added_fires_at_attachment_not_render() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    let b = Component::new();
    b.on_added(record(&log, "b.added"));

    assert!(log.borrow().is_empty());
    a.set_var("FOO", &b);
    assert_eq!(*log.borrow(), vec!["b.added"]);
}

#[test]
fn test_registration_after_resolution_is_inert() {
    let log: Log = Rc::new(RefCell::new(Vec::new()));
    let a = Component::new();
    a.set_template_content("done");
    a.render();

    a.on_mount(record(&log, "late.mount"));
    a.on_mounted(record(&log, "late.mounted"));
    a.render();

    assert!(log.borrow().is_empty());
}

#[test]
fn test_mount_builds_the_component() {
    let a = Component::new();
    a.on_mount(|a| {
        a.set_template_content("<a>{B}</a>");
        let b = Component::new();
        b.set_template_content("<b>hi</b>");
        a.set_var("B", b);
    });

    assert_eq!(a.render(), "<a><b>hi</b></a>");
}

#[test]
fn test_mounted_can_still_bind_text() {
    let a = Component::new();
    a.set_template_content("{X}{Y}");
    a.set_var("X", "x");
    a.on_mounted(|a| a.set_var("Y", "y"));

    assert_eq!(a.render(), "xy");
}

#[test]
fn test_node_attached_during_mounted_resolves() {
    let a = Component::new();
    a.set_template_content("{LATE}");
    a.on_mounted(|a| {
        let b = Component::new();
        b.set_template_content("late");
        a.set_var("LATE", b);
    });

    assert_eq!(a.render(), "late");
}

#[test]
fn test_render_cycle_resolves_as_empty() {
    let a = Component::new();
    a.set_template_content("[{SELF}]");
    a.on_mount(|a| {
        a.set_var("SELF", a.clone());
    });

    assert_eq!(a.render(), "[]");
}
