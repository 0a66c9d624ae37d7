//! End-to-end protocol tests
//!
//! Whole-shim scenarios: intercepted user submission, programmatic
//! submission, listener mutations reaching the payload, cancelation,
//! and tree restoration afterwards.

use std::cell::RefCell;
use std::rc::Rc;

use formdata_dom::{
    control_name, control_value, form_controls, is_disabled, NodeId, SubmitError,
};
use formdata_host::{callback, EventKind, ListenerOptions, Page};
use formdata_shim::Shim;

fn add_input(page: &mut Page, form: NodeId, name: &str, value: &str) -> NodeId {
    let input = page.tree_mut().create_element("input");
    page.tree_mut().set_attr(input, "name", name);
    page.tree_mut().set_attr(input, "value", value);
    page.tree_mut().append_child(form, input);
    input
}

fn page_with_form() -> (Page, NodeId) {
    let mut page = Page::new();
    let root = page.document();
    let form = page.tree_mut().create_element("form");
    page.tree_mut().append_child(root, form);
    (page, form)
}

#[test]
fn test_submit_without_listeners_submits_exactly_once() {
    let (mut page, form) = page_with_form();
    add_input(&mut page, form, "a", "1");
    let _shim = Shim::install(&mut page);

    page.submit(form).unwrap();

    assert_eq!(page.submissions().len(), 1);
    assert_eq!(page.submissions()[0].body, "a=1");
}

#[test]
fn test_user_submission_is_intercepted_and_submits_once() {
    let (mut page, form) = page_with_form();
    add_input(&mut page, form, "a", "1");
    let _shim = Shim::install(&mut page);

    page.raise_submit(form).unwrap();

    // the interceptor prevented the host's own path and replayed the
    // native submission itself: one record, not zero, not two
    assert_eq!(page.submissions().len(), 1);
}

#[test]
fn test_listener_mutations_reach_payload_and_revert() {
    let (mut page, form) = page_with_form();
    let foo = add_input(&mut page, form, "foo", "bar");
    let mut shim = Shim::install(&mut page);

    let observed = Rc::new(RefCell::new(None));
    let observed2 = observed.clone();
    shim.set_onformdata(
        &mut page,
        form,
        Some(callback(move |page, ev| {
            let fd = ev.form_data().expect("notification carries the mapping");
            {
                let mut fd = fd.borrow_mut();
                fd.append(page.tree_mut(), "baz", "quux");
                fd.set(page.tree_mut(), "radio", "4");
                fd.delete(page.tree_mut(), "foo");
            }

            // mid-dispatch the live tree reflects every edit
            let tree = page.tree();
            let target = ev.target;
            let controls = form_controls(tree, target);
            let named: Vec<_> = controls
                .iter()
                .filter_map(|&c| control_name(tree, c))
                .collect();
            assert!(named.contains(&"baz"));
            assert!(named.contains(&"radio"));
            let hidden_ok = controls.iter().all(|&c| {
                control_name(tree, c) != Some("baz") || tree.attr(c, "type") == Some("hidden")
            });
            *observed2.borrow_mut() = Some((
                controls
                    .iter()
                    .find(|&&c| control_name(tree, c) == Some("foo"))
                    .map(|&c| is_disabled(tree, c)),
                hidden_ok,
            ));
        })),
    );

    page.submit(form).unwrap();

    // the listener saw foo disabled and baz materialized hidden
    assert_eq!(*observed.borrow(), Some((Some(true), true)));

    // the one real submission carries the edits
    assert_eq!(page.submissions().len(), 1);
    let entries = &page.submissions()[0].entries;
    assert!(entries.contains(&("baz".to_string(), "quux".to_string())));
    assert!(entries.contains(&("radio".to_string(), "4".to_string())));
    assert!(!entries.iter().any(|(n, _)| n == "foo"));

    // after the protocol the tree is back to its pre-submission shape
    assert!(!is_disabled(page.tree(), foo));
    let controls = form_controls(page.tree(), form);
    assert_eq!(controls.len(), 1);
    assert_eq!(control_name(page.tree(), controls[0]), Some("foo"));
    assert_eq!(control_value(page.tree(), controls[0]), "bar");
}

#[test]
fn test_canceled_notification_skips_submission_but_reverts() {
    let (mut page, form) = page_with_form();
    let foo = add_input(&mut page, form, "foo", "bar");
    let mut shim = Shim::install(&mut page);

    shim.set_onformdata(
        &mut page,
        form,
        Some(callback(|page, ev| {
            let fd = ev.form_data().unwrap();
            let mut fd = fd.borrow_mut();
            fd.append(page.tree_mut(), "extra", "1");
            fd.delete(page.tree_mut(), "foo");
            ev.prevent_default();
        })),
    );

    page.submit(form).unwrap();

    assert!(page.submissions().is_empty());
    // no leftover hidden or disabled controls
    assert!(!is_disabled(page.tree(), foo));
    assert_eq!(form_controls(page.tree(), form).len(), 1);
}

#[test]
fn test_listeners_run_in_registration_order_on_shared_mapping() {
    let (mut page, form) = page_with_form();
    let _shim = Shim::install(&mut page);

    page.add_event_listener(
        form,
        EventKind::FormData,
        ListenerOptions::default(),
        callback(|page, ev| {
            let fd = ev.form_data().unwrap();
            let mut fd = fd.borrow_mut();
            fd.append(page.tree_mut(), "step", "first");
        }),
    );
    page.add_event_listener(
        form,
        EventKind::FormData,
        ListenerOptions::default(),
        callback(|page, ev| {
            let fd = ev.form_data().unwrap();
            let seen = fd.borrow().get_all("step");
            assert_eq!(seen, ["first"]);
            let mut fd = fd.borrow_mut();
            fd.append(page.tree_mut(), "step", "second");
        }),
    );

    page.submit(form).unwrap();

    let entries = &page.submissions()[0].entries;
    let steps: Vec<_> = entries
        .iter()
        .filter(|(n, _)| n == "step")
        .map(|(_, v)| v.as_str())
        .collect();
    assert_eq!(steps, ["first", "second"]);
}

#[test]
fn test_notification_bubbles_to_ancestors() {
    let mut page = Page::new();
    let root = page.document();
    let section = page.tree_mut().create_element("section");
    page.tree_mut().append_child(root, section);
    let form = page.tree_mut().create_element("form");
    page.tree_mut().append_child(section, form);
    let _shim = Shim::install(&mut page);

    let seen = Rc::new(RefCell::new(false));
    let seen2 = seen.clone();
    page.add_event_listener(
        section,
        EventKind::FormData,
        ListenerOptions::default(),
        callback(move |_, ev| {
            assert!(ev.form_data().is_some());
            *seen2.borrow_mut() = true;
        }),
    );

    page.submit(form).unwrap();
    assert!(*seen.borrow());
}

#[test]
fn test_non_form_submit_target_passes_through() {
    let mut page = Page::new();
    let root = page.document();
    let div = page.tree_mut().create_element("div");
    page.tree_mut().append_child(root, div);
    let _shim = Shim::install(&mut page);

    // the interceptor ignores it; the host's own path then rejects it
    assert!(matches!(
        page.raise_submit(div),
        Err(SubmitError::NotAForm)
    ));
    assert!(page.submissions().is_empty());
}

#[test]
fn test_submission_failure_propagates_after_revert() {
    let mut page = Page::new();
    let form = page.tree_mut().create_element("form");
    // never attached to the document
    let input = page.tree_mut().create_element("input");
    page.tree_mut().set_attr(input, "name", "a");
    page.tree_mut().append_child(form, input);
    let mut shim = Shim::install(&mut page);

    shim.set_onformdata(
        &mut page,
        form,
        Some(callback(|page, ev| {
            let fd = ev.form_data().unwrap();
            let mut fd = fd.borrow_mut();
            fd.append(page.tree_mut(), "extra", "1");
        })),
    );

    assert!(matches!(page.submit(form), Err(SubmitError::Detached)));
    // the failed attempt still cleaned up after itself
    assert_eq!(form_controls(page.tree(), form).len(), 1);
}

#[test]
fn test_onformdata_replacement_fires_only_latest() {
    let (mut page, form) = page_with_form();
    let mut shim = Shim::install(&mut page);

    let hits = Rc::new(RefCell::new(Vec::new()));
    let h1 = hits.clone();
    shim.set_onformdata(
        &mut page,
        form,
        Some(callback(move |_, _| h1.borrow_mut().push("old"))),
    );
    let h2 = hits.clone();
    shim.set_onformdata(
        &mut page,
        form,
        Some(callback(move |_, _| h2.borrow_mut().push("new"))),
    );

    page.submit(form).unwrap();
    assert_eq!(*hits.borrow(), vec!["new"]);
}

#[test]
fn test_native_host_is_left_untouched() {
    let mut page = Page::with_features(formdata_host::HostFeatures {
        formdata_event: true,
        formdata_slot: true,
        mapping: true,
        ..Default::default()
    });
    let root = page.document();
    let form = page.tree_mut().create_element("form");
    page.tree_mut().append_child(root, form);
    add_input(&mut page, form, "a", "1");
    let _shim = Shim::install(&mut page);

    // no interception: the host's own submission path runs bare
    page.raise_submit(form).unwrap();
    assert_eq!(page.submissions().len(), 1);
    assert!(!page.has_submit_override());
}
