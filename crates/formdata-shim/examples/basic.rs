//! Example: Basic usage of the formdata shim
//!
//! Builds a page with one form, installs the shim, and edits the
//! outgoing payload from a formdata handler.

use anyhow::Result;
use formdata_host::{callback, Page};
use formdata_shim::Shim;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let mut page = Page::new();
    let root = page.document();
    let form = page.tree_mut().create_element("form");
    page.tree_mut().append_child(root, form);
    for (name, value) in [("user", "ada"), ("plan", "basic")] {
        let input = page.tree_mut().create_element("input");
        page.tree_mut().set_attr(input, "name", name);
        page.tree_mut().set_attr(input, "value", value);
        page.tree_mut().append_child(form, input);
    }

    let mut shim = Shim::install(&mut page);
    shim.set_onformdata(
        &mut page,
        form,
        Some(callback(|page, ev| {
            let fd = ev.form_data().expect("notification carries the mapping");
            let mut fd = fd.borrow_mut();
            fd.set(page.tree_mut(), "plan", "pro");
            fd.append(page.tree_mut(), "source", "shim-demo");
        })),
    );

    page.submit(form)?;

    let record = page.submissions().last().expect("exactly one submission");
    println!("submitted: {}", record.body);
    for (name, value) in &record.entries {
        println!("  {name} = {value}");
    }

    Ok(())
}
