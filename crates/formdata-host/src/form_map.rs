//! Form Data Capability
//!
//! The mutable multi-valued payload listeners reach through a formdata
//! event. Two variants exist: a plain in-memory mapping, and the
//! tree-synchronized decorator the shim attaches at submission time.

use formdata_dom::DomTree;

/// Multi-valued ordered name/value mapping, mutable during dispatch.
///
/// Mutations take the tree so the synchronized variant can mirror them
/// onto the live form; the in-memory variant ignores it.
pub trait FormDataMap {
    /// Add a value to the end of the name's run
    fn append(&mut self, tree: &mut DomTree, name: &str, value: &str);

    /// Replace every value for the name with a single one
    fn set(&mut self, tree: &mut DomTree, name: &str, value: &str);

    /// Remove the name and all its values
    fn delete(&mut self, tree: &mut DomTree, name: &str);

    /// First value for the name
    fn get(&self, name: &str) -> Option<String>;

    /// All values for the name in insertion order
    fn get_all(&self, name: &str) -> Vec<String>;

    /// Membership test
    fn has(&self, name: &str) -> bool;

    /// Snapshot of all (name, value) pairs in iteration order
    fn entries(&self) -> Vec<(String, String)>;
}
