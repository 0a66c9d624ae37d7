//! Multi-valued Form Data
//!
//! Ordered name/value collection matching the host mapping contract:
//! values for one name keep insertion order, names keep (re)insertion
//! order, `set` moves the name to the end.

use formdata_dom::{control_name, control_value, form_controls, is_disabled, DomTree, NodeId};
use formdata_host::FormDataMap;

/// Multi-valued ordered mapping of form entry names to values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormData {
    // one slot per live name; a slot always holds at least one value
    slots: Vec<(String, Vec<String>)>,
}

impl FormData {
    /// Create an empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot a form's submittable values in document order.
    ///
    /// Controls without a name contribute nothing; neither do disabled
    /// controls, matching what the host's own submission would carry.
    pub fn from_form(tree: &DomTree, form: NodeId) -> Self {
        let mut data = Self::new();
        for control in form_controls(tree, form) {
            if is_disabled(tree, control) {
                continue;
            }
            if let Some(name) = control_name(tree, control) {
                data.append(name, control_value(tree, control));
            }
        }
        data
    }

    /// Add a value to the end of the name's run
    pub fn append(&mut self, name: &str, value: &str) {
        if let Some((_, values)) = self.slots.iter_mut().find(|(n, _)| n == name) {
            values.push(value.to_string());
        } else {
            self.slots
                .push((name.to_string(), vec![value.to_string()]));
        }
    }

    /// Replace every value for the name with a single one; the name moves
    /// to the end of the iteration order.
    pub fn set(&mut self, name: &str, value: &str) {
        self.delete(name);
        self.append(name, value);
    }

    /// Remove the name and all its values. No-op if absent.
    pub fn delete(&mut self, name: &str) {
        self.slots.retain(|(n, _)| n != name);
    }

    /// First value for the name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.get_all(name).first().map(|v| v.as_str())
    }

    /// All values for the name in insertion order (empty if absent)
    pub fn get_all(&self, name: &str) -> &[String] {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, values)| values.as_slice())
            .unwrap_or(&[])
    }

    /// Membership test
    pub fn has(&self, name: &str) -> bool {
        self.slots.iter().any(|(n, _)| n == name)
    }

    /// Number of (name, value) entries, flattened
    pub fn len(&self) -> usize {
        self.slots.iter().map(|(_, values)| values.len()).sum()
    }

    /// Whether the mapping holds no entries
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Lazy iterator over (name, value) pairs in iteration order
    pub fn entries(&self) -> Entries<'_> {
        Entries {
            slots: &self.slots,
            slot: 0,
            value: 0,
        }
    }

    /// Lazy iterator over names, one per entry
    pub fn keys(&self) -> Keys<'_> {
        Keys(self.entries())
    }

    /// Lazy iterator over values in entry order
    pub fn values(&self) -> Values<'_> {
        Values(self.entries())
    }

    /// Invoke `f(value, name, &self)` for every entry in order
    pub fn for_each(&self, mut f: impl FnMut(&str, &str, &FormData)) {
        for (name, value) in self.entries() {
            f(value, name, self);
        }
    }
}

impl<'a> IntoIterator for &'a FormData {
    type Item = (&'a str, &'a str);
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// Iterator over (name, value) pairs
pub struct Entries<'a> {
    slots: &'a [(String, Vec<String>)],
    slot: usize,
    value: usize,
}

impl<'a> Iterator for Entries<'a> {
    type Item = (&'a str, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (name, values) = self.slots.get(self.slot)?;
            if let Some(value) = values.get(self.value) {
                self.value += 1;
                return Some((name.as_str(), value.as_str()));
            }
            self.slot += 1;
            self.value = 0;
        }
    }
}

/// Iterator over names
pub struct Keys<'a>(Entries<'a>);

impl<'a> Iterator for Keys<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(name, _)| name)
    }
}

/// Iterator over values
pub struct Values<'a>(Entries<'a>);

impl<'a> Iterator for Values<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(_, value)| value)
    }
}

// The in-memory variant of the host mapping capability: no tree to keep
// in sync, so the tree argument is unused.
impl FormDataMap for FormData {
    fn append(&mut self, _tree: &mut DomTree, name: &str, value: &str) {
        FormData::append(self, name, value);
    }

    fn set(&mut self, _tree: &mut DomTree, name: &str, value: &str) {
        FormData::set(self, name, value);
    }

    fn delete(&mut self, _tree: &mut DomTree, name: &str) {
        FormData::delete(self, name);
    }

    fn get(&self, name: &str) -> Option<String> {
        FormData::get(self, name).map(str::to_string)
    }

    fn get_all(&self, name: &str) -> Vec<String> {
        FormData::get_all(self, name).to_vec()
    }

    fn has(&self, name: &str) -> bool {
        FormData::has(self, name)
    }

    fn entries(&self) -> Vec<(String, String)> {
        self.entries()
            .map(|(n, v)| (n.to_string(), v.to_string()))
            .collect()
    }
}
