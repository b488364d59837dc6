//! Unique anchor ids for margin constructs.

use std::collections::HashSet;

use sidenote_core::Node;

/// Issues document-unique ids such as `mn-1`, `sn-2`.
///
/// One source lives for a whole run and is passed by `&mut` into every
/// decode. Ids are never reissued, and ids reserved from a document (its
/// existing `id` attributes) are skipped, so no two anchors collide.
#[derive(Debug, Default)]
pub struct IdSource {
    counter: u64,
    taken: HashSet<String>,
}

impl IdSource {
    /// Create a source with nothing issued or reserved.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark an id as taken so it is never issued.
    pub fn reserve(&mut self, id: impl Into<String>) {
        self.taken.insert(id.into());
    }

    /// Reserve every `id` attribute found in `root`.
    pub fn reserve_from(&mut self, root: &Node) {
        root.visit(&mut |node| {
            if let Some(id) = node.attr("id") {
                self.taken.insert(id.to_string());
            }
        });
    }

    /// Issue a fresh id of the form `<prefix>-<n>`.
    pub fn next_id(&mut self, prefix: &str) -> String {
        loop {
            self.counter += 1;
            let id = format!("{prefix}-{}", self.counter);
            if self.taken.insert(id.clone()) {
                return id;
            }
        }
    }

    /// Number of ids issued or reserved so far.
    pub fn len(&self) -> usize {
        self.taken.len()
    }

    /// Whether nothing has been issued or reserved.
    pub fn is_empty(&self) -> bool {
        self.taken.is_empty()
    }
}
