use std::collections::BTreeSet;

use crate::cluster::ClusterRegistry;

/// Cluster names currently suppressed from rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityToggleSet {
    hidden: BTreeSet<String>,
}

impl VisibilityToggleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips `name` in or out of the set. Toggling twice is a no-op.
    pub fn toggle(&mut self, name: &str) {
        if !self.hidden.remove(name) {
            self.hidden.insert(name.to_owned());
        }
    }

    /// Like [`toggle`](Self::toggle), but silently ignores names the registry
    /// does not know. Returns whether the set changed.
    pub fn toggle_known(&mut self, name: &str, registry: &ClusterRegistry) -> bool {
        if !registry.contains(name) {
            log::debug!("Ignoring toggle for unknown cluster {:?}", name);
            return false;
        }
        self.toggle(name);
        true
    }

    pub fn is_hidden(&self, name: &str) -> bool {
        self.hidden.contains(name)
    }

    pub fn hidden(&self) -> impl Iterator<Item = &str> {
        self.hidden.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hidden.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty()
    }
}
