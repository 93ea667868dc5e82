//! Collapse state for branch items, keyed by item key.
//!
//! Branch items only read `is_collapsed`; this store is the single place it
//! changes. Input handlers get a `&mut dyn ToggleCollapsed` rather than the
//! whole store.

use std::collections::HashMap;

/// Capability to flip one item's collapse state.
pub trait ToggleCollapsed {
    fn toggle_collapsed(&mut self, key: &str);
}

/// Per-item collapse state with a default for items never touched.
#[derive(Debug, Clone)]
pub struct CollapseStore {
    default_collapsed: bool,
    overrides: HashMap<String, bool>,
}

impl Default for CollapseStore {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CollapseStore {
    pub fn new(default_collapsed: bool) -> Self {
        Self {
            default_collapsed,
            overrides: HashMap::new(),
        }
    }

    pub fn default_collapsed(&self) -> bool {
        self.default_collapsed
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.overrides
            .get(key)
            .copied()
            .unwrap_or(self.default_collapsed)
    }

    pub fn set_collapsed(&mut self, key: &str, collapsed: bool) {
        if collapsed == self.default_collapsed {
            self.overrides.remove(key);
        } else {
            self.overrides.insert(key.to_string(), collapsed);
        }
    }

    /// Flip `key` and return its new state.
    pub fn toggle(&mut self, key: &str) -> bool {
        let collapsed = !self.is_collapsed(key);
        self.set_collapsed(key, collapsed);
        tracing::trace!(key, collapsed, "Toggled branch item");
        collapsed
    }

    pub fn collapse_all<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>) {
        self.set_all(keys, true);
    }

    pub fn expand_all<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>) {
        self.set_all(keys, false);
    }

    fn set_all<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>, collapsed: bool) {
        let mut count = 0usize;
        for key in keys {
            self.set_collapsed(key, collapsed);
            count += 1;
        }
        tracing::debug!(count, collapsed, "Set collapse state for all branch items");
    }

    /// Forget state for keys that are no longer present.
    pub fn retain<'k>(&mut self, keys: impl IntoIterator<Item = &'k str>) {
        let keep: Vec<&str> = keys.into_iter().collect();
        self.overrides.retain(|key, _| keep.contains(&key.as_str()));
    }
}

impl ToggleCollapsed for CollapseStore {
    fn toggle_collapsed(&mut self, key: &str) {
        self.toggle(key);
    }
}
