use std::collections::HashMap;

/// A high-level action produced from raw input.
///
/// The runtime consumes actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Show or hide the parameter panel.
    TogglePanel,
    /// No-op (key is not bound).
    Noop,
}

/// Maps logical keys (the text a key press produces) to actions.
///
/// Matching is exact and case-sensitive: `"h"` and `"H"` are different keys.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<String, Action>,
}

impl Default for KeyBindings {
    /// Only `h` is bound, to [`Action::TogglePanel`].
    fn default() -> Self {
        let mut keys = Self {
            bindings: HashMap::new(),
        };
        keys.bind("h", Action::TogglePanel);
        keys
    }
}

impl KeyBindings {
    /// Bind `key` to `action`, returning the previous binding.
    pub fn bind(&mut self, key: &str, action: Action) -> Option<Action> {
        self.bindings.insert(key.to_string(), action)
    }

    /// Action for a key press, or [`Action::Noop`] when unbound.
    pub fn action_for(&self, key: &str) -> Action {
        self.bindings.get(key).copied().unwrap_or(Action::Noop)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
