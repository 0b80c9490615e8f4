//! Request-action dispatch: select a handler variant from a closed set by
//! a caller-provided action name. Peripheral glue around the component
//! core; no HTTP types appear here, the caller extracts the name itself.

use tracing::debug;

/// Normalize an action name across camelCase, snake_case and kebab-case
/// spellings: separators are dropped and letters lowercased, so
/// `doThisNumberOne`, `do_this_number_one` and `do-this-number-one` all
/// normalize to the same key.
pub fn normalize_action(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Closed set of action variants keyed by normalized name, with a default
/// variant selected when the requested action is absent or unknown.
pub struct ActionMap<A: Clone> {
    actions: Vec<(String, A)>,
    default: A,
}

impl<A: Clone> ActionMap<A> {
    pub fn new(default: A) -> Self {
        Self {
            actions: Vec::new(),
            default,
        }
    }

    /// Declare a named action variant
    pub fn with(mut self, name: &str, action: A) -> Self {
        self.actions.push((normalize_action(name), action));
        self
    }

    /// Select the variant for a requested action name
    pub fn dispatch(&self, requested: Option<&str>) -> A {
        let Some(requested) = requested else {
            return self.default.clone();
        };
        let normalized = normalize_action(requested);
        match self.actions.iter().find(|(name, _)| *name == normalized) {
            Some((_, action)) => action.clone(),
            None => {
                debug!(action = requested, "unknown action, dispatching default");
                self.default.clone()
            }
        }
    }
}
