//! Ordered action lists.

use std::slice;

use crate::config::ActionSpec;
use crate::error::{ActionError, Result};
use crate::instance::ActionInstance;
use crate::registry::ActionRegistry;

/// The actions bound to one trigger, in execution order.
///
/// Holds one handle per entry; the same instance may appear more than once.
#[derive(Debug, Clone, Default)]
pub struct ActionList {
    acts: Vec<ActionInstance>,
}

impl ActionList {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a list from specs, failing on the first bad entry.
    pub fn build(registry: &ActionRegistry, specs: &[ActionSpec]) -> Result<Self> {
        specs
            .iter()
            .map(|spec| ActionInstance::new(registry, &spec.name, &spec.options))
            .collect()
    }

    /// Build a list from specs, dropping entries that fail to construct.
    ///
    /// Each dropped entry is logged and returned alongside the list so the
    /// caller can report it; the remaining entries keep their order.
    pub fn build_lenient(
        registry: &ActionRegistry,
        specs: &[ActionSpec],
    ) -> (Self, Vec<ActionError>) {
        let mut list = Self::new();
        let mut errors = Vec::new();
        for spec in specs {
            match ActionInstance::new(registry, &spec.name, &spec.options) {
                Ok(act) => list.push(act),
                Err(err) => {
                    tracing::warn!(
                        target: "fwm.actions",
                        kind = %spec.name,
                        error = %err,
                        "dropping misconfigured action"
                    );
                    errors.push(err);
                }
            }
        }
        (list, errors)
    }

    /// Append a handle.
    pub fn push(&mut self, act: ActionInstance) {
        self.acts.push(act);
    }

    /// Remove and return the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Option<ActionInstance> {
        (index < self.acts.len()).then(|| self.acts.remove(index))
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ActionInstance> {
        self.acts.get(index)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.acts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.acts.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, ActionInstance> {
        self.acts.iter()
    }

    /// Whether any entry can start an interactive session.
    #[must_use]
    pub fn has_interactive(&self) -> bool {
        self.acts.iter().any(ActionInstance::is_interactive)
    }
}

impl FromIterator<ActionInstance> for ActionList {
    fn from_iter<I: IntoIterator<Item = ActionInstance>>(iter: I) -> Self {
        Self {
            acts: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a ActionList {
    type Item = &'a ActionInstance;
    type IntoIter = slice::Iter<'a, ActionInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
