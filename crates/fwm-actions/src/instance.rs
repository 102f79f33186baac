//! Shared action instances.
//!
//! An [`ActionInstance`] pairs a registered kind with the options its setup
//! produced. Handles are cheap to clone: cloning adds a holder, dropping
//! removes one, and the options are dropped exactly once when the last
//! holder goes away. Lists and the interactive session hold handles; nothing
//! else keeps instances alive.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use fwm_core::host::WindowManager;

use crate::config::ActionConfig;
use crate::data::ActionData;
use crate::error::{ActionError, Result};
use crate::kind::{Flow, InteractiveAction, RunAction};
use crate::registry::{ActionDefinition, ActionRegistry, ActionShape};

enum Behavior {
    Plain(Box<dyn RunAction>),
    Interactive(Box<dyn InteractiveAction>),
}

struct Inner {
    def: Rc<ActionDefinition>,
    behavior: Behavior,
    live: Rc<Cell<usize>>,
}

impl Drop for Inner {
    fn drop(&mut self) {
        self.live.set(self.live.get().saturating_sub(1));
        tracing::trace!(target: "fwm.actions", kind = %self.def.name(), "action instance released");
    }
}

/// Shared handle to a configured action.
#[derive(Clone)]
pub struct ActionInstance(Rc<Inner>);

impl ActionInstance {
    /// Build an instance of the kind registered as `name`.
    ///
    /// Fails with [`ActionError::UnknownActionKind`] if no such kind exists,
    /// or [`ActionError::InvalidConfig`] if the kind rejects `config`. On
    /// failure nothing is allocated and the registry's live-instance count is
    /// unchanged.
    pub fn new(registry: &ActionRegistry, name: &str, config: &ActionConfig) -> Result<Self> {
        let def = registry
            .lookup(name)
            .ok_or_else(|| ActionError::UnknownActionKind(name.to_owned()))?;

        let invalid = |source| ActionError::InvalidConfig {
            kind: name.to_owned(),
            source,
        };
        let behavior = match &def.shape {
            ActionShape::Plain(setup) => Behavior::Plain(setup(config).map_err(invalid)?),
            ActionShape::Interactive(setup) => {
                Behavior::Interactive(setup(config).map_err(invalid)?)
            }
        };

        let live = Rc::clone(registry.live_counter());
        live.set(live.get() + 1);
        tracing::debug!(
            target: "fwm.actions",
            kind = %name,
            options = config.len(),
            "action instance created"
        );
        Ok(Self(Rc::new(Inner {
            def: Rc::clone(def),
            behavior,
            live,
        })))
    }

    /// Kind name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.def.name()
    }

    #[must_use]
    pub fn definition(&self) -> &ActionDefinition {
        &self.0.def
    }

    /// Whether the kind was registered as interactive.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.0.behavior, Behavior::Interactive(_))
    }

    /// Number of holders (lists, sessions, local handles).
    #[must_use]
    pub fn ref_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }

    /// Whether both handles refer to the same instance.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub(crate) fn run(&self, data: &ActionData, wm: &mut dyn WindowManager) -> Flow {
        match &self.0.behavior {
            Behavior::Plain(act) => act.run(data, wm),
            Behavior::Interactive(act) => act.run(data, wm),
        }
    }

    pub(crate) fn interactive(&self) -> Option<&dyn InteractiveAction> {
        match &self.0.behavior {
            Behavior::Plain(_) => None,
            Behavior::Interactive(act) => Some(act.as_ref()),
        }
    }
}

impl fmt::Debug for ActionInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionInstance")
            .field("kind", &self.name())
            .field("interactive", &self.is_interactive())
            .field("refs", &self.ref_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::kind::{Flow, InputStep};
    use fwm_core::event::{Event, Modifiers};
    use fwm_core::host::testing::RecordingHost;
    use fwm_core::trigger::UserAction;

    /// Counts how many times its options were dropped.
    struct Tracked {
        drops: Rc<Cell<usize>>,
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    impl RunAction for Tracked {
        fn run(&self, _data: &ActionData, _wm: &mut dyn WindowManager) -> Flow {
            Flow::Stop
        }
    }

    struct Drag;

    impl RunAction for Drag {
        fn run(&self, _data: &ActionData, _wm: &mut dyn WindowManager) -> Flow {
            Flow::Continue
        }
    }

    impl InteractiveAction for Drag {
        fn input(&self, _: Modifiers, _: &Event, _: &mut dyn WindowManager) -> InputStep {
            InputStep::Continue { used: true }
        }
        fn cancel(&self, _wm: &mut dyn WindowManager) {}
        fn post(&self, _wm: &mut dyn WindowManager) {}
    }

    fn registry_with_tracked(drops: &Rc<Cell<usize>>) -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        let drops = Rc::clone(drops);
        registry
            .register("Tracked", move |config| {
                if config.bool_or("reject", false)? {
                    return Err(ConfigError::invalid("reject", "rejected on request"));
                }
                Ok(Box::new(Tracked {
                    drops: Rc::clone(&drops),
                }))
            })
            .unwrap();
        registry
            .register_interactive("Drag", |_| Ok(Box::new(Drag)))
            .unwrap();
        registry
    }

    #[test]
    fn new_instance_has_one_holder() {
        let drops = Rc::new(Cell::new(0));
        let registry = registry_with_tracked(&drops);
        let act = ActionInstance::new(&registry, "Tracked", &ActionConfig::new()).unwrap();
        assert_eq!(act.ref_count(), 1);
        assert_eq!(act.name(), "Tracked");
        assert!(!act.is_interactive());
        assert!(!registry.is_interactive(&act));
        assert_eq!(registry.live_instances(), 1);
    }

    #[test]
    fn unknown_kind_allocates_nothing() {
        let drops = Rc::new(Cell::new(0));
        let registry = registry_with_tracked(&drops);
        let err = ActionInstance::new(&registry, "Nope", &ActionConfig::new()).unwrap_err();
        assert_eq!(err, ActionError::UnknownActionKind("Nope".to_string()));
        assert_eq!(registry.live_instances(), 0);
    }

    #[test]
    fn rejected_config_allocates_nothing() {
        let drops = Rc::new(Cell::new(0));
        let registry = registry_with_tracked(&drops);
        let config = ActionConfig::new().with("reject", true);
        let err = ActionInstance::new(&registry, "Tracked", &config).unwrap_err();
        assert!(matches!(
            err,
            ActionError::InvalidConfig { ref kind, .. } if kind == "Tracked"
        ));
        assert_eq!(registry.live_instances(), 0);
        assert_eq!(drops.get(), 0);
    }

    #[test]
    fn options_dropped_once_after_last_holder() {
        let drops = Rc::new(Cell::new(0));
        let registry = registry_with_tracked(&drops);
        let act = ActionInstance::new(&registry, "Tracked", &ActionConfig::new()).unwrap();

        let holders: Vec<_> = (0..5).map(|_| act.clone()).collect();
        assert_eq!(act.ref_count(), 6);
        assert!(holders.iter().all(|h| h.ptr_eq(&act)));
        drop(holders);
        assert_eq!(drops.get(), 0);
        assert_eq!(act.ref_count(), 1);

        drop(act);
        assert_eq!(drops.get(), 1);
        assert_eq!(registry.live_instances(), 0);
    }

    #[test]
    fn instance_outlives_registry_shutdown() {
        let drops = Rc::new(Cell::new(0));
        let mut registry = registry_with_tracked(&drops);
        let act = ActionInstance::new(&registry, "Tracked", &ActionConfig::new()).unwrap();
        registry.shutdown(false);

        let mut host = RecordingHost::default();
        let data = ActionData::from_gesture(&crate::data::Gesture::new(UserAction::None), &host);
        assert_eq!(act.run(&data, &mut host), Flow::Stop);
        assert_eq!(act.definition().name(), "Tracked");
    }

    #[test]
    fn interactive_kind_exposes_session_hooks() {
        let drops = Rc::new(Cell::new(0));
        let registry = registry_with_tracked(&drops);
        let act = ActionInstance::new(&registry, "Drag", &ActionConfig::new()).unwrap();
        assert!(act.is_interactive());
        assert!(registry.is_interactive(&act));
        assert!(act.interactive().is_some());
        assert!(format!("{act:?}").contains("Drag"));
    }
}
