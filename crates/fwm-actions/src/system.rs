//! Process-scoped action context.
//!
//! [`ActionSystem`] owns the registry and the dispatcher for one window
//! manager. There is no global state; tests build as many independent
//! systems as they like.
//!
//! # Lifecycle
//!
//! 1. [`ActionSystem::startup`] registers the built-in kinds from each
//!    [`ActionPlugin`] and marks the registry started.
//! 2. The bindings loader builds [`ActionList`]s through
//!    [`ActionSystem::build_list`] or [`ActionSystem::build_list_lenient`].
//! 3. The event loop calls [`ActionSystem::run_acts`] and the interactive
//!    entry points.
//! 4. [`ActionSystem::shutdown`] cancels any running session, then runs the
//!    kinds' shutdown hooks and clears the table. A reconfigure is a
//!    `shutdown(true)` followed by `startup(true)`.

use fwm_core::event::Event;
use fwm_core::host::WindowManager;

use crate::config::{ActionConfig, ActionSpec};
use crate::data::Gesture;
use crate::dispatch::Dispatcher;
use crate::error::{ActionError, RegistryError, Result};
use crate::instance::ActionInstance;
use crate::list::ActionList;
use crate::registry::ActionRegistry;

/// A provider of action kinds.
pub trait ActionPlugin {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Register this plugin's kinds and their shutdown hooks.
    fn register(&self, registry: &mut ActionRegistry) -> std::result::Result<(), RegistryError>;
}

/// Registry plus dispatcher.
#[derive(Debug, Default)]
pub struct ActionSystem {
    registry: ActionRegistry,
    dispatcher: Dispatcher,
}

impl ActionSystem {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher {
        &mut self.dispatcher
    }

    /// Register every plugin's kinds and start the registry.
    ///
    /// Stops at the first plugin that fails to register; kinds registered
    /// before the failure stay in the table.
    pub fn startup(
        &mut self,
        reconfigure: bool,
        plugins: &[&dyn ActionPlugin],
    ) -> std::result::Result<(), RegistryError> {
        for plugin in plugins {
            plugin.register(&mut self.registry).inspect_err(|err| {
                tracing::error!(
                    target: "fwm.actions",
                    plugin = %plugin.name(),
                    error = %err,
                    "action plugin failed to register"
                );
            })?;
        }
        self.registry.startup(reconfigure);
        Ok(())
    }

    /// Tear down: cancel any running session, then shut the registry down.
    pub fn shutdown(&mut self, reconfiguring: bool, wm: &mut dyn WindowManager) {
        if self.dispatcher.shutdown(wm) {
            tracing::debug!(
                target: "fwm.actions",
                "cancelled interactive session before shutdown"
            );
        }
        self.registry.shutdown(reconfiguring);
    }

    /// Build one action instance.
    pub fn new_action(&self, name: &str, config: &ActionConfig) -> Result<ActionInstance> {
        ActionInstance::new(&self.registry, name, config)
    }

    /// Build a list, failing on the first bad entry.
    pub fn build_list(&self, specs: &[ActionSpec]) -> Result<ActionList> {
        ActionList::build(&self.registry, specs)
    }

    /// Build a list, dropping bad entries.
    pub fn build_list_lenient(&self, specs: &[ActionSpec]) -> (ActionList, Vec<ActionError>) {
        ActionList::build_lenient(&self.registry, specs)
    }

    /// See [`Dispatcher::run_acts`].
    pub fn run_acts(
        &mut self,
        acts: &ActionList,
        gesture: Gesture,
        wm: &mut dyn WindowManager,
    ) -> bool {
        self.dispatcher.run_acts(acts, gesture, wm)
    }

    #[must_use]
    pub const fn is_interactive_act_running(&self) -> bool {
        self.dispatcher.is_interactive_act_running()
    }

    pub fn interactive_cancel_act(&mut self, wm: &mut dyn WindowManager) {
        self.dispatcher.interactive_cancel_act(wm);
    }

    pub fn interactive_input_event(&mut self, event: &Event, wm: &mut dyn WindowManager) -> bool {
        self.dispatcher.interactive_input_event(event, wm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ActionData;
    use crate::kind::{Flow, RunAction};
    use fwm_core::host::testing::RecordingHost;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Noop;

    impl RunAction for Noop {
        fn run(&self, _data: &ActionData, _wm: &mut dyn WindowManager) -> Flow {
            Flow::Continue
        }
    }

    struct Basics {
        torn_down: Rc<RefCell<Vec<bool>>>,
    }

    impl ActionPlugin for Basics {
        fn name(&self) -> &str {
            "basics"
        }

        fn register(
            &self,
            registry: &mut ActionRegistry,
        ) -> std::result::Result<(), RegistryError> {
            registry.register("Noop", |_| Ok(Box::new(Noop)))?;
            let log = Rc::clone(&self.torn_down);
            registry.set_shutdown("Noop", move |reconfiguring| {
                log.borrow_mut().push(reconfiguring);
            })
        }
    }

    #[test]
    fn startup_runs_plugins() {
        let plugin = Basics {
            torn_down: Rc::default(),
        };
        let mut system = ActionSystem::new();
        system.startup(false, &[&plugin]).unwrap();
        assert!(system.registry().is_started());
        assert!(system.registry().contains("Noop"));
        assert!(system.new_action("Noop", &ActionConfig::new()).is_ok());
    }

    #[test]
    fn duplicate_plugin_registration_is_fatal() {
        let plugin = Basics {
            torn_down: Rc::default(),
        };
        let mut system = ActionSystem::new();
        let err = system.startup(false, &[&plugin, &plugin]).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateName("Noop".to_string()));
        assert!(!system.registry().is_started());
    }

    #[test]
    fn reconfigure_cycle_reregisters_kinds() {
        let plugin = Basics {
            torn_down: Rc::default(),
        };
        let mut system = ActionSystem::new();
        let mut host = RecordingHost::default();
        system.startup(false, &[&plugin]).unwrap();
        system.shutdown(true, &mut host);
        assert!(system.registry().is_empty());
        system.startup(true, &[&plugin]).unwrap();
        system.shutdown(false, &mut host);
        assert_eq!(*plugin.torn_down.borrow(), vec![true, false]);
    }
}
