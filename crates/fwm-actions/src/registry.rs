//! Action kind registry.
//!
//! Maps a kind name to its [`ActionDefinition`]. Built-in kinds register at
//! startup; the table is read-only afterwards apart from attaching shutdown
//! hooks. Definitions are shared with the instances built from them, so an
//! instance stays valid even after [`ActionRegistry::shutdown`] clears the
//! table.
//!
//! # Example
//!
//! ```
//! use fwm_actions::data::ActionData;
//! use fwm_actions::kind::{Flow, RunAction};
//! use fwm_actions::registry::ActionRegistry;
//! use fwm_core::host::WindowManager;
//!
//! struct Noop;
//!
//! impl RunAction for Noop {
//!     fn run(&self, _data: &ActionData, _wm: &mut dyn WindowManager) -> Flow {
//!         Flow::Continue
//!     }
//! }
//!
//! let mut registry = ActionRegistry::new();
//! registry.register("Noop", |_| Ok(Box::new(Noop))).unwrap();
//! assert!(registry.contains("Noop"));
//! assert!(registry.register("Noop", |_| Ok(Box::new(Noop))).is_err());
//! ```

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use ahash::AHashMap;

use crate::config::ActionConfig;
use crate::error::{ConfigError, RegistryError};
use crate::instance::ActionInstance;
use crate::kind::{InteractiveAction, InteractiveSetup, PlainSetup, RunAction, ShutdownHook};

/// How instances of a kind are built.
pub(crate) enum ActionShape {
    Plain(PlainSetup),
    Interactive(InteractiveSetup),
}

/// A registered action kind.
pub struct ActionDefinition {
    name: String,
    pub(crate) shape: ActionShape,
}

impl ActionDefinition {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the kind was registered through the interactive path.
    #[must_use]
    pub fn is_interactive(&self) -> bool {
        matches!(self.shape, ActionShape::Interactive(_))
    }
}

impl fmt::Debug for ActionDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionDefinition")
            .field("name", &self.name)
            .field("interactive", &self.is_interactive())
            .finish()
    }
}

struct Registered {
    def: Rc<ActionDefinition>,
    shutdown: Option<ShutdownHook>,
}

/// Name-keyed table of action kinds.
pub struct ActionRegistry {
    /// Registration order; shutdown hooks run in this order.
    entries: Vec<Registered>,
    index: AHashMap<String, usize>,
    live: Rc<Cell<usize>>,
    started: bool,
}

impl Default for ActionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionRegistry")
            .field("kinds", &self.entries.len())
            .field("live_instances", &self.live.get())
            .field("started", &self.started)
            .finish()
    }
}

impl ActionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: AHashMap::new(),
            live: Rc::new(Cell::new(0)),
            started: false,
        }
    }

    /// Register a plain kind.
    pub fn register<F>(&mut self, name: impl Into<String>, setup: F) -> Result<(), RegistryError>
    where
        F: Fn(&ActionConfig) -> Result<Box<dyn RunAction>, ConfigError> + 'static,
    {
        self.insert(name.into(), ActionShape::Plain(Box::new(setup)))
    }

    /// Register a kind whose instances may run interactive sessions.
    pub fn register_interactive<F>(
        &mut self,
        name: impl Into<String>,
        setup: F,
    ) -> Result<(), RegistryError>
    where
        F: Fn(&ActionConfig) -> Result<Box<dyn InteractiveAction>, ConfigError> + 'static,
    {
        self.insert(name.into(), ActionShape::Interactive(Box::new(setup)))
    }

    fn insert(&mut self, name: String, shape: ActionShape) -> Result<(), RegistryError> {
        if self.index.contains_key(&name) {
            return Err(RegistryError::DuplicateName(name));
        }
        let def = Rc::new(ActionDefinition {
            name: name.clone(),
            shape,
        });
        tracing::debug!(
            target: "fwm.actions",
            kind = %name,
            interactive = def.is_interactive(),
            "action kind registered"
        );
        self.index.insert(name, self.entries.len());
        self.entries.push(Registered {
            def,
            shutdown: None,
        });
        Ok(())
    }

    /// Attach a teardown hook to a registered kind, replacing any earlier one.
    pub fn set_shutdown<F>(&mut self, name: &str, hook: F) -> Result<(), RegistryError>
    where
        F: FnMut(bool) + 'static,
    {
        let slot = self
            .index
            .get(name)
            .copied()
            .ok_or_else(|| RegistryError::UnknownName(name.to_owned()))?;
        self.entries[slot].shutdown = Some(Box::new(hook));
        Ok(())
    }

    /// Whether the instance's kind was registered as interactive.
    #[must_use]
    pub fn is_interactive(&self, act: &ActionInstance) -> bool {
        act.is_interactive()
    }

    /// Look up a kind.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ActionDefinition> {
        self.lookup(name).map(Rc::as_ref)
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<&Rc<ActionDefinition>> {
        self.index.get(name).map(|&slot| &self.entries[slot].def)
    }

    /// Shared live-instance counter handed to every instance.
    pub(crate) fn live_counter(&self) -> &Rc<Cell<usize>> {
        &self.live
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Kind names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.def.name())
    }

    /// Number of instances built from this registry that are still alive.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.live.get()
    }

    #[must_use]
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Mark the registry as accepting lookups.
    pub fn startup(&mut self, reconfigure: bool) {
        self.started = true;
        tracing::debug!(
            target: "fwm.actions",
            reconfigure,
            kinds = self.entries.len(),
            "action registry started"
        );
    }

    /// Run every shutdown hook once, in registration order, then clear the
    /// table.
    pub fn shutdown(&mut self, reconfiguring: bool) {
        tracing::debug!(
            target: "fwm.actions",
            reconfiguring,
            kinds = self.entries.len(),
            live_instances = self.live.get(),
            "action registry shutting down"
        );
        for mut entry in self.entries.drain(..) {
            if let Some(hook) = entry.shutdown.as_mut() {
                hook(reconfiguring);
            }
        }
        self.index.clear();
        self.started = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ActionData;
    use crate::kind::{Flow, InputStep};
    use fwm_core::event::{Event, Modifiers};
    use fwm_core::host::WindowManager;
    use std::cell::RefCell;

    struct Noop;

    impl RunAction for Noop {
        fn run(&self, _data: &ActionData, _wm: &mut dyn WindowManager) -> Flow {
            Flow::Continue
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
            InputStep::Finish
        }
        fn cancel(&self, _wm: &mut dyn WindowManager) {}
        fn post(&self, _wm: &mut dyn WindowManager) {}
    }

    fn noop_setup(_: &ActionConfig) -> Result<Box<dyn RunAction>, ConfigError> {
        Ok(Box::new(Noop))
    }

    #[test]
    fn register_and_lookup() {
        let mut registry = ActionRegistry::new();
        assert!(registry.is_empty());
        registry.register("Noop", noop_setup).unwrap();
        registry
            .register_interactive("Drag", |_| Ok(Box::new(Drag)))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(!registry.get("Noop").unwrap().is_interactive());
        assert!(registry.get("Drag").unwrap().is_interactive());
        assert!(registry.get("Missing").is_none());
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["Noop", "Drag"]);
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let mut registry = ActionRegistry::new();
        registry.register("Noop", noop_setup).unwrap();
        assert_eq!(
            registry.register_interactive("Noop", |_| Ok(Box::new(Drag))),
            Err(RegistryError::DuplicateName("Noop".to_string()))
        );
        assert!(!registry.get("Noop").unwrap().is_interactive());
    }

    #[test]
    fn set_shutdown_requires_registered_name() {
        let mut registry = ActionRegistry::new();
        assert_eq!(
            registry.set_shutdown("Noop", |_| {}),
            Err(RegistryError::UnknownName("Noop".to_string()))
        );
    }

    #[test]
    fn shutdown_runs_hooks_in_registration_order_once() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = ActionRegistry::new();
        for name in ["A", "B", "C"] {
            registry.register(name, noop_setup).unwrap();
        }
        for name in ["C", "A"] {
            let log = Rc::clone(&log);
            registry
                .set_shutdown(name, move |reconfiguring| {
                    log.borrow_mut().push((name, reconfiguring));
                })
                .unwrap();
        }
        registry.startup(false);
        assert!(registry.is_started());

        registry.shutdown(true);
        assert_eq!(*log.borrow(), vec![("A", true), ("C", true)]);
        assert!(registry.is_empty());
        assert!(!registry.contains("A"));
        assert!(!registry.is_started());

        registry.shutdown(false);
        assert_eq!(log.borrow().len(), 2);
    }

    #[test]
    fn kinds_can_register_again_after_shutdown() {
        let mut registry = ActionRegistry::new();
        registry.register("Noop", noop_setup).unwrap();
        registry.shutdown(false);
        registry.register("Noop", noop_setup).unwrap();
        assert_eq!(registry.len(), 1);
    }
}
