//! Behaviour traits implemented by action kinds.
//!
//! A kind's setup turns a configuration mapping into a value implementing
//! [`RunAction`] (plain kinds) or [`InteractiveAction`] (interactive kinds).
//! That value *is* the instance's options: it is owned by exactly one
//! [`ActionInstance`](crate::instance::ActionInstance) and dropped when the
//! last handle to the instance goes away.
//!
//! Instances are shared and immutable, so every method takes `&self`. Kinds
//! that keep per-session state (drag origin, cycle position) hold it in a
//! `Cell` or `RefCell`.

use fwm_core::event::{Event, Modifiers};
use fwm_core::host::WindowManager;

use crate::config::ActionConfig;
use crate::data::ActionData;
use crate::error::ConfigError;

/// Whether later actions in the same list still run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Flow {
    /// Run the next action.
    #[default]
    Continue,
    /// Skip the rest of the list and suppress default handling.
    Stop,
}

/// What an interactive session wants after seeing one input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputStep {
    /// Keep the session running. `used` is false if the event should also
    /// reach normal dispatch.
    Continue { used: bool },
    /// The gesture is complete; `post` runs and the session ends.
    Finish,
}

/// Behaviour of a plain action kind.
pub trait RunAction: 'static {
    /// Apply the action's immediate effect.
    fn run(&self, data: &ActionData, wm: &mut dyn WindowManager) -> Flow;
}

/// Behaviour of an interactive action kind.
///
/// `run` still provides the immediate effect when the list executes; the
/// remaining methods drive the multi-event session.
pub trait InteractiveAction: RunAction {
    /// Decide whether to start a session. Declining makes this trigger
    /// behave like a plain action.
    fn pre(&self, initial_state: Modifiers, wm: &mut dyn WindowManager) -> bool {
        let _ = (initial_state, wm);
        true
    }

    /// Handle one input event while the session is active.
    fn input(
        &self,
        initial_state: Modifiers,
        event: &Event,
        wm: &mut dyn WindowManager,
    ) -> InputStep;

    /// The session was aborted.
    fn cancel(&self, wm: &mut dyn WindowManager);

    /// The session completed normally.
    fn post(&self, wm: &mut dyn WindowManager);
}

/// Setup for plain kinds.
pub type PlainSetup = Box<dyn Fn(&ActionConfig) -> Result<Box<dyn RunAction>, ConfigError>>;

/// Setup for interactive kinds.
pub type InteractiveSetup =
    Box<dyn Fn(&ActionConfig) -> Result<Box<dyn InteractiveAction>, ConfigError>>;

/// Teardown hook; receives `true` when the window manager is reconfiguring
/// rather than exiting.
pub type ShutdownHook = Box<dyn FnMut(bool)>;
