#![forbid(unsafe_code)]

//! fwm Actions
//!
//! This crate turns user gestures into configured operations on the window
//! manager: a key binding, mouse click or menu entry runs an ordered list of
//! named actions, and some actions (move, resize, window cycling) go on to
//! own the input stream for a while as an interactive session.
//!
//! # Key Components
//!
//! - [`ActionRegistry`] - Name-keyed table of action kinds
//! - [`ActionInstance`] - Shared handle to a configured action
//! - [`ActionList`] - The actions bound to one trigger
//! - [`Dispatcher`] - Runs lists and routes input to the interactive session
//! - [`InteractiveSession`] - The single in-flight multi-event action
//! - [`ActionSystem`] - Registry plus dispatcher with explicit startup and
//!   shutdown
//!
//! # Role in fwm
//! `fwm-actions` sits between the event loop and window-manager state. The
//! event loop resolves a binding, calls [`Dispatcher::run_acts`], and while
//! [`Dispatcher::is_interactive_act_running`] holds it offers every input
//! event to [`Dispatcher::interactive_input_event`] first.
//!
//! # Feature Flags
//!
//! - `config`: serde derives on [`ActionConfig`] and the [`bindings`] loader
//!   for TOML and JSON bindings files.

#[cfg(feature = "config")]
pub mod bindings;
pub mod config;
pub mod data;
pub mod dispatch;
pub mod error;
pub mod instance;
pub mod kind;
pub mod list;
pub mod registry;
pub mod session;
pub mod system;

#[cfg(feature = "config")]
pub use bindings::{Binding, BindingConfig, BindingsConfig, BindingsError};
pub use config::{ActionConfig, ActionSpec, ConfigValue};
pub use data::{ActionData, Gesture};
pub use dispatch::Dispatcher;
pub use error::{ActionError, ConfigError, RegistryError};
pub use instance::ActionInstance;
pub use kind::{Flow, InputStep, InteractiveAction, RunAction};
pub use list::ActionList;
pub use registry::{ActionDefinition, ActionRegistry};
pub use session::{CancelReason, InteractiveSession};
pub use system::{ActionPlugin, ActionSystem};
