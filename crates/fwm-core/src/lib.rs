#![forbid(unsafe_code)]

//! Core: input vocabulary and host collaborator traits.
//!
//! # Role in fwm
//! `fwm-core` is the shared language between the windowing event loop and
//! the action subsystem. It owns no state of its own; it defines the values
//! that flow between them.
//!
//! # Primary responsibilities
//! - **Event**: canonical input events (keys, buttons, pointer motion, focus).
//! - **Modifiers**: the modifier/button state mask carried by every event.
//! - **Trigger vocabulary**: [`UserAction`](trigger::UserAction),
//!   [`FrameContext`](trigger::FrameContext) and client handles.
//! - **Host**: the [`WindowManager`](host::WindowManager) trait through which
//!   actions query and mutate window-manager state.
//!
//! # How it fits in the system
//! The event loop translates protocol events into [`event::Event`] values and
//! hands them to `fwm-actions`, which runs configured actions against a
//! [`host::WindowManager`] implementation supplied by the caller.

pub mod event;
pub mod geometry;
pub mod host;
pub mod trigger;

pub use event::{
    ButtonEvent, ButtonEventKind, Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, MotionEvent,
    MouseButton,
};
pub use geometry::{Point, Rect};
pub use host::WindowManager;
pub use trigger::{ClientId, FrameContext, UserAction};
