//! Nethercore Debug Actions - debug input action mapping
//!
//! Maps raw button, axis and key input to a small closed set of debug actions
//! (open the debug menu, page through it, validate, move the selection).
//!
//! # Architecture
//!
//! - [`ActionTable`] - Which inputs trigger each [`DebugAction`] and how it repeats
//! - [`DebugActionManager`] - Per-tick trigger/repeat state machine
//! - [`InputSource`] - Host input contract read by the manager
//! - [`FrameInput`] - Event-fed [`InputSource`] for window/gamepad loops and tests
//!
//! # Repeat modes
//!
//! - [`RepeatMode::Never`]: fires once per press; every input of the winning
//!   trigger must be released before it can fire again.
//! - [`RepeatMode::Delay`]: additionally re-fires while held, once the delay has
//!   passed since the action last fired.

mod action;
pub mod config;
mod error;
mod frame_input;
pub mod keycode_serde;
mod manager;
mod source;
mod state;
pub mod table;
mod trigger;

pub use action::{DebugAction, RepeatMode};
pub use error::ConfigError;
pub use frame_input::FrameInput;
pub use manager::DebugActionManager;
pub use source::InputSource;
pub use state::ActionState;
pub use table::ActionTable;
pub use trigger::{ActionDesc, ButtonCombo, KeyCombo, MatchedTrigger};

// Re-export the key type used by key triggers
pub use winit::keyboard::KeyCode;
