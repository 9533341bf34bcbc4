//! Platform abstraction layer
//!
//! Handles the boundary between raw devices and the simulation:
//! - Input events (key bindings, key prompt, key -> intent translation)
//! - Time (wall clock, manual clock for replays)

pub mod input;
pub mod time;

pub use input::{KeyBindings, KeyEvent, prompt_bindings};
pub use time::{Clock, ManualClock, SystemClock};
