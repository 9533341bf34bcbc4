//! Rendering module
//!
//! Turns a world snapshot into screen-space draw commands. Blitting them to
//! an actual surface is left to the display backend.

pub mod shapes;

pub use shapes::{DrawCommand, Frame, build_frame, clip_line, to_screen};
