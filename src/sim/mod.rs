//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Injected randomness only (ball respawn)
//! - Stable iteration order (roster order, then wall order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod motion;
pub mod state;
pub mod tick;
pub mod vector;

pub use collision::{CollisionEngine, Contact, deepest_contact, impulse, player_contact, wall_contact};
pub use motion::{move_ball, move_player};
pub use state::{
    Ball, Controls, Key, Player, PlayerDefaults, PlayerKeys, Territory, Wall, WallKind, World,
    WorldSnapshot,
};
pub use tick::{
    Action, Edge, InputSource, Intent, PlayerPicker, Simulation, apply_intent, respawn_if_grounded,
    tick,
};
