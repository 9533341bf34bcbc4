//! Poriball - A slime volleyball arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, world state)
//! - `config`: Key/value configuration file
//! - `platform`: Input translation and clocks
//! - `renderer`: Screen-space projection of the world

pub mod config;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::Config;
pub use sim::vector::{Polar, azimuth, cartesianize, magnitude, polarize, unit};

/// Game configuration constants
pub mod consts {
    /// Default physics rate (updates/s)
    pub const PHYS_HZ: f32 = 200.0;

    /// Screen/court dimensions (px)
    pub const SCREEN_WIDTH: u32 = 640;
    pub const SCREEN_HEIGHT: u32 = 480;
    pub const NET_HEIGHT: f32 = 150.0;

    /// Acceleration due to gravity (px/s²)
    pub const ADTG: f32 = 1000.0;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 500.0; // px/s
    pub const JUMP_VEL: f32 = 400.0;
    pub const SKYWALK: bool = false;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 10.0;
    /// Elasticity of collisions, 1 = fully elastic, 0 = fully damped
    pub const ELASTICITY: f32 = 0.8;
    /// Height the ball is dropped from after touching the ground
    pub const SPAWN_HEIGHT: f32 = 200.0;

    /// Roster and contact capacities
    pub const DUDES: usize = 2;
    pub const MAX_PLAYERS: usize = 8;
    pub const MAX_CONTACTS: usize = 32;

    /// 'q'
    pub const QUIT_KEY: u32 = 113;

    /// Player sprite is 200x100 with its base point at (100, 90)
    pub const SPRITE_ANCHOR_X: f32 = 100.0;
    pub const SPRITE_ANCHOR_Y: f32 = 90.0;

    /// Render cadence of the headless driver
    pub const RENDER_HZ: f32 = 60.0;
}
