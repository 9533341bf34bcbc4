//! World state and entity types
//!
//! Plain data: all behavior lives in `motion`, `collision` and `tick`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts::*;

/// A raw platform keycode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Key(pub u32);

/// Horizontal band a player is confined to (inclusive)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub l: f32,
    pub r: f32,
}

impl Territory {
    pub fn new(l: f32, r: f32) -> Self {
        Self { l, r }
    }

    /// Clamp the x of a circle of `radius` so it stays inside the band
    ///
    /// A band narrower than the circle pins it to the left edge.
    pub fn clamp(&self, x: f32, radius: f32) -> f32 {
        let lo = self.l + radius;
        let hi = (self.r - radius).max(lo);
        x.clamp(lo, hi)
    }

    pub fn center(&self) -> f32 {
        (self.l + self.r) / 2.0
    }
}

/// Keys bound to one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerKeys {
    pub left: Key,
    pub right: Key,
    pub jump: Key,
}

/// Currently held intents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
}

/// Per-player parameters every new player starts with
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerDefaults {
    pub radius: f32,
    pub speed: f32,
    pub jumpvel: f32,
    pub skywalk: bool,
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            jumpvel: JUMP_VEL,
            skywalk: SKYWALK,
        }
    }
}

/// A player (a half-circle slime, collides as a full circle)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    pub r: f32,
    pub vel: Vec2,
    /// Index into `World::territories`
    pub territory: usize,
    pub controls: Controls,
    pub keys: PlayerKeys,
    /// Ignore the grounded requirement for horizontal control
    pub skywalk: bool,
    /// Max ground speed (px/s)
    pub speed: f32,
    /// Initial jump velocity (px/s)
    pub jumpvel: f32,
}

impl Player {
    pub fn new(pos: Vec2, territory: usize, defaults: &PlayerDefaults) -> Self {
        Self {
            pos,
            r: defaults.radius,
            vel: Vec2::ZERO,
            territory,
            controls: Controls::default(),
            keys: PlayerKeys::default(),
            skywalk: defaults.skywalk,
            speed: defaults.speed,
            jumpvel: defaults.jumpvel,
        }
    }

    #[inline]
    pub fn grounded(&self) -> bool {
        self.pos.y == 0.0
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub r: f32,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, r: f32) -> Self {
        Self {
            pos,
            r,
            vel: Vec2::ZERO,
        }
    }
}

/// Wall geometry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum WallKind {
    /// Infinite line through the wall position at `theta` (0 < theta < π)
    Line { theta: f32 },
    /// Finite span from the wall position to `pos + end`
    Segment { end: Vec2 },
}

/// A static obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub pos: Vec2,
    pub kind: WallKind,
}

impl Wall {
    pub fn line(pos: Vec2, theta: f32) -> Self {
        Self {
            pos,
            kind: WallKind::Line { theta },
        }
    }

    pub fn segment(pos: Vec2, end: Vec2) -> Self {
        Self {
            pos,
            kind: WallKind::Segment { end },
        }
    }
}

/// Read-only view handed to renderers
#[derive(Debug, Clone, Copy, Serialize)]
pub struct WorldSnapshot<'a> {
    pub players: &'a [Player],
    pub ball: &'a Ball,
    pub walls: &'a [Wall],
}

/// Complete match state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub running: bool,
    /// Fixed roster, `players.len()` is `pnum`
    pub players: Vec<Player>,
    pub player_defaults: PlayerDefaults,
    pub walls: Vec<Wall>,
    pub ball: Ball,
    pub ball_radius: f32,
    pub elasticity: f32,
    pub territories: Vec<Territory>,
    /// Acceleration due to gravity (px/s²)
    pub adtg: f32,
    /// Wall-clock marks of the previous and current frame (s)
    pub t0: f64,
    pub t1: f64,
    pub physhz: f32,
    pub width: f32,
    pub height: f32,
    pub net_height: f32,
}

impl World {
    /// Build the court described by `config`
    ///
    /// The screen width is split into one territory per player, each player
    /// starts on the ground in the middle of its territory, the screen edges
    /// are vertical line walls and the net is a vertical segment at
    /// mid-court.
    pub fn new(config: &Config) -> Self {
        let width = config.screenwidth as f32;
        let height = config.screenheight as f32;
        let pnum = config.dudes.clamp(1, MAX_PLAYERS);
        if pnum != config.dudes {
            log::warn!("dudes = {} out of range, using {}", config.dudes, pnum);
        }

        let player_defaults = PlayerDefaults {
            radius: config.playerradius,
            speed: config.playerspeed,
            jumpvel: config.jumpvel,
            skywalk: config.skywalk,
        };

        let band = width / pnum as f32;
        let territories: Vec<Territory> = (0..pnum)
            .map(|i| Territory::new(band * i as f32, band * (i + 1) as f32))
            .collect();

        let players: Vec<Player> = territories
            .iter()
            .enumerate()
            .map(|(i, t)| Player::new(Vec2::new(t.center(), 0.0), i, &player_defaults))
            .collect();

        let walls = vec![
            Wall::line(Vec2::ZERO, std::f32::consts::FRAC_PI_2),
            Wall::line(Vec2::new(width, 0.0), std::f32::consts::FRAC_PI_2),
            Wall::segment(Vec2::new(width / 2.0, 0.0), Vec2::new(0.0, config.netheight)),
        ];

        let ball = Ball::new(Vec2::new(players[0].pos.x, SPAWN_HEIGHT), config.ballradius);

        Self {
            running: true,
            players,
            player_defaults,
            walls,
            ball,
            ball_radius: config.ballradius,
            elasticity: config.elasticity,
            territories,
            adtg: config.adtg,
            t0: 0.0,
            t1: 0.0,
            physhz: config.physhz,
            width,
            height,
            net_height: config.netheight,
        }
    }

    /// Number of players in the roster
    #[inline]
    pub fn pnum(&self) -> usize {
        self.players.len()
    }

    /// Fixed physics step (s)
    #[inline]
    pub fn physics_dt(&self) -> f32 {
        1.0 / self.physhz
    }

    pub fn snapshot(&self) -> WorldSnapshot<'_> {
        WorldSnapshot {
            players: &self.players,
            ball: &self.ball,
            walls: &self.walls,
        }
    }

    /// Put a fresh, motionless ball above `player`
    pub fn respawn_ball(&mut self, player: usize) -> bool {
        let Some(p) = self.players.get(player) else {
            log::debug!("Can't respawn above unknown player {}", player);
            return false;
        };
        self.ball = Ball::new(Vec2::new(p.pos.x, SPAWN_HEIGHT), self.ball_radius);
        true
    }
}
