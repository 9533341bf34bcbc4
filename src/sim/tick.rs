//! Fixed timestep simulation tick
//!
//! Core game loop that advances the world deterministically. Render cadence
//! is decoupled from physics: `Simulation::advance` catches physics up to
//! wall-clock time in whole `1 / physhz` steps and leaves drawing to the
//! caller.

use std::collections::VecDeque;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::CollisionEngine;
use super::motion::{move_ball, move_player};
use super::state::World;

/// Player action bound to a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Left,
    Right,
    Jump,
}

/// Whether a key went down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Edge {
    Pressed,
    Released,
}

/// Abstract input, already translated from raw key events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    Press {
        player: usize,
        action: Action,
        edge: Edge,
    },
    Quit,
}

/// Apply one intent to the world
pub fn apply_intent(world: &mut World, intent: Intent) {
    match intent {
        Intent::Quit => world.running = false,
        Intent::Press {
            player,
            action,
            edge,
        } => {
            let Some(p) = world.players.get_mut(player) else {
                log::debug!("Intent for unknown player {}", player);
                return;
            };
            let held = edge == Edge::Pressed;
            match action {
                Action::Left => p.controls.left = held,
                Action::Right => p.controls.right = held,
                Action::Jump => p.controls.jump = held,
            }
        }
    }
}

/// Advance the world by one physics step
///
/// Players move first, then the deepest ball contact is resolved, then the
/// ball flies.
pub fn tick(world: &mut World, engine: &mut CollisionEngine, dt: f32) {
    let adtg = world.adtg;
    for (i, p) in world.players.iter_mut().enumerate() {
        let Some(territory) = world.territories.get(p.territory) else {
            log::debug!("Player {} has no territory {}, not moving", i, p.territory);
            continue;
        };
        move_player(p, territory, adtg, dt);
    }
    if let Some(hit) = engine.resolve(world) {
        log::trace!("Resolved contact depth {:.2} normal {:.2}", hit.depth, hit.normal);
    }
    move_ball(&mut world.ball, adtg, dt);
}

/// Source of the player the ball respawns above
pub trait PlayerPicker {
    /// Return an index in `[0, count)`
    fn pick(&mut self, count: usize) -> usize;
}

impl<R: Rng> PlayerPicker for R {
    fn pick(&mut self, count: usize) -> usize {
        self.random_range(0..count)
    }
}

/// Respawn the ball above a random player once it touches the ground
///
/// Returns the chosen player index if a respawn happened.
pub fn respawn_if_grounded(world: &mut World, picker: &mut impl PlayerPicker) -> Option<usize> {
    if world.ball.pos.y >= world.ball.r || world.players.is_empty() {
        return None;
    }
    let player = picker.pick(world.pnum());
    log::debug!("Ball down at x={:.1}, respawning above player {}", world.ball.pos.x, player);
    world.respawn_ball(player).then_some(player)
}

/// Anything that can hand over pending intents
pub trait InputSource {
    /// Move every pending intent into `out`, in arrival order
    fn poll(&mut self, out: &mut Vec<Intent>);
}

impl InputSource for VecDeque<Intent> {
    fn poll(&mut self, out: &mut Vec<Intent>) {
        out.extend(self.drain(..));
    }
}

/// World plus the fixed-timestep accumulator driving it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Simulation {
    pub world: World,
    pub engine: CollisionEngine,
    /// Unsimulated wall-clock time (s)
    pub accum: f32,
    /// Physics ticks run since start
    pub ticks: u64,
    #[serde(skip)]
    pending: Vec<Intent>,
}

impl Simulation {
    pub fn new(world: World) -> Self {
        Self {
            world,
            engine: CollisionEngine::new(),
            accum: 0.0,
            ticks: 0,
            pending: Vec::new(),
        }
    }

    /// Catch physics up to `now` (seconds since start)
    ///
    /// Each whole step first drains `input`, then runs one tick and the
    /// respawn check. Returns the number of ticks run.
    pub fn advance(
        &mut self,
        now: f64,
        input: &mut impl InputSource,
        picker: &mut impl PlayerPicker,
    ) -> u32 {
        let dt = self.world.physics_dt();
        self.world.t0 = self.world.t1;
        self.world.t1 = now;
        self.accum += (self.world.t1 - self.world.t0) as f32;

        let mut steps = 0;
        while self.accum >= dt {
            input.poll(&mut self.pending);
            for intent in self.pending.drain(..) {
                apply_intent(&mut self.world, intent);
            }
            self.accum -= dt;
            tick(&mut self.world, &mut self.engine, dt);
            respawn_if_grounded(&mut self.world, picker);
            self.ticks += 1;
            steps += 1;
        }
        steps
    }

    #[inline]
    pub fn running(&self) -> bool {
        self.world.running
    }
}
