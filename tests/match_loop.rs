//! End-to-end tests for the match loop.
//!
//! These drive a full world through key bindings, intent translation and
//! the fixed-timestep accumulator the way the binary does.

use std::collections::VecDeque;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use poriball::config::Config;
use poriball::consts::SPAWN_HEIGHT;
use poriball::platform::{Clock, KeyBindings, KeyEvent, ManualClock, prompt_bindings};
use poriball::renderer::build_frame;
use poriball::sim::{Intent, Key, PlayerPicker, Simulation, World};

struct Fixed(usize);

impl PlayerPicker for Fixed {
    fn pick(&mut self, _count: usize) -> usize {
        self.0
    }
}

fn key(c: char) -> Key {
    Key(c as u32)
}

fn bound_world(config: &Config) -> (World, KeyBindings) {
    let mut world = World::new(config);
    let mut keys = "adwjli".chars().map(key);
    assert!(prompt_bindings(&mut world, || keys.next()));
    let bindings = KeyBindings::from_world(&world, Key(config.quitkey));
    (world, bindings)
}

/// Run `frames` render frames at 60 Hz, feeding `events` at their times
fn replay(
    sim: &mut Simulation,
    bindings: &KeyBindings,
    events: &[(f64, KeyEvent)],
    frames: u32,
    picker: &mut impl PlayerPicker,
    mut each_frame: impl FnMut(&Simulation),
) {
    let mut clock = ManualClock::new();
    let mut queue: VecDeque<Intent> = VecDeque::new();
    let mut next = 0;
    for _ in 0..frames {
        clock.advance(1.0 / 60.0);
        while next < events.len() && events[next].0 <= clock.now() {
            queue.extend(bindings.translate(events[next].1));
            next += 1;
        }
        sim.advance(clock.now(), &mut queue, picker);
        each_frame(sim);
        if !sim.running() {
            break;
        }
    }
}

#[test]
fn ball_bounces_off_player_head() {
    let config = Config::default();
    let (world, bindings) = bound_world(&config);
    let mut sim = Simulation::new(world);
    let mut bounced = false;

    replay(&mut sim, &bindings, &[], 60, &mut Fixed(0), |sim| {
        if sim.world.ball.vel.y > 0.0 {
            bounced = true;
        }
    });

    assert!(bounced, "ball never left the player's head");
    assert!(sim.world.ball.pos.y > sim.world.ball.r);
}

#[test]
fn ball_respawns_above_chosen_player() {
    let config = Config::default();
    let (mut world, bindings) = bound_world(&config);
    world.ball.pos = Vec2::new(40.0, 50.0);
    world.ball.vel = Vec2::new(0.0, -100.0);
    let mut sim = Simulation::new(world);
    let mut respawned = false;

    replay(&mut sim, &bindings, &[], 30, &mut Fixed(1), |sim| {
        let ball = &sim.world.ball;
        if ball.pos.x == sim.world.players[1].pos.x && ball.pos.y <= SPAWN_HEIGHT {
            respawned = true;
        }
    });

    assert!(respawned);
}

#[test]
fn players_stay_in_their_territories() {
    let config = Config::default();
    let (world, bindings) = bound_world(&config);
    let mut sim = Simulation::new(world);
    let events = [
        (0.1, KeyEvent::down(key('d'))),
        (0.1, KeyEvent::down(key('j'))),
        (0.3, KeyEvent::down(key('w'))),
        (1.5, KeyEvent::up(key('d'))),
        (1.5, KeyEvent::down(key('a'))),
        (2.0, KeyEvent::down(key('l'))),
        (2.0, KeyEvent::up(key('j'))),
    ];
    let mut rng = Pcg32::seed_from_u64(4);

    replay(&mut sim, &bindings, &events, 240, &mut rng, |sim| {
        for p in &sim.world.players {
            let t = sim.world.territories[p.territory];
            assert!(p.pos.x >= t.l + p.r && p.pos.x <= t.r - p.r);
            assert!(p.pos.y >= 0.0 || p.vel.y < 0.0);
        }
    });

    // Player 0 ran left into the wall side of its band, player 1 right
    assert_eq!(sim.world.players[0].pos.x, 80.0);
    assert_eq!(sim.world.players[1].pos.x, 560.0);
}

#[test]
fn quit_key_stops_the_match() {
    let config = Config::default();
    let (world, bindings) = bound_world(&config);
    let mut sim = Simulation::new(world);
    let events = [(0.5, KeyEvent::down(Key(config.quitkey)))];
    let mut frames = 0;

    replay(&mut sim, &bindings, &events, 600, &mut Fixed(0), |_| frames += 1);

    assert!(!sim.running());
    assert!(frames < 40);
}

#[test]
fn frames_track_the_simulation() {
    let config = Config::default();
    let (world, bindings) = bound_world(&config);
    let mut sim = Simulation::new(world);
    replay(&mut sim, &bindings, &[(0.0, KeyEvent::down(key('l')))], 10, &mut Fixed(0), |_| {});

    let frame = build_frame(&sim.world.snapshot(), &config);
    let json = serde_json::to_value(&frame).expect("frame serializes");
    let first = &json["commands"][0];
    assert_eq!(first["kind"], "sprite");
    assert_eq!(json["commands"].as_array().map(Vec::len), Some(6));
    // Player 1 moved right, so its sprite moved right too
    let sprite_x = json["commands"][1]["x"].as_f64().expect("sprite x");
    assert!(sprite_x > 480.0 - 100.0);
}
