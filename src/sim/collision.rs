//! Collision detection and response
//!
//! Every obstacle is tested against the ball each tick. Only the deepest
//! contact is resolved, and only the ball's velocity changes.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Ball, Player, Wall, WallKind, World};
use super::vector::{polarize, unit};
use crate::consts::MAX_CONTACTS;

/// A single overlap between the ball and another object
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Contact {
    /// Penetration depth, 0 means no contact
    pub depth: f32,
    /// Direction from the ball into the other object (radians)
    pub normal: f32,
    /// Ball velocity at contact time
    pub bvel: Vec2,
    /// Other object velocity at contact time
    pub ovel: Vec2,
}

impl Contact {
    #[inline]
    pub fn is_hit(&self) -> bool {
        self.depth > 0.0
    }
}

/// Ball against a player, both treated as circles
pub fn player_contact(b: &Ball, p: &Player) -> Contact {
    let mindist = b.r + p.r;
    let dif = polarize(p.pos - b.pos);
    if dif.r < mindist {
        Contact {
            depth: mindist - dif.r,
            normal: dif.theta,
            bvel: b.vel,
            ovel: p.vel,
        }
    } else {
        Contact::default()
    }
}

/// Ball against a line or segment wall
pub fn wall_contact(b: &Ball, w: &Wall) -> Contact {
    let rel = b.pos - w.pos;
    let close = match w.kind {
        WallKind::Line { theta } => {
            let dir = unit(theta);
            dir * dir.dot(rel)
        }
        WallKind::Segment { end } => {
            let len_sq = end.length_squared();
            let t = if len_sq > 0.0 {
                (rel.dot(end) / len_sq).clamp(0.0, 1.0)
            } else {
                0.0
            };
            end * t
        }
    };
    let diff = polarize(close - rel);
    let depth = b.r - diff.r;
    if depth <= 0.0 {
        return Contact::default();
    }
    Contact {
        depth,
        normal: diff.theta,
        bvel: b.vel,
        ovel: Vec2::ZERO,
    }
}

/// Pick the contact with the largest depth, the earliest one on ties
pub fn deepest_contact(contacts: &[Contact]) -> Option<&Contact> {
    contacts
        .iter()
        .filter(|c| c.is_hit())
        .fold(None, |big: Option<&Contact>, c| match big {
            Some(b) if b.depth >= c.depth => Some(b),
            _ => Some(c),
        })
}

/// Velocity change applied to the ball for `contact`
///
/// The closing speed is taken as an absolute value, so the change always
/// points against the contact normal whichever way the ball was moving.
pub fn impulse(contact: &Contact, elasticity: f32) -> Vec2 {
    let n = unit(contact.normal);
    let closing = (contact.bvel - contact.ovel).dot(n);
    let dvelr = -(1.0 + elasticity) * closing.abs();
    n * dvelr
}

/// Gather every non-zero contact between the ball and the world's obstacles
pub fn gather_contacts(world: &World) -> Vec<Contact> {
    let b = &world.ball;
    let mut contacts = Vec::with_capacity(MAX_CONTACTS);
    let candidates = world
        .players
        .iter()
        .map(|p| player_contact(b, p))
        .chain(world.walls.iter().map(|w| wall_contact(b, w)))
        .filter(Contact::is_hit);

    for c in candidates {
        if contacts.len() == MAX_CONTACTS {
            log::debug!("Contact capacity {} reached, dropping the rest", MAX_CONTACTS);
            break;
        }
        contacts.push(c);
    }
    contacts
}

/// Collision resolver state carried across ticks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollisionEngine {
    /// Set on a tick that resolved a contact, cleared on the next one.
    /// While set, resolution is skipped.
    pub hit_last: bool,
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self { hit_last: true }
    }
}

impl CollisionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve the deepest contact against the ball, returning it if applied
    pub fn resolve(&mut self, world: &mut World) -> Option<Contact> {
        let contacts = gather_contacts(world);

        if self.hit_last {
            self.hit_last = false;
            return None;
        }

        let big = *deepest_contact(&contacts)?;
        self.hit_last = true;
        world.ball.vel += impulse(&big, world.elasticity);
        Some(big)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::sim::state::PlayerDefaults;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn ball(x: f32, y: f32) -> Ball {
        Ball::new(Vec2::new(x, y), 10.0)
    }

    fn contact(depth: f32) -> Contact {
        Contact {
            depth,
            ..Default::default()
        }
    }

    #[test]
    fn test_player_contact_overlap() {
        let p = Player::new(Vec2::new(100.0, 0.0), 0, &PlayerDefaults::default());
        let b = ball(100.0, 85.0);
        let c = player_contact(&b, &p);
        assert!((c.depth - 5.0).abs() < 1e-4);
        // Player is straight below the ball
        assert!((c.normal + FRAC_PI_2).abs() < 1e-5);
    }

    #[test]
    fn test_player_contact_miss() {
        let p = Player::new(Vec2::new(100.0, 0.0), 0, &PlayerDefaults::default());
        assert!(!player_contact(&ball(100.0, 95.0), &p).is_hit());
    }

    #[test]
    fn test_line_wall_blocks_both_sides() {
        let w = Wall::line(Vec2::ZERO, FRAC_PI_2);
        let right = wall_contact(&ball(4.0, 300.0), &w);
        let left = wall_contact(&ball(-4.0, -300.0), &w);
        assert!((right.depth - 6.0).abs() < 1e-3);
        assert!((left.depth - 6.0).abs() < 1e-3);
        assert!((right.normal.abs() - PI).abs() < 1e-4);
        assert!(left.normal.abs() < 1e-4);
    }

    #[test]
    fn test_segment_is_finite() {
        let seg = Wall::segment(Vec2::ZERO, Vec2::new(0.0, 100.0));
        let line = Wall::line(Vec2::ZERO, FRAC_PI_2);
        let b = ball(5.0, 150.0);
        assert_eq!(wall_contact(&b, &seg).depth, 0.0);
        assert!((wall_contact(&b, &line).depth - 5.0).abs() < 1e-3);

        // Beside the span it behaves like the line
        let b = ball(5.0, 50.0);
        assert!((wall_contact(&b, &seg).depth - 5.0).abs() < 1e-3);
    }

    #[test]
    fn test_segment_endpoint_cap() {
        let seg = Wall::segment(Vec2::ZERO, Vec2::new(0.0, 100.0));
        let b = ball(0.0, 106.0);
        let c = wall_contact(&b, &seg);
        assert!((c.depth - 4.0).abs() < 1e-3);
        assert!((c.normal + FRAC_PI_2).abs() < 1e-4);
    }

    #[test]
    fn test_degenerate_segment() {
        let seg = Wall::segment(Vec2::new(10.0, 10.0), Vec2::ZERO);
        let c = wall_contact(&ball(13.0, 14.0), &seg);
        assert!((c.depth - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_deepest_contact() {
        let contacts = [contact(1.0), contact(5.0), contact(3.0)];
        assert_eq!(deepest_contact(&contacts).map(|c| c.depth), Some(5.0));
        assert!(deepest_contact(&[]).is_none());
        assert!(deepest_contact(&[contact(0.0)]).is_none());
    }

    #[test]
    fn test_deepest_contact_tie_keeps_first() {
        let first = Contact {
            normal: 1.0,
            ..contact(4.0)
        };
        let second = Contact {
            normal: 2.0,
            ..contact(4.0)
        };
        assert_eq!(deepest_contact(&[first, second]).map(|c| c.normal), Some(1.0));
        assert_eq!(deepest_contact(&[second, first]).map(|c| c.normal), Some(2.0));
    }

    #[test]
    fn test_wedged_ball_resolves_first_wall() {
        let mut world = World::new(&Config::default());
        world.elasticity = 1.0;
        // Two walls 12 apart at the ball's height, equal overlap of 4 each
        world.walls = vec![
            Wall::line(Vec2::new(0.0, 300.0), FRAC_PI_2),
            Wall::line(Vec2::new(12.0, 300.0), FRAC_PI_2),
        ];
        world.ball.pos = Vec2::new(6.0, 300.0);
        world.ball.vel = Vec2::new(-100.0, 0.0);
        let mut engine = CollisionEngine { hit_last: false };

        let contacts = gather_contacts(&world);
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].depth, contacts[1].depth);

        let hit = engine.resolve(&mut world).expect("contact resolved");
        assert!((hit.normal.abs() - PI).abs() < 1e-4);
        assert!((world.ball.vel.x - 100.0).abs() < 1e-3);
        assert!(world.ball.vel.y.abs() < 1e-3);
    }

    #[test]
    fn test_elastic_bounce_off_vertical_wall() {
        let w = Wall::line(Vec2::ZERO, FRAC_PI_2);
        let mut b = ball(5.0, 100.0);
        b.vel = Vec2::new(-100.0, 0.0);
        let c = wall_contact(&b, &w);
        let v = b.vel + impulse(&c, 1.0);
        assert!((v.x - 100.0).abs() < 1e-3);
        assert!(v.y.abs() < 1e-3);
    }

    #[test]
    fn test_impulse_ignores_closing_sign() {
        // Ball already separating still gets pushed away
        let c = Contact {
            depth: 1.0,
            normal: PI,
            bvel: Vec2::new(50.0, 0.0),
            ovel: Vec2::ZERO,
        };
        let dv = impulse(&c, 0.5);
        assert!((dv.x - 75.0).abs() < 1e-3);
    }

    #[test]
    fn test_impulse_uses_relative_velocity() {
        let c = Contact {
            depth: 1.0,
            normal: -FRAC_PI_2,
            bvel: Vec2::new(0.0, -100.0),
            ovel: Vec2::new(0.0, 300.0),
        };
        let dv = impulse(&c, 0.0);
        assert!((dv.y - 400.0).abs() < 1e-2);
    }

    fn wedged_world() -> World {
        let mut world = World::new(&Config::default());
        world.elasticity = 1.0;
        world.ball.pos = Vec2::new(5.0, 300.0);
        world.ball.vel = Vec2::new(-100.0, 0.0);
        world
    }

    #[test]
    fn test_hit_last_latch_alternates() {
        let mut world = wedged_world();
        let mut engine = CollisionEngine::new();

        // Latch starts set: first tick only clears it
        assert!(engine.resolve(&mut world).is_none());
        assert_eq!(world.ball.vel.x, -100.0);

        let hit = engine.resolve(&mut world).expect("contact resolved");
        assert!((hit.depth - 5.0).abs() < 1e-3);
        assert!((world.ball.vel.x - 100.0).abs() < 1e-3);

        // Still overlapping, but the next tick is skipped
        assert!(engine.resolve(&mut world).is_none());
        assert!(!engine.hit_last);
        assert!(engine.resolve(&mut world).is_some());
    }

    #[test]
    fn test_latch_stays_clear_without_contacts() {
        let mut world = World::new(&Config::default());
        world.ball.pos = Vec2::new(160.0, 400.0);
        let mut engine = CollisionEngine::new();
        engine.resolve(&mut world);
        for _ in 0..3 {
            assert!(engine.resolve(&mut world).is_none());
            assert!(!engine.hit_last);
        }
    }

    #[test]
    fn test_deepest_contact_wins_and_player_untouched() {
        let mut world = World::new(&Config::default());
        world.elasticity = 0.0;
        // Overlaps player 0 by 10 and the left wall by 2
        world.ball.pos = Vec2::new(8.0, 300.0);
        world.players[0].pos = Vec2::new(8.0, 220.0);
        world.players[0].vel = Vec2::new(0.0, 0.0);
        world.ball.vel = Vec2::new(0.0, -100.0);
        let mut engine = CollisionEngine { hit_last: false };

        let hit = engine.resolve(&mut world).expect("contact resolved");
        assert!((hit.depth - 10.0).abs() < 1e-3);
        assert!((hit.normal + FRAC_PI_2).abs() < 1e-4);
        assert!(world.ball.vel.y.abs() < 1e-2);
        assert_eq!(world.players[0].vel, Vec2::ZERO);
    }
}
