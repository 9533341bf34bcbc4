//! Per-entity kinematics
//!
//! Semi-implicit Euler: velocity is updated before position each step.

use glam::Vec2;

use super::state::{Ball, Player, Territory};

/// Advance one player by `dt`
pub fn move_player(p: &mut Player, territory: &Territory, adtg: f32, dt: f32) {
    if p.pos.y < 0.0 {
        p.pos.y = 0.0;
        p.vel.y = 0.0;
    }

    // Horizontal control sets velocity directly, no inertia
    if p.grounded() || p.skywalk {
        let mut dir = 0.0;
        if p.controls.right {
            dir += 1.0;
        }
        if p.controls.left {
            dir -= 1.0;
        }
        p.vel.x = dir * p.speed;
    }

    if p.grounded() {
        // Held jump re-triggers every grounded tick
        if p.controls.jump {
            p.vel.y = p.jumpvel;
        }
    } else {
        p.vel.y -= adtg * dt;
    }

    p.pos += p.vel * dt;

    let x = territory.clamp(p.pos.x, p.r);
    if x != p.pos.x {
        p.pos.x = x;
        p.vel.x = 0.0;
    }
}

/// Advance the ball in free flight by `dt`
pub fn move_ball(b: &mut Ball, adtg: f32, dt: f32) {
    b.pos += b.vel * dt;
    b.vel += Vec2::new(0.0, -adtg) * dt;
}
