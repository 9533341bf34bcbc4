//! Draw command generation
//!
//! Simulation space has its origin bottom-left with y up. Screen space has
//! its origin top-left with y down, so `screen_y = height - world_y`.

use glam::Vec2;
use serde::Serialize;

use crate::config::{Color, Config};
use crate::consts::{SPRITE_ANCHOR_X, SPRITE_ANCHOR_Y};
use crate::sim::{Wall, WallKind, WorldSnapshot};

/// One primitive, in screen coordinates
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DrawCommand {
    /// Player sprite, top-left corner
    Sprite { x: f32, y: f32 },
    /// Filled circle
    Circle { x: f32, y: f32, r: f32 },
    Line { from: [f32; 2], to: [f32; 2] },
}

/// Everything needed to draw one frame
#[derive(Debug, Clone, Serialize)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub background: Color,
    pub foreground: Color,
    pub sprite: String,
    pub commands: Vec<DrawCommand>,
}

/// Project a simulation point into screen space
#[inline]
pub fn to_screen(p: Vec2, height: f32) -> Vec2 {
    Vec2::new(p.x, height - p.y)
}

/// Clip the line through `origin` along `dir` to the box `[0, size]`
///
/// Liang-Barsky with an unbounded parameter range. Returns the two
/// endpoints of the visible chord, or `None` if the line misses the box.
pub fn clip_line(origin: Vec2, dir: Vec2, size: Vec2) -> Option<(Vec2, Vec2)> {
    let mut t0 = f32::NEG_INFINITY;
    let mut t1 = f32::INFINITY;
    let checks = [
        (-dir.x, origin.x),
        (dir.x, size.x - origin.x),
        (-dir.y, origin.y),
        (dir.y, size.y - origin.y),
    ];
    for (p, q) in checks {
        // Parallel to this edge
        if p.abs() < 1e-6 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
    }
    if t0 > t1 || !t0.is_finite() || !t1.is_finite() {
        return None;
    }
    Some((origin + dir * t0, origin + dir * t1))
}

fn wall_line(wall: &Wall, size: Vec2) -> Option<(Vec2, Vec2)> {
    match wall.kind {
        WallKind::Line { theta } => clip_line(wall.pos, crate::unit(theta), size),
        WallKind::Segment { end } => Some((wall.pos, wall.pos + end)),
    }
}

/// Build the draw list for a snapshot
///
/// Players first, then the ball, then walls.
pub fn build_frame(snapshot: &WorldSnapshot<'_>, config: &Config) -> Frame {
    let size = Vec2::new(config.screenwidth as f32, config.screenheight as f32);
    let h = size.y;
    let mut commands = Vec::with_capacity(snapshot.players.len() + 1 + snapshot.walls.len());

    for p in snapshot.players {
        commands.push(DrawCommand::Sprite {
            x: p.pos.x - SPRITE_ANCHOR_X,
            y: h - (p.pos.y + SPRITE_ANCHOR_Y),
        });
    }

    let ball = to_screen(snapshot.ball.pos, h);
    commands.push(DrawCommand::Circle {
        x: ball.x,
        y: ball.y,
        r: snapshot.ball.r,
    });

    for wall in snapshot.walls {
        if let Some((a, b)) = wall_line(wall, size) {
            let (a, b) = (to_screen(a, h), to_screen(b, h));
            commands.push(DrawCommand::Line {
                from: a.to_array(),
                to: b.to_array(),
            });
        }
    }

    Frame {
        width: config.screenwidth,
        height: config.screenheight,
        background: config.colorbg,
        foreground: config.colorfg,
        sprite: config.porimg.clone(),
        commands,
    }
}
