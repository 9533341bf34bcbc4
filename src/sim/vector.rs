//! 2D point helpers on top of `glam::Vec2`
//!
//! Sum, difference, scaling and dot product are the plain `Vec2` operators.
//! This module adds the polar side: magnitude, azimuth and conversion
//! between cartesian and polar form.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A point in polar form
///
/// `r` should be non-negative when given the choice. `theta` is in radians,
/// any range (values produced by [`polarize`] lie in (-π, π]).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Polar {
    pub r: f32,
    pub theta: f32,
}

impl Polar {
    pub const fn new(r: f32, theta: f32) -> Self {
        Self { r, theta }
    }
}

/// Euclidean length, 0 for the zero vector
#[inline]
pub fn magnitude(v: Vec2) -> f32 {
    (v.x * v.x + v.y * v.y).sqrt()
}

/// Angle of `v` from the +x axis, `atan2(y, x)`
///
/// The zero vector yields `atan2(0, 0)`, which is 0.
#[inline]
pub fn azimuth(v: Vec2) -> f32 {
    v.y.atan2(v.x)
}

/// Convert cartesian to polar
#[inline]
pub fn polarize(v: Vec2) -> Polar {
    Polar::new(magnitude(v), azimuth(v))
}

/// Convert polar to cartesian
#[inline]
pub fn cartesianize(p: Polar) -> Vec2 {
    Vec2::new(p.r * p.theta.cos(), p.r * p.theta.sin())
}

/// Unit vector pointing along `theta`
#[inline]
pub fn unit(theta: f32) -> Vec2 {
    cartesianize(Polar::new(1.0, theta))
}
