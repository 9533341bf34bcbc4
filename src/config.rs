//! Game configuration
//!
//! Read at startup from a `key = value` text file layered over built-in
//! defaults. Ingestion never fails: a missing file means defaults, and
//! lines that don't parse are skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Default config file, relative to the working directory
pub const CONFIG_PATH: &str = "./config";

/// An RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Every recognised configuration key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    // === World ===
    pub screenwidth: u32,
    pub screenheight: u32,
    pub netheight: f32,
    /// Acceleration due to gravity (px/s²)
    pub adtg: f32,

    // === Player ===
    pub playerradius: f32,
    pub playerspeed: f32,
    pub jumpvel: f32,
    pub skywalk: bool,

    // === Ball ===
    pub ballradius: f32,
    pub elasticity: f32,

    // === Display ===
    pub font: String,
    pub fontsize: u32,
    pub colorfg: Color,
    pub colorbg: Color,
    /// Player sprite, 200x100 with its base point at (100, 90)
    pub porimg: String,

    // === Misc ===
    /// Physics updates per second
    pub physhz: f32,
    pub quitkey: u32,
    /// Player count
    pub dudes: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screenwidth: SCREEN_WIDTH,
            screenheight: SCREEN_HEIGHT,
            netheight: NET_HEIGHT,
            adtg: ADTG,

            playerradius: PLAYER_RADIUS,
            playerspeed: PLAYER_SPEED,
            jumpvel: JUMP_VEL,
            skywalk: SKYWALK,

            ballradius: BALL_RADIUS,
            elasticity: ELASTICITY,

            font: "crap/ter-132b.pcf.gz".to_string(),
            fontsize: 32,
            colorfg: Color::new(0x80, 0x80, 0x80),
            colorbg: Color::new(0xd0, 0xd0, 0xd0),
            porimg: "crap/slime.png".to_string(),

            physhz: PHYS_HZ,
            quitkey: QUIT_KEY,
            dudes: DUDES,
        }
    }
}

impl Config {
    /// Defaults with every line of `text` applied on top
    pub fn parse(text: &str) -> Self {
        let mut config = Self::default();
        config.apply(text);
        config
    }

    /// Load the config file at `path`, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(text) => {
                log::info!("Loading config file '{}'", path.display());
                Self::parse(&text)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Config file '{}' not found, using defaults", path.display());
                Self::default()
            }
            Err(e) => {
                log::warn!("Can't read config file '{}': {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Apply every parsable line of `text`
    pub fn apply(&mut self, text: &str) {
        for line in text.lines() {
            let Some((key, value)) = split_line(line) else {
                continue;
            };
            if self.set(key, value) {
                log::info!("{} = {}", key, value);
            } else {
                log::debug!("Skipping config line '{}'", line.trim_end());
            }
        }
    }

    /// Set one key, returning false for unknown keys or bad values
    pub fn set(&mut self, key: &str, value: &str) -> bool {
        fn put<T>(slot: &mut T, value: Option<T>) -> bool {
            match value {
                Some(v) => {
                    *slot = v;
                    true
                }
                None => false,
            }
        }

        match key {
            "screenwidth" => put(&mut self.screenwidth, parse_uint(value)),
            "screenheight" => put(&mut self.screenheight, parse_uint(value)),
            "netheight" => put(&mut self.netheight, parse_float(value)),
            "adtg" => put(&mut self.adtg, parse_float(value)),
            "playerradius" => put(&mut self.playerradius, parse_float(value)),
            "playerspeed" => put(&mut self.playerspeed, parse_float(value)),
            "jumpvel" => put(&mut self.jumpvel, parse_float(value)),
            "skywalk" => put(&mut self.skywalk, Some(parse_bool(value))),
            "ballradius" => put(&mut self.ballradius, parse_float(value)),
            "elasticity" => put(&mut self.elasticity, parse_float(value)),
            "font" => put(&mut self.font, Some(value.to_string())),
            "fontsize" => put(&mut self.fontsize, parse_uint(value)),
            "colorfg" => put(&mut self.colorfg, parse_color(value)),
            "colorbg" => put(&mut self.colorbg, parse_color(value)),
            "porimg" => put(&mut self.porimg, Some(value.to_string())),
            "physhz" => put(&mut self.physhz, parse_float(value).filter(|hz| *hz > 0.0)),
            "quitkey" => put(&mut self.quitkey, parse_uint(value)),
            "dudes" => put(&mut self.dudes, parse_uint(value)),
            _ => false,
        }
    }

    /// Effective configuration as pretty JSON
    pub fn to_json(&self) -> String {
        match serde_json::to_string_pretty(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Can't serialize config: {}", e);
                String::new()
            }
        }
    }
}

/// Split `key = value`, dropping `#` comments and surrounding blanks
fn split_line(line: &str) -> Option<(&str, &str)> {
    let line = line.split('#').next().unwrap_or("");
    let (key, value) = line.split_once('=')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() || key.contains(char::is_whitespace) {
        return None;
    }
    Some((key, value))
}

/// C `%i`: optional sign, then decimal, `0x` hex or leading-`0` octal
fn parse_int(value: &str) -> Option<i64> {
    let token = value.split_whitespace().next()?;
    let (neg, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    let n = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        i64::from_str_radix(hex, 16).ok()?
    } else if digits.len() > 1 && digits.starts_with('0') {
        i64::from_str_radix(&digits[1..], 8).ok()?
    } else {
        digits.parse().ok()?
    };
    Some(if neg { -n } else { n })
}

fn parse_uint<T: TryFrom<i64>>(value: &str) -> Option<T> {
    parse_int(value).and_then(|n| T::try_from(n).ok())
}

fn parse_float(value: &str) -> Option<f32> {
    value
        .split_whitespace()
        .next()?
        .parse::<f32>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Anything but `false` or `0` is true
fn parse_bool(value: &str) -> bool {
    !matches!(value, "false" | "0")
}

/// Three integers, e.g. `0x80 0x80 0x80`
fn parse_color(value: &str) -> Option<Color> {
    let mut parts = value.split_whitespace().map(parse_uint::<u8>);
    let r = parts.next()??;
    let g = parts.next()??;
    let b = parts.next()??;
    Some(Color::new(r, g, b))
}
