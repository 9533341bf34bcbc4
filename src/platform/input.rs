//! Raw key events to simulation intents
//!
//! Keys are bound once before the match starts; afterwards every key event
//! is looked up in a small map instead of being matched per player.

use std::collections::HashMap;

use crate::sim::{Action, Edge, Intent, Key, PlayerKeys, World};

impl Key {
    /// Parse a key from text: a single character is its code point,
    /// anything else must be a decimal keycode
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(Key(c as u32)),
            (Some(_), Some(_)) => text.parse().ok().map(Key),
            _ => None,
        }
    }

    /// Printable name for prompts and logs
    pub fn name(&self) -> String {
        match char::from_u32(self.0) {
            Some(c) if c.is_ascii_graphic() => c.to_string(),
            _ => format!("#{}", self.0),
        }
    }
}

/// A key going down or up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub edge: Edge,
}

impl KeyEvent {
    pub fn down(key: Key) -> Self {
        Self {
            key,
            edge: Edge::Pressed,
        }
    }

    pub fn up(key: Key) -> Self {
        Self {
            key,
            edge: Edge::Released,
        }
    }
}

/// Lookup table from keys to every (player, action) bound to them
#[derive(Debug, Clone, Default)]
pub struct KeyBindings {
    map: HashMap<Key, Vec<(usize, Action)>>,
    quit: Key,
}

impl KeyBindings {
    /// Build the table from the keys stored on each player
    ///
    /// A key shared between players drives all of them. Within one player
    /// only the first of left/right/jump using the key is kept.
    pub fn from_world(world: &World, quit: Key) -> Self {
        let mut map: HashMap<Key, Vec<(usize, Action)>> = HashMap::new();
        for (i, p) in world.players.iter().enumerate() {
            let PlayerKeys { left, right, jump } = p.keys;
            for (key, action) in [(left, Action::Left), (right, Action::Right), (jump, Action::Jump)] {
                let bound = map.entry(key).or_default();
                if bound.iter().any(|&(player, _)| player == i) {
                    log::warn!("Player {} uses key {} twice", i + 1, key.name());
                    continue;
                }
                if let Some(&(other, _)) = bound.first() {
                    log::warn!("Key {} shared by players {} and {}", key.name(), other + 1, i + 1);
                }
                bound.push((i, action));
            }
        }
        Self { map, quit }
    }

    /// Translate one raw key event into intents, in roster order
    ///
    /// Player bindings take precedence over the quit key, which only acts
    /// on press. Unbound keys translate to nothing.
    pub fn translate(&self, event: KeyEvent) -> Vec<Intent> {
        if let Some(bound) = self.map.get(&event.key) {
            return bound
                .iter()
                .map(|&(player, action)| Intent::Press {
                    player,
                    action,
                    edge: event.edge,
                })
                .collect();
        }
        if event.key == self.quit && event.edge == Edge::Pressed {
            return vec![Intent::Quit];
        }
        if event.edge == Edge::Pressed {
            log::debug!("Unbound key {}", event.key.name());
        }
        Vec::new()
    }
}

/// Ask each player for their left, right and jump keys
///
/// `next_key` blocks until a key is pressed and returns `None` once the
/// source is exhausted, in which case binding stops and false is returned.
pub fn prompt_bindings(world: &mut World, mut next_key: impl FnMut() -> Option<Key>) -> bool {
    for (i, p) in world.players.iter_mut().enumerate() {
        let subject = format!("Player {}", i + 1);
        let mut ask = |object: &str| -> Option<Key> {
            log::info!("{} press {}", subject, object);
            let key = next_key()?;
            log::info!("{} {} is {}", subject, object, key.name());
            Some(key)
        };
        let (Some(left), Some(right), Some(jump)) = (ask("left"), ask("right"), ask("jump")) else {
            return false;
        };
        p.keys = PlayerKeys { left, right, jump };
    }
    true
}
