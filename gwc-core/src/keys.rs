//! Key press allow-list.
//!
//! The press path only ever injects keys the target game actually polls
//! for (movement, confirm/cancel, enter).  Anything else is rejected with
//! [`GwcError::UnsupportedKey`] before it reaches the OS.

use std::fmt;
use std::str::FromStr;

use crate::errors::GwcError;

/// A key the press path is allowed to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Confirm.
    Z,
    /// Cancel.
    X,
    Up,
    Down,
    Left,
    Right,
    Enter,
}

impl Key {
    /// Every allowed key, in no particular order.
    pub const ALL: [Key; 7] = [
        Key::Z,
        Key::X,
        Key::Up,
        Key::Down,
        Key::Left,
        Key::Right,
        Key::Enter,
    ];

    /// Lowercase name, the same spelling `FromStr` accepts.
    pub fn name(self) -> &'static str {
        match self {
            Key::Z => "z",
            Key::X => "x",
            Key::Up => "up",
            Key::Down => "down",
            Key::Left => "left",
            Key::Right => "right",
            Key::Enter => "enter",
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Key {
    type Err = GwcError;

    /// Case-insensitive lookup against the allow-list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "z" => Ok(Key::Z),
            "x" => Ok(Key::X),
            "up" => Ok(Key::Up),
            "down" => Ok(Key::Down),
            "left" => Ok(Key::Left),
            "right" => Ok(Key::Right),
            "enter" => Ok(Key::Enter),
            _ => Err(GwcError::UnsupportedKey(s.to_string())),
        }
    }
}
