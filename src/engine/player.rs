//! Player identity: a single lowercase letter assigned by player index.
//!
//! Up to 20 players (`a..t`) are supported; `a..z` would technically fit
//! 26, but the range beyond index 19 is untested, so this crate rejects
//! `numPlayers > 20` at config validation time.

use serde::{Deserialize, Serialize};

pub const MAX_PLAYERS: usize = 20;

/// A player's ordinal identity, `0` through `19`, displayed as `a` through `t`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub fn from_index(index: usize) -> PlayerId {
        debug_assert!(index < MAX_PLAYERS);
        PlayerId(index as u8)
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Parses a single lowercase letter `a..t` into a `PlayerId`.
    pub fn from_char(c: char) -> Option<PlayerId> {
        if c.is_ascii_lowercase() {
            let index = (c as u8 - b'a') as usize;
            if index < MAX_PLAYERS {
                return Some(PlayerId(index as u8));
            }
        }
        None
    }

    pub fn to_char(&self) -> char {
        (b'a' + self.0) as char
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// The marker used for an unclaimed square; always paired with 0 units.
pub const NEUTRAL_MARKER: char = '.';

/// A square's owner: either a specific player, or `Neutral`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Owner {
    Neutral,
    Player(PlayerId),
}

impl Owner {
    pub fn to_char(&self) -> char {
        match self {
            Owner::Neutral => NEUTRAL_MARKER,
            Owner::Player(p) => p.to_char(),
        }
    }

    pub fn from_char(c: char) -> Option<Owner> {
        if c == NEUTRAL_MARKER {
            Some(Owner::Neutral)
        } else {
            PlayerId::from_char(c).map(Owner::Player)
        }
    }

    pub fn is_player(&self, p: PlayerId) -> bool {
        matches!(self, Owner::Player(owner) if *owner == p)
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}
