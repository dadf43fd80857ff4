//! Addressable places that hold chip stacks.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{EngineError, EngineResult, PlayerId};

/// A board cell or a player's pool slot.
///
/// Text form: a cell is `<column letter> <row number>` with row 1 at the
/// bottom (`b 3`), a pool slot is `pool <player> <slot>` (`pool 1 0`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// 0-based column and row.
    Cell { col: u8, row: u8 },
    /// Slot of a player's pool.
    Pool { player: PlayerId, slot: u8 },
}

impl Location {
    #[must_use]
    pub const fn cell(col: u8, row: u8) -> Self {
        Location::Cell { col, row }
    }

    #[must_use]
    pub const fn pool(player: PlayerId, slot: u8) -> Self {
        Location::Pool { player, slot }
    }

    #[must_use]
    pub fn is_cell(&self) -> bool {
        matches!(self, Location::Cell { .. })
    }

    /// Read one location from a whitespace token stream.
    ///
    /// `text` is the whole input, used only for error messages.
    pub fn parse_tokens<'a, I>(tokens: &mut I, text: &str) -> EngineResult<Self>
    where
        I: Iterator<Item = &'a str>,
    {
        let err = |reason: &str| EngineError::Parse {
            text: text.to_string(),
            reason: reason.to_string(),
        };

        let first = tokens.next().ok_or_else(|| err("missing location"))?;
        if first == "pool" {
            let player = tokens
                .next()
                .and_then(|t| t.parse::<u8>().ok())
                .ok_or_else(|| err("pool needs a player number"))?;
            let slot = tokens
                .next()
                .and_then(|t| t.parse::<u8>().ok())
                .ok_or_else(|| err("pool needs a slot number"))?;
            return Ok(Location::pool(PlayerId::new(player), slot));
        }

        let mut chars = first.chars();
        let col = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_lowercase() => c as u8 - b'a',
            _ => return Err(err("column must be a single letter a-z")),
        };
        let row = tokens
            .next()
            .and_then(|t| t.parse::<u8>().ok())
            .filter(|r| *r >= 1)
            .ok_or_else(|| err("row must be a number from 1"))?;
        Ok(Location::cell(col, row - 1))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Cell { col, row } => write!(f, "{} {}", (b'a' + col) as char, row + 1),
            Location::Pool { player, slot } => write!(f, "pool {} {}", player.0, slot),
        }
    }
}
