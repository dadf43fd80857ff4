//! Move descriptors and their text form.
//!
//! A `Move` is a small immutable record: what kind of transition, who makes
//! it, and up to two locations. It carries no captured-piece information;
//! everything needed to invert it is recorded at apply time.
//!
//! The text form is a flat whitespace-separated token sequence used by the
//! replay and network channels:
//!
//! ```text
//! move 0 b 1 b 2        piece from b1 to b2
//! move 1 pool 1 2 c 3   piece from player 1's pool slot 2 to c3
//! pick 0 a 2            lift the top of a2
//! drop 0 a 3            place the carried chip on a3
//! done 0 | pass 1 | resign 0 | edit 0 | start 1
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::board::Location;
use crate::core::{EngineError, EngineResult, PlayerId};

/// Kind of transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveOp {
    /// Leave puzzle mode with the given player to move.
    Start,
    /// Enter puzzle mode.
    Edit,
    /// Lift a chip (gesture).
    Pick,
    /// Place the carried chip (gesture).
    Drop,
    /// Complete piece move from one location to another.
    Move,
    Pass,
    /// Confirm the move on the board.
    Done,
    /// Resign, or withdraw a pending resignation.
    Resign,
}

impl MoveOp {
    pub const ALL: [MoveOp; 8] = [
        MoveOp::Start,
        MoveOp::Edit,
        MoveOp::Pick,
        MoveOp::Drop,
        MoveOp::Move,
        MoveOp::Pass,
        MoveOp::Done,
        MoveOp::Resign,
    ];

    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            MoveOp::Start => "start",
            MoveOp::Edit => "edit",
            MoveOp::Pick => "pick",
            MoveOp::Drop => "drop",
            MoveOp::Move => "move",
            MoveOp::Pass => "pass",
            MoveOp::Done => "done",
            MoveOp::Resign => "resign",
        }
    }

    /// Session controls rather than moves; never generated for search.
    #[must_use]
    pub const fn is_control(self) -> bool {
        matches!(self, MoveOp::Start | MoveOp::Edit | MoveOp::Resign)
    }
}

impl fmt::Display for MoveOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// One transition of a board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub op: MoveOp,
    pub player: PlayerId,
    /// Source of `move` and `pick`.
    pub from: Option<Location>,
    /// Destination of `move` and `drop`.
    pub to: Option<Location>,
}

impl Move {
    const fn bare(op: MoveOp, player: PlayerId) -> Self {
        Self {
            op,
            player,
            from: None,
            to: None,
        }
    }

    #[must_use]
    pub const fn start(player: PlayerId) -> Self {
        Self::bare(MoveOp::Start, player)
    }

    #[must_use]
    pub const fn edit(player: PlayerId) -> Self {
        Self::bare(MoveOp::Edit, player)
    }

    #[must_use]
    pub const fn pass(player: PlayerId) -> Self {
        Self::bare(MoveOp::Pass, player)
    }

    #[must_use]
    pub const fn done(player: PlayerId) -> Self {
        Self::bare(MoveOp::Done, player)
    }

    #[must_use]
    pub const fn resign(player: PlayerId) -> Self {
        Self::bare(MoveOp::Resign, player)
    }

    #[must_use]
    pub const fn pick(player: PlayerId, from: Location) -> Self {
        Self {
            op: MoveOp::Pick,
            player,
            from: Some(from),
            to: None,
        }
    }

    #[must_use]
    pub const fn drop(player: PlayerId, to: Location) -> Self {
        Self {
            op: MoveOp::Drop,
            player,
            from: None,
            to: Some(to),
        }
    }

    /// A complete move of the top chip of `from` onto `to`.
    #[must_use]
    pub const fn step(player: PlayerId, from: Location, to: Location) -> Self {
        Self {
            op: MoveOp::Move,
            player,
            from: Some(from),
            to: Some(to),
        }
    }

    /// Source and destination, for the rendering side channel.
    #[must_use]
    pub fn animation(&self) -> Option<(Location, Location)> {
        self.from.zip(self.to)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.op, self.player.0)?;
        if let Some(from) = self.from {
            write!(f, " {from}")?;
        }
        if let Some(to) = self.to {
            write!(f, " {to}")?;
        }
        Ok(())
    }
}

impl FromStr for Move {
    type Err = EngineError;

    fn from_str(text: &str) -> EngineResult<Self> {
        let err = |reason: &str| EngineError::Parse {
            text: text.to_string(),
            reason: reason.to_string(),
        };
        let mut tokens = text.split_whitespace();

        let keyword = tokens.next().ok_or_else(|| err("empty move"))?;
        let op = MoveOp::ALL
            .into_iter()
            .find(|op| op.keyword().eq_ignore_ascii_case(keyword))
            .ok_or_else(|| err("unknown move kind"))?;
        let player = tokens
            .next()
            .and_then(|t| t.parse::<u8>().ok())
            .map(PlayerId::new)
            .ok_or_else(|| err("missing player number"))?;

        let mv = match op {
            MoveOp::Pick => Move::pick(player, Location::parse_tokens(&mut tokens, text)?),
            MoveOp::Drop => Move::drop(player, Location::parse_tokens(&mut tokens, text)?),
            MoveOp::Move => {
                let from = Location::parse_tokens(&mut tokens, text)?;
                let to = Location::parse_tokens(&mut tokens, text)?;
                Move::step(player, from, to)
            }
            _ => Move::bare(op, player),
        };

        if tokens.next().is_some() {
            return Err(err("trailing tokens"));
        }
        Ok(mv)
    }
}
