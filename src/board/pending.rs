//! Scratch stacks for a move that is on the board but not yet accepted.
//!
//! Every pick pushes a `PickRecord`, every drop pushes a `DropRecord` that
//! also carries the captures it caused. Unwinding pops them in reverse, so a
//! cancelled gesture and an unapplied search move go through the same path.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::chips::ChipId;
use super::location::Location;

/// A chip lifted from `from`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PickRecord {
    pub from: Location,
    pub chip: ChipId,
}

/// A chip moved off the board as a side effect of a drop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Capture {
    pub chip: ChipId,
    pub from: Location,
    pub to: Location,
}

/// A drop onto `to` and the captures it made.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DropRecord {
    pub to: Location,
    pub captures: SmallVec<[Capture; 1]>,
}

/// Pending-action stacks of a board.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pending {
    /// Chip currently in hand.
    pub picked: Option<ChipId>,
    pub picks: SmallVec<[PickRecord; 2]>,
    pub drops: SmallVec<[DropRecord; 2]>,
    /// Captures made while carrying, attached to the next drop.
    pub staged: SmallVec<[Capture; 1]>,
}

impl Pending {
    /// True when no gesture is in progress.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.picked.is_none()
            && self.picks.is_empty()
            && self.drops.is_empty()
            && self.staged.is_empty()
    }

    /// Origin of the chip in hand, if any.
    #[must_use]
    pub fn picked_from(&self) -> Option<Location> {
        self.picked.and(self.picks.last().map(|p| p.from))
    }

    /// Destination of the most recent drop.
    #[must_use]
    pub fn last_drop(&self) -> Option<Location> {
        self.drops.last().map(|d| d.to)
    }

    /// Every chip held by captures on the pending stacks.
    pub fn captures(&self) -> impl Iterator<Item = &Capture> {
        self.drops
            .iter()
            .flat_map(|d| d.captures.iter())
            .chain(self.staged.iter())
    }
}
