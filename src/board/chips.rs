//! Chip catalog: the canonical, read-only description of every piece kind.
//!
//! Boards hold `ChipId`s only. Two chips are "the same piece" exactly when
//! their ids are equal, so stacks of interchangeable pieces are stacks of
//! equal ids. A catalog is built once per game and shared by `Arc`.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Index into a [`ChipCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ChipId(pub u16);

impl ChipId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Static description of one chip kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipDef {
    pub id: ChipId,
    pub name: String,
    /// Seat that owns chips of this kind, `None` for neutral chips.
    pub owner: Option<PlayerId>,
    /// Game-defined strength or size.
    pub rank: u8,
}

/// Registry of chip kinds, indexed by `ChipId`.
///
/// ```
/// use rust_board::board::ChipCatalog;
/// use rust_board::core::PlayerId;
///
/// let mut catalog = ChipCatalog::new();
/// let pawn = catalog.register("white pawn", Some(PlayerId::new(0)), 1);
/// assert_eq!(catalog.get(pawn).name, "white pawn");
/// assert_eq!(catalog.owner(pawn), Some(PlayerId::new(0)));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChipCatalog {
    defs: Vec<ChipDef>,
}

impl ChipCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a chip kind and return its id. Ids are assigned densely.
    pub fn register(&mut self, name: impl Into<String>, owner: Option<PlayerId>, rank: u8) -> ChipId {
        let id = ChipId(self.defs.len() as u16);
        self.defs.push(ChipDef {
            id,
            name: name.into(),
            owner,
            rank,
        });
        id
    }

    /// Whether `id` was registered here.
    #[must_use]
    pub fn contains(&self, id: ChipId) -> bool {
        id.index() < self.defs.len()
    }

    /// Definition of a registered chip. Panics on an id from another catalog.
    #[must_use]
    pub fn get(&self, id: ChipId) -> &ChipDef {
        &self.defs[id.index()]
    }

    #[must_use]
    pub fn owner(&self, id: ChipId) -> Option<PlayerId> {
        self.get(id).owner
    }

    #[must_use]
    pub fn rank(&self, id: ChipId) -> u8 {
        self.get(id).rank
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChipDef> {
        self.defs.iter()
    }

    /// Find a chip kind by owner and rank.
    #[must_use]
    pub fn find(&self, owner: Option<PlayerId>, rank: u8) -> Option<ChipId> {
        self.defs
            .iter()
            .find(|d| d.owner == owner && d.rank == rank)
            .map(|d| d.id)
    }
}
