//! Board representation: cell graph, chips, locations, digest, and the
//! mutable `Board` with its pending-action stacks.

pub mod chips;
pub mod digest;
pub mod graph;
pub mod location;
pub mod pending;
pub mod phase;
pub mod state;

pub use chips::{ChipCatalog, ChipDef, ChipId};
pub use digest::{DigestRng, Digester, StackOrder, DIGEST_SEED};
pub use graph::{CellGraph, CellId, Direction, Geometry};
pub use location::Location;
pub use pending::{Capture, DropRecord, Pending, PickRecord};
pub use phase::Phase;
pub use state::{Board, BoardSnapshot, ChipStack, PoolSlot};
