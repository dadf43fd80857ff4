//! Sample games built on the shared engine.
//!
//! - `gobblet`: Gobblet Gobblers, stacking pieces with pool placement
//! - `breakthrough`: pawn race with diagonal captures and forced passes

pub mod breakthrough;
pub mod gobblet;

pub use breakthrough::Breakthrough;
pub use gobblet::Gobblet;

use crate::core::{EngineError, EngineResult};
use crate::rules::Rules;

/// Variant names accepted by [`create`].
pub const VARIANTS: [&str; 4] = ["gobblet", "breakthrough", "breakthrough-6", "breakthrough-5"];

/// Rules for a variant name.
///
/// ```
/// use rust_board::games;
/// use rust_board::rules::Rules;
///
/// let rules = games::create("breakthrough-6").unwrap();
/// assert_eq!(rules.variant(), "breakthrough-6");
/// assert!(games::create("chess").is_err());
/// ```
pub fn create(variant: &str) -> EngineResult<Box<dyn Rules>> {
    match variant.to_ascii_lowercase().as_str() {
        "gobblet" => Ok(Box::new(Gobblet::new())),
        "breakthrough" => Ok(Box::new(Breakthrough::standard())),
        "breakthrough-6" => Ok(Box::new(Breakthrough::new(6, 6))),
        "breakthrough-5" => Ok(Box::new(Breakthrough::new(5, 5))),
        _ => Err(EngineError::UnknownVariant(variant.to_string())),
    }
}
