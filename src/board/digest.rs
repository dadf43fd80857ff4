//! State identity hashing.
//!
//! A digest is the XOR of one term per board location, drawn from a single
//! pseudo-random sequence that restarts from [`DIGEST_SEED`] on every call.
//! Exactly one value is consumed per location whatever the location holds,
//! so two boards of the same shape always consume the sequence identically
//! and only their contents differ.
//!
//! Changing the seed, the fold order in `Board::digest`, or the term
//! functions below changes every digest ever recorded (repetition tables,
//! stored game fingerprints). Treat any such edit as a breaking change.

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::chips::ChipId;

/// Seed of the digest sequence. Part of the stored-digest format.
pub const DIGEST_SEED: u64 = 64 * 1000;

/// How a stack contributes to the digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackOrder {
    /// Order of chips matters (board cells, stacked pieces).
    Ordered,
    /// Only the multiset of chips matters (interchangeable supply piles).
    Unordered,
}

/// Seedable generator producing the fixed digest sequence.
#[derive(Clone, Debug)]
pub struct DigestRng {
    inner: ChaCha8Rng,
}

impl DigestRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Next value of the sequence.
    pub fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }
}

/// SplitMix64 finalizer.
#[inline]
#[must_use]
pub fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[inline]
fn chip_word(chip: ChipId) -> u64 {
    chip.0 as u64 + 1
}

/// Content hash of a stack; 0 for an empty stack.
#[must_use]
pub fn stack_hash(chips: &[ChipId], order: StackOrder) -> u64 {
    if chips.is_empty() {
        return 0;
    }
    match order {
        StackOrder::Ordered => chips
            .iter()
            .fold(0x9E37_79B9_7F4A_7C15, |h, &c| mix64(h ^ chip_word(c))),
        // Wrapping sum is commutative, so any permutation hashes the same.
        StackOrder::Unordered => chips
            .iter()
            .fold(0u64, |h, &c| h.wrapping_add(mix64(chip_word(c)))),
    }
}

/// Running digest: draws one key per folded item.
#[derive(Clone, Debug)]
pub struct Digester {
    rng: DigestRng,
    value: u64,
}

impl Digester {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DigestRng::new(seed),
            value: 0,
        }
    }

    /// Fold a raw content word. Zero content contributes nothing but still
    /// consumes its key.
    pub fn word(&mut self, content: u64) {
        let key = self.rng.next_u64();
        if content != 0 {
            self.value ^= mix64(key ^ content);
        }
    }

    /// Fold a chip stack.
    pub fn stack(&mut self, chips: &[ChipId], order: StackOrder) {
        self.word(stack_hash(chips, order));
    }

    /// Fold an optional chip (the chip in hand).
    pub fn chip(&mut self, chip: Option<ChipId>) {
        self.word(chip.map_or(0, chip_word));
    }

    #[must_use]
    pub fn finish(self) -> u64 {
        self.value
    }
}
