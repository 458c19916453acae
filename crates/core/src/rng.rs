//! RNG module - injectable randomness for piece selection
//!
//! Every spawn draws one kind uniformly from the seven-piece catalog. The
//! source of randomness is a [`Randomizer`] owned by the session, so games can
//! be replayed from a seed and tests can script the exact sequence.

use crate::types::PieceKind;

/// Source of uniform random indices.
pub trait Randomizer: Send {
    /// Return a value in `0..bound`. `bound` is never zero.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Pick one piece kind uniformly.
    fn next_kind(&mut self) -> PieceKind {
        PieceKind::ALL[self.next_index(PieceKind::ALL.len())]
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales by the high bits; the low bits of an LCG cycle with short periods.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Current generator state (reseeding with it continues the sequence)
    pub fn state(&self) -> u32 {
        self.state
    }
}

impl Randomizer for SimpleRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_range(bound as u32) as usize
    }
}

/// Replays a fixed list of kinds, cycling when it runs out.
///
/// Used for deterministic drivers and tests.
#[derive(Debug, Clone)]
pub struct ScriptedRng {
    kinds: Vec<PieceKind>,
    pos: usize,
}

impl ScriptedRng {
    /// # Panics
    ///
    /// If `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "ScriptedRng needs at least one kind");
        Self { kinds, pos: 0 }
    }
}

impl Randomizer for ScriptedRng {
    fn next_index(&mut self, bound: usize) -> usize {
        self.next_kind() as usize % bound
    }

    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.pos % self.kinds.len()];
        self.pos += 1;
        kind
    }
}
