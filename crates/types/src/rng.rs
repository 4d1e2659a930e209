//! Deterministic RNG shared by both engines.
//!
//! A small LCG is all the games need: uniform apple placement for Snake and
//! uniform shape draws for Tetris. Seeding is the caller's business, which
//! keeps every engine test reproducible.

/// Simple LCG (Linear Congruential Generator) using the Numerical Recipes
/// constants.
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed. A zero seed is bumped to 1 so
    /// the generator never sticks at zero.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`. `max` must be non-zero.
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }
}
