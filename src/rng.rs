// Copyright (c) The Diem Core Contributors
// SPDX-License-Identifier: Apache-2.0

use rand::{rngs::StdRng, RngCore, SeedableRng};

/// The pseudo-random source shared by every element of one program build.
/// All decisions that are not forced by the input structure go through this
/// handle, so a fixed (input, seed) pair yields a fixed element tree.
#[derive(Debug)]
pub struct GeneratorRng {
    rng: StdRng,
}

impl GeneratorRng {
    /// Seed the handle from the structured input's seed field.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// The next raw draw.
    pub fn next(&mut self) -> u32 {
        self.rng.next_u32()
    }

    /// An even draw is heads.
    pub fn coin(&mut self) -> bool {
        self.next() % 2 == 0
    }

    /// A draw reduced into `0..n`. `n` must be non-zero.
    pub fn bounded(&mut self, n: u32) -> u32 {
        debug_assert!(n > 0, "bounded draw over an empty range");
        self.next() % n
    }
}
