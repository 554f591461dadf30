// Copyright 2025 the Triescope Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic inputs shared by the Triescope benchmarks.

/// Small linear congruential generator, so runs are reproducible.
#[derive(Clone, Debug)]
pub struct Lcg(u64);

impl Lcg {
    /// Creates a generator from a seed.
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Next 32 random bits.
    pub fn next_u32(&mut self) -> u32 {
        // Numerical Recipes LCG parameters.
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.0 >> 32) as u32
    }

    /// Uniform-ish value in `0..upper_exclusive`.
    pub fn gen_range_usize(&mut self, upper_exclusive: usize) -> usize {
        if upper_exclusive == 0 {
            return 0;
        }
        (self.next_u32() as usize) % upper_exclusive
    }
}

/// `count` lowercase words of length `2..=max_len` over the first
/// `alphabet` letters. Small alphabets give deep, shared prefixes.
pub fn words(count: usize, max_len: usize, alphabet: u8, seed: u64) -> Vec<String> {
    let mut rng = Lcg::new(seed);
    (0..count)
        .map(|_| {
            let len = 2 + rng.gen_range_usize(max_len.saturating_sub(1));
            (0..len)
                .map(|_| char::from(b'a' + (rng.gen_range_usize(usize::from(alphabet)) as u8)))
                .collect()
        })
        .collect()
}
