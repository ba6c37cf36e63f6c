//! Deterministic randomness, one named stream per concern.
//!
//! Streams are seeded from a single master seed, so a run is reproducible
//! from its scenario seed alone and adding a new stream does not disturb
//! existing ones within a run.

use std::collections::HashMap;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub struct RngManager {
    master: ChaCha8Rng,
    streams: HashMap<String, ChaCha8Rng>,
}

impl RngManager {
    pub fn new(seed: u64) -> Self {
        Self {
            master: ChaCha8Rng::seed_from_u64(seed),
            streams: HashMap::new(),
        }
    }

    /// Returns the stream for `name`, creating and seeding it from the
    /// master generator on first use.
    pub fn stream(&mut self, name: &str) -> &mut ChaCha8Rng {
        let Self { master, streams } = self;
        streams
            .entry(name.to_string())
            .or_insert_with(|| ChaCha8Rng::seed_from_u64(master.next_u64()))
    }
}
