//! Run-scoped generator for outbound message random ids.

use rand::{rngs::StdRng, Rng, SeedableRng};

/// Draws 63-bit non-zero ids. One generator lives per run so ids attached to
/// distinct outbound messages within the run cannot collide across retries.
#[derive(Debug)]
pub(crate) struct RandomIds {
    rng: StdRng,
}

impl RandomIds {
    pub(crate) fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    #[cfg(test)]
    pub(crate) fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub(crate) fn next_id(&mut self) -> i64 {
        loop {
            let id = self.rng.random::<i64>() & i64::MAX;
            if id != 0 {
                return id;
            }
        }
    }
}
