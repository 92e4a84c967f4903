//! Random source construction and uniform pool selection

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seed derived from the current wall-clock time
///
/// Falls back to 0 if the clock reads before the Unix epoch.
pub fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos() as u64)
}

/// Deterministic generator for `Some(seed)`, time-seeded otherwise
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    StdRng::seed_from_u64(seed.unwrap_or_else(time_seed))
}

/// Uniformly random index into a pool of `len` items, `None` when empty
pub fn choose_index<R: Rng>(rng: &mut R, len: usize) -> Option<usize> {
    (len > 0).then(|| rng.random_range(0..len))
}
