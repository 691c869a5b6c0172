//! Deterministic seed schedule.
//!
//! A master seed expands into per-(advertiser, period) sub-seeds via BLAKE3
//! hashing. Derivation is hash-based rather than order-dependent, so
//! simulating advertisers in parallel produces identical conversion draws
//! regardless of thread scheduling.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Deterministic seed schedule for conversion sampling.
#[derive(Debug, Clone)]
pub struct SeedSchedule {
    master_seed: u64,
}

impl SeedSchedule {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Derive a deterministic sub-seed for a specific (advertiser, period).
    ///
    /// Independent of derivation order: deriving advertiser 1 then 2
    /// produces the same seeds as deriving them in reverse.
    pub fn sub_seed(&self, advertiser: u32, period: u32) -> u64 {
        let mut hasher = blake3::Hasher::new();
        hasher.update(&self.master_seed.to_le_bytes());
        hasher.update(&advertiser.to_le_bytes());
        hasher.update(&period.to_le_bytes());
        let hash = hasher.finalize();
        u64::from_le_bytes(hash.as_bytes()[..8].try_into().unwrap())
    }

    /// Create a seeded StdRng for one advertiser's simulation.
    pub fn rng_for(&self, advertiser: u32, period: u32) -> StdRng {
        StdRng::seed_from_u64(self.sub_seed(advertiser, period))
    }
}
