use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Create the world-level RNG (environment draws, breeding) for a seed.
pub fn create_world_rng(seed: u64) -> ChaCha12Rng {
    create_rng(seed ^ crate::constants::WORLD_STREAM_SALT)
}

/// Derive a sub-RNG for a specific creature, ensuring independent gene streams.
pub fn derive_creature_rng(base_seed: u64, creature_id: u64) -> ChaCha12Rng {
    ChaCha12Rng::seed_from_u64(
        base_seed.wrapping_add(creature_id.wrapping_mul(crate::constants::RNG_DERIVATION_PRIME)),
    )
}
