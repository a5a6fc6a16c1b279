/// Upper bound (inclusive) of every gene trait.
pub const GENE_MAX_VALUE: u8 = 100;

/// Genes per creature in the reference configuration.
pub const DEFAULT_GENE_POOL_SIZE: usize = 6;

/// Non-player creatures in the reference configuration.
pub const DEFAULT_WORLD_CREATURE_COUNT: usize = 5;

/// Largest accepted gene pool size.
pub const MAX_GENE_POOL_SIZE: usize = 64;

/// Largest accepted non-player roster.
pub const MAX_WORLD_CREATURE_COUNT: usize = 256;

/// Energy every action costs before environmental adjustment.
pub const BASE_ACTION_COST: u32 = 1;

/// Floor applied to the adjusted action cost. Keeps strongly adapted creatures
/// from gaining energy through the cost term alone.
pub const MIN_ACTION_COST: u32 = 1;

/// Ambient temperature at which neither heat nor cold stress applies.
pub const NEUTRAL_TEMPERATURE: u8 = 50;

/// Unresisted stress points per point of temperature damage.
pub const TEMPERATURE_DAMAGE_STEP: u32 = 10;

/// Divisor applied to `light * light_sensitivity` to obtain energy production.
pub const ENERGY_PRODUCTION_DIVISOR: u32 = 2000;

/// Energy ceiling of a creature whose genes contribute nothing.
pub const ENERGY_CEILING_BASE: u32 = 50;

/// Flat energy gained by a successful eat.
pub const EAT_BASE_GAIN: u32 = 4;

/// Light-sensitivity points per extra point of eat gain.
pub const EAT_SENSITIVITY_STEP: u32 = 25;

/// Prime multiplier used to derive per-creature RNG streams from a base seed.
/// Chosen so streams for consecutive creature IDs have minimal overlap.
pub const RNG_DERIVATION_PRIME: u64 = 7919;

/// Mixed into the base seed for the world stream (environment draws and
/// breeding) so it never coincides with a creature's gene stream.
pub const WORLD_STREAM_SALT: u64 = 0x9E37_79B9_7F4A_7C15;
