use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_GENE_POOL_SIZE, DEFAULT_WORLD_CREATURE_COUNT, GENE_MAX_VALUE, MAX_GENE_POOL_SIZE,
    MAX_WORLD_CREATURE_COUNT,
};
use crate::genome::MutationRates;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Deterministic seed for gene pools, the environment and breeding.
    pub seed: u64,
    /// Number of non-player creatures in the roster.
    pub world_creature_count: usize,
    /// Genes per creature.
    pub gene_pool_size: usize,
    /// Fixed ambient temperature; drawn from the seed when absent.
    pub temperature: Option<u8>,
    /// Fixed ambient light; drawn from the seed when absent.
    pub light: Option<u8>,
    /// Per-trait point mutation probability for offspring genes.
    pub mutation_point_rate: f32,
    /// Magnitude bound for offspring point mutations.
    pub mutation_point_scale: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        let rates = MutationRates::default();
        Self {
            seed: 42,
            world_creature_count: DEFAULT_WORLD_CREATURE_COUNT,
            gene_pool_size: DEFAULT_GENE_POOL_SIZE,
            temperature: None,
            light: None,
            mutation_point_rate: rates.point_rate,
            mutation_point_scale: rates.point_scale,
        }
    }
}

macro_rules! define_sim_config_error {
    (
        $(
            $variant:ident $( { $($field:ident : $type:ty),* } )? => $fmt:literal $(, $arg:expr)*
        );* $(;)?
    ) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum SimConfigError {
            $(
                $variant $( { $($field : $type),* } )?,
            )*
        }

        impl std::fmt::Display for SimConfigError {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self {
                    $(
                        Self::$variant $( { $($field),* } )? => write!(f, $fmt $(, $arg)*),
                    )*
                }
            }
        }
    };
}

define_sim_config_error! {
    InvalidWorldCreatureCount => "world_creature_count must be greater than 0";
    TooManyWorldCreatures { max: usize, actual: usize } => "Too many world creatures: {} > max {}", actual, max;
    InvalidGenePoolSize => "gene_pool_size must be greater than 0";
    GenePoolTooLarge { max: usize, actual: usize } => "gene_pool_size ({actual}) exceeds supported maximum ({max})";
    InvalidTemperature { actual: u8 } => "temperature ({actual}) must be within [0,100]";
    InvalidLight { actual: u8 } => "light ({actual}) must be within [0,100]";
    InvalidMutationPointRate => "mutation_point_rate must be finite and within [0,1]";
    InvalidMutationPointScale => "mutation_point_scale must be within [0,100]";
}

impl std::error::Error for SimConfigError {}

impl SimConfig {
    pub fn validate(&self) -> Result<(), SimConfigError> {
        self.validate_population()?;
        self.validate_environment()?;
        self.validate_mutation()?;
        Ok(())
    }

    pub fn mutation_rates(&self) -> MutationRates {
        MutationRates {
            point_rate: self.mutation_point_rate,
            point_scale: self.mutation_point_scale,
        }
    }

    fn validate_population(&self) -> Result<(), SimConfigError> {
        if self.world_creature_count == 0 {
            return Err(SimConfigError::InvalidWorldCreatureCount);
        }
        if self.world_creature_count > MAX_WORLD_CREATURE_COUNT {
            return Err(SimConfigError::TooManyWorldCreatures {
                max: MAX_WORLD_CREATURE_COUNT,
                actual: self.world_creature_count,
            });
        }
        if self.gene_pool_size == 0 {
            return Err(SimConfigError::InvalidGenePoolSize);
        }
        if self.gene_pool_size > MAX_GENE_POOL_SIZE {
            return Err(SimConfigError::GenePoolTooLarge {
                max: MAX_GENE_POOL_SIZE,
                actual: self.gene_pool_size,
            });
        }
        Ok(())
    }

    fn validate_environment(&self) -> Result<(), SimConfigError> {
        if let Some(actual) = self.temperature.filter(|&t| t > GENE_MAX_VALUE) {
            return Err(SimConfigError::InvalidTemperature { actual });
        }
        if let Some(actual) = self.light.filter(|&l| l > GENE_MAX_VALUE) {
            return Err(SimConfigError::InvalidLight { actual });
        }
        Ok(())
    }

    fn validate_mutation(&self) -> Result<(), SimConfigError> {
        if !(self.mutation_point_rate.is_finite()
            && (0.0..=1.0).contains(&self.mutation_point_rate))
        {
            return Err(SimConfigError::InvalidMutationPointRate);
        }
        if self.mutation_point_scale > GENE_MAX_VALUE {
            return Err(SimConfigError::InvalidMutationPointScale);
        }
        Ok(())
    }
}
