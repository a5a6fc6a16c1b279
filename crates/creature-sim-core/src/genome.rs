use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::GENE_MAX_VALUE;
use crate::invariant::InvariantViolation;

/// Selects one of the four gene traits for aggregate queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trait {
    HeatResistance,
    ColdResistance,
    LightSensitivity,
    MaxEnergyContribution,
}

impl Trait {
    pub const ALL: [Trait; 4] = [
        Trait::HeatResistance,
        Trait::ColdResistance,
        Trait::LightSensitivity,
        Trait::MaxEnergyContribution,
    ];
}

/// One immutable genetic unit. Every trait lies in `0..=GENE_MAX_VALUE`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GeneTraits")]
pub struct Gene {
    heat_resistance: u8,
    cold_resistance: u8,
    light_sensitivity: u8,
    max_energy_contribution: u8,
}

/// Wire form of [`Gene`]; deserialized values are clamped through `Gene::new`.
#[derive(Deserialize)]
struct GeneTraits {
    heat_resistance: u8,
    cold_resistance: u8,
    light_sensitivity: u8,
    max_energy_contribution: u8,
}

impl From<GeneTraits> for Gene {
    fn from(t: GeneTraits) -> Self {
        Gene::new(
            t.heat_resistance,
            t.cold_resistance,
            t.light_sensitivity,
            t.max_energy_contribution,
        )
    }
}

impl Gene {
    /// Build a gene from explicit traits, clamping each to the valid range.
    pub fn new(
        heat_resistance: u8,
        cold_resistance: u8,
        light_sensitivity: u8,
        max_energy_contribution: u8,
    ) -> Self {
        Self {
            heat_resistance: heat_resistance.min(GENE_MAX_VALUE),
            cold_resistance: cold_resistance.min(GENE_MAX_VALUE),
            light_sensitivity: light_sensitivity.min(GENE_MAX_VALUE),
            max_energy_contribution: max_energy_contribution.min(GENE_MAX_VALUE),
        }
    }

    /// Draw every trait independently and uniformly from `0..=GENE_MAX_VALUE`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            heat_resistance: rng.random_range(0..=GENE_MAX_VALUE),
            cold_resistance: rng.random_range(0..=GENE_MAX_VALUE),
            light_sensitivity: rng.random_range(0..=GENE_MAX_VALUE),
            max_energy_contribution: rng.random_range(0..=GENE_MAX_VALUE),
        }
    }

    pub fn heat_resistance(&self) -> u8 {
        self.heat_resistance
    }

    pub fn cold_resistance(&self) -> u8 {
        self.cold_resistance
    }

    pub fn light_sensitivity(&self) -> u8 {
        self.light_sensitivity
    }

    pub fn max_energy_contribution(&self) -> u8 {
        self.max_energy_contribution
    }

    pub fn get(&self, t: Trait) -> u8 {
        match t {
            Trait::HeatResistance => self.heat_resistance,
            Trait::ColdResistance => self.cold_resistance,
            Trait::LightSensitivity => self.light_sensitivity,
            Trait::MaxEnergyContribution => self.max_energy_contribution,
        }
    }

    /// Trait values in `Trait::ALL` order, for bar-style display.
    pub fn traits(&self) -> [u8; 4] {
        Trait::ALL.map(|t| self.get(t))
    }

    /// Return a copy with per-trait point mutations applied.
    pub fn mutated<R: Rng + ?Sized>(&self, rng: &mut R, rates: &MutationRates) -> Self {
        let [heat, cold, light, energy] = self.traits().map(|v| {
            if rng.random::<f32>() < rates.point_rate {
                let scale = i16::from(rates.point_scale);
                let delta = rng.random_range(-scale..=scale);
                (i16::from(v) + delta).clamp(0, i16::from(GENE_MAX_VALUE)) as u8
            } else {
                v
            }
        });
        Self::new(heat, cold, light, energy)
    }
}

/// Point-mutation parameters applied to offspring genes.
#[derive(Clone, Copy, Debug)]
pub struct MutationRates {
    pub point_rate: f32,
    pub point_scale: u8,
}

impl Default for MutationRates {
    fn default() -> Self {
        Self {
            point_rate: 0.05,
            point_scale: 10,
        }
    }
}

/// The ordered, fixed-size set of genes owned by one creature.
///
/// Not deserializable: the expected size is only known to the owning world,
/// so pools are rebuilt through [`GenePool::from_genes`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GenePool {
    genes: Vec<Gene>,
}

impl GenePool {
    /// Build a pool of `size` independently drawn genes.
    pub fn random_pool<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Self {
        Self {
            genes: (0..size).map(|_| Gene::random(rng)).collect(),
        }
    }

    /// Wrap explicit genes, checking the pool has the expected size.
    pub fn from_genes(genes: Vec<Gene>, expected: usize) -> Result<Self, InvariantViolation> {
        if genes.len() != expected {
            return Err(InvariantViolation::GenePoolSize {
                expected,
                actual: genes.len(),
            });
        }
        Ok(Self { genes })
    }

    /// Breed a child pool: each position takes one parent's gene at random,
    /// then mutates it.
    pub fn crossover<R: Rng + ?Sized>(
        a: &GenePool,
        b: &GenePool,
        rng: &mut R,
        rates: &MutationRates,
    ) -> Result<Self, InvariantViolation> {
        if a.len() != b.len() {
            return Err(InvariantViolation::GenePoolSize {
                expected: a.len(),
                actual: b.len(),
            });
        }
        let genes = a
            .genes
            .iter()
            .zip(&b.genes)
            .map(|(ga, gb)| {
                let picked = if rng.random::<bool>() { ga } else { gb };
                picked.mutated(rng, rates)
            })
            .collect();
        Ok(Self { genes })
    }

    pub fn genes(&self) -> &[Gene] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Integer mean of a trait across all genes; 0 for an empty pool.
    pub fn mean(&self, t: Trait) -> u32 {
        if self.genes.is_empty() {
            return 0;
        }
        let sum: u32 = self.genes.iter().map(|g| u32::from(g.get(t))).sum();
        sum / self.genes.len() as u32
    }

    pub fn max(&self, t: Trait) -> u8 {
        self.genes.iter().map(|g| g.get(t)).max().unwrap_or(0)
    }

    pub fn min(&self, t: Trait) -> u8 {
        self.genes.iter().map(|g| g.get(t)).min().unwrap_or(0)
    }
}
