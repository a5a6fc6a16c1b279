use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::ENERGY_CEILING_BASE;
use crate::genome::{GenePool, Trait};
use crate::invariant::InvariantViolation;

/// Named vital resource of a creature.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stat {
    Energy,
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stat::Energy => write!(f, "energy"),
        }
    }
}

/// A bounded counter with a floor of zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Bounded {
    value: u32,
    ceiling: u32,
}

impl Bounded {
    fn full(ceiling: u32) -> Self {
        Self {
            value: ceiling,
            ceiling,
        }
    }
}

/// Mutable resources of one creature. Values only move through clamped
/// `add`/`subtract`, so they stay within `[0, ceiling]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VitalStats {
    energy: Bounded,
}

impl VitalStats {
    /// Stats at full capacity, with ceilings derived from the gene pool.
    pub fn for_gene_pool(pool: &GenePool) -> Self {
        Self {
            energy: Bounded::full(energy_ceiling(pool)),
        }
    }

    pub fn value(&self, stat: Stat) -> u32 {
        self.slot(stat).value
    }

    pub fn ceiling(&self, stat: Stat) -> u32 {
        self.slot(stat).ceiling
    }

    /// Decrease a stat, saturating at zero.
    pub fn subtract(&mut self, stat: Stat, amount: u32) {
        let slot = self.slot_mut(stat);
        slot.value = slot.value.saturating_sub(amount);
    }

    /// Increase a stat, saturating at its ceiling.
    pub fn add(&mut self, stat: Stat, amount: u32) {
        let slot = self.slot_mut(stat);
        slot.value = slot.value.saturating_add(amount).min(slot.ceiling);
    }

    pub fn is_depleted(&self, stat: Stat) -> bool {
        self.value(stat) == 0
    }

    pub fn is_full(&self, stat: Stat) -> bool {
        let slot = self.slot(stat);
        slot.value >= slot.ceiling
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        for (stat, slot) in [(Stat::Energy, &self.energy)] {
            if slot.value > slot.ceiling {
                return Err(InvariantViolation::StatOutOfRange {
                    stat,
                    value: slot.value,
                    ceiling: slot.ceiling,
                });
            }
        }
        Ok(())
    }

    fn slot(&self, stat: Stat) -> &Bounded {
        match stat {
            Stat::Energy => &self.energy,
        }
    }

    fn slot_mut(&mut self, stat: Stat) -> &mut Bounded {
        match stat {
            Stat::Energy => &mut self.energy,
        }
    }
}

/// Energy capacity granted by a gene pool: a fixed base plus half the mean
/// max-energy contribution.
pub fn energy_ceiling(pool: &GenePool) -> u32 {
    ENERGY_CEILING_BASE + pool.mean(Trait::MaxEnergyContribution) / 2
}
