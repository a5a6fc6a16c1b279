use std::fmt;

use serde::{Deserialize, Serialize};

use crate::action::ActionSet;
use crate::genome::GenePool;
use crate::stats::{Stat, VitalStats};

/// Stable identifier of a creature for the lifetime of a world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub u64);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Debug)]
pub struct Creature {
    // Fields are private; energy only moves through `VitalStats`' clamped API.
    id: CreatureId,
    generation: u32,
    gene_pool: GenePool,
    vitals: VitalStats,
    actions: ActionSet,
}

impl Creature {
    /// A creature at full energy with the standard action set.
    pub fn new(id: CreatureId, gene_pool: GenePool) -> Self {
        Self::with_actions(id, gene_pool, ActionSet::standard())
    }

    pub fn with_actions(id: CreatureId, gene_pool: GenePool, actions: ActionSet) -> Self {
        let vitals = VitalStats::for_gene_pool(&gene_pool);
        Self {
            id,
            generation: 0,
            gene_pool,
            vitals,
            actions,
        }
    }

    pub(crate) fn with_generation(mut self, generation: u32) -> Self {
        self.generation = generation;
        self
    }

    pub fn id(&self) -> CreatureId {
        self.id
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn gene_pool(&self) -> &GenePool {
        &self.gene_pool
    }

    pub fn vitals(&self) -> &VitalStats {
        &self.vitals
    }

    pub(crate) fn vitals_mut(&mut self) -> &mut VitalStats {
        &mut self.vitals
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn energy(&self) -> u32 {
        self.vitals.value(Stat::Energy)
    }

    pub fn is_dead(&self) -> bool {
        self.vitals.is_depleted(Stat::Energy)
    }
}
