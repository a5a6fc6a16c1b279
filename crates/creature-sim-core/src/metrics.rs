use serde::{Deserialize, Serialize};

use crate::creature::{Creature, CreatureId};
use crate::environment::Environment;
use crate::genome::{Gene, Trait};
use crate::stats::Stat;
use crate::world::{GameStatus, SelectionState};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LineageEvent {
    pub turn: usize,
    pub parent_ids: [CreatureId; 2],
    pub child_id: CreatureId,
    pub generation: u32,
}

/// Display-ready view of one creature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CreatureSnapshot {
    pub id: CreatureId,
    pub generation: u32,
    pub energy: u32,
    pub energy_ceiling: u32,
    pub dead: bool,
    pub action_cost: u32,
    pub selected: bool,
    pub action_target: bool,
    pub genes: Vec<Gene>,
    /// Integer trait means in `Trait::ALL` order.
    pub trait_means: [u32; 4],
    /// `[min, max]` of each trait across genes, in `Trait::ALL` order.
    #[serde(default)]
    pub trait_ranges: [[u8; 2]; 4],
}

impl CreatureSnapshot {
    pub fn capture(
        creature: &Creature,
        environment: &Environment,
        selection: &SelectionState,
    ) -> Self {
        let pool = creature.gene_pool();
        Self {
            id: creature.id(),
            generation: creature.generation(),
            energy: creature.energy(),
            energy_ceiling: creature.vitals().ceiling(Stat::Energy),
            dead: creature.is_dead(),
            action_cost: environment.action_cost(pool),
            selected: selection.is_selected_creature(creature.id()),
            action_target: selection.is_action_creature(creature.id()),
            genes: pool.genes().to_vec(),
            trait_means: Trait::ALL.map(|t| pool.mean(t)),
            trait_ranges: Trait::ALL.map(|t| [pool.min(t), pool.max(t)]),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub turn: usize,
    pub status: GameStatus,
    pub environment: Environment,
    pub player: CreatureSnapshot,
    pub world_creatures: Vec<CreatureSnapshot>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub offspring: Vec<CreatureSnapshot>,
}

impl WorldSnapshot {
    pub fn alive_world_creatures(&self) -> usize {
        self.world_creatures.iter().filter(|c| !c.dead).count()
    }
}

fn default_schema_version() -> u32 {
    1
}

/// Outcome of a driven session, written by the CLI.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RunSummary {
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub turns: usize,
    pub refused_turns: usize,
    pub status: GameStatus,
    #[serde(default)]
    pub lineage_events: Vec<LineageEvent>,
    pub final_snapshot: WorldSnapshot,
}
