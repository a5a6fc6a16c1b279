use std::{error::Error, fmt};

use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::action::ActionKind;
use crate::config::{SimConfig, SimConfigError};
use crate::creature::{Creature, CreatureId};
use crate::environment::Environment;
use crate::genome::{GenePool, MutationRates};
use crate::invariant::InvariantViolation;
use crate::metrics::{CreatureSnapshot, LineageEvent, RunSummary, WorldSnapshot};
use crate::rng;

mod selection;
mod turn;

#[cfg(test)]
mod tests;

pub use selection::SelectionState;
pub use turn::{run_turn, ActionError, TurnOutcome};

/// Callback invoked after every turn that passes the energy gate.
pub type UpdateCallback = Box<dyn FnMut(&World)>;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

pub struct World {
    config: SimConfig,
    environment: Environment,
    player: Creature,
    world_creatures: Vec<Creature>,
    offspring: Vec<Creature>,
    selection: SelectionState,
    rng: ChaCha12Rng,
    mutation_rates: MutationRates,
    next_creature_id: u64,
    turn_index: usize,
    lineage_events: Vec<LineageEvent>,
    on_update: Option<UpdateCallback>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorldInitError {
    Config(SimConfigError),
    Invariant(InvariantViolation),
    RosterSizeMismatch { expected: usize, actual: usize },
}

impl fmt::Display for WorldInitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldInitError::Config(e) => write!(f, "{}", e),
            WorldInitError::Invariant(e) => write!(f, "{}", e),
            WorldInitError::RosterSizeMismatch { expected, actual } => write!(
                f,
                "world_creature_count ({expected}) must match the number of roster gene pools ({actual})"
            ),
        }
    }
}

impl From<SimConfigError> for WorldInitError {
    fn from(err: SimConfigError) -> Self {
        WorldInitError::Config(err)
    }
}

impl From<InvariantViolation> for WorldInitError {
    fn from(err: InvariantViolation) -> Self {
        WorldInitError::Invariant(err)
    }
}

impl Error for WorldInitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            WorldInitError::Config(e) => Some(e),
            WorldInitError::Invariant(e) => Some(e),
            WorldInitError::RosterSizeMismatch { .. } => None,
        }
    }
}

impl World {
    pub const PLAYER_ID: CreatureId = CreatureId(0);

    /// Build a world whose gene pools and (unless fixed by config) environment
    /// are drawn from the config seed.
    pub fn new(config: SimConfig) -> Result<Self, WorldInitError> {
        config.validate()?;
        let mut world_rng = rng::create_world_rng(config.seed);
        let drawn = Environment::random(&mut world_rng);
        let environment = Environment::new(
            config.temperature.unwrap_or(drawn.temperature()),
            config.light.unwrap_or(drawn.light()),
        );
        let pool_for = |id: u64| {
            GenePool::random_pool(
                config.gene_pool_size,
                &mut rng::derive_creature_rng(config.seed, id),
            )
        };
        let player_pool = pool_for(Self::PLAYER_ID.0);
        let roster_pools = (1..=config.world_creature_count as u64)
            .map(pool_for)
            .collect();
        Self::assemble(config, environment, player_pool, roster_pools, world_rng)
    }

    /// Build a world from explicit gene pools and environment.
    pub fn from_parts(
        config: SimConfig,
        environment: Environment,
        player_pool: GenePool,
        roster_pools: Vec<GenePool>,
    ) -> Result<Self, WorldInitError> {
        config.validate()?;
        let world_rng = rng::create_world_rng(config.seed);
        Self::assemble(config, environment, player_pool, roster_pools, world_rng)
    }

    fn assemble(
        config: SimConfig,
        environment: Environment,
        player_pool: GenePool,
        roster_pools: Vec<GenePool>,
        rng: ChaCha12Rng,
    ) -> Result<Self, WorldInitError> {
        if roster_pools.len() != config.world_creature_count {
            return Err(WorldInitError::RosterSizeMismatch {
                expected: config.world_creature_count,
                actual: roster_pools.len(),
            });
        }
        for pool in std::iter::once(&player_pool).chain(&roster_pools) {
            if pool.len() != config.gene_pool_size {
                return Err(InvariantViolation::GenePoolSize {
                    expected: config.gene_pool_size,
                    actual: pool.len(),
                }
                .into());
            }
        }

        let player = Creature::new(Self::PLAYER_ID, player_pool);
        let world_creatures: Vec<Creature> = roster_pools
            .into_iter()
            .zip(1u64..)
            .map(|(pool, id)| Creature::new(CreatureId(id), pool))
            .collect();
        let next_creature_id = world_creatures.len() as u64 + 1;
        let mutation_rates = config.mutation_rates();

        info!(
            world_creatures = world_creatures.len(),
            gene_pool_size = config.gene_pool_size,
            temperature = environment.temperature(),
            light = environment.light(),
            "world initialized"
        );

        Ok(Self {
            config,
            environment,
            player,
            world_creatures,
            offspring: Vec::new(),
            selection: SelectionState::default(),
            rng,
            mutation_rates,
            next_creature_id,
            turn_index: 0,
            lineage_events: Vec::new(),
            on_update: None,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn player(&self) -> &Creature {
        &self.player
    }

    pub fn world_creatures(&self) -> &[Creature] {
        &self.world_creatures
    }

    pub fn offspring(&self) -> &[Creature] {
        &self.offspring
    }

    /// Every creature: the player, then the roster, then offspring.
    pub fn creatures(&self) -> impl Iterator<Item = &Creature> {
        std::iter::once(&self.player)
            .chain(&self.world_creatures)
            .chain(&self.offspring)
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures().find(|c| c.id() == id)
    }

    pub(crate) fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        std::iter::once(&mut self.player)
            .chain(self.world_creatures.iter_mut())
            .chain(self.offspring.iter_mut())
            .find(|c| c.id() == id)
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn select_creature(&mut self, id: CreatureId) {
        self.selection.select_creature(id);
    }

    pub fn select_action_creature(&mut self, id: CreatureId) {
        self.selection.select_action_creature(id);
    }

    pub fn turn_index(&self) -> usize {
        self.turn_index
    }

    pub fn lineage_events(&self) -> &[LineageEvent] {
        &self.lineage_events
    }

    /// Run `action` for creature `id`. See [`run_turn`].
    pub fn execute(
        &mut self,
        action: ActionKind,
        id: CreatureId,
    ) -> Result<TurnOutcome, ActionError> {
        run_turn(self, action, id)
    }

    /// Register the post-turn notification, replacing any previous one.
    pub fn set_update_callback<F>(&mut self, callback: F)
    where
        F: FnMut(&World) + 'static,
    {
        self.on_update = Some(Box::new(callback));
    }

    pub fn clear_update_callback(&mut self) {
        self.on_update = None;
    }

    fn notify(&mut self) {
        if let Some(mut callback) = self.on_update.take() {
            callback(self);
            self.on_update = Some(callback);
        }
    }

    /// True once every non-player creature is dead.
    pub fn check_won(&self) -> bool {
        self.world_creatures.iter().all(Creature::is_dead)
    }

    /// True once the player is dead.
    pub fn check_lost(&self) -> bool {
        self.player.is_dead()
    }

    /// Combined verdict; a dead player loses even if the roster is also gone.
    pub fn status(&self) -> GameStatus {
        if self.check_lost() {
            GameStatus::Lost
        } else if self.check_won() {
            GameStatus::Won
        } else {
            GameStatus::InProgress
        }
    }

    pub fn verify_invariants(&self) -> Result<(), InvariantViolation> {
        for creature in self.creatures() {
            if creature.gene_pool().len() != self.config.gene_pool_size {
                return Err(InvariantViolation::GenePoolSize {
                    expected: self.config.gene_pool_size,
                    actual: creature.gene_pool().len(),
                });
            }
            creature.vitals().check_invariants()?;
        }
        Ok(())
    }

    /// Create an offspring of two existing creatures. Returns `None` if either
    /// parent is unknown.
    pub(crate) fn breed(
        &mut self,
        a: CreatureId,
        b: CreatureId,
    ) -> Result<Option<CreatureId>, InvariantViolation> {
        let (Some(parent_a), Some(parent_b)) = (self.creature(a), self.creature(b)) else {
            return Ok(None);
        };
        let generation = parent_a.generation().max(parent_b.generation()) + 1;
        let pool_a = parent_a.gene_pool().clone();
        let pool_b = parent_b.gene_pool().clone();

        let pool = GenePool::crossover(&pool_a, &pool_b, &mut self.rng, &self.mutation_rates)?;
        let child_id = CreatureId(self.next_creature_id);
        self.next_creature_id += 1;
        self.offspring
            .push(Creature::new(child_id, pool).with_generation(generation));
        self.lineage_events.push(LineageEvent {
            turn: self.turn_index,
            parent_ids: [a, b],
            child_id,
            generation,
        });
        Ok(Some(child_id))
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let capture =
            |c: &Creature| CreatureSnapshot::capture(c, &self.environment, &self.selection);
        WorldSnapshot {
            turn: self.turn_index,
            status: self.status(),
            environment: self.environment,
            player: capture(&self.player),
            world_creatures: self.world_creatures.iter().map(capture).collect(),
            offspring: self.offspring.iter().map(capture).collect(),
        }
    }

    pub fn summary(&self, refused_turns: usize) -> RunSummary {
        RunSummary {
            schema_version: 1,
            turns: self.turn_index,
            refused_turns,
            status: self.status(),
            lineage_events: self.lineage_events.clone(),
            final_snapshot: self.snapshot(),
        }
    }
}
