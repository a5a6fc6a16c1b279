pub mod action;
pub mod config;
pub mod constants;
pub mod creature;
pub mod environment;
pub mod genome;
pub mod invariant;
pub mod metrics;
pub mod rng;
pub mod stats;
pub mod world;

pub use action::{ActionKind, ActionSet};
pub use config::{SimConfig, SimConfigError};
pub use creature::{Creature, CreatureId};
pub use environment::Environment;
pub use genome::{Gene, GenePool, MutationRates, Trait};
pub use invariant::InvariantViolation;
pub use metrics::{CreatureSnapshot, LineageEvent, RunSummary, WorldSnapshot};
pub use stats::{Stat, VitalStats};
pub use world::{
    run_turn, ActionError, GameStatus, SelectionState, TurnOutcome, World, WorldInitError,
};
