use std::{error::Error, fmt};

use tracing::debug;

use super::World;
use crate::action::ActionKind;
use crate::creature::CreatureId;
use crate::invariant::InvariantViolation;
use crate::stats::Stat;

/// Result of a turn that reached the energy gate.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Not enough energy to pay `cost`; nothing changed and no notification fired.
    Refused { cost: u32, energy: u32 },
    /// The action was attempted and the notification fired. `cost` was spent
    /// only when `success` is true.
    Attempted { cost: u32, success: bool },
}

impl TurnOutcome {
    pub fn passed_gate(&self) -> bool {
        matches!(self, TurnOutcome::Attempted { .. })
    }

    pub fn energy_spent(&self) -> u32 {
        match *self {
            TurnOutcome::Attempted {
                cost,
                success: true,
            } => cost,
            _ => 0,
        }
    }
}

/// Caller mistakes when invoking an action. Running short of energy is not
/// one of them; see [`TurnOutcome::Refused`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    UnknownCreature(CreatureId),
    ActionUnavailable {
        creature: CreatureId,
        action: ActionKind,
    },
    Invariant(InvariantViolation),
}

impl fmt::Display for ActionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionError::UnknownCreature(id) => write!(f, "no creature with id {id}"),
            ActionError::ActionUnavailable { creature, action } => {
                write!(f, "creature {creature} cannot {action}")
            }
            ActionError::Invariant(e) => write!(f, "{}", e),
        }
    }
}

impl From<InvariantViolation> for ActionError {
    fn from(err: InvariantViolation) -> Self {
        ActionError::Invariant(err)
    }
}

impl Error for ActionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ActionError::Invariant(e) => Some(e),
            _ => None,
        }
    }
}

/// Run one action for `actor` as a single atomic turn.
///
/// The cost is derived from the shared environment and the actor's genes.
/// An actor that cannot afford it is refused without any state change or
/// notification. Otherwise the action is attempted, the cost is charged only
/// if the attempt succeeded, and the update callback fires exactly once.
pub fn run_turn(
    world: &mut World,
    kind: ActionKind,
    actor: CreatureId,
) -> Result<TurnOutcome, ActionError> {
    let creature = world
        .creature(actor)
        .ok_or(ActionError::UnknownCreature(actor))?;
    if !creature.actions().contains(kind) {
        return Err(ActionError::ActionUnavailable {
            creature: actor,
            action: kind,
        });
    }

    let cost = world.environment.action_cost(creature.gene_pool());
    let energy = creature.energy();
    if energy < cost {
        debug!(%actor, action = %kind, cost, energy, "turn refused");
        return Ok(TurnOutcome::Refused { cost, energy });
    }

    let success = kind.attempt(world, actor)?;
    if success {
        if let Some(creature) = world.creature_mut(actor) {
            creature.vitals_mut().subtract(Stat::Energy, cost);
        }
    }
    world.turn_index += 1;
    world.verify_invariants()?;
    debug!(%actor, action = %kind, cost, success, turn = world.turn_index, "turn attempted");

    world.notify();
    Ok(TurnOutcome::Attempted { cost, success })
}
