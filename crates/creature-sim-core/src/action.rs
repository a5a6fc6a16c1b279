use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::constants::{EAT_BASE_GAIN, EAT_SENSITIVITY_STEP};
use crate::creature::CreatureId;
use crate::genome::Trait;
use crate::invariant::InvariantViolation;
use crate::stats::Stat;
use crate::world::World;

/// The closed set of actions a creature can perform.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Eat,
    Pair,
}

impl ActionKind {
    pub const ALL: [ActionKind; 2] = [ActionKind::Eat, ActionKind::Pair];

    pub fn name(self) -> &'static str {
        match self {
            ActionKind::Eat => "eat",
            ActionKind::Pair => "pair",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    /// Perform the action's effect. Energy accounting is left to
    /// [`crate::world::run_turn`]; this only reports whether anything happened.
    pub(crate) fn attempt(
        self,
        world: &mut World,
        actor: CreatureId,
    ) -> Result<bool, InvariantViolation> {
        match self {
            ActionKind::Eat => Ok(eat(world, actor)),
            ActionKind::Pair => pair(world, actor),
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Gain energy scaled by light sensitivity. Fails when already full.
fn eat(world: &mut World, actor: CreatureId) -> bool {
    let Some(creature) = world.creature_mut(actor) else {
        return false;
    };
    if creature.vitals().is_full(Stat::Energy) {
        return false;
    }
    let gain =
        EAT_BASE_GAIN + creature.gene_pool().mean(Trait::LightSensitivity) / EAT_SENSITIVITY_STEP;
    creature.vitals_mut().add(Stat::Energy, gain);
    true
}

/// Breed with the current action target, which must be another living creature.
fn pair(world: &mut World, actor: CreatureId) -> Result<bool, InvariantViolation> {
    let Some(target) = world.selection().action_target() else {
        return Ok(false);
    };
    if target == actor || !world.creature(target).is_some_and(|c| !c.is_dead()) {
        return Ok(false);
    }
    let Some(child) = world.breed(actor, target)? else {
        return Ok(false);
    };
    info!(%actor, %target, %child, "creatures paired");
    Ok(true)
}

/// Ordered, duplicate-free set of actions available to one creature.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionSet {
    kinds: Vec<ActionKind>,
}

impl ActionSet {
    pub fn new(kinds: impl IntoIterator<Item = ActionKind>) -> Self {
        let mut unique = Vec::new();
        for kind in kinds {
            if !unique.contains(&kind) {
                unique.push(kind);
            }
        }
        Self { kinds: unique }
    }

    /// Eat and pair, in that order.
    pub fn standard() -> Self {
        Self::new(ActionKind::ALL)
    }

    pub fn get(&self, kind: ActionKind) -> Option<ActionKind> {
        self.kinds.iter().copied().find(|&k| k == kind)
    }

    pub fn contains(&self, kind: ActionKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = ActionKind> + '_ {
        self.kinds.iter().copied()
    }
}
