use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{
    BASE_ACTION_COST, ENERGY_PRODUCTION_DIVISOR, GENE_MAX_VALUE, MIN_ACTION_COST,
    NEUTRAL_TEMPERATURE, TEMPERATURE_DAMAGE_STEP,
};
use crate::genome::{GenePool, Trait};

/// Ambient conditions shared by every creature in a world.
///
/// Both fields lie in `0..=GENE_MAX_VALUE`. A temperature of
/// [`NEUTRAL_TEMPERATURE`] causes no stress; the further it moves away, the
/// more heat (or cold) resistance a creature needs to act cheaply.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Readings")]
pub struct Environment {
    temperature: u8,
    light: u8,
}

#[derive(Deserialize)]
struct Readings {
    temperature: u8,
    light: u8,
}

impl From<Readings> for Environment {
    fn from(r: Readings) -> Self {
        Environment::new(r.temperature, r.light)
    }
}

impl Environment {
    pub fn new(temperature: u8, light: u8) -> Self {
        Self {
            temperature: temperature.min(GENE_MAX_VALUE),
            light: light.min(GENE_MAX_VALUE),
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            temperature: rng.random_range(0..=GENE_MAX_VALUE),
            light: rng.random_range(0..=GENE_MAX_VALUE),
        }
    }

    pub fn temperature(&self) -> u8 {
        self.temperature
    }

    pub fn light(&self) -> u8 {
        self.light
    }

    /// Labelled values for bar-style display.
    pub fn readings(&self) -> [(&'static str, u8); 2] {
        [("temperature", self.temperature), ("light", self.light)]
    }

    /// Temperature stress left after the relevant resistance trait absorbs it.
    pub fn temperature_damage(&self, pool: &GenePool) -> u32 {
        let (stress, resistance) = if self.temperature >= NEUTRAL_TEMPERATURE {
            (
                u32::from(self.temperature - NEUTRAL_TEMPERATURE) * 2,
                pool.mean(Trait::HeatResistance),
            )
        } else {
            (
                u32::from(NEUTRAL_TEMPERATURE - self.temperature) * 2,
                pool.mean(Trait::ColdResistance),
            )
        };
        stress.saturating_sub(resistance) / TEMPERATURE_DAMAGE_STEP
    }

    /// Energy recovered from ambient light per action.
    pub fn energy_production(&self, pool: &GenePool) -> u32 {
        u32::from(self.light) * pool.mean(Trait::LightSensitivity) / ENERGY_PRODUCTION_DIVISOR
    }

    /// Energy one action costs a creature with this gene pool, never below
    /// [`MIN_ACTION_COST`].
    pub fn action_cost(&self, pool: &GenePool) -> u32 {
        let raw = i64::from(BASE_ACTION_COST) + i64::from(self.temperature_damage(pool))
            - i64::from(self.energy_production(pool));
        raw.max(i64::from(MIN_ACTION_COST)) as u32
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new(NEUTRAL_TEMPERATURE, NEUTRAL_TEMPERATURE)
    }
}
