use anyhow::{bail, Context, Result};
use creature_sim_core::{ActionKind, CreatureId, World};

/// One player intent from a `play` script.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    Run { action: ActionKind, actor: CreatureId },
    Select(CreatureId),
    Target(CreatureId),
}

/// Parse a comma-separated script such as `target:2,pair,eat@3,select:1`.
///
/// Bare action names run on the player; `action@id` runs on another creature.
pub fn parse(script: &str) -> Result<Vec<Step>> {
    script
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_step)
        .collect()
}

fn parse_step(token: &str) -> Result<Step> {
    if let Some(id) = token.strip_prefix("select:") {
        return Ok(Step::Select(parse_id(id)?));
    }
    if let Some(id) = token.strip_prefix("target:") {
        return Ok(Step::Target(parse_id(id)?));
    }
    let (name, actor) = match token.split_once('@') {
        Some((name, id)) => (name, parse_id(id)?),
        None => (token, World::PLAYER_ID),
    };
    let Some(action) = ActionKind::from_name(name) else {
        bail!("unknown action '{name}' in script step '{token}'");
    };
    Ok(Step::Run { action, actor })
}

fn parse_id(raw: &str) -> Result<CreatureId> {
    raw.trim()
        .parse::<u64>()
        .map(CreatureId)
        .with_context(|| format!("invalid creature id '{raw}'"))
}
