use super::*;
use crate::action::ActionSet;
use crate::genome::Gene;
use crate::stats::Stat;
use rand::Rng;
use std::cell::Cell;
use std::collections::HashSet;
use std::rc::Rc;

/// Heat 90 / light 50 with a heat-50, light-40 pool: damage 3, production 1.
fn scenario_environment() -> Environment {
    Environment::new(90, 50)
}

fn uniform_pool(heat: u8, cold: u8, light: u8, max_energy: u8) -> GenePool {
    GenePool::from_genes(vec![Gene::new(heat, cold, light, max_energy); 6], 6).unwrap()
}

fn make_world() -> World {
    let roster = (0..5).map(|_| uniform_pool(50, 0, 40, 100)).collect();
    World::from_parts(
        SimConfig::default(),
        scenario_environment(),
        uniform_pool(50, 0, 40, 100),
        roster,
    )
    .unwrap()
}

fn set_energy(world: &mut World, id: CreatureId, value: u32) {
    let creature = world.creature_mut(id).unwrap();
    let current = creature.energy();
    assert!(value <= current, "helper only drains energy");
    creature.vitals_mut().subtract(Stat::Energy, current - value);
}

fn count_notifications(world: &mut World) -> Rc<Cell<usize>> {
    let count = Rc::new(Cell::new(0));
    let seen = Rc::clone(&count);
    world.set_update_callback(move |_| seen.set(seen.get() + 1));
    count
}

#[test]
fn scenario_cost_is_three() {
    let world = make_world();
    assert_eq!(
        world.environment().action_cost(world.player().gene_pool()),
        3
    );
}

#[test]
fn gated_turn_changes_nothing() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    world.select_creature(CreatureId(2));
    world.select_action_creature(CreatureId(1));
    set_energy(&mut world, World::PLAYER_ID, 2);
    let before = *world.selection();

    let outcome = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();

    assert_eq!(outcome, TurnOutcome::Refused { cost: 3, energy: 2 });
    assert!(!outcome.passed_gate());
    assert_eq!(world.player().energy(), 2);
    assert_eq!(*world.selection(), before);
    assert_eq!(notifications.get(), 0);
    assert_eq!(world.turn_index(), 0);
    assert!(world.offspring().is_empty());
}

#[test]
fn successful_turn_spends_exact_cost_and_notifies_once() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    world.select_action_creature(CreatureId(1));
    set_energy(&mut world, World::PLAYER_ID, 5);

    let outcome = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Attempted {
            cost: 3,
            success: true
        }
    );
    assert_eq!(outcome.energy_spent(), 3);
    assert_eq!(world.player().energy(), 2);
    assert_eq!(notifications.get(), 1);
    assert_eq!(world.turn_index(), 1);
}

#[test]
fn failed_attempt_notifies_without_spending() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);

    let outcome = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();

    assert_eq!(
        outcome,
        TurnOutcome::Attempted {
            cost: 3,
            success: false
        }
    );
    assert_eq!(outcome.energy_spent(), 0);
    assert_eq!(world.player().energy(), 100);
    assert_eq!(notifications.get(), 1);
}

#[test]
fn one_notification_per_gate_passing_call() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    set_energy(&mut world, World::PLAYER_ID, 50);
    for _ in 0..10 {
        let _ = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap();
    }
    assert_eq!(notifications.get(), 10);
}

#[test]
fn pairing_requires_another_living_target() {
    let mut world = make_world();
    world.select_action_creature(World::PLAYER_ID);
    let outcome = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();
    assert_eq!(outcome.energy_spent(), 0);

    set_energy(&mut world, CreatureId(1), 0);
    world.select_action_creature(CreatureId(1));
    let outcome = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();
    assert_eq!(outcome.energy_spent(), 0);

    world.select_action_creature(CreatureId(42));
    let outcome = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();
    assert_eq!(outcome.energy_spent(), 0);
    assert!(world.offspring().is_empty());
}

#[test]
fn pairing_breeds_offspring_from_both_parents() {
    let mut world = make_world();
    world.world_creatures[0] = Creature::new(CreatureId(1), uniform_pool(90, 90, 90, 90));
    world.mutation_rates = MutationRates {
        point_rate: 0.0,
        ..MutationRates::default()
    };
    world.select_action_creature(CreatureId(1));

    let _ = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();

    assert_eq!(world.offspring().len(), 1);
    let child = &world.offspring()[0];
    assert_eq!(child.id(), CreatureId(6));
    assert_eq!(child.generation(), 1);
    let parent_genes = [Gene::new(50, 0, 40, 100), Gene::new(90, 90, 90, 90)];
    assert!(child
        .gene_pool()
        .genes()
        .iter()
        .all(|g| parent_genes.contains(g)));

    let event = &world.lineage_events()[0];
    assert_eq!(event.parent_ids, [World::PLAYER_ID, CreatureId(1)]);
    assert_eq!(event.child_id, CreatureId(6));
    assert_eq!(event.turn, 0);
}

#[test]
fn offspring_can_act_and_do_not_affect_victory() {
    let mut world = make_world();
    world.select_action_creature(CreatureId(1));
    let _ = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();
    let child = world.offspring()[0].id();

    let outcome = world.execute(ActionKind::Eat, child).unwrap();
    assert!(outcome.passed_gate());

    for id in 1..=5 {
        set_energy(&mut world, CreatureId(id), 0);
    }
    assert!(world.check_won());
    assert!(!world.offspring()[0].is_dead());
}

#[test]
fn eat_fails_at_full_energy() {
    let mut world = make_world();
    let outcome = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap();
    assert_eq!(
        outcome,
        TurnOutcome::Attempted {
            cost: 3,
            success: false
        }
    );
    assert_eq!(world.player().energy(), 100);
}

#[test]
fn eat_gains_then_pays_cost() {
    let mut world = make_world();
    set_energy(&mut world, World::PLAYER_ID, 50);
    let _ = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap();
    // gain 4 + 40/25 = 5, cost 3
    assert_eq!(world.player().energy(), 52);
}

#[test]
fn eat_never_exceeds_ceiling() {
    let mut world = make_world();
    set_energy(&mut world, World::PLAYER_ID, 99);
    let _ = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap();
    assert_eq!(world.player().energy(), 97);
    assert!(world.verify_invariants().is_ok());
}

#[test]
fn dead_creatures_are_always_refused() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    set_energy(&mut world, CreatureId(3), 0);
    let outcome = world.execute(ActionKind::Eat, CreatureId(3)).unwrap();
    assert_eq!(outcome, TurnOutcome::Refused { cost: 3, energy: 0 });
    assert_eq!(notifications.get(), 0);
}

#[test]
fn unknown_creature_is_an_error_without_notification() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    assert_eq!(
        world.execute(ActionKind::Eat, CreatureId(99)),
        Err(ActionError::UnknownCreature(CreatureId(99)))
    );
    assert_eq!(notifications.get(), 0);
}

#[test]
fn action_outside_registry_is_an_error() {
    let mut world = make_world();
    world.world_creatures[1] = Creature::with_actions(
        CreatureId(2),
        uniform_pool(50, 0, 40, 100),
        ActionSet::new([ActionKind::Eat]),
    );
    assert_eq!(
        world.execute(ActionKind::Pair, CreatureId(2)),
        Err(ActionError::ActionUnavailable {
            creature: CreatureId(2),
            action: ActionKind::Pair
        })
    );
}

#[test]
fn check_won_requires_every_world_creature_dead() {
    let mut world = make_world();
    for id in 1..=4 {
        set_energy(&mut world, CreatureId(id), 0);
    }
    assert!(!world.check_won());
    assert_eq!(world.status(), GameStatus::InProgress);

    set_energy(&mut world, CreatureId(5), 0);
    assert!(world.check_won());
    assert_eq!(world.status(), GameStatus::Won);
}

#[test]
fn check_lost_tracks_player_energy() {
    let mut world = make_world();
    set_energy(&mut world, World::PLAYER_ID, 1);
    assert!(!world.check_lost());
    set_energy(&mut world, World::PLAYER_ID, 0);
    assert!(world.check_lost());
    assert_eq!(world.status(), GameStatus::Lost);
}

#[test]
fn loss_takes_precedence_over_victory() {
    let mut world = make_world();
    for id in 0..=5 {
        set_energy(&mut world, CreatureId(id), 0);
    }
    assert!(world.check_won());
    assert_eq!(world.status(), GameStatus::Lost);
}

#[test]
fn callback_observes_post_turn_state() {
    let mut world = make_world();
    let lost_seen = Rc::new(Cell::new(false));
    let energy_seen = Rc::new(Cell::new(u32::MAX));
    {
        let lost_seen = Rc::clone(&lost_seen);
        let energy_seen = Rc::clone(&energy_seen);
        world.set_update_callback(move |w| {
            lost_seen.set(w.check_lost());
            energy_seen.set(w.player().energy());
        });
    }
    world.select_action_creature(CreatureId(1));
    set_energy(&mut world, World::PLAYER_ID, 3);

    let _ = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();

    assert_eq!(energy_seen.get(), 0);
    assert!(lost_seen.get());
}

#[test]
fn cleared_callback_is_not_invoked() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    world.clear_update_callback();
    let _ = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap();
    assert_eq!(notifications.get(), 0);
}

#[test]
fn selection_is_last_write_wins_and_idempotent() {
    let mut world = make_world();
    world.select_creature(CreatureId(1));
    world.select_creature(CreatureId(1));
    let once = *world.selection();
    world.select_creature(CreatureId(1));
    assert_eq!(*world.selection(), once);

    world.select_creature(CreatureId(4));
    assert!(world.selection().is_selected_creature(CreatureId(4)));
    assert!(!world.selection().is_selected_creature(CreatureId(1)));
}

#[test]
fn new_builds_reference_world() {
    let world = World::new(SimConfig::default()).unwrap();
    assert_eq!(world.world_creatures().len(), 5);
    assert_eq!(world.player().gene_pool().len(), 6);
    let ids: HashSet<_> = world.creatures().map(Creature::id).collect();
    assert_eq!(ids.len(), 6);
    assert_eq!(world.status(), GameStatus::InProgress);
    assert!(world.verify_invariants().is_ok());
}

#[test]
fn environment_is_drawn_apart_from_player_genes() {
    let mirrored = (0..200u64)
        .filter(|&seed| {
            let world = World::new(SimConfig {
                seed,
                ..SimConfig::default()
            })
            .unwrap();
            let first = world.player().gene_pool().genes()[0];
            world.environment().temperature() == first.heat_resistance()
                && world.environment().light() == first.cold_resistance()
        })
        .count();
    assert!(mirrored < 5, "environment mirrored player gene for {mirrored} seeds");
}

#[test]
fn new_is_deterministic_for_fixed_seed() {
    let a = World::new(SimConfig::default()).unwrap();
    let b = World::new(SimConfig::default()).unwrap();
    assert_eq!(a.environment(), b.environment());
    for (ca, cb) in a.creatures().zip(b.creatures()) {
        assert_eq!(ca.gene_pool(), cb.gene_pool());
    }
}

#[test]
fn new_respects_fixed_environment() {
    let config = SimConfig {
        temperature: Some(12),
        light: Some(88),
        ..SimConfig::default()
    };
    let world = World::new(config).unwrap();
    assert_eq!(*world.environment(), Environment::new(12, 88));
}

#[test]
fn new_rejects_invalid_config() {
    let config = SimConfig {
        world_creature_count: 0,
        ..SimConfig::default()
    };
    assert!(matches!(
        World::new(config),
        Err(WorldInitError::Config(SimConfigError::InvalidWorldCreatureCount))
    ));
}

#[test]
fn from_parts_checks_roster_and_pool_sizes() {
    let roster = vec![uniform_pool(0, 0, 0, 0); 4];
    assert_eq!(
        World::from_parts(
            SimConfig::default(),
            Environment::default(),
            uniform_pool(0, 0, 0, 0),
            roster,
        )
        .err(),
        Some(WorldInitError::RosterSizeMismatch {
            expected: 5,
            actual: 4
        })
    );

    let short = GenePool::from_genes(vec![Gene::new(0, 0, 0, 0); 3], 3).unwrap();
    assert_eq!(
        World::from_parts(
            SimConfig::default(),
            Environment::default(),
            short,
            vec![uniform_pool(0, 0, 0, 0); 5],
        )
        .err(),
        Some(WorldInitError::Invariant(InvariantViolation::GenePoolSize {
            expected: 6,
            actual: 3
        }))
    );
}

#[test]
fn snapshot_reports_selection_and_cost() {
    let mut world = make_world();
    world.select_creature(CreatureId(2));
    world.select_action_creature(CreatureId(3));
    let snap = world.snapshot();
    assert_eq!(snap.player.action_cost, 3);
    assert_eq!(snap.player.energy_ceiling, 100);
    assert!(snap.world_creatures[1].selected);
    assert!(snap.world_creatures[2].action_target);
    assert!(!snap.player.selected);
    assert_eq!(snap.player.trait_ranges, [[50, 50], [0, 0], [40, 40], [100, 100]]);
    assert_eq!(snap.alive_world_creatures(), 5);
}

#[test]
fn random_play_keeps_energy_within_bounds() {
    let mut world = World::new(SimConfig {
        seed: 7,
        ..SimConfig::default()
    })
    .unwrap();
    let mut rng = crate::rng::create_rng(99);
    for _ in 0..2_000 {
        let ids: Vec<CreatureId> = world.creatures().map(Creature::id).collect();
        let actor = ids[rng.random_range(0..ids.len())];
        let target = ids[rng.random_range(0..ids.len())];
        world.select_action_creature(target);
        let kind = ActionKind::ALL[rng.random_range(0..ActionKind::ALL.len())];
        let before = world.creature(actor).unwrap().energy();
        let outcome = world.execute(kind, actor).unwrap();
        if let TurnOutcome::Refused { .. } = outcome {
            assert_eq!(world.creature(actor).unwrap().energy(), before);
        }
        assert!(world.verify_invariants().is_ok());
        for c in world.creatures() {
            assert!(c.energy() <= c.vitals().ceiling(Stat::Energy));
        }
    }
}


#[test]
fn adapted_creature_pays_the_cost_floor() {
    // Temperature 50, light 100 with full light sensitivity: damage 0, production 5.
    let roster = (0..5).map(|_| uniform_pool(0, 0, 100, 0)).collect();
    let mut world = World::from_parts(
        SimConfig::default(),
        Environment::new(50, 100),
        uniform_pool(0, 0, 100, 0),
        roster,
    )
    .unwrap();
    set_energy(&mut world, World::PLAYER_ID, 10);

    let failed = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();
    assert_eq!(failed, TurnOutcome::Attempted { cost: 1, success: false });
    assert_eq!(world.player().energy(), 10);

    world.select_action_creature(CreatureId(1));
    let paired = world.execute(ActionKind::Pair, World::PLAYER_ID).unwrap();
    assert_eq!(paired, TurnOutcome::Attempted { cost: 1, success: true });
    assert_eq!(world.player().energy(), 9);

    // Eat gains 4 + 100/25 = 8, then pays exactly 1.
    let ate = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap();
    assert_eq!(ate.energy_spent(), 1);
    assert_eq!(world.player().energy(), 16);
}

#[test]
fn invariant_violation_surfaces_from_execute() {
    let mut world = make_world();
    let notifications = count_notifications(&mut world);
    let short_pool = GenePool::from_genes(vec![Gene::new(50, 0, 40, 100); 3], 3).unwrap();
    world.world_creatures[0] = Creature::new(CreatureId(1), short_pool);
    set_energy(&mut world, World::PLAYER_ID, 50);

    let err = world.execute(ActionKind::Eat, World::PLAYER_ID).unwrap_err();

    assert_eq!(
        err,
        ActionError::Invariant(InvariantViolation::GenePoolSize {
            expected: 6,
            actual: 3
        })
    );
    assert_eq!(notifications.get(), 0);
}
