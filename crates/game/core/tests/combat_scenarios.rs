//! End-to-end combat scenarios driven through the public `World` API.

use game_core::projectile::BOLT_STUN_MS;
use game_core::{
    AbilityAttempt, AbilityKind, BuffKind, CombatEvent, ConsumableAttempt, ConsumableKind,
    Direction, EnemyDefinition, EnemyKind, FeedbackLog, FleeState, Footprint, GameConfig, Mind,
    OccupancyGrid, PlayerState, ProjectileKind, ProjectileSpawn, Registry, ResourceMeter, Side,
    Size, SoundId, SpriteId, Vec2, World, WorldEntity,
};
use strum::IntoEnumIterator;

fn player_at(x: f32, y: f32) -> PlayerState {
    let mut player = PlayerState::new(
        WorldEntity::new(Vec2::new(x, y), Size::new(24.0, 24.0), 0.2, SpriteId(1)),
        ResourceMeter::full(100),
        ResourceMeter::full(60),
    );
    for kind in AbilityKind::iter() {
        player.unlock(kind);
    }
    player
}

fn arena(width: u32, height: u32, player: PlayerState) -> World {
    World::new(
        GameConfig::default(),
        OccupancyGrid::open(width, height),
        player,
        42,
    )
}

#[test]
fn hurt_rat_flees_on_first_health_check() {
    let registry = Registry::standard();
    let mut world = arena(20, 20, player_at(400.0, 100.0));
    let rat = world
        .spawn_enemy(&registry, EnemyKind::Rat, Vec2::new(100.0, 100.0))
        .unwrap();
    {
        let rat = world.enemy_mut(rat).unwrap();
        assert_eq!(rat.health.maximum, 6);
        rat.health.current = 3;
    }
    let mut log = FeedbackLog::new();

    world.tick(250, &mut log);
    let Mind::Melee(mind) = &world.enemy(rat).unwrap().mind else {
        panic!("rats use the melee mind");
    };
    assert_eq!(mind.state(), FleeState::Init);

    world.tick(250, &mut log);
    let enemy = world.enemy(rat).unwrap();
    let Mind::Melee(mind) = &enemy.mind else {
        panic!("rats use the melee mind");
    };
    assert_eq!(mind.state(), FleeState::Fleeing);
    // The player is due right; fleeing heads the opposite way.
    assert_eq!(enemy.entity.direction, Some(Direction::Left));
}

#[test]
fn projectile_expires_past_max_age() {
    let mut world = arena(40, 40, player_at(600.0, 600.0));
    world.spawn_projectile(ProjectileSpawn {
        kind: ProjectileKind::Fireball,
        side: Side::Player,
        origin: Vec2::new(50.0, 50.0),
        direction: Direction::Right,
    });
    assert_eq!(ProjectileKind::Fireball.stats().max_age_ms, 1500);
    let mut log = FeedbackLog::new();

    assert_eq!(world.tick(1500, &mut log).projectiles_expired, 0);
    assert_eq!(world.projectiles().len(), 1);

    let mut world = arena(40, 40, player_at(600.0, 600.0));
    world.spawn_projectile(ProjectileSpawn {
        kind: ProjectileKind::Fireball,
        side: Side::Player,
        origin: Vec2::new(50.0, 50.0),
        direction: Direction::Right,
    });
    assert_eq!(world.tick(1600, &mut log).projectiles_expired, 1);
    assert!(world.projectiles().is_empty());
}

#[test]
fn insufficient_mana_always_gets_exactly_the_punitive_cooldown() {
    let registry = Registry::standard();

    for kind in AbilityKind::iter() {
        let definition = registry.ability(kind).unwrap();
        if definition.mana_cost == 0 {
            continue;
        }
        let mut world = arena(20, 20, player_at(100.0, 100.0));
        world.player_mut().mana.current = definition.mana_cost - 1;
        let mut log = FeedbackLog::new();

        let attempt = world.try_use_ability(kind, &registry, &mut log).unwrap();

        assert_eq!(attempt, AbilityAttempt::InsufficientMana, "{kind}");
        assert_eq!(world.player().mana.current, definition.mana_cost - 1);
        assert_eq!(
            world.player().cooldowns.remaining_ms(kind),
            GameConfig::DEFAULT_PUNITIVE_COOLDOWN_MS,
            "{kind}"
        );
        assert!(log.sounds().any(|sound| sound == SoundId::INVALID_ACTION));
    }
}

#[test]
fn successful_cast_spends_exact_cost_and_cooldown() {
    let registry = Registry::standard();

    for kind in [
        AbilityKind::Fireball,
        AbilityKind::ChaosOrb,
        AbilityKind::PoisonCloud,
    ] {
        let definition = registry.ability(kind).unwrap();
        let mut world = arena(20, 20, player_at(100.0, 100.0));
        let mut log = FeedbackLog::new();

        let attempt = world.try_use_ability(kind, &registry, &mut log).unwrap();

        assert_eq!(attempt, AbilityAttempt::Used, "{kind}");
        assert_eq!(world.player().mana.current, 60 - definition.mana_cost);
        assert_eq!(
            world.player().cooldowns.remaining_ms(kind),
            definition.cooldown_ms
        );
        assert_eq!(world.projectiles().len(), 1);
    }
}

#[test]
fn empty_slot_reports_nothing_to_use() {
    let registry = Registry::standard();
    let mut world = arena(20, 20, player_at(100.0, 100.0));
    world
        .player_mut()
        .inventory
        .set(3, Some(ConsumableKind::ManaPotion));
    let before = world.player().inventory.clone();
    let mut log = FeedbackLog::new();

    let attempt = world.try_use_consumable(0, &registry, &mut log).unwrap();

    assert_eq!(
        attempt,
        ConsumableAttempt::Failed {
            reason: "Nothing to use".to_owned()
        }
    );
    assert_eq!(world.player().inventory, before);
    assert_eq!(log.messages().collect::<Vec<_>>(), vec!["Nothing to use"]);
}

#[test]
fn damage_ends_resting_on_next_tick() {
    let registry = Registry::standard();
    let mut world = arena(20, 20, player_at(100.0, 100.0));
    world.player_mut().health.current = 50;
    let mut log = FeedbackLog::new();

    let attempt = world
        .try_use_ability(AbilityKind::Rest, &registry, &mut log)
        .unwrap();
    assert_eq!(attempt, AbilityAttempt::Used);
    assert!(world.player().buffs.has(BuffKind::Resting));

    world.player_mut().take_damage(5);
    world.tick(16, &mut log);

    assert!(!world.player().buffs.has(BuffKind::Resting));
    assert_eq!(world.player().health.current, 45);
}

#[test]
fn skeleton_closes_in_and_hits() {
    let registry = Registry::standard();
    let mut world = arena(12, 8, player_at(260.0, 100.0));
    let skeleton = world
        .spawn_enemy(&registry, EnemyKind::Skeleton, Vec2::new(64.0, 100.0))
        .unwrap();
    let mut log = FeedbackLog::new();

    let mut damage = 0;
    for _ in 0..400 {
        damage += world.tick(16, &mut log).player_damage_taken;
    }

    assert!(world.enemy(skeleton).is_some());
    assert!(damage > 0, "skeleton never reached the player");
}

#[test]
fn poison_cloud_leaves_a_ticking_poison() {
    let registry = Registry::standard();
    let mut world = arena(20, 20, player_at(550.0, 550.0));
    let skeleton = world
        .spawn_enemy(&registry, EnemyKind::Skeleton, Vec2::new(100.0, 100.0))
        .unwrap();
    let maximum = world.enemy(skeleton).unwrap().health.maximum;
    let center = world.enemy(skeleton).unwrap().entity.center();
    world.spawn_projectile(ProjectileSpawn {
        kind: ProjectileKind::PoisonCloud,
        side: Side::Player,
        origin: center,
        direction: Direction::Left,
    });
    let mut log = FeedbackLog::new();

    world.tick(16, &mut log);

    let hit = world.enemy(skeleton).unwrap();
    assert_eq!(hit.health.current, maximum - 2);
    assert_eq!(hit.buffs.count(BuffKind::Poison), 1);
    assert!(log.combat().any(|event| *event
        == CombatEvent::BuffApplied {
            target: skeleton,
            kind: BuffKind::Poison
        }));

    // Out of the cloud: only the poison keeps working.
    world.enemy_mut(skeleton).unwrap().entity.position = Vec2::new(400.0, 100.0);
    for _ in 0..69 {
        world.tick(16, &mut log);
    }

    let poisoned = world.enemy(skeleton).unwrap();
    assert_eq!(poisoned.health.current, maximum - 3);
    assert!(poisoned.buffs.has(BuffKind::Poison));
}

#[test]
fn enemy_bolt_stuns_the_player() {
    let registry = Registry::standard();
    let mut world = arena(20, 20, player_at(100.0, 100.0));
    let origin = world.player().center();
    world.spawn_projectile(ProjectileSpawn {
        kind: ProjectileKind::Bolt,
        side: Side::Enemy,
        origin,
        direction: Direction::Right,
    });
    let mut log = FeedbackLog::new();

    world.tick(16, &mut log);

    assert!(world.player().is_stunned());
    assert_eq!(world.player().health.current, 96);
    assert_eq!(
        world
            .try_use_ability(AbilityKind::Fireball, &registry, &mut log)
            .unwrap(),
        AbilityAttempt::Stunned
    );
    assert_eq!(
        world.try_use_consumable(0, &registry, &mut log).unwrap(),
        ConsumableAttempt::Stunned
    );
    assert_eq!(world.player().mana.current, 60);

    world.set_player_direction(Some(Direction::Right));
    let position = world.player().entity.position;
    world.tick(16, &mut log);
    assert_eq!(world.player().entity.position, position);

    world.set_player_direction(None);
    for _ in 0..BOLT_STUN_MS / 16 {
        world.tick(16, &mut log);
    }
    assert!(!world.player().is_stunned());
    assert_eq!(
        world
            .try_use_ability(AbilityKind::Fireball, &registry, &mut log)
            .unwrap(),
        AbilityAttempt::Used
    );
}

/// Open grid with column `wall_x` blocked top to bottom.
fn corridor(width: usize, height: usize, wall_x: usize) -> OccupancyGrid {
    let rows: Vec<Vec<u8>> = (0..height)
        .map(|_| (0..width).map(|x| u8::from(x == wall_x)).collect())
        .collect();
    OccupancyGrid::from_rows(&rows).unwrap()
}

#[test]
fn wide_skeleton_walks_a_corridor_as_wide_as_itself() {
    for cells in [2_usize, 3] {
        let size = cells as f32 * 32.0 - 8.0;
        let mut registry = Registry::standard();
        let definition = EnemyDefinition {
            size: Size::new(size, size),
            ..registry.enemy(EnemyKind::Skeleton).unwrap().clone()
        };
        registry.register_enemy(EnemyKind::Skeleton, definition);

        // Player centered under the corridor, near the bottom.
        let player = player_at(4.0 + size / 2.0 - 12.0, 300.0);
        let mut world = World::new(
            GameConfig::default(),
            corridor(cells + 3, 12, cells),
            player,
            42,
        );
        let skeleton = world
            .spawn_enemy(&registry, EnemyKind::Skeleton, Vec2::new(4.0, 4.0))
            .unwrap();
        let Mind::Melee(mind) = &world.enemy(skeleton).unwrap().mind else {
            panic!("skeleton should have a melee mind");
        };
        assert_eq!(
            mind.pathfinder().footprint(),
            Footprint::new(cells as u32, cells as u32)
        );
        let mut log = FeedbackLog::new();

        let mut damage = 0;
        for _ in 0..600 {
            damage += world.tick(16, &mut log).player_damage_taken;
        }

        assert!(damage > 0, "{cells}-cell skeleton never reached the player");
    }
}
