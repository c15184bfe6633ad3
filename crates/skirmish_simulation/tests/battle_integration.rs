//! Battle integration tests
//!
//! Полный pipeline на живом App: таргетинг → преследование → melee-обмен →
//! смерть → отложенная деактивация → revive. Время ведется вручную
//! (ManualDuration), так что один app.update() == ровно один fixed tick.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use skirmish_simulation::*;
use std::time::Duration;

/// Helper: боевой App с ручным тиком заданной длительности
fn create_battle_app(tick_seconds: f64) -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin);
    app.insert_resource(Time::<Fixed>::from_seconds(tick_seconds));
    // Снимаем кламп виртуального времени: тесты гоняют крупные тики
    app.insert_resource(Time::<Virtual>::from_max_delta(Duration::from_secs(10)));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        tick_seconds,
    )));
    // Первый update только инициализирует часы (нулевая дельта, fixed-тиков
    // нет); после него каждый app.update() == ровно один тик
    app.update();
    app
}

/// Helper: spawn юнита с немедленным flush, чтобы entity существовал до тика
fn spawn_fighter(app: &mut App, team: UnitTeam, stats: UnitStats, position: Vec3) -> Entity {
    let world = app.world_mut();
    let entity = spawn_unit(&mut world.commands(), team, stats, position);
    world.flush();
    entity
}

fn melee_stats(max_hp: f32, damage: f32, attack_range: f32) -> UnitStats {
    UnitStats {
        max_hp,
        damage,
        attack_range,
        attack_cooldown: 1.0,
        move_speed: 1.0,
        ..Default::default()
    }
}

fn hp(app: &App, unit: Entity) -> f32 {
    app.world().get::<Health>(unit).unwrap().current()
}

fn is_inactive(app: &App, unit: Entity) -> bool {
    app.world().entity(unit).contains::<Inactive>()
}

fn registered_count(app: &App, team: UnitTeam) -> usize {
    app.world().resource::<BattleRegistry>().team_count(team)
}

/// Два melee-юнита в упор: обмен ударами каждый тик, одновременная
/// смерть разрешается как обоюдный размен
#[test]
fn test_mutual_melee_exchange() {
    let mut app = create_battle_app(1.0);

    let a = spawn_fighter(
        &mut app,
        UnitTeam::Team1,
        melee_stats(10.0, 5.0, 1.0),
        Vec3::ZERO,
    );
    let b = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        melee_stats(8.0, 5.0, 1.0),
        Vec3::new(0.5, 0.0, 0.0),
    );

    // Тик 1: оба в радиусе, cooldown нулевой — обоюдный удар
    app.update();
    assert_eq!(hp(&app, b), 3.0);
    assert_eq!(hp(&app, a), 5.0);
    assert_eq!(registered_count(&app, UnitTeam::Team1), 1);
    assert_eq!(registered_count(&app, UnitTeam::Team2), 1);

    // Тик 2: cooldown истек, второй размен убивает обоих —
    // удар уже умершего в этом тике юнита все равно долетает
    app.update();
    assert_eq!(hp(&app, b), 0.0);
    assert_eq!(hp(&app, a), 0.0);
    assert!(app.world().get::<Health>(a).unwrap().is_dead());
    assert!(app.world().get::<Health>(b).unwrap().is_dead());

    // Исключение из реестра немедленное, деактивация — нет
    assert_eq!(registered_count(&app, UnitTeam::Team1), 0);
    assert_eq!(registered_count(&app, UnitTeam::Team2), 0);
    assert!(!is_inactive(&app, a));
    assert!(!is_inactive(&app, b));

    // Тик 3: деактивация тиком позже смерти
    app.update();
    assert!(is_inactive(&app, a));
    assert!(is_inactive(&app, b));
}

/// Односторонний kill: жертва вне собственного радиуса атаки
#[test]
fn test_kill_unregisters_immediately_deactivates_next_tick() {
    let mut app = create_battle_app(1.0);

    // A достает B с места; B до A еще идти
    let a = spawn_fighter(
        &mut app,
        UnitTeam::Team1,
        melee_stats(10.0, 8.0, 10.0),
        Vec3::ZERO,
    );
    let b = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        melee_stats(8.0, 5.0, 1.0),
        Vec3::new(3.0, 0.0, 0.0),
    );

    // Тик 1: A убивает B одним ударом, B не успел ответить
    app.update();
    assert_eq!(hp(&app, a), 10.0);
    assert_eq!(hp(&app, b), 0.0);
    assert!(app.world().get::<Health>(b).unwrap().is_dead());

    // B мгновенно вне реестра, но деактивируется только на следующем тике
    assert_eq!(registered_count(&app, UnitTeam::Team2), 0);
    assert_eq!(registered_count(&app, UnitTeam::Team1), 1);
    assert!(!is_inactive(&app, b));

    // Труп не дрейфует: остановлен в тике смерти, до интеграции
    assert_eq!(app.world().get::<Velocity>(b).unwrap().0, Vec3::ZERO);
    assert_eq!(
        app.world().get::<Transform>(b).unwrap().translation.x,
        3.0
    );

    // Тик 2: деактивация; у A больше нет цели
    app.update();
    assert!(is_inactive(&app, b));
    assert_eq!(
        app.world().get::<TargetScanner>(a).unwrap().current_target(),
        None
    );
    assert_eq!(app.world().get::<Velocity>(a).unwrap().0, Vec3::ZERO);
}

/// Cooldown отсчитывается в секундах fixed-времени, не в тиках
#[test]
fn test_attack_cooldown_over_ticks() {
    // 4 тика на cooldown 1.0
    let mut app = create_battle_app(0.25);

    let _a = spawn_fighter(
        &mut app,
        UnitTeam::Team1,
        melee_stats(100.0, 1.0, 10.0),
        Vec3::ZERO,
    );
    let b = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        melee_stats(10.0, 0.0, 10.0),
        Vec3::new(1.0, 0.0, 0.0),
    );

    // Удары ложатся на тиках 1, 5, 9
    for tick in 1..=12 {
        app.update();
        let expected = match tick {
            1..=4 => 9.0,
            5..=8 => 8.0,
            _ => 7.0,
        };
        assert_eq!(hp(&app, b), expected, "tick = {}", tick);
    }
}

/// Преследование: скорость постоянного модуля, высота пришпилена,
/// остановка внутри радиуса атаки
#[test]
fn test_chase_then_stop_in_range() {
    let mut app = create_battle_app(0.1);

    let chaser_stats = UnitStats {
        max_hp: 10.0,
        damage: 0.0,
        move_speed: 2.0,
        attack_range: 0.5,
        ..Default::default()
    };
    let idle_stats = UnitStats {
        max_hp: 10.0,
        damage: 0.0,
        move_speed: 0.0,
        attack_range: 0.5,
        ..Default::default()
    };

    let a = spawn_fighter(
        &mut app,
        UnitTeam::Team1,
        chaser_stats,
        Vec3::new(0.0, 1.5, 0.0),
    );
    let b = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        idle_stats,
        Vec3::new(10.0, 1.5, 0.0),
    );

    // Тик 1: полная скорость к цели независимо от дистанции
    app.update();
    assert_eq!(app.world().get::<Velocity>(a).unwrap().0, Vec3::new(2.0, 0.0, 0.0));
    let pos = app.world().get::<Transform>(a).unwrap().translation;
    assert!((pos.x - 0.2).abs() < 1e-5);
    assert_eq!(pos.y, 1.5);

    // Дистанция 10 при скорости 2 — хватит с запасом
    for _ in 0..100 {
        app.update();
    }

    let a_pos = app.world().get::<Transform>(a).unwrap().translation;
    let b_pos = app.world().get::<Transform>(b).unwrap().translation;
    assert_eq!(a_pos.y, 1.5);
    // Дошел: в радиусе атаки и стоит
    let gap = combat::surface_distance(a_pos, 0.5, b_pos, 0.5);
    assert!(gap <= 0.5, "gap = {}", gap);
    assert_eq!(app.world().get::<Velocity>(a).unwrap().0, Vec3::ZERO);
    // Обе цели живы: урон нулевой
    assert_eq!(hp(&app, a), 10.0);
    assert_eq!(hp(&app, b), 10.0);
}

/// Союзник никогда не выбирается целью, даже если он ближе врага
#[test]
fn test_scanner_ignores_own_team() {
    let mut app = create_battle_app(0.1);

    let stats = || UnitStats {
        max_hp: 10.0,
        damage: 0.0,
        attack_range: 20.0,
        ..Default::default()
    };

    let u1 = spawn_fighter(&mut app, UnitTeam::Team1, stats(), Vec3::ZERO);
    let u2 = spawn_fighter(
        &mut app,
        UnitTeam::Team1,
        stats(),
        Vec3::new(0.5, 0.0, 0.0),
    );
    let enemy = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        stats(),
        Vec3::new(5.0, 0.0, 0.0),
    );

    app.update();

    assert_eq!(
        app.world().get::<TargetScanner>(u1).unwrap().current_target(),
        Some(enemy)
    );
    assert_eq!(
        app.world().get::<TargetScanner>(u2).unwrap().current_target(),
        Some(enemy)
    );
    assert_eq!(
        app.world().get::<TargetScanner>(enemy).unwrap().current_target(),
        Some(u1)
    );
}

/// Ranged-атака начинается (cooldown уходит в reset), но урона не наносит
#[test]
fn test_ranged_attack_is_noop() {
    let mut app = create_battle_app(1.0);

    let ranged_stats = UnitStats {
        max_hp: 10.0,
        damage: 5.0,
        attack_range: 10.0,
        attack_cooldown: 3.0,
        attack_type: AttackType::Ranged,
        ..Default::default()
    };

    let a = spawn_fighter(&mut app, UnitTeam::Team1, ranged_stats, Vec3::ZERO);
    let b = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        melee_stats(10.0, 0.0, 0.5),
        Vec3::new(1.0, 0.0, 0.0),
    );

    app.update();

    // Атака стартовала (cooldown сброшен на полное значение), урона нет
    assert_eq!(
        app.world().get::<combat::Attacker>(a).unwrap().cooldown_remaining,
        3.0
    );
    assert_eq!(hp(&app, b), 10.0);
    assert_eq!(registered_count(&app, UnitTeam::Team2), 1);
}

/// Revive возвращает убитого юнита в строй с полным HP
#[test]
fn test_revive_restores_and_reregisters() {
    let mut app = create_battle_app(1.0);

    let a = spawn_fighter(
        &mut app,
        UnitTeam::Team1,
        melee_stats(10.0, 8.0, 10.0),
        Vec3::ZERO,
    );
    let b = spawn_fighter(
        &mut app,
        UnitTeam::Team2,
        melee_stats(8.0, 5.0, 1.0),
        Vec3::new(3.0, 0.0, 0.0),
    );

    // Тик 1: B убит; тик 2: B деактивирован
    app.update();
    app.update();
    assert!(is_inactive(&app, b));
    assert_eq!(registered_count(&app, UnitTeam::Team2), 0);

    // Spawner включает юнита обратно и просит revive
    app.world_mut().entity_mut(b).remove::<Inactive>();
    app.world_mut().send_event(ReviveUnit { unit: b });
    app.update();

    assert_eq!(hp(&app, b), 8.0);
    assert!(app.world().get::<Health>(b).unwrap().is_alive());
    assert!(app
        .world()
        .resource::<BattleRegistry>()
        .is_registered(b));
    assert_eq!(registered_count(&app, UnitTeam::Team2), 1);
    let _ = a;
}

/// Повторная инициализация plugin'а не затирает живой реестр
#[test]
fn test_existing_registry_survives_plugin_init() {
    let mut app = create_headless_app(7);

    let sentinel = app.world_mut().spawn_empty().id();
    let mut registry = BattleRegistry::new();
    registry.register(UnitTeam::Team1, sentinel);
    app.insert_resource(registry);

    app.add_plugins(SimulationPlugin);

    assert_eq!(
        app.world()
            .resource::<BattleRegistry>()
            .team_count(UnitTeam::Team1),
        1
    );
    assert!(app.world().resource::<BattleRegistry>().is_registered(sentinel));
}

/// Отряд-на-отряд: бой доигрывается до уничтожения одной из команд,
/// инварианты HP держатся всю дорогу
#[test]
fn test_squad_battle_resolves() {
    let mut app = create_battle_app(1.0 / 60.0);

    let stats = UnitStats {
        max_hp: 20.0,
        damage: 3.0,
        move_speed: 2.0,
        attack_range: 1.2,
        attack_cooldown: 0.8,
        ..Default::default()
    };

    for i in 0..5 {
        let z = i as f32 * 1.5;
        spawn_fighter(
            &mut app,
            UnitTeam::Team1,
            stats.clone(),
            Vec3::new(-6.0, 0.0, z),
        );
        spawn_fighter(
            &mut app,
            UnitTeam::Team2,
            stats.clone(),
            Vec3::new(6.0, 0.0, z + 0.3),
        );
    }

    let mut resolved_at = None;
    for tick in 0..2000 {
        app.update();

        // HP-инварианты каждый сотый тик
        if tick % 100 == 0 {
            let world = app.world_mut();
            let mut query = world.query::<&Health>();
            for health in query.iter(world) {
                assert!(health.current() >= 0.0);
                assert!(health.current() <= health.max());
            }
        }

        let registry = app.world().resource::<BattleRegistry>();
        if registry.team_count(UnitTeam::Team1) == 0
            || registry.team_count(UnitTeam::Team2) == 0
        {
            resolved_at = Some(tick);
            break;
        }
    }

    let tick = resolved_at.expect("бой не разрешился за 2000 тиков");

    // В реестре не осталось ни одного мертвого юнита
    let registry_units: Vec<Entity> = {
        let registry = app.world().resource::<BattleRegistry>();
        registry
            .roster(UnitTeam::Team1)
            .iter()
            .chain(registry.roster(UnitTeam::Team2))
            .copied()
            .collect()
    };
    for unit in registry_units {
        assert!(
            app.world().get::<Health>(unit).unwrap().is_alive(),
            "мертвый юнит в реестре на тике {}",
            tick
        );
    }
}
