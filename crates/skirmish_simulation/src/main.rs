//! Headless симуляция SKIRMISH
//!
//! Запускает бой отряд-на-отряд без рендера до победы одной из команд

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::Rng;
use skirmish_simulation::{
    create_headless_app, spawn_unit, AttackType, BattleRegistry, DeterministicRng,
    SimulationPlugin, UnitStats, UnitTeam,
};
use std::time::Duration;

const SQUAD_SIZE: usize = 5;
const MAX_TICKS: u32 = 2000;
const TICK_SECONDS: f64 = 1.0 / 60.0;

fn main() {
    let seed = 42;
    println!("Starting SKIRMISH headless battle (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    // Ручное время: ровно один fixed tick на app.update()
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
        TICK_SECONDS,
    )));

    spawn_squads(app.world_mut());

    // Первый update инициализирует часы (нулевая дельта)
    app.update();

    for tick in 0..MAX_TICKS {
        app.update();

        let registry = app.world().resource::<BattleRegistry>();
        let team1 = registry.team_count(UnitTeam::Team1);
        let team2 = registry.team_count(UnitTeam::Team2);

        if tick % 100 == 0 {
            println!("Tick {}: team1={} team2={}", tick, team1, team2);
        }

        if team1 == 0 || team2 == 0 {
            println!("Battle over at tick {}: team1={} team2={}", tick, team1, team2);
            return;
        }
    }

    println!("Tick limit reached, battle unresolved");
}

/// Два зеркальных отряда друг напротив друга, с seeded-разбросом позиций
fn spawn_squads(world: &mut World) {
    let jitters: Vec<(f32, f32)> = {
        let mut rng_resource = world.resource_mut::<DeterministicRng>();
        (0..SQUAD_SIZE * 2)
            .map(|_| {
                (
                    rng_resource.rng.gen_range(-0.5..0.5),
                    rng_resource.rng.gen_range(-0.5..0.5),
                )
            })
            .collect()
    };

    let stats = UnitStats {
        max_hp: 20.0,
        damage: 3.0,
        move_speed: 2.0,
        attack_range: 1.2,
        attack_cooldown: 0.8,
        attack_type: AttackType::Melee,
        ..Default::default()
    };

    let mut commands = world.commands();
    for (i, (jx, jz)) in jitters.iter().enumerate().take(SQUAD_SIZE) {
        let z = i as f32 * 1.5;
        spawn_unit(
            &mut commands,
            UnitTeam::Team1,
            stats.clone(),
            Vec3::new(-6.0 + jx, 0.0, z + jz),
        );
    }
    for (i, (jx, jz)) in jitters.iter().enumerate().skip(SQUAD_SIZE) {
        let z = (i - SQUAD_SIZE) as f32 * 1.5;
        spawn_unit(
            &mut commands,
            UnitTeam::Team2,
            stats.clone(),
            Vec3::new(6.0 + jx, 0.0, z + jz),
        );
    }
    world.flush();
}
