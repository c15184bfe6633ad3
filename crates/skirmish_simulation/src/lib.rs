//! SKIRMISH Simulation Core
//!
//! ECS-симуляция боя на Bevy 0.16: детерминистичный авто-баттлер
//! (две команды, автономные юниты, melee-обмен ударами).
//!
//! Архитектура: вся боевая логика крутится в FixedUpdate одной
//! цепочкой систем; presentation-слой (рендер, физика столкновений,
//! снаряды) живет снаружи и подписывается на events.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod ai;
pub mod combat;
pub mod components;
pub mod lifecycle;
pub mod logger;
pub mod movement;
pub mod registry;
pub mod targeting;

// Re-export базовых типов для удобства
pub use combat::{
    AttackExecutor, AttackStarted, Attacker, DamageDealt, ReviveUnit, UnitDied, STOP_EPSILON,
};
pub use components::*;
pub use lifecycle::{deactivate_unit, spawn_unit};
pub use logger::{init_logger, log_error, log_info, log_warning, set_logger, LogLevel, LogPrinter};
pub use registry::BattleRegistry;
pub use targeting::{LowestHealthPolicy, NearestEnemyPolicy, TargetPolicy, TargetScanner};

use crate::ai::unit_brain;
use crate::combat::{
    execute_attacks, halt_dead_units, handle_revive_requests, tick_attack_cooldowns,
    tick_pending_deactivation,
};
use crate::lifecycle::{
    process_deactivated_units, register_reenabled_units, register_spawned_units,
};
use crate::movement::{integrate_movement, steer_movers};

/// Главный plugin симуляции
///
/// Порядок систем внутри тика жестко закреплен chain'ом: регистрация →
/// cooldown'ы → решения юнитов → исполнение атак → движение → lifecycle.
/// Events атак исполняются в том же тике, в котором начаты.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Реестр — singleton: повторная инициализация не должна затирать
        // уже идущий бой.
        if app.world().contains_resource::<BattleRegistry>() {
            log_error("SimulationPlugin: BattleRegistry уже существует, вторая инициализация отклонена");
        } else {
            app.insert_resource(BattleRegistry::new());
        }

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_event::<AttackStarted>()
            .add_event::<DamageDealt>()
            .add_event::<UnitDied>()
            .add_event::<ReviveUnit>()
            .add_systems(
                FixedUpdate,
                (
                    register_spawned_units,
                    register_reenabled_units,
                    tick_attack_cooldowns,
                    unit_brain,
                    execute_attacks,
                    halt_dead_units,
                    steer_movers,
                    integrate_movement,
                    tick_pending_deactivation,
                    process_deactivated_units,
                    handle_revive_requests,
                )
                    .chain(),
            );
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
