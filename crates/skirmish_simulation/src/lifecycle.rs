//! Жизненный цикл юнита: spawn, enable/disable, связь с реестром
//!
//! Граница spawn/despawn: внешний spawner создает юнита через spawn_unit
//! (аналог enable — регистрация подхватится в начале следующего тика),
//! а выключает через deactivate_unit; выключение принудительно снимает
//! регистрацию и останавливает движение.

use bevy::prelude::*;

use crate::combat::attacker::Attacker;
use crate::components::{
    BodyRadius, Health, Inactive, Mover, PendingDeactivation, Unit, UnitStats, UnitTeam, Velocity,
};
use crate::movement::halt;
use crate::registry::BattleRegistry;
use crate::targeting::TargetScanner;

/// Создает боевого юнита со всем набором компонентов
///
/// Статы проходят санитизацию authoring-данных; Health создается полным.
pub fn spawn_unit(
    commands: &mut Commands,
    team: UnitTeam,
    stats: UnitStats,
    position: Vec3,
) -> Entity {
    let stats = stats.sanitized();
    let health = Health::new(stats.max_hp);
    let attacker = Attacker::new(&stats);

    commands
        .spawn((
            Unit { team },
            Transform::from_translation(position),
            BodyRadius::default(),
            health,
            TargetScanner::default(),
            attacker,
            Mover::new(position.y),
            Velocity::default(),
            stats,
        ))
        .id()
}

/// Выключает юнита из симуляции (пулинг), не убивая его
pub fn deactivate_unit(commands: &mut Commands, unit: Entity) {
    if let Ok(mut entity_commands) = commands.get_entity(unit) {
        entity_commands.insert(Inactive);
    }
}

/// Система: регистрация только что заспавненных юнитов
///
/// Мертвым в реестре не место; повторную регистрацию гасит сам реестр.
pub fn register_spawned_units(
    query: Query<(Entity, &Unit, &Health), (Added<Unit>, Without<Inactive>)>,
    mut registry: ResMut<BattleRegistry>,
) {
    for (entity, unit, health) in &query {
        if health.is_dead() {
            continue;
        }
        registry.register(unit.team, entity);
    }
}

/// Система: повторная регистрация юнитов, вернувшихся из пула
pub fn register_reenabled_units(
    mut reenabled: RemovedComponents<Inactive>,
    query: Query<(&Unit, &Health)>,
    mut registry: ResMut<BattleRegistry>,
) {
    for entity in reenabled.read() {
        let Ok((unit, health)) = query.get(entity) else {
            continue;
        };
        if health.is_dead() {
            continue;
        }
        registry.register(unit.team, entity);
    }
}

/// Система: обработка выключения юнита
///
/// Force-unregister и force-stop, чтобы не осталось ни записи в реестре,
/// ни осиротевшей скорости. Отложенная деактивация снимается: повторное
/// включение не должно автоматически выключить юнита снова.
pub fn process_deactivated_units(
    mut query: Query<(Entity, &Unit, &mut Mover, &mut Velocity), Added<Inactive>>,
    mut registry: ResMut<BattleRegistry>,
    mut commands: Commands,
) {
    for (entity, unit, mut mover, mut velocity) in query.iter_mut() {
        registry.unregister(unit.team, entity);
        halt(&mut mover, &mut velocity);
        if let Ok(mut entity_commands) = commands.get_entity(entity) {
            entity_commands.remove::<PendingDeactivation>();
        }
    }
}
