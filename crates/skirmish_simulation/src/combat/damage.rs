//! Применение урона, смерть и возврат в строй
//!
//! Порядок внутри тика (закреплен chain'ом в SimulationPlugin):
//! 1. execute_attacks — исполнение начатых атак, переход в смерть
//! 2. halt_dead_units — умершие в этом тике перестают двигаться
//! 3. tick_pending_deactivation — отложенная деактивация тиком позже
//! 4. handle_revive_requests — respawn из пула

use bevy::prelude::*;

use crate::combat::attacker::Attacker;
use crate::combat::events::{AttackStarted, DamageDealt, ReviveUnit, UnitDied};
use crate::components::{Health, Inactive, Mover, PendingDeactivation, Unit, UnitStats, Velocity};
use crate::logger::{log_info, log_warning};
use crate::movement::halt;
use crate::registry::BattleRegistry;

/// Система: исполнение начатых атак
///
/// Читает AttackStarted этого тика и прогоняет каждую через executor
/// атакующего. Цель перепроверяется при исполнении: урон по уже
/// деактивированному юниту молча отбрасывается (фильтр Without<Inactive>),
/// по мертвому — отклоняется executor'ом.
///
/// Смерть цели обрабатывается здесь же, немедленно: флаг выставлен
/// в take_damage, юнит исключается из реестра (следующий же запрос
/// enemies_of в этом тике его не увидит), испускается UnitDied,
/// а деактивация откладывается ровно на один тик.
///
/// Атакующий НЕ проверяется на живость: отложенный удар юнита,
/// умершего этим же тиком, все равно долетает (обоюдный размен).
pub fn execute_attacks(
    mut attack_events: EventReader<AttackStarted>,
    attackers: Query<(&UnitStats, &Attacker)>,
    mut targets: Query<(&Unit, &mut Health), Without<Inactive>>,
    mut registry: ResMut<BattleRegistry>,
    mut damage_events: EventWriter<DamageDealt>,
    mut death_events: EventWriter<UnitDied>,
    mut commands: Commands,
) {
    for event in attack_events.read() {
        let Ok((stats, attacker)) = attackers.get(event.attacker) else {
            log_warning(&format!(
                "execute_attacks: attacker {:?} без UnitStats/Attacker — атака отброшена",
                event.attacker
            ));
            continue;
        };

        let Ok((target_unit, mut target_health)) = targets.get_mut(event.target) else {
            continue;
        };

        let Some(outcome) = attacker.executor.execute(stats, &mut target_health) else {
            continue;
        };

        damage_events.write(DamageDealt {
            target: event.target,
            source: Some(event.attacker),
            amount: outcome.applied,
            remaining_hp: outcome.remaining,
        });

        if outcome.died {
            registry.unregister(target_unit.team, event.target);
            death_events.write(UnitDied {
                unit: event.target,
                killer: Some(event.attacker),
            });
            commands
                .entity(event.target)
                .insert(PendingDeactivation::next_tick());

            log_info(&format!(
                "Unit {:?} убит юнитом {:?}",
                event.target, event.attacker
            ));
        }
    }
}

/// Система: остановка движения умерших в этом тике
///
/// Чтобы труп не дрейфовал по инерции до своего следующего brain-тика.
pub fn halt_dead_units(
    mut death_events: EventReader<UnitDied>,
    mut movers: Query<(&mut Mover, &mut Velocity)>,
) {
    for event in death_events.read() {
        if let Ok((mut mover, mut velocity)) = movers.get_mut(event.unit) {
            halt(&mut mover, &mut velocity);
        }
    }
}

/// Система: обратный отсчет отложенной деактивации
///
/// Умерший юнит остается "мертвым, но присутствующим" ровно один тик:
/// счетчик, взведенный при смерти, убывает в том же тике, а деактивация
/// (маркер Inactive) случается в конце следующего.
pub fn tick_pending_deactivation(
    mut query: Query<(Entity, &mut PendingDeactivation)>,
    mut commands: Commands,
) {
    for (entity, mut pending) in query.iter_mut() {
        if pending.ticks_remaining == 0 {
            if let Ok(mut entity_commands) = commands.get_entity(entity) {
                entity_commands.remove::<PendingDeactivation>();
                entity_commands.insert(Inactive);
            }
        } else {
            pending.ticks_remaining -= 1;
        }
    }
}

/// Система: возврат юнита в строй (respawn/пулинг)
///
/// Восстанавливает HP, снимает флаг смерти и отложенную деактивацию;
/// регистрирует обратно только активного юнита — выключенного сначала
/// должен включить внешний spawner (снять Inactive).
pub fn handle_revive_requests(
    mut revive_events: EventReader<ReviveUnit>,
    mut query: Query<(&Unit, &mut Health, Has<Inactive>)>,
    mut registry: ResMut<BattleRegistry>,
    mut commands: Commands,
) {
    for event in revive_events.read() {
        let Ok((unit, mut health, inactive)) = query.get_mut(event.unit) else {
            log_warning(&format!(
                "handle_revive_requests: юнит {:?} отсутствует — запрос отброшен",
                event.unit
            ));
            continue;
        };

        health.reset_to_max();
        if let Ok(mut entity_commands) = commands.get_entity(event.unit) {
            entity_commands.remove::<PendingDeactivation>();
        }

        if !inactive {
            registry.register(unit.team, event.unit);
        }
    }
}
