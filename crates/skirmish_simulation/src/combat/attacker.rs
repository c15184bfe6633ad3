//! Attacker — cooldown-таймер и валидация начала атаки

use bevy::prelude::*;

use crate::combat::events::AttackStarted;
use crate::combat::executor::AttackExecutor;
use crate::components::{UnitStats, UnitTeam};
use crate::targeting::TargetView;

/// Запас между stopping distance и attack range
///
/// Mover останавливается чуть ВНУТРИ радиуса атаки, иначе на границе
/// range-проверка и подход спорят друг с другом и юнит дергается.
pub const STOP_EPSILON: f32 = 0.05;

/// Атакующая способность юнита
///
/// Executor выбирается один раз при конструировании по attack_type
/// из статов.
#[derive(Component, Debug, Clone, Copy)]
pub struct Attacker {
    /// Оставшийся cooldown (секунды), клампится в ноль
    pub cooldown_remaining: f32,
    pub executor: AttackExecutor,
}

impl Attacker {
    pub fn new(stats: &UnitStats) -> Self {
        Self {
            cooldown_remaining: 0.0,
            executor: AttackExecutor::from_attack_type(stats.attack_type),
        }
    }

    /// Можно ли атаковать прямо сейчас (cooldown истек)
    pub fn can_attack(&self) -> bool {
        self.cooldown_remaining <= 0.0
    }

    /// Сбрасывает cooldown на сконфигурированное значение
    pub fn start_cooldown(&mut self, stats: &UnitStats) {
        self.cooldown_remaining = stats.attack_cooldown;
    }
}

/// Планарная дистанция между поверхностями тел
///
/// Прокси collider-дистанции: расстояние центров по (x, z) минус оба
/// радиуса. Отрицательна при пересечении тел.
pub fn surface_distance(a: Vec3, radius_a: f32, b: Vec3, radius_b: f32) -> f32 {
    let dx = b.x - a.x;
    let dz = b.z - a.z;
    (dx * dx + dz * dz).sqrt() - radius_a - radius_b
}

/// Дистанция остановки: range минус epsilon, floored в ноль
pub fn stopping_distance(attack_range: f32) -> f32 {
    (attack_range - STOP_EPSILON).max(0.0)
}

/// Валидная ли цель атаки: активна, жива, во вражеской команде, имеет тело
///
/// Отсутствие в TargetView покрывает и despawn, и Inactive, и юнита
/// без коллайдер-прокси.
pub fn is_valid_attack_target(
    owner_team: UnitTeam,
    target: Entity,
    targets: &TargetView<'_, '_>,
) -> bool {
    match targets.get(target) {
        Ok((unit, _, health, _)) => unit.team != owner_team && health.is_alive(),
        Err(_) => false,
    }
}

/// Попытка начать атаку по цели
///
/// Успех только если cooldown нулевой, цель валидна и в радиусе атаки.
/// На успехе cooldown сбрасывается и испускается AttackStarted; сам урон
/// применяет executor в фазе исполнения этого же тика.
#[allow(clippy::too_many_arguments)]
pub fn try_start_attack(
    attacker_entity: Entity,
    owner_team: UnitTeam,
    owner_position: Vec3,
    owner_radius: f32,
    stats: &UnitStats,
    attacker: &mut Attacker,
    target: Entity,
    targets: &TargetView<'_, '_>,
    events: &mut EventWriter<AttackStarted>,
) -> bool {
    if !attacker.can_attack() {
        return false;
    }
    if !is_valid_attack_target(owner_team, target, targets) {
        return false;
    }

    let Ok((_, target_transform, _, target_radius)) = targets.get(target) else {
        return false;
    };
    let distance = surface_distance(
        owner_position,
        owner_radius,
        target_transform.translation,
        target_radius.0,
    );
    if distance > stats.attack_range {
        return false;
    }

    attacker.start_cooldown(stats);
    events.write(AttackStarted {
        attacker: attacker_entity,
        target,
    });
    true
}

/// Система: убывание cooldown-таймеров
///
/// Единственная пер-тиковая мутация Attacker вне попыток атаки.
pub fn tick_attack_cooldowns(mut query: Query<&mut Attacker>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for mut attacker in query.iter_mut() {
        if attacker.cooldown_remaining > 0.0 {
            attacker.cooldown_remaining = (attacker.cooldown_remaining - delta).max(0.0);
        }
    }
}
