//! Движение: steering к цели и интеграция скорости
//!
//! Движение строго планарное (x, z). Скорость пересчитывается каждый
//! физический тик из позиции цели; интеграция отдельной системой сразу
//! после steering'а.

use bevy::prelude::*;

use crate::components::{Health, Inactive, Mover, UnitStats, Velocity};

/// Квадрат дистанции, ниже которого цель считается достигнутой
///
/// Защита от деления на ноль при нормализации направления, когда юнит
/// и цель совпали в пространстве.
pub const TARGET_REACHED_SQ_EPSILON: f32 = 1.0e-6;

/// Полная остановка: сброс цели и обнуление скорости
pub fn halt(mover: &mut Mover, velocity: &mut Velocity) {
    mover.stop();
    velocity.0 = Vec3::ZERO;
}

/// Планарная скорость преследования
///
/// Нулевая, если цель достигнута/совпала; иначе единичный вектор к цели,
/// умноженный на move_speed — модуль скорости не зависит от дистанции.
pub fn chase_velocity(from: Vec3, to: Vec3, move_speed: f32) -> Vec3 {
    let to_target = Vec3::new(to.x - from.x, 0.0, to.z - from.z);
    let len_sq = to_target.length_squared();
    if len_sq <= TARGET_REACHED_SQ_EPSILON {
        return Vec3::ZERO;
    }
    to_target / len_sq.sqrt() * move_speed
}

/// Система: расчет скорости преследования
///
/// Протухшая цель (отсутствует, выключена, мертва) не разыменовывается —
/// юнит просто стоит, новую цель выберет brain на следующем тике.
pub fn steer_movers(
    mut movers: Query<(&Mover, &UnitStats, &Transform, &mut Velocity)>,
    targets: Query<(&Transform, &Health), Without<Inactive>>,
) {
    for (mover, stats, transform, mut velocity) in movers.iter_mut() {
        let Some(target) = mover.move_target() else {
            velocity.0 = Vec3::ZERO;
            continue;
        };

        let Ok((target_transform, target_health)) = targets.get(target) else {
            velocity.0 = Vec3::ZERO;
            continue;
        };
        if target_health.is_dead() {
            velocity.0 = Vec3::ZERO;
            continue;
        }

        velocity.0 = chase_velocity(
            transform.translation,
            target_transform.translation,
            stats.move_speed,
        );
    }
}

/// Система: интеграция скорости в позицию
///
/// Высота юнита зафиксирована значением, снятым при spawn.
pub fn integrate_movement(
    mut query: Query<(&Mover, &Velocity, &mut Transform)>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (mover, velocity, mut transform) in query.iter_mut() {
        transform.translation.x += velocity.0.x * delta;
        transform.translation.z += velocity.0.z * delta;

        if transform.translation.y != mover.fixed_elevation {
            transform.translation.y = mover.fixed_elevation;
        }
    }
}
