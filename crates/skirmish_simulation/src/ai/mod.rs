//! Покоординатор юнита: цель → преследование или остановка+атака
//!
//! Решение принимается один раз за логический тик для каждого живого
//! (не Inactive) юнита; порядок обхода — стабильный порядок query.

use bevy::prelude::*;

use crate::combat::attacker::{
    is_valid_attack_target, stopping_distance, surface_distance, try_start_attack, Attacker,
};
use crate::combat::events::AttackStarted;
use crate::components::{BodyRadius, Health, Inactive, Mover, Unit, UnitStats, UnitTeam, Velocity};
use crate::movement::halt;
use crate::registry::BattleRegistry;
use crate::targeting::{TargetScanner, TargetView};

/// Система: пер-тиковое решение юнита
///
/// 1. Собственный Health мертв → стоим, но таргетинг обновляется и одна
///    попытка атаки по текущей цели делается: одновременный размен
///    ударами долетает, даже если атакующий умер этим же тиком.
///    Это сознательная семантика, не баг.
/// 2. Иначе: обновить цель. Нет цели → стоим. Цель в пределах stopping
///    distance → стоим и пробуем атаковать. Цель дальше → преследуем.
pub fn unit_brain(
    mut units: Query<
        (
            Entity,
            &Unit,
            &UnitStats,
            &Transform,
            &BodyRadius,
            &Health,
            &mut TargetScanner,
            &mut Attacker,
            &mut Mover,
            &mut Velocity,
        ),
        Without<Inactive>,
    >,
    targets: TargetView,
    registry: Res<BattleRegistry>,
    mut attack_events: EventWriter<AttackStarted>,
) {
    for (
        entity,
        unit,
        stats,
        transform,
        radius,
        health,
        mut scanner,
        mut attacker,
        mut mover,
        mut velocity,
    ) in units.iter_mut()
    {
        let position = transform.translation;

        if health.is_dead() {
            halt(&mut mover, &mut velocity);
            scanner.refresh(unit.team, position, &registry, &targets);
            if let Some(target) = scanner.current_target() {
                try_start_attack(
                    entity,
                    unit.team,
                    position,
                    radius.0,
                    stats,
                    &mut attacker,
                    target,
                    &targets,
                    &mut attack_events,
                );
            }
            continue;
        }

        scanner.refresh(unit.team, position, &registry, &targets);
        let Some(target) = scanner.current_target() else {
            halt(&mut mover, &mut velocity);
            continue;
        };

        if within_stopping_distance(unit.team, position, radius.0, stats, target, &targets) {
            halt(&mut mover, &mut velocity);
            try_start_attack(
                entity,
                unit.team,
                position,
                radius.0,
                stats,
                &mut attacker,
                target,
                &targets,
                &mut attack_events,
            );
        } else {
            mover.set_move_target(target);
        }
    }
}

/// Цель достаточно близко, чтобы остановиться и бить без дерганья
fn within_stopping_distance(
    owner_team: UnitTeam,
    owner_position: Vec3,
    owner_radius: f32,
    stats: &UnitStats,
    target: Entity,
    targets: &TargetView<'_, '_>,
) -> bool {
    if !is_valid_attack_target(owner_team, target, targets) {
        return false;
    }
    let Ok((_, target_transform, _, target_radius)) = targets.get(target) else {
        return false;
    };
    surface_distance(
        owner_position,
        owner_radius,
        target_transform.translation,
        target_radius.0,
    ) <= stopping_distance(stats.attack_range)
}
