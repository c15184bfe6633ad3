//! Политики выбора цели (заменяемые стратегии)

use bevy::prelude::*;

/// Кандидат в цели: валидный (активный, живой) враг в порядке реестра
#[derive(Debug, Clone, Copy)]
pub struct TargetCandidate {
    pub entity: Entity,
    pub position: Vec3,
    /// Доля оставшегося HP в [0, 1]
    pub hp_fraction: f32,
}

/// Стратегия выбора цели
///
/// Реализации детерминированы: при равных оценках побеждает первый
/// кандидат в порядке обхода (стабильный порядок реестра).
pub trait TargetPolicy: Send + Sync {
    /// Выбирает цель из кандидатов; None если никто не подходит
    fn select(&self, owner_position: Vec3, candidates: &[TargetCandidate]) -> Option<Entity>;

    /// Имя стратегии для логов
    fn name(&self) -> &'static str;
}

/// Ближайший враг
///
/// Сравнение по квадрату планарной (x, z) дистанции — без sqrt в горячем
/// цикле. Равные дистанции разрешаются порядком обхода (строгое `<`).
#[derive(Debug, Clone, Copy, Default)]
pub struct NearestEnemyPolicy;

impl TargetPolicy for NearestEnemyPolicy {
    fn select(&self, owner_position: Vec3, candidates: &[TargetCandidate]) -> Option<Entity> {
        let mut best = None;
        let mut best_distance_sq = f32::MAX;

        for candidate in candidates {
            let dx = candidate.position.x - owner_position.x;
            let dz = candidate.position.z - owner_position.z;
            let distance_sq = dx * dx + dz * dz;

            if distance_sq < best_distance_sq {
                best_distance_sq = distance_sq;
                best = Some(candidate.entity);
            }
        }

        best
    }

    fn name(&self) -> &'static str {
        "nearest_enemy"
    }
}

/// Враг с наименьшей долей HP ("добивание")
#[derive(Debug, Clone, Copy, Default)]
pub struct LowestHealthPolicy;

impl TargetPolicy for LowestHealthPolicy {
    fn select(&self, _owner_position: Vec3, candidates: &[TargetCandidate]) -> Option<Entity> {
        let mut best = None;
        let mut best_fraction = f32::MAX;

        for candidate in candidates {
            if candidate.hp_fraction < best_fraction {
                best_fraction = candidate.hp_fraction;
                best = Some(candidate.entity);
            }
        }

        best
    }

    fn name(&self) -> &'static str {
        "lowest_health"
    }
}
