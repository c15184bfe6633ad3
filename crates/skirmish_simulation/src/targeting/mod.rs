//! Выбор и удержание цели
//!
//! TargetScanner держит слабую ссылку (Entity) на выбранного врага и
//! перепроверяет ее валидность перед каждым использованием. Невалидная
//! цель отбрасывается и заменяется через активную политику — никогда
//! не мутируется на месте.

use bevy::ecs::query::Without;
use bevy::prelude::*;

pub mod policy;

pub use policy::{LowestHealthPolicy, NearestEnemyPolicy, TargetCandidate, TargetPolicy};

use crate::components::{BodyRadius, Health, Inactive, Unit, UnitTeam};
use crate::registry::BattleRegistry;

/// Вид на потенциальные цели: активные юниты с телом
///
/// Юнит без BodyRadius (без коллайдер-прокси) или с маркером Inactive
/// в выборку не попадает и потому невидим для таргетинга и атак.
pub type TargetView<'w, 's> = Query<
    'w,
    's,
    (
        &'static Unit,
        &'static Transform,
        &'static Health,
        &'static BodyRadius,
    ),
    Without<Inactive>,
>;

/// Сканер целей юнита
#[derive(Component)]
pub struct TargetScanner {
    current_target: Option<Entity>,
    policy: Box<dyn TargetPolicy>,
}

impl Default for TargetScanner {
    fn default() -> Self {
        Self::with_policy(Box::new(NearestEnemyPolicy))
    }
}

impl TargetScanner {
    pub fn with_policy(policy: Box<dyn TargetPolicy>) -> Self {
        Self {
            current_target: None,
            policy,
        }
    }

    pub fn current_target(&self) -> Option<Entity> {
        self.current_target
    }

    pub fn has_target(&self) -> bool {
        self.current_target.is_some()
    }

    /// Обновляет текущую цель
    ///
    /// Удерживаемая цель сохраняется пока валидна (присутствует, активна,
    /// жива); иначе активная политика выбирает замену из врагов по реестру,
    /// или цель сбрасывается в None.
    pub fn refresh(
        &mut self,
        owner_team: UnitTeam,
        owner_position: Vec3,
        registry: &BattleRegistry,
        targets: &TargetView<'_, '_>,
    ) {
        if let Some(target) = self.current_target {
            if is_valid_target(target, targets) {
                return;
            }
        }

        let mut candidates = Vec::new();
        for &enemy in registry.enemies_of(owner_team) {
            let Ok((_, transform, health, _)) = targets.get(enemy) else {
                continue;
            };
            if health.is_dead() {
                continue;
            }
            candidates.push(TargetCandidate {
                entity: enemy,
                position: transform.translation,
                hp_fraction: health.fraction(),
            });
        }

        self.current_target = self.policy.select(owner_position, &candidates);
    }
}

/// Валидна ли удерживаемая цель: присутствует, активна, жива
pub fn is_valid_target(target: Entity, targets: &TargetView<'_, '_>) -> bool {
    match targets.get(target) {
        Ok((_, _, health, _)) => health.is_alive(),
        Err(_) => false,
    }
}
