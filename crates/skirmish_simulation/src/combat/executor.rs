//! Исполнители атаки: закрытый набор {Melee, Ranged}

use bevy::prelude::*;

use crate::components::{AttackType, DamageOutcome, Health, UnitStats};

/// Исполнитель эффекта атаки
///
/// Выбирается один раз при конструировании Attacker по attack_type.
/// Melee наносит урон мгновенно; Ranged зарезервирован под будущую
/// projectile-реализацию и сознательно ничего не делает — его настоящая
/// семантика (windup, полет снаряда) нигде не определена, поэтому мы ее
/// не придумываем.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum AttackExecutor {
    Melee,
    Ranged,
}

impl AttackExecutor {
    pub fn from_attack_type(attack_type: AttackType) -> Self {
        match attack_type {
            AttackType::Melee => AttackExecutor::Melee,
            AttackType::Ranged => AttackExecutor::Ranged,
        }
    }

    /// Выполняет эффект атаки над целью
    ///
    /// Живость цели перепроверяется здесь: между решением начать атаку и
    /// исполнением состояние могло измениться. None — эффекта не было.
    pub fn execute(&self, stats: &UnitStats, target_health: &mut Health) -> Option<DamageOutcome> {
        match self {
            AttackExecutor::Melee => {
                if target_health.is_dead() {
                    return None;
                }
                Some(target_health.take_damage(stats.damage))
            }
            AttackExecutor::Ranged => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_applies_damage_immediately() {
        let stats = UnitStats {
            damage: 4.0,
            ..Default::default()
        };
        let mut health = Health::new(10.0);

        let outcome = AttackExecutor::Melee.execute(&stats, &mut health);

        assert_eq!(
            outcome,
            Some(DamageOutcome {
                applied: 4.0,
                remaining: 6.0,
                died: false,
            })
        );
    }

    #[test]
    fn test_melee_skips_dead_target() {
        let stats = UnitStats::default();
        let mut health = Health::new(1.0);
        health.take_damage(1.0);
        assert!(health.is_dead());

        assert_eq!(AttackExecutor::Melee.execute(&stats, &mut health), None);
    }

    #[test]
    fn test_ranged_is_noop() {
        let stats = UnitStats {
            damage: 100.0,
            attack_type: AttackType::Ranged,
            ..Default::default()
        };
        let mut health = Health::new(10.0);

        let executor = AttackExecutor::from_attack_type(stats.attack_type);
        assert_eq!(executor, AttackExecutor::Ranged);
        assert_eq!(executor.execute(&stats, &mut health), None);
        assert_eq!(health.current(), 10.0);
    }
}
