//! Authoring-данные юнита (неизменяемые после spawn)

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Минимальный cooldown атаки (защита от нулевого ожидания)
pub const MIN_ATTACK_COOLDOWN: f32 = 0.01;

/// Минимальная скорость снаряда (для будущего ranged)
pub const MIN_PROJECTILE_SPEED: f32 = 0.01;

/// Способ доставки атаки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Reflect)]
pub enum AttackType {
    /// Мгновенный удар по цели
    #[default]
    Melee,
    /// Снаряд (зарезервировано под будущую реализацию)
    Ranged,
}

/// Характеристики юнита — внешние read-only данные
///
/// Загружаются из authoring-конфига; перед использованием прогоняются
/// через `sanitized()` (все величины неотрицательны, cooldown имеет floor).
#[derive(Component, Debug, Clone, Serialize, Deserialize, Reflect)]
#[reflect(Component)]
pub struct UnitStats {
    pub max_hp: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack_type: AttackType,
    /// Скорость снаряда (зарезервировано под ranged)
    pub projectile_speed: f32,
    /// Ссылка на projectile-ресурс (зарезервировано под ranged)
    pub projectile: Option<String>,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            max_hp: 1.0,
            damage: 1.0,
            move_speed: 1.0,
            attack_range: 1.0,
            attack_cooldown: 1.0,
            attack_type: AttackType::Melee,
            projectile_speed: 6.0,
            projectile: None,
        }
    }
}

impl UnitStats {
    /// Клампит authoring-данные к допустимым диапазонам
    ///
    /// NaN в числовых полях схлопывается в нижнюю границу.
    pub fn sanitized(mut self) -> Self {
        self.max_hp = self.max_hp.max(0.0);
        self.damage = self.damage.max(0.0);
        self.move_speed = self.move_speed.max(0.0);
        self.attack_range = self.attack_range.max(0.0);
        self.attack_cooldown = self.attack_cooldown.max(MIN_ATTACK_COOLDOWN);
        self.projectile_speed = self.projectile_speed.max(MIN_PROJECTILE_SPEED);
        self
    }
}
