//! Здоровье юнита и переход в смерть

use bevy::prelude::*;

/// Итог применения урона
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    /// Фактически примененный урон (после санитизации)
    pub applied: f32,
    /// HP после применения
    pub remaining: f32,
    /// Юнит умер от этого урона
    pub died: bool,
}

/// Хит-поинты юнита
///
/// Инварианты:
/// - 0 ≤ current ≤ max
/// - dead монотонен: false → true, обратно только через reset_to_max
/// - после смерти take_damage — no-op
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: f32,
    max: f32,
    dead: bool,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            dead: false,
        }
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    /// Доля оставшегося HP в [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        self.current / self.max
    }

    /// Применяет входящий урон
    ///
    /// Отрицательные, NaN и бесконечные значения превращаются в ноль урона —
    /// HP никогда не растет от урона и не портится.
    pub fn take_damage(&mut self, amount: f32) -> DamageOutcome {
        if self.dead {
            return DamageOutcome {
                applied: 0.0,
                remaining: self.current,
                died: false,
            };
        }

        let applied = Self::sanitize_damage(amount);
        self.current = (self.current - applied).max(0.0);

        let died = self.current <= 0.0;
        if died {
            self.dead = true;
        }

        DamageOutcome {
            applied,
            remaining: self.current,
            died,
        }
    }

    /// Восстанавливает HP до максимума и снимает флаг смерти
    pub fn reset_to_max(&mut self) {
        self.current = self.max;
        self.dead = false;
    }

    fn sanitize_damage(amount: f32) -> f32 {
        if !amount.is_finite() || amount < 0.0 {
            return 0.0;
        }
        amount
    }
}
