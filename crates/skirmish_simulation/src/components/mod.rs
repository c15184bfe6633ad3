//! ECS Components боевых юнитов
//!
//! Организация по доменам:
//! - unit: идентичность, команда, activity lifecycle (Inactive, PendingDeactivation)
//! - stats: неизменяемые authoring-данные (UnitStats, AttackType)
//! - health: хит-поинты и переход в смерть
//! - movement: скорость и цель преследования (Velocity, Mover)

pub mod health;
pub mod movement;
pub mod stats;
pub mod unit;

// Re-exports для удобного импорта
pub use health::*;
pub use movement::*;
pub use stats::*;
pub use unit::*;
