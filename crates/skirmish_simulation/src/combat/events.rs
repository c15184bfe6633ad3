//! Боевые события
//!
//! Синхронные fire-and-forget уведомления: ядро не ждет ответа,
//! presentation-слой (UI, звук, эффекты) читает их как хочет.

use bevy::prelude::*;

/// Событие: атака начата (cooldown сброшен, executor вызван)
#[derive(Event, Debug, Clone, Copy)]
pub struct AttackStarted {
    pub attacker: Entity,
    pub target: Entity,
}

/// Событие: урон применен к юниту
#[derive(Event, Debug, Clone, Copy)]
pub struct DamageDealt {
    pub target: Entity,
    /// Источник урона (None для урона без атакующего)
    pub source: Option<Entity>,
    /// Фактически примененный урон (после санитизации)
    pub amount: f32,
    pub remaining_hp: f32,
}

/// Событие: юнит умер
#[derive(Event, Debug, Clone, Copy)]
pub struct UnitDied {
    pub unit: Entity,
    pub killer: Option<Entity>,
}

/// Входящее событие: вернуть юнита в строй (respawn/пулинг)
#[derive(Event, Debug, Clone, Copy)]
pub struct ReviveUnit {
    pub unit: Entity,
}
