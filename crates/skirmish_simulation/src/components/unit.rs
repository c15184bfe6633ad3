//! Базовые компоненты юнита: команда, идентичность, activity lifecycle

use bevy::prelude::*;

/// Команда (фракция) юнита. Ровно две противоборствующие стороны.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum UnitTeam {
    Team1,
    Team2,
}

impl UnitTeam {
    /// Противоположная команда
    pub fn opposing(self) -> Self {
        match self {
            UnitTeam::Team1 => UnitTeam::Team2,
            UnitTeam::Team2 => UnitTeam::Team1,
        }
    }
}

/// Корневой компонент боевого юнита
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Unit {
    pub team: UnitTeam,
}

/// Прокси коллайдера: радиус тела юнита
///
/// Дистанции для range-проверок считаются между поверхностями тел,
/// а не между центрами.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct BodyRadius(pub f32);

impl Default for BodyRadius {
    fn default() -> Self {
        Self(0.5)
    }
}

/// Маркер: юнит выключен из симуляции (пул, деактивация после смерти)
///
/// Выключенный юнит невидим для таргетинга, не двигается и не атакует.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Inactive;

/// Отложенная деактивация после смерти
///
/// Мертвый юнит остается "присутствующим" ровно один тик, чтобы
/// одновременный размен ударами успел разрешиться.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDeactivation {
    pub ticks_remaining: u32,
}

impl PendingDeactivation {
    /// Деактивация на следующем тике
    pub fn next_tick() -> Self {
        Self { ticks_remaining: 1 }
    }
}
