//! Реестр живых юнитов по командам
//!
//! Единственный на область симуляции (arena-style resource, не глобал).
//! Мутации немедленные: изменение видно следующему же вызову `enemies_of`
//! в том же тике, никакого отложенного коммита.

use bevy::prelude::*;

use crate::components::UnitTeam;

/// Реестр боевых юнитов: два упорядоченных списка, по одному на команду
///
/// Инварианты:
/// - юнит состоит максимум в одном списке и не более одного раза;
/// - мертвые юниты не регистрируются (проверку живости делают вызывающие
///   системы — реестр не видит Health).
#[derive(Resource, Debug, Default)]
pub struct BattleRegistry {
    team1: Vec<Entity>,
    team2: Vec<Entity>,
}

impl BattleRegistry {
    pub fn new() -> Self {
        Self {
            team1: Vec::with_capacity(32),
            team2: Vec::with_capacity(32),
        }
    }

    /// Регистрирует юнита в списке его команды (повторная регистрация — no-op)
    pub fn register(&mut self, team: UnitTeam, unit: Entity) {
        let roster = self.roster_mut(team);
        if roster.contains(&unit) {
            return;
        }
        roster.push(unit);
    }

    /// Убирает юнита из списка его команды (отсутствующий — no-op)
    pub fn unregister(&mut self, team: UnitTeam, unit: Entity) {
        self.roster_mut(team).retain(|&e| e != unit);
    }

    /// Текущий список врагов для команды — ссылка без копии
    ///
    /// Порядок стабилен (порядок регистрации); вызывающие не мутируют.
    pub fn enemies_of(&self, team: UnitTeam) -> &[Entity] {
        self.roster(team.opposing())
    }

    /// Список юнитов команды
    pub fn roster(&self, team: UnitTeam) -> &[Entity] {
        match team {
            UnitTeam::Team1 => &self.team1,
            UnitTeam::Team2 => &self.team2,
        }
    }

    pub fn team_count(&self, team: UnitTeam) -> usize {
        self.roster(team).len()
    }

    pub fn is_registered(&self, unit: Entity) -> bool {
        self.team1.contains(&unit) || self.team2.contains(&unit)
    }

    fn roster_mut(&mut self, team: UnitTeam) -> &mut Vec<Entity> {
        match team {
            UnitTeam::Team1 => &mut self.team1,
            UnitTeam::Team2 => &mut self.team2,
        }
    }
}
