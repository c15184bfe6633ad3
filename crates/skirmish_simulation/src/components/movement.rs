//! Компоненты движения: скорость и цель преследования

use bevy::prelude::*;

/// Текущая линейная скорость (м/с)
///
/// Интегрируется в Transform каждый физический тик.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec3);

/// Преследование цели
///
/// Движение строго планарное (x, z); высота `fixed_elevation`,
/// снятая при spawn, сохраняется неизменной от тика к тику.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Mover {
    move_target: Option<Entity>,
    pub fixed_elevation: f32,
}

impl Mover {
    pub fn new(fixed_elevation: f32) -> Self {
        Self {
            move_target: None,
            fixed_elevation,
        }
    }

    pub fn move_target(&self) -> Option<Entity> {
        self.move_target
    }

    /// Записывает цель преследования
    pub fn set_move_target(&mut self, target: Entity) {
        self.move_target = Some(target);
    }

    /// Сбрасывает цель преследования (скорость обнуляет вызывающий)
    pub fn stop(&mut self) {
        self.move_target = None;
    }
}
