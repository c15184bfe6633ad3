//! Боевая подсистема
//!
//! Разделение ответственности:
//! - attacker: cooldown-таймер и предикаты дистанции/валидности цели
//! - executor: закрытый набор исполнителей атаки (melee / зарезервированный ranged)
//! - events: уведомления для presentation-слоя (fire-and-forget)
//! - damage: применение урона, переход в смерть, отложенная деактивация, respawn

pub mod attacker;
pub mod damage;
pub mod events;
pub mod executor;

// Re-export основных типов
pub use attacker::{
    is_valid_attack_target, stopping_distance, surface_distance, tick_attack_cooldowns,
    try_start_attack, Attacker, STOP_EPSILON,
};
pub use damage::{
    execute_attacks, halt_dead_units, handle_revive_requests, tick_pending_deactivation,
};
pub use events::{AttackStarted, DamageDealt, ReviveUnit, UnitDied};
pub use executor::AttackExecutor;
