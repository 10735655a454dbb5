//! Frame-stepped simulation core.
//!
//! Every entity embeds a [`Body`]; collections own their entities and drop
//! them on prune once `alive` goes false. Nothing in here is fallible.

use serde::Serialize;

pub mod bullet;
pub mod collision;
pub mod enemy;
pub mod engine;
pub mod player;
pub mod powerup;
pub mod roll;
pub mod timer;
pub mod wave;

pub use bullet::{prune_dead_bullets, update_bullets, Bullet};
pub use collision::check_collision;
pub use enemy::{prune_dead_enemies, update_enemies, Enemy, EnemyKind, EnemyStats};
pub use engine::{FrameEvents, GameEngine, GamePhase, GameState};
pub use player::{FrameInput, Player};
pub use powerup::{
    apply_power_up, can_drop_power_up, collect_power_ups, create_player_bullets,
    prune_dead_power_ups, try_spawn_power_up, update_active_power_ups, ActivePowerUp, PowerUp,
    PowerUpKind,
};
pub use wave::{enemy_kind_for_wave, WaveState};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn from_angle(angle: f64) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn angle(self) -> f64 {
        self.y.atan2(self.x)
    }

    /// Unit vector in the same direction, or zero for a zero vector.
    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0 {
            self.scale(1.0 / len)
        } else {
            Self::ZERO
        }
    }

    pub fn add(self, other: Self) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub(self, other: Self) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

/// Shared entity state: top-left position, square side length, liveness.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Body {
    pub pos: Vector2,
    pub size: f64,
    pub alive: bool,
}

impl Body {
    pub fn new(pos: Vector2, size: f64) -> Self {
        Self {
            pos,
            size,
            alive: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalized_diagonal_is_unit_length() {
        let v = Vector2::new(1.0, -1.0).normalized();
        assert!((v.length() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_zero_stays_zero() {
        assert!(Vector2::ZERO.normalized().is_zero());
    }
}
