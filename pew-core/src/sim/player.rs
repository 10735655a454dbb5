use serde::Serialize;

use super::powerup::{ActivePowerUp, PowerUpKind};
use super::timer::decay;
use super::{Body, Vector2};
use crate::constants::{
    BASE_FIRE_RATE, GAME_HEIGHT, GAME_WIDTH, INVINCIBLE_DURATION, MOVING_FIRE_BONUS,
    PLAYER_SPEED, RAPIDFIRE_MULTIPLIER, STARTING_LIVES, TILE_SIZE,
};

/// Movement intent for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameInput {
    /// Unit length while moving, zero when idle.
    pub direction: Vector2,
}

impl FrameInput {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn toward(direction: Vector2) -> Self {
        Self {
            direction: direction.normalized(),
        }
    }

    /// Folds held direction keys into a normalised direction. Opposite keys
    /// cancel; diagonals are scaled back to unit length.
    pub fn from_keys(up: bool, down: bool, left: bool, right: bool) -> Self {
        let mut x = 0.0;
        let mut y = 0.0;
        if up {
            y -= 1.0;
        }
        if down {
            y += 1.0;
        }
        if left {
            x -= 1.0;
        }
        if right {
            x += 1.0;
        }
        Self::toward(Vector2::new(x, y))
    }

    pub fn is_moving(self) -> bool {
        !self.direction.is_zero()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Player {
    pub body: Body,
    pub lives: u32,
    pub speed: f64,
    /// Shots per second before bonuses.
    pub fire_rate: f64,
    pub fire_cooldown: f64,
    /// Last movement direction; also the shot direction while idle.
    pub direction: Vector2,
    pub invincible_timer: f64,
    pub active_power_ups: Vec<ActivePowerUp>,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        Self {
            body: Body::new(
                Vector2::new((GAME_WIDTH - TILE_SIZE) / 2.0, (GAME_HEIGHT - TILE_SIZE) / 2.0),
                TILE_SIZE,
            ),
            lives: STARTING_LIVES,
            speed: PLAYER_SPEED,
            fire_rate: BASE_FIRE_RATE,
            fire_cooldown: 0.0,
            direction: Vector2::new(0.0, 1.0),
            invincible_timer: 0.0,
            active_power_ups: Vec::new(),
        }
    }

    pub fn has_power_up(&self, kind: PowerUpKind) -> bool {
        self.active_power_ups.iter().any(|active| active.kind == kind)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    /// Moving bonus first, then rapidfire; the two multiply.
    pub fn effective_fire_rate(&self, moving: bool) -> f64 {
        let mut rate = self.fire_rate;
        if moving {
            rate *= MOVING_FIRE_BONUS;
        }
        if self.has_power_up(PowerUpKind::Rapidfire) {
            rate *= RAPIDFIRE_MULTIPLIER;
        }
        rate
    }

    /// Steps movement and timers. Returns the shot direction on frames where
    /// the auto-fire cooldown has run out.
    pub fn update(&mut self, input: FrameInput, dt: f64) -> Option<Vector2> {
        if !self.body.alive {
            return None;
        }

        let moving = input.is_moving();
        if moving {
            self.direction = input.direction;
            let pos = self.body.pos.add(input.direction.scale(self.speed * dt));
            self.body.pos = Vector2::new(
                pos.x.clamp(0.0, GAME_WIDTH - self.body.size),
                pos.y.clamp(0.0, GAME_HEIGHT - self.body.size),
            );
        }

        self.fire_cooldown = decay(self.fire_cooldown, dt);
        self.invincible_timer = decay(self.invincible_timer, dt);

        if self.fire_cooldown <= 0.0 {
            self.fire_cooldown = 1.0 / self.effective_fire_rate(moving);
            return Some(self.direction);
        }

        None
    }

    /// Consumes a life unless invincible. Returns whether a life was taken.
    pub fn hit(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        self.lives = self.lives.saturating_sub(1);
        if self.lives == 0 {
            self.body.alive = false;
        } else {
            self.invincible_timer = INVINCIBLE_DURATION;
        }
        true
    }
}
