//! Game and anti-cheat constants.
//!
//! Distances are in board units (one unit is one pixel of the 320x320 play
//! field), times are in seconds unless the name says otherwise.

// World dimensions
pub const GAME_WIDTH: f64 = 320.0;
pub const GAME_HEIGHT: f64 = 320.0;
pub const TILE_SIZE: f64 = 16.0;

// Frame stepping
pub const MAX_FRAME_DT: f64 = 0.05; // 50ms cap after a stall

// Player
pub const STARTING_LIVES: u32 = 3;
pub const PLAYER_SPEED: f64 = 80.0;
pub const BASE_FIRE_RATE: f64 = 4.0; // shots per second
pub const MOVING_FIRE_BONUS: f64 = 1.1;
pub const RAPIDFIRE_MULTIPLIER: f64 = 2.0;
pub const INVINCIBLE_DURATION: f64 = 1.5;

// Bullets
pub const BULLET_SPEED: f64 = 200.0;
pub const BULLET_SIZE: f64 = 3.0;
pub const BULLET_DAMAGE: i32 = 1;

// Enemies
pub const ENEMY_MIN_MOVE_DIST: f64 = 1.0;

// Waves
pub const BASE_ENEMIES: u32 = 5;
pub const ENEMIES_PER_WAVE: u32 = 3;
pub const SPAWN_INTERVAL_BASE: f64 = 1.2;
pub const SPAWN_INTERVAL_STEP: f64 = 0.05;
pub const SPAWN_INTERVAL_MIN: f64 = 0.3;
pub const BETWEEN_WAVE_DELAY: f64 = 2.0;

// Power-ups
pub const POWERUP_SIZE: f64 = 10.0;
pub const POWERUP_DROP_CHANCE: f64 = 0.25;
pub const POWERUP_MIN_WAVE: u32 = 3;
pub const SPREAD_DURATION: f64 = 6.0;
pub const RAPIDFIRE_DURATION: f64 = 5.0;
pub const PIERCE_DURATION: f64 = 6.0;
pub const SPREAD_ANGLE: f64 = core::f64::consts::PI / 8.0; // 22.5 degrees

// Anti-cheat
pub const MAX_USED_SESSIONS: usize = 10_000;
pub const SESSION_ID_BYTES: usize = 16;
pub const NAME_MIN_LEN: usize = 3;
pub const NAME_MAX_LEN: usize = 8;
pub const MIN_GAME_SECS: f64 = 2.0;
pub const MAX_SCORE_PER_ENEMY: i64 = 30; // tank
pub const NUKE_SCORE_BUFFER_NUM: i128 = 3; // x1.5
pub const NUKE_SCORE_BUFFER_DEN: i128 = 2;
pub const MAX_SCORE_PER_SEC: f64 = 200.0;
