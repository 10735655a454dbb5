use serde::Serialize;

use super::enemy::EnemyKind;
use super::roll::{RollEntry, RollTable};
use crate::constants::{
    BASE_ENEMIES, BETWEEN_WAVE_DELAY, ENEMIES_PER_WAVE, SPAWN_INTERVAL_BASE, SPAWN_INTERVAL_MIN,
    SPAWN_INTERVAL_STEP,
};
use crate::rng::RandomSource;

// Tank and fast share one draw: at wave 5+ fast covers [0.15, 0.35).
const ENEMY_ROLLS: RollTable<EnemyKind> = RollTable {
    entries: &[
        RollEntry {
            min_wave: 5,
            below: 0.15,
            variant: EnemyKind::Tank,
        },
        RollEntry {
            min_wave: 3,
            below: 0.35,
            variant: EnemyKind::Fast,
        },
    ],
    fallback: EnemyKind::Basic,
};

/// Spawn scheduler. `active == false` is the lull between waves.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct WaveState {
    pub current: u32,
    pub enemies_remaining: u32,
    pub spawn_timer: f64,
    pub spawn_interval: f64,
    pub between_wave_timer: f64,
    pub active: bool,
}

impl Default for WaveState {
    fn default() -> Self {
        Self::new()
    }
}

impl WaveState {
    /// The lull timer starts full, so wave 1 begins on the first tick.
    pub fn new() -> Self {
        Self {
            current: 0,
            enemies_remaining: 0,
            spawn_timer: 0.0,
            spawn_interval: SPAWN_INTERVAL_BASE,
            between_wave_timer: BETWEEN_WAVE_DELAY,
            active: false,
        }
    }

    pub fn enemies_in_wave(wave: u32) -> u32 {
        BASE_ENEMIES + wave * ENEMIES_PER_WAVE
    }

    pub fn spawn_interval_for(wave: u32) -> f64 {
        (SPAWN_INTERVAL_BASE - f64::from(wave) * SPAWN_INTERVAL_STEP).max(SPAWN_INTERVAL_MIN)
    }

    pub fn start_next_wave(&mut self) {
        self.current += 1;
        self.enemies_remaining = Self::enemies_in_wave(self.current);
        self.spawn_interval = Self::spawn_interval_for(self.current);
        self.spawn_timer = 0.0;
        self.between_wave_timer = 0.0;
        self.active = true;
    }

    /// Advances the scheduler by `dt`. Returns true when one enemy should be
    /// spawned this tick.
    ///
    /// At most one spawn is signalled per call; surplus time stays in
    /// `spawn_timer` and produces the next spawn on the following tick.
    pub fn update(&mut self, live_enemies: usize, dt: f64) -> bool {
        if !self.active {
            self.between_wave_timer += dt;
            if self.between_wave_timer >= BETWEEN_WAVE_DELAY {
                self.start_next_wave();
            }
            return false;
        }

        if self.enemies_remaining == 0 {
            if live_enemies == 0 {
                self.active = false;
                self.between_wave_timer = 0.0;
            }
            return false;
        }

        self.spawn_timer += dt;
        if self.spawn_timer >= self.spawn_interval {
            self.spawn_timer -= self.spawn_interval;
            self.enemies_remaining -= 1;
            return true;
        }

        false
    }
}

/// Enemy kind for the next spawn, from a single uniform draw.
pub fn enemy_kind_for_wave(wave: u32, rng: &mut impl RandomSource) -> EnemyKind {
    ENEMY_ROLLS.roll(wave, rng)
}
