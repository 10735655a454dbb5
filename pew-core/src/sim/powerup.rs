use serde::Serialize;

use super::bullet::Bullet;
use super::collision::check_collision;
use super::player::Player;
use super::roll::{RollEntry, RollTable};
use super::timer::decay;
use super::{Body, Vector2};
use crate::constants::{
    PIERCE_DURATION, POWERUP_DROP_CHANCE, POWERUP_MIN_WAVE, POWERUP_SIZE, RAPIDFIRE_DURATION,
    SPREAD_ANGLE, SPREAD_DURATION,
};
use crate::rng::RandomSource;

const POWERUP_ROLLS: RollTable<PowerUpKind> = RollTable {
    entries: &[
        RollEntry {
            min_wave: 5,
            below: 0.1,
            variant: PowerUpKind::Nuke,
        },
        RollEntry {
            min_wave: 0,
            below: 0.4,
            variant: PowerUpKind::Spread,
        },
        RollEntry {
            min_wave: 0,
            below: 0.7,
            variant: PowerUpKind::Rapidfire,
        },
    ],
    fallback: PowerUpKind::Pierce,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Spread,
    Rapidfire,
    Pierce,
    Nuke,
}

impl PowerUpKind {
    /// Effect length in seconds; zero for instant effects.
    pub const fn duration(self) -> f64 {
        match self {
            Self::Spread => SPREAD_DURATION,
            Self::Rapidfire => RAPIDFIRE_DURATION,
            Self::Pierce => PIERCE_DURATION,
            Self::Nuke => 0.0,
        }
    }
}

/// A pickup lying on the field.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PowerUp {
    pub body: Body,
    pub kind: PowerUpKind,
    pub duration: f64,
}

impl PowerUp {
    pub fn new(kind: PowerUpKind, pos: Vector2) -> Self {
        Self {
            body: Body::new(pos, POWERUP_SIZE),
            kind,
            duration: kind.duration(),
        }
    }
}

/// A timed effect held by the player.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub remaining: f64,
}

pub fn can_drop_power_up(wave: u32) -> bool {
    wave >= POWERUP_MIN_WAVE
}

/// Rolls for a drop at a kill position.
pub fn try_spawn_power_up(
    pos: Vector2,
    wave: u32,
    rng: &mut impl RandomSource,
) -> Option<PowerUp> {
    if !can_drop_power_up(wave) {
        return None;
    }
    if rng.next_f64() > POWERUP_DROP_CHANCE {
        return None;
    }
    let kind = POWERUP_ROLLS.roll(wave, rng);
    Some(PowerUp::new(kind, pos))
}

/// Marks every live pickup overlapping the player as taken and returns them
/// in field order.
pub fn collect_power_ups(player: &Player, power_ups: &mut [PowerUp]) -> Vec<PowerUp> {
    let mut collected = Vec::new();
    for power_up in power_ups.iter_mut().filter(|p| p.body.alive) {
        if check_collision(&player.body, &power_up.body) {
            power_up.body.alive = false;
            collected.push(*power_up);
        }
    }
    collected
}

/// Starts or refreshes a timed effect. Nuke is left to the engine, which
/// owns the enemy list.
pub fn apply_power_up(player: &mut Player, power_up: &PowerUp) {
    if power_up.kind == PowerUpKind::Nuke {
        return;
    }
    player
        .active_power_ups
        .retain(|active| active.kind != power_up.kind);
    player.active_power_ups.push(ActivePowerUp {
        kind: power_up.kind,
        remaining: power_up.duration,
    });
}

pub fn update_active_power_ups(player: &mut Player, dt: f64) {
    for active in &mut player.active_power_ups {
        active.remaining = decay(active.remaining, dt);
    }
    player.active_power_ups.retain(|active| active.remaining > 0.0);
}

pub fn prune_dead_power_ups(power_ups: &mut Vec<PowerUp>) {
    power_ups.retain(|power_up| power_up.body.alive);
}

/// Bullets for one shot. Spread fans three bullets; pierce applies to each.
pub fn create_player_bullets(player: &Player, fire_dir: Vector2) -> Vec<Bullet> {
    let pierce = player.has_power_up(PowerUpKind::Pierce);

    if player.has_power_up(PowerUpKind::Spread) {
        let angle = fire_dir.angle();
        return [-SPREAD_ANGLE, 0.0, SPREAD_ANGLE]
            .into_iter()
            .map(|offset| {
                Bullet::new(player.body.pos, Vector2::from_angle(angle + offset), true, pierce)
            })
            .collect();
    }

    vec![Bullet::new(player.body.pos, fire_dir, true, pierce)]
}
