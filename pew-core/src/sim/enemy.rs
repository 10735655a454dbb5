use serde::Serialize;

use super::{Body, Vector2};
use crate::constants::{ENEMY_MIN_MOVE_DIST, GAME_HEIGHT, GAME_WIDTH, TILE_SIZE};
use crate::rng::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemyKind {
    Basic,
    Fast,
    Tank,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyStats {
    pub speed: f64,
    pub hp: i32,
    pub score: u32,
}

impl EnemyKind {
    pub const fn stats(self) -> EnemyStats {
        match self {
            Self::Basic => EnemyStats {
                speed: 35.0,
                hp: 1,
                score: 10,
            },
            Self::Fast => EnemyStats {
                speed: 65.0,
                hp: 1,
                score: 15,
            },
            Self::Tank => EnemyStats {
                speed: 20.0,
                hp: 3,
                score: 30,
            },
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Enemy {
    /// Assigned by the engine when the enemy joins the field; 0 until then.
    pub id: u32,
    pub body: Body,
    pub kind: EnemyKind,
    pub speed: f64,
    pub hp: i32,
    pub max_hp: i32,
    pub score: u32,
}

impl Enemy {
    pub fn at(kind: EnemyKind, pos: Vector2) -> Self {
        let stats = kind.stats();
        Self {
            id: 0,
            body: Body::new(pos, TILE_SIZE),
            kind,
            speed: stats.speed,
            hp: stats.hp,
            max_hp: stats.hp,
            score: stats.score,
        }
    }

    /// Spawns just outside a uniformly chosen board edge.
    pub fn spawn(kind: EnemyKind, rng: &mut impl RandomSource) -> Self {
        Self::at(kind, random_edge_position(rng))
    }

    /// Applies damage. Returns true when this hit killed the enemy.
    pub fn damage(&mut self, amount: i32) -> bool {
        self.hp -= amount;
        if self.hp <= 0 {
            self.body.alive = false;
            return true;
        }
        false
    }
}

fn random_edge_position(rng: &mut impl RandomSource) -> Vector2 {
    let edge = (rng.next_f64() * 4.0) as u32;
    let along = rng.next_f64();
    match edge {
        0 => Vector2::new(along * (GAME_WIDTH - TILE_SIZE), -TILE_SIZE),
        1 => Vector2::new(along * (GAME_WIDTH - TILE_SIZE), GAME_HEIGHT),
        2 => Vector2::new(-TILE_SIZE, along * (GAME_HEIGHT - TILE_SIZE)),
        _ => Vector2::new(GAME_WIDTH, along * (GAME_HEIGHT - TILE_SIZE)),
    }
}

/// Moves every live enemy straight at the player at its fixed speed.
pub fn update_enemies(enemies: &mut [Enemy], player_pos: Vector2, dt: f64) {
    for enemy in enemies.iter_mut().filter(|enemy| enemy.body.alive) {
        let delta = player_pos.sub(enemy.body.pos);
        let dist = delta.length();
        if dist > ENEMY_MIN_MOVE_DIST {
            enemy.body.pos = enemy.body.pos.add(delta.scale(enemy.speed * dt / dist));
        }
    }
}

pub fn prune_dead_enemies(enemies: &mut Vec<Enemy>) {
    enemies.retain(|enemy| enemy.body.alive);
}
