use serde::Serialize;

use super::{Body, Vector2};
use crate::constants::{
    BULLET_DAMAGE, BULLET_SIZE, BULLET_SPEED, GAME_HEIGHT, GAME_WIDTH, TILE_SIZE,
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Bullet {
    pub body: Body,
    pub velocity: Vector2,
    pub damage: i32,
    pub from_player: bool,
    /// Survives enemy contact.
    pub pierce: bool,
    /// Ids of enemies this bullet has already damaged.
    pub hits: Vec<u32>,
}

impl Bullet {
    /// Spawns a bullet centred on the tile whose top-left corner is `origin`.
    pub fn new(origin: Vector2, direction: Vector2, from_player: bool, pierce: bool) -> Self {
        let offset = TILE_SIZE / 2.0 - BULLET_SIZE / 2.0;
        Self {
            body: Body::new(origin.add(Vector2::new(offset, offset)), BULLET_SIZE),
            velocity: direction.scale(BULLET_SPEED),
            damage: BULLET_DAMAGE,
            from_player,
            pierce,
            hits: Vec::new(),
        }
    }

    /// Records a hit on `enemy_id`. Returns false if that enemy was already hit.
    pub fn register_hit(&mut self, enemy_id: u32) -> bool {
        if self.hits.contains(&enemy_id) {
            return false;
        }
        self.hits.push(enemy_id);
        true
    }

    fn out_of_bounds(&self) -> bool {
        let margin = self.body.size;
        let pos = self.body.pos;
        pos.x < -margin
            || pos.x > GAME_WIDTH + margin
            || pos.y < -margin
            || pos.y > GAME_HEIGHT + margin
    }
}

pub fn update_bullets(bullets: &mut [Bullet], dt: f64) {
    for bullet in bullets.iter_mut().filter(|bullet| bullet.body.alive) {
        bullet.body.pos = bullet.body.pos.add(bullet.velocity.scale(dt));
        if bullet.out_of_bounds() {
            bullet.body.alive = false;
        }
    }
}

pub fn prune_dead_bullets(bullets: &mut Vec<Bullet>) {
    bullets.retain(|bullet| bullet.body.alive);
}
