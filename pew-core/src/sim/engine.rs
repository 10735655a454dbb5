use serde::Serialize;

use super::bullet::{prune_dead_bullets, update_bullets, Bullet};
use super::collision::check_collision;
use super::enemy::{prune_dead_enemies, update_enemies, Enemy};
use super::player::{FrameInput, Player};
use super::powerup::{
    apply_power_up, collect_power_ups, create_player_bullets, prune_dead_power_ups,
    try_spawn_power_up, update_active_power_ups, PowerUp, PowerUpKind,
};
use super::wave::{enemy_kind_for_wave, WaveState};
use crate::clock::FrameClock;
use crate::rng::RandomSource;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Title,
    Playing,
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameState {
    pub phase: GamePhase,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    pub power_ups: Vec<PowerUp>,
    pub wave: WaveState,
    pub score: u32,
    /// Seconds spent in the playing phase.
    pub time: f64,
    /// Id handed to the next enemy that joins the field.
    pub next_enemy_id: u32,
}

impl GameState {
    pub fn new(phase: GamePhase) -> Self {
        Self {
            phase,
            player: Player::new(),
            bullets: Vec::new(),
            enemies: Vec::new(),
            power_ups: Vec::new(),
            wave: WaveState::new(),
            score: 0,
            time: 0.0,
            next_enemy_id: 1,
        }
    }

    /// Adds an enemy to the field under a fresh id and returns the id.
    pub fn push_enemy(&mut self, enemy: Enemy) -> u32 {
        enlist(&mut self.enemies, &mut self.next_enemy_id, enemy)
    }
}

fn enlist(enemies: &mut Vec<Enemy>, next_id: &mut u32, mut enemy: Enemy) -> u32 {
    enemy.id = *next_id;
    *next_id = next_id.wrapping_add(1).max(1);
    enemies.push(enemy);
    enemy.id
}

/// What changed during one step, for the HUD.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameEvents {
    pub score_changed: Option<u32>,
    pub lives_changed: Option<u32>,
    pub wave_started: Option<u32>,
    /// Final score, set on the frame the player dies.
    pub game_over: Option<u32>,
    pub kills: u32,
    pub power_ups_collected: Vec<PowerUpKind>,
}

pub struct GameEngine<R> {
    state: GameState,
    clock: FrameClock,
    rng: R,
}

impl<R: RandomSource> GameEngine<R> {
    pub fn new(rng: R) -> Self {
        Self {
            state: GameState::new(GamePhase::Title),
            clock: FrameClock::new(),
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    /// Leaves the title screen, or begins a fresh game after game over.
    pub fn start(&mut self) -> FrameEvents {
        match self.state.phase {
            GamePhase::Playing => return FrameEvents::default(),
            GamePhase::Title => self.state.phase = GamePhase::Playing,
            GamePhase::GameOver => self.state = GameState::new(GamePhase::Playing),
        }
        self.clock.reset();
        FrameEvents {
            score_changed: Some(self.state.score),
            lives_changed: Some(self.state.player.lives),
            ..FrameEvents::default()
        }
    }

    /// Throws away the current game, whatever its phase, and starts a new one.
    pub fn restart(&mut self) -> FrameEvents {
        self.state = GameState::new(GamePhase::GameOver);
        self.start()
    }

    /// Steps one display frame stamped `now_ms`.
    pub fn frame(&mut self, now_ms: f64, input: FrameInput) -> FrameEvents {
        let dt = self.clock.tick(now_ms);
        self.update(input, dt)
    }

    /// Steps the simulation by `dt` seconds. Does nothing outside the
    /// playing phase.
    pub fn update(&mut self, input: FrameInput, dt: f64) -> FrameEvents {
        let mut events = FrameEvents::default();
        if self.state.phase != GamePhase::Playing {
            return events;
        }

        let GameState {
            phase,
            player,
            bullets,
            enemies,
            power_ups,
            wave,
            score,
            time,
            next_enemy_id,
        } = &mut self.state;
        let rng = &mut self.rng;
        let start_score = *score;

        *time += dt;
        update_active_power_ups(player, dt);

        if let Some(fire_dir) = player.update(input, dt) {
            bullets.extend(create_player_bullets(player, fire_dir));
        }

        update_bullets(bullets, dt);

        let prev_wave = wave.current;
        if wave.update(enemies.len(), dt) {
            let kind = enemy_kind_for_wave(wave.current, rng);
            enlist(enemies, next_enemy_id, Enemy::spawn(kind, rng));
        }
        if wave.current != prev_wave {
            events.wave_started = Some(wave.current);
        }

        update_enemies(enemies, player.body.pos, dt);

        for bullet in bullets.iter_mut() {
            if !bullet.body.alive || !bullet.from_player {
                continue;
            }
            for enemy in enemies.iter_mut() {
                if !enemy.body.alive || !check_collision(&bullet.body, &enemy.body) {
                    continue;
                }
                // A piercing bullet damages each enemy once, however many
                // frames it spends inside it.
                if bullet.pierce && !bullet.register_hit(enemy.id) {
                    continue;
                }
                if !bullet.pierce {
                    bullet.body.alive = false;
                }
                if enemy.damage(bullet.damage) {
                    *score += enemy.score;
                    events.kills += 1;
                    if let Some(drop) = try_spawn_power_up(enemy.body.pos, wave.current, rng) {
                        power_ups.push(drop);
                    }
                }
                if !bullet.pierce {
                    break;
                }
            }
        }

        for power_up in collect_power_ups(player, power_ups) {
            if power_up.kind == PowerUpKind::Nuke {
                for enemy in enemies.iter_mut().filter(|enemy| enemy.body.alive) {
                    enemy.body.alive = false;
                    *score += enemy.score;
                    events.kills += 1;
                }
            } else {
                apply_power_up(player, &power_up);
            }
            events.power_ups_collected.push(power_up.kind);
        }

        for enemy in enemies.iter_mut() {
            if !enemy.body.alive || !check_collision(&enemy.body, &player.body) {
                continue;
            }
            if player.hit() {
                enemy.body.alive = false;
                events.lives_changed = Some(player.lives);
                if !player.body.alive {
                    *phase = GamePhase::GameOver;
                    events.game_over = Some(*score);
                    break;
                }
            }
        }

        if *score != start_score {
            events.score_changed = Some(*score);
        }

        prune_dead_bullets(bullets);
        prune_dead_enemies(enemies);
        prune_dead_power_ups(power_ups);

        events
    }
}
