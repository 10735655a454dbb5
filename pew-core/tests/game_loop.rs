use pew_core::constants::{BETWEEN_WAVE_DELAY, GAME_HEIGHT, GAME_WIDTH};
use pew_core::rng::RandomSource;
use pew_core::sim::{
    check_collision, create_player_bullets, prune_dead_bullets, prune_dead_enemies,
    update_bullets, update_enemies, Enemy, EnemyKind, FrameInput, GameEngine, GamePhase, Player,
    Vector2, WaveState,
};
use pew_core::{SeededRng, ThreadRandom};

const DT: f64 = 1.0 / 60.0;

#[test]
fn stationary_player_shoots_down_approaching_enemy() {
    let mut player = Player::new();
    player.direction = Vector2::new(1.0, 0.0);
    let mut bullets = Vec::new();
    let mut enemies = vec![Enemy::at(
        EnemyKind::Basic,
        player.body.pos.add(Vector2::new(50.0, 0.0)),
    )];
    let mut score = 0;

    for _ in 0..300 {
        if let Some(dir) = player.update(FrameInput::idle(), DT) {
            bullets.extend(create_player_bullets(&player, dir));
        }
        update_bullets(&mut bullets, DT);
        update_enemies(&mut enemies, player.body.pos, DT);

        for bullet in bullets.iter_mut().filter(|b| b.body.alive) {
            for enemy in enemies.iter_mut().filter(|e| e.body.alive) {
                if check_collision(&bullet.body, &enemy.body) {
                    bullet.body.alive = false;
                    if enemy.damage(bullet.damage) {
                        score += enemy.score;
                    }
                    break;
                }
            }
        }

        prune_dead_bullets(&mut bullets);
        prune_dead_enemies(&mut enemies);
        if score > 0 {
            break;
        }
    }

    assert_eq!(score, 10);
    assert!(enemies.is_empty());
    assert_eq!(player.lives, 3);
}

#[test]
fn enemy_on_last_life_ends_the_game() {
    let mut engine = GameEngine::new(SeededRng::new(7));
    engine.start();
    let pos = engine.state().player.body.pos;
    engine.state_mut().player.lives = 1;
    engine.state_mut().enemies.push(Enemy::at(EnemyKind::Tank, pos));

    let events = engine.update(FrameInput::idle(), DT);
    assert_eq!(engine.state().phase, GamePhase::GameOver);
    assert_eq!(engine.state().player.lives, 0);
    assert!(events.game_over.is_some());
}

#[test]
fn waves_grow_and_rest_between() {
    let mut wave = WaveState::new();
    assert!(!wave.update(0, DT));
    assert_eq!(wave.current, 1);

    let mut spawned = 0;
    let mut frames = 0;
    while wave.active && frames < 10_000 {
        if wave.update(0, DT) {
            spawned += 1;
        }
        frames += 1;
    }
    assert_eq!(spawned, 8);
    assert_eq!(wave.current, 1);

    let lull_frames = (BETWEEN_WAVE_DELAY / DT).ceil() as usize + 1;
    for _ in 0..lull_frames {
        wave.update(0, DT);
    }
    assert_eq!(wave.current, 2);
    assert_eq!(wave.enemies_remaining, 11);
    assert!(wave.spawn_interval < WaveState::spawn_interval_for(1));
}

#[test]
fn live_enemies_hold_the_wave_open() {
    let mut wave = WaveState::new();
    wave.start_next_wave();
    wave.enemies_remaining = 0;
    for _ in 0..600 {
        wave.update(3, DT);
    }
    assert!(wave.active);
    assert_eq!(wave.current, 1);
}

#[test]
fn long_seeded_run_keeps_world_consistent() {
    let mut engine = GameEngine::new(SeededRng::new(0x5EED));
    engine.start();
    run_checking_invariants(&mut engine);
}

#[test]
fn live_rng_run_keeps_world_consistent() {
    let mut engine = GameEngine::new(ThreadRandom);
    engine.start();
    run_checking_invariants(&mut engine);
    assert!(engine.state().wave.current >= 1);
}

fn run_checking_invariants<R: RandomSource>(engine: &mut GameEngine<R>) {
    let inputs = [
        FrameInput::from_keys(false, false, false, true),
        FrameInput::from_keys(true, false, false, false),
        FrameInput::from_keys(false, false, true, false),
        FrameInput::from_keys(false, true, false, false),
    ];

    let mut last_score = 0;
    for frame in 0..(60 * 120) {
        let events = engine.update(inputs[(frame / 45) % inputs.len()], DT);
        let state = engine.state();

        assert!(state.score >= last_score);
        last_score = state.score;
        assert!(state.player.lives <= 3);
        assert!(state.bullets.iter().all(|b| b.body.alive));
        assert!(state.enemies.iter().all(|e| e.body.alive && e.hp > 0));
        assert!(state.power_ups.iter().all(|p| p.body.alive));

        let p = state.player.body.pos;
        assert!((0.0..=GAME_WIDTH).contains(&p.x) && (0.0..=GAME_HEIGHT).contains(&p.y));

        if events.game_over.is_some() {
            assert_eq!(state.phase, GamePhase::GameOver);
            break;
        }
        assert_eq!(state.phase, GamePhase::Playing);
    }
}
