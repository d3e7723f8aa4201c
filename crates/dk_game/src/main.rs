//! Headless runner for the barrel-climbing platformer.
//!
//! Loads the game config and every level it lists, then plays the levels in
//! order. Each level runs one simulation step per frame until it is won or
//! lost; the next level is only entered after a win.
//!
//! Input comes from `<replay_dir>/<level_id>.json` through `InputState`, so
//! jump and fire see the same press edges a keyboard would produce. Once the
//! replay runs out (or if a level has none) the player stands still until the
//! level's timer expires.
//!
//! Usage: `dk_game [config.json] [replay_dir]`

mod collision;
mod config;
mod entity;
mod level;
mod level_data;
mod patrol;
mod physics;
mod player;
mod projectile;
mod props;
mod render;
mod replay;

use std::path::{Path, PathBuf};

use dk_core::input::{InputState, Key};
use dk_core::time::FRAMES_PER_SECOND;

use config::{load_config_from_path, GameConfig};
use level::{Level, LevelEvent, LevelStatus};
use level_data::{load_level_from_path, LevelFile};
use player::PlayerInput;
use render::LogSink;
use replay::{load_replay_from_path, ReplaySequence};

const CONFIG_PATH: &str = "assets/config/game.json";
const REPLAY_DIR: &str = "assets/replays";

#[derive(Debug, Clone, Copy)]
struct LevelOutcome {
    status: LevelStatus,
    score: u32,
    frames: u64,
    quit: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("dk_game starting...");

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map_or_else(|| PathBuf::from(CONFIG_PATH), PathBuf::from);
    let replay_dir = args.next().map_or_else(|| PathBuf::from(REPLAY_DIR), PathBuf::from);

    if let Err(err) = run(&config_path, &replay_dir) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn run(config_path: &Path, replay_dir: &Path) -> Result<(), String> {
    let config = load_config_from_path(config_path)?;
    let levels = config
        .levels
        .iter()
        .map(|path| load_level_from_path(Path::new(path)))
        .collect::<Result<Vec<LevelFile>, String>>()?;
    let replays = levels
        .iter()
        .map(|data| load_level_replay(replay_dir, &data.level_id))
        .collect::<Result<Vec<_>, String>>()?;

    log::info!(
        "Loaded {} level(s) from {}",
        levels.len(),
        config_path.display()
    );

    let mut total_score = 0;
    let mut cleared = 0;
    for (data, replay) in levels.iter().zip(&replays) {
        let outcome = play_level(data, &config, replay.as_ref());
        total_score += outcome.score;
        log::info!(
            "Level '{}' finished {:?} after {} frames, score {}",
            data.level_id,
            outcome.status,
            outcome.frames,
            outcome.score
        );
        if outcome.quit {
            log::info!("Quit requested, stopping");
            break;
        }
        if outcome.status != LevelStatus::Won {
            break;
        }
        cleared += 1;
    }

    if cleared == levels.len() {
        log::info!("All {cleared} level(s) cleared. Final score {total_score}");
    } else {
        log::info!(
            "Game over after {cleared} of {} level(s). Final score {total_score}",
            levels.len()
        );
    }
    Ok(())
}

fn load_level_replay(replay_dir: &Path, level_id: &str) -> Result<Option<ReplaySequence>, String> {
    let path = replay_dir.join(format!("{level_id}.json"));
    if !path.exists() {
        log::warn!(
            "No replay at {} for level '{level_id}'. The player will stand still.",
            path.display()
        );
        return Ok(None);
    }
    let replay = load_replay_from_path(&path)?;
    log::info!(
        "Replay for level '{level_id}': {} frame(s) from {}",
        replay.expanded_keys().len(),
        path.display()
    );
    Ok(Some(replay))
}

fn play_level(
    data: &LevelFile,
    config: &GameConfig,
    replay: Option<&ReplaySequence>,
) -> LevelOutcome {
    let mut level = Level::from_data(data, config);
    let mut input = InputState::new();
    let mut sink = LogSink::new();
    let mut script = replay
        .map(ReplaySequence::expanded_keys)
        .unwrap_or_default()
        .into_iter();

    log::info!(
        "Starting level '{}' ({} seconds on the clock)",
        level.id(),
        level.seconds_left()
    );

    let mut quit = false;
    while level.status() == LevelStatus::Running {
        input.apply_held(&script.next().unwrap_or_default());
        if input.is_just_pressed(Key::Escape) {
            quit = true;
            break;
        }

        level.step(&PlayerInput::from_state(&input));
        for event in level.events() {
            log_event(event);
        }
        level.render(&mut sink);

        if level.frame() % FRAMES_PER_SECOND == 0 {
            log::debug!(
                "HUD score {} time {} boss {} ammo {} ({} sprites)",
                level.score(),
                level.seconds_left(),
                level.boss_health(),
                level.ammo(),
                sink.sprite_count()
            );
        }

        input.end_frame();
    }

    LevelOutcome {
        status: level.status(),
        score: level.score(),
        frames: level.frame(),
        quit,
    }
}

fn log_event(event: &LevelEvent) {
    match event {
        LevelEvent::PlayerKilled { by } => log::debug!("Game over: touched by {by:?}"),
        LevelEvent::TimeUp => log::debug!("Game over: time is up"),
        LevelEvent::BossHit { health_left } => log::debug!("Boss hit, {health_left} left"),
        LevelEvent::ItemCollected(kind) => log::debug!("{kind:?} collected"),
        other => log::trace!("{other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use level_data::LevelRules;

    fn workspace_root() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("../..")
    }

    #[test]
    fn shipped_replays_clear_every_level() {
        let root = workspace_root();
        let config = load_config_from_path(&root.join(CONFIG_PATH)).expect("shipped config loads");
        assert_eq!(config.levels.len(), 2);

        let mut total_score = 0;
        let mut rules = Vec::new();
        for path in &config.levels {
            let data = load_level_from_path(&root.join(path)).expect("shipped level loads");
            let replay = load_level_replay(&root.join(REPLAY_DIR), &data.level_id)
                .expect("shipped replay loads")
                .expect("every shipped level has a replay");

            let outcome = play_level(&data, &config, Some(&replay));
            assert_eq!(outcome.status, LevelStatus::Won, "level {}", data.level_id);
            assert!(!outcome.quit);
            total_score += outcome.score;
            rules.push(data.rules);
        }

        assert_eq!(rules, vec![LevelRules::ReachBoss, LevelRules::ReachOrDefeatBoss]);
        assert_eq!(total_score, 200);
    }

    #[test]
    fn missing_replay_is_not_an_error() {
        let dir = workspace_root().join("assets/no_such_replays");
        assert!(load_level_replay(&dir, "level1").unwrap().is_none());
    }
}
