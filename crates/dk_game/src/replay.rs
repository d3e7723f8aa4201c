use dk_core::input::Key;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Scripted input for headless runs. Each frame lists the keys held down;
/// press edges come from comparing consecutive frames.
#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReplayFrame {
    #[serde(default)]
    pub left: bool,
    #[serde(default)]
    pub right: bool,
    #[serde(default)]
    pub up: bool,
    #[serde(default)]
    pub down: bool,
    #[serde(default)]
    pub jump: bool,
    #[serde(default)]
    pub fire: bool,
    #[serde(default)]
    pub quit: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplayFrame {
    pub fn held_keys(&self) -> Vec<Key> {
        [
            (self.left, Key::Left),
            (self.right, Key::Right),
            (self.up, Key::Up),
            (self.down, Key::Down),
            (self.jump, Key::Jump),
            (self.fire, Key::Fire),
            (self.quit, Key::Escape),
        ]
        .into_iter()
        .filter_map(|(held, key)| held.then_some(key))
        .collect()
    }
}

impl ReplaySequence {
    /// One held-key set per simulated frame.
    pub fn expanded_keys(&self) -> Vec<Vec<Key>> {
        let mut out = Vec::new();
        for frame in &self.frames {
            let keys = frame.held_keys();
            for _ in 0..frame.repeat.max(1) {
                out.push(keys.clone());
            }
        }
        out
    }
}

pub fn load_replay_from_path(path: &Path) -> Result<ReplaySequence, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    let replay: ReplaySequence = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse replay JSON {}: {e}", path.display()))?;
    validate_replay(&replay)?;
    Ok(replay)
}

fn validate_replay(replay: &ReplaySequence) -> Result<(), String> {
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    if replay.frames.iter().any(|f| f.left && f.right) {
        log::warn!("Replay holds left and right together; left wins.");
    }
    Ok(())
}

const fn default_repeat() -> u32 {
    1
}
