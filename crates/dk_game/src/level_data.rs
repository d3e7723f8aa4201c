use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::entity::Facing;

#[derive(Debug, Deserialize, Clone)]
pub struct LevelFile {
    pub version: String,
    pub level_id: String,
    #[serde(default)]
    pub rules: LevelRules,
    pub mario: SpawnPoint,
    pub donkey: SpawnPoint,
    /// Order matters: the first platform a body overlaps is the one it lands on.
    #[serde(default)]
    pub platforms: Vec<SpawnPoint>,
    #[serde(default)]
    pub ladders: Vec<SpawnPoint>,
    #[serde(default)]
    pub barrels: Vec<SpawnPoint>,
    #[serde(default)]
    pub hammer: Option<SpawnPoint>,
    #[serde(default)]
    pub blasters: Vec<SpawnPoint>,
    #[serde(default)]
    pub normal_monkeys: Vec<MonkeySpawn>,
    #[serde(default)]
    pub intelligent_monkeys: Vec<MonkeySpawn>,
}

/// How a level can be won.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LevelRules {
    /// Reach the boss while holding the hammer.
    #[default]
    ReachBoss,
    /// Reach the boss with the hammer, or shoot its health down to zero.
    ReachOrDefeatBoss,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MonkeySpawn {
    pub x: f32,
    pub y: f32,
    #[serde(default = "default_direction")]
    pub direction: Facing,
    /// Segment lengths walked before each turn.
    #[serde(default)]
    pub route: Vec<u32>,
}

impl LevelFile {
    fn spawn_points(&self) -> impl Iterator<Item = (&'static str, SpawnPoint)> + '_ {
        let monkeys = self
            .normal_monkeys
            .iter()
            .chain(&self.intelligent_monkeys)
            .map(|m| ("monkey", SpawnPoint { x: m.x, y: m.y }));

        [("mario", self.mario), ("donkey", self.donkey)]
            .into_iter()
            .chain(self.platforms.iter().map(|p| ("platform", *p)))
            .chain(self.ladders.iter().map(|p| ("ladder", *p)))
            .chain(self.barrels.iter().map(|p| ("barrel", *p)))
            .chain(self.hammer.iter().map(|p| ("hammer", *p)))
            .chain(self.blasters.iter().map(|p| ("blaster", *p)))
            .chain(monkeys)
    }
}

pub fn load_level_from_path(level_path: &Path) -> Result<LevelFile, String> {
    let raw = fs::read_to_string(level_path)
        .map_err(|e| format!("Failed to read level file {}: {e}", level_path.display()))?;
    let level: LevelFile = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse level JSON {}: {e}", level_path.display()))?;
    validate_level(&level)?;
    Ok(level)
}

fn validate_level(level: &LevelFile) -> Result<(), String> {
    if level.version != "0.1" {
        return Err(format!(
            "Level validation failed: unsupported version '{}'",
            level.version
        ));
    }
    if level.level_id.trim().is_empty() {
        return Err("Level validation failed: level_id is empty".to_string());
    }

    for (what, point) in level.spawn_points() {
        if !point.x.is_finite() || !point.y.is_finite() {
            return Err(format!(
                "Level validation failed: {what} in '{}' has a non-finite coordinate",
                level.level_id
            ));
        }
    }

    // Both of these are playable, just unusual.
    if level.platforms.is_empty() {
        log::warn!(
            "Level '{}' has no platforms. Everything will free-fall.",
            level.level_id
        );
    }
    for monkey in level.normal_monkeys.iter().chain(&level.intelligent_monkeys) {
        if monkey.route.is_empty() {
            log::warn!(
                "Monkey at ({}, {}) in level '{}' has an empty route and will not patrol.",
                monkey.x,
                monkey.y,
                level.level_id
            );
        }
    }

    Ok(())
}

const fn default_direction() -> Facing {
    Facing::Right
}
