use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::entity::SimContext;

#[derive(Debug, Deserialize, Clone)]
pub struct GameConfig {
    pub version: String,
    pub window: WindowConfig,
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
    #[serde(default)]
    pub sprites: SpriteSizes,
    pub levels: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Copy)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

/// Logical width/height of a sprite. Hitboxes are derived from these.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Deserialize, Clone, Copy)]
#[serde(default)]
pub struct SpriteSizes {
    pub mario: SpriteSize,
    pub mario_hammer: SpriteSize,
    pub mario_blaster: SpriteSize,
    pub donkey: SpriteSize,
    pub barrel: SpriteSize,
    pub ladder: SpriteSize,
    pub platform: SpriteSize,
    pub hammer: SpriteSize,
    pub blaster: SpriteSize,
    pub monkey: SpriteSize,
    pub banana: SpriteSize,
    pub bullet: SpriteSize,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            mario: SpriteSize::new(32.0, 36.0),
            mario_hammer: SpriteSize::new(44.0, 42.0),
            mario_blaster: SpriteSize::new(40.0, 36.0),
            donkey: SpriteSize::new(72.0, 64.0),
            barrel: SpriteSize::new(30.0, 30.0),
            ladder: SpriteSize::new(40.0, 96.0),
            platform: SpriteSize::new(256.0, 20.0),
            hammer: SpriteSize::new(30.0, 30.0),
            blaster: SpriteSize::new(30.0, 20.0),
            monkey: SpriteSize::new(40.0, 40.0),
            banana: SpriteSize::new(20.0, 16.0),
            bullet: SpriteSize::new(16.0, 8.0),
        }
    }
}

impl GameConfig {
    pub fn sim_context(&self) -> SimContext {
        SimContext {
            screen_width: self.window.width,
            screen_height: self.window.height,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            window: WindowConfig {
                width: 1024.0,
                height: 768.0,
            },
            max_frames: default_max_frames(),
            sprites: SpriteSizes::default(),
            levels: Vec::new(),
        }
    }
}

pub fn load_config_from_path(path: &Path) -> Result<GameConfig, String> {
    let raw = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file {}: {e}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&raw)
        .map_err(|e| format!("Failed to parse config JSON {}: {e}", path.display()))?;
    validate_config(&config)?;
    Ok(config)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.version != "0.1" {
        return Err(format!(
            "Config validation failed: unsupported version '{}'",
            config.version
        ));
    }
    if config.window.width <= 0.0 || config.window.height <= 0.0 {
        return Err("Config validation failed: window width and height must be > 0".to_string());
    }
    if config.max_frames == 0 {
        return Err("Config validation failed: max_frames must be > 0".to_string());
    }
    if config.levels.is_empty() {
        return Err("Config validation failed: levels list is empty".to_string());
    }
    let sprites = &config.sprites;
    for (name, size) in [
        ("mario", sprites.mario),
        ("mario_hammer", sprites.mario_hammer),
        ("mario_blaster", sprites.mario_blaster),
        ("donkey", sprites.donkey),
        ("barrel", sprites.barrel),
        ("ladder", sprites.ladder),
        ("platform", sprites.platform),
        ("hammer", sprites.hammer),
        ("blaster", sprites.blaster),
        ("monkey", sprites.monkey),
        ("banana", sprites.banana),
        ("bullet", sprites.bullet),
    ] {
        if size.width <= 0.0 || size.height <= 0.0 {
            return Err(format!(
                "Config validation failed: sprite '{}' must have a positive size",
                name
            ));
        }
    }
    Ok(())
}

const fn default_max_frames() -> u64 {
    10_000
}
