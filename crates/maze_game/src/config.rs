use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Largest accepted maze edge; keeps the per-step collision scan bounded.
const MAX_MAZE_SIZE: usize = 256;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GameConfig {
    pub version: String,
    #[serde(default = "default_maze_size")]
    pub maze_size: usize,
    #[serde(default)]
    pub seed: u64,
    /// NDC units per second.
    #[serde(default = "default_speed")]
    pub player_speed: f32,
    /// Radians per second.
    #[serde(default = "default_speed")]
    pub turn_speed: f32,
    #[serde(default)]
    pub solid_walls: bool,
    #[serde(default)]
    pub background: BackgroundConfig,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct BackgroundConfig {
    #[serde(default = "default_background_speed")]
    pub speed: f32,
    #[serde(default = "default_one")]
    pub intensity: f32,
    #[serde(default = "default_one")]
    pub scale: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: "0.1".to_string(),
            maze_size: default_maze_size(),
            seed: 0,
            player_speed: default_speed(),
            turn_speed: default_speed(),
            solid_walls: false,
            background: BackgroundConfig::default(),
        }
    }
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            speed: default_background_speed(),
            intensity: default_one(),
            scale: default_one(),
        }
    }
}

impl GameConfig {
    /// True when switching to `other` requires a new maze.
    pub fn maze_changed(&self, other: &GameConfig) -> bool {
        self.maze_size != other.maze_size || self.seed != other.seed
    }
}

pub struct ConfigWatcher {
    path: PathBuf,
    last_seen_modified: Option<SystemTime>,
}

impl ConfigWatcher {
    pub fn new(path: PathBuf) -> Self {
        let last_seen_modified = modified_time(&path);
        Self {
            path,
            last_seen_modified,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn should_reload(&mut self) -> bool {
        let current = modified_time(&self.path);
        match (self.last_seen_modified, current) {
            (Some(old), Some(now)) if now > old => {
                self.last_seen_modified = Some(now);
                true
            }
            (None, Some(now)) => {
                self.last_seen_modified = Some(now);
                true
            }
            _ => false,
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

/// Startup variant: a missing file means defaults, anything else must load.
pub fn load_config_or_default(path: &Path) -> Result<GameConfig, String> {
    if !path.exists() {
        log::warn!(
            "Config file '{}' not found, using defaults.",
            path.display()
        );
        return Ok(GameConfig::default());
    }
    load_config_from_path(path)
}

fn validate_config(config: &GameConfig) -> Result<(), String> {
    if config.maze_size < 2 || config.maze_size > MAX_MAZE_SIZE {
        return Err(format!(
            "Config validation failed: maze_size must be in 2..={MAX_MAZE_SIZE} (got {})",
            config.maze_size
        ));
    }
    if !config.player_speed.is_finite() || config.player_speed <= 0.0 {
        return Err("Config validation failed: player_speed must be > 0".to_string());
    }
    if !config.turn_speed.is_finite() || config.turn_speed <= 0.0 {
        return Err("Config validation failed: turn_speed must be > 0".to_string());
    }
    let background = &config.background;
    if background.speed < 0.0 || background.intensity < 0.0 || background.scale <= 0.0 {
        return Err(
            "Config validation failed: background speed/intensity must be >= 0 and scale > 0"
                .to_string(),
        );
    }
    if config.player_speed > 10.0 {
        log::warn!(
            "player_speed {} crosses the whole canvas in a fraction of a second.",
            config.player_speed
        );
    }
    Ok(())
}

fn modified_time(path: &Path) -> Option<SystemTime> {
    fs::metadata(path).ok()?.modified().ok()
}

const fn default_maze_size() -> usize {
    5
}

const fn default_speed() -> f32 {
    0.6
}

const fn default_background_speed() -> f32 {
    0.5
}

const fn default_one() -> f32 {
    1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "maze_config_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn write_config_file(path: &Path, body: &str) {
        fs::write(path, body).expect("failed to write temp config file");
    }

    #[test]
    fn load_config_from_path_parses_full_config() {
        let path = temp_file_path("full");
        let json = r#"
        {
          "version": "0.1",
          "maze_size": 12,
          "seed": 7,
          "player_speed": 0.9,
          "turn_speed": 1.2,
          "solid_walls": true,
          "background": { "speed": 0.25, "intensity": 0.5, "scale": 2.0 }
        }
        "#;

        write_config_file(&path, json);
        let config = load_config_from_path(&path).expect("valid config should load");
        assert_eq!(config.maze_size, 12);
        assert_eq!(config.seed, 7);
        assert_eq!(config.player_speed, 0.9);
        assert_eq!(config.turn_speed, 1.2);
        assert!(config.solid_walls);
        assert_eq!(config.background.scale, 2.0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let path = temp_file_path("defaults");
        write_config_file(&path, r#"{ "version": "0.1" }"#);
        let config = load_config_from_path(&path).expect("minimal config should load");
        assert_eq!(config, GameConfig::default());

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_maze_size_below_two() {
        let path = temp_file_path("small_maze");
        write_config_file(&path, r#"{ "version": "0.1", "maze_size": 1 }"#);
        let err = load_config_from_path(&path).expect_err("size 1 should fail");
        assert!(err.contains("maze_size"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_non_positive_speed() {
        let path = temp_file_path("zero_speed");
        write_config_file(&path, r#"{ "version": "0.1", "player_speed": 0.0 }"#);
        let err = load_config_from_path(&path).expect_err("zero speed should fail");
        assert!(err.contains("player_speed"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn rejects_malformed_json() {
        let path = temp_file_path("malformed");
        write_config_file(&path, r#"{ "version": "0.1", "maze_size": }"#);
        let err = load_config_from_path(&path).expect_err("bad json should fail");
        assert!(err.contains("Failed to parse config JSON"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = temp_file_path("absent");
        let config = load_config_or_default(&path).expect("absent file is not an error");
        assert_eq!(config, GameConfig::default());
        assert!(load_config_from_path(&path).is_err());
    }

    #[test]
    fn maze_changed_tracks_size_and_seed_only() {
        let base = GameConfig::default();
        let mut faster = base.clone();
        faster.player_speed = 2.0;
        assert!(!base.maze_changed(&faster));

        let mut reseeded = base.clone();
        reseeded.seed = 99;
        assert!(base.maze_changed(&reseeded));
    }

    #[test]
    fn watcher_reports_file_appearing() {
        let path = temp_file_path("watch");
        let mut watcher = ConfigWatcher::new(path.clone());
        assert!(!watcher.should_reload());

        write_config_file(&path, r#"{ "version": "0.1" }"#);
        assert!(watcher.should_reload());
        // Unchanged file does not trigger again.
        assert!(!watcher.should_reload());
        assert_eq!(watcher.path(), path.as_path());

        let _ = fs::remove_file(path);
    }
}
