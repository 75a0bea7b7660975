use crate::controller::ControllerInput;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct ReplaySequence {
    #[serde(default = "default_dt")]
    pub fixed_dt: f32,
    pub maze_size: usize,
    #[serde(default)]
    pub seed: u64,
    pub frames: Vec<ReplayFrame>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ReplayFrame {
    #[serde(default)]
    pub move_x: f32,
    #[serde(default)]
    pub move_y: f32,
    #[serde(default)]
    pub turn: f32,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

impl ReplaySequence {
    pub fn expanded_inputs(&self) -> Vec<ControllerInput> {
        let mut out = Vec::new();
        for frame in &self.frames {
            for _ in 0..frame.repeat.max(1) {
                out.push(ControllerInput {
                    move_x: frame.move_x.clamp(-1.0, 1.0),
                    move_y: frame.move_y.clamp(-1.0, 1.0),
                    turn: frame.turn.clamp(-1.0, 1.0),
                });
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
    if replay.fixed_dt <= 0.0 {
        return Err("Replay validation failed: fixed_dt must be > 0".to_string());
    }
    if replay.maze_size < 2 {
        return Err("Replay validation failed: maze_size must be >= 2".to_string());
    }
    if replay.frames.is_empty() {
        return Err("Replay validation failed: frames list is empty".to_string());
    }
    Ok(())
}

const fn default_dt() -> f32 {
    1.0 / 60.0
}

const fn default_repeat() -> u32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::{ControllerConfig, PlayerController, StepOutcome};
    use maze_core::Maze;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_file_path(name_hint: &str) -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before unix epoch")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "maze_replay_test_{}_{}_{}.json",
            name_hint,
            std::process::id(),
            nanos
        ))
    }

    fn run(replay: &ReplaySequence, config: ControllerConfig) -> (PlayerController, Vec<StepOutcome>) {
        let maze = Maze::generate(replay.maze_size, replay.seed).expect("validated size");
        let mut controller = PlayerController::new(&maze, config);
        let outcomes = replay
            .expanded_inputs()
            .into_iter()
            .map(|input| controller.step(input, replay.fixed_dt, &maze))
            .collect();
        (controller, outcomes)
    }

    #[test]
    fn replay_file_parses_and_expands() {
        let path = temp_file_path("parse");
        fs::write(
            &path,
            r#"{
              "maze_size": 5,
              "frames": [
                { "move_x": 1.0, "repeat": 3 },
                { "turn": 4.0 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        let expanded = replay.expanded_inputs();
        assert_eq!(expanded.len(), 4);
        assert_eq!(expanded[0].move_x, 1.0);
        // Out-of-range intent is clamped.
        assert_eq!(expanded[3].turn, 1.0);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_rejects_empty_frames() {
        let path = temp_file_path("empty");
        fs::write(&path, r#"{ "maze_size": 5, "frames": [] }"#).expect("write replay file");
        let err = load_replay_from_path(&path).expect_err("empty frames should fail");
        assert!(err.contains("frames list is empty"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn replay_run_is_deterministic() {
        let path = temp_file_path("deterministic");
        fs::write(
            &path,
            r#"{
              "fixed_dt": 0.016666667,
              "maze_size": 6,
              "seed": 42,
              "frames": [
                { "move_y": 1.0, "repeat": 40 },
                { "turn": 1.0, "repeat": 90 },
                { "move_x": 1.0, "move_y": 0.5, "repeat": 120 },
                { "move_x": -1.0, "turn": -1.0, "repeat": 45 }
              ]
            }"#,
        )
        .expect("write replay file");

        let replay = load_replay_from_path(&path).expect("replay should load");
        for config in [
            ControllerConfig::default(),
            ControllerConfig {
                solid_walls: true,
                ..ControllerConfig::default()
            },
        ] {
            let (run_a, outcomes_a) = run(&replay, config);
            let (run_b, outcomes_b) = run(&replay, config);

            assert_eq!(run_a.player.offset.x.to_bits(), run_b.player.offset.x.to_bits());
            assert_eq!(run_a.player.offset.y.to_bits(), run_b.player.offset.y.to_bits());
            assert_eq!(run_a.player.angle.to_bits(), run_b.player.angle.to_bits());
            assert_eq!(outcomes_a, outcomes_b);
        }

        let _ = fs::remove_file(path);
    }
}
