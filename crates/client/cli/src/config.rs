//! Headless client configuration.
use std::env;
use std::path::PathBuf;

/// Settings for one headless run.
#[derive(Clone, Debug)]
pub struct CliConfig {
    pub content_dir: PathBuf,
    pub level: String,
    pub seed: Option<u64>,
    pub frames: u32,
    pub frame_ms: u32,
    pub log_dir: Option<PathBuf>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from(game_content::DEFAULT_DATA_DIR),
            level: "crypt".to_owned(),
            seed: None,
            frames: 900,
            frame_ms: 16,
            log_dir: None,
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `ARENA_CONTENT_DIR` - Data directory (default: the shipped `data/`)
    /// - `ARENA_LEVEL` - Level file name without extension (default: crypt)
    /// - `ARENA_SEED` - RNG seed (default: random)
    /// - `ARENA_FRAMES` - Number of frames to simulate (default: 900)
    /// - `ARENA_FRAME_MS` - Milliseconds per frame (default: 16)
    /// - `ARENA_LOG_DIR` - Also write logs to `arena.log` in this directory
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("ARENA_CONTENT_DIR") {
            config.content_dir = PathBuf::from(dir);
        }
        if let Ok(level) = env::var("ARENA_LEVEL") {
            config.level = level;
        }
        config.seed = read_env::<u64>("ARENA_SEED");
        if let Some(frames) = read_env::<u32>("ARENA_FRAMES") {
            config.frames = frames;
        }
        if let Some(frame_ms) = read_env::<u32>("ARENA_FRAME_MS") {
            config.frame_ms = frame_ms.max(1);
        }
        config.log_dir = env::var("ARENA_LOG_DIR").ok().map(PathBuf::from);

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
