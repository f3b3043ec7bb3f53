//! Config file loading for haneul.
//!
//! Settings live in a TOML file at the platform config dir (on Linux,
//! `~/.config/haneul/config.toml`). Every field is optional; a missing file
//! means defaults. The file is only ever read, never written.

use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use directories::ProjectDirs;
use haneul_core::{AnimationSpeed, Theme};
use serde::Deserialize;

/// Raw TOML shape with every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    theme: Option<String>,
    speed: Option<String>,
    seed: Option<u64>,
    show_help: Option<bool>,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Theme preference (auto follows the local clock).
    pub theme: Theme,
    /// Tick interval preference.
    pub speed: AnimationSpeed,
    /// Fixed RNG seed; `None` seeds from the system clock.
    pub seed: Option<u64>,
    /// Show the bottom help line at startup.
    pub show_help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::Auto,
            speed: AnimationSpeed::Medium,
            seed: None,
            show_help: true,
        }
    }
}

impl Config {
    /// Platform config file path, when a home directory exists.
    pub fn path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "haneul").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Load settings, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("reading config file {}", path.display()))?;
        Self::parse(&text).wrap_err_with(|| format!("in config file {}", path.display()))
    }

    /// Parse settings from TOML text.
    pub fn parse(text: &str) -> Result<Self> {
        let raw: FileConfig = toml::from_str(text)?;
        let mut config = Self::default();
        if let Some(theme) = raw.theme.as_deref() {
            config.theme = parse_theme(theme)?;
        }
        if let Some(speed) = raw.speed.as_deref() {
            config.speed = parse_speed(speed)?;
        }
        if let Some(seed) = raw.seed {
            config.seed = Some(seed);
        }
        if let Some(show_help) = raw.show_help {
            config.show_help = show_help;
        }
        Ok(config)
    }
}

fn parse_theme(value: &str) -> Result<Theme> {
    match value {
        "auto" => Ok(Theme::Auto),
        "dark" => Ok(Theme::Dark),
        "light" => Ok(Theme::Light),
        other => Err(eyre!(
            "unknown theme {other:?}, expected \"auto\", \"dark\" or \"light\""
        )),
    }
}

fn parse_speed(value: &str) -> Result<AnimationSpeed> {
    match value {
        "slow" => Ok(AnimationSpeed::Slow),
        "medium" => Ok(AnimationSpeed::Medium),
        "fast" => Ok(AnimationSpeed::Fast),
        other => Err(eyre!(
            "unknown speed {other:?}, expected \"slow\", \"medium\" or \"fast\""
        )),
    }
}
