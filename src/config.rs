//! Game setup: grid sizes, levels, display modes, timings and the
//! player's saved preferences.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{ConfigError, PreferencesError};

pub const SUPPORTED_GRID_SIZES: [u8; 3] = [4, 6, 8];

pub const CONCEAL_DELAY_MS: u64 = 700;
pub const CLOCK_INTERVAL_MS: u64 = 1000;

/// Side length of a square board. Always one of [`SUPPORTED_GRID_SIZES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize(u8);

impl GridSize {
    pub fn new(side: u8) -> Result<Self, ConfigError> {
        if (u32::from(side) * u32::from(side)) % 2 != 0 {
            return Err(ConfigError::OddGridSize(side));
        }
        if !SUPPORTED_GRID_SIZES.contains(&side) {
            return Err(ConfigError::UnsupportedGridSize(side));
        }
        Ok(Self(side))
    }

    pub fn side(self) -> u8 {
        self.0
    }

    pub fn card_count(self) -> usize {
        usize::from(self.0) * usize::from(self.0)
    }

    pub fn pair_count(self) -> usize {
        self.card_count() / 2
    }

    /// Edge length in pixels of one rendered card.
    pub fn card_pixels(self) -> i32 {
        match self.0 {
            0..=4 => 80,
            5..=6 => 70,
            _ => 60,
        }
    }
}

impl TryFrom<u8> for GridSize {
    type Error = ConfigError;

    fn try_from(side: u8) -> Result<Self, Self::Error> {
        Self::new(side)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Level::default().grid_size()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Easy, Level::Medium, Level::Hard];

    pub fn grid_size(self) -> GridSize {
        match self {
            Level::Easy => GridSize(4),
            Level::Medium => GridSize(6),
            Level::Hard => GridSize(8),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Level::Easy => "Easy",
            Level::Medium => "Medium",
            Level::Hard => "Hard",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|level| level.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownLevel(name.to_string()))
    }

    pub fn for_grid(grid: GridSize) -> Self {
        match grid.side() {
            0..=4 => Level::Easy,
            5..=6 => Level::Medium,
            _ => Level::Hard,
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Level::Easy => 0,
            Level::Medium => 1,
            Level::Hard => 2,
        }
    }

    pub fn from_index(index: u32) -> Self {
        match index {
            0 => Level::Easy,
            1 => Level::Medium,
            _ => Level::Hard,
        }
    }
}

/// How card identities are drawn. The core only uses it to pick a face pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Images,
    Numbers,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 2] = [DisplayMode::Images, DisplayMode::Numbers];

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Images => "Images",
            DisplayMode::Numbers => "Numbers",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| ConfigError::UnknownMode(name.to_string()))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// Timer lengths for one game. Both durations are non-zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    conceal_delay: Duration,
    clock_interval: Duration,
}

impl Timing {
    pub fn new(conceal_delay: Duration, clock_interval: Duration) -> Result<Self, ConfigError> {
        if conceal_delay.is_zero() {
            return Err(ConfigError::ZeroDuration("conceal_delay"));
        }
        if clock_interval.is_zero() {
            return Err(ConfigError::ZeroDuration("clock_interval"));
        }
        Ok(Timing {
            conceal_delay,
            clock_interval,
        })
    }

    /// How long a mismatched pair stays face-up.
    pub fn conceal_delay(&self) -> Duration {
        self.conceal_delay
    }

    pub fn clock_interval(&self) -> Duration {
        self.clock_interval
    }
}

impl Default for Timing {
    fn default() -> Self {
        Timing {
            conceal_delay: Duration::from_millis(CONCEAL_DELAY_MS),
            clock_interval: Duration::from_millis(CLOCK_INTERVAL_MS),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GameConfig {
    pub grid: GridSize,
    pub mode: DisplayMode,
    pub timing: Timing,
}

impl GameConfig {
    pub fn new(grid: GridSize, mode: DisplayMode) -> Self {
        GameConfig {
            grid,
            mode,
            timing: Timing::default(),
        }
    }

    pub fn for_level(level: Level, mode: DisplayMode) -> Self {
        Self::new(level.grid_size(), mode)
    }

    pub fn with_timing(mut self, timing: Timing) -> Self {
        self.timing = timing;
        self
    }
}

/// Settings the front end restores on the next launch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub level: Level,
    pub mode: DisplayMode,
    pub theme: Theme,
    pub sound_on: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            level: Level::Easy,
            mode: DisplayMode::Images,
            theme: Theme::Dark,
            sound_on: true,
        }
    }
}

impl Preferences {
    pub fn game_config(&self) -> GameConfig {
        GameConfig::for_level(self.level, self.mode)
    }

    pub fn from_json(raw: &str) -> Result<Self, PreferencesError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, PreferencesError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, PreferencesError> {
        let raw = fs::read_to_string(path).map_err(|source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Missing files are expected on first launch; anything else is logged.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(prefs) => prefs,
            Err(PreferencesError::Io { source, .. })
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                Self::default()
            }
            Err(err) => {
                warn!(error = %err, "falling back to default preferences");
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PreferencesError> {
        let io_err = |source| PreferencesError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, self.to_json()?).map_err(io_err)
    }
}
