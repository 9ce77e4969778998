//! Configuration for katarain.
//!
//! Settings are read from a TOML file. Every key is optional and the defaults
//! reproduce the stock effect: katakana at 60 frames per second, speed 0.5,
//! green glyphs over a 5% black trail.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use katarain_core::{
    Brightness, DropSpeed, GlyphBlock, GlyphBlockError, HoverFilters, KATAKANA_COUNT,
    KATAKANA_START, RainStyle, Rgba, SpeedControls,
};
use serde::Deserialize;

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "KATARAIN_CONFIG";

/// Highest accepted frame rate.
pub const MAX_FRAME_RATE: u32 = 240;

/// Errors loading or validating the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ConfigError::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// Animation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RainConfig {
    pub initial_speed: f32,
    pub frame_rate: u32,
    pub glyph_start: u32,
    pub glyph_count: u32,
    pub restart_threshold: f64,
    pub trail_alpha: f32,
    pub glyph_color: String,
}

impl Default for RainConfig {
    fn default() -> Self {
        Self {
            initial_speed: DropSpeed::DEFAULT,
            frame_rate: 60,
            glyph_start: KATAKANA_START,
            glyph_count: KATAKANA_COUNT,
            restart_threshold: 0.975,
            trail_alpha: 0.05,
            glyph_color: "#0F0".to_string(),
        }
    }
}

/// Keyboard speed controls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ControlsConfig {
    pub speed_up_step: f32,
    pub speed_down_step: f32,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        let controls = SpeedControls::default();
        Self {
            speed_up_step: controls.up_step,
            speed_down_step: controls.down_step,
        }
    }
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    pub hover_brightness: f32,
    pub leave_brightness: f32,
    pub show_status: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let hover = HoverFilters::default();
        Self {
            hover_brightness: hover.enter.factor(),
            leave_brightness: hover.leave.factor(),
            show_status: false,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub rain: RainConfig,
    pub controls: ControlsConfig,
    pub display: DisplayConfig,
}

impl Config {
    /// Default config file location, `$CONFIG_DIR/katarain/config.toml`.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "katarain").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Path named by [`CONFIG_ENV`], if set and non-empty.
    fn override_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .filter(|path| !path.is_empty())
            .map(PathBuf::from)
    }

    /// Load and validate the config.
    ///
    /// A file named by [`CONFIG_ENV`] must exist. Only a missing file at
    /// [`Config::default_path`] yields the defaults.
    pub fn load() -> Result<(Self, Option<PathBuf>), ConfigError> {
        Self::load_resolved(Self::override_path(), Self::default_path())
    }

    fn load_resolved(
        override_path: Option<PathBuf>,
        default_path: Option<PathBuf>,
    ) -> Result<(Self, Option<PathBuf>), ConfigError> {
        if let Some(path) = override_path {
            let config = Self::load_from(&path)?;
            return Ok((config, Some(path)));
        }

        let Some(path) = default_path else {
            tracing::debug!("no config directory, using defaults");
            return Ok((Self::default(), None));
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            return Ok((Self::default(), None));
        }
        let config = Self::load_from(&path)?;
        Ok((config, Some(path)))
    }

    /// Load and validate the config at `path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value is in range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("rain.initial_speed", self.rain.initial_speed)?;
        non_negative("controls.speed_up_step", self.controls.speed_up_step)?;
        non_negative("controls.speed_down_step", self.controls.speed_down_step)?;
        non_negative("display.hover_brightness", self.display.hover_brightness)?;
        non_negative("display.leave_brightness", self.display.leave_brightness)?;

        if self.rain.frame_rate == 0 || self.rain.frame_rate > MAX_FRAME_RATE {
            return Err(ConfigError::invalid(
                "rain.frame_rate",
                format!("must be between 1 and {MAX_FRAME_RATE}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.rain.restart_threshold) {
            return Err(ConfigError::invalid(
                "rain.restart_threshold",
                "must be between 0 and 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.rain.trail_alpha) {
            return Err(ConfigError::invalid(
                "rain.trail_alpha",
                "must be between 0 and 1",
            ));
        }

        self.glyph_color()?;
        self.glyphs()?;
        Ok(())
    }

    fn glyph_color(&self) -> Result<Rgba, ConfigError> {
        self.rain
            .glyph_color
            .parse::<Rgba>()
            .map_err(|e| ConfigError::invalid("rain.glyph_color", e.to_string()))
    }

    fn glyphs(&self) -> Result<GlyphBlock, ConfigError> {
        GlyphBlock::new(self.rain.glyph_start, self.rain.glyph_count).map_err(|e| {
            let field = match e {
                GlyphBlockError::Empty => "rain.glyph_count",
                GlyphBlockError::InvalidCodePoint(_) => "rain.glyph_start",
            };
            ConfigError::invalid(field, e.to_string())
        })
    }

    /// Draw-step style described by this config.
    pub fn rain_style(&self) -> Result<RainStyle, ConfigError> {
        Ok(RainStyle {
            trail: Rgba::new(0, 0, 0, self.rain.trail_alpha),
            glyph_color: self.glyph_color()?,
            restart_threshold: self.rain.restart_threshold,
            glyphs: self.glyphs()?,
        })
    }

    pub fn initial_speed(&self) -> DropSpeed {
        DropSpeed::new(self.rain.initial_speed)
    }

    pub fn speed_controls(&self) -> SpeedControls {
        SpeedControls {
            up_step: self.controls.speed_up_step,
            down_step: self.controls.speed_down_step,
        }
    }

    pub fn hover_filters(&self) -> HoverFilters {
        HoverFilters {
            enter: Brightness::new(self.display.hover_brightness),
            leave: Brightness::new(self.display.leave_brightness),
        }
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("{value} must be a finite, non-negative number"),
        ));
    }
    Ok(())
}
