//! Configuration file model.
//!
//! The file is TOML with kebab-case keys. Every key is optional and unknown keys are
//! rejected, so a typo fails loudly instead of silently falling back to a default.
//!
//! ```toml
//! quick-recipe-lookup = true
//!
//! [history]
//! max-entries = 100
//!
//! [debug]
//! show-startup-index-summary = false
//! missing-implementation-warnings = false
//! unhandled-recipes-warning = false
//!
//! [style]
//! has-resource-pack = false
//! color-primary = "#AEA44d"
//! ```

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use quern_display::{Rgb, Style};
use quern_session::DEFAULT_MAX_ENTRIES;
use serde::Deserialize;
use thiserror::Error;

/// Errors from loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
	#[error("I/O error reading {}: {error}", path.display())]
	Io { path: PathBuf, error: std::io::Error },

	#[error("failed to parse {}: {error}", path.display())]
	Parse { path: PathBuf, error: toml::de::Error },

	#[error("invalid value for {field}: {reason}")]
	Invalid { field: &'static str, reason: &'static str },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Stand-in path for configuration parsed from a string.
const INLINE_SOURCE: &str = "<inline>";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Open the recipe view directly from item interactions.
	pub quick_recipe_lookup: bool,
	pub history: HistoryConfig,
	pub debug: DebugConfig,
	pub style: StyleConfig,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			quick_recipe_lookup: true,
			history: HistoryConfig::default(),
			debug: DebugConfig::default(),
			style: StyleConfig::default(),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct HistoryConfig {
	/// Backward entries kept per player.
	pub max_entries: usize,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self {
			max_entries: DEFAULT_MAX_ENTRIES.get(),
		}
	}
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DebugConfig {
	pub show_startup_index_summary: bool,
	/// Warn when a process has no panel.
	pub missing_implementation_warnings: bool,
	/// Warn when no extractor handles a recipe.
	pub unhandled_recipes_warning: bool,
}

/// Colours are kept as written and parsed by [`Config::style`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct StyleConfig {
	pub has_resource_pack: bool,
	pub color_primary: String,
	pub color_secondary: String,
	pub color_tertiary: String,
	pub color_quaternary: String,
}

impl Default for StyleConfig {
	fn default() -> Self {
		let style = Style::default();
		Self {
			has_resource_pack: style.has_resource_pack,
			color_primary: style.primary.to_string(),
			color_secondary: style.secondary.to_string(),
			color_tertiary: style.tertiary.to_string(),
			color_quaternary: style.quaternary.to_string(),
		}
	}
}

impl Config {
	/// Reads `path`. A missing file yields the defaults.
	pub fn load(path: &Path) -> Result<Self> {
		let text = match std::fs::read_to_string(path) {
			Ok(text) => text,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!(path = %path.display(), "config file not found, using defaults");
				return Ok(Self::default());
			}
			Err(error) => {
				return Err(ConfigError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		Self::parse(&text, path)
	}

	pub fn from_toml_str(text: &str) -> Result<Self> {
		Self::parse(text, Path::new(INLINE_SOURCE))
	}

	fn parse(text: &str, path: &Path) -> Result<Self> {
		let config: Self = toml::from_str(text).map_err(|error| ConfigError::Parse {
			path: path.to_path_buf(),
			error,
		})?;
		config.validate()?;
		Ok(config)
	}

	fn validate(&self) -> Result<()> {
		if self.history.max_entries == 0 {
			return Err(ConfigError::Invalid {
				field: "history.max-entries",
				reason: "must be at least 1",
			});
		}
		Ok(())
	}

	pub fn history_capacity(&self) -> NonZeroUsize {
		NonZeroUsize::new(self.history.max_entries).unwrap_or(DEFAULT_MAX_ENTRIES)
	}

	/// The configured style. Colours that do not parse keep their defaults.
	pub fn style(&self) -> Style {
		let defaults = Style::default();
		let colour = |field: &'static str, raw: &str, fallback: Rgb| match raw.parse::<Rgb>() {
			Ok(rgb) => rgb,
			Err(error) => {
				tracing::warn!(field, %error, "invalid colour, using default");
				fallback
			}
		};
		Style {
			has_resource_pack: self.style.has_resource_pack,
			primary: colour("style.color-primary", &self.style.color_primary, defaults.primary),
			secondary: colour("style.color-secondary", &self.style.color_secondary, defaults.secondary),
			tertiary: colour("style.color-tertiary", &self.style.color_tertiary, defaults.tertiary),
			quaternary: colour("style.color-quaternary", &self.style.color_quaternary, defaults.quaternary),
		}
	}
}
