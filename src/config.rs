use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use event_tracker_core::Filter;
use serde::Deserialize;

/// Prefix for environment overrides, e.g. `EVENT_TRACKER_DEFAULT_FILTER=Past`
const ENV_PREFIX: &str = "EVENT_TRACKER";

fn default_true() -> bool {
    true
}

/// Configuration at ~/.config/event-tracker/config.toml
///
/// Every key is optional. Command-line flags take precedence.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TrackerConfig {
    /// Filter selected when the calendar opens
    #[serde(default)]
    pub default_filter: Filter,

    /// Start with the sample events
    #[serde(default = "default_true")]
    pub demo_events: bool,

    /// Colored terminal output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Also append log output to this file
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        TrackerConfig {
            default_filter: Filter::All,
            demo_events: true,
            color: true,
            log_file: None,
        }
    }
}

impl TrackerConfig {
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not determine config directory")?
            .join("event-tracker");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template there
    /// on first run.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;

        if !path.exists() {
            Self::create_default_config(&path)?;
        }

        Self::load_from(&path)
    }

    /// Load from `path` (which may be missing) with environment overrides.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: TrackerConfig = Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .with_context(|| format!("Failed to read config file at {}", path.display()))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config file at {}", path.display()))?;

        Ok(config)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> Result<()> {
        let contents = "\
# event-tracker configuration

# Filter shown on start: \"All\", \"Past\" or \"Upcoming\"
# default_filter = \"All\"

# Start with three sample events around today:
# demo_events = true

# Colored output:
# color = true

# Append logs to a file as well as stderr:
# log_file = \"/tmp/event-tracker.log\"
";

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Could not create config directory at {}", parent.display())
            })?;
        }

        std::fs::write(path, contents)
            .with_context(|| format!("Could not write config file at {}", path.display()))?;

        Ok(())
    }
}
