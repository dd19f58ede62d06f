//! YAML settings file for the terminal demo.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::color::Rgba;
use crate::config::SpinnerConfig;
use crate::widget::SpinnerOptions;

/// Everything the demo needs to build and display a spinner.
///
/// File layout:
/// ```yaml
/// spinner:
///   number_of_lines: 12
///   color: '#510447'
/// options:
///   center_on_parent: true
/// background: '#f0f0f0'
/// zoom: 1.5
/// ```
/// Any key left out keeps its value from [`Settings::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub spinner: SpinnerConfig,
    pub options: SpinnerOptions,
    /// Color translucent lines are blended over.
    pub background: Rgba,
    /// Terminal dots per spinner unit.
    pub zoom: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spinner: showcase_spinner(),
            options: SpinnerOptions::default(),
            background: Rgba::rgb(0xf0, 0xf0, 0xf0),
            zoom: 1.0,
        }
    }
}

/// A spinner that reads well on screen, unlike the widget's bare defaults.
fn showcase_spinner() -> SpinnerConfig {
    let mut config = SpinnerConfig::default();
    let _ = config.set_roundness(70.0);
    let _ = config.set_minimum_trail_opacity(15.0);
    let _ = config.set_trail_fade_percentage(70.0);
    let _ = config.set_number_of_lines(12);
    let _ = config.set_line_length(15.0);
    let _ = config.set_line_width(5.0);
    let _ = config.set_inner_radius(10.0);
    let _ = config.set_revolutions_per_second(1.0);
    let _ = config.set_color(Rgba::rgb(81, 4, 71));
    config
}

impl Settings {
    /// Load settings from `path`, layered over the defaults.
    ///
    /// A missing file yields the defaults; an unreadable or malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read settings: {}", path.display()));
            }
        };
        Self::from_yaml(&content)
            .with_context(|| format!("Invalid settings file: {}", path.display()))
    }

    /// Parse YAML, layering every key it sets over the defaults.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let overrides: Value = serde_yaml::from_str(content).context("Failed to parse YAML")?;
        let mut merged =
            serde_yaml::to_value(Self::default()).context("Failed to serialize defaults")?;
        if !overrides.is_null() {
            merge(&mut merged, overrides);
        }
        serde_yaml::from_value(merged).context("Failed to apply settings")
    }
}

/// Deep-merge `overrides` into `base`; mappings merge key by key, anything else replaces.
fn merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Mapping(base), Value::Mapping(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(existing) => merge(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

/// Default settings location.
///
/// Checks XDG_CONFIG_HOME first, falls back to ~/.config.
pub fn default_path() -> Result<PathBuf> {
    let base = if let Ok(config_home) = std::env::var("XDG_CONFIG_HOME") {
        PathBuf::from(config_home)
    } else if let Some(home_dir) = home::home_dir() {
        home_dir.join(".config")
    } else {
        anyhow::bail!("Could not determine config directory")
    };
    Ok(base.join("waiting-spinner").join("config.yaml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_returns_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "spinner:\n  number_of_lines: 30\noptions:\n  center_on_parent: false\n",
        )
        .unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.spinner.number_of_lines(), 30);
        assert_eq!(settings.spinner.line_length(), 15.0);
        assert_eq!(settings.spinner.color(), Rgba::rgb(81, 4, 71));
        assert!(!settings.options.center_on_parent);
        assert!(settings.options.disable_parent_when_spinning);
        assert_eq!(settings.zoom, 1.0);
    }

    #[test]
    fn test_empty_file_returns_defaults() {
        let settings = Settings::from_yaml("").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_roundness_in_file_is_clamped() {
        let settings = Settings::from_yaml("spinner:\n  roundness: 150\n").unwrap();
        assert_eq!(settings.spinner.roundness(), 100.0);

        let settings = Settings::from_yaml("spinner:\n  roundness: 55.5\n").unwrap();
        assert_eq!(settings.spinner.roundness(), 55.5);
    }

    #[test]
    fn test_corrupted_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "spinner: [not, a, mapping").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid settings file"));
    }

    #[test]
    fn test_bad_color_is_an_error() {
        assert!(Settings::from_yaml("background: 'white'\n").is_err());
    }

    #[test]
    fn test_showcase_spinner_values() {
        let spinner = Settings::default().spinner;
        assert_eq!(spinner.roundness(), 70.0);
        assert_eq!(spinner.minimum_trail_opacity(), 15.0);
        assert_eq!(spinner.trail_fade_percentage(), 70.0);
        assert_eq!(spinner.number_of_lines(), 12);
        assert_eq!(spinner.line_width(), 5.0);
        assert_eq!(spinner.inner_radius(), 10.0);
        assert_eq!(spinner.revolutions_per_second(), 1.0);
    }
}
