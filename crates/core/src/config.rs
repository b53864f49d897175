//! Widget Configuration
//!
//! Recognized options for a text input widget:
//! - Input gating (disabled, maximum length)
//! - Case transformation applied to typed characters
//! - Placeholder text and focus behaviour
//! - Font and caret padding used for measurement

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{InputError, Result};

/// Case transformation applied to every typed character
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CaseTransform {
    #[default]
    None,
    Lower,
    Upper,
}

impl CaseTransform {
    /// Apply the transform to a single character.
    ///
    /// Characters whose case mapping expands to more than one character are
    /// left untouched, the buffer only ever stores single code units.
    pub fn apply(self, ch: char) -> char {
        fn single(mut mapped: impl Iterator<Item = char>, original: char) -> char {
            match (mapped.next(), mapped.next()) {
                (Some(c), None) => c,
                _ => original,
            }
        }

        match self {
            CaseTransform::None => ch,
            CaseTransform::Lower => single(ch.to_lowercase(), ch),
            CaseTransform::Upper => single(ch.to_uppercase(), ch),
        }
    }
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    /// Font family
    pub family: String,
    /// Font size in points
    pub size: f32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "arial".to_string(),
            size: 16.0,
        }
    }
}

/// `max_length` is stored as a plain integer where `-1` means unlimited,
/// so an absent key keeps the default limit instead of turning it off.
mod max_length_repr {
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Option<usize>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(n) => serializer.serialize_i64(*n as i64),
            None => serializer.serialize_i64(-1),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<usize>, D::Error> {
        match i64::deserialize(deserializer)? {
            -1 => Ok(None),
            n if n >= 0 => Ok(Some(n as usize)),
            n => Err(de::Error::custom(format!("invalid max_length {}, expected -1 or a count", n))),
        }
    }
}

/// Text input configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Form identifier
    pub id: Option<String>,
    /// Maximum number of characters (None for unlimited, `-1` on disk)
    #[serde(with = "max_length_repr")]
    pub max_length: Option<usize>,
    /// Ignore all keyboard and pointer input
    pub disabled: bool,
    /// Case transform for typed characters
    pub case_transform: CaseTransform,
    /// Hint shown while the buffer is empty
    pub placeholder_text: String,
    /// Focus the widget as soon as it is created
    pub auto_focus: bool,
    /// Left padding between the widget edge and the first glyph
    pub cursor_padding: f32,
    /// Font used to measure glyphs
    pub font: FontConfig,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            id: None,
            max_length: Some(10),
            disabled: false,
            case_transform: CaseTransform::None,
            placeholder_text: "hit something".to_string(),
            auto_focus: false,
            cursor_padding: 10.0,
            font: FontConfig::default(),
        }
    }
}

impl InputConfig {
    /// Unlimited length, otherwise default settings
    pub fn unlimited() -> Self {
        Self {
            max_length: None,
            ..Self::default()
        }
    }

    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "canvas-input", "canvas-input")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("input.toml"))
    }

    /// Check that the settings describe a usable widget
    pub fn validate(&self) -> Result<()> {
        if self.max_length == Some(0) {
            return Err(InputError::Config("max_length must be at least 1".into()));
        }
        if !self.cursor_padding.is_finite() || self.cursor_padding < 0.0 {
            return Err(InputError::Config(format!(
                "cursor_padding must be a non-negative number, got {}",
                self.cursor_padding
            )));
        }
        if !self.font.size.is_finite() || self.font.size <= 0.0 {
            return Err(InputError::Config(format!(
                "font size must be positive, got {}",
                self.font.size
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: InputConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from the per-user config file, writing defaults if absent
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| InputError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from `path`, writing defaults if it does not exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            Self::from_toml_str(&contents)
        } else {
            info!("Config file {:?} not found, using defaults", path);
            let config = InputConfig::default();
            config.save_to(path).await?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = self.to_toml_string()?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = InputConfig::default();
        assert_eq!(config.max_length, Some(10));
        assert_eq!(config.placeholder_text, "hit something");
        assert_eq!(config.font.family, "arial");
        assert!(!config.disabled);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_case_transform() {
        assert_eq!(CaseTransform::None.apply('a'), 'a');
        assert_eq!(CaseTransform::Upper.apply('a'), 'A');
        assert_eq!(CaseTransform::Lower.apply('Q'), 'q');
        assert_eq!(CaseTransform::Upper.apply('7'), '7');
        // 'ß' upper-cases to "SS", which is not a single character
        assert_eq!(CaseTransform::Upper.apply('ß'), 'ß');
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = InputConfig::from_toml_str(
            r#"
            max_length = 5
            case_transform = "upper"

            [font]
            size = 12.0
            "#,
        )
        .unwrap();

        assert_eq!(config.max_length, Some(5));
        assert_eq!(config.case_transform, CaseTransform::Upper);
        assert_eq!(config.font.size, 12.0);
        assert_eq!(config.font.family, "arial");
        assert_eq!(config.cursor_padding, 10.0);
    }

    #[test]
    fn test_unlimited_max_length_round_trips() {
        let text = InputConfig::unlimited().to_toml_string().unwrap();
        assert!(text.contains("max_length = -1"));
        let parsed = InputConfig::from_toml_str(&text).unwrap();
        assert_eq!(parsed.max_length, None);
    }

    #[test]
    fn test_validation_rejects_zero_max_length() {
        let err = InputConfig::from_toml_str("max_length = 0").unwrap_err();
        assert!(matches!(err, InputError::Config(_)));
    }

    #[test]
    fn test_validation_rejects_negative_padding() {
        let config = InputConfig {
            cursor_padding: -1.0,
            ..InputConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[tokio::test]
    async fn test_load_writes_defaults_then_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("input.toml");

        let created = InputConfig::load_from(&path).await.unwrap();
        assert_eq!(created, InputConfig::default());
        assert!(path.exists());

        let mut changed = created.clone();
        changed.disabled = true;
        changed.id = Some("login".into());
        changed.save_to(&path).await.unwrap();

        let loaded = InputConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, changed);
    }
}
