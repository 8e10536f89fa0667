//! Face configuration loading
//!
//! Reads a `FaceConfig` from TOML. Any table or key left out keeps its
//! default, so a config file only needs the values it changes:
//!
//! ```toml
//! interactive_tick_ms = 500
//! unit = "F"
//!
//! [palette]
//! background = [16, 32, 64]
//!
//! [sprites]
//! fog_drift = -4
//! rain = [{ offset = -20, speed = 5 }, { offset = 20, speed = 6 }]
//! ```

use std::path::Path;

use nimbus_core::config::{ConfigError, FaceConfig};

/// Config loading errors
#[derive(Debug)]
pub enum LoadError {
    /// File could not be read
    Io(std::io::Error),
    /// Not valid TOML for a face config
    Parse(toml::de::Error),
    /// Parsed but failed validation
    Invalid(ConfigError),
}

impl From<std::io::Error> for LoadError {
    fn from(e: std::io::Error) -> Self {
        LoadError::Io(e)
    }
}

impl From<toml::de::Error> for LoadError {
    fn from(e: toml::de::Error) -> Self {
        LoadError::Parse(e)
    }
}

impl From<ConfigError> for LoadError {
    fn from(e: ConfigError) -> Self {
        LoadError::Invalid(e)
    }
}

impl core::fmt::Display for LoadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "cannot read config: {e}"),
            LoadError::Parse(e) => write!(f, "cannot parse config: {e}"),
            LoadError::Invalid(e) => write!(f, "invalid config: {e}"),
        }
    }
}

impl std::error::Error for LoadError {}

/// Parse and validate a TOML face config
pub fn parse_face_config(input: &str) -> Result<FaceConfig, LoadError> {
    let config: FaceConfig = toml::from_str(input)?;
    config.validate()?;
    Ok(config)
}

/// Read, parse and validate a TOML face config file
pub fn load_face_config(path: impl AsRef<Path>) -> Result<FaceConfig, LoadError> {
    let input = std::fs::read_to_string(path)?;
    let config = parse_face_config(&input)?;
    info!("Face config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::config::SpriteSpec;
    use nimbus_protocol::TemperatureUnit;

    #[test]
    fn test_empty_document_gives_defaults() {
        assert_eq!(parse_face_config("").unwrap(), FaceConfig::default());
    }

    #[test]
    fn test_partial_document_merges_over_defaults() {
        let config = parse_face_config(
            r#"
            interactive_tick_ms = 500
            unit = "F"

            [palette]
            background = [16, 32, 64]

            [sprites]
            fog_drift = -4
            rain = [{ offset = -20, speed = 5 }, { offset = 20, speed = 6 }]
            "#,
        )
        .unwrap();

        let defaults = FaceConfig::default();
        assert_eq!(config.interactive_tick_ms, 500);
        assert_eq!(config.unit, TemperatureUnit::Fahrenheit);
        assert_eq!(config.palette.background, [16, 32, 64]);
        assert_eq!(config.palette.sunny_background, defaults.palette.sunny_background);
        assert_eq!(config.hands, defaults.hands);
        assert_eq!(config.sprites.fog_drift, -4);
        assert_eq!(
            config.sprites.rain.as_slice(),
            &[SpriteSpec::new(-20, 5), SpriteSpec::new(20, 6)]
        );
        assert_eq!(config.sprites.clouds, defaults.sprites.clouds);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = parse_face_config("interactive_tick_ms = 0").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::ZeroTickInterval)));

        let err = parse_face_config("[sprites]\nclouds = []").unwrap_err();
        assert!(matches!(err, LoadError::Invalid(ConfigError::NoClouds)));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        assert!(matches!(
            parse_face_config("unit = \"K\""),
            Err(LoadError::Parse(_))
        ));
        assert!(matches!(
            parse_face_config("interactive_tick_ms = "),
            Err(LoadError::Parse(_))
        ));
    }

    #[test]
    fn test_too_many_sprites_rejected() {
        let spec = "{ offset = 0, speed = 1 }, ".repeat(13);
        let doc = format!("[sprites]\nsnow = [{spec}]");
        assert!(matches!(parse_face_config(&doc), Err(LoadError::Parse(_))));
    }

    #[test]
    fn test_missing_file() {
        let err = load_face_config("/nonexistent/nimbus/face.toml").unwrap_err();
        assert!(matches!(err, LoadError::Io(_)));
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("nimbus-face-{}.toml", std::process::id()));
        std::fs::write(&path, "[hands]\nstroke_width = 5\n").unwrap();

        let config = load_face_config(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.hands.stroke_width, 5);
    }
}
