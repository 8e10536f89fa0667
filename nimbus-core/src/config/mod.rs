//! Face configuration
//!
//! Board-agnostic configuration structures, validation, and postcard
//! storage.

pub mod types;

pub use types::*;

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Tick interval of zero
    ZeroTickInterval,
    /// Sprite with a speed of zero
    ZeroSpeed { table: &'static str, index: usize },
    /// Cloud table is empty; fog has nothing to draw
    NoClouds,
    /// Hand insets out of order (second < minute < hour)
    HandInsetOrder,
    /// Could not serialize configuration
    SerializeFailed,
    /// Could not deserialize configuration
    DeserializeFailed,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::ZeroTickInterval => f.write_str("tick interval must be non-zero"),
            ConfigError::ZeroSpeed { table, index } => {
                write!(f, "{table} sprite {index} has zero speed")
            }
            ConfigError::NoClouds => f.write_str("cloud sprite table is empty"),
            ConfigError::HandInsetOrder => {
                f.write_str("hand insets must grow from second to minute to hour")
            }
            ConfigError::SerializeFailed => f.write_str("config serialization failed"),
            ConfigError::DeserializeFailed => f.write_str("config deserialization failed"),
        }
    }
}

impl FaceConfig {
    /// Check the configuration is usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.interactive_tick_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let hands = &self.hands;
        if !(hands.second_inset < hands.minute_inset && hands.minute_inset < hands.hour_inset) {
            return Err(ConfigError::HandInsetOrder);
        }

        let sprites = &self.sprites;
        if sprites.clouds.is_empty() {
            return Err(ConfigError::NoClouds);
        }
        for (name, specs) in [
            ("cloud", &sprites.clouds),
            ("rain", &sprites.rain),
            ("snow", &sprites.snow),
        ] {
            if let Some(index) = specs.iter().position(|s| s.speed == 0) {
                return Err(ConfigError::ZeroSpeed { table: name, index });
            }
        }

        Ok(())
    }
}

/// Serialize a configuration into `buf`, returning the used bytes
#[cfg(feature = "serde")]
pub fn store_config<'a>(config: &FaceConfig, buf: &'a mut [u8]) -> Result<&'a [u8], ConfigError> {
    postcard::to_slice(config, buf)
        .map(|used| &*used)
        .map_err(|_| ConfigError::SerializeFailed)
}

/// Read back a configuration written by [`store_config`]
#[cfg(feature = "serde")]
pub fn load_config(bytes: &[u8]) -> Result<FaceConfig, ConfigError> {
    let config: FaceConfig =
        postcard::from_bytes(bytes).map_err(|_| ConfigError::DeserializeFailed)?;
    config.validate()?;
    Ok(config)
}
