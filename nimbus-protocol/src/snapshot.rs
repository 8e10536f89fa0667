//! Weather snapshot value type

use serde::{Deserialize, Serialize};

/// Unit the temperatures of a snapshot are expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

impl TemperatureUnit {
    /// Symbol carried on the wire and shown next to temperatures
    pub const fn symbol(self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "C",
            TemperatureUnit::Fahrenheit => "F",
        }
    }

    /// Parse a wire symbol
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "C" => Some(TemperatureUnit::Celsius),
            "F" => Some(TemperatureUnit::Fahrenheit),
            _ => None,
        }
    }
}

impl core::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One forecast reading as pushed from the phone to the watch
///
/// Equality compares all four fields by value. The publisher relies on it to
/// skip sending a reading the watch already has.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WeatherSnapshot {
    /// Unit of `temp_max` and `temp_min`
    pub unit: TemperatureUnit,
    /// Condition code (OpenWeatherMap numbering)
    pub condition_id: i32,
    /// Forecast high
    pub temp_max: f64,
    /// Forecast low
    pub temp_min: f64,
}

impl WeatherSnapshot {
    /// Condition code for a clear sky
    pub const CLEAR_SKY: i32 = 800;

    pub const fn new(unit: TemperatureUnit, condition_id: i32, temp_max: f64, temp_min: f64) -> Self {
        Self {
            unit,
            condition_id,
            temp_max,
            temp_min,
        }
    }

    pub fn is_clear_sky(&self) -> bool {
        self.condition_id == Self::CLEAR_SKY
    }
}
