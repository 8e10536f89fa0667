//! Forecast storage on the producer side

/// One stored forecast row
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ForecastRow {
    pub condition_id: i32,
    pub temp_max: f64,
    pub temp_min: f64,
}

/// Errors reading the forecast store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// Store cannot be opened right now
    Unavailable,
    /// Query failed
    Query,
}

impl core::fmt::Display for SourceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SourceError::Unavailable => f.write_str("weather store unavailable"),
            SourceError::Query => f.write_str("weather query failed"),
        }
    }
}

/// Queryable forecast store
pub trait WeatherSource {
    /// Forecast for `location` on the day containing `timestamp_ms`
    ///
    /// `Ok(None)` means there is no row for that day.
    fn forecast(
        &mut self,
        location: &str,
        timestamp_ms: u64,
    ) -> Result<Option<ForecastRow>, SourceError>;
}

impl<T: WeatherSource + ?Sized> WeatherSource for &mut T {
    fn forecast(
        &mut self,
        location: &str,
        timestamp_ms: u64,
    ) -> Result<Option<ForecastRow>, SourceError> {
        (**self).forecast(location, timestamp_ms)
    }
}
