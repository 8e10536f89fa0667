//! Data-item payloads
//!
//! A payload is a small flat map from string keys to primitive values,
//! published under a path. Weather readings use [`WEATHER_PATH`] and always
//! carry all four weather keys:
//!
//! | key                 | value    |
//! |---------------------|----------|
//! | `WEATHER_CONDITION` | `Int`    |
//! | `WEATHER_TEMP_MIN`  | `Double` |
//! | `WEATHER_TEMP_MAX`  | `Double` |
//! | `WEATHER_TEMP_UNIT` | `Text`   |

use heapless::{String, Vec};
use serde::{Deserialize, Serialize};

use crate::snapshot::{TemperatureUnit, WeatherSnapshot};

/// Path of the "current weather" data item
pub const WEATHER_PATH: &str = "/weatherdata";

pub const KEY_CONDITION: &str = "WEATHER_CONDITION";
pub const KEY_TEMP_MIN: &str = "WEATHER_TEMP_MIN";
pub const KEY_TEMP_MAX: &str = "WEATHER_TEMP_MAX";
pub const KEY_TEMP_UNIT: &str = "WEATHER_TEMP_UNIT";

/// Maximum entries in one map
pub const MAX_ENTRIES: usize = 8;

/// Maximum key length in bytes
pub const MAX_KEY_LEN: usize = 24;

/// Maximum text value length in bytes
pub const MAX_TEXT_LEN: usize = 8;

/// Maximum path length in bytes
pub const MAX_PATH_LEN: usize = 32;

/// Type tag of a [`Value`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValueKind {
    Int,
    Double,
    Text,
}

/// A primitive payload value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Int(i32),
    Double(f64),
    Text(String<MAX_TEXT_LEN>),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Int(_) => ValueKind::Int,
            Value::Double(_) => ValueKind::Double,
            Value::Text(_) => ValueKind::Text,
        }
    }
}

/// Errors building or reading a payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// No room for another entry
    MapFull,
    /// Key longer than [`MAX_KEY_LEN`]
    KeyTooLong,
    /// Text longer than [`MAX_TEXT_LEN`]
    TextTooLong,
    /// A required key is absent
    MissingKey(&'static str),
    /// A key holds a value of another type
    WrongType {
        key: &'static str,
        expected: ValueKind,
    },
    /// Temperature unit symbol not recognised
    UnknownUnit,
}

impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            PayloadError::MapFull => f.write_str("payload map full"),
            PayloadError::KeyTooLong => f.write_str("payload key too long"),
            PayloadError::TextTooLong => f.write_str("payload text too long"),
            PayloadError::MissingKey(key) => write!(f, "missing key {key}"),
            PayloadError::WrongType { key, expected } => {
                write!(f, "key {key} is not of type {expected:?}")
            }
            PayloadError::UnknownUnit => f.write_str("unknown temperature unit"),
        }
    }
}

/// Flat key/value map
///
/// Insertion order is kept; putting an existing key replaces its value in
/// place.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DataMap {
    entries: Vec<(String<MAX_KEY_LEN>, Value), MAX_ENTRIES>,
}

impl DataMap {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.as_str() == key)
            .map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Insert or replace a value
    pub fn put(&mut self, key: &str, value: Value) -> Result<(), PayloadError> {
        if let Some((_, slot)) = self.entries.iter_mut().find(|(k, _)| k.as_str() == key) {
            *slot = value;
            return Ok(());
        }

        let key = String::try_from(key).map_err(|_| PayloadError::KeyTooLong)?;
        self.entries
            .push((key, value))
            .map_err(|_| PayloadError::MapFull)
    }

    pub fn put_int(&mut self, key: &str, value: i32) -> Result<(), PayloadError> {
        self.put(key, Value::Int(value))
    }

    pub fn put_double(&mut self, key: &str, value: f64) -> Result<(), PayloadError> {
        self.put(key, Value::Double(value))
    }

    pub fn put_text(&mut self, key: &str, value: &str) -> Result<(), PayloadError> {
        let text = String::try_from(value).map_err(|_| PayloadError::TextTooLong)?;
        self.put(key, Value::Text(text))
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.entries.iter().position(|(k, _)| k.as_str() == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn int(&self, key: &'static str) -> Result<i32, PayloadError> {
        match self.require(key)? {
            Value::Int(v) => Ok(*v),
            _ => Err(PayloadError::WrongType {
                key,
                expected: ValueKind::Int,
            }),
        }
    }

    pub fn double(&self, key: &'static str) -> Result<f64, PayloadError> {
        match self.require(key)? {
            Value::Double(v) => Ok(*v),
            _ => Err(PayloadError::WrongType {
                key,
                expected: ValueKind::Double,
            }),
        }
    }

    pub fn text(&self, key: &'static str) -> Result<&str, PayloadError> {
        match self.require(key)? {
            Value::Text(v) => Ok(v.as_str()),
            _ => Err(PayloadError::WrongType {
                key,
                expected: ValueKind::Text,
            }),
        }
    }

    fn require(&self, key: &'static str) -> Result<&Value, PayloadError> {
        self.get(key).ok_or(PayloadError::MissingKey(key))
    }
}

/// Serialize a snapshot into the four weather keys
pub fn encode_snapshot(snapshot: &WeatherSnapshot) -> Result<DataMap, PayloadError> {
    let mut map = DataMap::new();
    map.put_int(KEY_CONDITION, snapshot.condition_id)?;
    map.put_double(KEY_TEMP_MIN, snapshot.temp_min)?;
    map.put_double(KEY_TEMP_MAX, snapshot.temp_max)?;
    map.put_text(KEY_TEMP_UNIT, snapshot.unit.symbol())?;
    Ok(map)
}

/// Read a snapshot back from a weather map
///
/// Every key must be present with the right type. Extra keys are ignored.
pub fn decode_snapshot(map: &DataMap) -> Result<WeatherSnapshot, PayloadError> {
    let condition_id = map.int(KEY_CONDITION)?;
    let temp_min = map.double(KEY_TEMP_MIN)?;
    let temp_max = map.double(KEY_TEMP_MAX)?;
    let unit = TemperatureUnit::from_symbol(map.text(KEY_TEMP_UNIT)?)
        .ok_or(PayloadError::UnknownUnit)?;

    Ok(WeatherSnapshot {
        unit,
        condition_id,
        temp_max,
        temp_min,
    })
}

impl TryFrom<&DataMap> for WeatherSnapshot {
    type Error = PayloadError;

    fn try_from(map: &DataMap) -> Result<Self, Self::Error> {
        decode_snapshot(map)
    }
}
