//! Nimbus phone ↔ watch data protocol
//!
//! This crate defines what the phone pushes to the watch and how it travels.
//! The unit of exchange is a *data item*: a small key/value map published
//! under a path. The only item in use is the current weather reading at
//! [`WEATHER_PATH`].
//!
//! # Protocol Overview
//!
//! Over a byte stream every data event is one frame:
//! ```text
//! ┌──────┬──────┬────────┬─────────────┬──────┐
//! │ SYNC │ KIND │ LENGTH │ BODY        │ CRC8 │
//! │ 1B   │ 1B   │ 1B     │ 0–240B      │ 1B   │
//! └──────┴──────┴────────┴─────────────┴──────┘
//! ```
//!
//! Delivery is fire-and-forget. There are no acknowledgements; the newest
//! reading simply replaces the previous one on the watch.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod messages;
pub mod payload;
pub mod snapshot;

pub use frame::{Frame, FrameError, FrameParser, FRAME_SYNC, MAX_BODY_SIZE, MAX_FRAME_SIZE};
pub use messages::{ChangeKind, DataEvent, MessageError};
pub use payload::{
    decode_snapshot, encode_snapshot, DataMap, PayloadError, Value, ValueKind, WEATHER_PATH,
};
pub use snapshot::{TemperatureUnit, WeatherSnapshot};
