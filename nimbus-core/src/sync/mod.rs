//! Weather synchronisation between phone and watch
//!
//! The phone runs a [`WeatherPublisher`], the watch a [`WeatherReceiver`].

pub mod publisher;
pub mod receiver;

pub use publisher::{SyncError, SyncOutcome, WeatherPublisher};
pub use receiver::{BatchSummary, ConsumeError, Delivery, WeatherReceiver};
