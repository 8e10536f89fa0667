//! Platform abstraction traits
//!
//! These traits define the interface between the face logic and whatever
//! provides the data channel, the forecast store, the host context and
//! the clock.

pub mod channel;
pub mod clock;
pub mod host;
pub mod source;

pub use channel::{ChangeStream, ChannelError, DataChannel, OnPath};
pub use clock::FaceClock;
pub use host::{HostHandle, WeatherHost};
pub use source::{ForecastRow, SourceError, WeatherSource};
