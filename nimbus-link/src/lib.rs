//! Transports and host glue for Nimbus
//!
//! - `channels`: in-process link over an embassy-sync channel
//! - `serial`: framed link over an `embedded-io` byte stream
//! - `tasks`: producer, consumer and watch face loops
//! - `config`: TOML face configuration loader

#![deny(unsafe_code)]

#[macro_use]
mod fmt;

pub mod channels;
pub mod config;
pub mod serial;
pub mod tasks;

pub use channels::{LinkChanges, LinkSender, LocalLink};
pub use config::{load_face_config, parse_face_config, LoadError};
pub use serial::{RxStats, SerialChanges, SerialPublisher};
pub use tasks::{
    run_consumer, run_face, run_producer, FaceRequest, FaceStats, ProducerStats, SyncRequest,
};
