//! Board-agnostic core logic for the Nimbus weather watch face
//!
//! This crate contains all face logic that does not depend on a specific
//! phone, watch or display:
//!
//! - Platform traits (data channel, forecast store, host context)
//! - Change-detecting weather publisher and the receiving store
//! - Condition code → animation mapping and sprite motion
//! - Clock hand geometry
//! - Face mode state machine (visible / ambient)
//! - Configuration type definitions

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;

#[macro_use]
mod fmt;

pub mod animation;
pub mod config;
pub mod hands;
pub mod state;
pub mod sync;
pub mod traits;
