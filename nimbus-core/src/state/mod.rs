//! Face mode state machine
//!
//! Tracks visibility and ambient mode and decides when to redraw, when to
//! run the interactive timer and when to hold the data subscription.

pub mod events;
pub mod machine;

pub use events::FaceEvent;
pub use machine::{next_tick_delay_ms, Effects, FaceMode, Subscription, TimerCommand};
