//! Drawing surface and weather face renderer for Nimbus
//!
//! This crate provides:
//! - `FaceCanvas` trait for anything the face can be drawn on
//! - `WeatherFace`, which draws the background, weather animation, hands
//!   and text for one frame
//! - `GraphicsCanvas`, a `FaceCanvas` over any `embedded-graphics` RGB888
//!   draw target
//!
//! # Architecture
//!
//! The renderer owns the face mode and the animation clock. The platform
//! feeds it lifecycle events, carries out the returned effects, and calls
//! `draw` with the current time and the latest weather reading.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod canvas;
pub mod face;
pub mod graphics;

// Re-export key types
pub use canvas::{CanvasError, FaceCanvas};
pub use face::WeatherFace;
pub use graphics::{GraphicsCanvas, SpriteStyle};
