//! Weather animations
//!
//! [`select_animation`] maps a condition code to an animation family and
//! intensity; [`SpriteLayout`] turns that into positioned sprites for one
//! frame.

pub mod motion;
pub mod table;

pub use motion::{travel, MotionClock, Placement, SpriteFrame, SpriteLayout};
pub use table::{select_animation, Animation, AnimationKind};
