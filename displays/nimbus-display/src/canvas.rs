//! Drawing surface trait
//!
//! The face renderer only needs a handful of operations. Implementations
//! decide what a sprite looks like and how alpha is applied.

use nimbus_core::animation::SpriteFrame;
use nimbus_core::config::Rgb;

/// Canvas errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CanvasError {
    /// Underlying draw target failed
    Target,
    /// Sprite sheet has no image at the requested index
    MissingSprite,
    /// Flushing to the panel failed
    Flush,
}

impl core::fmt::Display for CanvasError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CanvasError::Target => f.write_str("draw target error"),
            CanvasError::MissingSprite => f.write_str("missing sprite image"),
            CanvasError::Flush => f.write_str("display flush failed"),
        }
    }
}

/// A surface the watch face can be drawn on
///
/// Coordinates are pixels from the top-left corner, y growing downward.
pub trait FaceCanvas {
    /// Drawable size as (width, height)
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface
    fn fill(&mut self, color: Rgb) -> Result<(), CanvasError>;

    /// Stroke a straight line
    fn line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        width: u8,
        color: Rgb,
    ) -> Result<(), CanvasError>;

    /// Draw `text` starting at `x` with its baseline at `y`
    fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb) -> Result<(), CanvasError>;

    /// Blit one animation sprite
    ///
    /// `center` is the face centre that rotated sprites turn about.
    fn sprite(&mut self, sprite: &SpriteFrame, center: (f32, f32)) -> Result<(), CanvasError>;

    /// Push buffered content to the panel
    fn flush(&mut self) -> Result<(), CanvasError> {
        Ok(())
    }
}
