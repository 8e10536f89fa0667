//! `embedded-graphics` canvas
//!
//! Renders the face onto any RGB888 draw target. Sprites are drawn as
//! simple primitives (clouds as ellipses, rain as streaks, snow as dots)
//! alpha-blended toward the current background.

use embedded_graphics::mono_font::iso_8859_1::FONT_6X10;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Ellipse, Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use nimbus_core::animation::{AnimationKind, Placement, SpriteFrame};
use nimbus_core::config::Rgb;
use nimbus_core::hands::hand_tip;

use crate::canvas::{CanvasError, FaceCanvas};

/// Sprite colours and sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpriteStyle {
    pub cloud: Rgb,
    pub rain: Rgb,
    pub snow: Rgb,
    /// Cloud ellipse size (width, height)
    pub cloud_size: (u32, u32),
    pub rain_length: u32,
    pub snow_diameter: u32,
}

impl Default for SpriteStyle {
    fn default() -> Self {
        Self {
            cloud: [0xEC, 0xEF, 0xF1],
            rain: [0x90, 0xCA, 0xF9],
            snow: [0xFF, 0xFF, 0xFF],
            cloud_size: (40, 22),
            rain_length: 10,
            snow_diameter: 5,
        }
    }
}

/// [`FaceCanvas`] over an `embedded-graphics` draw target
pub struct GraphicsCanvas<D> {
    target: D,
    style: SpriteStyle,
    background: Rgb,
}

impl<D> GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    pub fn new(target: D) -> Self {
        Self::with_style(target, SpriteStyle::default())
    }

    pub fn with_style(target: D, style: SpriteStyle) -> Self {
        Self {
            target,
            style,
            background: [0, 0, 0],
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    pub fn into_target(self) -> D {
        self.target
    }
}

impl<D> FaceCanvas for GraphicsCanvas<D>
where
    D: DrawTarget<Color = Rgb888> + OriginDimensions,
{
    fn size(&self) -> (u32, u32) {
        let size = self.target.size();
        (size.width, size.height)
    }

    fn fill(&mut self, color: Rgb) -> Result<(), CanvasError> {
        self.background = color;
        self.target
            .clear(to_color(color))
            .map_err(|_| CanvasError::Target)
    }

    fn line(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        width: u8,
        color: Rgb,
    ) -> Result<(), CanvasError> {
        Line::new(point(from), point(to))
            .into_styled(PrimitiveStyle::with_stroke(to_color(color), u32::from(width)))
            .draw(&mut self.target)
            .map_err(|_| CanvasError::Target)
    }

    fn text(&mut self, x: f32, y: f32, text: &str, color: Rgb) -> Result<(), CanvasError> {
        let style = MonoTextStyle::new(&FONT_6X10, to_color(color));
        Text::new(text, point((x, y)), style)
            .draw(&mut self.target)
            .map(|_| ())
            .map_err(|_| CanvasError::Target)
    }

    fn sprite(&mut self, sprite: &SpriteFrame, center: (f32, f32)) -> Result<(), CanvasError> {
        let (origin, scale) = match sprite.placement {
            Placement::Rotate { degrees } => {
                let (cx, cy) = center;
                (hand_tip(cx, cy, degrees.to_radians(), sprite.radius), 1.0)
            }
            Placement::Shift { dx } => ((sprite.anchor_x + dx, sprite.anchor_y), 1.0),
            Placement::ShiftScale { dx, scale } => {
                ((sprite.anchor_x + dx, sprite.anchor_y), scale)
            }
        };

        let base = self.sprite_color(sprite.sheet)?;
        let color = to_color(blend(base, self.background, sprite.alpha));
        let top_left = point(origin);
        let style = &self.style;

        match sprite.sheet {
            AnimationKind::Clouds | AnimationKind::Fog => {
                let (width, height) = style.cloud_size;
                let size = Size::new(scaled(width, scale), scaled(height, scale));
                if size.width == 0 || size.height == 0 {
                    return Ok(());
                }
                Ellipse::new(top_left, size)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(&mut self.target)
            }
            AnimationKind::Rain => {
                let length = scaled(style.rain_length, scale) as i32;
                Line::new(top_left, top_left + Point::new(0, length))
                    .into_styled(PrimitiveStyle::with_stroke(color, 2))
                    .draw(&mut self.target)
            }
            AnimationKind::Snow => {
                let diameter = scaled(style.snow_diameter, scale);
                Circle::new(top_left, diameter)
                    .into_styled(PrimitiveStyle::with_fill(color))
                    .draw(&mut self.target)
            }
            AnimationKind::None => Ok(()),
        }
        .map_err(|_| CanvasError::Target)
    }
}

impl<D> GraphicsCanvas<D> {
    fn sprite_color(&self, sheet: AnimationKind) -> Result<Rgb, CanvasError> {
        match sheet {
            AnimationKind::Clouds | AnimationKind::Fog => Ok(self.style.cloud),
            AnimationKind::Rain => Ok(self.style.rain),
            AnimationKind::Snow => Ok(self.style.snow),
            AnimationKind::None => Err(CanvasError::MissingSprite),
        }
    }
}

fn to_color([r, g, b]: Rgb) -> Rgb888 {
    Rgb888::new(r, g, b)
}

fn point((x, y): (f32, f32)) -> Point {
    Point::new(libm::roundf(x) as i32, libm::roundf(y) as i32)
}

fn scaled(value: u32, scale: f32) -> u32 {
    libm::roundf(value as f32 * scale.clamp(0.0, 1.0)) as u32
}

/// Mix `fg` over `bg` with `alpha` (255 is opaque)
pub fn blend(fg: Rgb, bg: Rgb, alpha: u8) -> Rgb {
    let a = u16::from(alpha);
    let mix = |f: u8, b: u8| ((u16::from(f) * a + u16::from(b) * (255 - a)) / 255) as u8;
    [mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2])]
}
