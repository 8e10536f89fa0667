//! Sprite motion
//!
//! Every sprite travels from the rim toward the centre and fades as it goes.
//! Travel is a pure function of the time elapsed since motion started:
//!
//! ```text
//! radius = cx - (elapsed / speed) mod cx
//! alpha  = 255 * radius / cx
//! ```
//!
//! Each sprite is anchored at `(cx, cy - radius)` and then moved by its
//! placement: clouds rotate about the face centre, rain and snow shift
//! sideways, fog shifts by a fixed drift and shrinks as it nears the centre.

use super::table::{Animation, AnimationKind};
use crate::config::{SpriteConfig, SpriteSpec};

/// Start-of-motion bookkeeping
///
/// Motion starts lazily on the first interactive frame and is forgotten in
/// ambient mode, so sprites begin again from the rim when the face wakes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionClock {
    started_at_ms: Option<u64>,
}

impl MotionClock {
    pub const fn new() -> Self {
        Self {
            started_at_ms: None,
        }
    }

    /// Forget the start time
    pub fn reset(&mut self) {
        self.started_at_ms = None;
    }

    /// Start motion at `now_ms`
    pub fn restart(&mut self, now_ms: u64) {
        self.started_at_ms = Some(now_ms);
    }

    pub fn is_running(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// Time since motion started, starting it now if needed
    pub fn elapsed_ms(&mut self, now_ms: u64) -> u64 {
        let start = *self.started_at_ms.get_or_insert(now_ms);
        now_ms.saturating_sub(start)
    }
}

/// How a sprite is moved away from its anchor
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// Rotate about the face centre by `degrees` (clockwise)
    Rotate { degrees: f32 },
    /// Shift horizontally by `dx` pixels
    Shift { dx: f32 },
    /// Shift horizontally, then scale about the anchor by `scale`
    ShiftScale { dx: f32, scale: f32 },
}

/// One sprite ready to draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteFrame {
    /// Sprite sheet to take the image from
    pub sheet: AnimationKind,
    /// Image index within the sheet
    pub image: usize,
    /// Distance from the centre along the vertical axis
    pub radius: f32,
    pub alpha: u8,
    pub anchor_x: f32,
    pub anchor_y: f32,
    pub placement: Placement,
}

/// Radius and alpha for a sprite with `speed` after `elapsed_ms`
pub fn travel(elapsed_ms: u64, speed: u16, cx: f32) -> (f32, u8) {
    // Wrap in integers so long uptimes keep whole-step resolution
    let span = (cx as u64).max(1);
    let steps = (elapsed_ms / u64::from(speed.max(1))) % span;
    let radius = cx - steps as f32;
    let alpha = (radius / cx * 255.0).clamp(0.0, 255.0) as u8;
    (radius, alpha)
}

/// Iterator over the sprites of one animation frame
pub struct SpriteLayout<'a> {
    kind: AnimationKind,
    sprites: &'a SpriteConfig,
    elapsed_ms: u64,
    cx: f32,
    cy: f32,
    next: usize,
    count: usize,
}

impl<'a> SpriteLayout<'a> {
    /// Lay out `animation` for a face centred at `(cx, cy)`
    pub fn new(
        animation: Animation,
        sprites: &'a SpriteConfig,
        elapsed_ms: u64,
        cx: f32,
        cy: f32,
    ) -> Self {
        let count = if cx > 0.0 {
            match animation.kind {
                AnimationKind::None => 0,
                AnimationKind::Clouds | AnimationKind::Fog => {
                    animation.sprite_count(sprites.clouds.len())
                }
                AnimationKind::Rain => animation.sprite_count(sprites.rain.len()),
                AnimationKind::Snow => animation.sprite_count(sprites.snow.len()),
            }
        } else {
            0
        };

        Self {
            kind: animation.kind,
            sprites,
            elapsed_ms,
            cx,
            cy,
            next: 0,
            count,
        }
    }

    fn frame(
        &self,
        sheet: AnimationKind,
        image: usize,
        spec: SpriteSpec,
        placement: impl FnOnce(f32) -> Placement,
    ) -> SpriteFrame {
        let (radius, alpha) = travel(self.elapsed_ms, spec.speed, self.cx);
        SpriteFrame {
            sheet,
            image,
            radius,
            alpha,
            anchor_x: self.cx,
            anchor_y: self.cy - radius,
            placement: placement(radius),
        }
    }
}

impl Iterator for SpriteLayout<'_> {
    type Item = SpriteFrame;

    fn next(&mut self) -> Option<SpriteFrame> {
        if self.next >= self.count {
            return None;
        }
        let i = self.next;
        self.next += 1;

        let sprites = self.sprites;
        let frame = match self.kind {
            AnimationKind::Clouds => {
                let spec = sprites.clouds[i];
                self.frame(AnimationKind::Clouds, i, spec, |_| Placement::Rotate {
                    degrees: f32::from(spec.offset),
                })
            }
            AnimationKind::Rain => {
                let spec = sprites.rain[i];
                self.frame(AnimationKind::Rain, i, spec, |_| Placement::Shift {
                    dx: f32::from(spec.offset),
                })
            }
            AnimationKind::Snow => {
                let spec = sprites.snow[i];
                self.frame(AnimationKind::Snow, i, spec, |_| Placement::Shift {
                    dx: f32::from(spec.offset),
                })
            }
            AnimationKind::Fog => {
                let cx = self.cx;
                let dx = f32::from(sprites.fog_drift);
                self.frame(AnimationKind::Clouds, 0, sprites.clouds[i], |radius| {
                    Placement::ShiftScale {
                        dx,
                        scale: radius / cx,
                    }
                })
            }
            AnimationKind::None => return None,
        };
        Some(frame)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.count.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for SpriteLayout<'_> {}
