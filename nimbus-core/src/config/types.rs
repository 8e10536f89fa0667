//! Face configuration types
//!
//! Everything tunable about the face lives here: tick rate, colours, hand
//! insets and the sprite tables that drive the weather animations. The whole
//! set can be stored as postcard binary data or loaded from TOML by the
//! platform layer.

use heapless::Vec;
use nimbus_protocol::TemperatureUnit;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum sprites per animation table
pub const MAX_SPRITES: usize = 12;

/// 24-bit colour as `[r, g, b]`
pub type Rgb = [u8; 3];

/// One animated sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SpriteSpec {
    /// Rotation in degrees for clouds, horizontal shift in pixels for rain and snow
    pub offset: i16,
    /// Milliseconds per pixel of travel (higher is slower)
    pub speed: u16,
}

impl SpriteSpec {
    pub const fn new(offset: i16, speed: u16) -> Self {
        Self { offset, speed }
    }
}

/// Sprite tables for every animation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpriteConfig {
    pub clouds: Vec<SpriteSpec, MAX_SPRITES>,
    pub rain: Vec<SpriteSpec, MAX_SPRITES>,
    pub snow: Vec<SpriteSpec, MAX_SPRITES>,
    /// Horizontal shift of fog sprites in pixels
    pub fog_drift: i16,
}

impl Default for SpriteConfig {
    fn default() -> Self {
        Self {
            clouds: table(&[(0, 40), (60, 55), (120, 70), (180, 45), (240, 60), (300, 50)]),
            rain: table(&[
                (-90, 4),
                (-70, 6),
                (-50, 5),
                (-30, 7),
                (-10, 3),
                (10, 6),
                (30, 4),
                (50, 5),
                (70, 7),
                (90, 5),
            ]),
            snow: table(&[
                (-95, 12),
                (-75, 15),
                (-55, 10),
                (-35, 18),
                (-15, 14),
                (5, 11),
                (25, 16),
                (45, 13),
                (65, 17),
                (85, 12),
            ]),
            fog_drift: -10,
        }
    }
}

fn table(specs: &[(i16, u16)]) -> Vec<SpriteSpec, MAX_SPRITES> {
    specs
        .iter()
        .take(MAX_SPRITES)
        .map(|&(offset, speed)| SpriteSpec::new(offset, speed))
        .collect()
}

/// Clock hand geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandConfig {
    /// Second hand length is half the face width minus this
    pub second_inset: u16,
    pub minute_inset: u16,
    pub hour_inset: u16,
    /// Stroke width in pixels
    pub stroke_width: u8,
}

impl Default for HandConfig {
    fn default() -> Self {
        Self {
            second_inset: 20,
            minute_inset: 40,
            hour_inset: 80,
            stroke_width: 3,
        }
    }
}

/// Face colours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Palette {
    pub background: Rgb,
    /// Background under a clear sky
    pub sunny_background: Rgb,
    pub ambient_background: Rgb,
    pub hands: Rgb,
    pub text: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [0x1E, 0x88, 0xE5],
            sunny_background: [0xFF, 0xB3, 0x00],
            ambient_background: [0x00, 0x00, 0x00],
            hands: [0xFF, 0xFF, 0xFF],
            text: [0xFF, 0xFF, 0xFF],
        }
    }
}

/// Complete face configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    /// Redraw period while interactive and visible
    pub interactive_tick_ms: u32,
    /// Unit the phone labels readings with
    pub unit: TemperatureUnit,
    pub hands: HandConfig,
    pub palette: Palette,
    pub sprites: SpriteConfig,
}

impl Default for FaceConfig {
    fn default() -> Self {
        Self {
            interactive_tick_ms: 1000,
            unit: TemperatureUnit::Celsius,
            hands: HandConfig::default(),
            palette: Palette::default(),
            sprites: SpriteConfig::default(),
        }
    }
}
