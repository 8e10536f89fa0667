//! Weather watch face renderer
//!
//! Draw order, back to front:
//!
//! 1. Background: black in ambient mode, the sunny colour under a clear sky,
//!    the normal colour otherwise
//! 2. Weather animation (interactive only)
//! 3. Second hand and text overlays (interactive only)
//! 4. Minute and hour hands

use core::fmt::Write;

use heapless::String;
use nimbus_core::animation::{select_animation, MotionClock, SpriteLayout};
use nimbus_core::config::FaceConfig;
use nimbus_core::hands::{hand_tip, ClockTime, HandAngles, HandLengths};
use nimbus_core::state::{Effects, FaceEvent, FaceMode};
use nimbus_protocol::WeatherSnapshot;

use crate::canvas::{CanvasError, FaceCanvas};

/// Overlay text capacity
pub const LABEL_LEN: usize = 24;

/// Offsets of the text overlays from the face centre
const MAX_LABEL_OFFSET: (f32, f32) = (-50.0, 80.0);
const MIN_LABEL_OFFSET: (f32, f32) = (50.0, 80.0);
const CONDITION_LABEL_OFFSET: (f32, f32) = (80.0, 0.0);

/// Weather face with its mode and animation clock
pub struct WeatherFace {
    config: FaceConfig,
    mode: FaceMode,
    motion: MotionClock,
}

impl WeatherFace {
    pub fn new(config: FaceConfig) -> Self {
        Self {
            config,
            mode: FaceMode::new(),
            motion: MotionClock::new(),
        }
    }

    pub fn config(&self) -> &FaceConfig {
        &self.config
    }

    pub fn mode(&self) -> FaceMode {
        self.mode
    }

    /// Feed a platform event
    ///
    /// Motion restarts are handled here; the rest of the effects are for the
    /// caller to carry out.
    pub fn handle(&mut self, event: FaceEvent, now_ms: u64) -> Effects {
        let effects = self.mode.handle(event);
        if effects.restart_motion {
            self.motion.restart(now_ms);
        }
        effects
    }

    /// Draw one frame
    pub fn draw<C: FaceCanvas>(
        &mut self,
        canvas: &mut C,
        time: ClockTime,
        now_ms: u64,
        weather: Option<&WeatherSnapshot>,
    ) -> Result<(), CanvasError> {
        let (width, height) = canvas.size();
        let cx = width as f32 / 2.0;
        let cy = height as f32 / 2.0;
        let palette = self.config.palette;
        let hands = self.config.hands;
        let animates = self.mode.animates();

        if !animates {
            self.motion.reset();
            canvas.fill(palette.ambient_background)?;
        } else if weather.is_some_and(|w| w.is_clear_sky()) {
            canvas.fill(palette.sunny_background)?;
        } else {
            canvas.fill(palette.background)?;
        }

        let angles = HandAngles::at(time);
        let lengths = HandLengths::for_face(cx, &hands);

        if animates {
            if let Some(weather) = weather {
                let elapsed = self.motion.elapsed_ms(now_ms);
                let animation = select_animation(weather.condition_id);
                for sprite in SpriteLayout::new(animation, &self.config.sprites, elapsed, cx, cy) {
                    canvas.sprite(&sprite, (cx, cy))?;
                }
            }

            let tip = hand_tip(cx, cy, angles.second, lengths.second);
            canvas.line((cx, cy), tip, hands.stroke_width, palette.hands)?;

            if let Some(weather) = weather {
                let labels = [
                    (MAX_LABEL_OFFSET, temperature_label("T Max", weather.temp_max, weather)),
                    (MIN_LABEL_OFFSET, temperature_label("T Min", weather.temp_min, weather)),
                    (CONDITION_LABEL_OFFSET, condition_label(weather.condition_id)),
                ];
                for ((dx, dy), label) in &labels {
                    canvas.text(cx + dx, cy + dy, label, palette.text)?;
                }
            }
        }

        let tip = hand_tip(cx, cy, angles.minute, lengths.minute);
        canvas.line((cx, cy), tip, hands.stroke_width, palette.hands)?;
        let tip = hand_tip(cx, cy, angles.hour, lengths.hour);
        canvas.line((cx, cy), tip, hands.stroke_width, palette.hands)?;

        canvas.flush()
    }
}

/// "T Max 18°C" style label, temperature rounded to a whole degree
///
/// Text that does not fit is cut short.
pub fn temperature_label(title: &str, value: f64, weather: &WeatherSnapshot) -> String<LABEL_LEN> {
    let mut label = String::new();
    let _ = write!(label, "{title} {value:.0}°{}", weather.unit);
    label
}

pub fn condition_label(condition_id: i32) -> String<LABEL_LEN> {
    let mut label = String::new();
    let _ = write!(label, "{condition_id}");
    label
}

#[cfg(test)]
mod tests {
    use super::*;
    use nimbus_core::animation::{AnimationKind, SpriteFrame};
    use nimbus_core::config::Rgb;
    use nimbus_protocol::TemperatureUnit;

    #[derive(Debug, Clone, PartialEq)]
    enum Op {
        Fill(Rgb),
        Line { to: (f32, f32) },
        Text(std::string::String),
        Sprite(AnimationKind, u8),
        Flush,
    }

    struct Recorder {
        size: (u32, u32),
        ops: Vec<Op>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                size: (320, 320),
                ops: Vec::new(),
            }
        }

        fn lines(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Line { .. })).count()
        }

        fn sprites(&self) -> usize {
            self.ops.iter().filter(|op| matches!(op, Op::Sprite(..))).count()
        }

        fn texts(&self) -> Vec<&str> {
            self.ops
                .iter()
                .filter_map(|op| match op {
                    Op::Text(t) => Some(t.as_str()),
                    _ => None,
                })
                .collect()
        }
    }

    impl FaceCanvas for Recorder {
        fn size(&self) -> (u32, u32) {
            self.size
        }

        fn fill(&mut self, color: Rgb) -> Result<(), CanvasError> {
            self.ops.push(Op::Fill(color));
            Ok(())
        }

        fn line(
            &mut self,
            _from: (f32, f32),
            to: (f32, f32),
            _width: u8,
            _color: Rgb,
        ) -> Result<(), CanvasError> {
            self.ops.push(Op::Line { to });
            Ok(())
        }

        fn text(&mut self, _x: f32, _y: f32, text: &str, _color: Rgb) -> Result<(), CanvasError> {
            self.ops.push(Op::Text(text.into()));
            Ok(())
        }

        fn sprite(&mut self, sprite: &SpriteFrame, _center: (f32, f32)) -> Result<(), CanvasError> {
            self.ops.push(Op::Sprite(sprite.sheet, sprite.alpha));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), CanvasError> {
            self.ops.push(Op::Flush);
            Ok(())
        }
    }

    fn noon() -> ClockTime {
        ClockTime::new(12, 0, 0).unwrap()
    }

    fn weather(condition_id: i32) -> WeatherSnapshot {
        WeatherSnapshot::new(TemperatureUnit::Celsius, condition_id, 18.4, 9.6)
    }

    fn interactive_face() -> WeatherFace {
        let mut face = WeatherFace::new(FaceConfig::default());
        face.handle(FaceEvent::VisibilityChanged(true), 0);
        face
    }

    #[test]
    fn test_interactive_frame() {
        let mut face = interactive_face();
        let mut canvas = Recorder::new();
        let reading = weather(201);

        face.draw(&mut canvas, noon(), 0, Some(&reading)).unwrap();

        assert_eq!(canvas.ops[0], Op::Fill(face.config().palette.background));
        // Thunderstorm: every rain drop
        assert_eq!(canvas.sprites(), face.config().sprites.rain.len());
        assert_eq!(canvas.lines(), 3);
        assert_eq!(canvas.texts(), ["T Max 18°C", "T Min 10°C", "201"]);
        assert_eq!(canvas.ops.last(), Some(&Op::Flush));
    }

    #[test]
    fn test_sprites_drawn_before_hands_and_text() {
        let mut face = interactive_face();
        let mut canvas = Recorder::new();

        face.draw(&mut canvas, noon(), 0, Some(&weather(802))).unwrap();

        let last_sprite = canvas.ops.iter().rposition(|op| matches!(op, Op::Sprite(..)));
        let first_line = canvas.ops.iter().position(|op| matches!(op, Op::Line { .. }));
        assert!(last_sprite.unwrap() < first_line.unwrap());
    }

    #[test]
    fn test_clear_sky_background() {
        let mut face = interactive_face();
        let mut canvas = Recorder::new();

        face.draw(&mut canvas, noon(), 0, Some(&weather(800))).unwrap();

        assert_eq!(canvas.ops[0], Op::Fill(face.config().palette.sunny_background));
        assert_eq!(canvas.sprites(), 0);
    }

    #[test]
    fn test_ambient_frame_is_minimal() {
        let mut face = interactive_face();
        face.handle(FaceEvent::AmbientChanged(true), 0);
        let mut canvas = Recorder::new();

        face.draw(&mut canvas, noon(), 0, Some(&weather(800))).unwrap();

        assert_eq!(canvas.ops[0], Op::Fill(face.config().palette.ambient_background));
        assert_eq!(canvas.sprites(), 0);
        assert!(canvas.texts().is_empty());
        // Minute and hour hands only
        assert_eq!(canvas.lines(), 2);
    }

    #[test]
    fn test_no_reading_yet() {
        let mut face = interactive_face();
        let mut canvas = Recorder::new();

        face.draw(&mut canvas, noon(), 0, None).unwrap();

        assert_eq!(canvas.ops[0], Op::Fill(face.config().palette.background));
        assert_eq!(canvas.sprites(), 0);
        assert!(canvas.texts().is_empty());
        assert_eq!(canvas.lines(), 3);
    }

    #[test]
    fn test_hands_at_three() {
        let mut face = interactive_face();
        face.handle(FaceEvent::AmbientChanged(true), 0);
        let mut canvas = Recorder::new();

        face.draw(&mut canvas, ClockTime::new(3, 0, 0).unwrap(), 0, None).unwrap();

        let tips: Vec<_> = canvas
            .ops
            .iter()
            .filter_map(|op| match op {
                Op::Line { to } => Some(*to),
                _ => None,
            })
            .collect();
        // Minute hand straight up, 120 px long
        assert!((tips[0].0 - 160.0).abs() < 1e-3 && (tips[0].1 - 40.0).abs() < 1e-3);
        // Hour hand at three o'clock, 80 px long
        assert!((tips[1].0 - 240.0).abs() < 1e-3 && (tips[1].1 - 160.0).abs() < 1e-3);
    }

    #[test]
    fn test_motion_restarts_when_leaving_ambient() {
        let mut face = interactive_face();
        let reading = weather(601);

        // First frame starts motion at t=1000; sprites at the rim are opaque
        let mut canvas = Recorder::new();
        face.draw(&mut canvas, noon(), 1_000, Some(&reading)).unwrap();
        assert!(canvas.ops.contains(&Op::Sprite(AnimationKind::Snow, 255)));

        // Later frame: sprites have moved in and faded
        let mut canvas = Recorder::new();
        face.draw(&mut canvas, noon(), 3_000, Some(&reading)).unwrap();
        assert!(!canvas.ops.contains(&Op::Sprite(AnimationKind::Snow, 255)));

        face.handle(FaceEvent::AmbientChanged(true), 4_000);
        face.handle(FaceEvent::AmbientChanged(false), 5_000);

        let mut canvas = Recorder::new();
        face.draw(&mut canvas, noon(), 5_000, Some(&reading)).unwrap();
        assert!(canvas
            .ops
            .iter()
            .filter(|op| matches!(op, Op::Sprite(..)))
            .all(|op| *op == Op::Sprite(AnimationKind::Snow, 255)));
    }

    #[test]
    fn test_fahrenheit_label() {
        let reading = WeatherSnapshot::new(TemperatureUnit::Fahrenheit, 500, 71.2, -3.7);
        assert_eq!(temperature_label("T Max", reading.temp_max, &reading).as_str(), "T Max 71°F");
        assert_eq!(temperature_label("T Min", reading.temp_min, &reading).as_str(), "T Min -4°F");
    }

    #[test]
    fn test_oversized_label_is_cut() {
        let reading = WeatherSnapshot::new(TemperatureUnit::Celsius, 500, 1e30, 0.0);
        let label = temperature_label("T Max", reading.temp_max, &reading);
        assert!(label.len() <= LABEL_LEN);
        assert!(label.starts_with("T Max"));
    }
}
