//! Analog clock hands
//!
//! Angles are radians clockwise from 12 o'clock. The hour hand advances
//! continuously with the minutes.

use core::f32::consts::PI;

use crate::config::HandConfig;

/// Wall-clock time of day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockTime {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

impl ClockTime {
    /// Build a time, rejecting out-of-range fields
    pub fn new(hour: u8, minute: u8, second: u8) -> Option<Self> {
        (hour < 24 && minute < 60 && second < 60).then_some(Self {
            hour,
            minute,
            second,
        })
    }

    /// Time of day for a count of seconds since midnight (wraps at 24h)
    pub fn from_seconds_of_day(seconds: u32) -> Self {
        let seconds = seconds % 86_400;
        Self {
            hour: (seconds / 3600) as u8,
            minute: (seconds / 60 % 60) as u8,
            second: (seconds % 60) as u8,
        }
    }
}

/// Hand angles in radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandAngles {
    pub second: f32,
    pub minute: f32,
    pub hour: f32,
}

impl HandAngles {
    pub fn at(time: ClockTime) -> Self {
        let second = f32::from(time.second);
        let minute = f32::from(time.minute);
        let hour = f32::from(time.hour % 12);
        Self {
            second: second / 30.0 * PI,
            minute: minute / 30.0 * PI,
            hour: (hour + minute / 60.0) / 6.0 * PI,
        }
    }
}

/// Hand lengths in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLengths {
    pub second: f32,
    pub minute: f32,
    pub hour: f32,
}

impl HandLengths {
    /// Lengths for a face whose centre is `cx` pixels from the left edge
    ///
    /// Lengths never go negative on very small faces.
    pub fn for_face(cx: f32, config: &HandConfig) -> Self {
        let len = |inset: u16| (cx - f32::from(inset)).max(0.0);
        Self {
            second: len(config.second_inset),
            minute: len(config.minute_inset),
            hour: len(config.hour_inset),
        }
    }
}

/// End point of a hand of `length` at `angle` from centre `(cx, cy)`
///
/// Screen coordinates: y grows downward.
pub fn hand_tip(cx: f32, cy: f32, angle: f32, length: f32) -> (f32, f32) {
    (
        cx + libm::sinf(angle) * length,
        cy - libm::cosf(angle) * length,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < EPS
    }

    #[test]
    fn test_three_oclock() {
        let angles = HandAngles::at(ClockTime::new(3, 0, 0).unwrap());
        assert!(close(angles.hour, PI / 2.0));
        assert_eq!(angles.minute, 0.0);
        assert_eq!(angles.second, 0.0);
    }

    #[test]
    fn test_hour_hand_advances_with_minutes() {
        let angles = HandAngles::at(ClockTime::new(1, 30, 0).unwrap());
        assert!(close(angles.hour, 1.5 / 6.0 * PI));
        assert!(close(angles.minute, PI));
    }

    #[test]
    fn test_afternoon_matches_morning() {
        let am = HandAngles::at(ClockTime::new(3, 15, 20).unwrap());
        let pm = HandAngles::at(ClockTime::new(15, 15, 20).unwrap());
        assert_eq!(am, pm);
    }

    #[test]
    fn test_clock_time_bounds() {
        assert!(ClockTime::new(23, 59, 59).is_some());
        assert!(ClockTime::new(24, 0, 0).is_none());
        assert!(ClockTime::new(0, 60, 0).is_none());
        assert!(ClockTime::new(0, 0, 60).is_none());
    }

    #[test]
    fn test_from_seconds_of_day() {
        assert_eq!(
            ClockTime::from_seconds_of_day(13 * 3600 + 5 * 60 + 9),
            ClockTime::new(13, 5, 9).unwrap()
        );
        assert_eq!(
            ClockTime::from_seconds_of_day(86_400 + 61),
            ClockTime::new(0, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_default_lengths() {
        let lengths = HandLengths::for_face(160.0, &HandConfig::default());
        assert_eq!(lengths.second, 140.0);
        assert_eq!(lengths.minute, 120.0);
        assert_eq!(lengths.hour, 80.0);
    }

    #[test]
    fn test_lengths_clamp_on_tiny_face() {
        let lengths = HandLengths::for_face(30.0, &HandConfig::default());
        assert_eq!(lengths.second, 10.0);
        assert_eq!(lengths.minute, 0.0);
        assert_eq!(lengths.hour, 0.0);
    }

    #[test]
    fn test_hand_tips() {
        let (x, y) = hand_tip(100.0, 100.0, 0.0, 50.0);
        assert!(close(x, 100.0) && close(y, 50.0));

        let (x, y) = hand_tip(100.0, 100.0, PI / 2.0, 50.0);
        assert!((x - 150.0).abs() < 1e-3 && (y - 100.0).abs() < 1e-3);

        let (x, y) = hand_tip(100.0, 100.0, PI, 50.0);
        assert!((x - 100.0).abs() < 1e-3 && (y - 150.0).abs() < 1e-3);
    }
}
