//! Condition code → animation mapping

/// Animation family drawn over the face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnimationKind {
    None,
    Rain,
    Snow,
    Clouds,
    Fog,
}

/// Animation family plus how much of its sprite table to draw
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Animation {
    pub kind: AnimationKind,
    /// Fraction of the sprite table in use, 0.0..=1.0
    pub intensity: f32,
}

impl Animation {
    pub const NONE: Self = Self::new(AnimationKind::None, 0.0);

    pub const fn new(kind: AnimationKind, intensity: f32) -> Self {
        Self { kind, intensity }
    }

    /// Number of sprites to draw out of `available`, rounded down
    pub fn sprite_count(&self, available: usize) -> usize {
        if self.kind == AnimationKind::None {
            return 0;
        }
        let wanted = available as f32 * self.intensity.clamp(0.0, 1.0);
        (wanted as usize).min(available)
    }
}

#[derive(Clone, Copy)]
enum Codes {
    Range(i32, i32),
    Either(i32, i32),
    Exactly(i32),
}

impl Codes {
    fn contains(self, code: i32) -> bool {
        match self {
            Codes::Range(lo, hi) => (lo..=hi).contains(&code),
            Codes::Either(a, b) => code == a || code == b,
            Codes::Exactly(c) => code == c,
        }
    }
}

struct Rule {
    codes: Codes,
    animation: Animation,
}

const fn rule(codes: Codes, kind: AnimationKind, intensity: f32) -> Rule {
    Rule {
        codes,
        animation: Animation::new(kind, intensity),
    }
}

// Evaluated top to bottom, first match wins. 761 falls inside the fog range
// before the later 761/781 rule, so it animates as fog.
static RULES: [Rule; 11] = [
    rule(Codes::Range(200, 232), AnimationKind::Rain, 1.0),
    rule(Codes::Range(300, 321), AnimationKind::Rain, 0.2),
    rule(Codes::Range(500, 504), AnimationKind::Rain, 0.5),
    rule(Codes::Exactly(511), AnimationKind::Snow, 0.5),
    rule(Codes::Range(520, 531), AnimationKind::Rain, 0.5),
    rule(Codes::Range(600, 622), AnimationKind::Snow, 1.0),
    rule(Codes::Range(701, 761), AnimationKind::Fog, 1.0),
    rule(Codes::Either(761, 781), AnimationKind::Rain, 1.0),
    // Clear sky: rain with nothing falling
    rule(Codes::Exactly(800), AnimationKind::Rain, 0.0),
    rule(Codes::Exactly(801), AnimationKind::Clouds, 0.5),
    rule(Codes::Range(802, 804), AnimationKind::Clouds, 1.0),
];

/// Pick the animation for a condition code
pub fn select_animation(condition_id: i32) -> Animation {
    RULES
        .iter()
        .find(|r| r.codes.contains(condition_id))
        .map(|r| r.animation)
        .unwrap_or(Animation::NONE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_thunderstorm_is_full_rain() {
        assert_eq!(select_animation(205), Animation::new(AnimationKind::Rain, 1.0));
    }

    #[test]
    fn test_drizzle_is_light_rain() {
        assert_eq!(select_animation(305), Animation::new(AnimationKind::Rain, 0.2));
    }

    #[test]
    fn test_squalls_resolve_to_fog() {
        assert_eq!(select_animation(761).kind, AnimationKind::Fog);
        assert_eq!(select_animation(781), Animation::new(AnimationKind::Rain, 1.0));
    }

    #[test]
    fn test_rain_bands() {
        assert_eq!(select_animation(500), Animation::new(AnimationKind::Rain, 0.5));
        assert_eq!(select_animation(504), Animation::new(AnimationKind::Rain, 0.5));
        assert_eq!(select_animation(522), Animation::new(AnimationKind::Rain, 0.5));
    }

    #[test]
    fn test_freezing_rain_is_snow() {
        assert_eq!(select_animation(511), Animation::new(AnimationKind::Snow, 0.5));
        assert_eq!(select_animation(601), Animation::new(AnimationKind::Snow, 1.0));
    }

    #[test]
    fn test_clouds() {
        assert_eq!(select_animation(801), Animation::new(AnimationKind::Clouds, 0.5));
        assert_eq!(select_animation(804), Animation::new(AnimationKind::Clouds, 1.0));
    }

    #[test]
    fn test_clear_sky_draws_no_rain() {
        let animation = select_animation(800);
        assert_eq!(animation, Animation::new(AnimationKind::Rain, 0.0));
        assert_eq!(animation.sprite_count(10), 0);
    }

    #[test]
    fn test_fog_uses_whole_table() {
        assert_eq!(select_animation(701), Animation::new(AnimationKind::Fog, 1.0));
        assert_eq!(select_animation(741).sprite_count(6), 6);
    }

    #[test]
    fn test_unknown_codes() {
        assert_eq!(select_animation(999), Animation::NONE);
        assert_eq!(select_animation(0), Animation::NONE);
        assert_eq!(select_animation(-1), Animation::NONE);
        // Gaps between the listed ranges
        assert_eq!(select_animation(233), Animation::NONE);
        assert_eq!(select_animation(505), Animation::NONE);
        assert_eq!(select_animation(700), Animation::NONE);
    }

    #[test]
    fn test_sprite_count_rounds_down() {
        assert_eq!(Animation::new(AnimationKind::Rain, 0.2).sprite_count(10), 2);
        assert_eq!(Animation::new(AnimationKind::Rain, 0.5).sprite_count(5), 2);
        assert_eq!(Animation::new(AnimationKind::Rain, 0.8).sprite_count(10), 8);
        assert_eq!(Animation::new(AnimationKind::Rain, 0.0).sprite_count(10), 0);
        assert_eq!(Animation::new(AnimationKind::Clouds, 1.0).sprite_count(6), 6);
        assert_eq!(Animation::new(AnimationKind::Rain, 0.2).sprite_count(4), 0);
        assert_eq!(Animation::NONE.sprite_count(10), 0);
    }

    proptest! {
        #[test]
        fn prop_intensity_in_range(code in any::<i32>()) {
            let animation = select_animation(code);
            prop_assert!((0.0..=1.0).contains(&animation.intensity));
            if animation.kind == AnimationKind::None {
                prop_assert_eq!(animation.intensity, 0.0);
            }
        }

        #[test]
        fn prop_sprite_count_bounded(code in any::<i32>(), available in 0usize..64) {
            let count = select_animation(code).sprite_count(available);
            prop_assert!(count <= available);
        }
    }
}
