//! Easing curves for tweens
//!
//! Every curve is a pure function over normalized progress: `apply(0.0)` is
//! `0.0`, `apply(1.0)` is `1.0`, and output never decreases as progress grows.
//! Curves are selected either directly or by registered name (the form used
//! in serialized tween specs).

use serde::{Deserialize, Serialize};

use crate::error::TweenError;

/// Easing function type
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Easing {
    Linear,
    EaseOutQuad,
    EaseInOutQuad,
    EaseOutCubic,
    /// Cubic in-out; the rail ease used when snapping a dragger to a click
    EaseInOutCubic,
    EaseOutQuart,
    EaseOutQuint,
    EaseOutCirc,
    EaseOutSine,
    EaseOutExpo,
    /// Quintic blend with a long, soft stop; the stock deceleration curve
    #[default]
    SmoothStop,
}

impl Easing {
    /// Every registered curve, in registration order
    pub const ALL: [Easing; 11] = [
        Easing::Linear,
        Easing::EaseOutQuad,
        Easing::EaseInOutQuad,
        Easing::EaseOutCubic,
        Easing::EaseInOutCubic,
        Easing::EaseOutQuart,
        Easing::EaseOutQuint,
        Easing::EaseOutCirc,
        Easing::EaseOutSine,
        Easing::EaseOutExpo,
        Easing::SmoothStop,
    ];

    /// Apply the easing function to a progress value (0.0 to 1.0)
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseOutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
            Easing::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Easing::EaseInOutCubic => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Easing::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Easing::EaseOutQuint => 1.0 - (1.0 - t).powi(5),
            Easing::EaseOutCirc => (1.0 - (t - 1.0) * (t - 1.0)).max(0.0).sqrt(),
            Easing::EaseOutSine => (t * std::f32::consts::FRAC_PI_2).sin(),
            // 2^-10t never quite reaches zero; pin the endpoint
            Easing::EaseOutExpo => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2.0_f32.powf(-10.0 * t)
                }
            }
            // 0.5t^5 - 2.5t^4 + 5.5t^3 - 6.5t^2 + 4t, Horner form
            Easing::SmoothStop => t * (4.0 + t * (-6.5 + t * (5.5 + t * (-2.5 + 0.5 * t)))),
        }
    }

    /// Registered name of the curve
    pub fn name(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseOutQuad => "easeOutQuad",
            Easing::EaseInOutQuad => "easeInOutQuad",
            Easing::EaseOutCubic => "easeOutCubic",
            Easing::EaseInOutCubic => "easeInOutCubic",
            Easing::EaseOutQuart => "easeOutQuart",
            Easing::EaseOutQuint => "easeOutQuint",
            Easing::EaseOutCirc => "easeOutCirc",
            Easing::EaseOutSine => "easeOutSine",
            Easing::EaseOutExpo => "easeOutExpo",
            Easing::SmoothStop => "smoothStop",
        }
    }

    /// Look up a curve by registered name
    ///
    /// Unknown names are a configuration error; no tween state is created
    /// from a spec that fails this lookup.
    pub fn from_name(name: &str) -> Result<Easing, TweenError> {
        Easing::ALL
            .iter()
            .copied()
            .find(|easing| easing.name() == name)
            .ok_or_else(|| TweenError::InvalidEasing(name.to_string()))
    }
}

impl std::str::FromStr for Easing {
    type Err = TweenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Easing::from_name(s)
    }
}

impl std::fmt::Display for Easing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn curves_hit_both_endpoints() {
        for easing in Easing::ALL {
            assert!(
                easing.apply(0.0).abs() < EPSILON,
                "{easing} does not start at 0"
            );
            assert!(
                (easing.apply(1.0) - 1.0).abs() < EPSILON,
                "{easing} does not end at 1"
            );
        }
    }

    #[test]
    fn curves_never_decrease() {
        for easing in Easing::ALL {
            let mut previous = easing.apply(0.0);
            for step in 1..=1000 {
                let value = easing.apply(step as f32 / 1000.0);
                assert!(
                    value >= previous - EPSILON,
                    "{easing} decreases near t = {}",
                    step as f32 / 1000.0
                );
                previous = value;
            }
        }
    }

    #[test]
    fn out_curves_front_load_motion() {
        for easing in [
            Easing::EaseOutQuad,
            Easing::EaseOutCubic,
            Easing::EaseOutQuart,
            Easing::EaseOutQuint,
            Easing::EaseOutCirc,
            Easing::EaseOutSine,
            Easing::EaseOutExpo,
            Easing::SmoothStop,
        ] {
            assert!(
                easing.apply(0.5) > 0.5,
                "{easing} should be past halfway at t = 0.5"
            );
        }
    }

    #[test]
    fn names_round_trip() {
        for easing in Easing::ALL {
            assert_eq!(Easing::from_name(easing.name()).unwrap(), easing);
            assert_eq!(easing.name().parse::<Easing>().unwrap(), easing);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = Easing::from_name("easeOutBounce").unwrap_err();
        assert!(matches!(err, TweenError::InvalidEasing(name) if name == "easeOutBounce"));
    }

    #[test]
    fn serde_uses_registered_names() {
        let json = serde_json::to_string(&Easing::EaseOutCirc).unwrap();
        assert_eq!(json, "\"easeOutCirc\"");
        let back: Easing = serde_json::from_str("\"smoothStop\"").unwrap();
        assert_eq!(back, Easing::SmoothStop);
    }
}
