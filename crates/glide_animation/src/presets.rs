//! Ready-made tween specs for common motion patterns
//!
//! The stock timings: dialogs fade over 250ms, scrolled content glides to
//! rest over 950ms on the smooth-stop curve.

use glide_core::Property;

use crate::easing::Easing;
use crate::tween::TweenSpec;

/// Duration of the stock fade used for entrances and exits
pub const FADE_MS: f32 = 250.0;

/// Duration of the long deceleration glide used for scrolled content
pub const GLIDE_MS: f32 = 950.0;

/// Pre-built tween specs
pub struct TweenPreset;

impl TweenPreset {
    /// Fade a target fully opaque
    pub fn fade_in(duration_ms: f32) -> TweenSpec {
        TweenSpec::new(Property::Opacity, 1.0)
            .duration_ms(duration_ms)
            .easing(Easing::EaseOutSine)
    }

    /// Fade a target fully transparent
    pub fn fade_out(duration_ms: f32) -> TweenSpec {
        TweenSpec::new(Property::Opacity, 0.0)
            .duration_ms(duration_ms)
            .easing(Easing::EaseOutQuad)
    }

    /// Move a target to a resting position on both axes
    pub fn slide_to(x: f32, y: f32, duration_ms: f32) -> [TweenSpec; 2] {
        [
            TweenSpec::new(Property::X, x)
                .duration_ms(duration_ms)
                .easing(Easing::EaseOutCubic),
            TweenSpec::new(Property::Y, y)
                .duration_ms(duration_ms)
                .easing(Easing::EaseOutCubic),
        ]
    }

    /// Long deceleration toward a new offset, scroll-style
    pub fn glide(property: Property, to: f32) -> TweenSpec {
        TweenSpec::new(property, to)
            .duration_ms(GLIDE_MS)
            .easing(Easing::SmoothStop)
    }
}
