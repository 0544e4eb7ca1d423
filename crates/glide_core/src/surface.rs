//! The host-surface boundary
//!
//! The tween engine never touches host state directly. Everything it knows
//! about a host goes through this trait: read a numeric property to find a
//! tween's start value, write interpolated values back each frame.

use serde::{Deserialize, Serialize};

slotmap::new_key_type! {
    /// Handle to a render target owned by a host surface
    pub struct TargetId;
}

/// Animatable numeric properties of a render target
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    X,
    Y,
    Width,
    Height,
    Opacity,
    ScaleX,
    ScaleY,
    Rotation,
}

impl Property {
    /// Name used in logs and serialized tween specs
    pub fn name(&self) -> &'static str {
        match self {
            Property::X => "x",
            Property::Y => "y",
            Property::Width => "width",
            Property::Height => "height",
            Property::Opacity => "opacity",
            Property::ScaleX => "scaleX",
            Property::ScaleY => "scaleY",
            Property::Rotation => "rotation",
        }
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A host surface the tween engine can animate
///
/// Implementations own the actual render targets; the engine only identifies
/// them by [`TargetId`]. `property` returns `None` when the surface has no
/// target under the given id, which callers treat as a configuration error.
pub trait Surface {
    /// Current value of `property` on `target`, or `None` for an unknown target
    fn property(&self, target: TargetId, property: Property) -> Option<f32>;

    /// Write `value` to `property` on `target`
    ///
    /// Writes to unknown targets must be ignored by the implementation; the
    /// engine may deliver one in-flight frame for a target the host has
    /// already removed.
    fn set_property(&mut self, target: TargetId, property: Property, value: f32);
}
