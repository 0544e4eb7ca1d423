//! Glide Core
//!
//! The boundary between the tween engine and a host UI layer: render-target
//! identity, animatable property keys, the [`Surface`] trait, and a minimal
//! retained [`Scene`] implementation for tests and embedding hosts.

pub mod scene;
pub mod surface;

pub use scene::{Node, Scene};
pub use surface::{Property, Surface, TargetId};
