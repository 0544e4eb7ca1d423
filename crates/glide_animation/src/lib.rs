//! Glide Tween Engine
//!
//! Duration-based property tweens for UI surfaces.
//!
//! # Features
//!
//! - **Easing table**: eleven named, monotone interpolation curves
//! - **Tween driver**: per-(target, property) bookkeeping with implicit
//!   cancellation on restart
//! - **Lifecycle callbacks**: on-start, on-update, on-complete
//! - **Host-independent pacing**: injected monotonic clock, plus a
//!   fixed-interval frame pump for hosts without a native frame callback
//! - **Data-driven specs**: serde-deserializable tween descriptions
//!
//! The driver never blocks and holds no global state: the host calls
//! [`TweenDriver::advance`] once per frame and stops requesting frames when
//! it returns `false`.

pub mod driver;
pub mod easing;
pub mod error;
pub mod frame;
pub mod presets;
pub mod tween;

pub use driver::{TweenDriver, TweenId};
pub use easing::Easing;
pub use error::TweenError;
pub use frame::{Clock, FramePump, ManualClock, MonotonicClock, WakeCallback, DEFAULT_FPS};
pub use presets::TweenPreset;
pub use tween::{TweenCallbacks, TweenSpec, TweenState, DEFAULT_DURATION_MS};
