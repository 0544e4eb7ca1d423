//! Tween specs, callbacks, and the per-tween state machine
//!
//! A tween interpolates one numeric property on one target from its current
//! value to an end value over a wall-clock duration. The driver owns the
//! bookkeeping; this module owns the lifecycle rules.

use std::time::Duration;

use glide_core::{Property, TargetId};
use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::error::TweenError;

/// Default tween duration in milliseconds (dialog-fade pacing)
pub const DEFAULT_DURATION_MS: f32 = 250.0;

/// Lifecycle of a single tween
///
/// `Completed` and `Cancelled` are terminal; a tween in either state never
/// receives another frame update or fires another callback.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TweenState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl TweenState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TweenState::Completed | TweenState::Cancelled)
    }
}

/// Lifecycle callbacks for a tween
///
/// Each callback receives the property value current at the moment it fires:
/// the start value for `on_start`, the interpolated value for `on_update`,
/// the exact end value for `on_complete`.
#[derive(Default)]
pub struct TweenCallbacks {
    pub(crate) on_start: Option<Box<dyn FnMut(f32) + Send>>,
    pub(crate) on_update: Option<Box<dyn FnMut(f32) + Send>>,
    pub(crate) on_complete: Option<Box<dyn FnOnce(f32) + Send>>,
}

impl TweenCallbacks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_start(mut self, callback: impl FnMut(f32) + Send + 'static) -> Self {
        self.on_start = Some(Box::new(callback));
        self
    }

    pub fn on_update(mut self, callback: impl FnMut(f32) + Send + 'static) -> Self {
        self.on_update = Some(Box::new(callback));
        self
    }

    pub fn on_complete(mut self, callback: impl FnOnce(f32) + Send + 'static) -> Self {
        self.on_complete = Some(Box::new(callback));
        self
    }
}

/// Description of a property tween
///
/// Specs are plain data: hosts build them inline, pull them from
/// [`presets`](crate::presets), or deserialize them from configuration.
/// Duration defaults to [`DEFAULT_DURATION_MS`], the curve to the stock
/// smooth-stop deceleration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TweenSpec {
    pub property: Property,
    pub to: f32,
    #[serde(default = "default_duration_ms")]
    pub duration_ms: f32,
    #[serde(default)]
    pub easing: Easing,
}

fn default_duration_ms() -> f32 {
    DEFAULT_DURATION_MS
}

impl TweenSpec {
    pub fn new(property: Property, to: f32) -> Self {
        Self {
            property,
            to,
            duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::default(),
        }
    }

    pub fn duration_ms(mut self, duration_ms: f32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Select the curve by registered name
    ///
    /// Unknown names fail with [`TweenError::InvalidEasing`] before any
    /// driver state exists.
    pub fn easing_name(self, name: &str) -> Result<Self, TweenError> {
        Ok(self.easing(Easing::from_name(name)?))
    }
}

/// A single in-flight interpolation, owned by the driver
pub(crate) struct Tween {
    pub(crate) target: TargetId,
    pub(crate) property: Property,
    pub(crate) from: f32,
    pub(crate) to: f32,
    pub(crate) duration_ms: f32,
    pub(crate) easing: Easing,
    pub(crate) started_at: Duration,
    pub(crate) elapsed_ms: f32,
    pub(crate) state: TweenState,
    pub(crate) callbacks: TweenCallbacks,
}

impl Tween {
    pub(crate) fn new(
        target: TargetId,
        from: f32,
        spec: &TweenSpec,
        started_at: Duration,
        callbacks: TweenCallbacks,
    ) -> Self {
        Self {
            target,
            property: spec.property,
            from,
            to: spec.to,
            duration_ms: spec.duration_ms,
            easing: spec.easing,
            started_at,
            elapsed_ms: 0.0,
            state: TweenState::Idle,
            callbacks,
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.state == TweenState::Running
    }

    pub(crate) fn begin(&mut self) {
        if self.state == TweenState::Idle {
            self.state = TweenState::Running;
        }
    }

    pub(crate) fn complete(&mut self) {
        if !self.state.is_terminal() {
            self.state = TweenState::Completed;
        }
    }

    pub(crate) fn cancel(&mut self) {
        if !self.state.is_terminal() {
            self.state = TweenState::Cancelled;
        }
    }

    /// Record wall-clock progress; elapsed time never decreases while running
    pub(crate) fn observe(&mut self, now: Duration) -> f32 {
        let elapsed = now
            .checked_sub(self.started_at)
            .unwrap_or(Duration::ZERO)
            .as_secs_f32()
            * 1000.0;
        if elapsed > self.elapsed_ms {
            self.elapsed_ms = elapsed;
        }
        self.elapsed_ms
    }

    /// Interpolated value at the given elapsed time
    pub(crate) fn value_at(&self, elapsed_ms: f32) -> f32 {
        if self.duration_ms <= 0.0 {
            return self.to;
        }
        let progress = (elapsed_ms / self.duration_ms).clamp(0.0, 1.0);
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}
