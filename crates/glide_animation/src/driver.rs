//! Tween driver
//!
//! Owns every in-flight tween and advances them once per host frame. The
//! driver is single-threaded and cooperative: all mutation happens inside
//! `start`/`stop` calls or inside `advance`, which the host invokes from its
//! frame callback (or from the [`FramePump`](crate::frame::FramePump)
//! fallback's wake).
//!
//! Progress is measured against accumulated wall-clock time from the injected
//! [`Clock`], not a frame counter, so frame-delivery jitter does not stretch
//! or shrink an animation.

use glide_core::{Property, Surface, TargetId};
use rustc_hash::FxHashMap;
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::error::TweenError;
use crate::frame::{Clock, MonotonicClock};
use crate::tween::{Tween, TweenCallbacks, TweenSpec};

slotmap::new_key_type! {
    /// Handle to a registered tween
    pub struct TweenId;
}

/// The tween driver
///
/// One driver instance owns all tween bookkeeping for a surface; there is no
/// ambient global state. Starting a tween on a (target, property) pair that
/// already has one in flight supersedes the old tween: it is cancelled first
/// and its completion callback never fires.
pub struct TweenDriver<C: Clock = MonotonicClock> {
    tweens: SlotMap<TweenId, Tween>,
    /// Cancellation index: which tween currently animates each pair
    active: FxHashMap<(TargetId, Property), TweenId>,
    clock: C,
}

impl TweenDriver<MonotonicClock> {
    pub fn new() -> Self {
        Self::with_clock(MonotonicClock::default())
    }
}

impl Default for TweenDriver<MonotonicClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> TweenDriver<C> {
    /// Create a driver over an injected time source
    pub fn with_clock(clock: C) -> Self {
        Self {
            tweens: SlotMap::with_key(),
            active: FxHashMap::default(),
            clock,
        }
    }

    /// Begin interpolating a property from its current surface value
    ///
    /// The start value is read from the surface at call time. A zero
    /// duration jumps straight to the end value: the property is written and
    /// `on_start`/`on_complete` fire synchronously, with nothing scheduled
    /// and no tween left registered.
    ///
    /// # Errors
    ///
    /// [`TweenError::InvalidDuration`] for a negative or non-finite duration,
    /// [`TweenError::UnknownTarget`] when the surface does not know the
    /// target. Neither leaves any driver state behind.
    pub fn start(
        &mut self,
        surface: &mut dyn Surface,
        target: TargetId,
        spec: TweenSpec,
        callbacks: TweenCallbacks,
    ) -> Result<TweenId, TweenError> {
        if !spec.duration_ms.is_finite() || spec.duration_ms < 0.0 {
            return Err(TweenError::InvalidDuration(spec.duration_ms));
        }
        let from = surface
            .property(target, spec.property)
            .ok_or(TweenError::UnknownTarget)?;

        // restarting a pair supersedes the in-flight tween
        if let Some(previous) = self.active.remove(&(target, spec.property)) {
            if let Some(mut old) = self.tweens.remove(previous) {
                old.cancel();
                tracing::debug!(property = spec.property.name(), "tween superseded");
            }
        }

        let now = self.clock.now();
        let mut tween = Tween::new(target, from, &spec, now, callbacks);
        tween.begin();
        if let Some(on_start) = tween.callbacks.on_start.as_mut() {
            on_start(from);
        }

        if spec.duration_ms == 0.0 {
            surface.set_property(target, spec.property, spec.to);
            if let Some(on_complete) = tween.callbacks.on_complete.take() {
                on_complete(spec.to);
            }
            tween.complete();
            tracing::debug!(
                property = spec.property.name(),
                to = spec.to,
                "tween completed immediately"
            );
            // mint a handle without keeping the finished tween around
            let id = self.tweens.insert(tween);
            self.tweens.remove(id);
            return Ok(id);
        }

        let id = self.tweens.insert(tween);
        self.active.insert((target, spec.property), id);
        tracing::debug!(
            property = spec.property.name(),
            to = spec.to,
            duration_ms = spec.duration_ms,
            easing = %spec.easing,
            "tween started"
        );
        Ok(id)
    }

    /// Cancel the in-flight tween on a (target, property) pair
    ///
    /// Idempotent when none is active. No callback for the cancelled tween
    /// fires after this returns.
    pub fn stop(&mut self, target: TargetId, property: Property) {
        if let Some(id) = self.active.remove(&(target, property)) {
            if let Some(mut tween) = self.tweens.remove(id) {
                tween.cancel();
                tracing::debug!(property = property.name(), "tween stopped");
            }
        }
    }

    /// Cancel every property tween on a target
    pub fn stop_all(&mut self, target: TargetId) {
        let properties: SmallVec<[Property; 4]> = self
            .active
            .keys()
            .filter(|(candidate, _)| *candidate == target)
            .map(|(_, property)| *property)
            .collect();
        for property in properties {
            self.stop(target, property);
        }
    }

    /// Advance all running tweens one frame
    ///
    /// Reads the clock once, writes each tween's interpolated value through
    /// the surface, and fires `on_update`. A tween whose elapsed time has
    /// reached its duration is clamped to the exact end value, fires
    /// `on_update` then `on_complete`, and is destroyed.
    ///
    /// Returns whether any tween is still running; a `false` return is the
    /// host's signal to stop requesting frames.
    pub fn advance(&mut self, surface: &mut dyn Surface) -> bool {
        let now = self.clock.now();
        let mut finished: SmallVec<[TweenId; 4]> = SmallVec::new();

        for (id, tween) in self.tweens.iter_mut() {
            // a frame delivered after cancellation must not touch the target
            if !tween.is_running() {
                continue;
            }

            let elapsed = tween.observe(now);
            if elapsed >= tween.duration_ms {
                surface.set_property(tween.target, tween.property, tween.to);
                if let Some(on_update) = tween.callbacks.on_update.as_mut() {
                    on_update(tween.to);
                }
                if let Some(on_complete) = tween.callbacks.on_complete.take() {
                    on_complete(tween.to);
                }
                tween.complete();
                finished.push(id);
            } else {
                let value = tween.value_at(elapsed);
                surface.set_property(tween.target, tween.property, value);
                if let Some(on_update) = tween.callbacks.on_update.as_mut() {
                    on_update(value);
                }
            }
        }

        for id in finished {
            if let Some(tween) = self.tweens.remove(id) {
                // only clear the index entry still pointing at this tween
                if self.active.get(&(tween.target, tween.property)) == Some(&id) {
                    self.active.remove(&(tween.target, tween.property));
                }
                tracing::trace!(property = tween.property.name(), "tween completed");
            }
        }

        !self.active.is_empty()
    }

    /// Whether any tween is still running
    pub fn has_active(&self) -> bool {
        !self.active.is_empty()
    }

    /// Whether the given tween is still running
    pub fn is_running(&self, id: TweenId) -> bool {
        self.tweens.get(id).is_some_and(Tween::is_running)
    }

    /// Number of running tweens
    pub fn active_count(&self) -> usize {
        self.active.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::easing::Easing;
    use crate::frame::ManualClock;
    use glide_core::{Node, Scene};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    fn fixture() -> (TweenDriver<ManualClock>, ManualClock, Scene, TargetId) {
        let clock = ManualClock::new();
        let driver = TweenDriver::with_clock(clock.clone());
        let mut scene = Scene::new();
        let target = scene.insert(Node::default());
        (driver, clock, scene, target)
    }

    fn completion_counter() -> (Arc<AtomicUsize>, TweenCallbacks) {
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&completions);
        let callbacks = TweenCallbacks::new().on_complete(move |_| {
            counter.fetch_add(1, Ordering::Relaxed);
        });
        (completions, callbacks)
    }

    #[test]
    fn zero_duration_completes_synchronously() {
        let (mut driver, _clock, mut scene, target) = fixture();
        let (completions, callbacks) = completion_counter();

        let spec = TweenSpec::new(Property::X, 50.0)
            .duration_ms(0.0)
            .easing(Easing::Linear);
        driver.start(&mut scene, target, spec, callbacks).unwrap();

        assert_eq!(scene.property(target, Property::X), Some(50.0));
        assert_eq!(completions.load(Ordering::Relaxed), 1);
        assert!(!driver.has_active());
    }

    #[test]
    fn negative_duration_is_rejected() {
        let (mut driver, _clock, mut scene, target) = fixture();
        let spec = TweenSpec::new(Property::X, 50.0).duration_ms(-1.0);
        let err = driver
            .start(&mut scene, target, spec, TweenCallbacks::new())
            .unwrap_err();
        assert!(matches!(err, TweenError::InvalidDuration(d) if d == -1.0));
        assert!(!driver.has_active());
    }

    #[test]
    fn non_finite_duration_is_rejected() {
        let (mut driver, _clock, mut scene, target) = fixture();
        let spec = TweenSpec::new(Property::X, 50.0).duration_ms(f32::NAN);
        let err = driver
            .start(&mut scene, target, spec, TweenCallbacks::new())
            .unwrap_err();
        assert!(matches!(err, TweenError::InvalidDuration(_)));
    }

    #[test]
    fn unknown_target_is_rejected() {
        let (mut driver, _clock, mut scene, target) = fixture();
        scene.remove(target);
        let err = driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::X, 50.0),
                TweenCallbacks::new(),
            )
            .unwrap_err();
        assert!(matches!(err, TweenError::UnknownTarget));
    }

    #[test]
    fn on_start_fires_with_the_start_value() {
        let (mut driver, _clock, mut scene, target) = fixture();
        scene.set_property(target, Property::Y, 25.0);

        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let callbacks = TweenCallbacks::new().on_start(move |value| {
            *sink.lock().unwrap() = Some(value);
        });
        driver
            .start(&mut scene, target, TweenSpec::new(Property::Y, 100.0), callbacks)
            .unwrap();

        assert_eq!(*seen.lock().unwrap(), Some(25.0));
    }

    #[test]
    fn stop_before_first_frame_suppresses_completion() {
        let (mut driver, clock, mut scene, target) = fixture();
        let (completions, callbacks) = completion_counter();

        driver
            .start(&mut scene, target, TweenSpec::new(Property::Y, 100.0), callbacks)
            .unwrap();
        driver.stop(target, Property::Y);

        clock.advance_ms(1000);
        driver.advance(&mut scene);

        assert_eq!(completions.load(Ordering::Relaxed), 0);
        // the cancelled tween never wrote anything
        assert_eq!(scene.property(target, Property::Y), Some(0.0));
    }

    #[test]
    fn stop_is_idempotent() {
        let (mut driver, _clock, mut scene, target) = fixture();
        driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::Y, 100.0),
                TweenCallbacks::new(),
            )
            .unwrap();
        driver.stop(target, Property::Y);
        driver.stop(target, Property::Y);
        assert!(!driver.has_active());
    }

    #[test]
    fn restart_supersedes_the_previous_tween() {
        let (mut driver, clock, mut scene, target) = fixture();
        let (first_completions, first_callbacks) = completion_counter();
        let (second_completions, second_callbacks) = completion_counter();

        let first = driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::Y, 100.0).duration_ms(200.0),
                first_callbacks,
            )
            .unwrap();
        clock.advance_ms(50);
        driver.advance(&mut scene);

        let second = driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::Y, -40.0).duration_ms(100.0),
                second_callbacks,
            )
            .unwrap();
        assert!(!driver.is_running(first));
        assert!(driver.is_running(second));
        assert_eq!(driver.active_count(), 1);

        clock.advance_ms(150);
        driver.advance(&mut scene);

        assert_eq!(first_completions.load(Ordering::Relaxed), 0);
        assert_eq!(second_completions.load(Ordering::Relaxed), 1);
        assert_eq!(scene.property(target, Property::Y), Some(-40.0));
    }

    #[test]
    fn reaches_exact_end_value_across_jittery_frames() {
        let (mut driver, clock, mut scene, target) = fixture();
        let (completions, callbacks) = completion_counter();

        let spec = TweenSpec::new(Property::Y, 100.0)
            .duration_ms(250.0)
            .easing_name("easeOutCirc")
            .unwrap();
        driver.start(&mut scene, target, spec, callbacks).unwrap();

        // irregular frame delivery summing past the duration
        for step in [16, 17, 31, 9, 90, 120] {
            clock.advance_ms(step);
            driver.advance(&mut scene);
        }

        assert_eq!(scene.property(target, Property::Y), Some(100.0));
        assert_eq!(completions.load(Ordering::Relaxed), 1);
        assert!(!driver.has_active());

        // later frames must not re-fire anything
        clock.advance_ms(100);
        driver.advance(&mut scene);
        assert_eq!(completions.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn duration_follows_the_clock_not_the_frame_count() {
        let (mut driver, clock, mut scene, target) = fixture();
        driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::Y, 100.0)
                    .duration_ms(250.0)
                    .easing(Easing::Linear),
                TweenCallbacks::new(),
            )
            .unwrap();

        // many tiny frames: still mid-flight at 200ms of wall clock
        for _ in 0..20 {
            clock.advance_ms(10);
            driver.advance(&mut scene);
        }
        assert!(driver.has_active());
        let at_200ms = scene.property(target, Property::Y).unwrap();
        assert!((at_200ms - 80.0).abs() < 0.5);

        // one coarse frame finishes it as soon as the clock passes 250ms
        clock.advance_ms(60);
        assert!(!driver.advance(&mut scene));
        assert_eq!(scene.property(target, Property::Y), Some(100.0));
    }

    #[test]
    fn updates_move_monotonically_toward_the_end_value() {
        let (mut driver, clock, mut scene, target) = fixture();
        let values = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&values);
        let callbacks = TweenCallbacks::new().on_update(move |value| {
            sink.lock().unwrap().push(value);
        });

        driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::X, 80.0).duration_ms(160.0),
                callbacks,
            )
            .unwrap();
        for _ in 0..12 {
            clock.advance_ms(16);
            driver.advance(&mut scene);
        }

        let values = values.lock().unwrap();
        assert!(!values.is_empty());
        assert!(values.windows(2).all(|pair| pair[1] >= pair[0]));
        assert_eq!(*values.last().unwrap(), 80.0);
    }

    #[test]
    fn independent_properties_animate_concurrently() {
        let (mut driver, clock, mut scene, target) = fixture();
        driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::X, 10.0).duration_ms(100.0),
                TweenCallbacks::new(),
            )
            .unwrap();
        driver
            .start(
                &mut scene,
                target,
                TweenSpec::new(Property::Opacity, 0.0).duration_ms(300.0),
                TweenCallbacks::new(),
            )
            .unwrap();
        assert_eq!(driver.active_count(), 2);

        clock.advance_ms(150);
        assert!(driver.advance(&mut scene));

        // the short tween finished, the long one is still going
        assert_eq!(scene.property(target, Property::X), Some(10.0));
        assert_eq!(driver.active_count(), 1);
    }

    #[test]
    fn stop_all_clears_every_axis() {
        let (mut driver, _clock, mut scene, target) = fixture();
        for spec in [
            TweenSpec::new(Property::X, 10.0),
            TweenSpec::new(Property::Y, 20.0),
            TweenSpec::new(Property::Opacity, 0.0),
        ] {
            driver
                .start(&mut scene, target, spec, TweenCallbacks::new())
                .unwrap();
        }
        assert_eq!(driver.active_count(), 3);

        driver.stop_all(target);
        assert!(!driver.has_active());
    }
}
