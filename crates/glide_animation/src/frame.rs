//! Frame pacing
//!
//! The driver is host-independent: it needs a monotonic clock and somebody to
//! call [`TweenDriver::advance`](crate::driver::TweenDriver::advance) once per
//! frame. Hosts with a native frame callback (vsync, compositor redraw) call
//! `advance` from it directly. Hosts without one run the fixed-interval
//! [`FramePump`] fallback, which wakes the host event loop at a target rate
//! until stopped.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::TweenError;

/// Default pump rate in frames per second
pub const DEFAULT_FPS: u32 = 60;

/// Monotonic time source
///
/// Implementations must never run backwards; the driver's elapsed-time
/// bookkeeping guards against misbehaving clocks but cannot repair them.
pub trait Clock {
    fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`]
pub struct MonotonicClock {
    origin: Instant,
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// Hand-advanced clock for deterministic frame stepping
///
/// Clones share the same underlying time, so a test can hold one handle and
/// hand another to the driver.
#[derive(Clone, Default)]
pub struct ManualClock {
    now: Arc<Mutex<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }

    pub fn set(&self, to: Duration) {
        *self.now.lock().unwrap() = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        *self.now.lock().unwrap()
    }
}

/// Callback that asks the host event loop to deliver another frame
pub type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// Fixed-interval frame pump
///
/// The fallback scheduling primitive for hosts without a native frame
/// callback: a background thread invoking the wake callback at the target
/// rate. [`stop`](FramePump::stop) is synchronous revocation; no wake is
/// delivered after it returns. The pump stops itself on drop.
pub struct FramePump {
    stop_flag: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl FramePump {
    /// Start waking the host at `target_fps`
    ///
    /// Spawn failure propagates to the caller; there is no retry.
    pub fn spawn(target_fps: u32, wake: WakeCallback) -> Result<Self, TweenError> {
        let frame_duration = Duration::from_micros(1_000_000 / u64::from(target_fps.max(1)));
        let stop_flag = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&stop_flag);

        let thread = thread::Builder::new()
            .name("glide-frame-pump".into())
            .spawn(move || {
                while !flag.load(Ordering::Relaxed) {
                    let start = Instant::now();
                    wake();

                    // sleep out the remainder of the frame
                    let elapsed = start.elapsed();
                    if elapsed < frame_duration {
                        thread::sleep(frame_duration - elapsed);
                    }
                }
            })?;

        tracing::debug!(fps = target_fps, "frame pump started");
        Ok(Self {
            stop_flag,
            thread: Some(thread),
        })
    }

    /// Revoke the frame chain; no wake is delivered after this returns
    pub fn stop(&mut self) {
        self.stop_flag.store(true, Ordering::Relaxed);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
            tracing::debug!("frame pump stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread.is_some()
    }
}

impl Drop for FramePump {
    fn drop(&mut self) {
        self.stop();
    }
}
