//! Tween engine errors

use thiserror::Error;

/// Errors surfaced by the tween engine
///
/// Every failure is local to the tween (or pump) that raised it; a rejected
/// start leaves no driver state behind.
#[derive(Debug, Error)]
pub enum TweenError {
    /// Unknown easing curve name in a tween spec
    #[error("unknown easing curve `{0}`")]
    InvalidEasing(String),

    /// Negative or non-finite tween duration
    #[error("invalid tween duration {0}ms")]
    InvalidDuration(f32),

    /// The surface has no target under the given id
    #[error("surface has no such target")]
    UnknownTarget,

    /// The fallback frame pump could not be spawned
    #[error("frame scheduling unavailable: {0}")]
    Scheduler(#[from] std::io::Error),
}
