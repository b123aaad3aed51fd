//! Particle lifecycle state machine
//!
//! Every effect advances its particles through the same three states:
//! pending (delayed start not yet reached), active (normalized progress `t`
//! in `[0, 1)`), terminated (absorbing). The transition math lives here so
//! individual effects never re-derive it.

/// Lifecycle state of one particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Delayed start not yet reached; position and opacity are not
    /// meaningful and the particle may only be drawn at opacity 0
    Pending,
    /// Animating, with normalized progress `t` in `[0, 1)`
    Active {
        /// Elapsed active time divided by lifespan
        t: f32,
    },
    /// Lifespan exhausted; absorbing, the particle leaves its batch this tick
    Terminated,
}

impl Phase {
    /// Whether the particle has not started animating yet
    pub fn is_pending(&self) -> bool {
        matches!(self, Phase::Pending)
    }

    /// Whether the particle is animating
    pub fn is_active(&self) -> bool {
        matches!(self, Phase::Active { .. })
    }

    /// Whether the particle is done
    pub fn is_terminated(&self) -> bool {
        matches!(self, Phase::Terminated)
    }

    /// Normalized progress, if active
    pub fn progress(&self) -> Option<f32> {
        match *self {
            Phase::Active { t } => Some(t),
            _ => None,
        }
    }
}

/// Evaluate the transition rules for one frame.
///
/// `age` is the particle's age after this frame's increment. The delay
/// threshold is `start_delay * delta`, re-derived from the *current* frame's
/// `delta`; under variable frame timing the threshold therefore shifts with
/// instantaneous frame rate. The pending-to-active transition latches, so
/// threshold jitter can move the activation tick but never suspend an active
/// particle, and `t` is floored at 0 once active.
///
/// `lifespan` must be positive and `delta` non-negative; neither is checked.
pub(crate) fn step(current: Phase, age: f32, start_delay: f32, lifespan: f32, delta: f32) -> Phase {
    match current {
        Phase::Terminated => Phase::Terminated,
        Phase::Pending if age - start_delay * delta < 0.0 => Phase::Pending,
        _ => {
            let t = ((age - start_delay * delta) / lifespan).max(0.0);
            if t >= 1.0 {
                Phase::Terminated
            } else {
                Phase::Active { t }
            }
        }
    }
}
