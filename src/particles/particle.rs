//! Particle data record
//!
//! A particle is the mutable state of one animated element: the common
//! temporal fields every effect relies on, plus a typed payload holding
//! whatever that effect needs (velocity, hue, trail history, ...). The
//! engine never looks inside the payload.

use glam::Vec2;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::particles::lifecycle::{step, Phase};

/// Opaque unique particle token, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticleId(u64);

impl ParticleId {
    /// Allocate the next id
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw id value
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Position ownership convention for one particle
///
/// Effects disagree on who owns the live position: some move the particle
/// point directly every frame, others anchor the particle to an immutable
/// origin and derive the drawn point from payload state and progress. The
/// tagged variant keeps the engine agnostic to either convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Immutable anchor; the effect derives the drawn point per frame
    Origin(Vec2),
    /// Live point the effect mutates in place
    Mutable(Vec2),
}

impl Position {
    /// Anchor a particle to a fixed origin
    pub const fn origin(point: Vec2) -> Self {
        Self::Origin(point)
    }

    /// Give a particle a live, effect-mutated position
    pub const fn mutable(point: Vec2) -> Self {
        Self::Mutable(point)
    }

    /// The stored point: the anchor for `Origin`, the current point for
    /// `Mutable`
    pub fn point(&self) -> Vec2 {
        match *self {
            Self::Origin(p) | Self::Mutable(p) => p,
        }
    }

    /// Mutable access to the live point; `None` for origin-anchored particles
    pub fn point_mut(&mut self) -> Option<&mut Vec2> {
        match self {
            Self::Mutable(p) => Some(p),
            Self::Origin(_) => None,
        }
    }
}

/// One animated visual element with a bounded lifespan
///
/// Created only inside `Effect::create`, mutated only inside
/// `Effect::update`, removed from its batch the tick `update` reports
/// termination. `lifespan` must be positive; the engine does not defend
/// against zero.
#[derive(Debug, Clone)]
pub struct Particle<P> {
    /// Unique token, stable for the particle's life
    pub id: ParticleId,
    /// Position under either ownership convention
    pub position: Position,
    /// Small per-effect sub-role tag ("core", "ray", ...); empty when unused
    pub kind: &'static str,
    /// Accumulated elapsed time units since creation
    pub age: f32,
    /// Time-unit budget after which the particle is complete
    pub lifespan: f32,
    /// Tick-denominated stagger offset; the particle is pending while
    /// `age < start_delay * delta` for the frame being evaluated
    pub start_delay: f32,
    /// Current derived visibility in `[0, 1]`, recomputed every active frame
    pub opacity: f32,
    /// Effect-owned extension fields, opaque to the engine
    pub payload: P,
    phase: Phase,
}

impl<P> Particle<P> {
    /// Create a particle with age 0, no delay and opacity 0
    pub fn new(position: Position, lifespan: f32, payload: P) -> Self {
        Self {
            id: ParticleId::next(),
            position,
            kind: "",
            age: 0.0,
            lifespan,
            start_delay: 0.0,
            opacity: 0.0,
            payload,
            phase: Phase::Pending,
        }
    }

    /// Tag the particle with a sub-role kind
    pub fn with_kind(mut self, kind: &'static str) -> Self {
        self.kind = kind;
        self
    }

    /// Stagger the particle's start by a tick-denominated delay
    pub fn with_start_delay(mut self, delay: f32) -> Self {
        self.start_delay = delay;
        self
    }

    /// The lifecycle state as of the last `advance`
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Advance the particle's clock by one frame and return the new phase.
    ///
    /// This is the single shared lifecycle driver: it increments `age` by
    /// `delta` and applies the transition rules. Every `Effect::update`
    /// calls it first and only touches the particle further when the result
    /// is active.
    ///
    /// A `delta` of exactly 0 freezes the particle: no field changes, no
    /// transition, the current phase is returned. Note the delay threshold
    /// is `start_delay * delta` with the current frame's `delta`, so a
    /// changing `delta` across frames shifts the effective delay; the
    /// activation latch keeps that jitter from ever suspending an active
    /// particle.
    pub fn advance(&mut self, delta: f32) -> Phase {
        if self.phase.is_terminated() || delta == 0.0 {
            return self.phase;
        }
        self.age += delta;
        self.phase = step(self.phase, self.age, self.start_delay, self.lifespan, delta);
        self.phase
    }
}
