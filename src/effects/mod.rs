//! Effect contract and built-in catalog
//!
//! An effect is a named, stateless descriptor of one visual behavior,
//! expressed as three operations: `create` a batch of particles, `update`
//! one particle per frame, `draw` one live particle. Concrete effects are
//! data plus a small draw routine; the shared delay/progress/termination
//! math lives in [`crate::particles`].

pub mod fireworks;
pub mod lightning;
pub mod registry;
pub mod shock_ring;
pub mod sparkle;

pub use fireworks::Fireworks;
pub use lightning::Lightning;
pub use registry::EffectRegistry;
pub use shock_ring::ShockRing;
pub use sparkle::Sparkle;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::particles::{Particle, Phase};
use crate::random::RandomSource;
use crate::render::{Color, Surface};

/// Immutable effect metadata, constructed once and never mutated
#[derive(Debug, Clone, Copy)]
pub struct EffectDescriptor {
    /// Registry key
    pub name: &'static str,
    /// Human-readable label
    pub label: &'static str,
    /// Default palette, used when options carry no override
    pub palette: &'static [Color],
    /// Default intensity scalar
    pub intensity: f32,
}

/// Recognized creation options
///
/// Unrecognized or out-of-range values are each effect's own business to
/// clamp or ignore; the engine validates nothing here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnOptions {
    /// Scales particle counts and magnitudes
    pub intensity: f32,
    /// Palette override; empty or absent falls back to the descriptor
    pub colors: Option<Vec<Color>>,
    /// Lifespan multiplier
    pub duration_scale: f32,
    /// Effect-specific named parameters
    pub params: HashMap<String, f32>,
}

impl Default for SpawnOptions {
    fn default() -> Self {
        Self {
            intensity: 1.0,
            colors: None,
            duration_scale: 1.0,
            params: HashMap::new(),
        }
    }
}

impl SpawnOptions {
    /// Override the intensity scalar
    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Override the palette
    pub fn with_colors(mut self, colors: Vec<Color>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Override the lifespan multiplier
    pub fn with_duration_scale(mut self, scale: f32) -> Self {
        self.duration_scale = scale;
        self
    }

    /// Set an effect-specific named parameter
    pub fn with_param(mut self, name: impl Into<String>, value: f32) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    /// Combined intensity: the caller's scalar times the effect's default
    pub fn effective_intensity(&self, descriptor: &EffectDescriptor) -> f32 {
        self.intensity * descriptor.intensity
    }

    /// The palette to draw from: the override when present and nonempty,
    /// otherwise the descriptor default
    pub fn palette<'a>(&'a self, descriptor: &'a EffectDescriptor) -> &'a [Color] {
        match &self.colors {
            Some(colors) if !colors.is_empty() => colors,
            _ => descriptor.palette,
        }
    }

    /// Named parameter lookup with a default
    pub fn param(&self, name: &str, default: f32) -> f32 {
        self.params.get(name).copied().unwrap_or(default)
    }
}

/// One visual behavior over its own typed particle payload
///
/// Implementations are stateless apart from configuration; all per-particle
/// state lives in the payload. Registering the implementation is the only
/// integration point.
pub trait Effect: Send + Sync + 'static {
    /// Effect-owned per-particle extension fields
    type Payload: 'static;

    /// The effect's immutable metadata
    fn descriptor(&self) -> &EffectDescriptor;

    /// Produce a fresh batch at an origin point.
    ///
    /// Every particle starts with `age` 0; a nonzero `start_delay` staggers
    /// visual sub-elements. Deterministic given a deterministic `rng`; no
    /// side effects beyond allocation.
    fn create(
        &self,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Particle<Self::Payload>>;

    /// Advance one particle by the frame's elapsed time units.
    ///
    /// Must route the clock through [`Particle::advance`] and only touch the
    /// particle further while it is active. Returns the resulting phase; a
    /// terminated result removes the particle from its batch this tick,
    /// permanently.
    fn update(&self, particle: &mut Particle<Self::Payload>, delta: f32) -> Phase;

    /// Draw one currently-retained particle.
    ///
    /// Read-only with respect to the particle; wraps surface calls in
    /// `save`/`restore`. Pending particles are drawn at opacity 0.
    fn draw(&self, surface: &mut dyn Surface, particle: &Particle<Self::Payload>);
}

/// Object-safe face of [`Effect`], so effects with different payload types
/// share one registry and one scheduler
pub trait ErasedEffect: Send + Sync {
    /// The effect's immutable metadata
    fn descriptor(&self) -> &EffectDescriptor;

    /// Create a batch and erase its payload type
    fn spawn(
        self: Arc<Self>,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Box<dyn ErasedBatch>;
}

impl std::fmt::Debug for dyn ErasedEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErasedEffect")
            .field("name", &self.descriptor().name)
            .finish()
    }
}

impl<E: Effect> ErasedEffect for E {
    fn descriptor(&self) -> &EffectDescriptor {
        Effect::descriptor(self)
    }

    fn spawn(
        self: Arc<Self>,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Box<dyn ErasedBatch> {
        let particles = self.create(origin, options, rng);
        Box::new(TypedBatch {
            effect: self,
            particles,
        })
    }
}

/// One live batch: the particles of a single `create` call, bound to their
/// effect, with the payload type erased
pub trait ErasedBatch {
    /// Name of the owning effect, for logs and reports
    fn effect_name(&self) -> &'static str;

    /// Update every particle in stable order and compact terminated ones in
    /// place, preserving survivor order. Returns the number terminated.
    fn update(&mut self, delta: f32) -> usize;

    /// Draw every retained particle in the same stable order
    fn draw(&self, surface: &mut dyn Surface);

    /// Retained particle count
    fn len(&self) -> usize;

    /// Whether the batch has drained
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop particles beyond `len`, keeping the head of the batch
    fn truncate(&mut self, len: usize);
}

struct TypedBatch<E: Effect> {
    effect: Arc<E>,
    particles: Vec<Particle<E::Payload>>,
}

impl<E: Effect> ErasedBatch for TypedBatch<E> {
    fn effect_name(&self) -> &'static str {
        self.effect.descriptor().name
    }

    fn update(&mut self, delta: f32) -> usize {
        let effect = &self.effect;
        let before = self.particles.len();
        self.particles
            .retain_mut(|p| !effect.update(p, delta).is_terminated());
        before - self.particles.len()
    }

    fn draw(&self, surface: &mut dyn Surface) {
        for particle in &self.particles {
            self.effect.draw(surface, particle);
        }
    }

    fn len(&self) -> usize {
        self.particles.len()
    }

    fn truncate(&mut self, len: usize) {
        self.particles.truncate(len);
    }
}
