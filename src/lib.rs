//! Staged particle lifecycle engine for short-lived 2D visual effects.
//!
//! Effects (fireworks, magic, lightning, ...) are batches of independently
//! timed particles: delayed start, normalized progress, fade envelopes,
//! termination. This crate owns that temporal state machine once, so effect
//! modules are reduced to data plus a small draw routine. Rendering and the
//! animation loop stay outside: the host calls [`Engine::tick`] once per
//! frame with an elapsed time unit and a [`render::Surface`].

pub mod effects;
pub mod error;
pub mod particles;
pub mod random;
pub mod render;

pub use effects::{Effect, EffectDescriptor, EffectRegistry, SpawnOptions};
pub use error::{EngineError, EngineResult};
pub use particles::{
    flicker, BatchId, Easing, Envelope, Particle, ParticleId, Phase, Position, Scheduler,
    TickReport,
};
pub use random::{RandomSource, RandomSourceExt};
pub use render::{Color, Paint, Surface};

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Engine configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Hard cap on retained particles; oversized batches are truncated
    pub max_particles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_particles: 10_000,
        }
    }
}

/// Registry, scheduler and random source bundled behind one facade
///
/// The host animation loop drives it with one [`Engine::tick`] per frame;
/// everything in between two ticks is inert.
pub struct Engine {
    registry: EffectRegistry,
    scheduler: Scheduler,
    rng: Box<dyn RandomSource>,
}

impl Engine {
    /// Engine with the built-in catalog and thread-local randomness
    pub fn new(config: EngineConfig) -> Self {
        Self {
            registry: EffectRegistry::with_builtins(),
            scheduler: Scheduler::new(config.max_particles),
            rng: Box::new(rand::thread_rng()),
        }
    }

    /// Replace the random source; a seeded source makes every `trigger`
    /// reproducible
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// The effect registry
    pub fn registry(&self) -> &EffectRegistry {
        &self.registry
    }

    /// Mutable registry access, for registering custom effects
    pub fn registry_mut(&mut self) -> &mut EffectRegistry {
        &mut self.registry
    }

    /// Start the named effect at a point. Re-triggering is idempotent in
    /// the sense that each call creates an independent batch.
    pub fn trigger(
        &mut self,
        name: &str,
        origin: Vec2,
        options: &SpawnOptions,
    ) -> EngineResult<BatchId> {
        let effect = self.registry.get(name)?;
        log::debug!("trigger '{}' at {:?}", name, origin);
        let batch = effect.spawn(origin, options, self.rng.as_mut());
        Ok(self.scheduler.insert(batch))
    }

    /// Advance one frame and draw every surviving particle
    pub fn tick(&mut self, delta: f32, surface: &mut dyn Surface) -> TickReport {
        self.scheduler.tick(delta, surface)
    }

    /// Cancel one batch; returns whether it was still live
    pub fn stop(&mut self, id: BatchId) -> bool {
        self.scheduler.stop(id)
    }

    /// Drop every live batch
    pub fn clear(&mut self) {
        self.scheduler.clear();
    }

    /// Retained particles across all batches
    pub fn particle_count(&self) -> usize {
        self.scheduler.particle_count()
    }

    /// Whether nothing is left to animate
    pub fn is_idle(&self) -> bool {
        self.scheduler.is_idle()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
