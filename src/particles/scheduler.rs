//! Lifecycle scheduler
//!
//! Owns every live batch and drives the per-frame cycle: update each
//! particle in stable order, compact terminated ones, then draw the
//! survivors. Ticks are strictly sequential; nothing here suspends or
//! yields, and no other component may touch batch membership.

use crate::effects::ErasedBatch;
use crate::render::Surface;

/// Handle to one live batch, for explicit cancellation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BatchId(u64);

impl BatchId {
    /// The raw id value
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Per-tick counters
#[derive(Debug, Default, Clone, Copy)]
pub struct TickReport {
    /// Particles retained (and drawn) this tick
    pub active_particles: usize,
    /// Batches still live after compaction
    pub active_batches: usize,
    /// Particles terminated this tick
    pub terminated: usize,
}

/// The per-frame driver over zero or more live batches
pub struct Scheduler {
    batches: Vec<(BatchId, Box<dyn ErasedBatch>)>,
    next_id: u64,
    max_particles: usize,
}

impl Scheduler {
    /// Create a scheduler capped at `max_particles` retained particles
    pub fn new(max_particles: usize) -> Self {
        Self {
            batches: Vec::new(),
            next_id: 0,
            max_particles,
        }
    }

    /// Adopt a freshly created batch.
    ///
    /// The batch is truncated to the remaining particle headroom; insertion
    /// order is draw order. Returns a handle usable with [`Scheduler::stop`].
    pub fn insert(&mut self, mut batch: Box<dyn ErasedBatch>) -> BatchId {
        let headroom = self.max_particles.saturating_sub(self.particle_count());
        if batch.len() > headroom {
            log::warn!(
                "batch '{}' truncated from {} to {} particles (cap {})",
                batch.effect_name(),
                batch.len(),
                headroom,
                self.max_particles
            );
            batch.truncate(headroom);
        }
        let id = BatchId(self.next_id);
        self.next_id += 1;
        log::debug!(
            "batch '{}' adopted as #{} with {} particles",
            batch.effect_name(),
            id.raw(),
            batch.len()
        );
        self.batches.push((id, batch));
        id
    }

    /// Advance one frame: update, compact, then draw.
    ///
    /// Update strictly precedes every draw within the tick, so no particle
    /// is ever drawn at a pre-update position. Batches that drain are
    /// removed before drawing; a panic inside an effect propagates and
    /// aborts the tick.
    pub fn tick(&mut self, delta: f32, surface: &mut dyn Surface) -> TickReport {
        let mut terminated = 0;
        for (_, batch) in &mut self.batches {
            terminated += batch.update(delta);
        }

        self.batches.retain(|(id, batch)| {
            if batch.is_empty() {
                log::debug!("batch '{}' #{} drained", batch.effect_name(), id.raw());
                false
            } else {
                true
            }
        });

        let mut active_particles = 0;
        for (_, batch) in &self.batches {
            batch.draw(surface);
            active_particles += batch.len();
        }

        TickReport {
            active_particles,
            active_batches: self.batches.len(),
            terminated,
        }
    }

    /// Drop one batch outright. Coarse cancellation: nothing is in flight
    /// between ticks, so removal is just forgetting the reference.
    pub fn stop(&mut self, id: BatchId) -> bool {
        match self.batches.iter().position(|(batch_id, _)| *batch_id == id) {
            Some(index) => {
                self.batches.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop every batch
    pub fn clear(&mut self) {
        self.batches.clear();
    }

    /// Total retained particles across all batches
    pub fn particle_count(&self) -> usize {
        self.batches.iter().map(|(_, b)| b.len()).sum()
    }

    /// Live batch count
    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    /// Whether nothing is left to animate
    pub fn is_idle(&self) -> bool {
        self.batches.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::{Effect, EffectDescriptor, ErasedEffect, SpawnOptions};
    use crate::particles::{Particle, Phase, Position};
    use crate::random::RandomSource;
    use crate::render::{Color, Paint};
    use glam::Vec2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::Arc;

    /// Minimal effect: `count` particles, the i-th living `5 * (i + 1)` ticks
    struct Staircase {
        count: usize,
    }

    const STAIRCASE_PALETTE: [Color; 1] = [Color::WHITE];
    const STAIRCASE: EffectDescriptor = EffectDescriptor {
        name: "staircase",
        label: "Staircase",
        palette: &STAIRCASE_PALETTE,
        intensity: 1.0,
    };

    impl Effect for Staircase {
        type Payload = usize;

        fn descriptor(&self) -> &EffectDescriptor {
            &STAIRCASE
        }

        fn create(
            &self,
            origin: Vec2,
            _options: &SpawnOptions,
            _rng: &mut dyn RandomSource,
        ) -> Vec<Particle<usize>> {
            (0..self.count)
                .map(|i| Particle::new(Position::mutable(origin), 5.0 * (i + 1) as f32, i))
                .collect()
        }

        fn update(&self, particle: &mut Particle<usize>, delta: f32) -> Phase {
            particle.advance(delta)
        }

        fn draw(&self, surface: &mut dyn Surface, _particle: &Particle<usize>) {
            surface.fill(&Paint::Solid(Color::WHITE));
        }
    }

    /// Surface double that counts fills
    #[derive(Default)]
    struct CountingSurface {
        fills: usize,
    }

    impl Surface for CountingSurface {
        fn save(&mut self) {}
        fn restore(&mut self) {}
        fn set_alpha(&mut self, _alpha: f32) {}
        fn translate(&mut self, _offset: Vec2) {}
        fn rotate(&mut self, _radians: f32) {}
        fn begin_path(&mut self) {}
        fn move_to(&mut self, _point: Vec2) {}
        fn line_to(&mut self, _point: Vec2) {}
        fn quadratic_to(&mut self, _control: Vec2, _point: Vec2) {}
        fn arc(&mut self, _center: Vec2, _radius: f32, _start: f32, _end: f32) {}
        fn fill(&mut self, _paint: &Paint) {
            self.fills += 1;
        }
        fn stroke(&mut self, _paint: &Paint, _width: f32) {}
        fn fill_text(&mut self, _text: &str, _at: Vec2, _size: f32, _paint: &Paint) {}
    }

    fn spawn(scheduler: &mut Scheduler, count: usize) -> BatchId {
        let effect: Arc<dyn ErasedEffect> = Arc::new(Staircase { count });
        let mut rng = StdRng::seed_from_u64(0);
        let batch = effect.spawn(Vec2::ZERO, &SpawnOptions::default(), &mut rng);
        scheduler.insert(batch)
    }

    #[test]
    fn test_compaction_preserves_survivors() {
        let mut scheduler = Scheduler::new(1000);
        spawn(&mut scheduler, 3);

        let mut surface = CountingSurface::default();
        // lifespans 5/10/15: after 5 ticks the first particle is gone
        for _ in 0..4 {
            let report = scheduler.tick(1.0, &mut surface);
            assert_eq!(report.active_particles, 3);
            assert_eq!(report.terminated, 0);
        }
        let report = scheduler.tick(1.0, &mut surface);
        assert_eq!(report.terminated, 1);
        assert_eq!(report.active_particles, 2);
        assert_eq!(surface.fills, 4 * 3 + 2);
    }

    #[test]
    fn test_drained_batches_are_removed() {
        let mut scheduler = Scheduler::new(1000);
        spawn(&mut scheduler, 1);
        spawn(&mut scheduler, 2);

        let mut surface = CountingSurface::default();
        for _ in 0..5 {
            scheduler.tick(1.0, &mut surface);
        }
        // first batch (single 5-tick particle) drained on tick 5
        assert_eq!(scheduler.batch_count(), 1);

        for _ in 0..5 {
            scheduler.tick(1.0, &mut surface);
        }
        assert_eq!(scheduler.batch_count(), 0);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_stop_removes_batch() {
        let mut scheduler = Scheduler::new(1000);
        let id = spawn(&mut scheduler, 4);
        assert_eq!(scheduler.particle_count(), 4);
        assert!(scheduler.stop(id));
        assert!(!scheduler.stop(id));
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_cap_truncates_batch() {
        let mut scheduler = Scheduler::new(5);
        spawn(&mut scheduler, 4);
        spawn(&mut scheduler, 4);
        assert_eq!(scheduler.particle_count(), 5);
    }

    #[test]
    fn test_zero_delta_tick_changes_nothing() {
        let mut scheduler = Scheduler::new(1000);
        spawn(&mut scheduler, 3);
        let mut surface = CountingSurface::default();
        scheduler.tick(1.0, &mut surface);
        let report = scheduler.tick(0.0, &mut surface);
        assert_eq!(report.terminated, 0);
        assert_eq!(report.active_particles, 3);
    }

    #[test]
    fn test_clear() {
        let mut scheduler = Scheduler::new(1000);
        spawn(&mut scheduler, 3);
        scheduler.clear();
        assert!(scheduler.is_idle());
        assert_eq!(scheduler.particle_count(), 0);
    }
}
