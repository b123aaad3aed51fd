//! Lightning strike
//!
//! A jagged main bolt built once at creation, plus a couple of shorter
//! branches that flash in a tick or two behind it. Bolts hold at full
//! brightness briefly and then die off fast.

use glam::Vec2;

use crate::effects::{Effect, EffectDescriptor, SpawnOptions};
use crate::particles::{flicker, Envelope, Particle, Phase, Position};
use crate::random::{RandomSource, RandomSourceExt};
use crate::render::{Color, Paint, Surface};

const PALETTE: [Color; 2] = [Color::rgb(0.88, 0.93, 1.0), Color::rgb(0.68, 0.80, 1.0)];

const DESCRIPTOR: EffectDescriptor = EffectDescriptor {
    name: "lightning",
    label: "Lightning",
    palette: &PALETTE,
    intensity: 1.0,
};

const ENVELOPE: Envelope = Envelope::Plateau { hold: 0.35 };

/// Per-particle state for [`Lightning`]
#[derive(Debug, Clone)]
pub struct Bolt {
    points: Vec<Vec2>,
    color: Color,
    width: f32,
    phase: f32,
}

pub struct Lightning;

impl Lightning {
    /// Jagged polyline from `from` toward `to`
    fn trace(from: Vec2, to: Vec2, segments: usize, sway: f32, rng: &mut dyn RandomSource) -> Vec<Vec2> {
        let mut points = Vec::with_capacity(segments + 1);
        points.push(from);
        for i in 1..segments {
            let along = i as f32 / segments as f32;
            let spine = from.lerp(to, along);
            points.push(spine + Vec2::new(rng.uniform(-sway, sway), rng.uniform(-sway, sway) * 0.4));
        }
        points.push(to);
        points
    }
}

impl Effect for Lightning {
    type Payload = Bolt;

    fn descriptor(&self) -> &EffectDescriptor {
        &DESCRIPTOR
    }

    fn create(
        &self,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Particle<Bolt>> {
        let intensity = options.effective_intensity(&DESCRIPTOR).max(0.0);
        let palette = options.palette(&DESCRIPTOR);
        let length = options.param("length", 130.0) * intensity.max(0.2);
        let lifespan = 12.0 * options.duration_scale;

        let tip = origin + Vec2::new(rng.uniform(-0.2, 0.2) * length, length);
        let spine = Self::trace(origin, tip, 12, length * 0.08, rng);

        let mut particles = Vec::new();

        let branch_count = ((2.0 * intensity).round() as usize).clamp(1, 4);
        for _ in 0..branch_count {
            // branch off a random interior joint of the main bolt
            let joint = spine[1 + rng.pick_index(spine.len() - 2)];
            let reach = length * rng.uniform(0.2, 0.4);
            let end = joint + Vec2::new(rng.uniform(-1.0, 1.0) * reach, reach * rng.uniform(0.4, 1.0));
            particles.push(
                Particle::new(
                    Position::origin(origin),
                    lifespan * 0.8,
                    Bolt {
                        points: Self::trace(joint, end, 5, length * 0.05, rng),
                        color: *rng.pick(palette),
                        width: 1.2,
                        phase: rng.uniform(0.0, 2.0),
                    },
                )
                .with_kind("branch")
                .with_start_delay(rng.uniform(1.0, 2.5)),
            );
        }

        particles.push(
            Particle::new(
                Position::origin(origin),
                lifespan,
                Bolt {
                    points: spine,
                    color: *rng.pick(palette),
                    width: 2.4,
                    phase: 0.0,
                },
            )
            .with_kind("bolt"),
        );

        particles
    }

    fn update(&self, particle: &mut Particle<Bolt>, delta: f32) -> Phase {
        let phase = particle.advance(delta);
        if let Phase::Active { t } = phase {
            let bolt = &mut particle.payload;
            bolt.phase += 1.8 * delta;
            particle.opacity = flicker(ENVELOPE.opacity(t), bolt.phase, 0.3);
        }
        phase
    }

    fn draw(&self, surface: &mut dyn Surface, particle: &Particle<Bolt>) {
        let bolt = &particle.payload;

        surface.save();
        surface.set_alpha(particle.opacity);
        surface.begin_path();
        surface.move_to(bolt.points[0]);
        for &point in &bolt.points[1..] {
            surface.line_to(point);
        }
        // halo pass under the core stroke
        surface.stroke(&Paint::Solid(bolt.color.with_alpha(0.35)), bolt.width * 3.0);
        surface.stroke(&Paint::Solid(bolt.color), bolt.width);
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create(seed: u64) -> Vec<Particle<Bolt>> {
        let mut rng = StdRng::seed_from_u64(seed);
        Lightning.create(Vec2::new(200.0, 0.0), &SpawnOptions::default(), &mut rng)
    }

    #[test]
    fn test_main_bolt_plus_branches() {
        let particles = create(6);
        assert_eq!(particles.iter().filter(|p| p.kind == "bolt").count(), 1);
        assert!(particles.iter().filter(|p| p.kind == "branch").count() >= 1);
    }

    #[test]
    fn test_main_bolt_spans_requested_length() {
        let particles = create(6);
        let bolt = particles.iter().find(|p| p.kind == "bolt").unwrap();
        let first = *bolt.payload.points.first().unwrap();
        let last = *bolt.payload.points.last().unwrap();
        assert_eq!(first, Vec2::new(200.0, 0.0));
        assert!(last.y > 100.0);
    }

    #[test]
    fn test_branches_flash_late_and_die_early() {
        let particles = create(9);
        for branch in particles.iter().filter(|p| p.kind == "branch") {
            assert!(branch.start_delay >= 1.0);
            assert!(branch.lifespan < 12.0);
        }
    }

    #[test]
    fn test_bolt_holds_then_fades() {
        let mut particles = create(2);
        let mut ticks = 0;
        while !particles.is_empty() {
            ticks += 1;
            assert!(ticks < 40, "bolts should be gone quickly");
            particles.retain_mut(|p| {
                let phase = Lightning.update(p, 1.0);
                if phase.is_active() {
                    assert!((0.0..=1.0).contains(&p.opacity));
                }
                !phase.is_terminated()
            });
        }
    }
}
