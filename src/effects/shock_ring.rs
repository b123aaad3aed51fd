//! Expanding shock ring
//!
//! Concentric rings racing outward from an impact point. Radius grows on a
//! cubic ease-out so the impact reads as a snap followed by a settle; rings
//! after the first start a few ticks late.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::effects::{Effect, EffectDescriptor, SpawnOptions};
use crate::particles::{Easing, Envelope, Particle, Phase, Position};
use crate::random::{RandomSource, RandomSourceExt};
use crate::render::{Color, Paint, Surface};

const PALETTE: [Color; 3] = [
    Color::rgb(1.0, 0.97, 0.86),
    Color::rgb(1.0, 0.76, 0.42),
    Color::rgb(0.93, 0.42, 0.30),
];

const DESCRIPTOR: EffectDescriptor = EffectDescriptor {
    name: "shock_ring",
    label: "Shock Ring",
    palette: &PALETTE,
    intensity: 1.0,
};

const ENVELOPE: Envelope = Envelope::Triangle {
    rise: 0.12,
    fall: 0.55,
};

/// Per-particle state for [`ShockRing`]
#[derive(Debug, Clone)]
pub struct Ring {
    max_radius: f32,
    /// Current eased radius, recomputed every active frame
    radius: f32,
    width: f32,
    color: Color,
}

pub struct ShockRing;

impl Effect for ShockRing {
    type Payload = Ring;

    fn descriptor(&self) -> &EffectDescriptor {
        &DESCRIPTOR
    }

    fn create(
        &self,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Particle<Ring>> {
        let intensity = options.effective_intensity(&DESCRIPTOR).max(0.0);
        let palette = options.palette(&DESCRIPTOR);
        let reach = options.param("radius", 58.0) * intensity.max(0.2);
        let rings = (options.param("rings", 3.0).round() as usize).clamp(1, 6);

        (0..rings)
            .map(|i| {
                Particle::new(
                    Position::origin(origin),
                    rng.uniform(22.0, 30.0) * options.duration_scale,
                    Ring {
                        max_radius: reach * (1.0 + i as f32 * 0.35),
                        radius: 0.0,
                        width: 3.2 - i as f32 * 0.6,
                        color: *rng.pick(palette),
                    },
                )
                .with_kind("ring")
                .with_start_delay(i as f32 * 3.0)
            })
            .collect()
    }

    fn update(&self, particle: &mut Particle<Ring>, delta: f32) -> Phase {
        let phase = particle.advance(delta);
        if let Phase::Active { t } = phase {
            let ring = &mut particle.payload;
            ring.radius = ring.max_radius * Easing::CubicOut.apply(t);
            particle.opacity = ENVELOPE.opacity(t);
        }
        phase
    }

    fn draw(&self, surface: &mut dyn Surface, particle: &Particle<Ring>) {
        let ring = &particle.payload;
        let center = particle.position.point();
        let t = particle.phase().progress().unwrap_or(0.0);

        surface.save();
        surface.set_alpha(particle.opacity);
        surface.begin_path();
        surface.arc(center, ring.radius.max(0.1), 0.0, TAU);
        surface.stroke(
            &Paint::Solid(ring.color),
            (ring.width * (1.0 - 0.5 * t)).max(0.4),
        );
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create(options: &SpawnOptions, seed: u64) -> Vec<Particle<Ring>> {
        let mut rng = StdRng::seed_from_u64(seed);
        ShockRing.create(Vec2::ZERO, options, &mut rng)
    }

    #[test]
    fn test_rings_are_staggered_and_widening() {
        let particles = create(&SpawnOptions::default(), 1);
        assert_eq!(particles.len(), 3);
        assert_eq!(particles[0].start_delay, 0.0);
        assert_eq!(particles[1].start_delay, 3.0);
        assert_eq!(particles[2].start_delay, 6.0);
        assert!(particles[2].payload.max_radius > particles[0].payload.max_radius);
    }

    #[test]
    fn test_ring_count_param() {
        let options = SpawnOptions::default().with_param("rings", 5.0);
        assert_eq!(create(&options, 1).len(), 5);
    }

    #[test]
    fn test_radius_growth_is_monotone() {
        let mut particles = create(&SpawnOptions::default(), 7);
        let mut ring = particles.remove(0);
        let mut last_radius = 0.0;
        loop {
            let phase = ShockRing.update(&mut ring, 1.0);
            if phase.is_terminated() {
                break;
            }
            if phase.is_active() {
                assert!(ring.payload.radius >= last_radius);
                assert!(ring.payload.radius <= ring.payload.max_radius);
                assert!((0.0..=1.0).contains(&ring.opacity));
                last_radius = ring.payload.radius;
            }
        }
    }
}
