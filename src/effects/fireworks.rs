//! Firework burst
//!
//! A central flash plus two rings of gravity-bound sparks, the outer ring
//! staggered a few ticks behind the first.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::effects::{Effect, EffectDescriptor, SpawnOptions};
use crate::particles::{Easing, Envelope, Particle, Phase, Position};
use crate::random::{RandomSource, RandomSourceExt};
use crate::render::{Color, Paint, Surface};

const PALETTE: [Color; 5] = [
    Color::rgb(1.0, 0.84, 0.35),
    Color::rgb(1.0, 0.55, 0.26),
    Color::rgb(0.98, 0.31, 0.42),
    Color::rgb(0.46, 0.77, 1.0),
    Color::rgb(0.67, 0.94, 0.55),
];

const DESCRIPTOR: EffectDescriptor = EffectDescriptor {
    name: "fireworks",
    label: "Fireworks",
    palette: &PALETTE,
    intensity: 1.0,
};

/// Per-particle state for [`Fireworks`]
#[derive(Debug, Clone)]
pub struct Spark {
    velocity: Vec2,
    color: Color,
    size: f32,
}

pub struct Fireworks;

impl Fireworks {
    const RING_DELAYS: [f32; 2] = [0.0, 4.0];
    const RING_SPEEDS: [f32; 2] = [1.0, 0.55];
    const FLASH_RADIUS: f32 = 26.0;
}

impl Effect for Fireworks {
    type Payload = Spark;

    fn descriptor(&self) -> &EffectDescriptor {
        &DESCRIPTOR
    }

    fn create(
        &self,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Particle<Spark>> {
        let intensity = options.effective_intensity(&DESCRIPTOR).max(0.0);
        let palette = options.palette(&DESCRIPTOR);
        let per_ring = ((options.param("sparks", 28.0) * intensity).round() as usize).max(4);
        let speed = options.param("speed", 2.6);

        let mut particles = Vec::with_capacity(per_ring * Self::RING_DELAYS.len() + 1);

        // Central flash, expanding and gone before most sparks fade
        particles.push(
            Particle::new(
                Position::origin(origin),
                9.0 * options.duration_scale,
                Spark {
                    velocity: Vec2::ZERO,
                    color: *rng.pick(palette),
                    size: Self::FLASH_RADIUS * intensity.sqrt(),
                },
            )
            .with_kind("flash"),
        );

        for (ring, (&delay, &speed_scale)) in Self::RING_DELAYS
            .iter()
            .zip(Self::RING_SPEEDS.iter())
            .enumerate()
        {
            for i in 0..per_ring {
                let angle = (i as f32 + ring as f32 * 0.5) / per_ring as f32 * TAU
                    + rng.uniform(-0.06, 0.06);
                let magnitude = speed * speed_scale * rng.uniform(0.75, 1.25);
                particles.push(
                    Particle::new(
                        Position::mutable(origin),
                        rng.uniform(34.0, 54.0) * options.duration_scale,
                        Spark {
                            velocity: Vec2::new(angle.cos(), angle.sin()) * magnitude,
                            color: *rng.pick(palette),
                            size: rng.uniform(1.4, 2.6),
                        },
                    )
                    .with_kind("spark")
                    .with_start_delay(delay),
                );
            }
        }

        particles
    }

    fn update(&self, particle: &mut Particle<Spark>, delta: f32) -> Phase {
        let phase = particle.advance(delta);
        if let Phase::Active { t } = phase {
            match particle.kind {
                "spark" => {
                    let spark = &mut particle.payload;
                    spark.velocity.y += 0.055 * delta;
                    spark.velocity *= 1.0 - 0.012 * delta;
                    if let Some(point) = particle.position.point_mut() {
                        *point += spark.velocity * delta;
                    }
                    particle.opacity = Envelope::Decay.opacity(t);
                }
                _ => {
                    particle.opacity = Envelope::SineHump.opacity(t);
                }
            }
        }
        phase
    }

    fn draw(&self, surface: &mut dyn Surface, particle: &Particle<Spark>) {
        let spark = &particle.payload;
        let point = particle.position.point();
        let t = particle.phase().progress().unwrap_or(0.0);

        surface.save();
        surface.set_alpha(particle.opacity);
        surface.begin_path();
        match particle.kind {
            "spark" => {
                surface.arc(point, spark.size * (1.0 - 0.4 * t), 0.0, TAU);
                surface.fill(&Paint::Solid(spark.color));
            }
            _ => {
                let radius = (spark.size * Easing::QuadOut.apply(t)).max(0.1);
                surface.arc(point, radius, 0.0, TAU);
                surface.fill(&Paint::Radial {
                    center: point,
                    radius,
                    stops: vec![
                        (0.0, Color::WHITE),
                        (0.6, spark.color),
                        (1.0, spark.color.with_alpha(0.0)),
                    ],
                });
            }
        }
        surface.restore();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn create(options: &SpawnOptions, seed: u64) -> Vec<Particle<Spark>> {
        let mut rng = StdRng::seed_from_u64(seed);
        Fireworks.create(Vec2::new(100.0, 80.0), options, &mut rng)
    }

    #[test]
    fn test_create_is_deterministic_under_seed() {
        let a = create(&SpawnOptions::default(), 9);
        let b = create(&SpawnOptions::default(), 9);
        assert_eq!(a.len(), b.len());
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.lifespan, pb.lifespan);
            assert_eq!(pa.payload.velocity, pb.payload.velocity);
            assert_eq!(pa.payload.color, pb.payload.color);
        }
    }

    #[test]
    fn test_intensity_scales_spark_count() {
        let base = create(&SpawnOptions::default(), 1).len();
        let double = create(&SpawnOptions::default().with_intensity(2.0), 1).len();
        assert!(double > base);
    }

    #[test]
    fn test_second_ring_is_staggered() {
        let particles = create(&SpawnOptions::default(), 3);
        let delays: Vec<f32> = particles
            .iter()
            .filter(|p| p.kind == "spark")
            .map(|p| p.start_delay)
            .collect();
        assert!(delays.contains(&0.0));
        assert!(delays.contains(&4.0));
    }

    #[test]
    fn test_sparks_fall_fade_and_terminate() {
        let mut particles = create(&SpawnOptions::default(), 5);
        let mut ticks = 0;
        while !particles.is_empty() {
            ticks += 1;
            assert!(ticks < 100, "sparks should all terminate");
            particles.retain_mut(|p| {
                let phase = Fireworks.update(p, 1.0);
                if phase.is_active() {
                    assert!((0.0..=1.0).contains(&p.opacity));
                }
                !phase.is_terminated()
            });
        }
    }

    #[test]
    fn test_palette_override_is_used() {
        let magenta = Color::rgb(1.0, 0.0, 1.0);
        let options = SpawnOptions::default().with_colors(vec![magenta]);
        for particle in create(&options, 2) {
            assert_eq!(particle.payload.color, magenta);
        }
    }
}
