//! Magic sparkle
//!
//! Glyph motes anchored around a casting point, drifting slowly outward
//! with a flickering glow. Motes spawn in staggered waves so the cloud
//! shimmers instead of popping in at once.

use glam::Vec2;
use std::f32::consts::TAU;

use crate::effects::{Effect, EffectDescriptor, SpawnOptions};
use crate::particles::{flicker, Envelope, Particle, Phase, Position};
use crate::random::{RandomSource, RandomSourceExt};
use crate::render::{Color, Paint, Surface};

const PALETTE: [Color; 4] = [
    Color::rgb(0.80, 0.62, 1.0),
    Color::rgb(0.55, 0.78, 1.0),
    Color::rgb(1.0, 0.92, 0.60),
    Color::rgb(0.95, 0.95, 1.0),
];

const DESCRIPTOR: EffectDescriptor = EffectDescriptor {
    name: "sparkle",
    label: "Magic Sparkle",
    palette: &PALETTE,
    intensity: 1.0,
};

const GLYPHS: [&str; 3] = ["\u{2726}", "\u{2727}", "\u{22c6}"];

/// Per-particle state for [`Sparkle`]
#[derive(Debug, Clone)]
pub struct Mote {
    angle: f32,
    radius: f32,
    drift: f32,
    phase: f32,
    phase_speed: f32,
    glyph: &'static str,
    color: Color,
    size: f32,
}

pub struct Sparkle;

impl Effect for Sparkle {
    type Payload = Mote;

    fn descriptor(&self) -> &EffectDescriptor {
        &DESCRIPTOR
    }

    fn create(
        &self,
        origin: Vec2,
        options: &SpawnOptions,
        rng: &mut dyn RandomSource,
    ) -> Vec<Particle<Mote>> {
        let intensity = options.effective_intensity(&DESCRIPTOR).max(0.0);
        let palette = options.palette(&DESCRIPTOR);
        let count = ((options.param("motes", 22.0) * intensity).round() as usize).max(3);

        (0..count)
            .map(|i| {
                Particle::new(
                    Position::origin(origin),
                    rng.uniform(40.0, 80.0) * options.duration_scale,
                    Mote {
                        angle: rng.uniform(0.0, TAU),
                        radius: rng.uniform(3.0, 26.0),
                        drift: rng.uniform(0.1, 0.5),
                        phase: rng.uniform(0.0, TAU),
                        phase_speed: rng.uniform(0.25, 0.7),
                        glyph: *rng.pick(&GLYPHS),
                        color: *rng.pick(palette),
                        size: rng.uniform(6.0, 12.0),
                    },
                )
                .with_kind("mote")
                // four waves, two ticks apart
                .with_start_delay((i % 4) as f32 * 2.0)
            })
            .collect()
    }

    fn update(&self, particle: &mut Particle<Mote>, delta: f32) -> Phase {
        let phase = particle.advance(delta);
        if let Phase::Active { t } = phase {
            let mote = &mut particle.payload;
            mote.phase += mote.phase_speed * delta;
            mote.radius += mote.drift * delta;
            particle.opacity = flicker(Envelope::SineHump.opacity(t), mote.phase, 0.55);
        }
        phase
    }

    fn draw(&self, surface: &mut dyn Surface, particle: &Particle<Mote>) {
        let mote = &particle.payload;
        let anchor = particle.position.point();
        let point = anchor + Vec2::new(mote.angle.cos(), mote.angle.sin()) * mote.radius;

        surface.save();
        surface.set_alpha(particle.opacity);
        surface.fill_text(mote.glyph, point, mote.size, &Paint::Solid(mote.color));
        surface.restore();
    }
}
