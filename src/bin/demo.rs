//! Headless engine demo
//!
//! Triggers each built-in effect and runs the frame loop against a surface
//! that only counts primitive calls. Useful for eyeballing lifecycle
//! behavior (spawn, stagger, drain) from the logs without a renderer.

use anyhow::Result;
use ember_engine::{Engine, EngineConfig, Paint, SpawnOptions, Surface};
use glam::Vec2;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Surface that tallies primitive calls instead of drawing
#[derive(Debug, Default)]
struct CountingSurface {
    paths: usize,
    fills: usize,
    strokes: usize,
    glyphs: usize,
}

impl Surface for CountingSurface {
    fn save(&mut self) {}
    fn restore(&mut self) {}
    fn set_alpha(&mut self, _alpha: f32) {}
    fn translate(&mut self, _offset: Vec2) {}
    fn rotate(&mut self, _radians: f32) {}
    fn begin_path(&mut self) {
        self.paths += 1;
    }
    fn move_to(&mut self, _point: Vec2) {}
    fn line_to(&mut self, _point: Vec2) {}
    fn quadratic_to(&mut self, _control: Vec2, _point: Vec2) {}
    fn arc(&mut self, _center: Vec2, _radius: f32, _start: f32, _end: f32) {}
    fn fill(&mut self, _paint: &Paint) {
        self.fills += 1;
    }
    fn stroke(&mut self, _paint: &Paint, _width: f32) {
        self.strokes += 1;
    }
    fn fill_text(&mut self, _text: &str, _at: Vec2, _size: f32, _paint: &Paint) {
        self.glyphs += 1;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let mut engine = Engine::new(EngineConfig::default())
        .with_random_source(Box::new(StdRng::seed_from_u64(1234)));

    for (i, name) in ["fireworks", "sparkle", "lightning", "shock_ring"]
        .into_iter()
        .enumerate()
    {
        let origin = Vec2::new(120.0 + i as f32 * 160.0, 200.0);
        let id = engine.trigger(name, origin, &SpawnOptions::default())?;
        log::info!("{} -> batch #{}", name, id.raw());
    }

    let mut surface = CountingSurface::default();
    let mut frames = 0;
    while !engine.is_idle() {
        frames += 1;
        let report = engine.tick(1.0, &mut surface);
        if frames % 10 == 0 {
            log::info!(
                "frame {:3}: {} particles in {} batches ({} terminated this frame)",
                frames,
                report.active_particles,
                report.active_batches,
                report.terminated
            );
        }
    }

    log::info!(
        "drained after {} frames: {} paths, {} fills, {} strokes, {} glyphs",
        frames,
        surface.paths,
        surface.fills,
        surface.strokes,
        surface.glyphs
    );
    Ok(())
}
