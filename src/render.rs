//! Drawing surface boundary
//!
//! The engine never owns a renderer. Effects issue calls against an opaque
//! [`Surface`] during `draw` and nothing else; surface state is never read
//! back. Any backend exposing 2D path/fill/stroke/text primitives can
//! implement this trait.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// RGBA color with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Opaque color from RGB components
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Color from RGBA components
    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with a different alpha
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Linear interpolation between two colors
    pub fn lerp(self, other: Color, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
            a: self.a + (other.a - self.a) * t,
        }
    }
}

/// Fill or stroke paint
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Single solid color
    Solid(Color),
    /// Linear gradient between two points with positioned color stops
    Linear {
        from: Vec2,
        to: Vec2,
        stops: Vec<(f32, Color)>,
    },
    /// Radial gradient from a center with positioned color stops
    Radial {
        center: Vec2,
        radius: f32,
        stops: Vec<(f32, Color)>,
    },
}

/// Opaque 2D rendering surface
///
/// Effects wrap their calls in `save`/`restore` so no drawing state (alpha,
/// transform, path) leaks from one particle to the next. Failures inside a
/// backend are fatal to the tick; the engine performs no recovery.
pub trait Surface {
    /// Push the current drawing state
    fn save(&mut self);
    /// Pop the most recently saved drawing state
    fn restore(&mut self);

    /// Set the global alpha applied to subsequent fills and strokes
    fn set_alpha(&mut self, alpha: f32);
    /// Translate the coordinate system
    fn translate(&mut self, offset: Vec2);
    /// Rotate the coordinate system around the current origin
    fn rotate(&mut self, radians: f32);

    /// Start a fresh path
    fn begin_path(&mut self);
    /// Move the path cursor without drawing
    fn move_to(&mut self, point: Vec2);
    /// Straight segment from the cursor
    fn line_to(&mut self, point: Vec2);
    /// Quadratic curve from the cursor through a control point
    fn quadratic_to(&mut self, control: Vec2, point: Vec2);
    /// Circular arc segment
    fn arc(&mut self, center: Vec2, radius: f32, start_angle: f32, end_angle: f32);

    /// Fill the current path
    fn fill(&mut self, paint: &Paint);
    /// Stroke the current path
    fn stroke(&mut self, paint: &Paint, width: f32);
    /// Draw a run of text at a baseline point
    fn fill_text(&mut self, text: &str, at: Vec2, size: f32, paint: &Paint);
}
