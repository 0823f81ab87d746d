use serde::{Deserialize, Serialize};

/// Milliseconds since the Unix epoch.
pub type Millis = u64;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_sq(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Inclusive: a point exactly on the rim counts as inside.
    pub fn within(self, center: Point, radius: f32) -> bool {
        self.distance_sq(center) <= radius * radius
    }
}

/// Hue angle in degrees, always normalized to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hue(f32);

impl Hue {
    pub fn new(degrees: f32) -> Self {
        if !degrees.is_finite() {
            return Self(0.0);
        }
        Self(degrees.rem_euclid(360.0))
    }

    pub fn degrees(self) -> f32 {
        self.0
    }

    pub fn shifted(self, by: f32) -> Self {
        Self::new(self.0 + by)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// CSS-style `hsla()`: saturation and lightness in `[0, 1]`, alpha in `[0, 1]`.
    pub fn from_hsla(hue: Hue, saturation: f32, lightness: f32, alpha: f32) -> Self {
        let s = saturation.clamp(0.0, 1.0);
        let l = lightness.clamp(0.0, 1.0);
        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let h = hue.degrees() / 60.0;
        let x = c * (1.0 - (h.rem_euclid(2.0) - 1.0).abs());
        let (r1, g1, b1) = match h as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };
        let m = l - c / 2.0;
        Self::rgba(
            channel(r1 + m),
            channel(g1 + m),
            channel(b1 + m),
            channel(alpha),
        )
    }

    pub fn with_opacity(self, opacity: f32) -> Self {
        let scaled = self.a as f32 * opacity.clamp(0.0, 1.0);
        Self {
            a: scaled.round() as u8,
            ..self
        }
    }
}

fn channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Whether an object takes part in decay at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    Transient,
    /// Created on the whiteboard; never decays.
    Persistent,
}

impl Lifecycle {
    pub fn is_persistent(self) -> bool {
        matches!(self, Self::Persistent)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub points: Vec<Point>,
    pub hue: Hue,
    pub created_at: Millis,
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextAnnotation {
    pub text: String,
    pub anchor: Point,
    pub hue: Hue,
    pub created_at: Millis,
    pub lifecycle: Lifecycle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: Point,
    /// Pixels per frame.
    pub velocity: Point,
    /// Remaining life in `[0, 1]`.
    pub life: f32,
    pub color: Color,
}

impl Particle {
    pub fn is_dead(&self) -> bool {
        self.life <= 0.0
    }
}
