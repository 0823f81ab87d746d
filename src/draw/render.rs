use crate::draw::clock::Clock;
use crate::draw::controller::OverlayController;
use crate::draw::model::{Color, Point};
use crate::draw::store::Frame;

/// Paint target for one frame. Implementations draw immediately; nothing is
/// retained between frames.
pub trait Surface {
    fn clear(&mut self);
    /// Open polyline with round joins and caps.
    fn polyline(&mut self, points: &[Point], color: Color, width: f32);
    /// Text centered on `center`.
    fn text(&mut self, center: Point, text: &str, color: Color, size: f32);
    fn dot(&mut self, center: Point, radius: f32, color: Color);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub stroke_width: f32,
    pub stroke_saturation: f32,
    pub stroke_lightness: f32,
    pub text_size: f32,
    /// How far a text floats upwards by the time it has faded out.
    pub text_rise: f32,
    pub particle_radius: f32,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            stroke_width: 6.0,
            stroke_saturation: 1.0,
            stroke_lightness: 0.6,
            text_size: 40.0,
            text_rise: 60.0,
            particle_radius: 2.5,
        }
    }
}

pub fn paint_frame(frame: &Frame<'_>, surface: &mut dyn Surface, style: &RenderStyle) {
    surface.clear();

    for faded in &frame.strokes {
        let color = Color::from_hsla(
            faded.item.hue,
            style.stroke_saturation,
            style.stroke_lightness,
            faded.opacity,
        );
        paint_stroke(&faded.item.points, color, surface, style);
    }

    if let Some(active) = frame.active_stroke {
        let color = Color::from_hsla(
            active.hue,
            style.stroke_saturation,
            style.stroke_lightness,
            1.0,
        );
        paint_stroke(&active.points, color, surface, style);
    }

    for faded in &frame.texts {
        let rise = if frame.whiteboard || faded.item.lifecycle.is_persistent() {
            0.0
        } else {
            (1.0 - faded.opacity) * style.text_rise
        };
        let color = Color::from_hsla(
            faded.item.hue,
            style.stroke_saturation,
            style.stroke_lightness,
            faded.opacity,
        );
        let at = Point::new(faded.item.anchor.x, faded.item.anchor.y - rise);
        surface.text(at, &faded.item.text, color, style.text_size);
    }

    for particle in frame.particles {
        surface.dot(
            particle.position,
            style.particle_radius,
            particle.color.with_opacity(particle.life),
        );
    }
}

fn paint_stroke(points: &[Point], color: Color, surface: &mut dyn Surface, style: &RenderStyle) {
    match points {
        [] => {}
        [single] => surface.dot(*single, style.stroke_width / 2.0, color),
        _ => surface.polyline(points, color, style.stroke_width),
    }
}

/// Per-frame driver: drains queued input, advances the engine to the clock's
/// current time and paints the result. The host calls [`RenderLoop::frame`]
/// once per display refresh and schedules the next call straight away.
#[derive(Debug)]
pub struct RenderLoop<C: Clock> {
    clock: C,
    style: RenderStyle,
    frames: u64,
}

impl<C: Clock> RenderLoop<C> {
    pub fn new(clock: C, style: RenderStyle) -> Self {
        Self {
            clock,
            style,
            frames: 0,
        }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn frame(&mut self, controller: &mut OverlayController, surface: &mut dyn Surface) {
        let now = self.clock.now_ms();
        controller.pump(now);
        let frame = controller.current_frame(now);
        paint_frame(&frame, surface, &self.style);
        self.frames += 1;
    }
}
