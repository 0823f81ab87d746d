use crate::draw::config::EngineConfig;
use crate::draw::decay::decay;
use crate::draw::model::{Color, Hue, Lifecycle, Millis, Particle, Point, Stroke, TextAnnotation};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Life removed from every particle on each frame.
pub const PARTICLE_DECAY_PER_FRAME: f32 = 0.02;
/// Largest per-axis particle speed, in pixels per frame.
pub const PARTICLE_MAX_SPEED: f32 = 5.0;

/// An object borrowed for one frame together with its computed opacity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Faded<'a, T> {
    pub item: &'a T,
    pub opacity: f32,
}

/// Read view handed to the painter for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame<'a> {
    pub strokes: Vec<Faded<'a, Stroke>>,
    pub active_stroke: Option<&'a Stroke>,
    pub texts: Vec<Faded<'a, TextAnnotation>>,
    pub particles: &'a [Particle],
    pub whiteboard: bool,
}

/// Owns every live stroke, text annotation and particle.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    texts: Vec<TextAnnotation>,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deterministic particle velocities and hues, for tests and benches.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            strokes: Vec::new(),
            active: None,
            texts: Vec::new(),
            particles: Vec::new(),
            rng,
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn texts(&self) -> &[TextAnnotation] {
        &self.texts
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
            && self.active.is_none()
            && self.texts.is_empty()
            && self.particles.is_empty()
    }

    pub fn random_hue(&mut self) -> Hue {
        Hue::new(self.rng.gen_range(0.0..360.0))
    }

    /// Starts a stroke at `point`. Ignored while another stroke is in progress.
    pub fn add_stroke(&mut self, point: Point, hue: Hue) {
        if self.active.is_some() {
            return;
        }
        self.active = Some(Stroke {
            points: vec![point],
            hue,
            created_at: 0,
            lifecycle: Lifecycle::Transient,
        });
    }

    pub fn extend_active_stroke(&mut self, point: Point) {
        if let Some(stroke) = self.active.as_mut() {
            stroke.points.push(point);
        }
    }

    /// Moves the in-progress stroke into the live collection, freezing its
    /// timestamp at `now`.
    pub fn commit_active_stroke(&mut self, now: Millis, lifecycle: Lifecycle) {
        let Some(mut stroke) = self.active.take() else {
            return;
        };
        if stroke.points.is_empty() {
            return;
        }
        stroke.created_at = now;
        stroke.lifecycle = lifecycle;
        self.strokes.push(stroke);
    }

    /// Appends a text annotation. Blank text is ignored.
    pub fn add_text(
        &mut self,
        text: &str,
        anchor: Point,
        hue: Hue,
        now: Millis,
        lifecycle: Lifecycle,
    ) -> bool {
        if text.trim().is_empty() {
            return false;
        }
        self.texts.push(TextAnnotation {
            text: text.to_owned(),
            anchor,
            hue,
            created_at: now,
            lifecycle,
        });
        true
    }

    pub fn add_particles(&mut self, at: Point, hue: Hue, count: usize) {
        let color = Color::from_hsla(hue, 1.0, 0.7, 1.0);
        self.particles.reserve(count);
        for _ in 0..count {
            let velocity = Point::new(
                self.rng.gen_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
                self.rng.gen_range(-PARTICLE_MAX_SPEED..PARTICLE_MAX_SPEED),
            );
            self.particles.push(Particle {
                position: at,
                velocity,
                life: 1.0,
                color,
            });
        }
    }

    /// Removes texts anchored inside the circle and cuts the covered points
    /// out of every stroke, splitting strokes where the cut lands mid-line.
    pub fn erase_at(&mut self, center: Point, radius: f32) {
        self.texts.retain(|text| !text.anchor.within(center, radius));

        if !self
            .strokes
            .iter()
            .any(|stroke| stroke.points.iter().any(|p| p.within(center, radius)))
        {
            return;
        }

        let before = self.strokes.len();
        let mut remaining = Vec::with_capacity(before);
        for stroke in std::mem::take(&mut self.strokes) {
            if stroke.points.iter().any(|p| p.within(center, radius)) {
                remaining.extend(split_outside(&stroke, center, radius));
            } else {
                remaining.push(stroke);
            }
        }
        tracing::debug!(before, after = remaining.len(), "eraser split strokes");
        self.strokes = remaining;
    }

    /// Advances one frame: steps particles, drifts text hues, evicts dead
    /// objects and returns what is left with its opacity.
    pub fn tick(&mut self, now: Millis, config: &EngineConfig, whiteboard_active: bool) -> Frame<'_> {
        let mut stroke_opacity = Vec::with_capacity(self.strokes.len());
        self.strokes.retain(|stroke| {
            let fade = decay(
                now,
                stroke.created_at,
                config.stroke_lifetime_secs,
                whiteboard_active || stroke.lifecycle.is_persistent(),
            );
            if !fade.dead {
                stroke_opacity.push(fade.opacity);
            }
            !fade.dead
        });

        let drift = config.text_hue_drift();
        let mut text_opacity = Vec::with_capacity(self.texts.len());
        self.texts.retain_mut(|text| {
            let fade = decay(
                now,
                text.created_at,
                config.text_lifetime_secs,
                whiteboard_active || text.lifecycle.is_persistent(),
            );
            if fade.dead {
                return false;
            }
            if drift != 0.0 {
                text.hue = text.hue.shifted(drift);
            }
            text_opacity.push(fade.opacity);
            true
        });

        for particle in &mut self.particles {
            particle.position.x += particle.velocity.x;
            particle.position.y += particle.velocity.y;
            particle.life -= PARTICLE_DECAY_PER_FRAME;
        }
        self.particles.retain(|particle| !particle.is_dead());

        Frame {
            strokes: self
                .strokes
                .iter()
                .zip(stroke_opacity)
                .map(|(item, opacity)| Faded { item, opacity })
                .collect(),
            active_stroke: self.active.as_ref(),
            texts: self
                .texts
                .iter()
                .zip(text_opacity)
                .map(|(item, opacity)| Faded { item, opacity })
                .collect(),
            particles: &self.particles,
            whiteboard: whiteboard_active,
        }
    }

    pub fn clear_all(&mut self) {
        self.strokes.clear();
        self.active = None;
        self.texts.clear();
        self.particles.clear();
    }
}

/// Maximal runs of `stroke`'s points lying strictly outside the circle, each
/// as its own stroke carrying the source hue, timestamp and lifecycle.
pub fn split_outside(stroke: &Stroke, center: Point, radius: f32) -> Vec<Stroke> {
    let mut fragments = Vec::new();
    let mut run: Vec<Point> = Vec::new();
    for &point in &stroke.points {
        if point.within(center, radius) {
            if !run.is_empty() {
                fragments.push(fragment_of(stroke, std::mem::take(&mut run)));
            }
        } else {
            run.push(point);
        }
    }
    if !run.is_empty() {
        fragments.push(fragment_of(stroke, run));
    }
    fragments
}

fn fragment_of(source: &Stroke, points: Vec<Point>) -> Stroke {
    Stroke {
        points,
        hue: source.hue,
        created_at: source.created_at,
        lifecycle: source.lifecycle,
    }
}
