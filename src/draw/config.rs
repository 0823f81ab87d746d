//! Runtime configuration consumed by the decay clock and the render loop.

pub const DEFAULT_STROKE_LIFETIME_SECS: f64 = 2.5;
pub const DEFAULT_TEXT_LIFETIME_SECS: f64 = 3.0;
pub const DEFAULT_ERASER_RADIUS: f32 = 24.0;
/// Degrees per frame applied to text hues when rainbow text is on.
pub const RAINBOW_HUE_STEP: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub stroke_lifetime_secs: f64,
    pub text_lifetime_secs: f64,
    pub eraser_radius: f32,
    pub rainbow_text: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stroke_lifetime_secs: DEFAULT_STROKE_LIFETIME_SECS,
            text_lifetime_secs: DEFAULT_TEXT_LIFETIME_SECS,
            eraser_radius: DEFAULT_ERASER_RADIUS,
            rainbow_text: false,
        }
    }
}

impl EngineConfig {
    pub fn text_hue_drift(&self) -> f32 {
        if self.rainbow_text {
            RAINBOW_HUE_STEP
        } else {
            0.0
        }
    }

    /// Applies a partial update. Takes effect on the next frame; existing
    /// objects keep their timestamps and are judged against the new lifetime.
    pub fn apply(&mut self, change: &ConfigChange) {
        if let Some(secs) = change.stroke_lifetime {
            self.stroke_lifetime_secs = sanitize_lifetime(secs, DEFAULT_STROKE_LIFETIME_SECS);
        }
        if let Some(secs) = change.text_lifetime {
            self.text_lifetime_secs = sanitize_lifetime(secs, DEFAULT_TEXT_LIFETIME_SECS);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConfigChange {
    pub stroke_lifetime: Option<f64>,
    pub text_lifetime: Option<f64>,
}

impl ConfigChange {
    /// Builds a change from raw slider text. Unparsable values become the
    /// defaults instead of being dropped.
    pub fn from_raw(stroke_lifetime: Option<&str>, text_lifetime: Option<&str>) -> Self {
        Self {
            stroke_lifetime: stroke_lifetime
                .map(|raw| parse_lifetime(raw, DEFAULT_STROKE_LIFETIME_SECS)),
            text_lifetime: text_lifetime.map(|raw| parse_lifetime(raw, DEFAULT_TEXT_LIFETIME_SECS)),
        }
    }
}

pub fn parse_lifetime(raw: &str, default: f64) -> f64 {
    match raw.trim().trim_end_matches('s').trim().parse::<f64>() {
        Ok(secs) => sanitize_lifetime(secs, default),
        Err(_) => {
            tracing::warn!(raw, default, "unparsable lifetime; using default");
            default
        }
    }
}

pub fn sanitize_lifetime(secs: f64, default: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 {
        secs
    } else {
        tracing::warn!(secs, default, "lifetime out of range; using default");
        default
    }
}
