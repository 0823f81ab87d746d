use crate::draw::config::{
    parse_lifetime, sanitize_lifetime, EngineConfig, DEFAULT_ERASER_RADIUS,
    DEFAULT_STROKE_LIFETIME_SECS, DEFAULT_TEXT_LIFETIME_SECS,
};
use crate::draw::model::Color;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OverlaySettings {
    #[serde(
        default = "default_stroke_lifetime",
        deserialize_with = "lenient_stroke_lifetime"
    )]
    pub stroke_lifetime_secs: f64,
    #[serde(
        default = "default_text_lifetime",
        deserialize_with = "lenient_text_lifetime"
    )]
    pub text_lifetime_secs: f64,
    #[serde(default = "default_eraser_radius")]
    pub eraser_radius: f32,
    #[serde(default)]
    pub rainbow_text: bool,
    #[serde(default = "default_panel_color")]
    pub panel_color: Color,
    #[serde(default = "default_panel_opacity")]
    pub panel_opacity: f32,
    #[serde(default = "default_stamps")]
    pub stamps: Vec<String>,
    #[serde(default)]
    pub debug_logging: bool,
    /// Log to this file instead of stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_stroke_lifetime() -> f64 {
    DEFAULT_STROKE_LIFETIME_SECS
}

fn default_text_lifetime() -> f64 {
    DEFAULT_TEXT_LIFETIME_SECS
}

fn default_eraser_radius() -> f32 {
    DEFAULT_ERASER_RADIUS
}

fn default_panel_color() -> Color {
    Color::rgba(24, 26, 34, 255)
}

fn default_panel_opacity() -> f32 {
    0.85
}

fn default_stamps() -> Vec<String> {
    ["Nice!", "Thank you!", "LOL", "GG", "Wait...", "???"]
        .into_iter()
        .map(str::to_owned)
        .collect()
}

fn lenient_stroke_lifetime<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_lifetime(
        Value::deserialize(deserializer)?,
        DEFAULT_STROKE_LIFETIME_SECS,
    ))
}

fn lenient_text_lifetime<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_lifetime(
        Value::deserialize(deserializer)?,
        DEFAULT_TEXT_LIFETIME_SECS,
    ))
}

/// Slider values have been persisted both as numbers and as strings.
fn lenient_lifetime(value: Value, default: f64) -> f64 {
    match value {
        Value::Number(number) => number
            .as_f64()
            .map(|secs| sanitize_lifetime(secs, default))
            .unwrap_or(default),
        Value::String(raw) => parse_lifetime(&raw, default),
        other => {
            tracing::warn!(%other, default, "lifetime is not a number; using default");
            default
        }
    }
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            stroke_lifetime_secs: default_stroke_lifetime(),
            text_lifetime_secs: default_text_lifetime(),
            eraser_radius: default_eraser_radius(),
            rainbow_text: false,
            panel_color: default_panel_color(),
            panel_opacity: default_panel_opacity(),
            stamps: default_stamps(),
            debug_logging: false,
            log_file: None,
        }
    }
}

impl OverlaySettings {
    pub fn engine_config(&self) -> EngineConfig {
        let eraser_radius = if self.eraser_radius.is_finite() && self.eraser_radius > 0.0 {
            self.eraser_radius
        } else {
            DEFAULT_ERASER_RADIUS
        };
        EngineConfig {
            stroke_lifetime_secs: sanitize_lifetime(
                self.stroke_lifetime_secs,
                DEFAULT_STROKE_LIFETIME_SECS,
            ),
            text_lifetime_secs: sanitize_lifetime(
                self.text_lifetime_secs,
                DEFAULT_TEXT_LIFETIME_SECS,
            ),
            eraser_radius,
            rainbow_text: self.rainbow_text,
        }
    }

    /// Stores lifetimes picked in the control panel. Invalid values keep the
    /// current ones. Returns whether anything changed.
    pub fn record_lifetimes(&mut self, stroke_secs: f64, text_secs: f64) -> bool {
        let stroke = sanitize_lifetime(stroke_secs, self.stroke_lifetime_secs);
        let text = sanitize_lifetime(text_secs, self.text_lifetime_secs);
        let changed = stroke != self.stroke_lifetime_secs || text != self.text_lifetime_secs;
        self.stroke_lifetime_secs = stroke;
        self.text_lifetime_secs = text;
        changed
    }

    pub fn record_eraser_radius(&mut self, radius: f32) -> bool {
        if !radius.is_finite() || radius <= 0.0 || radius == self.eraser_radius {
            return false;
        }
        self.eraser_radius = radius;
        true
    }

    /// Panel background with the configured opacity folded into alpha.
    pub fn panel_fill(&self) -> Color {
        self.panel_color.with_opacity(self.panel_opacity)
    }

    /// Drops blank stamps and clamps the panel opacity. Returns whether
    /// anything changed.
    pub fn sanitize(&mut self) -> bool {
        let mut changed = false;

        let before = self.stamps.len();
        self.stamps.retain(|stamp| !stamp.trim().is_empty());
        changed |= before != self.stamps.len();

        let opacity = if self.panel_opacity.is_finite() {
            self.panel_opacity.clamp(0.0, 1.0)
        } else {
            default_panel_opacity()
        };
        changed |= opacity != self.panel_opacity;
        self.panel_opacity = opacity;

        changed
    }
}
