use crate::draw::model::Millis;

/// Fraction of the lifetime an object stays fully opaque before fading.
pub const PLATEAU: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fade {
    pub opacity: f32,
    pub dead: bool,
}

impl Fade {
    pub const OPAQUE: Fade = Fade {
        opacity: 1.0,
        dead: false,
    };
    pub const DEAD: Fade = Fade {
        opacity: 0.0,
        dead: true,
    };
}

/// Opacity of an object created at `created_at` when observed at `now`.
///
/// While `whiteboard_suppressed` is set nothing fades. Otherwise the object is
/// fully opaque for the first 70% of `lifetime_secs`, fades linearly to zero
/// over the remainder and is dead from the end of its lifetime onwards.
pub fn decay(now: Millis, created_at: Millis, lifetime_secs: f64, whiteboard_suppressed: bool) -> Fade {
    if whiteboard_suppressed {
        return Fade::OPAQUE;
    }

    let span_ms = lifetime_secs * 1000.0;
    if !span_ms.is_finite() || span_ms <= 0.0 {
        return Fade::DEAD;
    }

    let progress = (now as f64 - created_at as f64) / span_ms;
    if progress >= 1.0 {
        return Fade::DEAD;
    }
    if progress <= PLATEAU {
        return Fade::OPAQUE;
    }

    Fade {
        opacity: ((1.0 - progress) / (1.0 - PLATEAU)) as f32,
        dead: false,
    }
}
