use crate::draw::model::Point;
use crate::draw::state::Mode;

/// Absolute desktop coordinates in physical pixels, as reported by the
/// global hook.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

impl ScreenPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Overlay-local logical coordinates, as reported by the window's own input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WindowPoint {
    pub x: f32,
    pub y: f32,
}

impl WindowPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Where the overlay sits on the desktop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayBounds {
    pub x: i32,
    pub y: i32,
    /// Logical width, used as the right margin for sentence layout.
    pub width: f32,
    pub height: f32,
    pub scale_factor: f32,
}

impl Default for OverlayBounds {
    fn default() -> Self {
        Self {
            x: 0,
            y: 0,
            width: 1920.0,
            height: 1080.0,
            scale_factor: 1.0,
        }
    }
}

/// Turns the two input sources into canvas points. Global events only count
/// in pointer mode and local events only while the overlay captures input.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputRouter {
    bounds: OverlayBounds,
}

impl InputRouter {
    pub fn new(bounds: OverlayBounds) -> Self {
        Self { bounds }
    }

    pub fn bounds(&self) -> OverlayBounds {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: OverlayBounds) {
        self.bounds = bounds;
    }

    pub fn screen_to_window(&self, at: ScreenPoint) -> WindowPoint {
        let scale = if self.bounds.scale_factor.is_finite() && self.bounds.scale_factor > 0.0 {
            self.bounds.scale_factor
        } else {
            1.0
        };
        WindowPoint::new(
            (at.x - self.bounds.x as f32) / scale,
            (at.y - self.bounds.y as f32) / scale,
        )
    }

    /// Canvas point for a global click, or `None` when the overlay is
    /// capturing and the click belongs to the local listeners.
    pub fn global_mouse_down(&self, mode: Mode, at: ScreenPoint) -> Option<Point> {
        if mode.captures_input() {
            return None;
        }
        let local = self.screen_to_window(at);
        Some(Point::new(local.x, local.y))
    }

    /// Canvas point for a local pointer event, or `None` in pointer mode.
    pub fn local(&self, mode: Mode, at: WindowPoint) -> Option<Point> {
        if !mode.captures_input() {
            return None;
        }
        Some(Point::new(at.x, at.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> InputRouter {
        InputRouter::new(OverlayBounds {
            x: 100,
            y: 50,
            width: 800.0,
            height: 600.0,
            scale_factor: 2.0,
        })
    }

    #[test]
    fn global_clicks_are_mapped_into_window_space() {
        let point = router()
            .global_mouse_down(Mode::Pointer, ScreenPoint::new(300.0, 250.0))
            .expect("pointer mode accepts global clicks");
        assert_eq!(point, Point::new(100.0, 100.0));
    }

    #[test]
    fn global_clicks_are_ignored_while_drawing() {
        assert_eq!(
            router().global_mouse_down(Mode::Drawing, ScreenPoint::new(300.0, 250.0)),
            None
        );
    }

    #[test]
    fn local_events_pass_through_only_while_drawing() {
        let at = WindowPoint::new(12.0, 34.0);
        assert_eq!(router().local(Mode::Drawing, at), Some(Point::new(12.0, 34.0)));
        assert_eq!(router().local(Mode::Pointer, at), None);
    }

    #[test]
    fn bogus_scale_factor_is_treated_as_one() {
        let router = InputRouter::new(OverlayBounds {
            scale_factor: 0.0,
            ..OverlayBounds::default()
        });
        assert_eq!(
            router.screen_to_window(ScreenPoint::new(5.0, 6.0)),
            WindowPoint::new(5.0, 6.0)
        );
    }
}
