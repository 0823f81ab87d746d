use crate::draw::model::Point;

/// Rough advance of one glyph at the overlay text size.
pub const GLYPH_ADVANCE: f32 = 24.0;
pub const LINE_HEIGHT: f32 = 52.0;
const WORD_GAP: f32 = GLYPH_ADVANCE / 2.0;

/// Caret used in sentence layout. Each committed text is placed at the caret,
/// which then moves right by the text's estimated width and wraps to a new
/// line back at the anchor's column once it passes the right margin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SentenceCursor {
    anchor: Point,
    caret: Point,
}

impl Default for SentenceCursor {
    fn default() -> Self {
        Self::at(Point::new(GLYPH_ADVANCE, LINE_HEIGHT))
    }
}

impl SentenceCursor {
    pub fn at(anchor: Point) -> Self {
        Self {
            anchor,
            caret: anchor,
        }
    }

    pub fn caret(&self) -> Point {
        self.caret
    }

    pub fn reanchor(&mut self, anchor: Point) {
        *self = Self::at(anchor);
    }

    /// Returns the anchor point for `text` (centered, like floating text) and
    /// advances the caret past it.
    pub fn place(&mut self, text: &str, right_margin: f32) -> Point {
        let width = estimate_width(text);
        if self.caret.x > self.anchor.x && self.caret.x + width > right_margin {
            self.caret = Point::new(self.anchor.x, self.caret.y + LINE_HEIGHT);
        }
        let placed = Point::new(self.caret.x + width / 2.0, self.caret.y);
        self.caret.x += width + WORD_GAP;
        placed
    }
}

pub fn estimate_width(text: &str) -> f32 {
    text.chars().count() as f32 * GLYPH_ADVANCE
}
