use crate::draw::config::EngineConfig;
use crate::draw::input::{InputRouter, OverlayBounds};
use crate::draw::keyboard_hook::DoubleTapDetector;
use crate::draw::layout::SentenceCursor;
use crate::draw::messages::OverlayEvent;
use crate::draw::model::{Millis, Point};
use crate::draw::state::{Layout, Mode, ModeChange, ModeDescription, ModeState, Placement};
use crate::draw::store::{AnnotationStore, Frame};

/// Particles per spark burst.
pub const SPARK_COUNT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Stroke,
    Erase,
}

/// All mutable overlay state. Every event goes through [`EngineState::dispatch`].
#[derive(Debug, Clone)]
pub struct EngineState {
    store: AnnotationStore,
    modes: ModeState,
    config: EngineConfig,
    router: InputRouter,
    hotkey: DoubleTapDetector,
    sentence: SentenceCursor,
    pointer: Point,
    drag: Option<Drag>,
}

impl EngineState {
    pub fn new(config: EngineConfig, bounds: OverlayBounds) -> Self {
        Self::with_store(AnnotationStore::new(), config, bounds)
    }

    pub fn with_store(store: AnnotationStore, config: EngineConfig, bounds: OverlayBounds) -> Self {
        Self {
            store,
            modes: ModeState::default(),
            config,
            router: InputRouter::new(bounds),
            hotkey: DoubleTapDetector::default(),
            sentence: SentenceCursor::default(),
            pointer: Point::default(),
            drag: None,
        }
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn modes(&self) -> &ModeState {
        &self.modes
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mode_description(&self) -> ModeDescription {
        self.modes.describe()
    }

    /// Decays, evicts and steps everything for the frame shown at `now`.
    pub fn current_frame(&mut self, now: Millis) -> Frame<'_> {
        let whiteboard = self.modes.whiteboard_active();
        self.store.tick(now, &self.config, whiteboard)
    }

    /// Applies one event. Returns the mode change observers should hear about.
    pub fn dispatch(&mut self, event: OverlayEvent, now: Millis) -> Option<ModeChange> {
        match event {
            OverlayEvent::GlobalKeyDown { keycode } => {
                if self.hotkey.register(keycode, now) {
                    return Some(self.toggle_capture(now));
                }
                None
            }
            OverlayEvent::GlobalMouseDown(at) => {
                if let Some(point) = self.router.global_mouse_down(self.modes.mode(), at) {
                    self.spark(point);
                }
                None
            }
            OverlayEvent::LocalPointerDown(at) => {
                let point = self.router.local(self.modes.mode(), at)?;
                self.pointer_down(point, now)
            }
            OverlayEvent::LocalPointerMove(at) => {
                if let Some(point) = self.router.local(self.modes.mode(), at) {
                    self.pointer_move(point);
                }
                None
            }
            OverlayEvent::LocalPointerUp(at) => {
                if let Some(point) = self.router.local(self.modes.mode(), at) {
                    self.pointer = point;
                    self.finish_drag(now);
                }
                None
            }
            OverlayEvent::LocalTextCommit(text) => {
                if self.modes.mode().captures_input() {
                    self.commit_text(&text, now);
                }
                None
            }
            OverlayEvent::ConfigChanged(change) => {
                self.config.apply(&change);
                None
            }
            OverlayEvent::Clear => {
                self.store.clear_all();
                self.drag = None;
                None
            }
            OverlayEvent::SelectTool(tool) => Some(self.modes.select_tool(tool)),
            OverlayEvent::SelectStamp(stamp) => Some(self.modes.select_stamp(stamp)),
            OverlayEvent::ToggleSentence => Some(self.modes.toggle_sentence()),
            OverlayEvent::ToggleWhiteboard => Some(self.modes.toggle_whiteboard()),
            OverlayEvent::ToggleCapture => Some(self.toggle_capture(now)),
            OverlayEvent::SetEraserRadius(radius) => {
                if radius.is_finite() && radius > 0.0 {
                    self.config.eraser_radius = radius;
                } else {
                    tracing::warn!(radius, "ignoring invalid eraser radius");
                }
                None
            }
            OverlayEvent::SetBounds(bounds) => {
                self.router.set_bounds(bounds);
                None
            }
        }
    }

    fn toggle_capture(&mut self, now: Millis) -> ModeChange {
        // a release may never arrive once click-through is back on
        if self.modes.mode() == Mode::Drawing {
            self.finish_drag(now);
        }
        self.modes.toggle_capture()
    }

    fn spark(&mut self, at: Point) {
        let hue = self.store.random_hue();
        self.store.add_particles(at, hue, SPARK_COUNT);
    }

    fn pointer_down(&mut self, point: Point, now: Millis) -> Option<ModeChange> {
        self.finish_drag(now);
        self.pointer = point;
        self.spark(point);
        if self.modes.layout() == Layout::Sentence {
            self.sentence.reanchor(point);
        }

        match self.modes.take_placement() {
            Placement::Stamp(stamp) => {
                let hue = self.store.random_hue();
                let lifecycle = self.modes.new_object_lifecycle();
                self.store.add_text(&stamp, point, hue, now, lifecycle);
                tracing::debug!(%stamp, "stamp placed");
                Some(ModeChange::Updated)
            }
            Placement::Stroke => {
                let hue = self.store.random_hue();
                self.store.add_stroke(point, hue);
                self.drag = Some(Drag::Stroke);
                None
            }
            Placement::Erase => {
                self.store.erase_at(point, self.config.eraser_radius);
                self.drag = Some(Drag::Erase);
                None
            }
        }
    }

    fn pointer_move(&mut self, point: Point) {
        self.pointer = point;
        match self.drag {
            Some(Drag::Stroke) => self.store.extend_active_stroke(point),
            Some(Drag::Erase) => self.store.erase_at(point, self.config.eraser_radius),
            None => {}
        }
    }

    fn finish_drag(&mut self, now: Millis) {
        if let Some(Drag::Stroke) = self.drag.take() {
            let lifecycle = self.modes.new_object_lifecycle();
            self.store.commit_active_stroke(now, lifecycle);
        }
    }

    fn commit_text(&mut self, text: &str, now: Millis) {
        if text.trim().is_empty() {
            return;
        }
        let anchor = match self.modes.layout() {
            Layout::Floating => self.pointer,
            Layout::Sentence => self.sentence.place(text, self.router.bounds().width),
        };
        let hue = self.store.random_hue();
        let lifecycle = self.modes.new_object_lifecycle();
        self.store.add_text(text, anchor, hue, now, lifecycle);
    }
}
