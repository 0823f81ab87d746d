use crate::draw::clock::SystemClock;
use crate::draw::config::ConfigChange;
use crate::draw::engine::EngineState;
use crate::draw::input::{OverlayBounds, WindowPoint};
use crate::draw::keyboard_hook::GlobalHook;
use crate::draw::messages::{OverlayEvent, OverlayNotice};
use crate::draw::model::{Color, Point};
use crate::draw::render::{RenderLoop, RenderStyle, Surface};
use crate::draw::settings::OverlaySettings;
use crate::draw::settings_store;
use crate::draw::state::{Layout, Mode, Persistence, Tool};
use crate::draw::OverlayController;
use eframe::egui;
use std::sync::mpsc::{Receiver, Sender};

/// [`Surface`] backed by an egui painter on the background layer.
pub struct EguiSurface {
    painter: egui::Painter,
}

impl EguiSurface {
    pub fn new(painter: egui::Painter) -> Self {
        Self { painter }
    }
}

fn pos(point: Point) -> egui::Pos2 {
    egui::pos2(point.x, point.y)
}

pub fn color32(color: Color) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(color.r, color.g, color.b, color.a)
}

impl Surface for EguiSurface {
    fn clear(&mut self) {
        // egui rebuilds every shape each frame
    }

    fn polyline(&mut self, points: &[Point], color: Color, width: f32) {
        let color = color32(color);
        let line: Vec<egui::Pos2> = points.iter().copied().map(pos).collect();
        self.painter
            .add(egui::Shape::line(line, egui::Stroke::new(width, color)));
        for point in points {
            self.painter.circle_filled(pos(*point), width / 2.0, color);
        }
    }

    fn text(&mut self, center: Point, text: &str, color: Color, size: f32) {
        self.painter.text(
            pos(center),
            egui::Align2::CENTER_CENTER,
            text,
            egui::FontId::proportional(size),
            color32(color),
        );
    }

    fn dot(&mut self, center: Point, radius: f32, color: Color) {
        self.painter.circle_filled(pos(center), radius, color32(color));
    }
}

/// Transparent full-screen overlay window.
pub struct OverlayApp {
    controller: OverlayController,
    events: Sender<OverlayEvent>,
    notices: Receiver<OverlayNotice>,
    render: RenderLoop<SystemClock>,
    settings: OverlaySettings,
    /// Detached on drop.
    _hook: GlobalHook,
    capture: bool,
    bounds: Option<OverlayBounds>,
    settings_dirty: bool,
    stroke_lifetime: f64,
    text_lifetime: f64,
    eraser_radius: f32,
}

impl OverlayApp {
    pub fn new(settings: OverlaySettings) -> Self {
        let config = settings.engine_config();
        let mut controller =
            OverlayController::new(EngineState::new(config, OverlayBounds::default()));
        let notices = controller.subscribe();
        let events = controller.sender();

        let mut hook = GlobalHook::default();
        if let Err(err) = hook.activate(controller.sender()) {
            tracing::warn!(?err, "failed to start global input hook");
        }

        Self {
            controller,
            events,
            notices,
            render: RenderLoop::new(SystemClock, RenderStyle::default()),
            settings,
            _hook: hook,
            capture: false,
            bounds: None,
            settings_dirty: false,
            stroke_lifetime: config.stroke_lifetime_secs,
            text_lifetime: config.text_lifetime_secs,
            eraser_radius: config.eraser_radius,
        }
    }

    fn send(&self, event: OverlayEvent) {
        // the controller owns the receiving end, so this cannot fail while `self` lives
        let _ = self.events.send(event);
    }

    fn sync_bounds(&mut self, ctx: &egui::Context) {
        let scale = ctx.pixels_per_point();
        let screen = ctx.screen_rect();
        let origin = ctx
            .input(|i| i.viewport().outer_rect)
            .map(|rect| rect.min)
            .unwrap_or(egui::Pos2::ZERO);
        let bounds = OverlayBounds {
            x: (origin.x * scale).round() as i32,
            y: (origin.y * scale).round() as i32,
            width: screen.width(),
            height: screen.height(),
            scale_factor: scale,
        };
        if self.bounds != Some(bounds) {
            self.bounds = Some(bounds);
            self.send(OverlayEvent::SetBounds(bounds));
        }
    }

    fn forward_local_input(&mut self, ctx: &egui::Context) {
        let over_panel = ctx.is_pointer_over_area();
        let typing_in_panel = ctx.wants_keyboard_input();
        let events = ctx.input(|i| i.events.clone());
        for event in events {
            if let Some(event) = local_event(event, over_panel, typing_in_panel) {
                self.send(event);
            }
        }
    }

    /// Writes slider changes back to the settings file once the drag is over.
    fn persist_settings(&mut self, ctx: &egui::Context) {
        if !self.settings_dirty || ctx.input(|i| i.pointer.any_down()) {
            return;
        }
        self.save_settings();
    }

    fn save_settings(&mut self) {
        self.settings_dirty = false;
        match settings_store::save(&self.settings) {
            Ok(path) => tracing::debug!(path = %path.display(), "overlay settings saved"),
            Err(err) => tracing::warn!(?err, "failed to save overlay settings"),
        }
    }

    fn apply_notices(&mut self, ctx: &egui::Context) {
        while let Ok(notice) = self.notices.try_recv() {
            match notice {
                OverlayNotice::CaptureChanged { capture } => {
                    self.capture = capture;
                    ctx.send_viewport_cmd(egui::ViewportCommand::MousePassthrough(!capture));
                    if capture {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Focus);
                    }
                    tracing::info!(capture, "overlay capture changed");
                }
                OverlayNotice::ModeChanged(description) => {
                    tracing::debug!(?description, "overlay mode changed");
                }
            }
        }
    }

    fn controls(&mut self, ctx: &egui::Context) {
        let description = self.controller.mode_description();
        if description.mode != Mode::Drawing {
            return;
        }

        let fill = color32(self.settings.panel_fill());
        egui::Window::new("doodle")
            .title_bar(false)
            .resizable(false)
            .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
            .frame(egui::Frame::window(&ctx.style()).fill(fill))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    for (tool, label) in [(Tool::Pen, "Pen"), (Tool::Eraser, "Eraser")] {
                        let selected = description.highlighted_tool == Some(tool);
                        if ui.selectable_label(selected, label).clicked() {
                            self.send(OverlayEvent::SelectTool(tool));
                        }
                    }
                    ui.menu_button("Stamps", |ui| {
                        for stamp in &self.settings.stamps {
                            if ui.button(stamp.as_str()).clicked() {
                                self.send(OverlayEvent::SelectStamp(stamp.clone()));
                                ui.close_menu();
                            }
                        }
                    });
                });
                ui.horizontal(|ui| {
                    let sentence = description.layout == Layout::Sentence;
                    if ui.selectable_label(sentence, "Sentence").clicked() {
                        self.send(OverlayEvent::ToggleSentence);
                    }
                    let whiteboard = description.persistence == Persistence::Whiteboard;
                    if ui.selectable_label(whiteboard, "Whiteboard").clicked() {
                        self.send(OverlayEvent::ToggleWhiteboard);
                    }
                    if ui.button("Clear").clicked() {
                        self.send(OverlayEvent::Clear);
                    }
                });
                if let Some(stamp) = &description.pending_stamp {
                    ui.label(format!("Next click: {stamp}"));
                }

                let stroke = ui.add(
                    egui::Slider::new(&mut self.stroke_lifetime, 0.5..=20.0)
                        .suffix("s")
                        .text("Ink"),
                );
                let text = ui.add(
                    egui::Slider::new(&mut self.text_lifetime, 0.5..=20.0)
                        .suffix("s")
                        .text("Text"),
                );
                if stroke.changed() || text.changed() {
                    self.send(OverlayEvent::ConfigChanged(ConfigChange {
                        stroke_lifetime: stroke.changed().then_some(self.stroke_lifetime),
                        text_lifetime: text.changed().then_some(self.text_lifetime),
                    }));
                    self.settings_dirty |= self
                        .settings
                        .record_lifetimes(self.stroke_lifetime, self.text_lifetime);
                }
                if ui
                    .add(egui::Slider::new(&mut self.eraser_radius, 4.0..=120.0).text("Eraser"))
                    .changed()
                {
                    self.send(OverlayEvent::SetEraserRadius(self.eraser_radius));
                    self.settings_dirty |= self.settings.record_eraser_radius(self.eraser_radius);
                }
            });
    }
}

impl eframe::App for OverlayApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        [0.0, 0.0, 0.0, 0.0]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_bounds(ctx);
        if self.capture {
            self.forward_local_input(ctx);
        }
        self.controls(ctx);

        let mut surface = EguiSurface::new(ctx.layer_painter(egui::LayerId::background()));
        self.render.frame(&mut self.controller, &mut surface);
        self.apply_notices(ctx);
        self.persist_settings(ctx);

        ctx.request_repaint();
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if self.settings_dirty {
            self.save_settings();
        }
    }
}

/// Local input the engine cares about. Presses over the control panel and
/// text typed into it stay with the panel; releases always go through so a
/// drag that ends over the panel still commits.
fn local_event(event: egui::Event, over_panel: bool, typing_in_panel: bool) -> Option<OverlayEvent> {
    match event {
        egui::Event::PointerButton {
            pos,
            button: egui::PointerButton::Primary,
            pressed,
            ..
        } => {
            let at = WindowPoint::new(pos.x, pos.y);
            if !pressed {
                Some(OverlayEvent::LocalPointerUp(at))
            } else if over_panel {
                None
            } else {
                Some(OverlayEvent::LocalPointerDown(at))
            }
        }
        egui::Event::PointerMoved(pos) => Some(OverlayEvent::LocalPointerMove(WindowPoint::new(
            pos.x, pos.y,
        ))),
        // IME commits arrive as `CompositionEnd` rather than `Text`.
        egui::Event::Text(text) | egui::Event::CompositionEnd(text) if !typing_in_panel => {
            Some(OverlayEvent::LocalTextCommit(text))
        }
        _ => None,
    }
}
