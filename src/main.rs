use anyhow::anyhow;
use doodle_overlay::app::OverlayApp;
use doodle_overlay::draw::settings::OverlaySettings;
use doodle_overlay::draw::settings_store;
use doodle_overlay::logging;
use eframe::egui;

fn main() -> anyhow::Result<()> {
    let (settings, load_error) = match settings_store::load() {
        Ok(settings) => (settings, None),
        Err(err) => (OverlaySettings::default(), Some(err)),
    };
    logging::init(settings.debug_logging, settings.log_file.clone());
    if let Some(err) = load_error {
        tracing::warn!(?err, "failed to load overlay settings; using defaults");
    }

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Doodle Overlay")
            .with_transparent(true)
            .with_decorations(false)
            .with_maximized(true)
            .with_always_on_top()
            .with_mouse_passthrough(true),
        ..Default::default()
    };

    tracing::info!("starting overlay in pointer mode; double-tap Ctrl to draw");
    eframe::run_native(
        "doodle_overlay",
        native_options,
        Box::new(move |_cc| Box::new(OverlayApp::new(settings))),
    )
    .map_err(|err| anyhow!("overlay window failed: {err}"))
}
