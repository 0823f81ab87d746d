use doodle_overlay::draw::settings::OverlaySettings;
use doodle_overlay::draw::settings_store::{load_from_path, save_to_path, SETTINGS_FILE_NAME};

#[test]
fn saved_settings_drive_the_engine_config() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(SETTINGS_FILE_NAME);

    let mut settings = OverlaySettings::default();
    settings.stroke_lifetime_secs = 6.0;
    settings.text_lifetime_secs = 8.0;
    settings.eraser_radius = 40.0;
    settings.rainbow_text = true;
    save_to_path(&path, &settings).expect("save");

    let config = load_from_path(&path).expect("load").engine_config();
    assert_eq!(config.stroke_lifetime_secs, 6.0);
    assert_eq!(config.text_lifetime_secs, 8.0);
    assert_eq!(config.eraser_radius, 40.0);
    assert!(config.rainbow_text);
}

#[test]
fn hand_edited_file_with_string_lifetimes_loads() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(SETTINGS_FILE_NAME);
    std::fs::write(
        &path,
        r#"{ "stroke_lifetime_secs": "5s", "text_lifetime_secs": "nope", "stamps": ["hi", ""] }"#,
    )
    .expect("write");

    let loaded = load_from_path(&path).expect("load");
    assert_eq!(loaded.stroke_lifetime_secs, 5.0);
    assert_eq!(loaded.text_lifetime_secs, 3.0);
    assert_eq!(loaded.stamps, vec!["hi".to_string()]);
}

#[test]
fn saving_sanitizes_without_mutating_the_caller() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(SETTINGS_FILE_NAME);

    let mut settings = OverlaySettings::default();
    settings.panel_opacity = 4.0;
    save_to_path(&path, &settings).expect("save");

    assert_eq!(settings.panel_opacity, 4.0);
    assert_eq!(load_from_path(&path).expect("load").panel_opacity, 1.0);
}

#[test]
fn slider_changes_survive_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join(SETTINGS_FILE_NAME);

    let mut settings = load_from_path(&path).expect("defaults");
    assert!(settings.record_lifetimes(9.5, 1.5));
    assert!(settings.record_eraser_radius(64.0));
    save_to_path(&path, &settings).expect("save");

    let config = load_from_path(&path).expect("reload").engine_config();
    assert_eq!(config.stroke_lifetime_secs, 9.5);
    assert_eq!(config.text_lifetime_secs, 1.5);
    assert_eq!(config.eraser_radius, 64.0);
}
