use doodle_overlay::draw::config::EngineConfig;
use doodle_overlay::draw::decay::decay;
use doodle_overlay::draw::engine::{EngineState, SPARK_COUNT};
use doodle_overlay::draw::input::{OverlayBounds, ScreenPoint, WindowPoint};
use doodle_overlay::draw::keyboard_hook::{VC_CONTROL_L, VC_CONTROL_R};
use doodle_overlay::draw::messages::{OverlayEvent, OverlayNotice};
use doodle_overlay::draw::model::{Hue, Lifecycle, Point};
use doodle_overlay::draw::state::{Layout, Mode, Tool};
use doodle_overlay::draw::{AnnotationStore, OverlayController};

fn controller() -> OverlayController {
    OverlayController::new(EngineState::with_store(
        AnnotationStore::with_seed(11),
        EngineConfig::default(),
        OverlayBounds::default(),
    ))
}

fn enter_drawing(controller: &mut OverlayController) {
    controller.dispatch(OverlayEvent::GlobalKeyDown { keycode: VC_CONTROL_L }, 1_000);
    controller.dispatch(OverlayEvent::GlobalKeyDown { keycode: VC_CONTROL_R }, 1_150);
    assert_eq!(controller.mode_description().mode, Mode::Drawing);
}

#[test]
fn erasing_the_middle_of_a_three_point_line_leaves_two_single_point_fragments() {
    let mut store = AnnotationStore::with_seed(1);
    store.add_stroke(Point::new(0.0, 0.0), Hue::new(120.0));
    store.extend_active_stroke(Point::new(10.0, 0.0));
    store.extend_active_stroke(Point::new(20.0, 0.0));
    store.commit_active_stroke(0, Lifecycle::Transient);

    store.erase_at(Point::new(10.0, 0.0), 5.0);

    let fragments: Vec<Vec<Point>> = store.strokes().iter().map(|s| s.points.clone()).collect();
    assert_eq!(
        fragments,
        vec![vec![Point::new(0.0, 0.0)], vec![Point::new(20.0, 0.0)]]
    );
}

#[test]
fn text_is_dead_and_evicted_at_the_end_of_its_lifetime() {
    let fade = decay(2_500, 0, 2.5, false);
    assert!(fade.dead);

    let mut store = AnnotationStore::with_seed(1);
    store.add_text("ok", Point::new(100.0, 100.0), Hue::new(0.0), 0, Lifecycle::Transient);
    let config = EngineConfig {
        text_lifetime_secs: 2.5,
        ..EngineConfig::default()
    };
    let frame = store.tick(2_500, &config, false);
    assert!(frame.texts.is_empty());
    assert!(store.texts().is_empty());
}

#[test]
fn whiteboard_forces_sentence_layout_only_when_turned_on() {
    let mut controller = controller();
    controller.dispatch(OverlayEvent::ToggleWhiteboard, 0);
    assert_eq!(controller.mode_description().layout, Layout::Sentence);

    controller.dispatch(OverlayEvent::ToggleWhiteboard, 0);
    assert_eq!(controller.mode_description().layout, Layout::Sentence);
}

#[test]
fn global_clicks_spark_in_pointer_mode_only() {
    let mut controller = controller();
    controller.dispatch(OverlayEvent::GlobalMouseDown(ScreenPoint::new(300.0, 300.0)), 0);
    assert_eq!(controller.engine().store().particles().len(), SPARK_COUNT);

    controller.dispatch(OverlayEvent::Clear, 0);
    enter_drawing(&mut controller);
    controller.dispatch(OverlayEvent::GlobalMouseDown(ScreenPoint::new(300.0, 300.0)), 2_000);
    assert!(controller.engine().store().particles().is_empty());
}

#[test]
fn stamp_is_placed_once_then_clicks_draw_again() {
    let mut controller = controller();
    enter_drawing(&mut controller);

    controller.dispatch(OverlayEvent::SelectStamp("hi".into()), 2_000);
    controller.dispatch(OverlayEvent::LocalPointerDown(WindowPoint::new(40.0, 50.0)), 2_000);
    controller.dispatch(OverlayEvent::LocalPointerUp(WindowPoint::new(40.0, 50.0)), 2_010);

    let store = controller.engine().store();
    assert_eq!(store.texts().len(), 1);
    assert_eq!(store.texts()[0].text, "hi");
    assert_eq!(store.texts()[0].anchor, Point::new(40.0, 50.0));
    assert!(store.strokes().is_empty());
    assert_eq!(controller.mode_description().pending_stamp, None);

    controller.dispatch(OverlayEvent::LocalPointerDown(WindowPoint::new(60.0, 70.0)), 2_100);
    assert!(controller.engine().store().active_stroke().is_some());
}

#[test]
fn local_events_are_ignored_in_pointer_mode() {
    let mut controller = controller();
    controller.dispatch(OverlayEvent::LocalPointerDown(WindowPoint::new(1.0, 1.0)), 0);
    controller.dispatch(OverlayEvent::LocalPointerMove(WindowPoint::new(2.0, 2.0)), 0);
    controller.dispatch(OverlayEvent::LocalPointerUp(WindowPoint::new(2.0, 2.0)), 0);
    controller.dispatch(OverlayEvent::LocalTextCommit("x".into()), 0);
    assert!(controller.engine().store().is_empty());
}

#[test]
fn hotkey_toggle_notifies_host_to_change_capture() {
    let mut controller = controller();
    let notices = controller.subscribe();

    enter_drawing(&mut controller);
    assert_eq!(
        notices.try_recv().expect("capture notice"),
        OverlayNotice::CaptureChanged { capture: true }
    );

    controller.dispatch(OverlayEvent::GlobalKeyDown { keycode: VC_CONTROL_L }, 5_000);
    controller.dispatch(OverlayEvent::GlobalKeyDown { keycode: VC_CONTROL_L }, 5_100);
    let capture_changes: Vec<OverlayNotice> = notices
        .try_iter()
        .filter(|notice| matches!(notice, OverlayNotice::CaptureChanged { .. }))
        .collect();
    assert_eq!(
        capture_changes,
        vec![OverlayNotice::CaptureChanged { capture: false }]
    );
}

#[test]
fn lifetime_changes_apply_to_existing_objects_on_the_next_frame() {
    let mut controller = controller();
    enter_drawing(&mut controller);
    controller.dispatch(OverlayEvent::LocalTextCommit("t".into()), 0);

    assert_eq!(controller.current_frame(2_000).texts.len(), 1);

    controller.dispatch(
        OverlayEvent::ConfigChanged(doodle_overlay::draw::config::ConfigChange {
            stroke_lifetime: None,
            text_lifetime: Some(1.0),
        }),
        2_000,
    );
    assert!(controller.current_frame(2_001).texts.is_empty());
}

#[test]
fn eraser_tool_survives_stamp_interception() {
    let mut controller = controller();
    enter_drawing(&mut controller);
    controller.dispatch(OverlayEvent::SelectTool(Tool::Eraser), 0);
    controller.dispatch(OverlayEvent::SelectStamp("wow".into()), 0);

    let description = controller.mode_description();
    assert_eq!(description.tool, Tool::Eraser);
    assert_eq!(description.highlighted_tool, None);

    controller.dispatch(OverlayEvent::LocalPointerDown(WindowPoint::new(5.0, 5.0)), 0);
    controller.dispatch(OverlayEvent::LocalPointerUp(WindowPoint::new(5.0, 5.0)), 0);
    assert_eq!(controller.mode_description().highlighted_tool, Some(Tool::Eraser));

    // the eraser now removes the stamp it just placed
    controller.dispatch(OverlayEvent::LocalPointerDown(WindowPoint::new(5.0, 5.0)), 0);
    assert!(controller.engine().store().texts().is_empty());
}
