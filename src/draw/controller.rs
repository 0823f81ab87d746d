use crate::draw::engine::EngineState;
use crate::draw::messages::{OverlayEvent, OverlayNotice};
use crate::draw::model::Millis;
use crate::draw::state::{ModeChange, ModeDescription};
use crate::draw::store::Frame;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

/// Single consumer of the overlay event queue. Producers on any thread hold a
/// [`Sender`] from [`OverlayController::sender`]; the UI thread drains the
/// queue with [`OverlayController::pump`] before painting each frame.
pub struct OverlayController {
    events_tx: Sender<OverlayEvent>,
    events_rx: Receiver<OverlayEvent>,
    observers: Vec<Sender<OverlayNotice>>,
    engine: EngineState,
}

impl OverlayController {
    pub fn new(engine: EngineState) -> Self {
        let (events_tx, events_rx) = channel();
        Self {
            events_tx,
            events_rx,
            observers: Vec::new(),
            engine,
        }
    }

    pub fn sender(&self) -> Sender<OverlayEvent> {
        self.events_tx.clone()
    }

    /// Registers a new observer of mode changes.
    pub fn subscribe(&mut self) -> Receiver<OverlayNotice> {
        let (tx, rx) = channel();
        self.observers.push(tx);
        rx
    }

    pub fn engine(&self) -> &EngineState {
        &self.engine
    }

    pub fn mode_description(&self) -> ModeDescription {
        self.engine.mode_description()
    }

    pub fn current_frame(&mut self, now: Millis) -> Frame<'_> {
        self.engine.current_frame(now)
    }

    /// Handles one event to completion.
    pub fn dispatch(&mut self, event: OverlayEvent, now: Millis) {
        if let Some(change) = self.engine.dispatch(event, now) {
            self.notify(change);
        }
    }

    /// Drains every queued event. Returns how many were handled.
    pub fn pump(&mut self, now: Millis) -> usize {
        let mut handled = 0;
        loop {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    self.dispatch(event, now);
                    handled += 1;
                }
                // the controller keeps its own sender, so the queue never disconnects
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        handled
    }

    fn notify(&mut self, change: ModeChange) {
        let mut notices = Vec::with_capacity(2);
        if let ModeChange::CaptureChanged { capture } = change {
            notices.push(OverlayNotice::CaptureChanged { capture });
        }
        notices.push(OverlayNotice::ModeChanged(self.engine.mode_description()));

        self.observers.retain(|observer| {
            notices
                .iter()
                .all(|notice| observer.send(notice.clone()).is_ok())
        });
    }
}

#[cfg(test)]
mod tests {
    use super::OverlayController;
    use crate::draw::config::EngineConfig;
    use crate::draw::engine::EngineState;
    use crate::draw::input::OverlayBounds;
    use crate::draw::messages::{OverlayEvent, OverlayNotice};
    use crate::draw::state::{Mode, Tool};
    use crate::draw::store::AnnotationStore;

    fn controller() -> OverlayController {
        OverlayController::new(EngineState::with_store(
            AnnotationStore::with_seed(2),
            EngineConfig::default(),
            OverlayBounds::default(),
        ))
    }

    #[test]
    fn queued_events_from_other_threads_are_pumped_in_order() {
        let mut controller = controller();
        let sender = controller.sender();

        std::thread::spawn(move || {
            sender.send(OverlayEvent::ToggleCapture).expect("send toggle");
            sender
                .send(OverlayEvent::LocalTextCommit("hello".into()))
                .expect("send text");
        })
        .join()
        .expect("producer thread");

        assert_eq!(controller.pump(0), 2);
        assert_eq!(controller.engine().store().texts().len(), 1);
        assert_eq!(controller.pump(0), 0);
    }

    #[test]
    fn capture_change_is_announced_before_mode_snapshot() {
        let mut controller = controller();
        let notices = controller.subscribe();

        controller.dispatch(OverlayEvent::ToggleCapture, 0);

        assert_eq!(
            notices.recv().expect("capture notice"),
            OverlayNotice::CaptureChanged { capture: true }
        );
        match notices.recv().expect("mode notice") {
            OverlayNotice::ModeChanged(description) => assert_eq!(description.mode, Mode::Drawing),
            other => panic!("unexpected notice {other:?}"),
        }
    }

    #[test]
    fn tool_selection_notifies_without_capture_change() {
        let mut controller = controller();
        let notices = controller.subscribe();

        controller.dispatch(OverlayEvent::SelectTool(Tool::Eraser), 0);

        match notices.try_recv().expect("mode notice") {
            OverlayNotice::ModeChanged(description) => {
                assert_eq!(description.highlighted_tool, Some(Tool::Eraser))
            }
            other => panic!("unexpected notice {other:?}"),
        }
        assert!(notices.try_recv().is_err());
    }

    #[test]
    fn dropped_observers_are_forgotten() {
        let mut controller = controller();
        drop(controller.subscribe());
        let live = controller.subscribe();

        controller.dispatch(OverlayEvent::ToggleSentence, 0);
        controller.dispatch(OverlayEvent::ToggleSentence, 0);

        assert_eq!(live.try_iter().count(), 2);
    }

    #[test]
    fn input_only_events_do_not_notify() {
        let mut controller = controller();
        let notices = controller.subscribe();
        controller.dispatch(OverlayEvent::Clear, 0);
        assert!(notices.try_recv().is_err());
    }
}
