use crate::draw::model::Lifecycle;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Click-through; the overlay only shows effects.
    Pointer,
    /// The overlay captures pointer and keyboard input.
    Drawing,
}

impl Mode {
    pub fn captures_input(self) -> bool {
        matches!(self, Self::Drawing)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Tool {
    Pen,
    Eraser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    Floating,
    Sentence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    Ephemeral,
    Whiteboard,
}

/// What a placement event (a local pointer-down) should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    Stamp(String),
    Stroke,
    Erase,
}

/// Emitted on every observable mode change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeChange {
    CaptureChanged { capture: bool },
    Updated,
}

/// Snapshot for collaborators that render mode-dependent affordances.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeDescription {
    pub mode: Mode,
    pub tool: Tool,
    /// `None` while a stamp is queued: the stamp owns the next click.
    pub highlighted_tool: Option<Tool>,
    pub layout: Layout,
    pub persistence: Persistence,
    pub pending_stamp: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeState {
    mode: Mode,
    tool: Tool,
    layout: Layout,
    persistence: Persistence,
    pending_stamp: Option<String>,
}

impl Default for ModeState {
    fn default() -> Self {
        Self {
            mode: Mode::Pointer,
            tool: Tool::Pen,
            layout: Layout::Floating,
            persistence: Persistence::Ephemeral,
            pending_stamp: None,
        }
    }
}

impl ModeState {
    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn persistence(&self) -> Persistence {
        self.persistence
    }

    pub fn pending_stamp(&self) -> Option<&str> {
        self.pending_stamp.as_deref()
    }

    pub fn whiteboard_active(&self) -> bool {
        matches!(self.persistence, Persistence::Whiteboard)
    }

    /// Lifecycle stamped onto objects created right now.
    pub fn new_object_lifecycle(&self) -> Lifecycle {
        if self.whiteboard_active() {
            Lifecycle::Persistent
        } else {
            Lifecycle::Transient
        }
    }

    pub fn toggle_capture(&mut self) -> ModeChange {
        self.set_mode(match self.mode {
            Mode::Pointer => Mode::Drawing,
            Mode::Drawing => Mode::Pointer,
        })
    }

    pub fn set_mode(&mut self, mode: Mode) -> ModeChange {
        if self.mode == mode {
            return ModeChange::Updated;
        }
        tracing::debug!(from = ?self.mode, to = ?mode, "overlay mode transition");
        self.mode = mode;
        ModeChange::CaptureChanged {
            capture: mode.captures_input(),
        }
    }

    pub fn select_tool(&mut self, tool: Tool) -> ModeChange {
        self.tool = tool;
        self.pending_stamp = None;
        ModeChange::Updated
    }

    pub fn select_stamp(&mut self, stamp: impl Into<String>) -> ModeChange {
        let stamp = stamp.into();
        self.pending_stamp = if stamp.trim().is_empty() {
            None
        } else {
            Some(stamp)
        };
        ModeChange::Updated
    }

    /// Turning the whiteboard on also switches to sentence layout; turning it
    /// off leaves the layout alone.
    pub fn toggle_whiteboard(&mut self) -> ModeChange {
        self.persistence = match self.persistence {
            Persistence::Ephemeral => {
                self.layout = Layout::Sentence;
                Persistence::Whiteboard
            }
            Persistence::Whiteboard => Persistence::Ephemeral,
        };
        ModeChange::Updated
    }

    pub fn toggle_sentence(&mut self) -> ModeChange {
        self.layout = match self.layout {
            Layout::Floating => Layout::Sentence,
            Layout::Sentence => Layout::Floating,
        };
        ModeChange::Updated
    }

    /// Decides what the next placement does, consuming a queued stamp.
    pub fn take_placement(&mut self) -> Placement {
        if let Some(stamp) = self.pending_stamp.take() {
            return Placement::Stamp(stamp);
        }
        match self.tool {
            Tool::Pen => Placement::Stroke,
            Tool::Eraser => Placement::Erase,
        }
    }

    pub fn describe(&self) -> ModeDescription {
        ModeDescription {
            mode: self.mode,
            tool: self.tool,
            highlighted_tool: self.pending_stamp.is_none().then_some(self.tool),
            layout: self.layout,
            persistence: self.persistence,
            pending_stamp: self.pending_stamp.clone(),
        }
    }
}
