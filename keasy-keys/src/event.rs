//! Event values dispatched by a host.

/// A keyboard event as delivered by the host's input system.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyInputEvent {
    /// Key identifier (e.g. `"K"`, `"Enter"`)
    pub key: String,
    pub ctrl_key: bool,
    pub alt_key: bool,
    pub shift_key: bool,
}

impl KeyInputEvent {
    /// Create an event for `key` with no modifiers pressed.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn with_ctrl(mut self, pressed: bool) -> Self {
        self.ctrl_key = pressed;
        self
    }

    pub fn with_alt(mut self, pressed: bool) -> Self {
        self.alt_key = pressed;
        self
    }

    pub fn with_shift(mut self, pressed: bool) -> Self {
        self.shift_key = pressed;
        self
    }
}

/// Any event a target can dispatch to its listeners.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A keyboard event carrying key and modifier state.
    Key(KeyInputEvent),
    /// An event that did not come from the keyboard input system.
    Other { event_type: String },
}

impl InputEvent {
    /// The keyboard payload, if this is a keyboard event.
    pub fn as_key(&self) -> Option<&KeyInputEvent> {
        match self {
            InputEvent::Key(event) => Some(event),
            InputEvent::Other { .. } => None,
        }
    }
}

impl From<KeyInputEvent> for InputEvent {
    fn from(event: KeyInputEvent) -> Self {
        InputEvent::Key(event)
    }
}
