//! Keyboard controls for the countdown component.
//!
//! ```rust
//! use bubbletea_countdown::keys::{default_key_map, Binding};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let keys = default_key_map();
//! let space = KeyMsg { key: KeyCode::Char(' '), modifiers: KeyModifiers::NONE };
//! assert!(keys.toggle.matches(&space));
//!
//! let restart = Binding::new(vec![KeyCode::Enter]).with_help("enter", "restart");
//! assert_eq!(restart.help, "enter");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::KeyCode;
use once_cell::sync::Lazy;

/// A set of keys bound to one countdown action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the action.
    pub keys: Vec<KeyCode>,
    /// Short key label shown in help, e.g. `"space"`.
    pub help: String,
    /// What the action does, e.g. `"pause/resume"`.
    pub description: String,
    enabled: bool,
}

impl Binding {
    /// Creates an enabled binding with no help text.
    pub fn new(keys: Vec<KeyCode>) -> Self {
        Self {
            keys,
            help: String::new(),
            description: String::new(),
            enabled: true,
        }
    }

    /// Sets the help label and description.
    pub fn with_help(mut self, help: impl Into<String>, description: impl Into<String>) -> Self {
        self.help = help.into();
        self.description = description.into();
        self
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Whether the binding currently reacts to key presses.
    pub fn enabled(&self) -> bool {
        self.enabled && !self.keys.is_empty()
    }

    /// Returns `true` if the binding is enabled and contains the pressed key.
    pub fn matches(&self, key_msg: &KeyMsg) -> bool {
        self.enabled() && self.keys.contains(&key_msg.key)
    }
}

/// Key bindings understood by [`crate::countdown::Model::update`].
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Restart the countdown from its initial value.
    pub start: Binding,
    /// Pause and reset to the initial value.
    pub stop: Binding,
    /// Reset to the initial value without touching the running state.
    pub reset: Binding,
    /// Pause when running, resume when paused.
    pub toggle: Binding,
}

impl KeyMap {
    /// Bindings that are currently enabled, in display order.
    pub fn short_help(&self) -> Vec<&Binding> {
        [&self.toggle, &self.start, &self.stop, &self.reset]
            .into_iter()
            .filter(|binding| binding.enabled())
            .collect()
    }
}

static DEFAULT_KEY_MAP: Lazy<KeyMap> = Lazy::new(|| KeyMap {
    start: Binding::new(vec![KeyCode::Char('s')]).with_help("s", "start"),
    stop: Binding::new(vec![KeyCode::Char('x')]).with_help("x", "stop"),
    reset: Binding::new(vec![KeyCode::Char('r')]).with_help("r", "reset"),
    toggle: Binding::new(vec![KeyCode::Char(' ')]).with_help("space", "pause/resume"),
});

/// Returns the default bindings: `s` start, `x` stop, `r` reset, space toggle.
pub fn default_key_map() -> KeyMap {
    DEFAULT_KEY_MAP.clone()
}

impl Default for KeyMap {
    fn default() -> Self {
        default_key_map()
    }
}
