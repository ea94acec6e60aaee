#![warn(missing_docs)]

//! # bubbletea-countdown
//!
//! A countdown component for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! applications. It counts a whole number down to zero on a fixed interval,
//! runs callbacks on every tick and on completion, and can be paused,
//! resumed, reset, stopped and restarted.
//!
//! ## Components
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`countdown`] | The countdown component |
//! | [`interval`] | Pausable periodic tick the countdown is built on |
//! | [`value`] | Settings that are fixed or re-read on every use |
//! | [`keys`] | Keyboard bindings for the countdown controls |
//! | [`config`] | Loading countdown settings from TOML |
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_countdown::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//! use std::time::Duration;
//!
//! struct App {
//!     countdown: Countdown,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let mut countdown = countdown_new_with_options(
//!             10,
//!             CountdownOptions::new()
//!                 .with_interval(Duration::from_millis(250))
//!                 .with_on_complete(|| println!("done")),
//!         );
//!         countdown.focus();
//!         let cmd = countdown.start(None);
//!         (Self { countdown }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("{} left\n\nspace: pause/resume  s: restart", self.countdown.view())
//!     }
//! }
//! ```
//!
//! ## Logging
//!
//! State changes are reported through [`tracing`] at `debug` level and
//! individual ticks at `trace` level. The crate installs no subscriber.

pub mod config;
pub mod countdown;
pub mod error;
pub mod interval;
pub mod keys;
pub mod value;

use bubbletea_rs::Cmd;

/// Focus management for components that react to keyboard input.
///
/// A countdown only applies its key bindings while focused, so several
/// components can share one update loop without fighting over keys.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let mut countdown = countdown_new(5);
/// assert!(!countdown.focused());
///
/// countdown.focus();
/// assert!(countdown.focused());
///
/// countdown.blur();
/// assert!(!countdown.focused());
/// ```
pub trait Component {
    /// Sets the component to focused state.
    ///
    /// May return a command to run on focus.
    fn focus(&mut self) -> Option<Cmd>;

    /// Sets the component to blurred state.
    fn blur(&mut self);

    /// Returns the current focus state.
    fn focused(&self) -> bool;
}

pub use config::CountdownConfig;
pub use countdown::{
    new as countdown_new, new_with_options as countdown_new_with_options, with_scheduler,
    CompleteMsg as CountdownCompleteMsg, CountdownOptions, Model as Countdown,
};
pub use error::ConfigError;
pub use interval::{
    new as interval_new, Model as Interval, Scheduler, TickMsg as IntervalTickMsg,
};
pub use keys::{default_key_map, Binding, KeyMap};
pub use value::{callback, Callback, MaybeDynamic};

/// Prelude module for convenient imports.
///
/// ```rust
/// use bubbletea_countdown::prelude::*;
///
/// let countdown = countdown_new(3);
/// assert_eq!(countdown.remaining(), 3);
/// ```
pub mod prelude {
    pub use crate::config::CountdownConfig;
    pub use crate::countdown::{
        new as countdown_new, new_with_options as countdown_new_with_options, with_scheduler,
        CompleteMsg as CountdownCompleteMsg, CountdownOptions, Model as Countdown,
    };
    pub use crate::interval::{
        new as interval_new, Model as Interval, Scheduler, TickMsg as IntervalTickMsg,
    };
    pub use crate::keys::{default_key_map, Binding, KeyMap};
    pub use crate::value::{callback, Callback, MaybeDynamic};
    pub use crate::Component;
}
