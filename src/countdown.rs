//! Countdown component for Bubble Tea applications.
//!
//! A countdown ticks a whole-number counter down to zero, one step per
//! interval. It runs user callbacks on every tick and once on completion, and
//! exposes start, stop, pause, resume and reset controls.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::countdown::{new, new_with_options, CountdownOptions};
//! use std::time::Duration;
//!
//! // Counts down from 10 once resumed, one step per second
//! let countdown = new(10);
//! assert_eq!(countdown.remaining(), 10);
//! assert!(!countdown.is_active());
//!
//! // Starts ticking as soon as `init()` is handed to the runtime
//! let fast = new_with_options(
//!     3,
//!     CountdownOptions::new()
//!         .with_interval(Duration::from_millis(10))
//!         .with_immediate(true)
//!         .with_on_complete(|| println!("liftoff")),
//! );
//! assert!(fast.is_active());
//! ```
//!
//! # bubbletea-rs Integration
//!
//! ```rust
//! use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
//! use bubbletea_countdown::countdown::{new_with_options, CompleteMsg, CountdownOptions, Model};
//!
//! struct App {
//!     countdown: Model,
//!     done: bool,
//! }
//!
//! impl BubbleTeaModel for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let countdown = new_with_options(5, CountdownOptions::new().with_immediate(true));
//!         let cmd = countdown.init();
//!         (Self { countdown, done: false }, cmd)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         if let Some(complete) = msg.downcast_ref::<CompleteMsg>() {
//!             if complete.id == self.countdown.id() {
//!                 self.done = true;
//!             }
//!         }
//!         self.countdown.update(msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         format!("T-minus {}", self.countdown.view())
//!     }
//! }
//! ```
//!
//! # States
//!
//! A countdown is either running (its interval is active) or idle.
//! [`Model::resume`] only leaves idle while there is something left to count;
//! [`Model::start`] always restarts from the initial value. Reaching zero on a
//! tick pauses the interval before the completion callback runs.

use crate::interval::{self, Scheduler};
use crate::keys::KeyMap;
use crate::value::{callback, Callback, MaybeDynamic};
use crate::Component;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Model as BubbleTeaModel, Msg};
use lipgloss_extras::prelude::*;
use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

/// Tick period used when none is configured.
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(1000);

// Countdown ids are separate from the ids of the intervals they own.
static LAST_COUNTDOWN_ID: AtomicI64 = AtomicI64::new(0);

fn next_countdown_id() -> i64 {
    LAST_COUNTDOWN_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Message sent when a countdown reaches zero.
///
/// Delivered in addition to the `on_complete` callback, so applications can
/// react to completion from their own update loop.
#[derive(Debug, Clone)]
pub struct CompleteMsg {
    /// Identifier of the countdown that completed.
    pub id: i64,
}

/// Settings recognised when constructing a countdown.
///
/// ```rust
/// use bubbletea_countdown::countdown::CountdownOptions;
/// use bubbletea_countdown::value::MaybeDynamic;
/// use std::time::Duration;
///
/// let options = CountdownOptions::new()
///     .with_interval(MaybeDynamic::from_fn(|| Duration::from_millis(500)))
///     .with_on_tick(|| {})
///     .with_immediate(true);
/// assert!(options.immediate);
/// ```
pub struct CountdownOptions {
    /// Tick period. Re-read each time a tick is armed.
    pub interval: MaybeDynamic<Duration>,
    /// Called once when the count reaches zero. Resolved at completion time.
    pub on_complete: Option<MaybeDynamic<Callback>>,
    /// Called after every decrement.
    pub on_tick: Option<Callback>,
    /// Start ticking on construction.
    pub immediate: bool,
    /// Style applied by [`Model::view`].
    pub style: Style,
    /// Key bindings handled while focused.
    pub key_map: KeyMap,
}

impl CountdownOptions {
    /// Default options: one-second interval, no callbacks, not immediate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tick period.
    pub fn with_interval(mut self, interval: impl Into<MaybeDynamic<Duration>>) -> Self {
        self.interval = interval.into();
        self
    }

    /// Sets a fixed completion callback.
    pub fn with_on_complete<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(MaybeDynamic::Static(callback(f)));
        self
    }

    /// Sets a completion callback that is looked up again when the count hits zero.
    pub fn with_on_complete_source(mut self, source: MaybeDynamic<Callback>) -> Self {
        self.on_complete = Some(source);
        self
    }

    /// Sets the per-tick callback.
    pub fn with_on_tick<F>(mut self, f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_tick = Some(callback(f));
        self
    }

    /// Whether to start ticking on construction.
    pub fn with_immediate(mut self, immediate: bool) -> Self {
        self.immediate = immediate;
        self
    }

    /// Sets the style used to render the remaining count.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replaces the key bindings.
    pub fn with_key_map(mut self, key_map: KeyMap) -> Self {
        self.key_map = key_map;
        self
    }
}

impl Default for CountdownOptions {
    fn default() -> Self {
        Self {
            interval: MaybeDynamic::Static(DEFAULT_INTERVAL),
            on_complete: None,
            on_tick: None,
            immediate: false,
            style: Style::new(),
            key_map: KeyMap::default(),
        }
    }
}

impl fmt::Debug for CountdownOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountdownOptions")
            .field("interval", &self.interval)
            .field("on_complete", &self.on_complete.is_some())
            .field("on_tick", &self.on_tick.is_some())
            .field("immediate", &self.immediate)
            .finish_non_exhaustive()
    }
}

/// A countdown driven by a [`Scheduler`].
///
/// The default scheduler is [`interval::Model`], which ticks through the
/// Bubble Tea runtime. Any other scheduler can be plugged in with
/// [`with_scheduler`].
pub struct Model<S: Scheduler = interval::Model> {
    /// Style applied by [`view`](Model::view).
    pub style: Style,
    /// Key bindings handled while focused.
    pub key_map: KeyMap,
    remaining: u64,
    initial: MaybeDynamic<u64>,
    scheduler: S,
    on_complete: Option<MaybeDynamic<Callback>>,
    on_tick: Option<Callback>,
    focused: bool,
    id: i64,
}

/// Creates a countdown from `initial` with default options.
///
/// ```rust
/// use bubbletea_countdown::countdown::new;
///
/// let countdown = new(30);
/// assert_eq!(countdown.remaining(), 30);
/// assert!(!countdown.is_active());
/// ```
pub fn new(initial: impl Into<MaybeDynamic<u64>>) -> Model {
    new_with_options(initial, CountdownOptions::default())
}

/// Creates a countdown from `initial` with the given options.
///
/// `initial` may be dynamic, in which case every reset reads it again.
///
/// ```rust
/// use bubbletea_countdown::countdown::{new_with_options, CountdownOptions};
/// use bubbletea_countdown::value::MaybeDynamic;
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use std::sync::Arc;
///
/// let target = Arc::new(AtomicU64::new(5));
/// let source = Arc::clone(&target);
/// let mut countdown = new_with_options(
///     MaybeDynamic::from_fn(move || source.load(Ordering::SeqCst)),
///     CountdownOptions::new(),
/// );
/// assert_eq!(countdown.remaining(), 5);
///
/// target.store(9, Ordering::SeqCst);
/// countdown.reset();
/// assert_eq!(countdown.remaining(), 9);
/// ```
pub fn new_with_options(initial: impl Into<MaybeDynamic<u64>>, options: CountdownOptions) -> Model {
    let scheduler = interval::new(options.interval.clone(), options.immediate);
    with_scheduler(initial, options, scheduler)
}

/// Creates a countdown that owns the given scheduler.
///
/// The scheduler's interval setting is its own; `options.interval` is not
/// applied. The scheduler is left active only if `options.immediate` is set
/// and there is something to count down. In that case the first tick comes
/// from [`Model::init`], which relies on the scheduler re-arming through
/// [`Scheduler::schedule`] the tick its `resume` returned.
///
/// ```rust
/// use bubbletea_countdown::countdown::{with_scheduler, CountdownOptions};
/// use bubbletea_countdown::interval;
/// use std::time::Duration;
///
/// let ticker = interval::new(Duration::from_millis(50), false);
/// let countdown = with_scheduler(3, CountdownOptions::new().with_immediate(true), ticker);
/// assert!(countdown.is_active());
/// assert!(countdown.init().is_some());
/// ```
pub fn with_scheduler<S: Scheduler>(
    initial: impl Into<MaybeDynamic<u64>>,
    options: CountdownOptions,
    mut scheduler: S,
) -> Model<S> {
    let initial = initial.into();
    let remaining = initial.resolve();

    let run = options.immediate && remaining > 0;
    if run && !scheduler.is_active() {
        // `init()` asks `schedule()` for this same tick.
        let _ = scheduler.resume();
    } else if !run && scheduler.is_active() {
        scheduler.pause();
    }

    let id = next_countdown_id();
    tracing::debug!(id, remaining, running = run, "countdown created");

    Model {
        style: options.style,
        key_map: options.key_map,
        remaining,
        initial,
        scheduler,
        on_complete: options.on_complete,
        on_tick: options.on_tick,
        focused: false,
        id,
    }
}

impl<S: Scheduler> Model<S> {
    /// Returns the unique identifier of this countdown.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Steps left before completion.
    pub fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Whether the countdown is ticking.
    pub fn is_active(&self) -> bool {
        self.scheduler.is_active()
    }

    /// The initial value as it resolves right now.
    pub fn initial(&self) -> u64 {
        self.initial.resolve()
    }

    /// The scheduler driving this countdown.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Replaces the completion callback.
    pub fn set_on_complete<F>(&mut self, f: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.on_complete = Some(MaybeDynamic::Static(callback(f)));
    }

    /// Removes the completion callback.
    pub fn clear_on_complete(&mut self) {
        self.on_complete = None;
    }

    /// Returns the first tick command if the countdown starts running.
    ///
    /// # Returns
    ///
    /// `Some(cmd)` for a countdown created with `immediate` and a non-zero
    /// initial value, `None` for an idle one.
    pub fn init(&self) -> Option<Cmd> {
        self.scheduler.schedule()
    }

    /// Sets the remaining count back to the initial value.
    ///
    /// The running state is left as it is: a running countdown keeps ticking
    /// from the new value. A dynamic initial value is read again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new_with_options, CountdownOptions};
    ///
    /// let mut countdown = new_with_options(5, CountdownOptions::new().with_immediate(true));
    /// let tick = countdown.tick_msg();
    /// countdown.update(Box::new(tick));
    /// assert_eq!(countdown.remaining(), 4);
    ///
    /// countdown.reset();
    /// assert_eq!(countdown.remaining(), 5);
    /// assert!(countdown.is_active()); // still running
    /// ```
    pub fn reset(&mut self) {
        self.remaining = self.initial.resolve();
        tracing::debug!(id = self.id, remaining = self.remaining, "countdown reset");
    }

    /// Pauses the countdown and resets it to the initial value.
    ///
    /// Whatever the prior state, the countdown is idle afterwards and any tick
    /// already in flight is discarded when it arrives. Use
    /// [`start`](Model::start) to run it again.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new_with_options, CountdownOptions};
    ///
    /// let mut countdown = new_with_options(3, CountdownOptions::new().with_immediate(true));
    /// let in_flight = countdown.tick_msg();
    ///
    /// countdown.stop();
    /// assert!(!countdown.is_active());
    /// assert!(countdown.update(Box::new(in_flight)).is_none());
    /// assert_eq!(countdown.remaining(), 3);
    /// ```
    pub fn stop(&mut self) {
        self.scheduler.pause();
        tracing::debug!(id = self.id, "countdown stopped");
        self.reset();
    }

    /// Restarts the countdown from the initial value.
    ///
    /// The interval is resumed even if the countdown already completed or is
    /// running; the returned command arms the next tick.
    ///
    /// `countdown` is accepted for API compatibility but not applied: the
    /// countdown always restarts from the configured initial value.
    ///
    /// # Returns
    ///
    /// The command arming the first tick of the new run. Hand it back to the
    /// runtime; a tick armed before the restart is rejected on arrival.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(10);
    /// let cmd = countdown.start(Some(3));
    /// assert!(cmd.is_some());
    /// assert!(countdown.is_active());
    /// assert_eq!(countdown.remaining(), 10);
    /// ```
    pub fn start(&mut self, countdown: Option<u64>) -> Option<Cmd> {
        if let Some(requested) = countdown {
            tracing::debug!(
                id = self.id,
                requested,
                "start value ignored, restarting from initial value"
            );
        }
        self.reset();
        tracing::debug!(id = self.id, remaining = self.remaining, "countdown started");
        self.scheduler.resume()
    }

    /// Pauses ticking without touching the remaining count.
    ///
    /// A tick already in flight is discarded when it arrives, so no step is
    /// taken after this call until [`resume`](Model::resume) or
    /// [`start`](Model::start).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new_with_options, CountdownOptions};
    ///
    /// let mut countdown = new_with_options(4, CountdownOptions::new().with_immediate(true));
    /// let in_flight = countdown.tick_msg();
    ///
    /// countdown.pause();
    /// assert!(countdown.update(Box::new(in_flight)).is_none());
    /// assert_eq!(countdown.remaining(), 4);
    /// ```
    pub fn pause(&mut self) {
        self.scheduler.pause();
        tracing::debug!(id = self.id, remaining = self.remaining, "countdown paused");
    }

    /// Continues a paused countdown.
    ///
    /// Does nothing and returns `None` if the countdown is already running or
    /// has nothing left to count.
    ///
    /// # Returns
    ///
    /// The command arming the next tick when the countdown was resumed.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new, new_with_options, CountdownOptions};
    ///
    /// let mut idle = new(3);
    /// assert!(idle.resume().is_some());
    /// assert!(idle.is_active());
    ///
    /// // A finished countdown stays finished.
    /// let mut done = new_with_options(1, CountdownOptions::new().with_immediate(true));
    /// let tick = done.tick_msg();
    /// done.update(Box::new(tick));
    /// assert_eq!(done.remaining(), 0);
    /// assert!(done.resume().is_none());
    /// assert!(!done.is_active());
    /// ```
    pub fn resume(&mut self) -> Option<Cmd> {
        if self.scheduler.is_active() || self.remaining == 0 {
            return None;
        }
        tracing::debug!(id = self.id, remaining = self.remaining, "countdown resumed");
        self.scheduler.resume()
    }

    /// Pauses a running countdown or resumes a paused one.
    ///
    /// Resuming follows the rules of [`resume`](Model::resume), so toggling a
    /// finished countdown does nothing.
    ///
    /// # Returns
    ///
    /// The next tick command when the countdown was resumed, otherwise `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::new;
    ///
    /// let mut countdown = new(10);
    /// assert!(countdown.toggle().is_some());
    /// assert!(countdown.is_active());
    /// assert!(countdown.toggle().is_none());
    /// assert!(!countdown.is_active());
    /// ```
    pub fn toggle(&mut self) -> Option<Cmd> {
        if self.scheduler.is_active() {
            self.pause();
            return None;
        }
        self.resume()
    }

    /// Processes tick and key messages.
    ///
    /// A tick accepted by the scheduler decrements the count and returns the
    /// next tick command, or a command delivering [`CompleteMsg`] when the
    /// count reaches zero. Key messages are handled only while focused.
    ///
    /// # Arguments
    ///
    /// * `msg` - The message to process, typically an interval tick or a key press
    ///
    /// # Returns
    ///
    /// The next command to hand to the runtime, or `None` for ticks that are
    /// stale, foreign or arrive while paused, and for unrelated messages.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_countdown::countdown::{new_with_options, CountdownOptions};
    ///
    /// let mut countdown = new_with_options(2, CountdownOptions::new().with_immediate(true));
    ///
    /// let tick = countdown.tick_msg();
    /// assert!(countdown.update(Box::new(tick)).is_some()); // next tick
    /// assert_eq!(countdown.remaining(), 1);
    ///
    /// let tick = countdown.tick_msg();
    /// assert!(countdown.update(Box::new(tick)).is_some()); // delivers CompleteMsg
    /// assert_eq!(countdown.remaining(), 0);
    /// assert!(!countdown.is_active());
    /// ```
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.scheduler.accept(&msg) {
            if self.tick() {
                return Some(self.complete_cmd());
            }
            return self.scheduler.schedule();
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key_msg);
        }

        None
    }

    /// Renders the remaining count.
    pub fn view(&self) -> String {
        self.style.render(&self.remaining.to_string())
    }

    /// Runs one step. Returns `true` if this step completed the countdown.
    fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        tracing::trace!(id = self.id, remaining = self.remaining, "countdown tick");

        if let Some(on_tick) = &self.on_tick {
            on_tick();
        }

        if self.remaining > 0 {
            return false;
        }

        self.scheduler.pause();
        tracing::debug!(id = self.id, "countdown complete");
        if let Some(on_complete) = &self.on_complete {
            let on_complete = on_complete.resolve();
            on_complete();
        }
        true
    }

    fn complete_cmd(&self) -> Cmd {
        let id = self.id;
        bubbletea_tick(Duration::from_nanos(1), move |_| {
            Box::new(CompleteMsg { id }) as Msg
        })
    }

    fn handle_key(&mut self, key_msg: &KeyMsg) -> Option<Cmd> {
        if !self.focused {
            return None;
        }

        if self.key_map.toggle.matches(key_msg) {
            return self.toggle();
        }
        if self.key_map.start.matches(key_msg) {
            return self.start(None);
        }
        if self.key_map.stop.matches(key_msg) {
            self.stop();
        } else if self.key_map.reset.matches(key_msg) {
            self.reset();
        }
        None
    }
}

impl Model {
    /// Returns the message the currently armed tick will deliver.
    pub fn tick_msg(&self) -> interval::TickMsg {
        self.scheduler.tick_msg()
    }
}

impl<S: Scheduler> Component for Model<S> {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}

impl<S: Scheduler + fmt::Debug> fmt::Debug for Model<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Model")
            .field("id", &self.id)
            .field("remaining", &self.remaining)
            .field("initial", &self.initial)
            .field("scheduler", &self.scheduler)
            .field("focused", &self.focused)
            .finish_non_exhaustive()
    }
}

impl BubbleTeaModel for Model {
    /// A focused 60-step countdown, waiting for a start key.
    fn init() -> (Self, Option<Cmd>) {
        let mut model = Self::default();
        model.focus();
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    /// Counts down from 60 at one step per second, not running.
    fn default() -> Self {
        new(60)
    }
}
