//! Interval component: a pausable periodic tick for Bubble Tea applications.
//!
//! An interval fires a [`TickMsg`] every `interval` while it is active. Each
//! delivered tick is fed back through [`Model::update`] (or
//! [`Scheduler::accept`] plus [`Scheduler::schedule`] when a parent component
//! needs to act between the two), which arms the next tick. Pausing stops the
//! chain; resuming starts a new one.
//!
//! # Basic Usage
//!
//! ```rust
//! use bubbletea_countdown::interval::{new, Scheduler};
//! use std::time::Duration;
//!
//! let mut interval = new(Duration::from_millis(100), false);
//! assert!(!interval.is_active());
//!
//! let first_tick = interval.resume();
//! assert!(first_tick.is_some());
//! assert!(interval.is_active());
//! ```
//!
//! # Stale Ticks
//!
//! Every pause and resume starts a new tick generation. Ticks that were
//! already in flight carry the old generation tag and are rejected, so a
//! paused interval never fires late and a restarted one never fires twice
//! per period.

use crate::value::MaybeDynamic;
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Model as BubbleTeaModel, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

static LAST_INTERVAL_ID: AtomicI64 = AtomicI64::new(0);

fn next_interval_id() -> i64 {
    LAST_INTERVAL_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// A periodic-callback source that a parent component can pause and resume.
///
/// The parent owns the scheduler and runs its own per-tick logic between
/// [`accept`](Scheduler::accept) and [`schedule`](Scheduler::schedule). That
/// ordering lets the tick handler pause the scheduler so no further tick is
/// armed.
///
/// While active, [`schedule`](Scheduler::schedule) must arm the same tick
/// that the last [`resume`](Scheduler::resume) returned. Owners may drop the
/// command from `resume` and ask `schedule` for it later; a countdown built
/// with `immediate` does exactly that and hands the tick out from `init()`.
pub trait Scheduler {
    /// Stops ticking. Ticks already in flight are discarded on arrival.
    fn pause(&mut self);

    /// Starts ticking and returns the command that arms the next tick.
    ///
    /// Resuming an active scheduler restarts its period.
    fn resume(&mut self) -> Option<Cmd>;

    /// Whether ticks are currently being delivered.
    fn is_active(&self) -> bool;

    /// Returns `true` if `msg` is a tick this scheduler should act on now.
    fn accept(&mut self, msg: &Msg) -> bool;

    /// Returns the command for the following tick, or `None` while paused.
    fn schedule(&self) -> Option<Cmd>;
}

/// Message delivered by an interval once per period.
#[derive(Debug, Clone)]
pub struct TickMsg {
    /// Identifier of the interval that armed this tick. `0` matches any interval.
    pub id: i64,
    /// Generation the tick belongs to. `0` matches any generation.
    tag: i64,
}

/// A pausable periodic tick.
#[derive(Debug, Clone)]
pub struct Model {
    /// Time between ticks, re-read each time a tick is armed.
    pub interval: MaybeDynamic<Duration>,
    id: i64,
    tag: i64,
    active: bool,
}

/// Creates an interval firing every `interval`.
///
/// With `immediate` the interval starts active and [`Model::init`] returns the
/// first tick; otherwise it stays paused until [`Scheduler::resume`].
///
/// ```rust
/// use bubbletea_countdown::interval::{new, Scheduler};
/// use bubbletea_countdown::value::MaybeDynamic;
/// use std::time::Duration;
///
/// let running = new(Duration::from_secs(1), true);
/// assert!(running.is_active());
///
/// let paused = new(MaybeDynamic::from_fn(|| Duration::from_millis(16)), false);
/// assert!(!paused.is_active());
/// assert!(paused.init().is_none());
/// ```
pub fn new(interval: impl Into<MaybeDynamic<Duration>>, immediate: bool) -> Model {
    Model {
        interval: interval.into(),
        id: next_interval_id(),
        // Generation 0 is the wildcard, so real ticks start at 1.
        tag: 1,
        active: immediate,
    }
}

impl Model {
    /// Returns the unique identifier of this interval.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Returns the message the currently armed tick will deliver.
    ///
    /// Hosts that drive the loop by hand can feed this straight back into
    /// [`update`](Model::update).
    pub fn tick_msg(&self) -> TickMsg {
        TickMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Returns the first tick command if the interval starts active.
    pub fn init(&self) -> Option<Cmd> {
        self.schedule()
    }

    /// Handles a tick addressed to this interval and arms the next one.
    ///
    /// Returns `None` for foreign, stale or unrelated messages.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if self.accept(&msg) {
            return self.schedule();
        }
        None
    }

    fn tick(&self) -> Cmd {
        let id = self.id;
        let tag = self.tag;
        let interval = self.interval.resolve();

        bubbletea_tick(interval, move |_| Box::new(TickMsg { id, tag }) as Msg)
    }
}

impl Scheduler for Model {
    fn pause(&mut self) {
        if self.active {
            self.active = false;
            self.tag += 1;
            tracing::trace!(id = self.id, tag = self.tag, "interval paused");
        }
    }

    fn resume(&mut self) -> Option<Cmd> {
        self.active = true;
        self.tag += 1;
        tracing::trace!(id = self.id, tag = self.tag, "interval resumed");
        Some(self.tick())
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn accept(&mut self, msg: &Msg) -> bool {
        let Some(tick_msg) = msg.downcast_ref::<TickMsg>() else {
            return false;
        };

        if !self.active || (tick_msg.id != 0 && tick_msg.id != self.id) {
            return false;
        }

        // If a tag is set, and it's not the one we expect, reject the message.
        // This prevents the interval from receiving too many messages and
        // thus ticking too fast.
        if tick_msg.tag > 0 && tick_msg.tag != self.tag {
            tracing::trace!(
                id = self.id,
                expected = self.tag,
                got = tick_msg.tag,
                "stale tick rejected"
            );
            return false;
        }

        true
    }

    fn schedule(&self) -> Option<Cmd> {
        self.active.then(|| self.tick())
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let model = Self::default();
        let cmd = model.init();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        String::new()
    }
}

impl Default for Model {
    /// A one-second interval that starts active.
    fn default() -> Self {
        new(Duration::from_secs(1), true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_immediate() {
        let interval = new(Duration::from_millis(10), true);
        assert!(interval.is_active());
        assert!(interval.id() > 0);
        assert!(interval.init().is_some());
    }

    #[test]
    fn test_new_paused() {
        let interval = new(Duration::from_millis(10), false);
        assert!(!interval.is_active());
        assert!(interval.init().is_none());
        assert!(interval.schedule().is_none());
    }

    #[test]
    fn test_unique_ids() {
        let a = new(Duration::from_secs(1), false);
        let b = new(Duration::from_secs(1), false);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_update_accepts_own_tick() {
        let mut interval = new(Duration::from_millis(10), true);
        let msg = interval.tick_msg();
        assert!(interval.update(Box::new(msg)).is_some());
    }

    #[test]
    fn test_update_rejects_wrong_id() {
        let mut interval = new(Duration::from_millis(10), true);
        let msg = TickMsg {
            id: interval.id() + 999,
            tag: 0,
        };
        assert!(interval.update(Box::new(msg)).is_none());
    }

    #[test]
    fn test_zero_id_and_tag_match_any() {
        let mut interval = new(Duration::from_millis(10), true);
        interval.resume();
        let msg = TickMsg { id: 0, tag: 0 };
        assert!(interval.update(Box::new(msg)).is_some());
    }

    #[test]
    fn test_pause_rejects_in_flight_tick() {
        let mut interval = new(Duration::from_millis(10), true);
        let in_flight = interval.tick_msg();

        interval.pause();
        assert!(!interval.is_active());
        assert!(interval.update(Box::new(in_flight)).is_none());
    }

    #[test]
    fn test_resume_invalidates_previous_generation() {
        let mut interval = new(Duration::from_millis(10), false);
        interval.resume();
        let first = interval.tick_msg();

        interval.pause();
        interval.resume();
        assert!(interval.is_active());

        assert!(!interval.accept(&(Box::new(first) as Msg)));
        let current = interval.tick_msg();
        assert!(interval.accept(&(Box::new(current) as Msg)));
    }

    #[test]
    fn test_resume_while_active_restarts() {
        let mut interval = new(Duration::from_millis(10), true);
        let before = interval.tick_msg();
        assert!(interval.resume().is_some());
        assert!(interval.is_active());
        assert!(!interval.accept(&(Box::new(before) as Msg)));
    }

    #[test]
    fn test_first_tick_is_not_a_wildcard() {
        let interval = new(Duration::from_millis(10), true);
        assert!(interval.tick_msg().tag > 0);
    }

    #[test]
    fn test_first_tick_rejected_after_pause_and_resume() {
        let mut interval = new(Duration::from_millis(10), true);
        let first = interval.tick_msg();

        interval.pause();
        assert!(interval.resume().is_some());

        assert!(interval.update(Box::new(first)).is_none());
        let current = interval.tick_msg();
        assert!(interval.update(Box::new(current)).is_some());
    }

    #[test]
    fn test_schedule_matches_resume_generation() {
        let mut interval = new(Duration::from_millis(10), false);
        let _ = interval.resume();
        // A tick armed later through `schedule` carries the resumed generation.
        assert!(interval.schedule().is_some());
        let armed = interval.tick_msg();
        assert!(interval.accept(&(Box::new(armed) as Msg)));
    }

    #[test]
    fn test_pause_twice_is_harmless() {
        let mut interval = new(Duration::from_millis(10), true);
        interval.pause();
        let msg = interval.tick_msg();
        interval.pause();
        assert!(!interval.is_active());
        assert_eq!(interval.tick_msg().tag, msg.tag);
    }

    #[test]
    fn test_ignores_unrelated_messages() {
        let mut interval = new(Duration::from_millis(10), true);
        assert!(interval.update(Box::new("not a tick")).is_none());
    }

    #[test]
    fn test_default_interval() {
        let interval = Model::default();
        assert_eq!(interval.interval.resolve(), Duration::from_secs(1));
        assert!(interval.is_active());
    }
}
