//! Typewriter text rotation.
//!
//! [`Typewriter`] is the bare state machine: each [`Typewriter::tick`]
//! performs one transition and returns how long to wait before the next.
//! [`TypewriterEngine`] binds a machine to a [`Scheduler`] and keeps exactly
//! one timer pending while it runs.
//!
//! ```text
//!   Typing ──full──▶ PausedAfterType ──▶ Deleting ──empty──▶ PausedAfterDelete
//!     ▲                                                              │
//!     └──────────────────── next message (wraps) ◀──────────────────┘
//! ```

use crate::scheduler::{Scheduler, TimerHandle};
use crate::types::TypewriterSettings;
use serde::Serialize;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, trace};

/// Invalid typewriter configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypewriterError {
    #[error("typewriter needs at least one message")]
    NoMessages,
    #[error("{field} must be greater than zero")]
    ZeroDelay { field: &'static str },
    #[error("every message is empty and both pauses are zero, so no tick would ever wait")]
    NeverWaits,
}

/// Message list and timing for one typewriter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterConfig {
    pub messages: Vec<String>,
    pub typing_speed: Duration,
    pub deleting_speed: Duration,
    pub pause_after_type: Duration,
    pub pause_after_delete: Duration,
}

impl TypewriterConfig {
    /// Config with the default dashboard timing.
    pub fn new<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let defaults = TypewriterSettings::default();
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            ..Self::from(&defaults)
        }
    }

    #[must_use]
    pub fn with_typing_speed(mut self, speed: Duration) -> Self {
        self.typing_speed = speed;
        self
    }

    #[must_use]
    pub fn with_deleting_speed(mut self, speed: Duration) -> Self {
        self.deleting_speed = speed;
        self
    }

    #[must_use]
    pub fn with_pause_after_type(mut self, pause: Duration) -> Self {
        self.pause_after_type = pause;
        self
    }

    #[must_use]
    pub fn with_pause_after_delete(mut self, pause: Duration) -> Self {
        self.pause_after_delete = pause;
        self
    }

    /// Reject configs the engine cannot run.
    ///
    /// Pauses may be zero; typing and deleting speeds may not, or a long
    /// message would be processed in a zero-delay burst. With only empty
    /// messages no typing or deleting tick runs, so at least one pause
    /// must be non-zero.
    pub fn validate(&self) -> Result<(), TypewriterError> {
        if self.messages.is_empty() {
            return Err(TypewriterError::NoMessages);
        }
        if self.typing_speed.is_zero() {
            return Err(TypewriterError::ZeroDelay {
                field: "typing_speed",
            });
        }
        if self.deleting_speed.is_zero() {
            return Err(TypewriterError::ZeroDelay {
                field: "deleting_speed",
            });
        }
        if self.pause_after_type.is_zero()
            && self.pause_after_delete.is_zero()
            && self.messages.iter().all(String::is_empty)
        {
            return Err(TypewriterError::NeverWaits);
        }
        Ok(())
    }
}

impl From<&TypewriterSettings> for TypewriterConfig {
    fn from(settings: &TypewriterSettings) -> Self {
        Self {
            messages: settings.messages.clone(),
            typing_speed: Duration::from_millis(settings.typing_speed_ms),
            deleting_speed: Duration::from_millis(settings.deleting_speed_ms),
            pause_after_type: Duration::from_millis(settings.pause_after_type_ms),
            pause_after_delete: Duration::from_millis(settings.pause_after_delete_ms),
        }
    }
}

/// Animation phase. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Typing,
    PausedAfterType,
    Deleting,
    PausedAfterDelete,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Typing => write!(f, "typing"),
            Self::PausedAfterType => write!(f, "paused_after_type"),
            Self::Deleting => write!(f, "deleting"),
            Self::PausedAfterDelete => write!(f, "paused_after_delete"),
        }
    }
}

/// The typewriter state machine, independent of any clock.
#[derive(Debug, Clone)]
pub struct Typewriter {
    config: TypewriterConfig,
    index: usize,
    /// Characters of the current message currently shown.
    shown: usize,
    /// Character length of the current message.
    current_len: usize,
    phase: Phase,
    cycles: u64,
}

impl Typewriter {
    pub fn new(config: TypewriterConfig) -> Result<Self, TypewriterError> {
        config.validate()?;
        let mut machine = Self {
            config,
            index: 0,
            shown: 0,
            current_len: 0,
            phase: Phase::Typing,
            cycles: 0,
        };
        machine.enter_typing();
        Ok(machine)
    }

    pub fn config(&self) -> &TypewriterConfig {
        &self.config
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn message_index(&self) -> usize {
        self.index
    }

    /// Completed passes over the whole message list.
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn current_message(&self) -> &str {
        &self.config.messages[self.index]
    }

    /// The visible prefix of the current message.
    pub fn displayed_text(&self) -> &str {
        let message = self.current_message();
        let end = message
            .char_indices()
            .nth(self.shown)
            .map_or(message.len(), |(byte, _)| byte);
        &message[..end]
    }

    /// Delay before the next tick in the current phase.
    pub fn next_delay(&self) -> Duration {
        match self.phase {
            Phase::Typing => self.config.typing_speed,
            Phase::PausedAfterType => self.config.pause_after_type,
            Phase::Deleting => self.config.deleting_speed,
            Phase::PausedAfterDelete => self.config.pause_after_delete,
        }
    }

    /// Perform one transition and return the delay before the next one.
    pub fn tick(&mut self) -> Duration {
        match self.phase {
            Phase::Typing => {
                self.shown = (self.shown + 1).min(self.current_len);
                if self.shown == self.current_len {
                    self.phase = Phase::PausedAfterType;
                }
            }
            Phase::PausedAfterType => {
                self.phase = if self.shown == 0 {
                    Phase::PausedAfterDelete
                } else {
                    Phase::Deleting
                };
            }
            Phase::Deleting => {
                self.shown = self.shown.saturating_sub(1);
                if self.shown == 0 {
                    self.phase = Phase::PausedAfterDelete;
                }
            }
            Phase::PausedAfterDelete => {
                self.index = (self.index + 1) % self.config.messages.len();
                if self.index == 0 {
                    self.cycles += 1;
                }
                self.enter_typing();
            }
        }
        trace!(
            phase = %self.phase,
            index = self.index,
            shown = self.shown,
            "typewriter tick"
        );
        self.next_delay()
    }

    fn enter_typing(&mut self) {
        self.shown = 0;
        self.current_len = self.current_message().chars().count();
        // Nothing to type: skip straight to the pause.
        self.phase = if self.current_len == 0 {
            Phase::PausedAfterType
        } else {
            Phase::Typing
        };
    }
}

/// Pull-based view of an engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypewriterSnapshot {
    pub displayed_text: String,
    pub is_animating: bool,
    pub phase: Phase,
    pub message_index: usize,
    pub cycles: u64,
}

type ChangeListener = Box<dyn FnMut(&TypewriterSnapshot)>;

struct EngineState {
    machine: Typewriter,
    pending: Option<TimerHandle>,
    running: bool,
    listener: Option<ChangeListener>,
}

impl EngineState {
    fn snapshot(&self) -> TypewriterSnapshot {
        TypewriterSnapshot {
            displayed_text: self.machine.displayed_text().to_string(),
            is_animating: self.running,
            phase: self.machine.phase(),
            message_index: self.machine.message_index(),
            cycles: self.machine.cycles(),
        }
    }
}

/// A typewriter driven by a scheduler.
///
/// At most one timer is pending at any time. Dropping the engine cancels it.
pub struct TypewriterEngine {
    state: Rc<RefCell<EngineState>>,
    scheduler: Rc<dyn Scheduler>,
}

impl TypewriterEngine {
    /// Validate `config` and build a stopped engine.
    pub fn new(
        config: TypewriterConfig,
        scheduler: Rc<dyn Scheduler>,
    ) -> Result<Self, TypewriterError> {
        let machine = Typewriter::new(config)?;
        Ok(Self {
            state: Rc::new(RefCell::new(EngineState {
                machine,
                pending: None,
                running: false,
                listener: None,
            })),
            scheduler,
        })
    }

    /// Register the callback invoked after every tick.
    pub fn on_change(&self, listener: impl FnMut(&TypewriterSnapshot) + 'static) {
        self.state.borrow_mut().listener = Some(Box::new(listener));
    }

    /// Begin the timer chain. No-op if already running.
    pub fn start(&self) {
        let delay = {
            let mut state = self.state.borrow_mut();
            if state.running {
                return;
            }
            state.running = true;
            state.machine.next_delay()
        };
        debug!(messages = self.state.borrow().machine.config().messages.len(), "typewriter started");
        schedule_tick(&self.state, &self.scheduler, delay);
    }

    /// Cancel the pending tick. Idempotent.
    pub fn stop(&self) {
        let pending = {
            let mut state = self.state.borrow_mut();
            state.running = false;
            state.pending.take()
        };
        if let Some(handle) = pending {
            self.scheduler.cancel(handle);
            debug!(timer = handle.id(), "typewriter stopped");
        }
    }

    /// Swap in a new config, restarting from its first message.
    ///
    /// An invalid config is rejected and the engine keeps running unchanged.
    pub fn reconfigure(&self, config: TypewriterConfig) -> Result<(), TypewriterError> {
        let machine = Typewriter::new(config)?;
        let was_running = self.state.borrow().running;
        self.stop();
        self.state.borrow_mut().machine = machine;
        if was_running {
            self.start();
        }
        Ok(())
    }

    pub fn snapshot(&self) -> TypewriterSnapshot {
        self.state.borrow().snapshot()
    }

    pub fn displayed_text(&self) -> String {
        self.state.borrow().machine.displayed_text().to_string()
    }

    pub fn is_animating(&self) -> bool {
        self.state.borrow().running
    }

    pub fn phase(&self) -> Phase {
        self.state.borrow().machine.phase()
    }
}

impl Drop for TypewriterEngine {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for TypewriterEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypewriterEngine")
            .field("snapshot", &self.snapshot())
            .finish()
    }
}

fn schedule_tick(state: &Rc<RefCell<EngineState>>, scheduler: &Rc<dyn Scheduler>, delay: Duration) {
    let weak_state: Weak<RefCell<EngineState>> = Rc::downgrade(state);
    let weak_scheduler: Weak<dyn Scheduler> = Rc::downgrade(scheduler);
    let handle = scheduler.schedule_once(
        delay,
        Box::new(move || {
            let (Some(state), Some(scheduler)) = (weak_state.upgrade(), weak_scheduler.upgrade())
            else {
                return;
            };
            run_tick(&state, &scheduler);
        }),
    );

    let previous = state.borrow_mut().pending.replace(handle);
    if let Some(previous) = previous {
        scheduler.cancel(previous);
    }
}

fn run_tick(state: &Rc<RefCell<EngineState>>, scheduler: &Rc<dyn Scheduler>) {
    let delay = {
        let mut state = state.borrow_mut();
        if !state.running {
            return;
        }
        state.pending = None;
        state.machine.tick()
    };

    // Schedule before notifying so a listener that stops the engine
    // cancels the successor.
    schedule_tick(state, scheduler, delay);

    let (listener, snapshot) = {
        let mut state = state.borrow_mut();
        (state.listener.take(), state.snapshot())
    };
    if let Some(mut listener) = listener {
        listener(&snapshot);
        let mut state = state.borrow_mut();
        if state.listener.is_none() {
            state.listener = Some(listener);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::ManualScheduler;
    use crate::testing::init_test_logging;
    use proptest::prelude::*;
    use tracing::info;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn fast(messages: &[&str]) -> TypewriterConfig {
        TypewriterConfig::new(messages.iter().copied())
            .with_typing_speed(ms(10))
            .with_deleting_speed(ms(10))
            .with_pause_after_type(ms(0))
            .with_pause_after_delete(ms(0))
    }

    /// Run `ticks` transitions, recording the text after each one that
    /// changed it.
    fn text_changes(machine: &mut Typewriter, ticks: usize) -> Vec<String> {
        let mut seen = Vec::new();
        let mut last = machine.displayed_text().to_string();
        for _ in 0..ticks {
            machine.tick();
            let now = machine.displayed_text();
            if now != last {
                seen.push(now.to_string());
                last = now.to_string();
            }
        }
        seen
    }

    #[test]
    fn test_validate_rejects_empty_messages() {
        init_test_logging();
        let config = TypewriterConfig::new(Vec::<String>::new());
        assert_eq!(config.validate(), Err(TypewriterError::NoMessages));
        assert!(Typewriter::new(config).is_err());
    }

    #[test]
    fn test_validate_rejects_zero_speeds() {
        init_test_logging();
        let config = fast(&["a"]).with_typing_speed(Duration::ZERO);
        assert_eq!(
            config.validate(),
            Err(TypewriterError::ZeroDelay {
                field: "typing_speed"
            })
        );
        let config = fast(&["a"]).with_deleting_speed(Duration::ZERO);
        assert_eq!(
            config.validate(),
            Err(TypewriterError::ZeroDelay {
                field: "deleting_speed"
            })
        );
        // Zero pauses are fine.
        assert!(fast(&["a"]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_messages_without_pauses() {
        init_test_logging();
        assert_eq!(fast(&[""]).validate(), Err(TypewriterError::NeverWaits));
        assert_eq!(fast(&["", ""]).validate(), Err(TypewriterError::NeverWaits));
        assert!(TypewriterEngine::new(fast(&[""]), Rc::new(ManualScheduler::new())).is_err());

        // One non-empty message or one non-zero pause is enough to make progress.
        assert!(fast(&["", "a"]).validate().is_ok());
        assert!(fast(&[" "]).validate().is_ok());
        assert!(fast(&[""]).with_pause_after_type(ms(5)).validate().is_ok());
        assert!(fast(&[""]).with_pause_after_delete(ms(5)).validate().is_ok());
    }

    #[test]
    fn test_empty_messages_with_one_pause_advance_the_clock() {
        init_test_logging();
        let clock = ManualScheduler::new();
        let config = fast(&[""]).with_pause_after_delete(ms(5));
        let engine = TypewriterEngine::new(config, Rc::new(clock.clone())).unwrap();
        engine.start();

        // Returns because every full cycle waits 5 ms.
        clock.advance(ms(50));
        assert_eq!(engine.snapshot().cycles, 10);
        assert_eq!(engine.displayed_text(), "");
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_hi_bye_sequence() {
        init_test_logging();
        info!("TEST START: test_hi_bye_sequence");
        let mut machine = Typewriter::new(fast(&["Hi", "Bye"])).unwrap();
        assert_eq!(machine.displayed_text(), "");
        assert_eq!(machine.phase(), Phase::Typing);

        let seen = text_changes(&mut machine, 17);
        assert_eq!(
            seen,
            vec!["H", "Hi", "H", "", "B", "By", "Bye", "By", "B", "", "H", "Hi"]
        );
        info!("TEST PASS: test_hi_bye_sequence");
    }

    #[test]
    fn test_phase_transitions_in_order() {
        init_test_logging();
        let mut machine = Typewriter::new(fast(&["ab"])).unwrap();
        let mut phases = vec![machine.phase()];
        for _ in 0..6 {
            machine.tick();
            phases.push(machine.phase());
        }
        assert_eq!(
            phases,
            vec![
                Phase::Typing,
                Phase::Typing,
                Phase::PausedAfterType,
                Phase::Deleting,
                Phase::Deleting,
                Phase::PausedAfterDelete,
                Phase::Typing,
            ]
        );
    }

    #[test]
    fn test_next_delay_follows_phase() {
        init_test_logging();
        let config = TypewriterConfig::new(["x"])
            .with_typing_speed(ms(1))
            .with_deleting_speed(ms(2))
            .with_pause_after_type(ms(3))
            .with_pause_after_delete(ms(4));
        let mut machine = Typewriter::new(config).unwrap();
        assert_eq!(machine.next_delay(), ms(1));
        assert_eq!(machine.tick(), ms(3)); // typed "x"
        assert_eq!(machine.tick(), ms(2)); // deleting
        assert_eq!(machine.tick(), ms(4)); // erased
        assert_eq!(machine.tick(), ms(1)); // typing again
    }

    #[test]
    fn test_empty_message_skips_typing() {
        init_test_logging();
        let mut machine = Typewriter::new(fast(&["", "ok"])).unwrap();
        assert_eq!(machine.phase(), Phase::PausedAfterType);
        machine.tick();
        assert_eq!(machine.phase(), Phase::PausedAfterDelete);
        machine.tick();
        assert_eq!(machine.message_index(), 1);
        assert_eq!(machine.phase(), Phase::Typing);
    }

    #[test]
    fn test_single_message_retypes_itself() {
        init_test_logging();
        let mut machine = Typewriter::new(fast(&["go"])).unwrap();
        let seen = text_changes(&mut machine, 14);
        assert_eq!(seen, vec!["g", "go", "g", "", "g", "go", "g", "", "g", "go"]);
        assert_eq!(machine.message_index(), 0);
        assert_eq!(machine.cycles(), 2);
    }

    #[test]
    fn test_multibyte_prefixes() {
        init_test_logging();
        let mut machine = Typewriter::new(fast(&["☀é"])).unwrap();
        machine.tick();
        assert_eq!(machine.displayed_text(), "☀");
        machine.tick();
        assert_eq!(machine.displayed_text(), "☀é");
    }

    #[test]
    fn test_engine_drives_scenario_on_fake_clock() {
        init_test_logging();
        info!("TEST START: test_engine_drives_scenario_on_fake_clock");
        let clock = ManualScheduler::new();
        let engine = TypewriterEngine::new(fast(&["Hi", "Bye"]), Rc::new(clock.clone())).unwrap();

        let frames = Rc::new(RefCell::new(Vec::new()));
        let sink = frames.clone();
        engine.on_change(move |snap| {
            let mut frames = sink.borrow_mut();
            if frames.last() != Some(&snap.displayed_text) {
                frames.push(snap.displayed_text.clone());
            }
        });

        assert!(!engine.is_animating());
        engine.start();
        assert!(engine.is_animating());
        assert_eq!(clock.pending(), 1);

        clock.advance(ms(10));
        assert_eq!(engine.displayed_text(), "H");
        clock.advance(ms(10));
        assert_eq!(engine.displayed_text(), "Hi");
        // Pause is zero, then two delete ticks, then into "Bye".
        clock.advance(ms(30));
        assert_eq!(engine.displayed_text(), "B");

        assert_eq!(*frames.borrow(), vec!["H", "Hi", "H", "", "B"]);
        assert_eq!(clock.pending(), 1);
        info!("TEST PASS: test_engine_drives_scenario_on_fake_clock");
    }

    #[test]
    fn test_engine_stop_cancels_pending_tick() {
        init_test_logging();
        let clock = ManualScheduler::new();
        let engine = TypewriterEngine::new(fast(&["Hi"]), Rc::new(clock.clone())).unwrap();
        engine.start();
        clock.advance(ms(10));
        engine.stop();
        engine.stop();

        assert_eq!(clock.pending(), 0);
        assert!(!engine.is_animating());
        clock.advance(ms(1000));
        assert_eq!(engine.displayed_text(), "H");
    }

    #[test]
    fn test_engine_drop_cancels_pending_tick() {
        init_test_logging();
        let clock = ManualScheduler::new();
        {
            let engine = TypewriterEngine::new(fast(&["Hi"]), Rc::new(clock.clone())).unwrap();
            engine.start();
            assert_eq!(clock.pending(), 1);
        }
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_engine_start_is_idempotent() {
        init_test_logging();
        let clock = ManualScheduler::new();
        let engine = TypewriterEngine::new(fast(&["Hi"]), Rc::new(clock.clone())).unwrap();
        engine.start();
        engine.start();
        assert_eq!(clock.pending(), 1);
    }

    #[test]
    fn test_listener_can_stop_engine() {
        init_test_logging();
        let clock = ManualScheduler::new();
        let engine = Rc::new(
            TypewriterEngine::new(fast(&["Hello"]), Rc::new(clock.clone())).unwrap(),
        );
        let weak = Rc::downgrade(&engine);
        engine.on_change(move |snap| {
            if snap.displayed_text == "He"
                && let Some(engine) = weak.upgrade()
            {
                engine.stop();
            }
        });
        engine.start();
        clock.advance(ms(500));

        assert_eq!(engine.displayed_text(), "He");
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn test_reconfigure_restarts_from_first_message() {
        init_test_logging();
        let clock = ManualScheduler::new();
        let engine = TypewriterEngine::new(fast(&["Hi"]), Rc::new(clock.clone())).unwrap();
        engine.start();
        clock.advance(ms(10));
        assert_eq!(engine.displayed_text(), "H");

        engine.reconfigure(fast(&["Yo"])).unwrap();
        assert_eq!(engine.displayed_text(), "");
        assert_eq!(clock.pending(), 1);
        clock.advance(ms(10));
        assert_eq!(engine.displayed_text(), "Y");

        let err = engine.reconfigure(fast(&[])).unwrap_err();
        assert_eq!(err, TypewriterError::NoMessages);
        assert!(engine.is_animating());
        assert_eq!(engine.displayed_text(), "Y");
    }

    #[test]
    fn test_independent_engines_share_nothing() {
        init_test_logging();
        let clock = ManualScheduler::new();
        let a = TypewriterEngine::new(fast(&["aaa"]), Rc::new(clock.clone())).unwrap();
        let b = TypewriterEngine::new(
            fast(&["bbb"]).with_typing_speed(ms(20)),
            Rc::new(clock.clone()),
        )
        .unwrap();
        a.start();
        b.start();
        clock.advance(ms(20));
        assert_eq!(a.displayed_text(), "aa");
        assert_eq!(b.displayed_text(), "b");
        a.stop();
        assert_eq!(clock.pending(), 1);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_visits_every_index_in_order(
            messages in prop::collection::vec("[a-z]{0,5}", 1..6),
        ) {
            let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
            // All-empty lists need one non-zero pause to be accepted.
            let config = fast(&refs).with_pause_after_delete(ms(1));
            let mut machine = Typewriter::new(config).unwrap();
            let mut visited = vec![machine.message_index()];
            while machine.cycles() < 2 {
                machine.tick();
                if visited.last() != Some(&machine.message_index()) {
                    visited.push(machine.message_index());
                }
            }
            let n = messages.len();
            // With one message the index never changes.
            let expected: Vec<usize> = if n == 1 {
                vec![0]
            } else {
                (0..n).chain(0..n).chain(std::iter::once(0)).collect()
            };
            prop_assert_eq!(visited, expected);
        }

        #[test]
        fn prop_length_is_monotonic_within_phase(
            messages in prop::collection::vec("[a-zé☀]{0,6}", 1..4),
            ticks in 1usize..120,
        ) {
            let refs: Vec<&str> = messages.iter().map(String::as_str).collect();
            // All-empty lists need one non-zero pause to be accepted.
            let config = fast(&refs).with_pause_after_delete(ms(1));
            let mut machine = Typewriter::new(config).unwrap();
            for _ in 0..ticks {
                let before_phase = machine.phase();
                let before_len = machine.displayed_text().chars().count();
                let before_index = machine.message_index();
                machine.tick();
                let after_len = machine.displayed_text().chars().count();
                prop_assert!(after_len <= machine.current_message().chars().count());
                if machine.message_index() == before_index {
                    match before_phase {
                        Phase::Typing => prop_assert!(after_len >= before_len),
                        Phase::Deleting => prop_assert!(after_len <= before_len),
                        _ => prop_assert_eq!(after_len, before_len),
                    }
                }
                prop_assert!(machine.current_message().starts_with(machine.displayed_text()));
            }
        }
    }
}
