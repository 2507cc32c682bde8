//! End-to-end typewriter runs against both schedulers.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use sunboard_common::testing::{TestLogger, TestPhase};
use sunboard_common::{
    ManualScheduler, Phase, TokioScheduler, TypewriterConfig, TypewriterEngine, TypewriterError,
};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn hi_bye() -> TypewriterConfig {
    TypewriterConfig::new(["Hi", "Bye"])
        .with_typing_speed(ms(10))
        .with_deleting_speed(ms(5))
        .with_pause_after_type(ms(20))
        .with_pause_after_delete(ms(15))
}

fn record_frames(engine: &TypewriterEngine) -> Rc<RefCell<Vec<String>>> {
    let frames = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&frames);
    engine.on_change(move |snapshot| sink.borrow_mut().push(snapshot.displayed_text.clone()));
    frames
}

#[test]
fn test_full_cycle_on_manual_clock() {
    let logger = TestLogger::for_test("test_full_cycle_on_manual_clock");
    let clock = ManualScheduler::new();
    let engine = TypewriterEngine::new(hi_bye(), Rc::new(clock.clone())).unwrap();
    let frames = record_frames(&engine);

    logger.log(TestPhase::Execute, "starting engine and advancing 145ms");
    engine.start();
    let fired = clock.advance(ms(145));

    logger.log_with_data(
        TestPhase::Verify,
        "frames recorded",
        serde_json::json!({ "fired": fired, "frames": frames.borrow().clone() }),
    );
    assert_eq!(fired, 14);
    assert_eq!(
        *frames.borrow(),
        vec!["H", "Hi", "Hi", "H", "", "", "B", "By", "Bye", "Bye", "By", "B", "", ""]
    );

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.cycles, 1);
    assert_eq!(snapshot.message_index, 0);
    assert_eq!(snapshot.phase, Phase::Typing);
    assert!(snapshot.is_animating);
    assert_eq!(clock.pending(), 1);
    logger.pass();
}

#[test]
fn test_stop_freezes_text_and_clears_timer() {
    let logger = TestLogger::for_test("test_stop_freezes_text_and_clears_timer");
    let clock = ManualScheduler::new();
    let engine = TypewriterEngine::new(hi_bye(), Rc::new(clock.clone())).unwrap();

    engine.start();
    clock.advance(ms(20));
    assert_eq!(engine.displayed_text(), "Hi");

    engine.stop();
    assert_eq!(clock.pending(), 0);
    assert!(!engine.is_animating());
    assert_eq!(clock.advance(ms(1_000)), 0);
    assert_eq!(engine.displayed_text(), "Hi");

    // A second stop is harmless, and start resumes from the frozen state.
    engine.stop();
    engine.start();
    clock.advance(ms(20));
    assert_eq!(engine.phase(), Phase::Deleting);
    logger.pass();
}

#[test]
fn test_dropping_engine_cancels_pending_tick() {
    let logger = TestLogger::for_test("test_dropping_engine_cancels_pending_tick");
    let clock = ManualScheduler::new();
    {
        let engine = TypewriterEngine::new(hi_bye(), Rc::new(clock.clone())).unwrap();
        engine.start();
        assert_eq!(clock.pending(), 1);
    }
    assert_eq!(clock.pending(), 0);
    assert_eq!(clock.advance(ms(500)), 0);
    logger.pass();
}

#[test]
fn test_empty_message_list_never_schedules() {
    let logger = TestLogger::for_test("test_empty_message_list_never_schedules");
    let clock = ManualScheduler::new();
    let result = TypewriterEngine::new(
        TypewriterConfig::new(Vec::<String>::new()),
        Rc::new(clock.clone()),
    );
    assert!(matches!(result, Err(TypewriterError::NoMessages)));
    assert_eq!(clock.pending(), 0);
    logger.pass();
}

#[tokio::test(start_paused = true)]
async fn test_engine_on_tokio_timers() {
    let logger = TestLogger::for_test("test_engine_on_tokio_timers");
    let local = tokio::task::LocalSet::new();
    local
        .run_until(async {
            let scheduler = Rc::new(TokioScheduler::new());
            let engine = TypewriterEngine::new(hi_bye(), scheduler.clone()).unwrap();
            let frames = record_frames(&engine);

            engine.start();
            tokio::time::sleep(ms(25)).await;
            assert_eq!(engine.displayed_text(), "Hi");
            assert_eq!(*frames.borrow(), vec!["H", "Hi"]);

            engine.stop();
            assert_eq!(scheduler.pending(), 0);
            tokio::time::sleep(ms(500)).await;
            assert_eq!(frames.borrow().len(), 2);
        })
        .await;
    logger.pass();
}
