//! Debounce timing tests.
//!
//! Manual-clock tests check exact firing times; the tokio tests run the same
//! scenarios on a paused tokio clock through `TokioTimers`.

mod common;

use common::CallCounter;
use keasy::{EventHub, Keasy, KeyEventKind, KeyInputEvent, ManualTimers, MILLISECONDS, SECONDS};
use std::sync::Arc;
use std::time::Duration;

fn key(k: &str) -> KeyInputEvent {
    KeyInputEvent::new(k)
}

#[test]
fn burst_fires_once_after_quiet_period() {
    let hub = Arc::new(EventHub::new());
    let timers = Arc::new(ManualTimers::new());
    let calls = CallCounter::new();

    let mut keasy = Keasy::with_timers(timers.clone());
    keasy
        .attach_to(hub.clone())
        .unwrap()
        .after(100, MILLISECONDS)
        .unwrap()
        .on_trigger(calls.callback());

    // Events at t=0, 30, 60
    hub.dispatch_key(KeyEventKind::Down, key("a"));
    timers.advance(Duration::from_millis(30));
    hub.dispatch_key(KeyEventKind::Down, key("b"));
    timers.advance(Duration::from_millis(30));
    hub.dispatch_key(KeyEventKind::Down, key("c"));

    timers.advance(Duration::from_millis(99));
    assert_eq!(calls.get(), 0, "nothing before t=160");

    timers.advance(Duration::from_millis(1));
    assert_eq!(calls.get(), 1);
    assert_eq!(timers.now(), Duration::from_millis(160));

    timers.advance(Duration::from_secs(10));
    assert_eq!(calls.get(), 1);
}

#[test]
fn debounce_with_key_filter() {
    let hub = Arc::new(EventHub::new());
    let timers = Arc::new(ManualTimers::new());
    let calls = CallCounter::new();

    let mut keasy = Keasy::with_timers(timers.clone());
    keasy
        .when("keyup")
        .attach_to(hub.clone())
        .unwrap()
        .match_keys("CTRL+F")
        .after(1, SECONDS)
        .unwrap()
        .on_trigger(calls.callback());

    // Non-matching events never start a timer
    hub.dispatch_key(KeyEventKind::Up, key("F"));
    assert!(!keasy.is_pending());

    hub.dispatch_key(KeyEventKind::Up, key("F").with_ctrl(true));
    assert!(keasy.is_pending());
    timers.advance(Duration::from_millis(500));
    hub.dispatch_key(KeyEventKind::Up, key("F").with_ctrl(true));
    timers.advance(Duration::from_millis(999));
    assert_eq!(calls.get(), 0);

    timers.advance(Duration::from_millis(1));
    assert_eq!(calls.get(), 1);
}

#[test]
fn changing_delay_replaces_pending_timer() {
    let hub = Arc::new(EventHub::new());
    let timers = Arc::new(ManualTimers::new());
    let calls = CallCounter::new();

    let mut keasy = Keasy::with_timers(timers.clone());
    keasy
        .attach_to(hub.clone())
        .unwrap()
        .after(100, MILLISECONDS)
        .unwrap()
        .on_trigger(calls.callback());

    hub.dispatch_key(KeyEventKind::Down, key("a"));
    keasy.after(50, MILLISECONDS).unwrap();

    // The pending call from the old binding was cancelled
    assert_eq!(timers.pending(), 0);
    timers.advance(Duration::from_millis(200));
    assert_eq!(calls.get(), 0);

    hub.dispatch_key(KeyEventKind::Down, key("a"));
    timers.advance(Duration::from_millis(50));
    assert_eq!(calls.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn tokio_burst_fires_once() {
    let hub = Arc::new(EventHub::new());
    let calls = CallCounter::new();

    let mut keasy = keasy::keydown();
    keasy
        .attach_to(hub.clone())
        .unwrap()
        .after(100, MILLISECONDS)
        .unwrap()
        .on_trigger(calls.callback());

    hub.dispatch_key(KeyEventKind::Down, key("a"));
    tokio::time::sleep(Duration::from_millis(30)).await;
    hub.dispatch_key(KeyEventKind::Down, key("b"));
    tokio::time::sleep(Duration::from_millis(30)).await;
    hub.dispatch_key(KeyEventKind::Down, key("c"));

    tokio::time::sleep(Duration::from_millis(99)).await;
    assert_eq!(calls.get(), 0);

    tokio::time::sleep(Duration::from_millis(2)).await;
    assert_eq!(calls.get(), 1);

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(calls.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn tokio_detach_cancels_pending() {
    let hub = Arc::new(EventHub::new());
    let calls = CallCounter::new();

    let mut keasy = keasy::keydown();
    keasy
        .attach_to(hub.clone())
        .unwrap()
        .after(100, MILLISECONDS)
        .unwrap()
        .on_trigger(calls.callback());

    hub.dispatch_key(KeyEventKind::Down, key("a"));
    keasy.detach();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(calls.get(), 0);
}
