use rollcall_picker::Debouncer;
use std::time::Duration;
use tokio::time::{self, Instant};
use tokio_test::{assert_pending, task};

const WINDOW: Duration = Duration::from_millis(300);

/// Paused clocks land on timer ticks, so allow one tick of slack.
fn assert_elapsed(start: Instant, expected_ms: u64) {
    let elapsed = Instant::now() - start;
    let expected = Duration::from_millis(expected_ms);
    assert!(
        elapsed >= expected && elapsed <= expected + Duration::from_millis(1),
        "elapsed {elapsed:?}, expected {expected:?}"
    );
}

#[tokio::test(start_paused = true)]
async fn fires_once_after_window() {
    let start = Instant::now();
    let mut d = Debouncer::new();
    d.schedule("a", WINDOW);

    let action = d.fired().await;
    assert_eq!(action, "a");
    assert_elapsed(start, 300);
    assert!(!d.is_pending());
}

#[tokio::test(start_paused = true)]
async fn burst_fires_last_action_at_last_call_plus_window() {
    let start = Instant::now();
    let mut d = Debouncer::new();

    for (i, text) in ["j", "jo", "joh", "john"].into_iter().enumerate() {
        if i > 0 {
            time::sleep(Duration::from_millis(100)).await;
        }
        d.schedule(text, WINDOW);
    }

    let action = d.fired().await;
    assert_eq!(action, "john");
    assert_elapsed(start, 600);
}

#[tokio::test(start_paused = true)]
async fn idle_debouncer_never_fires() {
    let mut d: Debouncer<&str> = Debouncer::new();
    let fired = time::timeout(Duration::from_secs(60), d.fired()).await;
    assert!(fired.is_err());
}

#[tokio::test(start_paused = true)]
async fn dropping_fired_future_keeps_pending_action() {
    let mut d = Debouncer::new();
    d.schedule(1u32, WINDOW);

    {
        let mut fut = task::spawn(d.fired());
        assert_pending!(fut.poll());
    }

    assert!(d.is_pending());
    time::advance(WINDOW).await;

    assert_eq!(d.fired().await, 1);
}

#[tokio::test(start_paused = true)]
async fn reschedule_while_waiting_moves_deadline() {
    let start = Instant::now();
    let mut d = Debouncer::new();
    d.schedule("a", WINDOW);

    // Race the wait against a second call 200ms in, like a select loop does.
    tokio::select! {
        _ = d.fired() => panic!("first action must be superseded"),
        _ = time::sleep(Duration::from_millis(200)) => {}
    }
    assert!(d.schedule("ab", WINDOW));

    assert_eq!(d.fired().await, "ab");
    assert_elapsed(start, 500);
}

#[tokio::test(start_paused = true)]
async fn separated_calls_fire_separately() {
    let mut d = Debouncer::new();

    d.schedule("a", WINDOW);
    assert_eq!(d.fired().await, "a");

    time::sleep(Duration::from_millis(100)).await;
    d.schedule("b", WINDOW);
    assert_eq!(d.fired().await, "b");
}

#[test]
fn dropping_debouncer_drops_action() {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct Flag(Arc<AtomicBool>);
    impl Drop for Flag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    let dropped = Arc::new(AtomicBool::new(false));
    let mut d = Debouncer::new();
    d.schedule_at(Flag(dropped.clone()), Instant::now(), WINDOW);
    assert!(!dropped.load(Ordering::SeqCst));

    drop(d);
    assert!(dropped.load(Ordering::SeqCst));
}
