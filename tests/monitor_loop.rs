// tests/monitor_loop.rs
mod common;

use std::time::Duration;

use common::*;
use mini_watch::clock::Clock;

#[tokio::test]
async fn status_report_resets_counters() {
    let opts = options();
    let store = FakeStore::new(&opts, STORE_WITHOUT_BUTTON, STOCK_WITH_FAVOURED);
    let inbox = Inbox::default();
    let mut m = monitor(opts, &store, &inbox);

    for _ in 0..3 {
        m.run_cycle().await.unwrap();
    }
    assert_eq!(m.counters().checks_since_last_report, 3);
    assert_eq!(m.counters().pack_count("Favoured"), 3);

    let report = m.status_report().await;
    assert!(report.any_delivered());

    let last = inbox.notes().pop().unwrap();
    assert_eq!(last.title, "📊 Status Report");
    assert!(last.body.contains("Checks completed: 3"));
    assert!(last.body.contains("Favoured sightings: 3"));
    assert!(last.body.contains("Stock: ✅"));

    assert_eq!(m.counters().checks_since_last_report, 0);
    assert!(m.counters().observed_pack_counts.is_empty());
}

#[tokio::test]
async fn report_follows_the_configured_interval() {
    let mut opts = options();
    opts.schedule.check_interval = Duration::from_secs(5 * 60);
    opts.schedule.report_every = Duration::from_secs(10 * 60);
    let store = FakeStore::new(&opts, STORE_WITHOUT_BUTTON, STOCK_EMPTY);
    let inbox = Inbox::default();
    let mut m = monitor(opts, &store, &inbox);

    m.start().await;
    assert_eq!(inbox.titles(), vec!["Mini Monitor Started!"]);
    assert_eq!(m.counters().checks_since_last_report, 1);

    m.tick().await;
    assert!(!m.report_due());
    assert_eq!(m.counters().checks_since_last_report, 2);

    m.tick().await;
    let titles = inbox.titles();
    assert_eq!(titles.last().map(String::as_str), Some("📊 Status Report"));
    let report = inbox.notes().pop().unwrap();
    assert!(report.body.contains("Checks completed: 3"));
    assert!(report.body.contains("Uptime: 0h 10m"));
    assert_eq!(m.counters().checks_since_last_report, 0);
    assert!(!m.report_due());

    assert_eq!(
        m.clock().sleeps(),
        vec![Duration::from_secs(300), Duration::from_secs(300)]
    );
}

#[tokio::test]
async fn failed_iteration_waits_the_cooldown() {
    let opts = options();
    let store = FakeStore::new(&opts, STORE_WITHOUT_BUTTON, STOCK_EMPTY);
    let inbox = Inbox::default();
    let mut m = monitor(opts.clone(), &store, &inbox);
    let t0 = m.clock().now();

    store.fail_launch(true);
    m.tick().await;

    assert_eq!(
        m.clock().sleeps(),
        vec![opts.schedule.check_interval, opts.schedule.error_cooldown]
    );
    assert_eq!((m.clock().now() - t0).num_seconds(), 360);
    assert_eq!(m.counters().checks_since_last_report, 0);

    // the loop carries on once the browser is back
    store.fail_launch(false);
    m.tick().await;
    assert_eq!(m.counters().checks_since_last_report, 1);
}

#[tokio::test]
async fn initial_failure_is_announced() {
    let opts = options();
    let store = FakeStore::new(&opts, STORE_WITHOUT_BUTTON, STOCK_EMPTY);
    store.fail_launch(true);
    let inbox = Inbox::default();
    let mut m = monitor(opts, &store, &inbox);

    m.start().await;

    let notes = inbox.notes();
    assert_eq!(notes.len(), 2);
    assert_eq!(notes[0].title, "Mini Monitor Started!");
    assert!(notes[0].body.contains("Check interval: 5 min"));
    assert_eq!(notes[1].title, "⚠️ Initial check failed");
    assert!(notes[1].body.contains("no headless browser found"));
}

#[tokio::test]
async fn no_channels_means_no_announcement() {
    let opts = options();
    let store = FakeStore::new(&opts, STORE_WITHOUT_BUTTON, STOCK_EMPTY);
    let mut m = mini_watch::Monitor::new(
        opts,
        store.clone(),
        mini_watch::clock::ManualClock::at_epoch(),
        mini_watch::notify::Dispatcher::new(),
    );

    m.start().await;
    assert_eq!(store.renders(), 2);
    assert_eq!(m.counters().checks_since_last_report, 1);
}
