use std::io::Write;
use std::time::{Duration, Instant};

use eeg_replay::{spawn_load, ReplayApp, ReplayConfig, ReplayState, Sample};

fn fast_config(capacity: usize) -> ReplayConfig {
    let mut cfg = ReplayConfig::default();
    cfg.capacity = capacity;
    cfg.tick_period = Duration::from_millis(2);
    cfg
}

fn poll_until(app: &mut ReplayApp, mut done: impl FnMut(&ReplayApp) -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        app.poll();
        if done(app) {
            return true;
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    false
}

#[test]
fn background_load_feeds_the_replay() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "timestamp,value,extra").unwrap();
    writeln!(file, "00:01,1.0,x").unwrap();
    writeln!(file, "00:02,2.0,y").unwrap();
    writeln!(file, "00:03,3.0,z").unwrap();
    file.flush().unwrap();

    let mut app = ReplayApp::new(fast_config(2)).with_loader(spawn_load(file.path()));
    assert!(app.is_loading());

    assert!(poll_until(&mut app, |a| a.driver().state() == ReplayState::Finished));
    assert!(!app.is_loading());
    assert_eq!(
        app.driver().window().to_vec(),
        vec![Sample::new("00:02", 2.0), Sample::new("00:03", 3.0)]
    );
}

#[test]
fn unreadable_file_leaves_app_idle() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = ReplayApp::new(fast_config(2)).with_loader(spawn_load(dir.path().join("gone.csv")));

    assert!(poll_until(&mut app, |a| !a.is_loading()));
    std::thread::sleep(Duration::from_millis(20));
    app.poll();
    assert_eq!(app.driver().state(), ReplayState::Idle);
    assert!(app.driver().window().is_empty());
    assert!(!app.driver().has_active_timer());
}

#[test]
fn toggle_pause_is_observable() {
    let mut app = ReplayApp::new(fast_config(2));
    assert!(!app.driver().is_paused());
    app.toggle_pause();
    assert!(app.driver().is_paused());
    app.toggle_pause();
    assert!(!app.driver().is_paused());
}

#[test]
fn direct_load_replaces_pending_background_load() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = ReplayApp::new(fast_config(3)).with_loader(spawn_load(dir.path().join("slow.csv")));
    app.load(vec![Sample::new("a", 1.0)]);
    assert!(!app.is_loading());
    assert!(poll_until(&mut app, |a| a.driver().state() == ReplayState::Finished));
    assert_eq!(app.driver().window().to_vec(), vec![Sample::new("a", 1.0)]);
}

#[test]
fn dropping_app_cancels_replay_timer() {
    let mut app = ReplayApp::new(fast_config(3));
    app.load((0..1000).map(|i| Sample::new(format!("s{i}"), i as f64)).collect());
    let token = app.driver().timer_token().expect("running replay has a timer");
    assert!(!token.is_cancelled());

    drop(app);
    assert!(token.is_cancelled());
}
