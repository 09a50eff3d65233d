use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};
use vpnc_log::{Event, EventLogStore, Status};

struct TempDirGuard {
    path: PathBuf,
}

impl TempDirGuard {
    fn new(prefix: &str) -> Self {
        let unique = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after unix epoch")
            .as_nanos();
        let path = std::env::temp_dir().join(format!(
            "vpnc-log-it-{prefix}-{}-{unique}",
            std::process::id()
        ));
        fs::create_dir_all(&path).expect("temp dir should be created");
        Self { path }
    }

    fn store(&self) -> EventLogStore {
        EventLogStore::new(self.path.join("events.json"))
    }
}

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.path);
    }
}

fn sample_events(n: usize) -> Vec<Event> {
    (0..n)
        .map(|i| {
            let status = Status::ALL[i % Status::ALL.len()];
            // Deliberately non-monotonic timestamps: order must come from append order.
            let timestamp = 1_700_000_000_000 + ((i as i64 * 7919) % 1000);
            Event::new(status, timestamp)
        })
        .collect()
}

fn assert_append_then_load_roundtrips(n: usize) {
    let dir = TempDirGuard::new(&format!("n{n}"));
    let store = dir.store();
    let expected = sample_events(n);

    for event in &expected {
        store.append(*event).expect("append should succeed");
    }

    let loaded = store.load().expect("load should succeed");
    assert_eq!(loaded, expected);

    let reopened = dir.store().load().expect("reload should succeed");
    assert_eq!(reopened, expected);
}

#[test]
fn append_then_load_roundtrips_zero_events() {
    assert_append_then_load_roundtrips(0);
}

#[test]
fn append_then_load_roundtrips_one_event() {
    assert_append_then_load_roundtrips(1);
}

#[test]
fn append_then_load_roundtrips_hundred_events() {
    assert_append_then_load_roundtrips(100);
}

#[test]
fn append_all_matches_repeated_append() {
    let batched = TempDirGuard::new("batched");
    let single = TempDirGuard::new("single");
    let events = sample_events(5);

    batched
        .store()
        .append_all(&events)
        .expect("batched append should succeed");
    for event in &events {
        single.store().append(*event).expect("append should succeed");
    }

    assert_eq!(
        fs::read_to_string(batched.path.join("events.json")).expect("batched log"),
        fs::read_to_string(single.path.join("events.json")).expect("single log"),
    );
}

#[test]
fn hand_written_log_is_readable() {
    let dir = TempDirGuard::new("hand-written");
    fs::write(
        dir.path.join("events.json"),
        r#"[
  {"status": "STARTING", "timestamp": 1000},
  {"status": "UP", "timestamp": 1005}
]"#,
    )
    .expect("fixture should write");

    let events = dir.store().load().expect("hand-written log should load");
    assert_eq!(
        events,
        vec![
            Event::new(Status::Starting, 1000),
            Event::new(Status::Up, 1005),
        ]
    );
}
