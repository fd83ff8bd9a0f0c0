//! End-to-end watch sessions against real temporary directories.

use std::collections::HashMap;
use std::fs;
use std::time::Duration;

use observer::{Observer, Op};
use tempfile::TempDir;
use tokio::time::timeout;

const RECV_DEADLINE: Duration = Duration::from_secs(5);

/// A little longer than one poll interval, so "no event" checks span a
/// full comparison cycle.
const QUIET_PERIOD: Duration = Duration::from_millis(1600);

fn setup_tree() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("a.txt"), b"hello").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("b.txt"), b"world").unwrap();
    temp_dir
}

#[tokio::test]
async fn overwriting_one_file_yields_one_event_for_it_only() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let mut observer = Observer::new();
    observer.add(root.to_str().unwrap()).await.unwrap();

    assert_eq!(observer.watched(), 2);
    assert!(observer.is_watching("a.txt"));
    assert!(observer.is_watching("b.txt"));

    // Skip-first: nothing between registration and the first real change.
    tokio::time::sleep(Duration::from_millis(300)).await;
    fs::write(root.join("a.txt"), b"hello!").unwrap();

    let event = timeout(RECV_DEADLINE, observer.next_event())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.op, Op::Write);
    assert_eq!(event.file, "a.txt");

    // b.txt was untouched: no event for it.
    assert!(timeout(QUIET_PERIOD, observer.next_event()).await.is_err());
}

#[tokio::test]
async fn registering_the_same_root_twice_is_idempotent() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let mut observer = Observer::new();
    observer.add(root.to_str().unwrap()).await.unwrap();
    observer.add(root.to_str().unwrap()).await.unwrap();

    assert_eq!(observer.watched(), 2);
    assert_eq!(
        observer.working_dir(),
        Some(std::env::current_dir().unwrap().as_path())
    );

    // A single change still produces a single event, not one per add.
    tokio::time::sleep(Duration::from_millis(300)).await;
    fs::write(root.join("a.txt"), b"hello again").unwrap();

    let event = timeout(RECV_DEADLINE, observer.next_event())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.file, "a.txt");
    assert!(timeout(QUIET_PERIOD, observer.next_event()).await.is_err());
}

#[tokio::test]
async fn concurrent_changes_yield_one_event_per_file() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let mut observer = Observer::new();
    observer.add(root.to_str().unwrap()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;
    fs::write(root.join("a.txt"), b"hello!").unwrap();
    fs::write(root.join("sub").join("b.txt"), b"world!").unwrap();

    let mut counts: HashMap<String, usize> = HashMap::new();
    for _ in 0..2 {
        let event = timeout(RECV_DEADLINE, observer.next_event())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(event.op, Op::Write);
        *counts.entry(event.file).or_default() += 1;
    }

    assert_eq!(counts.get("a.txt"), Some(&1));
    assert_eq!(counts.get("b.txt"), Some(&1));
    assert!(timeout(QUIET_PERIOD, observer.next_event()).await.is_err());
}

#[tokio::test]
async fn successive_writes_to_one_file_arrive_in_order() {
    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let mut observer = Observer::new();
    observer.add(root.to_str().unwrap()).await.unwrap();

    tokio::time::sleep(Duration::from_millis(300)).await;

    fs::write(root.join("a.txt"), b"first change").unwrap();
    let first = timeout(RECV_DEADLINE, observer.next_event())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(first.file, "a.txt");

    fs::write(root.join("a.txt"), b"second change").unwrap();
    let second = timeout(RECV_DEADLINE, observer.next_event())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.file, "a.txt");
}

#[tokio::test]
async fn duplicate_names_across_directories_collapse_to_one_watcher() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("x.txt"), b"outer").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("x.txt"), b"inner").unwrap();

    let mut observer = Observer::new();
    observer.add(root.to_str().unwrap()).await.unwrap();

    // Name-keyed registry: only the first x.txt discovered is watched.
    assert_eq!(observer.watched(), 1);
}

#[tokio::test]
async fn missing_root_aborts_registration() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent");

    let mut observer = Observer::new();
    let err = observer.add(missing.to_str().unwrap()).await;
    assert!(err.is_err());
    assert_eq!(observer.watched(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn unreadable_file_never_appears_in_events() {
    use std::fs::File;
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = setup_tree();
    let root = temp_dir.path();

    let locked = root.join("locked.txt");
    fs::write(&locked, b"secret").unwrap();
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    if File::open(&locked).is_ok() {
        // Running as root: permission bits are not enforced.
        return;
    }

    let mut observer = Observer::new();
    observer.add(root.to_str().unwrap()).await.unwrap();

    assert_eq!(observer.watched(), 2);
    assert!(!observer.is_watching("locked.txt"));

    // The readable files still behave normally.
    tokio::time::sleep(Duration::from_millis(300)).await;
    fs::write(root.join("a.txt"), b"still fine").unwrap();

    let event = timeout(RECV_DEADLINE, observer.next_event())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event.file, "a.txt");
}
