//! Multi-pass scenarios across dirsync-fs, dirsync-core and the test fixtures.

use dirsync_core::{MemorySink, RootPair, SyncContext, SyncEngine, SyncEvent};
use dirsync_fs::EntryKind;
use dirsync_test_utils::{TreePair, assert_mirrored};
use pretty_assertions::assert_eq;

fn engine(pair: &TreePair) -> (SyncEngine, MemorySink) {
    let sink = MemorySink::new();
    let roots = RootPair::new(pair.source().root(), pair.target().root()).unwrap();
    (
        SyncEngine::new(SyncContext::new(roots).with_sink(sink.clone())),
        sink,
    )
}

#[test]
fn test_source_edits_are_tracked_across_passes() {
    let pair = TreePair::new();
    pair.source()
        .write("docs/readme.md", "v1")
        .write("docs/guide.md", "guide")
        .write("src/main.c", "int main() {}");
    let (engine, _) = engine(&pair);

    let first = engine.run_pass();
    assert_eq!(first.created, 5);

    // Edit, add, remove and retype entries between passes.
    pair.source()
        .write("docs/readme.md", "version two")
        .write("src/util.c", "void f() {}")
        .remove("docs/guide.md")
        .remove("src/main.c")
        .mkdir("src/main.c");

    let second = engine.run_pass();

    assert!(second.is_clean(), "{second:?}");
    assert_eq!(second.updated, 1);
    assert_eq!(second.deleted, 2);
    assert_eq!(second.created, 2);
    assert_mirrored(pair.source().root(), pair.target().root());

    let third = engine.run_pass();
    assert_eq!(third.actions(), 0);
}

#[test]
fn test_target_tampering_is_undone() {
    let pair = TreePair::new();
    pair.source().write("config.ini", "key=value").mkdir("cache");
    let (engine, _) = engine(&pair);
    engine.run_pass();

    pair.target()
        .write("config.ini", "key=tampered")
        .write("cache/intruder.bin", [1u8, 2, 3])
        .remove("cache")
        .write("cache", "now a file");

    let report = engine.run_pass();

    assert!(report.is_clean(), "{report:?}");
    assert_mirrored(pair.source().root(), pair.target().root());
    assert!(pair.target().path("cache").is_dir());
}

#[test]
fn test_same_size_and_time_content_change_is_not_detected() {
    let pair = TreePair::new();
    pair.source().write("a.txt", "aaaa").set_mtime("a.txt", 1_500_000_000);
    let (engine, _) = engine(&pair);
    engine.run_pass();

    pair.target().write("a.txt", "bbbb").set_mtime("a.txt", 1_500_000_000);
    let report = engine.run_pass();

    assert_eq!(report.actions(), 0);
    pair.target().assert_file_contains("a.txt", "bbbb");
}

#[test]
fn test_event_stream_describes_every_action() {
    let pair = TreePair::new();
    pair.source().write("new.txt", "n").mkdir("dir");
    pair.target().write("gone.txt", "g");
    let (engine, sink) = engine(&pair);

    engine.run_pass();

    let actions: Vec<SyncEvent> = sink
        .events()
        .into_iter()
        .filter(|e| {
            matches!(
                e,
                SyncEvent::Created { .. } | SyncEvent::Updated { .. } | SyncEvent::Deleted { .. }
            )
        })
        .collect();
    assert_eq!(
        actions,
        vec![
            SyncEvent::Created {
                path: "dir".into(),
                kind: EntryKind::Directory
            },
            SyncEvent::Deleted {
                path: "gone.txt".into(),
                kind: EntryKind::File
            },
            SyncEvent::Created {
                path: "new.txt".into(),
                kind: EntryKind::File
            },
        ]
    );
}
