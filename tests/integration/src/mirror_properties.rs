//! Mirror invariant and idempotence over randomly generated trees.
//!
//! Files always carry a `.txt` suffix and directories never do, so a
//! generated path can not be a file in one entry and a directory in another.

use dirsync_core::{MemorySink, RootPair, SyncContext, SyncEngine};
use dirsync_test_utils::{TestTree, TreePair, assert_mirrored};
use proptest::prelude::*;

/// Path segments plus file content, or `None` for a directory.
type Entry = (Vec<String>, Option<Vec<u8>>);

fn entry() -> impl Strategy<Value = Entry> {
    (
        proptest::collection::vec("[abc]", 1..=3),
        proptest::option::of(proptest::collection::vec(any::<u8>(), 0..64)),
    )
}

fn tree() -> impl Strategy<Value = Vec<Entry>> {
    proptest::collection::vec(entry(), 0..12)
}

/// Write `entries` below `tree`. Files get `mtime` when given, so trees
/// built within the same clock tick still differ in modification time.
fn materialize(tree: &TestTree, entries: &[Entry], mtime: Option<i64>) {
    for (segments, content) in entries {
        let (last, parents) = segments.split_last().unwrap();
        let mut rel: Vec<&str> = parents.iter().map(String::as_str).collect();
        match content {
            Some(bytes) => {
                let file = format!("{last}.txt");
                rel.push(&file);
                let path = rel.join("/");
                tree.write(&path, bytes);
                if let Some(secs) = mtime {
                    tree.set_mtime(&path, secs);
                }
            }
            None => {
                rel.push(last);
                tree.mkdir(&rel.join("/"));
            }
        }
    }
}

fn engine(pair: &TreePair) -> SyncEngine {
    let roots = RootPair::new(pair.source().root(), pair.target().root()).unwrap();
    SyncEngine::new(SyncContext::new(roots).with_sink(MemorySink::new()))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn one_pass_mirrors_any_source_over_any_target(source in tree(), target in tree()) {
        let pair = TreePair::new();
        materialize(pair.source(), &source, None);
        materialize(pair.target(), &target, Some(1_000_000));

        let report = engine(&pair).run_pass();

        prop_assert!(report.is_clean(), "{:?}", report);
        assert_mirrored(pair.source().root(), pair.target().root());
    }

    #[test]
    fn second_pass_is_idle(source in tree(), target in tree()) {
        let pair = TreePair::new();
        materialize(pair.source(), &source, None);
        materialize(pair.target(), &target, Some(1_000_000));
        let engine = engine(&pair);
        engine.run_pass();

        let second = engine.run_pass();

        prop_assert_eq!(second.actions(), 0);
        prop_assert_eq!(second.failed, 0);
    }

    #[test]
    fn source_is_never_modified(source in tree(), target in tree()) {
        let pair = TreePair::new();
        materialize(pair.source(), &source, None);
        materialize(pair.target(), &target, Some(1_000_000));
        let before = dirsync_test_utils::snapshot(pair.source().root());

        engine(&pair).run_pass();

        prop_assert_eq!(dirsync_test_utils::snapshot(pair.source().root()), before);
    }
}
