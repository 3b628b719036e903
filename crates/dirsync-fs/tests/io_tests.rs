use assert_fs::prelude::*;
use dirsync_fs::{EntryKind, copy_contents, create_named_pipe, remove_tree};
use predicates::prelude::*;

#[test]
fn test_copy_contents_creates_file() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("hello").unwrap();
    let dst = temp.child("dst.txt");

    let written = copy_contents(src.path(), dst.path()).unwrap();

    assert_eq!(written, 5);
    dst.assert("hello");
}

#[test]
fn test_copy_contents_overwrites_existing() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("new").unwrap();
    let dst = temp.child("dst.txt");
    dst.write_str("original content").unwrap();

    copy_contents(src.path(), dst.path()).unwrap();

    dst.assert("new");
}

#[test]
fn test_copy_contents_missing_source_names_source() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("missing.txt");
    let dst = temp.child("dst.txt");

    let err = copy_contents(src.path(), dst.path()).unwrap_err();

    assert_eq!(err.path(), Some(src.path()));
    dst.assert(predicate::path::missing());
}

#[test]
fn test_copy_contents_into_missing_parent_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let src = temp.child("src.txt");
    src.write_str("x").unwrap();
    let dst = temp.child("no/such/dir/dst.txt");

    let err = copy_contents(src.path(), dst.path()).unwrap_err();

    assert_eq!(err.path(), Some(dst.path()));
}

#[test]
fn test_remove_tree_removes_everything() {
    let temp = assert_fs::TempDir::new().unwrap();
    let root = temp.child("tree");
    root.child("a/b/c").create_dir_all().unwrap();
    root.child("a/one.txt").write_str("1").unwrap();
    root.child("a/b/two.txt").write_str("2").unwrap();
    root.child("a/b/c/three.txt").write_str("3").unwrap();

    let mut files = 0;
    let mut dirs = 0;
    remove_tree(root.path(), |_, kind| match kind {
        EntryKind::Directory => dirs += 1,
        _ => files += 1,
    })
    .unwrap();

    root.assert(predicate::path::missing());
    assert_eq!(files, 3);
    assert_eq!(dirs, 4);
}

#[test]
fn test_remove_tree_missing_root_fails() {
    let temp = assert_fs::TempDir::new().unwrap();
    let root = temp.child("absent");

    assert!(remove_tree(root.path(), |_, _| {}).is_err());
}

#[cfg(unix)]
mod unix_tests {
    use super::*;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_create_named_pipe() {
        let temp = assert_fs::TempDir::new().unwrap();
        let pipe = temp.child("pipe");

        create_named_pipe(pipe.path(), 0o600).unwrap();

        let metadata = fs::symlink_metadata(pipe.path()).unwrap();
        assert_eq!(EntryKind::from_metadata(&metadata), EntryKind::NamedPipe);
        let mode = metadata.permissions().mode();
        assert_eq!(mode & 0o077, 0);
    }

    #[test]
    fn test_create_named_pipe_over_existing_fails() {
        let temp = assert_fs::TempDir::new().unwrap();
        let existing = temp.child("taken");
        existing.write_str("x").unwrap();

        let err = create_named_pipe(existing.path(), 0o644).unwrap_err();
        assert_eq!(err.path(), Some(existing.path()));
    }

    #[test]
    fn test_remove_tree_unlinks_symlinks_without_following() {
        let temp = assert_fs::TempDir::new().unwrap();
        let outside = temp.child("outside");
        outside.create_dir_all().unwrap();
        outside.child("keep.txt").write_str("keep").unwrap();

        let root = temp.child("tree");
        root.create_dir_all().unwrap();
        std::os::unix::fs::symlink(outside.path(), root.child("link").path()).unwrap();

        let mut kinds = Vec::new();
        remove_tree(root.path(), |_, kind| kinds.push(kind)).unwrap();

        root.assert(predicate::path::missing());
        outside.child("keep.txt").assert("keep");
        assert_eq!(kinds, vec![EntryKind::Other, EntryKind::Directory]);
    }

    #[test]
    fn test_remove_tree_removes_named_pipes() {
        let temp = assert_fs::TempDir::new().unwrap();
        let root = temp.child("tree");
        root.create_dir_all().unwrap();
        create_named_pipe(root.child("p").path(), 0o644).unwrap();

        remove_tree(root.path(), |_, _| {}).unwrap();

        root.assert(predicate::path::missing());
    }
}
