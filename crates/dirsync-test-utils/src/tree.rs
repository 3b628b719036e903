//! [`TestTree`] builder for synchronization test scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use filetime::{FileTime, set_file_mtime};
use tempfile::TempDir;

/// A directory tree under construction, with helpers for setup and assertion.
///
/// All paths taken by the helpers are relative to the tree root.
///
/// # Example
///
/// ```rust,no_run
/// use dirsync_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("a.txt", "hello").mkdir("b/c");
/// tree.assert_file_contains("a.txt", "hello");
/// ```
pub struct TestTree {
    root: PathBuf,
    _temp_dir: Option<TempDir>,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// A tree rooted in a fresh temporary directory.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        Self {
            root: temp_dir.path().to_path_buf(),
            _temp_dir: Some(temp_dir),
        }
    }

    /// A tree rooted at `root`, which is created if needed.
    ///
    /// The directory is not removed when the tree is dropped.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        fs::create_dir_all(&root).unwrap();
        Self {
            root,
            _temp_dir: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute path of `rel`.
    pub fn path(&self, rel: &str) -> PathBuf {
        self.root.join(rel)
    }

    /// Write a file, creating missing parent directories.
    pub fn write(&self, rel: &str, content: impl AsRef<[u8]>) -> &Self {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        self
    }

    /// Create a directory and its parents.
    pub fn mkdir(&self, rel: &str) -> &Self {
        fs::create_dir_all(self.path(rel)).unwrap();
        self
    }

    /// Create a named pipe with mode 0o644.
    pub fn mkfifo(&self, rel: &str) -> &Self {
        dirsync_fs::create_named_pipe(&self.path(rel), 0o644).unwrap();
        self
    }

    /// Create a symbolic link at `rel` pointing to `target`.
    #[cfg(unix)]
    pub fn symlink(&self, rel: &str, target: impl AsRef<Path>) -> &Self {
        std::os::unix::fs::symlink(target, self.path(rel)).unwrap();
        self
    }

    /// Set the modification time of `rel` to `secs` after the epoch.
    pub fn set_mtime(&self, rel: &str, secs: i64) -> &Self {
        set_file_mtime(self.path(rel), FileTime::from_unix_time(secs, 0)).unwrap();
        self
    }

    /// Set Unix permission bits of `rel`.
    #[cfg(unix)]
    pub fn chmod(&self, rel: &str, mode: u32) -> &Self {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(self.path(rel), fs::Permissions::from_mode(mode)).unwrap();
        self
    }

    /// Remove a file or a whole directory.
    pub fn remove(&self, rel: &str) -> &Self {
        let path = self.path(rel);
        if fs::symlink_metadata(&path).unwrap().is_dir() {
            fs::remove_dir_all(&path).unwrap();
        } else {
            fs::remove_file(&path).unwrap();
        }
        self
    }

    pub fn read(&self, rel: &str) -> String {
        let path = self.path(rel);
        fs::read_to_string(&path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", path.display()))
    }

    /// Assert that `rel` exists, without following symlinks.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            fs::symlink_metadata(&full_path).is_ok(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `rel` does **not** exist.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_file_not_exists(&self, rel: &str) {
        let full_path = self.path(rel);
        assert!(
            fs::symlink_metadata(&full_path).is_err(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `rel` contains `content`.
    ///
    /// # Panics
    /// Panics if the file cannot be read or does not contain `content`.
    pub fn assert_file_contains(&self, rel: &str, content: &str) {
        let file_content = self.read(rel);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            self.path(rel).display(),
            content,
            file_content
        );
    }
}

/// A temporary directory holding a `source` tree and a `target` tree.
pub struct TreePair {
    temp_dir: TempDir,
    source: TestTree,
    target: TestTree,
}

impl Default for TreePair {
    fn default() -> Self {
        Self::new()
    }
}

impl TreePair {
    /// Both roots exist and are empty.
    pub fn new() -> Self {
        let pair = Self::without_target();
        fs::create_dir_all(pair.target.root()).unwrap();
        pair
    }

    /// The source root exists; the target root does not.
    pub fn without_target() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let source = TestTree::at(temp_dir.path().join("source"));
        let target = TestTree {
            root: temp_dir.path().join("target"),
            _temp_dir: None,
        };
        Self {
            temp_dir,
            source,
            target,
        }
    }

    pub fn source(&self) -> &TestTree {
        &self.source
    }

    pub fn target(&self) -> &TestTree {
        &self.target
    }

    /// The directory containing both roots.
    pub fn base(&self) -> &Path {
        self.temp_dir.path()
    }
}
