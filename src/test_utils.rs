//! Test utilities for building temporary directory trees.
//!
//! This module is only compiled for tests and benchmarks.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary directory tree for testing.
///
/// The tree is removed when dropped. Directories locked with `lock_dir` are
/// unlocked again first so cleanup can succeed.
pub struct TestTree {
    dir: TempDir,
    locked: Vec<PathBuf>,
}

impl TestTree {
    /// Create a new empty temporary directory.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        Self {
            dir,
            locked: Vec::new(),
        }
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Add an empty file, creating parent directories as needed.
    pub fn add_file(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        fs::write(&full_path, "").expect("Failed to write file");
        full_path
    }

    /// Add a directory (and its parents).
    pub fn add_dir(&self, path: &str) -> PathBuf {
        let full_path = self.dir.path().join(path);
        fs::create_dir_all(&full_path).expect("Failed to create dir");
        full_path
    }

    /// Build `dirs` top-level directories, each holding `files` files named
    /// `needle-<d>-<f>.txt` and as many `hay-<d>-<f>.txt`.
    pub fn wide(dirs: usize, files: usize) -> Self {
        let tree = Self::new();
        for d in 0..dirs {
            for f in 0..files {
                tree.add_file(&format!("dir{}/needle-{}-{}.txt", d, d, f));
                tree.add_file(&format!("dir{}/hay-{}-{}.txt", d, d, f));
            }
        }
        tree
    }

    /// Remove all permissions from a directory so listing it fails.
    ///
    /// Returns `false` when the process can still read it anyway (running as
    /// root), in which case the directory is left readable.
    #[cfg(unix)]
    pub fn lock_dir(&mut self, path: &str) -> bool {
        use std::os::unix::fs::PermissionsExt;

        let full_path = self.add_dir(path);
        fs::set_permissions(&full_path, fs::Permissions::from_mode(0o000))
            .expect("Failed to lock dir");
        if fs::read_dir(&full_path).is_ok() {
            fs::set_permissions(&full_path, fs::Permissions::from_mode(0o755))
                .expect("Failed to unlock dir");
            return false;
        }
        self.locked.push(full_path);
        true
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TestTree {
    fn drop(&mut self) {
        self.unlock_all();
    }
}

impl TestTree {
    #[cfg(unix)]
    fn unlock_all(&self) {
        use std::os::unix::fs::PermissionsExt;

        for path in &self.locked {
            let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o755));
        }
    }

    #[cfg(not(unix))]
    fn unlock_all(&self) {}
}
