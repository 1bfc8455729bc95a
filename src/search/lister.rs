//! Directory listing

use std::fs;
use std::io;
use std::path::Path;

use crate::error::{Result, SearchError};

use super::entry::{Entry, EntryKind};

/// Read the immediate children of `dir`, sorted by file name.
///
/// Kinds come from `DirEntry::file_type`, which does not follow symlinks:
/// a link to a directory is listed as a file and never descended into.
/// Children removed while the directory is being read are left out.
pub fn list_dir(dir: &Path) -> io::Result<Vec<Entry>> {
    let mut children = Vec::new();
    for dir_entry in fs::read_dir(dir)? {
        let Some(dir_entry) = skip_vanished(dir_entry)? else {
            continue;
        };
        let Some(file_type) = skip_vanished(dir_entry.file_type())? else {
            continue;
        };
        let kind = if file_type.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        };
        children.push(Entry {
            name: dir_entry.file_name().to_string_lossy().to_string(),
            path: dir_entry.path(),
            kind,
        });
    }
    children.sort_by(|a, b| a.path.file_name().cmp(&b.path.file_name()));
    Ok(children)
}

fn skip_vanished<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// List the search root, turning every failure into a fatal error.
pub fn list_root(root: &Path) -> Result<Vec<Entry>> {
    let metadata = fs::metadata(root).map_err(|source| SearchError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(SearchError::RootIsFile(root.to_path_buf()));
    }
    list_dir(root).map_err(|source| SearchError::RootUnreadable {
        path: root.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_children_sorted_with_kinds() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.txt"), "").unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("c.txt"), "").unwrap();

        let entries = list_dir(dir.path()).unwrap();
        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b.txt", "c.txt"]);
        assert_eq!(entries[0].kind, EntryKind::Directory);
        assert_eq!(entries[1].kind, EntryKind::File);
        assert_eq!(entries[0].path, dir.path().join("a"));
    }

    #[test]
    fn test_lists_only_immediate_children() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("a/b")).unwrap();
        fs::write(dir.path().join("a/b/deep.txt"), "").unwrap();

        let entries = list_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_vanished_child_is_skipped() {
        let gone = io::Error::new(io::ErrorKind::NotFound, "removed mid-listing");
        assert!(skip_vanished::<()>(Err(gone)).unwrap().is_none());
        assert_eq!(skip_vanished(Ok(3)).unwrap(), Some(3));

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err = skip_vanished::<()>(Err(denied)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    }

    #[test]
    fn test_missing_directory_is_error() {
        let dir = TempDir::new().unwrap();
        assert!(list_dir(&dir.path().join("missing")).is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_listed_as_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("link")).unwrap();

        let entries = list_dir(dir.path()).unwrap();
        let link = entries.iter().find(|e| e.name == "link").unwrap();
        assert_eq!(link.kind, EntryKind::File);
    }

    #[test]
    fn test_root_is_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("plain.txt");
        fs::write(&file, "").unwrap();

        assert!(matches!(list_root(&file), Err(SearchError::RootIsFile(_))));
    }

    #[test]
    fn test_missing_root_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let result = list_root(&dir.path().join("nope"));
        assert!(matches!(result, Err(SearchError::RootUnreadable { .. })));
    }
}
