//! Entry type produced by directory listings

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Kind of a filesystem object, fixed at listing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    File,
    Directory,
}

/// A single filesystem object discovered during traversal.
///
/// Serializes to the structured output record `{"name", "path", "type"}`.
/// Paths that are not valid UTF-8 fail to serialize; the collector reports
/// that as an emission warning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    #[serde(rename = "type")]
    pub kind: EntryKind,
}

impl Entry {
    /// Build an entry for `name` inside `parent`.
    pub fn new(parent: &Path, name: impl Into<String>, kind: EntryKind) -> Self {
        let name = name.into();
        Self {
            path: parent.join(&name),
            name,
            kind,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }

    /// Case-sensitive substring test against the full path.
    pub fn matches(&self, query: &str) -> bool {
        self.path.to_string_lossy().contains(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_joins_parent() {
        let entry = Entry::new(Path::new("/data"), "apple.txt", EntryKind::File);
        assert_eq!(entry.path, PathBuf::from("/data/apple.txt"));
        assert_eq!(entry.name, "apple.txt");
        assert!(!entry.is_dir());
    }

    #[test]
    fn test_matches_is_case_sensitive_substring() {
        let entry = Entry::new(Path::new("/data/fruits"), "Apple-pie.txt", EntryKind::File);
        assert!(entry.matches("fruits/Apple"));
        assert!(entry.matches("pie"));
        assert!(!entry.matches("apple-pie"));
    }

    #[test]
    fn test_matches_parent_component() {
        // The query is tested against the whole path, not just the name
        let entry = Entry::new(Path::new("/data/apple"), "core.txt", EntryKind::File);
        assert!(entry.matches("apple"));
    }

    #[test]
    fn test_serializes_type_field() {
        let entry = Entry::new(Path::new("/data"), "fruits", EntryKind::Directory);
        let json = serde_json::to_string(&entry).unwrap();
        assert_eq!(
            json,
            r#"{"name":"fruits","path":"/data/fruits","type":"directory"}"#
        );
    }
}
