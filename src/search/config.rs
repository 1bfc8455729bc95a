//! Search configuration, resolved once before the search starts

use std::path::{Component, Path, PathBuf};

use crate::error::{Result, SearchError};

/// How matches are written to the output sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// `[+] <path>` lines
    #[default]
    Text,
    /// One JSON record per line
    Json,
}

/// Immutable configuration shared by every worker and the collector.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Absolute search root
    pub root: PathBuf,
    pub query: String,
    pub format: OutputFormat,
    /// Threads in the worker pool.
    /// 0 = auto-detect (one per core)
    /// N = use N worker threads
    pub workers: usize,
}

impl SearchConfig {
    /// Build a config from raw command-line values.
    ///
    /// An empty root means the home directory; a relative root is made
    /// absolute against the current directory. The result is cleaned
    /// lexically. An empty query falls back to `positional`.
    pub fn resolve(
        root: &Path,
        query: &str,
        positional: Option<&str>,
        format: OutputFormat,
    ) -> Result<Self> {
        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .map(PathBuf::from);
        Ok(Self {
            root: resolve_root(root, home)?,
            query: resolve_query(query, positional)?,
            format,
            workers: 0,
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }
}

fn resolve_root(root: &Path, home: Option<PathBuf>) -> Result<PathBuf> {
    let absolute = if root.as_os_str().is_empty() {
        home.ok_or(SearchError::HomeUnresolved)?
    } else {
        std::path::absolute(root).map_err(SearchError::CurrentDir)?
    };
    Ok(clean(&absolute))
}

/// Drop `.` components and fold `..` into its parent without touching the
/// filesystem, so symlinks are not followed. `..` above the root stays at
/// the root.
fn clean(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            _ => parts.push(component),
        }
    }
    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

fn resolve_query(query: &str, positional: Option<&str>) -> Result<String> {
    let query = if query.is_empty() {
        positional.unwrap_or_default()
    } else {
        query
    };
    if query.is_empty() {
        return Err(SearchError::NoQuery);
    }
    Ok(query.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_root_uses_home() {
        let root = resolve_root(Path::new(""), Some(PathBuf::from("/home/u"))).unwrap();
        assert_eq!(root, PathBuf::from("/home/u"));
    }

    #[test]
    fn test_empty_root_without_home_is_fatal() {
        assert!(matches!(
            resolve_root(Path::new(""), None),
            Err(SearchError::HomeUnresolved)
        ));
    }

    #[test]
    fn test_relative_root_becomes_absolute() {
        let root = resolve_root(Path::new("some/dir"), None).unwrap();
        assert!(root.is_absolute());
        assert!(root.ends_with("some/dir"));
        assert_eq!(root, std::env::current_dir().unwrap().join("some/dir"));
    }

    #[test]
    fn test_absolute_root_kept() {
        let root = resolve_root(Path::new("/srv/data"), None).unwrap();
        assert_eq!(root, PathBuf::from("/srv/data"));
    }

    #[test]
    fn test_root_is_cleaned() {
        let cases = [
            ("/a/./b//c", "/a/b/c"),
            ("/a/b/../c", "/a/c"),
            ("/a/b/../../..", "/"),
            ("/tmp//x/", "/tmp/x"),
        ];
        for (raw, want) in cases {
            let root = resolve_root(Path::new(raw), None).unwrap();
            assert_eq!(root, PathBuf::from(want), "{}", raw);
        }
    }

    #[test]
    fn test_relative_parent_root_is_cleaned() {
        let root = resolve_root(Path::new("../x"), None).unwrap();
        let cwd = std::env::current_dir().unwrap();
        let expected = cwd.parent().unwrap_or(&cwd).join("x");
        assert_eq!(root, expected);
        assert!(!root.components().any(|c| c == Component::ParentDir));
    }

    #[test]
    fn test_home_root_is_cleaned() {
        let root = resolve_root(Path::new(""), Some(PathBuf::from("/home/./u/"))).unwrap();
        assert_eq!(root, PathBuf::from("/home/u"));
    }

    #[test]
    fn test_query_flag_wins_over_positional() {
        assert_eq!(resolve_query("flag", Some("pos")).unwrap(), "flag");
    }

    #[test]
    fn test_query_falls_back_to_positional() {
        assert_eq!(resolve_query("", Some("pos")).unwrap(), "pos");
    }

    #[test]
    fn test_missing_query_is_fatal() {
        assert!(matches!(resolve_query("", None), Err(SearchError::NoQuery)));
        assert!(matches!(
            resolve_query("", Some("")),
            Err(SearchError::NoQuery)
        ));
    }

    #[test]
    fn test_resolve_defaults() {
        let config =
            SearchConfig::resolve(Path::new("/tmp"), "q", None, OutputFormat::Json).unwrap();
        assert_eq!(config.root, PathBuf::from("/tmp"));
        assert_eq!(config.query, "q");
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.workers, 0);
        assert_eq!(config.with_workers(3).workers, 3);
    }
}
