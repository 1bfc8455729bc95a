//! Structured (JSON lines) match output

use std::io::Write;

use crate::error::SinkError;
use crate::search::{Entry, MatchSink};

/// Writes one `{"name", "path", "type"}` record per line.
pub struct JsonSink<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> MatchSink for JsonSink<W> {
    fn emit(&mut self, entry: &Entry) -> Result<(), SinkError> {
        // Serialize first so a failure never leaves half a record behind.
        let json = serde_json::to_string(entry)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), SinkError> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::EntryKind;
    use std::path::Path;

    #[test]
    fn test_one_record_per_line() {
        let mut sink = JsonSink::new(Vec::new());
        sink.emit(&Entry::new(Path::new("/a"), "b.txt", EntryKind::File))
            .unwrap();
        sink.emit(&Entry::new(Path::new("/a"), "c", EntryKind::Directory))
            .unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["name"], "b.txt");
        assert_eq!(lines[0]["path"], "/a/b.txt");
        assert_eq!(lines[0]["type"], "file");
        assert_eq!(lines[1]["type"], "directory");
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_fails_without_output() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let entry = Entry {
            name: "bad".to_string(),
            path: Path::new("/a").join(OsStr::from_bytes(b"bad\xff")),
            kind: EntryKind::File,
        };
        let mut sink = JsonSink::new(Vec::new());
        assert!(matches!(sink.emit(&entry), Err(SinkError::Serialize(_))));
        assert!(sink.into_inner().is_empty());
    }
}
