//! Destinations for generated artifacts.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Where translated artifacts are persisted.
///
/// Every write reports its own result; a failed write never prevents the caller from seeing which
/// other artifacts made it out.
pub trait ArtifactSink {
    /// Write `contents` under `file_name`, replacing any previous artifact of that name.
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()>;

    /// Human-readable location for logs (a directory path, `<memory>`, ...).
    fn location(&self) -> String;
}

/// Writes artifacts as files inside one output directory.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactSink for DirectorySink {
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        fs::write(self.root.join(file_name), contents)
    }

    fn location(&self) -> String {
        self.root.display().to_string()
    }
}

/// Keeps artifacts in memory. Names listed in `fail_on` return an error instead of being stored.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: BTreeMap<String, String>,
    fail_on: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every write of `file_name` fail with `PermissionDenied`.
    pub fn fail_on(mut self, file_name: impl Into<String>) -> Self {
        self.fail_on.push(file_name.into());
        self
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files.get(file_name).map(String::as_str)
    }

    pub fn files(&self) -> &BTreeMap<String, String> {
        &self.files
    }
}

impl ArtifactSink for MemorySink {
    fn write(&mut self, file_name: &str, contents: &str) -> io::Result<()> {
        if self.fail_on.iter().any(|f| f == file_name) {
            return Err(io::Error::new(
                io::ErrorKind::PermissionDenied,
                format!("writes to {file_name} are rejected"),
            ));
        }
        self.files.insert(file_name.to_owned(), contents.to_owned());
        Ok(())
    }

    fn location(&self) -> String {
        "<memory>".to_owned()
    }
}
