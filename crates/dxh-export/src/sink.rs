//! Where rendered transcripts go.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{ExportError, Result};

/// Destination for transcript artifacts.
pub trait ArtifactSink {
    /// Store `content` under `file_name` and return where it ended up.
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf>;
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for &S {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        (**self).write(file_name, content)
    }
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for Box<S> {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        (**self).write(file_name, content)
    }
}

/// Writes transcripts into a directory.
///
/// Existing files are never overwritten: a second transcript within the
/// same second gets a `-2`, `-3`, ... suffix.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

const MAX_SUFFIX: u32 = 1000;

impl ArtifactSink for DirectorySink {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| ExportError::Io {
            operation: "create directory for",
            path: self.dir.clone(),
            source: e,
        })?;

        let (stem, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) => (stem, Some(ext)),
            None => (file_name, None),
        };

        for attempt in 1..=MAX_SUFFIX {
            let candidate = match (attempt, ext) {
                (1, _) => file_name.to_string(),
                (n, Some(ext)) => format!("{stem}-{n}.{ext}"),
                (n, None) => format!("{stem}-{n}"),
            };
            let path = self.dir.join(candidate);

            let file = match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => {
                    return Err(ExportError::Io {
                        operation: "create",
                        path,
                        source: e,
                    });
                }
            };
            fill_or_remove(file, &path, content)?;
            return Ok(path);
        }

        Err(ExportError::Unavailable(format!(
            "too many transcripts named {file_name} in {}",
            self.dir.display()
        )))
    }
}

/// Write `content` into a file just created at `path`. A partial file is
/// removed so the name stays free for the next attempt.
fn fill_or_remove(mut file: impl Write, path: &Path, content: &str) -> Result<()> {
    let written = file
        .write_all(content.as_bytes())
        .and_then(|()| file.flush());
    let Err(source) = written else {
        return Ok(());
    };
    drop(file);
    if let Err(error) = fs::remove_file(path) {
        tracing::warn!(path = %path.display(), %error, "partial transcript left behind");
    }
    Err(ExportError::Io {
        operation: "write",
        path: path.to_path_buf(),
        source,
    })
}

/// Keeps transcripts in memory. Clones share the same entries.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    entries: Arc<Mutex<Vec<(String, String)>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }

    /// `(file_name, content)` pairs in write order.
    pub fn artifacts(&self) -> Vec<(String, String)> {
        self.entries().clone()
    }

    fn entries(&self) -> MutexGuard<'_, Vec<(String, String)>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ArtifactSink for MemorySink {
    fn write(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        self.entries()
            .push((file_name.to_string(), content.to_string()));
        Ok(PathBuf::from(file_name))
    }
}
