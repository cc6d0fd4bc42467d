//! Durable client storage for small string preferences (the theme key).
//!
//! The file backend keeps a flat TOML table, edited with `toml_edit` so
//! comments and unrelated keys survive, and written via temp file + rename.

use std::{
    collections::HashMap,
    fs, io,
    io::Write,
    path::{Path, PathBuf},
    sync::Mutex,
};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage location is unavailable")]
    Unavailable,
    #[error("storage I/O failed for {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("storage file {} is not valid TOML: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
}

/// String key/value storage that outlives the process.
pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-process storage, used by tests and when no home directory exists.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(self, key: &str, value: &str) -> Self {
        if let Ok(mut values) = self.values.lock() {
            values.insert(key.to_string(), value.to_string());
        }
        self
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Unavailable)?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut values = self.values.lock().map_err(|_| StorageError::Unavailable)?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// TOML file backend, by default `~/.folio/state.toml`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn open_default() -> Result<Self, StorageError> {
        crate::state_path()
            .map(Self::new)
            .ok_or(StorageError::Unavailable)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_document(&self) -> Result<toml_edit::DocumentMut, StorageError> {
        recover_bak_file(&self.path);
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(e) => return Err(self.io_err(e)),
        };
        content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|source| StorageError::Parse {
                path: self.path.clone(),
                source,
            })
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let doc = self.read_document()?;
        Ok(doc
            .get(key)
            .and_then(toml_edit::Item::as_str)
            .map(str::to_string))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
            restrict_dir_permissions(parent);
        }

        let mut doc = self.read_document()?;
        doc[key] = toml_edit::value(value);

        atomic_write(&self.path, doc.to_string().as_bytes()).map_err(|e| self.io_err(e))
    }
}

/// Tighten a directory we own to 0o700 when it is group/other accessible.
#[cfg(unix)]
fn restrict_dir_permissions(dir: &Path) {
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    let Ok(metadata) = fs::metadata(dir) else {
        return;
    };
    let our_uid = unsafe { libc::getuid() };
    if metadata.uid() == our_uid && metadata.permissions().mode() & 0o077 != 0 {
        if let Err(e) = fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
            tracing::debug!(path = %dir.display(), "Failed to restrict directory permissions: {e}");
        }
    }
}

#[cfg(not(unix))]
fn restrict_dir_permissions(_dir: &Path) {}

/// If `path` is gone but `path.bak` exists, a previous write crashed between
/// the backup rename and the final rename. Put the backup back.
fn recover_bak_file(path: &Path) {
    let backup = path.with_extension("bak");
    if !path.exists() && backup.exists() {
        match fs::rename(&backup, path) {
            Ok(()) => tracing::warn!(
                path = %path.display(),
                "Recovered .bak file from interrupted write"
            ),
            Err(e) => tracing::warn!(path = %path.display(), "Failed to recover .bak file: {e}"),
        }
    }
}

/// Write `bytes` to a temp file next to `path`, then rename over it.
///
/// Rename-over-existing fails on Windows, so fall back to backup + rename.
fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;

    if let Err(err) = tmp.persist(path) {
        if !path.exists() {
            return Err(err.error);
        }
        let backup_path = path.with_extension("bak");
        let _ = fs::remove_file(&backup_path);
        fs::rename(path, &backup_path)?;

        if let Err(rename_err) = err.file.persist(path) {
            let _ = fs::rename(&backup_path, path);
            return Err(rename_err.error);
        }
        if let Err(e) = fs::remove_file(&backup_path) {
            tracing::warn!(
                path = %backup_path.display(),
                "Failed to remove .bak after atomic write: {e}"
            );
        }
    }

    Ok(())
}
