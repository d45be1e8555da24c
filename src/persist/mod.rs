/// Binary layout of save files and the day counter.
pub mod codec;
/// Filesystem-backed storage.
pub mod fs;
/// In-memory storage.
pub mod memory;

use thiserror::Error;

pub use codec::CodecError;

/// Directory holding the app's private files on the card.
pub const DEFAULT_DATA_DIR: &str = "/.crosspoint";
/// Persisted boot-day counter.
pub const DAY_FILE_NAME: &str = "flashcard_day.bin";

/// Failures of the storage layer.
#[derive(Debug, Error)]
pub enum PersistError {
    /// Underlying I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// No file at the path.
    #[error("file not found: {0}")]
    NotFound(String),
    /// Writes are refused by the backend.
    #[error("storage is read-only: {0}")]
    ReadOnly(String),
    /// The target's directory does not exist.
    #[error("missing parent directory for {0}")]
    MissingParent(String),
    /// Malformed JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    /// Malformed binary file.
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
}

/// Result alias for storage operations.
pub type PersistResult<T> = Result<T, PersistError>;

/// Byte-oriented file storage, addressed by absolute `/`-separated paths.
pub trait Storage: Send {
    /// Reads the whole file.
    fn read(&self, path: &str) -> PersistResult<Vec<u8>>;

    /// Reads at most `max_len` bytes from the start of the file.
    fn read_prefix(&self, path: &str, max_len: usize) -> PersistResult<Vec<u8>> {
        let mut bytes = self.read(path)?;
        bytes.truncate(max_len);
        Ok(bytes)
    }

    /// Replaces the file's contents. The parent directory must exist.
    fn write(&mut self, path: &str, bytes: &[u8]) -> PersistResult<()>;

    /// True when a file or directory exists at `path`.
    fn exists(&self, path: &str) -> bool;

    /// Creates `path` and any missing ancestors.
    fn mkdir(&mut self, path: &str) -> PersistResult<()>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn read(&self, path: &str) -> PersistResult<Vec<u8>> {
        (**self).read(path)
    }

    fn read_prefix(&self, path: &str, max_len: usize) -> PersistResult<Vec<u8>> {
        (**self).read_prefix(path, max_len)
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> PersistResult<()> {
        (**self).write(path, bytes)
    }

    fn exists(&self, path: &str) -> bool {
        (**self).exists(path)
    }

    fn mkdir(&mut self, path: &str) -> PersistResult<()> {
        (**self).mkdir(path)
    }
}

/// djb2 string hash (`h * 33 + byte`, seeded with 5381, wrapping at 32 bits).
pub fn djb2(bytes: &[u8]) -> u32 {
    bytes.iter().fold(5381u32, |h, b| {
        h.wrapping_shl(5).wrapping_add(h).wrapping_add(u32::from(*b))
    })
}

/// Review-state save file for the deck at `deck_path`.
pub fn save_file_path(data_dir: &str, deck_path: &str) -> String {
    format!(
        "{}/flashcards_{}.bin",
        data_dir.trim_end_matches('/'),
        djb2(deck_path.as_bytes())
    )
}

/// Day-counter file inside `data_dir`.
pub fn day_file_path(data_dir: &str) -> String {
    format!("{}/{}", data_dir.trim_end_matches('/'), DAY_FILE_NAME)
}

/// Directory part of `path`, or `None` for files at the root.
pub fn parent_dir(path: &str) -> Option<&str> {
    match path.rfind('/') {
        Some(0) | None => None,
        Some(pos) => Some(&path[..pos]),
    }
}

/// Writes `bytes` to `path`, creating the parent directory first.
pub fn write_with_parent(storage: &mut dyn Storage, path: &str, bytes: &[u8]) -> PersistResult<()> {
    if let Some(dir) = parent_dir(path) {
        storage.mkdir(dir)?;
    }
    storage.write(path, bytes)
}
