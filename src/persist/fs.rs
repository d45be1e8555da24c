//! [`Storage`] backed by a directory on the host filesystem (the mounted card).

use std::{
    fs,
    io::{ErrorKind, Read},
    path::{Path, PathBuf},
};

use super::{PersistError, PersistResult, Storage};

/// Maps `/a/b` to `<root>/a/b`.
#[derive(Debug, Clone)]
pub struct FsStorage {
    root: PathBuf,
}

impl FsStorage {
    /// Storage rooted at `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Host directory standing in for `/`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path.trim_start_matches('/'))
    }
}

fn map_not_found(err: std::io::Error, path: &str) -> PersistError {
    if err.kind() == ErrorKind::NotFound {
        PersistError::NotFound(path.to_string())
    } else {
        PersistError::Io(err)
    }
}

impl Storage for FsStorage {
    fn read(&self, path: &str) -> PersistResult<Vec<u8>> {
        fs::read(self.resolve(path)).map_err(|e| map_not_found(e, path))
    }

    fn read_prefix(&self, path: &str, max_len: usize) -> PersistResult<Vec<u8>> {
        let file = fs::File::open(self.resolve(path)).map_err(|e| map_not_found(e, path))?;
        let mut out = Vec::new();
        file.take(max_len as u64).read_to_end(&mut out)?;
        Ok(out)
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> PersistResult<()> {
        let full = self.resolve(path);
        if let Some(parent) = full.parent() {
            if !parent.is_dir() {
                return Err(PersistError::MissingParent(path.to_string()));
            }
        }
        fs::write(full, bytes)?;
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.resolve(path).exists()
    }

    fn mkdir(&mut self, path: &str) -> PersistResult<()> {
        fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }
}
