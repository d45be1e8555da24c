//! In-memory [`Storage`] for tests and host-side simulation.

use hashbrown::{HashMap, HashSet};

use super::{PersistError, PersistResult, Storage, parent_dir};

/// Files and directories held in hash maps.
#[derive(Debug, Default, Clone)]
pub struct MemStorage {
    files: HashMap<String, Vec<u8>>,
    dirs: HashSet<String>,
    read_only: bool,
}

impl MemStorage {
    /// Empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a file, creating its ancestors. Ignores the read-only switch.
    pub fn with_file(mut self, path: &str, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert_dirs(parent_dir(path));
        self.files.insert(path.to_string(), bytes.into());
        self
    }

    /// Makes every later `write` and `mkdir` fail, like a full or locked card.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Contents of `path`, if present.
    pub fn file(&self, path: &str) -> Option<&[u8]> {
        self.files.get(path).map(Vec::as_slice)
    }

    /// Deletes `path`, returning its contents.
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.files.remove(path)
    }

    /// Number of stored files.
    pub fn file_count(&self) -> usize {
        self.files.len()
    }

    fn insert_dirs(&mut self, dir: Option<&str>) {
        let mut next = dir;
        while let Some(d) = next {
            if !self.dirs.insert(d.to_string()) {
                break;
            }
            next = parent_dir(d);
        }
    }
}

impl Storage for MemStorage {
    fn read(&self, path: &str) -> PersistResult<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| PersistError::NotFound(path.to_string()))
    }

    fn write(&mut self, path: &str, bytes: &[u8]) -> PersistResult<()> {
        if self.read_only {
            return Err(PersistError::ReadOnly(path.to_string()));
        }
        if let Some(dir) = parent_dir(path) {
            if !self.dirs.contains(dir) {
                return Err(PersistError::MissingParent(path.to_string()));
            }
        }
        self.files.insert(path.to_string(), bytes.to_vec());
        Ok(())
    }

    fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path) || self.dirs.contains(path)
    }

    fn mkdir(&mut self, path: &str) -> PersistResult<()> {
        if self.read_only {
            return Err(PersistError::ReadOnly(path.to_string()));
        }
        self.insert_dirs(Some(path.trim_end_matches('/')));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_requires_parent_directory() {
        let mut storage = MemStorage::new();
        assert!(matches!(
            storage.write("/.crosspoint/a.bin", b"x"),
            Err(PersistError::MissingParent(_))
        ));
        storage.mkdir("/.crosspoint").expect("mkdir");
        storage.write("/.crosspoint/a.bin", b"x").expect("write");
        assert_eq!(storage.file("/.crosspoint/a.bin"), Some(&b"x"[..]));
    }

    #[test]
    fn read_only_rejects_writes_but_serves_reads() {
        let mut storage = MemStorage::new().with_file("/apps/deck.tsv", "a\tb");
        storage.set_read_only(true);
        assert!(storage.mkdir("/.crosspoint").is_err());
        assert!(storage.write("/apps/other.tsv", b"").is_err());
        assert_eq!(storage.read_prefix("/apps/deck.tsv", 2).expect("read"), b"a\t");
    }

    #[test]
    fn nested_mkdir_registers_ancestors() {
        let mut storage = MemStorage::new();
        storage.mkdir("/a/b/c").expect("mkdir");
        assert!(storage.exists("/a"));
        assert!(storage.exists("/a/b"));
        assert!(!storage.exists("/a/b/c/d"));
    }
}
