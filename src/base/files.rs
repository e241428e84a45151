//! File identifiers and the path registry.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use parking_lot::RwLock;

/// An interned identifier for a source file.
///
/// `FileId` is a lightweight handle (just a u32) that uniquely identifies
/// a file within the workspace. The actual path is stored in a [`FileSet`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct FileId(pub u32);

impl FileId {
    /// Create a new FileId from a raw index.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw index.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FileId({})", self.0)
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// Manages the mapping between file paths and [`FileId`]s.
///
/// Ids are assigned on first sight of a path and stay stable for the
/// lifetime of the set, so a re-indexed document keeps its identity.
/// Thread-safe via internal locking.
#[derive(Debug, Default)]
pub struct FileSet {
    inner: RwLock<FileSetInner>,
}

#[derive(Debug, Default)]
struct FileSetInner {
    /// Path → FileId mapping
    path_to_id: IndexMap<PathBuf, FileId>,
    /// FileId → Path mapping (reverse lookup)
    id_to_path: IndexMap<FileId, PathBuf>,
    /// Next FileId to assign
    next_id: u32,
}

impl FileSet {
    /// Create a new empty file set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create a FileId for a path.
    pub fn file_id(&self, path: &Path) -> FileId {
        // Fast path: read lock
        {
            let inner = self.inner.read();
            if let Some(&id) = inner.path_to_id.get(path) {
                return id;
            }
        }

        // Slow path: write lock
        let mut inner = self.inner.write();

        // Double-check after acquiring the write lock
        if let Some(&id) = inner.path_to_id.get(path) {
            return id;
        }

        let id = FileId::new(inner.next_id);
        inner.next_id += 1;
        inner.path_to_id.insert(path.to_owned(), id);
        inner.id_to_path.insert(id, path.to_owned());
        id
    }

    /// Look up the FileId for a path without creating one.
    pub fn get(&self, path: &Path) -> Option<FileId> {
        self.inner.read().path_to_id.get(path).copied()
    }

    /// Get the path for a FileId.
    pub fn path(&self, file: FileId) -> Option<PathBuf> {
        self.inner.read().id_to_path.get(&file).cloned()
    }

    /// Get the number of registered files.
    pub fn len(&self) -> usize {
        self.inner.read().path_to_id.len()
    }

    /// Check if the file set is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered file ids, in registration order.
    pub fn files(&self) -> Vec<FileId> {
        self.inner.read().id_to_path.keys().copied().collect()
    }
}
