// File: src/persistence.rs
use crate::core::types::Profile;
use crate::error::StoreError;
use crate::growth::GrowthState;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Where the profile and the viewer state live. Paths are always explicit so
/// tests can swap the filesystem for [`MemoryStore`].
pub trait Store {
    /// Reads a whole document, `Ok(None)` if it does not exist.
    fn read(&self, path: &Path) -> io::Result<Option<String>>;
    /// Replaces the document in one step: readers see the old or the new
    /// contents, never a partial write.
    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
    /// Overwrites the document in place.
    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl Store for FileStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let parent_dir = parent_of(path);
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)?;
        {
            let mut writer = BufWriter::new(&temp_file);
            writer.write_all(contents)?;
            writer.flush()?;
        }
        temp_file.persist(path).map_err(|e| e.error)?;
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::create_dir_all(parent_of(path))?;
        fs::write(path, contents)
    }
}

fn parent_of(path: &Path) -> &Path {
    match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    }
}

/// An in-process store keyed by path.
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RefCell<BTreeMap<PathBuf, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, path: impl Into<PathBuf>, contents: impl Into<String>) {
        self.files.borrow_mut().insert(path.into(), contents.into());
    }

    pub fn get(&self, path: &Path) -> Option<String> {
        self.files.borrow().get(path).cloned()
    }
}

impl Store for MemoryStore {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        Ok(self.get(path))
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        self.write(path, contents)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let text = String::from_utf8(contents.to_vec())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        self.insert(path, text);
        Ok(())
    }
}

impl<S: Store + ?Sized> Store for &S {
    fn read(&self, path: &Path) -> io::Result<Option<String>> {
        (**self).read(path)
    }

    fn write_atomic(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write_atomic(path, contents)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        (**self).write(path, contents)
    }
}

/// Reads and parses a document. `Ok(None)` when it does not exist.
fn read_json<T: DeserializeOwned>(store: &impl Store, path: &Path) -> Result<Option<T>, StoreError> {
    match store.read(path)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Reads a document, falling back to the default when it is missing,
/// unreadable or malformed.
fn load_or_default<T: DeserializeOwned + Default>(store: &impl Store, path: &Path) -> T {
    match read_json(store, path) {
        Ok(Some(value)) => value,
        Ok(None) => {
            debug!("{} not found, starting empty", path.display());
            T::default()
        }
        Err(e) => {
            warn!("ignoring unusable {}: {}", path.display(), e);
            T::default()
        }
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<Vec<u8>, StoreError> {
    Ok(serde_json::to_vec_pretty(value)?)
}

/// Loads the profile for learning. Anything short of a valid document yields
/// an empty profile.
pub fn load_profile(store: &impl Store, path: &Path) -> Profile {
    load_or_default(store, path)
}

/// Loads the profile for reporting. A missing file is `Ok(None)`; a malformed
/// one is an error the caller may choose to absorb.
pub fn read_profile(store: &impl Store, path: &Path) -> Result<Option<Profile>, StoreError> {
    read_json(store, path)
}

/// Writes the profile with 2-space indentation via temp file and rename.
pub fn save_profile(store: &impl Store, path: &Path, profile: &Profile) -> Result<(), StoreError> {
    let bytes = to_pretty_json(profile)?;
    store.write_atomic(path, &bytes)?;
    debug!("saved profile to {}", path.display());
    Ok(())
}

pub fn load_growth_state(store: &impl Store, path: &Path) -> GrowthState {
    load_or_default(store, path)
}

/// Overwrites the viewer state in full. Not atomic: a torn write reads back as
/// an empty state.
pub fn save_growth_state(store: &impl Store, path: &Path, state: &GrowthState) -> Result<(), StoreError> {
    let bytes = to_pretty_json(state)?;
    store.write(path, &bytes)?;
    debug!("saved viewer state to {}", path.display());
    Ok(())
}
