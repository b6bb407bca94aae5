//! Locating and reading compiled-unit metadata.

use std::path::{Path, PathBuf};

use rustc_hash::FxHashMap;
use thiserror::Error;

use super::AssemblyMetadata;

/// File extension of compiled-unit metadata.
pub const ASSEMBLY_EXTENSION: &str = "kasm";

/// Failure to read a located compiled unit.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed assembly metadata: {0}")]
    Decode(#[from] bincode::Error),

    #[error("unit declares itself as `{found}`, expected `{expected}`")]
    NameMismatch { expected: String, found: String },
}

/// File name a reference is stored under. A reference that already
/// carries an extension is used verbatim.
pub fn file_name(reference: &str) -> String {
    if Path::new(reference).extension().is_some() {
        reference.to_string()
    } else {
        format!("{reference}.{ASSEMBLY_EXTENSION}")
    }
}

/// Source of compiled-unit metadata.
pub trait AssemblyLoader {
    /// Find the unit for `reference`. First match wins.
    fn locate(&self, reference: &str) -> Option<PathBuf>;

    /// Read and decode a located unit.
    fn load(&self, path: &Path) -> Result<AssemblyMetadata, LoadError>;
}

/// Loads units from ordered search directories.
#[derive(Clone, Debug, Default)]
pub struct FileSystemLoader {
    search_paths: Vec<PathBuf>,
}

impl FileSystemLoader {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        FileSystemLoader { search_paths }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }
}

impl AssemblyLoader for FileSystemLoader {
    fn locate(&self, reference: &str) -> Option<PathBuf> {
        let name = file_name(reference);
        let found = self
            .search_paths
            .iter()
            .map(|dir| dir.join(&name))
            .find(|candidate| candidate.is_file());
        tracing::debug!(
            reference,
            searched = self.search_paths.len(),
            found = ?found,
            "assembly lookup"
        );
        found
    }

    fn load(&self, path: &Path) -> Result<AssemblyMetadata, LoadError> {
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(AssemblyMetadata::decode(&bytes)?)
    }
}

/// Loads units from memory, keyed by file name.
///
/// For tooling that already holds metadata, and for tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryLoader {
    units: FxHashMap<PathBuf, Vec<u8>>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a unit under its own name.
    pub fn insert(&mut self, metadata: &AssemblyMetadata) -> Result<(), bincode::Error> {
        let bytes = metadata.encode()?;
        self.insert_bytes(&metadata.name, bytes);
        Ok(())
    }

    /// Register raw bytes for `reference`, valid or not.
    pub fn insert_bytes(&mut self, reference: &str, bytes: Vec<u8>) {
        self.units.insert(PathBuf::from(file_name(reference)), bytes);
    }
}

impl AssemblyLoader for MemoryLoader {
    fn locate(&self, reference: &str) -> Option<PathBuf> {
        let path = PathBuf::from(file_name(reference));
        self.units.contains_key(&path).then_some(path)
    }

    fn load(&self, path: &Path) -> Result<AssemblyMetadata, LoadError> {
        let bytes = self.units.get(path).ok_or_else(|| LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        })?;
        Ok(AssemblyMetadata::decode(bytes)?)
    }
}
