//! Provides a general interface to the bytes of a physical OPC package.
//!
//! The parser never decompresses anything itself: it asks a [`PartSource`] for
//! part bytes by member name and for the list of member names. Two sources ship
//! with the crate: [`ZipPartSource`] over an in-memory ZIP archive, and
//! [`MemoryPartSource`] over an ordered map, which is convenient for tests and for
//! callers that already unpacked the archive.

use crate::ooxml::opc::error::{OpcError, Result};
use crate::ooxml::opc::packuri::member_name;
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::io::{Cursor, Read};
use std::path::Path;
use zip::ZipArchive;

/// Read-only access to the members of a package.
///
/// Paths are member names without a leading slash (`ppt/slides/slide1.xml`);
/// implementations tolerate a leading slash on input.
pub trait PartSource: Send + Sync {
    /// Read the full contents of a part.
    ///
    /// # Errors
    /// Returns [`OpcError::PartNotFound`] when no member has this name.
    fn read_part(&self, path: &str) -> Result<Vec<u8>>;

    /// All member names in the package, directories excluded.
    fn list_paths(&self) -> Vec<String>;

    /// Member names starting with `prefix`, sorted.
    fn list_paths_matching(&self, prefix: &str) -> Vec<String> {
        let prefix = member_name(prefix);
        let mut paths: Vec<String> = self
            .list_paths()
            .into_iter()
            .filter(|p| p.starts_with(prefix))
            .collect();
        paths.sort();
        paths
    }

    /// Check if a member exists.
    fn contains(&self, path: &str) -> bool {
        let name = member_name(path);
        self.list_paths().iter().any(|p| p == name)
    }

    /// Read a part that may legitimately be absent.
    ///
    /// Missing parts map to `Ok(None)`; every other failure is propagated.
    fn read_optional(&self, path: &str) -> Result<Option<Vec<u8>>> {
        match self.read_part(path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Part source backed by a ZIP archive held in memory.
///
/// The archive handle needs `&mut` to decompress an entry, so it sits behind a
/// mutex; member names are captured once at open time.
pub struct ZipPartSource {
    archive: Mutex<ZipArchive<Cursor<Vec<u8>>>>,
    names: Vec<String>,
}

impl ZipPartSource {
    /// Open a package from a file path.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be read.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let data = std::fs::read(path)?;
        Self::from_bytes(data)
    }

    /// Create a source from owned ZIP bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))?;
        let names = archive
            .file_names()
            .filter(|name| !name.ends_with('/'))
            .map(str::to_string)
            .collect();
        Ok(Self {
            archive: Mutex::new(archive),
            names,
        })
    }

    /// Create a source from a reader.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Get the number of files in the package.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Check if the package is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl PartSource for ZipPartSource {
    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        let name = member_name(path);
        let mut archive = self.archive.lock();
        let mut file = match archive.by_name(name) {
            Ok(file) => file,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(OpcError::PartNotFound(name.to_string()));
            },
            Err(e) => return Err(e.into()),
        };

        let mut data = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut data)?;
        Ok(data)
    }

    fn list_paths(&self) -> Vec<String> {
        self.names.clone()
    }

    fn contains(&self, path: &str) -> bool {
        let name = member_name(path);
        self.names.iter().any(|n| n == name)
    }
}

/// Part source over an ordered in-memory map of member name to bytes.
#[derive(Debug, Clone, Default)]
pub struct MemoryPartSource {
    parts: BTreeMap<String, Vec<u8>>,
}

impl MemoryPartSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a part, builder style.
    pub fn with_part(mut self, path: &str, data: impl Into<Vec<u8>>) -> Self {
        self.insert(path, data);
        self
    }

    /// Add or replace a part.
    pub fn insert(&mut self, path: &str, data: impl Into<Vec<u8>>) {
        self.parts.insert(member_name(path).to_string(), data.into());
    }

    /// Remove a part, returning its bytes if present.
    pub fn remove(&mut self, path: &str) -> Option<Vec<u8>> {
        self.parts.remove(member_name(path))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl PartSource for MemoryPartSource {
    fn read_part(&self, path: &str) -> Result<Vec<u8>> {
        let name = member_name(path);
        self.parts
            .get(name)
            .cloned()
            .ok_or_else(|| OpcError::PartNotFound(name.to_string()))
    }

    fn list_paths(&self) -> Vec<String> {
        self.parts.keys().cloned().collect()
    }

    fn contains(&self, path: &str) -> bool {
        self.parts.contains_key(member_name(path))
    }
}
