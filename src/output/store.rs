use std::{
    collections::BTreeMap,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::foundation::error::{HabitError, HabitResult};

/// Flat namespace of generated files.
///
/// The publisher only ever lists, writes, removes and locates whole files by name, so the
/// retention policy can run against a directory or an in-memory map alike.
pub trait ArtifactStore {
    /// Names of every entry currently in the store.
    fn list(&self) -> HabitResult<Vec<String>>;

    /// Create or replace `name` with `bytes`.
    fn write(&mut self, name: &str, bytes: &[u8]) -> HabitResult<()>;

    /// Delete `name`. Implementations report a missing entry as [`ErrorKind::NotFound`].
    fn remove(&mut self, name: &str) -> std::io::Result<()>;

    /// Absolute location of `name`, as handed to external collaborators.
    fn locate(&self, name: &str) -> PathBuf;
}

/// Store backed by a single filesystem directory.
#[derive(Clone, Debug)]
pub struct DirArtifactStore {
    root: PathBuf,
}

impl DirArtifactStore {
    /// Use `root` (made absolute against the current directory) as the output directory.
    pub fn new(root: impl AsRef<Path>) -> HabitResult<Self> {
        let root = std::path::absolute(root.as_ref()).map_err(|e| {
            HabitError::output(format!(
                "resolve output dir '{}': {e}",
                root.as_ref().display()
            ))
        })?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ArtifactStore for DirArtifactStore {
    fn list(&self) -> HabitResult<Vec<String>> {
        let rd = std::fs::read_dir(&self.root).map_err(|e| {
            HabitError::output(format!("list '{}': {e}", self.root.display()))
        })?;

        let mut names = Vec::new();
        for entry in rd.flatten() {
            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }
            if let Some(name) = entry.file_name().to_str() {
                names.push(name.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> HabitResult<()> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            HabitError::output(format!("create output dir '{}': {e}", self.root.display()))
        })?;
        let path = self.locate(name);
        std::fs::write(&path, bytes)
            .map_err(|e| HabitError::output(format!("write '{}': {e}", path.display())))
    }

    fn remove(&mut self, name: &str) -> std::io::Result<()> {
        std::fs::remove_file(self.locate(name))
    }

    fn locate(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

/// In-memory store for exercising retention without touching disk.
#[derive(Clone, Debug, Default)]
pub struct MemoryArtifactStore {
    files: BTreeMap<String, Vec<u8>>,
    /// Names whose removal fails with `PermissionDenied`.
    pub locked: Vec<String>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &str, bytes: Vec<u8>) {
        self.files.insert(name.to_owned(), bytes);
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> Vec<String> {
        self.files.keys().cloned().collect()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn list(&self) -> HabitResult<Vec<String>> {
        Ok(self.names())
    }

    fn write(&mut self, name: &str, bytes: &[u8]) -> HabitResult<()> {
        self.insert(name, bytes.to_vec());
        Ok(())
    }

    fn remove(&mut self, name: &str) -> std::io::Result<()> {
        if self.locked.iter().any(|n| n == name) {
            return Err(std::io::Error::new(ErrorKind::PermissionDenied, "locked"));
        }
        match self.files.remove(name) {
            Some(_) => Ok(()),
            None => Err(std::io::Error::new(ErrorKind::NotFound, "no such artifact")),
        }
    }

    fn locate(&self, name: &str) -> PathBuf {
        Path::new("/memory").join(name)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/output/store.rs"]
mod tests;
