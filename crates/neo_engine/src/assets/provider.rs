//! Resource providers resolve named resource paths to bytes

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::assets::AssetError;

/// Source of raw resource bytes
///
/// Implementations are called from loader worker threads.
pub trait ResourceProvider: Send + Sync {
    /// Fetch the bytes stored under `path`
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError>;
}

/// Resolves resource paths under a root directory
#[derive(Debug, Clone)]
pub struct FileResourceProvider {
    root: PathBuf,
}

impl FileResourceProvider {
    /// Provider reading from `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceProvider for FileResourceProvider {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        let full_path = self.root.join(path);
        log::debug!("Reading resource {:?}", full_path);
        std::fs::read(&full_path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(path.to_string()),
            _ => AssetError::Io(e),
        })
    }
}

/// In-memory resources keyed by path
#[derive(Debug, Clone, Default)]
pub struct MemoryResourceProvider {
    resources: HashMap<String, Vec<u8>>,
}

impl MemoryResourceProvider {
    /// Empty provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `bytes` under `path`
    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.resources.insert(path.into(), bytes.into());
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl ResourceProvider for MemoryResourceProvider {
    fn fetch(&self, path: &str) -> Result<Vec<u8>, AssetError> {
        self.resources
            .get(path)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(path.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_provider_lookup() {
        let provider = MemoryResourceProvider::new().with("neo_texture.jpg", vec![1, 2, 3]);

        assert_eq!(provider.fetch("neo_texture.jpg").unwrap(), vec![1, 2, 3]);
        assert!(matches!(provider.fetch("earth_texture.jpg"), Err(AssetError::NotFound(_))));
    }

    #[test]
    fn test_file_provider_reads_under_root() {
        let root = std::env::temp_dir().join(format!("neo_engine_provider_{}", std::process::id()));
        std::fs::create_dir_all(&root).unwrap();
        std::fs::write(root.join("earth_texture.jpg"), b"bytes").unwrap();

        let provider = FileResourceProvider::new(&root);
        let found = provider.fetch("earth_texture.jpg");
        let missing = provider.fetch("missing.jpg");
        std::fs::remove_dir_all(&root).unwrap();

        assert_eq!(found.unwrap(), b"bytes".to_vec());
        assert!(matches!(missing, Err(AssetError::NotFound(path)) if path == "missing.jpg"));
    }
}
