//! Asset access for design documents, fonts, and image decorations

use std::collections::HashMap;
use std::path::PathBuf;

use tailor_config::AssetConfig;

use crate::error::SurfaceError;

/// Source of asset bytes keyed by catalog-style paths (`/designs/a.svg`).
pub trait AssetSource {
    fn read(&self, path: &str) -> Result<Vec<u8>, SurfaceError>;
}

/// Reads assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct FsAssets {
    config: AssetConfig,
}

impl FsAssets {
    pub fn new(config: AssetConfig) -> Self {
        Self { config }
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(AssetConfig {
            root: root.into(),
            ..Default::default()
        })
    }
}

impl AssetSource for FsAssets {
    fn read(&self, path: &str) -> Result<Vec<u8>, SurfaceError> {
        let full = self.config.resolve(path);
        std::fs::read(&full).map_err(|e| SurfaceError::Asset {
            path: full.display().to_string(),
            reason: e.to_string(),
        })
    }
}

/// In-memory assets, used by embedders that bundle their content.
#[derive(Debug, Clone, Default)]
pub struct MemoryAssets {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryAssets {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        self.files.insert(path.into(), bytes.into());
    }

    pub fn with(mut self, path: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl AssetSource for MemoryAssets {
    fn read(&self, path: &str) -> Result<Vec<u8>, SurfaceError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| SurfaceError::Asset {
                path: path.to_string(),
                reason: "not found".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_assets_lookup() {
        let assets = MemoryAssets::new().with("/designs/a.svg", b"<svg/>".to_vec());
        assert_eq!(assets.read("/designs/a.svg").unwrap(), b"<svg/>");
        assert!(matches!(
            assets.read("/designs/missing.svg"),
            Err(SurfaceError::Asset { .. })
        ));
    }

    #[test]
    fn test_fs_assets_missing_file() {
        let assets = FsAssets::with_root("/nonexistent-tailor-root");
        assert!(assets.read("/designs/a.svg").is_err());
    }
}
