// Asset path resolution

use super::AssetError;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable overriding the directory assets are loaded from
pub const ASSET_DIR_ENV: &str = "TILE_RUNNER_ASSETS";

/// Extensions the texture loader can decode
const TEXTURE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Asset loader responsible for finding and reading asset files
#[derive(Debug, Clone)]
pub struct AssetLoader {
    base_path: PathBuf,
}

impl AssetLoader {
    /// Create a new asset loader with the given base path
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Loader rooted next to the running executable
    ///
    /// `TILE_RUNNER_ASSETS` takes precedence when set.
    pub fn from_executable_dir() -> Result<Self, AssetError> {
        if let Some(dir) = env::var_os(ASSET_DIR_ENV) {
            return Ok(Self::new(dir));
        }

        let exe = env::current_exe()?;
        let dir = exe
            .parent()
            .ok_or_else(|| AssetError::NotFound(exe.to_string_lossy().to_string()))?;
        Ok(Self::new(dir))
    }

    /// Get the full path for an asset
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        self.base_path.join(name)
    }

    /// Read the bytes of a texture file
    pub fn load_texture_bytes(&self, name: &str) -> Result<Vec<u8>, AssetError> {
        let path = self.resolve_path(name);

        let supported = path
            .extension()
            .map(|ext| TEXTURE_EXTENSIONS.contains(&ext.to_string_lossy().as_ref()))
            .unwrap_or(false);
        if !supported {
            return Err(AssetError::UnsupportedFormat(name.to_string()));
        }

        if !path.exists() {
            return Err(AssetError::NotFound(path.to_string_lossy().to_string()));
        }

        std::fs::read(&path)
            .map_err(|e| AssetError::LoadError(format!("Failed to read {}: {}", name, e)))
    }

    /// Get the base path
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_path_resolution() {
        let loader = AssetLoader::new("/game");
        let path = loader.resolve_path("data/Ground.png");

        assert_eq!(path, PathBuf::from("/game/data/Ground.png"));
        assert_eq!(loader.base_path(), Path::new("/game"));
    }

    #[test]
    fn test_missing_texture() {
        let loader = AssetLoader::new("/definitely/not/here");
        let err = loader.load_texture_bytes("data/Ground.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let loader = AssetLoader::new(".");
        let err = loader.load_texture_bytes("data/level.tmx").unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedFormat(_)));
    }
}
