// Asset management system
//
// Resolves asset paths and hands out non-owning handles to loaded textures.
// The textures themselves are owned by the renderer's texture manager.

mod handle;
mod loader;

pub use handle::{AssetHandle, AssetId, TextureHandle};
pub use loader::AssetLoader;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Unsupported asset format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to load asset: {0}")]
    LoadError(String),

    #[error("Texture is not loaded: {0:?}")]
    Unloaded(AssetId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can turn an asset path into a texture handle
///
/// Implemented by the GPU texture manager; game code only ever binds the
/// returned handles to objects.
pub trait TextureLoader {
    fn load_texture(&mut self, path: &str) -> anyhow::Result<TextureHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_error_display() {
        let err = AssetError::NotFound("Ground.png".to_string());
        assert_eq!(err.to_string(), "Asset not found: Ground.png");
    }
}
