// Type-safe asset handle system

use std::marker::PhantomData;

/// Unique identifier for an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetId(pub(crate) u64);

impl AssetId {
    /// Create a new asset ID from a string path
    pub fn from_path(path: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        path.hash(&mut hasher);
        Self(hasher.finish())
    }
}

/// Type-safe, non-owning handle to a loaded asset
///
/// Handles are plain ids: the asset itself stays owned by whoever loaded it,
/// and a handle must not be used after that owner has unloaded its assets.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct AssetHandle<T> {
    pub(crate) id: AssetId,
    _phantom: PhantomData<T>,
}

// Manual impls so handles stay Copy regardless of the marker type
impl<T> Clone for AssetHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for AssetHandle<T> {}

impl<T> AssetHandle<T> {
    /// Create a new asset handle
    pub(crate) fn new(id: AssetId) -> Self {
        Self {
            id,
            _phantom: PhantomData,
        }
    }

    /// Get the underlying asset ID
    pub fn id(&self) -> AssetId {
        self.id
    }
}

// Marker type for texture assets
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct TextureAsset;

/// Convenience type alias
pub type TextureHandle = AssetHandle<TextureAsset>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_asset_id_from_path() {
        let id1 = AssetId::from_path("data/Sprite-0001.png");
        let id2 = AssetId::from_path("data/Sprite-0001.png");
        let id3 = AssetId::from_path("data/Run-sheet.png");

        assert_eq!(id1, id2, "Same paths should produce same IDs");
        assert_ne!(id1, id3, "Different paths should produce different IDs");
    }

    #[test]
    fn test_handles_are_copy() {
        let handle: TextureHandle = AssetHandle::new(AssetId::from_path("data/Ground.png"));
        let copy = handle;

        // Both remain usable after the copy
        assert_eq!(handle, copy);
        assert_eq!(handle.id(), copy.id());
    }
}
