//! Loaded-asset lookup.

use rustc_hash::FxHashSet;

use super::AssetManifest;
use crate::core::AssetError;

/// Resolves aliases to loaded resources.
///
/// The core never holds textures itself: it refers to them by alias and
/// the renderer draws whatever is registered under that alias. The catalog
/// only answers whether the alias is ready.
pub trait AssetCatalog {
    fn is_loaded(&self, alias: &str) -> bool;

    fn require(&self, alias: &str) -> Result<(), AssetError> {
        if self.is_loaded(alias) {
            Ok(())
        } else {
            log::warn!("asset '{}' requested before it was loaded", alias);
            Err(AssetError::Missing(alias.to_owned()))
        }
    }
}

/// Catalog backed by a set of loaded aliases.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    loaded: FxHashSet<String>,
}

impl MemoryCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A catalog with every alias in the manifest marked loaded.
    #[must_use]
    pub fn fully_loaded(manifest: &AssetManifest) -> Self {
        let mut catalog = Self::new();
        for alias in manifest.aliases() {
            catalog.mark_loaded(alias);
        }
        catalog
    }

    pub fn mark_loaded(&mut self, alias: &str) {
        self.loaded.insert(alias.to_owned());
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.loaded.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.loaded.is_empty()
    }
}

impl AssetCatalog for MemoryCatalog {
    fn is_loaded(&self, alias: &str) -> bool {
        self.loaded.contains(alias)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require() {
        let mut catalog = MemoryCatalog::new();
        assert!(matches!(catalog.require("cardback"), Err(AssetError::Missing(a)) if a == "cardback"));

        catalog.mark_loaded("cardback");
        assert!(catalog.require("cardback").is_ok());
    }

    #[test]
    fn test_fully_loaded() {
        let manifest = AssetManifest::showcase();
        let catalog = MemoryCatalog::fully_loaded(&manifest);

        assert_eq!(catalog.len(), manifest.aliases().count());
        assert!(catalog.is_loaded("fire_42.png"));
        assert!(catalog.is_loaded("font-ui"));
    }
}
