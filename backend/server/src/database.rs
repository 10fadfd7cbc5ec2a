//! # Recipe Document
//!
//! Flat JSON file holding the whole recipe collection.
//!
//! ## Requirements
//!
//! - Small dataset, loaded and rewritten wholesale
//! - Missing file reads as an empty collection
//! - Insertion order preserved
//!
//! ## Implementation
//!
//! - One JSON array, four-space indents
//! - Writes go to a sibling `.tmp` file which is renamed over the document,
//!   so readers see either the old or the new collection
//! - A single mutex serialises load-modify-save cycles; plain reads skip it
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tokio::{
    fs,
    sync::{Mutex, MutexGuard},
};
use tracing::debug;

use crate::{error::StorageError, models::Recipe};

pub struct RecipeStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl RecipeStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Held across a whole load-modify-save cycle.
    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().await
    }

    pub async fn load(&self) -> Result<Vec<Recipe>, StorageError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn save(&self, recipes: &[Recipe]) -> Result<(), StorageError> {
        let bytes = encode(recipes)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, &bytes).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!("Saved {} recipes to {}", recipes.len(), self.path.display());
        Ok(())
    }
}

fn encode(recipes: &[Recipe]) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    recipes.serialize(&mut serializer)?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;
    use crate::models::Ingredients;

    fn recipe(id: u64, title: &str) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            ingredients: Ingredients::Text("water".to_string()),
            ..Recipe::default()
        }
    }

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = RecipeStore::new(dir.path().join("recipes.json"));

        assert!(store.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_save_then_load_keeps_order() {
        let dir = tempdir().unwrap();
        let store = RecipeStore::new(dir.path().join("recipes.json"));

        let recipes = vec![recipe(2, "Bread"), recipe(1, "Jam")];
        store.save(&recipes).await.unwrap();

        assert_eq!(store.load().await.unwrap(), recipes);
        assert!(!dir.path().join("recipes.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_document_uses_four_space_indent() {
        let dir = tempdir().unwrap();
        let store = RecipeStore::new(dir.path().join("recipes.json"));
        store.save(&[recipe(1, "Bread")]).await.unwrap();

        let text = std::fs::read_to_string(store.path()).unwrap();
        assert!(text.starts_with("[\n    {\n        \"id\": 1,"));
    }

    #[tokio::test]
    async fn test_corrupt_document_errors() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("recipes.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = RecipeStore::new(path);
        assert!(matches!(store.load().await, Err(StorageError::Corrupt(_))));
    }
}
