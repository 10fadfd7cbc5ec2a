use std::sync::Arc;

use super::{config::Config, database::RecipeStore, error::StorageError, images::ImageStore};

pub struct State {
    pub config: Config,
    pub store: RecipeStore,
    pub images: ImageStore,
}

impl State {
    pub async fn new(config: Config) -> Result<Arc<Self>, StorageError> {
        let store = RecipeStore::new(&config.recipes_file);
        let images = ImageStore::new(&config.images_dir);
        images.init().await?;

        Ok(Arc::new(Self {
            config,
            store,
            images,
        }))
    }
}
