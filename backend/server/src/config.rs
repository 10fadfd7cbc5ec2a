use std::{env, fmt::Display, path::PathBuf, str::FromStr};

use tracing::{info, warn};

pub const ALLOWED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "gif"];

pub struct Config {
    pub port: u16,
    pub recipes_file: PathBuf,
    pub images_dir: PathBuf,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn load() -> Self {
        Self {
            port: try_load("RUST_PORT", "8000"),
            recipes_file: try_load("RECIPES_FILE", "recipes.json"),
            images_dir: try_load("IMAGES_DIR", "images"),
            max_upload_bytes: try_load("MAX_UPLOAD_BYTES", "16777216"),
        }
    }

    pub fn with_paths(recipes_file: impl Into<PathBuf>, images_dir: impl Into<PathBuf>) -> Self {
        Self {
            port: 8000,
            recipes_file: recipes_file.into(),
            images_dir: images_dir.into(),
            max_upload_bytes: 16 * 1024 * 1024,
        }
    }
}

fn try_load<T: FromStr>(key: &str, default: &str) -> T
where
    T::Err: Display,
{
    env::var(key)
        .unwrap_or_else(|_| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
        })
        .expect("Environment misconfigured!")
}
