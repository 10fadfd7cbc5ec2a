//! # Image Directory
//!
//! Uploaded recipe images, one file each.
//!
//! Uploads never land under the name the client sent. The stored name is
//! `<uuid>-<sanitized name>`: no directory components, no clashes. The recipe
//! keeps both the stored and the submitted name.
use std::{
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;
use tokio::fs;
use uuid::Uuid;

use crate::{config::ALLOWED_EXTENSIONS, error::StorageError};

static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9._-]").expect("valid regex"));

pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub async fn init(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Writes `bytes` under a fresh storage name derived from `file_name` and returns that name.
    pub async fn save(&self, file_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        let stored = storage_name(file_name);
        fs::write(self.dir.join(&stored), bytes).await?;

        Ok(stored)
    }
}

pub fn allowed_file(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

pub fn sanitize(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned = UNSAFE_CHARS.replace_all(base, "_");

    cleaned.trim_start_matches('.').to_string()
}

pub fn storage_name(file_name: &str) -> String {
    format!("{}-{}", Uuid::new_v4().simple(), sanitize(file_name))
}
