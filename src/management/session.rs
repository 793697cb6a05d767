use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::Res;

/// Stores the Last.fm session key as the only content of a text file.
pub struct SessionManager {
    path: PathBuf,
}

impl SessionManager {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the trimmed session key, or `None` if the file is missing or blank.
    pub async fn load(&self) -> Res<Option<String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => {
                let key = content.trim();
                Ok((!key.is_empty()).then(|| key.to_string()))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Writes `key` to the file, replacing whatever was there.
    pub async fn persist(&self, key: &str) -> Res<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }

        async_fs::write(&self.path, key).await?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
