//! Access token file

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use roster_common::{TokenPersistence, TokenStorageError};

use super::write_private;

/// Keeps the token as the sole content of one file.
///
/// A missing or blank file means "no token".
#[derive(Debug, Clone)]
pub struct FileTokenPersistence {
    path: PathBuf,
}

impl FileTokenPersistence {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenPersistence for FileTokenPersistence {
    fn load(&self) -> Result<Option<String>, TokenStorageError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStorageError> {
        write_private(&self.path, token.as_bytes())?;
        tracing::debug!(path = %self.path.display(), "token_file.saved");
        Ok(())
    }

    fn remove(&self) -> Result<(), TokenStorageError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
