//! Persistence and inspection of the bearer token between invocations.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use jsonwebtoken::dangerous::insecure_decode;
use thiserror::Error;

use crate::domain::auth::SessionClaims;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("token file error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid token: {0}")]
    InvalidToken(String),
}

/// File-backed store for the single session token.
#[derive(Clone, Debug)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored token, or `None` when no session was saved.
    pub fn load(&self) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)?;
        Ok(())
    }

    /// Removes the stored token. Clearing an empty store is not an error.
    pub fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Reads `{id, exp}` from a JWT without checking its signature.
///
/// The signing secret lives on the backend; the client only needs the expiry
/// to decide whether the stored session is still usable.
pub fn decode_claims(token: &str) -> Result<SessionClaims, SessionError> {
    insecure_decode::<SessionClaims>(token)
        .map(|data| data.claims)
        .map_err(|e| SessionError::InvalidToken(e.to_string()))
}
