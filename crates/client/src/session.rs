//! Anonymous session identifier.
//!
//! A session id names the cart of one installation. It is generated on first
//! use and kept in a small file so later runs find the same cart.

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::LazyLock;

use rand::Rng;
use regex::Regex;
use thiserror::Error;

/// Environment variable overriding the session file location.
pub const SESSION_FILE_ENV: &str = "SLEEPWELL_SESSION_FILE";

/// Length of a generated session id.
pub const SESSION_ID_LENGTH: usize = 26;

const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

static SESSION_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,128}$").expect("Invalid regex"));

/// Errors reading or writing the session file.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No session file location: set SLEEPWELL_SESSION_FILE or HOME")]
    NoLocation,

    #[error("Failed to read session file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to write session file {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// File-backed session id store.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Store the session id at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use `$SLEEPWELL_SESSION_FILE`, or `$HOME/.sleepwell/session`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoLocation` if neither variable is set.
    pub fn from_env() -> Result<Self, SessionError> {
        if let Some(path) = std::env::var_os(SESSION_FILE_ENV).filter(|p| !p.is_empty()) {
            return Ok(Self::new(path));
        }

        let home = std::env::var_os("HOME")
            .filter(|h| !h.is_empty())
            .ok_or(SessionError::NoLocation)?;
        Ok(Self::new(PathBuf::from(home).join(".sleepwell").join("session")))
    }

    /// Return the stored session id, generating and persisting one if the
    /// file is missing or holds something that is not a session id.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read, or a new id
    /// cannot be written.
    pub fn load_or_create(&self) -> Result<String, SessionError> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => {
                let id = contents.trim();
                if SESSION_ID_RE.is_match(id) {
                    return Ok(id.to_string());
                }
                tracing::warn!(path = %self.path.display(), "Replacing malformed session id");
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(source) => {
                return Err(SessionError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        }

        let id = generate_session_id();
        self.write(&id)?;
        tracing::info!(path = %self.path.display(), "Created new session id");
        Ok(id)
    }

    fn write(&self, id: &str) -> Result<(), SessionError> {
        let to_error = |source| SessionError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(to_error)?;
        }
        fs::write(&self.path, id).map_err(to_error)
    }
}

/// Generate a random lowercase alphanumeric session id.
#[must_use]
pub fn generate_session_id() -> String {
    let mut rng = rand::rng();
    (0..SESSION_ID_LENGTH)
        .filter_map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET.get(idx).copied().map(char::from)
        })
        .collect()
}
