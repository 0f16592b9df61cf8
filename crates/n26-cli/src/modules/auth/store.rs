use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::modules::auth::Credentials;
use crate::modules::system::CredentialsError;

#[cfg(target_os = "macos")]
const CREDENTIALS_RELATIVE_PATH: &str = ".n26.auth";
#[cfg(not(target_os = "macos"))]
const CREDENTIALS_RELATIVE_PATH: &str = ".config/n26.auth";

/// On-disk home of the single credential record.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn default_path() -> Result<PathBuf, CredentialsError> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| CredentialsError::NoHome)?;
        Ok(Path::new(&home).join(CREDENTIALS_RELATIVE_PATH))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing, unreadable and corrupt records all mean "no session yet".
    pub fn load(&self) -> Option<Credentials> {
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) => {
                debug!(path = %self.path.display(), "credentials not loaded: {err}");
                return None;
            }
        };
        match serde_json::from_slice(&contents) {
            Ok(creds) => Some(creds),
            Err(err) => {
                warn!(path = %self.path.display(), "ignoring unreadable credentials: {err}");
                None
            }
        }
    }

    pub fn save(&self, creds: &Credentials) -> Result<(), CredentialsError> {
        let contents = serde_json::to_vec(creds).map_err(CredentialsError::Encode)?;
        self.write_atomic(&contents)
            .map_err(|source| CredentialsError::Write {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), expiry = %creds.expiry, "stored credentials");
        Ok(())
    }

    pub fn delete(&self) -> Result<(), CredentialsError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "deleted credentials");
                Ok(())
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CredentialsError::Delete {
                path: self.path.clone(),
                source,
            }),
        }
    }

    /// Forces the next load to look expired while keeping the refresh token.
    pub fn invalidate(&self) -> Result<(), CredentialsError> {
        let mut creds = self.load().unwrap_or_default();
        creds.expiry = DateTime::<Utc>::UNIX_EPOCH;
        self.save(&creds)
    }

    fn write_atomic(&self, contents: &[u8]) -> std::io::Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let tmp_path = parent.join(format!(".n26-auth.{}.tmp", Uuid::now_v7()));
        let result = write_private_file(&tmp_path, contents)
            .and_then(|()| fs::rename(&tmp_path, &self.path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

fn write_private_file(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let mut options = fs::OpenOptions::new();
    options.create_new(true).write(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.sync_all()
}
