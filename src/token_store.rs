use std::{
    fs,
    io::{self, ErrorKind},
    path::PathBuf,
};

/// On-disk home for the bearer token, so a login survives into the next run.
///
/// One token under one fixed file name. Everything here is synchronous and
/// small enough that the reads and writes are effectively atomic from this
/// crate's single-threaded point of view.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: PathBuf) -> TokenStore { TokenStore { path } }

    /// Where the token lives by default: the platform data directory, with
    /// a home-dir fallback for odd environments.
    pub fn default_path() -> PathBuf {
        dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mergington")
            .join("auth-token")
    }

    /// Read the stored token, if there is one.
    pub fn load(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => {
                let token = raw.trim();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token.to_string()))
                }
            },
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, token: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, token)
    }

    /// Forget the stored token. Clearing an already-empty store is fine.
    pub fn clear(&self) -> io::Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(ref e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}
