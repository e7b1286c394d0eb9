use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

use tracing::{error, warn};

use crate::error::StoreError;
use crate::session::Session;
use crate::store::SessionStore;

/// Session store backed by a single JSON document on disk.
///
/// Written with 0600 permissions on Unix; the file holds credentials. A
/// missing file means logged-out. The trait methods degrade on IO errors (a
/// corrupt file reads as no session, with a warning) so that a bad disk state
/// never wedges the request path; callers that need the failure use
/// [`FileSessionStore::read`] and [`FileSessionStore::write`] directly.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read the session file, distinguishing "absent" from "unreadable".
    pub fn read(&self) -> Result<Option<Session>, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source: err,
                });
            }
        };

        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|err| StoreError::Parse {
                path: self.path.clone(),
                source: err,
            })
    }

    /// Write the whole session document.
    pub fn write(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|err| self.write_err(err))?;
        }

        let contents = serde_json::to_string_pretty(session).map_err(|err| StoreError::Parse {
            path: self.path.clone(),
            source: err,
        })?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|err| self.write_err(err))?;
        file.write_all(contents.as_bytes())
            .map_err(|err| self.write_err(err))
    }

    fn write_err(&self, source: std::io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Option<Session> {
        match self.read() {
            Ok(session) => session,
            Err(err) => {
                warn!(%err, "treating unreadable session file as logged out");
                None
            }
        }
    }

    fn store(&self, session: &Session) {
        if let Err(err) = self.write(session) {
            error!(%err, "failed to persist session");
        }
    }

    fn set_access_token(&self, token: &str) {
        if let Some(mut session) = self.load() {
            session.access_token = token.to_owned();
            self.store(&session);
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(err) => error!(%err, path = %self.path.display(), "failed to clear session file"),
        }
    }
}
