// linkshelf/src/infrastructure/session_store.rs
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::repositories::session_store::SessionStore;
use crate::domain::session::Session;
use crate::infrastructure::error::InfrastructureError;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, warn};

/// Session kept as a JSON file, readable by the owner only.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Writes `contents` to a file readable by the owner only. On unix the mode is
/// applied at creation; an existing file is narrowed before it is truncated.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
        options.mode(0o600);
        if path.exists() {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
        }
    }

    let mut file = options.open(path)?;
    file.write_all(contents)?;
    file.flush()
}

impl SessionStore for FileSessionStore {
    /// A file that does not parse is treated as no session
    #[instrument(skip(self), level = "trace", fields(path = %self.path.display()))]
    fn load(&self) -> DomainResult<Option<Session>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(DomainError::Io(e)),
        };

        match serde_json::from_str::<Session>(&text) {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                warn!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                Ok(None)
            }
        }
    }

    #[instrument(skip_all, level = "debug", fields(path = %self.path.display()))]
    fn save(&self, session: &Session) -> DomainResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                InfrastructureError::FileSystem(format!("{}: {}", parent.display(), e))
            })?;
        }

        let text = serde_json::to_string_pretty(session)?;
        write_private(&self.path, text.as_bytes()).map_err(|e| {
            InfrastructureError::FileSystem(format!("{}: {}", self.path.display(), e))
        })?;

        debug!("Session saved");
        Ok(())
    }

    #[instrument(skip(self), level = "debug", fields(path = %self.path.display()))]
    fn clear(&self) -> DomainResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(DomainError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::test_backend::test_session;

    #[test]
    fn given_missing_file_when_load_then_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn given_saved_session_when_load_then_same_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested/session.json"));
        let session = test_session("user-1");

        store.save(&session).unwrap();

        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[cfg(unix)]
    #[test]
    fn given_saved_session_when_inspect_file_then_owner_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.save(&test_session("user-1")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn given_world_readable_file_when_save_then_narrowed_to_owner() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileSessionStore::new(&path);
        let session = test_session("user-1");
        store.save(&session).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().unwrap(), Some(session));
    }

    #[test]
    fn given_garbage_file_when_load_then_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        assert!(FileSessionStore::new(path).load().unwrap().is_none());
    }

    #[test]
    fn given_no_file_when_clear_then_ok() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("session.json"));
        store.clear().unwrap();

        store.save(&test_session("user-1")).unwrap();
        store.clear().unwrap();
        assert!(!store.path().exists());
    }
}
