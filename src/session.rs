//! Session-scoped storage layout
//!
//! Every session owns two disjoint directories: one for raw uploads, one for
//! the persisted vector index. Directory paths are a pure function of the
//! session id and the configured base paths, so two sessions can never share
//! storage.

use chrono::Utc;
use std::path::PathBuf;
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::error::{Error, Result};

/// Filename of the binary vector-index artifact inside a session index dir
pub const INDEX_FILE: &str = "index.bin";
/// Filename of the chunk-text artifact inside a session index dir
pub const CHUNKS_FILE: &str = "chunks.txt";
/// Separator between chunks in the chunk-text artifact
///
/// Multi-character on purpose: it must not occur naturally inside chunk text,
/// and it is distinct from the `\n\n` joiner used when assembling prompt
/// context.
pub const CHUNK_SEPARATOR: &str = "\n\n---\n\n";

/// Resolved directories for one session
#[derive(Debug, Clone)]
pub struct SessionDirs {
    /// Opaque session identifier
    pub session_id: String,
    /// Directory holding the session's raw uploads
    pub temp_dir: PathBuf,
    /// Directory holding the session's persisted index
    pub index_dir: PathBuf,
}

/// Maps session ids onto isolated storage directories
#[derive(Debug, Clone)]
pub struct SessionStore {
    upload_base: PathBuf,
    index_base: PathBuf,
}

impl SessionStore {
    pub fn new(upload_base: impl Into<PathBuf>, index_base: impl Into<PathBuf>) -> Self {
        Self {
            upload_base: upload_base.into(),
            index_base: index_base.into(),
        }
    }

    pub fn from_config(storage: &StorageConfig) -> Self {
        Self::new(&storage.upload_base, &storage.index_base)
    }

    /// Mint a fresh session identifier: UTC timestamp prefix + random suffix
    ///
    /// Collision probability is negligible; collisions are not detected.
    pub fn mint_session_id() -> String {
        let stamp = Utc::now().format("%Y%m%d%H%M%S");
        let suffix = Uuid::new_v4().simple().to_string();
        format!("session_{}_{}", stamp, &suffix[..8])
    }

    fn dirs(&self, session_id: &str) -> SessionDirs {
        SessionDirs {
            session_id: session_id.to_string(),
            temp_dir: self.upload_base.join(session_id),
            index_dir: self.index_base.join(session_id),
        }
    }

    /// Resolve an existing session or create a new one (write path)
    ///
    /// With a supplied id the directories are created if absent; with none a
    /// fresh id is minted and empty directories are created.
    pub fn resolve_or_create(&self, session_id: Option<&str>) -> Result<SessionDirs> {
        let id = match session_id {
            Some(id) => id.to_string(),
            None => Self::mint_session_id(),
        };
        let dirs = self.dirs(&id);
        std::fs::create_dir_all(&dirs.temp_dir)?;
        std::fs::create_dir_all(&dirs.index_dir)?;

        tracing::info!(
            session_id = %dirs.session_id,
            temp_dir = %dirs.temp_dir.display(),
            index_dir = %dirs.index_dir.display(),
            "session resolved"
        );

        Ok(dirs)
    }

    /// Resolve directories for the read path, without creating anything
    ///
    /// Fails with `SessionNotFound` when the session has no index directory,
    /// i.e. no ingestion ever completed for it.
    pub fn directories_for(&self, session_id: &str) -> Result<SessionDirs> {
        let dirs = self.dirs(session_id);
        if !dirs.index_dir.is_dir() {
            return Err(Error::SessionNotFound(session_id.to_string()));
        }
        Ok(dirs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(root: &std::path::Path) -> SessionStore {
        SessionStore::new(root.join("uploads"), root.join("indexes"))
    }

    #[test]
    fn test_minted_id_shape() {
        let id = SessionStore::mint_session_id();
        let parts: Vec<&str> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "session");
        assert_eq!(parts[1].len(), 14);
        assert!(parts[1].chars().all(|c| c.is_ascii_digit()));
        assert_eq!(parts[2].len(), 8);
    }

    #[test]
    fn test_create_without_id_mints_fresh_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let dirs = store.resolve_or_create(None).unwrap();
        assert!(dirs.temp_dir.is_dir());
        assert!(dirs.index_dir.is_dir());
        assert!(dirs.temp_dir.ends_with(&dirs.session_id));
        assert!(dirs.index_dir.ends_with(&dirs.session_id));
    }

    #[test]
    fn test_resolve_reuses_existing_session() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let first = store.resolve_or_create(Some("session_x")).unwrap();
        let second = store.resolve_or_create(Some("session_x")).unwrap();
        assert_eq!(first.temp_dir, second.temp_dir);
        assert_eq!(first.index_dir, second.index_dir);
    }

    #[test]
    fn test_distinct_sessions_never_share_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let a = store.resolve_or_create(Some("session_a")).unwrap();
        let b = store.resolve_or_create(Some("session_b")).unwrap();
        assert_ne!(a.temp_dir, b.temp_dir);
        assert_ne!(a.index_dir, b.index_dir);
    }

    #[test]
    fn test_read_path_requires_existing_index_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store(tmp.path());

        let err = store.directories_for("session_never_ingested").unwrap_err();
        assert!(matches!(err, Error::SessionNotFound(_)));

        store.resolve_or_create(Some("session_real")).unwrap();
        assert!(store.directories_for("session_real").is_ok());
    }
}
