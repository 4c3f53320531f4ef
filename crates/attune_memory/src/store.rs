//! Directory-of-files session store.
//!
//! One pretty-printed JSON file per session, named `session_<key>.json` where
//! the key is the UTC write time at one-second resolution
//! (`YYYYMMDD_HHMMSS`). Two writes within the same second share a key and the
//! later one replaces the earlier. Nothing is cached, so a read always sees
//! every completed write.

use attune_core::{SessionRecord, StorageError};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;

const FILE_PREFIX: &str = "session_";
const FILE_SUFFIX: &str = ".json";
const KEY_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Second-resolution session key. Lexicographic order is chronological order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SessionKey(String);

impl SessionKey {
    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self(at.format(KEY_FORMAT).to_string())
    }

    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{FILE_PREFIX}{}{FILE_SUFFIX}", self.0)
    }

    /// Recover the key from a store file name, if it is one.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let key = name.strip_prefix(FILE_PREFIX)?.strip_suffix(FILE_SUFFIX)?;
        if key.is_empty() {
            return None;
        }
        Some(Self(key.to_string()))
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: PathBuf,
}

impl SessionStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `record` under a key derived from the current time.
    pub async fn persist(&self, record: &SessionRecord) -> Result<SessionKey, StorageError> {
        self.persist_with_key(record, SessionKey::now()).await
    }

    /// Write `record` under an explicit key, replacing any record already there.
    pub async fn persist_with_key(
        &self,
        record: &SessionRecord,
        key: SessionKey,
    ) -> Result<SessionKey, StorageError> {
        fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| StorageError::io("create", &self.dir, e))?;

        let path = self.dir.join(key.file_name());
        let body = serde_json::to_string_pretty(record)?;
        fs::write(&path, body)
            .await
            .map_err(|e| StorageError::io("write", &path, e))?;

        tracing::info!("Persisted session {} to {}", key, path.display());
        Ok(key)
    }

    /// Read one record by key; `None` if no such session exists.
    pub async fn get(&self, key: &SessionKey) -> Result<Option<SessionRecord>, StorageError> {
        let path = self.dir.join(key.file_name());
        match fs::read_to_string(&path).await {
            Ok(body) => Ok(parse_record(&path, &body)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::io("read", &path, e)),
        }
    }

    /// Up to `limit` records, newest first.
    ///
    /// A missing directory is an empty store. Files that fail to parse are
    /// logged and skipped without counting toward `limit`.
    pub async fn list_recent(&self, limit: usize) -> Result<Vec<SessionRecord>, StorageError> {
        let mut keys = self.keys().await?;
        keys.sort_unstable_by(|a, b| b.cmp(a));

        let mut records = Vec::with_capacity(limit.min(keys.len()));
        for key in keys {
            if records.len() >= limit {
                break;
            }
            if let Some(record) = self.get(&key).await? {
                records.push(record);
            }
        }
        Ok(records)
    }

    /// Keys of every session file in the store, unordered.
    pub async fn keys(&self) -> Result<Vec<SessionKey>, StorageError> {
        let mut entries = match fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StorageError::io("list", &self.dir, e)),
        };

        let mut keys = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| StorageError::io("list", &self.dir, e))?
        {
            if let Some(key) = entry.file_name().to_str().and_then(SessionKey::from_file_name) {
                keys.push(key);
            }
        }
        Ok(keys)
    }
}

fn parse_record(path: &Path, body: &str) -> Option<SessionRecord> {
    match serde_json::from_str(body) {
        Ok(record) => Some(record),
        Err(e) => {
            tracing::warn!("Skipping unreadable session file {}: {}", path.display(), e);
            None
        }
    }
}
