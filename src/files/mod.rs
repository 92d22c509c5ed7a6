// Pending file references: native dialog paths handed to the web file manager

use serde::{Deserialize, Serialize};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use uuid::Uuid;


const KEY_PREFIX: &str = "pending-file-";

/// Single-use opaque token standing in for a native path
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileReferenceKey(String);

impl FileReferenceKey {
    fn generate() -> Self {
        Self(format!("{}{}", KEY_PREFIX, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FileReferenceKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for FileReferenceKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for FileReferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key plus a display name, returned to the UI for each selected file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFileHandle {
    pub key: FileReferenceKey,
    pub file_name: String,
}

/// Table of registered-but-unconsumed native paths.
///
/// Construct one per process and share it; every entry is removed by its
/// first successful [`consume`](Self::consume).
#[derive(Default)]
pub struct PendingFileBroker {
    entries: Mutex<HashMap<FileReferenceKey, String>>,
}

impl PendingFileBroker {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<FileReferenceKey, String>> {
        // The map holds plain strings, a poisoned guard is still consistent
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Store `path` under a fresh key and return the key
    pub fn register(&self, path: impl Into<String>) -> FileReferenceKey {
        let path = path.into();
        let mut entries = self.entries();
        loop {
            let key = FileReferenceKey::generate();
            if let Entry::Vacant(slot) = entries.entry(key.clone()) {
                debug!(target: "files", key = %key, path = %path, "registered pending file");
                slot.insert(path);
                return key;
            }
        }
    }

    /// Register every path from one dialog completion
    pub fn register_selection<I, P>(&self, paths: I) -> Vec<PendingFileHandle>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        let handles: Vec<PendingFileHandle> = paths
            .into_iter()
            .map(|path| {
                let path = path.into();
                let file_name = display_name(&path);
                PendingFileHandle {
                    key: self.register(path),
                    file_name,
                }
            })
            .collect();
        info!(target: "files", "registered {} pending file(s)", handles.len());
        handles
    }

    /// Take the path for `key`, removing it. `None` when the key was never
    /// registered or has already been consumed.
    pub fn consume(&self, key: &FileReferenceKey) -> Option<String> {
        let path = self.entries().remove(key);
        match &path {
            Some(_) => debug!(target: "files", key = %key, "consumed pending file"),
            None => debug!(target: "files", key = %key, "pending file not found"),
        }
        path
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

fn display_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string())
}
