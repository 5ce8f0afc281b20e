//! In-memory registry of finished mixes, addressed by `blob:` handles.

use std::sync::Arc;

use bytes::Bytes;
use dashmap::DashMap;
use tracing::debug;

pub const BLOB_SCHEME: &str = "blob:";
const HANDLE_PREFIX: &str = "blob:prismix/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredResource {
    pub bytes: Bytes,
    pub mime_type: String,
}

/// Cloning shares the same registry. Handles live until released.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    entries: Arc<DashMap<String, StoredResource>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, bytes: Bytes, mime_type: impl Into<String>) -> String {
        let handle = format!("{}{}", HANDLE_PREFIX, uuid::Uuid::new_v4());
        let resource = StoredResource {
            bytes,
            mime_type: mime_type.into(),
        };
        debug!(
            "Registered {} ({} bytes, {})",
            handle,
            resource.bytes.len(),
            resource.mime_type
        );
        self.entries.insert(handle.clone(), resource);
        handle
    }

    pub fn get(&self, handle: &str) -> Option<StoredResource> {
        self.entries.get(handle).map(|e| e.value().clone())
    }

    /// Returns `false` if the handle was unknown or already released.
    pub fn release(&self, handle: &str) -> bool {
        let released = self.entries.remove(handle).is_some();
        if released {
            debug!("Released {}", handle);
        }
        released
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_get_release() {
        let store = ResourceStore::new();
        let handle = store.register(Bytes::from_static(b"abc"), "audio/wav");
        assert!(handle.starts_with("blob:prismix/"));
        assert_eq!(store.len(), 1);

        let res = store.get(&handle).unwrap();
        assert_eq!(&res.bytes[..], b"abc");
        assert_eq!(res.mime_type, "audio/wav");

        assert!(store.release(&handle));
        assert!(!store.release(&handle));
        assert!(store.get(&handle).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn handles_are_unique_and_clones_share_entries() {
        let store = ResourceStore::new();
        let view = store.clone();
        let a = store.register(Bytes::new(), "audio/wav");
        let b = store.register(Bytes::new(), "audio/wav");
        assert_ne!(a, b);
        assert_eq!(view.len(), 2);
    }
}
