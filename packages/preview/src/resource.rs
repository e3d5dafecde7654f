//! Addressable preview resources

use livepad_document::{ContentKind, PreviewDocument};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResourceError {
    #[error("Preview resource {0} not found")]
    NotFound(u64),

    #[error("Resource store unavailable: {0}")]
    Unavailable(String),
}

/// Handle to a published preview document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewResource {
    pub id: u64,
    pub url: String,
}

/// Creates and releases preview resources.
///
/// Implementations are shared between the controller and whatever serves the
/// documents, so both methods take `&self`.
pub trait ResourceStore {
    fn create(&self, document: &PreviewDocument) -> Result<PreviewResource, ResourceError>;
    fn revoke(&self, resource: &PreviewResource) -> Result<(), ResourceError>;
}

impl<T: ResourceStore + ?Sized> ResourceStore for Arc<T> {
    fn create(&self, document: &PreviewDocument) -> Result<PreviewResource, ResourceError> {
        (**self).create(document)
    }

    fn revoke(&self, resource: &PreviewResource) -> Result<(), ResourceError> {
        (**self).revoke(resource)
    }
}

/// Document bytes held by the blob store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub kind: ContentKind,
    pub content_type: &'static str,
    pub body: Arc<str>,
}

/// In-memory store handing out `{base}/{id}` URLs
#[derive(Debug)]
pub struct BlobStore {
    base: String,
    next_id: AtomicU64,
    entries: Mutex<HashMap<u64, StoredDocument>>,
}

impl BlobStore {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            base: base.into().trim_end_matches('/').to_string(),
            next_id: AtomicU64::new(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn get(&self, id: u64) -> Option<StoredDocument> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.get(id).is_some()
    }

    pub fn live_count(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Default for BlobStore {
    fn default() -> Self {
        Self::new("/preview")
    }
}

impl ResourceStore for BlobStore {
    fn create(&self, document: &PreviewDocument) -> Result<PreviewResource, ResourceError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let stored = StoredDocument {
            kind: document.kind,
            content_type: PreviewDocument::CONTENT_TYPE,
            body: Arc::from(document.html.as_str()),
        };

        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, stored);

        Ok(PreviewResource {
            id,
            url: format!("{}/{}", self.base, id),
        })
    }

    fn revoke(&self, resource: &PreviewResource) -> Result<(), ResourceError> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&resource.id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound(resource.id))
    }
}
