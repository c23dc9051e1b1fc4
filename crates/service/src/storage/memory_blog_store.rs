use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use mongodb::bson::Document;
use models::blog::{decode_document, encode_item};
use models::{Blog, BlogFields, BlogId, BlogItem};
use tokio::sync::RwLock;

use crate::blog::repository::BlogRepository;
use crate::blog::scan::BlogScan;
use crate::errors::ServiceError;

/// In-memory blog collection.
///
/// Keeps raw BSON documents keyed by id, so records go through the same
/// encode/decode path as with MongoDB. Iteration order is id order, which for
/// generated ids is insertion order.
#[derive(Clone, Default)]
pub struct MemoryBlogStore {
    docs: Arc<RwLock<BTreeMap<BlogId, Document>>>,
    open_scans: Arc<AtomicUsize>,
}

impl MemoryBlogStore {
    pub fn new() -> Self { Self::default() }

    /// Store a raw document under `id`, bypassing encoding. `_id` is set to `id`.
    pub async fn insert_raw(&self, id: BlogId, mut doc: Document) {
        doc.insert("_id", id.as_object_id());
        self.docs.write().await.insert(id, doc);
    }

    pub async fn len(&self) -> usize { self.docs.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.docs.read().await.is_empty() }

    /// Scans opened and not yet released.
    pub fn open_scans(&self) -> usize { self.open_scans.load(Ordering::SeqCst) }
}

/// Held by an open scan; decrements the open-scan count when dropped.
struct ScanGuard(Arc<AtomicUsize>);

impl ScanGuard {
    fn open(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) { self.0.fetch_sub(1, Ordering::SeqCst); }
}

#[async_trait]
impl BlogRepository for MemoryBlogStore {
    async fn insert(&self, fields: &BlogFields) -> Result<BlogId, ServiceError> {
        let id = BlogId::generate();
        let mut item = BlogItem::from(fields);
        item.id = Some(id.as_object_id());
        let doc = encode_item(&item)?;
        self.docs.write().await.insert(id, doc);
        Ok(id)
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, ServiceError> {
        let doc = self.docs.read().await.get(&id).cloned();
        Ok(doc.map(decode_document).transpose()?)
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, ServiceError> {
        let doc = encode_item(&BlogItem::from(blog))?;
        let mut docs = self.docs.write().await;
        match docs.get_mut(&blog.id) {
            Some(slot) => {
                *slot = doc;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: BlogId) -> Result<bool, ServiceError> {
        Ok(self.docs.write().await.remove(&id).is_some())
    }

    async fn scan(&self) -> Result<BlogScan, ServiceError> {
        // Copies the collection up front so the read lock is released before
        // the first record is yielded; a slow consumer never blocks writers.
        let snapshot: Vec<Document> = self.docs.read().await.values().cloned().collect();
        let guard = ScanGuard::open(&self.open_scans);
        Ok(BlogScan::new(stream::iter(snapshot).map(move |doc| {
            let _guard = &guard;
            decode_document(doc).map_err(ServiceError::from)
        })))
    }
}
