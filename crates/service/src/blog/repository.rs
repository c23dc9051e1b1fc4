use async_trait::async_trait;
use models::{Blog, BlogFields, BlogId};

use crate::blog::scan::BlogScan;
use crate::errors::ServiceError;

/// Storage seam for blog documents. One collection, single-document operations
/// plus an unfiltered scan. Implementations carry no per-request state.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Insert a new document; the store assigns the id.
    async fn insert(&self, fields: &BlogFields) -> Result<BlogId, ServiceError>;
    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, ServiceError>;
    /// Whole-document replace. Returns whether a document matched `blog.id`.
    async fn replace(&self, blog: &Blog) -> Result<bool, ServiceError>;
    /// Returns whether a document was deleted.
    async fn delete(&self, id: BlogId) -> Result<bool, ServiceError>;
    /// Open a scan over every document in store order.
    async fn scan(&self) -> Result<BlogScan, ServiceError>;
}
