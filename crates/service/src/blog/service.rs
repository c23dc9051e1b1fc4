use std::sync::Arc;

use models::{Blog, BlogFields, BlogId};
use tracing::{info, instrument};

use crate::blog::repository::BlogRepository;
use crate::blog::scan::BlogScan;
use crate::errors::ServiceError;

/// Application service encapsulating the blog business rules.
/// Parses external ids and enforces not-found semantics; storage is behind `R`.
pub struct BlogService<R: BlogRepository> {
    repo: Arc<R>,
}

impl<R: BlogRepository> BlogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Create a blog; the store assigns the id.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::BlogFields;
    /// use service::{blog::BlogService, storage::MemoryBlogStore};
    /// let svc = BlogService::new(Arc::new(MemoryBlogStore::new()));
    /// let fields = BlogFields { author_id: "Omar".into(), title: "Hello".into(), content: "World".into() };
    /// let blog = tokio_test::block_on(svc.create(fields)).unwrap();
    /// assert_eq!(blog.id.to_hex().len(), 24);
    /// assert_eq!(blog.title, "Hello");
    /// ```
    #[instrument(skip(self, fields), fields(author_id = %fields.author_id))]
    pub async fn create(&self, fields: BlogFields) -> Result<Blog, ServiceError> {
        let id = self.repo.insert(&fields).await?;
        info!(blog_id = %id, "blog_created");
        Ok(Blog::new(id, fields))
    }

    #[instrument(skip(self))]
    pub async fn read(&self, id: &str) -> Result<Blog, ServiceError> {
        let id = BlogId::parse(id)?;
        self.find(id).await
    }

    /// Whole-record replace. Reads first so a missing record is reported, never upserted.
    #[instrument(skip(self, fields))]
    pub async fn update(&self, id: &str, fields: BlogFields) -> Result<Blog, ServiceError> {
        let id = BlogId::parse(id)?;
        self.find(id).await?;

        let blog = Blog::new(id, fields);
        // deleted between the read and the replace
        if !self.repo.replace(&blog).await? {
            return Err(ServiceError::not_found("blog"));
        }
        info!(blog_id = %id, "blog_updated");
        Ok(blog)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<BlogId, ServiceError> {
        let id = BlogId::parse(id)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("blog"));
        }
        info!(blog_id = %id, "blog_deleted");
        Ok(id)
    }

    /// Open a lazy scan over every blog. Dropping the scan releases the cursor.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<BlogScan, ServiceError> {
        self.repo.scan().await
    }

    async fn find(&self, id: BlogId) -> Result<Blog, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("blog"))
    }
}
