use futures::StreamExt;
use mongodb::{bson::doc, Collection};
use models::{Blog, BlogFields, BlogId, BlogItem};

use crate::blog::repository::BlogRepository;
use crate::blog::scan::BlogScan;
use crate::errors::ServiceError;

/// MongoDB-backed repository. Holds the one shared collection handle.
#[derive(Clone)]
pub struct MongoBlogRepository {
    pub collection: Collection<BlogItem>,
}

impl MongoBlogRepository {
    pub fn new(collection: Collection<BlogItem>) -> Self { Self { collection } }
}

#[async_trait::async_trait]
impl BlogRepository for MongoBlogRepository {
    async fn insert(&self, fields: &BlogFields) -> Result<BlogId, ServiceError> {
        let res = self.collection.insert_one(BlogItem::from(fields)).await?;
        let oid = res
            .inserted_id
            .as_object_id()
            .ok_or_else(|| ServiceError::Db("cannot convert to object id".into()))?;
        Ok(oid.into())
    }

    async fn find_by_id(&self, id: BlogId) -> Result<Option<Blog>, ServiceError> {
        let found = self.collection.find_one(id.filter()).await?;
        Ok(found.map(Blog::try_from).transpose()?)
    }

    async fn replace(&self, blog: &Blog) -> Result<bool, ServiceError> {
        let res = self.collection.replace_one(blog.id.filter(), BlogItem::from(blog)).await?;
        Ok(res.matched_count > 0)
    }

    async fn delete(&self, id: BlogId) -> Result<bool, ServiceError> {
        let res = self.collection.delete_one(id.filter()).await?;
        Ok(res.deleted_count > 0)
    }

    async fn scan(&self) -> Result<BlogScan, ServiceError> {
        let cursor = self.collection.find(doc! {}).await?;
        Ok(BlogScan::new(cursor.map(|res| -> Result<Blog, ServiceError> {
            let item = res?;
            Ok(Blog::try_from(item)?)
        })))
    }
}
