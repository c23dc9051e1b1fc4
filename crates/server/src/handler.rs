use std::pin::Pin;
use std::sync::Arc;

use futures::{Stream, StreamExt};
use models::{Blog, BlogFields};
use service::blog::{BlogRepository, BlogService};
use service::errors::ServiceError;
use tonic::{Request, Response, Status};
use tracing::{debug, info};

use crate::errors::into_status;
use crate::proto::{
    self, blog_service_server::BlogService as BlogRpc, CreateBlogRequest, CreateBlogResponse, DeleteBlogRequest,
    DeleteBlogResponse, ListBlogRequest, ListBlogResponse, ReadBlogRequest, ReadBlogResponse, UpdateBlogRequest,
    UpdateBlogResponse,
};

/// Response stream of `ListBlog`. Dropped by tonic when the caller goes away,
/// which drops the underlying scan.
pub type BlogListStream = Pin<Box<dyn Stream<Item = Result<ListBlogResponse, Status>> + Send + 'static>>;

impl From<Blog> for proto::Blog {
    fn from(b: Blog) -> Self {
        Self { id: b.id.to_hex(), author_id: b.author_id, title: b.title, content: b.content }
    }
}

impl proto::Blog {
    pub fn into_fields(self) -> BlogFields {
        BlogFields { author_id: self.author_id, title: self.title, content: self.content }
    }
}

/// gRPC handler for `blog.BlogService`.
pub struct BlogHandler<R: BlogRepository> {
    service: Arc<BlogService<R>>,
}

impl<R: BlogRepository> BlogHandler<R> {
    pub fn new(service: Arc<BlogService<R>>) -> Self { Self { service } }

    pub fn from_repository(repo: Arc<R>) -> Self { Self::new(Arc::new(BlogService::new(repo))) }
}

#[tonic::async_trait]
impl<R: BlogRepository + 'static> BlogRpc for BlogHandler<R> {
    async fn create_blog(&self, request: Request<CreateBlogRequest>) -> Result<Response<CreateBlogResponse>, Status> {
        info!(rpc = "CreateBlog", "CreateBlog invoked");
        let blog = request.into_inner().blog.unwrap_or_default();
        if !blog.id.is_empty() {
            debug!(ignored_id = %blog.id, "id on create request ignored; the store assigns it");
        }
        let created = self.service.create(blog.into_fields()).await.map_err(into_status)?;
        Ok(Response::new(CreateBlogResponse { blog: Some(created.into()) }))
    }

    async fn read_blog(&self, request: Request<ReadBlogRequest>) -> Result<Response<ReadBlogResponse>, Status> {
        info!(rpc = "ReadBlog", "ReadBlog invoked");
        let blog_id = request.into_inner().blog_id;
        let blog = self.service.read(&blog_id).await.map_err(into_status)?;
        Ok(Response::new(ReadBlogResponse { blog: Some(blog.into()) }))
    }

    async fn update_blog(&self, request: Request<UpdateBlogRequest>) -> Result<Response<UpdateBlogResponse>, Status> {
        info!(rpc = "UpdateBlog", "UpdateBlog invoked");
        let blog = request
            .into_inner()
            .blog
            .ok_or_else(|| into_status(ServiceError::Validation("missing blog".into())))?;
        let id = blog.id.clone();
        let updated = self.service.update(&id, blog.into_fields()).await.map_err(into_status)?;
        Ok(Response::new(UpdateBlogResponse { blog: Some(updated.into()) }))
    }

    async fn delete_blog(&self, request: Request<DeleteBlogRequest>) -> Result<Response<DeleteBlogResponse>, Status> {
        info!(rpc = "DeleteBlog", "DeleteBlog invoked");
        let blog_id = request.into_inner().blog_id;
        self.service.delete(&blog_id).await.map_err(into_status)?;
        // echo the caller's id as given
        Ok(Response::new(DeleteBlogResponse { blog_id }))
    }

    type ListBlogStream = BlogListStream;

    async fn list_blog(&self, _request: Request<ListBlogRequest>) -> Result<Response<Self::ListBlogStream>, Status> {
        info!(rpc = "ListBlog", "ListBlog invoked");
        let scan = self.service.list().await.map_err(into_status)?;
        let stream = scan.map(|res| {
            res.map(|blog| ListBlogResponse { blog: Some(blog.into()) })
                .map_err(into_status)
        });
        Ok(Response::new(Box::pin(stream) as Self::ListBlogStream))
    }
}
