use std::{future::Future, sync::Arc};

use common::utils::logging::{self, LogFormat};
use configs::{AppConfig, StorageBackend};
use dotenvy::dotenv;
use service::blog::{repo::MongoBlogRepository, BlogRepository};
use service::storage::MemoryBlogStore;
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::handler::BlogHandler;
use crate::proto::{self, blog_service_server::BlogServiceServer};

/// Load `.env`, then config file or env fallbacks, validated.
pub fn load_config() -> anyhow::Result<AppConfig> {
    dotenv().ok();
    AppConfig::load_or_env()
}

/// Initialize logging in the format named by `logging.format`
pub fn init_logging(cfg: &AppConfig) -> Result<(), StartupError> {
    let format: LogFormat = cfg
        .logging
        .format
        .parse()
        .map_err(|e: logging::UnknownLogFormat| StartupError::InvalidConfig(e.to_string()))?;
    logging::init_logging(format);
    Ok(())
}

/// Serve the blog gRPC service (plus health and reflection) on `listener`
/// until `shutdown` resolves.
pub async fn serve<R, F>(repo: Arc<R>, listener: TcpListener, shutdown: F) -> anyhow::Result<()>
where
    R: BlogRepository + 'static,
    F: Future<Output = ()>,
{
    let addr = listener.local_addr()?;
    let handler = BlogHandler::from_repository(repo);

    let (mut health_reporter, health_service) = tonic_health::server::health_reporter();
    health_reporter.set_serving::<BlogServiceServer<BlogHandler<R>>>().await;

    let reflection = tonic_reflection::server::Builder::configure()
        .register_encoded_file_descriptor_set(proto::FILE_DESCRIPTOR_SET)
        .build_v1()?;

    info!(%addr, "serving blog.BlogService");
    Server::builder()
        .layer(TraceLayer::new_for_grpc())
        .add_service(health_service)
        .add_service(reflection)
        .add_service(BlogServiceServer::new(handler))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;
    info!(%addr, "stopped serving");
    Ok(())
}

/// Public entry: connect storage per config and run the gRPC server until `shutdown`.
pub async fn run<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    let addr = cfg
        .bind_addr()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address: {e}")))?;

    match cfg.database.backend {
        StorageBackend::Memory => {
            warn!("using in-memory blog store; data is lost on exit");
            let listener = TcpListener::bind(addr).await?;
            serve(Arc::new(MemoryBlogStore::new()), listener, shutdown).await
        }
        StorageBackend::Mongo => {
            info!(database = %cfg.database.database, "connecting to mongodb");
            let client = models::db::connect(&cfg.database)
                .await
                .map_err(|e| StartupError::Runtime(format!("cannot connect to mongodb: {e}")))?;
            let collection = models::db::blog_collection(&client, &cfg.database);
            let repo = Arc::new(MongoBlogRepository::new(collection));

            let served = match TcpListener::bind(addr).await {
                Ok(listener) => serve(repo, listener, shutdown).await,
                Err(e) => Err(e.into()),
            };

            info!("closing mongodb connection");
            client.shutdown().await;
            served
        }
    }
}
