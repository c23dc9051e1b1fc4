#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use server::proto::blog_service_client::BlogServiceClient;
use service::blog::BlogRepository;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tonic::transport::Channel;

pub struct TestApp {
    pub addr: SocketAddr,
    pub endpoint: String,
    shutdown: Option<oneshot::Sender<()>>,
    handle: Option<tokio::task::JoinHandle<anyhow::Result<()>>>,
}

impl TestApp {
    pub async fn client(&self) -> anyhow::Result<BlogServiceClient<Channel>> {
        Ok(BlogServiceClient::connect(self.endpoint.clone()).await?)
    }

    /// Trigger graceful shutdown and wait for the server task.
    pub async fn stop(mut self) -> anyhow::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        if let Some(handle) = self.handle.take() {
            match tokio::time::timeout(Duration::from_secs(5), handle).await {
                Ok(joined) => joined??,
                Err(_) => anyhow::bail!("server did not shut down within 5s"),
            }
        }
        Ok(())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
    }
}

/// Bind an ephemeral port and serve `repo` on it.
pub async fn start_server<R: BlogRepository + 'static>(repo: Arc<R>) -> anyhow::Result<TestApp> {
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = listener.local_addr()?;
    let (tx, rx) = oneshot::channel::<()>();

    let handle = tokio::spawn(async move {
        server::serve(repo, listener, async {
            let _ = rx.await;
        })
        .await
    });

    Ok(TestApp {
        addr,
        endpoint: format!("http://{}:{}", addr.ip(), addr.port()),
        shutdown: Some(tx),
        handle: Some(handle),
    })
}

pub fn blog(id: &str, author: &str, title: &str, content: &str) -> server::proto::Blog {
    server::proto::Blog { id: id.into(), author_id: author.into(), title: title.into(), content: content.into() }
}
