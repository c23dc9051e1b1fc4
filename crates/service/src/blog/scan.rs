use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::{BoxStream, Stream, StreamExt};
use models::Blog;
use tracing::debug;

use crate::errors::ServiceError;

/// One-shot, lazily polled scan over the blog collection.
///
/// Owns the underlying store cursor. The cursor is released exactly once:
/// on exhaustion, on the first error (the scan then ends), or when the scan
/// is dropped early because the consumer went away.
pub struct BlogScan {
    inner: Option<BoxStream<'static, Result<Blog, ServiceError>>>,
    emitted: u64,
}

impl BlogScan {
    pub fn new<S>(inner: S) -> Self
    where
        S: Stream<Item = Result<Blog, ServiceError>> + Send + 'static,
    {
        Self { inner: Some(inner.boxed()), emitted: 0 }
    }

    /// Records yielded so far.
    pub fn emitted(&self) -> u64 { self.emitted }

    /// Whether the underlying cursor has been dropped.
    pub fn is_released(&self) -> bool { self.inner.is_none() }

    fn release(&mut self, reason: &'static str) {
        if self.inner.take().is_some() {
            debug!(emitted = self.emitted, reason, "blog scan released");
        }
    }
}

impl Stream for BlogScan {
    type Item = Result<Blog, ServiceError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let Some(inner) = this.inner.as_mut() else {
            return Poll::Ready(None);
        };
        match inner.poll_next_unpin(cx) {
            Poll::Ready(Some(Ok(blog))) => {
                this.emitted += 1;
                Poll::Ready(Some(Ok(blog)))
            }
            Poll::Ready(Some(Err(e))) => {
                this.release("error");
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.release("exhausted");
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Some(inner) => inner.size_hint(),
            None => (0, Some(0)),
        }
    }
}

impl Drop for BlogScan {
    fn drop(&mut self) { self.release("dropped"); }
}

impl std::fmt::Debug for BlogScan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlogScan")
            .field("emitted", &self.emitted)
            .field("released", &self.is_released())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::stream;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use models::{BlogFields, BlogId};

    fn blog(title: &str) -> Blog {
        Blog::new(BlogId::generate(), BlogFields { author_id: "a".into(), title: title.into(), content: "c".into() })
    }

    /// Counts drops of the wrapped stream.
    struct DropCounter(Arc<AtomicUsize>);

    impl Drop for DropCounter {
        fn drop(&mut self) { self.0.fetch_add(1, Ordering::SeqCst); }
    }

    fn counted(items: Vec<Result<Blog, ServiceError>>, drops: &Arc<AtomicUsize>) -> BlogScan {
        let guard = DropCounter(Arc::clone(drops));
        BlogScan::new(stream::iter(items).map(move |item| {
            let _guard = &guard;
            item
        }))
    }

    #[tokio::test]
    async fn exhaustion_releases_once() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut scan = counted(vec![Ok(blog("a")), Ok(blog("b"))], &drops);

        assert!(scan.next().await.is_some());
        assert!(scan.next().await.is_some());
        assert!(scan.next().await.is_none());
        assert!(scan.is_released());
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert_eq!(scan.emitted(), 2);

        // polling after the end stays ended
        assert!(scan.next().await.is_none());
        drop(scan);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn error_ends_scan_and_releases() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut scan = counted(
            vec![Ok(blog("a")), Err(ServiceError::Db("boom".into())), Ok(blog("never"))],
            &drops,
        );

        assert!(matches!(scan.next().await, Some(Ok(_))));
        assert!(matches!(scan.next().await, Some(Err(ServiceError::Db(_)))));
        assert_eq!(drops.load(Ordering::SeqCst), 1);
        assert!(scan.next().await.is_none());
        assert_eq!(scan.emitted(), 1);
    }

    #[tokio::test]
    async fn early_drop_releases() {
        let drops = Arc::new(AtomicUsize::new(0));
        let mut scan = counted(vec![Ok(blog("a")), Ok(blog("b")), Ok(blog("c"))], &drops);

        assert!(scan.next().await.is_some());
        assert_eq!(drops.load(Ordering::SeqCst), 0);
        drop(scan);
        assert_eq!(drops.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_scan_yields_nothing() {
        let scan = BlogScan::new(stream::empty());
        let items: Vec<_> = scan.collect().await;
        assert!(items.is_empty());
    }
}
