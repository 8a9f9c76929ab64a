use std::{fmt, future::Future, sync::Arc};

use futures_util::future::{self, BoxFuture, FutureExt};

use crate::error::{BoxError, Error, Result};

type Producer = dyn Fn() -> BoxFuture<'static, std::result::Result<String, BoxError>> + Send + Sync;

/// A request URI that is only known once it is resolved.
///
/// The producer runs on every call to [`DeferredUri::resolve`], never at
/// construction. Clones share the producer.
#[derive(Clone)]
pub struct DeferredUri(Arc<Producer>);

impl DeferredUri {
    /// Creates a deferred URI from an async producer.
    pub fn new<F, Fut, E>(producer: F) -> DeferredUri
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<String, E>> + Send + 'static,
        E: Into<BoxError>,
    {
        DeferredUri(Arc::new(move || {
            producer()
                .map(|r| r.map_err(Into::<BoxError>::into))
                .boxed()
        }))
    }

    /// Creates a deferred URI that resolves to an already known value.
    pub fn ready<S: Into<String>>(uri: S) -> DeferredUri {
        let uri = uri.into();
        DeferredUri(Arc::new(move || {
            future::ready(Ok::<_, BoxError>(uri.clone())).boxed()
        }))
    }

    /// Runs the producer and returns the URI.
    pub async fn resolve(&self) -> Result<String> {
        (self.0)().await.map_err(Error::uri)
    }
}

impl fmt::Debug for DeferredUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DeferredUri(..)")
    }
}
