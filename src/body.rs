use std::{fmt, future::Future, pin::Pin, sync::Arc};

use bytes::Bytes;
use futures_util::{
    future::{BoxFuture, FutureExt},
    Sink,
};
use http::request::Parts;

use crate::error::{BoxError, Error, Result};

/// The outbound side of a request: body chunks written here go on the wire.
pub type Outbound = Pin<Box<dyn Sink<Bytes, Error = BoxError> + Send>>;

type Producer =
    dyn Fn(&mut Parts, Outbound) -> BoxFuture<'static, std::result::Result<(), BoxError>> + Send + Sync;

/// Writes a request body.
///
/// The producer gets the request head first, and may still change it, then
/// returns a future that writes the body to the [`Outbound`] sink. It completes
/// when the body is fully written. Clones share the producer.
#[derive(Clone)]
pub struct BodyProducer(Arc<Producer>);

impl BodyProducer {
    /// Creates a body producer from a function of the request head and the
    /// outbound sink.
    pub fn new<F, Fut, E>(producer: F) -> BodyProducer
    where
        F: Fn(&mut Parts, Outbound) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = std::result::Result<(), E>> + Send + 'static,
        E: Into<BoxError>,
    {
        BodyProducer(Arc::new(move |head: &mut Parts, outbound: Outbound| {
            producer(head, outbound)
                .map(|r| r.map_err(Into::<BoxError>::into))
                .boxed()
        }))
    }

    /// Hands `head` and `outbound` to the producer and returns the future that
    /// writes the body.
    pub fn produce(
        &self,
        head: &mut Parts,
        outbound: Outbound,
    ) -> impl Future<Output = Result<()>> + Send + 'static {
        (self.0)(head, outbound).map(|r| r.map_err(Error::body))
    }

    /// Returns true if both producers are the same shared function.
    pub fn ptr_eq(&self, other: &BodyProducer) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for BodyProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BodyProducer(..)")
    }
}
