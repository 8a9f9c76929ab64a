mod support;

use std::sync::{Arc, Mutex};

use bytes::Bytes;
use futures_util::{sink, SinkExt};
use http::{header::CONTENT_TYPE, HeaderValue, Request};
use rquest_conf::{BodyProducer, BoxError, ConfigOverlay, DeferredUri, Outbound};
use support::bootstrap::Bootstrap;

fn collecting_outbound() -> (Outbound, Arc<Mutex<Vec<Bytes>>>) {
    let chunks = Arc::new(Mutex::new(Vec::new()));
    let outbound: Outbound = Box::pin(sink::unfold(
        chunks.clone(),
        |chunks, chunk: Bytes| async move {
            chunks.lock().unwrap().push(chunk);
            Ok::<_, BoxError>(chunks)
        },
    ));
    (outbound, chunks)
}

#[tokio::test]
async fn body_producer_writes_outbound() {
    let mut b = Bootstrap::new();
    b.body(BodyProducer::new(|head, mut outbound: Outbound| {
        head.headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("text/plain"));
        async move {
            outbound.send(Bytes::from_static(b"hello ")).await?;
            outbound.send(Bytes::from_static(b"world")).await?;
            outbound.close().await
        }
    }));

    let config = b.get_and_clean_conf();
    let producer = config.body().expect("body producer");

    let (mut head, ()) = Request::new(()).into_parts();
    let (outbound, chunks) = collecting_outbound();
    producer.produce(&mut head, outbound).await.expect("produce");

    assert_eq!(head.headers[CONTENT_TYPE], "text/plain");
    assert_eq!(
        *chunks.lock().unwrap(),
        vec![Bytes::from_static(b"hello "), Bytes::from_static(b"world")]
    );
}

#[tokio::test]
async fn body_producer_failure() {
    let producer = BodyProducer::new(|_, _| async { Err::<(), _>("stream reset") });

    let (mut head, ()) = Request::new(()).into_parts();
    let (outbound, chunks) = collecting_outbound();
    let err = producer.produce(&mut head, outbound).await.unwrap_err();

    assert!(err.is_body());
    assert!(chunks.lock().unwrap().is_empty());
}

#[tokio::test]
async fn body_producer_survives_derive() {
    let producer = BodyProducer::new(|_, _| async { Ok::<_, BoxError>(()) });

    let mut b = Bootstrap::new();
    b.uri("http://a").body(producer.clone());
    let derived = b.get_and_clean_conf().derive_for("http://b");

    assert!(derived.body().expect("body").ptr_eq(&producer));
}

#[tokio::test]
async fn deferred_uri_wins_over_plain_uri() {
    let mut b = Bootstrap::new();
    b.uri("http://plain")
        .base_uri("http://example.com")
        .deferred_uri(DeferredUri::new(|| async {
            Ok::<_, BoxError>("/resolved".to_owned())
        }));

    let config = b.get_and_clean_conf();
    assert_eq!(config.uri(), Some("http://plain"));
    assert_eq!(
        config.resolve_uri().await.expect("resolve").as_deref(),
        Some("http://example.com/resolved")
    );
}

#[tokio::test]
async fn canonical_has_no_target() {
    let mut b = Bootstrap::new();
    assert_eq!(b.get_and_clean_conf().resolve_uri().await.unwrap(), None);
}
