//! The per-client configuration record.

use std::sync::Arc;

use http::{HeaderMap, Method};
use once_cell::sync::Lazy;

use crate::{
    body::BodyProducer,
    cookie::{CookieDecoder, CookieEncoder, Strict},
    error::Result,
    protocol::{HttpProtocol, HttpProtocols},
    uri::DeferredUri,
};

/// Default maximum websocket frame payload, in bytes.
pub const DEFAULT_WEBSOCKET_MAX_FRAME_PAYLOAD_LENGTH: usize = 65536;

static CANONICAL: Lazy<ClientConfig> = Lazy::new(ClientConfig::new);

/// Request-level settings accumulated for one client instance.
///
/// A `ClientConfig` is usually built up through [`ConfigOverlay`] on a
/// reusable builder and handed to the client exactly once. It can also be
/// built directly with [`ClientConfig::builder`].
///
/// `headers` and `body` are shared: cloning or [deriving] a config never
/// copies them.
///
/// [`ConfigOverlay`]: crate::ConfigOverlay
/// [deriving]: ClientConfig::derive_for
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub(crate) accept_gzip: bool,
    pub(crate) follow_redirect: bool,
    pub(crate) chunked_transfer: Option<bool>,
    pub(crate) deferred_uri: Option<DeferredUri>,
    pub(crate) uri: Option<String>,
    pub(crate) base_uri: Option<String>,
    pub(crate) headers: Option<Arc<HeaderMap>>,
    pub(crate) method: Method,
    pub(crate) websocket_subprotocols: Option<String>,
    pub(crate) websocket_max_frame_payload_length: usize,
    pub(crate) protocols: HttpProtocols,
    pub(crate) cookie_encoder: Arc<dyn CookieEncoder>,
    pub(crate) cookie_decoder: Arc<dyn CookieDecoder>,
    pub(crate) body: Option<BodyProducer>,
}

// ===== impl ClientConfig =====

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig::new()
    }
}

impl ClientConfig {
    /// Creates a config with every field at its default.
    pub fn new() -> ClientConfig {
        ClientConfig {
            accept_gzip: false,
            follow_redirect: false,
            chunked_transfer: None,
            deferred_uri: None,
            uri: None,
            base_uri: None,
            headers: None,
            method: Method::GET,
            websocket_subprotocols: None,
            websocket_max_frame_payload_length: DEFAULT_WEBSOCKET_MAX_FRAME_PAYLOAD_LENGTH,
            protocols: HttpProtocols::HTTP11,
            cookie_encoder: Arc::new(Strict),
            cookie_decoder: Arc::new(Strict),
            body: None,
        }
    }

    /// Returns the process-wide default config.
    ///
    /// It is what a consumer gets when nothing was ever configured, and it
    /// is only reachable by shared reference.
    #[inline]
    pub fn canonical() -> &'static ClientConfig {
        &CANONICAL
    }

    /// Returns a [`ClientConfigBuilder`] starting from the defaults.
    #[inline]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            config: ClientConfig::new(),
        }
    }

    /// Specializes this config for another request target.
    ///
    /// The new config has `uri` set and carries over compression, redirects,
    /// chunking, the base URI, the (shared) headers, the method, the websocket
    /// settings and the (shared) body producer. Everything else, including
    /// any deferred URI, protocols and cookie codecs, is reset to defaults.
    pub fn derive_for<U: Into<String>>(&self, uri: U) -> ClientConfig {
        ClientConfig {
            uri: Some(uri.into()),
            accept_gzip: self.accept_gzip,
            follow_redirect: self.follow_redirect,
            chunked_transfer: self.chunked_transfer,
            base_uri: self.base_uri.clone(),
            headers: self.headers.clone(),
            method: self.method.clone(),
            websocket_subprotocols: self.websocket_subprotocols.clone(),
            websocket_max_frame_payload_length: self.websocket_max_frame_payload_length,
            body: self.body.clone(),
            ..ClientConfig::new()
        }
    }

    /// Resolves the request target.
    ///
    /// A deferred URI takes priority over a plain one. A target starting with
    /// `/` is appended to the base URI when one is set. Returns `Ok(None)` if
    /// no target was configured.
    ///
    /// # Errors
    ///
    /// Fails only if the deferred URI producer fails.
    pub async fn resolve_uri(&self) -> Result<Option<String>> {
        let uri = match self.deferred_uri {
            Some(ref deferred) => deferred.resolve().await?,
            None => match self.uri {
                Some(ref uri) => uri.clone(),
                None => return Ok(None),
            },
        };

        match self.base_uri {
            Some(ref base) if uri.starts_with('/') => {
                Ok(Some(format!("{}{}", base.trim_end_matches('/'), uri)))
            }
            _ => Ok(Some(uri)),
        }
    }

    /// Returns true if compressed responses are accepted.
    #[inline]
    pub fn accept_gzip(&self) -> bool {
        self.accept_gzip
    }

    /// Returns true if redirects are followed.
    #[inline]
    pub fn follow_redirect(&self) -> bool {
        self.follow_redirect
    }

    /// Returns the chunked transfer setting, `None` if left to the client.
    #[inline]
    pub fn chunked_transfer(&self) -> Option<bool> {
        self.chunked_transfer
    }

    /// Returns the deferred URI, if any.
    #[inline]
    pub fn deferred_uri(&self) -> Option<&DeferredUri> {
        self.deferred_uri.as_ref()
    }

    /// Returns the request URI, if any.
    #[inline]
    pub fn uri(&self) -> Option<&str> {
        self.uri.as_deref()
    }

    /// Returns the base URI, if any.
    #[inline]
    pub fn base_uri(&self) -> Option<&str> {
        self.base_uri.as_deref()
    }

    /// Returns the shared request headers, if any.
    #[inline]
    pub fn headers(&self) -> Option<&Arc<HeaderMap>> {
        self.headers.as_ref()
    }

    /// Returns the request method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the websocket subprotocols, if any.
    #[inline]
    pub fn websocket_subprotocols(&self) -> Option<&str> {
        self.websocket_subprotocols.as_deref()
    }

    /// Returns the maximum websocket frame payload, in bytes.
    #[inline]
    pub fn websocket_max_frame_payload_length(&self) -> usize {
        self.websocket_max_frame_payload_length
    }

    /// Returns the allowed protocols.
    #[inline]
    pub fn protocols(&self) -> HttpProtocols {
        self.protocols
    }

    /// Returns the cookie encoder.
    #[inline]
    pub fn cookie_encoder(&self) -> &dyn CookieEncoder {
        &*self.cookie_encoder
    }

    /// Returns the cookie decoder.
    #[inline]
    pub fn cookie_decoder(&self) -> &dyn CookieDecoder {
        &*self.cookie_decoder
    }

    /// Returns the request body producer, if any.
    #[inline]
    pub fn body(&self) -> Option<&BodyProducer> {
        self.body.as_ref()
    }
}

/// A `ClientConfigBuilder` builds a [`ClientConfig`] owned by the caller.
///
/// It covers the same settings as [`ConfigOverlay`] without going through a
/// builder's attribute store.
///
/// [`ConfigOverlay`]: crate::ConfigOverlay
#[must_use]
#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

// ===== impl ClientConfigBuilder =====

impl ClientConfigBuilder {
    /// Returns the built [`ClientConfig`].
    pub fn build(self) -> ClientConfig {
        self.config
    }

    /// Enable or disable accepting compressed responses.
    pub fn gzip(mut self, enable: bool) -> ClientConfigBuilder {
        self.config.accept_gzip = enable;
        self
    }

    /// Enable or disable following redirects.
    pub fn follow_redirect(mut self, enable: bool) -> ClientConfigBuilder {
        self.config.follow_redirect = enable;
        self
    }

    /// Force chunked transfer encoding on or off.
    pub fn chunked_transfer(mut self, enable: bool) -> ClientConfigBuilder {
        self.config.chunked_transfer = Some(enable);
        self
    }

    /// Set the request URI.
    pub fn uri<U: Into<String>>(mut self, uri: U) -> ClientConfigBuilder {
        self.config.uri = Some(uri.into());
        self
    }

    /// Set a URI resolved when the request is sent.
    pub fn deferred_uri(mut self, uri: DeferredUri) -> ClientConfigBuilder {
        self.config.deferred_uri = Some(uri);
        self
    }

    /// Set the base URI relative targets are appended to.
    pub fn base_uri<U: Into<String>>(mut self, base_uri: U) -> ClientConfigBuilder {
        self.config.base_uri = Some(base_uri.into());
        self
    }

    /// Set the request headers.
    pub fn headers<H: Into<Arc<HeaderMap>>>(mut self, headers: H) -> ClientConfigBuilder {
        self.config.headers = Some(headers.into());
        self
    }

    /// Set the request method.
    pub fn method(mut self, method: Method) -> ClientConfigBuilder {
        self.config.method = method;
        self
    }

    /// Set the websocket subprotocols.
    pub fn websocket_subprotocols<S: Into<String>>(mut self, protocols: S) -> ClientConfigBuilder {
        self.config.websocket_subprotocols = Some(protocols.into());
        self
    }

    /// Set the maximum websocket frame payload, in bytes.
    pub fn websocket_max_frame_payload_length(mut self, length: usize) -> ClientConfigBuilder {
        self.config.websocket_max_frame_payload_length = length;
        self
    }

    /// Replace the allowed protocols.
    pub fn protocols<I>(mut self, protocols: I) -> ClientConfigBuilder
    where
        I: IntoIterator<Item = HttpProtocol>,
    {
        self.config.protocols = protocols.into_iter().collect();
        self
    }

    /// Set the cookie encoder and decoder together.
    pub fn cookie_codec<E, D>(mut self, encoder: E, decoder: D) -> ClientConfigBuilder
    where
        E: CookieEncoder + 'static,
        D: CookieDecoder + 'static,
    {
        self.config.cookie_encoder = Arc::new(encoder);
        self.config.cookie_decoder = Arc::new(decoder);
        self
    }

    /// Set the request body producer.
    pub fn body(mut self, body: BodyProducer) -> ClientConfigBuilder {
        self.config.body = Some(body);
        self
    }
}
