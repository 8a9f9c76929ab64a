//! Attaching a [`ClientConfig`] to a reusable builder.
//!
//! A client builder is meant to be reused, so it only offers a type-keyed
//! attribute store ([`http::Extensions`]) and knows nothing about request
//! settings. [`ConfigOverlay`] keeps one [`ClientConfig`] in that store:
//!
//! - every setter creates the config on first use and changes one field,
//! - [`ConfigOverlay::get_and_clean_conf`] hands the config to the client
//!   being built and empties the slot, so the next client built from the same
//!   builder starts from the defaults again.
//!
//! ```
//! use http::{Extensions, Method};
//! use rquest_conf::{Attributes, ConfigOverlay};
//!
//! #[derive(Default)]
//! struct Bootstrap {
//!     attrs: Extensions,
//! }
//!
//! impl Attributes for Bootstrap {
//!     fn attrs(&self) -> &Extensions {
//!         &self.attrs
//!     }
//!
//!     fn attrs_mut(&mut self) -> &mut Extensions {
//!         &mut self.attrs
//!     }
//! }
//!
//! let mut bootstrap = Bootstrap::default();
//! bootstrap.compress().follow_redirect().method(Method::POST);
//!
//! let config = bootstrap.get_and_clean_conf();
//! assert!(config.accept_gzip());
//! assert_eq!(config.method(), Method::POST);
//!
//! // the builder is clean again
//! assert_eq!(bootstrap.get_and_clean_conf().method(), Method::GET);
//! ```

use std::{borrow::Cow, sync::Arc};

use http::{Extensions, HeaderMap, Method};

use crate::{
    attr::{Attribute, AttributeKey},
    body::BodyProducer,
    config::ClientConfig,
    cookie::{CookieDecoder, CookieEncoder},
    protocol::{HttpProtocol, HttpProtocols},
    uri::DeferredUri,
};

/// The slot a builder's [`ClientConfig`] lives in.
#[derive(Clone, Copy)]
struct ClientConfigKey;

impl AttributeKey for ClientConfigKey {
    type Value = ClientConfig;
}

/// A builder that exposes a type-keyed attribute store.
pub trait Attributes {
    /// Returns the attribute store.
    fn attrs(&self) -> &Extensions;

    /// Returns the attribute store for mutation.
    fn attrs_mut(&mut self) -> &mut Extensions;
}

impl Attributes for Extensions {
    #[inline]
    fn attrs(&self) -> &Extensions {
        self
    }

    #[inline]
    fn attrs_mut(&mut self) -> &mut Extensions {
        self
    }
}

/// Configuration setters and the consuming getter for any [`Attributes`]
/// builder.
///
/// All setters return the builder so calls chain. Setting the same field twice
/// keeps the last value; fields do not affect each other.
pub trait ConfigOverlay: Attributes {
    /// Returns the builder's config, creating it with defaults if the slot is
    /// empty.
    ///
    /// Until [`get_and_clean_conf`](ConfigOverlay::get_and_clean_conf) is
    /// called, every call returns the same stored config.
    fn get_or_create_conf(&mut self) -> &mut ClientConfig {
        Attribute::<ClientConfigKey>::get_or_insert_with(self.attrs_mut(), || {
            trace!("creating client config slot");
            ClientConfig::new()
        })
    }

    /// Takes the builder's config and empties the slot.
    ///
    /// If nothing was configured, returns [`ClientConfig::canonical`] and
    /// leaves the store untouched.
    fn get_and_clean_conf(&mut self) -> Cow<'static, ClientConfig> {
        match Attribute::<ClientConfigKey>::take(self.attrs_mut()) {
            Some(config) => {
                trace!("consumed client config slot");
                Cow::Owned(config)
            }
            None => Cow::Borrowed(ClientConfig::canonical()),
        }
    }

    /// Returns the builder's config without creating one.
    #[inline]
    fn conf(&self) -> Option<&ClientConfig> {
        Attribute::<ClientConfigKey>::get(self.attrs())
    }

    /// Returns the configured headers without creating a config.
    #[inline]
    fn conf_headers(&self) -> Option<&Arc<HeaderMap>> {
        self.conf().and_then(ClientConfig::headers)
    }

    /// Accept compressed responses.
    fn compress(&mut self) -> &mut Self {
        self.get_or_create_conf().accept_gzip = true;
        self
    }

    /// Do not accept compressed responses.
    fn no_compress(&mut self) -> &mut Self {
        self.get_or_create_conf().accept_gzip = false;
        self
    }

    /// Force chunked transfer encoding.
    fn chunked(&mut self) -> &mut Self {
        self.get_or_create_conf().chunked_transfer = Some(true);
        self
    }

    /// Forbid chunked transfer encoding.
    fn no_chunked(&mut self) -> &mut Self {
        self.get_or_create_conf().chunked_transfer = Some(false);
        self
    }

    /// Follow redirects.
    fn follow_redirect(&mut self) -> &mut Self {
        self.get_or_create_conf().follow_redirect = true;
        self
    }

    /// Do not follow redirects.
    fn no_redirect(&mut self) -> &mut Self {
        self.get_or_create_conf().follow_redirect = false;
        self
    }

    /// Set the request URI.
    fn uri<U: Into<String>>(&mut self, uri: U) -> &mut Self {
        self.get_or_create_conf().uri = Some(uri.into());
        self
    }

    /// Set the base URI relative targets are appended to.
    fn base_uri<U: Into<String>>(&mut self, base_uri: U) -> &mut Self {
        self.get_or_create_conf().base_uri = Some(base_uri.into());
        self
    }

    /// Set a URI resolved when the request is sent. It takes priority over
    /// [`uri`](ConfigOverlay::uri).
    fn deferred_uri(&mut self, uri: DeferredUri) -> &mut Self {
        self.get_or_create_conf().deferred_uri = Some(uri);
        self
    }

    /// Set the request headers. The map is shared, not copied.
    fn headers<H: Into<Arc<HeaderMap>>>(&mut self, headers: H) -> &mut Self {
        self.get_or_create_conf().headers = Some(headers.into());
        self
    }

    /// Set the request method.
    fn method(&mut self, method: Method) -> &mut Self {
        self.get_or_create_conf().method = method;
        self
    }

    /// Set the request body producer.
    fn body(&mut self, body: BodyProducer) -> &mut Self {
        self.get_or_create_conf().body = Some(body);
        self
    }

    /// Replace the allowed protocols with exactly `protocols`.
    ///
    /// An empty input leaves the client with no protocol at all.
    fn protocols<I>(&mut self, protocols: I) -> &mut Self
    where
        I: IntoIterator<Item = HttpProtocol>,
    {
        self.get_or_create_conf().protocols = protocols.into_iter().collect();
        self
    }

    /// Replace the allowed protocols from their names, skipping names that do
    /// not parse as an [`HttpProtocol`].
    fn protocol_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.get_or_create_conf().protocols = HttpProtocols::from_names_lossy(names);
        self
    }

    /// Set the websocket subprotocols.
    fn websocket_subprotocols<S: Into<String>>(&mut self, protocols: S) -> &mut Self {
        self.get_or_create_conf().websocket_subprotocols = Some(protocols.into());
        self
    }

    /// Set the maximum websocket frame payload, in bytes.
    fn websocket_max_frame_payload_length(&mut self, length: usize) -> &mut Self {
        self.get_or_create_conf().websocket_max_frame_payload_length = length;
        self
    }

    /// Set the cookie encoder and decoder together.
    fn cookie_codec<E, D>(&mut self, encoder: E, decoder: D) -> &mut Self
    where
        E: CookieEncoder + 'static,
        D: CookieDecoder + 'static,
    {
        let config = self.get_or_create_conf();
        config.cookie_encoder = Arc::new(encoder);
        config.cookie_decoder = Arc::new(decoder);
        self
    }
}

impl<T: Attributes + ?Sized> ConfigOverlay for T {}
