#![deny(missing_docs)]
#![deny(missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(test, deny(warnings))]

//! # rquest-conf
//!
//! The `rquest-conf` crate keeps the request-level settings of an HTTP client
//! on a reusable client builder.
//!
//! A builder that is reused for many clients cannot own per-client settings
//! directly. Instead it exposes a type-keyed attribute store, and this crate
//! keeps a single [`ClientConfig`] in it:
//!
//! - Any number of call sites change one setting each through
//!   [`ConfigOverlay`]. The config is created on first use.
//! - The code building the client takes the config once with
//!   [`ConfigOverlay::get_and_clean_conf`], which empties the slot again.
//!   If nothing was configured it gets the shared
//!   [`ClientConfig::canonical`] defaults.
//!
//! Settings covered: compression, redirects, chunked transfer, request URI
//! (plain, deferred or relative to a base), headers, method, body producer,
//! [protocols](HttpProtocols), websocket parameters and the
//! [cookie codec](cookie) pair.
//!
//! ## Attaching configuration
//!
//! ```rust
//! use http::{Extensions, Method};
//! use rquest_conf::{ConfigOverlay, HttpProtocol, HttpProtocols};
//!
//! let mut attrs = Extensions::new();
//! attrs
//!     .compress()
//!     .method(Method::POST)
//!     .protocols([HttpProtocol::H2, HttpProtocol::H2c]);
//!
//! let config = attrs.get_and_clean_conf();
//! assert!(config.accept_gzip());
//! assert_eq!(config.protocols(), HttpProtocols::H2 | HttpProtocols::H2C);
//! ```
//!
//! ## Owning configuration
//!
//! A client constructor that owns its settings can skip the attribute store:
//!
//! ```rust
//! use rquest_conf::ClientConfig;
//!
//! let config = ClientConfig::builder()
//!     .gzip(true)
//!     .base_uri("http://example.com")
//!     .build();
//! let per_request = config.derive_for("/users");
//! assert!(per_request.accept_gzip());
//! ```
//!
//! ## Optional Features
//!
//! - **tracing**: Emit `tracing` events when a config is created or consumed.

#[macro_use]
mod trace;

mod attr;
mod body;
mod config;
mod error;
mod overlay;
mod protocol;
mod uri;

pub mod cookie;

pub use self::body::{BodyProducer, Outbound};
pub use self::config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_WEBSOCKET_MAX_FRAME_PAYLOAD_LENGTH,
};
pub use self::error::{BoxError, Error, Result};
pub use self::overlay::{Attributes, ConfigOverlay};
pub use self::protocol::{HttpProtocol, HttpProtocols};
pub use self::uri::DeferredUri;
