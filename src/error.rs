use std::{error::Error as StdError, fmt};

/// A `Result` alias where the `Err` case is `rquest_conf::Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// A boxed error type that can be used for dynamic error handling.
pub type BoxError = Box<dyn StdError + Send + Sync>;

/// The Errors that may occur when consuming a client configuration.
///
/// Attaching and mutating configuration never fails. Errors only come out of
/// the pieces a consumer drives later: parsing protocol names, resolving a
/// deferred URI, running a body producer, or encoding cookies.
pub struct Error {
    inner: Box<Inner>,
}

struct Inner {
    kind: Kind,
    source: Option<BoxError>,
}

impl Error {
    pub(crate) fn new<E>(kind: Kind, source: Option<E>) -> Error
    where
        E: Into<BoxError>,
    {
        Error {
            inner: Box::new(Inner {
                kind,
                source: source.map(Into::into),
            }),
        }
    }

    pub(crate) fn builder<E: Into<BoxError>>(e: E) -> Error {
        Error::new(Kind::Builder, Some(e))
    }

    pub(crate) fn uri<E: Into<BoxError>>(e: E) -> Error {
        Error::new(Kind::Uri, Some(e))
    }

    pub(crate) fn body<E: Into<BoxError>>(e: E) -> Error {
        Error::new(Kind::Body, Some(e))
    }

    pub(crate) fn cookie<E: Into<BoxError>>(e: E) -> Error {
        Error::new(Kind::Cookie, Some(e))
    }
}

impl Error {
    /// Returns true if the error came from building configuration values,
    /// such as an unknown protocol name.
    pub fn is_builder(&self) -> bool {
        matches!(self.inner.kind, Kind::Builder)
    }

    /// Returns true if the error came from resolving a deferred URI.
    pub fn is_uri(&self) -> bool {
        matches!(self.inner.kind, Kind::Uri)
    }

    /// Returns true if the error came from a request body producer.
    pub fn is_body(&self) -> bool {
        matches!(self.inner.kind, Kind::Body)
    }

    /// Returns true if the error came from a cookie codec.
    pub fn is_cookie(&self) -> bool {
        matches!(self.inner.kind, Kind::Cookie)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut builder = f.debug_struct("rquest_conf::Error");

        builder.field("kind", &self.inner.kind);

        if let Some(ref source) = self.inner.source {
            builder.field("source", source);
        }

        builder.finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.inner.kind {
            Kind::Builder => f.write_str("builder error")?,
            Kind::Uri => f.write_str("error resolving deferred uri")?,
            Kind::Body => f.write_str("request body producer error")?,
            Kind::Cookie => f.write_str("cookie codec error")?,
        };

        if let Some(e) = &self.inner.source {
            write!(f, ": {e}")?;
        }

        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source.as_ref().map(|e| &**e as _)
    }
}

#[derive(Debug)]
pub(crate) enum Kind {
    Builder,
    Uri,
    Body,
    Cookie,
}

#[derive(Debug)]
pub(crate) struct UnknownProtocol(pub(crate) String);

impl fmt::Display for UnknownProtocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown http protocol {:?}", self.0)
    }
}

impl StdError for UnknownProtocol {}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn test_source_chain() {
        let root = Error::new(Kind::Body, None::<Error>);
        assert!(root.source().is_none());

        let link = Error::uri(root);
        assert!(link.source().is_some());
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn mem_size_of() {
        use std::mem::size_of;
        assert_eq!(size_of::<Error>(), size_of::<usize>());
    }

    #[test]
    fn display_includes_source() {
        let err = Error::builder(UnknownProtocol("h3".to_owned()));
        assert!(err.is_builder());
        assert_eq!(err.to_string(), "builder error: unknown http protocol \"h3\"");
    }

    #[test]
    fn kind_predicates() {
        assert!(Error::cookie("bad").is_cookie());
        assert!(Error::body("bad").is_body());
        assert!(!Error::body("bad").is_uri());
    }
}
