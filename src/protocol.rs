//! HTTP protocol selection.
//!
//! A client may allow several wire protocols at once. [`HttpProtocols`] is a
//! small bit set over the closed [`HttpProtocol`] enum, so a protocol the
//! client does not know about cannot be expressed at all.

use std::{fmt, ops, str::FromStr};

use crate::error::{Error, UnknownProtocol};

/// An HTTP protocol a client is allowed to speak.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpProtocol {
    /// HTTP/1.1.
    Http11,
    /// HTTP/2 negotiated over TLS (ALPN).
    H2,
    /// HTTP/2 over cleartext, with prior knowledge or upgrade.
    H2c,
}

impl HttpProtocol {
    const ALL: [HttpProtocol; 3] = [HttpProtocol::Http11, HttpProtocol::H2, HttpProtocol::H2c];

    #[inline]
    const fn bit(self) -> u8 {
        match self {
            HttpProtocol::Http11 => 0b100,
            HttpProtocol::H2 => 0b010,
            HttpProtocol::H2c => 0b001,
        }
    }

    /// Returns the canonical name of the protocol.
    pub const fn as_str(self) -> &'static str {
        match self {
            HttpProtocol::Http11 => "HTTP/1.1",
            HttpProtocol::H2 => "h2",
            HttpProtocol::H2c => "h2c",
        }
    }
}

impl fmt::Display for HttpProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpProtocol {
    type Err = Error;

    /// Parses `HTTP/1.1`, `http11`, `h2` or `h2c`, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("HTTP/1.1") || s.eq_ignore_ascii_case("http11") {
            Ok(HttpProtocol::Http11)
        } else if s.eq_ignore_ascii_case("h2") {
            Ok(HttpProtocol::H2)
        } else if s.eq_ignore_ascii_case("h2c") {
            Ok(HttpProtocol::H2c)
        } else {
            Err(Error::builder(UnknownProtocol(s.to_owned())))
        }
    }
}

/// A set of [`HttpProtocol`]s, stored as a bit mask.
///
/// The default set contains only HTTP/1.1.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct HttpProtocols(u8);

impl HttpProtocols {
    /// The empty set. A client configured with it cannot speak anything.
    pub const EMPTY: HttpProtocols = HttpProtocols(0);
    /// Only HTTP/1.1.
    pub const HTTP11: HttpProtocols = HttpProtocols(HttpProtocol::Http11.bit());
    /// Only HTTP/2 over TLS.
    pub const H2: HttpProtocols = HttpProtocols(HttpProtocol::H2.bit());
    /// Only HTTP/2 over cleartext.
    pub const H2C: HttpProtocols = HttpProtocols(HttpProtocol::H2c.bit());
    /// HTTP/1.1 with an h2c upgrade, the cleartext fallback combination.
    pub const HTTP11_OR_H2C: HttpProtocols =
        HttpProtocols(HttpProtocol::Http11.bit() | HttpProtocol::H2c.bit());

    /// Returns the raw mask.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns true if no protocol is in the set.
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns true if `protocol` is in the set.
    #[inline]
    pub const fn contains(self, protocol: HttpProtocol) -> bool {
        self.0 & protocol.bit() != 0
    }

    /// Adds `protocol` to the set.
    #[inline]
    pub fn insert(&mut self, protocol: HttpProtocol) {
        self.0 |= protocol.bit();
    }

    /// Removes `protocol` from the set.
    #[inline]
    pub fn remove(&mut self, protocol: HttpProtocol) {
        self.0 &= !protocol.bit();
    }

    /// Iterates the protocols in the set, HTTP/1.1 first.
    pub fn iter(self) -> impl Iterator<Item = HttpProtocol> {
        HttpProtocol::ALL
            .into_iter()
            .filter(move |p| self.contains(*p))
    }

    /// Builds a set from protocol names, skipping names that do not parse.
    ///
    /// If no name is recognized the set is empty.
    pub fn from_names_lossy<I, S>(names: I) -> HttpProtocols
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut protocols = HttpProtocols::EMPTY;
        for name in names {
            match name.as_ref().parse::<HttpProtocol>() {
                Ok(protocol) => protocols.insert(protocol),
                Err(_err) => debug!("ignoring http protocol name: {}", _err),
            }
        }
        protocols
    }
}

impl Default for HttpProtocols {
    fn default() -> Self {
        HttpProtocols::HTTP11
    }
}

impl fmt::Debug for HttpProtocols {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl From<HttpProtocol> for HttpProtocols {
    fn from(protocol: HttpProtocol) -> Self {
        HttpProtocols(protocol.bit())
    }
}

impl FromIterator<HttpProtocol> for HttpProtocols {
    fn from_iter<I: IntoIterator<Item = HttpProtocol>>(iter: I) -> Self {
        let mut protocols = HttpProtocols::EMPTY;
        protocols.extend(iter);
        protocols
    }
}

impl Extend<HttpProtocol> for HttpProtocols {
    fn extend<I: IntoIterator<Item = HttpProtocol>>(&mut self, iter: I) {
        for protocol in iter {
            self.insert(protocol);
        }
    }
}

impl ops::BitOr for HttpProtocols {
    type Output = HttpProtocols;

    fn bitor(self, rhs: HttpProtocols) -> HttpProtocols {
        HttpProtocols(self.0 | rhs.0)
    }
}

impl ops::BitOr<HttpProtocol> for HttpProtocols {
    type Output = HttpProtocols;

    fn bitor(self, rhs: HttpProtocol) -> HttpProtocols {
        HttpProtocols(self.0 | rhs.bit())
    }
}

impl ops::BitOrAssign<HttpProtocol> for HttpProtocols {
    fn bitor_assign(&mut self, rhs: HttpProtocol) {
        self.insert(rhs);
    }
}
