//! HTTP cookie codecs.
//!
//! A client carries one [`CookieEncoder`] for the outgoing `Cookie` header and
//! one [`CookieDecoder`] for incoming `Set-Cookie` headers. Both are set as a
//! pair so a client never runs with mismatched halves.

use std::{fmt, str};

use http::HeaderValue;

use crate::error::{Error, Result};

pub use cookie_crate::Cookie;

/// Encodes cookies into a `Cookie` request header.
pub trait CookieEncoder: fmt::Debug + Send + Sync {
    /// Encodes `cookies` as `name=value` pairs joined by `; `.
    ///
    /// Returns `Ok(None)` when there is nothing to send.
    fn encode(&self, cookies: &[Cookie<'_>]) -> Result<Option<HeaderValue>>;
}

/// Decodes a `Set-Cookie` response header.
pub trait CookieDecoder: fmt::Debug + Send + Sync {
    /// Decodes a single `Set-Cookie` header value, or `None` if the codec
    /// refuses it.
    fn decode(&self, header: &HeaderValue) -> Option<Cookie<'static>>;
}

/// The RFC 6265 codec.
///
/// The encoder rejects cookie names that are not tokens and values made of
/// anything but cookie-octets, and orders cookies by path length, longest
/// first. The decoder drops cookies with such names or values.
#[derive(Debug, Clone, Copy, Default)]
pub struct Strict;

/// A codec that neither validates nor reorders.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lax;

// ===== impl Strict =====

impl CookieEncoder for Strict {
    fn encode(&self, cookies: &[Cookie<'_>]) -> Result<Option<HeaderValue>> {
        for cookie in cookies {
            validate(cookie.name(), cookie.value()).map_err(Error::cookie)?;
        }

        let mut ordered: Vec<&Cookie<'_>> = cookies.iter().collect();
        // Stable, so equal paths keep insertion order.
        ordered.sort_by_key(|c| std::cmp::Reverse(c.path().map_or(0, str::len)));

        join(ordered)
    }
}

impl CookieDecoder for Strict {
    fn decode(&self, header: &HeaderValue) -> Option<Cookie<'static>> {
        let cookie = parse(header)?;
        match validate(cookie.name(), cookie.value()) {
            Ok(()) => Some(cookie),
            Err(_err) => {
                trace!("dropping set-cookie: {}", _err);
                None
            }
        }
    }
}

// ===== impl Lax =====

impl CookieEncoder for Lax {
    fn encode(&self, cookies: &[Cookie<'_>]) -> Result<Option<HeaderValue>> {
        join(cookies.iter())
    }
}

impl CookieDecoder for Lax {
    fn decode(&self, header: &HeaderValue) -> Option<Cookie<'static>> {
        parse(header)
    }
}

fn parse(header: &HeaderValue) -> Option<Cookie<'static>> {
    str::from_utf8(header.as_bytes())
        .ok()
        .and_then(|s| Cookie::parse(s.to_owned()).ok())
}

fn join<'a, 'c: 'a, I>(cookies: I) -> Result<Option<HeaderValue>>
where
    I: IntoIterator<Item = &'a Cookie<'c>>,
{
    let mut buf = String::new();
    for cookie in cookies {
        if !buf.is_empty() {
            buf.push_str("; ");
        }
        buf.push_str(cookie.name());
        buf.push('=');
        buf.push_str(cookie.value());
    }

    if buf.is_empty() {
        return Ok(None);
    }

    HeaderValue::from_str(&buf).map(Some).map_err(Error::cookie)
}

fn validate(name: &str, value: &str) -> std::result::Result<(), InvalidCookie> {
    if name.is_empty() || !name.bytes().all(is_token) {
        return Err(InvalidCookie::Name(name.to_owned()));
    }

    let unquoted = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    if !unquoted.bytes().all(is_cookie_octet) {
        return Err(InvalidCookie::Value(name.to_owned()));
    }

    Ok(())
}

// token = 1*<any CHAR except CTLs or separators>
fn is_token(b: u8) -> bool {
    matches!(b, 0x21..=0x7e)
        && !matches!(
            b,
            b'(' | b')'
                | b'<'
                | b'>'
                | b'@'
                | b','
                | b';'
                | b':'
                | b'\\'
                | b'"'
                | b'/'
                | b'['
                | b']'
                | b'?'
                | b'='
                | b'{'
                | b'}'
        )
}

// cookie-octet = %x21 / %x23-2B / %x2D-3A / %x3C-5B / %x5D-7E
fn is_cookie_octet(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2b | 0x2d..=0x3a | 0x3c..=0x5b | 0x5d..=0x7e)
}

#[derive(Debug)]
enum InvalidCookie {
    Name(String),
    Value(String),
}

impl fmt::Display for InvalidCookie {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InvalidCookie::Name(name) => write!(f, "invalid cookie name {name:?}"),
            InvalidCookie::Value(name) => write!(f, "invalid value for cookie {name:?}"),
        }
    }
}

impl std::error::Error for InvalidCookie {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_encodes_pairs() {
        let cookies = [Cookie::new("a", "1"), Cookie::new("b", "2")];
        let header = Strict.encode(&cookies).unwrap().unwrap();
        assert_eq!(header, "a=1; b=2");
    }

    #[test]
    fn empty_input_encodes_nothing() {
        assert!(Strict.encode(&[]).unwrap().is_none());
        assert!(Lax.encode(&[]).unwrap().is_none());
    }

    #[test]
    fn strict_orders_longest_path_first() {
        let mut root = Cookie::new("root", "r");
        root.set_path("/");
        let mut deep = Cookie::new("deep", "d");
        deep.set_path("/a/b/c");
        let plain = Cookie::new("plain", "p");

        let header = Strict.encode(&[plain.clone(), root.clone(), deep.clone()]).unwrap().unwrap();
        assert_eq!(header, "deep=d; root=r; plain=p");

        let header = Lax.encode(&[plain, root, deep]).unwrap().unwrap();
        assert_eq!(header, "plain=p; root=r; deep=d");
    }

    #[test]
    fn strict_rejects_invalid_value() {
        let err = Strict.encode(&[Cookie::new("a", "x\\y")]).unwrap_err();
        assert!(err.is_cookie());

        let err = Strict.encode(&[Cookie::new("bad name", "v")]).unwrap_err();
        assert!(err.is_cookie());
    }

    #[test]
    fn strict_accepts_quoted_value() {
        let header = Strict.encode(&[Cookie::new("q", "\"abc\"")]).unwrap().unwrap();
        assert_eq!(header, "q=\"abc\"");
    }

    #[test]
    fn lax_skips_validation() {
        let header = Lax.encode(&[Cookie::new("a", "x\\y")]).unwrap().unwrap();
        assert_eq!(header, "a=x\\y");
    }

    #[test]
    fn decode_set_cookie() {
        let header = HeaderValue::from_static("session=abc123; Path=/; HttpOnly");
        let cookie = Strict.decode(&header).unwrap();
        assert_eq!(cookie.name(), "session");
        assert_eq!(cookie.value(), "abc123");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
    }

    #[test]
    fn strict_decoder_drops_invalid_value() {
        let header = HeaderValue::from_static("a=x\\y");
        assert!(Strict.decode(&header).is_none());
        assert_eq!(Lax.decode(&header).unwrap().value(), "x\\y");
    }

    #[test]
    fn decode_garbage() {
        let header = HeaderValue::from_static("=");
        assert!(Lax.decode(&header).is_none());
    }
}
