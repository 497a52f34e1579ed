use biscotti::{Processor, RequestCookies};
use http::HeaderMap;
use http::header::COOKIE;
use indexmap::IndexMap;
use percent_encoding::percent_decode_str;
use tracing_log_error::log_error;

use crate::errors::ExtractRequestCookiesError;

/// The cookies attached to the current request, keyed by name.
///
/// Names are unique and iteration follows insertion order: the order in
/// which cookies appeared in the request, followed by the ones added
/// while handling it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: IndexMap<String, String>,
}

impl CookieJar {
    /// An empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.cookies.contains_key(name)
    }

    /// Insert a cookie, returning the value it replaced (if any).
    ///
    /// A replaced cookie keeps its position in the iteration order.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.cookies.insert(name.into(), value.into())
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.cookies.shift_remove(name)
    }

    /// The names of all the cookies in the jar.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cookies.keys().map(String::as_str)
    }

    /// Iterate over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cookies
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CookieJar
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut jar = CookieJar::new();
        for (name, value) in iter {
            jar.insert(name, value);
        }
        jar
    }
}

/// Parse cookies out of the `Cookie` headers of the incoming request.
///
/// Cookie values are decoded using `processor`.
/// If a cookie name appears more than once, the first occurrence wins.
///
/// # Invalid cookies
///
/// Invalid cookies are skipped, valid cookies in the same header are kept.
/// Every skipped cookie is logged at `WARN` level.
pub fn extract_request_cookies(headers: &HeaderMap, processor: &Processor) -> CookieJar {
    let mut jar = CookieJar::new();
    for header in headers.get_all(COOKIE) {
        let header = match header.to_str() {
            Ok(header) => header,
            Err(e) => {
                let e = ExtractRequestCookiesError::from(e);
                log_error!(
                    e,
                    level: tracing::Level::WARN,
                    "A `Cookie` header is invalid, ignoring it"
                );
                continue;
            }
        };
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            match parse_pair(pair, processor) {
                Ok(Some((name, value))) => {
                    jar.cookies.entry(name).or_insert(value);
                }
                Ok(None) => {}
                Err(e) => {
                    log_error!(
                        e,
                        level: tracing::Level::WARN,
                        "A request cookie is invalid, ignoring it"
                    );
                }
            }
        }
    }
    jar
}

fn parse_pair(
    pair: &str,
    processor: &Processor,
) -> Result<Option<(String, String)>, ExtractRequestCookiesError> {
    let cookies = RequestCookies::parse_header(pair, processor)?;
    let raw_name = pair.split_once('=').map_or(pair, |(name, _)| name).trim();
    // The processor may have percent-decoded the name.
    let decoded_name = percent_decode_str(raw_name).decode_utf8_lossy();
    let cookie = cookies
        .get(&decoded_name)
        .map(|c| (decoded_name.as_ref(), c))
        .or_else(|| cookies.get(raw_name).map(|c| (raw_name, c)));
    Ok(cookie.map(|(name, cookie)| (name.to_owned(), cookie.value().to_owned())))
}
