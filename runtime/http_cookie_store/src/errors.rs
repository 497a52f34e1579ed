//! Errors that can occur when working with a [`CookieStore`](crate::CookieStore).
use http::header::ToStrError;

pub use biscotti::errors::ParseError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error type returned by [`CookieStore::set`](crate::CookieStore::set)
/// and [`CookieStore::set_with`](crate::CookieStore::set_with).
pub enum SetCookieError {
    /// The response headers have already been finalized, there is no room
    /// left for another `Set-Cookie` header.
    #[error("Can't set the `{name}` cookie: the response headers have already been sent")]
    ResponseCommitted {
        /// The name of the cookie that couldn't be set.
        name: String,
    },
}

#[derive(Debug, thiserror::Error)]
/// The reasons why a request cookie may be skipped by
/// [`extract_request_cookies`](crate::extract_request_cookies).
pub enum ExtractRequestCookiesError {
    #[error("Some characters in the `Cookie` header aren't printable ASCII characters.")]
    InvalidHeaderValue(#[from] ToStrError),
    #[error("Failed to parse a request cookie out of the `Cookie` header.")]
    ParseError(#[from] ParseError),
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[error("Some characters in the `Set-Cookie` header value are not printable ASCII characters.")]
/// The error type returned by [`inject_response_cookies`](crate::inject_response_cookies).
pub struct InjectResponseCookiesError {
    /// The invalid header value.
    pub invalid_header_value: String,
}

#[derive(Debug, thiserror::Error)]
#[error("Failed to load the cookie store configuration")]
/// The error type returned by [`CookieStoreConfig::load`](crate::CookieStoreConfig::load).
pub struct ConfigLoadError(#[source] pub(crate) anyhow::Error);
