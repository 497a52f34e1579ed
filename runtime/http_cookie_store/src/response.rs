use biscotti::Processor;
use http::HeaderValue;
use http::header::SET_COOKIE;

use crate::CookieStore;
use crate::errors::InjectResponseCookiesError;

/// Attach the cookies queued in `store` to the outgoing response, one
/// `Set-Cookie` header per cookie.
///
/// The store is committed as soon as this function is called, even if it fails:
/// no response cookies can be added after this point.
pub fn inject_response_cookies<B>(
    mut response: http::Response<B>,
    store: &mut CookieStore<'_>,
    processor: &Processor,
) -> Result<http::Response<B>, InjectResponseCookiesError> {
    for value in store.commit().header_values(processor) {
        let value = HeaderValue::from_str(&value).map_err(|_| InjectResponseCookiesError {
            invalid_header_value: value,
        })?;
        response.headers_mut().append(SET_COOKIE, value);
    }
    Ok(response)
}
