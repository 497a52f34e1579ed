/*!
Read, set and forget HTTP cookies for the duration of a single request.

# Lifecycle

Cookies travel in two directions:

- The client sends the cookies it holds using the `Cookie` request header.
- The server instructs the client to store, update or delete cookies using one
  `Set-Cookie` response header per cookie.

A [`CookieStore`] sits between the two for the lifetime of a request.
It is built from the cookies attached to the incoming request (see
[`extract_request_cookies`]), it lets you read and modify them, and it
queues a [`CookieDirective`] for every change.
The queued directives are attached to the outgoing response by
[`inject_response_cookies`].

Changes are mirrored into the request-scoped [`CookieJar`] as soon as they
are queued: if you set a cookie, a later read within the same request
observes the new value.

# Example

```rust
use http::header::{COOKIE, SET_COOKIE};
use http_cookie_store::{
    CookieStore, CookieStoreConfig, Processor, ProcessorConfig, inject_response_cookies,
};

# fn main() -> Result<(), Box<dyn std::error::Error>> {
let processor: Processor = ProcessorConfig::default().into();
let config = CookieStoreConfig::default();

let request = http::Request::builder()
    .header(COOKIE, "theme=dark; lang=en")
    .body(())?;
let mut store = CookieStore::from_request(request.headers(), &processor, &config);
assert_eq!(store.get("theme"), Some("dark"));

store.set("theme", "light", 60)?;
store.forget("lang");
assert_eq!(store.get("theme"), Some("light"));
assert_eq!(store.get_or("lang", "missing"), "missing");

let response = inject_response_cookies(http::Response::new(()), &mut store, &processor)?;
assert_eq!(response.headers().get_all(SET_COOKIE).iter().count(), 2);
# Ok(())
# }
```

# Non-goals

This crate doesn't manage sessions and it doesn't encrypt or sign cookie values.
*/
mod config;
mod directive;
pub mod errors;
mod jar;
mod response;
mod store;

pub use config::CookieStoreConfig;
pub use directive::{CookieDirective, Lifetime};
pub use jar::{CookieJar, extract_request_cookies};
pub use response::inject_response_cookies;
pub use store::CookieStore;

// The cookie types that show up in our public API.
pub use biscotti::{Processor, ProcessorConfig, ResponseCookie, SameSite};
