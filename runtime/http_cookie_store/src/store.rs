use biscotti::{Processor, ResponseCookie, ResponseCookies};
use http::HeaderMap;
use jiff::Timestamp;
use tracing_log_error::log_error;

use crate::errors::SetCookieError;
use crate::{CookieDirective, CookieJar, CookieStoreConfig, Lifetime, extract_request_cookies};

/// Read and modify the cookies of the current request.
///
/// A store belongs to a single request: build a fresh one for every request you
/// handle, either via [`CookieStore::from_request`] or [`CookieStore::new`].
///
/// # Reads
///
/// Reads go to the request-scoped [`CookieJar`]. It starts out with the cookies
/// sent by the client and it's updated, synchronously, by every successful call
/// to [`set`](Self::set), [`set_with`](Self::set_with) and [`forget`](Self::forget).
///
/// # Writes
///
/// Every write queues a [`CookieDirective`] that will be sent to the client as a
/// `Set-Cookie` header by [`inject_response_cookies`](crate::inject_response_cookies).
/// Once the response cookies have been injected the store is *committed*:
/// further writes are rejected with [`SetCookieError::ResponseCommitted`].
#[derive(Debug)]
pub struct CookieStore<'config> {
    config: &'config CookieStoreConfig,
    jar: CookieJar,
    outgoing: ResponseCookies<'static>,
    committed: bool,
}

impl<'config> CookieStore<'config> {
    /// Wrap the cookies of the current request.
    pub fn new(jar: CookieJar, config: &'config CookieStoreConfig) -> Self {
        Self {
            config,
            jar,
            outgoing: ResponseCookies::new(),
            committed: false,
        }
    }

    /// Parse the `Cookie` headers of the current request and wrap them.
    ///
    /// See [`extract_request_cookies`] for details on how invalid cookies are handled.
    pub fn from_request(
        headers: &HeaderMap,
        processor: &Processor,
        config: &'config CookieStoreConfig,
    ) -> Self {
        Self::new(extract_request_cookies(headers, processor), config)
    }

    /// All the cookies visible to the current request.
    pub fn all(&self) -> &CookieJar {
        &self.jar
    }

    /// The value of the cookie named `name`, if there is one.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.jar.get(name)
    }

    /// The value of the cookie named `name`, or `default` if there is no such cookie.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Returns `true` if there is a cookie named `name` and its value is truthy.
    ///
    /// # Falsy values
    ///
    /// An empty value and `"0"` are falsy: a cookie holding either of them
    /// is reported as missing.
    /// Use [`CookieJar::contains`] via [`CookieStore::all`] if you need to
    /// know if the cookie was sent at all.
    ///
    /// ```rust
    /// use http_cookie_store::{CookieJar, CookieStore, CookieStoreConfig};
    ///
    /// let config = CookieStoreConfig::default();
    /// let jar: CookieJar = [("empty", ""), ("zero", "0"), ("one", "1")].into_iter().collect();
    /// let store = CookieStore::new(jar, &config);
    ///
    /// assert!(!store.has("empty"));
    /// assert!(!store.has("zero"));
    /// assert!(store.has("one"));
    /// assert!(store.all().contains("zero"));
    /// ```
    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some_and(is_truthy)
    }

    /// A [`CookieDirective`] for `name` and `value`, using the attributes from
    /// the store configuration.
    ///
    /// Customise it and then pass it to [`CookieStore::set_with`].
    pub fn directive(&self, name: impl Into<String>, value: impl Into<String>) -> CookieDirective {
        CookieDirective::with_defaults(name, value, self.config)
    }

    /// Set a cookie using the attributes from the store configuration.
    ///
    /// `minutes` determines the cookie [`Lifetime`]:
    ///
    /// - negative: the client deletes the cookie straight away, and it's removed
    ///   from the current request too;
    /// - zero: the cookie lasts until the client session ends;
    /// - positive: the cookie expires `minutes` minutes from now.
    ///
    /// See [`CookieStore::set_with`] for the error conditions.
    pub fn set(
        &mut self,
        name: impl Into<String>,
        value: impl Into<String>,
        minutes: i64,
    ) -> Result<(), SetCookieError> {
        let directive = self
            .directive(name, value)
            .lifetime(Lifetime::from_minutes(minutes));
        self.set_with(directive)
    }

    /// Queue `directive` for the response and mirror it into the current request.
    ///
    /// If a directive with the same name, domain and path has already been queued,
    /// it gets replaced.
    ///
    /// # Errors
    ///
    /// It fails if the response cookies have already been injected into the response.
    /// Nothing changes, neither in the queue nor in the current request, when that happens.
    pub fn set_with(&mut self, directive: CookieDirective) -> Result<(), SetCookieError> {
        if self.committed {
            return Err(SetCookieError::ResponseCommitted {
                name: directive.name().to_owned(),
            });
        }
        let lifetime = directive.get_lifetime();
        tracing::debug!(
            cookie.name = directive.name(),
            cookie.lifetime = ?lifetime,
            "Queueing a response cookie"
        );
        match lifetime {
            Lifetime::Expired => {
                self.jar.remove(directive.name());
            }
            Lifetime::Session | Lifetime::ExpiresIn(_) => {
                self.jar.insert(directive.name(), directive.value());
            }
        }
        self.outgoing
            .insert(directive.into_response_cookie(Timestamp::now()));
        Ok(())
    }

    /// Tell the client to delete the cookie named `name`, using the path from
    /// the store configuration.
    ///
    /// The cookie is removed from the current request straight away.
    /// Forgetting a cookie that doesn't exist is fine: the client is still told
    /// to delete it.
    pub fn forget(&mut self, name: &str) {
        let directive = self.directive(name, "").lifetime(Lifetime::Expired);
        self.forget_directive(directive);
    }

    /// Tell the client to delete the cookie named `name` that was set for `path`.
    ///
    /// An empty `path` means no `Path` attribute.
    pub fn forget_with_path(&mut self, name: &str, path: &str) {
        let directive = self
            .directive(name, "")
            .lifetime(Lifetime::Expired)
            .path(path);
        self.forget_directive(directive);
    }

    /// Forget every cookie visible to the current request.
    pub fn forget_all(&mut self) {
        let names: Vec<String> = self.jar.names().map(ToOwned::to_owned).collect();
        tracing::trace!(cookie.count = names.len(), "Forgetting all cookies");
        for name in &names {
            self.forget(name);
        }
    }

    fn forget_directive(&mut self, directive: CookieDirective) {
        let name = directive.name().to_owned();
        if let Err(e) = self.set_with(directive) {
            log_error!(
                e,
                level: tracing::Level::WARN,
                cookie.name = %name,
                "Failed to tell the client to delete a cookie"
            );
        }
        self.jar.remove(&name);
    }

    /// Returns `true` if the response cookies have already been injected into
    /// the outgoing response.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// The cookies queued for the outgoing response.
    pub fn response_cookies(&self) -> impl Iterator<Item = &ResponseCookie<'static>> {
        self.outgoing.iter()
    }

    /// Mark the store as committed and hand over the queued cookies.
    pub(crate) fn commit(&mut self) -> ResponseCookies<'static> {
        self.committed = true;
        std::mem::take(&mut self.outgoing)
    }
}

// Both "" and "0" are falsy.
fn is_truthy(value: &str) -> bool {
    !value.is_empty() && value != "0"
}
