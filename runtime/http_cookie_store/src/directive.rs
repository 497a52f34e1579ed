use biscotti::{Expiration, RemovalCookie, ResponseCookie, SameSite};
use jiff::{SignedDuration, Timestamp, tz::TimeZone};

use crate::CookieStoreConfig;

/// How long the client should keep a cookie around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifetime {
    /// The client must delete the cookie as soon as it receives the directive.
    ///
    /// The directive carries an empty value and an `Expires` attribute in the past.
    Expired,
    /// The cookie is deleted when the client session ends.
    ///
    /// No `Expires` attribute is set. Each browser has its own idea of when a
    /// session ends: both Firefox and Chrome, for example, restore session
    /// cookies when the browser is restarted.
    Session,
    /// The cookie expires once the given duration has elapsed.
    ExpiresIn(SignedDuration),
}

impl Lifetime {
    /// Interpret a number of minutes:
    ///
    /// - a negative number means [`Lifetime::Expired`];
    /// - zero means [`Lifetime::Session`];
    /// - a positive number means [`Lifetime::ExpiresIn`] that many minutes from now.
    pub fn from_minutes(minutes: i64) -> Self {
        match minutes {
            m if m < 0 => Lifetime::Expired,
            0 => Lifetime::Session,
            m => Lifetime::ExpiresIn(SignedDuration::from_secs(m.saturating_mul(60))),
        }
    }

    /// The point in time at which the cookie expires, if it has one.
    ///
    /// Expired cookies report the Unix epoch.
    /// Durations that would overflow are clamped to the latest timestamp we can represent.
    pub fn expires_at(&self, now: Timestamp) -> Option<Timestamp> {
        match self {
            Lifetime::Expired => Some(Timestamp::UNIX_EPOCH),
            Lifetime::Session => None,
            Lifetime::ExpiresIn(duration) => {
                Some(now.checked_add(*duration).unwrap_or(Timestamp::MAX))
            }
        }
    }
}

/// An instruction for the client to set, update or expire a cookie.
///
/// It becomes a `Set-Cookie` header on the outgoing response.
///
/// # Example
///
/// ```rust
/// use http_cookie_store::{CookieDirective, Lifetime, SameSite};
///
/// let directive = CookieDirective::new("theme", "dark")
///     .lifetime(Lifetime::from_minutes(30))
///     .domain("example.com")
///     .same_site(SameSite::Strict);
/// assert_eq!(directive.name(), "theme");
/// assert_eq!(directive.get_lifetime(), Lifetime::from_minutes(30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookieDirective {
    name: String,
    value: String,
    lifetime: Lifetime,
    path: Option<String>,
    domain: Option<String>,
    secure: bool,
    http_only: bool,
    same_site: Option<SameSite>,
}

impl CookieDirective {
    /// A session cookie with the default attributes of [`CookieStoreConfig`]:
    /// `Path=/`, `Secure`, `HttpOnly` and `SameSite=Lax`.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::with_defaults(name, value, &CookieStoreConfig::default())
    }

    /// A session cookie whose attributes are taken from `config`.
    pub fn with_defaults(
        name: impl Into<String>,
        value: impl Into<String>,
        config: &CookieStoreConfig,
    ) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            lifetime: Lifetime::Session,
            path: config.path.clone(),
            domain: config.domain.clone(),
            secure: config.secure,
            http_only: config.http_only,
            same_site: config.same_site,
        }
    }

    pub fn lifetime(mut self, lifetime: Lifetime) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// An empty path leaves the `Path` attribute unset.
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into()).filter(|p: &String| !p.is_empty());
        self
    }

    /// An empty domain leaves the `Domain` attribute unset.
    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into()).filter(|d: &String| !d.is_empty());
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    pub fn same_site(mut self, same_site: impl Into<Option<SameSite>>) -> Self {
        self.same_site = same_site.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn get_lifetime(&self) -> Lifetime {
        self.lifetime
    }

    pub fn get_path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn get_domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// Build the [`ResponseCookie`] matching this directive.
    ///
    /// `now` is used to compute the `Expires` attribute of cookies with
    /// a [`Lifetime::ExpiresIn`] lifetime.
    pub fn into_response_cookie(self, now: Timestamp) -> ResponseCookie<'static> {
        let mut cookie = match self.lifetime {
            Lifetime::Expired => {
                let mut removal = RemovalCookie::new(self.name);
                if let Some(path) = self.path {
                    removal = removal.set_path(path);
                }
                if let Some(domain) = self.domain {
                    removal = removal.set_domain(domain);
                }
                ResponseCookie::from(removal)
            }
            Lifetime::Session | Lifetime::ExpiresIn(_) => {
                let mut cookie = ResponseCookie::new(self.name, self.value);
                if let Some(path) = self.path {
                    cookie = cookie.set_path(path);
                }
                if let Some(domain) = self.domain {
                    cookie = cookie.set_domain(domain);
                }
                if let Some(expires_at) = self.lifetime.expires_at(now) {
                    cookie = cookie
                        .set_expires(Expiration::DateTime(expires_at.to_zoned(TimeZone::UTC)));
                }
                cookie
            }
        };
        if let Some(same_site) = self.same_site {
            cookie = cookie.set_same_site(same_site);
        }
        if self.secure {
            cookie = cookie.set_secure(true);
        }
        if self.http_only {
            cookie = cookie.set_http_only(true);
        }
        cookie
    }
}
