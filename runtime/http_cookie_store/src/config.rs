use std::path::Path;

use anyhow::Context;
use biscotti::SameSite;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};

use crate::errors::ConfigLoadError;

/// The prefix of the environment variables that can override
/// [`CookieStoreConfig`] values, e.g. `COOKIE_STORE_SECURE=false`.
const ENV_PREFIX: &str = "COOKIE_STORE_";

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
/// The default attributes of the cookies set via a [`CookieStore`](crate::CookieStore).
///
/// Every field can be omitted, falling back to its default value.
pub struct CookieStoreConfig {
    /// Set the `Path` attribute on outgoing cookies.
    ///
    /// By default, the attribute is set to `/`.
    #[serde(default = "default_path")]
    pub path: Option<String>,
    /// Set the `Domain` attribute on outgoing cookies.
    ///
    /// By default, the attribute is not set: the client will only send the cookie
    /// back to the exact host that set it.
    #[serde(default)]
    pub domain: Option<String>,
    /// Set the `Secure` attribute on outgoing cookies.
    ///
    /// If the cookie is marked as `Secure`, it will only be transmitted when the
    /// connection is secure (e.g. over HTTPS).
    ///
    /// Default is `true`.
    #[serde(default = "default_secure")]
    pub secure: bool,
    /// Set the `HttpOnly` attribute on outgoing cookies.
    ///
    /// If the cookie is marked as `HttpOnly`, it will not be visible to JavaScript
    /// snippets running in the browser.
    ///
    /// Default is `true`.
    #[serde(default = "default_http_only")]
    pub http_only: bool,
    /// Set the [`SameSite`] attribute on outgoing cookies.
    ///
    /// By default, the attribute is set to [`SameSite::Lax`].
    #[serde(default = "default_same_site")]
    #[serde(with = "same_site")]
    pub same_site: Option<SameSite>,
}

impl Default for CookieStoreConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            domain: None,
            secure: default_secure(),
            http_only: default_http_only(),
            same_site: default_same_site(),
        }
    }
}

impl CookieStoreConfig {
    /// Load the configuration, layering (from lowest to highest priority):
    ///
    /// - the default values of each field;
    /// - the YAML file at `path`, if provided;
    /// - environment variables prefixed with `COOKIE_STORE_`.
    ///
    /// A YAML file that doesn't exist is skipped.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigLoadError> {
        let span = tracing::info_span!(
            "Loading cookie store configuration",
            configuration.file = ?path,
        );
        let _guard = span.enter();

        let mut figment = Figment::new();
        if let Some(path) = path {
            figment = figment.merge(Yaml::file(path));
        }
        let figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment
            .extract()
            .context("Failed to deserialize the cookie store configuration")
            .map_err(ConfigLoadError)?;
        tracing::info!(
            cookie.secure = config.secure,
            cookie.http_only = config.http_only,
            "Loaded cookie store configuration"
        );
        Ok(config)
    }
}

fn default_path() -> Option<String> {
    Some("/".to_string())
}

fn default_secure() -> bool {
    true
}

fn default_http_only() -> bool {
    true
}

fn default_same_site() -> Option<SameSite> {
    Some(SameSite::Lax)
}

// `SameSite` doesn't implement `serde`'s traits, so we map it to and from its
// attribute value.
mod same_site {
    use biscotti::SameSite;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S>(value: &Option<SameSite>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(SameSite::Strict) => serializer.serialize_some("Strict"),
            Some(SameSite::Lax) => serializer.serialize_some("Lax"),
            Some(SameSite::None) => serializer.serialize_some("None"),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<SameSite>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        if raw.eq_ignore_ascii_case("strict") {
            Ok(Some(SameSite::Strict))
        } else if raw.eq_ignore_ascii_case("lax") {
            Ok(Some(SameSite::Lax))
        } else if raw.eq_ignore_ascii_case("none") {
            Ok(Some(SameSite::None))
        } else {
            Err(de::Error::invalid_value(
                de::Unexpected::Str(&raw),
                &"one of `Strict`, `Lax` or `None`",
            ))
        }
    }
}
