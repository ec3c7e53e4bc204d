//! Layer API client — the primary entry point for the SDK.
//!
//! [`Client`] owns a [`Transport`] and hands out one lightweight façade per
//! resource family. Façades validate their inputs, build an [`Operation`],
//! and return the transport's outcome unchanged.
//!
//! [`Operation`]: crate::Operation

mod announcements;
mod badges;
mod blocklist;
mod conversations;
mod identities;
mod messages;

#[cfg(test)]
pub(crate) mod mock;

use std::time::Duration;

use serde_json::Value;

pub use announcements::Announcements;
pub use badges::Badges;
pub use blocklist::Blocklist;
pub use conversations::Conversations;
pub use identities::Identities;
pub use messages::{MIME_TEXT, Messages, text_body};

use crate::error::{Error, Result};
use crate::id;
use crate::transport::{API_URL, HttpTransport, Settings, Transport};
use crate::types::{ConnectionReuse, PatchOperation};

/// Default API version sent in the `Accept` header.
pub const DEFAULT_VERSION: &str = "1.0";

/// Default end-to-end request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// A Layer Platform API client scoped to one application.
///
/// Safe to share between tasks; every call is independent.
#[derive(Debug, Clone)]
pub struct Client<T = HttpTransport> {
    transport: T,
}

impl Client {
    /// Create a new [`ClientBuilder`].
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }
}

impl<T: Transport> Client<T> {
    /// Wrap an existing transport.
    #[must_use]
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    /// The underlying transport.
    #[must_use]
    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Conversation operations.
    #[must_use]
    pub const fn conversations(&self) -> Conversations<'_, T> {
        Conversations::new(&self.transport)
    }

    /// Message operations.
    #[must_use]
    pub const fn messages(&self) -> Messages<'_, T> {
        Messages::new(&self.transport)
    }

    /// Announcement operations.
    #[must_use]
    pub const fn announcements(&self) -> Announcements<'_, T> {
        Announcements::new(&self.transport)
    }

    /// Block list operations.
    #[must_use]
    pub const fn blocklist(&self) -> Blocklist<'_, T> {
        Blocklist::new(&self.transport)
    }

    /// Identity operations.
    #[must_use]
    pub const fn identities(&self) -> Identities<'_, T> {
        Identities::new(&self.transport)
    }

    /// Badge operations.
    #[must_use]
    pub const fn badges(&self) -> Badges<'_, T> {
        Badges::new(&self.transport)
    }
}

/// Builder for constructing a [`Client`].
#[derive(Debug, Clone, Default)]
pub struct ClientBuilder {
    token: Option<String>,
    app_id: Option<String>,
    version: Option<String>,
    timeout: Option<Duration>,
    reuse: Option<ConnectionReuse>,
    api_url: Option<String>,
    debug: bool,
}

impl ClientBuilder {
    /// Platform API bearer token (required).
    #[must_use]
    pub fn token(mut self, t: impl Into<String>) -> Self {
        self.token = Some(t.into());
        self
    }

    /// Application ID (required). Accepts a bare UUID or a full
    /// `layer:///apps/<env>/<uuid>` reference.
    #[must_use]
    pub fn app_id(mut self, id: impl Into<String>) -> Self {
        self.app_id = Some(id.into());
        self
    }

    /// API version for content negotiation (default: [`DEFAULT_VERSION`]).
    #[must_use]
    pub fn version(mut self, v: impl Into<String>) -> Self {
        self.version = Some(v.into());
        self
    }

    /// End-to-end request timeout (default: [`DEFAULT_TIMEOUT`]).
    #[must_use]
    pub const fn timeout(mut self, t: Duration) -> Self {
        self.timeout = Some(t);
        self
    }

    /// Keep connections alive between calls.
    #[must_use]
    pub fn connection_reuse(mut self, reuse: ConnectionReuse) -> Self {
        self.reuse = Some(reuse);
        self
    }

    /// Override the API URL (default: [`API_URL`]).
    #[must_use]
    pub fn api_url(mut self, u: impl Into<String>) -> Self {
        self.api_url = Some(u.into());
        self
    }

    /// Emit `tracing` debug events for responses, errors and timeouts.
    #[must_use]
    pub const fn debug(mut self, on: bool) -> Self {
        self.debug = on;
        self
    }

    /// Validate the configuration and build the client.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`] if the token is missing or empty, the app ID
    /// is not a UUID, or the timeout, API URL or connection reuse settings
    /// are unusable.
    pub fn build(self) -> Result<Client> {
        let token = self
            .token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| Error::Configuration("a non-empty `token` is required".into()))?;
        let app_id = self
            .app_id
            .as_deref()
            .and_then(id::normalize)
            .ok_or_else(|| Error::Configuration("a valid `app_id` (UUID) is required".into()))?
            .to_owned();

        let settings = Settings {
            token,
            app_id,
            version: self.version.unwrap_or_else(|| DEFAULT_VERSION.into()),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            reuse: self.reuse,
            api_url: self.api_url.unwrap_or_else(|| API_URL.into()),
            debug: self.debug,
        };
        if settings.debug {
            tracing::debug!(
                app_id = %settings.app_id,
                version = env!("CARGO_PKG_VERSION"),
                "initialized"
            );
        }
        HttpTransport::new(settings).map(Client::with_transport)
    }
}

/// Normalize a UUID argument or fail with `msg`.
fn require_uuid<'a>(value: &'a str, msg: &str) -> Result<&'a str> {
    id::normalize(value).ok_or_else(|| Error::validation(msg))
}

/// Require a non-empty string argument and escape it as a path segment.
fn require_segment(value: &str, msg: &str) -> Result<String> {
    if value.is_empty() {
        Err(Error::validation(msg))
    } else {
        Ok(id::escape_segment(value))
    }
}

/// Require a JSON object body.
fn require_object(body: &Value, msg: &str) -> Result<()> {
    if body.is_object() {
        Ok(())
    } else {
        Err(Error::validation(msg))
    }
}

/// Encode patch operations as a Layer Patch document.
fn patch_body(ops: &[PatchOperation]) -> Result<Value> {
    serde_json::to_value(ops).map_err(|e| Error::Validation(format!("patch operations: {e}")))
}
