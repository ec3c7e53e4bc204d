//! Transport core: executes one [`Operation`] as one HTTPS exchange and
//! classifies the outcome.
//!
//! Every call resolves to exactly one value: a [`Response`] for statuses
//! below 300, or an [`Error::Response`] / [`Error::Transport`]. The timeout
//! races the whole exchange (connect, headers, body); when it wins, the
//! exchange future is dropped, which closes its connection, and no later
//! network error can surface for that call.

use std::future::Future;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, IF_NONE_MATCH};
use serde_json::Value;

use crate::error::{Error, ResponseError, Result, TransportError};
use crate::types::{Body, ConnectionReuse, Method, Operation, Response};

/// Production API endpoint (HTTPS, port 443).
pub const API_URL: &str = "https://api.layer.com";

/// Every request path is scoped under `/apps/<app_id>`.
const PREFIX: &str = "/apps/";

/// Executes [`Operation`]s against the Layer Platform API.
///
/// Implementors provide [`execute`](Self::execute); the per-verb helpers are
/// shared.
pub trait Transport: Send + Sync {
    /// Run one operation to completion.
    ///
    /// # Errors
    ///
    /// [`Error::Response`] when the service answers with a status `>= 300`,
    /// [`Error::Transport`] when the exchange fails or times out.
    fn execute(&self, op: Operation) -> impl Future<Output = Result<Response>> + Send;

    /// `GET path`.
    fn get(&self, path: impl Into<String>) -> impl Future<Output = Result<Response>> + Send {
        self.execute(Operation::new(Method::Get, path))
    }

    /// `POST path` with a JSON body.
    fn post(
        &self,
        path: impl Into<String>,
        body: Value,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.execute(Operation::new(Method::Post, path).body(body))
    }

    /// `PATCH path` with a Layer Patch body.
    fn patch(
        &self,
        path: impl Into<String>,
        body: Value,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.execute(Operation::new(Method::Patch, path).body(body))
    }

    /// `PUT path` with a JSON body.
    fn put(
        &self,
        path: impl Into<String>,
        body: Value,
    ) -> impl Future<Output = Result<Response>> + Send {
        self.execute(Operation::new(Method::Put, path).body(body))
    }

    /// `DELETE path`.
    fn delete(&self, path: impl Into<String>) -> impl Future<Output = Result<Response>> + Send {
        self.execute(Operation::new(Method::Delete, path))
    }
}

/// Session settings consumed by [`HttpTransport::new`].
#[derive(Debug, Clone)]
pub(crate) struct Settings {
    pub token: String,
    pub app_id: String,
    pub version: String,
    pub timeout: Duration,
    pub reuse: Option<ConnectionReuse>,
    pub api_url: String,
    pub debug: bool,
}

/// [`Transport`] over HTTPS, backed by a `reqwest` client.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    base: String,
    accept: HeaderValue,
    authorization: HeaderValue,
    timeout: Duration,
    debug: bool,
}

impl HttpTransport {
    /// Validate settings and build the underlying HTTP client.
    pub(crate) fn new(s: Settings) -> Result<Self> {
        if s.timeout.is_zero() {
            return Err(Error::Configuration("timeout must be non-zero".into()));
        }
        let api = url::Url::parse(&s.api_url)
            .map_err(|e| Error::Configuration(format!("bad API URL {}: {e}", s.api_url)))?;
        if !matches!(api.scheme(), "https" | "http") {
            return Err(Error::Configuration(format!(
                "unsupported API URL scheme: {}",
                api.scheme()
            )));
        }

        let accept = HeaderValue::from_str(&format!(
            "application/vnd.layer+json; version={}",
            s.version
        ))
        .map_err(|_| Error::Configuration(format!("invalid API version: {:?}", s.version)))?;
        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", s.token))
            .map_err(|_| Error::Configuration("token contains invalid characters".into()))?;
        authorization.set_sensitive(true);

        Ok(Self {
            http: build_http(s.reuse)?,
            base: format!("{}{PREFIX}{}", s.api_url.trim_end_matches('/'), s.app_id),
            accept,
            authorization,
            timeout: s.timeout,
            debug: s.debug,
        })
    }

    /// Configured end-to-end timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Absolute URL for an app-relative path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base)
    }

    /// Headers for one call.
    fn headers(&self, op: &Operation) -> Result<HeaderMap> {
        let mut h = HeaderMap::with_capacity(4);
        h.insert(ACCEPT, self.accept.clone());
        h.insert(AUTHORIZATION, self.authorization.clone());
        h.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(op.method().content_type()),
        );
        if let Some(key) = op.dedupe_key() {
            let v = HeaderValue::from_str(key).map_err(|_| {
                TransportError::unsendable(format!("invalid de-duplication key: {key:?}"))
            })?;
            h.insert(IF_NONE_MATCH, v);
        }
        Ok(h)
    }

    /// Connect, send, and read the full response. Bytes read so far are
    /// left in `buf` so a timeout can report them.
    async fn exchange(&self, op: &Operation, buf: &mut Vec<u8>) -> Result<Response> {
        let mut req = self
            .http
            .request(op.method().into(), self.url(op.path()))
            .headers(self.headers(op)?);
        if let Some(body) = op.json() {
            req = req.body(body.to_string());
        }

        let mut res = req.send().await.map_err(|e| self.failure(e, buf))?;
        let status = res.status().as_u16();
        if self.debug {
            tracing::debug!(status, method = %op.method(), path = op.path(), "response");
        }

        while let Some(chunk) = res.chunk().await.map_err(|e| self.failure(e, buf))? {
            buf.extend_from_slice(&chunk);
        }
        let body = Body::parse(String::from_utf8_lossy(buf).into_owned());

        if status >= 300 {
            Err(ResponseError { status, body }.into())
        } else {
            Ok(Response { status, body })
        }
    }

    fn failure(&self, e: reqwest::Error, partial: &[u8]) -> Error {
        if self.debug {
            tracing::debug!(error = %e, "request error");
        }
        let message = if e.is_connect() {
            format!("connection failed: {e}")
        } else {
            format!("request failed: {e}")
        };
        TransportError::new(message, e)
            .with_partial(String::from_utf8_lossy(partial).into_owned())
            .into()
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, op: Operation) -> Result<Response> {
        let mut buf = Vec::new();
        let outcome = tokio::time::timeout(self.timeout, self.exchange(&op, &mut buf)).await;
        match outcome {
            Ok(result) => result,
            Err(_) => {
                let secs = self.timeout.as_secs_f64();
                if self.debug {
                    tracing::debug!(
                        method = %op.method(),
                        path = op.path(),
                        "request timeout error after {secs} seconds"
                    );
                }
                Err(
                    TransportError::timeout(format!("request timeout after {secs} seconds"))
                        .with_partial(String::from_utf8_lossy(&buf).into_owned())
                        .into(),
                )
            }
        }
    }
}

/// Build the `reqwest` client for a reuse policy. Redirects are never
/// followed; a 3xx is reported to the caller as a response error.
fn build_http(reuse: Option<ConnectionReuse>) -> Result<reqwest::Client> {
    match reuse {
        None => finish(no_redirect().pool_max_idle_per_host(0)),
        Some(ConnectionReuse::Shared(pool)) => Ok(pool.into_http()),
        Some(ConnectionReuse::Pooled {
            max_idle_per_host,
            idle_timeout,
        }) => pooled(max_idle_per_host, idle_timeout),
    }
}

/// Validated pooling client. Also backs [`SharedPool`](crate::SharedPool).
pub(crate) fn pooled(
    max_idle_per_host: usize,
    idle_timeout: Option<Duration>,
) -> Result<reqwest::Client> {
    if max_idle_per_host == 0 {
        return Err(Error::Configuration(
            "connection reuse needs at least one idle connection per host".into(),
        ));
    }
    if idle_timeout.is_some_and(|t| t.is_zero()) {
        return Err(Error::Configuration(
            "connection reuse idle timeout must be non-zero".into(),
        ));
    }
    finish(
        no_redirect()
            .pool_max_idle_per_host(max_idle_per_host)
            .pool_idle_timeout(idle_timeout),
    )
}

fn no_redirect() -> reqwest::ClientBuilder {
    reqwest::Client::builder().redirect(reqwest::redirect::Policy::none())
}

fn finish(builder: reqwest::ClientBuilder) -> Result<reqwest::Client> {
    builder
        .build()
        .map_err(|e| Error::Configuration(format!("http client: {e}")))
}
