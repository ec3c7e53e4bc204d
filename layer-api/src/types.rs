//! Request descriptors, response payloads, and client options.

use std::fmt;
use std::time::Duration;

use serde::Serialize;
use serde_json::{Map, Value};

/// HTTP method of an [`Operation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `PATCH`
    Patch,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl Method {
    /// Upper-case method name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// `Content-Type` sent with this method. PATCH bodies use the Layer
    /// patch media type.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Patch => "application/vnd.layer-patch+json",
            _ => "application/json",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(m: Method) -> Self {
        match m {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Patch => Self::PATCH,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
        }
    }
}

/// One logical API call: method, app-relative path, optional JSON body and
/// optional de-duplication key.
///
/// Built once and consumed by [`Transport::execute`](crate::Transport::execute).
#[derive(Debug, Clone, PartialEq)]
pub struct Operation {
    method: Method,
    path: String,
    body: Option<Value>,
    dedupe: Option<String>,
}

impl Operation {
    /// Create a body-less operation. `path` is relative to `/apps/<app_id>`.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            dedupe: None,
        }
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a de-duplication key, sent as `If-None-Match`.
    #[must_use]
    pub fn dedupe(mut self, key: impl Into<String>) -> Self {
        self.dedupe = Some(key.into());
        self
    }

    /// The HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// App-relative path, including any query string.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The JSON body, if any.
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    /// The de-duplication key, if any.
    #[must_use]
    pub fn dedupe_key(&self) -> Option<&str> {
        self.dedupe.as_deref()
    }
}

/// A response payload: JSON when it parses, raw text otherwise.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Body {
    /// No payload (e.g. `204 No Content`).
    #[default]
    Empty,
    /// A JSON document.
    Json(Value),
    /// Text that is not valid JSON.
    Text(String),
}

impl Body {
    /// Classify accumulated response text. Never fails: text that does not
    /// parse as JSON is kept verbatim.
    #[must_use]
    pub fn parse(text: String) -> Self {
        if text.is_empty() {
            return Self::Empty;
        }
        serde_json::from_str(&text).map_or(Self::Text(text), Self::Json)
    }

    /// Whether there was no payload.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// The JSON document, if the payload parsed.
    #[must_use]
    pub const fn json(&self) -> Option<&Value> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// The raw text, if the payload did not parse as JSON.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Convert into a JSON value. `Empty` becomes `null`, text a JSON string.
    #[must_use]
    pub fn into_json(self) -> Value {
        match self {
            Self::Empty => Value::Null,
            Self::Json(v) => v,
            Self::Text(s) => Value::String(s),
        }
    }
}

/// A successful (`< 300`) response.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response payload.
    pub body: Body,
}

/// Kind of a Layer Patch operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PatchKind {
    /// Add a value to a set-like property.
    Add,
    /// Remove a value from a set-like property.
    Remove,
    /// Replace a property's value.
    Set,
    /// Delete a property.
    Delete,
}

/// One entry of a Layer Patch (`application/vnd.layer-patch+json`) document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatchOperation {
    /// Operation kind.
    pub operation: PatchKind,
    /// Dotted property path, e.g. `metadata.title`.
    pub property: String,
    /// Operand. Omitted for `delete`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl PatchOperation {
    /// `add` operation.
    #[must_use]
    pub fn add(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchKind::Add, property, value)
    }

    /// `remove` operation.
    #[must_use]
    pub fn remove(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchKind::Remove, property, value)
    }

    /// `set` operation.
    #[must_use]
    pub fn set(property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::with_value(PatchKind::Set, property, value)
    }

    /// `delete` operation.
    #[must_use]
    pub fn delete(property: impl Into<String>) -> Self {
        Self {
            operation: PatchKind::Delete,
            property: property.into(),
            value: None,
        }
    }

    fn with_value(kind: PatchKind, property: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            operation: kind,
            property: property.into(),
            value: Some(value.into()),
        }
    }

    /// One `set` operation per property of `props`.
    #[must_use]
    pub fn set_all(props: &Map<String, Value>) -> Vec<Self> {
        props.iter().map(|(k, v)| Self::set(k.as_str(), v.clone())).collect()
    }
}

/// Options for listing a user's conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListConversationsOptions {
    /// Maximum number of conversations per page.
    pub page_size: Option<u32>,
    /// Return conversations after this conversation ID.
    pub from_id: Option<String>,
    /// Sort order, e.g. `created_at` or `last_message`.
    pub sort_by: Option<String>,
}

impl ListConversationsOptions {
    /// Encode as a query string (without the leading `?`). Empty when no
    /// option is set.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut q = url::form_urlencoded::Serializer::new(String::new());
        if let Some(n) = self.page_size {
            q.append_pair("page_size", &n.to_string());
        }
        if let Some(id) = &self.from_id {
            q.append_pair("from_id", id);
        }
        if let Some(s) = &self.sort_by {
            q.append_pair("sort_by", s);
        }
        q.finish()
    }
}

/// Connection reuse policy for the underlying HTTP client.
///
/// Without one, every call opens a fresh connection.
#[derive(Debug, Clone)]
pub enum ConnectionReuse {
    /// Keep up to `max_idle_per_host` idle connections alive for reuse.
    Pooled {
        /// Idle connections kept per host. Must be at least 1.
        max_idle_per_host: usize,
        /// How long an idle connection is kept. `None` = library default.
        /// Must be non-zero when set.
        idle_timeout: Option<Duration>,
    },
    /// Use a pool shared with other [`Client`](crate::Client)s built from
    /// clones of the same [`SharedPool`].
    Shared(SharedPool),
}

/// A connection pool that several clients can share. Clones share the pool.
///
/// Built by this crate so redirects stay disabled for every client using it.
#[derive(Debug, Clone)]
pub struct SharedPool(reqwest::Client);

impl SharedPool {
    /// Build a pool keeping up to `max_idle_per_host` idle connections.
    ///
    /// # Errors
    ///
    /// [`Error::Configuration`](crate::Error::Configuration) for
    /// `max_idle_per_host == 0`, a zero idle timeout, or if the HTTP client
    /// cannot be built.
    pub fn new(max_idle_per_host: usize, idle_timeout: Option<Duration>) -> crate::Result<Self> {
        crate::transport::pooled(max_idle_per_host, idle_timeout).map(Self)
    }

    pub(crate) fn into_http(self) -> reqwest::Client {
        self.0
    }
}

impl Default for ConnectionReuse {
    fn default() -> Self {
        Self::Pooled {
            max_idle_per_host: 8,
            idle_timeout: Some(Duration::from_secs(90)),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn body_parse_prefers_json_and_falls_back_to_text() {
        assert_eq!(Body::parse(String::new()), Body::Empty);
        assert_eq!(Body::parse("OK".into()), Body::Text("OK".into()));
        assert_eq!(
            Body::parse(r#"{"id":"abc"}"#.into()),
            Body::Json(json!({"id": "abc"}))
        );
        assert_eq!(Body::parse("{\"id\":".into()), Body::Text("{\"id\":".into()));
    }

    #[test]
    fn patch_content_type_only_for_patch() {
        assert_eq!(Method::Patch.content_type(), "application/vnd.layer-patch+json");
        for m in [Method::Get, Method::Post, Method::Put, Method::Delete] {
            assert_eq!(m.content_type(), "application/json");
        }
    }

    #[test]
    fn patch_operations_serialize() {
        let ops = vec![
            PatchOperation::add("participants", "u1"),
            PatchOperation::delete("metadata.title"),
        ];
        assert_eq!(
            serde_json::to_value(&ops).expect("serialize"),
            json!([
                {"operation": "add", "property": "participants", "value": "u1"},
                {"operation": "delete", "property": "metadata.title"},
            ])
        );
    }

    #[test]
    fn list_options_query() {
        assert_eq!(ListConversationsOptions::default().to_query(), "");
        let opts = ListConversationsOptions {
            page_size: Some(50),
            from_id: Some("abc".into()),
            sort_by: Some("last_message".into()),
        };
        assert_eq!(
            opts.to_query(),
            "page_size=50&from_id=abc&sort_by=last_message"
        );
    }
}
