//! Announcements: system messages delivered to a list of users.

use serde_json::Value;

use crate::error::Result;
use crate::transport::Transport;
use crate::types::{Method, Operation, Response};

use super::{require_object, require_uuid};

const BODY: &str = "Announcements body is required";
const DEDUPE: &str = "De-duplicating UUID value is required";

/// Announcement operations. Obtain via
/// [`Client::announcements`](crate::Client::announcements).
#[derive(Debug)]
pub struct Announcements<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Announcements<'a, T> {
    pub(super) const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Send an announcement (`recipients`, `sender`, `parts`).
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for a non-object body.
    pub async fn send(&self, body: Value) -> Result<Response> {
        require_object(&body, BODY)?;
        self.transport.post("/announcements", body).await
    }

    /// Send an announcement with a de-duplication UUID.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for a non-UUID key or
    /// non-object body.
    pub async fn send_dedupe(&self, dedupe: &str, body: Value) -> Result<Response> {
        let key = require_uuid(dedupe, DEDUPE)?;
        require_object(&body, BODY)?;
        let op = Operation::new(Method::Post, "/announcements")
            .body(body)
            .dedupe(key);
        self.transport.execute(op).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::mock::Recorder;

    #[tokio::test]
    async fn send_dedupe_sets_key() {
        let client = Recorder::client();
        let key = "11111111-1111-1111-1111-111111111111";
        let body = json!({"recipients": ["u1"], "sender": {"name": "Bot"}, "parts": []});
        client
            .announcements()
            .send_dedupe(key, body.clone())
            .await
            .expect("send");
        let op = client.transport().last();
        assert_eq!(op.path(), "/announcements");
        assert_eq!(op.dedupe_key(), Some(key));
        assert_eq!(op.json(), Some(&body));
    }

    #[tokio::test]
    async fn rejects_invalid_input() {
        let client = Recorder::client();
        let a = client.announcements();
        assert_eq!(
            a.send_dedupe("", json!({})).await.expect_err("key").to_string(),
            DEDUPE
        );
        assert_eq!(a.send(Value::Null).await.expect_err("body").to_string(), BODY);
        assert_eq!(client.transport().count(), 0);
    }
}
