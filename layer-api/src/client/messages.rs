//! Sending messages into conversations.

use serde_json::{Value, json};

use crate::error::Result;
use crate::transport::Transport;
use crate::types::Response;

use super::{require_object, require_uuid};

const CID: &str = "Conversation ID is required";
const BODY: &str = "Message body is required";

/// MIME type of plain-text message parts.
pub const MIME_TEXT: &str = "text/plain";

/// Message operations. Obtain via [`Client::messages`](crate::Client::messages).
#[derive(Debug)]
pub struct Messages<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Messages<'a, T> {
    pub(super) const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Send a message. `body` is a full message object with `sender` and
    /// `parts`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for a non-UUID
    /// conversation ID or non-object body.
    pub async fn send(&self, conversation_id: &str, body: Value) -> Result<Response> {
        let cid = require_uuid(conversation_id, CID)?;
        require_object(&body, BODY)?;
        self.transport
            .post(format!("/conversations/{cid}/messages"), body)
            .await
    }

    /// Send a plain-text message on behalf of a user.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn send_text_from_user(
        &self,
        conversation_id: &str,
        user_id: &str,
        text: &str,
    ) -> Result<Response> {
        self.send(conversation_id, text_body("user_id", user_id, text))
            .await
    }

    /// Send a plain-text message from a named system sender.
    ///
    /// # Errors
    ///
    /// See [`send`](Self::send).
    pub async fn send_text_from_name(
        &self,
        conversation_id: &str,
        name: &str,
        text: &str,
    ) -> Result<Response> {
        self.send(conversation_id, text_body("name", name, text))
            .await
    }
}

/// `{sender: {<kind>: sender}, parts: [{body: text, mime_type: "text/plain"}]}`
#[must_use]
pub fn text_body(kind: &str, sender: &str, text: &str) -> Value {
    let mut from = serde_json::Map::new();
    from.insert(kind.to_owned(), Value::from(sender));
    json!({
        "sender": from,
        "parts": [{"body": text, "mime_type": MIME_TEXT}],
    })
}
