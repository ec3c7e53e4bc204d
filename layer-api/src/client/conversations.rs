//! Conversation creation, lookup, editing, participants, and metadata.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::{ListConversationsOptions, Method, Operation, PatchOperation, Response};

use super::{patch_body, require_object, require_segment, require_uuid};

const BODY: &str = "Conversation body is required";
const ID: &str = "Conversation ID is required";
const OPERATIONS: &str = "Conversation operations should be array";
const PARTICIPANTS: &str = "Participants value is required";
const PROPERTIES: &str = "Metadata property is required";
const USER: &str = "User ID is required";
const DEDUPE: &str = "De-duplicating UUID value is required";

/// Conversation operations. Obtain via [`Client::conversations`](crate::Client::conversations).
#[derive(Debug)]
pub struct Conversations<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Conversations<'a, T> {
    pub(super) const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Create a conversation. `body` must be a JSON object, e.g.
    /// `{"participants": ["u1", "u2"], "distinct": false}`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-object body; otherwise the transport
    /// outcome.
    pub async fn create(&self, body: Value) -> Result<Response> {
        require_object(&body, BODY)?;
        self.transport.post("/conversations", body).await
    }

    /// Create a conversation; a retry with the same `dedupe` UUID is
    /// recognized by the service as the same request.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID key or non-object body.
    pub async fn create_dedupe(&self, dedupe: &str, body: Value) -> Result<Response> {
        let key = require_uuid(dedupe, DEDUPE)?;
        require_object(&body, BODY)?;
        let op = Operation::new(Method::Post, "/conversations")
            .body(body)
            .dedupe(key);
        self.transport.execute(op).await
    }

    /// Retrieve a conversation by ID.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if `id` is not a conversation UUID.
    pub async fn get(&self, id: &str) -> Result<Response> {
        let id = require_uuid(id, ID)?;
        self.transport.get(format!("/conversations/{id}")).await
    }

    /// Retrieve a conversation as seen by a specific user.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID or non-UUID conversation ID.
    pub async fn get_from_user(&self, user_id: &str, id: &str) -> Result<Response> {
        let user = require_segment(user_id, USER)?;
        let id = require_uuid(id, ID)?;
        self.transport
            .get(format!("/users/{user}/conversations/{id}"))
            .await
    }

    /// List a user's conversations.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID.
    pub async fn get_all_from_user(
        &self,
        user_id: &str,
        options: &ListConversationsOptions,
    ) -> Result<Response> {
        let user = require_segment(user_id, USER)?;
        let query = options.to_query();
        let path = if query.is_empty() {
            format!("/users/{user}/conversations")
        } else {
            format!("/users/{user}/conversations?{query}")
        };
        self.transport.get(path).await
    }

    /// Apply Layer Patch operations to a conversation.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID ID or an empty operation list.
    pub async fn edit(&self, id: &str, operations: &[PatchOperation]) -> Result<Response> {
        let id = require_uuid(id, ID)?;
        if operations.is_empty() {
            return Err(Error::validation(OPERATIONS));
        }
        self.transport
            .patch(format!("/conversations/{id}"), patch_body(operations)?)
            .await
    }

    /// Set `metadata.<key>` for every entry of `properties`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID ID or empty properties.
    pub async fn set_metadata_properties(
        &self,
        id: &str,
        properties: &Map<String, Value>,
    ) -> Result<Response> {
        if properties.is_empty() {
            return Err(Error::validation(PROPERTIES));
        }
        let ops: Vec<_> = properties
            .iter()
            .map(|(k, v)| PatchOperation::set(format!("metadata.{k}"), v.clone()))
            .collect();
        self.edit(id, &ops).await
    }

    /// Delete `metadata.<key>` for every key of `properties`. Values are
    /// ignored.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID ID or empty properties.
    pub async fn delete_metadata_properties(
        &self,
        id: &str,
        properties: &Map<String, Value>,
    ) -> Result<Response> {
        if properties.is_empty() {
            return Err(Error::validation(PROPERTIES));
        }
        let ops: Vec<_> = properties
            .keys()
            .map(|k| PatchOperation::delete(format!("metadata.{k}")))
            .collect();
        self.edit(id, &ops).await
    }

    /// Add participants to a conversation.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID ID or no participants.
    pub async fn add_participants(&self, id: &str, participants: &[&str]) -> Result<Response> {
        let ops = participant_ops(participants, |p| PatchOperation::add("participants", p))?;
        self.edit(id, &ops).await
    }

    /// Remove participants from a conversation.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID ID or no participants.
    pub async fn remove_participants(&self, id: &str, participants: &[&str]) -> Result<Response> {
        let ops = participant_ops(participants, |p| PatchOperation::remove("participants", p))?;
        self.edit(id, &ops).await
    }

    /// Replace the whole participant list.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for a non-UUID ID or no participants.
    pub async fn replace_participants(&self, id: &str, participants: &[&str]) -> Result<Response> {
        if participants.is_empty() {
            return Err(Error::validation(PARTICIPANTS));
        }
        let op = PatchOperation::set("participants", participants.to_vec());
        self.edit(id, &[op]).await
    }

    /// Delete a conversation.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] if `id` is not a conversation UUID.
    pub async fn delete(&self, id: &str) -> Result<Response> {
        let id = require_uuid(id, ID)?;
        self.transport.delete(format!("/conversations/{id}")).await
    }
}

fn participant_ops(
    participants: &[&str],
    op: impl Fn(&str) -> PatchOperation,
) -> Result<Vec<PatchOperation>> {
    if participants.is_empty() {
        return Err(Error::validation(PARTICIPANTS));
    }
    Ok(participants.iter().map(|p| op(p)).collect())
}
