//! User identities: display name, avatar, and custom properties.

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::transport::Transport;
use crate::types::{PatchOperation, Response};

use super::{patch_body, require_segment};

const USER: &str = "User ID is required";
const DISPLAY_NAME: &str = "Identity display_name is required";

/// Identity operations. Obtain via [`Client::identities`](crate::Client::identities).
#[derive(Debug)]
pub struct Identities<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Identities<'a, T> {
    pub(super) const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Create an identity. `properties` must include `display_name`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID or missing `display_name`.
    pub async fn create(&self, user_id: &str, properties: Map<String, Value>) -> Result<Response> {
        let path = identity_path(user_id)?;
        require_display_name(&properties)?;
        self.transport.post(path, Value::Object(properties)).await
    }

    /// Retrieve a user's identity.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID.
    pub async fn get(&self, user_id: &str) -> Result<Response> {
        self.transport.get(identity_path(user_id)?).await
    }

    /// Set the given identity properties, leaving the rest unchanged.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID.
    pub async fn edit(&self, user_id: &str, properties: &Map<String, Value>) -> Result<Response> {
        let path = identity_path(user_id)?;
        let body = patch_body(&PatchOperation::set_all(properties))?;
        self.transport.patch(path, body).await
    }

    /// Replace all identity properties. `properties` must include
    /// `display_name`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID or missing `display_name`.
    pub async fn replace(&self, user_id: &str, properties: Map<String, Value>) -> Result<Response> {
        let path = identity_path(user_id)?;
        require_display_name(&properties)?;
        self.transport.put(path, Value::Object(properties)).await
    }

    /// Delete a user's identity.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`] for an empty user ID.
    pub async fn delete(&self, user_id: &str) -> Result<Response> {
        self.transport.delete(identity_path(user_id)?).await
    }
}

fn identity_path(user_id: &str) -> Result<String> {
    let user = require_segment(user_id, USER)?;
    Ok(format!("/users/{user}/identity"))
}

fn require_display_name(properties: &Map<String, Value>) -> Result<()> {
    match properties.get("display_name") {
        Some(Value::String(s)) if !s.is_empty() => Ok(()),
        _ => Err(Error::validation(DISPLAY_NAME)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::mock::Recorder;
    use crate::types::Method;

    fn props(v: Value) -> Map<String, Value> {
        v.as_object().cloned().expect("object")
    }

    #[tokio::test]
    async fn create_and_replace_require_display_name() {
        let client = Recorder::client();
        let i = client.identities();
        let missing = props(json!({"first_name": "Sam"}));
        assert_eq!(
            i.create("u1", missing.clone()).await.expect_err("create").to_string(),
            DISPLAY_NAME
        );
        assert_eq!(
            i.replace("u1", missing).await.expect_err("replace").to_string(),
            DISPLAY_NAME
        );
        assert_eq!(
            i.get("").await.expect_err("user").to_string(),
            USER
        );
        assert_eq!(client.transport().count(), 0);

        let ok = props(json!({"display_name": "Sam"}));
        i.create("u1", ok.clone()).await.expect("create");
        let op = client.transport().last();
        assert_eq!(op.method(), Method::Post);
        assert_eq!(op.path(), "/users/u1/identity");

        i.replace("u1", ok).await.expect("replace");
        assert_eq!(client.transport().last().method(), Method::Put);
    }

    #[tokio::test]
    async fn edit_sends_set_operations() {
        let client = Recorder::client();
        let p = props(json!({"display_name": "samwise", "last_name": "gamgee"}));
        client.identities().edit("u1", &p).await.expect("edit");
        let op = client.transport().last();
        assert_eq!(op.method(), Method::Patch);
        assert_eq!(
            op.json(),
            Some(&json!([
                {"operation": "set", "property": "display_name", "value": "samwise"},
                {"operation": "set", "property": "last_name", "value": "gamgee"},
            ]))
        );
    }

    #[tokio::test]
    async fn get_and_delete() {
        let client = Recorder::client();
        client.identities().get("u1").await.expect("get");
        assert_eq!(client.transport().last().method(), Method::Get);
        client.identities().delete("u1").await.expect("delete");
        let op = client.transport().last();
        assert_eq!(op.method(), Method::Delete);
        assert_eq!(op.path(), "/users/u1/identity");
    }
}
