//! Per-user unread badge counts.

use serde_json::{Map, Value};

use crate::error::Result;
use crate::transport::Transport;
use crate::types::{PatchOperation, Response};

use super::{patch_body, require_segment};

const USER: &str = "User ID is required";

/// Badge operations. Obtain via [`Client::badges`](crate::Client::badges).
#[derive(Debug)]
pub struct Badges<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Badges<'a, T> {
    pub(super) const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Retrieve a user's badge.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for an empty user ID.
    pub async fn get(&self, user_id: &str) -> Result<Response> {
        let user = require_segment(user_id, USER)?;
        self.transport.get(format!("/users/{user}/badge")).await
    }

    /// Set badge properties, e.g. `{"external_unread_count": 3}`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for an empty user ID.
    pub async fn edit(&self, user_id: &str, properties: &Map<String, Value>) -> Result<Response> {
        let user = require_segment(user_id, USER)?;
        let body = patch_body(&PatchOperation::set_all(properties))?;
        self.transport
            .patch(format!("/users/{user}/badge"), body)
            .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::client::mock::Recorder;
    use crate::types::Method;

    #[tokio::test]
    async fn edit_patches_badge() {
        let client = Recorder::client();
        let p = json!({"external_unread_count": 3});
        client
            .badges()
            .edit("u1", p.as_object().expect("object"))
            .await
            .expect("edit");
        let op = client.transport().last();
        assert_eq!(op.method(), Method::Patch);
        assert_eq!(op.path(), "/users/u1/badge");
        assert_eq!(
            op.json(),
            Some(&json!([{"operation": "set", "property": "external_unread_count", "value": 3}]))
        );

        client.badges().get("u1").await.expect("get");
        assert_eq!(client.transport().last().method(), Method::Get);
        assert!(client.badges().get("").await.is_err());
    }
}
