//! Per-user block lists.

use serde_json::json;

use crate::error::Result;
use crate::transport::Transport;
use crate::types::Response;

use super::require_segment;

const OWNER: &str = "Owner ID is required";
const USER: &str = "User ID is required";

/// Block list operations. Obtain via [`Client::blocklist`](crate::Client::blocklist).
#[derive(Debug)]
pub struct Blocklist<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> Blocklist<'a, T> {
    pub(super) const fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Retrieve the block list owned by `owner_id`.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for an empty owner ID.
    pub async fn get(&self, owner_id: &str) -> Result<Response> {
        let owner = require_segment(owner_id, OWNER)?;
        self.transport.get(format!("/users/{owner}/blocks")).await
    }

    /// Add `user_id` to the owner's block list.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for an empty ID.
    pub async fn block(&self, owner_id: &str, user_id: &str) -> Result<Response> {
        let owner = require_segment(owner_id, OWNER)?;
        require_segment(user_id, USER)?;
        self.transport
            .post(format!("/users/{owner}/blocks"), json!({"user_id": user_id}))
            .await
    }

    /// Remove `user_id` from the owner's block list.
    ///
    /// # Errors
    ///
    /// [`Error::Validation`](crate::Error::Validation) for an empty ID.
    pub async fn unblock(&self, owner_id: &str, user_id: &str) -> Result<Response> {
        let owner = require_segment(owner_id, OWNER)?;
        let user = require_segment(user_id, USER)?;
        self.transport
            .delete(format!("/users/{owner}/blocks/{user}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::Recorder;
    use crate::types::Method;

    #[tokio::test]
    async fn escapes_unsafe_ids() {
        let client = Recorder::client();
        let b = client.blocklist();

        b.get("testing/bla*foo").await.expect("get");
        assert_eq!(client.transport().last().path(), "/users/testing%2Fbla*foo/blocks");

        b.block("owner", "a/b").await.expect("block");
        let op = client.transport().last();
        assert_eq!(op.method(), Method::Post);
        assert_eq!(op.path(), "/users/owner/blocks");
        assert_eq!(op.json(), Some(&json!({"user_id": "a/b"})));

        b.unblock("owner", "a/b").await.expect("unblock");
        let op = client.transport().last();
        assert_eq!(op.method(), Method::Delete);
        assert_eq!(op.path(), "/users/owner/blocks/a%2Fb");
    }

    #[tokio::test]
    async fn rejects_empty_ids() {
        let client = Recorder::client();
        let b = client.blocklist();
        assert_eq!(b.get("").await.expect_err("owner").to_string(), OWNER);
        assert_eq!(b.block("o", "").await.expect_err("user").to_string(), USER);
        assert_eq!(b.unblock("", "u").await.expect_err("owner").to_string(), OWNER);
        assert_eq!(client.transport().count(), 0);
    }
}
