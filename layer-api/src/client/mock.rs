//! In-memory transport that records operations instead of sending them.

use std::sync::Mutex;

use crate::error::Result;
use crate::transport::Transport;
use crate::types::{Body, Operation, Response};

use super::Client;

#[derive(Debug, Default)]
pub(crate) struct Recorder {
    ops: Mutex<Vec<Operation>>,
}

impl Recorder {
    pub(crate) fn client() -> Client<Self> {
        Client::with_transport(Self::default())
    }

    pub(crate) fn count(&self) -> usize {
        self.ops.lock().expect("recorder lock").len()
    }

    pub(crate) fn last(&self) -> Operation {
        self.ops
            .lock()
            .expect("recorder lock")
            .last()
            .cloned()
            .expect("no operation recorded")
    }
}

impl Transport for Recorder {
    async fn execute(&self, op: Operation) -> Result<Response> {
        self.ops.lock().expect("recorder lock").push(op);
        Ok(Response {
            status: 200,
            body: Body::Empty,
        })
    }
}
