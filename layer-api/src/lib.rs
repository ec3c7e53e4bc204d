#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod client;
pub mod error;
pub mod id;
pub mod transport;
pub mod types;

// Re-export core public API at crate root.
pub use client::{
    Announcements, Badges, Blocklist, Client, ClientBuilder, Conversations, Identities, MIME_TEXT,
    Messages, text_body,
};
pub use error::{Error, ResponseError, Result, TransportError};
pub use transport::{API_URL, HttpTransport, Transport};
pub use types::{
    Body, ConnectionReuse, ListConversationsOptions, Method, Operation, PatchKind, PatchOperation,
    Response, SharedPool,
};
