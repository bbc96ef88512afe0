//! Session and conversation transport.
//!
//! A fetch is two sequential requests: the session endpoint (authenticated by the
//! browser session cookie) yields an access token, which is then sent as a bearer
//! credential to the conversation endpoint. Nothing is cached between fetches.

pub mod client;
pub mod location;

pub use client::{ConversationSource, SessionClient};
pub use location::{conversation_id_from_location, ensure_allowed_host};
