//! Backend core of the agency site's chat widget.
//!
//! [`services::chat_session::ChatSession`] is the client half: it owns the
//! transcript and talks to a relay through [`services::relay_client::Relay`].
//! [`routes::create_router`] is the server half: a single JSON endpoint that
//! answers each message through a [`services::reply_policy::ReplyPolicy`].

pub mod config;
pub mod error;
pub mod message;
pub mod routes;
pub mod services;
pub mod state;
pub mod telemetry;
