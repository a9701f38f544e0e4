// src/services/mod.rs
pub mod chat_session;
pub mod relay_client;
pub mod reply_policy;
