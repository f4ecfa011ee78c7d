//! HTTP client for the question-answering backend.
//!
//! The backend is an opaque natural-language service: given a free-text
//! question and a timezone hint it returns a free-text answer. This crate
//! wraps the `detectIntent`-style wire contract, classifies failures into
//! transport / HTTP-status / payload errors, and provides the bearer
//! credentials the calls are authenticated with.
//!
//! # Main types
//!
//! - [`IntentClient`] — One `ask(question, session_id) -> answer` call.
//! - [`BackendConfig`] — Endpoint, timezone, timeout, and quota settings.
//! - [`CredentialSource`] — Trait producing bearer tokens.
//! - [`CachedCredentials`] — Process-wide token cache with explicit refresh.

/// Bearer-credential sources.
pub mod auth;
/// The detectIntent HTTP client.
pub mod client;
/// Backend endpoint configuration.
pub mod config;

pub use auth::{CachedCredentials, CredentialSource, StaticCredentials};
pub use client::IntentClient;
pub use config::BackendConfig;
