//! Core types and error definitions for the Assignor pipeline.
//!
//! This crate provides the foundational types shared across all Assignor
//! crates: the unified error enum, conversation message representations, and
//! the staffing-plan data model that flows between pipeline stages.
//!
//! # Main types
//!
//! - [`AssignorError`] — Unified error enum for all Assignor subsystems.
//! - [`AssignorResult`] — Convenience alias for `Result<T, AssignorError>`.
//! - [`Message`] / [`Role`] — A single turn within an agent conversation.
//! - [`QuestionPlan`] — The up-to-four sub-questions derived from a request.
//! - [`AnswerKey`] / [`AnswerSet`] — Keys and results of the fan-out batch.

/// Error enum and result alias.
pub mod error;
/// Conversation message types.
pub mod message;
/// Staffing-plan data model: question plan and answer set.
pub mod plan;

pub use error::{AssignorError, AssignorResult};
pub use message::{Message, Role};
pub use plan::{AnswerKey, AnswerSet, QuestionPlan};
