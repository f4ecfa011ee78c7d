//! The Assignor staffing-recommendation pipeline.
//!
//! Sequences four stages over external collaborators: a planning agent
//! decomposes a staffing request into sub-questions, the dispatcher fans the
//! sub-questions out to the question-answering backend and joins on all of
//! them, an effort-update agent rewrites the schedule with added hours, and a
//! recommendation agent ranks candidates. Any failure aborts the remaining
//! pipeline; nothing is retried.
//!
//! # Main types
//!
//! - [`Pipeline`] — The controller that sequences the stages.
//! - [`PipelineRun`] — The artifacts of one completed run.
//! - [`FanOutDispatcher`] — Concurrent join-all dispatch of sub-questions.
//! - [`PlanningStage`] / [`EffortUpdateStage`] / [`RecommendationStage`] —
//!   The agent-backed stage adapters.

/// Pipeline controller and state machine.
pub mod controller;
/// Concurrent fan-out of sub-questions to the backend.
pub mod dispatch;
/// Schedule rewrite with added hours.
pub mod effort;
/// Request decomposition into sub-questions.
pub mod plan;
/// Fixed agent names and instruction text.
pub mod prompts;
/// Candidate ranking from the gathered texts.
pub mod recommend;

pub use controller::{Pipeline, PipelineRun, PipelineState};
pub use dispatch::FanOutDispatcher;
pub use effort::EffortUpdateStage;
pub use plan::PlanningStage;
pub use recommend::RecommendationStage;
