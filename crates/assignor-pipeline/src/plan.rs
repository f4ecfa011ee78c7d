use assignor_agent::AgentRunner;
use assignor_core::{AssignorResult, QuestionPlan};
use tracing::info;

/// Planning stage: one agent round-trip that decomposes a free-text staffing
/// request into the canonical sub-questions.
///
/// The agent's reply is parsed positionally into a [`QuestionPlan`]; a reply
/// with fewer than four lines simply leaves the trailing fields absent. A
/// round-trip that yields no final response is fatal for the whole pipeline.
pub struct PlanningStage {
    runner: AgentRunner,
}

impl PlanningStage {
    /// Wraps the planning agent runner.
    pub fn new(runner: AgentRunner) -> Self {
        Self { runner }
    }

    /// Decomposes one staffing request into a question plan.
    pub async fn run(&self, request: &str) -> AssignorResult<QuestionPlan> {
        let reply = self.runner.run(request).await?;
        let plan = QuestionPlan::parse(&reply);

        info!(
            availability = plan.availability.is_some(),
            effort_delta = plan.effort_delta.is_some(),
            past_involvement = plan.past_involvement.is_some(),
            timezone = plan.timezone.is_some(),
            "Planning stage produced question plan"
        );

        Ok(plan)
    }
}
