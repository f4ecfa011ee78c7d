use assignor_agent::AgentRunner;
use assignor_core::AssignorResult;
use tracing::info;

/// Effort-update stage: rewrites the schedule text with the requested hours
/// added to every weekly assignment.
///
/// The arithmetic is delegated entirely to the agent; this stage only glues
/// the effort-delta instruction and the schedule into one prompt. When either
/// input is absent the stage is skipped and the raw schedule flows onward
/// unmodified.
pub struct EffortUpdateStage {
    runner: AgentRunner,
}

impl EffortUpdateStage {
    /// Wraps the effort-update agent runner.
    pub fn new(runner: AgentRunner) -> Self {
        Self { runner }
    }

    /// Produces the updated schedule, or `None` when the stage is skipped.
    pub async fn run(
        &self,
        effort_delta: Option<&str>,
        availability: Option<&str>,
    ) -> AssignorResult<Option<String>> {
        let (delta, schedule) = match (effort_delta, availability) {
            (Some(d), Some(s)) => (d, s),
            _ => {
                info!(
                    effort_delta = effort_delta.is_some(),
                    availability = availability.is_some(),
                    "Skipping effort update: missing input"
                );
                return Ok(None);
            }
        };

        let prompt = format!("{delta}\n\n{schedule}\n");
        let updated = self.runner.run(&prompt).await?;
        Ok(Some(updated))
    }
}
