use assignor_agent::AgentRunner;
use assignor_core::AssignorResult;
use tracing::info;

/// Recommendation stage: asks the ranking agent for an ordered candidate
/// list with justification, from the gathered texts.
///
/// The three inputs are embedded under fixed section headers. A section whose
/// input is absent is omitted entirely, so a request without a timezone never
/// puts timezone language in front of the agent. The agent's output is
/// returned as-is; no deterministic re-ranking happens here.
pub struct RecommendationStage {
    runner: AgentRunner,
}

/// Section header for the schedule text.
const SCHEDULE_HEADER: &str = "Updated Schedule";
/// Section header for the historical-account text.
const PAST_HEADER: &str = "Past Involvement with the Account";
/// Section header for the timezone text.
const TIMEZONE_HEADER: &str = "Timezone Compatibility";

impl RecommendationStage {
    /// Wraps the recommendation agent runner.
    pub fn new(runner: AgentRunner) -> Self {
        Self { runner }
    }

    /// Produces the ranked recommendation text.
    pub async fn run(
        &self,
        schedule: Option<&str>,
        past_involvement: Option<&str>,
        timezone_match: Option<&str>,
    ) -> AssignorResult<String> {
        let mut sections = Vec::new();
        for (header, body) in [
            (SCHEDULE_HEADER, schedule),
            (PAST_HEADER, past_involvement),
            (TIMEZONE_HEADER, timezone_match),
        ] {
            if let Some(text) = body {
                sections.push(format!("## {header}\n\n{text}"));
            }
        }

        info!(
            sections = sections.len(),
            timezone_included = timezone_match.is_some(),
            "Running recommendation stage"
        );

        let prompt = sections.join("\n\n");
        self.runner.run(&prompt).await
    }
}
