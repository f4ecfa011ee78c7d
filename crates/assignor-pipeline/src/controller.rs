use crate::dispatch::FanOutDispatcher;
use crate::effort::EffortUpdateStage;
use crate::plan::PlanningStage;
use crate::prompts;
use crate::recommend::RecommendationStage;
use assignor_agent::backends::GeminiBackend;
use assignor_agent::{AgentRunner, ModelConfig};
use assignor_backend::{BackendConfig, CredentialSource, IntentClient};
use assignor_core::{AnswerSet, AssignorResult, QuestionPlan};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// State of one pipeline run.
///
/// `Start -> Planned -> Dispatched -> (EffortUpdated | SkippedEffort) ->
/// Recommended -> Done`, with `Aborted` reachable from every non-terminal
/// state. `Done` and `Aborted` are the only terminal states; there is no
/// retry transition anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineState {
    /// The run has not produced a plan yet.
    Start,
    /// The planning agent produced a question plan.
    Planned,
    /// Every fan-out call settled successfully.
    Dispatched,
    /// The effort-update agent rewrote the schedule.
    EffortUpdated,
    /// The effort-update stage was skipped for want of input.
    SkippedEffort,
    /// The recommendation agent produced its ranking.
    Recommended,
    /// Terminal: the run completed.
    Done,
    /// Terminal: a stage failed and the remaining pipeline was abandoned.
    Aborted,
}

impl std::fmt::Display for PipelineState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PipelineState::Start => "start",
            PipelineState::Planned => "planned",
            PipelineState::Dispatched => "dispatched",
            PipelineState::EffortUpdated => "effort_updated",
            PipelineState::SkippedEffort => "skipped_effort",
            PipelineState::Recommended => "recommended",
            PipelineState::Done => "done",
            PipelineState::Aborted => "aborted",
        };
        write!(f, "{name}")
    }
}

/// The artifacts of one completed pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    /// The question plan derived from the request.
    pub plan: QuestionPlan,
    /// The backend answers, complete by construction.
    pub answers: AnswerSet,
    /// The schedule handed to the recommendation stage: the effort-updated
    /// text, or the raw availability answer when the update was skipped.
    pub schedule: Option<String>,
    /// Whether the effort-update stage was skipped.
    pub effort_skipped: bool,
    /// The final ranked recommendation text.
    pub recommendation: String,
}

/// Sequences the pipeline stages and owns the abort policy.
///
/// Stages run strictly in order; only the dispatcher runs its calls
/// concurrently. Each run is independent: fresh session and correlation
/// identifiers, no state shared with other runs beyond the credential cache.
pub struct Pipeline {
    planning: PlanningStage,
    dispatcher: FanOutDispatcher,
    effort: EffortUpdateStage,
    recommend: RecommendationStage,
}

impl Pipeline {
    /// Assembles a pipeline from pre-built stages.
    pub fn new(
        planning: PlanningStage,
        dispatcher: FanOutDispatcher,
        effort: EffortUpdateStage,
        recommend: RecommendationStage,
    ) -> Self {
        Self {
            planning,
            dispatcher,
            effort,
            recommend,
        }
    }

    /// Assembles the standard pipeline: three Gemini-backed agents with the
    /// fixed instructions, and a detectIntent client for the fan-out.
    pub fn with_gemini(
        model: ModelConfig,
        backend: BackendConfig,
        credentials: Arc<dyn CredentialSource>,
    ) -> AssignorResult<Self> {
        let planner = AgentRunner::new(
            prompts::PLANNER_NAME,
            prompts::PLANNER_INSTRUCTION,
            Box::new(GeminiBackend::new(model.clone())),
        );
        let effort = AgentRunner::new(
            prompts::EFFORT_NAME,
            prompts::EFFORT_INSTRUCTION,
            Box::new(GeminiBackend::new(model.clone())),
        );
        let recommender = AgentRunner::new(
            prompts::RECOMMENDER_NAME,
            prompts::RECOMMENDER_INSTRUCTION,
            Box::new(GeminiBackend::new(model)),
        );
        let client = IntentClient::new(backend, Arc::clone(&credentials))?;

        Ok(Self::new(
            PlanningStage::new(planner),
            FanOutDispatcher::new(client, credentials),
            EffortUpdateStage::new(effort),
            RecommendationStage::new(recommender),
        ))
    }

    /// Runs the full pipeline for one staffing request.
    ///
    /// Any stage failure aborts the remaining stages and surfaces the
    /// accumulated error context to the caller.
    pub async fn run(&self, request: &str) -> AssignorResult<PipelineRun> {
        let start = Instant::now();
        info!(request, state = %PipelineState::Start, "Pipeline: starting run");

        match self.run_stages(request).await {
            Ok(run) => {
                info!(
                    state = %PipelineState::Done,
                    duration_ms = start.elapsed().as_millis() as u64,
                    effort_skipped = run.effort_skipped,
                    "Pipeline: run complete"
                );
                Ok(run)
            }
            Err(e) => {
                error!(
                    state = %PipelineState::Aborted,
                    duration_ms = start.elapsed().as_millis() as u64,
                    error = %e,
                    "Pipeline: run aborted"
                );
                Err(e)
            }
        }
    }

    async fn run_stages(&self, request: &str) -> AssignorResult<PipelineRun> {
        let plan = self.planning.run(request).await?;
        info!(state = %PipelineState::Planned, "Pipeline state");

        let answers = self.dispatcher.run(&plan).await?;
        info!(state = %PipelineState::Dispatched, "Pipeline state");

        let updated = self
            .effort
            .run(plan.effort_delta.as_deref(), answers.availability.as_deref())
            .await?;
        let effort_skipped = updated.is_none();
        let effort_state = if effort_skipped {
            PipelineState::SkippedEffort
        } else {
            PipelineState::EffortUpdated
        };
        info!(state = %effort_state, "Pipeline state");

        // The raw availability answer flows forward untouched when the
        // effort update was skipped.
        let schedule = updated.or_else(|| answers.availability.clone());

        let recommendation = self
            .recommend
            .run(
                schedule.as_deref(),
                answers.past_involvement.as_deref(),
                answers.timezone_match.as_deref(),
            )
            .await?;
        info!(state = %PipelineState::Recommended, "Pipeline state");

        Ok(PipelineRun {
            plan,
            answers,
            schedule,
            effort_skipped,
            recommendation,
        })
    }
}
