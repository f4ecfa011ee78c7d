use assignor_backend::{CredentialSource, IntentClient};
use assignor_core::{AnswerSet, AssignorError, AssignorResult, QuestionPlan};
use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{error, info};
use uuid::Uuid;

/// Fans the plan's sub-questions out to the question-answering backend.
///
/// Every present, non-empty sub-question among availability, past
/// involvement, and timezone is issued as one independent call under a fresh
/// session id. All calls run concurrently and the dispatcher waits for every
/// one to settle before inspecting any outcome (a join-all barrier, not a
/// race). A single failure anywhere in the batch aborts the pipeline with
/// every failing sub-question reported; there is no partial result and no
/// retry.
pub struct FanOutDispatcher {
    client: IntentClient,
    credentials: Arc<dyn CredentialSource>,
}

impl FanOutDispatcher {
    /// Creates a dispatcher over the given client and its credential source.
    pub fn new(client: IntentClient, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            client,
            credentials,
        }
    }

    /// Dispatches the plan's sub-questions and collects the answers.
    pub async fn run(&self, plan: &QuestionPlan) -> AssignorResult<AnswerSet> {
        let batch = plan.dispatchable();
        if batch.is_empty() {
            info!("No sub-questions to dispatch");
            return Ok(AnswerSet::default());
        }

        // Refresh once for the whole batch; failure here is fatal for the
        // dispatch step.
        self.credentials.refresh().await?;

        info!(calls = batch.len(), "Dispatching backend calls in parallel");

        let calls = batch.into_iter().map(|(key, question)| {
            let session_id = Uuid::new_v4();
            info!(task = %key, session_id = %session_id, "Issuing backend call");
            async move { (key, self.client.ask(question, session_id).await) }
        });

        let outcomes = join_all(calls).await;

        let mut answers = AnswerSet::default();
        let mut failures = Vec::new();

        for (key, outcome) in outcomes {
            match outcome {
                Ok(text) => {
                    info!(task = %key, chars = text.len(), "Backend call succeeded");
                    answers.insert(key, text);
                }
                Err(e) => {
                    error!(task = %key, error = %e, "Backend call failed");
                    failures.push(format!("task '{key}' failed: {e}"));
                }
            }
        }

        if !failures.is_empty() {
            return Err(AssignorError::FanOut(failures));
        }

        Ok(answers)
    }
}
