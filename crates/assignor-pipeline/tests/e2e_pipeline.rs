//! End-to-end pipeline tests with scripted agents and a mock backend.

use assignor_agent::{AgentBackend, AgentEvent, AgentRunner};
use assignor_backend::{BackendConfig, IntentClient, StaticCredentials};
use assignor_core::{AssignorError, AssignorResult, Message};
use assignor_pipeline::{
    prompts, EffortUpdateStage, FanOutDispatcher, Pipeline, PlanningStage, RecommendationStage,
};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Agent backend that records each user turn and replays a canned reply.
struct ScriptedAgent {
    reply: Option<String>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedAgent {
    fn new(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// An agent whose stream ends without a final response.
    fn silent() -> Self {
        Self {
            reply: None,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn calls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl AgentBackend for ScriptedAgent {
    async fn converse(
        &self,
        agent: &str,
        _instruction: Option<&str>,
        messages: &[Message],
    ) -> AssignorResult<mpsc::Receiver<AgentEvent>> {
        if let Some(turn) = messages.last() {
            self.calls.lock().unwrap().push(turn.content.clone());
        }
        let (tx, rx) = mpsc::channel(4);
        if let Some(reply) = &self.reply {
            let _ = tx
                .send(AgentEvent::Text {
                    author: agent.to_string(),
                    text: reply.clone(),
                    is_final: true,
                })
                .await;
        }
        let _ = tx.send(AgentEvent::Done).await;
        Ok(rx)
    }
}

struct AgentCalls {
    effort: Arc<Mutex<Vec<String>>>,
    recommend: Arc<Mutex<Vec<String>>>,
}

fn build_pipeline(
    server_uri: &str,
    planner: ScriptedAgent,
    effort: ScriptedAgent,
    recommender: ScriptedAgent,
) -> (Pipeline, AgentCalls) {
    let calls = AgentCalls {
        effort: effort.calls(),
        recommend: recommender.calls(),
    };

    let credentials = Arc::new(StaticCredentials::new("test-token"));
    let client = IntentClient::new(
        BackendConfig {
            base_url: server_uri.to_string(),
            default_timezone: "America/Chicago".to_string(),
            timeout_secs: 10,
            quota_project: None,
        },
        credentials.clone(),
    )
    .unwrap();

    let pipeline = Pipeline::new(
        PlanningStage::new(AgentRunner::new(
            prompts::PLANNER_NAME,
            prompts::PLANNER_INSTRUCTION,
            Box::new(planner),
        )),
        FanOutDispatcher::new(client, credentials),
        EffortUpdateStage::new(AgentRunner::new(
            prompts::EFFORT_NAME,
            prompts::EFFORT_INSTRUCTION,
            Box::new(effort),
        )),
        RecommendationStage::new(AgentRunner::new(
            prompts::RECOMMENDER_NAME,
            prompts::RECOMMENDER_INSTRUCTION,
            Box::new(recommender),
        )),
    );

    (pipeline, calls)
}

const Q_AVAILABILITY: &str =
    "1) What are the detailed information for the 5 least busy members of the team over the next 3 weeks?";
const Q_EFFORT: &str =
    "2) Add 8 hours per week to the assignments for each week of each team member";
const Q_PAST: &str =
    "3) Who from the team already worked for motorola over the past 2 years, if anyone?";
const Q_TIMEZONE: &str = "4) Who lives within 1 hour of the central timezone?";

fn planner_reply_four() -> String {
    format!("- {Q_AVAILABILITY}\n- {Q_EFFORT}\n- {Q_PAST}\n- {Q_TIMEZONE}")
}

fn answer_body(text: &str) -> serde_json::Value {
    serde_json::json!({
        "queryResult": {
            "responseMessages": [{ "text": { "text": [text] } }]
        }
    })
}

async fn mock_answer(server: &MockServer, question: &str, answer: &str) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "queryInput": { "text": { "text": question } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(answer_body(answer)))
        .expect(1)
        .mount(server)
        .await;
}

async fn mock_failure(server: &MockServer, question: &str, status: u16) {
    Mock::given(method("POST"))
        .and(body_partial_json(serde_json::json!({
            "queryInput": { "text": { "text": question } }
        })))
        .respond_with(ResponseTemplate::new(status).set_body_string("backend boom"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_scenario_full_request_runs_all_stages() {
    let server = MockServer::start().await;
    mock_answer(&server, Q_AVAILABILITY, "SCHEDULE TEXT").await;
    mock_answer(&server, Q_PAST, "PAST TEXT").await;
    mock_answer(&server, Q_TIMEZONE, "TZ TEXT").await;

    let (pipeline, calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::new(&planner_reply_four()),
        ScriptedAgent::new("UPDATED SCHEDULE"),
        ScriptedAgent::new("RANKED LIST"),
    );

    let run = pipeline
        .run("opportunity with motorola for 8h/w for 3 weeks in the central timezone")
        .await
        .unwrap();

    assert_eq!(run.recommendation, "RANKED LIST");
    assert!(!run.effort_skipped);
    assert_eq!(run.schedule.as_deref(), Some("UPDATED SCHEDULE"));
    assert_eq!(run.answers.past_involvement.as_deref(), Some("PAST TEXT"));
    assert_eq!(run.answers.timezone_match.as_deref(), Some("TZ TEXT"));

    // Exactly three backend calls: availability, past involvement, timezone.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);

    // The effort prompt glues the delta instruction to the raw schedule.
    let effort_calls = calls.effort.lock().unwrap();
    assert_eq!(effort_calls.len(), 1);
    assert!(effort_calls[0].contains("Add 8 hours per week"));
    assert!(effort_calls[0].contains("SCHEDULE TEXT"));

    // The recommendation prompt embeds all three sections.
    let rec_calls = calls.recommend.lock().unwrap();
    assert_eq!(rec_calls.len(), 1);
    assert!(rec_calls[0].contains("## Updated Schedule"));
    assert!(rec_calls[0].contains("UPDATED SCHEDULE"));
    assert!(rec_calls[0].contains("## Past Involvement with the Account"));
    assert!(rec_calls[0].contains("PAST TEXT"));
    assert!(rec_calls[0].contains("## Timezone Compatibility"));
    assert!(rec_calls[0].contains("TZ TEXT"));
}

#[tokio::test]
async fn test_scenario_no_timezone_skips_fourth_question() {
    let server = MockServer::start().await;
    mock_answer(&server, Q_AVAILABILITY, "SCHEDULE TEXT").await;
    mock_answer(&server, Q_PAST, "PAST TEXT").await;

    let three_lines = format!("- {Q_AVAILABILITY}\n- {Q_EFFORT}\n- {Q_PAST}");
    let (pipeline, calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::new(&three_lines),
        ScriptedAgent::new("UPDATED SCHEDULE"),
        ScriptedAgent::new("RANKED LIST"),
    );

    let run = pipeline
        .run("opportunity with motorola for 8h/w for 3 weeks")
        .await
        .unwrap();

    assert!(run.plan.timezone.is_none());
    assert!(run.answers.timezone_match.is_none());

    // Only two backend calls were dispatched.
    assert_eq!(server.received_requests().await.unwrap().len(), 2);

    // No timezone language reaches the recommendation agent.
    let rec_calls = calls.recommend.lock().unwrap();
    assert!(!rec_calls[0].contains("Timezone Compatibility"));
}

#[tokio::test]
async fn test_single_backend_failure_aborts_before_effort_and_recommendation() {
    let server = MockServer::start().await;
    mock_answer(&server, Q_AVAILABILITY, "SCHEDULE TEXT").await;
    mock_answer(&server, Q_PAST, "PAST TEXT").await;
    mock_failure(&server, Q_TIMEZONE, 500).await;

    let (pipeline, calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::new(&planner_reply_four()),
        ScriptedAgent::new("UPDATED SCHEDULE"),
        ScriptedAgent::new("RANKED LIST"),
    );

    let err = pipeline.run("opportunity").await.unwrap_err();
    match err {
        AssignorError::FanOut(failures) => {
            assert_eq!(failures.len(), 1);
            assert!(failures[0].contains("timezone_match"));
            assert!(failures[0].contains("500"));
        }
        other => panic!("expected FanOut, got {other:?}"),
    }

    // The later stages never execute.
    assert_eq!(calls.effort.lock().unwrap().len(), 0);
    assert_eq!(calls.recommend.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_join_all_reports_every_failure() {
    let server = MockServer::start().await;
    mock_failure(&server, Q_AVAILABILITY, 500).await;
    mock_failure(&server, Q_PAST, 404).await;
    mock_answer(&server, Q_TIMEZONE, "TZ TEXT").await;

    let (pipeline, _calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::new(&planner_reply_four()),
        ScriptedAgent::new("UPDATED SCHEDULE"),
        ScriptedAgent::new("RANKED LIST"),
    );

    let err = pipeline.run("opportunity").await.unwrap_err();
    match err {
        AssignorError::FanOut(failures) => {
            // Both failures reported together: the batch settles fully
            // before the abort, even though one call succeeded.
            assert_eq!(failures.len(), 2);
            assert!(failures.iter().any(|f| f.contains("availability")));
            assert!(failures.iter().any(|f| f.contains("past_involvement")));
        }
        other => panic!("expected FanOut, got {other:?}"),
    }

    // All three calls were issued despite the failures.
    assert_eq!(server.received_requests().await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_missing_effort_delta_passes_raw_schedule_forward() {
    let server = MockServer::start().await;
    mock_answer(&server, "only one question", "RAW SCHEDULE").await;

    let (pipeline, calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::new("- only one question"),
        ScriptedAgent::new("UPDATED SCHEDULE"),
        ScriptedAgent::new("RANKED LIST"),
    );

    let run = pipeline.run("opportunity").await.unwrap();

    assert!(run.effort_skipped);
    assert_eq!(run.schedule.as_deref(), Some("RAW SCHEDULE"));

    // The effort agent was never invoked; the recommendation stage sees the
    // availability answer unmodified.
    assert_eq!(calls.effort.lock().unwrap().len(), 0);
    let rec_calls = calls.recommend.lock().unwrap();
    assert!(rec_calls[0].contains("RAW SCHEDULE"));
    assert!(!rec_calls[0].contains("UPDATED SCHEDULE"));
}

#[tokio::test]
async fn test_silent_effort_agent_aborts_pipeline() {
    let server = MockServer::start().await;
    mock_answer(&server, Q_AVAILABILITY, "SCHEDULE TEXT").await;
    mock_answer(&server, Q_PAST, "PAST TEXT").await;
    mock_answer(&server, Q_TIMEZONE, "TZ TEXT").await;

    let (pipeline, calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::new(&planner_reply_four()),
        ScriptedAgent::silent(),
        ScriptedAgent::new("RANKED LIST"),
    );

    let err = pipeline.run("opportunity").await.unwrap_err();
    match err {
        AssignorError::Agent(msg) => {
            assert!(msg.contains(prompts::EFFORT_NAME));
            assert!(msg.contains("no final response"));
        }
        other => panic!("expected Agent, got {other:?}"),
    }
    assert_eq!(calls.recommend.lock().unwrap().len(), 0);
}

#[tokio::test]
async fn test_silent_planner_aborts_without_backend_calls() {
    let server = MockServer::start().await;

    let (pipeline, calls) = build_pipeline(
        &server.uri(),
        ScriptedAgent::silent(),
        ScriptedAgent::new("UPDATED SCHEDULE"),
        ScriptedAgent::new("RANKED LIST"),
    );

    let err = pipeline.run("opportunity").await.unwrap_err();
    assert!(matches!(err, AssignorError::Agent(_)));

    assert_eq!(server.received_requests().await.unwrap().len(), 0);
    assert_eq!(calls.effort.lock().unwrap().len(), 0);
    assert_eq!(calls.recommend.lock().unwrap().len(), 0);
}
