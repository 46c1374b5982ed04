// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete query pipeline: retrieval, complexity
//! routing, availability gating, and the fallback chain, driven through
//! `Engine::answer` with scripted generation capabilities.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use deskbot_config::DeskbotConfig;
use deskbot_core::{DeskbotError, GenerateCapability, ProviderFailure};
use deskbot_engine::{AvailabilityTracker, Engine, FallbackBuilder};
use deskbot_retrieval::{DocumentRecord, KnowledgeBase};
use deskbot_router::Complexity;

/// Generation capability with a fixed outcome and an invocation counter.
struct ScriptedCapability {
    outcome: Result<String, ProviderFailure>,
    calls: AtomicUsize,
}

impl ScriptedCapability {
    fn succeeding(text: &str) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        })
    }

    fn failing(failure: ProviderFailure) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(failure),
            calls: AtomicUsize::new(0),
        })
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GenerateCapability for ScriptedCapability {
    async fn generate(&self, _prompt: &str, _model_id: &str) -> Result<String, DeskbotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.outcome {
            Ok(text) => Ok(text.clone()),
            Err(failure) => Err(DeskbotError::Provider {
                failure: *failure,
                message: "scripted failure".into(),
            }),
        }
    }
}

fn support_kb() -> Arc<KnowledgeBase> {
    Arc::new(KnowledgeBase::from_records(vec![
        DocumentRecord {
            id: 0,
            question: "How much does it cost?".into(),
            answer: "The 10k challenge starts at 89 dollars, one-time fee.".into(),
        },
        DocumentRecord {
            id: 1,
            question: "How do I fix an MT5 login authorization error?".into(),
            answer: "Re-enter your investor credentials and restart the terminal.".into(),
        },
        DocumentRecord {
            id: 2,
            question: "When are payouts processed?".into(),
            answer: "Withdrawal requests are processed every two weeks from the dashboard.".into(),
        },
    ]))
}

fn engine_with(
    capability: Option<Arc<dyn GenerateCapability>>,
    tracker: AvailabilityTracker,
) -> Engine {
    let config = DeskbotConfig::default();
    Engine::with_parts(
        support_kb(),
        config.routing,
        config.retrieval.top_k,
        capability,
        tracker,
        FallbackBuilder::with_seed(0),
    )
}

// ---- Scenario: pricing query with a failing provider ----

#[tokio::test]
async fn pricing_query_falls_back_to_verbatim_answer() {
    let capability = ScriptedCapability::failing(ProviderFailure::TransportError);
    let engine = engine_with(Some(capability.clone()), AvailabilityTracker::new());

    let result = engine.answer("How much does it cost?").await;

    assert_eq!(result.complexity, Complexity::Simple);
    assert!(result.top_score >= 10, "exact phrase match should fire");
    assert_eq!(
        result.response_text,
        "The 10k challenge starts at 89 dollars, one-time fee."
    );
    assert_eq!(result.model_used, "fallback-exact-match");
    assert_eq!(capability.call_count(), 1, "exactly one attempt per query");
}

// ---- Scenario: complex query with the tier in cooldown ----

#[tokio::test]
async fn complex_query_in_cooldown_never_calls_the_provider() {
    let tracker = AvailabilityTracker::new();
    tracker.mark_used("google/gemma-3n-e2b-it:free");

    let capability = ScriptedCapability::succeeding("should not run");
    let engine = engine_with(Some(capability.clone()), tracker);

    let result = engine.answer("MT5 login authorization error").await;

    assert_eq!(result.complexity, Complexity::Complex);
    assert_eq!(capability.call_count(), 0, "cooldown must short-circuit");
    assert!(!result.response_text.is_empty());
}

// ---- Scenario: gibberish query ----

#[tokio::test]
async fn gibberish_query_uses_a_no_match_template() {
    let capability = ScriptedCapability::failing(ProviderFailure::Timeout);
    let engine = engine_with(Some(capability), AvailabilityTracker::new());

    let result = engine.answer("asdkjasd").await;

    assert_eq!(result.candidate_count, 0);
    assert_eq!(result.top_score, 0);
    assert_eq!(result.model_used, "fallback-no-match");
    assert!(!result.response_text.is_empty());

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["relevant_docs_count"], 0);
}

// ---- Happy path ----

#[tokio::test]
async fn complex_query_routes_to_the_complex_tier() {
    let capability = ScriptedCapability::succeeding("Here is how to fix it.");
    let engine = engine_with(Some(capability.clone()), AvailabilityTracker::new());

    let result = engine.answer("MT5 login authorization error").await;

    assert_eq!(result.complexity, Complexity::Complex);
    assert_eq!(result.model_used, "google/gemma-3n-e2b-it:free");
    assert_eq!(result.response_text, "Here is how to fix it.");
    assert_eq!(capability.call_count(), 1);
}

// ---- Fallback-only engine ----

#[tokio::test]
async fn engine_without_capability_always_answers() {
    let engine = engine_with(None, AvailabilityTracker::new());

    for query in ["How much does it cost?", "withdrawal help", "asdkjasd", ""] {
        let result = engine.answer(query).await;
        assert!(
            !result.response_text.is_empty(),
            "query {query:?} must still get a response"
        );
    }
}

// ---- Wire format ----

#[tokio::test]
async fn result_serializes_the_documented_wire_fields() {
    let engine = engine_with(None, AvailabilityTracker::new());
    let result = engine.answer("When are payouts processed?").await;

    let json = serde_json::to_value(&result).unwrap();
    for field in [
        "response",
        "model_used",
        "complexity",
        "relevant_docs_count",
        "search_score",
        "processing_time_ms",
    ] {
        assert!(json.get(field).is_some(), "missing wire field {field}");
    }
}
