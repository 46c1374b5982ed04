// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query orchestration: retrieve, classify, route, gate, generate, fall back.
//!
//! `answer` is total. Whatever fails downstream (cooldown, provider
//! transport, malformed payload) the caller gets a `QueryResult`, never an
//! error. Exactly one generation attempt per query.

use std::sync::Arc;
use std::time::{Duration, Instant};

use deskbot_config::DeskbotConfig;
use deskbot_config::model::RoutingConfig;
use deskbot_core::{DeskbotError, GenerateCapability, ProviderFailure};
use deskbot_retrieval::{KnowledgeBase, RetrievalEngine, ScoredCandidate};
use deskbot_router::{Complexity, ModelRouter};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::availability::AvailabilityTracker;
use crate::fallback::FallbackBuilder;

/// Fixed system framing prepended to every generation prompt.
const SYSTEM_FRAMING: &str = "You are the support assistant for a funded trading platform. \
Use the following examples from the support database to answer the user's question. \
Provide a helpful, accurate response based on the context provided.";

/// Candidate text limits when rendering the prompt; keeps it inside the
/// completion budget of the free tiers.
const MAX_QUESTION_CHARS: usize = 200;
const MAX_ANSWER_CHARS: usize = 500;

/// The outcome of one query, in the wire form the HTTP layer serializes.
#[derive(Debug, Clone, Serialize)]
pub struct QueryResult {
    /// The answer text shown to the customer.
    #[serde(rename = "response")]
    pub response_text: String,
    /// Model identifier, or a fallback label when no model produced the text.
    pub model_used: String,
    /// Classified query complexity.
    pub complexity: Complexity,
    /// Number of retrieval candidates considered.
    #[serde(rename = "relevant_docs_count")]
    pub candidate_count: usize,
    /// Score of the best candidate, 0 when none matched.
    #[serde(rename = "search_score")]
    pub top_score: u32,
    /// Wall-clock time spent answering.
    pub processing_time_ms: u64,
}

/// The retrieval-and-routing engine behind the chat endpoint.
///
/// Owns the availability tracker for its lifetime; the generation capability
/// is injected and optional. Absent means every query resolves through the
/// fallback chain.
pub struct Engine {
    retrieval: RetrievalEngine,
    router: ModelRouter,
    tracker: AvailabilityTracker,
    fallback: FallbackBuilder,
    capability: Option<Arc<dyn GenerateCapability>>,
    top_k: usize,
    cooldown: Duration,
    rate_limit_cooldown: Duration,
}

impl Engine {
    /// Wires an engine from a loaded knowledge base and configuration.
    pub fn new(
        knowledge: Arc<KnowledgeBase>,
        config: &DeskbotConfig,
        capability: Option<Arc<dyn GenerateCapability>>,
    ) -> Self {
        Self::with_parts(
            knowledge,
            config.routing.clone(),
            config.retrieval.top_k,
            capability,
            AvailabilityTracker::new(),
            FallbackBuilder::new(),
        )
    }

    /// Full constructor for callers that need to inject the tracker or a
    /// seeded fallback builder (tests, deterministic replays).
    pub fn with_parts(
        knowledge: Arc<KnowledgeBase>,
        routing: RoutingConfig,
        top_k: usize,
        capability: Option<Arc<dyn GenerateCapability>>,
        tracker: AvailabilityTracker,
        fallback: FallbackBuilder,
    ) -> Self {
        Self {
            retrieval: RetrievalEngine::new(knowledge),
            router: ModelRouter::new(routing.clone()),
            tracker,
            fallback,
            capability,
            top_k,
            cooldown: Duration::from_secs(routing.cooldown_seconds),
            rate_limit_cooldown: Duration::from_secs(routing.rate_limit_cooldown_seconds),
        }
    }

    /// Answers a customer query. Always returns a result.
    pub async fn answer(&self, query: &str) -> QueryResult {
        let started = Instant::now();

        let candidates = self.retrieval.search(query, self.top_k);
        let decision = self.router.route(query);

        let candidate_count = candidates.len();
        let top_score = candidates.first().map(|c| c.score).unwrap_or(0);
        debug!(
            complexity = %decision.complexity,
            candidates = candidate_count,
            top_score,
            "query analyzed"
        );

        let (response_text, model_used) = match &self.capability {
            Some(capability) if self.model_usable(&decision.model_id) => {
                self.generate_or_fall_back(capability.as_ref(), query, &decision.model_id, &candidates)
                    .await
            }
            Some(_) => {
                // Cost-control short-circuit, not an error: the tier rests
                // out its window and the candidates carry the response.
                warn!(model = %decision.model_id, "model in cooldown, skipping generation");
                self.fall_back(&candidates)
            }
            None => {
                debug!("no generation capability configured");
                self.fall_back(&candidates)
            }
        };

        QueryResult {
            response_text,
            model_used,
            complexity: decision.complexity,
            candidate_count,
            top_score,
            processing_time_ms: started.elapsed().as_millis() as u64,
        }
    }

    fn model_usable(&self, model_id: &str) -> bool {
        self.tracker.is_available(model_id, self.cooldown)
            && !self.tracker.is_rate_limited(model_id, self.rate_limit_cooldown)
    }

    /// One generation attempt; any failure resolves through the fallback.
    async fn generate_or_fall_back(
        &self,
        capability: &dyn GenerateCapability,
        query: &str,
        model_id: &str,
        candidates: &[ScoredCandidate],
    ) -> (String, String) {
        let prompt = build_prompt(query, candidates);
        match capability.generate(&prompt, model_id).await {
            Ok(text) => {
                self.tracker.mark_used(model_id);
                info!(model = %model_id, "generation succeeded");
                (text, model_id.to_string())
            }
            Err(err) => {
                if let DeskbotError::Provider {
                    failure: ProviderFailure::RateLimited,
                    ..
                } = &err
                {
                    self.tracker.mark_rate_limited(model_id);
                }
                warn!(model = %model_id, error = %err, "generation failed, falling back");
                self.fall_back(candidates)
            }
        }
    }

    fn fall_back(&self, candidates: &[ScoredCandidate]) -> (String, String) {
        let response = self.fallback.build(candidates);
        (response.text, response.model_label.to_string())
    }
}

/// Renders the prompt: fixed framing, ranked examples (omitted when there
/// are none), then the raw query.
fn build_prompt(query: &str, candidates: &[ScoredCandidate]) -> String {
    let mut prompt = String::from(SYSTEM_FRAMING);

    if !candidates.is_empty() {
        prompt.push_str("\n\n### Context Examples:\n");
        for (i, candidate) in candidates.iter().enumerate() {
            prompt.push_str(&format!(
                "Example {}:\nQ: {}\nA: {}\n\n",
                i + 1,
                truncate(&candidate.document.question, MAX_QUESTION_CHARS),
                truncate(&candidate.document.answer, MAX_ANSWER_CHARS),
            ));
        }
    }

    prompt.push_str(&format!("\n### User Question:\n{query}\n\n### Response:"));
    prompt
}

/// Caps `text` at `max_chars` characters, marking the cut with an ellipsis.
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}...")
    }
}
