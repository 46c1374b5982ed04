// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical retrieval engine: additive substring scoring over the knowledge
//! base. Deterministic, in-memory, no external calls.

use std::sync::Arc;

use tracing::debug;

use crate::knowledge::{Document, KnowledgeBase};

/// Domain terms that boost a document when present in both the query and the
/// document's combined text.
const DOMAIN_VOCABULARY: &[&str] = &[
    "funded",
    "account",
    "challenge",
    "profit",
    "withdrawal",
    "payout",
    "kyc",
    "mt4",
    "mt5",
    "metatrader",
    "dashboard",
    "drawdown",
    "breach",
    "refund",
];

/// Score contribution when the whole query is a substring of a field.
const EXACT_QUESTION_WEIGHT: u32 = 10;
const EXACT_ANSWER_WEIGHT: u32 = 8;
const EXACT_COMBINED_WEIGHT: u32 = 6;

/// Score contribution per query token found in a field.
const TOKEN_QUESTION_WEIGHT: u32 = 3;
const TOKEN_ANSWER_WEIGHT: u32 = 2;
const TOKEN_COMBINED_WEIGHT: u32 = 1;

/// Score contribution per shared domain-vocabulary term.
const VOCABULARY_WEIGHT: u32 = 2;

/// Tokens this short carry no signal and are discarded.
const MIN_TOKEN_LEN: usize = 3;

/// A document paired with its relevance score for one query.
///
/// Transient: created per query, discarded after the call completes. Always
/// has `score > 0`.
#[derive(Debug, Clone)]
pub struct ScoredCandidate {
    pub document: Document,
    pub score: u32,
}

/// Scores and ranks knowledge-base documents against a query.
#[derive(Debug, Clone)]
pub struct RetrievalEngine {
    knowledge: Arc<KnowledgeBase>,
}

impl RetrievalEngine {
    /// Creates a retrieval engine over a shared knowledge base.
    pub fn new(knowledge: Arc<KnowledgeBase>) -> Self {
        Self { knowledge }
    }

    /// Returns up to `top_k` candidates sorted by score descending, ties
    /// broken by original document order. Documents scoring zero are
    /// dropped; an empty or whitespace-only query returns no candidates.
    pub fn search(&self, query: &str, top_k: usize) -> Vec<ScoredCandidate> {
        let lowered = query.to_lowercase();
        let normalized = lowered.trim();
        if normalized.is_empty() || top_k == 0 {
            return Vec::new();
        }

        let tokens: Vec<&str> = normalized
            .split_whitespace()
            .filter(|t| t.len() >= MIN_TOKEN_LEN)
            .collect();

        let mut candidates: Vec<ScoredCandidate> = self
            .knowledge
            .documents()
            .iter()
            .filter_map(|doc| {
                let score = score_document(doc, normalized, &tokens);
                (score > 0).then(|| ScoredCandidate {
                    document: doc.clone(),
                    score,
                })
            })
            .collect();

        // Stable sort: equal scores keep document load order.
        candidates.sort_by(|a, b| b.score.cmp(&a.score));
        candidates.truncate(top_k);

        debug!(
            candidates = candidates.len(),
            top_score = candidates.first().map(|c| c.score).unwrap_or(0),
            "retrieval complete"
        );
        candidates
    }
}

/// Additive lexical score of one document against the normalized query.
fn score_document(doc: &Document, query: &str, tokens: &[&str]) -> u32 {
    let question = doc.question.to_lowercase();
    let answer = doc.answer.to_lowercase();
    let combined = doc.combined_text.to_lowercase();

    let mut score = 0;

    if question.contains(query) {
        score += EXACT_QUESTION_WEIGHT;
    }
    if answer.contains(query) {
        score += EXACT_ANSWER_WEIGHT;
    }
    if combined.contains(query) {
        score += EXACT_COMBINED_WEIGHT;
    }

    for token in tokens {
        if question.contains(token) {
            score += TOKEN_QUESTION_WEIGHT;
        }
        if answer.contains(token) {
            score += TOKEN_ANSWER_WEIGHT;
        }
        if combined.contains(token) {
            score += TOKEN_COMBINED_WEIGHT;
        }
    }

    for term in DOMAIN_VOCABULARY {
        if query.contains(term) && combined.contains(term) {
            score += VOCABULARY_WEIGHT;
        }
    }

    score
}
