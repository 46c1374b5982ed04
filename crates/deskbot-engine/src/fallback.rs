// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fallback responses built purely from retrieved documents.
//!
//! Used when no model call is made (cooldown, no capability) or the call
//! fails. Always produces a response.

use std::sync::{Mutex, PoisonError};

use deskbot_retrieval::ScoredCandidate;
use rand::{Rng, SeedableRng, rngs::StdRng};
use tracing::debug;

/// Top-candidate score at or above which its answer is returned verbatim.
const CONFIDENT_MATCH_THRESHOLD: u32 = 8;

/// Separator between the top answer and supplementary answers.
const ENHANCED_DELIMITER: &str = "\n\n---\n\n";

/// Generic responses for queries with no retrieval overlap. The pool members
/// are interchangeable; one is picked at random for variety.
const NO_MATCH_TEMPLATES: &[&str] = &[
    "I don't have specific information about that yet. I can help with questions about funded accounts, challenges, payouts, and platform setup - try asking about one of those.",
    "I couldn't find a good match for that question in our support database. For the most accurate answer, please contact our support team, or ask me about accounts, withdrawals, or trading platforms.",
    "I'm not sure about that one. I can answer questions about challenges, profit splits, KYC verification, and withdrawals - or you can reach our support team directly.",
];

/// A fallback response and the label identifying which path produced it.
#[derive(Debug, Clone)]
pub struct FallbackResponse {
    pub text: String,
    pub model_label: &'static str,
}

/// Builds responses from ranked candidates without any model call.
///
/// Template selection for the no-match case is the one place randomness is
/// permitted in the engine; seed it to pin the choice in tests.
pub struct FallbackBuilder {
    rng: Mutex<StdRng>,
}

impl FallbackBuilder {
    /// Creates a builder with an entropy-seeded RNG.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Creates a builder whose template choice is deterministic.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    /// Produces a response from the ranked candidates.
    ///
    /// A confident top match is returned verbatim; weaker matches are
    /// combined into an enhanced response; no candidates yields a template.
    pub fn build(&self, candidates: &[ScoredCandidate]) -> FallbackResponse {
        match candidates.split_first() {
            Some((top, _)) if top.score >= CONFIDENT_MATCH_THRESHOLD => {
                debug!(score = top.score, doc = top.document.id, "exact-match fallback");
                FallbackResponse {
                    text: top.document.answer.clone(),
                    model_label: "fallback-exact-match",
                }
            }
            Some((top, rest)) => {
                debug!(
                    score = top.score,
                    supplements = rest.len(),
                    "enhanced fallback"
                );
                let mut text = top.document.answer.clone();
                if !rest.is_empty() {
                    text.push_str(ENHANCED_DELIMITER);
                    let supplements: Vec<&str> =
                        rest.iter().map(|c| c.document.answer.as_str()).collect();
                    text.push_str(&supplements.join("\n\n"));
                }
                FallbackResponse {
                    text,
                    model_label: "fallback-enhanced",
                }
            }
            None => {
                let index = self
                    .rng
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .gen_range(0..NO_MATCH_TEMPLATES.len());
                debug!(template = index, "no-match fallback");
                FallbackResponse {
                    text: NO_MATCH_TEMPLATES[index].to_string(),
                    model_label: "fallback-no-match",
                }
            }
        }
    }
}

impl Default for FallbackBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use deskbot_retrieval::Document;

    fn candidate(id: u32, answer: &str, score: u32) -> ScoredCandidate {
        let question = format!("question {id}");
        ScoredCandidate {
            document: Document {
                id,
                question: question.clone(),
                answer: answer.to_string(),
                combined_text: format!("Question: {question}\nAnswer: {answer}"),
            },
            score,
        }
    }

    #[test]
    fn confident_top_match_returns_answer_verbatim() {
        let builder = FallbackBuilder::with_seed(0);
        let response = builder.build(&[
            candidate(0, "Payouts run every two weeks.", 14),
            candidate(1, "Something else.", 5),
        ]);
        assert_eq!(response.text, "Payouts run every two weeks.");
        assert_eq!(response.model_label, "fallback-exact-match");
    }

    #[test]
    fn threshold_boundary_score_eight_is_exact_match() {
        let builder = FallbackBuilder::with_seed(0);
        let response = builder.build(&[candidate(0, "Boundary answer.", 8)]);
        assert_eq!(response.model_label, "fallback-exact-match");
        assert_eq!(response.text, "Boundary answer.");
    }

    #[test]
    fn threshold_boundary_score_seven_is_enhanced() {
        let builder = FallbackBuilder::with_seed(0);
        let response = builder.build(&[candidate(0, "Weak answer.", 7)]);
        assert_eq!(response.model_label, "fallback-enhanced");
        assert_eq!(response.text, "Weak answer.");
    }

    #[test]
    fn enhanced_response_concatenates_remaining_answers_in_rank_order() {
        let builder = FallbackBuilder::with_seed(0);
        let response = builder.build(&[
            candidate(0, "First.", 6),
            candidate(1, "Second.", 4),
            candidate(2, "Third.", 2),
        ]);
        assert_eq!(response.model_label, "fallback-enhanced");
        assert_eq!(response.text, "First.\n\n---\n\nSecond.\n\nThird.");
    }

    #[test]
    fn no_candidates_picks_a_template() {
        let builder = FallbackBuilder::with_seed(42);
        let response = builder.build(&[]);
        assert_eq!(response.model_label, "fallback-no-match");
        assert!(
            NO_MATCH_TEMPLATES.contains(&response.text.as_str()),
            "response must come from the fixed pool"
        );
    }

    #[test]
    fn seeded_template_choice_is_deterministic() {
        let a = FallbackBuilder::with_seed(7).build(&[]).text;
        let b = FallbackBuilder::with_seed(7).build(&[]).text;
        assert_eq!(a, b);
    }

    #[test]
    fn always_answers() {
        let builder = FallbackBuilder::with_seed(0);
        assert!(!builder.build(&[]).text.is_empty());
        assert!(!builder.build(&[candidate(0, "x", 1)]).text.is_empty());
        assert!(!builder.build(&[candidate(0, "y", 99)]).text.is_empty());
    }
}
