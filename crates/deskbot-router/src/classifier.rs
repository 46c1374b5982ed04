// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Heuristic query complexity classification.
//!
//! Labels a query simple or complex from lexical signals alone. No LLM
//! pre-call, no network, no latency.

use serde::Serialize;

/// Query complexity, mapped to a model tier by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    /// Greetings, pricing lookups, single-fact questions.
    Simple,
    /// Operational or technical issues needing the stronger tier.
    Complex,
}

impl std::fmt::Display for Complexity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Complexity::Simple => write!(f, "simple"),
            Complexity::Complex => write!(f, "complex"),
        }
    }
}

/// Operational/technical terms that mark a query complex (contains,
/// case-insensitive).
const COMPLEX_INDICATORS: &[&str] = &[
    "dashboard",
    "equity",
    "synchronization",
    "authorization",
    "verification",
    "withdrawal",
    "profit",
    "restriction",
    "violation",
    "technical",
    "error",
    "login",
    "connection",
    "update",
    "refresh",
];

/// Classifies a query's complexity. Pure and total: every input, including
/// the empty string, maps to exactly one label.
pub fn classify(query: &str) -> Complexity {
    let lower = query.to_lowercase();
    if COMPLEX_INDICATORS.iter().any(|term| lower.contains(term)) {
        Complexity::Complex
    } else {
        Complexity::Simple
    }
}
