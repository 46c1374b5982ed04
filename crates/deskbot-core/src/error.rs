// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the deskbot support engine.

use thiserror::Error;

/// The primary error type used across deskbot crates.
///
/// Runtime conditions on the query path (no candidates, cooldown, failed
/// generation calls) are recovered internally and never surface as errors;
/// these variants cover construction and loading, plus the typed provider
/// failures the orchestrator inspects before falling back.
#[derive(Debug, Error)]
pub enum DeskbotError {
    /// Configuration errors (invalid TOML, missing required fields).
    #[error("configuration error: {0}")]
    Config(String),

    /// Knowledge base load errors (missing file, malformed JSON).
    #[error("knowledge base error: {message}")]
    Knowledge {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Generation-capability failures (timeout, rate limit, bad payload).
    #[error("provider error ({failure}): {message}")]
    Provider {
        failure: ProviderFailure,
        message: String,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure kinds a generation capability can report.
///
/// The orchestrator treats every kind uniformly (immediate fallback, no
/// retry) but records `RateLimited` against the model's rate-limit ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderFailure {
    /// The request did not complete within the caller-imposed deadline.
    Timeout,
    /// The provider returned a rate-limit status (HTTP 429).
    RateLimited,
    /// The response arrived but did not contain generated text.
    MalformedResponse,
    /// Connection, DNS, TLS, or non-success status failures.
    TransportError,
}

impl std::fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderFailure::Timeout => write!(f, "timeout"),
            ProviderFailure::RateLimited => write!(f, "rate-limited"),
            ProviderFailure::MalformedResponse => write!(f, "malformed-response"),
            ProviderFailure::TransportError => write!(f, "transport-error"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failure_display() {
        assert_eq!(ProviderFailure::Timeout.to_string(), "timeout");
        assert_eq!(ProviderFailure::RateLimited.to_string(), "rate-limited");
        assert_eq!(
            ProviderFailure::MalformedResponse.to_string(),
            "malformed-response"
        );
        assert_eq!(
            ProviderFailure::TransportError.to_string(),
            "transport-error"
        );
    }

    #[test]
    fn provider_error_message_includes_failure_kind() {
        let err = DeskbotError::Provider {
            failure: ProviderFailure::RateLimited,
            message: "HTTP 429".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("rate-limited"), "got: {msg}");
        assert!(msg.contains("HTTP 429"), "got: {msg}");
    }
}
