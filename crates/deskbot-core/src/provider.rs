// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation-capability trait for language-model backends.

use async_trait::async_trait;

use crate::error::DeskbotError;

/// A language-model backend the orchestrator can call.
///
/// Given a fully assembled prompt and a model identifier, return generated
/// text or a typed failure ([`DeskbotError::Provider`]). Implementations own
/// their deadline; the engine makes exactly one attempt per query and falls
/// back on any failure.
#[async_trait]
pub trait GenerateCapability: Send + Sync {
    /// Generates a completion for `prompt` using the model named by `model_id`.
    async fn generate(&self, prompt: &str, model_id: &str) -> Result<String, DeskbotError>;
}
