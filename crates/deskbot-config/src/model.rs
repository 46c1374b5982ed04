// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the deskbot support engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level deskbot configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DeskbotConfig {
    /// Agent identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Knowledge base settings.
    #[serde(default)]
    pub knowledge: KnowledgeConfig,

    /// Retrieval engine settings.
    #[serde(default)]
    pub retrieval: RetrievalConfig,

    /// Model routing and cooldown settings.
    #[serde(default)]
    pub routing: RoutingConfig,

    /// OpenRouter API settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,
}

/// Agent identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
        }
    }
}

/// Knowledge base configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct KnowledgeConfig {
    /// Path to the JSON file holding `{id, question, answer}` records.
    #[serde(default = "default_knowledge_path")]
    pub path: String,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            path: default_knowledge_path(),
        }
    }
}

/// Retrieval engine configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RetrievalConfig {
    /// Number of candidates the orchestrator requests per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            top_k: default_top_k(),
        }
    }
}

/// Model routing and availability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RoutingConfig {
    /// Model identifier for simple queries.
    #[serde(default = "default_simple_model")]
    pub simple_model: String,

    /// Model identifier for complex queries.
    #[serde(default = "default_complex_model")]
    pub complex_model: String,

    /// Minimum seconds between successful uses of the same model.
    #[serde(default = "default_cooldown_seconds")]
    pub cooldown_seconds: u64,

    /// Seconds a model stays sidelined after a rate-limit response.
    #[serde(default = "default_rate_limit_cooldown_seconds")]
    pub rate_limit_cooldown_seconds: u64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            simple_model: default_simple_model(),
            complex_model: default_complex_model(),
            cooldown_seconds: default_cooldown_seconds(),
            rate_limit_cooldown_seconds: default_rate_limit_cooldown_seconds(),
        }
    }
}

/// OpenRouter API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// API key. When absent the engine runs in fallback-only mode.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint URL.
    #[serde(default = "default_openrouter_url")]
    pub base_url: String,

    /// Max tokens per completion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_openrouter_url(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_agent_name() -> String {
    "deskbot".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_knowledge_path() -> String {
    "knowledge.json".to_string()
}

fn default_top_k() -> usize {
    5
}

fn default_simple_model() -> String {
    "mistralai/mistral-7b-instruct:free".to_string()
}

fn default_complex_model() -> String {
    "google/gemma-3n-e2b-it:free".to_string()
}

fn default_cooldown_seconds() -> u64 {
    300
}

fn default_rate_limit_cooldown_seconds() -> u64 {
    600
}

fn default_openrouter_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_max_tokens() -> u32 {
    250
}

fn default_temperature() -> f64 {
    0.2
}

fn default_timeout_seconds() -> u64 {
    30
}
