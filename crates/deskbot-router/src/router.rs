// SPDX-FileCopyrightText: 2026 Deskbot Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model-tier selection: a fixed complexity-to-model mapping, overridable
//! through `RoutingConfig`.

use std::str::FromStr;

use deskbot_config::model::RoutingConfig;
use strum::{Display, EnumString};
use tracing::debug;

use crate::classifier::{Complexity, classify};

/// Named generation backends with their complexity affinity and cost profile.
///
/// Both default tiers are free OpenRouter models; the cooldown gate, not
/// price, is what rations them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
pub enum ModelTier {
    /// Low-cost tier for simple queries.
    #[strum(serialize = "mistralai/mistral-7b-instruct:free")]
    MistralSmall,
    /// Higher-capability tier for complex queries.
    #[strum(serialize = "google/gemma-3n-e2b-it:free")]
    GemmaLarge,
}

impl ModelTier {
    /// The wire identifier sent to the provider.
    pub fn id(&self) -> &'static str {
        match self {
            ModelTier::MistralSmall => "mistralai/mistral-7b-instruct:free",
            ModelTier::GemmaLarge => "google/gemma-3n-e2b-it:free",
        }
    }

    /// The complexity this tier is intended for.
    pub fn affinity(&self) -> Complexity {
        match self {
            ModelTier::MistralSmall => Complexity::Simple,
            ModelTier::GemmaLarge => Complexity::Complex,
        }
    }

    /// Whether this tier carries the free designation.
    pub fn is_free(&self) -> bool {
        self.id().ends_with(":free")
    }

    /// Short display name for logs and prompts.
    pub fn short_name(&self) -> &'static str {
        match self {
            ModelTier::MistralSmall => "Mistral 7B",
            ModelTier::GemmaLarge => "Gemma 3n",
        }
    }
}

/// The routing outcome for one query.
#[derive(Debug, Clone)]
pub struct RoutingDecision {
    /// Classified complexity.
    pub complexity: Complexity,
    /// Model identifier selected for the call.
    pub model_id: String,
    /// Known tier for the selected identifier, when it is one of ours.
    pub tier: Option<ModelTier>,
}

/// Maps classified complexity to a configured model identifier.
pub struct ModelRouter {
    config: RoutingConfig,
}

impl ModelRouter {
    /// Creates a router with the given routing configuration.
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Classifies `query` and selects the model for its complexity.
    pub fn route(&self, query: &str) -> RoutingDecision {
        let complexity = classify(query);
        let model_id = match complexity {
            Complexity::Simple => self.config.simple_model.clone(),
            Complexity::Complex => self.config.complex_model.clone(),
        };
        let tier = ModelTier::from_str(&model_id).ok();

        debug!(%complexity, model = %model_id, "routing decision");

        RoutingDecision {
            complexity,
            model_id,
            tier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_query_routes_to_simple_model() {
        let router = ModelRouter::new(RoutingConfig::default());
        let decision = router.route("How much does it cost?");
        assert_eq!(decision.complexity, Complexity::Simple);
        assert_eq!(decision.model_id, "mistralai/mistral-7b-instruct:free");
        assert_eq!(decision.tier, Some(ModelTier::MistralSmall));
    }

    #[test]
    fn complex_query_routes_to_complex_model() {
        let router = ModelRouter::new(RoutingConfig::default());
        let decision = router.route("MT5 login authorization error");
        assert_eq!(decision.complexity, Complexity::Complex);
        assert_eq!(decision.model_id, "google/gemma-3n-e2b-it:free");
        assert_eq!(decision.tier, Some(ModelTier::GemmaLarge));
    }

    #[test]
    fn custom_model_id_has_no_known_tier() {
        let config = RoutingConfig {
            simple_model: "meta-llama/llama-3.1-8b-instruct".to_string(),
            ..RoutingConfig::default()
        };
        let router = ModelRouter::new(config);
        let decision = router.route("hello");
        assert_eq!(decision.tier, None);
        assert_eq!(decision.model_id, "meta-llama/llama-3.1-8b-instruct");
    }

    #[test]
    fn tier_metadata() {
        assert_eq!(ModelTier::MistralSmall.affinity(), Complexity::Simple);
        assert_eq!(ModelTier::GemmaLarge.affinity(), Complexity::Complex);
        assert!(ModelTier::MistralSmall.is_free());
        assert!(ModelTier::GemmaLarge.is_free());
    }

    #[test]
    fn tier_id_round_trips_through_from_str() {
        for tier in [ModelTier::MistralSmall, ModelTier::GemmaLarge] {
            let parsed = ModelTier::from_str(tier.id()).expect("should parse back");
            assert_eq!(tier, parsed);
        }
    }

    #[test]
    fn tier_display_matches_id() {
        assert_eq!(
            ModelTier::MistralSmall.to_string(),
            ModelTier::MistralSmall.id()
        );
        assert_eq!(ModelTier::GemmaLarge.to_string(), ModelTier::GemmaLarge.id());
    }
}
