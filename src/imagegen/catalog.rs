// The fixed model catalog advertised by /api/available-models.
//
// These are the public-facing names; client.rs maps them to the provider's
// internal identifiers.

use serde::Serialize;

/// A selectable image-generation model.
#[derive(Debug, Clone, Serialize)]
pub struct ModelInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub speed: &'static str,
    pub quality: &'static str,
}

/// Models offered to authors, in display order.
pub const MODELS: [ModelInfo; 4] = [
    ModelInfo {
        id: "nano-banana-pro",
        name: "Nano Banana Pro",
        description: "Fast & affordable image generation based on Gemini",
        speed: "fast",
        quality: "good",
    },
    ModelInfo {
        id: "flux-kontext-pro",
        name: "Flux Kontext Pro",
        description: "Balanced quality and speed",
        speed: "medium",
        quality: "high",
    },
    ModelInfo {
        id: "flux-kontext-max",
        name: "Flux Kontext Max",
        description: "Highest quality and detail",
        speed: "slow",
        quality: "premium",
    },
    ModelInfo {
        id: "4o-image",
        name: "GPT-Image-1 (4o)",
        description: "OpenAI's image generation model",
        speed: "medium",
        quality: "high",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imagegen::client::map_model_id;

    #[test]
    fn test_catalog_lists_four_models() {
        assert_eq!(MODELS.len(), 4);
        assert_eq!(MODELS[0].id, "nano-banana-pro");
    }

    #[test]
    fn test_every_catalog_model_has_a_provider_mapping() {
        // The fallback is google/nano-banana; every advertised model must
        // map somewhere deliberate, which for nano-banana-pro happens to
        // equal the fallback.
        for model in &MODELS {
            assert!(!map_model_id(model.id).is_empty());
        }
        assert_eq!(map_model_id("nano-banana-pro"), "google/nano-banana");
        assert_eq!(map_model_id("4o-image"), "openai/gpt-image-1");
    }
}
