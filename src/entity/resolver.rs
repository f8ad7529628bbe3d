use anyhow::{anyhow, Context, Result};
use tracing::{error, info};

use crate::entity::extract::first_json_array;
use crate::llm::TextGenerator;
use crate::prompts;

use super::TARGET_ENTITY;

/// Ask the model which distinct political entities existed on `continent`
/// during `year`, and parse its free-text reply into an ordered list of
/// names. Uniqueness and alphabetical ordering are the model's
/// responsibility; the list is passed through as-is.
///
/// An empty list is a valid result. A reply with no parseable JSON array is
/// fatal for the whole request.
pub async fn resolve_entities<G>(generator: &G, year: &str, continent: &str) -> Result<Vec<String>>
where
    G: TextGenerator + ?Sized,
{
    let prompt = prompts::entity_list_prompt(year, continent);

    let response = generator
        .generate(&prompt)
        .await
        .context("Entity resolution failed: no response from model")?;

    let json_str = match first_json_array(&response) {
        Some(json_str) => json_str,
        None => {
            error!(
                target: TARGET_ENTITY,
                "Model did not return a JSON array for {} / {}. Raw response: {}",
                continent, year, response
            );
            return Err(anyhow!("Model did not return a JSON array of entities"));
        }
    };

    let entity_names: Vec<String> =
        serde_json::from_str(json_str).context("Entity list was not a valid JSON array")?;

    info!(
        target: TARGET_ENTITY,
        "Resolved {} entities for {} / {}",
        entity_names.len(),
        continent,
        year
    );

    Ok(entity_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;

    struct ScriptedGenerator {
        response: &'static str,
    }

    #[async_trait]
    impl TextGenerator for ScriptedGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.response.to_string())
        }
    }

    struct FailingGenerator;

    #[async_trait]
    impl TextGenerator for FailingGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(anyhow!("connection refused"))
        }
    }

    #[tokio::test]
    async fn test_resolves_entity_list_from_noisy_response() {
        let generator = ScriptedGenerator {
            response: "Here you go:\n[\"British Raj\", \"Qing Dynasty\"]",
        };
        let names = resolve_entities(&generator, "1916", "Asia").await.unwrap();
        assert_eq!(names, vec!["British Raj", "Qing Dynasty"]);
    }

    #[tokio::test]
    async fn test_empty_array_is_a_valid_result() {
        let generator = ScriptedGenerator { response: "[]" };
        let names = resolve_entities(&generator, "1916", "Antarctica")
            .await
            .unwrap();
        assert!(names.is_empty());
    }

    #[tokio::test]
    async fn test_response_without_array_is_an_error() {
        let generator = ScriptedGenerator {
            response: "I am unable to answer that.",
        };
        let result = resolve_entities(&generator, "1916", "Asia").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unparseable_array_is_an_error() {
        let generator = ScriptedGenerator {
            response: "[not, valid, json]",
        };
        let result = resolve_entities(&generator, "1916", "Asia").await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        let result = resolve_entities(&FailingGenerator, "1916", "Asia").await;
        assert!(result.is_err());
    }
}
