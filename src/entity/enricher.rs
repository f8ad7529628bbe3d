use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::entity::extract::first_json_object;
use crate::entity::types::{EntityRecord, FALLBACK_MODERN_CODE};
use crate::llm::TextGenerator;
use crate::prompts;

use super::TARGET_ENTITY;

/// Fields the model returns for one entity. Missing or malformed pieces fall
/// back to sentinel values rather than failing the record.
#[derive(Deserialize)]
struct EnrichmentFields {
    representative_modern_code: Option<String>,
    events: Option<Vec<String>>,
}

/// Ask the model for the events of one entity in `year` and build its
/// [`EntityRecord`]. A transport failure propagates and is fatal for the
/// whole request; an unparseable reply degrades to a sentinel record and is
/// not an error.
pub async fn enrich_entity<G>(generator: &G, entity_name: &str, year: &str) -> Result<EntityRecord>
where
    G: TextGenerator + ?Sized,
{
    let prompt = prompts::entity_events_prompt(entity_name, year);

    let response = generator
        .generate(&prompt)
        .await
        .with_context(|| format!("Event enrichment failed for entity: {}", entity_name))?;

    let json_str = match first_json_object(&response) {
        Some(json_str) => json_str,
        None => {
            warn!(
                target: TARGET_ENTITY,
                "No JSON object in enrichment response for {}; using fallback record. Raw response: {}",
                entity_name, response
            );
            return Ok(EntityRecord::degraded(entity_name));
        }
    };

    let fields: EnrichmentFields = match serde_json::from_str(json_str) {
        Ok(fields) => fields,
        Err(e) => {
            warn!(
                target: TARGET_ENTITY,
                "Unparseable enrichment object for {}: {}. Using fallback record.",
                entity_name, e
            );
            return Ok(EntityRecord::degraded(entity_name));
        }
    };

    debug!(target: TARGET_ENTITY, "Enriched entity {}", entity_name);

    Ok(EntityRecord {
        name: entity_name.to_string(),
        representative_modern_code: fields
            .representative_modern_code
            .unwrap_or_else(|| FALLBACK_MODERN_CODE.to_string()),
        events: fields.events.unwrap_or_default(),
    })
}
