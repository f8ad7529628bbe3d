use serde::{Deserialize, Serialize};

/// Sentinel flag code used when enrichment output for an entity is unusable.
pub const FALLBACK_MODERN_CODE: &str = "xx";

/// One historical political entity, enriched for a single year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityRecord {
    // Entity name exactly as the resolver produced it
    pub name: String,

    // 2-letter lowercase code for a flag icon; "xx" when unknown
    pub representative_modern_code: String,

    // Notable events for the entity in the queried year; may be empty
    #[serde(default)]
    pub events: Vec<String>,
}

impl EntityRecord {
    /// Degraded record returned when the model's enrichment response cannot
    /// be parsed. Keeps the entity in the payload with sentinel values.
    pub fn degraded(name: &str) -> Self {
        EntityRecord {
            name: name.to_string(),
            representative_modern_code: FALLBACK_MODERN_CODE.to_string(),
            events: Vec::new(),
        }
    }
}

/// Full ordered list of enriched records for one (year, continent) query,
/// order matching the resolver's output order.
pub type AggregatePayload = Vec<EntityRecord>;
