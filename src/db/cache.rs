use chrono::Utc;
use tracing::debug;

use super::core::Database;
use crate::entity::AggregatePayload;
use crate::TARGET_DB;

/// Derives the storage key for a (year, continent) query. Spaces in the
/// continent name become underscores; case is preserved. Distinct queries
/// must never collide, so the rule is a plain deterministic concatenation.
pub fn cache_key(year: &str, continent: &str) -> String {
    format!("{}_{}", year, continent.replace(' ', "_"))
}

impl Database {
    /// Looks up a previously computed payload by key. Absence is a normal
    /// negative result, not an error.
    pub async fn get_cached_payload(
        &self,
        cache_key: &str,
    ) -> Result<Option<AggregatePayload>, sqlx::Error> {
        let stored = sqlx::query_scalar::<_, String>(
            "SELECT payload FROM historical_cache WHERE cache_key = ?",
        )
        .bind(cache_key)
        .fetch_optional(self.pool())
        .await?;

        match stored {
            Some(payload_json) => {
                debug!(target: TARGET_DB, "Found cached payload for {}", cache_key);
                let payload = serde_json::from_str(&payload_json)
                    .map_err(|e| sqlx::Error::Decode(Box::new(e)))?;
                Ok(Some(payload))
            }
            None => Ok(None),
        }
    }

    /// Stores a computed payload with a creation timestamp. Entries are never
    /// updated afterwards; an accidental duplicate write overwrites
    /// (last writer wins).
    pub async fn store_payload(
        &self,
        cache_key: &str,
        payload: &AggregatePayload,
    ) -> Result<(), sqlx::Error> {
        let payload_json =
            serde_json::to_string(payload).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;

        sqlx::query(
            "INSERT OR REPLACE INTO historical_cache (cache_key, payload, created_at) VALUES (?, ?, ?)",
        )
        .bind(cache_key)
        .bind(payload_json)
        .bind(Utc::now().to_rfc3339())
        .execute(self.pool())
        .await?;

        debug!(target: TARGET_DB, "Stored payload for {}", cache_key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::EntityRecord;

    #[test]
    fn test_cache_key_replaces_spaces_with_underscores() {
        assert_eq!(cache_key("1916", "South America"), "1916_South_America");
    }

    #[test]
    fn test_cache_key_preserves_case_and_plain_names() {
        assert_eq!(cache_key("1916", "Asia"), "1916_Asia");
        assert_eq!(cache_key("1916", "asia"), "1916_asia");
    }

    #[test]
    fn test_cache_key_distinct_for_distinct_queries() {
        assert_ne!(cache_key("1916", "Asia"), cache_key("1917", "Asia"));
        assert_ne!(cache_key("1916", "Asia"), cache_key("1916", "Europe"));
    }

    #[tokio::test]
    async fn test_store_and_get_roundtrip() {
        let db = Database::new_in_memory().await.unwrap();
        let payload = vec![EntityRecord {
            name: "British Raj".to_string(),
            representative_modern_code: "in".to_string(),
            events: vec!["Event A".to_string()],
        }];

        db.store_payload("1916_Asia", &payload).await.unwrap();
        let fetched = db.get_cached_payload("1916_Asia").await.unwrap();
        assert_eq!(fetched, Some(payload));
    }

    #[tokio::test]
    async fn test_get_absent_key_is_none() {
        let db = Database::new_in_memory().await.unwrap();
        let fetched = db.get_cached_payload("1916_Asia").await.unwrap();
        assert_eq!(fetched, None);
    }

    #[tokio::test]
    async fn test_empty_payload_is_stored_and_served() {
        let db = Database::new_in_memory().await.unwrap();
        db.store_payload("1916_Antarctica", &Vec::new())
            .await
            .unwrap();
        let fetched = db.get_cached_payload("1916_Antarctica").await.unwrap();
        assert_eq!(fetched, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_duplicate_write_overwrites() {
        let db = Database::new_in_memory().await.unwrap();
        let first = vec![EntityRecord::degraded("Siam")];
        let second = vec![EntityRecord {
            name: "Siam".to_string(),
            representative_modern_code: "th".to_string(),
            events: vec!["Event B".to_string()],
        }];

        db.store_payload("1916_Asia", &first).await.unwrap();
        db.store_payload("1916_Asia", &second).await.unwrap();
        let fetched = db.get_cached_payload("1916_Asia").await.unwrap();
        assert_eq!(fetched, Some(second));
    }
}
