use chrono::{SecondsFormat, Utc};

use crate::errors::StoreError;
use crate::state::collection::JsonCollection;
use crate::state::records::Visit;

/// All recorded visits, oldest first.
pub async fn list(visits: &JsonCollection<Visit>) -> Result<Vec<Visit>, StoreError> {
    visits.load().await
}

/// Append a visit for `url` stamped with the current time.
pub async fn record(visits: &JsonCollection<Visit>, url: &str) -> Result<Visit, StoreError> {
    let visit = Visit::new(url.to_string(), now_iso8601());
    let stored = visit.clone();

    visits.modify(move |all| all.push(stored)).await?;

    tracing::debug!("Recorded visit to {}", url);
    Ok(visit)
}

/// `2024-05-01T12:00:00.000Z`
fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WriteMode;
    use chrono::DateTime;
    use serde_json::json;

    #[test]
    fn timestamps_are_utc_with_millis() {
        let ts = now_iso8601();

        assert_eq!(ts.len(), "2024-05-01T12:00:00.000Z".len());
        assert!(ts.ends_with('Z'));
        assert!(DateTime::parse_from_rfc3339(&ts).is_ok());
    }

    #[tokio::test]
    async fn record_appends_after_existing_visits() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visits.json");
        std::fs::write(
            &path,
            r#"[{"url":"http://old","timestamp":"2020-01-01T00:00:00.000Z"}]"#,
        )
        .unwrap();
        let visits = JsonCollection::new("visits", path, WriteMode::Serialized, true);

        let visit = record(&visits, "http://new").await.unwrap();

        let all = list(&visits).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].field("url"), Some(&json!("http://old")));
        assert_eq!(all[1], visit);
    }

    #[tokio::test]
    async fn visits_without_a_timestamp_still_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visits.json");
        std::fs::write(&path, r#"[{"url":"http://bare"}]"#).unwrap();
        let visits = JsonCollection::new("visits", path, WriteMode::Serialized, true);

        record(&visits, "http://next").await.unwrap();

        let all = list(&visits).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].field("timestamp"), None);
    }
}
