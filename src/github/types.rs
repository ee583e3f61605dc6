// GitHub API response views.
// Cached metadata is kept as raw JSON; these types read the fields the page renders.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// Repository fields consumed by the project gallery.
///
/// Every field is optional because cached payloads are stored without schema
/// validation and may come from older API responses.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepoSummary {
    pub name: Option<String>,
    pub description: Option<String>,
    pub html_url: Option<String>,
    pub language: Option<String>,
    pub stargazers_count: Option<u64>,
    pub created_at: Option<DateTime<Utc>>,
}

impl RepoSummary {
    /// Read the rendered fields out of a raw repository payload.
    ///
    /// Fields with an unexpected shape are left empty instead of rejecting
    /// the whole payload.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);
        Self {
            name: text("name"),
            description: text("description"),
            html_url: text("html_url"),
            language: text("language"),
            stargazers_count: value.get("stargazers_count").and_then(Value::as_u64),
            created_at: value
                .get("created_at")
                .and_then(Value::as_str)
                .and_then(|s| s.parse::<DateTime<Utc>>().ok()),
        }
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    /// `None` until a response has reported it.
    pub remaining: Option<u64>,
    pub reset: u64,
}

impl RateLimit {
    pub fn is_exhausted(&self) -> bool {
        self.remaining == Some(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_reads_known_fields() {
        let value = json!({
            "name": "folio",
            "description": "Portfolio builder",
            "html_url": "https://github.com/octocat/folio",
            "language": "Rust",
            "stargazers_count": 12,
            "created_at": "2024-03-01T10:00:00Z",
            "fork": false
        });

        let summary = RepoSummary::from_value(&value);
        assert_eq!(summary.name.as_deref(), Some("folio"));
        assert_eq!(summary.language.as_deref(), Some("Rust"));
        assert_eq!(summary.stargazers_count, Some(12));
        assert_eq!(
            summary.created_at.map(|d| d.format("%Y-%m-%d").to_string()),
            Some("2024-03-01".to_string())
        );
    }

    #[test]
    fn test_summary_tolerates_bad_shapes() {
        let value = json!({
            "name": 42,
            "description": null,
            "stargazers_count": "many",
            "created_at": "yesterday"
        });

        let summary = RepoSummary::from_value(&value);
        assert_eq!(summary, RepoSummary::default());
    }

    #[test]
    fn test_rate_limit_unknown_is_not_exhausted() {
        assert!(!RateLimit::default().is_exhausted());
        let limit = RateLimit {
            remaining: Some(0),
            ..RateLimit::default()
        };
        assert!(limit.is_exhausted());
    }
}
