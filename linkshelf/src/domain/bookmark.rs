// linkshelf/src/domain/bookmark.rs
use crate::domain::error::{DomainError, DomainResult};
use chrono::{DateTime, Utc};
use derive_builder::Builder;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A saved URL as stored by the remote service.
///
/// `id` and `created_at` are assigned by the service; nothing here creates them.
#[derive(Builder, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Bookmark {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    pub url: String,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub title: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub description: Option<String>,
    #[builder(setter(into, strip_option), default)]
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[builder(default = "Utc::now()")]
    pub created_at: DateTime<Utc>,
}

impl Bookmark {
    /// Link text: the title when there is one, the URL otherwise
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => &self.url,
        }
    }

    pub fn description_text(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Tags in the order the service returned them; empty when absent
    pub fn visible_tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }
}

impl fmt::Display for Bookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.id, self.display_title(), self.url)
    }
}

/// Insert payload. The service fills in id and timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewBookmark {
    pub url: String,
    pub user_id: String,
}

impl NewBookmark {
    /// The URL is kept exactly as typed; only blank input is refused.
    pub fn new<S: Into<String>>(url: S, user_id: &str) -> DomainResult<Self> {
        let url = url.into();
        if url.trim().is_empty() {
            return Err(DomainError::InvalidUrl("URL cannot be empty".to_string()));
        }
        Ok(Self {
            url,
            user_id: user_id.to_string(),
        })
    }
}

/// Checks that `input` is an absolute URL, the way a form URL field would.
pub fn parse_absolute_url(input: &str) -> DomainResult<url::Url> {
    url::Url::parse(input.trim()).map_err(|e| DomainError::InvalidUrl(format!("{}: {}", input, e)))
}

// PostgREST returns bigint keys as numbers and uuid keys as strings
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> Bookmark {
        BookmarkBuilder::default()
            .id("a1")
            .url("https://example.com")
            .created_at(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn given_missing_title_when_display_title_then_falls_back_to_url() {
        let bm = sample();
        assert_eq!(bm.display_title(), "https://example.com");
    }

    #[test]
    fn given_empty_title_when_display_title_then_falls_back_to_url() {
        let mut bm = sample();
        bm.title = Some(String::new());
        assert_eq!(bm.display_title(), "https://example.com");

        bm.title = Some("Example".to_string());
        assert_eq!(bm.display_title(), "Example");
    }

    #[test]
    fn given_empty_description_when_description_text_then_none() {
        let mut bm = sample();
        assert_eq!(bm.description_text(), None);
        bm.description = Some(String::new());
        assert_eq!(bm.description_text(), None);
        bm.description = Some("notes".to_string());
        assert_eq!(bm.description_text(), Some("notes"));
    }

    #[test]
    fn given_tags_when_visible_tags_then_keeps_service_order() {
        let mut bm = sample();
        assert!(bm.visible_tags().is_empty());
        bm.tags = Some(vec!["zeta".to_string(), "alpha".to_string()]);
        assert_eq!(bm.visible_tags(), ["zeta", "alpha"]);
    }

    #[test]
    fn given_blank_url_when_new_bookmark_then_invalid_url() {
        assert!(matches!(
            NewBookmark::new("   ", "user-1"),
            Err(DomainError::InvalidUrl(_))
        ));
        assert!(matches!(
            NewBookmark::new("", "user-1"),
            Err(DomainError::InvalidUrl(_))
        ));
    }

    #[test]
    fn given_padded_url_when_new_bookmark_then_url_kept_verbatim() {
        let nb = NewBookmark::new(" https://example.com ", "user-1").unwrap();
        assert_eq!(nb.url, " https://example.com ");
        assert_eq!(nb.user_id, "user-1");
    }

    #[test]
    fn given_new_bookmark_when_serialize_then_only_url_and_user_id() {
        let nb = NewBookmark::new("https://example.com", "user-1").unwrap();
        let json = serde_json::to_value(&nb).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"url": "https://example.com", "user_id": "user-1"})
        );
    }

    #[test]
    fn given_numeric_or_text_id_when_deserialize_then_id_is_string() {
        let numeric: Bookmark = serde_json::from_str(
            r#"{"id": 42, "url": "https://a.example", "title": null, "description": null,
                "tags": null, "created_at": "2024-01-01T00:00:00+00:00"}"#,
        )
        .unwrap();
        assert_eq!(numeric.id, "42");
        assert_eq!(numeric.title, None);

        let text: Bookmark = serde_json::from_str(
            r#"{"id": "0b4c", "url": "https://b.example", "tags": ["rust", "cli"],
                "created_at": "2024-01-01T00:00:00Z", "user_id": "u"}"#,
        )
        .unwrap();
        assert_eq!(text.id, "0b4c");
        assert_eq!(text.visible_tags(), ["rust", "cli"]);
    }

    #[test]
    fn given_relative_input_when_parse_absolute_url_then_error() {
        assert!(parse_absolute_url("https://example.com/x").is_ok());
        assert!(parse_absolute_url("example.com").is_err());
    }
}
