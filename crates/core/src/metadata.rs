//! Typed view over a project's untyped metadata bag.
//!
//! Projects store metadata as a free-form JSON object. The exporters and
//! document templates need a few well-known keys, so this module reads them
//! leniently: unknown keys are ignored, identifiers may be strings or
//! numbers, and shares may be `50`, `50.0`, or `"50"`. Identifier codes
//! (ISRC, UPC, ISWC, IPI) are carried as opaque strings and never checked.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Tolerance when comparing share totals against 100.
const SHARE_EPSILON: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectMetadata {
    #[serde(deserialize_with = "opaque_string")]
    pub isrc: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub upc: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub iswc: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub artist: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub album: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub label: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub release_date: Option<String>,
    /// Recording length as entered (`"3:45"`, `"225"`).
    #[serde(deserialize_with = "opaque_string")]
    pub duration: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub genre: Option<String>,
    pub writers: Vec<Writer>,
    pub publishers: Vec<Publisher>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Writer {
    pub name: String,
    #[serde(deserialize_with = "opaque_string")]
    pub ipi: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub pro: Option<String>,
    #[serde(deserialize_with = "lenient_share")]
    pub share: Option<f64>,
    /// Free text such as `composer`, `lyricist`, `composer/lyricist`.
    #[serde(deserialize_with = "opaque_string")]
    pub role: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Publisher {
    pub name: String,
    #[serde(deserialize_with = "opaque_string")]
    pub ipi: Option<String>,
    #[serde(deserialize_with = "opaque_string")]
    pub pro: Option<String>,
    #[serde(deserialize_with = "lenient_share")]
    pub share: Option<f64>,
}

impl ProjectMetadata {
    /// Parse the metadata bag stored on a project row.
    ///
    /// `null` yields an empty metadata set. Any other non-object value, or an
    /// object whose well-known keys have unusable types, is an error.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value.clone())
                .map_err(|e| format!("Unreadable project metadata: {e}")),
            _ => Err("Project metadata must be a JSON object".to_string()),
        }
    }

    /// Sum of all writer shares (missing shares count as zero).
    pub fn writer_share_total(&self) -> f64 {
        self.writers.iter().filter_map(|w| w.share).sum()
    }

    /// Sum of all publisher shares (missing shares count as zero).
    pub fn publisher_share_total(&self) -> f64 {
        self.publishers.iter().filter_map(|p| p.share).sum()
    }

    /// Shares must be non-negative and each party type must total at most 100.
    pub fn validate_shares(&self) -> Result<(), String> {
        let negative_writer = self.writers.iter().any(|w| w.share.is_some_and(|s| s < 0.0));
        let negative_publisher = self
            .publishers
            .iter()
            .any(|p| p.share.is_some_and(|s| s < 0.0));
        if negative_writer || negative_publisher {
            return Err("Ownership shares cannot be negative".to_string());
        }

        let writers = self.writer_share_total();
        if writers > 100.0 + SHARE_EPSILON {
            return Err(format!(
                "Writer shares total {} which exceeds 100",
                format_share(writers)
            ));
        }
        let publishers = self.publisher_share_total();
        if publishers > 100.0 + SHARE_EPSILON {
            return Err(format!(
                "Publisher shares total {} which exceeds 100",
                format_share(publishers)
            ));
        }
        Ok(())
    }
}

impl Writer {
    /// Split the writer's name into `(first, last)` on the final space.
    ///
    /// A single-word name is treated as a last name.
    pub fn split_name(&self) -> (String, String) {
        let name = self.name.trim();
        match name.rsplit_once(char::is_whitespace) {
            Some((first, last)) => (first.trim().to_string(), last.to_string()),
            None => (String::new(), name.to_string()),
        }
    }
}

/// Render a share without trailing zeros (`50`, `33.33`).
pub fn format_share(share: f64) -> String {
    let rounded = (share * 100.0).round() / 100.0;
    if rounded.fract() == 0.0 {
        format!("{rounded:.0}")
    } else {
        let s = format!("{rounded:.2}");
        s.trim_end_matches('0').to_string()
    }
}

// ---------------------------------------------------------------------------
// Lenient field deserializers
// ---------------------------------------------------------------------------

fn opaque_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

fn lenient_share<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        Some(Value::Number(n)) => Ok(n.as_f64()),
        Some(Value::String(s)) => {
            let trimmed = s.trim().trim_end_matches('%').trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid share '{s}'")))
        }
        _ => Ok(None),
    }
}
