//! Catalog response types.
//!
//! Field names follow the service's JSON (`ID`, `Title`, ...). Decoding is
//! lenient: the service owns the shape, so a `null` or oddly typed field
//! never rejects an otherwise good response.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A model as listed by search and by-user endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    #[serde(rename = "ID", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "Title", default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "Thumbnail", default, deserialize_with = "lenient_string")]
    pub thumbnail: String,
    /// Direct URI of the model asset
    #[serde(rename = "Download", default, deserialize_with = "lenient_string")]
    pub download: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Author of a model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Creator {
    #[serde(rename = "Username")]
    pub username: String,
    /// Profile picture URI
    #[serde(rename = "DPURL", skip_serializing_if = "Option::is_none")]
    pub dp_url: Option<String>,
}

/// A model as returned by the by-id endpoint.
///
/// Holds the body as sent. Accessors read the known fields and return
/// `None` (or empty) when a field is missing or has an unexpected type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelDetail(Map<String, Value>);

impl ModelDetail {
    pub fn id(&self) -> String {
        self.text("ID").unwrap_or_default()
    }

    pub fn title(&self) -> String {
        self.text("Title").unwrap_or_default()
    }

    pub fn thumbnail(&self) -> String {
        self.text("Thumbnail").unwrap_or_default()
    }

    pub fn download(&self) -> String {
        self.text("Download").unwrap_or_default()
    }

    pub fn attribution(&self) -> Option<String> {
        self.text("Attribution")
    }

    pub fn licence(&self) -> Option<String> {
        self.text("Licence")
    }

    /// Category name or number, as text.
    pub fn category(&self) -> Option<String> {
        self.text("Category")
    }

    pub fn description(&self) -> Option<String> {
        self.text("Description")
    }

    /// String tags; anything else in the list is skipped.
    pub fn tags(&self) -> Vec<String> {
        match self.0.get("Tags") {
            Some(Value::Array(tags)) => tags
                .iter()
                .filter_map(|t| t.as_str().map(String::from))
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn creator(&self) -> Option<Creator> {
        let creator = self.0.get("Creator")?.as_object()?;
        let username = creator.get("Username").and_then(scalar_text)?;
        Some(Creator {
            username,
            dp_url: creator.get("DPURL").and_then(scalar_text),
        })
    }

    pub fn tri_count(&self) -> Option<u64> {
        let value = self.0.get("Tri Count")?;
        value
            .as_u64()
            .or_else(|| value.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
    }

    pub fn animated(&self) -> Option<bool> {
        self.0.get("Animated")?.as_bool()
    }

    /// Any field, as sent.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// The summary subset of this model.
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            id: self.id(),
            title: self.title(),
            thumbnail: self.thumbnail(),
            download: self.download(),
            extra: Map::new(),
        }
    }

    fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(scalar_text)
    }
}

/// Strings as-is, numbers and booleans rendered; `null` and containers are `None`.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(scalar_text(&value).unwrap_or_default())
}

/// Body of `GET /search/{keyword}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<Value>>,
}

impl SearchResponse {
    pub(crate) fn into_models(self) -> Vec<ModelSummary> {
        decode_models(self.results)
    }
}

/// Body of `GET /user/{username}`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct UserModelsResponse {
    #[serde(default)]
    models: Option<Vec<Value>>,
}

impl UserModelsResponse {
    pub(crate) fn into_models(self) -> Vec<ModelSummary> {
        decode_models(self.models)
    }
}

/// Decode list entries one by one, keeping every entry that is an object.
fn decode_models(entries: Option<Vec<Value>>) -> Vec<ModelSummary> {
    entries
        .unwrap_or_default()
        .into_iter()
        .filter_map(|entry| match serde_json::from_value(entry) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("Skipping malformed catalog entry: {}", e);
                None
            }
        })
        .collect()
}
