use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Supported OpenAI embedding models
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EmbeddingModel {
    /// text-embedding-3-small (1536 dimensions)
    #[default]
    TextEmbedding3Small,
    /// text-embedding-3-large (3072 dimensions)
    TextEmbedding3Large,
    /// text-embedding-ada-002 (1536 dimensions, legacy)
    TextEmbeddingAda002,
}

impl EmbeddingModel {
    pub fn dimension(&self) -> u32 {
        match self {
            EmbeddingModel::TextEmbedding3Small => 1536,
            EmbeddingModel::TextEmbedding3Large => 3072,
            EmbeddingModel::TextEmbeddingAda002 => 1536,
        }
    }

    pub fn model_name(&self) -> &'static str {
        match self {
            EmbeddingModel::TextEmbedding3Small => "text-embedding-3-small",
            EmbeddingModel::TextEmbedding3Large => "text-embedding-3-large",
            EmbeddingModel::TextEmbeddingAda002 => "text-embedding-ada-002",
        }
    }
}

impl FromStr for EmbeddingModel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "text-embedding-3-small" => Ok(EmbeddingModel::TextEmbedding3Small),
            "text-embedding-3-large" => Ok(EmbeddingModel::TextEmbedding3Large),
            "text-embedding-ada-002" => Ok(EmbeddingModel::TextEmbeddingAda002),
            other => Err(format!("unsupported embedding model '{}'", other)),
        }
    }
}

impl fmt::Display for EmbeddingModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.model_name())
    }
}

/// Embedding result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResult {
    pub values: Vec<f32>,
    pub dimension: u32,
    pub tokens_used: u32,
}

impl EmbeddingResult {
    pub fn new(values: Vec<f32>) -> Self {
        Self {
            dimension: values.len() as u32,
            values,
            tokens_used: 0,
        }
    }
}

/// Metadata stored next to each company vector.
///
/// Every field is optional: sync writes a subset, bulk import writes all of
/// them. Unset fields are omitted from the stored document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct VectorMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_liner: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    /// Pinecone returns numbers as floats, so whole floats are accepted
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_u32"
    )]
    pub team_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(
        default,
        rename = "isHiring",
        skip_serializing_if = "Option::is_none"
    )]
    pub is_hiring: Option<bool>,
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64))
            .and_then(|n| u32::try_from(n).ok()),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// A vector with its id and metadata, ready for upsert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub values: Vec<f32>,
    pub metadata: VectorMetadata,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, values: Vec<f32>, metadata: VectorMetadata) -> Self {
        Self {
            id: id.into(),
            values,
            metadata,
        }
    }
}

/// Scalar operand of a metadata filter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    String(String),
}

impl FilterValue {
    /// Whether a stored JSON value equals this operand
    fn equals(&self, value: &serde_json::Value) -> bool {
        match (self, value) {
            (FilterValue::Bool(b), serde_json::Value::Bool(v)) => b == v,
            (FilterValue::Number(n), serde_json::Value::Number(v)) => {
                v.as_f64().is_some_and(|v| v == *n)
            }
            (FilterValue::String(s), serde_json::Value::String(v)) => s == v,
            _ => false,
        }
    }
}

impl From<&str> for FilterValue {
    fn from(value: &str) -> Self {
        FilterValue::String(value.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(value: String) -> Self {
        FilterValue::String(value)
    }
}

impl From<bool> for FilterValue {
    fn from(value: bool) -> Self {
        FilterValue::Bool(value)
    }
}

impl From<f64> for FilterValue {
    fn from(value: f64) -> Self {
        FilterValue::Number(value)
    }
}

/// Operators applied to one metadata field, in Pinecone's filter syntax.
///
/// All present operators must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldCondition {
    #[serde(rename = "$eq", default, skip_serializing_if = "Option::is_none")]
    pub eq: Option<FilterValue>,
    #[serde(rename = "$in", default, skip_serializing_if = "Option::is_none")]
    pub any_of: Option<Vec<FilterValue>>,
    #[serde(rename = "$gte", default, skip_serializing_if = "Option::is_none")]
    pub gte: Option<f64>,
    #[serde(rename = "$lte", default, skip_serializing_if = "Option::is_none")]
    pub lte: Option<f64>,
}

impl FieldCondition {
    pub fn eq(value: impl Into<FilterValue>) -> Self {
        Self {
            eq: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn any_of<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<FilterValue>,
    {
        Self {
            any_of: Some(values.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn between(gte: Option<f64>, lte: Option<f64>) -> Self {
        Self {
            gte,
            lte,
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.eq.is_none() && self.any_of.is_none() && self.gte.is_none() && self.lte.is_none()
    }

    /// Evaluate against a stored value. Arrays match when any element does.
    pub fn matches(&self, value: &serde_json::Value) -> bool {
        if let serde_json::Value::Array(items) = value {
            return items.iter().any(|item| self.matches_scalar(item));
        }
        self.matches_scalar(value)
    }

    fn matches_scalar(&self, value: &serde_json::Value) -> bool {
        if let Some(eq) = &self.eq {
            if !eq.equals(value) {
                return false;
            }
        }
        if let Some(candidates) = &self.any_of {
            if !candidates.iter().any(|c| c.equals(value)) {
                return false;
            }
        }
        if self.gte.is_some() || self.lte.is_some() {
            let Some(n) = value.as_f64() else {
                return false;
            };
            if self.gte.is_some_and(|gte| n < gte) || self.lte.is_some_and(|lte| n > lte) {
                return false;
            }
        }
        true
    }
}

/// Metadata filter: field name to condition.
///
/// Serializes to the Pinecone shape `{"industry": {"$eq": "Fintech"}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetadataFilter(BTreeMap<String, FieldCondition>);

impl MetadataFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a condition; empty conditions are ignored.
    pub fn with(mut self, field: impl Into<String>, condition: FieldCondition) -> Self {
        self.insert(field, condition);
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, condition: FieldCondition) {
        if !condition.is_empty() {
            self.0.insert(field.into(), condition);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&FieldCondition> {
        self.0.get(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldCondition)> {
        self.0.iter()
    }

    /// Evaluate against metadata. A field that is absent never matches.
    pub fn matches(&self, metadata: &VectorMetadata) -> bool {
        let Ok(serde_json::Value::Object(doc)) = serde_json::to_value(metadata) else {
            return false;
        };

        self.0.iter().all(|(field, condition)| {
            doc.get(field)
                .is_some_and(|value| condition.matches(value))
        })
    }
}

/// Similarity query against the index
#[derive(Debug, Clone, PartialEq)]
pub struct VectorQuery {
    pub vector: Vec<f32>,
    pub top_k: u32,
    pub include_metadata: bool,
    pub filter: Option<MetadataFilter>,
}

impl VectorQuery {
    pub fn new(vector: Vec<f32>, top_k: u32) -> Self {
        Self {
            vector,
            top_k,
            include_metadata: true,
            filter: None,
        }
    }

    /// Empty filters are dropped
    pub fn with_filter(mut self, filter: Option<MetadataFilter>) -> Self {
        self.filter = filter.filter(|f| !f.is_empty());
        self
    }
}

/// A ranked query result, highest score first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorMatch {
    pub id: String,
    pub score: f32,
    #[serde(default)]
    pub metadata: VectorMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn acme() -> VectorMetadata {
        VectorMetadata {
            name: Some("Acme".into()),
            batch: Some("W21".into()),
            industry: Some("Fintech".into()),
            regions: Some(vec!["United States of America".into(), "Remote".into()]),
            team_size: Some(12),
            is_hiring: Some(true),
            ..Default::default()
        }
    }

    #[test]
    fn test_model_names_and_dimensions() {
        assert_eq!(
            EmbeddingModel::TextEmbedding3Small.model_name(),
            "text-embedding-3-small"
        );
        assert_eq!(EmbeddingModel::TextEmbedding3Large.dimension(), 3072);
        assert_eq!(
            "text-embedding-ada-002".parse::<EmbeddingModel>().unwrap(),
            EmbeddingModel::TextEmbeddingAda002
        );
        assert!("gpt-4o".parse::<EmbeddingModel>().is_err());
    }

    #[test]
    fn test_metadata_omits_unset_fields_and_renames_is_hiring() {
        let json = serde_json::to_value(VectorMetadata {
            name: Some("Acme".into()),
            is_hiring: Some(false),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, json!({"name": "Acme", "isHiring": false}));
    }

    #[test]
    fn test_metadata_accepts_float_team_size() {
        let metadata: VectorMetadata =
            serde_json::from_value(json!({"name": "Acme", "team_size": 25.0})).unwrap();
        assert_eq!(metadata.team_size, Some(25));

        let metadata: VectorMetadata =
            serde_json::from_value(json!({"team_size": null})).unwrap();
        assert_eq!(metadata.team_size, None);
    }

    #[test]
    fn test_filter_serializes_to_pinecone_syntax() {
        let filter = MetadataFilter::new()
            .with("industry", FieldCondition::eq("Fintech"))
            .with("team_size", FieldCondition::between(Some(10.0), None))
            .with("tags", FieldCondition::default());

        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({
                "industry": {"$eq": "Fintech"},
                "team_size": {"$gte": 10.0}
            })
        );
    }

    #[test]
    fn test_filter_deserializes_mixed_operands() {
        let filter: MetadataFilter = serde_json::from_value(json!({
            "isHiring": {"$eq": true},
            "stage": {"$in": ["Seed", "Early"]}
        }))
        .unwrap();

        assert_eq!(
            filter.get("isHiring"),
            Some(&FieldCondition::eq(true))
        );
        assert_eq!(
            filter.get("stage"),
            Some(&FieldCondition::any_of(["Seed", "Early"]))
        );
    }

    #[test]
    fn test_filter_matches_exact_fields() {
        let filter = MetadataFilter::new()
            .with("name", FieldCondition::eq("Acme"))
            .with("batch", FieldCondition::eq("W21"))
            .with("industry", FieldCondition::eq("Fintech"));
        assert!(filter.matches(&acme()));

        let other = MetadataFilter::new().with("batch", FieldCondition::eq("S22"));
        assert!(!other.matches(&acme()));
    }

    #[test]
    fn test_filter_matches_array_membership_and_ranges() {
        let filter = MetadataFilter::new()
            .with("regions", FieldCondition::any_of(["Remote", "Europe"]))
            .with("team_size", FieldCondition::between(Some(10.0), Some(50.0)))
            .with("isHiring", FieldCondition::eq(true));
        assert!(filter.matches(&acme()));

        let too_small = MetadataFilter::new()
            .with("team_size", FieldCondition::between(None, Some(5.0)));
        assert!(!too_small.matches(&acme()));
    }

    #[test]
    fn test_filter_on_missing_field_does_not_match() {
        let filter = MetadataFilter::new().with("stage", FieldCondition::eq("Seed"));
        assert!(!filter.matches(&acme()));
    }

    #[test]
    fn test_query_drops_empty_filter() {
        let query = VectorQuery::new(vec![0.1], 5).with_filter(Some(MetadataFilter::new()));
        assert!(query.filter.is_none());
    }
}
