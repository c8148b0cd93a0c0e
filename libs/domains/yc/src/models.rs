use domain_companies::CreateCompany;
use domain_vector::VectorMetadata;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// One record of the yc-oss `companies/all.json` dataset.
///
/// The dataset is loosely typed, so every field tolerates being absent or
/// null and the arrays tolerate non-array values.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YcCompany {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default)]
    pub one_liner: Option<String>,
    #[serde(default)]
    pub long_description: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub batch: Option<String>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub all_locations: Option<String>,
    #[serde(default, deserialize_with = "string_list")]
    pub regions: Vec<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default, deserialize_with = "whole_number")]
    pub team_size: Option<u32>,
    #[serde(default, deserialize_with = "string_list")]
    pub tags: Vec<String>,
    #[serde(default, rename = "isHiring")]
    pub is_hiring: Option<bool>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

fn whole_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let number = match Value::deserialize(deserializer)? {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        other => other.as_f64(),
    };
    Ok(number
        .filter(|n| n.is_finite() && *n >= 0.0)
        .map(|n| n.min(u32::MAX as f64) as u32))
}

impl YcCompany {
    /// Relational fields; `long_description` becomes `description`
    pub fn to_create_company(&self) -> CreateCompany {
        CreateCompany {
            name: self.name.clone(),
            batch: self.batch.clone().unwrap_or_default(),
            industry: self.industry.clone(),
            description: self.long_description.clone(),
            website: self.website.clone(),
        }
    }

    /// `"{name}. {description}"`, used by sync
    pub fn sync_embedding_text(&self) -> String {
        format!(
            "{}. {}",
            self.name,
            self.long_description.as_deref().unwrap_or_default()
        )
    }

    /// `"{name}. {one_liner}. {long_description}"`, used by bulk import
    pub fn import_embedding_text(&self) -> String {
        format!(
            "{}. {}. {}",
            self.name,
            self.one_liner.as_deref().unwrap_or_default(),
            self.long_description.as_deref().unwrap_or_default()
        )
    }

    /// Full metadata set; missing strings become "", arrays [], numbers 0
    pub fn import_metadata(&self) -> VectorMetadata {
        let text = |v: &Option<String>| Some(v.clone().unwrap_or_default());
        VectorMetadata {
            name: Some(self.name.clone()),
            website: text(&self.website),
            batch: text(&self.batch),
            industry: text(&self.industry),
            one_liner: text(&self.one_liner),
            description: text(&self.long_description),
            location: text(&self.all_locations),
            regions: Some(self.regions.clone()),
            stage: text(&self.stage),
            team_size: Some(self.team_size.unwrap_or(0)),
            tags: Some(self.tags.clone()),
            is_hiring: Some(self.is_hiring.unwrap_or(false)),
        }
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// Result of `GET /yc/sync`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SyncSummary {
    #[schema(example = "Sync completed")]
    pub message: String,
    pub count: usize,
}

/// Result of `GET /companies/import-yc`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub success: bool,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parses_loose_record() {
        let record: YcCompany = serde_json::from_value(json!({
            "id": 271,
            "name": "Acme",
            "one_liner": null,
            "regions": "Europe",
            "tags": ["B2B", 3, "Fintech"],
            "team_size": 12.0,
            "isHiring": true
        }))
        .unwrap();

        assert_eq!(record.id, "271");
        assert!(record.one_liner.is_none());
        assert!(record.regions.is_empty());
        assert_eq!(record.tags, vec!["B2B", "Fintech"]);
        assert_eq!(record.team_size, Some(12));
        assert_eq!(record.is_hiring, Some(true));
    }

    #[test]
    fn test_null_name_does_not_reject_dataset() {
        let records: Vec<YcCompany> = serde_json::from_value(json!([
            {"id": 1, "name": "Acme"},
            {"id": 2, "name": null}
        ]))
        .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "Acme");
        assert_eq!(records[1].name, "");
        assert!(!records[1].has_name());
    }

    #[test]
    fn test_string_id_kept() {
        let record: YcCompany =
            serde_json::from_value(json!({"id": "acme-inc", "name": "Acme"})).unwrap();
        assert_eq!(record.id, "acme-inc");
    }

    #[test]
    fn test_missing_id_is_an_error() {
        assert!(serde_json::from_value::<YcCompany>(json!({"name": "Acme"})).is_err());
    }

    #[test]
    fn test_embedding_texts() {
        let record = YcCompany {
            id: "1".into(),
            name: "Acme".into(),
            one_liner: Some("Payments for robots".into()),
            long_description: Some("Acme builds rails.".into()),
            ..Default::default()
        };
        assert_eq!(record.sync_embedding_text(), "Acme. Acme builds rails.");
        assert_eq!(
            record.import_embedding_text(),
            "Acme. Payments for robots. Acme builds rails."
        );
    }

    #[test]
    fn test_import_metadata_defaults() {
        let record = YcCompany {
            id: "1".into(),
            name: "Acme".into(),
            ..Default::default()
        };
        let metadata = serde_json::to_value(record.import_metadata()).unwrap();
        assert_eq!(
            metadata,
            json!({
                "name": "Acme", "website": "", "batch": "", "industry": "",
                "one_liner": "", "description": "", "location": "",
                "regions": [], "stage": "", "team_size": 0, "tags": [], "isHiring": false
            })
        );
    }

    #[test]
    fn test_to_create_company_maps_long_description() {
        let record = YcCompany {
            id: "1".into(),
            name: "Acme".into(),
            long_description: Some("Long".into()),
            ..Default::default()
        };
        let input = record.to_create_company();
        assert_eq!(input.description.as_deref(), Some("Long"));
        assert_eq!(input.batch, "");
    }
}
