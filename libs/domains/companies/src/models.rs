use chrono::{DateTime, Utc};
use domain_vector::VectorMetadata;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// A YC company row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Acme")]
    pub name: String,
    /// YC batch label, empty when unknown
    #[schema(example = "W21")]
    pub batch: String,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
    /// Last computed embedding; not part of API responses
    #[serde(skip_serializing, default)]
    #[schema(ignore)]
    pub embedding: Option<Vec<f32>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Company {
    pub fn new(id: i32, input: CreateCompany) -> Self {
        let now = Utc::now();
        Self {
            id,
            name: input.name,
            batch: input.batch,
            industry: input.industry,
            description: input.description,
            website: input.website,
            embedding: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a merge; `None` fields keep their current value
    pub fn apply_update(&mut self, update: UpdateCompany) {
        if let Some(batch) = update.batch {
            self.batch = batch;
        }
        if let Some(industry) = update.industry {
            self.industry = Some(industry);
        }
        if let Some(description) = update.description {
            self.description = Some(description);
        }
        if let Some(website) = update.website {
            self.website = Some(website);
        }
        self.updated_at = Utc::now();
    }

    /// Metadata stored with this company's vector
    pub fn vector_metadata(&self) -> VectorMetadata {
        VectorMetadata {
            name: Some(self.name.clone()),
            batch: Some(self.batch.clone()),
            industry: self.industry.clone(),
            description: self.description.clone(),
            website: self.website.clone(),
            ..Default::default()
        }
    }

    /// Space-joined name, industry, batch and description, skipping blanks
    pub fn embedding_text(&self) -> String {
        [
            Some(self.name.as_str()),
            self.industry.as_deref(),
            Some(self.batch.as_str()),
            self.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }
}

/// Input for creating a company
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, ToSchema, Validate)]
pub struct CreateCompany {
    #[validate(length(min = 1, max = 255, message = "Company name is required"))]
    #[schema(example = "Acme")]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 32))]
    #[schema(example = "W21")]
    pub batch: String,
    #[schema(example = "Fintech")]
    pub industry: Option<String>,
    pub description: Option<String>,
    #[schema(example = "https://acme.com")]
    pub website: Option<String>,
}

/// Fields merged into an existing company; `None` keeps the stored value
#[derive(Debug, Clone, PartialEq, Default)]
pub struct UpdateCompany {
    pub batch: Option<String>,
    pub industry: Option<String>,
    pub description: Option<String>,
    pub website: Option<String>,
}

impl From<CreateCompany> for UpdateCompany {
    fn from(input: CreateCompany) -> Self {
        Self {
            batch: Some(input.batch),
            industry: input.industry,
            description: input.description,
            website: input.website,
        }
    }
}

/// `{ "success": true, "data": [...] }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyListResponse {
    pub success: bool,
    pub data: Vec<Company>,
}

/// `{ "success": true, "data": {...} }`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CompanyResponse {
    pub success: bool,
    pub data: Company,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn acme() -> Company {
        Company::new(
            1,
            CreateCompany {
                name: "Acme".into(),
                batch: "W21".into(),
                industry: Some("Fintech".into()),
                description: Some("Payments for robots".into()),
                website: None,
            },
        )
    }

    #[test]
    fn test_apply_update_keeps_missing_fields() {
        let mut company = acme();
        company.apply_update(UpdateCompany {
            website: Some("https://acme.com".into()),
            ..Default::default()
        });

        assert_eq!(company.batch, "W21");
        assert_eq!(company.industry.as_deref(), Some("Fintech"));
        assert_eq!(company.website.as_deref(), Some("https://acme.com"));
    }

    #[test]
    fn test_embedding_text_skips_blank_fields() {
        let mut company = acme();
        assert_eq!(company.embedding_text(), "Acme Fintech W21 Payments for robots");

        company.batch = String::new();
        company.industry = None;
        assert_eq!(company.embedding_text(), "Acme Payments for robots");
    }

    #[test]
    fn test_vector_metadata_subset() {
        let metadata = acme().vector_metadata();
        assert_eq!(metadata.name.as_deref(), Some("Acme"));
        assert_eq!(metadata.batch.as_deref(), Some("W21"));
        assert!(metadata.tags.is_none());
        assert!(metadata.is_hiring.is_none());
    }

    #[test]
    fn test_embedding_is_not_serialized() {
        let mut company = acme();
        company.embedding = Some(vec![0.1, 0.2]);
        let json = serde_json::to_value(&company).unwrap();
        assert!(json.get("embedding").is_none());
        assert_eq!(json["name"], "Acme");
    }

    #[test]
    fn test_create_company_validation() {
        let input = CreateCompany {
            name: String::new(),
            ..Default::default()
        };
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("Company name is required"));
    }

    #[test]
    fn test_create_company_batch_defaults_to_empty() {
        let input: CreateCompany = serde_json::from_str(r#"{"name": "Acme"}"#).unwrap();
        assert_eq!(input.batch, "");
        assert!(input.industry.is_none());
    }
}
