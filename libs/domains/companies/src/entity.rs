use sea_orm::ActiveValue::Set;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::models::{Company, CreateCompany};

/// Sea-ORM Entity for the companies table
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub batch: String,
    pub industry: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub website: Option<String>,
    /// JSON array of floats
    #[sea_orm(column_type = "Text", nullable)]
    pub embedding: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Company {
    fn from(model: Model) -> Self {
        // A column that fails to decode is treated as "not yet embedded"
        let embedding = model
            .embedding
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok());

        Self {
            id: model.id,
            name: model.name,
            batch: model.batch,
            industry: model.industry,
            description: model.description,
            website: model.website,
            embedding,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

impl From<CreateCompany> for ActiveModel {
    fn from(input: CreateCompany) -> Self {
        let now = chrono::Utc::now();
        ActiveModel {
            name: Set(input.name),
            batch: Set(input.batch),
            industry: Set(input.industry),
            description: Set(input.description),
            website: Set(input.website),
            embedding: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            ..Default::default()
        }
    }
}
