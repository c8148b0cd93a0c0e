use async_trait::async_trait;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{CompanyError, CompanyResult},
    models::{Company, CreateCompany, UpdateCompany},
    repository::CompanyRepository,
};

pub struct PgCompanyRepository {
    db: DatabaseConnection,
}

impl PgCompanyRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_model(&self, id: i32) -> CompanyResult<entity::Model> {
        entity::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(CompanyError::NotFound(id))
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    async fn create(&self, input: CreateCompany) -> CompanyResult<Company> {
        let active_model: entity::ActiveModel = input.into();
        let model = active_model.insert(&self.db).await?;

        tracing::info!(company_id = model.id, "Created company");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i32) -> CompanyResult<Option<Company>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, name: &str) -> CompanyResult<Option<Company>> {
        let model = entity::Entity::find()
            .filter(entity::Column::Name.eq(name))
            .order_by_asc(entity::Column::Id)
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn list(&self) -> CompanyResult<Vec<Company>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i32, input: UpdateCompany) -> CompanyResult<Company> {
        let mut active_model = self.find_model(id).await?.into_active_model();

        if let Some(batch) = input.batch {
            active_model.batch = Set(batch);
        }
        if let Some(industry) = input.industry {
            active_model.industry = Set(Some(industry));
        }
        if let Some(description) = input.description {
            active_model.description = Set(Some(description));
        }
        if let Some(website) = input.website {
            active_model.website = Set(Some(website));
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let model = active_model.update(&self.db).await?;

        tracing::info!(company_id = id, "Updated company");
        Ok(model.into())
    }

    async fn set_embedding(&self, id: i32, embedding: Vec<f32>) -> CompanyResult<Company> {
        let mut active_model = self.find_model(id).await?.into_active_model();
        active_model.embedding = Set(Some(serde_json::to_string(&embedding)?));
        active_model.updated_at = Set(chrono::Utc::now().into());

        let model = active_model.update(&self.db).await?;
        Ok(model.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn model(id: i32, name: &str) -> entity::Model {
        let now = chrono::Utc::now().fixed_offset();
        entity::Model {
            id,
            name: name.to_string(),
            batch: "W21".to_string(),
            industry: Some("Fintech".to_string()),
            description: None,
            website: None,
            embedding: Some("[0.5,0.25]".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_find_by_name_decodes_embedding() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Acme")]])
            .into_connection();
        let repo = PgCompanyRepository::new(db);

        let company = repo.find_by_name("Acme").await.unwrap().unwrap();
        assert_eq!(company.id, 1);
        assert_eq!(company.embedding, Some(vec![0.5, 0.25]));
    }

    #[tokio::test]
    async fn test_update_missing_company_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<entity::Model>::new()])
            .into_connection();
        let repo = PgCompanyRepository::new(db);

        let result = repo.update(7, UpdateCompany::default()).await;
        assert!(matches!(result, Err(CompanyError::NotFound(7))));
    }

    #[tokio::test]
    async fn test_list_maps_rows() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![model(1, "Acme"), model(2, "Beta")]])
            .into_connection();
        let repo = PgCompanyRepository::new(db);

        let companies = repo.list().await.unwrap();
        let names: Vec<_> = companies.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Acme", "Beta"]);
    }
}
