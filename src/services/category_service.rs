// src/services/category_service.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::CategoryRepository,
    models::category::{
        Addon, Category, CategoryChanges, CategoryDetail, CategoryWithCount, Dimensions,
    },
};

#[derive(Clone)]
pub struct CategoryService {
    category_repo: CategoryRepository,
}

impl CategoryService {
    pub fn new(category_repo: CategoryRepository) -> Self {
        Self { category_repo }
    }

    pub async fn list(&self, pool: &PgPool) -> Result<Vec<CategoryWithCount>, AppError> {
        self.category_repo.list_with_counts(pool).await
    }

    /// Detalhe com os estandes que usam a categoria.
    pub async fn get(&self, pool: &PgPool, id: Uuid) -> Result<CategoryDetail, AppError> {
        let category = self
            .category_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::CategoryNotFound)?;

        let booths = self.category_repo.booth_refs(pool, id).await?;

        Ok(CategoryDetail { category, booths })
    }

    pub async fn create(
        &self,
        pool: &PgPool,
        name: &str,
        description: &str,
        dimensions: &Dimensions,
        price_without_addons: Decimal,
        addons: &[Addon],
        image: Option<&str>,
    ) -> Result<Category, AppError> {
        // Checagem amigável; a constraint UNIQUE segura a corrida.
        if self.category_repo.find_by_name(pool, name).await?.is_some() {
            return Err(AppError::CategoryNameTaken);
        }

        self.category_repo
            .create(pool, name, description, dimensions, price_without_addons, addons, image)
            .await
    }

    /// PATCH parcial. A unicidade do nome só é reavaliada quando o nome
    /// realmente muda.
    pub async fn update(
        &self,
        pool: &PgPool,
        id: Uuid,
        changes: CategoryChanges,
    ) -> Result<CategoryWithCount, AppError> {
        let current = self
            .category_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::CategoryNotFound)?;

        if let Some(name) = &changes.name {
            if *name != current.name
                && self.category_repo.find_by_name(pool, name).await?.is_some()
            {
                return Err(AppError::CategoryNameTaken);
            }
        }

        let updated = if changes.is_empty() {
            current
        } else {
            self.category_repo
                .update(pool, id, &changes)
                .await?
                .ok_or(AppError::CategoryNotFound)?
        };

        let booth_count = self.category_repo.count_booths(pool, id).await?;
        Ok(CategoryWithCount::from_category(updated, booth_count))
    }

    /// Exclusão guardada pelo uso: categoria referenciada não sai.
    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        self.category_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::CategoryNotFound)?;

        let booth_count = self.category_repo.count_booths(pool, id).await?;
        if booth_count > 0 {
            return Err(AppError::CategoryInUse(booth_count));
        }

        self.category_repo.delete(pool, id).await?;
        Ok(())
    }
}
