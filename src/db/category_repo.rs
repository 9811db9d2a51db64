// src/db/category_repo.rs

use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::booth::BoothRef,
    models::category::{Addon, Category, CategoryChanges, CategoryWithCount, Dimensions},
};

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            if constraint.contains("name") {
                return AppError::CategoryNameTaken;
            }
        }
    }
    e.into()
}

#[derive(Clone)]
pub struct CategoryRepository;

impl CategoryRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Leitura
    // ---

    /// Todas as categorias, mais recentes primeiro, com a contagem de
    /// estandes que referenciam cada uma.
    pub async fn list_with_counts<'e, E>(
        &self,
        executor: E,
    ) -> Result<Vec<CategoryWithCount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let categories = sqlx::query_as::<_, CategoryWithCount>(
            r#"
            SELECT c.id, c.name, c.description, c.dimensions, c.price_without_addons,
                   c.addons, c.image, c.created_at, c.updated_at,
                   COUNT(b.id) AS booth_count
            FROM categories c
            LEFT JOIN booths b ON b.category_id = c.id
            GROUP BY c.id
            ORDER BY c.created_at DESC
            "#,
        )
        .fetch_all(executor)
        .await?;
        Ok(categories)
    }

    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(category)
    }

    pub async fn find_by_name<'e, E>(
        &self,
        executor: E,
        name: &str,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category =
            sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE name = $1")
                .bind(name)
                .fetch_optional(executor)
                .await?;
        Ok(category)
    }

    /// Quantos estandes apontam para a categoria. Guarda a exclusão.
    pub async fn count_booths<'e, E>(&self, executor: E, id: Uuid) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM booths WHERE category_id = $1",
        )
        .bind(id)
        .fetch_one(executor)
        .await?;
        Ok(count)
    }

    /// Os estandes que referenciam a categoria, para o detalhe do admin.
    pub async fn booth_refs<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Vec<BoothRef>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booths = sqlx::query_as::<_, BoothRef>(
            "SELECT id, name, number, status FROM booths WHERE category_id = $1 ORDER BY number ASC",
        )
        .bind(id)
        .fetch_all(executor)
        .await?;
        Ok(booths)
    }

    // ---
    // Escrita
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        dimensions: &Dimensions,
        price_without_addons: Decimal,
        addons: &[Addon],
        image: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, dimensions, price_without_addons, addons, image)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(Json(dimensions))
        .bind(price_without_addons)
        .bind(Json(addons))
        .bind(image)
        .fetch_one(executor)
        .await
        .map_err(map_unique_violation)
    }

    /// Aplica só os campos presentes no conjunto de mudanças. Devolve
    /// None se a linha sumiu no meio do caminho.
    pub async fn update<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        changes: &CategoryChanges,
    ) -> Result<Option<Category>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE categories SET updated_at = now()");

        if let Some(name) = &changes.name {
            qb.push(", name = ").push_bind(name.clone());
        }
        if let Some(description) = &changes.description {
            qb.push(", description = ").push_bind(description.clone());
        }
        if let Some(dimensions) = &changes.dimensions {
            qb.push(", dimensions = ").push_bind(Json(dimensions.clone()));
        }
        if let Some(price) = changes.price_without_addons {
            qb.push(", price_without_addons = ").push_bind(price);
        }
        if let Some(addons) = &changes.addons {
            qb.push(", addons = ").push_bind(Json(addons.clone()));
        }
        if let Some(image) = &changes.image {
            qb.push(", image = ").push_bind(image.clone());
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Category>()
            .fetch_optional(executor)
            .await
            .map_err(map_unique_violation)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
