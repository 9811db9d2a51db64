// src/db/enterprise_repo.rs

use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::{common::error::AppError, models::enterprise::Enterprise};

#[derive(Clone)]
pub struct EnterpriseRepository;

impl EnterpriseRepository {
    pub fn new() -> Self {
        Self
    }

    /// Resolve o id que chegou no cabeçalho para uma empresa real.
    pub async fn find_by_id<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<Enterprise>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let enterprise =
            sqlx::query_as::<_, Enterprise>("SELECT * FROM enterprises WHERE id = $1")
                .bind(id)
                .fetch_optional(executor)
                .await?;
        Ok(enterprise)
    }
}
