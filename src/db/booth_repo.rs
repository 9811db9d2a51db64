// src/db/booth_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::types::Json;
use sqlx::{Executor, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::booth::{Booth, BoothChanges, BoothDetail, BoothStatus},
    models::category::{Addon, Dimensions},
};

// SELECT base da visão do admin: o estande inteiro mais os anexos de
// empresa e categoria, apelidados para o FromRow manual de BoothDetail.
const DETAIL_SELECT: &str = r#"
    SELECT b.*,
           e.company_name AS enterprise_company_name,
           e.email AS enterprise_email,
           c.name AS category_name,
           c.description AS category_description
    FROM booths b
    LEFT JOIN enterprises e ON e.id = b.enterprise_id
    LEFT JOIN categories c ON c.id = b.category_id
"#;

fn map_unique_violation(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_unique_violation() {
            let constraint = db_err.constraint().unwrap_or_default();
            if constraint.contains("number") {
                return AppError::BoothNumberTaken;
            }
            // Índice parcial: uma empresa com reserva ativa não pode
            // aparecer numa segunda linha não-rejeitada.
            if constraint.contains("enterprise") {
                return AppError::EnterpriseAlreadyBooked;
            }
        }
    }
    e.into()
}

#[derive(Clone)]
pub struct BoothRepository;

impl BoothRepository {
    pub fn new() -> Self {
        Self
    }

    // ---
    // Leitura
    // ---

    /// Todos os estandes, ordenados pelo número, com empresa e
    /// categoria anexadas.
    pub async fn list_details<'e, E>(&self, executor: E) -> Result<Vec<BoothDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{DETAIL_SELECT} ORDER BY b.number ASC");
        let booths = sqlx::query_as::<_, BoothDetail>(&sql)
            .fetch_all(executor)
            .await?;
        Ok(booths)
    }

    pub async fn find_detail<'e, E>(
        &self,
        executor: E,
        id: Uuid,
    ) -> Result<Option<BoothDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{DETAIL_SELECT} WHERE b.id = $1");
        let booth = sqlx::query_as::<_, BoothDetail>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(booth)
    }

    pub async fn find_by_id<'e, E>(&self, executor: E, id: Uuid) -> Result<Option<Booth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booth = sqlx::query_as::<_, Booth>("SELECT * FROM booths WHERE id = $1")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(booth)
    }

    pub async fn find_by_number<'e, E>(
        &self,
        executor: E,
        number: i32,
    ) -> Result<Option<Booth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booth = sqlx::query_as::<_, Booth>("SELECT * FROM booths WHERE number = $1")
            .bind(number)
            .fetch_optional(executor)
            .await?;
        Ok(booth)
    }

    /// Estandes que uma empresa ainda pode reservar: sem dono, ou
    /// rejeitados (esses voltam para o mercado mesmo com a FK antiga).
    pub async fn list_available<'e, E>(&self, executor: E) -> Result<Vec<Booth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let booths = sqlx::query_as::<_, Booth>(
            r#"
            SELECT * FROM booths
            WHERE enterprise_id IS NULL OR status = $1
            ORDER BY number ASC
            "#,
        )
        .bind(BoothStatus::Rejected)
        .fetch_all(executor)
        .await?;
        Ok(booths)
    }

    /// A reserva ativa (não-rejeitada) de uma empresa, com anexos.
    pub async fn find_detail_by_enterprise<'e, E>(
        &self,
        executor: E,
        enterprise_id: Uuid,
    ) -> Result<Option<BoothDetail>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let sql = format!("{DETAIL_SELECT} WHERE b.enterprise_id = $1 AND b.status <> $2");
        let booth = sqlx::query_as::<_, BoothDetail>(&sql)
            .bind(enterprise_id)
            .bind(BoothStatus::Rejected)
            .fetch_optional(executor)
            .await?;
        Ok(booth)
    }

    pub async fn has_active_reservation<'e, E>(
        &self,
        executor: E,
        enterprise_id: Uuid,
    ) -> Result<bool, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM booths WHERE enterprise_id = $1 AND status <> $2)",
        )
        .bind(enterprise_id)
        .bind(BoothStatus::Rejected)
        .fetch_one(executor)
        .await?;
        Ok(exists)
    }

    // ---
    // Escrita
    // ---

    pub async fn create<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: &str,
        number: i32,
        dimensions: &Dimensions,
        price_without_addons: Decimal,
        final_price: Decimal,
        addons: &[Addon],
        image: Option<&str>,
    ) -> Result<Booth, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booth>(
            r#"
            INSERT INTO booths (name, description, number, dimensions,
                                price_without_addons, final_price, addons, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(number)
        .bind(Json(dimensions))
        .bind(price_without_addons)
        .bind(final_price)
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
        changes: &BoothChanges,
    ) -> Result<Option<Booth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE booths SET updated_at = now()");

        if let Some(name) = &changes.name {
            qb.push(", name = ").push_bind(name.clone());
        }
        if let Some(description) = &changes.description {
            qb.push(", description = ").push_bind(description.clone());
        }
        if let Some(number) = changes.number {
            qb.push(", number = ").push_bind(number);
        }
        if let Some(dimensions) = &changes.dimensions {
            qb.push(", dimensions = ").push_bind(Json(dimensions.clone()));
        }
        if let Some(price) = changes.price_without_addons {
            qb.push(", price_without_addons = ").push_bind(price);
        }
        if let Some(final_price) = changes.final_price {
            qb.push(", final_price = ").push_bind(final_price);
        }
        if let Some(status) = changes.status {
            qb.push(", status = ").push_bind(status);
        }
        if let Some(addons) = &changes.addons {
            qb.push(", addons = ").push_bind(Json(addons.clone()));
        }
        if let Some(image) = &changes.image {
            qb.push(", image = ").push_bind(image.clone());
        }
        if let Some(category_id) = &changes.category_id {
            qb.push(", category_id = ").push_bind(*category_id);
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        qb.build_query_as::<Booth>()
            .fetch_optional(executor)
            .await
            .map_err(map_unique_violation)
    }

    /// Transição de status. Só a chegada em Accepted carimba a data;
    /// as demais deixam reservation_accepted_at como está.
    pub async fn update_status<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        status: BoothStatus,
        accepted_at: Option<DateTime<Utc>>,
    ) -> Result<Option<Booth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booth>(
            r#"
            UPDATE booths
            SET status = $2,
                reservation_accepted_at = COALESCE($3, reservation_accepted_at),
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status)
        .bind(accepted_at)
        .fetch_optional(executor)
        .await
        .map_err(map_unique_violation)
    }

    /// Reatribuição de categoria em lote. Ids inexistentes não contam;
    /// devolvemos quantas linhas realmente mudaram.
    pub async fn bulk_set_category<'e, E>(
        &self,
        executor: E,
        booth_ids: &[Uuid],
        category_id: Option<Uuid>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            "UPDATE booths SET category_id = $2, updated_at = now() WHERE id = ANY($1)",
        )
        .bind(booth_ids)
        .bind(category_id)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    /// Reserva condicional: só vence se o estande estiver livre ou
    /// rejeitado. Zero linhas = alguém chegou antes (ou o id não existe).
    pub async fn try_reserve<'e, E>(
        &self,
        executor: E,
        booth_id: Uuid,
        enterprise_id: Uuid,
    ) -> Result<Option<Booth>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Booth>(
            r#"
            UPDATE booths
            SET enterprise_id = $2, status = $3, updated_at = now()
            WHERE id = $1 AND (enterprise_id IS NULL OR status = $4)
            RETURNING *
            "#,
        )
        .bind(booth_id)
        .bind(enterprise_id)
        .bind(BoothStatus::Pending)
        .bind(BoothStatus::Rejected)
        .fetch_optional(executor)
        .await
        .map_err(map_unique_violation)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM booths WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }
}
