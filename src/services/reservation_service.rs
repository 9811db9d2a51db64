// src/services/reservation_service.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BoothRepository,
    models::booth::{Booth, BoothDetail},
    models::enterprise::Enterprise,
};

#[derive(Clone)]
pub struct ReservationService {
    booth_repo: BoothRepository,
}

impl ReservationService {
    pub fn new(booth_repo: BoothRepository) -> Self {
        Self { booth_repo }
    }

    /// Estandes abertos para reserva: livres ou rejeitados.
    pub async fn list_available(&self, pool: &PgPool) -> Result<Vec<Booth>, AppError> {
        self.booth_repo.list_available(pool).await
    }

    /// A reserva da empresa. Um estande rejeitado não conta mais como
    /// reserva dela: voltou para o mercado.
    pub async fn my_booth(
        &self,
        pool: &PgPool,
        enterprise: &Enterprise,
    ) -> Result<BoothDetail, AppError> {
        self.booth_repo
            .find_detail_by_enterprise(pool, enterprise.id)
            .await?
            .ok_or(AppError::NoReservationFound)
    }

    /// Reserva um estande para a empresa. O UPDATE condicional decide a
    /// disputa em uma instrução só; o índice parcial no banco cobre a
    /// janela entre a checagem e a escrita.
    pub async fn book(
        &self,
        pool: &PgPool,
        booth_id: Uuid,
        enterprise: &Enterprise,
    ) -> Result<BoothDetail, AppError> {
        if self
            .booth_repo
            .has_active_reservation(pool, enterprise.id)
            .await?
        {
            return Err(AppError::EnterpriseAlreadyBooked);
        }

        let reserved = self
            .booth_repo
            .try_reserve(pool, booth_id, enterprise.id)
            .await?;

        if reserved.is_none() {
            // Zero linhas: ou o estande não existe, ou alguém levou.
            return match self.booth_repo.find_by_id(pool, booth_id).await? {
                None => Err(AppError::BoothNotFound),
                Some(_) => Err(AppError::BoothAlreadyReserved),
            };
        }

        self.booth_repo
            .find_detail(pool, booth_id)
            .await?
            .ok_or(AppError::BoothNotFound)
    }
}
