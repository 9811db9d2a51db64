// src/services/booth_service.rs

use chrono::Utc;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BoothRepository, CategoryRepository},
    models::booth::{Booth, BoothChanges, BoothDetail, BoothStatus},
    models::category::{Addon, Dimensions},
};

// ---
// Regras de transição de status
// ---
// A legalidade é uma tabela explícita, não um if escondido no handler.
// `Permissive` reproduz o comportamento histórico (qualquer transição
// vale); `Strict` limita ao ciclo aceitar/rejeitar + refila de
// rejeitado, sempre aceitando transições para o próprio estado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    #[default]
    Permissive,
    Strict,
}

impl TransitionPolicy {
    /// Lê STATUS_TRANSITION_POLICY; qualquer coisa fora de "strict"
    /// cai no modo permissivo.
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.eq_ignore_ascii_case("strict") => Self::Strict,
            _ => Self::Permissive,
        }
    }

    pub fn allows(&self, from: BoothStatus, to: BoothStatus) -> bool {
        match self {
            Self::Permissive => true,
            Self::Strict => {
                from == to
                    || matches!(
                        (from, to),
                        (BoothStatus::Pending, BoothStatus::Accepted)
                            | (BoothStatus::Pending, BoothStatus::Rejected)
                            | (BoothStatus::Accepted, BoothStatus::Rejected)
                            | (BoothStatus::Rejected, BoothStatus::Pending)
                    )
            }
        }
    }
}

#[derive(Clone)]
pub struct BoothService {
    booth_repo: BoothRepository,
    category_repo: CategoryRepository,
    transition_policy: TransitionPolicy,
}

impl BoothService {
    pub fn new(
        booth_repo: BoothRepository,
        category_repo: CategoryRepository,
        transition_policy: TransitionPolicy,
    ) -> Self {
        Self {
            booth_repo,
            category_repo,
            transition_policy,
        }
    }

    pub async fn list(&self, pool: &PgPool) -> Result<Vec<BoothDetail>, AppError> {
        self.booth_repo.list_details(pool).await
    }

    pub async fn get(&self, pool: &PgPool, id: Uuid) -> Result<BoothDetail, AppError> {
        self.booth_repo
            .find_detail(pool, id)
            .await?
            .ok_or(AppError::BoothNotFound)
    }

    pub async fn create(
        &self,
        pool: &PgPool,
        name: &str,
        description: &str,
        number: i32,
        dimensions: &Dimensions,
        price_without_addons: Decimal,
        final_price: Decimal,
        addons: &[Addon],
        image: Option<&str>,
    ) -> Result<Booth, AppError> {
        // Checagem amigável; a constraint UNIQUE segura a corrida.
        if self
            .booth_repo
            .find_by_number(pool, number)
            .await?
            .is_some()
        {
            return Err(AppError::BoothNumberTaken);
        }

        self.booth_repo
            .create(
                pool,
                name,
                description,
                number,
                dimensions,
                price_without_addons,
                final_price,
                addons,
                image,
            )
            .await
    }

    /// PATCH parcial do admin. A unicidade do número só é reavaliada
    /// quando o número realmente muda.
    pub async fn update(
        &self,
        pool: &PgPool,
        id: Uuid,
        changes: BoothChanges,
    ) -> Result<BoothDetail, AppError> {
        let current = self
            .booth_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::BoothNotFound)?;

        if let Some(number) = changes.number {
            if number != current.number
                && self
                    .booth_repo
                    .find_by_number(pool, number)
                    .await?
                    .is_some()
            {
                return Err(AppError::BoothNumberTaken);
            }
        }

        if !changes.is_empty() {
            self.booth_repo
                .update(pool, id, &changes)
                .await?
                .ok_or(AppError::BoothNotFound)?;
        }

        self.booth_repo
            .find_detail(pool, id)
            .await?
            .ok_or(AppError::BoothNotFound)
    }

    pub async fn delete(&self, pool: &PgPool, id: Uuid) -> Result<(), AppError> {
        self.booth_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::BoothNotFound)?;

        self.booth_repo.delete(pool, id).await?;
        Ok(())
    }

    /// Reatribui (ou limpa) a categoria de vários estandes de uma vez.
    /// Ids que não existem não são erro; o retorno é quantas linhas
    /// realmente mudaram.
    pub async fn bulk_set_category(
        &self,
        pool: &PgPool,
        booth_ids: &[Uuid],
        category_id: Option<Uuid>,
    ) -> Result<u64, AppError> {
        if booth_ids.is_empty() {
            return Err(AppError::EmptyBoothIds);
        }

        if let Some(category_id) = category_id {
            self.category_repo
                .find_by_id(pool, category_id)
                .await?
                .ok_or(AppError::CategoryNotFound)?;
        }

        self.booth_repo
            .bulk_set_category(pool, booth_ids, category_id)
            .await
    }

    /// Transição de status do fluxo de reserva. Chegar em Accepted
    /// carimba reservation_accepted_at; nenhuma transição limpa o
    /// carimbo depois.
    pub async fn transition_status(
        &self,
        pool: &PgPool,
        id: Uuid,
        target: BoothStatus,
    ) -> Result<BoothDetail, AppError> {
        let current = self
            .booth_repo
            .find_by_id(pool, id)
            .await?
            .ok_or(AppError::BoothNotFound)?;

        if !self.transition_policy.allows(current.status, target) {
            return Err(AppError::TransitionNotAllowed {
                from: current.status,
                to: target,
            });
        }

        let accepted_at = (target == BoothStatus::Accepted).then(Utc::now);

        self.booth_repo
            .update_status(pool, id, target, accepted_at)
            .await?
            .ok_or(AppError::BoothNotFound)?;

        self.booth_repo
            .find_detail(pool, id)
            .await?
            .ok_or(AppError::BoothNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permissive_policy_allows_everything() {
        let policy = TransitionPolicy::Permissive;
        let all = [
            BoothStatus::Pending,
            BoothStatus::Accepted,
            BoothStatus::Rejected,
        ];
        for from in all {
            for to in all {
                assert!(policy.allows(from, to), "{from} -> {to} should be legal");
            }
        }
    }

    #[test]
    fn strict_policy_limits_to_the_reservation_lifecycle() {
        let policy = TransitionPolicy::Strict;

        assert!(policy.allows(BoothStatus::Pending, BoothStatus::Accepted));
        assert!(policy.allows(BoothStatus::Pending, BoothStatus::Rejected));
        assert!(policy.allows(BoothStatus::Accepted, BoothStatus::Rejected));
        assert!(policy.allows(BoothStatus::Rejected, BoothStatus::Pending));
        assert!(policy.allows(BoothStatus::Accepted, BoothStatus::Accepted));

        assert!(!policy.allows(BoothStatus::Accepted, BoothStatus::Pending));
        assert!(!policy.allows(BoothStatus::Rejected, BoothStatus::Accepted));
    }

    #[test]
    fn policy_comes_from_the_environment_value() {
        assert_eq!(
            TransitionPolicy::from_env_value(Some("strict")),
            TransitionPolicy::Strict
        );
        assert_eq!(
            TransitionPolicy::from_env_value(Some("STRICT")),
            TransitionPolicy::Strict
        );
        assert_eq!(
            TransitionPolicy::from_env_value(Some("permissive")),
            TransitionPolicy::Permissive
        );
        assert_eq!(
            TransitionPolicy::from_env_value(None),
            TransitionPolicy::Permissive
        );
    }
}
