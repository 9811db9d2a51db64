// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{BoothRepository, CategoryRepository, EnterpriseRepository},
    services::{BoothService, CategoryService, ReservationService, TransitionPolicy},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub category_service: CategoryService,
    pub booth_service: BoothService,
    pub reservation_service: ReservationService,
    // O guard de identidade consulta o repositório direto.
    pub enterprise_repo: EnterpriseRepository,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // Regra de transição de status vem do ambiente; o padrão é o
        // modo permissivo.
        let transition_policy =
            TransitionPolicy::from_env_value(env::var("STATUS_TRANSITION_POLICY").ok().as_deref());
        tracing::info!("Política de transição de status: {:?}", transition_policy);

        // --- Monta o gráfico de dependências ---
        let category_repo = CategoryRepository::new();
        let booth_repo = BoothRepository::new();
        let enterprise_repo = EnterpriseRepository::new();

        let category_service = CategoryService::new(category_repo.clone());
        let booth_service =
            BoothService::new(booth_repo.clone(), category_repo, transition_policy);
        let reservation_service = ReservationService::new(booth_repo);

        Ok(Self {
            db_pool,
            category_service,
            booth_service,
            reservation_service,
            enterprise_repo,
        })
    }
}
