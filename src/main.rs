// src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, patch, post},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::enterprise::enterprise_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não
    // deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas do admin: catálogo de categorias
    let category_routes = Router::new()
        .route(
            "/",
            get(handlers::categories::list_categories).post(handlers::categories::create_category),
        )
        .route(
            "/{id}",
            get(handlers::categories::get_category)
                .patch(handlers::categories::update_category)
                .delete(handlers::categories::delete_category),
        );

    // Rotas do admin: estandes
    // O segmento estático "bulk-update" tem prioridade sobre "/{id}".
    let booth_routes = Router::new()
        .route(
            "/",
            get(handlers::booths::list_booths).post(handlers::booths::create_booth),
        )
        .route("/bulk-update", patch(handlers::booths::bulk_update_booths))
        .route(
            "/{id}",
            get(handlers::booths::get_booth)
                .patch(handlers::booths::update_booth)
                .delete(handlers::booths::delete_booth),
        )
        .route("/{id}/status", patch(handlers::booths::update_booth_status));

    // Rotas da empresa: a vitrine é pública, o resto exige identidade
    let enterprise_public_routes = Router::new().route(
        "/available",
        get(handlers::reservations::list_available_booths),
    );

    let enterprise_protected_routes = Router::new()
        .route("/my-booth", get(handlers::reservations::get_my_booth))
        .route("/{id}/book", post(handlers::reservations::book_booth))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            enterprise_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/admin/categories", category_routes)
        .nest("/admin/booths", booth_routes)
        .nest(
            "/enterprise/booths",
            enterprise_public_routes.merge(enterprise_protected_routes),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
