// src/handlers/reservations.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde_json::json;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::enterprise::EnterpriseContext,
    models::booth::{Booth, BoothDetail},
};

// ---
// Handler: list_available_booths
// ---
// Rota pública: a empresa olha a vitrine antes de se identificar.
#[utoipa::path(
    get,
    path = "/enterprise/booths/available",
    tag = "Reservations",
    responses(
        (status = 200, description = "Estandes livres ou rejeitados, por número", body = Vec<Booth>)
    )
)]
pub async fn list_available_booths(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let booths = app_state
        .reservation_service
        .list_available(&app_state.db_pool)
        .await?;

    Ok((StatusCode::OK, Json(booths)))
}

// ---
// Handler: get_my_booth
// ---
#[utoipa::path(
    get,
    path = "/enterprise/booths/my-booth",
    tag = "Reservations",
    params(("x-enterprise-id" = Uuid, Header, description = "ID da empresa")),
    responses(
        (status = 200, description = "A reserva da empresa", body = BoothDetail),
        (status = 401, description = "Identidade ausente ou desconhecida"),
        (status = 404, description = "Empresa sem reserva")
    )
)]
pub async fn get_my_booth(
    State(app_state): State<AppState>,
    enterprise: EnterpriseContext,
) -> Result<impl IntoResponse, AppError> {
    let booth = app_state
        .reservation_service
        .my_booth(&app_state.db_pool, &enterprise.0)
        .await?;

    Ok((StatusCode::OK, Json(booth)))
}

// ---
// Handler: book_booth
// ---
#[utoipa::path(
    post,
    path = "/enterprise/booths/{id}/book",
    tag = "Reservations",
    params(
        ("id" = Uuid, Path, description = "ID do estande"),
        ("x-enterprise-id" = Uuid, Header, description = "ID da empresa")
    ),
    responses(
        (status = 200, description = "Pedido de reserva registrado", body = BoothDetail),
        (status = 400, description = "Empresa já tem reserva ou estande já reservado"),
        (status = 401, description = "Identidade ausente ou desconhecida"),
        (status = 404, description = "Estande não encontrado")
    )
)]
pub async fn book_booth(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    enterprise: EnterpriseContext,
) -> Result<impl IntoResponse, AppError> {
    let booth = app_state
        .reservation_service
        .book(&app_state.db_pool, id, &enterprise.0)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Booth reservation request submitted successfully",
            "booth": booth,
        })),
    ))
}
