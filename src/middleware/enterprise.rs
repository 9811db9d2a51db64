// src/middleware/enterprise.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::enterprise::Enterprise};

// Cabeçalho de identidade da empresa. É um substituto declarado de uma
// sessão de verdade: o guard pelo menos confere que a empresa existe
// antes de deixar a requisição passar.
pub const ENTERPRISE_ID_HEADER: &str = "x-enterprise-id";

// O middleware em si
pub async fn enterprise_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(ENTERPRISE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or(AppError::EnterpriseIdRequired)?;

    let enterprise_id =
        Uuid::parse_str(header_value).map_err(|_| AppError::EnterpriseIdRequired)?;

    let enterprise = app_state
        .enterprise_repo
        .find_by_id(&app_state.db_pool, enterprise_id)
        .await?
        .ok_or(AppError::UnknownEnterprise)?;

    // Insere a empresa nos "extensions" da requisição
    request.extensions_mut().insert(enterprise);
    Ok(next.run(request).await)
}

// Extrator para obter a empresa autenticada diretamente nos handlers
pub struct EnterpriseContext(pub Enterprise);

impl<S> FromRequestParts<S> for EnterpriseContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Enterprise>()
            .cloned()
            .map(EnterpriseContext)
            .ok_or(AppError::EnterpriseIdRequired)
    }
}
