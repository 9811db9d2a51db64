// src/common/error.rs

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use crate::models::booth::BoothStatus;

// Nosso tipo de erro central, com `thiserror` para melhor ergonomia.
// Taxonomia: Validação (400), Conflito (400), NotFound (404),
// Unauthorized (401) e Interno (500, logado, mensagem genérica).
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Nome de categoria já existe")]
    CategoryNameTaken,

    #[error("Número de estande já existe")]
    BoothNumberTaken,

    #[error("Categoria não encontrada")]
    CategoryNotFound,

    #[error("Estande não encontrado")]
    BoothNotFound,

    #[error("Categoria em uso por {0} estande(s)")]
    CategoryInUse(i64),

    #[error("Status inválido")]
    InvalidStatus,

    #[error("Transição de status não permitida: {from} -> {to}")]
    TransitionNotAllowed { from: BoothStatus, to: BoothStatus },

    #[error("Identidade da empresa ausente")]
    EnterpriseIdRequired,

    #[error("Empresa desconhecida")]
    UnknownEnterprise,

    #[error("Empresa já possui reserva")]
    EnterpriseAlreadyBooked,

    #[error("Estande já reservado")]
    BoothAlreadyReserved,

    #[error("Empresa não possui reserva")]
    NoReservationFound,

    #[error("Lista de estandes vazia ou inválida")]
    EmptyBoothIds,

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    // O par (status, mensagem) que vai para o cliente. Erros internos
    // nunca vazam detalhe; a mensagem real fica no log.
    fn status_and_message(&self) -> (StatusCode, String) {
        match self {
            AppError::ValidationError(_) => (
                StatusCode::BAD_REQUEST,
                "One or more fields are invalid.".to_string(),
            ),
            AppError::CategoryNameTaken => (
                StatusCode::BAD_REQUEST,
                "Category name already exists".to_string(),
            ),
            AppError::BoothNumberTaken => (
                StatusCode::BAD_REQUEST,
                "Booth number already exists".to_string(),
            ),
            AppError::CategoryNotFound => {
                (StatusCode::NOT_FOUND, "Category not found".to_string())
            }
            AppError::BoothNotFound => (StatusCode::NOT_FOUND, "Booth not found".to_string()),
            AppError::CategoryInUse(count) => (
                StatusCode::BAD_REQUEST,
                format!("Cannot delete category. {count} booth(s) are assigned to this category."),
            ),
            AppError::InvalidStatus => (
                StatusCode::BAD_REQUEST,
                "Invalid status. Must be 'Accepted', 'Rejected', or 'Pending'".to_string(),
            ),
            AppError::TransitionNotAllowed { from, to } => (
                StatusCode::BAD_REQUEST,
                format!("Status transition from '{from}' to '{to}' is not allowed"),
            ),
            AppError::EnterpriseIdRequired => (
                StatusCode::UNAUTHORIZED,
                "Enterprise ID is required".to_string(),
            ),
            AppError::UnknownEnterprise => {
                (StatusCode::UNAUTHORIZED, "Unknown enterprise".to_string())
            }
            AppError::EnterpriseAlreadyBooked => (
                StatusCode::BAD_REQUEST,
                "Enterprise already has a booth reservation".to_string(),
            ),
            AppError::BoothAlreadyReserved => (
                StatusCode::BAD_REQUEST,
                "Booth is already reserved".to_string(),
            ),
            AppError::NoReservationFound => (
                StatusCode::NOT_FOUND,
                "No booth reservation found for this enterprise".to_string(),
            ),
            AppError::EmptyBoothIds => (
                StatusCode::BAD_REQUEST,
                "Invalid or empty boothIds array".to_string(),
            ),

            // Todos os outros (DatabaseError, InternalServerError) viram 500.
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred.".to_string(),
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Validação devolve também o detalhe por campo.
        if let AppError::ValidationError(errors) = &self {
            let mut details = std::collections::HashMap::new();
            for (field, field_errors) in errors.field_errors() {
                let messages: Vec<String> = field_errors
                    .iter()
                    .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                    .collect();
                details.insert(field.to_string(), messages);
            }
            let body = Json(json!({
                "message": "One or more fields are invalid.",
                "details": details,
            }));
            return (StatusCode::BAD_REQUEST, body).into_response();
        }

        if let AppError::DatabaseError(_) | AppError::InternalServerError(_) = &self {
            tracing::error!("Erro interno do servidor: {:?}", self);
        }

        let (status, message) = self.status_and_message();
        let body = Json(json!({ "message": message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_map_to_400() {
        let (status, _) = AppError::CategoryNameTaken.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, message) = AppError::BoothNumberTaken.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Booth number already exists");

        let (status, message) = AppError::BoothAlreadyReserved.status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(message, "Booth is already reserved");
    }

    #[test]
    fn missing_identity_maps_to_401() {
        let (status, message) = AppError::EnterpriseIdRequired.status_and_message();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(message, "Enterprise ID is required");
    }

    #[test]
    fn unknown_ids_map_to_404() {
        let (status, _) = AppError::CategoryNotFound.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = AppError::BoothNotFound.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, message) = AppError::NoReservationFound.status_and_message();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(message, "No booth reservation found for this enterprise");
    }

    #[test]
    fn category_in_use_reports_the_count() {
        let (status, message) = AppError::CategoryInUse(1).status_and_message();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            message,
            "Cannot delete category. 1 booth(s) are assigned to this category."
        );
    }

    #[test]
    fn internal_errors_never_leak_detail() {
        let err = AppError::InternalServerError(anyhow::anyhow!("pool exhausted at 12:03"));
        let (status, message) = err.status_and_message();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, "An unexpected error occurred.");
        assert!(!message.contains("pool"));
    }
}
