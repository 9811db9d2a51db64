// src/handlers/booths.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{de::double_option, error::AppError},
    config::AppState,
    models::booth::{Booth, BoothChanges, BoothDetail, BoothStatus},
    models::category::{Addon, Dimensions, validate_not_negative},
};

// ---
// Payload: CreateBoothPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoothPayload {
    #[validate(
        required(message = "The 'name' field is required."),
        length(min = 1, message = "The 'name' field is required.")
    )]
    pub name: Option<String>,

    #[validate(
        required(message = "The 'description' field is required."),
        length(min = 1, message = "The 'description' field is required.")
    )]
    pub description: Option<String>,

    #[validate(required(message = "The 'number' field is required."))]
    pub number: Option<i32>,

    #[validate(required(message = "The 'dimensions' field is required."), nested)]
    pub dimensions: Option<Dimensions>,

    #[validate(
        required(message = "The 'priceWithoutAddons' field is required."),
        custom(function = "validate_not_negative")
    )]
    pub price_without_addons: Option<Decimal>,

    #[validate(
        required(message = "The 'finalPrice' field is required."),
        custom(function = "validate_not_negative")
    )]
    pub final_price: Option<Decimal>,

    #[validate(nested)]
    pub addons: Option<Vec<Addon>>,

    pub image: Option<String>,
}

// ---
// Handler: list_booths (visão do admin)
// ---
#[utoipa::path(
    get,
    path = "/admin/booths",
    tag = "Booths",
    responses(
        (status = 200, description = "Todos os estandes com empresa e categoria anexadas", body = Vec<BoothDetail>)
    )
)]
pub async fn list_booths(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let booths = app_state.booth_service.list(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(booths)))
}

// ---
// Handler: create_booth
// ---
#[utoipa::path(
    post,
    path = "/admin/booths",
    tag = "Booths",
    request_body = CreateBoothPayload,
    responses(
        (status = 201, description = "Estande criado", body = Booth),
        (status = 400, description = "Campos faltando ou número já em uso")
    )
)]
pub async fn create_booth(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBoothPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booth = app_state
        .booth_service
        .create(
            &app_state.db_pool,
            payload.name.as_deref().unwrap(),
            payload.description.as_deref().unwrap(),
            payload.number.unwrap(),
            payload.dimensions.as_ref().unwrap(),
            payload.price_without_addons.unwrap(),
            payload.final_price.unwrap(),
            payload.addons.as_deref().unwrap_or_default(),
            payload.image.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booth created successfully",
            "booth": booth,
        })),
    ))
}

// ---
// Handler: get_booth
// ---
#[utoipa::path(
    get,
    path = "/admin/booths/{id}",
    tag = "Booths",
    params(("id" = Uuid, Path, description = "ID do estande")),
    responses(
        (status = 200, description = "Detalhe do estande", body = BoothDetail),
        (status = 404, description = "Estande não encontrado")
    )
)]
pub async fn get_booth(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let booth = app_state.booth_service.get(&app_state.db_pool, id).await?;

    Ok((StatusCode::OK, Json(booth)))
}

// ---
// Payload: UpdateBoothPayload
// ---
// PATCH parcial do admin. `image` e `categoryId` têm três estados
// (ausente / null limpa / valor define); número e preços valem mesmo
// sendo 0. Status trocado por aqui não mexe no carimbo de aceite.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoothPayload {
    pub name: Option<String>,

    pub description: Option<String>,

    pub number: Option<i32>,

    #[validate(nested)]
    pub dimensions: Option<Dimensions>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price_without_addons: Option<Decimal>,

    #[validate(custom(function = "validate_not_negative"))]
    pub final_price: Option<Decimal>,

    pub status: Option<BoothStatus>,

    #[validate(nested)]
    pub addons: Option<Vec<Addon>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Uuid>)]
    pub category_id: Option<Option<Uuid>>,
}

impl UpdateBoothPayload {
    fn into_changes(self) -> BoothChanges {
        BoothChanges {
            name: self.name.filter(|s| !s.is_empty()),
            description: self.description.filter(|s| !s.is_empty()),
            number: self.number,
            dimensions: self.dimensions,
            price_without_addons: self.price_without_addons,
            final_price: self.final_price,
            status: self.status,
            addons: self.addons,
            image: self.image,
            category_id: self.category_id,
        }
    }
}

// ---
// Handler: update_booth
// ---
#[utoipa::path(
    patch,
    path = "/admin/booths/{id}",
    tag = "Booths",
    params(("id" = Uuid, Path, description = "ID do estande")),
    request_body = UpdateBoothPayload,
    responses(
        (status = 200, description = "Estande atualizado", body = BoothDetail),
        (status = 400, description = "Número já em uso"),
        (status = 404, description = "Estande não encontrado")
    )
)]
pub async fn update_booth(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBoothPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let booth = app_state
        .booth_service
        .update(&app_state.db_pool, id, payload.into_changes())
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Booth updated successfully",
            "booth": booth,
        })),
    ))
}

// ---
// Handler: delete_booth
// ---
#[utoipa::path(
    delete,
    path = "/admin/booths/{id}",
    tag = "Booths",
    params(("id" = Uuid, Path, description = "ID do estande")),
    responses(
        (status = 200, description = "Estande excluído"),
        (status = 404, description = "Estande não encontrado")
    )
)]
pub async fn delete_booth(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .booth_service
        .delete(&app_state.db_pool, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Booth deleted successfully" })),
    ))
}

// ---
// Payload: UpdateBoothStatusPayload
// ---
// O status chega como texto cru para a gente responder 400 com a
// mensagem certa em vez de um 422 do serde.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBoothStatusPayload {
    #[schema(example = "Accepted")]
    pub status: String,
}

// ---
// Handler: update_booth_status
// ---
#[utoipa::path(
    patch,
    path = "/admin/booths/{id}/status",
    tag = "Booths",
    params(("id" = Uuid, Path, description = "ID do estande")),
    request_body = UpdateBoothStatusPayload,
    responses(
        (status = 200, description = "Status atualizado", body = BoothDetail),
        (status = 400, description = "Status inválido ou transição não permitida"),
        (status = 404, description = "Estande não encontrado")
    )
)]
pub async fn update_booth_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBoothStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let target = BoothStatus::parse(&payload.status).ok_or(AppError::InvalidStatus)?;

    let booth = app_state
        .booth_service
        .transition_status(&app_state.db_pool, id, target)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": format!("Booth {} successfully", target.to_string().to_lowercase()),
            "booth": booth,
        })),
    ))
}

// ---
// Payload: BulkUpdateBoothsPayload
// ---
// `boothIds` chega como JSON cru: lista ausente, vazia, de outro tipo
// ou com ids que não são UUID responde o mesmo 400, como o contrato
// pede. `categoryId` null (ou ausente) limpa a categoria dos estandes.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkUpdateBoothsPayload {
    #[serde(default)]
    #[schema(value_type = Option<Vec<Uuid>>)]
    pub booth_ids: Option<serde_json::Value>,

    #[serde(default)]
    pub category_id: Option<Uuid>,
}

impl BulkUpdateBoothsPayload {
    fn parsed_booth_ids(&self) -> Result<Vec<Uuid>, AppError> {
        let Some(serde_json::Value::Array(values)) = &self.booth_ids else {
            return Err(AppError::EmptyBoothIds);
        };
        if values.is_empty() {
            return Err(AppError::EmptyBoothIds);
        }
        values
            .iter()
            .map(|value| {
                value
                    .as_str()
                    .and_then(|s| Uuid::parse_str(s).ok())
                    .ok_or(AppError::EmptyBoothIds)
            })
            .collect()
    }
}

fn bulk_update_message(count: u64) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Successfully updated {count} booth{plural}")
}

// ---
// Handler: bulk_update_booths
// ---
#[utoipa::path(
    patch,
    path = "/admin/booths/bulk-update",
    tag = "Booths",
    request_body = BulkUpdateBoothsPayload,
    responses(
        (status = 200, description = "Quantidade de estandes alterados"),
        (status = 400, description = "Lista de ids vazia ou inválida"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn bulk_update_booths(
    State(app_state): State<AppState>,
    Json(payload): Json<BulkUpdateBoothsPayload>,
) -> Result<impl IntoResponse, AppError> {
    let booth_ids = payload.parsed_booth_ids()?;

    let count = app_state
        .booth_service
        .bulk_set_category(&app_state.db_pool, &booth_ids, payload.category_id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": bulk_update_message(count),
            "count": count,
        })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_fail_validation() {
        let payload: CreateBoothPayload = serde_json::from_str(r#"{}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 6);
    }

    #[test]
    fn number_zero_is_a_real_value() {
        let payload: UpdateBoothPayload = serde_json::from_str(r#"{"number": 0}"#).unwrap();
        let changes = payload.into_changes();
        assert_eq!(changes.number, Some(0));
    }

    #[test]
    fn category_patch_distinguishes_clear_from_absent() {
        let absent: UpdateBoothPayload = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.into_changes().category_id, None);

        let cleared: UpdateBoothPayload =
            serde_json::from_str(r#"{"categoryId": null}"#).unwrap();
        assert_eq!(cleared.into_changes().category_id, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateBoothPayload =
            serde_json::from_str(&format!(r#"{{"categoryId": "{id}"}}"#)).unwrap();
        assert_eq!(set.into_changes().category_id, Some(Some(id)));
    }

    #[test]
    fn patch_with_only_status_changes_nothing_else() {
        let payload: UpdateBoothPayload =
            serde_json::from_str(r#"{"status": "Accepted"}"#).unwrap();
        let changes = payload.into_changes();
        assert_eq!(changes.status, Some(BoothStatus::Accepted));
        assert!(
            changes.name.is_none()
                && changes.description.is_none()
                && changes.number.is_none()
                && changes.dimensions.is_none()
                && changes.price_without_addons.is_none()
                && changes.final_price.is_none()
                && changes.addons.is_none()
                && changes.image.is_none()
                && changes.category_id.is_none()
        );
    }

    #[test]
    fn bulk_message_pluralizes() {
        assert_eq!(bulk_update_message(1), "Successfully updated 1 booth");
        assert_eq!(bulk_update_message(0), "Successfully updated 0 booths");
        assert_eq!(bulk_update_message(7), "Successfully updated 7 booths");
    }

    #[test]
    fn bulk_payload_rejects_missing_empty_or_malformed_lists() {
        let missing: BulkUpdateBoothsPayload = serde_json::from_str(r#"{}"#).unwrap();
        assert!(missing.parsed_booth_ids().is_err());

        let empty: BulkUpdateBoothsPayload =
            serde_json::from_str(r#"{"boothIds": []}"#).unwrap();
        assert!(empty.parsed_booth_ids().is_err());

        let not_a_list: BulkUpdateBoothsPayload =
            serde_json::from_str(r#"{"boothIds": "abc"}"#).unwrap();
        assert!(not_a_list.parsed_booth_ids().is_err());

        let garbage_id: BulkUpdateBoothsPayload =
            serde_json::from_str(r#"{"boothIds": ["not-a-uuid"]}"#).unwrap();
        assert!(garbage_id.parsed_booth_ids().is_err());
    }

    #[test]
    fn bulk_payload_accepts_a_list_of_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let payload: BulkUpdateBoothsPayload =
            serde_json::from_str(&format!(r#"{{"boothIds": ["{a}", "{b}"]}}"#)).unwrap();
        assert_eq!(payload.parsed_booth_ids().unwrap(), vec![a, b]);
        assert!(payload.category_id.is_none());
    }
}
