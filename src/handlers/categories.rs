// src/handlers/categories.rs

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
    models::category::{
        Addon, Category, CategoryChanges, CategoryDetail, CategoryWithCount, Dimensions,
        validate_not_negative,
    },
};

// ---
// Payload: CreateCategoryPayload
// ---
// Campos obrigatórios entram como Option + required para a falta deles
// virar 400 de validação, não 422 do serde.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCategoryPayload {
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

    #[validate(required(message = "The 'dimensions' field is required."), nested)]
    pub dimensions: Option<Dimensions>,

    #[validate(
        required(message = "The 'priceWithoutAddons' field is required."),
        custom(function = "validate_not_negative")
    )]
    pub price_without_addons: Option<Decimal>,

    #[validate(nested)]
    pub addons: Option<Vec<Addon>>,

    pub image: Option<String>,
}

// ---
// Handler: list_categories
// ---
#[utoipa::path(
    get,
    path = "/admin/categories",
    tag = "Categories",
    responses(
        (status = 200, description = "Todas as categorias com contagem de estandes", body = Vec<CategoryWithCount>)
    )
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let categories = app_state.category_service.list(&app_state.db_pool).await?;

    Ok((StatusCode::OK, Json(categories)))
}

// ---
// Handler: create_category
// ---
#[utoipa::path(
    post,
    path = "/admin/categories",
    tag = "Categories",
    request_body = CreateCategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 400, description = "Campos faltando ou nome já em uso")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .create(
            &app_state.db_pool,
            payload.name.as_deref().unwrap(),
            payload.description.as_deref().unwrap(),
            payload.dimensions.as_ref().unwrap(),
            payload.price_without_addons.unwrap(),
            payload.addons.as_deref().unwrap_or_default(),
            payload.image.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Category created successfully",
            "category": category,
        })),
    ))
}

// ---
// Handler: get_category
// ---
#[utoipa::path(
    get,
    path = "/admin/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria com os estandes que a usam", body = CategoryDetail),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let category = app_state
        .category_service
        .get(&app_state.db_pool, id)
        .await?;

    Ok((StatusCode::OK, Json(category)))
}

// ---
// Payload: UpdateCategoryPayload
// ---
// PATCH parcial. String vazia em name/description conta como "não
// mandou"; `image` distingue ausente de null via double_option.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryPayload {
    pub name: Option<String>,

    pub description: Option<String>,

    #[validate(nested)]
    pub dimensions: Option<Dimensions>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price_without_addons: Option<Decimal>,

    #[validate(nested)]
    pub addons: Option<Vec<Addon>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub image: Option<Option<String>>,
}

impl UpdateCategoryPayload {
    fn into_changes(self) -> CategoryChanges {
        CategoryChanges {
            name: self.name.filter(|s| !s.is_empty()),
            description: self.description.filter(|s| !s.is_empty()),
            dimensions: self.dimensions,
            price_without_addons: self.price_without_addons,
            addons: self.addons,
            image: self.image,
        }
    }
}

// ---
// Handler: update_category
// ---
#[utoipa::path(
    patch,
    path = "/admin/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    request_body = UpdateCategoryPayload,
    responses(
        (status = 200, description = "Categoria atualizada", body = CategoryWithCount),
        (status = 400, description = "Nome já em uso"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let category = app_state
        .category_service
        .update(&app_state.db_pool, id, payload.into_changes())
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({
            "message": "Category updated successfully",
            "category": category,
        })),
    ))
}

// ---
// Handler: delete_category
// ---
#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    tag = "Categories",
    params(("id" = Uuid, Path, description = "ID da categoria")),
    responses(
        (status = 200, description = "Categoria excluída"),
        (status = 400, description = "Categoria ainda referenciada por estandes"),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .category_service
        .delete(&app_state.db_pool, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(json!({ "message": "Category deleted successfully" })),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_required_fields_fail_validation() {
        let payload: CreateCategoryPayload = serde_json::from_str(r#"{}"#).unwrap();
        let errors = payload.validate().unwrap_err();
        let fields = errors.field_errors();
        assert_eq!(fields.len(), 4);
        assert!(fields.contains_key("name"));
        assert!(fields.contains_key("description"));
        assert!(fields.contains_key("dimensions"));
    }

    #[test]
    fn zero_price_is_a_real_value() {
        let payload: CreateCategoryPayload = serde_json::from_str(
            r#"{
                "name": "Standard",
                "description": "3x3 corner booth",
                "dimensions": { "width": 3.0, "height": 3.0 },
                "priceWithoutAddons": 0
            }"#,
        )
        .unwrap();
        assert!(payload.validate().is_ok());
        assert_eq!(payload.price_without_addons, Some(Decimal::ZERO));
    }

    #[test]
    fn blank_name_in_patch_means_not_sent() {
        let payload: UpdateCategoryPayload =
            serde_json::from_str(r#"{"name": "", "description": "updated"}"#).unwrap();
        let changes = payload.into_changes();
        assert_eq!(changes.name, None);
        assert_eq!(changes.description, Some("updated".to_string()));
    }

    #[test]
    fn image_patch_distinguishes_clear_from_absent() {
        let absent: UpdateCategoryPayload = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(absent.into_changes().image, None);

        let cleared: UpdateCategoryPayload = serde_json::from_str(r#"{"image": null}"#).unwrap();
        assert_eq!(cleared.into_changes().image, Some(None));

        let set: UpdateCategoryPayload =
            serde_json::from_str(r#"{"image": "hall-a.png"}"#).unwrap();
        assert_eq!(
            set.into_changes().image,
            Some(Some("hall-a.png".to_string()))
        );
    }
}
