// src/models/category.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use sqlx::types::Json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// ---
// Validações compartilhadas (preços e medidas)
// ---
pub fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("Value must not be negative.".into());
        return Err(err);
    }
    Ok(())
}

pub fn validate_positive(val: f64) -> Result<(), ValidationError> {
    if !val.is_finite() || val <= 0.0 {
        let mut err = ValidationError::new("range");
        err.message = Some("Value must be a positive number.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Blobs estruturados (JSONB): dimensões e adicionais
// ---
// Guardados como JSONB na própria linha, não como tabelas separadas.

/// Dimensões físicas em metros.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Dimensions {
    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 3.0)]
    pub width: f64,

    #[validate(custom(function = "validate_positive"))]
    #[schema(example = 2.5)]
    pub height: f64,
}

/// Um extra opcional com nome e preço (ex: "Iluminação extra").
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct Addon {
    #[validate(length(min = 1, message = "Addon name is required."))]
    pub name: String,

    pub description: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    pub price: Decimal,
}

// ---
// Categoria: o "molde" reutilizável de estande
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    #[schema(value_type = Dimensions)]
    pub dimensions: Json<Dimensions>,

    pub price_without_addons: Decimal,

    #[schema(value_type = Vec<Addon>)]
    pub addons: Json<Vec<Addon>>,

    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha da listagem do admin: categoria + quantos estandes a usam.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithCount {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    #[schema(value_type = Dimensions)]
    pub dimensions: Json<Dimensions>,

    pub price_without_addons: Decimal,

    #[schema(value_type = Vec<Addon>)]
    pub addons: Json<Vec<Addon>>,

    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub booth_count: i64,
}

impl CategoryWithCount {
    pub fn from_category(category: Category, booth_count: i64) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
            dimensions: category.dimensions,
            price_without_addons: category.price_without_addons,
            addons: category.addons,
            image: category.image,
            created_at: category.created_at,
            updated_at: category.updated_at,
            booth_count,
        }
    }
}

// Detalhe da categoria: inclui os estandes que a referenciam.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetail {
    #[serde(flatten)]
    pub category: Category,
    pub booths: Vec<crate::models::booth::BoothRef>,
}

// Resumo anexado aos estandes (o "include" da listagem do admin).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategorySummary {
    pub id: Uuid,
    pub name: String,
    pub description: String,
}

// ---
// Conjunto de mudanças do PATCH, já normalizado pelo service
// ---
// Cada campo tem uma regra explícita de presença:
//   - None        = não mexe
//   - Some(v)     = aplica v
// `image` tem três estados (ausente / limpar / definir), por isso o
// Option aninhado.
#[derive(Debug, Default, Clone)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub price_without_addons: Option<Decimal>,
    pub addons: Option<Vec<Addon>>,
    pub image: Option<Option<String>>,
}

impl CategoryChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.dimensions.is_none()
            && self.price_without_addons.is_none()
            && self.addons.is_none()
            && self.image.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn negative_price_is_rejected() {
        assert!(validate_not_negative(&Decimal::new(-1, 2)).is_err());
        assert!(validate_not_negative(&Decimal::ZERO).is_ok());
        assert!(validate_not_negative(&Decimal::new(100000, 2)).is_ok());
    }

    #[test]
    fn dimensions_must_be_positive() {
        assert!(validate_positive(0.0).is_err());
        assert!(validate_positive(-2.5).is_err());
        assert!(validate_positive(f64::NAN).is_err());
        assert!(validate_positive(3.0).is_ok());
    }

    #[test]
    fn addon_requires_name_and_non_negative_price() {
        let addon = Addon {
            name: "".to_string(),
            description: None,
            price: Decimal::new(5000, 2),
        };
        assert!(addon.validate().is_err());

        let addon = Addon {
            name: "Extra lighting".to_string(),
            description: Some("Two spotlights".to_string()),
            price: Decimal::new(5000, 2),
        };
        assert!(addon.validate().is_ok());
    }
}
