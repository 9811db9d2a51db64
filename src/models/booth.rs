// src/models/booth.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::postgres::PgRow;
use sqlx::types::Json;
use sqlx::{FromRow, Row};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::category::{Addon, CategorySummary, Dimensions};
use crate::models::enterprise::EnterpriseSummary;

// ---
// Status da reserva
// ---
// O enum existe no Postgres como 'booth_status'; os nomes das variantes
// batem 1:1 com os valores do banco e do JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "booth_status")]
pub enum BoothStatus {
    Pending,
    Accepted,
    Rejected,
}

impl BoothStatus {
    /// Converte o texto do payload, sem aceitar nada fora do enum.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Pending" => Some(Self::Pending),
            "Accepted" => Some(Self::Accepted),
            "Rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl std::fmt::Display for BoothStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Pending => "Pending",
            Self::Accepted => "Accepted",
            Self::Rejected => "Rejected",
        };
        write!(f, "{name}")
    }
}

// ---
// Estande
// ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booth {
    pub id: Uuid,
    pub name: String,
    pub description: String,

    /// Número visível no mapa do pavilhão. Único entre todos os estandes.
    pub number: i32,

    #[schema(value_type = Dimensions)]
    pub dimensions: Json<Dimensions>,

    pub price_without_addons: Decimal,

    /// Preço fechado, guardado de forma independente (não é derivado).
    pub final_price: Decimal,

    pub status: BoothStatus,

    #[schema(value_type = Vec<Addon>)]
    pub addons: Json<Vec<Addon>>,

    pub image: Option<String>,
    pub category_id: Option<Uuid>,
    pub enterprise_id: Option<Uuid>,

    /// Preenchido quando a reserva é aceita; nunca é limpo depois.
    pub reservation_accepted_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Referência enxuta usada no detalhe da categoria.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoothRef {
    pub id: Uuid,
    pub name: String,
    pub number: i32,
    pub status: BoothStatus,
}

// ---
// Conjunto de mudanças do PATCH do admin, já normalizado pelo service
// ---
// `image` e `category_id` têm três estados (ausente / limpar / definir);
// os demais campos são aplicados quando presentes. O status mudado por
// aqui NÃO mexe em reservation_accepted_at; isso é exclusivo da
// operação de transição de status.
#[derive(Debug, Default, Clone)]
pub struct BoothChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub number: Option<i32>,
    pub dimensions: Option<Dimensions>,
    pub price_without_addons: Option<Decimal>,
    pub final_price: Option<Decimal>,
    pub status: Option<BoothStatus>,
    pub addons: Option<Vec<Addon>>,
    pub image: Option<Option<String>>,
    pub category_id: Option<Option<Uuid>>,
}

impl BoothChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.number.is_none()
            && self.dimensions.is_none()
            && self.price_without_addons.is_none()
            && self.final_price.is_none()
            && self.status.is_none()
            && self.addons.is_none()
            && self.image.is_none()
            && self.category_id.is_none()
    }
}

// ---
// Estande com os anexos da visão do admin
// ---
// Equivalente ao JOIN com empresa e categoria que a listagem devolve.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BoothDetail {
    #[serde(flatten)]
    pub booth: Booth,
    pub enterprise: Option<EnterpriseSummary>,
    pub category: Option<CategorySummary>,
}

// FromRow manual: a linha vem de um LEFT JOIN com colunas apelidadas,
// então os anexos só existem quando a FK correspondente não é nula.
impl<'r> FromRow<'r, PgRow> for BoothDetail {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        let booth = Booth::from_row(row)?;

        let company_name: Option<String> = row.try_get("enterprise_company_name")?;
        let email: Option<String> = row.try_get("enterprise_email")?;
        let enterprise = match (company_name, email) {
            (Some(company_name), Some(email)) => Some(EnterpriseSummary { company_name, email }),
            _ => None,
        };

        let category_name: Option<String> = row.try_get("category_name")?;
        let category_description: Option<String> = row.try_get("category_description")?;
        let category = match (booth.category_id, category_name) {
            (Some(id), Some(name)) => Some(CategorySummary {
                id,
                name,
                description: category_description.unwrap_or_default(),
            }),
            _ => None,
        };

        Ok(Self {
            booth,
            enterprise,
            category,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_only_the_three_statuses() {
        assert_eq!(BoothStatus::parse("Pending"), Some(BoothStatus::Pending));
        assert_eq!(BoothStatus::parse("Accepted"), Some(BoothStatus::Accepted));
        assert_eq!(BoothStatus::parse("Rejected"), Some(BoothStatus::Rejected));

        assert_eq!(BoothStatus::parse("accepted"), None);
        assert_eq!(BoothStatus::parse("Cancelled"), None);
        assert_eq!(BoothStatus::parse(""), None);
    }

    #[test]
    fn display_matches_wire_names() {
        assert_eq!(BoothStatus::Accepted.to_string(), "Accepted");
        assert_eq!(BoothStatus::Accepted.to_string().to_lowercase(), "accepted");
    }
}
