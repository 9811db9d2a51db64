// src/models/enterprise.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// A empresa expositora é só leitura aqui: o cadastro dela vive em outro
// sistema. A gente consome id, razão social e e-mail.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Enterprise {
    pub id: Uuid,
    pub company_name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

// Resumo anexado às respostas de estande.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnterpriseSummary {
    pub company_name: String,
    pub email: String,
}
