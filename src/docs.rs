// src/docs.rs

use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Categories ---
        handlers::categories::list_categories,
        handlers::categories::create_category,
        handlers::categories::get_category,
        handlers::categories::update_category,
        handlers::categories::delete_category,

        // --- Booths ---
        handlers::booths::list_booths,
        handlers::booths::create_booth,
        handlers::booths::get_booth,
        handlers::booths::update_booth,
        handlers::booths::delete_booth,
        handlers::booths::update_booth_status,
        handlers::booths::bulk_update_booths,

        // --- Reservations ---
        handlers::reservations::list_available_booths,
        handlers::reservations::get_my_booth,
        handlers::reservations::book_booth,
    ),
    components(
        schemas(
            // --- Models ---
            models::category::Category,
            models::category::CategoryWithCount,
            models::category::CategoryDetail,
            models::category::CategorySummary,
            models::category::Dimensions,
            models::category::Addon,
            models::booth::Booth,
            models::booth::BoothStatus,
            models::booth::BoothRef,
            models::booth::BoothDetail,
            models::enterprise::Enterprise,
            models::enterprise::EnterpriseSummary,

            // --- Payloads ---
            handlers::categories::CreateCategoryPayload,
            handlers::categories::UpdateCategoryPayload,
            handlers::booths::CreateBoothPayload,
            handlers::booths::UpdateBoothPayload,
            handlers::booths::UpdateBoothStatusPayload,
            handlers::booths::BulkUpdateBoothsPayload,
        )
    ),
    tags(
        (name = "Categories", description = "Catálogo de categorias (moldes de estande)"),
        (name = "Booths", description = "Gestão de estandes do pavilhão"),
        (name = "Reservations", description = "Fluxo de reserva das empresas expositoras")
    )
)]
pub struct ApiDoc;
