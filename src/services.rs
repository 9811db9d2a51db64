pub mod booth_service;
pub use booth_service::{BoothService, TransitionPolicy};
pub mod category_service;
pub use category_service::CategoryService;
pub mod reservation_service;
pub use reservation_service::ReservationService;
