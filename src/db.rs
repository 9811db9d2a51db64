pub mod booth_repo;
pub use booth_repo::BoothRepository;
pub mod category_repo;
pub use category_repo::CategoryRepository;
pub mod enterprise_repo;
pub use enterprise_repo::EnterpriseRepository;
