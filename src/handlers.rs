pub mod booths;
pub mod categories;
pub mod reservations;
