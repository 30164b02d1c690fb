pub mod medication;
pub mod representative;
pub mod tag;
