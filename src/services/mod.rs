pub mod medication;
pub mod report;
pub mod representative;
pub mod tag;

pub use medication::MedicationService;
pub use representative::RepresentativeService;
pub use tag::TagService;
