pub mod controller;
pub mod model;
pub mod print;
pub mod router;
pub mod service;

pub use router::init_admissions_router;
pub use service::AdmissionService;
