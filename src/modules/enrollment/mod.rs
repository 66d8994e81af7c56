pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::{init_enrollment_router, init_enrollment_submit_router};
pub use service::EnrollmentService;
