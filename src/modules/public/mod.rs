pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::{init_contact_page_router, init_public_router};
pub use service::PublicService;
