pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::{init_contact_submit_router, init_messages_router};
pub use service::ContactService;
