pub mod controller;
pub mod model;
pub mod router;
pub mod service;

pub use router::{init_gallery_admin_router, init_photos_router};
pub use service::GalleryService;
