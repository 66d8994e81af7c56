//! Generic CRUD panel shared by every content table.
//!
//! Each table is described by a [`schoolhub_models::Resource`] impl; the
//! service, handlers and router here are instantiated once per resource.

pub mod controller;
pub mod router;
pub mod service;

pub use router::{init_content_router, resource_router};
pub use service::ContentService;
