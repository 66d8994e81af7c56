//! # SchoolHub Models
//!
//! Rows, request DTOs and resource descriptors for every table of the school
//! website. Content tables implement [`resource::Resource`] so the API can
//! manage them through one generic CRUD panel; the enrollment wizard,
//! admissions workflow and settings have their own types.
//!
//! ```ignore
//! use schoolhub_models::faqs::{CreateFaqDto, Faq};
//! use schoolhub_models::resource::{Resource, ResourceInput};
//!
//! assert_eq!(Faq::TABLE, "faqs");
//! let fields = dto.into_fields();
//! ```

pub mod about;
pub mod admins;
pub mod admissions;
pub mod contact;
pub mod curriculum;
pub mod dashboard;
pub mod enrollment;
pub mod events;
pub mod faqs;
pub mod gallery;
pub mod news;
pub mod people;
pub mod resource;
pub mod settings;
pub mod students;
pub mod validation;

pub use resource::{ChildTable, FieldSet, FieldValue, Resource, ResourceInput, VisibilityDto};
