pub mod admissions;
pub mod auth;
pub mod contact;
pub mod content;
pub mod dashboard;
pub mod enrollment;
pub mod gallery;
pub mod public;
pub mod settings;
pub mod uploads;
