pub use schoolhub_models::admissions::*;
