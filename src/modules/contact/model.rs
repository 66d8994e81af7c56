pub use schoolhub_models::contact::*;
