pub use schoolhub_models::dashboard::*;
