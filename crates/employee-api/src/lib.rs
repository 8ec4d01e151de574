pub mod app;
pub mod config;
pub mod controllers;
pub mod db;
pub mod error;
pub mod extractors;
pub mod logging;
pub mod models;
pub mod openapi;
pub mod routing;
pub mod testing;

pub use app::App;
pub use config::Config;
pub use controllers::AppState;
pub use error::ApiError;
pub use testing::{TestApp, TestClient, TestResponse};
