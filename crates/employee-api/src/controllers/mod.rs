use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::config::Config;

/// Shared application state available in all handlers.
///
/// `db` is the single storage handle for the process; handlers receive it
/// through this state rather than a global, so tests can inject SQLite or
/// `MockDatabase` connections.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        AppState {
            db,
            config: Arc::new(config),
        }
    }
}

pub mod employees;
