//! Estado compartilhado da aplicação

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::ApiConfig;

/// Estado injetado em todos os handlers
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub config: Arc<ApiConfig>,
}
