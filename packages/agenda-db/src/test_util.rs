//! Utilidades de teste compartilhadas (feature `test-utils`)

use anyhow::Result;
use sqlx::SqlitePool;

pub use tempfile::TempDir;

use crate::{init_db_pool, DbConfig};

/// Cria um pool sobre um banco temporário já migrado
///
/// O `TempDir` retornado precisa ficar vivo enquanto o pool for usado;
/// ao ser descartado, o arquivo do banco desaparece junto.
pub async fn temp_pool() -> Result<(SqlitePool, TempDir)> {
    let temp_dir = tempfile::tempdir()?;
    let config = DbConfig {
        db_path: temp_dir
            .path()
            .join("test.db")
            .to_string_lossy()
            .into_owned(),
        max_connections: 2,
    };
    let pool = init_db_pool(&config).await?;
    Ok((pool, temp_dir))
}
