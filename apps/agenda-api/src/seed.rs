//! Aplicação dos dados de demonstração (`agenda-api --seed`)

use anyhow::Result;
use sqlx::SqlitePool;
use tracing::info;

use crate::auth;

/// Insere os dados de demonstração, se ainda não presentes
///
/// As senhas do conjunto passam pelo mesmo hash argon2 usado no
/// cadastro normal, então os logins de demonstração funcionam de
/// imediato.
pub async fn run(pool: &SqlitePool) -> Result<()> {
    if agenda_db::seed::already_seeded(pool).await? {
        info!("Dados de demonstração já aplicados; nada a fazer");
        return Ok(());
    }

    agenda_db::seed::seed_demo_data(pool, auth::hash_password).await
}
