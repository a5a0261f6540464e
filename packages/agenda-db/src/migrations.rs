//! Sistema de migrações para banco de dados
//!
//! Este módulo gerencia as migrações do banco de dados SQLite

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::{error, info};

/// Lista de migrações SQL a serem aplicadas
const MIGRATIONS: &[&str] = &[
    // 001_initial_schema.sql
    r#"
    -- Tabela única de pessoas: pacientes e médicos compartilham o mesmo
    -- espaço de identificadores, diferenciados por is_doctor
    CREATE TABLE IF NOT EXISTS persons (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        name TEXT NOT NULL,
        email TEXT NOT NULL UNIQUE,
        phone TEXT NOT NULL,
        is_doctor BOOLEAN NOT NULL DEFAULT 0,
        specialization TEXT,
        password_hash TEXT
    );

    -- Tabela de consultas
    CREATE TABLE IF NOT EXISTS appointments (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        created_at TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
        doctor_id INTEGER NOT NULL,
        patient_id INTEGER NOT NULL,
        appointment_time TIMESTAMP NOT NULL,
        status TEXT NOT NULL DEFAULT 'scheduled'
            CHECK (status IN ('scheduled', 'canceled', 'completed', 'rescheduled')),
        FOREIGN KEY (doctor_id) REFERENCES persons (id),
        FOREIGN KEY (patient_id) REFERENCES persons (id)
    );

    -- Índices para otimização
    CREATE INDEX IF NOT EXISTS idx_persons_is_doctor ON persons (is_doctor);
    CREATE INDEX IF NOT EXISTS idx_appointments_doctor_id ON appointments (doctor_id);
    CREATE INDEX IF NOT EXISTS idx_appointments_patient_id ON appointments (patient_id);
    CREATE INDEX IF NOT EXISTS idx_appointments_time ON appointments (appointment_time);

    -- No máximo uma consulta 'scheduled' por médico e horário; consultas
    -- canceladas ou concluídas liberam o horário
    CREATE UNIQUE INDEX IF NOT EXISTS uq_appointments_doctor_slot
        ON appointments (doctor_id, appointment_time)
        WHERE status = 'scheduled';
    "#,
    // 002_add_notes.sql
    r#"
    -- Observações livres do paciente (limite de tamanho validado na API)
    ALTER TABLE appointments ADD COLUMN notes TEXT;
    "#,
];

/// Executa todas as migrações pendentes no banco de dados
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Aplicando migrações de banco de dados...");

    // Obter a versão atual do banco de dados
    let mut version: i64 = 0;
    match sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(pool)
        .await
    {
        Ok(v) => version = v,
        Err(e) => {
            error!("Erro ao obter versão do banco: {}", e);
            // Continuar mesmo assim, pois pode ser a primeira execução
        }
    }

    info!("Versão atual do banco: {}", version);

    // Aplicar cada migração pendente sequencialmente
    for (i, migration_sql) in MIGRATIONS.iter().enumerate() {
        let migration_version = (i + 1) as i64;

        // Pular migrações já aplicadas
        if migration_version <= version {
            info!("Migração {} já aplicada", migration_version);
            continue;
        }

        info!("Aplicando migração {}...", migration_version);

        // Executar em uma transação para garantir atomicidade
        let mut transaction = pool.begin().await.context(format!(
            "Falha ao iniciar transação para migração {}",
            migration_version
        ))?;

        // Executar os comandos SQL
        sqlx::query(migration_sql)
            .execute(&mut *transaction)
            .await
            .context(format!("Falha ao executar migração {}", migration_version))?;

        // Atualizar versão do banco
        sqlx::query(&format!("PRAGMA user_version = {}", migration_version))
            .execute(&mut *transaction)
            .await
            .context(format!("Falha ao atualizar versão para {}", migration_version))?;

        // Commit da transação
        transaction.commit().await.context(format!(
            "Falha ao confirmar transação para migração {}",
            migration_version
        ))?;

        info!("Migração {} aplicada com sucesso", migration_version);
    }

    info!("Migrações concluídas. Versão atual: {}", MIGRATIONS.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::migrate::MigrateDatabase;
    use sqlx::sqlite::SqliteConnectOptions;
    use sqlx::Sqlite;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_migrations() -> Result<()> {
        // Usar diretório temporário para testes
        let temp_dir = tempdir()?;
        let db_path = temp_dir.path().join("test_migrations.db");
        let db_url = format!("sqlite:{}", db_path.display());

        // Criar banco de dados
        Sqlite::create_database(&db_url).await?;

        // Conectar
        let conn_options = SqliteConnectOptions::new()
            .filename(&db_path)
            .create_if_missing(true);

        let pool = SqlitePool::connect_with(conn_options).await?;

        // Aplicar migrações
        run_migrations(&pool).await?;

        // Verificar versão do banco
        let version: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;

        assert_eq!(version, MIGRATIONS.len() as i64);

        // Verificar se tabelas foram criadas
        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'",
        )
        .fetch_all(&pool)
        .await?;

        assert!(tables.contains(&"persons".to_string()));
        assert!(tables.contains(&"appointments".to_string()));

        // O índice parcial contra agendamento duplo precisa existir
        let indexes: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='index' AND tbl_name='appointments'",
        )
        .fetch_all(&pool)
        .await?;

        assert!(indexes.contains(&"uq_appointments_doctor_slot".to_string()));

        // Reaplicar deve ser um no-op
        run_migrations(&pool).await?;
        let version_again: i64 = sqlx::query_scalar("PRAGMA user_version")
            .fetch_one(&pool)
            .await?;
        assert_eq!(version_again, version);

        Ok(())
    }
}
