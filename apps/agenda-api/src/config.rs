//! Configuração do serviço via variáveis de ambiente

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::warn;

/// Configuração carregada no arranque do serviço
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Endereço e porta de escuta (AGENDA_BIND)
    pub bind_addr: String,
    /// Caminho do arquivo SQLite (AGENDA_DB)
    pub db_path: String,
    /// Segredo HS256 dos tokens de acesso (JWT_SECRET_KEY)
    pub jwt_secret: String,
    /// Conexões máximas no pool (AGENDA_MAX_CONNECTIONS)
    pub max_connections: u32,
    /// Requisições atendidas em paralelo (AGENDA_MAX_IN_FLIGHT)
    pub max_in_flight: usize,
}

impl ApiConfig {
    /// Carrega a configuração do ambiente, com padrões de desenvolvimento
    pub fn from_env() -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warn!(
                    "JWT_SECRET_KEY ausente; usando segredo efêmero \
                     (tokens não sobrevivem a reinícios)"
                );
                ephemeral_secret()
            }
        };

        Self {
            bind_addr: env_or("AGENDA_BIND", "0.0.0.0:5000"),
            db_path: env_or("AGENDA_DB", "data/agenda.db"),
            jwt_secret,
            max_connections: env_parsed("AGENDA_MAX_CONNECTIONS", 5),
            max_in_flight: env_parsed("AGENDA_MAX_IN_FLIGHT", 256),
        }
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parsed<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}

fn ephemeral_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
