//! Ponto de entrada do serviço de agendamento

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower::limit::ConcurrencyLimitLayer;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use agenda_api::config::ApiConfig;
use agenda_api::state::AppState;
use agenda_api::{built_info, routes, seed};
use agenda_db::DbConfig;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let config = Arc::new(ApiConfig::from_env());
    info!("{} {} iniciando", built_info::PKG_NAME, built_info::PKG_VERSION);

    let db_config = DbConfig {
        db_path: config.db_path.clone(),
        max_connections: config.max_connections,
    };
    let pool = agenda_db::init_db_pool(&db_config)
        .await
        .context("Falha ao inicializar o banco de dados")?;

    // Modo utilitário: aplica os dados de demonstração e encerra
    if std::env::args().any(|arg| arg == "--seed") {
        seed::run(&pool)
            .await
            .context("Falha ao aplicar dados de demonstração")?;
        return Ok(());
    }

    let state = AppState {
        pool,
        config: config.clone(),
    };

    let app = routes::router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(CompressionLayer::new())
            .layer(ConcurrencyLimitLayer::new(config.max_in_flight)),
    );

    let addr: SocketAddr = config
        .bind_addr
        .parse()
        .context("Endereço de escuta inválido")?;
    info!("Escutando em {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Erro no servidor HTTP")?;

    info!("Servidor encerrado");
    Ok(())
}

/// Configura o tracing; LOG_FORMAT=json troca a saída para JSON
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json_output = std::env::var("LOG_FORMAT")
        .map(|value| value == "json")
        .unwrap_or(false);

    if json_output {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Falha ao instalar o handler de ctrl-c: {}", err);
    }
    info!("Sinal de encerramento recebido");
}
