//! Agenda API - Serviço REST de agendamento de consultas
//!
//! Exposto como biblioteca para que o binário e os testes de integração
//! compartilhem o roteador, a configuração e os utilitários de
//! autenticação.

pub mod auth;
pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod state;
pub mod validators;

/// Metadados de build gerados pelo `built`
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}
