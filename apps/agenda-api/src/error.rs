//! Tipos de erro da API e sua conversão em respostas HTTP
//!
//! Toda resposta de erro segue o envelope `{"msg": "..."}` esperado
//! pelo frontend.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::{Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use agenda_db::error::DbError;

/// Erros expostos pelos handlers, na taxonomia da API pública
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entrada rejeitada por um validador ou por uma regra de negócio
    #[error("{0}")]
    Validation(String),

    /// Credenciais ou token inválidos
    #[error("{0}")]
    Auth(String),

    /// Recurso inexistente ou fora do alcance do requisitante
    #[error("{0}")]
    NotFound(String),

    /// Falha interna; registrada no log, genérica para o cliente
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Mensagens fixas dos validadores viram erros 400
impl From<&'static str> for ApiError {
    fn from(message: &'static str) -> Self {
        ApiError::Validation(message.to_string())
    }
}

/// Erros da camada de dados sem tratamento específico no handler
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound(msg) => ApiError::NotFound(msg),
            other => ApiError::Internal(anyhow::Error::new(other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Auth(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Internal(err) => {
                error!("Erro interno: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "msg": msg }))).into_response()
    }
}

/// Extrator de JSON que responde corpos inválidos com 400 e `{"msg"}`
///
/// O extrator padrão do axum devolve 422 com corpo em texto plano, o
/// que quebraria o contrato da API.
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, B, T> FromRequest<S, B> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, B, Rejection = JsonRejection>,
    S: Send + Sync,
    B: Send + 'static,
{
    type Rejection = ApiError;

    async fn from_request(req: Request<B>, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err(ApiError::Validation(rejection.to_string())),
        }
    }
}
