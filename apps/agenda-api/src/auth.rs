//! Autenticação: hash de senha com argon2 e tokens bearer JWT (HS256)

use anyhow::{anyhow, Result};
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Validade dos tokens de acesso
const TOKEN_TTL_HOURS: i64 = 24;

/// Claims carregadas no token: identidade numérica (como string) e expiração
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Gera o hash argon2 de uma senha
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow!("Falha ao gerar hash de senha: {}", e))?;
    Ok(hash.to_string())
}

/// Verifica uma senha contra o hash armazenado
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Emite um token de acesso com 24 horas de validade
pub fn issue_token(person_id: i64, secret: &str) -> Result<String> {
    let expires_at = Utc::now() + Duration::hours(TOKEN_TTL_HOURS);
    let claims = Claims {
        sub: person_id.to_string(),
        exp: expires_at.timestamp() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow!("Falha ao emitir token: {}", e))
}

/// Decodifica um token e devolve a identidade numérica, se válido
///
/// Assinatura incorreta, expiração vencida ou sub não numérico são
/// tratados da mesma forma: sem identidade.
pub fn decode_token(token: &str, secret: &str) -> Option<i64> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .ok()?;
    data.claims.sub.parse().ok()
}

/// Identidade autenticada, extraída do cabeçalho `Authorization: Bearer`
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser {
    pub id: i64,
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Auth("Missing Authorization Header".to_string()))?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("Missing Authorization Header".to_string()))?;

        let id = decode_token(token, &state.config.jwt_secret)
            .ok_or_else(|| ApiError::Auth("Invalid or expired token".to_string()))?;

        Ok(CurrentUser { id })
    }
}
