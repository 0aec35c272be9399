//! Utilidades JWT
//!
//! Decodificación del token emitido por el servicio de autenticación y su
//! conversión al usuario de la sesión.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::{
    config::environment::EnvironmentConfig,
    models::session::{Role, SessionUser},
    utils::errors::{ConsoleError, ConsoleResult},
};

/// Claims del token de sesión
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String, // cédula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    pub rol: String,
    pub exp: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<usize>,
}

impl SessionClaims {
    /// Usuario de la sesión a partir de los claims
    pub fn into_session_user(self) -> ConsoleResult<SessionUser> {
        let role = Role::from_backend_name(&self.rol)
            .ok_or_else(|| ConsoleError::Unauthorized(format!("Rol desconocido: {}", self.rol)))?;

        Ok(SessionUser {
            name: self.nombre.unwrap_or_else(|| self.sub.clone()),
            id: self.sub,
            role,
        })
    }
}

/// Configuración de JWT
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
}

impl From<&EnvironmentConfig> for JwtConfig {
    fn from(config: &EnvironmentConfig) -> Self {
        Self {
            secret: config.jwt_secret.clone(),
        }
    }
}

/// Generar token de sesión (desarrollo y pruebas)
pub fn generate_token(
    user_id: &str,
    name: &str,
    backend_role: &str,
    expires_in_secs: i64,
    config: &JwtConfig,
) -> ConsoleResult<String> {
    let now = chrono::Utc::now();
    let expires_at = now + chrono::Duration::seconds(expires_in_secs);

    let claims = SessionClaims {
        sub: user_id.to_string(),
        nombre: Some(name.to_string()),
        rol: backend_role.to_string(),
        exp: expires_at.timestamp().max(0) as usize,
        iat: Some(now.timestamp().max(0) as usize),
    };

    let encoding_key = EncodingKey::from_secret(config.secret.as_ref());

    encode(&Header::default(), &claims, &encoding_key)
        .map_err(|e| ConsoleError::Unauthorized(format!("Error generando token: {}", e)))
}

/// Verificar y decodificar el token
pub fn verify_token(token: &str, config: &JwtConfig) -> ConsoleResult<SessionClaims> {
    let decoding_key = DecodingKey::from_secret(config.secret.as_ref());

    let token_data = decode::<SessionClaims>(token, &decoding_key, &Validation::default())
        .map_err(|e| ConsoleError::Unauthorized(format!("Token inválido: {}", e)))?;

    Ok(token_data.claims)
}

/// Extraer token del header Authorization
pub fn extract_token_from_header(auth_header: &str) -> ConsoleResult<&str> {
    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        ConsoleError::Unauthorized("Header Authorization debe comenzar con 'Bearer '".to_string())
    })?;

    let token = token.trim();
    if token.is_empty() {
        return Err(ConsoleError::Unauthorized("Token no puede estar vacío".to_string()));
    }

    Ok(token)
}
