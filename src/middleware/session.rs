//! Middleware de sesión
//!
//! Extrae el token Bearer, lo verifica y obtiene (o crea) la consola de la
//! sesión, que queda disponible como extensión de la request.

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{
    controllers::console_session::ConsoleSession,
    models::session::SessionUser,
    state::AppState,
    utils::errors::{ConsoleError, ConsoleResult},
    utils::jwt::{extract_token_from_header, verify_token, JwtConfig},
};

/// Sesión autenticada que se inyecta en las requests
#[derive(Clone)]
pub struct AuthenticatedSession {
    pub user: SessionUser,
    pub console: Arc<Mutex<ConsoleSession>>,
}

/// Middleware de sesión JWT
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ConsoleResult<Response> {
    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ConsoleError::Unauthorized("Token de autorización requerido".to_string()))?;

    let token = extract_token_from_header(auth_header)?;
    let user = verify_token(token, &JwtConfig::from(&state.config))?.into_session_user()?;
    debug!("🔐 Sesión de {} ({})", user.id, user.role.as_str());

    let console = state.session_for(&user, token).await;
    request
        .extensions_mut()
        .insert(AuthenticatedSession { user, console });

    Ok(next.run(request).await)
}
