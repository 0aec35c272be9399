//! Sistema de manejo de errores
//!
//! Este módulo define todos los errores de la consola de rutas,
//! su notificación para el usuario y su conversión a respuestas HTTP.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::models::catalog::EnumDomain;
use crate::models::notification::Notification;

/// Errores principales de la consola
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConsoleError {
    #[error("Unknown code {code} in domain {domain}")]
    UnknownCode { domain: EnumDomain, code: i32 },

    #[error("Unknown label '{label}' in domain {domain}")]
    UnknownLabel { domain: EnumDomain, label: String },

    #[error("Ambiguous label '{label}' in domain {domain}")]
    AmbiguousLabel { domain: EnumDomain, label: String },

    #[error("Duplicate code {code} in domain {domain}")]
    DuplicateCode { domain: EnumDomain, code: i32 },

    #[error("Translator not built yet")]
    TranslatorNotReady,

    #[error("Validation error on '{field}': {message}")]
    Validation { field: &'static str, message: String },

    #[error("Invalid route identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("No route staged for confirmation")]
    NothingStaged,

    #[error("Session ended")]
    SessionEnded,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },
}

/// Resultado tipado para operaciones de la consola
pub type ConsoleResult<T> = Result<T, ConsoleError>;

impl ConsoleError {
    /// Código estable para clientes de la API
    pub fn code(&self) -> &'static str {
        match self {
            ConsoleError::UnknownCode { .. } => "UNKNOWN_CODE",
            ConsoleError::UnknownLabel { .. } => "UNKNOWN_LABEL",
            ConsoleError::AmbiguousLabel { .. } => "AMBIGUOUS_LABEL",
            ConsoleError::DuplicateCode { .. } => "DUPLICATE_CODE",
            ConsoleError::TranslatorNotReady => "TRANSLATOR_NOT_READY",
            ConsoleError::Validation { .. } => "VALIDATION_ERROR",
            ConsoleError::InvalidIdentifier(_) => "INVALID_IDENTIFIER",
            ConsoleError::NotFound(_) => "NOT_FOUND",
            ConsoleError::Forbidden(_) => "FORBIDDEN",
            ConsoleError::Unauthorized(_) => "UNAUTHORIZED",
            ConsoleError::NothingStaged => "NOTHING_STAGED",
            ConsoleError::SessionEnded => "SESSION_ENDED",
            ConsoleError::Network(_) => "NETWORK_ERROR",
            ConsoleError::Server { .. } => "SERVER_ERROR",
        }
    }

    /// Notificación visible para el usuario
    pub fn notification(&self) -> Notification {
        let description = match self {
            ConsoleError::UnknownCode { domain, code } => {
                format!("Datos de rutas inconsistentes: código {} desconocido ({})", code, domain)
            }
            ConsoleError::UnknownLabel { domain, label } => {
                format!("Valor '{}' no reconocido ({})", label, domain)
            }
            ConsoleError::AmbiguousLabel { domain, label } => {
                format!("El valor '{}' está duplicado en el catálogo ({})", label, domain)
            }
            ConsoleError::DuplicateCode { domain, code } => {
                format!("Catálogo inconsistente: código {} repetido ({})", code, domain)
            }
            ConsoleError::TranslatorNotReady => {
                "Los estados de ruta aún no se han cargado".to_string()
            }
            ConsoleError::Validation { message, .. } => message.clone(),
            ConsoleError::InvalidIdentifier(_) => "ID de ruta inválido".to_string(),
            ConsoleError::NotFound(_) => "Ruta no encontrada".to_string(),
            ConsoleError::Forbidden(_) => {
                "No tienes permiso para realizar esta acción".to_string()
            }
            ConsoleError::Unauthorized(msg) => msg.clone(),
            ConsoleError::NothingStaged => "No hay ninguna ruta seleccionada".to_string(),
            ConsoleError::SessionEnded => "La sesión ha finalizado".to_string(),
            ConsoleError::Network(msg) => format!("Error de red: {}", msg),
            ConsoleError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            ConsoleError::Server { .. } => "Error inesperado. Intente más tarde.".to_string(),
        };

        Notification::error(description)
    }

    fn status(&self) -> StatusCode {
        match self {
            ConsoleError::UnknownCode { .. }
            | ConsoleError::UnknownLabel { .. }
            | ConsoleError::AmbiguousLabel { .. }
            | ConsoleError::DuplicateCode { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ConsoleError::TranslatorNotReady | ConsoleError::NothingStaged => StatusCode::CONFLICT,
            ConsoleError::Validation { .. } | ConsoleError::InvalidIdentifier(_) => {
                StatusCode::BAD_REQUEST
            }
            ConsoleError::NotFound(_) => StatusCode::NOT_FOUND,
            ConsoleError::Forbidden(_) => StatusCode::FORBIDDEN,
            ConsoleError::Unauthorized(_) | ConsoleError::SessionEnded => StatusCode::UNAUTHORIZED,
            ConsoleError::Network(_) | ConsoleError::Server { .. } => StatusCode::BAD_GATEWAY,
        }
    }
}

/// Respuesta de error para la API
#[derive(Debug, serde::Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<serde_json::Value>,
    code: String,
    notification: Notification,
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!("❌ {}", self);
        } else {
            warn!("⚠️ {}", self);
        }

        let details = match &self {
            ConsoleError::Validation { field, .. } => Some(json!({ "field": field })),
            ConsoleError::Server { status, .. } => Some(json!({ "upstream_status": status })),
            _ => None,
        };

        let notification = self.notification();
        let body = ErrorResponse {
            error: status.canonical_reason().unwrap_or("Error").to_string(),
            message: notification.description.clone(),
            details,
            code: self.code().to_string(),
            notification,
        };

        (status, Json(body)).into_response()
    }
}

/// Función helper para crear errores de ruta no encontrada
pub fn route_not_found(public_id: &str) -> ConsoleError {
    ConsoleError::NotFound(format!("Route '{}' not found", public_id))
}

/// Función helper para crear errores de acceso prohibido
pub fn forbidden_error(operation: &str, reason: &str) -> ConsoleError {
    ConsoleError::Forbidden(format!("Cannot {}: {}", operation, reason))
}
