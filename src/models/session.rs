//! Modelo de sesión
//!
//! Contexto de sesión explícito y de solo lectura: el usuario activo y su
//! rol, con un ciclo de vida definido (inicio de sesión → logout).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Administrator,
    Manager,
    Auditor,
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "admin",
            Role::Manager => "gestor_ruta",
            Role::Auditor => "auditor",
            Role::Driver => "conductor",
        }
    }

    /// Normalizar el nombre de rol del backend ("ROLE_GESTORRUTA", "Gestor de Ruta", ...)
    pub fn from_backend_name(name: &str) -> Option<Self> {
        let normalized: String = name
            .trim()
            .to_uppercase()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .collect();
        let normalized = normalized.strip_prefix("ROLE").unwrap_or(&normalized);

        if normalized.contains("ADMIN") {
            Some(Role::Administrator)
        } else if normalized.contains("GESTOR") && normalized.contains("RUTA") {
            Some(Role::Manager)
        } else if normalized.contains("CONDUCTOR") {
            Some(Role::Driver)
        } else if normalized.contains("AUDITOR") {
            Some(Role::Auditor)
        } else {
            None
        }
    }
}

/// Usuario autenticado
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Cédula del usuario
    pub id: String,
    pub name: String,
    pub role: Role,
}

/// Contexto de sesión compartido (solo lectura)
///
/// Los clones comparten la bandera de actividad: al cerrar la sesión,
/// cualquier carga en curso detecta el cierre y descarta su resultado.
#[derive(Debug, Clone)]
pub struct SessionContext {
    user: Arc<SessionUser>,
    started_at: DateTime<Utc>,
    active: Arc<AtomicBool>,
}

impl SessionContext {
    pub fn start(user: SessionUser) -> Self {
        Self {
            user: Arc::new(user),
            started_at: Utc::now(),
            active: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Usuario actual, `None` después del logout
    pub fn current_user(&self) -> Option<&SessionUser> {
        self.is_active().then(|| self.user.as_ref())
    }

    pub fn role(&self) -> Option<Role> {
        self.current_user().map(|user| user.role)
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn end(&self) {
        self.active.store(false, Ordering::Release);
    }
}
