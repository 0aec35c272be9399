//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum: configuración, conector del servicio de
//! rutas y las consolas abiertas por usuario.

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tracing::info;

use crate::clients::route_service_client::RouteServiceConnector;
use crate::config::environment::EnvironmentConfig;
use crate::controllers::console_session::ConsoleSession;
use crate::models::session::{SessionContext, SessionUser};

/// Consola abierta para un usuario
struct SessionEntry {
    user: SessionUser,
    token: String,
    context: SessionContext,
    console: Arc<Mutex<ConsoleSession>>,
}

#[derive(Clone)]
pub struct AppState {
    pub config: EnvironmentConfig,
    connector: Arc<dyn RouteServiceConnector>,
    sessions: Arc<RwLock<HashMap<String, SessionEntry>>>,
}

impl AppState {
    pub fn new(config: EnvironmentConfig, connector: Arc<dyn RouteServiceConnector>) -> Self {
        Self {
            config,
            connector,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Obtener la consola del usuario, creándola si no existe.
    ///
    /// Si el token o el rol cambiaron, la sesión anterior se cierra y se
    /// abre una nueva (el rol nunca se reutiliza entre sesiones).
    pub async fn session_for(&self, user: &SessionUser, token: &str) -> Arc<Mutex<ConsoleSession>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(entry) = sessions.get(&user.id) {
                if entry.user == *user && entry.token == token {
                    return Arc::clone(&entry.console);
                }
            }
        }

        let mut sessions = self.sessions.write().await;
        if let Some(entry) = sessions.get(&user.id) {
            if entry.user == *user && entry.token == token {
                return Arc::clone(&entry.console);
            }
            info!("🔁 Sesión de {} reemplazada", user.id);
            entry.context.end();
        }

        let context = SessionContext::start(user.clone());
        let service = self.connector.connect(token);
        let console = Arc::new(Mutex::new(ConsoleSession::new(service, context.clone())));
        info!("👤 Sesión iniciada para {} ({})", user.id, user.role.as_str());

        sessions.insert(
            user.id.clone(),
            SessionEntry {
                user: user.clone(),
                token: token.to_string(),
                context,
                console: Arc::clone(&console),
            },
        );
        console
    }

    /// Cerrar la sesión de un usuario. Las cargas en curso se descartan.
    pub async fn end_session(&self, user_id: &str) -> bool {
        let removed = self.sessions.write().await.remove(user_id);
        match removed {
            Some(entry) => {
                entry.context.end();
                info!("👋 Sesión de {} finalizada", user_id);
                true
            }
            None => false,
        }
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
