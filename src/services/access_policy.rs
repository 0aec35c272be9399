use serde::Serialize;
use std::collections::BTreeSet;

use crate::models::session::{Role, SessionContext};
use crate::utils::errors::{forbidden_error, ConsoleError, ConsoleResult};

/// Acciones que la consola puede exponer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionId {
    ViewRoutes,
    CreateRoute,
    UpdateRoute,
    DeleteRoute,
    ViewTeam,
    ViewAnalysis,
}

impl ActionId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionId::ViewRoutes => "view_routes",
            ActionId::CreateRoute => "create_route",
            ActionId::UpdateRoute => "update_route",
            ActionId::DeleteRoute => "delete_route",
            ActionId::ViewTeam => "view_team",
            ActionId::ViewAnalysis => "view_analysis",
        }
    }
}

/// Alcance de las rutas visibles para un rol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteScope {
    All,
    OwnOnly,
}

/// Política de acceso por rol.
///
/// Se evalúa en cada consulta a partir del rol actual de la sesión; nunca se
/// guarda el resultado entre cambios de rol. Es orientativa: el servicio de
/// rutas vuelve a verificar los permisos.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    session: SessionContext,
}

impl AccessPolicy {
    pub fn new(session: SessionContext) -> Self {
        Self { session }
    }

    /// Acciones permitidas para un rol
    pub fn permitted_actions(role: Role) -> BTreeSet<ActionId> {
        let actions: &[ActionId] = match role {
            Role::Administrator | Role::Manager => &[
                ActionId::ViewRoutes,
                ActionId::CreateRoute,
                ActionId::UpdateRoute,
                ActionId::DeleteRoute,
                ActionId::ViewTeam,
                ActionId::ViewAnalysis,
            ],
            Role::Auditor => &[ActionId::ViewRoutes, ActionId::ViewTeam, ActionId::ViewAnalysis],
            Role::Driver => &[ActionId::ViewRoutes],
        };
        actions.iter().copied().collect()
    }

    pub fn is_permitted(role: Role, action: ActionId) -> bool {
        Self::permitted_actions(role).contains(&action)
    }

    pub fn route_scope(role: Role) -> RouteScope {
        match role {
            Role::Driver => RouteScope::OwnOnly,
            Role::Administrator | Role::Manager | Role::Auditor => RouteScope::All,
        }
    }

    /// Acciones permitidas para la sesión actual (vacío tras el logout)
    pub fn current_actions(&self) -> BTreeSet<ActionId> {
        self.session
            .role()
            .map(Self::permitted_actions)
            .unwrap_or_default()
    }

    /// Verificar que la sesión actual puede ejecutar una acción
    pub fn ensure(&self, action: ActionId) -> ConsoleResult<Role> {
        let role = self.session.role().ok_or(ConsoleError::SessionEnded)?;
        if Self::is_permitted(role, action) {
            Ok(role)
        } else {
            Err(forbidden_error(
                action.as_str(),
                &format!("role '{}' lacks this permission", role.as_str()),
            ))
        }
    }
}
