use serde::{Deserialize, Serialize};

use crate::controllers::console_session::DashboardSnapshot;
use crate::controllers::mutation_flow::{FlowPhase, MutationReceipt, Navigation};
use crate::models::notification::Notification;
use crate::models::route::{Route, RouteSummary};
use crate::models::session::SessionUser;
use crate::services::access_policy::ActionId;

// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            notification: None,
            data: Some(data),
        }
    }

    pub fn success_with_notification(data: T, notification: Notification) -> Self {
        Self {
            success: true,
            notification: Some(notification),
            data: Some(data),
        }
    }
}

// Request de búsqueda por identificador público
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    pub public_id: String,
}

// Conteos del panel
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteCounts {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

// Fases actuales de los flujos
#[derive(Debug, Serialize)]
pub struct FlowPhases {
    pub update: FlowPhase,
    pub delete: FlowPhase,
    pub create: FlowPhase,
}

// Response del panel principal
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub user: SessionUser,
    pub actions: Vec<ActionId>,
    pub list_status: &'static str,
    pub counts: RouteCounts,
    pub flows: FlowPhases,
}

impl DashboardResponse {
    pub fn new(user: SessionUser, snapshot: DashboardSnapshot) -> Self {
        Self {
            user,
            actions: snapshot.actions.into_iter().collect(),
            list_status: snapshot.list_status,
            counts: RouteCounts {
                total: snapshot.total_routes,
                active: snapshot.active_routes,
                completed: snapshot.completed_routes,
            },
            flows: FlowPhases {
                update: snapshot.update_phase,
                delete: snapshot.delete_phase,
                create: snapshot.create_phase,
            },
        }
    }
}

// Response de la lista de rutas
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutesResponse {
    pub status: &'static str,
    pub routes: Vec<Route>,
    pub counts: RouteCounts,
}

// Response de búsqueda para actualizar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationResponse {
    pub path: String,
    pub navigation: Navigation,
}

impl From<Navigation> for NavigationResponse {
    fn from(navigation: Navigation) -> Self {
        Self {
            path: navigation.path(),
            navigation,
        }
    }
}

// Response de búsqueda para eliminar
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteStagedResponse {
    pub phase: FlowPhase,
    pub route: RouteSummary,
}

// Response de una mutación completada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResponse {
    pub receipt: MutationReceipt,
    pub path: String,
}

impl From<MutationReceipt> for MutationResponse {
    fn from(receipt: MutationReceipt) -> Self {
        Self {
            path: receipt.navigation.path(),
            receipt,
        }
    }
}
