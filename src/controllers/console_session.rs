use std::collections::BTreeSet;
use std::sync::Arc;

use crate::clients::route_service_client::RouteService;
use crate::controllers::mutation_flow::{CreateFlow, DeleteFlow, FlowPhase, UpdateFlow};
use crate::controllers::route_list_controller::RouteListController;
use crate::models::session::SessionContext;
use crate::services::access_policy::ActionId;

/// Consola de una sesión: la lista de rutas y sus tres flujos de mutación
pub struct ConsoleSession {
    pub list: RouteListController,
    pub update: UpdateFlow,
    pub delete: DeleteFlow,
    pub create: CreateFlow,
}

/// Instantánea del panel principal
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    pub actions: BTreeSet<ActionId>,
    pub list_status: &'static str,
    pub total_routes: usize,
    pub active_routes: usize,
    pub completed_routes: usize,
    pub update_phase: FlowPhase,
    pub delete_phase: FlowPhase,
    pub create_phase: FlowPhase,
}

impl ConsoleSession {
    pub fn new(service: Arc<dyn RouteService>, session: SessionContext) -> Self {
        Self {
            list: RouteListController::new(service, session),
            update: UpdateFlow::default(),
            delete: DeleteFlow::default(),
            create: CreateFlow::default(),
        }
    }

    pub fn dashboard(&self) -> DashboardSnapshot {
        DashboardSnapshot {
            actions: self.list.policy().current_actions(),
            list_status: self.list.state().as_str(),
            total_routes: self.list.routes().len(),
            active_routes: self.list.active_count(),
            completed_routes: self.list.completed_count(),
            update_phase: self.update.phase(),
            delete_phase: self.delete.phase(),
            create_phase: self.create.phase(),
        }
    }

    /// Cerrar la sesión: los resultados en vuelo se descartan
    pub fn end(&mut self) {
        self.list.session().end();
        self.update.cancel();
        self.delete.cancel();
        self.create.cancel();
    }
}
