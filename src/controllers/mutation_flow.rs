//! Flujos de mutación de rutas
//!
//! Cada operación es una pequeña máquina de estados: buscar la ruta por su
//! identificador público, prepararla, confirmar/ejecutar y recargar la lista
//! completa para volver a la verdad del servidor.
//!
//! ```text
//! Idle → Searching → Found | NotFound → (Confirming) → Executing → Done | Failed
//! ```

use serde::Serialize;
use tracing::{error, info, warn};

use crate::controllers::route_list_controller::RouteListController;
use crate::models::notification::Notification;
use crate::models::route::{BackendRouteRequest, PublicRouteId, Route, RouteForm, RouteSummary};
use crate::services::access_policy::ActionId;
use crate::services::route_mapper::display_to_backend_request;
use crate::utils::errors::{route_not_found, ConsoleError, ConsoleResult};

/// Fase de un flujo de mutación
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowPhase {
    #[default]
    Idle,
    Searching,
    Found,
    NotFound,
    Confirming,
    Executing,
    Done,
    Failed,
}

/// Navegación externa que la UI debe realizar
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Navigation {
    EditRoute { public_id: String },
    RouteList,
}

impl Navigation {
    pub fn path(&self) -> String {
        match self {
            Navigation::EditRoute { public_id } => format!("/edit-route/{}", public_id),
            Navigation::RouteList => "/view-routes".to_string(),
        }
    }
}

/// Resultado de una mutación completada
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationReceipt {
    pub public_id: String,
    pub notification: Notification,
    /// Presente si la mutación se aplicó pero la recarga posterior falló
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reload_warning: Option<Notification>,
    pub navigation: Navigation,
}

/// Recargar la lista completa después de una mutación exitosa
async fn reload_after_mutation(
    list: &mut RouteListController,
    public_id: String,
    message: &str,
) -> MutationReceipt {
    let reload_warning = match list.load().await {
        Ok(()) => None,
        Err(e) => {
            warn!("⚠️ Mutación aplicada pero la recarga falló: {}", e);
            Some(e.notification())
        }
    };

    MutationReceipt {
        public_id,
        notification: Notification::success(message),
        reload_warning,
        navigation: Navigation::RouteList,
    }
}

/// Validar y traducir un formulario con el traductor de la lista
fn build_request(list: &RouteListController, form: &RouteForm) -> ConsoleResult<BackendRouteRequest> {
    display_to_backend_request(form, list.translator()?)
}

#[derive(Debug, Clone)]
struct StagedEdit {
    route_id: PublicRouteId,
    form: RouteForm,
}

/// Flujo de actualización: búsqueda local y envío desde la vista de edición
#[derive(Debug, Default)]
pub struct UpdateFlow {
    phase: FlowPhase,
    staged: Option<StagedEdit>,
}

impl UpdateFlow {
    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// Buscar la ruta en la lista en memoria (sin red) y navegar a su edición
    pub fn search(&mut self, list: &RouteListController, public_id: &str) -> ConsoleResult<Navigation> {
        list.policy().ensure(ActionId::UpdateRoute)?;
        self.phase = FlowPhase::Searching;

        match list.find(public_id) {
            Some(route) => {
                self.phase = FlowPhase::Found;
                let navigation = Navigation::EditRoute {
                    public_id: route.public_id.clone(),
                };
                info!("✏️ Ruta {} encontrada, navegando a {}", route.public_id, navigation.path());
                self.phase = FlowPhase::Idle;
                Ok(navigation)
            }
            None => {
                self.phase = FlowPhase::NotFound;
                warn!("🔍 Ruta '{}' no encontrada para actualizar", public_id);
                self.phase = FlowPhase::Idle;
                Err(route_not_found(public_id))
            }
        }
    }

    /// Enviar el formulario de edición de una ruta existente
    pub async fn submit(
        &mut self,
        list: &mut RouteListController,
        public_id: &str,
        form: RouteForm,
    ) -> ConsoleResult<MutationReceipt> {
        list.policy().ensure(ActionId::UpdateRoute)?;
        let route_id = PublicRouteId::parse(public_id.trim())?;
        if list.find(&route_id.to_string()).is_none() {
            return Err(route_not_found(public_id));
        }

        self.staged = Some(StagedEdit { route_id, form });
        self.execute(list).await
    }

    /// Reintentar la última edición fallida sin volver a escribir los datos
    pub async fn retry(&mut self, list: &mut RouteListController) -> ConsoleResult<MutationReceipt> {
        list.policy().ensure(ActionId::UpdateRoute)?;
        self.execute(list).await
    }

    async fn execute(&mut self, list: &mut RouteListController) -> ConsoleResult<MutationReceipt> {
        let staged = self.staged.clone().ok_or(ConsoleError::NothingStaged)?;

        let request = match build_request(list, &staged.form) {
            Ok(request) => request,
            Err(e) => {
                warn!("⚠️ Formulario de edición inválido: {}", e);
                self.phase = FlowPhase::Idle;
                self.staged = None;
                return Err(e);
            }
        };

        self.phase = FlowPhase::Executing;
        let service = list.service();
        match service.update(staged.route_id.backend_id(), &request).await {
            Ok(_) => {
                self.phase = FlowPhase::Done;
                self.staged = None;
                info!("✅ Ruta {} actualizada", staged.route_id);
                Ok(reload_after_mutation(list, staged.route_id.to_string(), "Ruta actualizada correctamente").await)
            }
            Err(e) => {
                self.phase = FlowPhase::Failed;
                error!("❌ Error al actualizar la ruta {}: {}", staged.route_id, e);
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.phase = FlowPhase::Idle;
        self.staged = None;
    }
}

/// Flujo de eliminación: buscar, confirmar y ejecutar
#[derive(Debug, Default)]
pub struct DeleteFlow {
    phase: FlowPhase,
    staged: Option<Route>,
}

impl DeleteFlow {
    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    /// Resumen de la ruta preparada para eliminar
    pub fn staged_summary(&self) -> Option<RouteSummary> {
        self.staged.as_ref().map(Route::summary)
    }

    /// Buscar la ruta en la lista en memoria y prepararla para confirmación
    pub fn search(&mut self, list: &RouteListController, public_id: &str) -> ConsoleResult<RouteSummary> {
        list.policy().ensure(ActionId::DeleteRoute)?;
        let previous = self.phase;
        self.phase = FlowPhase::Searching;

        match list.find(public_id) {
            Some(route) => {
                self.phase = FlowPhase::Found;
                let summary = route.summary();
                self.staged = Some(route.clone());
                self.phase = FlowPhase::Confirming;
                info!("🗑️ Ruta {} preparada para eliminar", summary.public_id);
                Ok(summary)
            }
            None => {
                self.phase = FlowPhase::NotFound;
                warn!("🔍 Ruta '{}' no encontrada para eliminar", public_id);
                self.phase = if self.staged.is_some() { previous } else { FlowPhase::Idle };
                Err(route_not_found(public_id))
            }
        }
    }

    /// Eliminar la ruta preparada y recargar la lista
    pub async fn confirm(&mut self, list: &mut RouteListController) -> ConsoleResult<MutationReceipt> {
        list.policy().ensure(ActionId::DeleteRoute)?;
        let route = self.staged.clone().ok_or(ConsoleError::NothingStaged)?;

        self.phase = FlowPhase::Executing;
        let route_id = match PublicRouteId::parse(&route.public_id) {
            Ok(route_id) => route_id,
            Err(e) => {
                self.phase = FlowPhase::Failed;
                error!("❌ Identificador de ruta inválido: {}", route.public_id);
                return Err(e);
            }
        };

        let service = list.service();
        match service.delete(route_id.backend_id()).await {
            Ok(()) => {
                self.phase = FlowPhase::Done;
                self.staged = None;
                info!("✅ Ruta {} eliminada", route.public_id);
                Ok(reload_after_mutation(list, route.public_id, "Ruta eliminada correctamente").await)
            }
            Err(e) => {
                self.phase = FlowPhase::Failed;
                error!("❌ Error al eliminar la ruta {}: {}", route.public_id, e);
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.phase = FlowPhase::Idle;
        self.staged = None;
    }
}

/// Flujo de creación de rutas
#[derive(Debug, Default)]
pub struct CreateFlow {
    phase: FlowPhase,
    staged: Option<RouteForm>,
}

impl CreateFlow {
    pub fn phase(&self) -> FlowPhase {
        self.phase
    }

    pub fn staged_form(&self) -> Option<&RouteForm> {
        self.staged.as_ref()
    }

    /// Validar, traducir y crear la ruta
    pub async fn submit(
        &mut self,
        list: &mut RouteListController,
        form: RouteForm,
    ) -> ConsoleResult<MutationReceipt> {
        list.policy().ensure(ActionId::CreateRoute)?;
        self.staged = Some(form);
        self.execute(list).await
    }

    /// Reintentar la última creación fallida con el formulario conservado
    pub async fn retry(&mut self, list: &mut RouteListController) -> ConsoleResult<MutationReceipt> {
        list.policy().ensure(ActionId::CreateRoute)?;
        self.execute(list).await
    }

    async fn execute(&mut self, list: &mut RouteListController) -> ConsoleResult<MutationReceipt> {
        let form = self.staged.clone().ok_or(ConsoleError::NothingStaged)?;

        let request = match build_request(list, &form) {
            Ok(request) => request,
            Err(e) => {
                warn!("⚠️ Formulario de creación inválido: {}", e);
                self.phase = FlowPhase::Idle;
                self.staged = None;
                return Err(e);
            }
        };

        self.phase = FlowPhase::Executing;
        let service = list.service();
        match service.create(&request).await {
            Ok(created) => {
                self.phase = FlowPhase::Done;
                self.staged = None;
                let public_id = PublicRouteId::from_backend(created.id_ruta).to_string();
                info!("✅ Ruta {} creada", public_id);
                Ok(reload_after_mutation(list, public_id, "La ruta ha sido registrada exitosamente").await)
            }
            Err(e) => {
                self.phase = FlowPhase::Failed;
                error!("❌ Error al crear la ruta: {}", e);
                Err(e)
            }
        }
    }

    pub fn cancel(&mut self) {
        self.phase = FlowPhase::Idle;
        self.staged = None;
    }
}
