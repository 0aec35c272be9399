//! Controlador de la lista de rutas
//!
//! Dueño de la lista en memoria de la sesión: carga (catálogo de estados y
//! luego rutas), filtro por conductor y conteos derivados.

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::clients::route_service_client::RouteService;
use crate::models::route::{BackendRoute, Route};
use crate::models::session::SessionContext;
use crate::services::access_policy::{AccessPolicy, RouteScope};
use crate::services::enum_translator::EnumTranslator;
use crate::services::route_mapper::backend_to_display;
use crate::utils::errors::{ConsoleError, ConsoleResult};

/// Etiquetas tratadas como "activa" (el backend nombra el mismo estado de
/// varias formas)
pub const ACTIVE_STATE_SYNONYMS: [&str; 4] = ["Activa", "EN_TRÁNSITO", "En Tránsito", "En Proceso"];

pub const COMPLETED_STATE_SYNONYMS: [&str; 1] = ["Completada"];

/// Estado lógico usado para los conteos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalStatus {
    Active,
    Completed,
}

/// Conjuntos de sinónimos por estado lógico
#[derive(Debug, Clone)]
pub struct StatusSynonyms {
    active: &'static [&'static str],
    completed: &'static [&'static str],
}

impl Default for StatusSynonyms {
    fn default() -> Self {
        Self {
            active: &ACTIVE_STATE_SYNONYMS,
            completed: &COMPLETED_STATE_SYNONYMS,
        }
    }
}

impl StatusSynonyms {
    pub fn classify(&self, label: &str) -> Option<LogicalStatus> {
        if self.active.contains(&label) {
            Some(LogicalStatus::Active)
        } else if self.completed.contains(&label) {
            Some(LogicalStatus::Completed)
        } else {
            None
        }
    }
}

/// Estado de la lista
#[derive(Debug, Clone, PartialEq)]
pub enum ListState {
    NotLoaded,
    Loading,
    Loaded(Vec<Route>),
    Failed(ConsoleError),
}

impl ListState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListState::NotLoaded => "not_loaded",
            ListState::Loading => "loading",
            ListState::Loaded(_) => "loaded",
            ListState::Failed(_) => "failed",
        }
    }
}

pub struct RouteListController {
    service: Arc<dyn RouteService>,
    session: SessionContext,
    policy: AccessPolicy,
    translator: Option<EnumTranslator>,
    state: ListState,
    synonyms: StatusSynonyms,
}

impl RouteListController {
    pub fn new(service: Arc<dyn RouteService>, session: SessionContext) -> Self {
        Self {
            service,
            policy: AccessPolicy::new(session.clone()),
            session,
            translator: None,
            state: ListState::NotLoaded,
            synonyms: StatusSynonyms::default(),
        }
    }

    /// Cargar catálogo de estados y rutas, reemplazando la lista completa.
    ///
    /// Si falla cualquiera de las dos llamadas, la lista anterior se descarta y
    /// queda en estado `Failed`. Si la sesión terminó mientras la carga estaba
    /// en curso, el resultado se descarta.
    pub async fn load(&mut self) -> ConsoleResult<()> {
        let user = self
            .session
            .current_user()
            .cloned()
            .ok_or(ConsoleError::SessionEnded)?;

        self.state = ListState::Loading;
        info!("🔄 Cargando rutas para {} ({})", user.id, user.role.as_str());

        let fetched = self.service.get_states().await;
        let states = match fetched {
            Ok(states) => states,
            Err(e) => return self.fail(e),
        };
        let translator = match EnumTranslator::build(&states) {
            Ok(translator) => translator,
            Err(e) => return self.fail(e),
        };
        if !self.session.is_active() {
            return self.discard();
        }
        self.translator = Some(translator);

        let fetched = self.service.get_all().await;
        let backend_routes = match fetched {
            Ok(routes) => routes,
            Err(e) => return self.fail(e),
        };
        if !self.session.is_active() {
            return self.discard();
        }

        let hydrated = self.hydrate(&backend_routes);
        let mut routes = match hydrated {
            Ok(routes) => routes,
            Err(e) => return self.fail(e),
        };

        if AccessPolicy::route_scope(user.role) == RouteScope::OwnOnly {
            routes.retain(|route| route.is_assigned_to(&user.id));
        }

        info!("✅ {} rutas cargadas", routes.len());
        self.state = ListState::Loaded(routes);
        Ok(())
    }

    /// Primera carga perezosa: solo carga si la lista nunca se cargó
    pub async fn ensure_loaded(&mut self) -> ConsoleResult<()> {
        match self.state {
            ListState::NotLoaded => self.load().await,
            _ => Ok(()),
        }
    }

    fn hydrate(&self, backend_routes: &[BackendRoute]) -> ConsoleResult<Vec<Route>> {
        let translator = self.translator()?;
        backend_routes
            .iter()
            .map(|record| backend_to_display(record, translator))
            .collect()
    }

    fn fail(&mut self, error: ConsoleError) -> ConsoleResult<()> {
        if !self.session.is_active() {
            return self.discard();
        }
        error!("❌ Error al cargar rutas: {}", error);
        self.state = ListState::Failed(error.clone());
        Err(error)
    }

    fn discard(&self) -> ConsoleResult<()> {
        warn!("🛑 Sesión finalizada durante la carga, resultado descartado");
        Err(ConsoleError::SessionEnded)
    }

    pub fn state(&self) -> &ListState {
        &self.state
    }

    /// Rutas visibles (vacío si la lista no está cargada)
    pub fn routes(&self) -> &[Route] {
        match &self.state {
            ListState::Loaded(routes) => routes,
            _ => &[],
        }
    }

    /// Buscar por identificador público en la lista en memoria
    pub fn find(&self, public_id: &str) -> Option<&Route> {
        let public_id = public_id.trim();
        self.routes().iter().find(|route| route.public_id == public_id)
    }

    pub fn translator(&self) -> ConsoleResult<&EnumTranslator> {
        self.translator.as_ref().ok_or(ConsoleError::TranslatorNotReady)
    }

    pub fn active_count(&self) -> usize {
        self.count(LogicalStatus::Active)
    }

    pub fn completed_count(&self) -> usize {
        self.count(LogicalStatus::Completed)
    }

    fn count(&self, status: LogicalStatus) -> usize {
        self.routes()
            .iter()
            .filter(|route| self.synonyms.classify(&route.state) == Some(status))
            .count()
    }

    pub fn service(&self) -> Arc<dyn RouteService> {
        Arc::clone(&self.service)
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn policy(&self) -> &AccessPolicy {
        &self.policy
    }
}
