//! Servicio de rutas en memoria para las pruebas de integración
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use route_console::clients::{RouteService, RouteServiceConnector};
use route_console::models::catalog::EnumCatalogEntry;
use route_console::models::route::{BackendRoute, BackendRouteRequest};
use route_console::models::session::{Role, SessionContext, SessionUser};
use route_console::utils::errors::{ConsoleError, ConsoleResult};

pub const MANAGER_ID: &str = "900100200";
pub const DRIVER_ID: &str = "111";

pub fn state_catalog() -> Vec<EnumCatalogEntry> {
    vec![
        EnumCatalogEntry::new(1, "Pendiente"),
        EnumCatalogEntry::new(2, "Activa"),
        EnumCatalogEntry::new(3, "Completada"),
        EnumCatalogEntry::new(4, "En Proceso"),
    ]
}

pub fn backend_route(id: i32, driver: Option<&str>, estado: i32, trafico: i32, prioridad: i32) -> BackendRoute {
    BackendRoute {
        id_ruta: id,
        vehiculo_asociado: Some(format!("ABC{:03}", id)),
        conductor_asignado: driver.map(str::to_string),
        id_estado: estado,
        distancia_total: 10.0 + id as f64,
        tiempo_promedio: 30.0,
        id_trafico: trafico,
        prioridad,
    }
}

/// Cuatro rutas: dos del conductor 111, una del 222 y una sin asignar
pub fn sample_routes() -> Vec<BackendRoute> {
    vec![
        backend_route(1, Some(DRIVER_ID), 2, 3, 1),
        backend_route(2, Some("222"), 3, 1, 2),
        backend_route(3, None, 1, 2, 3),
        backend_route(7, Some(DRIVER_ID), 4, 4, 3),
    ]
}

pub fn session(id: &str, role: Role) -> SessionContext {
    SessionContext::start(SessionUser {
        id: id.to_string(),
        name: "Usuario Prueba".to_string(),
        role,
    })
}

/// Servicio falso que registra cada llamada y permite inyectar fallas
#[derive(Default)]
pub struct FakeRouteService {
    states: Mutex<Vec<EnumCatalogEntry>>,
    routes: Mutex<Vec<BackendRoute>>,
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<&'static str, ConsoleError>>,
    end_session_on_get_all: Mutex<Option<SessionContext>>,
}

impl FakeRouteService {
    pub fn new(routes: Vec<BackendRoute>) -> Arc<Self> {
        Arc::new(Self {
            states: Mutex::new(state_catalog()),
            routes: Mutex::new(routes),
            ..Self::default()
        })
    }

    pub fn fail(&self, operation: &'static str, error: ConsoleError) {
        self.failures.lock().unwrap().insert(operation, error);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failures.lock().unwrap().remove(operation);
    }

    /// Cerrar la sesión en medio de la carga de rutas
    pub fn end_session_during_get_all(&self, session: SessionContext) {
        *self.end_session_on_get_all.lock().unwrap() = Some(session);
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls().iter().filter(|call| call.starts_with(operation)).count()
    }

    pub fn stored_routes(&self) -> Vec<BackendRoute> {
        self.routes.lock().unwrap().clone()
    }

    fn record(&self, call: String, operation: &'static str) -> ConsoleResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failures.lock().unwrap().get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RouteService for FakeRouteService {
    async fn get_states(&self) -> ConsoleResult<Vec<EnumCatalogEntry>> {
        self.record("get_states".to_string(), "get_states")?;
        Ok(self.states.lock().unwrap().clone())
    }

    async fn get_all(&self) -> ConsoleResult<Vec<BackendRoute>> {
        if let Some(session) = self.end_session_on_get_all.lock().unwrap().take() {
            session.end();
        }
        self.record("get_all".to_string(), "get_all")?;
        Ok(self.routes.lock().unwrap().clone())
    }

    async fn create(&self, request: &BackendRouteRequest) -> ConsoleResult<BackendRoute> {
        self.record("create".to_string(), "create")?;
        let mut routes = self.routes.lock().unwrap();
        let next_id = routes.iter().map(|route| route.id_ruta).max().unwrap_or(0) + 1;
        let created = request.clone().into_route(next_id);
        routes.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: i32, request: &BackendRouteRequest) -> ConsoleResult<BackendRoute> {
        self.record(format!("update:{}", id), "update")?;
        let mut routes = self.routes.lock().unwrap();
        let route = routes
            .iter_mut()
            .find(|route| route.id_ruta == id)
            .ok_or_else(|| ConsoleError::NotFound(format!("Ruta {} no encontrada", id)))?;
        *route = request.clone().into_route(id);
        Ok(route.clone())
    }

    async fn delete(&self, id: i32) -> ConsoleResult<()> {
        self.record(format!("delete:{}", id), "delete")?;
        let mut routes = self.routes.lock().unwrap();
        let before = routes.len();
        routes.retain(|route| route.id_ruta != id);
        if routes.len() == before {
            return Err(ConsoleError::NotFound(format!("Ruta {} no encontrada", id)));
        }
        Ok(())
    }
}

/// Conector que entrega siempre el mismo servicio falso
pub struct FakeConnector {
    pub service: Arc<FakeRouteService>,
    pub tokens: Mutex<Vec<String>>,
}

impl FakeConnector {
    pub fn new(service: Arc<FakeRouteService>) -> Arc<Self> {
        Arc::new(Self {
            service,
            tokens: Mutex::new(Vec::new()),
        })
    }
}

impl RouteServiceConnector for FakeConnector {
    fn connect(&self, bearer_token: &str) -> Arc<dyn RouteService> {
        self.tokens.lock().unwrap().push(bearer_token.to_string());
        self.service.clone()
    }
}
