//! Modelo de Ruta
//!
//! Este módulo contiene la ruta en sus dos formas: la forma del backend
//! (códigos numéricos, tabla tbl_rutas) y la forma de presentación
//! (etiquetas legibles e identificador público RUTA_xxx).

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::errors::{ConsoleError, ConsoleResult};
use crate::utils::validation::validate_public_route_id;

/// Prefijo de los identificadores públicos
pub const PUBLIC_ID_PREFIX: &str = "RUTA_";

/// Identificador público de ruta ("RUTA_" + secuencia de 3 dígitos)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PublicRouteId(i32);

impl PublicRouteId {
    pub fn from_backend(id: i32) -> Self {
        Self(id)
    }

    /// Parsear un identificador escrito por el usuario (formato estricto)
    pub fn parse(value: &str) -> ConsoleResult<Self> {
        validate_public_route_id(value)
            .map(Self)
            .map_err(|_| ConsoleError::InvalidIdentifier(value.to_string()))
    }

    pub fn backend_id(&self) -> i32 {
        self.0
    }
}

impl fmt::Display for PublicRouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", PUBLIC_ID_PREFIX, self.0)
    }
}

/// Ruta tal como la devuelve el servicio (entidad tbl_rutas)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRoute {
    pub id_ruta: i32,
    #[serde(default)]
    pub vehiculo_asociado: Option<String>,
    #[serde(default)]
    pub conductor_asignado: Option<String>,
    pub id_estado: i32,
    pub distancia_total: f64,
    pub tiempo_promedio: f64,
    pub id_trafico: i32,
    pub prioridad: i32,
}

/// Request para crear o actualizar una ruta en el servicio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackendRouteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehiculo_asociado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conductor_asignado: Option<String>,
    pub id_estado: i32,
    pub distancia_total: f64,
    pub tiempo_promedio: f64,
    pub id_trafico: i32,
    pub prioridad: i32,
}

impl BackendRouteRequest {
    /// Ruta resultante de aplicar este request a un id dado
    pub fn into_route(self, id_ruta: i32) -> BackendRoute {
        BackendRoute {
            id_ruta,
            vehiculo_asociado: self.vehiculo_asociado,
            conductor_asignado: self.conductor_asignado,
            id_estado: self.id_estado,
            distancia_total: self.distancia_total,
            tiempo_promedio: self.tiempo_promedio,
            id_trafico: self.id_trafico,
            prioridad: self.prioridad,
        }
    }
}

/// Conductor asignado a una ruta
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignedDriver {
    /// Cédula del conductor
    pub id: String,
    pub name: String,
}

/// Ruta en forma de presentación
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub public_id: String,
    pub distance_total_km: f64,
    pub avg_time_minutes: u32,
    pub avg_traffic: String,
    pub priority: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_vehicle_plate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_driver: Option<AssignedDriver>,
}

impl Route {
    /// Resumen mostrado antes de confirmar una eliminación
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            public_id: self.public_id.clone(),
            distance_total_km: self.distance_total_km,
            state: self.state.clone(),
            priority: self.priority.clone(),
            driver: self.assigned_driver.as_ref().map(|driver| {
                if driver.name.trim().is_empty() {
                    driver.id.clone()
                } else {
                    driver.name.clone()
                }
            }),
        }
    }

    pub fn is_assigned_to(&self, driver_id: &str) -> bool {
        self.assigned_driver
            .as_ref()
            .map_or(false, |driver| driver.id == driver_id)
    }
}

/// Resumen de la ruta preparada para eliminar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteSummary {
    pub public_id: String,
    pub distance_total_km: f64,
    pub state: String,
    pub priority: String,
    pub driver: Option<String>,
}

/// Estado del formulario de creación/edición
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RouteForm {
    pub state: Option<String>,
    pub avg_traffic: Option<String>,
    pub priority: Option<String>,
    pub distance_total_km: Option<f64>,
    pub avg_time_minutes: Option<i64>,
    pub vehicle_plate: Option<String>,
    pub driver_id: Option<String>,
}

impl RouteForm {
    /// Formulario inicial de la vista de creación
    pub fn for_create() -> Self {
        Self {
            state: Some("Pendiente".to_string()),
            ..Self::default()
        }
    }

    /// Formulario de edición precargado con una ruta existente
    pub fn from_route(route: &Route) -> Self {
        Self {
            state: Some(route.state.clone()),
            avg_traffic: Some(route.avg_traffic.clone()),
            priority: Some(route.priority.clone()),
            distance_total_km: Some(route.distance_total_km),
            avg_time_minutes: Some(i64::from(route.avg_time_minutes)),
            vehicle_plate: route.assigned_vehicle_plate.clone(),
            driver_id: route.assigned_driver.as_ref().map(|d| d.id.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_id_format() {
        assert_eq!(PublicRouteId::from_backend(7).to_string(), "RUTA_007");
        assert_eq!(PublicRouteId::from_backend(42).to_string(), "RUTA_042");
        assert_eq!(PublicRouteId::from_backend(1234).to_string(), "RUTA_1234");
    }

    #[test]
    fn test_public_id_parse() {
        assert_eq!(PublicRouteId::parse("RUTA_007").unwrap().backend_id(), 7);
        assert_eq!(
            PublicRouteId::parse("RUTA_7").unwrap(),
            PublicRouteId::from_backend(7)
        );
        assert_eq!(
            PublicRouteId::parse("ruta-7"),
            Err(ConsoleError::InvalidIdentifier("ruta-7".to_string()))
        );
    }

    #[test]
    fn test_backend_route_wire_format() {
        let json = r#"{
            "idRuta": 7,
            "vehiculoAsociado": "ABC123",
            "conductorAsignado": "1020304050",
            "idEstado": 2,
            "distanciaTotal": 15.5,
            "tiempoPromedio": 40.0,
            "idTrafico": 3,
            "prioridad": 1
        }"#;

        let route: BackendRoute = serde_json::from_str(json).unwrap();
        assert_eq!(route.id_ruta, 7);
        assert_eq!(route.vehiculo_asociado.as_deref(), Some("ABC123"));
        assert_eq!(route.conductor_asignado.as_deref(), Some("1020304050"));
        assert_eq!(route.prioridad, 1);
    }

    #[test]
    fn test_request_skips_empty_references() {
        let request = BackendRouteRequest {
            vehiculo_asociado: None,
            conductor_asignado: None,
            id_estado: 1,
            distancia_total: 10.0,
            tiempo_promedio: 30.0,
            id_trafico: 2,
            prioridad: 3,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("vehiculoAsociado").is_none());
        assert!(json.get("conductorAsignado").is_none());
        assert_eq!(json["idEstado"], 1);
    }

    #[test]
    fn test_summary_prefers_driver_name() {
        let mut route = Route {
            public_id: "RUTA_003".to_string(),
            distance_total_km: 8.0,
            avg_time_minutes: 20,
            avg_traffic: "Bajo".to_string(),
            priority: "Media".to_string(),
            state: "Activa".to_string(),
            assigned_vehicle_plate: None,
            assigned_driver: Some(AssignedDriver {
                id: "55".to_string(),
                name: String::new(),
            }),
        };
        assert_eq!(route.summary().driver.as_deref(), Some("55"));

        route.assigned_driver = Some(AssignedDriver {
            id: "55".to_string(),
            name: "Laura Gómez".to_string(),
        });
        assert_eq!(route.summary().driver.as_deref(), Some("Laura Gómez"));
    }
}
