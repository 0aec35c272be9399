//! Mapeo entre la ruta del backend y la ruta de presentación

use crate::models::catalog::EnumDomain;
use crate::models::route::{AssignedDriver, BackendRoute, BackendRouteRequest, PublicRouteId, Route, RouteForm};
use crate::services::enum_translator::EnumTranslator;
use crate::utils::errors::ConsoleResult;
use crate::utils::validation::{field_error, validate_positive, validate_required_label};

/// Referencia opcional: solo se envía si no queda vacía tras recortar
fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Convertir una ruta del backend a su forma de presentación
pub fn backend_to_display(record: &BackendRoute, translator: &EnumTranslator) -> ConsoleResult<Route> {
    let state = translator.to_label(EnumDomain::State, record.id_estado)?;
    let avg_traffic = translator.to_label(EnumDomain::Traffic, record.id_trafico)?;
    let priority = translator.to_label(EnumDomain::Priority, record.prioridad)?;

    Ok(Route {
        public_id: PublicRouteId::from_backend(record.id_ruta).to_string(),
        distance_total_km: record.distancia_total,
        avg_time_minutes: record.tiempo_promedio.round().max(0.0) as u32,
        avg_traffic: avg_traffic.to_string(),
        priority: priority.to_string(),
        state: state.to_string(),
        assigned_vehicle_plate: non_empty(record.vehiculo_asociado.as_deref()),
        assigned_driver: non_empty(record.conductor_asignado.as_deref()).map(|id| AssignedDriver {
            id,
            name: String::new(),
        }),
    })
}

/// Convertir el formulario en un request para el servicio.
///
/// Valida en orden `state`, `avgTraffic`, `priority`, `distanceTotalKm`,
/// `avgTimeMinutes` antes de traducir; el primer campo inválido corta.
pub fn display_to_backend_request(
    form: &RouteForm,
    translator: &EnumTranslator,
) -> ConsoleResult<BackendRouteRequest> {
    let state = validate_required_label(form.state.as_deref())
        .map_err(|e| field_error("state", "El estado de la ruta es obligatorio", e))?;
    let avg_traffic = validate_required_label(form.avg_traffic.as_deref())
        .map_err(|e| field_error("avgTraffic", "El tráfico promedio es obligatorio", e))?;
    let priority = validate_required_label(form.priority.as_deref())
        .map_err(|e| field_error("priority", "La prioridad es obligatoria", e))?;

    let distance = form.distance_total_km.unwrap_or(0.0);
    validate_positive(distance)
        .map_err(|e| field_error("distanceTotalKm", "La distancia total debe ser mayor a 0", e))?;

    let minutes = form.avg_time_minutes.unwrap_or(0);
    validate_positive(minutes)
        .map_err(|e| field_error("avgTimeMinutes", "El tiempo promedio debe ser mayor a 0", e))?;

    Ok(BackendRouteRequest {
        vehiculo_asociado: non_empty(form.vehicle_plate.as_deref()),
        conductor_asignado: non_empty(form.driver_id.as_deref()),
        id_estado: translator.to_id(EnumDomain::State, state)?,
        distancia_total: distance,
        tiempo_promedio: minutes as f64,
        id_trafico: translator.to_id(EnumDomain::Traffic, avg_traffic)?,
        prioridad: translator.to_id(EnumDomain::Priority, priority)?,
    })
}
