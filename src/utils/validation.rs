//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar los campos del
//! formulario de rutas y los identificadores públicos.

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use validator::ValidationError;

use crate::utils::errors::ConsoleError;

lazy_static! {
    /// Identificador público estricto: prefijo RUTA_ seguido solo de dígitos
    static ref PUBLIC_ROUTE_ID: Regex = Regex::new(r"^RUTA_([0-9]+)$").unwrap();
}

/// Validar que un string no esté vacío
pub fn validate_not_empty(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("not_empty");
        error.add_param("value".into(), &value.to_string());
        return Err(error);
    }
    Ok(())
}

/// Validar que una etiqueta obligatoria esté presente y no vacía
pub fn validate_required_label(value: Option<&str>) -> Result<&str, ValidationError> {
    match value {
        Some(label) => {
            validate_not_empty(label)?;
            Ok(label)
        }
        None => Err(ValidationError::new("required")),
    }
}

/// Validar que un valor sea estrictamente positivo (NaN no lo es)
pub fn validate_positive<T: PartialOrd + Default + Serialize>(
    value: T,
) -> Result<(), ValidationError> {
    if !(value > T::default()) {
        let mut error = ValidationError::new("positive");
        error.add_param("value".into(), &value);
        return Err(error);
    }
    Ok(())
}

/// Validar el formato RUTA_<dígitos> y devolver el id numérico del backend
pub fn validate_public_route_id(value: &str) -> Result<i32, ValidationError> {
    let invalid = || {
        let mut error = ValidationError::new("public_route_id");
        error.add_param("value".into(), &value.to_string());
        error.add_param("format".into(), &"RUTA_<digits>".to_string());
        error
    };

    let captures = PUBLIC_ROUTE_ID.captures(value).ok_or_else(invalid)?;
    captures[1].parse::<i32>().map_err(|_| invalid())
}

/// Convertir un error de validación en el error de la consola para un campo
pub fn field_error(field: &'static str, message: &str, error: ValidationError) -> ConsoleError {
    ConsoleError::Validation {
        field,
        message: error
            .message
            .map(|m| m.into_owned())
            .unwrap_or_else(|| message.to_string()),
    }
}
