//! Catálogos de códigos de rutas
//!
//! Define los dominios codificados (estado, tráfico, prioridad) y las
//! entradas de catálogo con las que se construye el traductor.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dominios codificados del backend de rutas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumDomain {
    State,
    Traffic,
    Priority,
}

impl EnumDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnumDomain::State => "state",
            EnumDomain::Traffic => "traffic",
            EnumDomain::Priority => "priority",
        }
    }
}

impl fmt::Display for EnumDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Entrada de catálogo: código numérico y etiqueta legible
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumCatalogEntry {
    pub id: i32,
    pub label: String,
}

impl EnumCatalogEntry {
    pub fn new(id: i32, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Niveles de tráfico fijos (tbl_tipo_trafico)
pub const TRAFFIC_CATALOG: [(i32, &str); 4] = [
    (1, "Bajo"),
    (2, "Moderado"),
    (3, "Alto"),
    (4, "Muy Alto"),
];

/// Prioridades fijas de ruta
pub const PRIORITY_CATALOG: [(i32, &str); 3] = [
    (1, "Baja"),
    (2, "Media"),
    (3, "Alta"),
];

pub fn traffic_catalog() -> Vec<EnumCatalogEntry> {
    TRAFFIC_CATALOG
        .iter()
        .map(|(id, label)| EnumCatalogEntry::new(*id, *label))
        .collect()
}

pub fn priority_catalog() -> Vec<EnumCatalogEntry> {
    PRIORITY_CATALOG
        .iter()
        .map(|(id, label)| EnumCatalogEntry::new(*id, *label))
        .collect()
}
