//! Traductor de códigos del backend
//!
//! Construye los mapas directo (id → etiqueta) e inverso (etiqueta → id)
//! para los tres dominios codificados de una ruta.

use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::models::catalog::{priority_catalog, traffic_catalog, EnumCatalogEntry, EnumDomain};
use crate::utils::errors::{ConsoleError, ConsoleResult};

/// Mapas de un dominio
#[derive(Debug, Clone)]
pub struct DomainMap {
    domain: EnumDomain,
    forward: HashMap<i32, String>,
    inverse: HashMap<String, i32>,
    /// Etiquetas repetidas con ids distintos: su búsqueda inversa falla
    ambiguous: HashSet<String>,
    /// Ids en el orden del catálogo
    order: Vec<i32>,
}

fn normalize_label(label: &str) -> &str {
    label.trim()
}

impl DomainMap {
    /// Construir ambos mapas en una sola pasada
    pub fn build(domain: EnumDomain, catalog: &[EnumCatalogEntry]) -> ConsoleResult<Self> {
        let mut map = Self {
            domain,
            forward: HashMap::with_capacity(catalog.len()),
            inverse: HashMap::with_capacity(catalog.len()),
            ambiguous: HashSet::new(),
            order: Vec::with_capacity(catalog.len()),
        };

        for entry in catalog {
            if map.forward.insert(entry.id, entry.label.clone()).is_some() {
                return Err(ConsoleError::DuplicateCode {
                    domain,
                    code: entry.id,
                });
            }
            map.order.push(entry.id);

            let key = normalize_label(&entry.label).to_string();
            if map.ambiguous.contains(&key) {
                continue;
            }
            if map.inverse.insert(key.clone(), entry.id).is_some() {
                warn!("⚠️ Etiqueta '{}' repetida en el catálogo de {}", key, domain);
                map.inverse.remove(&key);
                map.ambiguous.insert(key);
            }
        }

        debug!("📚 Catálogo {} construido con {} entradas", domain, map.order.len());
        Ok(map)
    }

    pub fn domain(&self) -> EnumDomain {
        self.domain
    }

    pub fn label(&self, id: i32) -> ConsoleResult<&str> {
        self.forward
            .get(&id)
            .map(String::as_str)
            .ok_or(ConsoleError::UnknownCode {
                domain: self.domain,
                code: id,
            })
    }

    pub fn id(&self, label: &str) -> ConsoleResult<i32> {
        let key = normalize_label(label);
        if self.ambiguous.contains(key) {
            return Err(ConsoleError::AmbiguousLabel {
                domain: self.domain,
                label: key.to_string(),
            });
        }
        self.inverse
            .get(key)
            .copied()
            .ok_or_else(|| ConsoleError::UnknownLabel {
                domain: self.domain,
                label: label.to_string(),
            })
    }

    /// Etiquetas en el orden del catálogo (opciones de los selectores)
    pub fn labels(&self) -> Vec<&str> {
        self.order
            .iter()
            .filter_map(|id| self.forward.get(id).map(String::as_str))
            .collect()
    }
}

/// Traductor de los tres dominios codificados
#[derive(Debug, Clone)]
pub struct EnumTranslator {
    state: DomainMap,
    traffic: DomainMap,
    priority: DomainMap,
}

impl EnumTranslator {
    /// Construir el traductor a partir del catálogo de estados del servicio.
    /// Tráfico y prioridad usan los catálogos fijos.
    pub fn build(state_catalog: &[EnumCatalogEntry]) -> ConsoleResult<Self> {
        Ok(Self {
            state: DomainMap::build(EnumDomain::State, state_catalog)?,
            traffic: DomainMap::build(EnumDomain::Traffic, &traffic_catalog())?,
            priority: DomainMap::build(EnumDomain::Priority, &priority_catalog())?,
        })
    }

    pub fn domain(&self, domain: EnumDomain) -> &DomainMap {
        match domain {
            EnumDomain::State => &self.state,
            EnumDomain::Traffic => &self.traffic,
            EnumDomain::Priority => &self.priority,
        }
    }

    pub fn to_label(&self, domain: EnumDomain, id: i32) -> ConsoleResult<&str> {
        self.domain(domain).label(id)
    }

    pub fn to_id(&self, domain: EnumDomain, label: &str) -> ConsoleResult<i32> {
        self.domain(domain).id(label)
    }
}
