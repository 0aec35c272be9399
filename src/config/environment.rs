//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;

/// Timeout por defecto de las llamadas al servicio de rutas (segundos)
pub const DEFAULT_ROUTE_SERVICE_TIMEOUT_SECS: u64 = 30;

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub port: u16,
    pub host: String,
    pub jwt_secret: String,
    pub cors_origins: Vec<String>,
    // Servicio de rutas
    pub route_service_url: String,
    pub route_service_timeout_secs: u64,
}

impl EnvironmentConfig {
    /// Cargar la configuración desde las variables de entorno
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Cargar la configuración con una fuente de variables arbitraria
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(port) => port.parse().context("PORT must be a valid number")?,
            None => 3000,
        };

        let route_service_timeout_secs = match var("ROUTE_SERVICE_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .context("ROUTE_SERVICE_TIMEOUT_SECS must be a valid number")?,
            None => DEFAULT_ROUTE_SERVICE_TIMEOUT_SECS,
        };

        Ok(Self {
            environment: var("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            port,
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            jwt_secret: var("JWT_SECRET").ok_or_else(|| anyhow!("JWT_SECRET must be set"))?,
            cors_origins: var("CORS_ORIGINS")
                .map(|origins| {
                    origins
                        .split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
            route_service_url: var("ROUTE_SERVICE_URL")
                .ok_or_else(|| anyhow!("ROUTE_SERVICE_URL must be set"))?,
            route_service_timeout_secs,
        })
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Verificar si estamos en modo producción
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// Obtener la URL del servidor
    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn route_service_timeout(&self) -> Duration {
        Duration::from_secs(self.route_service_timeout_secs)
    }
}
