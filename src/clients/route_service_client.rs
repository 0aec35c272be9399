//! Cliente HTTP para el servicio de rutas
//!
//! Define el contrato asíncrono del servicio (CRUD + catálogo de estados)
//! y su implementación con reqwest.

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::models::catalog::EnumCatalogEntry;
use crate::models::route::{BackendRoute, BackendRouteRequest};
use crate::utils::errors::{ConsoleError, ConsoleResult};

/// Contrato del servicio remoto de rutas
#[async_trait]
pub trait RouteService: Send + Sync {
    async fn get_states(&self) -> ConsoleResult<Vec<EnumCatalogEntry>>;

    async fn get_all(&self) -> ConsoleResult<Vec<BackendRoute>>;

    async fn create(&self, request: &BackendRouteRequest) -> ConsoleResult<BackendRoute>;

    async fn update(&self, id: i32, request: &BackendRouteRequest) -> ConsoleResult<BackendRoute>;

    async fn delete(&self, id: i32) -> ConsoleResult<()>;
}

/// Crea un cliente del servicio con las credenciales de una sesión
pub trait RouteServiceConnector: Send + Sync {
    fn connect(&self, bearer_token: &str) -> Arc<dyn RouteService>;
}

/// Estado de ruta tal como lo devuelve /routes/estados
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EstadoRutaDto {
    id_estado: i32,
    nombre_estado: String,
}

impl From<EstadoRutaDto> for EnumCatalogEntry {
    fn from(dto: EstadoRutaDto) -> Self {
        EnumCatalogEntry::new(dto.id_estado, dto.nombre_estado)
    }
}

/// Cliente HTTP del servicio de rutas
#[derive(Clone)]
pub struct HttpRouteServiceClient {
    client: Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpRouteServiceClient {
    /// Crear cliente con timeout por request
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> ConsoleResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(network_error)?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        })
    }

    /// Copia del cliente que reenvía el token de la sesión
    pub fn with_token(&self, token: impl Into<String>) -> Self {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            bearer_token: Some(token.into()),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> ConsoleResult<Response> {
        let response = self.authorized(builder).send().await.map_err(network_error)?;
        check_status(response).await
    }
}

/// Convertir un error de transporte en NetworkError
fn network_error(error: reqwest::Error) -> ConsoleError {
    if error.is_timeout() {
        ConsoleError::Network("tiempo de espera agotado".to_string())
    } else {
        ConsoleError::Network(error.to_string())
    }
}

/// Mapear códigos HTTP del servicio a la taxonomía de errores
async fn check_status(response: Response) -> ConsoleResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = body.trim().trim_start_matches("Error:").trim().to_string();

    Err(match status {
        StatusCode::NOT_FOUND => ConsoleError::NotFound(message),
        StatusCode::FORBIDDEN => ConsoleError::Forbidden(message),
        StatusCode::UNAUTHORIZED => ConsoleError::Unauthorized(message),
        _ => ConsoleError::Server {
            status: status.as_u16(),
            message,
        },
    })
}

#[async_trait]
impl RouteService for HttpRouteServiceClient {
    async fn get_states(&self) -> ConsoleResult<Vec<EnumCatalogEntry>> {
        let url = self.url("/routes/estados");
        debug!("📡 GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let estados: Vec<EstadoRutaDto> = response.json().await.map_err(network_error)?;

        Ok(estados.into_iter().map(EnumCatalogEntry::from).collect())
    }

    async fn get_all(&self) -> ConsoleResult<Vec<BackendRoute>> {
        let url = self.url("/routes/get/all");
        debug!("📡 GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let routes: Vec<BackendRoute> = response.json().await.map_err(network_error)?;

        debug!("📊 Rutas recibidas: {}", routes.len());
        Ok(routes)
    }

    async fn create(&self, request: &BackendRouteRequest) -> ConsoleResult<BackendRoute> {
        let url = self.url("/routes/create");
        info!("📡 POST {}", url);

        let response = self.send(self.client.post(&url).json(request)).await?;
        response.json().await.map_err(network_error)
    }

    async fn update(&self, id: i32, request: &BackendRouteRequest) -> ConsoleResult<BackendRoute> {
        let url = self.url(&format!("/routes/update/{}", id));
        info!("📡 PUT {}", url);

        let response = self.send(self.client.put(&url).json(request)).await?;
        response.json().await.map_err(network_error)
    }

    async fn delete(&self, id: i32) -> ConsoleResult<()> {
        let url = self.url(&format!("/routes/delete/{}", id));
        info!("📡 DELETE {}", url);

        self.send(self.client.delete(&url)).await?;
        Ok(())
    }
}

impl RouteServiceConnector for HttpRouteServiceClient {
    fn connect(&self, bearer_token: &str) -> Arc<dyn RouteService> {
        Arc::new(self.with_token(bearer_token))
    }
}
