use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use dotenvy::dotenv;

use route_console::api::create_api_router;
use route_console::clients::HttpRouteServiceClient;
use route_console::config::environment::EnvironmentConfig;
use route_console::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    // Configurar logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🚚 Consola de Rutas - BFF");
    info!("========================");

    let config = match EnvironmentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("❌ Configuración inválida: {}", e);
            return Err(e);
        }
    };

    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: se usará CORS permisivo");
    }

    // Cliente del servicio de rutas
    let client = HttpRouteServiceClient::new(config.route_service_url.clone(), config.route_service_timeout())?;
    info!("🔗 Servicio de rutas: {} (timeout {}s)", config.route_service_url, config.route_service_timeout_secs);

    let addr: SocketAddr = config.server_url().parse()?;
    let app = create_api_router(AppState::new(config, Arc::new(client)));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /health - Health check");
    info!("   GET  /api/console - Panel principal");
    info!("   POST /api/console/reload - Recargar rutas");
    info!("   GET  /api/console/routes - Listar rutas");
    info!("   POST /api/console/routes - Crear ruta");
    info!("   PUT  /api/console/routes/:public_id - Actualizar ruta");
    info!("   POST /api/console/update/search - Buscar ruta para actualizar");
    info!("   POST /api/console/delete/search - Buscar ruta para eliminar");
    info!("   POST /api/console/delete/confirm - Confirmar eliminación");
    info!("   POST /api/console/logout - Cerrar sesión");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
