//! Clients - HTTP Clients for External APIs
//! 
//! This module contains the HTTP client for the route service.

pub mod route_service_client;

// Re-export main types for convenience
pub use route_service_client::{HttpRouteServiceClient, RouteService, RouteServiceConnector};
