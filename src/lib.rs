//! Consola de administración de rutas
//!
//! Núcleo de la consola (traducción de enumeraciones, mapeo de rutas,
//! política de acceso, lista y flujos de mutación) y el BFF HTTP que la
//! expone a la UI.

pub mod api;
pub mod clients;
pub mod config;
pub mod controllers;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
