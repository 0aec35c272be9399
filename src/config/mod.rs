//! Configuración del proyecto
//! 
//! Variables de entorno del servidor y del servicio de rutas.

pub mod environment;

pub use environment::*;
