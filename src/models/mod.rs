//! Modelos del sistema
//! 
//! Rutas (forma del backend y de presentación), catálogos de enumeraciones,
//! sesión y notificaciones.

pub mod catalog;
pub mod notification;
pub mod route;
pub mod session;
