//! Middleware del sistema
//! 
//! Sesión JWT y CORS.

pub mod cors;
pub mod session;

pub use cors::*;
pub use session::*;
