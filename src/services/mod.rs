//! Services module
//! 
//! Este módulo contiene la lógica de negocio de la consola: traducción de
//! enumeraciones, mapeo de rutas y política de acceso por rol.

pub mod access_policy;
pub mod enum_translator;
pub mod route_mapper;

pub use access_policy::*;
pub use enum_translator::*;
