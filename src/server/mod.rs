//! # Módulo del Servidor HTTP
//! src/server/mod.rs
//!
//! Este módulo implementa:
//! 1. El orquestador de un request (`handler`): bytes crudos → bytes de respuesta
//! 2. El servidor TCP (`tcp`): escucha, acepta una conexión a la vez,
//!    delega en el orquestador y cierra

pub mod handler;
pub mod tcp;

// Re-exportar para facilitar el uso
pub use handler::{CloseReason, Outcome, RequestHandler};
pub use tcp::Server;
