//! # Errores del Servidor
//! src/error.rs
//!
//! Errores que pueden ocurrir fuera del ciclo de un request: al arrancar
//! (config, asset, bind) o dentro de un handler. Los errores de protocolo
//! viven en `http::request::ParseError` y `http::accumulator::HeadError`.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServerError {
    /// No se pudo leer la página de inicio
    #[error("cannot load asset {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No se pudo abrir el socket de escucha
    #[error("cannot bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    /// Un handler no pudo serializar su respuesta
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ServerError>;
