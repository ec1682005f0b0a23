//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración por argumentos CLI y variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./tiny_http_server --port 8080 --index ./public/index.html --read-timeout 10
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_PORT=8080 HTTP_HOST=127.0.0.1 ./tiny_http_server
//! ```

use std::time::Duration;

use clap::Parser;

use crate::error::{Result, ServerError};
use crate::http::accumulator::{DEFAULT_MAX_HEAD_BYTES, DEFAULT_READ_CHUNK, HEADER_TERMINATOR};

/// Configuración del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "tiny_http_server")]
#[command(about = "Servidor HTTP/1.1 mínimo: una conexión a la vez, solo GET")]
#[command(version)]
pub struct Config {
    /// Host/IP en el que escucha
    #[arg(long, default_value = "0.0.0.0", env = "HTTP_HOST")]
    pub host: String,

    /// Puerto en el que escucha el servidor (0 = efímero)
    #[arg(short, long, default_value = "5073", env = "HTTP_PORT")]
    pub port: u16,

    /// Archivo servido en `/` y `/index.html`
    #[arg(long = "index", default_value = "index.html", env = "INDEX_PATH")]
    pub index_path: String,

    /// Segundos máximos de espera en cada lectura del socket
    #[arg(long = "read-timeout", default_value = "5", env = "READ_TIMEOUT_SECS")]
    pub read_timeout_secs: u64,

    /// Límite del head del request en bytes
    #[arg(long = "max-header-bytes", default_value_t = DEFAULT_MAX_HEAD_BYTES, env = "MAX_HEADER_BYTES")]
    pub max_header_bytes: usize,

    /// Bytes pedidos en cada `read()`
    #[arg(long = "read-chunk", default_value_t = DEFAULT_READ_CHUNK, env = "READ_CHUNK_BYTES")]
    pub read_chunk_bytes: usize,

    /// No intentar SO_REUSEPORT al abrir el socket
    #[arg(long = "no-reuse-port", env = "NO_REUSE_PORT")]
    pub no_reuse_port: bool,
}

impl Config {
    /// Crea una nueva configuración parseando argumentos CLI
    pub fn new() -> Self {
        Config::parse()
    }

    /// Obtiene la dirección completa para bind (host:port)
    ///
    /// # Ejemplo
    /// ```rust
    /// use tiny_http_server::config::Config;
    ///
    /// let config = Config::default();
    /// assert_eq!(config.address(), "0.0.0.0:5073");
    /// ```
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Valida la configuración
    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(ServerError::Config("host must not be empty".to_string()));
        }
        // Un timeout de 0 en set_read_timeout es un error de std
        if self.read_timeout_secs == 0 {
            return Err(ServerError::Config("read timeout must be > 0".to_string()));
        }
        if self.max_header_bytes < HEADER_TERMINATOR.len() {
            return Err(ServerError::Config(format!(
                "max header bytes must be >= {}",
                HEADER_TERMINATOR.len()
            )));
        }
        if self.read_chunk_bytes == 0 {
            return Err(ServerError::Config("read chunk must be >= 1".to_string()));
        }
        if self.read_chunk_bytes > self.max_header_bytes {
            return Err(ServerError::Config(
                "read chunk must not exceed max header bytes".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5073,
            index_path: "index.html".to_string(),
            read_timeout_secs: 5,
            max_header_bytes: DEFAULT_MAX_HEAD_BYTES,
            read_chunk_bytes: DEFAULT_READ_CHUNK,
            no_reuse_port: false,
        }
    }
}
