//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! Solo la primera línea del request se interpreta. El resto de los
//! headers viaja en el buffer pero el servidor no los necesita para rutear.
//!
//! ## Formato
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n      ← request line
//! Host: localhost:5073\r\n          ← ignorado
//! \r\n                              ← terminador del head
//! ```
//!
//! ## Política
//!
//! 1. El head (todo antes del primer `\r\n\r\n`) se decodifica como UTF-8
//!    con reemplazo: bytes inválidos se vuelven `U+FFFD`, nunca un error.
//! 2. La request line es lo que está antes del primer `\r\n`.
//! 3. Se separa por espacios simples y debe dar exactamente tres campos
//!    no vacíos: método, path y versión.

use thiserror::Error;

use super::accumulator::find_terminator;

/// Errores que pueden ocurrir durante el parsing
///
/// Todos terminan en un 400 Bad Request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Request vacío
    #[error("Empty request")]
    EmptyRequest,

    /// No aparece `\r\n\r\n` en el buffer
    #[error("Missing end of headers")]
    MissingTerminator,

    /// La request line no tiene la forma `METHOD PATH VERSION`
    #[error("Invalid request line: {0:?}")]
    InvalidRequestLine(String),
}

/// Request line parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Método HTTP tal como llegó (ej: "GET", "POST", "BREW")
    method: String,

    /// Path de la petición (ej: "/api/hello")
    path: String,

    /// Versión HTTP (ej: "HTTP/1.1"); no se valida
    version: String,
}

impl RequestLine {
    /// Parsea la request line desde los bytes acumulados
    ///
    /// # Retorna
    ///
    /// * `Ok(RequestLine)` - Los tres campos, todos no vacíos
    /// * `Err(ParseError)` - Cualquier otra entrada
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use tiny_http_server::http::RequestLine;
    ///
    /// let line = RequestLine::parse(b"GET /api/hello HTTP/1.1\r\nHost: x\r\n\r\n").unwrap();
    ///
    /// assert_eq!(line.method(), "GET");
    /// assert_eq!(line.path(), "/api/hello");
    /// assert_eq!(line.version(), "HTTP/1.1");
    /// ```
    pub fn parse(buffer: &[u8]) -> Result<Self, ParseError> {
        if buffer.is_empty() {
            return Err(ParseError::EmptyRequest);
        }

        let head_end = find_terminator(buffer).ok_or(ParseError::MissingTerminator)?;
        let head = String::from_utf8_lossy(&buffer[..head_end]);

        let line = head.split("\r\n").next().unwrap_or_default();
        Self::parse_line(line)
    }

    /// Separa `METHOD PATH VERSION`
    fn parse_line(line: &str) -> Result<Self, ParseError> {
        let parts: Vec<&str> = line.split(' ').collect();

        match parts.as_slice() {
            [method, path, version]
                if !method.is_empty() && !path.is_empty() && !version.is_empty() =>
            {
                Ok(RequestLine {
                    method: (*method).to_string(),
                    path: (*path).to_string(),
                    version: (*version).to_string(),
                })
            }
            _ => Err(ParseError::InvalidRequestLine(line.to_string())),
        }
    }

    /// Obtiene el método HTTP
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Obtiene el path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Obtiene la versión HTTP
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn is_get(&self) -> bool {
        self.method == "GET"
    }
}
