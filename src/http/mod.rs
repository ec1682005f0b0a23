//! # Módulo HTTP
//!
//! Piezas del protocolo HTTP/1.1 implementadas a mano:
//!
//! - Acumulación de bytes hasta el fin de los headers
//! - Parsing de la request line
//! - Construcción de responses byte a byte
//! - Códigos de estado
//!
//! ### Formato de Request
//!
//! ```text
//! GET /api/hello HTTP/1.1\r\n
//! Host: localhost:5073\r\n
//! \r\n
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: text/html; charset=utf-8\r\n
//! Content-Length: 13\r\n
//! Connection: close\r\n
//! \r\n
//! <h1>hola</h1>
//! ```

pub mod accumulator; // Buffer hasta \r\n\r\n
pub mod request;     // Request line
pub mod response;    // Bytes de la respuesta
pub mod status;      // Códigos de estado HTTP

// Permite usar `http::Response` en vez de `http::response::Response`
pub use accumulator::{HeadAccumulator, HeadError};
pub use request::{ParseError, RequestLine};
pub use response::Response;
pub use status::StatusCode;
