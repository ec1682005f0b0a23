//! # Tiny HTTP Server
//! src/lib.rs
//!
//! Servidor HTTP/1.1 mínimo implementado desde cero para estudiar el ciclo
//! request/response: aceptar el socket, juntar bytes hasta el fin de los
//! headers, parsear la request line, rutear y construir la respuesta byte
//! a byte.
//!
//! ## Arquitectura
//!
//! - `http`: acumulación, parsing de la request line, status codes y responses
//! - `router`: tabla fija de rutas (GET `/`, `/index.html`, `/api/hello`)
//! - `handlers`: endpoints
//! - `server`: orquestador de un request y loop TCP secuencial
//! - `assets`: página de inicio cargada una vez al arrancar
//! - `config`: CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```
//! use tiny_http_server::assets::Assets;
//! use tiny_http_server::router::Router;
//! use tiny_http_server::server::RequestHandler;
//!
//! let handler = RequestHandler::new(Router::new(Assets::from_bytes(&b"<h1>hola</h1>"[..])));
//! let response = handler.handle(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
//!
//! assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! assert!(response.ends_with(b"<h1>hola</h1>"));
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod router;
pub mod server;
