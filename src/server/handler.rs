//! # Orquestador de un Request
//! src/server/handler.rs
//!
//! Une las piezas del módulo `http` con el router:
//!
//! ```text
//! Accumulating ──► Parsed ──► Routed ──► Responded
//!      │              │          │
//!      │ TooLarge     │ 400      │ 404 / 405 / 500
//!      ▼              ▼          ▼
//!     431         Responded   Responded
//!      │
//!      │ Incomplete / Io
//!      ▼
//!   cerrar sin responder
//! ```
//!
//! Ningún error sale de aquí sin convertirse: o hay bytes de respuesta o
//! hay un cierre silencioso. Un panic dentro del pipeline termina en 500.

use std::io::Read;
use std::panic::{self, AssertUnwindSafe};

use bytes::Bytes;

use crate::http::accumulator::{DEFAULT_MAX_HEAD_BYTES, DEFAULT_READ_CHUNK};
use crate::http::{HeadAccumulator, HeadError, RequestLine, Response, StatusCode};
use crate::router::Router;

/// Por qué se cerró la conexión sin responder
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// El peer cerró antes de terminar los headers
    Incomplete,

    /// La lectura falló (timeout, reset)
    ReadFailed,
}

/// Resultado de atender una conexión
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Respuesta a escribir antes de cerrar
    Respond(Response),

    /// Cerrar sin escribir nada
    Close(CloseReason),
}

/// Atiende un request: bytes crudos de entrada, bytes de respuesta de salida
///
/// No guarda estado mutable, así que puede compartirse entre threads con
/// `Arc`.
#[derive(Debug, Clone)]
pub struct RequestHandler {
    router: Router,
    max_head_bytes: usize,
    read_chunk: usize,
}

impl RequestHandler {
    pub fn new(router: Router) -> Self {
        Self {
            router,
            max_head_bytes: DEFAULT_MAX_HEAD_BYTES,
            read_chunk: DEFAULT_READ_CHUNK,
        }
    }

    /// Cambia el límite del head y el tamaño de cada lectura
    pub fn with_limits(mut self, max_head_bytes: usize, read_chunk: usize) -> Self {
        self.max_head_bytes = max_head_bytes;
        self.read_chunk = read_chunk;
        self
    }

    /// Convierte los bytes acumulados en los bytes de la respuesta
    ///
    /// Es total: cualquier entrada produce una respuesta HTTP bien formada.
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_http_server::assets::Assets;
    /// use tiny_http_server::router::Router;
    /// use tiny_http_server::server::RequestHandler;
    ///
    /// let handler = RequestHandler::new(Router::new(Assets::from_bytes(&b"<h1>hi</h1>"[..])));
    ///
    /// let bytes = handler.handle(b"GARBAGE\r\n\r\n");
    /// assert!(bytes.starts_with(b"HTTP/1.1 400 Bad Request\r\n"));
    /// ```
    pub fn handle(&self, raw: &[u8]) -> Bytes {
        self.respond(raw).to_bytes()
    }

    /// Igual que `handle` pero retorna la `Response` sin serializar
    pub fn respond(&self, raw: &[u8]) -> Response {
        match panic::catch_unwind(AssertUnwindSafe(|| self.pipeline(raw))) {
            Ok(response) => response,
            Err(_) => {
                tracing::error!("panic while handling request");
                internal_error()
            }
        }
    }

    fn pipeline(&self, raw: &[u8]) -> Response {
        let line = match RequestLine::parse(raw) {
            Ok(line) => line,
            Err(e) => {
                tracing::debug!(error = %e, "bad request line");
                return Response::text(StatusCode::BadRequest, "bad request");
            }
        };

        tracing::debug!(method = line.method(), path = line.path(), "request");

        match self.router.route(&line) {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(error = %e, path = line.path(), "handler failed");
                internal_error()
            }
        }
    }

    /// Lee el head desde `source` y produce el resultado de la conexión
    ///
    /// No cierra `source`; eso queda en manos de quien lo llama.
    pub fn serve<R: Read>(&self, source: &mut R) -> Outcome {
        let accumulator = HeadAccumulator::new(self.max_head_bytes, self.read_chunk);

        match accumulator.read_from(source) {
            Ok(raw) => Outcome::Respond(self.respond(&raw)),
            Err(HeadError::TooLarge { limit }) => {
                tracing::warn!(limit, "request head too large");
                Outcome::Respond(Response::text(
                    StatusCode::RequestHeaderFieldsTooLarge,
                    "Request Header Fields Too Large",
                ))
            }
            Err(HeadError::Incomplete { received }) => {
                tracing::debug!(received, "peer closed before end of headers");
                Outcome::Close(CloseReason::Incomplete)
            }
            Err(HeadError::Io(e)) => {
                tracing::warn!(error = %e, "read failed");
                Outcome::Close(CloseReason::ReadFailed)
            }
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }
}

fn internal_error() -> Response {
    Response::text(StatusCode::InternalServerError, "Internal Server Error")
}
