//! # Sistema de Routing
//! src/router/mod.rs
//!
//! Mapea (método, path) a un handler. El conjunto de rutas es fijo y se
//! evalúa en orden; gana la primera coincidencia.
//!
//! ```text
//! RequestLine → Router → Handler → Response
//! ```
//!
//! 1. Método distinto de GET → 405, sin mirar el path
//! 2. Path registrado → su handler
//! 3. Cualquier otro path → 404

use crate::assets::Assets;
use crate::error::Result;
use crate::handlers;
use crate::http::{RequestLine, Response, StatusCode};

/// Tipo de función handler
///
/// Un handler recibe la request line y los assets, y retorna una Response
pub type Handler = fn(&RequestLine, &Assets) -> Result<Response>;

/// Router que mapea paths a handlers
#[derive(Debug, Clone)]
pub struct Router {
    /// Lista ordenada de path → handler
    routes: Vec<(&'static str, Handler)>,

    /// Contenido precargado, solo lectura
    assets: Assets,
}

impl Router {
    /// Crea un router sin rutas
    pub fn empty(assets: Assets) -> Self {
        Self {
            routes: Vec::new(),
            assets,
        }
    }

    /// Crea el router con las rutas del servidor
    pub fn new(assets: Assets) -> Self {
        let mut router = Self::empty(assets);

        router.register("/", handlers::home_handler);
        router.register("/index.html", handlers::home_handler);
        router.register("/api/hello", handlers::hello_handler);

        router
    }

    /// Registra una ruta con su handler
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_http_server::assets::Assets;
    /// use tiny_http_server::error::Result;
    /// use tiny_http_server::http::{RequestLine, Response, StatusCode};
    /// use tiny_http_server::router::Router;
    ///
    /// fn ping(_line: &RequestLine, _assets: &Assets) -> Result<Response> {
    ///     Ok(Response::text(StatusCode::Ok, "pong"))
    /// }
    ///
    /// let mut router = Router::empty(Assets::from_bytes(&b""[..]));
    /// router.register("/ping", ping);
    /// ```
    pub fn register(&mut self, path: &'static str, handler: Handler) {
        self.routes.push((path, handler));
    }

    /// Encuentra y ejecuta el handler apropiado
    ///
    /// Un `Err` del handler se propaga; quien llama decide cómo
    /// convertirlo en respuesta.
    pub fn route(&self, line: &RequestLine) -> Result<Response> {
        if !line.is_get() {
            return Ok(Response::text(
                StatusCode::MethodNotAllowed,
                "Only GET Method Supported",
            ));
        }

        match self.routes.iter().find(|(path, _)| *path == line.path()) {
            Some((_, handler)) => handler(line, &self.assets),
            None => Ok(Response::text(StatusCode::NotFound, "Not Found")),
        }
    }

    pub fn assets(&self) -> &Assets {
        &self.assets
    }
}
