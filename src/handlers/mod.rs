//! # Handlers de las Rutas
//! src/handlers/mod.rs
//!
//! Implementación de los endpoints del servidor:
//! - `/` y `/index.html`: página de inicio precargada
//! - `/api/hello`: saludo en JSON
//!
//! Cada handler recibe la request line y los assets, y retorna una
//! Response. No hacen I/O.

use serde::Serialize;

use crate::assets::Assets;
use crate::error::Result;
use crate::http::{RequestLine, Response};

/// Mensaje del endpoint de saludo
pub const HELLO_MESSAGE: &str = "Hello from my Tiny HTTP Server";

/// Body de `/api/hello`
///
/// El orden de los campos define el orden en el JSON.
#[derive(Debug, Serialize)]
pub struct Hello {
    pub message: &'static str,
    pub ok: bool,
}

/// Handler para `/` y `/index.html`
pub fn home_handler(_line: &RequestLine, assets: &Assets) -> Result<Response> {
    Ok(Response::html(assets.index()))
}

/// Handler para `/api/hello`
///
/// # Ejemplo de response
/// ```json
/// {"message":"Hello from my Tiny HTTP Server","ok":true}
/// ```
pub fn hello_handler(_line: &RequestLine, _assets: &Assets) -> Result<Response> {
    let hello = Hello {
        message: HELLO_MESSAGE,
        ok: true,
    };
    Ok(Response::json_value(&hello)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::response::{CONTENT_TYPE_HTML, CONTENT_TYPE_JSON};
    use crate::http::StatusCode;

    fn get(path: &str) -> RequestLine {
        RequestLine::parse(format!("GET {} HTTP/1.1\r\n\r\n", path).as_bytes()).unwrap()
    }

    #[test]
    fn test_home_returns_asset() {
        let assets = Assets::from_bytes(&b"<h1>home</h1>"[..]);
        let response = home_handler(&get("/"), &assets).unwrap();

        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), CONTENT_TYPE_HTML);
        assert_eq!(response.body(), b"<h1>home</h1>");
    }

    #[test]
    fn test_hello_json() {
        let assets = Assets::from_bytes(&b""[..]);
        let response = hello_handler(&get("/api/hello"), &assets).unwrap();

        assert_eq!(response.content_type(), CONTENT_TYPE_JSON);
        let value: serde_json::Value = serde_json::from_slice(response.body()).unwrap();
        assert_eq!(value["message"], HELLO_MESSAGE);
        assert_eq!(value["ok"], true);
    }

    #[test]
    fn test_hello_is_deterministic() {
        let assets = Assets::from_bytes(&b""[..]);
        let a = hello_handler(&get("/api/hello"), &assets).unwrap();
        let b = hello_handler(&get("/api/hello"), &assets).unwrap();

        assert_eq!(a.body(), b.body());
        assert_eq!(
            a.body(),
            br#"{"message":"Hello from my Tiny HTTP Server","ok":true}"#
        );
    }
}
