//! # Construcción de Respuestas HTTP
//! src/http/response.rs
//!
//! Convierte (status, content-type, body) en los bytes exactos que se
//! escriben al socket.
//!
//! ## Formato
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Content-Type: application/json; charset=utf-8\r\n
//! Content-Length: 44\r\n
//! Connection: close\r\n
//! \r\n
//! {"message":"...","ok":true}
//! ```
//!
//! `Content-Length` se calcula sobre los bytes del body, no sobre los
//! caracteres. El orden de los headers es fijo y `Connection: close` va
//! siempre: el servidor no mantiene conexiones abiertas.
//!
//! ## Ejemplo de uso
//!
//! ```
//! use tiny_http_server::http::{Response, StatusCode};
//!
//! let response = Response::text(StatusCode::NotFound, "Not Found");
//! let bytes = response.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 404 Not Found\r\n"));
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use serde::Serialize;

use super::StatusCode;

/// Content-Type de la página de inicio
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=utf-8";

/// Content-Type de los endpoints JSON
pub const CONTENT_TYPE_JSON: &str = "application/json; charset=utf-8";

/// Content-Type de los mensajes de error
pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=utf-8";

/// Respuesta HTTP lista para serializar
///
/// Se produce en el router y se consume una sola vez en `to_bytes`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: StatusCode,

    content_type: &'static str,

    /// Cuerpo de la respuesta; clonar es barato (conteo de referencias)
    body: Bytes,
}

impl Response {
    /// Crea una respuesta con status, content-type y body
    pub fn new(status: StatusCode, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// Respuesta `text/plain`, usada por todos los errores
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_http_server::http::{Response, StatusCode};
    ///
    /// let response = Response::text(StatusCode::BadRequest, "bad request");
    /// assert_eq!(response.body(), b"bad request");
    /// ```
    pub fn text(status: StatusCode, message: &'static str) -> Self {
        Self::new(status, CONTENT_TYPE_TEXT, Bytes::from_static(message.as_bytes()))
    }

    /// Respuesta 200 `text/html`
    pub fn html(body: impl Into<Bytes>) -> Self {
        Self::new(StatusCode::Ok, CONTENT_TYPE_HTML, body)
    }

    /// Respuesta 200 `application/json` serializando `value`
    ///
    /// Los structs se serializan en el orden de sus campos, así que el
    /// mismo valor produce siempre los mismos bytes.
    pub fn json_value<T: Serialize>(value: &T) -> Result<Self, serde_json::Error> {
        let body = serde_json::to_vec(value)?;
        Ok(Self::new(StatusCode::Ok, CONTENT_TYPE_JSON, body))
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// - Status line: `HTTP/1.1 200 OK\r\n`
    /// - `Content-Type`, `Content-Length`, `Connection: close`
    /// - Línea vacía: `\r\n`
    /// - Body
    pub fn to_bytes(&self) -> Bytes {
        let head = format!(
            "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            self.status,
            self.content_type,
            self.body.len()
        );

        let mut buf = BytesMut::with_capacity(head.len() + self.body.len());
        buf.put_slice(head.as_bytes());
        buf.put_slice(&self.body);
        buf.freeze()
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split_head(bytes: &[u8]) -> (String, Vec<u8>) {
        let pos = bytes
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("no terminator");
        (
            String::from_utf8(bytes[..pos].to_vec()).unwrap(),
            bytes[pos + 4..].to_vec(),
        )
    }

    #[test]
    fn test_exact_bytes() {
        let bytes = Response::text(StatusCode::NotFound, "Not Found").to_bytes();
        assert_eq!(
            &bytes[..],
            &b"HTTP/1.1 404 Not Found\r\n\
Content-Type: text/plain; charset=utf-8\r\n\
Content-Length: 9\r\n\
Connection: close\r\n\
\r\n\
Not Found"[..]
        );
    }

    #[test]
    fn test_empty_body() {
        let bytes = Response::new(StatusCode::Ok, CONTENT_TYPE_TEXT, Bytes::new()).to_bytes();
        let (head, body) = split_head(&bytes);
        assert!(head.contains("Content-Length: 0"));
        assert!(body.is_empty());
        assert!(bytes.ends_with(b"\r\n\r\n"));
    }

    #[test]
    fn test_one_byte_body() {
        let bytes = Response::html(&b"x"[..]).to_bytes();
        let (head, body) = split_head(&bytes);
        assert!(head.contains("Content-Length: 1"));
        assert_eq!(body, b"x");
    }

    #[test]
    fn test_content_length_counts_bytes_not_chars() {
        let text = "héllo ✓";
        assert_eq!(text.chars().count(), 7);

        let bytes = Response::html(text.as_bytes().to_vec()).to_bytes();
        let (head, body) = split_head(&bytes);
        assert!(head.contains(&format!("Content-Length: {}", text.len())));
        assert_eq!(body, text.as_bytes());
    }

    #[test]
    fn test_no_bare_newlines_in_head() {
        let bytes = Response::html(&b"<p>hi</p>\n"[..]).to_bytes();
        let (head, _) = split_head(&bytes);
        for (i, b) in head.bytes().enumerate() {
            if b == b'\n' {
                assert_eq!(head.as_bytes()[i - 1], b'\r');
            }
        }
        assert_eq!(head.lines().count(), 4);
    }

    #[test]
    fn test_json_value() {
        #[derive(Serialize)]
        struct Payload {
            ok: bool,
        }

        let response = Response::json_value(&Payload { ok: true }).unwrap();
        assert_eq!(response.status(), StatusCode::Ok);
        assert_eq!(response.content_type(), CONTENT_TYPE_JSON);
        assert_eq!(response.body(), br#"{"ok":true}"#);
    }

    #[test]
    fn test_round_trip_status_and_body() {
        let body: &[u8] = b"\x00\x01binary\r\n\r\nwith terminator inside";
        let bytes = Response::new(StatusCode::InternalServerError, CONTENT_TYPE_TEXT, body).to_bytes();
        let (head, parsed_body) = split_head(&bytes);

        let code: u16 = head
            .lines()
            .next()
            .and_then(|l| l.split(' ').nth(1))
            .and_then(|c| c.parse().ok())
            .unwrap();
        assert_eq!(code, 500);
        assert_eq!(parsed_body, body);
    }
}
