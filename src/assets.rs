//! # Assets Precargados
//! src/assets.rs
//!
//! La página de inicio se lee del disco una sola vez al arrancar y luego
//! se comparte, sin copiar y sin locks, entre todos los requests.

use std::path::Path;

use bytes::Bytes;

use crate::error::{Result, ServerError};

/// Contenido estático que el servidor entrega tal cual
#[derive(Debug, Clone)]
pub struct Assets {
    index: Bytes,
}

impl Assets {
    /// Lee la página de inicio desde `path`
    ///
    /// # Errores
    ///
    /// `ServerError::Asset` si el archivo no existe o no se puede leer.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let index = std::fs::read(path).map_err(|source| ServerError::Asset {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), bytes = index.len(), "home page loaded");

        Ok(Self::from_bytes(index))
    }

    /// Construye los assets desde bytes en memoria
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_http_server::assets::Assets;
    ///
    /// let assets = Assets::from_bytes(&b"<h1>hola</h1>"[..]);
    /// assert_eq!(&assets.index()[..], b"<h1>hola</h1>");
    /// ```
    pub fn from_bytes(index: impl Into<Bytes>) -> Self {
        Self {
            index: index.into(),
        }
    }

    /// Bytes de la página de inicio
    pub fn index(&self) -> Bytes {
        self.index.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_disk() {
        let path = std::env::temp_dir().join(format!("tiny_http_index_{}.html", std::process::id()));
        std::fs::write(&path, "<h1>ok</h1>").unwrap();

        let assets = Assets::load(&path).unwrap();
        assert_eq!(&assets.index()[..], b"<h1>ok</h1>");

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_missing_file() {
        let result = Assets::load("/definitely/not/here/index.html");
        assert!(matches!(result, Err(ServerError::Asset { .. })));
    }

    #[test]
    fn test_index_shares_bytes() {
        let assets = Assets::from_bytes(vec![1u8, 2, 3]);
        let a = assets.index();
        let b = assets.index();
        assert_eq!(a.as_ptr(), b.as_ptr());
    }
}
