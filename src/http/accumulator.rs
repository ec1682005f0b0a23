//! # Acumulación del Head HTTP
//! src/http/accumulator.rs
//!
//! Un `read()` sobre un socket puede devolver el request en pedazos
//! arbitrarios. Este módulo junta esos pedazos hasta ver el terminador
//! de headers (`\r\n\r\n`), hasta llegar al límite de tamaño, o hasta que
//! el peer cierre la conexión.
//!
//! ```text
//! "GET / HT" + "TP/1.1\r\nHo" + "st: x\r\n\r\n"  →  Complete
//! ```
//!
//! El acumulador nunca cierra la conexión: eso es responsabilidad de quien
//! lo llama.

use std::io::{self, Read};

use thiserror::Error;

/// Terminador de headers
pub const HEADER_TERMINATOR: &[u8] = b"\r\n\r\n";

/// Tamaño máximo por defecto del head (64 KiB)
pub const DEFAULT_MAX_HEAD_BYTES: usize = 64 * 1024;

/// Tamaño por defecto de cada lectura
pub const DEFAULT_READ_CHUNK: usize = 4096;

/// Errores al acumular el head de un request
#[derive(Debug, Error)]
pub enum HeadError {
    /// El buffer llegó al límite sin encontrar el terminador
    #[error("request head exceeds {limit} bytes")]
    TooLarge { limit: usize },

    /// El peer cerró antes de completar los headers
    #[error("connection closed after {received} bytes, before end of headers")]
    Incomplete { received: usize },

    /// Error de lectura (incluye el timeout del socket)
    #[error("read failed: {0}")]
    Io(#[from] io::Error),
}

/// Estado después de agregar un chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// Todavía no aparece el terminador
    NeedMore,

    /// Apareció el terminador; el valor es el offset donde termina el head
    Complete(usize),

    /// Se alcanzó el límite sin terminador
    LimitReached,
}

/// Buffer que crece hasta encontrar `\r\n\r\n`
#[derive(Debug)]
pub struct HeadAccumulator {
    buffer: Vec<u8>,
    max_bytes: usize,
    chunk_size: usize,
    /// Desde dónde continuar la búsqueda del terminador
    scanned: usize,
    head_end: Option<usize>,
}

impl HeadAccumulator {
    /// Crea un acumulador con el límite y tamaño de lectura dados
    ///
    /// Un `chunk_size` de 0 se trata como 1 para que `read_from` siempre
    /// avance.
    pub fn new(max_bytes: usize, chunk_size: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(chunk_size.min(max_bytes)),
            max_bytes,
            chunk_size: chunk_size.max(1),
            scanned: 0,
            head_end: None,
        }
    }

    /// Agrega bytes al buffer y reporta el progreso
    ///
    /// Solo se guardan bytes hasta el límite; el resto se descarta.
    ///
    /// # Ejemplo
    /// ```
    /// use tiny_http_server::http::accumulator::{HeadAccumulator, Progress};
    ///
    /// let mut acc = HeadAccumulator::new(1024, 16);
    /// assert_eq!(acc.push(b"GET / HTTP/1.1\r\n"), Progress::NeedMore);
    /// assert_eq!(acc.push(b"\r\n"), Progress::Complete(18));
    /// ```
    pub fn push(&mut self, chunk: &[u8]) -> Progress {
        if let Some(end) = self.head_end {
            return Progress::Complete(end);
        }

        let room = self.max_bytes.saturating_sub(self.buffer.len());
        let take = chunk.len().min(room);
        self.buffer.extend_from_slice(&chunk[..take]);

        // El terminador puede quedar partido entre dos chunks
        let start = self.scanned.saturating_sub(HEADER_TERMINATOR.len() - 1);
        if let Some(pos) = find_terminator(&self.buffer[start..]) {
            let end = start + pos + HEADER_TERMINATOR.len();
            self.head_end = Some(end);
            return Progress::Complete(end);
        }
        self.scanned = self.buffer.len();

        if self.buffer.len() >= self.max_bytes {
            Progress::LimitReached
        } else {
            Progress::NeedMore
        }
    }

    /// Lee de `source` hasta completar el head
    ///
    /// # Retorna
    ///
    /// * `Ok(bytes)` - Todo lo acumulado (puede incluir bytes después del terminador)
    /// * `Err(HeadError::TooLarge)` - Se llegó al límite sin terminador
    /// * `Err(HeadError::Incomplete)` - El peer cerró (lectura de 0 bytes)
    /// * `Err(HeadError::Io)` - Falló la lectura
    pub fn read_from<R: Read>(mut self, source: &mut R) -> Result<Vec<u8>, HeadError> {
        let mut chunk = vec![0u8; self.chunk_size];

        loop {
            let window = self.chunk_size.min(self.max_bytes - self.buffer.len()).max(1);
            let n = match source.read(&mut chunk[..window]) {
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(HeadError::Io(e)),
            };

            if n == 0 {
                return Err(HeadError::Incomplete {
                    received: self.buffer.len(),
                });
            }

            match self.push(&chunk[..n]) {
                Progress::NeedMore => {}
                Progress::Complete(_) => return Ok(self.buffer),
                Progress::LimitReached => {
                    return Err(HeadError::TooLarge {
                        limit: self.max_bytes,
                    })
                }
            }
        }
    }

    /// Bytes acumulados hasta ahora
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl Default for HeadAccumulator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HEAD_BYTES, DEFAULT_READ_CHUNK)
    }
}

/// Posición del primer `\r\n\r\n` dentro de `haystack`
pub fn find_terminator(haystack: &[u8]) -> Option<usize> {
    haystack
        .windows(HEADER_TERMINATOR.len())
        .position(|w| w == HEADER_TERMINATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// Fuente que entrega los datos en pedazos fijos
    struct Trickle {
        chunks: Vec<Vec<u8>>,
    }

    impl Read for Trickle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.chunks.is_empty() {
                return Ok(0);
            }
            let mut chunk = self.chunks.remove(0);
            let n = chunk.len().min(buf.len());
            buf[..n].copy_from_slice(&chunk[..n]);
            if n < chunk.len() {
                self.chunks.insert(0, chunk.split_off(n));
            }
            Ok(n)
        }
    }

    struct TimesOut;

    impl Read for TimesOut {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::WouldBlock, "timed out"))
        }
    }

    #[test]
    fn test_single_read_complete() {
        let mut source = Cursor::new(b"GET / HTTP/1.1\r\nHost: x\r\n\r\n".to_vec());
        let head = HeadAccumulator::default().read_from(&mut source).unwrap();
        assert_eq!(head, b"GET / HTTP/1.1\r\nHost: x\r\n\r\n");
    }

    #[test]
    fn test_terminator_split_across_chunks() {
        let mut source = Trickle {
            chunks: vec![
                b"GET / HTTP/1.1\r".to_vec(),
                b"\n\r".to_vec(),
                b"\n".to_vec(),
            ],
        };
        let head = HeadAccumulator::default().read_from(&mut source).unwrap();
        assert_eq!(head, b"GET / HTTP/1.1\r\n\r\n");
    }

    #[test]
    fn test_keeps_trailing_bytes() {
        let mut source = Cursor::new(b"GET / HTTP/1.1\r\n\r\nextra".to_vec());
        let head = HeadAccumulator::default().read_from(&mut source).unwrap();
        assert!(head.ends_with(b"extra"));
    }

    #[test]
    fn test_peer_closes_mid_headers() {
        let mut source = Cursor::new(b"GET /\r\n".to_vec());
        let result = HeadAccumulator::default().read_from(&mut source);
        assert!(matches!(result, Err(HeadError::Incomplete { received: 7 })));
    }

    #[test]
    fn test_peer_sends_nothing() {
        let mut source = Cursor::new(Vec::new());
        let result = HeadAccumulator::default().read_from(&mut source);
        assert!(matches!(result, Err(HeadError::Incomplete { received: 0 })));
    }

    #[test]
    fn test_oversized_head_is_rejected() {
        let mut source = Cursor::new(vec![b'a'; DEFAULT_MAX_HEAD_BYTES + 1]);
        let result = HeadAccumulator::default().read_from(&mut source);
        assert!(matches!(
            result,
            Err(HeadError::TooLarge { limit: DEFAULT_MAX_HEAD_BYTES })
        ));
    }

    #[test]
    fn test_terminator_exactly_at_limit() {
        let mut raw = vec![b'a'; 60];
        raw.extend_from_slice(HEADER_TERMINATOR);
        let mut source = Cursor::new(raw.clone());
        let head = HeadAccumulator::new(64, 7).read_from(&mut source).unwrap();
        assert_eq!(head, raw);
    }

    #[test]
    fn test_read_error_is_reported() {
        let result = HeadAccumulator::default().read_from(&mut TimesOut);
        assert!(matches!(result, Err(HeadError::Io(_))));
    }

    #[test]
    fn test_push_never_exceeds_limit() {
        let mut acc = HeadAccumulator::new(8, 4);
        assert_eq!(acc.push(b"abcd"), Progress::NeedMore);
        assert_eq!(acc.push(b"efghijkl"), Progress::LimitReached);
        assert_eq!(acc.len(), 8);
    }

    #[test]
    fn test_find_terminator() {
        assert_eq!(find_terminator(b"ab\r\n\r\ncd"), Some(2));
        assert_eq!(find_terminator(b"ab\r\n\r"), None);
        assert_eq!(find_terminator(b""), None);
    }
}
