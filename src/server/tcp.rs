//! # Servidor TCP
//! src/server/tcp.rs
//!
//! Loop de aceptación secuencial: una conexión a la vez. Para cada una se
//! configura un timeout de lectura, se delega al `RequestHandler`, se
//! escribe la respuesta y se cierra. El `TcpStream` se libera al salir de
//! `handle_connection`, por cualquier camino.
//!
//! El timeout de lectura es la protección contra clientes lentos: el
//! handler ve la lectura fallida y cierra sin responder.

use std::io::{self, Write};
use std::net::{SocketAddr, TcpListener, TcpStream, ToSocketAddrs};
use std::time::{Duration, Instant};

use socket2::{Domain, Protocol, Socket, Type};

use crate::config::Config;
use crate::error::{Result, ServerError};
use crate::server::handler::{Outcome, RequestHandler};

/// Backlog del socket de escucha
const LISTEN_BACKLOG: i32 = 128;

/// Servidor HTTP/1.1 de una conexión a la vez
#[derive(Debug)]
pub struct Server {
    listener: TcpListener,
    handler: RequestHandler,
    read_timeout: Duration,
}

impl Server {
    /// Abre el socket de escucha descrito por `config`
    ///
    /// Intenta `SO_REUSEPORT` primero; si la plataforma lo rechaza, sigue
    /// sin él.
    pub fn bind(config: &Config, handler: RequestHandler) -> Result<Self> {
        let address = config.address();
        let bind_error = |source: io::Error| ServerError::Bind {
            address: address.clone(),
            source,
        };

        let addr = (config.host.as_str(), config.port)
            .to_socket_addrs()
            .map_err(bind_error)?
            .next()
            .ok_or_else(|| {
                bind_error(io::Error::new(
                    io::ErrorKind::AddrNotAvailable,
                    "host resolved to no addresses",
                ))
            })?;

        let listener = open_listener(addr, !config.no_reuse_port).map_err(bind_error)?;

        Ok(Self {
            listener,
            handler,
            read_timeout: config.read_timeout(),
        })
    }

    /// Dirección real del socket (útil con puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Acepta conexiones para siempre
    pub fn run(&self) -> Result<()> {
        let address = self.local_addr().map_err(|source| ServerError::Bind {
            address: "listener".to_string(),
            source,
        })?;
        tracing::info!(%address, "serving on http://{}", address);

        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => self.dispatch(stream),
                Err(e) => tracing::warn!(error = %e, "accept failed"),
            }
        }

        Ok(())
    }

    /// Acepta y atiende exactamente una conexión
    pub fn accept_one(&self) -> io::Result<()> {
        let (stream, _) = self.listener.accept()?;
        self.dispatch(stream);
        Ok(())
    }

    /// Atiende una conexión y registra cualquier falla sin detener el loop
    fn dispatch(&self, stream: TcpStream) {
        let peer = stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        tracing::info!(%peer, "incoming connection");

        if let Err(e) = self.handle_connection(stream, &peer) {
            match e.kind() {
                io::ErrorKind::ConnectionAborted
                | io::ErrorKind::ConnectionReset
                | io::ErrorKind::BrokenPipe => {
                    tracing::info!(%peer, error = %e, "connection aborted")
                }
                _ => tracing::warn!(%peer, error = %e, "error handling request"),
            }
        }
    }

    fn handle_connection(&self, mut stream: TcpStream, peer: &str) -> io::Result<()> {
        let start = Instant::now();
        stream.set_read_timeout(Some(self.read_timeout))?;

        match self.handler.serve(&mut stream) {
            Outcome::Respond(response) => {
                let bytes = response.to_bytes();
                stream.write_all(&bytes)?;
                stream.flush()?;

                tracing::info!(
                    peer,
                    status = response.status().as_u16(),
                    bytes = bytes.len(),
                    elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "response sent"
                );
            }
            Outcome::Close(reason) => {
                tracing::info!(peer, ?reason, "closed without response");
            }
        }

        Ok(())
    }
}

/// Crea el listener con socket2 para poder pedir SO_REUSEPORT
fn open_listener(addr: SocketAddr, reuse_port: bool) -> io::Result<TcpListener> {
    let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;

    if reuse_port {
        if let Err(e) = set_reuse_port(&socket) {
            tracing::warn!(error = %e, "reuse_port not available on this platform, falling back");
        }
    }

    socket.bind(&addr.into())?;
    socket.listen(LISTEN_BACKLOG)?;

    Ok(socket.into())
}

#[cfg(not(target_os = "windows"))]
fn set_reuse_port(socket: &Socket) -> io::Result<()> {
    socket.set_reuse_port(true)
}

#[cfg(target_os = "windows")]
fn set_reuse_port(_socket: &Socket) -> io::Result<()> {
    Err(io::Error::new(io::ErrorKind::Unsupported, "SO_REUSEPORT"))
}
