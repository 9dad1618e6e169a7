//! # Listener TCP
//! src/server/listener.rs
//!
//! Acepta conexiones en un loop y entrega cada una al pool de workers. El
//! loop de accept nunca procesa peticiones: solo crea el handler y lo encola.

use crate::config::Config;
use crate::server::handler::ConnectionHandler;
use crate::server::pool::{WorkerPool, WORKER_COUNT};
use std::io;
use std::net::{SocketAddr, TcpListener};
use std::path::PathBuf;

/// Servidor de archivos: socket de escucha + pool de workers
///
/// El pool vive exactamente lo que vive el servidor: al hacer `drop` se
/// cierra el socket y el pool termina los trabajos encolados.
pub struct Server {
    listener: TcpListener,
    pool: WorkerPool,
    document_root: PathBuf,
    not_found_page: PathBuf,
}

impl Server {
    /// Hace bind del socket de escucha
    ///
    /// Un error de bind se retorna tal cual; no hay reintentos.
    pub fn bind(config: &Config) -> io::Result<Self> {
        let address = config.address();
        println!("[*] Iniciando servidor en {}", address);

        let listener = TcpListener::bind(&address)?;
        println!("[+] Servidor escuchando en {}", listener.local_addr()?);

        let pool = WorkerPool::new(WORKER_COUNT);
        println!("[*] Pool de {} workers listo\n", pool.size());

        Ok(Self {
            listener,
            pool,
            document_root: config.document_root.clone(),
            not_found_page: config.not_found_page.clone(),
        })
    }

    /// Dirección real del socket (útil cuando se pide el puerto 0)
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Corre el loop de accept
    ///
    /// Solo termina con el error que cortó el loop; el socket se cierra y el
    /// pool se apaga al liberar `self`.
    pub fn run(self) -> io::Error {
        loop {
            let stream = match self.listener.accept() {
                Ok((stream, _)) => stream,
                Err(e) => {
                    eprintln!("[!] Error al aceptar conexión: {}", e);
                    return e;
                }
            };

            let handler = ConnectionHandler::new(
                stream,
                self.document_root.clone(),
                self.not_found_page.clone(),
            );

            if let Err(e) = self.pool.submit(move || {
                handler.run();
            }) {
                return io::Error::new(io::ErrorKind::Other, e);
            }
        }
    }
}
