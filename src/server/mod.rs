//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Este módulo implementa el servidor TCP que:
//! 1. Escucha en un puerto (`listener`)
//! 2. Entrega cada conexión a un pool fijo de 2 workers (`pool`)
//! 3. Procesa una única petición por conexión y la cierra (`handler`)

pub mod handler;
pub mod listener;
pub mod pool;

// Re-exportar para facilitar el uso
pub use handler::{Connection, ConnectionHandler, Served};
pub use listener::Server;
pub use pool::{PoolClosed, WorkerPool, WORKER_COUNT};
