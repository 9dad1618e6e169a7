//! # File Server
//! src/lib.rs
//!
//! Servidor HTTP mínimo de archivos: acepta conexiones TCP, lee una única
//! request line y sirve (o borra) un archivo del document root. Demuestra
//! conceptos de sistemas operativos: pool fijo de threads, manejo de
//! recursos con liberación garantizada y aislamiento de fallas por conexión.
//!
//! ## Arquitectura
//!
//! - `config`: Argumentos CLI y variables de entorno
//! - `server`: Listener, pool de 2 workers y connection handler
//! - `http`: Request line, headers de respuesta y status codes
//! - `files`: Resolución de rutas, MIME types, lectura y borrado
//! - `error`: Errores de cada paso del handler
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use file_server::config::Config;
//! use file_server::server::Server;
//!
//! let config = Config::new("./www", 8080);
//! let server = Server::bind(&config).expect("Error al iniciar servidor");
//! let error = server.run();
//! eprintln!("Servidor detenido: {}", error);
//! ```

pub mod config;
pub mod error;
pub mod files;
pub mod http;
pub mod server;
