//! # Configuración del Servidor
//! src/config.rs
//!
//! Configuración del servidor de archivos con soporte para argumentos CLI y
//! variables de entorno.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./file_server ./www 8080
//! ./file_server ./www 8080 --host 127.0.0.1 --not-found-page ./NotFound.html
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! HTTP_HOST=127.0.0.1 NOT_FOUND_PAGE=/srv/404.html ./file_server ./www 8080
//! ```
//!
//! Si falta un argumento o el puerto no es numérico, clap imprime el uso en
//! stderr y el proceso termina sin abrir ningún socket.

use crate::server::WORKER_COUNT;
use clap::Parser;
use std::path::PathBuf;

/// Host por defecto: todas las interfaces
const DEFAULT_HOST: &str = "0.0.0.0";

/// Página fallback por defecto (relativa al directorio de trabajo)
const DEFAULT_NOT_FOUND_PAGE: &str = "NotFound.html";

/// Configuración del servidor de archivos
#[derive(Debug, Clone, Parser)]
#[command(name = "file_server")]
#[command(about = "Servidor HTTP de archivos con pool fijo de workers")]
#[command(version = "0.1.0")]
pub struct Config {
    /// Directorio desde el que se sirven los archivos
    pub document_root: PathBuf,

    /// Puerto en el que escucha el servidor
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = DEFAULT_HOST, env = "HTTP_HOST")]
    pub host: String,

    /// Archivo que se envía como body de toda respuesta 404
    #[arg(long = "not-found-page", default_value = DEFAULT_NOT_FOUND_PAGE, env = "NOT_FOUND_PAGE")]
    pub not_found_page: PathBuf,
}

impl Config {
    /// Crea una configuración con los valores por defecto
    ///
    /// # Ejemplo
    /// ```rust
    /// use file_server::config::Config;
    ///
    /// let config = Config::new("./www", 8080);
    /// assert_eq!(config.address(), "0.0.0.0:8080");
    /// ```
    pub fn new(document_root: impl Into<PathBuf>, port: u16) -> Self {
        Self {
            document_root: document_root.into(),
            port,
            host: DEFAULT_HOST.to_string(),
            not_found_page: PathBuf::from(DEFAULT_NOT_FOUND_PAGE),
        }
    }

    /// Parsea los argumentos CLI (sale del proceso con el uso si son inválidos)
    pub fn from_args() -> Self {
        Config::parse()
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_not_found_page(mut self, path: impl Into<PathBuf>) -> Self {
        self.not_found_page = path.into();
        self
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.document_root.as_os_str().is_empty() {
            return Err("Document root must not be empty".to_string());
        }
        if self.not_found_page.as_os_str().is_empty() {
            return Err("Not-found page path must not be empty".to_string());
        }
        if self.host.trim().is_empty() {
            return Err("Host must not be empty".to_string());
        }

        Ok(())
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("=================================");
        println!("  RedUnix File Server");
        println!("  Principios de Sistemas Operativos");
        println!("=================================\n");
        println!("⚙️  Configuración:");
        println!("   Address:        {}", self.address());
        println!("   Document root:  {}", self.document_root.display());
        println!("   Not-found page: {}", self.not_found_page.display());
        println!("   Workers:        {}", WORKER_COUNT);
        if !self.not_found_page.exists() {
            println!("   ⚠️  La página 404 no existe: los 404 se cerrarán sin respuesta");
        }
        println!();
    }
}
