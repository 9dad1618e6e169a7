//! # Errores del Connection Handler
//! src/error.rs
//!
//! Cada paso del handler (leer línea, parsear, resolver, leer archivo,
//! escribir) retorna `Result<_, HandlerError>`. Solo el nivel más externo
//! del handler absorbe los errores y cierra la conexión.

use crate::http::ParseError;
use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errores que puede producir el procesamiento de una conexión
#[derive(Debug)]
pub enum HandlerError {
    /// Request line vacía o sin target: se descarta sin respuesta
    Parse(ParseError),

    /// El archivo pedido no existe o no se puede abrir como archivo: se
    /// responde 404. `exists` se reporta en el header `File exists`.
    NotFound { path: PathBuf, exists: bool },

    /// Error de I/O en el socket o en el sistema de archivos
    Io(io::Error),
}

impl fmt::Display for HandlerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerError::Parse(e) => write!(f, "Parse error: {}", e),
            HandlerError::NotFound { path, .. } => write!(f, "File not found: {}", path.display()),
            HandlerError::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for HandlerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HandlerError::Parse(e) => Some(e),
            HandlerError::NotFound { .. } => None,
            HandlerError::Io(e) => Some(e),
        }
    }
}

impl From<ParseError> for HandlerError {
    fn from(e: ParseError) -> Self {
        HandlerError::Parse(e)
    }
}

impl From<io::Error> for HandlerError {
    fn from(e: io::Error) -> Self {
        HandlerError::Io(e)
    }
}
