//! # Construcción de Headers de Respuesta
//!
//! Todas las respuestas del servidor tienen la misma forma: status line,
//! una línea de anotación opcional, cinco headers en orden fijo y una línea
//! vacía. El body (si existe) se envía aparte, después de hacer flush de
//! los headers.
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Server: RedUnix File Server\r\n
//! Date: Sat, 17 Oct 2026 10:00:00 GMT\r\n
//! File exists: true\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! ```
//!
//! ## Ejemplo de uso
//!
//! ```
//! use file_server::http::{ResponseHead, StatusCode};
//!
//! let head = ResponseHead::new(StatusCode::Ok)
//!     .file_exists(true)
//!     .content(Some("text/plain"), Some(5));
//!
//! let bytes = head.to_bytes();
//! assert!(bytes.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```

use super::StatusCode;
use std::time::SystemTime;

/// Identificador fijo que se envía en el header `Server`
pub const SERVER_NAME: &str = "RedUnix File Server";

/// Valor que se escribe cuando un header no tiene valor
const NULL: &str = "null";

/// Headers de una respuesta
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseHead {
    /// Código de estado HTTP
    status: StatusCode,

    /// Línea libre que va justo después de la status line
    annotation: Option<&'static str>,

    /// Si el archivo pedido existe
    file_exists: bool,

    /// MIME type (None se escribe como `null`)
    content_type: Option<String>,

    /// Largo en bytes (None se escribe como `null`)
    content_length: Option<u64>,

    /// Momento que se reporta en `Date`
    date: SystemTime,
}

impl ResponseHead {
    /// Crea headers con el código indicado, sin contenido y con la hora actual
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            annotation: None,
            file_exists: false,
            content_type: None,
            content_length: None,
            date: SystemTime::now(),
        }
    }

    /// Agrega la línea de anotación
    pub fn with_annotation(mut self, annotation: &'static str) -> Self {
        self.annotation = Some(annotation);
        self
    }

    /// Establece el flag `File exists`
    pub fn file_exists(mut self, exists: bool) -> Self {
        self.file_exists = exists;
        self
    }

    /// Establece `Content-Type` y `Content-Length`
    pub fn content(mut self, content_type: Option<&str>, content_length: Option<u64>) -> Self {
        self.content_type = content_type.map(str::to_string);
        self.content_length = content_length;
        self
    }

    /// Fija la fecha reportada (útil en tests)
    pub fn with_date(mut self, date: SystemTime) -> Self {
        self.date = date;
        self
    }

    /// Convierte los headers a bytes, incluyendo la línea vacía final
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut text = format!("HTTP/1.1 {}\r\n", self.status);

        if let Some(annotation) = self.annotation {
            text.push_str(annotation);
            text.push_str("\r\n");
        }

        let content_length = self
            .content_length
            .map(|len| len.to_string())
            .unwrap_or_else(|| NULL.to_string());

        text.push_str(&format!("Server: {}\r\n", SERVER_NAME));
        text.push_str(&format!("Date: {}\r\n", httpdate::fmt_http_date(self.date)));
        text.push_str(&format!("File exists: {}\r\n", self.file_exists));
        text.push_str(&format!(
            "Content-Type: {}\r\n",
            self.content_type.as_deref().unwrap_or(NULL)
        ));
        text.push_str(&format!("Content-Length: {}\r\n", content_length));
        text.push_str("\r\n");

        text.into_bytes()
    }
}
