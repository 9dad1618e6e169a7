//! # Módulo HTTP
//!
//! Implementa la parte mínima del protocolo que usa el servidor de archivos:
//!
//! - Parsing de la request line (solo la primera línea)
//! - Construcción de los headers de respuesta
//! - Códigos de estado
//!
//! ### Formato de Request
//!
//! ```text
//! GET /index.html HTTP/1.1\r\n
//! (todo lo demás se ignora)
//! ```
//!
//! ### Formato de Response
//!
//! ```text
//! HTTP/1.1 200 OK\r\n
//! Server: RedUnix File Server\r\n
//! Date: <fecha>\r\n
//! File exists: true\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 13\r\n
//! \r\n
//! <bytes del archivo>
//! ```

pub mod request;   // Parsing de la request line
pub mod response;  // Construcción de headers
pub mod status;    // Códigos de estado HTTP

// Re-exportamos los tipos principales para facilitar su uso
pub use request::{Method, ParseError, RequestLine};
pub use response::{ResponseHead, SERVER_NAME};
pub use status::StatusCode;
