//! # Detección de Content-Type
//! src/files/mime.rs
//!
//! Detección "best effort" por extensión usando `mime_guess`. Una extensión
//! desconocida no es un error: simplemente no hay tipo y el header se envía
//! como `null`.

use std::path::Path;

/// Retorna el MIME type de un archivo según su extensión
///
/// # Ejemplo
/// ```
/// use file_server::files::content_type;
/// use std::path::Path;
///
/// assert_eq!(content_type(Path::new("www/index.html")), Some("text/html"));
/// assert_eq!(content_type(Path::new("www/README")), None);
/// ```
pub fn content_type(path: &Path) -> Option<&'static str> {
    mime_guess::from_path(path).first_raw()
}
