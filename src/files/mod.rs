//! # Acceso a Archivos del Document Root
//! src/files/mod.rs
//!
//! Resolución de targets a rutas, inspección de archivos (existencia,
//! tamaño, MIME type), lectura y borrado.
//!
//! ## Limitaciones conocidas
//!
//! - La ruta se arma concatenando `document_root`, un separador y el target
//!   sin su `/` inicial. Los segmentos `..` NO se normalizan, así que un
//!   target puede salir del document root.
//! - Solo se quita un `/` inicial si existe: un target sin `/` (ej:
//!   `index.html`) se agrega tal cual, sin perder su primer carácter.
//! - [`read_data`] hace una sola lectura; si el sistema operativo entrega
//!   menos bytes, el resto del buffer queda en cero y la respuesta sigue
//!   anunciando el largo original.

pub mod mime;

pub use mime::content_type;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf, MAIN_SEPARATOR_STR};

/// Convierte un target de la request line en una ruta del sistema de archivos
///
/// # Ejemplo
/// ```
/// use file_server::files::resolve;
/// use std::path::{Path, PathBuf};
///
/// let path = resolve(Path::new("www"), "/docs/a.txt");
/// assert_eq!(path, PathBuf::from("www/docs/a.txt"));
/// ```
pub fn resolve(document_root: &Path, raw_target: &str) -> PathBuf {
    let relative = raw_target.strip_prefix('/').unwrap_or(raw_target);

    // Concatenación literal: un target "//x" no debe convertirse en ruta absoluta
    let mut path = OsString::from(document_root.as_os_str());
    path.push(MAIN_SEPARATOR_STR);
    path.push(relative);
    PathBuf::from(path)
}

/// Metadatos del archivo pedido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFile {
    path: PathBuf,
    exists: bool,
    length: u64,
    content_type: Option<&'static str>,
}

impl TargetFile {
    /// Consulta existencia, tamaño y MIME type de una ruta
    ///
    /// Nunca falla: un archivo inexistente tiene largo 0 y `exists == false`.
    /// Un archivo vacío existente también tiene largo 0 pero `exists == true`.
    pub fn inspect(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let exists = path.exists();
        let length = fs::metadata(&path).map(|meta| meta.len()).unwrap_or(0);
        let content_type = content_type(&path);

        Self {
            path,
            exists,
            length,
            content_type,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Lee el contenido completo del archivo
    pub fn read(&self) -> io::Result<Vec<u8>> {
        read_data(&self.path, self.length)
    }

    /// Intenta borrar el archivo (o directorio vacío)
    ///
    /// Retorna `true` si después del intento la ruta ya no existe. Los
    /// errores del sistema de archivos se reflejan solo en el resultado.
    pub fn delete(&self) -> bool {
        let result = if self.path.is_dir() {
            fs::remove_dir(&self.path)
        } else {
            fs::remove_file(&self.path)
        };

        if let Err(e) = result {
            eprintln!("[!] No se pudo borrar {}: {}", self.path.display(), e);
        }

        !self.path.exists()
    }
}

/// Lee `length` bytes de un archivo en una sola operación bloqueante
///
/// El descriptor se cierra en todos los caminos (incluyendo errores de
/// lectura) porque `File` se libera al salir del scope.
pub fn read_data(path: &Path, length: u64) -> io::Result<Vec<u8>> {
    let mut file = File::open(path)?;
    let mut data = vec![0u8; length as usize];

    let read = file.read(&mut data)?;
    if read < data.len() {
        eprintln!(
            "[!] Lectura corta en {}: {} de {} bytes",
            path.display(),
            read,
            length
        );
    }

    Ok(data)
}
