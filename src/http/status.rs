//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado que puede devolver el servidor
//! de archivos. Son pocos porque el servidor solo conoce cinco caminos:
//!
//! - **2xx**: Éxito (200 OK para GET/HEAD y para un DELETE exitoso)
//! - **4xx**: Error del cliente (401 si el DELETE fue rechazado, 404, 418)
//! - **5xx**: Error del servidor (501 para métodos desconocidos)

/// Representa los códigos de estado HTTP que soporta nuestro servidor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 401 Unauthorized - El sistema de archivos rechazó el DELETE
    Unauthorized = 401,

    /// 404 Not Found - El archivo pedido no existe
    NotFound = 404,

    /// 418 I'm a teapot - Respuesta al método JOKE
    ImATeapot = 418,

    /// 501 Not Implemented - Método que el servidor no conoce
    NotImplemented = 501,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    ///
    /// # Ejemplo
    /// ```
    /// use file_server::http::StatusCode;
    /// assert_eq!(StatusCode::NotFound.reason_phrase(), "Not Found");
    /// assert_eq!(StatusCode::ImATeapot.reason_phrase(), "I'm a teapot");
    /// ```
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::NotFound => "Not Found",
            StatusCode::ImATeapot => "I'm a teapot",
            StatusCode::NotImplemented => "Not Implemented",
        }
    }
}

impl std::fmt::Display for StatusCode {
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_values() {
        assert_eq!(StatusCode::Ok.as_u16(), 200);
        assert_eq!(StatusCode::Unauthorized.as_u16(), 401);
        assert_eq!(StatusCode::NotFound.as_u16(), 404);
        assert_eq!(StatusCode::ImATeapot.as_u16(), 418);
        assert_eq!(StatusCode::NotImplemented.as_u16(), 501);
    }

    #[test]
    fn test_reason_phrases() {
        assert_eq!(StatusCode::Ok.reason_phrase(), "OK");
        assert_eq!(StatusCode::Unauthorized.reason_phrase(), "Unauthorized");
        assert_eq!(StatusCode::NotImplemented.reason_phrase(), "Not Implemented");
    }

    #[test]
    fn test_display() {
        assert_eq!(StatusCode::Ok.to_string(), "200 OK");
        assert_eq!(StatusCode::ImATeapot.to_string(), "418 I'm a teapot");
        assert_eq!(StatusCode::NotImplemented.to_string(), "501 Not Implemented");
    }
}
