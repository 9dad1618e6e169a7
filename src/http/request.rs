//! # Parsing de la Request Line
//! src/http/request.rs
//!
//! El servidor solo lee la primera línea de cada petición. Headers, body y
//! query string nunca se consumen.
//!
//! ## Formato
//!
//! ```text
//! <METHOD> <TARGET> [tokens ignorados...]
//! ```
//!
//! - El método se normaliza a mayúsculas.
//! - El target se normaliza a minúsculas.
//! - Cualquier token extra (por ejemplo `HTTP/1.1`) se ignora.

/// Métodos que el servidor sabe despachar
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// GET - Devuelve headers y contenido del archivo
    Get,

    /// HEAD - Como GET pero solo retorna headers
    Head,

    /// DELETE - Elimina el archivo del document root
    Delete,

    /// JOKE - Responde 418 sin body
    Joke,

    /// Cualquier otro token; se responde 501
    Other(String),
}

impl Method {
    /// Convierte un token (ya en mayúsculas) en un método
    ///
    /// Nunca falla: los tokens desconocidos terminan en `Method::Other`.
    pub fn from_token(token: &str) -> Self {
        match token {
            "GET" => Method::Get,
            "HEAD" => Method::Head,
            "DELETE" => Method::Delete,
            "JOKE" => Method::Joke,
            other => Method::Other(other.to_string()),
        }
    }

    /// Convierte el método a string
    pub fn as_str(&self) -> &str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Delete => "DELETE",
            Method::Joke => "JOKE",
            Method::Other(token) => token,
        }
    }
}

/// Request line parseada
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    /// Método HTTP (mayúsculas)
    method: Method,

    /// Target tal como llegó, en minúsculas (ej: "/index.html")
    target: String,
}

/// Errores que pueden ocurrir durante el parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No llegó ninguna línea (conexión cerrada o línea vacía)
    EmptyRequest,

    /// La línea tiene método pero no target
    MissingTarget,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::EmptyRequest => write!(f, "Empty request"),
            ParseError::MissingTarget => write!(f, "Request line has no target"),
        }
    }
}

impl std::error::Error for ParseError {}

impl RequestLine {
    /// Parsea una request line
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use file_server::http::{Method, RequestLine};
    ///
    /// let line = RequestLine::parse("get /Index.HTML HTTP/1.1").unwrap();
    /// assert_eq!(line.method(), &Method::Get);
    /// assert_eq!(line.target(), "/index.html");
    /// ```
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();

        let method = tokens.next().ok_or(ParseError::EmptyRequest)?;
        let target = tokens.next().ok_or(ParseError::MissingTarget)?;

        Ok(RequestLine {
            method: Method::from_token(&method.to_uppercase()),
            target: target.to_lowercase(),
        })
    }

    /// Obtiene el método
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Obtiene el target (en minúsculas)
    pub fn target(&self) -> &str {
        &self.target
    }
}
