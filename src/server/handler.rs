//! # Connection Handler
//! src/server/handler.rs
//!
//! Procesa exactamente una conexión: lee una request line, resuelve el
//! archivo, ejecuta uno de los cinco comportamientos (GET, HEAD, DELETE,
//! JOKE u otro método), escribe la respuesta y cierra todo.
//!
//! ## Flujo
//!
//! ```text
//! READ_REQUEST_LINE ─┬─ parse ok ──> RESOLVE_FILE ─┬─ existe ───> METHOD_BEHAVIOR
//!                    │                             └─ no existe ─> 404 (página fallback)
//!                    │    (GET sobre un directorio o archivo ilegible ─> 404, `File exists: true`)
//!                    └─ parse falla ─> se descarta sin respuesta
//! (cualquier estado) ─> CLEANUP
//! ```
//!
//! Cada paso retorna `Result<_, HandlerError>`. Solo [`ConnectionHandler::run`]
//! absorbe los errores; el cierre de recursos lo hace el `Drop` de
//! [`Connection`], que siempre corre.

use crate::error::HandlerError;
use crate::files::{self, TargetFile};
use crate::http::{Method, ParseError, RequestLine, ResponseHead, StatusCode};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::{Shutdown, TcpStream};
use std::path::{Path, PathBuf};

/// Anotación de un DELETE exitoso
const DELETED: &str = "File has been successfully deleted";

/// Anotación de un DELETE rechazado
const NOT_DELETED: &str = "File has not been deleted";

/// Anotación del 418
const TEAPOT: &str = "This was defined in April Fools' joke in 1998";

/// Recursos de una conexión aceptada
///
/// Se adquieren en orden socket -> reader -> header_out -> data_out y se
/// liberan en orden inverso. Los campos están declarados en ese orden inverso
/// porque Rust los libera en orden de declaración.
pub struct Connection {
    /// Stream binario para el body
    data_out: BufWriter<TcpStream>,

    /// Stream de texto para los headers
    header_out: BufWriter<TcpStream>,

    /// Lector de la request line
    reader: BufReader<TcpStream>,

    /// Socket aceptado
    socket: TcpStream,
}

impl Connection {
    /// Envuelve un socket aceptado en sus streams de lectura y escritura
    pub fn open(socket: TcpStream) -> io::Result<Self> {
        let reader = BufReader::new(socket.try_clone()?);
        let header_out = BufWriter::new(socket.try_clone()?);
        let data_out = BufWriter::new(socket.try_clone()?);

        Ok(Self {
            data_out,
            header_out,
            reader,
            socket,
        })
    }

    /// Lee y parsea la primera línea de la petición
    ///
    /// Bytes que no son UTF-8 válido se reemplazan en vez de fallar.
    pub fn read_request_line(&mut self) -> Result<RequestLine, HandlerError> {
        let mut raw = Vec::new();
        if self.reader.read_until(b'\n', &mut raw)? == 0 {
            return Err(ParseError::EmptyRequest.into());
        }

        let line = String::from_utf8_lossy(&raw);
        Ok(RequestLine::parse(&line)?)
    }

    /// Escribe los headers y hace flush inmediato
    pub fn send_head(&mut self, head: &ResponseHead) -> io::Result<()> {
        self.header_out.write_all(&head.to_bytes())?;
        self.header_out.flush()
    }

    /// Escribe el body y hace flush
    pub fn send_body(&mut self, body: &[u8]) -> io::Result<()> {
        self.data_out.write_all(body)?;
        self.data_out.flush()
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        // Cada paso es independiente: un error no impide los siguientes
        let _ = self.data_out.flush();
        let _ = self.header_out.flush();
        let _ = self.socket.shutdown(Shutdown::Both);
    }
}

/// Resultado de una petición respondida
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Served {
    pub request: RequestLine,
    pub status: StatusCode,
}

/// Procesa una conexión de principio a fin
pub struct ConnectionHandler {
    stream: TcpStream,
    document_root: PathBuf,
    not_found_page: PathBuf,
}

impl ConnectionHandler {
    /// Crea un handler para un socket aceptado
    ///
    /// - `document_root`: directorio desde el que se sirven los archivos
    /// - `not_found_page`: archivo que se envía como body de todo 404
    pub fn new(
        stream: TcpStream,
        document_root: impl Into<PathBuf>,
        not_found_page: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stream,
            document_root: document_root.into(),
            not_found_page: not_found_page.into(),
        }
    }

    /// Corre el handler hasta el final
    ///
    /// Nunca falla: los errores se reportan en consola y la conexión se
    /// cierra igual. Retorna el código enviado, o `None` si la petición se
    /// descartó sin respuesta completa.
    pub fn run(self) -> Option<StatusCode> {
        let peer = self
            .stream
            .peer_addr()
            .map(|addr| addr.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        let mut conn = match Connection::open(self.stream) {
            Ok(conn) => conn,
            Err(e) => {
                eprintln!("[!] {}: no se pudieron abrir los streams: {}", peer, e);
                return None;
            }
        };

        let result = process(&mut conn, &self.document_root, &self.not_found_page);
        drop(conn);

        match result {
            Ok(served) => {
                println!(
                    "[+] {} {} {} -> {}",
                    peer,
                    served.request.method().as_str(),
                    served.request.target(),
                    served.status
                );
                Some(served.status)
            }
            Err(e) => {
                eprintln!("[!] {}: petición descartada ({})", peer, e);
                None
            }
        }
    }
}

/// Lee la petición y la responde; un archivo inexistente o ilegible va al camino 404
fn process(
    conn: &mut Connection,
    document_root: &Path,
    not_found_page: &Path,
) -> Result<Served, HandlerError> {
    let request = conn.read_request_line()?;

    let status = match respond(conn, document_root, &request) {
        Err(HandlerError::NotFound { exists, .. }) => respond_not_found(conn, not_found_page, exists)?,
        other => other?,
    };

    Ok(Served { request, status })
}

/// Despacha el método sobre un archivo existente
fn respond(
    conn: &mut Connection,
    document_root: &Path,
    request: &RequestLine,
) -> Result<StatusCode, HandlerError> {
    let target = TargetFile::inspect(files::resolve(document_root, request.target()));

    if !target.exists() {
        return Err(HandlerError::NotFound {
            path: target.path().to_path_buf(),
            exists: false,
        });
    }

    let status = match request.method() {
        Method::Get => {
            let data = target.read().map_err(|e| unreadable(&target, e))?;
            conn.send_head(&file_head(StatusCode::Ok, &target))?;
            conn.send_body(&data)?;
            StatusCode::Ok
        }
        Method::Head => {
            conn.send_head(&file_head(StatusCode::Ok, &target))?;
            StatusCode::Ok
        }
        Method::Delete => {
            if target.delete() {
                let head = ResponseHead::new(StatusCode::Ok)
                    .with_annotation(DELETED)
                    .file_exists(false)
                    .content(None, None);
                conn.send_head(&head)?;
                StatusCode::Ok
            } else {
                let head = file_head(StatusCode::Unauthorized, &target).with_annotation(NOT_DELETED);
                conn.send_head(&head)?;
                StatusCode::Unauthorized
            }
        }
        Method::Joke => {
            let head = file_head(StatusCode::ImATeapot, &target).with_annotation(TEAPOT);
            conn.send_head(&head)?;
            StatusCode::ImATeapot
        }
        Method::Other(_) => {
            conn.send_head(&file_head(StatusCode::NotImplemented, &target))?;
            StatusCode::NotImplemented
        }
    };

    Ok(status)
}

/// Responde 404 con la página fallback como body
///
/// Si la página no se puede leer no se envía nada y el error sube.
fn respond_not_found(
    conn: &mut Connection,
    not_found_page: &Path,
    requested_exists: bool,
) -> Result<StatusCode, HandlerError> {
    let fallback = TargetFile::inspect(not_found_page);
    let data = fallback.read()?;

    let head = ResponseHead::new(StatusCode::NotFound)
        .file_exists(requested_exists)
        .content(fallback.content_type(), Some(fallback.length()));

    conn.send_head(&head)?;
    conn.send_body(&data)?;
    Ok(StatusCode::NotFound)
}

/// Clasifica un error al leer un archivo que existía
///
/// Directorios, archivos sin permiso de lectura o que desaparecieron entre la
/// inspección y la lectura van al camino 404. El resto queda como error de I/O.
fn unreadable(target: &TargetFile, e: io::Error) -> HandlerError {
    let path = target.path();
    let not_a_file = path.is_dir()
        || matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied);

    if not_a_file {
        HandlerError::NotFound {
            path: path.to_path_buf(),
            exists: path.exists(),
        }
    } else {
        e.into()
    }
}

/// Headers que describen un archivo existente
fn file_head(status: StatusCode, target: &TargetFile) -> ResponseHead {
    ResponseHead::new(status)
        .file_exists(target.exists())
        .content(target.content_type(), Some(target.length()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Read;
    use std::net::TcpListener;
    use std::thread;

    /// Document root temporal con una página 404 propia
    struct Fixture {
        root: PathBuf,
        not_found: PathBuf,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let base = std::env::temp_dir()
                .join(format!("file_server_handler_{}_{}", name, std::process::id()));
            let _ = fs::remove_dir_all(&base);
            let root = base.join("www");
            fs::create_dir_all(&root).unwrap();

            let not_found = base.join("NotFound.html");
            fs::write(&not_found, b"<h1>404</h1>").unwrap();

            Self { root, not_found }
        }

        fn file(&self, name: &str, content: &[u8]) -> PathBuf {
            let path = self.root.join(name);
            fs::write(&path, content).unwrap();
            path
        }

        /// Envía `request` a un handler y retorna (status, bytes recibidos)
        fn exchange(&self, request: &[u8]) -> (Option<StatusCode>, Vec<u8>) {
            let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
            let addr = listener.local_addr().unwrap();
            let root = self.root.clone();
            let not_found = self.not_found.clone();

            let t = thread::spawn(move || {
                let (stream, _) = listener.accept().unwrap();
                ConnectionHandler::new(stream, root, not_found).run()
            });

            let mut client = TcpStream::connect(addr).unwrap();
            client.write_all(request).unwrap();
            client.shutdown(Shutdown::Write).unwrap();

            let mut buf = Vec::new();
            client.read_to_end(&mut buf).unwrap();

            (t.join().unwrap(), buf)
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            if let Some(base) = self.root.parent() {
                let _ = fs::remove_dir_all(base);
            }
        }
    }

    fn split(response: &[u8]) -> (String, Vec<u8>) {
        let pos = response
            .windows(4)
            .position(|w| w == b"\r\n\r\n")
            .expect("header terminator");
        (
            String::from_utf8_lossy(&response[..pos + 4]).to_string(),
            response[pos + 4..].to_vec(),
        )
    }

    // ==================== Métodos ====================

    #[test]
    fn test_get_sends_file() {
        let fx = Fixture::new("get");
        fx.file("hello.txt", b"hello world");

        let (status, response) = fx.exchange(b"GET /hello.txt HTTP/1.1\r\n\r\n");
        let (head, body) = split(&response);

        assert_eq!(status, Some(StatusCode::Ok));
        assert!(head.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(head.contains("Content-Type: text/plain\r\n"));
        assert!(head.contains("Content-Length: 11\r\n"));
        assert_eq!(body, b"hello world");
    }

    #[test]
    fn test_head_has_no_body() {
        let fx = Fixture::new("head");
        fx.file("page.html", b"<p>hi</p>");

        let (status, response) = fx.exchange(b"HEAD /page.html HTTP/1.1\r\n");
        let (head, body) = split(&response);

        assert_eq!(status, Some(StatusCode::Ok));
        assert!(head.contains("Content-Length: 9\r\n"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_delete_removes_file() {
        let fx = Fixture::new("delete");
        let path = fx.file("old.txt", b"bye");

        let (status, response) = fx.exchange(b"DELETE /old.txt HTTP/1.1\r\n");
        let (head, _) = split(&response);

        assert_eq!(status, Some(StatusCode::Ok));
        assert!(head.starts_with("HTTP/1.1 200 OK\r\nFile has been successfully deleted\r\n"));
        assert!(head.contains("File exists: false\r\n"));
        assert!(head.contains("Content-Type: null\r\n"));
        assert!(head.contains("Content-Length: null\r\n"));
        assert!(!path.exists());
    }

    #[test]
    fn test_delete_refused() {
        let fx = Fixture::new("refused");
        let dir = fx.root.join("locked");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("keep.txt"), b"x").unwrap();

        let (status, response) = fx.exchange(b"DELETE /locked HTTP/1.1\r\n");
        let (head, _) = split(&response);

        assert_eq!(status, Some(StatusCode::Unauthorized));
        assert!(head.starts_with("HTTP/1.1 401 Unauthorized\r\nFile has not been deleted\r\n"));
        assert!(head.contains("File exists: true\r\n"));
        assert!(dir.exists());
    }

    #[test]
    fn test_joke_is_teapot() {
        let fx = Fixture::new("joke");
        fx.file("tea.txt", b"earl grey");

        let (status, response) = fx.exchange(b"joke /tea.txt\r\n");
        let (head, body) = split(&response);

        assert_eq!(status, Some(StatusCode::ImATeapot));
        assert!(head.starts_with("HTTP/1.1 418 I'm a teapot\r\n"));
        assert!(head.contains(TEAPOT));
        assert!(head.contains("Content-Length: 9\r\n"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_unknown_method_is_501() {
        let fx = Fixture::new("other");
        fx.file("a.txt", b"abc");

        let (status, response) = fx.exchange(b"PUT /a.txt HTTP/1.1\r\n");
        let (head, body) = split(&response);

        assert_eq!(status, Some(StatusCode::NotImplemented));
        assert!(head.starts_with("HTTP/1.1 501 Not Implemented\r\n"));
        assert!(head.contains("Content-Length: 3\r\n"));
        assert!(body.is_empty());
    }

    #[test]
    fn test_target_is_lowercased() {
        let fx = Fixture::new("case");
        fx.file("lower.txt", b"low");

        let (status, _) = fx.exchange(b"GET /LOWER.TXT HTTP/1.1\r\n");
        assert_eq!(status, Some(StatusCode::Ok));
    }

    // ==================== 404 ====================

    #[test]
    fn test_missing_file_serves_fallback() {
        let fx = Fixture::new("missing");

        for method in ["GET", "HEAD", "DELETE", "JOKE", "PATCH"] {
            let request = format!("{} /nope.txt HTTP/1.1\r\n", method);
            let (status, response) = fx.exchange(request.as_bytes());
            let (head, body) = split(&response);

            assert_eq!(status, Some(StatusCode::NotFound), "method {}", method);
            assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
            assert!(head.contains("File exists: false\r\n"));
            assert!(head.contains("Content-Type: text/html\r\n"));
            assert!(head.contains("Content-Length: 12\r\n"));
            assert_eq!(body, b"<h1>404</h1>");
        }
    }

    #[test]
    fn test_missing_fallback_sends_nothing() {
        let fx = Fixture::new("no_fallback");
        fs::remove_file(&fx.not_found).unwrap();

        let (status, response) = fx.exchange(b"GET /nope.txt HTTP/1.1\r\n");

        assert_eq!(status, None);
        assert!(response.is_empty());
    }

    // ==================== Peticiones malformadas ====================

    #[test]
    fn test_single_token_is_dropped() {
        let fx = Fixture::new("single");

        let (status, response) = fx.exchange(b"GET\r\n");

        assert_eq!(status, None);
        assert!(response.is_empty());
    }

    #[test]
    fn test_peer_closed_immediately() {
        let fx = Fixture::new("closed");

        let (status, response) = fx.exchange(b"");

        assert_eq!(status, None);
        assert!(response.is_empty());
    }

    #[test]
    fn test_get_directory_serves_fallback() {
        let fx = Fixture::new("dir");
        fs::create_dir_all(fx.root.join("sub")).unwrap();

        for request in ["GET / HTTP/1.1\r\n", "GET /sub HTTP/1.1\r\n"] {
            let (status, response) = fx.exchange(request.as_bytes());
            let (head, body) = split(&response);

            assert_eq!(status, Some(StatusCode::NotFound), "request {:?}", request);
            assert!(head.starts_with("HTTP/1.1 404 Not Found\r\n"));
            assert!(head.contains("File exists: true\r\n"));
            assert!(head.contains("Content-Length: 12\r\n"));
            assert_eq!(body, b"<h1>404</h1>");
        }
    }

    #[test]
    fn test_unreadable_classification() {
        let fx = Fixture::new("unreadable");
        let file = TargetFile::inspect(fx.file("plain.txt", b"x"));
        let dir = TargetFile::inspect(fx.root.clone());

        let denied = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        assert!(matches!(
            unreadable(&file, denied),
            HandlerError::NotFound { exists: true, .. }
        ));

        let other = io::Error::new(io::ErrorKind::Other, "disk");
        assert!(matches!(
            unreadable(&dir, other),
            HandlerError::NotFound { exists: true, .. }
        ));

        let broken = io::Error::new(io::ErrorKind::UnexpectedEof, "eof");
        assert!(matches!(unreadable(&file, broken), HandlerError::Io(_)));
    }
}
