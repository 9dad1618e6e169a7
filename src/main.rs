//! # File Server - Entry Point
//! src/main.rs
//!
//! Uso: `file_server <document_root> <port>`

use file_server::config::Config;
use file_server::server::Server;

fn main() {
    // clap termina el proceso con el mensaje de uso si los argumentos son inválidos
    let config = Config::from_args();

    if let Err(e) = config.validate() {
        eprintln!("💥 Configuración inválida: {}", e);
        std::process::exit(1);
    }

    config.print_summary();

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            eprintln!("💥 Error fatal: no se pudo escuchar en {}: {}", config.address(), e);
            std::process::exit(1);
        }
    };

    // Solo retorna si el socket de escucha falla
    let error = server.run();
    eprintln!("💥 Servidor detenido: {}", error);
    std::process::exit(1);
}
