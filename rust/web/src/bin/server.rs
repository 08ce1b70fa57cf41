//! Standalone web server binary
//!
//! Usage: cargo run -p namewheel-web --bin namewheel-web-server

use namewheel_web::{LogFormat, ServerConfig, WebServer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let mut host = "127.0.0.1".to_string();
    let mut port = 8080u16;
    let mut log_format = LogFormat::Text;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--host" | "-h" => {
                if i + 1 < args.len() {
                    host = args[i + 1].clone();
                    i += 2;
                } else {
                    eprintln!("Error: --host requires a value");
                    std::process::exit(1);
                }
            }
            "--port" | "-p" => {
                if i + 1 < args.len() {
                    port = match args[i + 1].parse() {
                        Ok(port) => port,
                        Err(_) => {
                            eprintln!("Error: invalid port number");
                            std::process::exit(1);
                        }
                    };
                    i += 2;
                } else {
                    eprintln!("Error: --port requires a value");
                    std::process::exit(1);
                }
            }
            "--log-json" => {
                log_format = LogFormat::Json;
                i += 1;
            }
            "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
    }

    namewheel_web::init_logging(log_format)?;

    let config = ServerConfig::new(host, port);

    tracing::info!(host = %config.host(), port = config.port(), "starting namewheel web server");

    let server = WebServer::new(config);
    let handle = server.start().await?;

    tracing::info!("Server running at http://{}", handle.address());
    println!("\nServer running at http://{}", handle.address());
    println!("   Press Ctrl+C to stop\n");

    tokio::signal::ctrl_c().await?;

    tracing::info!("Shutting down server");
    handle.shutdown().await?;
    tracing::info!("Server stopped cleanly");

    Ok(())
}

fn print_help() {
    println!("Namewheel Web Server");
    println!();
    println!("Usage: namewheel-web-server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --host, -h <HOST>           Host to bind to (default: 127.0.0.1)");
    println!("  --port, -p <PORT>           Port to bind to (default: 8080)");
    println!("  --log-json                  Emit logs as JSON lines");
    println!("  --help                      Show this help message");
}
